//! Breadth-first route discovery over a pool snapshot.
//!
//! The pool graph is implicit: the pool list is scanned directly and
//! acyclicity is enforced per route, via the set of pool ids and input
//! denoms the route has already used. Each in-progress route is an
//! independent owned sequence, cloned on branch and never mutated after
//! being stored, so branching is safe during the expansion.

use liqbot_domain::Pool;

use crate::route::{Route, RouteHop};

/// Default hop cap for discovery.
///
/// Deep enough for the multi-hop chains that show up between long-tail
/// collateral and the settlement asset, while keeping expansion
/// deterministic on cyclic pool graphs.
pub const DEFAULT_MAX_HOPS: usize = 5;

/// Enumerates every simple route from `token_in` to `token_out`.
///
/// A route never reuses a pool, never revisits a denom it has already
/// swapped out of, and never exceeds `max_hops` hops. Equal source and
/// target yield no routes. No ordering is guaranteed among the results.
#[must_use]
pub fn find_routes(
    pools: &[Pool],
    token_in: &str,
    token_out: &str,
    max_hops: usize,
) -> Vec<Route> {
    let mut complete_routes: Vec<Route> = Vec::new();
    if token_in == token_out || max_hops == 0 {
        return complete_routes;
    }

    // Seed the frontier with every pool touching the source denom.
    let mut frontier: Vec<Route> = Vec::new();
    for pool in pools {
        let Some(next_denom) = pool.other_denom(token_in) else {
            continue;
        };
        let route = vec![RouteHop {
            pool_id: pool.id,
            token_in_denom: token_in.to_string(),
            token_out_denom: next_denom.to_string(),
            pool: pool.clone(),
        }];
        if next_denom == token_out {
            complete_routes.push(route);
        } else if max_hops > 1 {
            frontier.push(route);
        }
    }

    while !frontier.is_empty() {
        let mut extended: Vec<Route> = Vec::new();
        for route in &frontier {
            let used_pool_ids: Vec<u64> = route.iter().map(|hop| hop.pool_id).collect();
            let used_denoms: Vec<&str> =
                route.iter().map(|hop| hop.token_in_denom.as_str()).collect();
            let last_denom = route
                .last()
                .map(|hop| hop.token_out_denom.as_str())
                .unwrap_or(token_in);

            for pool in pools {
                let Some(next_denom) = pool.other_denom(last_denom) else {
                    continue;
                };
                if used_pool_ids.contains(&pool.id)
                    || used_denoms.contains(&pool.token0.as_str())
                    || used_denoms.contains(&pool.token1.as_str())
                {
                    continue;
                }

                let mut branched = route.clone();
                branched.push(RouteHop {
                    pool_id: pool.id,
                    token_in_denom: last_denom.to_string(),
                    token_out_denom: next_denom.to_string(),
                    pool: pool.clone(),
                });

                // A route is complete the moment it reaches the target and
                // is never extended further.
                if next_denom == token_out {
                    complete_routes.push(branched);
                } else if branched.len() < max_hops {
                    extended.push(branched);
                }
            }
        }
        frontier = extended;
    }

    complete_routes
}

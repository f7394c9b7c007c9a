//! Route evaluation and best-route selection.
//!
//! The router holds the current pool snapshot and folds the swap math
//! engine along candidate routes. Numeric edge cases inside a hop are
//! recovered into a zero score for the whole route; the selection helpers
//! then treat zero-scored routes as non-viable.

use liqbot_domain::Pool;
use rust_decimal::Decimal;
use tracing::{debug, warn};

use crate::discovery::{DEFAULT_MAX_HOPS, find_routes};
use crate::math::{SwapResult, in_given_out, out_given_in};
use crate::route::Route;

/// Provides routes to swap between any two given assets.
#[derive(Debug, Clone, Default)]
pub struct AmmRouter {
    pools: Vec<Pool>,
    max_hops: usize,
}

impl AmmRouter {
    /// Creates an empty router with the default hop cap.
    #[must_use]
    pub fn new() -> Self {
        Self {
            pools: Vec::new(),
            max_hops: DEFAULT_MAX_HOPS,
        }
    }

    /// Sets the route-length cap used by discovery.
    #[must_use]
    pub fn with_max_hops(mut self, max_hops: usize) -> Self {
        self.max_hops = max_hops;
        self
    }

    /// Replaces the pool snapshot.
    pub fn set_pools(&mut self, pools: Vec<Pool>) {
        self.pools = pools;
    }

    /// The current pool snapshot.
    #[must_use]
    pub fn pools(&self) -> &[Pool] {
        &self.pools
    }

    /// Looks a pool up by id.
    #[must_use]
    pub fn pool(&self, id: u64) -> Option<&Pool> {
        self.pools.iter().find(|pool| pool.id == id)
    }

    /// Every simple route between the two denoms in the current snapshot.
    #[must_use]
    pub fn get_routes(&self, token_in: &str, token_out: &str) -> Vec<Route> {
        find_routes(&self.pools, token_in, token_out, self.max_hops)
    }

    /// Expected output of swapping `amount_in` along `route`, net of fees.
    ///
    /// A hop that errors or exhausts its liquidity makes the whole route
    /// yield zero; the route is topologically valid but worthless for this
    /// amount.
    #[must_use]
    pub fn get_output(&self, amount_in: Decimal, route: &Route) -> Decimal {
        if amount_in.is_zero() {
            warn!("cannot estimate output for a zero input amount");
            return Decimal::ZERO;
        }

        let mut amount = amount_in;
        for hop in route {
            match out_given_in(&hop.pool, &hop.token_in_denom, &hop.token_out_denom, amount) {
                Ok(SwapResult::Amount(out)) => amount = out,
                Ok(SwapResult::Exhausted) => {
                    debug!(
                        pool_id = hop.pool_id,
                        token_in = %hop.token_in_denom,
                        "pool liquidity exhausted, route is non-viable"
                    );
                    return Decimal::ZERO;
                }
                Err(error) => {
                    debug!(pool_id = hop.pool_id, %error, "hop failed, route is non-viable");
                    return Decimal::ZERO;
                }
            }
        }
        amount
    }

    /// Input required to receive `amount_out` from `route`, fees included.
    ///
    /// Folds the hops right to left: the required input of hop `i+1` is the
    /// required output of hop `i`. Failures score the route as zero, which
    /// the inverse selection excludes.
    #[must_use]
    pub fn get_required_input(&self, amount_out: Decimal, route: &Route) -> Decimal {
        if amount_out.is_zero() {
            warn!("cannot estimate required input for a zero output amount");
            return Decimal::ZERO;
        }

        let mut amount = amount_out;
        for hop in route.iter().rev() {
            match in_given_out(&hop.pool, &hop.token_in_denom, &hop.token_out_denom, amount) {
                Ok(SwapResult::Amount(input)) => amount = input,
                Ok(SwapResult::Exhausted) => {
                    debug!(
                        pool_id = hop.pool_id,
                        token_out = %hop.token_out_denom,
                        "pool liquidity exhausted, route is non-viable"
                    );
                    return Decimal::ZERO;
                }
                Err(error) => {
                    debug!(pool_id = hop.pool_id, %error, "hop failed, route is non-viable");
                    return Decimal::ZERO;
                }
            }
        }
        amount
    }

    /// The candidate with the strictly greatest forward output.
    ///
    /// Ties resolve to the earliest candidate; `None` means no viable route.
    #[must_use]
    pub fn best_route_for_input<'a>(
        &self,
        amount_in: Decimal,
        routes: &'a [Route],
    ) -> Option<&'a Route> {
        let mut best: Option<(&Route, Decimal)> = None;
        for route in routes {
            let output = self.get_output(amount_in, route);
            debug!(hops = route.len(), %output, "scored candidate route");
            if output.is_zero() {
                continue;
            }
            match best {
                Some((_, best_output)) if output <= best_output => {}
                _ => best = Some((route, output)),
            }
        }
        best.map(|(route, _)| route)
    }

    /// The candidate with the strictly smallest required input.
    ///
    /// Candidates whose required input evaluates to zero or less are
    /// starved or invalid and never win. Ties resolve to the earliest
    /// candidate; `None` means no viable route.
    #[must_use]
    pub fn best_route_for_output<'a>(
        &self,
        amount_out: Decimal,
        routes: &'a [Route],
    ) -> Option<&'a Route> {
        let mut best: Option<(&Route, Decimal)> = None;
        for route in routes {
            let input = self.get_required_input(amount_out, route);
            debug!(hops = route.len(), %input, "scored candidate route");
            if input <= Decimal::ZERO {
                continue;
            }
            match best {
                Some((_, best_input)) if input >= best_input => {}
                _ => best = Some((route, input)),
            }
        }
        best.map(|(route, _)| route)
    }

    /// Discovers routes and picks the one with the highest output for
    /// `amount_in`. Empty when no viable route exists.
    #[must_use]
    pub fn get_best_route_given_input(
        &self,
        token_in: &str,
        token_out: &str,
        amount_in: Decimal,
    ) -> Route {
        let candidates = self.get_routes(token_in, token_out);
        self.best_route_for_input(amount_in, &candidates)
            .cloned()
            .unwrap_or_default()
    }

    /// Discovers routes and picks the one with the lowest required input
    /// for `amount_out`. Empty when no viable route exists.
    #[must_use]
    pub fn get_best_route_given_output(
        &self,
        token_in: &str,
        token_out: &str,
        amount_out: Decimal,
    ) -> Route {
        let candidates = self.get_routes(token_in, token_out);
        self.best_route_for_output(amount_out, &candidates)
            .cloned()
            .unwrap_or_default()
    }
}

//! Route and hop types.

use liqbot_domain::Pool;
use serde::{Deserialize, Serialize};

/// One edge traversal: a swap through a single pool.
///
/// The hop owns a snapshot of the pool it swaps through, so a route stays
/// an independent value after the snapshot it was discovered against is
/// refreshed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteHop {
    /// Id of the pool swapped through.
    pub pool_id: u64,
    /// Denom sold into the pool.
    pub token_in_denom: String,
    /// Denom bought out of the pool.
    pub token_out_denom: String,
    /// The pool snapshot used for this hop.
    pub pool: Pool,
}

/// An ordered sequence of hops; hop `i`'s output denom is hop `i+1`'s
/// input denom. The first hop's input and the last hop's output are the
/// route's overall input/output.
pub type Route = Vec<RouteHop>;

//! Route discovery, valuation and selection across AMM pools.
//!
//! This crate takes a pool snapshot and answers two questions for the
//! executor: which multi-hop paths connect two denoms, and what does each
//! path yield (forward output for a given input, or required input for a
//! target output) under the exact pricing curve of every pool on the path.

/// Breadth-first route discovery over a pool snapshot.
pub mod discovery;
/// Swap math error taxonomy.
pub mod error;
/// Per-variant swap math (constant product, concentrated liquidity, stable swap).
pub mod math;
/// Route and hop types.
pub mod route;
/// Route evaluation and best-route selection.
pub mod router;

pub use discovery::{DEFAULT_MAX_HOPS, find_routes};
pub use error::SwapError;
pub use math::{SwapResult, in_given_out, out_given_in};
pub use route::{Route, RouteHop};
pub use router::AmmRouter;

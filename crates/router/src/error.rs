//! Swap math error taxonomy.
//!
//! Errors here mark a hop as unusable for a given amount; the route
//! evaluator recovers them into a non-viable route score instead of
//! propagating them through the whole search.

use thiserror::Error;

/// Failure of a single swap computation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SwapError {
    /// The pool does not carry the requested denom.
    #[error("denom {0} is not in the pool")]
    DenomNotInPool(String),
    /// The requested output meets or exceeds the available reserve.
    #[error("requested output exceeds pool reserves")]
    InsufficientReserves,
    /// A tick index converts to a price outside the representable range.
    #[error("tick index out of representable price range")]
    TickOutOfRange,
    /// The stable-swap invariant solver did not converge.
    #[error("stable-swap solver did not converge")]
    NoConvergence,
    /// Stable-swap liquidity and scaling-factor vectors differ in length.
    #[error("scaling factors do not match pool liquidity")]
    MismatchedScalingFactors,
}

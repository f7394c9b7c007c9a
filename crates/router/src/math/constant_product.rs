//! Constant-product (x*y=k) swap math.
//!
//! `x` is always the reserve of the denom being sold into the pool and `y`
//! the reserve of the denom being bought, looked up by denom by the caller.
//! Amounts here are gross of fees; the dispatch layer applies the fee
//! convention.

use rust_decimal::Decimal;

use crate::error::SwapError;

/// Output of `y` for selling `x_change` into the pool.
///
/// `dy = (dx / (x + dx)) * y`
pub fn calculate_output(x: Decimal, y: Decimal, x_change: Decimal) -> Result<Decimal, SwapError> {
    let divisor = x + x_change;
    if divisor <= Decimal::ZERO {
        return Err(SwapError::InsufficientReserves);
    }
    Ok(x_change / divisor * y)
}

/// Input of `x` required to buy `y_change` out of the pool.
///
/// `dx = (dy / (y - dy)) * x`
///
/// A requested output that meets or exceeds the reserve would zero or flip
/// the sign of the divisor and is rejected.
pub fn calculate_required_input(
    x: Decimal,
    y: Decimal,
    y_change: Decimal,
) -> Result<Decimal, SwapError> {
    let divisor = y - y_change;
    if divisor <= Decimal::ZERO {
        return Err(SwapError::InsufficientReserves);
    }
    Ok(y_change / divisor * x)
}

/// Price impact of selling `x_change`, in basis points.
///
/// Compares the effective settlement price (input paid per unit of output)
/// against the spot price before the trade.
pub fn calculate_slippage_bps(
    x: Decimal,
    y: Decimal,
    x_change: Decimal,
) -> Result<Decimal, SwapError> {
    if y.is_zero() {
        return Err(SwapError::InsufficientReserves);
    }
    let initial_price = x / y;
    if initial_price.is_zero() {
        return Err(SwapError::InsufficientReserves);
    }
    let output = calculate_output(x, y, x_change)?;
    if output.is_zero() {
        return Err(SwapError::InsufficientReserves);
    }
    let settlement_price = x_change / output;
    let difference = settlement_price - initial_price;
    // percentage, then basis points
    Ok(difference / initial_price * Decimal::from(100) * Decimal::from(100))
}

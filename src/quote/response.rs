use bigdecimal::num_bigint::BigInt;
use bigdecimal::{BigDecimal, Zero};
use serde::Deserialize;
use std::str::FromStr;

/// Wire shape of a ticker response. Extra fields are ignored; each required
/// field must be a JSON number, a quoted number is rejected.
#[derive(Debug, Deserialize)]
pub struct TickerResponse {
    pub price_24h: serde_json::Number,
    pub volume_24h: serde_json::Number,
    pub last_trade_price: serde_json::Number,
}

/// Largest decimal exponent, either way, a field may carry. Covers every
/// finite double including subnormals.
const MAX_EXPONENT: i64 = 350;

/// One point-in-time ticker reading for a symbol pair.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(try_from = "TickerResponse")]
pub struct TickerSnapshot {
    pub price_24h: BigDecimal,
    pub volume_24h: BigDecimal,
    pub last_trade_price: BigDecimal,
}

impl TickerSnapshot {
    pub fn new(price_24h: BigDecimal, volume_24h: BigDecimal, last_trade_price: BigDecimal) -> Self {
        Self {
            price_24h,
            volume_24h,
            last_trade_price,
        }
    }

    /// Builds a snapshot from fixed-point parts, e.g. `(5918311, 2)` is `59183.11`.
    pub fn from_scaled(price_24h: (i64, i64), volume_24h: (i64, i64), last_trade_price: (i64, i64)) -> Self {
        let scaled = |(digits, scale): (i64, i64)| BigDecimal::new(BigInt::from(digits), scale);
        Self::new(scaled(price_24h), scaled(volume_24h), scaled(last_trade_price))
    }

    /// Stand-in shown when no ticker could be fetched.
    pub fn error() -> Self {
        Self::new(BigDecimal::zero(), BigDecimal::zero(), BigDecimal::zero())
    }

    /// Reference price minus last trade price.
    pub fn difference(&self) -> BigDecimal {
        &self.price_24h - &self.last_trade_price
    }
}

/// Parses one field, rejecting numbers a double cannot hold.
fn decimal_field(name: &str, number: &serde_json::Number) -> Result<BigDecimal, String> {
    if number.as_f64().filter(|f| f.is_finite()).is_none() {
        return Err(format!("`{}` is out of range: {}", name, number));
    }

    // arbitrary_precision keeps the number text as sent
    let value = BigDecimal::from_str(number.as_str())
        .map_err(|e| format!("`{}` is not a decimal: {}", name, e))?;

    if value.fractional_digit_count().abs() > MAX_EXPONENT {
        return Err(format!("`{}` exponent is out of range: {}", name, number));
    }

    Ok(value)
}

impl TryFrom<TickerResponse> for TickerSnapshot {
    type Error = String;

    fn try_from(resp: TickerResponse) -> Result<Self, Self::Error> {
        Ok(Self::new(
            decimal_field("price_24h", &resp.price_24h)?,
            decimal_field("volume_24h", &resp.volume_24h)?,
            decimal_field("last_trade_price", &resp.last_trade_price)?,
        ))
    }
}

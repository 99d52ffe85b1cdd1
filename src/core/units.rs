//! Native value units and USD accounting precision

use anyhow::{Result, anyhow};
use rust_decimal::Decimal;
use std::str::FromStr;

/// Native amount in its smallest denomination.
pub type Wei = u128;

/// USD amount scaled by `10^USD_DECIMALS`.
pub type Usd = u128;

pub const ETHER_DECIMALS: u32 = 18;
pub const WEI_PER_ETHER: Wei = 1_000_000_000_000_000_000;
pub const USD_DECIMALS: u32 = 18;

/// Scales a whole-dollar amount into accounting precision.
pub const fn usd(dollars: u128) -> Usd {
    dollars * 10u128.pow(USD_DECIMALS)
}

/// Parses a decimal ether amount such as `"0.025"` into wei.
pub fn parse_ether(value: &str) -> Result<Wei> {
    let decimal = Decimal::from_str(value.trim())
        .map_err(|e| anyhow!("Invalid ether amount {}: {}", value, e))?;
    if decimal.is_sign_negative() && !decimal.is_zero() {
        return Err(anyhow!("Ether amount must not be negative: {}", value));
    }

    let scale = decimal.scale();
    if scale > ETHER_DECIMALS {
        return Err(anyhow!(
            "Ether amount {} has more than {} decimal places",
            value,
            ETHER_DECIMALS
        ));
    }

    decimal
        .mantissa()
        .unsigned_abs()
        .checked_mul(10u128.pow(ETHER_DECIMALS - scale))
        .ok_or_else(|| anyhow!("Ether amount out of range: {}", value))
}

/// Formats wei as a decimal ether string without trailing zeros.
pub fn format_ether(wei: Wei) -> String {
    i128::try_from(wei)
        .ok()
        .and_then(|w| Decimal::try_from_i128_with_scale(w, ETHER_DECIMALS).ok())
        .map(|d| d.normalize().to_string())
        .unwrap_or_else(|| format!("{wei} wei"))
}

/// Formats an accounting-precision USD amount with two decimals.
pub fn format_usd(amount: Usd) -> String {
    let cents = amount / 10u128.pow(USD_DECIMALS - 2);
    format!("${}.{:02}", cents / 100, cents % 100)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_ether() {
        assert_eq!(parse_ether("1").unwrap(), WEI_PER_ETHER);
        assert_eq!(parse_ether("0.025").unwrap(), 25_000_000_000_000_000);
        assert_eq!(parse_ether(" 10000 ").unwrap(), 10_000 * WEI_PER_ETHER);
        assert_eq!(parse_ether("0.000000000000000001").unwrap(), 1);
        assert_eq!(parse_ether("0").unwrap(), 0);
    }

    #[test]
    fn test_parse_ether_rejects_invalid() {
        assert!(parse_ether("-1").is_err());
        assert!(parse_ether("abc").is_err());
        assert!(parse_ether("0.0000000000000000001").is_err());
    }

    #[test]
    fn test_format_ether() {
        assert_eq!(format_ether(WEI_PER_ETHER), "1");
        assert_eq!(format_ether(25_000_000_000_000_000), "0.025");
        assert_eq!(format_ether(0), "0");
        assert_eq!(format_ether(u128::MAX), format!("{} wei", u128::MAX));
    }

    #[test]
    fn test_format_usd() {
        assert_eq!(format_usd(usd(50)), "$50.00");
        assert_eq!(format_usd(usd(50) - 2000), "$49.99");
        assert_eq!(format_usd(0), "$0.00");
    }
}

// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// Copyright (c) THOUGHT VERSE CONTRIBUTORS. All rights reserved.

//! Conversion between decimal display strings and integer base units.
//!
//! Monetary values cross the contract boundary as wei held in a [`U256`].
//! Users type ether (18 decimals); platform shares are typed as percentages
//! and stored as basis points (2 decimals of a percent).

use alloy_primitives::{utils, U256};

use crate::error::{Error, Result};

/// Decimals of one ether expressed in wei.
pub const ETHER_DECIMALS: usize = 18;

/// Decimals of a percentage expressed in basis points.
pub const PERCENT_DECIMALS: usize = 2;

/// Basis points in 100%.
pub const MAX_BASIS_POINTS: u64 = 10_000;

/// Parses a decimal ether string such as `"0.05"` into wei.
///
/// # Errors
///
/// Fails on empty or non-numeric input, negative values, more than 18
/// fractional digits, or values that do not fit in 256 bits.
pub fn parse_ether(input: &str) -> Result<U256> {
    let (whole, fraction) = split_decimal(input, ETHER_DECIMALS)?;
    let normalized = if fraction.is_empty() {
        whole.to_string()
    } else {
        format!("{whole}.{fraction}")
    };
    utils::parse_ether(&normalized).map_err(|_| Error::InvalidAmount {
        input: input.to_string(),
        reason: "amount too large",
    })
}

/// Formats wei as ether, trimming trailing zeros but keeping one decimal
/// (`1 ether` -> `"1.0"`, `5 * 10^16 wei` -> `"0.05"`).
#[must_use]
pub fn format_ether(amount: U256) -> String {
    let formatted = utils::format_ether(amount);
    match formatted.split_once('.') {
        Some((whole, fraction)) => join_decimal(whole, fraction),
        None => join_decimal(&formatted, ""),
    }
}

/// Parses a percentage such as `"2.5"` into basis points.
///
/// # Errors
///
/// Fails on empty or non-numeric input, more than two decimals, and values
/// above 100%.
pub fn parse_percent(input: &str) -> Result<U256> {
    let (whole, fraction) = split_decimal(input, PERCENT_DECIMALS)?;
    let above = || Error::InvalidAmount {
        input: input.to_string(),
        reason: "percentage above 100",
    };

    // more than three whole digits is above 100 whatever they are
    if whole.trim_start_matches('0').len() > 3 {
        return Err(above());
    }
    let width = PERCENT_DECIMALS;
    let digits = format!("{whole}{fraction:0<width$}");
    let bps: u64 = digits.parse().map_err(|_| above())?;
    if bps > MAX_BASIS_POINTS {
        return Err(above());
    }
    Ok(U256::from(bps))
}

/// Formats basis points as a percentage (`250` -> `"2.5"`).
#[must_use]
pub fn format_percent(bps: U256) -> String {
    let (whole, fraction) = bps.div_rem(U256::from(100u64));
    // the remainder is below 100
    let fraction = u64::try_from(fraction).unwrap_or_default();
    let width = PERCENT_DECIMALS;
    join_decimal(&whole.to_string(), &format!("{fraction:0>width$}"))
}

/// Splits an unsigned decimal string into whole and fractional digits,
/// defaulting an empty whole part to `0`.
fn split_decimal(input: &str, decimals: usize) -> Result<(&str, &str)> {
    let invalid = |reason| Error::InvalidAmount {
        input: input.to_string(),
        reason,
    };

    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(invalid("empty amount"));
    }
    if trimmed.starts_with('-') {
        return Err(invalid("negative amount"));
    }

    let (whole, fraction) = trimmed.split_once('.').unwrap_or((trimmed, ""));
    if whole.is_empty() && fraction.is_empty() {
        return Err(invalid("not a number"));
    }
    if !whole.bytes().all(|b| b.is_ascii_digit()) || !fraction.bytes().all(|b| b.is_ascii_digit())
    {
        return Err(invalid("not a number"));
    }
    if fraction.len() > decimals {
        return Err(invalid("too many decimal places"));
    }

    Ok((if whole.is_empty() { "0" } else { whole }, fraction))
}

fn join_decimal(whole: &str, fraction: &str) -> String {
    let trimmed = fraction.trim_end_matches('0');
    if trimmed.is_empty() {
        format!("{whole}.0")
    } else {
        format!("{whole}.{trimmed}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ETHER: u128 = 1_000_000_000_000_000_000;

    fn wei(amount: u128) -> U256 {
        U256::from(amount)
    }

    #[test]
    fn parses_ether_strings() {
        assert_eq!(parse_ether("1").unwrap(), wei(ETHER));
        assert_eq!(parse_ether("0.05").unwrap(), wei(ETHER / 20));
        assert_eq!(parse_ether(".5").unwrap(), wei(ETHER / 2));
        assert_eq!(parse_ether("2.").unwrap(), wei(2 * ETHER));
        assert_eq!(parse_ether(" 0.0002 ").unwrap(), wei(200_000_000_000_000));
        assert_eq!(parse_ether("0.000000000000000001").unwrap(), wei(1));
    }

    #[test]
    fn amounts_beyond_128_bits_parse() {
        // 10^40 ether is 10^58 wei, far past u128::MAX
        let amount = parse_ether(&format!("1{}", "0".repeat(40))).unwrap();
        assert_eq!(amount, U256::from(10u64).pow(U256::from(58u64)));
        assert!(amount > U256::from(u128::MAX));
        assert_eq!(format_ether(amount), format!("1{}.0", "0".repeat(40)));
    }

    #[test]
    fn rejects_bad_ether_strings() {
        for input in ["", "  ", "abc", "-1", "1.2.3", ".", "1e18", "0.0000000000000000001"] {
            assert!(parse_ether(input).is_err(), "{input:?} should be rejected");
        }
        assert!(parse_ether(&"9".repeat(80)).is_err());
    }

    #[test]
    fn formats_ether() {
        assert_eq!(format_ether(U256::ZERO), "0.0");
        assert_eq!(format_ether(wei(ETHER)), "1.0");
        assert_eq!(format_ether(wei(ETHER / 20)), "0.05");
        assert_eq!(format_ether(wei(1)), "0.000000000000000001");
        assert_eq!(format_ether(wei(3 * ETHER / 2)), "1.5");
    }

    #[test]
    fn percentages_use_basis_points() {
        assert_eq!(parse_percent("2.5").unwrap(), U256::from(250));
        assert_eq!(parse_percent("100").unwrap(), U256::from(MAX_BASIS_POINTS));
        assert_eq!(parse_percent("0100.00").unwrap(), U256::from(MAX_BASIS_POINTS));
        assert!(parse_percent("100.01").is_err());
        assert!(parse_percent("2.555").is_err());
        assert!(parse_percent(&"9".repeat(30)).is_err());
        assert_eq!(format_percent(U256::from(250)), "2.5");
        assert_eq!(format_percent(U256::from(5)), "0.05");
        assert_eq!(format_percent(U256::ZERO), "0.0");
    }
}

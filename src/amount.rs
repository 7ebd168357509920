//! Monetary amounts and their display formatting.
//!
//! Statement inputs distinguish between a cell that carries no data and a cell
//! whose amount is zero.  [`Amount`] keeps that distinction explicit so the
//! formatter can render the former as an empty cell and the latter as `$0.00`.

use std::fmt;
use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize, Serializer};

/// Sigil printed in front of every formatted amount.
pub const CURRENCY_SIGIL: &str = "$";

const DISPLAY_DECIMALS: u32 = 2;

/// A monetary cell value that may be absent.
///
/// JSON numbers and numeric strings deserialize to [`Amount::Present`], while
/// `null` and the empty string deserialize to [`Amount::Absent`].  Fields that
/// are missing altogether fall back to [`Amount::default`], which is a present
/// zero.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Amount {
    /// A known amount, possibly zero.
    Present(Decimal),
    /// No data for this cell.
    Absent,
}

impl Amount {
    /// Returns the contained value, if any.
    pub fn value(&self) -> Option<Decimal> {
        match self {
            Amount::Present(value) => Some(*value),
            Amount::Absent => None,
        }
    }
}

impl Default for Amount {
    fn default() -> Self {
        Amount::Present(Decimal::ZERO)
    }
}

impl From<Decimal> for Amount {
    fn from(value: Decimal) -> Self {
        Amount::Present(value)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_currency(self))
    }
}

/// Formats an amount as a currency string with exactly two decimal places.
///
/// Absent amounts produce an empty string.  Present amounts are rounded half
/// away from zero; negative values place the sign before the sigil
/// (`-$12.30`), and a value that rounds to zero is never signed.
pub fn format_currency(amount: &Amount) -> String {
    match amount {
        Amount::Absent => String::new(),
        Amount::Present(value) => {
            let rounded = value
                .round_dp_with_strategy(DISPLAY_DECIMALS, RoundingStrategy::MidpointAwayFromZero);
            let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
                "-"
            } else {
                ""
            };
            format!(
                "{}{}{:.prec$}",
                sign,
                CURRENCY_SIGIL,
                rounded.abs(),
                prec = DISPLAY_DECIMALS as usize
            )
        }
    }
}

impl Serialize for Amount {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Amount::Present(value) => Serialize::serialize(value, serializer),
            Amount::Absent => serializer.serialize_none(),
        }
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(AmountVisitor)
    }
}

struct AmountVisitor;

impl<'de> Visitor<'de> for AmountVisitor {
    type Value = Amount;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a number, a numeric string, an empty string or null")
    }

    fn visit_i64<E: de::Error>(self, value: i64) -> Result<Amount, E> {
        Ok(Amount::Present(Decimal::from(value)))
    }

    fn visit_u64<E: de::Error>(self, value: u64) -> Result<Amount, E> {
        Ok(Amount::Present(Decimal::from(value)))
    }

    fn visit_f64<E: de::Error>(self, value: f64) -> Result<Amount, E> {
        // Parse the shortest round-trip representation so 0.1 stays 0.1.
        Decimal::from_str(&value.to_string())
            .or_else(|_| Decimal::from_scientific(&format!("{:e}", value)))
            .map(Amount::Present)
            .map_err(|_| E::custom(format!("amount {} is out of range", value)))
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<Amount, E> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Ok(Amount::Absent);
        }
        Decimal::from_str(trimmed)
            .map(Amount::Present)
            .map_err(|_| E::invalid_value(de::Unexpected::Str(value), &self))
    }

    fn visit_unit<E: de::Error>(self) -> Result<Amount, E> {
        Ok(Amount::Absent)
    }

    fn visit_none<E: de::Error>(self) -> Result<Amount, E> {
        Ok(Amount::Absent)
    }

    fn visit_some<D>(self, deserializer: D) -> Result<Amount, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn present(text: &str) -> Amount {
        Amount::Present(Decimal::from_str(text).unwrap())
    }

    #[test]
    fn absent_formats_as_empty() {
        assert_eq!(format_currency(&Amount::Absent), "");
    }

    #[test]
    fn zero_is_not_absent() {
        assert_eq!(format_currency(&Amount::default()), "$0.00");
        assert_eq!(format_currency(&present("0")), "$0.00");
    }

    #[test]
    fn pads_to_two_decimals() {
        assert_eq!(format_currency(&present("1234.5")), "$1234.50");
        assert_eq!(format_currency(&present("5")), "$5.00");
        assert_eq!(format_currency(&present("1000000")), "$1000000.00");
    }

    #[test]
    fn negative_sign_precedes_sigil() {
        assert_eq!(format_currency(&present("-12.3")), "-$12.30");
        assert_eq!(format_currency(&present("-0.5")), "-$0.50");
    }

    #[test]
    fn rounds_half_away_from_zero() {
        assert_eq!(format_currency(&present("2.345")), "$2.35");
        assert_eq!(format_currency(&present("-2.345")), "-$2.35");
        assert_eq!(format_currency(&present("2.344")), "$2.34");
    }

    #[test]
    fn negative_values_rounding_to_zero_are_unsigned() {
        assert_eq!(format_currency(&present("-0.001")), "$0.00");
    }

    #[test]
    fn display_matches_formatter() {
        assert_eq!(present("7.1").to_string(), "$7.10");
        assert_eq!(Amount::Absent.to_string(), "");
    }

    #[test]
    fn deserializes_numbers_strings_and_null() {
        let values: Vec<Amount> =
            serde_json::from_str(r#"[12.5, 3, -4, "8.25", "", null, 0.1]"#).unwrap();
        assert_eq!(
            values,
            vec![
                present("12.5"),
                present("3"),
                present("-4"),
                present("8.25"),
                Amount::Absent,
                Amount::Absent,
                present("0.1"),
            ]
        );
    }

    #[test]
    fn rejects_non_numeric_strings() {
        assert!(serde_json::from_str::<Amount>(r#""twelve""#).is_err());
        assert!(serde_json::from_str::<Amount>("true").is_err());
    }

    #[test]
    fn serializes_absent_as_null() {
        assert_eq!(serde_json::to_string(&Amount::Absent).unwrap(), "null");
        assert_eq!(serde_json::to_string(&present("12.5")).unwrap(), "12.5");
    }
}

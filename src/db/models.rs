//! Data models for the expenses table
//!
//! Rows are mapped column by column into `Expense`; amounts travel as whole
//! cents so totals never pick up floating point noise.

use crate::error::{ExpenseError, Result};
use chrono::NaiveDate;
use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row};
use std::fmt;
use std::iter::Sum;
use std::str::FromStr;

/// A monetary amount with exactly two fractional digits
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct Amount(i64);

impl Amount {
    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    pub const fn cents(self) -> i64 {
        self.0
    }

    /// Value bound into the NUMERIC column
    pub fn as_decimal(self) -> f64 {
        self.0 as f64 / 100.0
    }
}

impl FromStr for Amount {
    type Err = ExpenseError;

    /// Parse user input such as `20`, `15.25` or `-3.5`.
    ///
    /// More than two fractional digits round half away from zero, the way
    /// `numeric(6,2)` stores them. Sign and range are left to the table's
    /// CHECK constraint.
    fn from_str(s: &str) -> Result<Self> {
        let invalid = || ExpenseError::ConstraintViolation(format!("'{}' is not a valid amount", s));

        let raw = s.trim();
        let (negative, unsigned) = match raw.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, raw.strip_prefix('+').unwrap_or(raw)),
        };

        let (whole, frac) = unsigned.split_once('.').unwrap_or((unsigned, ""));
        if whole.is_empty() && frac.is_empty() {
            return Err(invalid());
        }
        if !whole.bytes().all(|b| b.is_ascii_digit()) || !frac.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }

        // i64 cents overflow long before this, and the column caps at 9999.99 anyway
        if whole.trim_start_matches('0').len() > 12 {
            return Err(ExpenseError::ConstraintViolation(format!(
                "'{}' is out of range",
                s
            )));
        }

        let whole_value: i64 = if whole.is_empty() {
            0
        } else {
            whole.parse().map_err(|_| invalid())?
        };

        let mut digits = frac.bytes().map(|b| i64::from(b - b'0'));
        let tenths = digits.next().unwrap_or(0);
        let hundredths = digits.next().unwrap_or(0);
        let round_up = digits.next().is_some_and(|d| d >= 5);

        let cents = whole_value * 100 + tenths * 10 + hundredths + i64::from(round_up);
        Ok(Self(if negative { -cents } else { cents }))
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        f.pad(&format!("{}{}.{:02}", sign, abs / 100, abs % 100))
    }
}

impl Sum for Amount {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        Self(iter.map(|a| a.0).sum())
    }
}

impl<'a> Sum<&'a Amount> for Amount {
    fn sum<I: Iterator<Item = &'a Amount>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

/// One row of the expenses table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expense {
    pub id: i64,
    pub amount: Amount,
    pub memo: String,
    pub created_on: NaiveDate,
}

impl<'r> FromRow<'r, SqliteRow> for Expense {
    fn from_row(row: &'r SqliteRow) -> sqlx::Result<Self> {
        Ok(Self {
            id: row.try_get("id")?,
            amount: Amount::from_cents(row.try_get("amount_cents")?),
            memo: row.try_get("memo")?,
            created_on: row.try_get("created_on")?,
        })
    }
}

/// Result of deleting a single expense by id
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// The row existed; these are its contents before removal
    Deleted(Expense),
    /// No row had this id, nothing was removed
    NotFound(i64),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(s: &str) -> Amount {
        s.parse().unwrap()
    }

    #[test]
    fn test_parse_amounts() {
        assert_eq!(parse("20").cents(), 2000);
        assert_eq!(parse("15.25").cents(), 1525);
        assert_eq!(parse("5.").cents(), 500);
        assert_eq!(parse(".5").cents(), 50);
        assert_eq!(parse(" 0.01 ").cents(), 1);
        assert_eq!(parse("+3.1").cents(), 310);
    }

    #[test]
    fn test_parse_keeps_sign_and_zero() {
        // the table's CHECK constraint is what rejects these
        assert_eq!(parse("-4.50").cents(), -450);
        assert_eq!(parse("0.00").cents(), 0);
    }

    #[test]
    fn test_parse_rounds_extra_digits() {
        assert_eq!(parse("1.005").cents(), 101);
        assert_eq!(parse("1.004").cents(), 100);
        assert_eq!(parse("-2.999").cents(), -300);
    }

    #[test]
    fn test_parse_rejects_non_numeric() {
        for bad in ["abc", "", ".", "1.2.3", "12a", "1,50", "--1", "1e3"] {
            let err = bad.parse::<Amount>().unwrap_err();
            assert!(
                matches!(err, ExpenseError::ConstraintViolation(_)),
                "expected constraint violation for {:?}",
                bad
            );
        }
    }

    #[test]
    fn test_parse_rejects_huge_values() {
        assert!("1234567890123456789".parse::<Amount>().is_err());
    }

    #[test]
    fn test_display_two_decimals_and_padding() {
        assert_eq!(Amount::from_cents(2000).to_string(), "20.00");
        assert_eq!(Amount::from_cents(7).to_string(), "0.07");
        assert_eq!(Amount::from_cents(-450).to_string(), "-4.50");
        assert_eq!(format!("{:>8}", Amount::from_cents(1525)), "   15.25");
    }

    #[test]
    fn test_sum_in_cents() {
        let amounts = [Amount::from_cents(10), Amount::from_cents(20)];
        let total: Amount = amounts.iter().sum();
        assert_eq!(total.to_string(), "0.30");
    }
}

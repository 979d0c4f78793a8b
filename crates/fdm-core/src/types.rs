//! Core data types for company search and yearly statements.
//!
//! This module defines the records produced by the manager:
//!
//! - [`Symbol`] - Trading symbol/ticker
//! - [`CompanyRecord`] - A validated company search hit
//! - [`IncomeEntry`] - Income statement fields for one year
//! - [`CashFlowEntry`] - Cash flow statement fields for one year
//! - [`CombinedEntry`] - Union of both shapes for one year
//! - [`YearlyMap`] - Mapping from calendar year key to an entry

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// A trading symbol/ticker.
///
/// Symbols are automatically uppercased on creation.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Symbol(String);

impl Symbol {
    /// Creates a new symbol from a string, converting to uppercase.
    #[must_use]
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into().to_uppercase())
    }

    /// Returns the symbol as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Symbol {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::new(s))
    }
}

impl From<&str> for Symbol {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for Symbol {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

/// A company search hit that passed schema validation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyRecord {
    /// Ticker symbol, exactly as listed by the API.
    pub symbol: String,
    /// Company name.
    pub name: String,
    /// ISO currency code the listing trades in.
    pub currency: String,
    /// Exchange the listing trades on.
    pub stock_exchange: String,
}

/// Calendar year key (e.g. `"2023"`) mapped to a per-year entry.
///
/// Keys iterate in ascending order.
pub type YearlyMap<T> = BTreeMap<String, T>;

/// Income statement fields for one calendar year.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct IncomeEntry {
    /// Total revenue.
    pub revenue: Option<f64>,
    /// Gross profit.
    pub gross_profit: Option<f64>,
    /// Earnings per share.
    pub eps: Option<f64>,
    /// EBITDA.
    pub ebitda: Option<f64>,
}

/// Cash flow statement fields for one calendar year.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CashFlowEntry {
    /// Operating cash flow.
    pub operating_cash_flow: Option<f64>,
    /// Capital expenditure.
    pub capital_expenditure: Option<f64>,
    /// Free cash flow.
    pub free_cash_flow: Option<f64>,
}

/// Income and cash flow fields for one calendar year.
///
/// A side is `None` when its statement had no record for the year; the
/// serialized form then omits that side's fields entirely.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct CombinedEntry {
    /// Income statement fields, if the year was reported.
    #[serde(flatten)]
    pub income: Option<IncomeEntry>,
    /// Cash flow fields, if the year was reported.
    #[serde(flatten)]
    pub cash_flow: Option<CashFlowEntry>,
}

impl CombinedEntry {
    /// Returns true if both statements reported this year.
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.income.is_some() && self.cash_flow.is_some()
    }
}

//! Reshaping of raw statement records into per-year mappings.
//!
//! FMP returns statements as a JSON array of flat objects, most recent
//! period first. The functions here pick a fixed set of fields out of each
//! object and index them by `calendarYear`. Extraction is strict: a record
//! without `calendarYear` or without one of the picked fields fails the whole
//! call instead of being skipped.

use serde_json::{Map, Value};

use crate::error::{FinanceError, Result};
use crate::types::{CashFlowEntry, CombinedEntry, IncomeEntry, YearlyMap};

const CALENDAR_YEAR: &str = "calendarYear";

/// Indexes income statement records by calendar year.
///
/// If two records share a year the later one wins.
pub fn income_by_year(records: &[Value]) -> Result<YearlyMap<IncomeEntry>> {
    index_by_year(records, |index, record| {
        Ok(IncomeEntry {
            revenue: number(index, record, "revenue")?,
            gross_profit: number(index, record, "grossProfit")?,
            eps: number(index, record, "eps")?,
            ebitda: number(index, record, "ebitda")?,
        })
    })
}

/// Indexes cash flow statement records by calendar year.
///
/// If two records share a year the later one wins.
pub fn cash_flow_by_year(records: &[Value]) -> Result<YearlyMap<CashFlowEntry>> {
    index_by_year(records, |index, record| {
        Ok(CashFlowEntry {
            operating_cash_flow: number(index, record, "operatingCashFlow")?,
            capital_expenditure: number(index, record, "capitalExpenditure")?,
            free_cash_flow: number(index, record, "freeCashFlow")?,
        })
    })
}

/// Merges income and cash flow mappings on matching year keys.
///
/// Every year present in either input gets an entry; a side that did not
/// report the year stays `None`.
#[must_use]
pub fn merge_by_year(
    income: YearlyMap<IncomeEntry>,
    cash_flow: YearlyMap<CashFlowEntry>,
) -> YearlyMap<CombinedEntry> {
    let mut combined: YearlyMap<CombinedEntry> = YearlyMap::new();

    for (year, entry) in income {
        combined.entry(year).or_default().income = Some(entry);
    }
    for (year, entry) in cash_flow {
        combined.entry(year).or_default().cash_flow = Some(entry);
    }

    combined
}

/// Revenue and gross profit series, oldest period first.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RevenueSeries {
    /// Revenue per period.
    pub revenue: Vec<Option<f64>>,
    /// Gross profit per period.
    pub gross_profit: Vec<Option<f64>>,
}

/// Extracts revenue and gross profit from income statement records.
///
/// The input is most recent first; both series come out reversed.
pub fn revenue_series(records: &[Value]) -> Result<RevenueSeries> {
    let mut series = RevenueSeries {
        revenue: Vec::with_capacity(records.len()),
        gross_profit: Vec::with_capacity(records.len()),
    };

    for (index, record) in records.iter().enumerate().rev() {
        let record = object(index, record)?;
        series.revenue.push(number(index, record, "revenue")?);
        series.gross_profit.push(number(index, record, "grossProfit")?);
    }

    Ok(series)
}

fn index_by_year<T, F>(records: &[Value], mut extract: F) -> Result<YearlyMap<T>>
where
    F: FnMut(usize, &Map<String, Value>) -> Result<T>,
{
    let mut by_year = YearlyMap::new();
    for (index, record) in records.iter().enumerate() {
        let record = object(index, record)?;
        let year = calendar_year(index, record)?;
        by_year.insert(year, extract(index, record)?);
    }
    Ok(by_year)
}

fn object(index: usize, record: &Value) -> Result<&Map<String, Value>> {
    record.as_object().ok_or(FinanceError::InvalidField {
        index,
        field: "record",
        expected: "an object",
    })
}

/// Calendar year as a string key; FMP sends a string, integers are accepted.
fn calendar_year(index: usize, record: &Map<String, Value>) -> Result<String> {
    match record.get(CALENDAR_YEAR) {
        None => Err(FinanceError::MissingField {
            index,
            field: CALENDAR_YEAR,
        }),
        Some(Value::String(year)) => Ok(year.clone()),
        Some(Value::Number(year)) if year.is_u64() || year.is_i64() => Ok(year.to_string()),
        Some(_) => Err(FinanceError::InvalidField {
            index,
            field: CALENDAR_YEAR,
            expected: "a string or integer",
        }),
    }
}

/// A required numeric field; an explicit `null` is allowed.
fn number(index: usize, record: &Map<String, Value>, field: &'static str) -> Result<Option<f64>> {
    match record.get(field) {
        None => Err(FinanceError::MissingField { index, field }),
        Some(Value::Null) => Ok(None),
        Some(Value::Number(n)) => Ok(n.as_f64()),
        Some(_) => Err(FinanceError::InvalidField {
            index,
            field,
            expected: "a number",
        }),
    }
}

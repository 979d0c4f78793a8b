//! Schema validation for company search results.
//!
//! [`CompanyValidator`] checks a raw search payload field by field and then
//! keeps only the listings quoted in US dollars.

use serde_json::{Map, Value};

use crate::error::{FieldError, ValidationError};
use crate::types::CompanyRecord;

/// Wire names of the fields every search record must carry.
const REQUIRED_FIELDS: [&str; 4] = ["symbol", "name", "currency", "stockExchange"];

/// Validates company search payloads and filters them to one currency.
#[derive(Clone, Copy, Debug, Default)]
pub struct CompanyValidator;

impl CompanyValidator {
    /// Currency a record must be quoted in to survive filtering.
    pub const CURRENCY: &'static str = "USD";

    /// Creates a validator.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Validates every record in `payload`, then filters to [`Self::CURRENCY`].
    ///
    /// Validation is all-or-nothing: a single bad field fails the whole batch
    /// and the error lists every problem found. The filter is stable, so the
    /// surviving records keep their input order. An empty array is valid and
    /// yields an empty vector.
    pub fn validate(&self, payload: &Value) -> Result<Vec<CompanyRecord>, ValidationError> {
        let records = self.validate_schema(payload)?;
        Ok(records
            .into_iter()
            .filter(|r| r.currency == Self::CURRENCY)
            .collect())
    }

    /// Validates the schema of every record without filtering.
    pub fn validate_schema(&self, payload: &Value) -> Result<Vec<CompanyRecord>, ValidationError> {
        let Some(items) = payload.as_array() else {
            return Err(ValidationError::new(vec![FieldError::batch(format!(
                "Expected a list of items but got type \"{}\".",
                json_type(payload)
            ))]));
        };

        let mut errors = Vec::new();
        let mut records = Vec::with_capacity(items.len());

        for (index, item) in items.iter().enumerate() {
            let Some(object) = item.as_object() else {
                errors.push(FieldError::record(
                    index,
                    format!(
                        "Invalid data. Expected a dictionary, but got {}.",
                        json_type(item)
                    ),
                ));
                continue;
            };
            if let Some(record) = validate_record(index, object, &mut errors) {
                records.push(record);
            }
        }

        if errors.is_empty() {
            Ok(records)
        } else {
            Err(ValidationError::new(errors))
        }
    }
}

fn validate_record(
    index: usize,
    object: &Map<String, Value>,
    errors: &mut Vec<FieldError>,
) -> Option<CompanyRecord> {
    let before = errors.len();
    let [symbol, name, currency, stock_exchange] =
        REQUIRED_FIELDS.map(|field| char_field(index, object, field, errors));

    if errors.len() > before {
        return None;
    }

    Some(CompanyRecord {
        symbol: symbol?,
        name: name?,
        currency: currency?,
        stock_exchange: stock_exchange?,
    })
}

/// Checks one required, non-blank string field; the value is trimmed.
fn char_field(
    index: usize,
    object: &Map<String, Value>,
    field: &'static str,
    errors: &mut Vec<FieldError>,
) -> Option<String> {
    let problem = match object.get(field) {
        None => "This field is required.",
        Some(Value::Null) => "This field may not be null.",
        Some(Value::String(s)) => {
            let trimmed = s.trim();
            if !trimmed.is_empty() {
                return Some(trimmed.to_string());
            }
            "This field may not be blank."
        }
        Some(_) => "Not a valid string.",
    };
    errors.push(FieldError::field(index, field, problem));
    None
}

const fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "str",
        Value::Array(_) => "list",
        Value::Object(_) => "dict",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn hit(symbol: &str, currency: &str) -> Value {
        json!({
            "symbol": symbol,
            "name": format!("{symbol} Inc."),
            "currency": currency,
            "stockExchange": "NASDAQ Global Select",
            "exchangeShortName": "NASDAQ"
        })
    }

    #[test]
    fn test_filters_to_usd_preserving_order() {
        let payload = json!([
            hit("TSLA", "USD"),
            hit("TL0.DE", "EUR"),
            hit("TSLA.MX", "MXN"),
            hit("TSLL", "USD"),
            hit("TSLQ", "USD"),
        ]);

        let records = CompanyValidator::new().validate(&payload).unwrap();
        let symbols: Vec<_> = records.iter().map(|r| r.symbol.as_str()).collect();
        assert_eq!(symbols, ["TSLA", "TSLL", "TSLQ"]);
        assert!(records.iter().all(|r| r.currency == "USD"));
        assert_eq!(records[0].stock_exchange, "NASDAQ Global Select");
    }

    #[test]
    fn test_empty_payload_is_valid() {
        let records = CompanyValidator::new().validate(&json!([])).unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn test_no_usd_records_yields_empty() {
        let payload = json!([hit("TL0.DE", "EUR"), hit("TL0.F", "EUR")]);
        let records = CompanyValidator::new().validate(&payload).unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn test_one_bad_record_fails_whole_batch() {
        let payload = json!([
            hit("TSLA", "USD"),
            {"symbol": "BAD", "name": "Bad Corp", "currency": "USD"},
        ]);

        let err = CompanyValidator::new().validate(&payload).unwrap_err();
        assert_eq!(err.kind(), "schema mismatch");
        assert_eq!(
            err.errors(),
            &[FieldError::field(1, "stockExchange", "This field is required.")]
        );
    }

    #[test]
    fn test_collects_every_field_error() {
        let payload = json!([
            {"symbol": 42, "name": null, "currency": "  ", "stockExchange": "NYSE"},
            "not a record",
        ]);

        let err = CompanyValidator::new().validate(&payload).unwrap_err();
        let problems: Vec<_> = err
            .errors()
            .iter()
            .map(|e| (e.index, e.field, e.problem.as_str()))
            .collect();
        assert_eq!(
            problems,
            [
                (Some(0), Some("symbol"), "Not a valid string."),
                (Some(0), Some("name"), "This field may not be null."),
                (Some(0), Some("currency"), "This field may not be blank."),
                (
                    Some(1),
                    None,
                    "Invalid data. Expected a dictionary, but got str."
                ),
            ]
        );
    }

    #[test]
    fn test_trims_whitespace() {
        let payload = json!([{
            "symbol": " TSLA ",
            "name": "Tesla, Inc.\n",
            "currency": "USD ",
            "stockExchange": "NASDAQ"
        }]);

        let records = CompanyValidator::new().validate(&payload).unwrap();
        assert_eq!(
            records,
            [CompanyRecord {
                symbol: "TSLA".into(),
                name: "Tesla, Inc.".into(),
                currency: "USD".into(),
                stock_exchange: "NASDAQ".into(),
            }]
        );
    }

    #[test]
    fn test_non_list_payload() {
        let err = CompanyValidator::new()
            .validate(&json!({"Error Message": "Invalid API KEY."}))
            .unwrap_err();
        assert_eq!(err.errors().len(), 1);
        assert_eq!(err.errors()[0].index, None);
        assert!(err.errors()[0].problem.contains("dict"));
    }
}

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/fdm/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Financial Modeling Prep (FMP) client.
//!
//! This crate implements [`FinanceDataManager`] on top of the
//! [Financial Modeling Prep](https://financialmodelingprep.com/) v3 API.
//!
//! # Usage
//!
//! ```rust,ignore
//! use fdm_core::{DebugLog, Symbol};
//! use fdm_fmp::FinanceDataManager;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let manager = FinanceDataManager::new("your_api_key")
//!         .with_log(DebugLog::append_to("output.txt")?);
//!
//!     let companies = manager.search_company("Tesla").await;
//!     let combined = manager.merge_financial_data(&Symbol::new("TSLA"), 5).await?;
//!
//!     Ok(())
//! }
//! ```

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use fdm_core::{
    CashFlowEntry, ChartRenderer, CombinedEntry, CompanyRecord, CompanyValidator, Credentials,
    DebugLog, FinanceError, IncomeEntry, LineChart, Result, Symbol, TableRenderer, YearlyMap,
    cash_flow_by_year, income_by_year, merge_by_year, revenue_series,
};
use reqwest::{Client, Response, Url};
use serde_json::Value;
use tracing::instrument::WithSubscriber;
use tracing::{debug, error};

/// Base URL for the FMP API.
const FMP_BASE_URL: &str = "https://financialmodelingprep.com/api";

const SEARCH: &str = "v3/search";
const INCOME_STATEMENT: &str = "v3/income-statement";
const CASH_FLOW_STATEMENT: &str = "v3/cash-flow-statement";

/// Key FMP uses for error payloads returned with a 200 status.
const ERROR_MESSAGE_KEY: &str = "Error Message";

/// Financial Modeling Prep data manager.
///
/// Provides:
/// - Company search, validated and filtered to USD listings
/// - Income and cash flow statements indexed by calendar year
/// - A per-year merge of both statements
/// - Income statement CSV export and revenue chart
///
/// Transport failures (connection errors, non-2xx statuses, FMP error
/// payloads, malformed JSON) are logged to the manager's [`DebugLog`] and
/// returned as `None`. Requests are issued one at a time and never retried.
#[derive(Clone)]
pub struct FinanceDataManager {
    client: Client,
    base_url: String,
    api_key: String,
    validator: CompanyValidator,
    log: DebugLog,
    renderer: Arc<dyn ChartRenderer>,
    output_dir: PathBuf,
}

impl fmt::Debug for FinanceDataManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FinanceDataManager")
            .field("base_url", &self.base_url)
            .field("api_key", &"[REDACTED]")
            .field("renderer", &self.renderer)
            .field("output_dir", &self.output_dir)
            .finish()
    }
}

impl FinanceDataManager {
    /// Create a new manager with the given API key.
    ///
    /// Logging is disabled, charts are printed as tables and CSV files are
    /// written to the current directory until configured otherwise.
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_client(Client::new(), api_key)
    }

    /// Create a new manager with a custom HTTP client.
    #[must_use]
    pub fn with_client(client: Client, api_key: impl Into<String>) -> Self {
        Self {
            client,
            base_url: FMP_BASE_URL.to_string(),
            api_key: api_key.into(),
            validator: CompanyValidator::new(),
            log: DebugLog::disabled(),
            renderer: Arc::new(TableRenderer),
            output_dir: PathBuf::from("."),
        }
    }

    /// Create a new manager from loaded credentials.
    #[must_use]
    pub fn from_credentials(credentials: &Credentials) -> Self {
        Self::new(credentials.api_key())
    }

    /// Point the manager at another server (e.g. a mock in tests).
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Route this manager's log events to `log`.
    #[must_use]
    pub fn with_log(mut self, log: DebugLog) -> Self {
        self.log = log;
        self
    }

    /// Use `renderer` for [`Self::plot_income_statement`].
    #[must_use]
    pub fn with_renderer(mut self, renderer: impl ChartRenderer + 'static) -> Self {
        self.renderer = Arc::new(renderer);
        self
    }

    /// Write CSV exports into `dir`.
    #[must_use]
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    /// Search companies by name.
    ///
    /// Returns the USD listings in API order, or `None` if the request failed
    /// or the results did not pass validation. An empty result set is
    /// `Some(vec![])`.
    pub async fn search_company(&self, name: &str) -> Option<Vec<CompanyRecord>> {
        async {
            let payload = match self.get_json(SEARCH, &[("query", name)]).await {
                Ok(payload) => payload,
                Err(e) => {
                    log_transport_error("search_company", &e);
                    return None;
                }
            };

            match self.validator.validate(&payload) {
                Ok(records) => {
                    debug!(query = name, count = records.len(), "Search results validated");
                    Some(records)
                }
                Err(e) => {
                    error!(query = name, error = %e, "Search results failed validation");
                    None
                }
            }
        }
        .with_subscriber(self.log.dispatch())
        .await
    }

    /// Fetch the last `years` income statements, indexed by calendar year.
    ///
    /// Returns `Ok(None)` on transport failure. A record missing
    /// `calendarYear` or one of the income fields is an error.
    pub async fn income_statement(
        &self,
        symbol: &Symbol,
        years: u32,
    ) -> Result<Option<YearlyMap<IncomeEntry>>> {
        check_years(years)?;
        async {
            let fetched = self.statement_records(INCOME_STATEMENT, symbol, years).await;
            match recover("income_statement", fetched)? {
                Some(records) => income_by_year(&records).map(Some),
                None => Ok(None),
            }
        }
        .with_subscriber(self.log.dispatch())
        .await
    }

    /// Fetch the last `years` cash flow statements, indexed by calendar year.
    ///
    /// Same failure policy as [`Self::income_statement`].
    pub async fn cash_flow_statement(
        &self,
        symbol: &Symbol,
        years: u32,
    ) -> Result<Option<YearlyMap<CashFlowEntry>>> {
        check_years(years)?;
        async {
            let fetched = self
                .statement_records(CASH_FLOW_STATEMENT, symbol, years)
                .await;
            match recover("cash_flow_statement", fetched)? {
                Some(records) => cash_flow_by_year(&records).map(Some),
                None => Ok(None),
            }
        }
        .with_subscriber(self.log.dispatch())
        .await
    }

    /// Fetch both statements and merge them per calendar year.
    ///
    /// Both requests are always made, one after the other. If either
    /// statement is unavailable the merge fails with
    /// [`FinanceError::SourceUnavailable`] rather than treating it as empty.
    pub async fn merge_financial_data(
        &self,
        symbol: &Symbol,
        years: u32,
    ) -> Result<YearlyMap<CombinedEntry>> {
        let income = self.income_statement(symbol, years).await?;
        let cash_flow = self.cash_flow_statement(symbol, years).await?;

        let income = income.ok_or(FinanceError::SourceUnavailable("income statement"))?;
        let cash_flow = cash_flow.ok_or(FinanceError::SourceUnavailable("cash flow statement"))?;

        Ok(merge_by_year(income, cash_flow))
    }

    /// Chart revenue and gross profit, oldest year first.
    ///
    /// Blocks on the configured renderer and returns the chart it was given,
    /// or `Ok(None)` on transport failure.
    pub async fn plot_income_statement(
        &self,
        symbol: &Symbol,
        years: u32,
    ) -> Result<Option<LineChart>> {
        check_years(years)?;
        async {
            let fetched = self.statement_records(INCOME_STATEMENT, symbol, years).await;
            let Some(records) = recover("plot_income_statement", fetched)? else {
                return Ok(None);
            };

            let chart = LineChart::income(
                format!("{symbol} income statement"),
                revenue_series(&records)?,
            );
            self.renderer.render(&chart)?;
            Ok(Some(chart))
        }
        .with_subscriber(self.log.dispatch())
        .await
    }

    /// Download the income statement as CSV into `{symbol}_income_statement.csv`.
    ///
    /// The response body is written byte for byte. Returns the path written,
    /// or `Ok(None)` on transport failure.
    pub async fn create_csv(&self, symbol: &Symbol, years: u32) -> Result<Option<PathBuf>> {
        check_years(years)?;
        async {
            let limit = years.to_string();
            let path = format!("{INCOME_STATEMENT}/{}", symbol.as_str());
            let fetched = self
                .get_bytes(&path, &[("datatype", "csv"), ("limit", limit.as_str())])
                .await;
            let Some(body) = recover("create_csv", fetched)? else {
                return Ok(None);
            };

            let file = self.output_dir.join(csv_file_name(symbol));
            tokio::fs::write(&file, &body).await?;
            debug!(path = %file.display(), bytes = body.len(), "Wrote income statement CSV");
            Ok(Some(file))
        }
        .with_subscriber(self.log.dispatch())
        .await
    }

    /// Build a URL with the query parameters and API key appended.
    fn url(&self, endpoint: &str, params: &[(&str, &str)]) -> Result<Url> {
        let raw = format!("{}/{endpoint}", self.base_url.trim_end_matches('/'));
        let mut url =
            Url::parse(&raw).map_err(|e| FinanceError::Network(format!("invalid URL: {e}")))?;
        {
            let mut query = url.query_pairs_mut();
            for (key, value) in params {
                query.append_pair(key, value);
            }
            query.append_pair("apikey", &self.api_key);
        }
        Ok(url)
    }

    /// Make a GET request, failing on non-success statuses.
    async fn send(&self, endpoint: &str, params: &[(&str, &str)]) -> Result<Response> {
        let url = self.url(endpoint, params)?;
        debug!("FMP request: {}", endpoint);

        // The URL carries the API key; keep it out of error messages.
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| FinanceError::Network(e.without_url().to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FinanceError::Http {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or("Unknown Status"),
            });
        }

        Ok(response)
    }

    /// Make a GET request and parse the JSON response.
    async fn get_json(&self, endpoint: &str, params: &[(&str, &str)]) -> Result<Value> {
        let text = self
            .send(endpoint, params)
            .await?
            .text()
            .await
            .map_err(|e| FinanceError::Network(e.without_url().to_string()))?;

        // Errors never carry the response body.
        let value: Value = serde_json::from_str(&text).map_err(|e| {
            FinanceError::Parse(format!("invalid JSON ({} bytes): {e}", text.len()))
        })?;

        // Check for FMP error responses
        if let Some(message) = value.get(ERROR_MESSAGE_KEY) {
            let message = message.as_str().map_or_else(|| message.to_string(), str::to_string);
            return Err(FinanceError::Api(message.escape_debug().to_string()));
        }

        Ok(value)
    }

    /// Make a GET request and return the raw body.
    async fn get_bytes(&self, endpoint: &str, params: &[(&str, &str)]) -> Result<Vec<u8>> {
        let bytes = self
            .send(endpoint, params)
            .await?
            .bytes()
            .await
            .map_err(|e| FinanceError::Network(e.without_url().to_string()))?;
        Ok(bytes.to_vec())
    }

    /// Fetch raw statement records from a `{endpoint}/{symbol}` resource.
    async fn statement_records(
        &self,
        endpoint: &str,
        symbol: &Symbol,
        years: u32,
    ) -> Result<Vec<Value>> {
        let limit = years.to_string();
        let path = format!("{endpoint}/{}", symbol.as_str());
        match self.get_json(&path, &[("limit", limit.as_str())]).await? {
            Value::Array(records) => Ok(records),
            other => Err(FinanceError::Parse(format!(
                "expected a JSON array of statements, got {}",
                json_type(&other)
            ))),
        }
    }
}

/// File name of the CSV export for `symbol`.
#[must_use]
pub fn csv_file_name(symbol: &Symbol) -> String {
    format!("{symbol}_income_statement.csv")
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

fn check_years(years: u32) -> Result<()> {
    if years == 0 {
        return Err(FinanceError::InvalidParameter(
            "years must be greater than zero".to_string(),
        ));
    }
    Ok(())
}

/// Turn a transport failure into `None`, logging it once.
fn recover<T>(operation: &'static str, result: Result<T>) -> Result<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(e) if e.is_transport() => {
            log_transport_error(operation, &e);
            Ok(None)
        }
        Err(e) => Err(e),
    }
}

fn log_transport_error(operation: &'static str, e: &FinanceError) {
    error!(operation, error = %e, "Error when querying the API");
}

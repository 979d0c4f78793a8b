//! Runs every finance data manager operation once for Tesla.

use fdm::{Credentials, DebugLog, FinanceDataManager, FinanceError, Result, Symbol};

const CREDENTIALS_FILE: &str = "api_key.json";
const LOG_FILE: &str = "output.txt";

#[tokio::main]
async fn main() -> Result<()> {
    let credentials = Credentials::load(CREDENTIALS_FILE)?;
    let manager =
        FinanceDataManager::from_credentials(&credentials).with_log(DebugLog::append_to(LOG_FILE)?);
    let tsla = Symbol::new("TSLA");

    println!("{:?}", manager.search_company("Tesla").await);
    println!("{:?}", manager.income_statement(&tsla, 5).await?);
    println!("{:?}", manager.plot_income_statement(&tsla, 30).await?.is_some());
    println!("{:?}", manager.create_csv(&tsla, 5).await?);

    let combined = manager.merge_financial_data(&tsla, 5).await?;
    let json =
        serde_json::to_string_pretty(&combined).map_err(|e| FinanceError::Parse(e.to_string()))?;
    println!("{json}");

    Ok(())
}

//! API credentials.

use std::fmt;
use std::path::Path;

use serde::Deserialize;

use crate::error::{FinanceError, Result};

/// Environment variable that overrides the credential file.
pub const API_KEY_ENV: &str = "FMP_API_KEY";

/// FMP credentials, as stored in `api_key.json`:
///
/// ```json
/// {"api_key": "..."}
/// ```
#[derive(Clone, Deserialize)]
pub struct Credentials {
    api_key: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("api_key", &"[REDACTED]")
            .finish()
    }
}

impl Credentials {
    /// Wraps an API key.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(FinanceError::Config("API key is empty".to_string()));
        }
        Ok(Self { api_key })
    }

    /// Reads credentials from a JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| FinanceError::Config(format!("{}: {e}", path.display())))?;
        let parsed: Self = serde_json::from_str(&text)
            .map_err(|e| FinanceError::Config(format!("{}: {e}", path.display())))?;
        Self::new(parsed.api_key)
    }

    /// Uses [`API_KEY_ENV`] when set, otherwise reads `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        match std::env::var(API_KEY_ENV) {
            Ok(key) if !key.trim().is_empty() => Self::new(key),
            _ => Self::from_file(path),
        }
    }

    /// The API key.
    #[must_use]
    pub fn api_key(&self) -> &str {
        &self.api_key
    }
}

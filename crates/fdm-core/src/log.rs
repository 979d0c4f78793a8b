//! Explicitly constructed debug log.
//!
//! Nothing in this workspace installs a global subscriber. A [`DebugLog`] owns
//! its own [`Dispatch`] and is handed to whoever should write into it; the
//! manager scopes each operation to that dispatch.

use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use tracing::Dispatch;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::MakeWriter;

use crate::error::Result;

/// Environment variable holding the log filter directive.
pub const LOG_FILTER_ENV: &str = "FDM_LOG";

/// Filter used when [`LOG_FILTER_ENV`] is unset or invalid.
const DEFAULT_FILTER: &str = "warn,fdm=debug,fdm_core=debug,fdm_fmp=debug";

/// A self-contained `tracing` sink.
#[derive(Clone)]
pub struct DebugLog {
    dispatch: Dispatch,
}

impl std::fmt::Debug for DebugLog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DebugLog").finish_non_exhaustive()
    }
}

impl Default for DebugLog {
    fn default() -> Self {
        Self::disabled()
    }
}

impl DebugLog {
    /// Appends log lines to the file at `path`, creating it if needed.
    pub fn append_to(path: impl AsRef<Path>) -> Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self::with_writer(Mutex::new(file)))
    }

    /// Writes log lines through `writer`.
    pub fn with_writer<W>(writer: W) -> Self
    where
        W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
    {
        let filter = EnvFilter::try_from_env(LOG_FILTER_ENV)
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
        let subscriber = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(writer)
            .with_ansi(false)
            .without_time()
            .finish();
        Self {
            dispatch: Dispatch::new(subscriber),
        }
    }

    /// Discards everything.
    #[must_use]
    pub fn disabled() -> Self {
        Self {
            dispatch: Dispatch::none(),
        }
    }

    /// The dispatch events should be routed to.
    #[must_use]
    pub fn dispatch(&self) -> Dispatch {
        self.dispatch.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct Buffer(Arc<Mutex<Vec<u8>>>);

    impl Write for Buffer {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    impl<'a> MakeWriter<'a> for Buffer {
        type Writer = Self;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    #[test]
    fn test_events_reach_own_writer() {
        let buffer = Buffer::default();
        let log = DebugLog::with_writer(buffer.clone());

        tracing::dispatcher::with_default(&log.dispatch(), || {
            tracing::error!("Error when querying the API: boom");
        });

        let text = String::from_utf8(buffer.0.lock().unwrap().clone()).unwrap();
        assert!(text.contains("ERROR"));
        assert!(text.contains("boom"));
    }

    #[test]
    fn test_disabled_log_is_silent() {
        let buffer = Buffer::default();
        let _unused = DebugLog::with_writer(buffer.clone());
        let log = DebugLog::disabled();

        tracing::dispatcher::with_default(&log.dispatch(), || {
            tracing::error!("dropped");
        });

        assert!(buffer.0.lock().unwrap().is_empty());
    }

    #[test]
    fn test_append_to_file() {
        let path = std::env::temp_dir().join(format!("fdm-log-{}.txt", std::process::id()));
        let _ = std::fs::remove_file(&path);

        for message in ["first", "second"] {
            let log = DebugLog::append_to(&path).unwrap();
            tracing::dispatcher::with_default(&log.dispatch(), || {
                tracing::debug!("{message}");
            });
        }

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("first"));
        assert!(text.contains("second"));
        std::fs::remove_file(&path).unwrap();
    }
}

//! Failure interception for domain services.
//!
//! Every service operation ends in the same way: on success it logs a
//! completion message, on failure it logs `"<operation> failed: <detail>"`,
//! records a diagnostic on the error channel and resolves with a fallback
//! value. [`ErrorReporter`] packages that policy.

use crate::framework::{FrameworkError, MessageSink};
use std::fmt::Display;
use std::sync::Arc;
use tracing::error;

/// Writes prefixed messages to a [`MessageSink`] and turns failures into fallbacks.
#[derive(Clone)]
pub struct ErrorReporter {
    sink: Arc<dyn MessageSink>,
    source: &'static str,
}

impl ErrorReporter {
    /// `source` prefixes every message, e.g. `"HeroService"`.
    pub fn new(sink: Arc<dyn MessageSink>, source: &'static str) -> Self {
        Self { sink, source }
    }

    pub fn log(&self, message: impl Display) {
        self.sink
            .add_message(&format!("{}: {}", self.source, message));
    }

    /// Returns a handler that logs the failure of `operation` and yields `fallback`.
    ///
    /// Meant for `Result::unwrap_or_else`:
    ///
    /// ```ignore
    /// client.list().await.unwrap_or_else(reporter.handle_error("get_heroes", Vec::new()))
    /// ```
    pub fn handle_error<'a, R: 'a>(
        &'a self,
        operation: &str,
        fallback: R,
    ) -> impl FnOnce(FrameworkError) -> R + 'a {
        let operation = operation.to_string();
        move |err| {
            error!(source = self.source, %operation, error = ?err, "Request failed");
            self.log(format_args!("{} failed: {}", operation, err));
            fallback
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::messages::MessageService;

    #[test]
    fn test_handle_error_logs_and_returns_fallback() {
        let messages = MessageService::new();
        let reporter = ErrorReporter::new(Arc::new(messages.clone()), "HeroService");

        let result: Result<Vec<u8>, FrameworkError> =
            Err(FrameworkError::status(500, "Internal Server Error"));
        let value = result.unwrap_or_else(reporter.handle_error("get_heroes", Vec::new()));

        assert!(value.is_empty());
        assert_eq!(
            messages.messages(),
            vec!["HeroService: get_heroes failed: Http failure response: 500 Internal Server Error"]
        );
    }

    #[test]
    fn test_handle_error_is_not_invoked_on_success() {
        let messages = MessageService::new();
        let reporter = ErrorReporter::new(Arc::new(messages.clone()), "HeroService");

        let result: Result<Option<u8>, FrameworkError> = Ok(Some(7));
        let value = result.unwrap_or_else(reporter.handle_error("get_hero id=7", None));

        assert_eq!(value, Some(7));
        assert!(messages.messages().is_empty());
    }
}

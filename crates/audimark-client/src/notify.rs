//! User-visible outcome reporting.
//!
//! The embedding UI surfaces these as toasts/snackbars. Each operation
//! reports its outcome exactly once; data-shape recovery inside
//! normalization is deliberately silent.

use tracing::{error, info};

/// Sink for user-visible success and error messages.
pub trait Notifier: Send + Sync {
    fn success(&self, message: &str);
    fn error(&self, message: &str);
}

impl<T: Notifier + ?Sized> Notifier for std::sync::Arc<T> {
    fn success(&self, message: &str) {
        (**self).success(message);
    }

    fn error(&self, message: &str) {
        (**self).error(message);
    }
}

/// Default sink that routes messages to `tracing`. Useful for headless
/// runs and as a fallback before the UI registers its own sink.
#[derive(Debug, Clone, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn success(&self, message: &str) {
        info!(message, "notify");
    }

    fn error(&self, message: &str) {
        error!(message, "notify");
    }
}

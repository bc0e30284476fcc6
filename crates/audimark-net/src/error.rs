use thiserror::Error;

/// Errors produced by the data-source layer.
///
/// Missing or malformed nested fields are not represented here; they are
/// recovered during normalization by substituting placeholders and never
/// surface to the caller.
#[derive(Error, Debug)]
pub enum NetError {
    /// No launch token available. Fatal precondition: no request is
    /// attempted without one.
    #[error("Missing LTI launch token")]
    MissingToken,

    /// Transport-level failure (connection, timeout, TLS).
    #[error("Request failed: {0}")]
    Http(reqwest::Error),

    /// The server rejected the launch credential (401/403). The session's
    /// `ltik` has expired or never authorized this resource; re-launching
    /// from the LMS is the only recovery.
    #[error("Not authorized: {body}")]
    Unauthorized { status: u16, body: String },

    /// The server answered with any other non-success status.
    #[error("Server responded {status}: {body}")]
    Status { status: u16, body: String },

    /// The response body did not match the expected shape.
    #[error("Invalid response body: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for NetError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            NetError::Decode(e.to_string())
        } else {
            NetError::Http(e)
        }
    }
}

/// Map a non-success HTTP status and its body text to the matching error.
pub(crate) fn status_error(status: u16, body: String) -> NetError {
    match status {
        401 | 403 => NetError::Unauthorized { status, body },
        _ => NetError::Status { status, body },
    }
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, NetError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_rejections_get_their_own_error() {
        for status in [401, 403] {
            match status_error(status, "expired".to_string()) {
                NetError::Unauthorized { status: s, body } => {
                    assert_eq!(s, status);
                    assert_eq!(body, "expired");
                }
                other => panic!("expected Unauthorized, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_other_statuses_stay_generic() {
        assert!(matches!(
            status_error(500, "boom".to_string()),
            NetError::Status { status: 500, .. }
        ));
        assert!(matches!(
            status_error(404, String::new()),
            NetError::Status { status: 404, .. }
        ));
    }
}

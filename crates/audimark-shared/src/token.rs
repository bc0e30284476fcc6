//! LTI launch token handling.
//!
//! The LMS appends a short-lived `ltik` credential to the tool's launch URL.
//! Every data-source call carries it as a bearer token; without one, no
//! request is attempted at all.

use serde::{Deserialize, Serialize};

use crate::constants::LAUNCH_TOKEN_PARAM;

/// Opaque LTI launch credential.
///
/// Always passed explicitly into the data-source client; never read from
/// ambient global state.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LaunchToken(String);

impl LaunchToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Extract the token from a launch URL or its query string.
    ///
    /// Accepts either a full URL (`https://…/dashboard?ltik=abc`) or just the
    /// query part (`ltik=abc&foo=bar`, with or without a leading `?`).
    /// Returns `None` when the parameter is missing or empty.
    pub fn from_query(query: &str) -> Option<Self> {
        let query = query.rsplit('?').next().unwrap_or(query);
        for pair in query.split('&') {
            let mut parts = pair.splitn(2, '=');
            if parts.next() == Some(LAUNCH_TOKEN_PARAM) {
                match parts.next() {
                    Some(value) if !value.is_empty() => {
                        return Some(Self(value.to_string()))
                    }
                    _ => return None,
                }
            }
        }
        None
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_full_url() {
        let token =
            LaunchToken::from_query("https://tool.example/dashboard?ltik=abc.def.ghi").unwrap();
        assert_eq!(token.as_str(), "abc.def.ghi");
    }

    #[test]
    fn test_from_query_among_other_params() {
        let token = LaunchToken::from_query("page=2&ltik=tok123&limit=10").unwrap();
        assert_eq!(token.as_str(), "tok123");
    }

    #[test]
    fn test_missing_param() {
        assert!(LaunchToken::from_query("page=2&limit=10").is_none());
    }

    #[test]
    fn test_empty_value() {
        assert!(LaunchToken::from_query("ltik=&page=1").is_none());
    }
}

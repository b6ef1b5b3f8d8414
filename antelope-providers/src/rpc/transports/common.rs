use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// The error body a node answers failed requests with
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Error)]
pub struct ApiError {
    /// The HTTP status code
    pub code: u16,
    /// Short description, e.g. `Internal Service Error`
    pub message: String,
    /// The chain exception behind the failure, absent when the body was not a node error
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorInfo>,
}

/// A chain exception as reported by the node
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ErrorInfo {
    pub code: i64,
    /// Exception name, e.g. `tx_net_usage_exceeded`
    pub name: String,
    /// Human readable exception summary
    pub what: String,
    #[serde(default)]
    pub details: Vec<ErrorDetail>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ErrorDetail {
    pub message: String,
    #[serde(default)]
    pub file: String,
    #[serde(default)]
    pub line_number: u32,
    #[serde(default)]
    pub method: String,
}

impl ApiError {
    /// An error for a response whose body is not a node error
    pub fn from_status(code: u16, body: impl Into<String>) -> Self {
        Self { code, message: body.into(), error: None }
    }

    /// The exception name, if the node reported one
    pub fn name(&self) -> Option<&str> {
        self.error.as_ref().map(|e| e.name.as_str())
    }

    /// The most specific diagnostic the node gave: the first detail message, else the
    /// exception summary, else the top level message
    pub fn diagnostic(&self) -> &str {
        match &self.error {
            Some(info) => info
                .details
                .first()
                .map(|d| d.message.as_str())
                .filter(|m| !m.is_empty())
                .or_else(|| Some(info.what.as_str()).filter(|w| !w.is_empty()))
                .unwrap_or(&self.message),
            None => &self.message,
        }
    }

    /// Whether the node itself reported a chain exception, as opposed to an HTTP error without
    /// an error body
    pub fn is_chain_exception(&self) -> bool {
        self.error.is_some()
    }

    /// Whether a proxy or gateway in front of the node failed. The request may or may not have
    /// reached the node.
    pub fn is_gateway_failure(&self) -> bool {
        !self.is_chain_exception() && matches!(self.code, 502..=504)
    }

    /// Whether the node reports that the requested entity does not exist
    pub fn is_not_found(&self) -> bool {
        if self.code == 404 {
            return true
        }
        let by_name = self.name().map_or(false, |name| {
            name == "unknown_key" ||
                name == "unknown_block_exception" ||
                name.ends_with("_query_exception") ||
                name.contains("not_found")
        });
        by_name || self.details().any(|m| m.contains("unknown key"))
    }

    /// Whether the node rejected the request arguments as malformed
    pub fn is_invalid_argument(&self) -> bool {
        if (400..500).contains(&self.code) {
            return true
        }
        self.name().map_or(false, |name| {
            name.ends_with("_type_exception") ||
                name == "parse_error_exception" ||
                name == "invalid_http_request"
        })
    }

    fn details(&self) -> impl Iterator<Item = &str> {
        self.error.iter().flat_map(|e| e.details.iter().map(|d| d.message.as_str()))
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => write!(f, "(code: {}, name: {name}): {}", self.code, self.diagnostic()),
            None => write!(f, "(code: {}): {}", self.code, self.message),
        }
    }
}

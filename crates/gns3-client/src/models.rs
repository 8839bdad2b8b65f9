//! GNS3 API models
//!
//! Node payloads are schema-driven on the provider side, so bodies travel as
//! `serde_json::Value`. Only the response envelope and the version endpoint get
//! concrete types here.

use crate::error::Gns3Error;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::Value;

const SNIPPET_LEN: usize = 500;

/// A decoded controller response.
///
/// The status code is passed through untouched; interpreting it is up to the
/// caller.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: StatusCode,
    /// Parsed JSON body, `None` when empty or unparseable on a failing status
    pub body: Option<Value>,
    /// Raw response text, kept for diagnostics
    pub raw: String,
}

impl ApiResponse {
    /// Build a response from a status and raw body text.
    ///
    /// Decoding is best-effort: a body that fails to parse is an error only when
    /// the status is a success, because the caller needs the values it carries.
    /// On a failing status the raw text is kept and `body` is `None`.
    pub fn from_parts(status: StatusCode, raw: String) -> Result<Self, Gns3Error> {
        if raw.trim().is_empty() {
            return Ok(Self { status, body: None, raw });
        }

        match serde_json::from_str::<Value>(&raw) {
            Ok(body) => Ok(Self { status, body: Some(body), raw }),
            Err(source) if status.is_success() => Err(Gns3Error::Decode {
                status,
                source,
                body: snippet(&raw),
            }),
            Err(_) => Ok(Self { status, body: None, raw }),
        }
    }

    /// Response with a JSON body, mainly for mocks and tests.
    pub fn json(status: StatusCode, body: Value) -> Self {
        Self {
            status,
            raw: body.to_string(),
            body: Some(body),
        }
    }

    /// Response with no body (e.g. 204 No Content).
    pub fn empty(status: StatusCode) -> Self {
        Self {
            status,
            body: None,
            raw: String::new(),
        }
    }

    /// Parsed body if it is a JSON object.
    pub fn object(&self) -> Option<&serde_json::Map<String, Value>> {
        self.body.as_ref().and_then(Value::as_object)
    }

    /// String field of an object body, if present and non-empty.
    pub fn str_field(&self, key: &str) -> Option<&str> {
        self.object()
            .and_then(|o| o.get(key))
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
    }

    /// Short form of the body for error messages.
    ///
    /// Prefers the parsed mapping when there is one, otherwise the raw text.
    pub fn body_snippet(&self) -> String {
        match &self.body {
            Some(body) => snippet(&body.to_string()),
            None => snippet(&self.raw),
        }
    }
}

fn snippet(text: &str) -> String {
    text.chars().take(SNIPPET_LEN).collect()
}

/// Controller version (`GET /v2/version`)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ControllerVersion {
    pub version: String,
    #[serde(default)]
    pub local: bool,
}

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

pub(crate) const EMPTY_INPUT_MESSAGE: &str = "Please enter a valid URL.";
pub(crate) const OPERATION_FAILED_FALLBACK: &str =
    "webhook operation failed or returned no explicit success flag.";

/// Normalized, UI-facing result of one submission. `success` is always set.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FetchResult {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Full content, Markdown.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub msg: Option<String>,
    /// Summary, Markdown.
    #[serde(rename = "abstract", default, skip_serializing_if = "Option::is_none")]
    pub abstract_md: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub highlights: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Body returned by the webhook, as-is.
///
/// The success flag arrives under two spellings: the upstream workflow emits
/// `succcess`, and some deployments emit `success`. Every field is kept as a
/// raw JSON value, so a field of an unexpected type only loses that field and
/// never fails the whole parse.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct RawWebhookResponse {
    #[serde(default)]
    pub succcess: Option<Value>,
    #[serde(default)]
    pub success: Option<Value>,
    #[serde(default)]
    pub title: Option<Value>,
    #[serde(default)]
    pub msg: Option<Value>,
    #[serde(rename = "abstract", default)]
    pub abstract_md: Option<Value>,
    #[serde(default)]
    pub highlights: Option<Value>,
    #[serde(default)]
    pub error: Option<Value>,
}

impl RawWebhookResponse {
    /// Builds a response from an already parsed JSON document.
    ///
    /// Anything other than an object carries no fields at all.
    pub fn from_value(value: Value) -> Result<Self, serde_json::Error> {
        if value.is_object() {
            serde_json::from_value(value)
        } else {
            Ok(Self::default())
        }
    }

    /// Either spelling of the flag counts, but only when it is exactly `true`.
    pub fn effective_success(&self) -> bool {
        is_true(self.succcess.as_ref()) || is_true(self.success.as_ref())
    }

    /// Upstream error text, ignoring empty strings and non-string values.
    pub fn error_message(&self) -> Option<&str> {
        self.error
            .as_ref()
            .and_then(Value::as_str)
            .filter(|message| !message.is_empty())
    }

    /// Keeps the string fields that really are strings. Non-string entries
    /// are dropped from `highlights`.
    pub fn into_fetch_result(self) -> FetchResult {
        FetchResult {
            success: true,
            title: text(self.title),
            msg: text(self.msg),
            abstract_md: text(self.abstract_md),
            highlights: match self.highlights {
                Some(Value::Array(items)) => Some(
                    items
                        .into_iter()
                        .filter_map(|item| text(Some(item)))
                        .collect(),
                ),
                _ => None,
            },
            error: None,
        }
    }
}

fn is_true(flag: Option<&Value>) -> bool {
    matches!(flag, Some(Value::Bool(true)))
}

fn text(value: Option<Value>) -> Option<String> {
    match value {
        Some(Value::String(text)) => Some(text),
        _ => None,
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WebhookError {
    #[error("{}", EMPTY_INPUT_MESSAGE)]
    EmptyInput,
    #[error("Invalid URL format")]
    InvalidFormat,
    #[error("{0}")]
    TransportError(String),
    #[error("{0}")]
    OperationFailed(String),
    #[error("webhook returned malformed JSON: {0}")]
    ParseError(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    SubmitCompleted {
        url: String,
        result: Result<FetchResult, WebhookError>,
    },
}

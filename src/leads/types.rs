//! Wire types for the CRM `getLeads` JSON-RPC method.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// JSON-RPC request body.
#[derive(Debug, Serialize)]
pub(super) struct RpcRequest<'a> {
    pub id: u32,
    pub method: &'static str,
    pub params: GetLeadsParams<'a>,
}

/// Parameters of `getLeads`.
#[derive(Debug, Serialize)]
pub(super) struct GetLeadsParams<'a> {
    /// Empty object: no filter
    #[serde(rename = "where")]
    pub filter: Map<String, Value>,
    pub limit: u32,
    pub offset: u64,
    pub fields: &'a [&'a str],
}

/// JSON-RPC response envelope.
#[derive(Debug, Deserialize)]
pub(super) struct RpcResponse {
    #[serde(default)]
    pub result: Option<LeadsResult>,
    #[serde(default)]
    pub error: Value,
}

#[derive(Debug, Deserialize)]
pub(super) struct LeadsResult {
    #[serde(default)]
    pub lead: Vec<RawLead>,
}

#[derive(Debug, Deserialize)]
pub(super) struct RawLead {
    pub id: Value,
    #[serde(rename = "emailAddress", default)]
    pub email_address: Option<String>,
}

/// An exported lead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lead {
    /// Lead identifier
    pub id: String,
    /// Email address (empty when the CRM has none)
    pub email_address: String,
}

impl From<RawLead> for Lead {
    fn from(raw: RawLead) -> Self {
        // The API sends ids as strings, older accounts as numbers
        let id = match raw.id {
            Value::String(s) => s,
            Value::Null => String::new(),
            other => other.to_string(),
        };
        Self {
            id,
            email_address: raw.email_address.unwrap_or_default(),
        }
    }
}

/// Extracts a readable message from the `error` member, if it reports one.
///
/// `null` and `[]` both mean success.
pub(super) fn api_error_message(error: &Value) -> Option<String> {
    match error {
        Value::Null => None,
        Value::Array(items) if items.is_empty() => None,
        Value::Object(obj) => Some(
            obj.get("message")
                .and_then(Value::as_str)
                .map(str::to_string)
                .unwrap_or_else(|| error.to_string()),
        ),
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

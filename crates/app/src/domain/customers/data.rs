//! Customers Data

use jiff::Timestamp;
use serde_json::{Map, Value};

use crate::domain::customers::records::CustomerRecord;

/// A raw record proposed for import, before validation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CustomerCandidate {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

impl CustomerCandidate {
    #[must_use]
    pub fn new(name: impl Into<String>, email: impl Into<String>, phone: Option<String>) -> Self {
        Self {
            name: Some(name.into()),
            email: Some(email.into()),
            phone,
        }
    }
}

/// Untyped JSON becomes a candidate field by field. String-valued keys are
/// kept, anything else counts as absent, and JSON-encoded strings are decoded
/// first.
impl From<Value> for CustomerCandidate {
    fn from(value: Value) -> Self {
        match value {
            Value::Object(fields) => Self::from_fields(&fields),
            Value::String(encoded) => match serde_json::from_str::<Value>(&encoded) {
                Ok(Value::Object(fields)) => Self::from_fields(&fields),
                _ => Self::default(),
            },
            _ => Self::default(),
        }
    }
}

impl CustomerCandidate {
    fn from_fields(fields: &Map<String, Value>) -> Self {
        let field = |key: &str| fields.get(key).and_then(Value::as_str).map(str::to_owned);

        Self {
            name: field("name"),
            email: field("email"),
            phone: field("phone"),
        }
    }
}

/// Validated customer fields ready to persist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCustomer {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
}

/// Outcome of a bulk import: created customers and per-record error messages.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BulkImport {
    pub created: Vec<CustomerRecord>,
    pub errors: Vec<String>,
}

/// Customer listing filter. Every field is optional; set fields combine with AND.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CustomerFilter {
    pub name_icontains: Option<String>,
    pub email_icontains: Option<String>,
    pub phone_startswith: Option<String>,
    pub created_at_gte: Option<Timestamp>,
    pub created_at_lte: Option<Timestamp>,
}

/// Customer listing order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CustomerOrder {
    NameAsc,
    NameDesc,
    EmailAsc,
    #[default]
    CreatedAtAsc,
    CreatedAtDesc,
}

impl CustomerOrder {
    pub(crate) fn as_sql_key(self) -> &'static str {
        match self {
            Self::NameAsc => "name_asc",
            Self::NameDesc => "name_desc",
            Self::EmailAsc => "email_asc",
            Self::CreatedAtAsc => "created_at_asc",
            Self::CreatedAtDesc => "created_at_desc",
        }
    }
}

use serde_json::{json, Value};
use std::fmt;
use std::sync::Arc;

/// HTTP request type recognized in the request field.
///
/// Only the head matters here, so the body type is `()`; a request with a
/// real body can be stripped with `req.map(|_| ())`.
pub type HttpRequest = http::Request<()>;

/// Value of a structured field.
#[derive(Clone)]
pub enum FieldValue {
    Str(String),
    I64(i64),
    U64(u64),
    F64(f64),
    Bool(bool),
    Json(Value),
    Request(Arc<HttpRequest>),
}

impl FieldValue {
    /// Encode the value for an event's extras mapping.
    ///
    /// Requests are rendered as `{method, url}`; everything else maps onto the
    /// matching JSON scalar. Non-finite floats become `null`.
    pub fn to_json(&self) -> Value {
        match self {
            FieldValue::Str(s) => Value::String(s.clone()),
            FieldValue::I64(v) => Value::from(*v),
            FieldValue::U64(v) => Value::from(*v),
            FieldValue::F64(v) => Value::from(*v),
            FieldValue::Bool(v) => Value::Bool(*v),
            FieldValue::Json(v) => v.clone(),
            FieldValue::Request(req) => json!({
                "method": req.method().as_str(),
                "url": req.uri().to_string(),
            }),
        }
    }

    pub fn as_request(&self) -> Option<&Arc<HttpRequest>> {
        match self {
            FieldValue::Request(req) => Some(req),
            _ => None,
        }
    }
}

impl fmt::Debug for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Str(s) => write!(f, "{s:?}"),
            FieldValue::I64(v) => write!(f, "{v}"),
            FieldValue::U64(v) => write!(f, "{v}"),
            FieldValue::F64(v) => write!(f, "{v}"),
            FieldValue::Bool(v) => write!(f, "{v}"),
            FieldValue::Json(v) => write!(f, "{v}"),
            FieldValue::Request(req) => write!(f, "{} {}", req.method(), req.uri()),
        }
    }
}

/// Requests compare by identity, everything else by value.
impl PartialEq for FieldValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (FieldValue::Str(a), FieldValue::Str(b)) => a == b,
            (FieldValue::I64(a), FieldValue::I64(b)) => a == b,
            (FieldValue::U64(a), FieldValue::U64(b)) => a == b,
            (FieldValue::F64(a), FieldValue::F64(b)) => a == b,
            (FieldValue::Bool(a), FieldValue::Bool(b)) => a == b,
            (FieldValue::Json(a), FieldValue::Json(b)) => a == b,
            (FieldValue::Request(a), FieldValue::Request(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

/// A key/value pair attached to a log entry.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub key: String,
    pub value: FieldValue,
}

impl Field {
    pub fn new(key: impl Into<String>, value: FieldValue) -> Self {
        Field { key: key.into(), value }
    }

    pub fn str(key: impl Into<String>, value: impl Into<String>) -> Self {
        Field::new(key, FieldValue::Str(value.into()))
    }

    pub fn i64(key: impl Into<String>, value: i64) -> Self {
        Field::new(key, FieldValue::I64(value))
    }

    pub fn u64(key: impl Into<String>, value: u64) -> Self {
        Field::new(key, FieldValue::U64(value))
    }

    pub fn f64(key: impl Into<String>, value: f64) -> Self {
        Field::new(key, FieldValue::F64(value))
    }

    pub fn bool(key: impl Into<String>, value: bool) -> Self {
        Field::new(key, FieldValue::Bool(value))
    }

    pub fn json(key: impl Into<String>, value: Value) -> Self {
        Field::new(key, FieldValue::Json(value))
    }

    pub fn request(key: impl Into<String>, req: HttpRequest) -> Self {
        Field::new(key, FieldValue::Request(Arc::new(req)))
    }

    pub fn shared_request(key: impl Into<String>, req: Arc<HttpRequest>) -> Self {
        Field::new(key, FieldValue::Request(req))
    }
}

/// Render fields as a single JSON object, later keys overwriting earlier ones.
pub fn fields_to_json(fields: &[Field]) -> Value {
    let map: serde_json::Map<String, Value> = fields
        .iter()
        .map(|f| (f.key.clone(), f.value.to_json()))
        .collect();
    Value::Object(map)
}

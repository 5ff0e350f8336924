use std::any::Any;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::fmt;
use std::sync::Arc;

use url::form_urlencoded;

use crate::field::HttpRequest;
use crate::tracker::RequestSummary;

/// String-keyed values attached to a request, e.g. by a middleware that
/// buffered the raw body.
///
/// Stored in the request's `http::Extensions`:
///
/// ```
/// use sentry_log_sink::request::RequestContext;
///
/// let mut req = http::Request::post("/orders").body(()).unwrap();
/// req.extensions_mut()
///     .insert(RequestContext::new().with_value("raw_body", b"{\"id\":1}".to_vec()));
/// ```
#[derive(Clone, Default)]
pub struct RequestContext {
    values: HashMap<String, Arc<dyn Any + Send + Sync>>,
}

impl RequestContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value<T: Any + Send + Sync>(mut self, key: impl Into<String>, value: T) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert<T: Any + Send + Sync>(&mut self, key: impl Into<String>, value: T) {
        self.values.insert(key.into(), Arc::new(value));
    }

    pub fn value(&self, key: &str) -> Option<&(dyn Any + Send + Sync)> {
        self.values.get(key).map(|v| v.as_ref())
    }
}

impl fmt::Debug for RequestContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.values.keys()).finish()
    }
}

/// Summarize `req` for a tracking event.
///
/// **Parameters**
/// - `secret_headers`: lower-cased header names to leave out.
/// - `body_context_key`: key of a `Vec<u8>` body in the request's
///   [`RequestContext`]; values of any other type are ignored.
///
/// Headers are keyed by their canonical spelling (`X-Request-Id`). When a
/// header repeats, its last value is kept.
pub fn build_request_summary(
    req: &HttpRequest,
    secret_headers: &HashSet<String>,
    body_context_key: Option<&str>,
) -> RequestSummary {
    let mut headers = BTreeMap::new();
    for (name, value) in req.headers() {
        if secret_headers.contains(&name.as_str().to_lowercase()) {
            continue;
        }
        headers.insert(
            canonical_header_name(name.as_str()),
            String::from_utf8_lossy(value.as_bytes()).into_owned(),
        );
    }

    let data = body_context_key.and_then(|key| {
        let ctx = req.extensions().get::<RequestContext>()?;
        let body = ctx.value(key)?.downcast_ref::<Vec<u8>>()?;
        Some(String::from_utf8_lossy(body).into_owned())
    });

    RequestSummary {
        url: req.uri().to_string(),
        method: req.method().as_str().to_string(),
        query_string: encode_query(req.uri().query().unwrap_or("")),
        headers,
        data,
    }
}

/// `content-type` -> `Content-Type`.
pub fn canonical_header_name(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut upper = true;
    for c in name.chars() {
        if upper {
            out.extend(c.to_uppercase());
        } else {
            out.extend(c.to_lowercase());
        }
        upper = c == '-';
    }
    out
}

/// Normalize a raw query: decode the pairs, then re-encode them sorted by
/// key. Values of one key keep their order. Pairs containing `;` or a
/// malformed `%` escape are dropped; invalid UTF-8 is decoded lossily.
pub fn encode_query(raw: &str) -> String {
    let mut values: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for pair in raw.split('&') {
        if pair.contains(';') || !has_valid_escapes(pair) {
            continue;
        }
        for (key, value) in form_urlencoded::parse(pair.as_bytes()) {
            values.entry(key.into_owned()).or_default().push(value.into_owned());
        }
    }

    let mut serializer = form_urlencoded::Serializer::new(String::new());
    for (key, vals) in &values {
        for value in vals {
            serializer.append_pair(key, value);
        }
    }
    serializer.finish()
}

/// Every `%` starts a two-digit hex escape.
fn has_valid_escapes(s: &str) -> bool {
    let bytes = s.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            let hex = |j: usize| bytes.get(j).is_some_and(u8::is_ascii_hexdigit);
            if !(hex(i + 1) && hex(i + 2)) {
                return false;
            }
            i += 3;
        } else {
            i += 1;
        }
    }
    true
}

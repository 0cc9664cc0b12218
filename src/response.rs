//! The write side of a dispatch and the content-type values used by the
//! header combinators.

// ── ContentType ───────────────────────────────────────────────────────────────

/// Common content-type values for use with
/// [`middleware::content_type`](crate::middleware::content_type).
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ContentType {
    Csv,          // text/csv
    EventStream,  // text/event-stream  (SSE)
    FormData,     // application/x-www-form-urlencoded
    Html,         // text/html; charset=utf-8
    Json,         // application/json
    MsgPack,      // application/msgpack
    OctetStream,  // application/octet-stream  (binary / file download)
    Pdf,          // application/pdf
    Text,         // text/plain; charset=utf-8
    Xml,          // application/xml
}

impl ContentType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Csv         => "text/csv",
            Self::EventStream => "text/event-stream",
            Self::FormData    => "application/x-www-form-urlencoded",
            Self::Html        => "text/html; charset=utf-8",
            Self::Json        => "application/json",
            Self::MsgPack     => "application/msgpack",
            Self::OctetStream => "application/octet-stream",
            Self::Pdf         => "application/pdf",
            Self::Text        => "text/plain; charset=utf-8",
            Self::Xml         => "application/xml",
        }
    }
}

// ── Response ─────────────────────────────────────────────────────────────────

/// Write-only accumulator for one outgoing response.
///
/// Every handler in a composed chain receives the same `&mut dyn Response`
/// and mutates it in place. Nothing is merged afterwards.
pub trait Response {
    /// Replaces the body. Last write wins: a second call silently
    /// overwrites the first, it is never an error and never appends.
    fn set_body(&mut self, body: &str);

    /// Appends one value under `key`. Existing values are never replaced;
    /// calling this N times for one key stores N values in call order.
    fn add_header(&mut self, key: &str, value: &str);
}

/// An in-memory [`Response`].
///
/// The body is `None` until some handler writes it. Headers are kept as an
/// ordered list of `(key, value)` pairs; keys are stored and compared
/// exactly as given.
///
/// ```rust
/// use plait::{BufferedResponse, Response};
///
/// let mut res = BufferedResponse::new();
/// res.set_body("first");
/// res.set_body("second");
/// res.add_header("Vary", "accept");
/// res.add_header("Vary", "origin");
///
/// assert_eq!(res.body(), Some("second"));
/// assert_eq!(res.header_values("Vary"), ["accept", "origin"]);
/// ```
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct BufferedResponse {
    body: Option<String>,
    headers: Vec<(String, String)>,
}

impl BufferedResponse {
    pub fn new() -> Self { Self::default() }

    pub fn body(&self) -> Option<&str> { self.body.as_deref() }
    pub fn headers(&self) -> &[(String, String)] { &self.headers }

    /// All values stored under `key`, in insertion order.
    pub fn header_values(&self, key: &str) -> Vec<&str> {
        self.headers.iter()
            .filter(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
            .collect()
    }

    /// Consumes the response, yielding its body and header pairs.
    pub fn into_parts(self) -> (Option<String>, Vec<(String, String)>) {
        (self.body, self.headers)
    }
}

impl Response for BufferedResponse {
    fn set_body(&mut self, body: &str) {
        self.body = Some(body.to_owned());
    }

    fn add_header(&mut self, key: &str, value: &str) {
        self.headers.push((key.to_owned(), value.to_owned()));
    }
}

//! The read side of a dispatch.
//!
//! Handlers only ever see a `&dyn Request`. Where the request came from (a
//! socket, a test, a queue) is the transport adapter's business, not theirs.

/// Read-only view of one incoming request.
///
/// A request is immutable for the whole dispatch: every stage of a composed
/// handler observes the same path and body.
pub trait Request {
    /// The routing key. Opaque to the core: routers compare it by exact,
    /// case-sensitive string equality.
    fn path(&self) -> &str;

    /// The request payload.
    fn body(&self) -> &str;

    /// Authentication evidence and other metadata, if the transport carries
    /// any. The default implementation has no headers.
    fn header(&self, _name: &str) -> Option<&str> {
        None
    }
}

/// An in-memory [`Request`] that owns its path, body and headers.
///
/// The transport adapter builds one of these per dispatch; tests build them
/// directly:
///
/// ```rust
/// use plait::{OwnedRequest, Request};
///
/// let req = OwnedRequest::new("/users", "alice").with_header("authorization", "Bearer t");
/// assert_eq!(req.path(), "/users");
/// assert_eq!(req.header("Authorization"), Some("Bearer t"));
/// ```
#[derive(Clone, Debug, Default)]
pub struct OwnedRequest {
    path: String,
    body: String,
    headers: Vec<(String, String)>,
}

impl OwnedRequest {
    pub fn new(path: impl Into<String>, body: impl Into<String>) -> Self {
        Self { path: path.into(), body: body.into(), headers: Vec::new() }
    }

    /// Appends a header. Returns `self` for chaining.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn headers(&self) -> &[(String, String)] { &self.headers }
}

impl Request for OwnedRequest {
    fn path(&self) -> &str { &self.path }
    fn body(&self) -> &str { &self.body }

    /// Case-insensitive header lookup. Returns the first value on repeats.
    fn header(&self, name: &str) -> Option<&str> {
        self.headers.iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct PathOnly;

    impl Request for PathOnly {
        fn path(&self) -> &str { "/p" }
        fn body(&self) -> &str { "" }
    }

    #[test]
    fn header_lookup_ignores_case_and_returns_first_value() {
        let req = OwnedRequest::new("/", "")
            .with_header("X-Token", "one")
            .with_header("x-token", "two");

        assert_eq!(req.header("x-TOKEN"), Some("one"));
        assert_eq!(req.header("missing"), None);
        assert_eq!(req.headers().len(), 2);
    }

    #[test]
    fn requests_without_headers_report_none() {
        assert_eq!(PathOnly.header("authorization"), None);
    }
}

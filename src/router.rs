//! Exact-match request router.
//!
//! One hash map, one fallback. The path is looked up verbatim: no patterns,
//! no prefixes, no trailing-slash normalization, no case folding. You
//! register a path, you get a handler. Anything else goes to the fallback.

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use tracing::trace;

use crate::error::Error;
use crate::handler::{BoxedHandler, Handler, HandlerExt};
use crate::handlers::NotFound;
use crate::request::Request;
use crate::response::Response;

/// A handler that dispatches on the request path.
///
/// Every call invokes exactly one downstream handler: the one registered
/// for `req.path()`, or the fallback. The table is fixed once the router is
/// built, so a router can be shared across concurrent dispatches freely.
///
/// ```rust
/// use plait::{BufferedResponse, Handler, OwnedRequest, Router, handlers};
///
/// let app = Router::builder()
///     .route("/healthz", handlers::text("ok"))
///     .route("/readyz",  handlers::text("ready"))
///     .build();
///
/// let mut res = BufferedResponse::new();
/// app.serve(&OwnedRequest::new("/healthz/", ""), &mut res);
/// assert_eq!(res.body(), Some("404: not found!"));
/// ```
pub struct Router {
    routes: HashMap<String, BoxedHandler>,
    fallback: BoxedHandler,
}

impl Router {
    /// Builds a router from a finished route table and a fallback.
    pub fn new(routes: HashMap<String, BoxedHandler>, fallback: impl Handler) -> Self {
        Self { routes, fallback: fallback.boxed() }
    }

    /// Builds a router whose fallback writes `"404: not found!"`.
    pub fn with_default_not_found(routes: HashMap<String, BoxedHandler>) -> Self {
        Self::new(routes, NotFound)
    }

    pub fn builder() -> RouterBuilder {
        RouterBuilder { routes: HashMap::new(), fallback: None }
    }

    /// Whether `path` has its own handler (as opposed to the fallback).
    pub fn contains(&self, path: &str) -> bool {
        self.routes.contains_key(path)
    }

    /// Number of registered routes, not counting the fallback.
    pub fn len(&self) -> usize { self.routes.len() }

    pub fn is_empty(&self) -> bool { self.routes.is_empty() }

    fn resolve(&self, path: &str) -> &BoxedHandler {
        match self.routes.get(path) {
            Some(handler) => handler,
            None => {
                trace!(path, "no route matched, using fallback");
                &self.fallback
            }
        }
    }
}

impl Handler for Router {
    fn serve(&self, req: &dyn Request, res: &mut dyn Response) {
        self.resolve(req.path()).serve(req, res);
    }
}

// ── RouterBuilder ─────────────────────────────────────────────────────────────

/// Wiring-time builder for [`Router`].
///
/// Obtain via [`Router::builder()`]. Each call returns `self` so
/// registrations chain naturally. Without [`fallback`](Self::fallback) the
/// router uses the default not-found handler.
pub struct RouterBuilder {
    routes: HashMap<String, BoxedHandler>,
    fallback: Option<BoxedHandler>,
}

impl RouterBuilder {
    /// Registers `handler` for the exact path `path`.
    ///
    /// # Panics
    ///
    /// Panics if `path` is already registered. Use
    /// [`try_route`](Self::try_route) to handle that as an error.
    pub fn route(self, path: &str, handler: impl Handler) -> Self {
        self.try_route(path, handler)
            .unwrap_or_else(|e| panic!("invalid route: {e}"))
    }

    /// Registers `handler` for `path`, failing with
    /// [`Error::DuplicateRoute`] if the path is taken.
    pub fn try_route(mut self, path: &str, handler: impl Handler) -> Result<Self, Error> {
        match self.routes.entry(path.to_owned()) {
            Entry::Occupied(_) => return Err(Error::DuplicateRoute(path.to_owned())),
            Entry::Vacant(slot) => {
                slot.insert(handler.boxed());
            }
        }
        Ok(self)
    }

    /// Replaces the handler used for unregistered paths.
    pub fn fallback(mut self, handler: impl Handler) -> Self {
        self.fallback = Some(handler.boxed());
        self
    }

    pub fn build(self) -> Router {
        Router {
            routes: self.routes,
            fallback: self.fallback.unwrap_or_else(|| NotFound.boxed()),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;
    use crate::handler::handler_fn;
    use crate::handlers::{NOT_FOUND_BODY, text};
    use crate::request::OwnedRequest;
    use crate::response::BufferedResponse;

    /// A handler that records its name every time it runs.
    fn tracked(name: &'static str, calls: &Arc<Mutex<Vec<&'static str>>>) -> impl Handler + use<> {
        let calls = Arc::clone(calls);
        handler_fn(move |_: &dyn Request, res: &mut dyn Response| {
            calls.lock().unwrap().push(name);
            res.set_body(name);
        })
    }

    fn dispatch(router: &Router, path: &str) -> BufferedResponse {
        let mut res = BufferedResponse::new();
        router.serve(&OwnedRequest::new(path, ""), &mut res);
        res
    }

    #[test]
    fn registered_path_invokes_only_its_handler() {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let router = Router::builder()
            .route("/a", tracked("a", &calls))
            .route("/b", tracked("b", &calls))
            .fallback(tracked("fallback", &calls))
            .build();

        assert_eq!(dispatch(&router, "/a").body(), Some("a"));
        assert_eq!(dispatch(&router, "/b").body(), Some("b"));
        assert_eq!(*calls.lock().unwrap(), ["a", "b"]);
    }

    #[test]
    fn unregistered_path_invokes_fallback_exactly_once() {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let router = Router::builder()
            .route("/a", tracked("a", &calls))
            .fallback(tracked("fallback", &calls))
            .build();

        dispatch(&router, "/c");
        assert_eq!(*calls.lock().unwrap(), ["fallback"]);
    }

    #[test]
    fn matching_is_exact_and_case_sensitive() {
        let router = Router::builder().route("/users", text("users")).build();

        for miss in ["/Users", "/users/", "users", "/users/42", "", "/user"] {
            assert_eq!(dispatch(&router, miss).body(), Some(NOT_FOUND_BODY), "path {miss:?}");
        }
        assert_eq!(dispatch(&router, "/users").body(), Some("users"));
    }

    #[test]
    fn default_fallback_writes_not_found_without_headers() {
        let router = Router::with_default_not_found(HashMap::new());
        let res = dispatch(&router, "/nowhere");

        assert_eq!(res.body(), Some(NOT_FOUND_BODY));
        assert!(res.headers().is_empty());
    }

    #[test]
    fn new_takes_a_prebuilt_table() {
        let mut routes: HashMap<String, BoxedHandler> = HashMap::new();
        routes.insert("/x".to_owned(), text("x").boxed());
        let router = Router::new(routes, text("custom"));

        assert!(router.contains("/x"));
        assert_eq!(router.len(), 1);
        assert_eq!(dispatch(&router, "/x").body(), Some("x"));
        assert_eq!(dispatch(&router, "/y").body(), Some("custom"));
    }

    #[test]
    fn duplicate_path_is_rejected() {
        let err = Router::builder()
            .route("/a", text("one"))
            .try_route("/a", text("two"))
            .err()
            .expect("duplicate must fail");

        assert!(matches!(err, Error::DuplicateRoute(ref p) if p == "/a"));
    }

    #[test]
    #[should_panic(expected = "route `/a` is already registered")]
    fn duplicate_path_panics_in_route() {
        let _ = Router::builder().route("/a", text("one")).route("/a", text("two"));
    }

    #[test]
    fn empty_router_sends_everything_to_fallback() {
        let router = Router::builder().fallback(text("fb")).build();
        assert!(router.is_empty());
        assert_eq!(dispatch(&router, "/").body(), Some("fb"));
    }
}

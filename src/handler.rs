//! Handler trait and type erasure.
//!
//! # One contract for everything
//!
//! A terminal piece of business logic, a [`Router`](crate::Router), a
//! middleware wrapper and any composition of those all implement the same
//! single-method trait. Callers never distinguish them, so every combinator
//! can take the output of every other combinator as input:
//!
//! ```text
//! handler_fn(|req, res| …)          ← user writes this
//!        ↓ .with_header("ContentType", "application/json")
//! Sequence<FnHandler<F>, AddHeader> ← still a Handler
//!        ↓ Router::builder().route("/x", …)
//! Router                            ← still a Handler
//!        ↓ log_before(…)
//! Sequence<LogBefore<_>, Router>   ← still a Handler
//! ```
//!
//! Routers store handlers of different concrete types side by side, so they
//! hold them as [`BoxedHandler`] (`Arc<dyn Handler>`). That costs one virtual
//! call per stage at dispatch time.

use std::sync::Arc;

use crate::middleware::{self, LogSink, Sequence, TracingSink};
use crate::request::Request;
use crate::response::Response;

// ── Handler trait ─────────────────────────────────────────────────────────────

/// The unit of composition: consumes a request, produces effects on a
/// response.
///
/// `serve` returns nothing. Everything observable happens through `res`, or
/// through which downstream handlers a middleware decides to call.
///
/// Implementations must treat their own state as read-only once built: a
/// finished graph is shared between concurrent dispatches without locking,
/// which is what the `Send + Sync` bound is for.
pub trait Handler: Send + Sync + 'static {
    fn serve(&self, req: &dyn Request, res: &mut dyn Response);
}

/// A type-erased handler shared across routes and concurrent dispatches.
pub type BoxedHandler = Arc<dyn Handler>;

impl<H: Handler + ?Sized> Handler for Arc<H> {
    fn serve(&self, req: &dyn Request, res: &mut dyn Response) {
        (**self).serve(req, res);
    }
}

impl<H: Handler + ?Sized> Handler for Box<H> {
    fn serve(&self, req: &dyn Request, res: &mut dyn Response) {
        (**self).serve(req, res);
    }
}

// ── Closures ──────────────────────────────────────────────────────────────────

/// Newtype wrapper that turns a plain function into a [`Handler`].
///
/// Obtain via [`handler_fn`].
#[derive(Clone, Copy)]
pub struct FnHandler<F>(F);

/// Wraps a function or closure with the handler signature.
///
/// ```rust
/// use plait::{BufferedResponse, Handler, OwnedRequest, Request, Response, handler_fn};
///
/// let hello = handler_fn(|req: &dyn Request, res: &mut dyn Response| {
///     res.set_body(&format!("hello {}", req.body()));
/// });
///
/// let mut res = BufferedResponse::new();
/// hello.serve(&OwnedRequest::new("/", "world"), &mut res);
/// assert_eq!(res.body(), Some("hello world"));
/// ```
pub fn handler_fn<F>(f: F) -> FnHandler<F>
where
    F: Fn(&dyn Request, &mut dyn Response) + Send + Sync + 'static,
{
    FnHandler(f)
}

impl<F> Handler for FnHandler<F>
where
    F: Fn(&dyn Request, &mut dyn Response) + Send + Sync + 'static,
{
    fn serve(&self, req: &dyn Request, res: &mut dyn Response) {
        (self.0)(req, res);
    }
}

// ── Fluent composition ────────────────────────────────────────────────────────

/// Method-call forms of the middleware combinators, available on every
/// [`Handler`].
///
/// ```rust
/// use plait::{HandlerExt, handlers};
///
/// let app = handlers::text("ok")
///     .with_header("Cache-Control", "no-store")
///     .log_after()
///     .boxed();
/// # let _ = app;
/// ```
pub trait HandlerExt: Handler + Sized {
    /// Erases the concrete type.
    fn boxed(self) -> BoxedHandler {
        Arc::new(self)
    }

    /// Runs `self`, then `second`, against the same request and response.
    fn then<H: Handler>(self, second: H) -> Sequence<Self, H> {
        middleware::ordered(self, second)
    }

    /// Runs `self`, then appends `key: value` to the response headers.
    fn with_header(self, key: &str, value: &str) -> Sequence<Self, middleware::AddHeader> {
        middleware::with_header(key, value, self)
    }

    /// Logs the request path to the default [`TracingSink`] before `self`.
    fn log_before(self) -> Sequence<middleware::LogBefore<TracingSink>, Self> {
        middleware::log_before(self)
    }

    /// Logs a fixed message to the default [`TracingSink`] after `self`.
    fn log_after(self) -> Sequence<Self, middleware::LogAfter<TracingSink>> {
        middleware::log_after(self)
    }

    /// Like [`log_before`](HandlerExt::log_before) with an injected sink.
    fn log_before_with<S: LogSink>(self, sink: S) -> Sequence<middleware::LogBefore<S>, Self> {
        middleware::log_before_with(sink, self)
    }

    /// Like [`log_after`](HandlerExt::log_after) with an injected sink.
    fn log_after_with<S: LogSink>(self, sink: S) -> Sequence<Self, middleware::LogAfter<S>> {
        middleware::log_after_with(sink, self)
    }
}

impl<H: Handler> HandlerExt for H {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::OwnedRequest;
    use crate::response::BufferedResponse;

    fn echo(req: &dyn Request, res: &mut dyn Response) {
        res.set_body(req.body());
    }

    fn dispatch(handler: &dyn Handler, path: &str, body: &str) -> BufferedResponse {
        let mut res = BufferedResponse::new();
        handler.serve(&OwnedRequest::new(path, body), &mut res);
        res
    }

    #[test]
    fn function_items_become_handlers() {
        let res = dispatch(&handler_fn(echo), "/", "ping");
        assert_eq!(res.body(), Some("ping"));
    }

    #[test]
    fn boxed_and_arc_handlers_serve_like_the_inner_handler() {
        let boxed: BoxedHandler = handler_fn(echo).boxed();
        let twice: Box<dyn Handler> = Box::new(Arc::clone(&boxed));

        assert_eq!(dispatch(&boxed, "/", "a").body(), Some("a"));
        assert_eq!(dispatch(&twice, "/", "b").body(), Some("b"));
    }

    #[test]
    fn then_runs_both_stages_in_order() {
        let app = handler_fn(|_: &dyn Request, res: &mut dyn Response| res.set_body("first"))
            .then(handler_fn(|_: &dyn Request, res: &mut dyn Response| res.set_body("second")));

        assert_eq!(dispatch(&app, "/", "").body(), Some("second"));
    }

    #[test]
    fn with_header_appends_after_the_handler() {
        let app = handler_fn(echo).with_header("X-One", "1").with_header("X-One", "2");
        let res = dispatch(&app, "/", "body");

        assert_eq!(res.body(), Some("body"));
        assert_eq!(res.header_values("X-One"), ["1", "2"]);
    }
}

//! # plait
//!
//! A minimal composable request-handling pipeline. One trait, a router and a
//! handful of middleware combinators. Nothing more. Nothing less.
//!
//! ## The contract
//!
//! Everything is a [`Handler`]: it takes a [`Request`] it may only read and a
//! [`Response`] it may only write. A router is a handler. An authentication
//! gate is a handler. "Log, then route, then add a header" is a handler.
//! Every combinator consumes handlers and produces one, so they nest to any
//! depth without special cases.
//!
//! | Building block | Runs |
//! |---|---|
//! | [`Router`] | exactly one of several handlers, chosen by exact path |
//! | [`ordered`](middleware::ordered) | two handlers, in order |
//! | [`authenticate`](middleware::authenticate) | the protected *or* the unauthorized handler |
//! | [`with_header`](middleware::with_header), [`log_before`](middleware::log_before), … | named sequences |
//!
//! What plait intentionally ignores: path patterns, status codes as data,
//! streaming bodies, TLS. The graph is built once at startup and read-only
//! afterwards, so it can be shared by every connection without locks.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use plait::middleware::{AllowAll, application_json, authenticate, log_after, log_before};
//! use plait::{Request, Response, Router, Server, handler_fn};
//!
//! #[tokio::main]
//! async fn main() {
//!     let hello = handler_fn(|req: &dyn Request, res: &mut dyn Response| {
//!         res.set_body(&format!(r#"200: {{"Hello":"{}"}}"#, req.body()));
//!     });
//!
//!     let app = log_before(log_after(
//!         Router::builder()
//!             .route("/endpoint/resource", authenticate(AllowAll, application_json(hello)))
//!             .build(),
//!     ));
//!
//!     Server::bind("0.0.0.0:3000").serve(app).await.unwrap();
//! }
//! ```
//!
//! Handlers do not need a server. Feed them a request and look at the
//! response:
//!
//! ```rust
//! use plait::{BufferedResponse, Handler, OwnedRequest, middleware, handlers};
//!
//! let app = middleware::with_header("ContentType", "application/json", handlers::text("X"));
//!
//! let mut res = BufferedResponse::new();
//! app.serve(&OwnedRequest::new("/", ""), &mut res);
//! assert_eq!(res.body(), Some("X"));
//! assert_eq!(res.header_values("ContentType"), ["application/json"]);
//! ```

mod error;
mod handler;
mod request;
mod response;
mod router;
mod server;

pub mod handlers;
pub mod middleware;

pub use error::Error;
pub use handler::{BoxedHandler, FnHandler, Handler, HandlerExt, handler_fn};
pub use request::{OwnedRequest, Request};
pub use response::{BufferedResponse, ContentType, Response};
pub use router::{Router, RouterBuilder};
pub use server::Server;

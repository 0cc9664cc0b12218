//! Short-circuiting gate, used for authentication.
//!
//! The gate asks its predicate once per request. Authenticated requests go
//! to the protected handler, everything else goes to the unauthorized
//! handler. Never both, never neither.
//!
//! The gate has no opinion on credentials. What counts as evidence, which
//! header carries it and how it is verified all live in the predicate the
//! caller supplies:
//!
//! ```rust
//! use plait::middleware::authenticate;
//! use plait::{Request, handlers};
//!
//! let admin = authenticate(
//!     |req: &dyn Request| req.header("x-api-key") == Some("s3cret"),
//!     handlers::text("welcome"),
//! );
//! # let _ = admin;
//! ```
//!
//! The same shape serves any other go/no-go check (feature flags, method
//! checks, rate limits): only the predicate and the two branches change.

use tracing::debug;

use crate::handler::Handler;
use crate::handlers::Forbidden;
use crate::request::Request;
use crate::response::Response;

/// Decides whether a request may reach the protected handler.
///
/// Extracting and verifying the evidence is entirely up to the
/// implementation. Implemented for every `Fn(&dyn Request) -> bool`.
pub trait Authenticate: Send + Sync + 'static {
    fn is_authenticated(&self, req: &dyn Request) -> bool;
}

impl<F> Authenticate for F
where
    F: Fn(&dyn Request) -> bool + Send + Sync + 'static,
{
    fn is_authenticated(&self, req: &dyn Request) -> bool {
        self(req)
    }
}

/// Lets every request through. Stand-in for wiring and demos before a real
/// verifier exists.
#[derive(Clone, Copy, Debug, Default)]
pub struct AllowAll;

impl Authenticate for AllowAll {
    fn is_authenticated(&self, _req: &dyn Request) -> bool {
        true
    }
}

/// Routes each request to exactly one of two handlers, decided by `auth`.
pub struct Gate<P, U, H> {
    auth: P,
    unauthorized: U,
    protected: H,
}

impl<P: Authenticate, U: Handler, H: Handler> Gate<P, U, H> {
    pub fn new(auth: P, unauthorized: U, protected: H) -> Self {
        Self { auth, unauthorized, protected }
    }
}

impl<P: Authenticate, U: Handler, H: Handler> Handler for Gate<P, U, H> {
    fn serve(&self, req: &dyn Request, res: &mut dyn Response) {
        if self.auth.is_authenticated(req) {
            self.protected.serve(req, res);
            return;
        }
        debug!(path = req.path(), "request rejected by gate");
        self.unauthorized.serve(req, res);
    }
}

/// Gate `handler` behind `auth`; rejected requests get
/// `"403: forbidden, go away!"` and no headers.
pub fn authenticate<P, H>(auth: P, handler: H) -> Gate<P, Forbidden, H>
where
    P: Authenticate,
    H: Handler,
{
    Gate::new(auth, Forbidden, handler)
}

/// Gate `handler` behind `auth`; rejected requests go to `unauthorized`.
pub fn authenticate_with<P, U, H>(auth: P, unauthorized: U, handler: H) -> Gate<P, U, H>
where
    P: Authenticate,
    U: Handler,
    H: Handler,
{
    Gate::new(auth, unauthorized, handler)
}

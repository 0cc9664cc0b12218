//! hyper transport adapter and graceful shutdown.
//!
//! The composition core never touches a socket. This module is the thin
//! layer that does: it accepts connections, turns each HTTP request into a
//! fresh [`OwnedRequest`] / [`BufferedResponse`] pair, runs the handler graph
//! synchronously on the connection task, and writes the result back.
//!
//! # Where failures become HTTP errors
//!
//! Combinators do not catch anything, so this is the one place collaborator
//! failures are converted:
//!
//! | Failure | Answer |
//! |---|---|
//! | body cannot be read | `400 Bad Request`, handler not called |
//! | body is not UTF-8 | `400 Bad Request`, handler not called |
//! | handler graph panics | `500 Internal Server Error`, server keeps running |
//!
//! A completed dispatch is always `200 OK`: status codes are not part of the
//! response contract.
//!
//! # Graceful shutdown
//!
//! On **SIGTERM** or **Ctrl-C** (or when the future passed to
//! [`Server::serve_with_shutdown`] resolves) the server:
//! 1. Immediately stops `listener.accept()`, so no new connections are made.
//! 2. Tells every open connection to shut down gracefully: a request already
//!    being served still gets its response, idle keep-alive connections are
//!    closed instead of waited on.
//! 3. Waits for every connection task to finish, then returns.

use std::convert::Infallible;
use std::future::Future;
use std::net::SocketAddr;
use std::panic::{AssertUnwindSafe, catch_unwind};

use bytes::Bytes;
use http::header::{HeaderName, HeaderValue};
use http::StatusCode;
use http_body_util::{BodyExt, Full};
use hyper::body::Body;
use hyper::service::service_fn;
use hyper_util::rt::{TokioExecutor, TokioIo};
use hyper_util::server::conn::auto::Builder as ConnBuilder;
use tokio::net::TcpListener;
use tokio::sync::watch;
use tracing::{error, info, warn};

use crate::error::Error;
use crate::handler::{BoxedHandler, Handler, HandlerExt};
use crate::request::{OwnedRequest, Request};
use crate::response::BufferedResponse;

type HttpResponse = http::Response<Full<Bytes>>;

enum Bind {
    Addr(SocketAddr),
    Listener(TcpListener),
}

/// The HTTP server.
pub struct Server {
    bind: Bind,
}

impl Server {
    /// Configures the server to bind to `addr` when it starts serving.
    ///
    /// # Panics
    ///
    /// Panics if `addr` is not a valid `host:port` string.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use plait::Server;
    /// let server = Server::bind("0.0.0.0:3000");
    /// ```
    pub fn bind(addr: &str) -> Self {
        let addr: SocketAddr = addr.parse().expect("invalid socket address");
        Self { bind: Bind::Addr(addr) }
    }

    /// Serves on an already-bound listener.
    pub fn from_listener(listener: TcpListener) -> Self {
        Self { bind: Bind::Listener(listener) }
    }

    /// Starts accepting connections and dispatching them through `handler`.
    ///
    /// Returns only after a full graceful shutdown (SIGTERM or Ctrl-C,
    /// followed by all in-flight requests completing).
    pub async fn serve(self, handler: impl Handler) -> Result<(), Error> {
        self.serve_with_shutdown(handler, shutdown_signal()).await
    }

    /// Like [`serve`](Server::serve), but shuts down when `signal` resolves
    /// instead of on process signals.
    pub async fn serve_with_shutdown<F>(self, handler: impl Handler, signal: F) -> Result<(), Error>
    where
        F: Future<Output = ()>,
    {
        let listener = match self.bind {
            Bind::Addr(addr) => TcpListener::bind(addr).await?,
            Bind::Listener(listener) => listener,
        };
        let addr = listener.local_addr()?;

        // One graph for every connection; dispatches only clone the Arc.
        let handler: BoxedHandler = handler.boxed();

        info!(addr = %addr, "plait listening");

        // JoinSet tracks every spawned connection task so we can wait for
        // them all to finish during graceful shutdown.
        let mut tasks = tokio::task::JoinSet::new();

        // Flipped once on shutdown; every connection task holds a receiver.
        let (stop_tx, stop_rx) = watch::channel(false);

        tokio::pin!(signal);

        loop {
            tokio::select! {
                // Check shutdown first so a signal immediately stops
                // accepting new connections, even if more are queued.
                biased;

                () = &mut signal => {
                    info!(in_flight = tasks.len(), "shutdown signal received, draining connections");
                    break;
                }

                res = listener.accept() => {
                    let (stream, remote_addr) = match res {
                        Ok(v) => v,
                        Err(e) => {
                            error!("accept error: {e}");
                            continue;
                        }
                    };

                    let handler = BoxedHandler::clone(&handler);
                    let io = TokioIo::new(stream);
                    let mut stop = stop_rx.clone();

                    tasks.spawn(async move {
                        // Called once per request on the connection.
                        let svc = service_fn(move |req| {
                            let handler = BoxedHandler::clone(&handler);
                            async move { dispatch(handler, req).await }
                        });

                        // Handles both HTTP/1.1 and HTTP/2, whatever the
                        // client negotiates.
                        let builder = ConnBuilder::new(TokioExecutor::new());
                        let conn = builder.serve_connection(io, svc);
                        tokio::pin!(conn);

                        let res = tokio::select! {
                            res = conn.as_mut() => res,
                            _ = stop.changed() => {
                                // Finishes the request in progress, then closes.
                                conn.as_mut().graceful_shutdown();
                                conn.await
                            }
                        };
                        if let Err(e) = res {
                            error!(peer = %remote_addr, "connection error: {e}");
                        }
                    });
                }

                // Reap finished connection tasks so the JoinSet does not grow
                // without bound on long-running servers.
                Some(_) = tasks.join_next(), if !tasks.is_empty() => {}
            }
        }

        // Drain: ask open connections to close, then wait for each of them.
        let _ = stop_tx.send(true);
        while tasks.join_next().await.is_some() {}

        info!("plait stopped");
        Ok(())
    }
}

// ── Request dispatch ──────────────────────────────────────────────────────────

/// Runs one request through the graph.
///
/// The error type is [`Infallible`]: every failure becomes an HTTP answer
/// here, so hyper never sees an error.
async fn dispatch<B: Body>(
    handler: BoxedHandler,
    req: hyper::Request<B>,
) -> Result<HttpResponse, Infallible> {
    let request = match read_request(req).await {
        Ok(request) => request,
        Err(reason) => {
            warn!(reason, "rejecting unreadable request");
            return Ok(plain_status(StatusCode::BAD_REQUEST));
        }
    };
    Ok(run(&handler, &request))
}

async fn read_request<B: Body>(req: hyper::Request<B>) -> Result<OwnedRequest, &'static str> {
    let (parts, body) = req.into_parts();
    let body = body.collect().await.map_err(|_| "body could not be read")?.to_bytes();
    let body = String::from_utf8(body.to_vec()).map_err(|_| "body is not valid UTF-8")?;

    let mut request = OwnedRequest::new(parts.uri.path(), body);
    for (name, value) in &parts.headers {
        // `to_str` only accepts visible ASCII; any UTF-8 value is kept.
        if let Ok(value) = std::str::from_utf8(value.as_bytes()) {
            request = request.with_header(name.as_str(), value);
        }
    }
    Ok(request)
}

/// Serves `request` against a fresh response and converts the outcome.
fn run(handler: &dyn Handler, request: &OwnedRequest) -> HttpResponse {
    let mut response = BufferedResponse::new();
    let outcome = catch_unwind(AssertUnwindSafe(|| handler.serve(request, &mut response)));
    if outcome.is_err() {
        error!(path = request.path(), "handler panicked, answering 500");
        return plain_status(StatusCode::INTERNAL_SERVER_ERROR);
    }
    into_http(response)
}

fn into_http(response: BufferedResponse) -> HttpResponse {
    let (body, headers) = response.into_parts();
    let mut out = http::Response::new(Full::new(Bytes::from(body.unwrap_or_default())));

    for (key, value) in headers {
        match (HeaderName::from_bytes(key.as_bytes()), HeaderValue::from_str(&value)) {
            (Ok(name), Ok(value)) => {
                out.headers_mut().append(name, value);
            }
            _ => warn!(key = %key, value = %value, "dropping header that is not valid HTTP"),
        }
    }
    out
}

fn plain_status(status: StatusCode) -> HttpResponse {
    let mut out = http::Response::new(Full::new(Bytes::new()));
    *out.status_mut() = status;
    out
}

// ── Shutdown signal ───────────────────────────────────────────────────────────

/// Resolves on the first shutdown signal the process receives.
///
/// On Unix this listens for both **SIGTERM** and **SIGINT** (Ctrl-C).
/// On Windows only Ctrl-C is available.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("failed to install Ctrl-C handler: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let sigterm = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                error!("failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    // `pending()` never resolves: on non-Unix platforms the SIGTERM arm is
    // effectively disabled.
    #[cfg(not(unix))]
    let sigterm = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c   => {}
        () = sigterm  => {}
    }
}

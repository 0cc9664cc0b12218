//! Before/after logging stages.
//!
//! The stages write to a [`LogSink`] and never touch the response. The
//! default sink forwards to `tracing`; install a subscriber in the binary
//! (e.g. `tracing_subscriber::fmt::init()`) to see the output.

use tracing::info;

use crate::handler::Handler;
use crate::middleware::sequence::{Sequence, ordered};
use crate::request::Request;
use crate::response::Response;

const AFTER_MESSAGE: &str = "Goodbye";

/// Destination for log-stage messages.
///
/// Implemented for every `Fn(&str)`. To share one destination between
/// several stages, clone a closure that captures it.
pub trait LogSink: Send + Sync + 'static {
    fn log(&self, message: &str);
}

impl<F> LogSink for F
where
    F: Fn(&str) + Send + Sync + 'static,
{
    fn log(&self, message: &str) {
        self(message);
    }
}

/// Emits each message as an `info` event.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingSink;

impl LogSink for TracingSink {
    fn log(&self, message: &str) {
        info!(target: "plait::middleware", "{message}");
    }
}

/// Stage that logs `"{path}: hello!"`.
pub struct LogBefore<S>(S);

impl<S: LogSink> Handler for LogBefore<S> {
    fn serve(&self, req: &dyn Request, _res: &mut dyn Response) {
        self.0.log(&format!("{}: hello!", req.path()));
    }
}

/// Stage that logs `"Goodbye"`.
pub struct LogAfter<S>(S);

impl<S: LogSink> Handler for LogAfter<S> {
    fn serve(&self, _req: &dyn Request, _res: &mut dyn Response) {
        self.0.log(AFTER_MESSAGE);
    }
}

pub fn log_before<H: Handler>(handler: H) -> Sequence<LogBefore<TracingSink>, H> {
    log_before_with(TracingSink, handler)
}

pub fn log_after<H: Handler>(handler: H) -> Sequence<H, LogAfter<TracingSink>> {
    log_after_with(TracingSink, handler)
}

pub fn log_before_with<S: LogSink, H: Handler>(sink: S, handler: H) -> Sequence<LogBefore<S>, H> {
    ordered(LogBefore(sink), handler)
}

pub fn log_after_with<S: LogSink, H: Handler>(sink: S, handler: H) -> Sequence<H, LogAfter<S>> {
    ordered(handler, LogAfter(sink))
}

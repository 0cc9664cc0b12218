//! Middleware combinators.
//!
//! A middleware takes one or more handlers and returns a handler. Nothing
//! here is a special kind of object: [`Sequence`] and [`Gate`] implement
//! [`Handler`](crate::Handler) like everything else, so they nest without
//! limit.
//!
//! Two primitives, several named compositions:
//!
//! | Combinator | Built from | Runs |
//! |---|---|---|
//! | [`ordered`] | primitive | `first`, then `second` (AND) |
//! | [`authenticate`] / [`authenticate_with`] | primitive | `protected` *or* `unauthorized` (OR) |
//! | [`with_header`], [`content_type`], [`application_json`] | [`ordered`] | handler, then header append |
//! | [`log_before`], [`log_after`] | [`ordered`] | log stage and handler |
//!
//! No combinator catches a panic from the handlers it wraps, and none
//! retries. Failures end the dispatch and are the transport's to convert.

mod gate;
mod header;
mod log;
mod sequence;

pub use gate::{AllowAll, Authenticate, Gate, authenticate, authenticate_with};
pub use header::{AddHeader, CONTENT_TYPE, application_json, content_type, with_header};
pub use log::{
    LogAfter, LogBefore, LogSink, TracingSink, log_after, log_after_with, log_before,
    log_before_with,
};
pub use sequence::{Sequence, ordered};

//! Built-in terminal handlers.
//!
//! These are the defaults the router and the gate fall back on when the
//! caller does not supply their own.

use crate::handler::Handler;
use crate::request::Request;
use crate::response::Response;

pub const NOT_FOUND_BODY: &str = "404: not found!";
pub const FORBIDDEN_BODY: &str = "403: forbidden, go away!";

/// Writes [`NOT_FOUND_BODY`] and adds no headers.
#[derive(Clone, Copy, Debug, Default)]
pub struct NotFound;

impl Handler for NotFound {
    fn serve(&self, _req: &dyn Request, res: &mut dyn Response) {
        res.set_body(NOT_FOUND_BODY);
    }
}

/// Writes [`FORBIDDEN_BODY`] and adds no headers.
#[derive(Clone, Copy, Debug, Default)]
pub struct Forbidden;

impl Handler for Forbidden {
    fn serve(&self, _req: &dyn Request, res: &mut dyn Response) {
        res.set_body(FORBIDDEN_BODY);
    }
}

pub fn not_found() -> NotFound { NotFound }
pub fn forbidden() -> Forbidden { Forbidden }

/// Always writes the same body.
#[derive(Clone, Debug)]
pub struct Text(String);

pub fn text(body: impl Into<String>) -> Text {
    Text(body.into())
}

impl Handler for Text {
    fn serve(&self, _req: &dyn Request, res: &mut dyn Response) {
        res.set_body(&self.0);
    }
}

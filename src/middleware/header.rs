//! Response-header injection.

use crate::handler::Handler;
use crate::middleware::sequence::{Sequence, ordered};
use crate::request::Request;
use crate::response::{ContentType, Response};

/// Header key written by [`content_type`] and [`application_json`].
pub const CONTENT_TYPE: &str = "ContentType";

/// Stage that unconditionally appends one fixed header.
#[derive(Clone, Debug)]
pub struct AddHeader {
    key: String,
    value: String,
}

impl Handler for AddHeader {
    fn serve(&self, _req: &dyn Request, res: &mut dyn Response) {
        res.add_header(&self.key, &self.value);
    }
}

/// Runs `handler`, then appends `key: value` whatever the handler did.
pub fn with_header<H: Handler>(key: &str, value: &str, handler: H) -> Sequence<H, AddHeader> {
    ordered(handler, AddHeader { key: key.to_owned(), value: value.to_owned() })
}

pub fn content_type<H: Handler>(content_type: ContentType, handler: H) -> Sequence<H, AddHeader> {
    with_header(CONTENT_TYPE, content_type.as_str(), handler)
}

/// `ContentType: application/json` after `handler`.
pub fn application_json<H: Handler>(handler: H) -> Sequence<H, AddHeader> {
    content_type(ContentType::Json, handler)
}

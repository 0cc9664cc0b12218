//! Ordered composition.

use crate::handler::Handler;
use crate::request::Request;
use crate::response::Response;

/// Runs two handlers one after the other against the same request and the
/// same response.
///
/// Both stages always run, `first` to completion before `second` starts.
/// There is no isolation between them: headers from both accumulate in call
/// order and a body written by `second` replaces the one `first` wrote.
pub struct Sequence<A, B> {
    first: A,
    second: B,
}

impl<A: Handler, B: Handler> Sequence<A, B> {
    pub fn new(first: A, second: B) -> Self {
        Self { first, second }
    }
}

impl<A: Handler, B: Handler> Handler for Sequence<A, B> {
    fn serve(&self, req: &dyn Request, res: &mut dyn Response) {
        self.first.serve(req, res);
        self.second.serve(req, res);
    }
}

/// `do_first`, then `do_second`.
pub fn ordered<A: Handler, B: Handler>(do_first: A, do_second: B) -> Sequence<A, B> {
    Sequence::new(do_first, do_second)
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;
    use crate::handler::handler_fn;
    use crate::request::OwnedRequest;
    use crate::response::BufferedResponse;

    type Events = Arc<Mutex<Vec<String>>>;

    /// Records entering and leaving `name`, writing `name` as the body.
    fn stage(name: &'static str, events: &Events) -> impl Handler + use<> {
        let events = Arc::clone(events);
        handler_fn(move |_: &dyn Request, res: &mut dyn Response| {
            events.lock().unwrap().push(format!("{name} start"));
            res.set_body(name);
            events.lock().unwrap().push(format!("{name} end"));
        })
    }

    #[test]
    fn first_completes_before_second_begins() {
        let events = Events::default();
        let seq = ordered(stage("first", &events), stage("second", &events));

        seq.serve(&OwnedRequest::new("/", ""), &mut BufferedResponse::new());

        assert_eq!(
            *events.lock().unwrap(),
            ["first start", "first end", "second start", "second end"]
        );
    }

    #[test]
    fn second_overwrites_body_and_appends_after_first() {
        let second = handler_fn(|_: &dyn Request, res: &mut dyn Response| {
            res.set_body("second");
            res.add_header("Stage", "second");
        });
        let writer = handler_fn(|_: &dyn Request, res: &mut dyn Response| {
            res.set_body("first");
            res.add_header("Stage", "first");
        });

        let mut res = BufferedResponse::new();
        ordered(writer, second).serve(&OwnedRequest::new("/", "req-body"), &mut res);

        assert_eq!(res.body(), Some("second"));
        assert_eq!(res.header_values("Stage"), ["first", "second"]);
    }

    #[test]
    fn both_stages_run_even_when_first_writes_nothing() {
        let events = Events::default();
        let noop = handler_fn(|_: &dyn Request, _: &mut dyn Response| {});
        let mut res = BufferedResponse::new();

        ordered(noop, stage("second", &events)).serve(&OwnedRequest::new("/", ""), &mut res);

        assert_eq!(res.body(), Some("second"));
        assert_eq!(events.lock().unwrap().len(), 2);
    }
}

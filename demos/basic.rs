//! Minimal plait example: one authenticated JSON endpoint behind request
//! logging, everything else answered by the default not-found handler.
//!
//! Run with:
//!   RUST_LOG=info cargo run --example basic
//!
//! Try:
//!   curl -i -d World http://localhost:3000/endpoint/resource
//!   curl -i http://localhost:3000/unknown

use plait::middleware::{AllowAll, application_json, authenticate, log_after, log_before};
use plait::{Request, Response, Router, Server, handler_fn};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    // The graph is a handler itself.
    let app = log_before(log_after(
        Router::builder()
            .route(
                "/endpoint/resource",
                authenticate(AllowAll, application_json(handler_fn(business_logic))),
            )
            .build(),
    ));

    Server::bind("0.0.0.0:3000")
        .serve(app)
        .await
        .expect("server error");
}

// POST /endpoint/resource
//
// req.body() is the raw payload; plait does not parse it.
fn business_logic(req: &dyn Request, res: &mut dyn Response) {
    res.set_body(&format!(r#"200: {{"Hello":"{}"}}"#, req.body()));
}

//! Minimal courier example: the classic `/foo` routes, a mounted router and
//! a middleware.
//!
//! Run with:
//!   cargo run --example basic
//!
//! Try:
//!   curl http://localhost:7000/foo/42/bar/7
//!   curl -X POST http://localhost:7000/foo
//!   curl -X PUT http://localhost:7000/foo
//!   curl -i http://localhost:7000/users/99
//!   curl -X DELETE http://localhost:7000/missing

use courier::{Next, Request, Response, Router, Server, Status, handlers, middleware};
use serde_json::json;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let users = Router::new()
        .get("/", list_users)
        .use_middleware(api_version)
        .get("/:id", get_user);

    let server = Server::new()
        .use_middleware(middleware::trace)
        .get("/", hit)
        .get("/foo/:id/bar/:id2", hit)
        .get("/foo/:id/bar", hit)
        .get("/foo/:id", hit)
        .get("/foo", hit)
        .post("/foo", create_foo)
        .put("/foo", hit)
        .patch("/foo/:id", handlers![api_version, hit])
        .mount("/users", users);

    server
        .listen("localhost:7000", || println!("Awaiting connections..."))
        .await
        .expect("server error");
}

// GET / and friends. Echoes the method and path that were requested.
fn hit(req: &mut Request, res: &mut Response, _: &mut Next) {
    res.set_status(Status::Ok);
    res.send(format!("You just hit the {} {} route", req.method(), req.route()));
}

// POST /foo. The body goes out as a JSON-escaped string, still text/plain.
fn create_foo(req: &mut Request, res: &mut Response, _: &mut Next) {
    res.json(json!({
        "message": format!("You just hit the {} /foo route", req.method()),
        "status": "success",
    }));
}

// Middleware: stamps the response and hands over. A middleware that emits a
// response instead of calling `next` breaks the chain and adds a 500.
fn api_version(_: &mut Request, res: &mut Response, next: &mut Next) {
    res.set_header("X-Api-Version", "1");
    next.next();
}

fn list_users(_: &mut Request, res: &mut Response, _: &mut Next) {
    res.send("alice, bob");
}

fn get_user(req: &mut Request, res: &mut Response, _: &mut Next) {
    let id = req.param("id").unwrap_or("unknown");
    res.json(json!({ "id": id, "name": "alice" }));
}

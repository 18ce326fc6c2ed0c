//! Request router with scoped middleware.
//!
//! A [`Router`] owns a route table and an ordered list of middleware batches.
//! Every route remembers how many batches existed when it was registered;
//! those, and only those, run in front of its handlers.
//!
//! ```rust
//! use courier::{Next, Request, Response, Router};
//!
//! fn log(_: &mut Request, _: &mut Response, next: &mut Next) { next.next() }
//! fn public(_: &mut Request, res: &mut Response, _: &mut Next) { res.send("public") }
//! fn private(_: &mut Request, res: &mut Response, _: &mut Next) { res.send("private") }
//!
//! let router = Router::new()
//!     .get("/public", public)      // no middleware
//!     .use_middleware(log)
//!     .get("/private", private);   // runs `log` first
//! ```

use std::collections::HashMap;

use crate::error::Error;
use crate::handler::{BoxedHandler, Handlers};
use crate::matcher;
use crate::method::Method;
use crate::table::{RouteEntry, RouteKey, RouteTable};

/// A composable set of routes and middlewares.
///
/// Register everything on it, then pass it to
/// [`Server::with_router`](crate::Server::with_router) or mount it with
/// [`Server::mount`](crate::Server::mount). Each method returns `self` so
/// registrations chain naturally.
#[derive(Clone, Default)]
pub struct Router {
    pub(crate) routes: RouteTable,
    pub(crate) middlewares: Vec<Vec<BoxedHandler>>,
}

/// A resolved route: the full chain to execute and the bound path parameters.
pub(crate) struct Matched {
    pub(crate) chain: Vec<BoxedHandler>,
    pub(crate) params: HashMap<String, String>,
}

impl Router {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `handlers` for a method + path pair, replacing any previous
    /// registration of the same pair.
    ///
    /// Path parameters use `:name` syntax and bind one segment each. Trailing
    /// slashes are ignored except on `/` itself.
    pub fn on(mut self, method: Method, path: &str, handlers: impl Into<Handlers>) -> Self {
        let key = RouteKey { method, path: matcher::normalize(path) };
        let entry = RouteEntry {
            handlers: handlers.into().0,
            cutoff: self.middlewares.len(),
        };
        self.routes.insert(key, entry);
        self
    }

    pub fn get(self, path: &str, handlers: impl Into<Handlers>) -> Self {
        self.on(Method::Get, path, handlers)
    }

    pub fn post(self, path: &str, handlers: impl Into<Handlers>) -> Self {
        self.on(Method::Post, path, handlers)
    }

    pub fn put(self, path: &str, handlers: impl Into<Handlers>) -> Self {
        self.on(Method::Put, path, handlers)
    }

    pub fn patch(self, path: &str, handlers: impl Into<Handlers>) -> Self {
        self.on(Method::Patch, path, handlers)
    }

    pub fn delete(self, path: &str, handlers: impl Into<Handlers>) -> Self {
        self.on(Method::Delete, path, handlers)
    }

    /// Appends one middleware batch. It applies to routes registered *after*
    /// this call only.
    pub fn use_middleware(mut self, handlers: impl Into<Handlers>) -> Self {
        self.middlewares.push(handlers.into().0);
        self
    }

    /// Copies every route of `child` under `prefix` and appends its
    /// middleware batches after this router's own.
    ///
    /// Child cutoffs are shifted by the number of batches this router holds
    /// now, so middlewares registered here before the mount run in front of
    /// the child's routes. The child's `/` lands on exactly `prefix`.
    pub(crate) fn mount(&mut self, prefix: &str, child: Router) {
        let prefix = matcher::normalize(prefix);
        let shift = self.middlewares.len();

        for (key, entry) in child.routes.into_entries() {
            let key = RouteKey { method: key.method, path: join(&prefix, &key.path) };
            let entry = RouteEntry { handlers: entry.handlers, cutoff: entry.cutoff + shift };
            self.routes.insert(key, entry);
        }
        self.middlewares.extend(child.middlewares);
    }

    /// Resolves `method` + `path`: exact key first, then pattern routes in
    /// registration order.
    pub(crate) fn lookup(&self, method: &str, path: &str) -> Result<Matched, Error> {
        let not_found = || Error::RouteNotFound { method: method.to_owned(), path: path.to_owned() };
        let method: Method = method.parse().map_err(|()| not_found())?;

        let key = RouteKey { method, path: path.to_owned() };
        if let Some(entry) = self.routes.get(&key) {
            return Ok(Matched { chain: self.chain(entry), params: HashMap::new() });
        }

        self.routes
            .iter()
            .filter(|(key, _)| key.method == method && matcher::is_pattern(&key.path))
            .find_map(|(key, entry)| {
                let params = matcher::match_path(path, &key.path)?;
                Some(Matched { chain: self.chain(entry), params })
            })
            .ok_or_else(not_found)
    }

    /// Middlewares within the entry's cutoff, then the entry's own handlers.
    fn chain(&self, entry: &RouteEntry) -> Vec<BoxedHandler> {
        self.middlewares
            .iter()
            .take(entry.cutoff)
            .flatten()
            .chain(&entry.handlers)
            .cloned()
            .collect()
    }
}

fn join(prefix: &str, path: &str) -> String {
    match (prefix, path) {
        ("/" | "", _) => path.to_owned(),
        (_, "/") => prefix.to_owned(),
        _ => format!("{prefix}{path}"),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;
    use crate::chain::{self, Next};
    use crate::request::Request;
    use crate::response::Response;

    type Log = Arc<Mutex<Vec<&'static str>>>;

    fn mark(log: &Log, name: &'static str) -> Handlers {
        let log = Arc::clone(log);
        Handlers::new().then(move |_: &mut Request, _: &mut Response, next: &mut Next| {
            log.lock().unwrap().push(name);
            next.next();
        })
    }

    fn run(router: &Router, method: &str, path: &str) {
        let matched = router.lookup(method, path).unwrap_or_else(|e| panic!("{e}"));
        chain::execute(&matched.chain, &mut Request::default(), &mut Response::default()).unwrap();
    }

    #[test]
    fn exact_route_resolves_only_its_handlers() {
        let log = Log::default();
        let router = Router::new()
            .get("/a", mark(&log, "a"))
            .get("/b", mark(&log, "b"));

        run(&router, "GET", "/a");
        assert_eq!(*log.lock().unwrap(), ["a"]);
    }

    #[test]
    fn registration_path_is_normalized() {
        let router = Router::new().get("/foo/", |_: &mut Request, _: &mut Response, _: &mut Next| {});
        assert!(router.lookup("GET", "/foo").is_ok());
        assert!(router.lookup("POST", "/foo").is_err());
    }

    #[test]
    fn later_registration_wins() {
        let log = Log::default();
        let router = Router::new()
            .get("/a", mark(&log, "first"))
            .get("/a", mark(&log, "second"));

        run(&router, "GET", "/a");
        assert_eq!(*log.lock().unwrap(), ["second"]);
    }

    #[test]
    fn middleware_applies_only_to_later_routes() {
        let log = Log::default();
        let router = Router::new()
            .get("/early", mark(&log, "early"))
            .use_middleware(mark(&log, "mw1"))
            .use_middleware(Handlers(
                mark(&log, "mw2a").0.into_iter().chain(mark(&log, "mw2b").0).collect(),
            ))
            .get("/late", mark(&log, "late"))
            .use_middleware(mark(&log, "mw3"));

        run(&router, "GET", "/early");
        assert_eq!(*log.lock().unwrap(), ["early"]);

        log.lock().unwrap().clear();
        run(&router, "GET", "/late");
        assert_eq!(*log.lock().unwrap(), ["mw1", "mw2a", "mw2b", "late"]);
    }

    #[test]
    fn pattern_route_binds_params() {
        let router = Router::new()
            .get("/foo/:id", |_: &mut Request, _: &mut Response, _: &mut Next| {})
            .get("/foo/:id/bar/:id2", |_: &mut Request, _: &mut Response, _: &mut Next| {});

        let matched = router.lookup("GET", "/foo/42/bar/7").unwrap();
        assert_eq!(matched.params.len(), 2);
        assert_eq!(matched.params["id"], "42");
        assert_eq!(matched.params["id2"], "7");

        let matched = router.lookup("GET", "/foo/42").unwrap();
        assert_eq!(matched.params.len(), 1);
        assert_eq!(matched.params["id"], "42");
    }

    #[test]
    fn exact_route_beats_pattern() {
        let log = Log::default();
        let router = Router::new()
            .get("/foo/:id", mark(&log, "pattern"))
            .get("/foo/new", mark(&log, "exact"));

        let matched = router.lookup("GET", "/foo/new").unwrap();
        assert!(matched.params.is_empty());
        run(&router, "GET", "/foo/new");
        assert_eq!(*log.lock().unwrap(), ["exact"]);
    }

    #[test]
    fn pattern_respects_method() {
        let router = Router::new().get("/foo/:id", |_: &mut Request, _: &mut Response, _: &mut Next| {});
        assert!(matches!(
            router.lookup("DELETE", "/foo/1"),
            Err(Error::RouteNotFound { .. })
        ));
    }

    #[test]
    fn unknown_method_is_not_found() {
        let router = Router::new().get("/", |_: &mut Request, _: &mut Response, _: &mut Next| {});
        let err = router.lookup("BREW", "/").err().unwrap();
        assert!(matches!(err, Error::RouteNotFound { method, path } if method == "BREW" && path == "/"));
    }

    #[test]
    fn mount_prefixes_paths_and_shifts_cutoffs() {
        let log = Log::default();
        let child = Router::new()
            .get("/", mark(&log, "root"))
            .use_middleware(mark(&log, "child-mw"))
            .get("/bar", mark(&log, "bar"));

        let mut parent = Router::new().use_middleware(mark(&log, "parent-mw"));
        parent.mount("/foo", child);

        run(&parent, "GET", "/foo");
        assert_eq!(*log.lock().unwrap(), ["parent-mw", "root"]);

        log.lock().unwrap().clear();
        run(&parent, "GET", "/foo/bar");
        assert_eq!(*log.lock().unwrap(), ["parent-mw", "child-mw", "bar"]);
        assert_eq!(parent.middlewares.len(), 2);
    }

    #[test]
    fn mount_is_a_snapshot() {
        let log = Log::default();
        let child = Router::new().get("/x", mark(&log, "x"));

        let mut parent = Router::new();
        parent.mount("/c", child.clone());
        let _child = child.use_middleware(mark(&log, "late-mw"));

        run(&parent, "GET", "/c/x");
        assert_eq!(*log.lock().unwrap(), ["x"]);
        assert!(parent.middlewares.is_empty());
    }

    #[test]
    fn joins_prefixes() {
        assert_eq!(join("/foo", "/"), "/foo");
        assert_eq!(join("/foo", "/bar"), "/foo/bar");
        assert_eq!(join("/", "/bar"), "/bar");
        assert_eq!(join("/", "/"), "/");
    }
}

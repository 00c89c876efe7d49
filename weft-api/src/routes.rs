use std::collections::HashMap;

use crate::request::Request;
use crate::response::Response;

/// Route handlers are plain functions. The table owner decides what runs;
/// the request core only carries the table and the resolved hook.
pub type Handler = fn(&Request) -> Response;

/// Routing table keyed by `(METHOD, path)`, e.g. `("GET", "/home")`.
pub type RouteTable = HashMap<(String, String), Handler>;

pub fn route_key(method: &str, path: &str) -> (String, String) {
    (method.to_string(), path.to_string())
}

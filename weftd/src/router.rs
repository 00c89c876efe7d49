use serde::Serialize;
use std::collections::HashMap;

use weft_api::request::Request;
use weft_api::response::Response;
use weft_api::routes::{route_key, Handler, RouteTable};
use weft_api::status::StatusCode;

/// Built-in routing table. The caller hands this to the request owner; the
/// request core itself never walks it.
pub fn default_routes() -> RouteTable {
    let mut routes = RouteTable::new();
    routes.insert(route_key("GET", "/index.html"), index as Handler);
    routes.insert(route_key("GET", "/home"), home as Handler);
    routes.insert(route_key("GET", "/whoami"), whoami as Handler);
    routes.insert(route_key("POST", "/login"), login as Handler);
    routes
}

/// Looks up the handler for the request's `(method, path)` pair. A request
/// whose first line never parsed resolves to nothing.
pub fn resolve(req: &Request, routes: &RouteTable) -> Option<Handler> {
    let method = req.method.as_deref()?;
    let path = req.path.as_deref()?;
    routes.get(&route_key(method, path)).copied()
}

/// Resolves the hook for a populated request and runs it, with a 404
/// fallback when the table has no entry.
pub fn dispatch(req: &mut Request) -> Response {
    req.hook = resolve(req, &req.routes);
    match req.hook {
        Some(handler) => handler(req),
        None => {
            tracing::warn!(
                "no route for {} {}",
                req.method.as_deref().unwrap_or("-"),
                req.path.as_deref().unwrap_or("-"),
            );
            Response {
                code: StatusCode::NotFound,
                headers: vec![],
                body: vec![],
            }
        }
    }
}

fn html_response(body: &str) -> Response {
    Response {
        code: StatusCode::Ok,
        headers: vec![("content-type".into(), "text/html".into())],
        body: body.as_bytes().to_vec(),
    }
}

fn json_response(code: StatusCode, body: Vec<u8>) -> Response {
    Response {
        code,
        headers: vec![("content-type".into(), "application/json".into())],
        body,
    }
}

fn index(_req: &Request) -> Response {
    html_response("<html><body><h1>It works</h1></body></html>")
}

fn home(_req: &Request) -> Response {
    html_response("<html><body><p>Welcome home.</p></body></html>")
}

#[derive(Serialize)]
struct WhoAmI<'a> {
    method: &'a str,
    path: &'a str,
    cookies: &'a HashMap<String, String>,
}

fn whoami(req: &Request) -> Response {
    let payload = WhoAmI {
        method: req.method.as_deref().unwrap_or(""),
        path: req.path.as_deref().unwrap_or(""),
        cookies: &req.cookies,
    };
    match serde_json::to_vec(&payload) {
        Ok(body) => json_response(StatusCode::Ok, body),
        Err(_) => json_response(StatusCode::InternalServerError, b"{}".to_vec()),
    }
}

fn login(req: &Request) -> Response {
    let authorized = req
        .headers
        .get("authorization")
        .map(|v| v.starts_with("Basic "))
        .unwrap_or(false);
    if !authorized {
        return json_response(
            StatusCode::Unauthorized,
            b"{\"error\":\"authorization required\"}".to_vec(),
        );
    }
    json_response(StatusCode::Ok, b"{\"status\":\"ok\"}".to_vec())
}

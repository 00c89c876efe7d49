use std::collections::HashMap;

use serde_json::Value;
use url::form_urlencoded;

use crate::auth::Auth;
use crate::headers::HeaderMap;
use crate::routes::{Handler, RouteTable};

/// The three tokens of a well-formed request line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestLine {
    pub method: String,
    pub path: String,
    pub version: String,
}

/// Content shapes accepted by [`Request::prepare_body`]. File uploads
/// (multipart) are not handled; callers pre-encode and pass `Bytes`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BodyData {
    Form(Vec<(String, String)>),
    Text(String),
    Bytes(Vec<u8>),
}

/// Mutable request state, one instance per message.
///
/// Populated either once from a raw inbound message via [`prepare`], or
/// incrementally through the outbound `prepare_*` calls. Absent `method`
/// and `path` after `prepare` mean the first line never parsed; callers
/// must check before routing.
///
/// [`prepare`]: Request::prepare
#[derive(Debug, Clone, Default)]
pub struct Request {
    pub method: Option<String>,
    pub path: Option<String>,
    pub version: Option<String>,
    pub headers: HeaderMap,
    pub cookies: HashMap<String, String>,
    pub body: Option<Vec<u8>>,
    /// Routing table supplied by the owner of this request. Stored as-is;
    /// resolution happens in the dispatch layer, not here.
    pub routes: RouteTable,
    /// Handler resolved for the current `(method, path)` pair. Written by
    /// the dispatch layer only.
    pub hook: Option<Handler>,
}

/// Splits the first line of a raw message into its three tokens, applying
/// the `/` → `/index.html` default.
///
/// Anything other than exactly `METHOD PATH VERSION` yields `None`:
/// malformed input is an expected outcome here, not an error.
pub fn extract_request_line(raw: &str) -> Option<RequestLine> {
    let first_line = raw.lines().next()?;
    let mut tokens = first_line.split_whitespace();
    let method = tokens.next()?.to_string();
    let path = tokens.next()?.to_string();
    let version = tokens.next()?.to_string();
    if tokens.next().is_some() {
        return None;
    }
    let path = if path == "/" {
        "/index.html".to_string()
    } else {
        path
    };
    Some(RequestLine {
        method,
        path,
        version,
    })
}

/// Parses the header block: every line after the first that carries a
/// `": "` separator contributes an entry, split at the first occurrence so
/// values keep embedded colons. Keys are stored lower-case and a duplicate
/// key overwrites the previous value. Lines without the separator are
/// skipped.
pub fn parse_headers(raw: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    for line in raw.split("\r\n").skip(1) {
        if let Some((key, value)) = line.split_once(": ") {
            headers.set(key.to_ascii_lowercase(), value);
        }
    }
    headers
}

/// Splits a `Cookie` header value into name/value pairs. Pieces without
/// `=` are skipped; later duplicates overwrite earlier ones. Values are
/// kept raw, with no percent-decoding.
pub fn parse_cookies(cookie_header: &str) -> HashMap<String, String> {
    let mut cookies = HashMap::new();
    if cookie_header.is_empty() {
        return cookies;
    }
    for piece in cookie_header.split(';') {
        let piece = piece.trim();
        if let Some((name, value)) = piece.split_once('=') {
            cookies.insert(name.to_string(), value.to_string());
        }
    }
    cookies
}

/// Everything after the header/blank-line boundary. An empty remainder is
/// reported as no body at all.
pub fn extract_body(raw: &str) -> Option<Vec<u8>> {
    let (_, rest) = raw.split_once("\r\n\r\n")?;
    if rest.is_empty() {
        return None;
    }
    Some(rest.as_bytes().to_vec())
}

impl Request {
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs the full inbound pipeline over one raw message: request line,
    /// header block, cookie header, body extraction, in that order.
    /// Routing is left to the dispatch layer; `routes` and `hook` are not
    /// touched.
    pub fn prepare(&mut self, raw: &str) {
        match extract_request_line(raw) {
            Some(line) => {
                self.method = Some(line.method);
                self.path = Some(line.path);
                self.version = Some(line.version);
            }
            None => {
                self.method = None;
                self.path = None;
                self.version = None;
            }
        }

        self.headers = parse_headers(raw);
        let cookie_header = self.headers.get("cookie").unwrap_or("").to_string();
        self.cookies = parse_cookies(&cookie_header);
        self.body = extract_body(raw);
    }

    /// Encodes an outbound body. When several inputs are supplied the JSON
    /// value wins, then a form mapping, then text, then raw bytes. Always
    /// finishes by refreshing the `Content-Length` header.
    pub fn prepare_body(&mut self, data: Option<BodyData>, json: Option<&Value>) {
        self.body = None;

        if let Some(json) = json {
            self.body = Some(json.to_string().into_bytes());
            self.headers.set("content-type", "application/json");
        } else if let Some(data) = data {
            match data {
                BodyData::Form(pairs) => {
                    let mut encoder = form_urlencoded::Serializer::new(String::new());
                    for (name, value) in &pairs {
                        encoder.append_pair(name, value);
                    }
                    self.body = Some(encoder.finish().into_bytes());
                    self.headers
                        .set("content-type", "application/x-www-form-urlencoded");
                }
                BodyData::Text(text) => self.body = Some(text.into_bytes()),
                BodyData::Bytes(bytes) => self.body = Some(bytes),
            }
        }

        // Explicitly empty input and no input at all are the same
        // observable state: no body.
        self.body = self.body.take().filter(|bytes| !bytes.is_empty());

        self.prepare_content_length();
    }

    /// Sets `Content-Length` from the current body; absent counts as zero.
    /// Callers changing the body afterwards must run this again.
    pub fn prepare_content_length(&mut self) {
        let length = self.body.as_ref().map_or(0, Vec::len);
        self.headers.set("Content-Length", length.to_string());
    }

    /// Sets the `Authorization` header for the given credential; `None`
    /// leaves the headers untouched.
    pub fn prepare_auth(&mut self, auth: Option<Auth>) {
        if let Some(auth) = auth {
            self.headers.set("Authorization", auth.header_value());
        }
    }

    /// Writes a precomposed `name=value; name2=value2` string verbatim as
    /// the `Cookie` header. The caller is responsible for its syntax.
    pub fn prepare_cookies(&mut self, cookies: impl Into<String>) {
        self.headers.set("Cookie", cookies);
    }
}

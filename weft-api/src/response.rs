use crate::status::StatusCode;

pub const SERVER_NAME: &str = "weft/0.1";

#[derive(Debug, Clone)]
pub struct Response {
    pub code: StatusCode,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl Response {
    pub fn into_bytes(self) -> Vec<u8> {
        make_response(self.code, &self.headers, &self.body)
    }
}

pub fn make_response(code: StatusCode, headers: &[(String, String)], body: &[u8]) -> Vec<u8> {
    let date = httpdate::fmt_http_date(std::time::SystemTime::now());
    let mut out = format!(
        "HTTP/1.1 {} {}\r\nserver: {}\r\ndate: {}\r\n",
        code.as_u16(),
        code.reason(),
        SERVER_NAME,
        date
    )
    .into_bytes();
    let mut had_ct = false;
    let mut had_cl = false;
    for (k, v) in headers {
        if k.eq_ignore_ascii_case("content-type") {
            had_ct = true;
        }
        if k.eq_ignore_ascii_case("content-length") {
            had_cl = true;
        }
        out.extend_from_slice(k.as_bytes());
        out.extend_from_slice(b": ");
        out.extend_from_slice(v.as_bytes());
        out.extend_from_slice(b"\r\n");
    }
    if !had_ct {
        out.extend_from_slice(b"content-type: text/html\r\n");
    }
    if !had_cl {
        out.extend_from_slice(format!("content-length: {}\r\n", body.len()).as_bytes());
    }
    out.extend_from_slice(b"\r\n");
    out.extend_from_slice(body);
    out
}

pub fn make_empty_response(code: StatusCode) -> Vec<u8> {
    make_response(code, &[], &[])
}

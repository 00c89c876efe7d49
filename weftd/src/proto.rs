use memchr::memmem::Finder;
use tokio::io::AsyncReadExt;

use weft_api::limits::{enforce_max_request_size, MAX_REQUEST_BYTES};
use weft_api::request::parse_headers;
use weft_api::status::StatusCode;

/// Reads one request off the stream and returns it as raw text: the header
/// section up to the blank line, then a `content-length`-delimited body.
///
/// One request per connection; chunked encoding and keep-alive are not
/// supported at this layer.
pub async fn read_request<S>(stream: &mut S) -> Result<String, StatusCode>
where
    S: AsyncReadExt + Unpin,
{
    let mut buf = Vec::with_capacity(4096);
    let mut tmp = [0u8; 2048];
    // Resume CRLFCRLF scanning at the previous tail to avoid O(n^2) rescans
    let mut search_from: usize = 0;
    let finder = Finder::new(b"\r\n\r\n");
    let header_end;
    loop {
        let n = stream
            .read(&mut tmp)
            .await
            .map_err(|_| StatusCode::InternalServerError)?;
        if n == 0 {
            return Err(StatusCode::BadRequest);
        }
        let before_len = buf.len();
        buf.extend_from_slice(&tmp[..n]);
        if buf.len() > MAX_REQUEST_BYTES {
            return Err(StatusCode::RequestEntityTooLarge);
        }
        // Only scan the newly appended region, with overlap for the
        // boundary straddling a read
        let start = search_from.saturating_sub(3);
        if let Some(rel) = finder.find(&buf[start..]) {
            header_end = start + rel;
            break;
        }
        search_from = before_len + n;
    }

    let head = std::str::from_utf8(&buf[..header_end + 4]).map_err(|_| StatusCode::BadRequest)?;
    let content_length = parse_headers(head)
        .get("content-length")
        .and_then(|v| v.trim().parse::<usize>().ok())
        .unwrap_or(0);

    let total = header_end + 4 + content_length;
    if enforce_max_request_size(total).is_err() {
        return Err(StatusCode::RequestEntityTooLarge);
    }

    while buf.len() < total {
        let mut chunk = [0u8; 4096];
        let n = stream
            .read(&mut chunk)
            .await
            .map_err(|_| StatusCode::InternalServerError)?;
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);
    }
    buf.truncate(total);

    String::from_utf8(buf).map_err(|_| StatusCode::BadRequest)
}

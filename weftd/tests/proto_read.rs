use tokio::io::{duplex, AsyncWriteExt};
use weft_api::limits::MAX_REQUEST_BYTES;
use weft_api::status::StatusCode;
use weftd::proto::read_request;

#[tokio::test]
async fn reads_header_section_and_declared_body() {
    let (mut client, mut server) = duplex(8192);
    let raw = "POST /login HTTP/1.1\r\ncontent-length: 10\r\n\r\nuser=alice";
    client.write_all(raw.as_bytes()).await.unwrap();

    let got = read_request(&mut server).await.expect("readable request");
    assert_eq!(got, raw);
}

#[tokio::test]
async fn requests_without_content_length_stop_at_the_blank_line() {
    let (mut client, mut server) = duplex(8192);
    client
        .write_all(b"GET /home HTTP/1.1\r\nHost: x\r\n\r\ntrailing-noise")
        .await
        .unwrap();

    let got = read_request(&mut server).await.expect("readable request");
    assert_eq!(got, "GET /home HTTP/1.1\r\nHost: x\r\n\r\n");
}

#[tokio::test]
async fn body_bytes_beyond_content_length_are_dropped() {
    let (mut client, mut server) = duplex(8192);
    client
        .write_all(b"POST /x HTTP/1.1\r\ncontent-length: 4\r\n\r\nabcdEXTRA")
        .await
        .unwrap();

    let got = read_request(&mut server).await.expect("readable request");
    assert!(got.ends_with("\r\n\r\nabcd"));
}

// Feed a request whose header section exceeds the cap before the blank
// line is seen; the reader must bail out with 413 while we are writing.
#[tokio::test]
async fn oversized_header_section_is_rejected_with_413() {
    let (mut client, mut server) = duplex(8192);

    let reader = tokio::spawn(async move { read_request(&mut server).await });

    let mut req = Vec::with_capacity(MAX_REQUEST_BYTES + 1024);
    req.extend_from_slice(b"GET /home HTTP/1.1\r\n");
    req.extend_from_slice(b"x-fill: ");
    req.extend(std::iter::repeat(b'a').take(MAX_REQUEST_BYTES + 1));
    req.extend_from_slice(b"\r\n\r\n");
    // The reader drains as we write and may hang up early; that write
    // error is expected.
    let _ = client.write_all(&req).await;
    drop(client);

    let err = reader.await.unwrap().expect_err("oversized request");
    assert_eq!(err, StatusCode::RequestEntityTooLarge);
}

#[tokio::test]
async fn eof_before_the_blank_line_is_a_bad_request() {
    let (mut client, mut server) = duplex(1024);
    client
        .write_all(b"GET /home HTTP/1.1\r\nHost: x\r\n")
        .await
        .unwrap();
    drop(client);

    let err = read_request(&mut server).await.expect_err("truncated request");
    assert_eq!(err, StatusCode::BadRequest);
}

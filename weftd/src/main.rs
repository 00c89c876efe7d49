use weftd::{proto, router};

use anyhow::Result;
use dotenv::dotenv;
use std::net::SocketAddr;
use tokio::{io::AsyncWriteExt, net::TcpListener};
use weft_api::request::Request;
use weft_api::response::make_empty_response;
use weft_api::status::StatusCode;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    // Config via env: WEFT_ADDR (default 127.0.0.1:4891)
    let addr = std::env::var("WEFT_ADDR").unwrap_or_else(|_| "127.0.0.1:4891".to_string());

    let listener = TcpListener::bind(&addr).await?;
    eprintln!("weftd listening on http://{}", addr);

    loop {
        let (stream, peer) = listener.accept().await?;
        tokio::spawn(async move {
            if let Err(err) = handle_conn(stream, peer).await {
                eprintln!("[conn] {peer} error: {err}");
            }
        });
    }
}

async fn handle_conn(mut stream: tokio::net::TcpStream, peer: SocketAddr) -> Result<()> {
    let raw = match proto::read_request(&mut stream).await {
        Ok(raw) => raw,
        Err(code) => {
            stream.write_all(&make_empty_response(code)).await?;
            return Ok(());
        }
    };

    let mut req = Request::new();
    req.routes = router::default_routes();
    req.prepare(&raw);
    eprintln!(
        "[request] {peer}: {} path {} version {}",
        req.method.as_deref().unwrap_or("-"),
        req.path.as_deref().unwrap_or("-"),
        req.version.as_deref().unwrap_or("-"),
    );

    // A half-populated request means the first line never parsed.
    if req.method.is_none() || req.path.is_none() {
        stream
            .write_all(&make_empty_response(StatusCode::BadRequest))
            .await?;
        return Ok(());
    }

    let response = router::dispatch(&mut req);
    stream.write_all(&response.into_bytes()).await?;
    Ok(())
}

use thiserror::Error;

/// Upper bound on a whole inbound message: request line, headers and body.
pub const MAX_REQUEST_BYTES: usize = 1024 * 1024; // 1 MB

#[derive(Debug, Error)]
pub enum LimitError {
    #[error("request too large: {actual} bytes (max {max})")]
    RequestTooLarge { max: usize, actual: usize },
}

pub type LimitResult<T> = Result<T, LimitError>;

pub fn enforce_max_request_size(len: usize) -> LimitResult<()> {
    if len > MAX_REQUEST_BYTES {
        return Err(LimitError::RequestTooLarge {
            max: MAX_REQUEST_BYTES,
            actual: len,
        });
    }
    Ok(())
}

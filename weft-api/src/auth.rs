use base64::prelude::*;
use percent_encoding::percent_decode_str;
use url::Url;

/// Credential shapes accepted when preparing an `Authorization` header.
/// Anything else is unrepresentable by construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Auth {
    Basic { username: String, password: String },
    Bearer(String),
}

impl Auth {
    /// Formats the `Authorization` header value for this credential.
    pub fn header_value(&self) -> String {
        match self {
            Auth::Basic { username, password } => {
                let credentials = format!("{username}:{password}");
                format!("Basic {}", BASE64_STANDARD.encode(credentials))
            }
            Auth::Bearer(token) => format!("Bearer {token}"),
        }
    }
}

/// Extracts a `(username, password)` pair from a URL's userinfo component,
/// percent-decoded. A URL that is unparsable or carries no password yields
/// a pair of empty strings.
pub fn auth_from_url(url: &str) -> (String, String) {
    let Ok(parsed) = Url::parse(url) else {
        return (String::new(), String::new());
    };
    match parsed.password() {
        Some(password) => (unquote(parsed.username()), unquote(password)),
        None => (String::new(), String::new()),
    }
}

fn unquote(component: &str) -> String {
    percent_decode_str(component).decode_utf8_lossy().to_string()
}

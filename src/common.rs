// Default environment
pub static DEFAULT_URL_PREFIX: &str = "api.na";
pub static DEFAULT_URL_BASE: &str = "bambora.com";
pub static DEFAULT_URL_VERSION: &str = "v1";

// Default timeouts, in seconds
pub static DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 40;
pub static DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 80;

// Header names
pub static SUB_MERCHANT_ID_HEADER: &str = "Sub-Merchant-Id";

// Authorization scheme used in front of the encoded credentials
pub static PASSCODE_SCHEME: &str = "Passcode";

// Sent as `User-Agent` on every request
pub static CLIENT_USER_AGENT: &str =
    concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

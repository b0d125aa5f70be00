//! Merchant credentials and their encoding into a `Passcode` token.

use base64::{prelude::BASE64_STANDARD, Engine};
use secrecy::{ExposeSecret, Secret};
use std::fmt;

/// A merchant id together with the API key of one API family.
#[derive(Clone, Debug)]
pub struct Credentials {
    merchant_id: String,
    api_key: Secret<String>,
}

impl Credentials {
    pub fn new(merchant_id: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            merchant_id: merchant_id.into(),
            api_key: Secret::new(api_key.into()),
        }
    }

    /// Credentials with an empty merchant id and key, accepted by the card tokenization endpoint.
    pub fn anonymous() -> Self {
        Self::new("", "")
    }

    pub fn merchant_id(&self) -> &str {
        &self.merchant_id
    }

    /// Encodes these credentials into the token sent after `Passcode` in the `Authorization` header.
    pub fn passcode(&self) -> Secret<String> {
        Secret::new(encode(&self.merchant_id, self.api_key.expose_secret()))
    }
}

/// Base64-encodes `"<merchant_id>:<api_key>"`, without any line break.
pub fn encode(merchant_id: &str, api_key: &str) -> String {
    let mut token = BASE64_STANDARD.encode(format!("{}:{}", merchant_id, api_key));
    token.retain(|c| c != '\n' && c != '\r');
    token
}

/// The Beanstream API families, each authenticated with its own API key.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum ApiFamily {
    Payments,
    Profiles,
    Reporting,
}

impl fmt::Display for ApiFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ApiFamily::Payments => "payments",
            ApiFamily::Profiles => "profiles",
            ApiFamily::Reporting => "reporting",
        };
        write!(f, "{}", s)
    }
}

//! Request executor every Beanstream API call goes through.

use crate::{
    client::Environment,
    common::{PASSCODE_SCHEME, SUB_MERCHANT_ID_HEADER},
    credentials::Credentials,
    error::ConnectionError,
    Error,
};
use reqwest::{
    header::{HeaderValue, AUTHORIZATION, CONTENT_TYPE},
    Method,
};
use reqwest_middleware::ClientWithMiddleware;
use secrecy::ExposeSecret;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::fmt::{Debug, Formatter};

/// A single call to a Beanstream API.
#[derive(Debug, Clone)]
pub struct ApiRequest<'a> {
    /// One of `GET`, `POST`, `PUT` or `DELETE`.
    pub method: Method,
    /// Path appended to the API host, e.g. `/v1/payments/`.
    pub path: String,
    /// Merchant credentials used to build the `Passcode` authorization.
    pub credentials: &'a Credentials,
    /// Sent as `Sub-Merchant-Id` when present and not empty.
    pub sub_merchant_id: Option<&'a str>,
    /// JSON body. When absent, `POST` and `PUT` send `{}` and other methods send nothing.
    pub body: Option<Value>,
}

impl<'a> ApiRequest<'a> {
    pub fn new(method: Method, path: impl Into<String>, credentials: &'a Credentials) -> Self {
        Self {
            method,
            path: path.into(),
            credentials,
            sub_merchant_id: None,
            body: None,
        }
    }

    pub fn with_sub_merchant_id(mut self, sub_merchant_id: Option<&'a str>) -> Self {
        self.sub_merchant_id = sub_merchant_id;
        self
    }

    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }
}

/// Sends authenticated JSON requests to the Beanstream APIs.
///
/// Non-success statuses become [`Error::ApiError`](crate::Error), and failures to get any
/// response become [`Error::ConnectionError`](crate::Error). Requests are never retried.
#[derive(Clone)]
pub struct Transport {
    client: ClientWithMiddleware,
    environment: Environment,
}

impl Debug for Transport {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Transport")
            .field("environment", &self.environment)
            .finish_non_exhaustive()
    }
}

impl Transport {
    pub(crate) fn new(client: ClientWithMiddleware, environment: Environment) -> Self {
        Self {
            client,
            environment,
        }
    }

    pub fn environment(&self) -> &Environment {
        &self.environment
    }

    /// Sends the request and returns the parsed JSON response.
    ///
    /// An empty success body is returned as `Value::Null`.
    #[tracing::instrument(
        name = "Beanstream API request",
        skip(self, request),
        fields(method = %request.method, path = %request.path)
    )]
    pub async fn execute(&self, request: ApiRequest<'_>) -> Result<Value, Error> {
        let url = self.environment.url_for(&request.path)?;

        let mut authorization = HeaderValue::from_str(&format!(
            "{} {}",
            PASSCODE_SCHEME,
            request.credentials.passcode().expose_secret()
        ))
        .map_err(|e| Error::Other(e.into()))?;
        authorization.set_sensitive(true);

        let mut builder = self
            .client
            .request(request.method.clone(), url)
            .header(AUTHORIZATION, authorization)
            .header(CONTENT_TYPE, "application/json");

        if let Some(sub_merchant_id) = request.sub_merchant_id.filter(|id| !id.is_empty()) {
            let value = HeaderValue::from_str(sub_merchant_id).map_err(|_| {
                Error::Configuration(format!("invalid sub-merchant id {:?}", sub_merchant_id))
            })?;
            builder = builder.header(SUB_MERCHANT_ID_HEADER, value);
        }

        match request.body {
            Some(body) => builder = builder.body(serde_json::to_vec(&body)?),
            None if sends_empty_object(&request.method) => builder = builder.body("{}"),
            None => {}
        }

        let response = builder.send().await?;
        let bytes = response.bytes().await.map_err(ConnectionError::from)?;

        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Value::Null);
        }

        Ok(serde_json::from_slice(&bytes)?)
    }

    /// Sends the request and deserializes the JSON response into `T`.
    pub async fn execute_as<T: DeserializeOwned>(&self, request: ApiRequest<'_>) -> Result<T, Error> {
        let value = self.execute(request).await?;
        Ok(serde_json::from_value(value)?)
    }
}

fn sends_empty_object(method: &Method) -> bool {
    matches!(*method, Method::POST | Method::PUT)
}

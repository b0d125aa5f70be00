//! Clients for the various Beanstream APIs.

use crate::{
    credentials::{ApiFamily, Credentials},
    transport::{ApiRequest, Transport},
    Error,
};
use reqwest::Method;
use serde::{de::DeserializeOwned, Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::{
    collections::HashMap,
    fmt::{Debug, Formatter},
};

pub mod payments;
pub mod profiles;
pub mod reporting;

pub(crate) struct BeanstreamClientInner {
    pub(crate) transport: Transport,
    pub(crate) credentials: HashMap<ApiFamily, Credentials>,
    pub(crate) sub_merchant_id: Option<String>,
}

impl BeanstreamClientInner {
    pub(crate) fn credentials(&self, family: ApiFamily) -> Result<&Credentials, Error> {
        self.credentials
            .get(&family)
            .ok_or(Error::MissingCredentials(family))
    }

    pub(crate) fn api_base_url(&self) -> String {
        self.transport.environment().api_base_url()
    }

    /// Sends a request authenticated with the credentials of `family` and deserializes the response.
    pub(crate) async fn send<T, B>(
        &self,
        family: ApiFamily,
        method: Method,
        path: String,
        body: Option<&B>,
    ) -> Result<T, Error>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let credentials = self.credentials(family)?;
        let mut request = ApiRequest::new(method, path, credentials)
            .with_sub_merchant_id(self.sub_merchant_id.as_deref());
        if let Some(body) = body {
            request = request.with_body(serde_json::to_value(body)?);
        }

        self.transport.execute_as(request).await
    }

    pub(crate) async fn send_without_body<T: DeserializeOwned>(
        &self,
        family: ApiFamily,
        method: Method,
        path: String,
    ) -> Result<T, Error> {
        self.send::<T, Value>(family, method, path, None).await
    }
}

impl Debug for BeanstreamClientInner {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BeanstreamClientInner")
            .field("transport", &self.transport)
            .field("sub_merchant_id", &self.sub_merchant_id)
            .finish_non_exhaustive()
    }
}

/// Postal address attached to payments and profiles.
#[derive(Serialize, Deserialize, Debug, Clone, Default, Eq, PartialEq, derive_builder::Builder)]
#[builder(default, setter(into, strip_option))]
pub struct Address {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address_line1: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address_line2: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub province: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email_address: Option<String>,
}

/// Free-form merchant references, searchable through the reporting APIs.
#[derive(Serialize, Deserialize, Debug, Clone, Default, Eq, PartialEq, derive_builder::Builder)]
#[builder(default, setter(into, strip_option))]
pub struct Custom {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ref1: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ref2: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ref3: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ref4: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ref5: Option<String>,
}

/// Ids are sent as strings by some endpoints and as numbers by others.
pub(crate) fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "expected a string or a number, got {}",
            other
        ))),
    }
}

pub(crate) fn optional_string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(None),
        Value::String(s) => Ok(Some(s)),
        Value::Number(n) => Ok(Some(n.to_string())),
        other => Err(serde::de::Error::custom(format!(
            "expected a string or a number, got {}",
            other
        ))),
    }
}

//! Module containing the main Beanstream API client.

use crate::{
    apis::{
        payments::PaymentsApi, profiles::ProfilesApi, reporting::ReportingApi,
        BeanstreamClientInner,
    },
    common::{
        DEFAULT_CONNECT_TIMEOUT_SECS, DEFAULT_REQUEST_TIMEOUT_SECS, DEFAULT_URL_BASE,
        DEFAULT_URL_PREFIX, DEFAULT_URL_VERSION,
    },
    credentials::{ApiFamily, Credentials},
    middlewares::{
        error_handling::ErrorHandlingMiddleware, inject_user_agent::InjectUserAgentMiddleware,
    },
    transport::Transport,
    Error,
};
use reqwest::{redirect, Certificate, Url};
use reqwest_middleware::ClientWithMiddleware;
use reqwest_tracing::TracingMiddleware;
use std::{collections::HashMap, path::PathBuf, sync::Arc, time::Duration};

/// Beanstream environment the client connects to.
///
/// The API host is `https://<prefix>.<base>` and every versioned resource lives under `/<version>`.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Environment {
    host_url: Url,
    version: String,
}

impl Environment {
    /// Builds an environment from its host prefix (e.g. `api.na`), base domain (e.g. `bambora.com`)
    /// and API version segment (e.g. `v1`).
    pub fn new(url_prefix: &str, url_base: &str, url_version: &str) -> Result<Self, Error> {
        Ok(Self {
            host_url: Url::parse(&format!("https://{}.{}", url_prefix, url_base))?,
            version: url_version.to_string(),
        })
    }

    /// Points every request to the given host, keeping the default API version.
    ///
    /// Useful for testing and mocking purposes.
    pub fn from_single_url(url: &Url) -> Self {
        Self {
            host_url: url.clone(),
            version: DEFAULT_URL_VERSION.to_string(),
        }
    }

    /// Replaces the API version segment.
    pub fn with_version(mut self, url_version: &str) -> Self {
        self.version = url_version.to_string();
        self
    }

    /// Scheme and host all requests are sent to.
    pub fn api_host_url(&self) -> &Url {
        &self.host_url
    }

    /// Path prefix of the versioned APIs, e.g. `/v1`.
    pub fn api_base_url(&self) -> String {
        format!("/{}", self.version)
    }

    /// Full URL of a request: the API host followed by `path` as-is.
    pub(crate) fn url_for(&self, path: &str) -> Result<Url, Error> {
        let host = self.host_url.as_str().trim_end_matches('/');
        Ok(Url::parse(&format!("{}{}", host, path))?)
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::new(DEFAULT_URL_PREFIX, DEFAULT_URL_BASE, DEFAULT_URL_VERSION).unwrap()
    }
}

/// Client for Beanstream public APIs.
///
/// All the configuration is fixed when the client is built: use separate instances
/// for different credentials or sub-merchants. Clones share the same connection pool.
#[derive(Debug, Clone)]
pub struct BeanstreamClient {
    /// Payments APIs client.
    pub payments: PaymentsApi,
    /// Payment profiles APIs client.
    pub profiles: ProfilesApi,
    /// Reporting APIs client.
    pub reporting: ReportingApi,
    inner: Arc<BeanstreamClientInner>,
}

impl BeanstreamClient {
    /// Returns a new builder to configure a new [`BeanstreamClient`](crate::client::BeanstreamClient)
    /// for the given merchant.
    pub fn builder(merchant_id: impl Into<String>) -> BeanstreamClientBuilder {
        BeanstreamClientBuilder::new(merchant_id)
    }

    /// The request executor shared by all the API clients, for endpoints not covered by them.
    pub fn transport(&self) -> &Transport {
        &self.inner.transport
    }

    /// The environment this client sends requests to.
    pub fn environment(&self) -> &Environment {
        self.inner.transport.environment()
    }
}

/// Trust roots used to verify the server certificate.
#[derive(Debug, Clone)]
enum CaBundle {
    Path(PathBuf),
    Pem(Vec<u8>),
}

impl CaBundle {
    fn certificates(&self) -> Result<Vec<Certificate>, Error> {
        let pem = match self {
            CaBundle::Path(path) => std::fs::read(path).map_err(|e| {
                Error::Configuration(format!(
                    "cannot read CA bundle {}: {}",
                    path.display(),
                    e
                ))
            })?,
            CaBundle::Pem(pem) => pem.clone(),
        };

        let certificates = Certificate::from_pem_bundle(&pem)
            .map_err(|e| Error::Configuration(format!("invalid CA bundle: {}", e)))?;
        if certificates.is_empty() {
            return Err(Error::Configuration(
                "CA bundle does not contain any certificate".to_string(),
            ));
        }

        Ok(certificates)
    }
}

/// Builder for a [`BeanstreamClient`](crate::client::BeanstreamClient).
#[derive(Debug)]
pub struct BeanstreamClientBuilder {
    client: Option<reqwest::Client>,
    environment: Environment,
    merchant_id: String,
    api_keys: HashMap<ApiFamily, String>,
    sub_merchant_id: Option<String>,
    ca_bundle: Option<CaBundle>,
    connect_timeout: Duration,
    request_timeout: Duration,
}

impl BeanstreamClientBuilder {
    /// Creates a new builder to configure a [`BeanstreamClient`](crate::client::BeanstreamClient).
    pub fn new(merchant_id: impl Into<String>) -> Self {
        Self {
            client: None,
            environment: Environment::default(),
            merchant_id: merchant_id.into(),
            api_keys: HashMap::new(),
            sub_merchant_id: None,
            ca_bundle: None,
            connect_timeout: Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        }
    }

    /// Consumes the builder and builds a new [`BeanstreamClient`](crate::client::BeanstreamClient).
    ///
    /// Fails if the configured CA bundle cannot be loaded.
    pub fn build(self) -> Result<BeanstreamClient, Error> {
        let client = match self.client {
            Some(client) => client,
            None => {
                let mut builder = reqwest::Client::builder()
                    .connect_timeout(self.connect_timeout)
                    .timeout(self.request_timeout)
                    // Redirects must reach the error mapper rather than be followed
                    .redirect(redirect::Policy::none());

                if let Some(ca_bundle) = &self.ca_bundle {
                    for certificate in ca_bundle.certificates()? {
                        builder = builder.add_root_certificate(certificate);
                    }
                    builder = builder.tls_built_in_root_certs(false);
                }

                builder
                    .build()
                    .map_err(|e| Error::Configuration(e.to_string()))?
            }
        };

        let credentials = self
            .api_keys
            .into_iter()
            .map(|(family, key)| (family, Credentials::new(self.merchant_id.clone(), key)))
            .collect();

        let inner = Arc::new(BeanstreamClientInner {
            transport: Transport::new(build_client_with_middleware(client), self.environment),
            credentials,
            sub_merchant_id: self.sub_merchant_id.filter(|id| !id.is_empty()),
        });

        Ok(BeanstreamClient {
            payments: PaymentsApi::new(inner.clone()),
            profiles: ProfilesApi::new(inner.clone()),
            reporting: ReportingApi::new(inner.clone()),
            inner,
        })
    }

    /// Sets a specific reqwest [`Client`](reqwest::Client) to use.
    ///
    /// The client is used as-is: timeouts, CA bundle and redirect policy configured
    /// on this builder are ignored.
    pub fn with_http_client(mut self, client: reqwest::Client) -> Self {
        self.client = Some(client);
        self
    }

    /// Sets the environment to connect to.
    ///
    /// Defaults to `https://api.na.bambora.com`, API version `v1`.
    pub fn with_environment(mut self, environment: Environment) -> Self {
        self.environment = environment;
        self
    }

    /// Sets the API key used for the payments APIs.
    pub fn with_payments_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_keys.insert(ApiFamily::Payments, api_key.into());
        self
    }

    /// Sets the API key used for the payment profiles APIs.
    pub fn with_profiles_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_keys.insert(ApiFamily::Profiles, api_key.into());
        self
    }

    /// Sets the API key used for the reporting APIs.
    pub fn with_reporting_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_keys.insert(ApiFamily::Reporting, api_key.into());
        self
    }

    /// Processes all requests on behalf of the given sub-merchant.
    ///
    /// An empty id is the same as no sub-merchant.
    pub fn with_sub_merchant_id(mut self, sub_merchant_id: impl Into<String>) -> Self {
        self.sub_merchant_id = Some(sub_merchant_id.into());
        self
    }

    /// Verifies the server certificate against the PEM bundle at `path` instead of the system roots.
    pub fn with_ca_bundle_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.ca_bundle = Some(CaBundle::Path(path.into()));
        self
    }

    /// Verifies the server certificate against the given PEM bundle instead of the system roots.
    pub fn with_ca_bundle_pem(mut self, pem: Vec<u8>) -> Self {
        self.ca_bundle = Some(CaBundle::Pem(pem));
        self
    }

    /// Sets the timeout for establishing a connection.
    ///
    /// Defaults to 40 seconds.
    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Sets the timeout for a whole request, from connecting until the response body is read.
    ///
    /// Defaults to 80 seconds.
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }
}

fn build_client_with_middleware(client: reqwest::Client) -> ClientWithMiddleware {
    reqwest_middleware::ClientBuilder::new(client)
        .with(TracingMiddleware::default())
        .with(InjectUserAgentMiddleware)
        .with(ErrorHandlingMiddleware)
        .build()
}

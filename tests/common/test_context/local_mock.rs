use crate::common::mock_server::BeanstreamMockServer;
use beanstream_rust::{client::BeanstreamClientBuilder, BeanstreamClient, Environment};
use uuid::Uuid;

pub struct TestContext {
    pub client: BeanstreamClient,
    pub merchant_id: String,
    payments_api_key: String,
    profiles_api_key: String,
    reporting_api_key: String,
    mock_server: BeanstreamMockServer,
}

impl TestContext {
    pub async fn start() -> Self {
        // Generate a new set of random credentials for this specific test
        let merchant_id = format!("3{:08}", Uuid::new_v4().as_fields().0 % 100_000_000);
        let payments_api_key = Uuid::new_v4().simple().to_string();
        let profiles_api_key = Uuid::new_v4().simple().to_string();
        let reporting_api_key = Uuid::new_v4().simple().to_string();

        // Setup a new mock server
        let mock_server = BeanstreamMockServer::start(
            &merchant_id,
            &payments_api_key,
            &profiles_api_key,
            &reporting_api_key,
        )
        .await;

        // Configure a new BeanstreamClient to point to the mock server
        let client = BeanstreamClient::builder(merchant_id.clone())
            .with_environment(Environment::from_single_url(&mock_server.url()))
            .with_payments_api_key(payments_api_key.clone())
            .with_profiles_api_key(profiles_api_key.clone())
            .with_reporting_api_key(reporting_api_key.clone())
            .build()
            .unwrap();

        Self {
            client,
            merchant_id,
            payments_api_key,
            profiles_api_key,
            reporting_api_key,
            mock_server,
        }
    }

    pub fn environment(&self) -> Environment {
        Environment::from_single_url(&self.mock_server.url())
    }

    /// A builder pointing to the same environment and merchant, without any API key.
    pub fn client_builder(&self) -> BeanstreamClientBuilder {
        BeanstreamClient::builder(self.merchant_id.clone()).with_environment(self.environment())
    }

    pub fn payments_api_key(&self) -> &str {
        &self.payments_api_key
    }

    pub fn profiles_api_key(&self) -> &str {
        &self.profiles_api_key
    }

    pub fn reporting_api_key(&self) -> &str {
        &self.reporting_api_key
    }
}

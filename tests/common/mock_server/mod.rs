
use crate::common::DECLINED_CARD_NUMBER;
use beanstream_rust::credentials::encode;
use reqwest::Url;
use serde_json::{json, Value};
use std::{
    collections::HashMap,
    str::FromStr,
    sync::{Arc, RwLock},
};
use wiremock::{
    http::HeaderName,
    matchers::{method, path, path_regex},
    Mock, MockServer, Request, ResponseTemplate,
};

#[derive(Clone, Debug)]
struct StoredTransaction {
    id: String,
    transaction_type: &'static str,
    order_number: String,
    amount: f64,
    payment_method: &'static str,
    custom: Value,
    adjustments: Vec<StoredAdjustment>,
}

#[derive(Clone, Debug)]
struct StoredAdjustment {
    id: String,
    transaction_type: &'static str,
    amount: f64,
}

#[derive(Clone, Debug, Default)]
struct StoredProfile {
    details: serde_json::Map<String, Value>,
    cards: Vec<Value>,
}

#[derive(Default)]
struct MockServerStorageInner {
    last_transaction_id: u64,
    transactions: HashMap<String, StoredTransaction>,
    profiles: HashMap<String, StoredProfile>,
}

/// In-memory storage for transactions and profiles created on the mock server.
type MockServerStorage = Arc<RwLock<MockServerStorageInner>>;

type Handler = fn(&MockServerStorage, &Request) -> ResponseTemplate;

/// Simple mock server for Beanstream APIs used in local integration tests.
///
/// Requests are authenticated with the passcodes of the merchant it was started for.
pub struct BeanstreamMockServer {
    server: MockServer,
}

impl BeanstreamMockServer {
    pub async fn start(
        merchant_id: &str,
        payments_api_key: &str,
        profiles_api_key: &str,
        reporting_api_key: &str,
    ) -> Self {
        let server = MockServer::start().await;
        let storage = MockServerStorage::default();

        let payments = passcode(merchant_id, payments_api_key);
        let profiles = passcode(merchant_id, profiles_api_key);
        let reporting = passcode(merchant_id, reporting_api_key);

        let handlers: [(&str, &str, &str, Handler); 14] = [
            ("POST", r"^/v1/payments/$", &payments, routes::create_payment),
            ("GET", r"^/v1/payments/[^/]+$", &payments, routes::get_transaction),
            ("POST", r"^/v1/payments/[^/]+/completions$", &payments, routes::complete_payment),
            ("POST", r"^/v1/payments/[^/]+/returns$", &payments, routes::return_payment),
            ("POST", r"^/v1/payments/[^/]+/void$", &payments, routes::void_payment),
            ("POST", r"^/v1/profiles$", &profiles, routes::create_profile),
            ("GET", r"^/v1/profiles/[^/]+$", &profiles, routes::get_profile),
            ("PUT", r"^/v1/profiles/[^/]+$", &profiles, routes::update_profile),
            ("DELETE", r"^/v1/profiles/[^/]+$", &profiles, routes::delete_profile),
            ("POST", r"^/v1/profiles/[^/]+/cards/$", &profiles, routes::add_profile_card),
            ("GET", r"^/v1/profiles/[^/]+/cards/$", &profiles, routes::get_profile_cards),
            ("PUT", r"^/v1/profiles/[^/]+/cards/[0-9]+$", &profiles, routes::update_profile_card),
            ("DELETE", r"^/v1/profiles/[^/]+/cards/[0-9]+$", &profiles, routes::delete_profile_card),
            ("POST", r"^/v1/reports$", &reporting, routes::search),
        ];
        for (http_method, path_pattern, expected_passcode, handler) in handlers {
            mount(&server, http_method, path_pattern, expected_passcode, &storage, handler).await;
        }

        // Tokenization does not take merchant credentials
        Mock::given(method("POST"))
            .and(path("/scripts/tokenization/tokens"))
            .respond_with(routes::tokenize)
            .mount(&server)
            .await;

        Self { server }
    }

    pub fn url(&self) -> Url {
        Url::parse(&self.server.uri()).unwrap()
    }
}

fn passcode(merchant_id: &str, api_key: &str) -> String {
    format!("Passcode {}", encode(merchant_id, api_key))
}

async fn mount(
    server: &MockServer,
    http_method: &str,
    path_pattern: &str,
    expected_passcode: &str,
    storage: &MockServerStorage,
    handler: Handler,
) {
    let expected_passcode = expected_passcode.to_string();
    let storage = storage.clone();

    Mock::given(method(http_method))
        .and(path_regex(path_pattern))
        .respond_with(move |req: &Request| {
            let authorization = req
                .headers
                .get(&HeaderName::from_str("Authorization").unwrap())
                .map(|v| v.last().to_string());

            if authorization.as_deref() != Some(expected_passcode.as_str()) {
                return error_response(401, 21, 3, "Authentication failed");
            }

            handler(&storage, req)
        })
        .mount(server)
        .await;
}

/// Beanstream error envelope.
fn error_response(status: u16, code: i64, category: i64, message: &str) -> ResponseTemplate {
    ResponseTemplate::new(status).set_body_json(json!({
        "code": code,
        "category": category,
        "message": message,
        "reference": ""
    }))
}

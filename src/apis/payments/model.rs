use crate::apis::{optional_string_or_number, string_or_number, Address, Custom};
use derive_builder::Builder;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Builds a random order number: the prefix, an underscore and 16 random hex digits.
pub fn generate_random_order_id(prefix: &str) -> String {
    let random = Uuid::new_v4().simple().to_string();
    format!("{}_{}", prefix, &random[..16])
}

/// Whether a raw payment response describes an approved payment.
pub fn payment_approved(payment_response: &Value) -> bool {
    payment_response["approved"] == "1" && payment_response["message"] == "Approved"
}

/// How a payment is paid for.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Eq, PartialEq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    Card,
    Cash,
    Cheque,
    Token,
    PaymentProfile,
}

impl Display for PaymentMethod {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            PaymentMethod::Card => "card",
            PaymentMethod::Cash => "cash",
            PaymentMethod::Cheque => "cheque",
            PaymentMethod::Token => "token",
            PaymentMethod::PaymentProfile => "payment_profile",
        };
        write!(f, "{}", s)
    }
}

/// Request to make a new payment.
///
/// For a pre-authorization, set `complete` to `false` on the card, token or payment profile,
/// then finalize it with [`PaymentsApi::complete_preauth`](crate::apis::payments::PaymentsApi::complete_preauth).
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Builder)]
#[builder(setter(into))]
pub struct PaymentRequest {
    pub order_number: String,
    pub amount: f64,
    #[serde(flatten)]
    pub payment_method: PaymentMethodRequest,
    #[builder(default, setter(into, strip_option))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[builder(default, setter(into, strip_option))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_ip: Option<String>,
    /// Return URL for 3-D Secure flows.
    #[builder(default, setter(into, strip_option))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub term_url: Option<String>,
    #[builder(default, setter(into, strip_option))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comments: Option<String>,
    #[builder(default, setter(into, strip_option))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub billing: Option<Address>,
    #[builder(default, setter(into, strip_option))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shipping: Option<Address>,
    #[builder(default, setter(into, strip_option))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom: Option<Custom>,
}

/// Payment method of a [`PaymentRequest`], together with its details.
#[derive(Serialize, Deserialize, Debug, Clone, Eq, PartialEq)]
#[serde(tag = "payment_method", rename_all = "snake_case")]
pub enum PaymentMethodRequest {
    Card { card: Card },
    Cash,
    Cheque,
    Token { token: TokenPayment },
    PaymentProfile { payment_profile: ProfilePayment },
}

impl PaymentMethodRequest {
    pub fn payment_method(&self) -> PaymentMethod {
        match self {
            PaymentMethodRequest::Card { .. } => PaymentMethod::Card,
            PaymentMethodRequest::Cash => PaymentMethod::Cash,
            PaymentMethodRequest::Cheque => PaymentMethod::Cheque,
            PaymentMethodRequest::Token { .. } => PaymentMethod::Token,
            PaymentMethodRequest::PaymentProfile { .. } => PaymentMethod::PaymentProfile,
        }
    }
}

/// Credit card details.
#[derive(Serialize, Deserialize, Debug, Clone, Eq, PartialEq, Builder)]
#[builder(setter(into))]
pub struct Card {
    pub name: String,
    pub number: String,
    pub expiry_month: String,
    pub expiry_year: String,
    #[builder(default, setter(into, strip_option))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cvd: Option<String>,
    /// `false` for a pre-authorization.
    #[builder(default = "true")]
    pub complete: bool,
}

/// Payment with a single-use Legato token.
#[derive(Serialize, Deserialize, Debug, Clone, Eq, PartialEq, Builder)]
#[builder(setter(into))]
pub struct TokenPayment {
    pub name: String,
    pub code: String,
    /// `false` for a pre-authorization.
    #[builder(default = "true")]
    pub complete: bool,
}

/// Payment with a card stored in a payment profile.
#[derive(Serialize, Deserialize, Debug, Clone, Eq, PartialEq, Builder)]
#[builder(setter(into))]
pub struct ProfilePayment {
    pub customer_code: String,
    #[builder(default = "1")]
    pub card_id: u32,
    /// `false` for a pre-authorization.
    #[builder(default = "true")]
    pub complete: bool,
}

/// Body of completions, returns and voids.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub(crate) struct AmountRequest {
    pub amount: f64,
}

/// Result of a payment, completion, return or void.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct PaymentResponse {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(deserialize_with = "string_or_number")]
    pub approved: String,
    pub message: String,
    #[serde(default, deserialize_with = "optional_string_or_number")]
    pub message_id: Option<String>,
    #[serde(default)]
    pub auth_code: Option<String>,
    #[serde(default)]
    pub created: Option<String>,
    #[serde(default)]
    pub order_number: Option<String>,
    /// Transaction type, e.g. `P` (purchase), `PA` (pre-auth), `PAC` (completion), `R` (return) or `VP` (void).
    #[serde(default, rename = "type")]
    pub transaction_type: Option<String>,
    #[serde(default)]
    pub payment_method: Option<String>,
    #[serde(default)]
    pub amount: Option<f64>,
    /// Any other field returned by the server.
    #[serde(flatten)]
    pub other: Map<String, Value>,
}

impl PaymentResponse {
    /// A payment is approved when `approved` is `"1"` and the message is `"Approved"`.
    pub fn is_approved(&self) -> bool {
        self.approved == "1" && self.message == "Approved"
    }
}

/// A past transaction, with the adjustments (returns, voids, completions) made to it.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Transaction {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(default, deserialize_with = "optional_string_or_number")]
    pub approved: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default, rename = "type")]
    pub transaction_type: Option<String>,
    #[serde(default)]
    pub order_number: Option<String>,
    #[serde(default)]
    pub amount: Option<f64>,
    #[serde(default)]
    pub total_refunds: Option<f64>,
    #[serde(default)]
    pub total_completions: Option<f64>,
    #[serde(default)]
    pub adjusted_by: Vec<Adjustment>,
    /// Any other field returned by the server.
    #[serde(flatten)]
    pub other: Map<String, Value>,
}

/// A transaction adjusting an earlier one.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Adjustment {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(default, rename = "type")]
    pub transaction_type: Option<String>,
    #[serde(default)]
    pub amount: Option<f64>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub created: Option<String>,
    #[serde(flatten)]
    pub other: Map<String, Value>,
}

/// Card details exchanged for a single-use Legato token.
#[derive(Serialize, Deserialize, Debug, Clone, Eq, PartialEq, Builder)]
#[builder(setter(into))]
pub struct TokenizationRequest {
    pub number: String,
    pub expiry_month: String,
    pub expiry_year: String,
    pub cvd: String,
}

#[derive(Deserialize, Debug, Clone)]
pub(crate) struct TokenizationResponse {
    pub token: String,
}

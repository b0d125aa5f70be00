use crate::apis::{optional_string_or_number, Address, Custom};
use derive_builder::Builder;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

static OPERATION_SUCCESSFUL: &str = "Operation Successful";

/// Request to create a new payment profile, from a card or from a Legato token.
#[derive(Serialize, Deserialize, Debug, Clone, Default, Eq, PartialEq, Builder)]
#[builder(default, setter(into, strip_option))]
pub struct CreateProfileRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub card: Option<ProfileCard>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<ProfileToken>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comments: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub billing: Option<Address>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shipping: Option<Address>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom: Option<Custom>,
}

/// Request to update an existing payment profile.
///
/// Cards are managed separately through the profile cards endpoints, so there is no card here.
#[derive(Serialize, Deserialize, Debug, Clone, Default, Eq, PartialEq, Builder)]
#[builder(default, setter(into, strip_option))]
pub struct UpdateProfileRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comments: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub billing: Option<Address>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shipping: Option<Address>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom: Option<Custom>,
}

impl From<CreateProfileRequest> for UpdateProfileRequest {
    /// Keeps everything but the payment details.
    fn from(p: CreateProfileRequest) -> Self {
        Self {
            language: p.language,
            comments: p.comments,
            billing: p.billing,
            shipping: p.shipping,
            custom: p.custom,
        }
    }
}

/// Card stored in a payment profile.
#[derive(Serialize, Deserialize, Debug, Clone, Eq, PartialEq, Builder)]
#[builder(setter(into))]
pub struct ProfileCard {
    pub name: String,
    pub number: String,
    pub expiry_month: String,
    pub expiry_year: String,
    #[builder(default, setter(into, strip_option))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cvd: Option<String>,
}

/// Legato token used to create a payment profile.
#[derive(Serialize, Deserialize, Debug, Clone, Eq, PartialEq, Builder)]
#[builder(setter(into))]
pub struct ProfileToken {
    pub name: String,
    pub code: String,
}

/// Outcome of a profile operation.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ProfileResponse {
    pub code: i64,
    pub message: String,
    /// Id of the profile, returned on creation.
    #[serde(default)]
    pub customer_code: Option<String>,
    #[serde(flatten)]
    pub other: Map<String, Value>,
}

impl ProfileResponse {
    /// An operation succeeded when `code` is `1` and the message is `"Operation Successful"`.
    pub fn is_successful(&self) -> bool {
        self.code == 1 && self.message == OPERATION_SUCCESSFUL
    }
}

/// A payment profile as returned by the server.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Profile {
    #[serde(default)]
    pub customer_code: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub comments: Option<String>,
    #[serde(default)]
    pub billing: Option<Address>,
    #[serde(default)]
    pub custom: Option<Value>,
    #[serde(default)]
    pub card: Option<Value>,
    #[serde(flatten)]
    pub other: Map<String, Value>,
}

/// The cards stored in a payment profile.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ProfileCardsResponse {
    pub code: i64,
    pub message: String,
    #[serde(default, rename = "card")]
    pub cards: Vec<StoredCard>,
}

/// A card stored in a payment profile. The number is masked.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct StoredCard {
    #[serde(default, deserialize_with = "optional_string_or_number")]
    pub card_id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub number: Option<String>,
    #[serde(default)]
    pub expiry_month: Option<String>,
    #[serde(default)]
    pub expiry_year: Option<String>,
    #[serde(default)]
    pub card_type: Option<String>,
    #[serde(flatten)]
    pub other: Map<String, Value>,
}

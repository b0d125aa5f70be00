use crate::apis::optional_string_or_number;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};
use std::fmt;

pub(crate) static SEARCH_REPORT_NAME: &str = "Search";
static DATE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Transaction fields that can be searched on.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum SearchField {
    TransactionId,
    Amount,
    MaskedCardNumber,
    CardOwner,
    OrderNumber,
    IpAddress,
    AuthorizationCode,
    TransType,
    CardType,
    Response,
    BillingName,
    BillingEmail,
    BillingPhone,
    ProcessedBy,
    Ref1,
    Ref2,
    Ref3,
    Ref4,
    Ref5,
    ProductName,
    ProductId,
    CustCode,
    IdAdjustmentTo,
    IdAdjustedBy,
}

impl SearchField {
    /// Numeric id of the field on the wire.
    pub fn code(&self) -> u8 {
        match self {
            SearchField::TransactionId => 1,
            SearchField::Amount => 2,
            SearchField::MaskedCardNumber => 3,
            SearchField::CardOwner => 4,
            SearchField::OrderNumber => 5,
            SearchField::IpAddress => 6,
            SearchField::AuthorizationCode => 7,
            SearchField::TransType => 8,
            SearchField::CardType => 9,
            SearchField::Response => 10,
            SearchField::BillingName => 11,
            SearchField::BillingEmail => 12,
            SearchField::BillingPhone => 13,
            SearchField::ProcessedBy => 14,
            SearchField::Ref1 => 15,
            SearchField::Ref2 => 16,
            SearchField::Ref3 => 17,
            SearchField::Ref4 => 18,
            SearchField::Ref5 => 19,
            SearchField::ProductName => 20,
            SearchField::ProductId => 21,
            SearchField::CustCode => 22,
            SearchField::IdAdjustmentTo => 23,
            SearchField::IdAdjustedBy => 24,
        }
    }
}

impl Serialize for SearchField {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.code())
    }
}

/// Comparison applied by a search criterion.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum Operator {
    Equals,
    LessThan,
    GreaterThan,
    LessThanEqual,
    GreaterThanEqual,
    StartsWith,
}

impl Operator {
    pub fn as_str(&self) -> &'static str {
        match self {
            Operator::Equals => "=",
            Operator::LessThan => "<",
            Operator::GreaterThan => ">",
            Operator::LessThanEqual => "<=",
            Operator::GreaterThanEqual => ">=",
            Operator::StartsWith => "START WITH",
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Operators travel URL-encoded inside the JSON body.
impl Serialize for Operator {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&urlencoding::encode(self.as_str()))
    }
}

/// A single search criterion, e.g. `order_number = "abc"`.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Criteria {
    pub field: SearchField,
    pub operator: Operator,
    pub value: Value,
}

impl Criteria {
    pub fn new(field: SearchField, operator: Operator, value: impl Into<Value>) -> Self {
        Self {
            field,
            operator,
            value: value.into(),
        }
    }
}

#[derive(Serialize, Debug)]
pub(crate) struct SearchQuery<'a> {
    pub name: &'static str,
    pub start_date: String,
    pub end_date: String,
    pub start_row: u32,
    pub end_row: u32,
    pub criteria: &'a [Criteria],
}

impl<'a> SearchQuery<'a> {
    pub(crate) fn new(
        start_date: NaiveDateTime,
        end_date: NaiveDateTime,
        start_row: u32,
        end_row: u32,
        criteria: &'a [Criteria],
    ) -> Self {
        Self {
            name: SEARCH_REPORT_NAME,
            start_date: start_date.format(DATE_FORMAT).to_string(),
            end_date: end_date.format(DATE_FORMAT).to_string(),
            start_row,
            end_row,
            criteria,
        }
    }
}

#[derive(Deserialize, Debug)]
pub(crate) struct SearchResponse {
    #[serde(default)]
    pub records: Vec<TransactionRecord>,
}

/// A transaction matched by a search. Reporting uses its own `trn_`-prefixed field names.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct TransactionRecord {
    #[serde(default, deserialize_with = "optional_string_or_number")]
    pub trn_id: Option<String>,
    #[serde(default)]
    pub trn_order_number: Option<String>,
    #[serde(flatten)]
    pub other: Map<String, Value>,
}

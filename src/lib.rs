//! A Rust client for the [Beanstream](https://www.bambora.com) (Bambora North America) REST APIs.
//!
//! It covers payments, payment profiles and transaction reports. Every call goes through the
//! same request executor, which authenticates the request, parses the JSON response and maps
//! failures to a typed [`Error`](crate::Error).
//!
//! # Usage
//!
//! ## Prerequisites
//!
//! Sign up for a sandbox merchant account and generate an API passcode for each
//! API you want to use (payments, payment profiles, reporting) from the member area.
//!
//! ## Initialize a new `BeanstreamClient`
//!
//! Create a new [`BeanstreamClient`](crate::client::BeanstreamClient) with your merchant id
//! and the API keys you need.
//!
//! ```rust,no_run
//! # use beanstream_rust::{BeanstreamClient, Error};
//! # fn main() -> Result<(), Error> {
//! let client = BeanstreamClient::builder("300200578")
//!     .with_payments_api_key("4BaD82D9197b4cc4b70a221911eE9f70")
//!     .with_profiles_api_key("D97D3BE1EE964A6193D17A571D9FBC80")
//!     .build()?;
//! # Ok(())
//! # }
//! ```
//!
//! By default a `BeanstreamClient` connects to `https://api.na.bambora.com`.
//! Use [`with_environment`](crate::client::BeanstreamClientBuilder::with_environment) to connect
//! somewhere else.
//!
//! ## Make a payment
//!
//! ```rust,no_run
//! # use beanstream_rust::{BeanstreamClient, Error, apis::payments::*};
//! #
//! # #[tokio::main]
//! # async fn main() -> Result<(), Error> {
//! # let client: BeanstreamClient = unreachable!();
//! #
//! let payment = PaymentRequestBuilder::default()
//!     .order_number(generate_random_order_id("test"))
//!     .amount(100.0)
//!     .payment_method(PaymentMethodRequest::Card {
//!         card: CardBuilder::default()
//!             .name("John Doe")
//!             .number("4030000010001234")
//!             .expiry_month("07")
//!             .expiry_year("22")
//!             .cvd("123")
//!             .build()
//!             .unwrap(),
//!     })
//!     .build()
//!     .unwrap();
//!
//! match client.payments.make_payment(&payment).await {
//!     Ok(res) => println!("Approved transaction {}", res.id),
//!     Err(e) if e.is_user_error() => println!("Card declined"),
//!     Err(e) => return Err(e),
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Search transactions
//!
//! ```rust,no_run
//! # use beanstream_rust::{BeanstreamClient, Error, apis::reporting::*};
//! # use chrono::{Duration, Local};
//! #
//! # #[tokio::main]
//! # async fn main() -> Result<(), Error> {
//! # let client: BeanstreamClient = unreachable!();
//! #
//! let now = Local::now().naive_local();
//! let records = client
//!     .reporting
//!     .search_transactions(
//!         now - Duration::hours(3),
//!         now,
//!         1,
//!         10,
//!         &[Criteria::new(SearchField::Amount, Operator::LessThan, 50)],
//!     )
//!     .await?;
//!
//! println!("Found {} transactions", records.len());
//! # Ok(())
//! # }
//! ```
//!
//! ## More examples
//!
//! Look into the [`demos`](../demos) for more example usages of this library.
//!
//! To run an example, use `cargo run` like this:
//!
//! ```shell
//! cargo run --example make_payment
//! ```

#![deny(missing_debug_implementations)]
#![forbid(unsafe_code)]

pub mod apis;
pub mod client;
mod common;
pub mod credentials;
pub mod error;
mod middlewares;
pub mod transport;

pub use client::{BeanstreamClient, Environment};
pub use credentials::Credentials;
pub use error::Error;

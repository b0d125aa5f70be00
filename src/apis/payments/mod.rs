//! APIs and models related to payments, pre-authorizations, returns and voids.

mod api;
mod model;

pub use api::PaymentsApi;
pub use model::*;

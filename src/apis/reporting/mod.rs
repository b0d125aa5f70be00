//! APIs and models related to transaction search.

mod api;
mod model;

pub use api::ReportingApi;
pub use model::*;

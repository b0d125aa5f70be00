//! APIs and models related to secure payment profiles and the cards stored in them.

mod api;
mod model;

pub use api::ProfilesApi;
pub use model::*;

//! Job board backend library.
//!
//! Layout follows a hexagonal split: `domain` holds entities, validation, and
//! services over ports; `inbound::http` adapts Actix requests onto the
//! services; `outbound::persistence` implements the ports with Diesel on
//! PostgreSQL.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;

pub use doc::ApiDoc;
pub use middleware::request_id::RequestTracking;

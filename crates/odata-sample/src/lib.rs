//! # OData Sample Library
//!
//! The `People` model, its action provider and a set client, exposed for the
//! demo binary and for integration testing.

pub mod client;
pub mod model;
pub mod provider;

// ProfileLookup - core/mod.rs
//
// Core business logic layer: data model and the profile query.
// Network access goes through the `GraphQlTransport` trait only.
// Must NOT depend on: ui, platform, app.

pub mod json_text;
pub mod model;
pub mod query;

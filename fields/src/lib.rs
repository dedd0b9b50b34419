//! Server-defined field handling for the Gantry wire format.
//!
//! Issue payloads mix a fixed schema with an open-ended set of server-defined
//! fields, all in one flat JSON object. This crate holds the two pieces that
//! do not depend on the schema itself: [`CustomFields`], a typed store over
//! the dynamic part, and the permissive date/time coercion the decode
//! boundary applies to string values.

mod custom;
mod datetime;

pub use custom::CustomFields;
pub use datetime::canonical;
pub use datetime::coerce;

/// Key prefix the service uses for server-defined fields. Any top-level key
/// starting with this literal is dynamic; everything else is fixed schema.
/// Comparison is case-sensitive and by prefix only.
pub const CUSTOM_FIELD_PREFIX: &str = "customfield_";

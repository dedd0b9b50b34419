//! REST client for the Gantry ticket-tracking service.
//!
//! The interesting part of this crate is the issue wire model: an issue's
//! `fields` object mixes a fixed, statically typed schema with an open-ended
//! set of server-defined `customfield_*` entries in one flat JSON object.
//! [`IssueFields`] performs that merge on encode and the matching
//! classification (plus permissive date/time normalization) on decode; see
//! the `gantry-fields` and `gantry-document` crates for the pieces it
//! composes.
//!
//! The HTTP surface is deliberately thin: a [`Client`] holding base URL and
//! credentials, and the issue CRUD/search slice built on it.

mod client;
mod error;
mod issues;
mod models;

pub use client::Client;
pub use client::Credentials;
pub use error::Error;
pub use error::Result;
pub use issues::SearchRequest;
pub use models::Component;
pub use models::CreatedIssue;
pub use models::Issue;
pub use models::IssueFields;
pub use models::IssueType;
pub use models::Priority;
pub use models::ProjectRef;
pub use models::Resolution;
pub use models::SearchResults;
pub use models::Status;
pub use models::User;

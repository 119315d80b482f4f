//! # fiqlc - Search clause / FIQL translator
//!
//! fiqlc converts between the structured, editable clause lists used by
//! search forms and the FIQL text used to filter users, groups and
//! any-objects, in both directions.
//!
//! ## Architecture
//!
//! - [`search`] - Clause model, escaping, decoder and encoder
//! - [`fiql`] - FIQL condition trees, parser and entity-aware builders
//! - [`schema`] - Attribute value types driving typed comparisons
//! - [`config`] - CLI configuration file
//! - [`output`] - Clause listing for the terminal
//!
//! ## Quick Start
//!
//! ```
//! use fiqlc::fiql::{ParseContext, UserConditionBuilder};
//! use fiqlc::search::{decode, encode, ClauseKind, Comparator, SearchClause};
//!
//! let clauses = vec![
//!     SearchClause::new(ClauseKind::GroupMembership, "admins", Comparator::Equals),
//!     SearchClause::attribute("email", Comparator::IsNull).or(),
//! ];
//!
//! let fiql = encode(&clauses, &UserConditionBuilder).unwrap();
//! assert_eq!(fiql, "$groups==admins,email==$null");
//!
//! let decoded = decode(fiql.as_str(), &ParseContext::default());
//! assert_eq!(decoded.len(), 2);
//! ```
//!
//! Encoding and decoding are pure: no I/O, no shared state, and identical
//! input always yields identical text.

pub mod config;
pub mod error;
pub mod fiql;
pub mod output;
pub mod schema;
pub mod search;

pub use error::{FiqlError, Result};

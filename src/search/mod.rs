//! Translation between search clause lists and FIQL text.
//!
//! - [`clause`] - The editable clause model
//! - [`escape`] - Escaping of grammar metacharacters in values
//! - [`decoder`] - FIQL text to clauses
//! - [`encoder`] - Clauses to FIQL text

pub mod clause;
pub mod decoder;
pub mod encoder;
pub mod escape;

pub use clause::{ClauseKind, Comparator, Connective, SearchClause};
pub use decoder::{classify, decode, decode_by_type, type_condition_pattern};
pub use encoder::{encode, no_custom_condition, CustomConditionHook, FiqlEncoder};

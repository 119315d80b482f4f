//! FIQL grammar: condition trees, text parsing and entity-aware builders.
//!
//! - [`condition`] - Condition tree and its text rendering
//! - [`parser`] - Text to condition tree
//! - [`builder`] - Condition builders per entity kind
//! - [`special`] - Reserved `$` tokens

pub mod builder;
pub mod condition;
pub mod parser;
pub mod special;

pub use builder::{
    AnyObjectConditionBuilder, ConditionBuilder, EntityKind, GroupConditionBuilder, GroupMemberCapable,
    GroupMembershipCapable, PropertyCondition, RelationshipCapable, RoleCapable, UserConditionBuilder,
};
pub use condition::{Comparison, Condition, FiqlOperator, Junction};
pub use parser::{parse, ParseContext};
pub use special::SpecialAttr;

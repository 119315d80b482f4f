//! Entity-kind-aware builders for FIQL conditions.
//!
//! Every builder shares the base operations of [`ConditionBuilder`]. Calls
//! that only make sense for some entity kinds live in capability traits; a
//! builder exposes them through the `as_*` probes, which return `None` when
//! the entity kind does not support the search dimension.

use crate::fiql::condition::{Condition, FiqlOperator, Junction};
use crate::fiql::special::SpecialAttr;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Entity kind a query targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EntityKind {
    #[default]
    User,
    Group,
    AnyObject,
}

impl EntityKind {
    pub fn builder(self) -> Box<dyn ConditionBuilder> {
        match self {
            EntityKind::User => Box::new(UserConditionBuilder),
            EntityKind::Group => Box::new(GroupConditionBuilder),
            EntityKind::AnyObject => Box::new(AnyObjectConditionBuilder),
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityKind::User => write!(f, "USER"),
            EntityKind::Group => write!(f, "GROUP"),
            EntityKind::AnyObject => write!(f, "ANY_OBJECT"),
        }
    }
}

/// Conversion of a typed literal into a FIQL argument
pub trait IntoArgument {
    fn into_argument(self) -> String;
}

impl IntoArgument for &str {
    fn into_argument(self) -> String {
        self.to_string()
    }
}

impl IntoArgument for String {
    fn into_argument(self) -> String {
        self
    }
}

impl IntoArgument for i64 {
    fn into_argument(self) -> String {
        self.to_string()
    }
}

impl IntoArgument for f64 {
    // Debug keeps the fractional part of integral values (10.0, not 10)
    fn into_argument(self) -> String {
        format!("{:?}", self)
    }
}

impl IntoArgument for bool {
    fn into_argument(self) -> String {
        self.to_string()
    }
}

/// Comparison primitives bound to one property
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyCondition {
    property: String,
}

impl PropertyCondition {
    pub fn new(property: impl Into<String>) -> Self {
        Self {
            property: property.into(),
        }
    }

    pub fn property(&self) -> &str {
        &self.property
    }

    fn compare(&self, op: FiqlOperator, value: impl IntoArgument) -> Condition {
        Condition::comparison(self.property.clone(), op, value.into_argument())
    }

    pub fn equal_to(&self, value: impl IntoArgument) -> Condition {
        self.compare(FiqlOperator::Equals, value)
    }

    pub fn equal_to_ignore_case(&self, value: &str) -> Condition {
        self.compare(FiqlOperator::IEquals, value)
    }

    pub fn not_equal_to(&self, value: impl IntoArgument) -> Condition {
        self.compare(FiqlOperator::NotEquals, value)
    }

    pub fn not_equal_to_ignore_case(&self, value: &str) -> Condition {
        self.compare(FiqlOperator::NotIEquals, value)
    }

    pub fn less_than(&self, value: impl IntoArgument) -> Condition {
        self.compare(FiqlOperator::LessThan, value)
    }

    pub fn less_or_equal_to(&self, value: impl IntoArgument) -> Condition {
        self.compare(FiqlOperator::LessOrEquals, value)
    }

    pub fn greater_than(&self, value: impl IntoArgument) -> Condition {
        self.compare(FiqlOperator::GreaterThan, value)
    }

    pub fn greater_or_equal_to(&self, value: impl IntoArgument) -> Condition {
        self.compare(FiqlOperator::GreaterOrEquals, value)
    }

    pub fn lexical_before(&self, value: &str) -> Condition {
        self.compare(FiqlOperator::LessThan, value)
    }

    pub fn lexical_not_after(&self, value: &str) -> Condition {
        self.compare(FiqlOperator::LessOrEquals, value)
    }

    pub fn lexical_after(&self, value: &str) -> Condition {
        self.compare(FiqlOperator::GreaterThan, value)
    }

    pub fn lexical_not_before(&self, value: &str) -> Condition {
        self.compare(FiqlOperator::GreaterOrEquals, value)
    }
}

fn special(attr: SpecialAttr, op: FiqlOperator, value: &str) -> Condition {
    Condition::comparison(attr.as_str(), op, value)
}

/// Join `condition` onto the accumulated `previous` one.
///
/// The previous condition is rendered first so that the text reads in the
/// same order the conditions were folded.
fn compose(junction: Junction, condition: Condition, previous: Condition) -> Condition {
    Condition::compound(junction, vec![previous, condition])
}

/// Operations available for every entity kind
pub trait ConditionBuilder {
    fn entity(&self) -> EntityKind;

    fn and(&self, condition: Condition, previous: Condition) -> Condition {
        compose(Junction::And, condition, previous)
    }

    fn or(&self, condition: Condition, previous: Condition) -> Condition {
        compose(Junction::Or, condition, previous)
    }

    fn is(&self, property: &str) -> PropertyCondition {
        PropertyCondition::new(property)
    }

    fn is_null(&self, property: &str) -> Condition {
        Condition::comparison(property, FiqlOperator::Equals, SpecialAttr::Null.as_str())
    }

    fn is_not_null(&self, property: &str) -> Condition {
        Condition::comparison(property, FiqlOperator::NotEquals, SpecialAttr::Null.as_str())
    }

    fn has_aux_classes(&self, class: &str) -> Condition {
        special(SpecialAttr::AuxClasses, FiqlOperator::Equals, class)
    }

    fn has_not_aux_classes(&self, class: &str) -> Condition {
        special(SpecialAttr::AuxClasses, FiqlOperator::NotEquals, class)
    }

    fn has_resources(&self, resource: &str) -> Condition {
        special(SpecialAttr::Resources, FiqlOperator::Equals, resource)
    }

    fn has_not_resources(&self, resource: &str) -> Condition {
        special(SpecialAttr::Resources, FiqlOperator::NotEquals, resource)
    }

    fn as_group_membership(&self) -> Option<&dyn GroupMembershipCapable> {
        None
    }

    fn as_role(&self) -> Option<&dyn RoleCapable> {
        None
    }

    fn as_group_member(&self) -> Option<&dyn GroupMemberCapable> {
        None
    }

    fn as_relationship(&self) -> Option<&dyn RelationshipCapable> {
        None
    }
}

/// Users and any-objects can be searched by group membership
pub trait GroupMembershipCapable {
    fn in_groups(&self, group: &str) -> Condition {
        special(SpecialAttr::Groups, FiqlOperator::Equals, group)
    }

    fn not_in_groups(&self, group: &str) -> Condition {
        special(SpecialAttr::Groups, FiqlOperator::NotEquals, group)
    }
}

/// Only users carry roles
pub trait RoleCapable {
    fn in_roles(&self, role: &str) -> Condition {
        special(SpecialAttr::Roles, FiqlOperator::Equals, role)
    }

    fn not_in_roles(&self, role: &str) -> Condition {
        special(SpecialAttr::Roles, FiqlOperator::NotEquals, role)
    }
}

/// Only groups have members
pub trait GroupMemberCapable {
    fn with_members(&self, member: &str) -> Condition {
        special(SpecialAttr::Member, FiqlOperator::Equals, member)
    }

    fn without_members(&self, member: &str) -> Condition {
        special(SpecialAttr::Member, FiqlOperator::NotEquals, member)
    }
}

/// Users and any-objects can be related to other any-objects
pub trait RelationshipCapable {
    fn in_relationships(&self, key: &str) -> Condition {
        special(SpecialAttr::Relationships, FiqlOperator::Equals, key)
    }

    fn not_in_relationships(&self, key: &str) -> Condition {
        special(SpecialAttr::Relationships, FiqlOperator::NotEquals, key)
    }

    fn in_relationship_types(&self, relationship_type: &str) -> Condition {
        special(SpecialAttr::RelationshipTypes, FiqlOperator::Equals, relationship_type)
    }

    fn not_in_relationship_types(&self, relationship_type: &str) -> Condition {
        special(SpecialAttr::RelationshipTypes, FiqlOperator::NotEquals, relationship_type)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct UserConditionBuilder;

impl ConditionBuilder for UserConditionBuilder {
    fn entity(&self) -> EntityKind {
        EntityKind::User
    }

    fn as_group_membership(&self) -> Option<&dyn GroupMembershipCapable> {
        Some(self)
    }

    fn as_role(&self) -> Option<&dyn RoleCapable> {
        Some(self)
    }

    fn as_relationship(&self) -> Option<&dyn RelationshipCapable> {
        Some(self)
    }
}

impl GroupMembershipCapable for UserConditionBuilder {}
impl RoleCapable for UserConditionBuilder {}
impl RelationshipCapable for UserConditionBuilder {}

#[derive(Debug, Clone, Copy, Default)]
pub struct GroupConditionBuilder;

impl ConditionBuilder for GroupConditionBuilder {
    fn entity(&self) -> EntityKind {
        EntityKind::Group
    }

    fn as_group_member(&self) -> Option<&dyn GroupMemberCapable> {
        Some(self)
    }
}

impl GroupMemberCapable for GroupConditionBuilder {}

#[derive(Debug, Clone, Copy, Default)]
pub struct AnyObjectConditionBuilder;

impl ConditionBuilder for AnyObjectConditionBuilder {
    fn entity(&self) -> EntityKind {
        EntityKind::AnyObject
    }

    fn as_group_membership(&self) -> Option<&dyn GroupMembershipCapable> {
        Some(self)
    }

    fn as_relationship(&self) -> Option<&dyn RelationshipCapable> {
        Some(self)
    }
}

impl GroupMembershipCapable for AnyObjectConditionBuilder {}
impl RelationshipCapable for AnyObjectConditionBuilder {}

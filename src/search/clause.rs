use serde::{Deserialize, Serialize};
use std::fmt;

/// How a clause combines with everything accumulated before it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Connective {
    #[default]
    And,
    Or,
}

/// Search dimension a clause filters on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ClauseKind {
    /// Plain schema attribute
    Attribute,
    /// Entity is (not) a member of a group
    GroupMembership,
    /// Group has (not) a given member
    GroupMember,
    /// User has (not) a given role
    RoleMembership,
    AuxClass,
    Resource,
    /// Relationship key (EQUALS/NOT_EQUALS) or relationship type (IS_NULL/IS_NOT_NULL)
    Relationship,
    /// Delegated to a custom condition hook
    Custom,
}

/// Comparison applied by a clause
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Comparator {
    IsNull,
    IsNotNull,
    Equals,
    NotEquals,
    GreaterOrEquals,
    GreaterThan,
    LessOrEquals,
    LessThan,
}

impl Comparator {
    pub const ALL: [Comparator; 8] = [
        Comparator::IsNull,
        Comparator::IsNotNull,
        Comparator::Equals,
        Comparator::NotEquals,
        Comparator::GreaterOrEquals,
        Comparator::GreaterThan,
        Comparator::LessOrEquals,
        Comparator::LessThan,
    ];

    /// Whether the comparator needs a right-hand value
    pub fn takes_value(self) -> bool {
        !matches!(self, Comparator::IsNull | Comparator::IsNotNull)
    }
}

impl ClauseKind {
    /// Comparators offered for this kind when editing a clause.
    ///
    /// Custom clauses return an empty list: the hook that renders them
    /// also decides which comparators make sense.
    pub fn comparators(self) -> &'static [Comparator] {
        match self {
            ClauseKind::Attribute => &Comparator::ALL,
            ClauseKind::AuxClass
            | ClauseKind::RoleMembership
            | ClauseKind::GroupMembership
            | ClauseKind::GroupMember
            | ClauseKind::Resource => &[Comparator::Equals, Comparator::NotEquals],
            ClauseKind::Relationship => &[
                Comparator::IsNotNull,
                Comparator::IsNull,
                Comparator::Equals,
                Comparator::NotEquals,
            ],
            ClauseKind::Custom => &[],
        }
    }

    /// Whether `comparator` is one of [`ClauseKind::comparators`]
    pub fn accepts(self, comparator: Comparator) -> bool {
        self.comparators().contains(&comparator)
    }
}

/// One atomic search condition plus its connective to the preceding clauses.
///
/// A clause only has meaning at its position inside an ordered list; the
/// connective of the first clause is carried but ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchClause {
    #[serde(default)]
    pub connective: Connective,
    pub kind: ClauseKind,
    #[serde(default)]
    pub property: String,
    pub comparator: Comparator,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

impl SearchClause {
    pub fn new(kind: ClauseKind, property: impl Into<String>, comparator: Comparator) -> Self {
        Self {
            connective: Connective::And,
            kind,
            property: property.into(),
            comparator,
            value: None,
        }
    }

    pub fn attribute(property: impl Into<String>, comparator: Comparator) -> Self {
        Self::new(ClauseKind::Attribute, property, comparator)
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    pub fn with_connective(mut self, connective: Connective) -> Self {
        self.connective = connective;
        self
    }

    pub fn or(self) -> Self {
        self.with_connective(Connective::Or)
    }

    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    /// True if the property is empty or whitespace only
    pub fn has_blank_property(&self) -> bool {
        self.property.trim().is_empty()
    }
}

impl fmt::Display for Connective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Connective::And => write!(f, "AND"),
            Connective::Or => write!(f, "OR"),
        }
    }
}

impl fmt::Display for ClauseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ClauseKind::Attribute => "ATTRIBUTE",
            ClauseKind::GroupMembership => "GROUP_MEMBERSHIP",
            ClauseKind::GroupMember => "GROUP_MEMBER",
            ClauseKind::RoleMembership => "ROLE_MEMBERSHIP",
            ClauseKind::AuxClass => "AUX_CLASS",
            ClauseKind::Resource => "RESOURCE",
            ClauseKind::Relationship => "RELATIONSHIP",
            ClauseKind::Custom => "CUSTOM",
        };
        f.write_str(name)
    }
}

impl fmt::Display for Comparator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Comparator::IsNull => "IS_NULL",
            Comparator::IsNotNull => "IS_NOT_NULL",
            Comparator::Equals => "EQUALS",
            Comparator::NotEquals => "NOT_EQUALS",
            Comparator::GreaterOrEquals => "GREATER_OR_EQUALS",
            Comparator::GreaterThan => "GREATER_THAN",
            Comparator::LessOrEquals => "LESS_OR_EQUALS",
            Comparator::LessThan => "LESS_THAN",
        };
        f.write_str(name)
    }
}

impl fmt::Display for SearchClause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {} {}", self.connective, self.kind, self.property, self.comparator)?;
        if let Some(value) = &self.value {
            write!(f, " {}", value)?;
        }
        Ok(())
    }
}

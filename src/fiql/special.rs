use std::fmt;

/// Reserved `$`-prefixed tokens of the search grammar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpecialAttr {
    /// Any-type restriction, stripped before decoding per type
    Type,
    AuxClasses,
    Resources,
    Groups,
    Relationships,
    RelationshipTypes,
    Roles,
    Member,
    /// Null sentinel used as a value, never as a selector
    Null,
}

impl SpecialAttr {
    pub const ALL: [SpecialAttr; 9] = [
        SpecialAttr::Type,
        SpecialAttr::AuxClasses,
        SpecialAttr::Resources,
        SpecialAttr::Groups,
        SpecialAttr::Relationships,
        SpecialAttr::RelationshipTypes,
        SpecialAttr::Roles,
        SpecialAttr::Member,
        SpecialAttr::Null,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SpecialAttr::Type => "$type",
            SpecialAttr::AuxClasses => "$auxClasses",
            SpecialAttr::Resources => "$resources",
            SpecialAttr::Groups => "$groups",
            SpecialAttr::Relationships => "$relationships",
            SpecialAttr::RelationshipTypes => "$relationshipTypes",
            SpecialAttr::Roles => "$roles",
            SpecialAttr::Member => "$member",
            SpecialAttr::Null => "$null",
        }
    }

    /// Exact, case-sensitive lookup
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|attr| attr.as_str() == name)
    }

    /// Whether `text` is this token
    pub fn is(self, text: &str) -> bool {
        self.as_str() == text
    }
}

impl fmt::Display for SpecialAttr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

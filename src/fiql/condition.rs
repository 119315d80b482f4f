use std::fmt;

/// Comparison operator of a FIQL constraint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FiqlOperator {
    Equals,
    NotEquals,
    LessThan,
    LessOrEquals,
    GreaterThan,
    GreaterOrEquals,
    /// Case-insensitive equality (`=~`)
    IEquals,
    /// Case-insensitive inequality (`!~`)
    NotIEquals,
}

impl FiqlOperator {
    /// Longest tokens first so that prefix matching is unambiguous
    pub const TOKENS: [(&'static str, FiqlOperator); 8] = [
        ("=lt=", FiqlOperator::LessThan),
        ("=le=", FiqlOperator::LessOrEquals),
        ("=gt=", FiqlOperator::GreaterThan),
        ("=ge=", FiqlOperator::GreaterOrEquals),
        ("==", FiqlOperator::Equals),
        ("!=", FiqlOperator::NotEquals),
        ("=~", FiqlOperator::IEquals),
        ("!~", FiqlOperator::NotIEquals),
    ];

    pub fn token(self) -> &'static str {
        match self {
            FiqlOperator::Equals => "==",
            FiqlOperator::NotEquals => "!=",
            FiqlOperator::LessThan => "=lt=",
            FiqlOperator::LessOrEquals => "=le=",
            FiqlOperator::GreaterThan => "=gt=",
            FiqlOperator::GreaterOrEquals => "=ge=",
            FiqlOperator::IEquals => "=~",
            FiqlOperator::NotIEquals => "!~",
        }
    }

    /// Match an operator at the start of `input`
    pub fn match_prefix(input: &str) -> Option<FiqlOperator> {
        Self::TOKENS
            .iter()
            .find(|(token, _)| input.starts_with(token))
            .map(|(_, op)| *op)
    }
}

/// Boolean connective of a compound condition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Junction {
    And,
    Or,
}

impl Junction {
    pub fn separator(self) -> char {
        match self {
            Junction::And => ';',
            Junction::Or => ',',
        }
    }
}

/// Single `selector operator argument` constraint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comparison {
    pub property: String,
    pub op: FiqlOperator,
    pub value: String,
}

/// FIQL condition tree
///
/// Builders hand these out as opaque values; only [`Condition::to_text`]
/// matters to callers that store or forward the query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Condition {
    /// Leaf constraint
    Comparison(Comparison),
    /// Conjunction/disjunction of children, rendered in order
    Compound {
        junction: Junction,
        children: Vec<Condition>,
    },
}

impl Condition {
    pub fn comparison(property: impl Into<String>, op: FiqlOperator, value: impl Into<String>) -> Self {
        Condition::Comparison(Comparison {
            property: property.into(),
            op,
            value: value.into(),
        })
    }

    pub fn compound(junction: Junction, children: Vec<Condition>) -> Self {
        Condition::Compound { junction, children }
    }

    pub fn junction(&self) -> Option<Junction> {
        match self {
            Condition::Comparison(_) => None,
            Condition::Compound { junction, .. } => Some(*junction),
        }
    }

    /// Number of leaf comparisons in the tree
    pub fn leaf_count(&self) -> usize {
        match self {
            Condition::Comparison(_) => 1,
            Condition::Compound { children, .. } => children.iter().map(Condition::leaf_count).sum(),
        }
    }

    /// Grammar-compliant query text
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        self.write_text(&mut out);
        out
    }

    fn write_text(&self, out: &mut String) {
        match self {
            Condition::Comparison(c) => {
                out.push_str(&c.property);
                out.push_str(c.op.token());
                out.push_str(&c.value);
            }
            Condition::Compound { junction, children } => {
                for (i, child) in children.iter().enumerate() {
                    if i > 0 {
                        out.push(junction.separator());
                    }
                    // Same-junction children are associative and stay bare
                    let wrap = matches!(child.junction(), Some(j) if j != *junction);
                    if wrap {
                        out.push('(');
                    }
                    child.write_text(out);
                    if wrap {
                        out.push(')');
                    }
                }
            }
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf(p: &str, v: &str) -> Condition {
        Condition::comparison(p, FiqlOperator::Equals, v)
    }

    #[test]
    fn test_leaf_text() {
        assert_eq!(leaf("email", "10").to_text(), "email==10");
        assert_eq!(
            Condition::comparison("age", FiqlOperator::GreaterOrEquals, "18").to_text(),
            "age=ge=18"
        );
    }

    #[test]
    fn test_same_junction_not_wrapped() {
        let inner = Condition::compound(Junction::And, vec![leaf("a", "1"), leaf("b", "2")]);
        let outer = Condition::compound(Junction::And, vec![inner, leaf("c", "3")]);
        assert_eq!(outer.to_text(), "a==1;b==2;c==3");
        assert_eq!(outer.leaf_count(), 3);
    }

    #[test]
    fn test_mixed_junction_wrapped() {
        let inner = Condition::compound(Junction::Or, vec![leaf("a", "1"), leaf("b", "2")]);
        let outer = Condition::compound(Junction::And, vec![inner, leaf("c", "3")]);
        assert_eq!(outer.to_text(), "(a==1,b==2);c==3");
    }

    #[test]
    fn test_operator_prefix_match() {
        assert_eq!(FiqlOperator::match_prefix("=lt=5"), Some(FiqlOperator::LessThan));
        assert_eq!(FiqlOperator::match_prefix("==5"), Some(FiqlOperator::Equals));
        assert_eq!(FiqlOperator::match_prefix("!~x"), Some(FiqlOperator::NotIEquals));
        assert_eq!(FiqlOperator::match_prefix("=x"), None);
    }
}

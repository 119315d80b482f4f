use crate::error::{FiqlError, Result};
use crate::fiql::condition::{Condition, FiqlOperator, Junction};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Deepest parenthesis nesting accepted before parsing gives up
pub const MAX_DEPTH: usize = 256;

/// Property names the parser accepts for the target entity kind
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseContext {
    /// Plain properties allowed as selectors; `None` accepts any name
    #[serde(default)]
    pub properties: Option<BTreeSet<String>>,
    /// Always accepted regardless of `properties`
    #[serde(default = "default_contextual")]
    pub contextual: BTreeSet<String>,
}

fn default_contextual() -> BTreeSet<String> {
    BTreeSet::from(["key".to_string()])
}

impl Default for ParseContext {
    fn default() -> Self {
        Self {
            properties: None,
            contextual: default_contextual(),
        }
    }
}

impl ParseContext {
    /// Context restricted to the given plain properties
    pub fn with_properties<I, S>(properties: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            properties: Some(properties.into_iter().map(Into::into).collect()),
            ..Self::default()
        }
    }

    /// Whether `selector` may appear on the left-hand side of a comparison
    pub fn allows(&self, selector: &str) -> bool {
        if selector.starts_with('$') || self.contextual.contains(selector) {
            return true;
        }
        match &self.properties {
            Some(allowed) => allowed.contains(selector),
            None => true,
        }
    }
}

/// Parse FIQL text into a condition tree.
///
/// Leading whitespace is skipped; trailing whitespace belongs to the last
/// argument.
pub fn parse(input: &str, context: &ParseContext) -> Result<Condition> {
    let mut parser = FiqlParser::new(input.trim_start(), context);
    parser.parse()
}

/// Recursive-descent FIQL parser
struct FiqlParser<'a> {
    input: &'a str,
    pos: usize,
    depth: usize,
    context: &'a ParseContext,
}

impl<'a> FiqlParser<'a> {
    fn new(input: &'a str, context: &'a ParseContext) -> Self {
        Self {
            input,
            pos: 0,
            depth: 0,
            context,
        }
    }

    fn parse(&mut self) -> Result<Condition> {
        if self.is_eof() {
            return Err(FiqlError::parse(0, "empty expression"));
        }

        let root = self.parse_or()?;

        if !self.is_eof() {
            return Err(FiqlError::parse(
                self.pos,
                format!("unexpected '{}'", self.remaining()),
            ));
        }

        Ok(root)
    }

    fn parse_or(&mut self) -> Result<Condition> {
        let mut nodes = vec![self.parse_and()?];

        while self.consume_char(',') {
            nodes.push(self.parse_and()?);
        }

        Ok(Self::collapse(Junction::Or, nodes))
    }

    fn parse_and(&mut self) -> Result<Condition> {
        let mut nodes = vec![self.parse_primary()?];

        while self.consume_char(';') {
            nodes.push(self.parse_primary()?);
        }

        Ok(Self::collapse(Junction::And, nodes))
    }

    fn collapse(junction: Junction, mut nodes: Vec<Condition>) -> Condition {
        if nodes.len() == 1 {
            if let Some(node) = nodes.pop() {
                return node;
            }
        }
        Condition::compound(junction, nodes)
    }

    fn parse_primary(&mut self) -> Result<Condition> {
        // Parenthesized expression
        if self.consume_char('(') {
            let open = self.pos - 1;
            if self.depth >= MAX_DEPTH {
                return Err(FiqlError::parse(open, "nesting too deep"));
            }
            self.depth += 1;
            let node = self.parse_or()?;
            if !self.consume_char(')') {
                return Err(FiqlError::parse(open, "unbalanced parenthesis"));
            }
            self.depth -= 1;
            return Ok(node);
        }

        self.parse_comparison()
    }

    fn parse_comparison(&mut self) -> Result<Condition> {
        let start = self.pos;

        while let Some(ch) = self.peek_char() {
            if is_selector_char(ch) {
                self.advance();
            } else {
                break;
            }
        }

        let selector = &self.input[start..self.pos];
        if selector.is_empty() {
            return Err(FiqlError::parse(start, "expected property name"));
        }
        if !self.context.allows(selector) {
            return Err(FiqlError::UnknownProperty(selector.to_string()));
        }

        let op = FiqlOperator::match_prefix(self.remaining())
            .ok_or_else(|| FiqlError::parse(self.pos, format!("expected operator after '{}'", selector)))?;
        self.pos += op.token().len();

        // Parentheses inside an argument must balance; an unmatched ')' closes the group
        let value_start = self.pos;
        let mut opened = Vec::new();
        while let Some(ch) = self.peek_char() {
            match ch {
                ';' | ',' => break,
                ')' if opened.is_empty() => break,
                ')' => {
                    opened.pop();
                }
                '(' => opened.push(self.pos),
                _ => {}
            }
            self.advance();
        }
        if let Some(&open) = opened.last() {
            return Err(FiqlError::parse(open, "unbalanced parenthesis in argument"));
        }

        let value = &self.input[value_start..self.pos];
        if value.is_empty() {
            return Err(FiqlError::parse(value_start, format!("missing argument for '{}'", selector)));
        }

        Ok(Condition::comparison(selector, op, value))
    }

    fn is_eof(&self) -> bool {
        self.pos >= self.input.len()
    }

    fn peek_char(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn consume_char(&mut self, expected: char) -> bool {
        if self.peek_char() == Some(expected) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn advance(&mut self) {
        if let Some(ch) = self.peek_char() {
            self.pos += ch.len_utf8();
        }
    }

    fn remaining(&self) -> &str {
        &self.input[self.pos..]
    }
}

fn is_selector_char(ch: char) -> bool {
    ch.is_alphanumeric() || matches!(ch, '_' | '.' | '@' | '$' | '-' | ':')
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fiql::condition::Comparison;

    fn parse_default(input: &str) -> Result<Condition> {
        parse(input, &ParseContext::default())
    }

    #[test]
    fn test_simple_comparison() {
        let c = parse_default("email==10").unwrap();
        assert_eq!(c, Condition::comparison("email", FiqlOperator::Equals, "10"));
    }

    #[test]
    fn test_all_operators() {
        for (token, op) in FiqlOperator::TOKENS {
            let c = parse_default(&format!("age{}5", token)).unwrap();
            assert!(matches!(c, Condition::Comparison(Comparison { op: o, .. }) if o == op));
        }
    }

    #[test]
    fn test_and_binds_tighter_than_or() {
        let c = parse_default("a==1,b==2;c==3").unwrap();
        match c {
            Condition::Compound { junction: Junction::Or, children } => {
                assert_eq!(children.len(), 2);
                assert_eq!(children[1].junction(), Some(Junction::And));
            }
            other => panic!("unexpected tree: {:?}", other),
        }
    }

    #[test]
    fn test_parentheses() {
        let c = parse_default("(a==1,b==2);c==3").unwrap();
        assert_eq!(c.junction(), Some(Junction::And));
        assert_eq!(c.to_text(), "(a==1,b==2);c==3");
    }

    #[test]
    fn test_special_selectors() {
        let c = parse_default("$groups==admins;$relationshipTypes!=$null").unwrap();
        assert_eq!(c.leaf_count(), 2);
    }

    #[test]
    fn test_value_with_spaces_and_escapes() {
        let c = parse_default("fullname=~John Doe%252C Jr").unwrap();
        assert_eq!(c, Condition::comparison("fullname", FiqlOperator::IEquals, "John Doe%252C Jr"));
    }

    #[test]
    fn test_errors() {
        assert!(matches!(parse_default(""), Err(FiqlError::Parse { offset: 0, .. })));
        assert!(matches!(parse_default("==1"), Err(FiqlError::Parse { .. })));
        assert!(matches!(parse_default("email"), Err(FiqlError::Parse { .. })));
        assert!(matches!(parse_default("email=x=1"), Err(FiqlError::Parse { .. })));
        assert!(matches!(parse_default("email=="), Err(FiqlError::Parse { .. })));
        assert!(matches!(parse_default("(a==1"), Err(FiqlError::Parse { offset: 0, .. })));
        assert!(matches!(parse_default("a==1)"), Err(FiqlError::Parse { offset: 4, .. })));
        assert!(matches!(parse_default("a==1;"), Err(FiqlError::Parse { .. })));
        assert!(matches!(parse_default("a==f(x"), Err(FiqlError::Parse { offset: 4, .. })));
        assert!(matches!(parse_default("a==f(x;b==1"), Err(FiqlError::Parse { offset: 4, .. })));
    }

    #[test]
    fn test_balanced_parentheses_in_argument() {
        let c = parse_default("company=~ACME (Italy)").unwrap();
        assert_eq!(c, Condition::comparison("company", FiqlOperator::IEquals, "ACME (Italy)"));

        let c = parse_default("(a==f(g(x)),b==2);c==3").unwrap();
        assert_eq!(c.leaf_count(), 3);
        assert_eq!(c.to_text(), "(a==f(g(x)),b==2);c==3");

        let c = parse_default("(a==f(x))").unwrap();
        assert_eq!(c, Condition::comparison("a", FiqlOperator::Equals, "f(x)"));
    }

    #[test]
    fn test_nesting_limit() {
        let nested = |depth: usize| format!("{}a==1{}", "(".repeat(depth), ")".repeat(depth));
        assert!(parse_default(&nested(MAX_DEPTH)).is_ok());
        assert!(matches!(
            parse_default(&nested(MAX_DEPTH + 1)),
            Err(FiqlError::Parse { offset, .. }) if offset == MAX_DEPTH
        ));

        let deep = "(".repeat(100_000) + "a==1" + &")".repeat(100_000);
        assert!(matches!(parse_default(&deep), Err(FiqlError::Parse { .. })));
    }

    #[test]
    fn test_context_restricts_plain_properties() {
        let ctx = ParseContext::with_properties(["email", "username"]);
        assert!(parse("email==x", &ctx).is_ok());
        assert!(parse("key==x", &ctx).is_ok());
        assert!(parse("$resources==ldap", &ctx).is_ok());
        assert_eq!(
            parse("surname==x", &ctx),
            Err(FiqlError::UnknownProperty("surname".to_string()))
        );
    }

    #[test]
    fn test_trailing_whitespace_kept_in_argument() {
        let c = parse_default("  surname==Doe ").unwrap();
        assert_eq!(c, Condition::comparison("surname", FiqlOperator::Equals, "Doe "));
    }
}

use crate::fiql::builder::IntoArgument;
use crate::fiql::{Condition, ConditionBuilder, PropertyCondition};
use crate::schema::{AttrSchemaType, NoSchema, SchemaTypeResolver};
use crate::search::clause::{ClauseKind, Comparator, Connective, SearchClause};
use crate::search::escape;
use log::{debug, warn};

/// Renders a [`ClauseKind::Custom`] clause; `None` skips it
pub type CustomConditionHook<'a> = &'a dyn Fn(&SearchClause) -> Option<Condition>;

/// Default hook: custom clauses never produce a condition
pub fn no_custom_condition(_clause: &SearchClause) -> Option<Condition> {
    None
}

/// Encode clauses with no schema information and no custom hook
pub fn encode(clauses: &[SearchClause], builder: &dyn ConditionBuilder) -> Option<String> {
    FiqlEncoder::new(builder).encode(clauses)
}

/// Folds an ordered clause list into FIQL text
pub struct FiqlEncoder<'a> {
    builder: &'a dyn ConditionBuilder,
    schema: &'a dyn SchemaTypeResolver,
    custom: CustomConditionHook<'a>,
}

impl<'a> FiqlEncoder<'a> {
    pub fn new(builder: &'a dyn ConditionBuilder) -> Self {
        Self {
            builder,
            schema: &NoSchema,
            custom: &no_custom_condition,
        }
    }

    /// Resolve attribute value types through `schema`
    pub fn with_schema(mut self, schema: &'a dyn SchemaTypeResolver) -> Self {
        self.schema = schema;
        self
    }

    /// Render custom clauses through `custom`
    pub fn with_custom(mut self, custom: CustomConditionHook<'a>) -> Self {
        self.custom = custom;
        self
    }

    /// FIQL text, or `None` when no clause produced a condition
    pub fn encode(&self, clauses: &[SearchClause]) -> Option<String> {
        debug!("Generating {} FIQL from {:?}", self.builder.entity(), clauses);

        let fiql = self.build(clauses).map(|condition| condition.to_text());

        debug!("Generated FIQL: {:?}", fiql);
        fiql
    }

    /// Left fold of the clause conditions.
    ///
    /// Each new condition is passed first and the accumulated one second;
    /// clauses that produce no condition are skipped.
    pub fn build(&self, clauses: &[SearchClause]) -> Option<Condition> {
        let mut acc: Option<Condition> = None;

        for clause in clauses {
            let Some(condition) = self.leaf(clause) else {
                warn!("Skipping clause without condition: {}", clause);
                continue;
            };

            acc = Some(match acc {
                None => condition,
                Some(previous) => match clause.connective {
                    Connective::And => self.builder.and(condition, previous),
                    Connective::Or => self.builder.or(condition, previous),
                },
            });
        }

        acc
    }

    /// Condition for a single clause
    pub fn leaf(&self, clause: &SearchClause) -> Option<Condition> {
        let value = clause.value().map(escape::encode);
        let value = value.as_deref().filter(|v| !v.is_empty());

        if clause.kind == ClauseKind::Custom {
            return (self.custom)(clause);
        }
        if clause.has_blank_property() && clause.kind != ClauseKind::GroupMember {
            return None;
        }

        let target = escape::encode(&clause.property);
        let b = self.builder;

        match (clause.kind, clause.comparator) {
            (ClauseKind::Attribute, _) => self.attribute(clause, value),

            (ClauseKind::GroupMembership, Comparator::Equals) => {
                b.as_group_membership().map(|g| g.in_groups(&target))
            }
            (ClauseKind::GroupMembership, Comparator::NotEquals) => {
                b.as_group_membership().map(|g| g.not_in_groups(&target))
            }

            (ClauseKind::GroupMember, Comparator::Equals) => {
                b.as_group_member().zip(value).map(|(g, v)| g.with_members(v))
            }
            (ClauseKind::GroupMember, Comparator::NotEquals) => {
                b.as_group_member().zip(value).map(|(g, v)| g.without_members(v))
            }

            (ClauseKind::RoleMembership, Comparator::Equals) => b.as_role().map(|r| r.in_roles(&target)),
            (ClauseKind::RoleMembership, Comparator::NotEquals) => b.as_role().map(|r| r.not_in_roles(&target)),

            (ClauseKind::AuxClass, Comparator::Equals) => Some(b.has_aux_classes(&target)),
            (ClauseKind::AuxClass, Comparator::NotEquals) => Some(b.has_not_aux_classes(&target)),

            (ClauseKind::Resource, Comparator::Equals) => Some(b.has_resources(&target)),
            (ClauseKind::Resource, Comparator::NotEquals) => Some(b.has_not_resources(&target)),

            (ClauseKind::Relationship, Comparator::IsNotNull) => {
                b.as_relationship().map(|r| r.in_relationship_types(&target))
            }
            (ClauseKind::Relationship, Comparator::IsNull) => {
                b.as_relationship().map(|r| r.not_in_relationship_types(&target))
            }
            (ClauseKind::Relationship, Comparator::Equals) => {
                b.as_relationship().zip(value).map(|(r, v)| r.in_relationships(v))
            }
            (ClauseKind::Relationship, Comparator::NotEquals) => {
                b.as_relationship().zip(value).map(|(r, v)| r.not_in_relationships(v))
            }

            _ => None,
        }
    }

    fn attribute(&self, clause: &SearchClause, value: Option<&str>) -> Option<Condition> {
        let b = self.builder;
        let property = b.is(&clause.property);

        match self.schema.schema_type(&clause.property) {
            Some(schema_type) if schema_type.is_numeric() => Some(match clause.comparator {
                Comparator::IsNull => b.is_null(&clause.property),
                Comparator::IsNotNull => b.is_not_null(&clause.property),
                comparator if *schema_type == AttrSchemaType::Double => {
                    compare(&property, comparator, to_double(value))
                }
                comparator => compare(&property, comparator, to_long(value)),
            }),
            schema_type => {
                let boolean = matches!(schema_type, Some(AttrSchemaType::Boolean));
                match clause.comparator {
                    Comparator::IsNull => Some(b.is_null(&clause.property)),
                    Comparator::IsNotNull => Some(b.is_not_null(&clause.property)),
                    Comparator::Equals if boolean => Some(property.equal_to(to_boolean(value))),
                    Comparator::NotEquals if boolean => Some(property.not_equal_to(to_boolean(value))),
                    Comparator::Equals => value.map(|v| property.equal_to_ignore_case(v)),
                    Comparator::NotEquals => value.map(|v| property.not_equal_to_ignore_case(v)),
                    Comparator::LessThan => value.map(|v| property.lexical_before(v)),
                    Comparator::LessOrEquals => value.map(|v| property.lexical_not_after(v)),
                    Comparator::GreaterThan => value.map(|v| property.lexical_after(v)),
                    Comparator::GreaterOrEquals => value.map(|v| property.lexical_not_before(v)),
                }
            }
        }
    }
}

/// Ordering or equality comparison against a typed literal
fn compare<T: IntoArgument>(property: &PropertyCondition, comparator: Comparator, n: T) -> Condition {
    match comparator {
        Comparator::NotEquals => property.not_equal_to(n),
        Comparator::LessThan => property.less_than(n),
        Comparator::LessOrEquals => property.less_or_equal_to(n),
        Comparator::GreaterThan => property.greater_than(n),
        Comparator::GreaterOrEquals => property.greater_or_equal_to(n),
        Comparator::Equals | Comparator::IsNull | Comparator::IsNotNull => property.equal_to(n),
    }
}

/// Unparsable or absent input becomes 0
fn to_long(value: Option<&str>) -> i64 {
    value.and_then(|v| v.parse().ok()).unwrap_or(0)
}

/// Unparsable or absent input becomes 0.0
fn to_double(value: Option<&str>) -> f64 {
    value.and_then(|v| v.parse().ok()).unwrap_or(0.0)
}

fn to_boolean(value: Option<&str>) -> bool {
    value.is_some_and(|v| {
        ["true", "on", "yes", "y", "t"]
            .iter()
            .any(|accepted| v.eq_ignore_ascii_case(accepted))
    })
}

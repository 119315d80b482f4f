use crate::fiql::{parse, Comparison, Condition, FiqlOperator, Junction, ParseContext, SpecialAttr};
use crate::search::clause::{ClauseKind, Comparator, Connective, SearchClause};
use crate::search::escape;
use log::{debug, error};
use regex::Regex;
use std::collections::BTreeMap;

/// Decode FIQL text into an ordered clause list.
///
/// Blank or absent text yields no clauses. Text that does not parse is
/// logged and also yields no clauses, so callers fall back to an empty
/// search form instead of failing.
pub fn decode<'a>(fiql: impl Into<Option<&'a str>>, context: &ParseContext) -> Vec<SearchClause> {
    let Some(fiql) = fiql.into().filter(|text| !text.trim().is_empty()) else {
        return Vec::new();
    };

    match parse(fiql, context) {
        Ok(condition) => {
            let mut clauses = Vec::with_capacity(condition.leaf_count());
            flatten(&condition, &mut clauses);
            clauses
        }
        Err(e) => {
            error!("Unparseable FIQL expression '{}': {}", fiql, e);
            Vec::new()
        }
    }
}

/// Pattern matching the `$type==<name>` restriction joined to the rest of a query
pub fn type_condition_pattern(type_name: &str) -> Result<Regex, regex::Error> {
    let token = format!("{}=={}", regex::escape(SpecialAttr::Type.as_str()), regex::escape(type_name));
    Regex::new(&format!(";{token}|{token};"))
}

/// Decode one FIQL text per any-type, dropping each entry's own `$type` restriction
pub fn decode_by_type(
    fiql: &BTreeMap<String, String>,
    context: &ParseContext,
) -> BTreeMap<String, Vec<SearchClause>> {
    fiql.iter()
        .map(|(type_name, text)| {
            let stripped = match type_condition_pattern(type_name) {
                Ok(pattern) => pattern.replace_all(text, "").into_owned(),
                Err(e) => {
                    error!("Invalid type pattern for '{}': {}", type_name, e);
                    text.clone()
                }
            };
            (type_name.clone(), decode(stripped.as_str(), context))
        })
        .collect()
}

fn flatten(condition: &Condition, clauses: &mut Vec<SearchClause>) {
    match condition {
        Condition::Comparison(comparison) => clauses.push(classify_comparison(comparison)),
        Condition::Compound { junction, children } => {
            for child in children {
                match child {
                    Condition::Comparison(comparison) => {
                        let mut clause = classify_comparison(comparison);
                        if !clauses.is_empty() {
                            clause.connective = match junction {
                                Junction::And => Connective::And,
                                Junction::Or => Connective::Or,
                            };
                        }
                        clauses.push(clause);
                    }
                    Condition::Compound { .. } => flatten(child, clauses),
                }
            }
        }
    }
}

fn classify_comparison(comparison: &Comparison) -> SearchClause {
    debug!("Condition: {:?}", comparison);
    classify(&comparison.property, comparison.op, &comparison.value)
}

/// Build the clause for a single `property op value` comparison
pub fn classify(property: &str, op: FiqlOperator, raw_value: &str) -> SearchClause {
    let value = escape::decode(raw_value);

    let kind = match SpecialAttr::from_name(property) {
        Some(SpecialAttr::Roles) => ClauseKind::RoleMembership,
        Some(SpecialAttr::Groups) => ClauseKind::GroupMembership,
        Some(SpecialAttr::Relationships) | Some(SpecialAttr::RelationshipTypes) => ClauseKind::Relationship,
        Some(SpecialAttr::AuxClasses) => ClauseKind::AuxClass,
        Some(SpecialAttr::Resources) => ClauseKind::Resource,
        Some(SpecialAttr::Member) => ClauseKind::GroupMember,
        _ if property.starts_with('$') => ClauseKind::Custom,
        _ => ClauseKind::Attribute,
    };

    // Special attributes only select the kind; the target is the right-hand side
    let clause_property = match kind {
        ClauseKind::Attribute => property.to_string(),
        _ => value.clone(),
    };

    let is_null_value = SpecialAttr::Null.is(&value);
    // Relationship types read the null sentinel the other way round; kept as observed
    let inverted = SpecialAttr::RelationshipTypes.is(property);

    let comparator = match op {
        FiqlOperator::Equals | FiqlOperator::IEquals => {
            if is_null_value != inverted {
                Comparator::IsNull
            } else {
                Comparator::Equals
            }
        }
        FiqlOperator::NotEquals | FiqlOperator::NotIEquals => {
            if is_null_value != inverted {
                Comparator::IsNotNull
            } else {
                Comparator::NotEquals
            }
        }
        FiqlOperator::GreaterOrEquals => Comparator::GreaterOrEquals,
        FiqlOperator::GreaterThan => Comparator::GreaterThan,
        FiqlOperator::LessOrEquals => Comparator::LessOrEquals,
        FiqlOperator::LessThan => Comparator::LessThan,
    };

    SearchClause {
        connective: Connective::And,
        kind,
        property: clause_property,
        comparator,
        value: comparator.takes_value().then_some(value),
    }
}

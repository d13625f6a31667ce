//! Stored clause-list queries.
//!
//! Wire shape:
//! ```json
//! [{"type":"TAG","value":{"operator":"CONTAIN","value":"work"},"relation":"AND"}]
//! ```
//!
//! The chain starts at `true`; an `OR` clause folds as `acc || r`, anything
//! else as `acc && r`. A clause with an empty value always passes.

use super::spec::ContentType;
use super::{FilterError, FilterResult};
use crate::extract::patterns::PatternKind;
use crate::extract::tags::{extract_tags, is_untagged};
use crate::model::memo::{local_epoch_ms, Memo};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ClauseKind {
    Tag,
    Type,
    Text,
    Date,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ClauseOperator {
    Contain,
    NotContain,
    Is,
    IsNot,
    Before,
    After,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Relation {
    #[default]
    And,
    Or,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClauseValue {
    pub operator: ClauseOperator,
    #[serde(default)]
    pub value: String,
}

/// One stored filter clause.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryClause {
    #[serde(rename = "type")]
    pub kind: ClauseKind,
    pub value: ClauseValue,
    #[serde(default)]
    pub relation: Relation,
}

/// Decides whether a memo satisfies a parsed clause list.
///
/// Hosts with their own query engine implement this; [`ClauseEvaluator`]
/// is the built-in one.
pub trait QueryPredicate {
    fn matches(&self, memo: &Memo, clauses: &[QueryClause]) -> bool;
}

/// Built-in clause-chain evaluator.
#[derive(Debug, Clone, Copy, Default)]
pub struct ClauseEvaluator;

impl QueryPredicate for ClauseEvaluator {
    fn matches(&self, memo: &Memo, clauses: &[QueryClause]) -> bool {
        clauses.iter().fold(true, |acc, clause| {
            let result = clause_matches(memo, clause);
            match clause.relation {
                Relation::Or => acc || result,
                Relation::And => acc && result,
            }
        })
    }
}

/// Parses a stored query string into clauses.
///
/// # Errors
/// - `MalformedFilter` when the text is not a JSON array of clauses.
pub fn parse_clauses(querystring: &str) -> FilterResult<Vec<QueryClause>> {
    serde_json::from_str::<Vec<QueryClause>>(querystring).map_err(|err| {
        FilterError::MalformedFilter {
            query: querystring.to_string(),
            message: err.to_string(),
        }
    })
}

pub fn clause_matches(memo: &Memo, clause: &QueryClause) -> bool {
    let ClauseValue { operator, value } = &clause.value;
    if value.is_empty() {
        return true;
    }

    match clause.kind {
        ClauseKind::Tag => {
            let contained = extract_tags(&memo.content).contains(value.as_str());
            negate_if(contained, *operator == ClauseOperator::NotContain)
        }
        ClauseKind::Type => {
            let matched = ContentType::parse(value)
                .map(|content_type| content_type_matches(content_type, &memo.content))
                .unwrap_or(false);
            negate_if(matched, *operator == ClauseOperator::IsNot)
        }
        ClauseKind::Text => {
            let contained = memo.content.contains(value.as_str());
            negate_if(contained, *operator == ClauseOperator::NotContain)
        }
        ClauseKind::Date => {
            let created = memo.created_at_epoch_ms();
            let (Some(created), Some(bound)) = (created, parse_clause_date(value)) else {
                return false;
            };
            match operator {
                ClauseOperator::Before => created < bound,
                ClauseOperator::After => created > bound,
                _ => true,
            }
        }
    }
}

/// Content-type predicate shared by the feed filter and `TYPE` clauses.
pub fn content_type_matches(content_type: ContentType, content: &str) -> bool {
    match content_type {
        ContentType::NotTagged => is_untagged(content),
        ContentType::Linked => PatternKind::Link.is_match(content),
        ContentType::Imaged => PatternKind::ImageUrl.is_match(content),
        ContentType::Connected => PatternKind::MemoLink.is_match(content),
    }
}

fn negate_if(value: bool, negate: bool) -> bool {
    if negate {
        !value
    } else {
        value
    }
}

fn parse_clause_date(value: &str) -> Option<i64> {
    let trimmed = value.trim();
    let date_part = trimmed.get(..10).unwrap_or(trimmed);
    ["%Y-%m-%d", "%Y/%m/%d"]
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(date_part, format).ok())
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|at| local_epoch_ms(&at))
}

#[cfg(test)]
mod tests {
    use super::{parse_clause_date, parse_clauses, ClauseKind, Relation};

    #[test]
    fn parse_clauses_reads_wire_shape_and_defaults_relation() {
        let clauses = parse_clauses(
            r#"[{"type":"TEXT","value":{"operator":"CONTAIN","value":"milk"}}]"#,
        )
        .unwrap();
        assert_eq!(clauses.len(), 1);
        assert_eq!(clauses[0].kind, ClauseKind::Text);
        assert_eq!(clauses[0].relation, Relation::And);
    }

    #[test]
    fn parse_clauses_rejects_non_array_json() {
        assert!(parse_clauses(r#"{"type":"TEXT"}"#).is_err());
        assert!(parse_clauses("not json").is_err());
    }

    #[test]
    fn clause_dates_accept_dash_and_slash_forms() {
        assert_eq!(parse_clause_date("2024-01-02"), parse_clause_date("2024/01/02"));
        assert!(parse_clause_date("2024/01/02 10:00:00").is_some());
        assert!(parse_clause_date("yesterday").is_none());
    }
}

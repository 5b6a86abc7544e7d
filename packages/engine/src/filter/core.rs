//! Core filter evaluation logic

use std::borrow::Cow;

use serde_json::Value;

use super::comparison::ValueComparator;
use crate::path::ast::{FilterExpression, LogicalOp, PropertyStep};

/// Truthiness of literal operands used as whole predicates
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(arr) => !arr.is_empty(),
        Value::Object(obj) => !obj.is_empty(),
    }
}

/// Filter expression evaluator
pub struct FilterEvaluator;

impl FilterEvaluator {
    /// Evaluate a predicate against a candidate
    ///
    /// A bare property chain tests existence: `[?(@.isbn)]` keeps candidates
    /// that have an `isbn` member whatever its value. Comparisons with a
    /// missing operand are false.
    #[must_use]
    pub fn evaluate_predicate(candidate: &Value, expr: &FilterExpression) -> bool {
        let result = match expr {
            FilterExpression::Current => true,
            FilterExpression::Property { path } => resolve(candidate, path).is_some(),
            FilterExpression::Literal { value } => is_truthy(&value.to_json()),
            FilterExpression::Comparison {
                left,
                operator,
                right,
            } => match (operand(candidate, left), operand(candidate, right)) {
                (Some(l), Some(r)) => ValueComparator::compare(&l, *operator, &r),
                _ => false,
            },
            FilterExpression::Logical {
                left,
                operator: LogicalOp::And,
                right,
            } => Self::evaluate_predicate(candidate, left) && Self::evaluate_predicate(candidate, right),
            FilterExpression::Logical {
                left,
                operator: LogicalOp::Or,
                right,
            } => Self::evaluate_predicate(candidate, left) || Self::evaluate_predicate(candidate, right),
            FilterExpression::Not { operand } => !Self::evaluate_predicate(candidate, operand),
            FilterExpression::Regex { target, pattern } => match operand(candidate, target) {
                Some(value) => value.as_str().is_some_and(|s| pattern.is_match(s)),
                None => false,
            },
        };

        tracing::trace!(
            target: "jsurf::filter",
            expr = %expr,
            result,
            "evaluated predicate"
        );
        result
    }
}

/// Resolve an operand to a value; `None` when a property is missing
fn operand<'v>(candidate: &'v Value, expr: &FilterExpression) -> Option<Cow<'v, Value>> {
    match expr {
        FilterExpression::Current => Some(Cow::Borrowed(candidate)),
        FilterExpression::Property { path } => resolve(candidate, path).map(Cow::Borrowed),
        FilterExpression::Literal { value } => Some(Cow::Owned(value.to_json())),
        other => Some(Cow::Owned(Value::Bool(FilterEvaluator::evaluate_predicate(
            candidate, other,
        )))),
    }
}

fn resolve<'v>(candidate: &'v Value, path: &[PropertyStep]) -> Option<&'v Value> {
    path.iter().try_fold(candidate, |current, step| match step {
        PropertyStep::Name(name) => current.as_object()?.get(name),
        PropertyStep::Index(index) => current.as_array()?.get(*index),
    })
}

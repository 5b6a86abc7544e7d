//! Value comparison for filter operators

use std::cmp::Ordering;

use serde_json::Value;

use crate::path::ast::ComparisonOp;

/// Compares operands the way filter expressions expect
///
/// Numbers compare numerically regardless of representation, strings
/// lexicographically. Other types support only `==` and `!=`, and values of
/// different types are never equal.
pub struct ValueComparator;

impl ValueComparator {
    #[must_use]
    pub fn compare(left: &Value, operator: ComparisonOp, right: &Value) -> bool {
        match Self::ordering(left, right) {
            Some(ordering) => match operator {
                ComparisonOp::Equal => ordering == Ordering::Equal,
                ComparisonOp::NotEqual => ordering != Ordering::Equal,
                ComparisonOp::Less => ordering == Ordering::Less,
                ComparisonOp::LessEq => ordering != Ordering::Greater,
                ComparisonOp::Greater => ordering == Ordering::Greater,
                ComparisonOp::GreaterEq => ordering != Ordering::Less,
            },
            None => match operator {
                ComparisonOp::Equal => left == right,
                ComparisonOp::NotEqual => left != right,
                _ => false,
            },
        }
    }

    /// Total order for numbers and strings; `None` for anything else
    fn ordering(left: &Value, right: &Value) -> Option<Ordering> {
        match (left, right) {
            (Value::Number(l), Value::Number(r)) => match (l.as_i64(), r.as_i64()) {
                (Some(l), Some(r)) => Some(l.cmp(&r)),
                _ => l.as_f64()?.partial_cmp(&r.as_f64()?),
            },
            (Value::String(l), Value::String(r)) => Some(l.cmp(r)),
            _ => None,
        }
    }
}

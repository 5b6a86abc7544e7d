//! Path expression AST definitions
//!
//! Segment and filter types produced by the compiler and consumed by the
//! matcher automaton. All types are plain values: equal expressions produce
//! equal segment sequences, which lets the automaton share work between
//! bindings registered with the same path.

use std::collections::BTreeSet;
use std::fmt;

/// Individual selector in a compiled path
#[derive(Debug, Clone, PartialEq)]
pub enum PathSegment {
    /// Root identifier (`$`), always the first segment
    Root,

    /// Named object member (`.name` or `['name']`)
    ChildName(String),

    /// Any member or element (`.*` or `[*]`)
    AnyChild,

    /// Single array element (`[3]`)
    ChildIndex(usize),

    /// Array elements in `start..end` stepping by `step` (`[1:5:2]`)
    ArraySlice {
        start: usize,
        end: Option<usize>,
        step: usize,
    },

    /// Descendants at any depth (`..`); always followed by a concrete segment
    RecursiveDescent,

    /// Several object members (`['a','b']`)
    MultiSelectNames(BTreeSet<String>),

    /// Several array elements (`[0,2]`)
    MultiSelectIndices(BTreeSet<usize>),

    /// Children satisfying a predicate (`[?(@.price < 10)]`)
    Filter(FilterExpression),
}

impl PathSegment {
    /// Whether this segment consumes exactly one level of nesting
    #[inline]
    #[must_use]
    pub fn is_concrete(&self) -> bool {
        !matches!(self, PathSegment::Root | PathSegment::RecursiveDescent)
    }

    /// Whether this segment can select more than one child of a container
    #[inline]
    #[must_use]
    pub fn is_multi_select(&self) -> bool {
        matches!(
            self,
            PathSegment::AnyChild
                | PathSegment::ArraySlice { .. }
                | PathSegment::MultiSelectNames(_)
                | PathSegment::MultiSelectIndices(_)
                | PathSegment::Filter(_)
        )
    }
}

/// Filter predicate AST
#[derive(Debug, Clone, PartialEq)]
pub enum FilterExpression {
    /// The candidate itself (`@`)
    Current,

    /// Member/element chain below the candidate (`@.a.b`, `@['a'][0]`)
    Property { path: Vec<PropertyStep> },

    /// Literal operand
    Literal { value: FilterValue },

    /// Binary comparison
    Comparison {
        left: Box<FilterExpression>,
        operator: ComparisonOp,
        right: Box<FilterExpression>,
    },

    /// `&&` / `||`
    Logical {
        left: Box<FilterExpression>,
        operator: LogicalOp,
        right: Box<FilterExpression>,
    },

    /// `!expr`
    Not { operand: Box<FilterExpression> },

    /// `target =~ /pattern/`
    Regex {
        target: Box<FilterExpression>,
        pattern: RegexPattern,
    },
}

/// One step of a property chain inside a filter
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PropertyStep {
    Name(String),
    Index(usize),
}

/// Filter literal values
#[derive(Debug, Clone, PartialEq)]
pub enum FilterValue {
    String(String),
    Integer(i64),
    Number(f64),
    Boolean(bool),
    Null,
}

impl FilterValue {
    /// Converts the literal into the value model filters are evaluated against
    #[must_use]
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            FilterValue::String(s) => serde_json::Value::String(s.clone()),
            FilterValue::Integer(i) => serde_json::Value::from(*i),
            FilterValue::Number(n) => serde_json::Number::from_f64(*n)
                .map_or(serde_json::Value::Null, serde_json::Value::Number),
            FilterValue::Boolean(b) => serde_json::Value::Bool(*b),
            FilterValue::Null => serde_json::Value::Null,
        }
    }
}

/// Comparison operators for filter expressions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComparisonOp {
    Equal,
    NotEqual,
    Less,
    LessEq,
    Greater,
    GreaterEq,
}

/// Logical operators for filter expressions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogicalOp {
    And,
    Or,
}

/// Regular expression compiled once at path compile time
#[derive(Debug, Clone)]
pub struct RegexPattern {
    source: String,
    case_insensitive: bool,
    regex: regex::Regex,
}

impl RegexPattern {
    pub(crate) fn new(source: String, case_insensitive: bool, regex: regex::Regex) -> Self {
        Self {
            source,
            case_insensitive,
            regex,
        }
    }

    /// Pattern text between the slashes
    #[inline]
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    #[inline]
    #[must_use]
    pub fn is_match(&self, haystack: &str) -> bool {
        self.regex.is_match(haystack)
    }
}

impl PartialEq for RegexPattern {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source && self.case_insensitive == other.case_insensitive
    }
}

fn write_name(f: &mut fmt::Formatter<'_>, name: &str) -> fmt::Result {
    f.write_str("'")?;
    for c in name.chars() {
        match c {
            '\'' => f.write_str("\\'")?,
            '\\' => f.write_str("\\\\")?,
            c => write!(f, "{c}")?,
        }
    }
    f.write_str("'")
}

fn write_joined<T>(
    f: &mut fmt::Formatter<'_>,
    items: impl IntoIterator<Item = T>,
    mut each: impl FnMut(&mut fmt::Formatter<'_>, T) -> fmt::Result,
) -> fmt::Result {
    for (i, item) in items.into_iter().enumerate() {
        if i > 0 {
            f.write_str(",")?;
        }
        each(f, item)?;
    }
    Ok(())
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathSegment::Root => f.write_str("$"),
            PathSegment::ChildName(name) => {
                f.write_str("[")?;
                write_name(f, name)?;
                f.write_str("]")
            }
            PathSegment::AnyChild => f.write_str("[*]"),
            PathSegment::ChildIndex(i) => write!(f, "[{i}]"),
            PathSegment::ArraySlice { start, end, step } => {
                write!(f, "[{start}:")?;
                if let Some(end) = end {
                    write!(f, "{end}")?;
                }
                if *step != 1 {
                    write!(f, ":{step}")?;
                }
                f.write_str("]")
            }
            PathSegment::RecursiveDescent => f.write_str(".."),
            PathSegment::MultiSelectNames(names) => {
                f.write_str("[")?;
                write_joined(f, names, |f, n| write_name(f, n))?;
                f.write_str("]")
            }
            PathSegment::MultiSelectIndices(indices) => {
                f.write_str("[")?;
                write_joined(f, indices, |f, i| write!(f, "{i}"))?;
                f.write_str("]")
            }
            PathSegment::Filter(expr) => write!(f, "[?({expr})]"),
        }
    }
}

impl fmt::Display for FilterExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterExpression::Current => f.write_str("@"),
            FilterExpression::Property { path } => {
                f.write_str("@")?;
                for step in path {
                    match step {
                        PropertyStep::Name(name) => {
                            f.write_str("[")?;
                            write_name(f, name)?;
                            f.write_str("]")?;
                        }
                        PropertyStep::Index(i) => write!(f, "[{i}]")?,
                    }
                }
                Ok(())
            }
            FilterExpression::Literal { value } => match value {
                FilterValue::String(s) => write_name(f, s),
                FilterValue::Integer(i) => write!(f, "{i}"),
                FilterValue::Number(n) => write!(f, "{n:?}"),
                FilterValue::Boolean(b) => write!(f, "{b}"),
                FilterValue::Null => f.write_str("null"),
            },
            FilterExpression::Comparison {
                left,
                operator,
                right,
            } => {
                let op = match operator {
                    ComparisonOp::Equal => "==",
                    ComparisonOp::NotEqual => "!=",
                    ComparisonOp::Less => "<",
                    ComparisonOp::LessEq => "<=",
                    ComparisonOp::Greater => ">",
                    ComparisonOp::GreaterEq => ">=",
                };
                write!(f, "{left} {op} {right}")
            }
            FilterExpression::Logical {
                left,
                operator,
                right,
            } => {
                let op = match operator {
                    LogicalOp::And => "&&",
                    LogicalOp::Or => "||",
                };
                write!(f, "({left} {op} {right})")
            }
            FilterExpression::Not { operand } => write!(f, "!({operand})"),
            FilterExpression::Regex { target, pattern } => {
                write!(f, "{target} =~ /{}/", pattern.source)?;
                if pattern.case_insensitive {
                    f.write_str("i")?;
                }
                Ok(())
            }
        }
    }
}

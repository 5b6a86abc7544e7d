//! Shared fixtures and helpers for engine integration tests

#![allow(dead_code)]

use jsurf_engine::filter::FilterEvaluator;
use jsurf_engine::path::{CompiledPath, PathSegment};
use jsurf_engine::{NonBlockingParser, ResumableParser, SerdeJsonProvider, SurfResult, SurfingConfigBuilder};
use serde_json::Value;

/// The classic bookstore document
pub const BOOKSTORE: &str = r#"{
    "store": {
        "book": [
            {
                "category": "reference",
                "author": "Nigel Rees",
                "title": "Sayings of the Century",
                "price": 8.95
            },
            {
                "category": "fiction",
                "author": "Evelyn Waugh",
                "title": "Sword of Honour",
                "price": 12.99
            },
            {
                "category": "fiction",
                "author": "Herman Melville",
                "title": "Moby Dick",
                "isbn": "0-553-21311-3",
                "price": 8.99
            },
            {
                "category": "fiction",
                "author": "J. R. R. Tolkien",
                "title": "The Lord of the Rings",
                "isbn": "0-395-19395-8",
                "price": 22.99
            }
        ],
        "bicycle": {
            "color": "red",
            "price": 19.95
        }
    },
    "expensive": 10
}"#;

/// Collect every match of `path` reading `json` in one go
pub fn collect(json: &str, path: &str) -> SurfResult<Vec<Value>> {
    let mut builder = SurfingConfigBuilder::new(SerdeJsonProvider);
    let binding = builder.collect_all(path)?;
    let mut parser = ResumableParser::new(json.as_bytes(), builder.build()?);
    parser.parse()?;
    Ok(parser.take_collected(binding))
}

/// Collect every match of `path`, feeding `json` in chunks of `chunk` bytes
pub fn collect_chunked(json: &str, path: &str, chunk: usize) -> SurfResult<Vec<Value>> {
    let mut builder = SurfingConfigBuilder::new(SerdeJsonProvider);
    let binding = builder.collect_all(path)?;
    let mut parser = NonBlockingParser::new(builder.build()?);
    for piece in json.as_bytes().chunks(chunk.max(1)) {
        parser.feed(piece)?;
    }
    parser.end_of_input()?;
    Ok(parser.take_collected(binding))
}

/// Whole-tree evaluation of `path`, in the order values complete while streaming
///
/// Only valid for paths whose filters, if any, are on the last segment.
pub fn reference(doc: &Value, path: &CompiledPath) -> Vec<Value> {
    let segments = path.segments();
    let mut out = Vec::new();
    let (cursors, matched) = if segments.len() == 1 {
        (Vec::new(), true)
    } else {
        (vec![1], false)
    };
    visit(doc, &cursors, matched, segments, &mut out);
    out
}

fn visit(node: &Value, cursors: &[usize], matched: bool, segments: &[PathSegment], out: &mut Vec<Value>) {
    if !cursors.is_empty() {
        let children: Vec<(ChildRef<'_>, &Value)> = match node {
            Value::Object(map) => map.iter().map(|(k, v)| (ChildRef::Field(k), v)).collect(),
            Value::Array(items) => items.iter().enumerate().map(|(i, v)| (ChildRef::Index(i), v)).collect(),
            _ => Vec::new(),
        };
        for (key, child) in children {
            let (next, child_matched) = step(segments, cursors, key, child);
            visit(child, &next, child_matched, segments, out);
        }
    }
    if matched {
        out.push(node.clone());
    }
}

#[derive(Clone, Copy)]
enum ChildRef<'a> {
    Field(&'a str),
    Index(usize),
}

fn step(segments: &[PathSegment], cursors: &[usize], key: ChildRef<'_>, child: &Value) -> (Vec<usize>, bool) {
    let mut next = Vec::new();
    let mut matched = false;
    let mut try_at = |at: usize, next: &mut Vec<usize>| {
        if selects(&segments[at], key, child) {
            if at + 1 == segments.len() {
                matched = true;
            } else if !next.contains(&(at + 1)) {
                next.push(at + 1);
            }
        }
    };
    for &cursor in cursors {
        if matches!(segments[cursor], PathSegment::RecursiveDescent) {
            if !next.contains(&cursor) {
                next.push(cursor);
            }
            try_at(cursor + 1, &mut next);
        } else {
            try_at(cursor, &mut next);
        }
    }
    (next, matched)
}

fn selects(segment: &PathSegment, key: ChildRef<'_>, child: &Value) -> bool {
    match (segment, key) {
        (PathSegment::ChildName(name), ChildRef::Field(field)) => name == field,
        (PathSegment::MultiSelectNames(names), ChildRef::Field(field)) => names.contains(field),
        (PathSegment::AnyChild, _) => true,
        (PathSegment::ChildIndex(i), ChildRef::Index(index)) => *i == index,
        (PathSegment::MultiSelectIndices(indices), ChildRef::Index(index)) => indices.contains(&index),
        (PathSegment::ArraySlice { start, end, step }, ChildRef::Index(index)) => {
            index >= *start && end.is_none_or(|end| index < end) && (index - start) % step == 0
        }
        (PathSegment::Filter(expr), _) => FilterEvaluator::evaluate_predicate(child, expr),
        _ => false,
    }
}

//! Matching behaviour of the surfing engine over whole documents

mod common;

use std::cell::RefCell;
use std::rc::Rc;

use common::{BOOKSTORE, collect, collect_chunked, reference};
use jsurf_engine::{CaptureMode, ResumableParser, SerdeJsonProvider, SurfError, SurfingConfigBuilder, compile};
use serde_json::{Value, json};

type Log = Rc<RefCell<Vec<String>>>;

fn log() -> Log {
    Rc::new(RefCell::new(Vec::new()))
}

fn run(builder: SurfingConfigBuilder<SerdeJsonProvider>, json: &str) -> Result<(), SurfError> {
    let mut parser = ResumableParser::new(json.as_bytes(), builder.build()?);
    parser.parse()
}

#[cfg(test)]
mod bookstore_tests {
    use super::*;

    #[test]
    fn test_authors() {
        let expected = json!(["Nigel Rees", "Evelyn Waugh", "Herman Melville", "J. R. R. Tolkien"]);
        let authors = collect(BOOKSTORE, "$.store.book[*].author").expect("query runs");
        assert_eq!(Value::Array(authors), expected);
        let authors = collect(BOOKSTORE, "$..author").expect("query runs");
        assert_eq!(Value::Array(authors), expected);
    }

    #[test]
    fn test_store_children() {
        let children = collect(BOOKSTORE, "$.store.*").expect("query runs");
        assert_eq!(children.len(), 2);
        assert!(children[0].is_array());
        assert_eq!(children[1], json!({"color": "red", "price": 19.95}));
    }

    #[test]
    fn test_prices_under_store() {
        let prices = collect(BOOKSTORE, "$.store..price").expect("query runs");
        assert_eq!(Value::Array(prices), json!([8.95, 12.99, 8.99, 22.99, 19.95]));
    }

    #[test]
    fn test_indexed_books() {
        let third = collect(BOOKSTORE, "$..book[2]").expect("query runs");
        assert_eq!(third.len(), 1);
        assert_eq!(third[0]["title"], "Moby Dick");

        let first_two = collect(BOOKSTORE, "$..book[0,1]").expect("query runs");
        assert_eq!(first_two.len(), 2);
        assert_eq!(first_two[0]["author"], "Nigel Rees");
        assert_eq!(first_two, collect(BOOKSTORE, "$..book[:2]").expect("query runs"));

        let odd = collect(BOOKSTORE, "$.store.book[1::2].title").expect("query runs");
        assert_eq!(Value::Array(odd), json!(["Sword of Honour", "The Lord of the Rings"]));
    }

    #[test]
    fn test_filters() {
        let with_isbn = collect(BOOKSTORE, "$..book[?(@.isbn)]").expect("query runs");
        assert_eq!(with_isbn.len(), 2);
        assert_eq!(with_isbn[0]["author"], "Herman Melville");

        let cheap = collect(BOOKSTORE, "$..book[?(@.price < 10)].title").expect("query runs");
        assert_eq!(Value::Array(cheap), json!(["Sayings of the Century", "Moby Dick"]));

        let fiction = collect(
            BOOKSTORE,
            "$.store.book[?(@.category == 'fiction' && @.price < 20)].title",
        )
        .expect("query runs");
        assert_eq!(Value::Array(fiction), json!(["Sword of Honour", "Moby Dick"]));

        let rees = collect(BOOKSTORE, "$..book[?(@.author =~ /.*REES/i)].title").expect("query runs");
        assert_eq!(Value::Array(rees), json!(["Sayings of the Century"]));
    }

    #[test]
    fn test_root_and_scalars() {
        let root = collect(BOOKSTORE, "$").expect("query runs");
        let parsed: Value = serde_json::from_str(BOOKSTORE).expect("fixture is valid");
        assert_eq!(root, vec![parsed]);
        assert_eq!(collect(BOOKSTORE, "$.expensive").expect("query runs"), vec![json!(10)]);
        assert_eq!(collect("42", "$").expect("query runs"), vec![json!(42)]);
        assert!(collect(BOOKSTORE, "$.missing").expect("query runs").is_empty());
    }

    #[test]
    fn test_matches_tree_evaluation() {
        let doc: Value = serde_json::from_str(BOOKSTORE).expect("fixture is valid");
        for expression in [
            "$..*",
            "$..book[*]",
            "$.store.book[*]",
            "$..[0]",
            "$..['price','color']",
            "$.store..*",
            "$..book[?(@.price > 10)]",
        ] {
            let path = compile(expression).expect("expression compiles");
            let expected = reference(&doc, &path);
            assert_eq!(collect(BOOKSTORE, expression).expect("query runs"), expected, "{expression}");
        }
    }

    #[test]
    fn test_chunked_feeding() {
        for chunk in 1..=17 {
            assert_eq!(
                collect_chunked(BOOKSTORE, "$..book[?(@.price < 10)].title", chunk).expect("query runs"),
                collect(BOOKSTORE, "$..book[?(@.price < 10)].title").expect("query runs"),
                "chunk size {chunk}"
            );
        }
    }
}

#[cfg(test)]
mod filter_tests {
    use super::*;

    #[test]
    fn test_existence_includes_null_members() {
        let found = collect(r#"[{"a": 1}, {"b": 2}, {"a": null}]"#, "$[?(@.a)]").expect("query runs");
        assert_eq!(found, vec![json!({"a": 1}), json!({"a": null})]);
    }

    #[test]
    fn test_missing_operand_is_false() {
        let found = collect(r#"[{"a": 1}, {"b": 2}, {"a": 2}]"#, "$[?(@.a != 1)]").expect("query runs");
        assert_eq!(found, vec![json!({"a": 2})]);
    }

    #[test]
    fn test_numeric_equality_across_representations() {
        let found = collect(r#"[1, 1.0, "1", true]"#, "$[?(@ == 1)]").expect("query runs");
        assert_eq!(found, vec![json!(1), json!(1.0)]);
    }

    #[test]
    fn test_scalar_candidates() {
        let found = collect(r#"{"a": [1, 3, 5]}"#, "$.a[?(@ > 2)]").expect("query runs");
        assert_eq!(found, vec![json!(3), json!(5)]);
    }

    #[test]
    fn test_nested_property() {
        let doc = r#"[{"a": {"b": "x"}}, {"a": {"b": "y"}}, {"a": 3}]"#;
        let found = collect(doc, "$[?(@.a.b == 'x')]").expect("query runs");
        assert_eq!(found, vec![json!({"a": {"b": "x"}})]);
    }

    #[test]
    fn test_guard_decided_after_member() {
        let doc = r#"{"items": [{"name": "n1", "ok": true}, {"name": "n2", "ok": false}, {"ok": true, "name": "n3"}]}"#;
        let found = collect(doc, "$.items[?(@.ok == true)].name").expect("query runs");
        assert_eq!(found, vec![json!("n1"), json!("n3")]);
    }

    #[test]
    fn test_negation_and_or() {
        let doc = r#"[{"a": 1}, {"b": 1}, {"c": 1}]"#;
        let found = collect(doc, "$[?(!@.a && !@.b || @.a)]").expect("query runs");
        assert_eq!(found, vec![json!({"a": 1}), json!({"c": 1})]);
    }

    #[test]
    fn test_slice_step() {
        let found = collect("[0, 1, 2, 3, 4, 5]", "$[1:5:2]").expect("query runs");
        assert_eq!(found, vec![json!(1), json!(3)]);
    }
}

#[cfg(test)]
mod listener_tests {
    use super::*;

    #[test]
    fn test_locations() {
        let seen = log();
        let sink = Rc::clone(&seen);
        let mut builder = SurfingConfigBuilder::new(SerdeJsonProvider);
        builder
            .bind("$..price", move |_value, ctx| {
                assert_eq!(ctx.field_name(), Some("price"));
                assert_eq!(ctx.array_index(), None);
                assert_eq!(ctx.compiled_path().expression(), "$..price");
                sink.borrow_mut().push(ctx.current_path().to_string());
                Ok(())
            })
            .expect("expression compiles");
        run(builder, BOOKSTORE).expect("document parses");

        assert_eq!(
            *seen.borrow(),
            vec![
                "$['store']['book'][0]['price']",
                "$['store']['book'][1]['price']",
                "$['store']['book'][2]['price']",
                "$['store']['book'][3]['price']",
                "$['store']['bicycle']['price']",
            ]
        );
    }

    #[test]
    fn test_array_index_context() {
        let seen = log();
        let sink = Rc::clone(&seen);
        let mut builder = SurfingConfigBuilder::new(SerdeJsonProvider);
        builder
            .bind("$.store.book[*]", move |_value, ctx| {
                assert_eq!(ctx.field_name(), None);
                sink.borrow_mut().push(format!("{:?}", ctx.array_index()));
                Ok(())
            })
            .expect("expression compiles");
        run(builder, BOOKSTORE).expect("document parses");
        assert_eq!(*seen.borrow(), vec!["Some(0)", "Some(1)", "Some(2)", "Some(3)"]);
    }

    #[test]
    fn test_binding_order_at_shared_node() {
        let seen = log();
        let first = Rc::clone(&seen);
        let second = Rc::clone(&seen);
        let mut builder = SurfingConfigBuilder::new(SerdeJsonProvider);
        builder
            .bind("$.store.book[0].author", move |value, _ctx| {
                first.borrow_mut().push(format!("a:{}", value.as_str().unwrap_or_default()));
                Ok(())
            })
            .expect("expression compiles");
        builder
            .bind("$..author", move |value, _ctx| {
                second.borrow_mut().push(format!("b:{}", value.as_str().unwrap_or_default()));
                Ok(())
            })
            .expect("expression compiles");
        run(builder, BOOKSTORE).expect("document parses");

        assert_eq!(
            *seen.borrow(),
            vec![
                "a:Nigel Rees",
                "b:Nigel Rees",
                "b:Evelyn Waugh",
                "b:Herman Melville",
                "b:J. R. R. Tolkien",
            ]
        );
    }

    #[test]
    fn test_identical_paths_each_receive_values() {
        let mut builder = SurfingConfigBuilder::new(SerdeJsonProvider);
        let first = builder.collect_all("$..author").expect("expression compiles");
        let second = builder.collect_all("$..['author']").expect("expression compiles");
        let mut parser = ResumableParser::new(BOOKSTORE.as_bytes(), builder.build().expect("valid options"));
        parser.parse().expect("document parses");
        assert_eq!(parser.collected(first).len(), 4);
        assert_eq!(parser.collected(first), parser.collected(second));
    }

    #[test]
    fn test_transient_store() {
        let seen = log();
        let sink = Rc::clone(&seen);
        let mut builder = SurfingConfigBuilder::new(SerdeJsonProvider);
        builder
            .bind("$.expensive", |value, ctx| {
                ctx.save("limit", value.clone());
                Ok(())
            })
            .expect("expression compiles");
        builder
            .bind("$.items[*]", move |value, ctx| {
                let limit = ctx.load("limit").and_then(Value::as_f64).unwrap_or(f64::MAX);
                if value.as_f64().is_some_and(|v| v > limit) {
                    sink.borrow_mut().push(value.to_string());
                }
                Ok(())
            })
            .expect("expression compiles");
        run(builder, r#"{"expensive": 10, "items": [5, 15, 25]}"#).expect("document parses");
        assert_eq!(*seen.borrow(), vec!["15", "25"]);
    }

    #[test]
    fn test_skip_children() {
        let seen = log();
        let sink = Rc::clone(&seen);
        let mut builder = SurfingConfigBuilder::new(SerdeJsonProvider);
        let books = builder.collect_all("$.store.book").expect("expression compiles");
        builder
            .bind("$.store.book[*].category", move |value, ctx| {
                sink.borrow_mut().push(value.to_string());
                ctx.skip_children();
                Ok(())
            })
            .expect("expression compiles");
        let titles = builder.collect_all("$.store.book[*].title").expect("expression compiles");

        let mut parser = ResumableParser::new(BOOKSTORE.as_bytes(), builder.build().expect("valid options"));
        parser.parse().expect("document parses");

        assert_eq!(seen.borrow().len(), 4);
        assert!(parser.collected(titles).is_empty());
        let books = parser.collected(books);
        assert_eq!(books.len(), 1);
        assert_eq!(books[0][3]["title"], "The Lord of the Rings");
    }

    #[test]
    fn test_skip_children_keeps_filter_candidates_whole() {
        let mut builder = SurfingConfigBuilder::new(SerdeJsonProvider);
        builder
            .bind("$.store.book[*].category", |_value, ctx| {
                ctx.skip_children();
                Ok(())
            })
            .expect("expression compiles");
        let catalogued = builder.collect_all("$.store.book[?(@.isbn)]").expect("expression compiles");

        let mut parser = ResumableParser::new(BOOKSTORE.as_bytes(), builder.build().expect("valid options"));
        parser.parse().expect("document parses");

        let books = parser.collected(catalogued);
        assert_eq!(books.len(), 2);
        assert_eq!(books[0]["title"], "Moby Dick");
        assert_eq!(books[1]["isbn"], "0-395-19395-8");
    }

    #[test]
    fn test_listener_error_terminates_session() {
        let mut builder = SurfingConfigBuilder::new(SerdeJsonProvider);
        builder
            .bind("$..book[1]", |_value, _ctx| Err(anyhow::anyhow!("rejected")))
            .expect("expression compiles");
        let mut parser = ResumableParser::new(BOOKSTORE.as_bytes(), builder.build().expect("valid options"));

        match parser.parse() {
            Err(SurfError::Listener { path, source }) => {
                assert_eq!(path, "$..book[1]");
                assert_eq!(source.to_string(), "rejected");
            }
            other => panic!("expected listener error, got {other:?}"),
        }
        assert!(parser.is_finished());
        assert!(matches!(parser.parse(), Err(SurfError::Terminated)));
        assert!(!parser.resume().expect("resume is a no-op"));
    }

    #[test]
    fn test_typed_binding() {
        #[derive(serde::Deserialize)]
        struct Bicycle {
            color: String,
            price: f64,
        }

        let seen = log();
        let sink = Rc::clone(&seen);
        let mut builder = SurfingConfigBuilder::new(SerdeJsonProvider);
        builder
            .bind_as("$.store.bicycle", move |bike: Bicycle, _ctx| {
                sink.borrow_mut().push(format!("{} {}", bike.color, bike.price));
                Ok(())
            })
            .expect("expression compiles");
        run(builder, BOOKSTORE).expect("document parses");
        assert_eq!(*seen.borrow(), vec!["red 19.95"]);

        let mut builder = SurfingConfigBuilder::new(SerdeJsonProvider);
        builder
            .bind_as("$.store.book[0]", |_bike: Bicycle, _ctx| Ok(()))
            .expect("expression compiles");
        assert!(matches!(run(builder, BOOKSTORE), Err(SurfError::Listener { .. })));
    }
}

#[cfg(test)]
mod option_tests {
    use super::*;

    #[test]
    fn test_skip_overlapped_path() {
        let mut builder = SurfingConfigBuilder::new(SerdeJsonProvider);
        builder.skip_overlapped_path(true);
        let all = builder.collect_all("$..*").expect("expression compiles");
        let mut parser = ResumableParser::new(BOOKSTORE.as_bytes(), builder.build().expect("valid options"));
        parser.parse().expect("document parses");

        let top = parser.collected(all);
        assert_eq!(top.len(), 2);
        assert!(top[0].is_object());
        assert_eq!(top[1], json!(10));
    }

    #[test]
    fn test_overlapping_matches_without_skip() {
        let mut builder = SurfingConfigBuilder::new(SerdeJsonProvider);
        let books = builder.collect_all("$..book[*]").expect("expression compiles");
        let authors = builder.collect_all("$..author").expect("expression compiles");
        let mut parser = ResumableParser::new(BOOKSTORE.as_bytes(), builder.build().expect("valid options"));
        parser.parse().expect("document parses");
        assert_eq!(parser.collected(books).len(), 4);
        assert_eq!(parser.collected(authors).len(), 4);
    }

    #[test]
    fn test_max_depth() {
        let doc = r#"{"a": {"b": {"c": 1}}}"#;
        let mut builder = SurfingConfigBuilder::new(SerdeJsonProvider);
        builder.max_depth(2);
        assert!(matches!(run(builder, doc), Err(SurfError::Protocol { offset: 12, .. })));

        let mut builder = SurfingConfigBuilder::new(SerdeJsonProvider);
        builder.max_depth(3);
        run(builder, doc).expect("within depth limit");
    }

    #[test]
    fn test_collect_one_keeps_first() {
        let mut builder = SurfingConfigBuilder::new(SerdeJsonProvider);
        let first = builder.collect_one("$..price").expect("expression compiles");
        let mut parser = ResumableParser::new(BOOKSTORE.as_bytes(), builder.build().expect("valid options"));
        parser.parse().expect("document parses");
        assert_eq!(parser.collected(first), [json!(8.95)]);
        assert!(parser.is_finished());
    }

    #[test]
    fn test_collect_path_modes() {
        let mut builder = SurfingConfigBuilder::new(SerdeJsonProvider);
        let path = compile("$.store.book[*].price").expect("expression compiles");
        let one = builder.collect_path(path.clone(), CaptureMode::CollectOne);
        let all = builder.collect_path(path, CaptureMode::CollectAll);
        let mut parser = ResumableParser::new(BOOKSTORE.as_bytes(), builder.build().expect("valid options"));
        parser.parse().expect("document parses");
        assert_eq!(parser.collected(one).len(), 1);
        assert_eq!(parser.take_collected(all).len(), 4);
        assert!(parser.collected(all).is_empty());
    }

    #[test]
    fn test_invalid_options_rejected() {
        let mut builder = SurfingConfigBuilder::new(SerdeJsonProvider);
        builder.read_buffer_size(0);
        assert!(matches!(builder.build(), Err(SurfError::Config(_))));

        let mut builder = SurfingConfigBuilder::new(SerdeJsonProvider);
        builder.max_depth(0);
        assert!(matches!(builder.build(), Err(SurfError::Config(_))));
    }

    #[test]
    fn test_stats() {
        let mut builder = SurfingConfigBuilder::new(SerdeJsonProvider);
        builder.bind("$..author", |_value, _ctx| Ok(())).expect("expression compiles");
        let mut parser = ResumableParser::new(BOOKSTORE.as_bytes(), builder.build().expect("valid options"));
        parser.parse().expect("document parses");
        let stats = parser.stats();
        assert_eq!(stats.matches_delivered, 4);
        assert_eq!(stats.bytes_processed, BOOKSTORE.len() as u64);
        assert_eq!(stats.max_depth, 4);
    }
}

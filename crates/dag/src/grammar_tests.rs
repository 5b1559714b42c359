// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use proptest::prelude::*;

use super::*;

fn date_counter() -> Grammar {
    Grammar(vec!["date".to_string(), "counter".to_string()])
}

#[test]
fn parses_underscore_delimited_fields() {
    let g = date_counter();
    let fields = g.parse("app1", "20140601_1").unwrap();
    assert_eq!(fields.get("date").unwrap(), "20140601");
    assert_eq!(fields.get("counter").unwrap(), "1");
}

#[test]
fn rejects_wrong_field_count() {
    let g = date_counter();
    assert!(g.parse("app1", "20140601").is_err());
}

#[test]
fn renders_back_to_the_same_string() {
    let g = date_counter();
    let fields = g.parse("app1", "20140601_1").unwrap();
    assert_eq!(g.render(&fields).unwrap(), "20140601_1");
}

#[test]
fn empty_grammar_is_one_opaque_field() {
    let g = Grammar::default();
    let fields = g.parse("app1", "anything_goes").unwrap();
    assert_eq!(fields.get("job_id").unwrap(), "anything_goes");
    assert_eq!(g.render(&fields).unwrap(), "anything_goes");
}

#[test]
fn backbone_keeps_shared_field_names_in_self_order() {
    let wide = Grammar(vec!["date".into(), "hour".into(), "counter".into()]);
    let narrow = Grammar(vec!["counter".into(), "date".into()]);
    assert_eq!(wide.backbone_with(&narrow), vec!["date".to_string(), "counter".to_string()]);
}

#[test]
fn render_fails_when_a_field_is_missing() {
    let g = date_counter();
    let mut fields = Fields::new();
    fields.insert("date".to_string(), "20140601".to_string());
    assert!(g.render(&fields).is_none());
}

/// Grammar/job-id pairs across a few shapes: well-formed ids of varying
/// grammar width parse, and ids with too few/many `_`-delimited parts
/// are rejected (invariant 5: the engine never produces one, but must
/// recognize one that arrived by external means).
#[yare::parameterized(
    two_field_grammar_matches = { &["date", "counter"], "20140601_1", true },
    three_field_grammar_matches = { &["date", "hour", "counter"], "20140601_04_1", true },
    one_field_grammar_always_matches = { &["job_id"], "anything_with_underscores", true },
    too_few_parts_for_two_fields = { &["date", "counter"], "20140601", false },
    too_few_parts_for_three_fields = { &["date", "hour", "counter"], "20140601_04", false },
)]
fn grammar_parse_matches_field_count(grammar_fields: &[&str], job_id: &str, expect_ok: bool) {
    let g = Grammar(grammar_fields.iter().map(|s| s.to_string()).collect());
    assert_eq!(g.parse("app1", job_id).is_ok(), expect_ok);
}

/// Underscore-free field values round-trip: rendering then re-parsing
/// recovers the exact fields a grammar of any width was given.
fn field_value_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9]{1,8}".prop_map(String::from)
}

proptest! {
    #[test]
    fn parse_of_render_recovers_the_original_fields(
        field_count in 1usize..5,
        values in prop::collection::vec(field_value_strategy(), 1..5),
    ) {
        let field_count = field_count.min(values.len()).max(1);
        let names: Vec<String> = (0..field_count).map(|i| format!("f{i}")).collect();
        let grammar = Grammar(names.clone());
        let fields: Fields = names.iter().cloned().zip(values.into_iter().take(field_count)).collect();

        let rendered = grammar.render(&fields).expect("every named field is present");
        let reparsed = grammar.parse("app1", &rendered).expect("underscore-free values always split cleanly");
        prop_assert_eq!(reparsed, fields);
    }
}

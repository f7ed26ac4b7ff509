//! Integration tests: `additionalProperties` enforcement through the public
//! [`Validator`] API, one section per enforcement policy.

use propguard_schema::{
    EnforcementPolicy, ErrorKind, NameStrategy, RemoveAdditional, Validator, ValidatorOptions,
};
use serde_json::{json, Map, Value};

fn options(mode: RemoveAdditional, all_errors: bool) -> ValidatorOptions {
    ValidatorOptions::default()
        .with_remove_additional(mode)
        .with_all_errors(all_errors)
}

fn additional_keys(v: &Validator, doc: &mut Value) -> Vec<String> {
    match v.validate(doc) {
        Ok(()) => Vec::new(),
        Err(errors) => errors
            .additional_keys()
            .into_iter()
            .map(str::to_string)
            .collect(),
    }
}

// ---------------------------------------------------------------------------
// RejectAll
// ---------------------------------------------------------------------------

#[test]
fn test_false_without_siblings_collect_all_reports_every_key() {
    let v = Validator::with_options(
        &json!({"additionalProperties": false}),
        options(RemoveAdditional::None, true),
    )
    .unwrap();
    let mut doc = json!({"k1": 1, "k2": "two", "k3": null, "k4": []});
    let mut keys = additional_keys(&v, &mut doc);
    keys.sort();
    assert_eq!(keys, vec!["k1", "k2", "k3", "k4"]);
}

#[test]
fn test_false_without_siblings_fail_fast_reports_first_key_only() {
    let v = Validator::new(&json!({"additionalProperties": false})).unwrap();
    let mut doc = json!({"k1": 1, "k2": 2, "k3": 3});
    let first = doc.as_object().unwrap().keys().next().cloned().unwrap();
    assert_eq!(additional_keys(&v, &mut doc), vec![first]);
}

#[test]
fn test_declared_property_scenario() {
    let v = Validator::new(&json!({"properties": {"a": {}}, "additionalProperties": false})).unwrap();

    let mut doc = json!({"a": 1, "b": 2});
    let errors = v.validate(&mut doc).unwrap_err();
    assert_eq!(errors.len(), 1);
    assert_eq!(
        errors.errors()[0].kind,
        ErrorKind::AdditionalProperty { key: "b".into() }
    );
    assert_eq!(errors.errors()[0].instance_path.to_string(), "");
    assert_eq!(errors.errors()[0].schema_path, "/additionalProperties");

    let mut ok = json!({"a": 1});
    assert!(v.validate(&mut ok).is_ok());
}

#[test]
fn test_empty_object_is_valid() {
    let v = Validator::new(&json!({"additionalProperties": false})).unwrap();
    assert!(v.validate(&mut json!({})).is_ok());
}

#[test]
fn test_non_object_instances_are_ignored() {
    let v = Validator::new(&json!({"additionalProperties": false})).unwrap();
    for mut doc in [json!(1), json!("s"), json!([1, 2]), json!(null)] {
        assert!(v.validate(&mut doc).is_ok(), "{doc} should be ignored");
    }
}

#[test]
fn test_nested_object_paths() {
    let v = Validator::new(&json!({
        "properties": {
            "config": {"properties": {"port": {}}, "additionalProperties": false}
        }
    }))
    .unwrap();
    let mut doc = json!({"config": {"port": 80, "debug": true}, "other": 1});
    let errors = v.validate(&mut doc).unwrap_err();
    let e = &errors.errors()[0];
    assert_eq!(e.instance_path.to_string(), "/config");
    assert_eq!(e.schema_path, "/properties/config/additionalProperties");
    assert_eq!(e.kind, ErrorKind::AdditionalProperty { key: "debug".into() });
}

#[test]
fn test_large_property_set_uses_lookup_and_agrees() {
    let props: Map<String, Value> = (0..20).map(|i| (format!("field{i}"), json!({}))).collect();
    let schema = json!({"properties": props, "additionalProperties": false});

    let lookup = Validator::new(&schema).unwrap();
    let branches = Validator::with_options(
        &schema,
        ValidatorOptions::default().with_property_lookup_threshold(usize::MAX),
    )
    .unwrap();
    assert_eq!(lookup.additional_properties()[0].name_strategy, NameStrategy::Lookup);
    assert_eq!(branches.additional_properties()[0].name_strategy, NameStrategy::Branches);

    for doc in [
        json!({"field0": 1, "field19": 2}),
        json!({"field0": 1, "field20": 2}),
        json!({"field": 1}),
    ] {
        assert_eq!(
            lookup.is_valid(&mut doc.clone()),
            branches.is_valid(&mut doc.clone()),
            "strategies disagree on {doc}"
        );
    }
}

#[test]
fn test_digit_pattern_matches_ascii_digits_only() {
    let v = Validator::with_options(
        &json!({"patternProperties": {"^\\d+$": {}}, "additionalProperties": false}),
        options(RemoveAdditional::None, true),
    )
    .unwrap();
    assert!(v.validate(&mut json!({"12": 1})).is_ok());
    let mut doc = json!({"12": 1, "١٢": 2});
    assert_eq!(additional_keys(&v, &mut doc), vec!["١٢"]);
}

// ---------------------------------------------------------------------------
// StripAll
// ---------------------------------------------------------------------------

#[test]
fn test_strip_all_scenario() {
    let v = Validator::with_options(
        &json!({"properties": {"a": {}}, "additionalProperties": false}),
        options(RemoveAdditional::All, false),
    )
    .unwrap();
    let mut doc = json!({"a": 1, "b": 2});
    assert!(v.validate(&mut doc).is_ok());
    assert_eq!(doc, json!({"a": 1}));
}

#[test]
fn test_strip_all_ignores_subschema_validity() {
    let v = Validator::with_options(
        &json!({"properties": {"a": {}}, "additionalProperties": {"type": "number"}}),
        options(RemoveAdditional::All, true),
    )
    .unwrap();
    let mut doc = json!({"a": "kept", "n": 1, "s": "x"});
    assert!(v.validate(&mut doc).is_ok());
    assert_eq!(doc, json!({"a": "kept"}));
}

#[test]
fn test_strip_all_applies_even_when_keyword_is_true() {
    let v = Validator::with_options(
        &json!({"patternProperties": {"^meta_": {}}, "additionalProperties": true}),
        options(RemoveAdditional::All, false),
    )
    .unwrap();
    let mut doc = json!({"meta_id": 1, "payload": 2});
    assert!(v.validate(&mut doc).is_ok());
    assert_eq!(doc, json!({"meta_id": 1}));
}

#[test]
fn test_boolean_mode_strips_only_where_false() {
    let schema = json!({
        "properties": {
            "closed": {"properties": {"x": {}}, "additionalProperties": false},
            "typed": {"additionalProperties": {"type": "number"}}
        }
    });
    let v = Validator::with_options(&schema, options(RemoveAdditional::Boolean, true)).unwrap();
    let mut doc = json!({"closed": {"x": 1, "y": 2}, "typed": {"n": "not a number"}});
    let errors = v.validate(&mut doc).unwrap_err();
    assert_eq!(doc["closed"], json!({"x": 1}));
    assert_eq!(doc["typed"], json!({"n": "not a number"}));
    assert_eq!(errors.len(), 1);
    assert_eq!(errors.errors()[0].instance_path.to_string(), "/typed");
}

// ---------------------------------------------------------------------------
// RejectUnlessSchemaValid
// ---------------------------------------------------------------------------

#[test]
fn test_pattern_and_schema_scenario() {
    let v = Validator::new(&json!({
        "patternProperties": {"^x": {}},
        "additionalProperties": {"type": "number"}
    }))
    .unwrap();
    let mut doc = json!({"x1": "s", "y": "s"});
    let errors = v.validate(&mut doc).unwrap_err();
    assert_eq!(errors.len(), 1);
    let e = &errors.errors()[0];
    assert_eq!(e.kind, ErrorKind::AdditionalProperty { key: "y".into() });
    assert_eq!(e.causes.len(), 1);
    assert_eq!(e.causes[0].instance_path.to_string(), "/y");
    assert_eq!(doc, json!({"x1": "s", "y": "s"}));
}

#[test]
fn test_fail_fast_halts_at_first_invalid_value() {
    // Boolean mode: the inner `false` strips, the outer subschema rejects.
    // Keys run a, b, c; b fails, so c is never examined and keeps its junk.
    let schema = json!({
        "additionalProperties": {
            "type": "object",
            "additionalProperties": false
        }
    });
    let v = Validator::with_options(&schema, options(RemoveAdditional::Boolean, false)).unwrap();
    assert_eq!(
        v.additional_properties()[0].policy,
        EnforcementPolicy::RejectUnlessSchemaValid
    );
    let mut doc = json!({"a": {"junk": 1}, "b": "not an object", "c": {"junk": 1}});
    let errors = v.validate(&mut doc).unwrap_err();
    assert_eq!(errors.additional_keys(), vec!["b"]);
    assert_eq!(doc["a"], json!({}), "key before the failure was processed");
    assert_eq!(doc["c"], json!({"junk": 1}), "key after the failure was not examined");
}

#[test]
fn test_collect_all_reports_each_invalid_value_once() {
    let v = Validator::with_options(
        &json!({
            "properties": {"id": {}},
            "additionalProperties": {"type": "string", "minLength": 3, "maxLength": 1}
        }),
        options(RemoveAdditional::None, true),
    )
    .unwrap();
    let original = json!({"id": 7, "bad1": 1, "ok": "abc", "bad2": false});
    let mut doc = original.clone();
    let errors = v.validate(&mut doc).unwrap_err();
    let mut keys = errors.additional_keys();
    keys.sort();
    // "ok" fails maxLength, so it is reported too.
    assert_eq!(keys, vec!["bad1", "bad2", "ok"]);
    assert_eq!(errors.len(), 3, "one error per failing key");
    assert_eq!(doc, original, "reject mode never mutates");
}

// ---------------------------------------------------------------------------
// StripFailingOnly
// ---------------------------------------------------------------------------

#[test]
fn test_strip_failing_removes_exactly_the_failing_keys() {
    for all_errors in [false, true] {
        let v = Validator::with_options(
            &json!({
                "properties": {"name": {"type": "string"}},
                "additionalProperties": {"type": "integer", "minimum": 0}
            }),
            options(RemoveAdditional::Failing, all_errors),
        )
        .unwrap();
        let mut doc = json!({"name": "n", "good": 3, "negative": -1, "text": "x", "zero": 0});
        assert!(v.validate(&mut doc).is_ok(), "no error may survive a strip");
        assert_eq!(doc, json!({"name": "n", "good": 3, "zero": 0}));
    }
}

#[test]
fn test_strip_failing_keeps_sibling_errors() {
    let v = Validator::with_options(
        &json!({
            "properties": {"name": {"type": "string"}},
            "additionalProperties": {"type": "number"}
        }),
        options(RemoveAdditional::Failing, true),
    )
    .unwrap();
    let mut doc = json!({"name": 5, "drop": "x"});
    let errors = v.validate(&mut doc).unwrap_err();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors.errors()[0].schema_path, "/properties/name/type");
    assert_eq!(doc, json!({"name": 5}));
}

#[test]
fn test_strip_failing_with_false_strips_everything_additional() {
    let v = Validator::with_options(
        &json!({"properties": {"a": {}}, "additionalProperties": false}),
        options(RemoveAdditional::Failing, false),
    )
    .unwrap();
    let mut doc = json!({"a": 1, "b": 2, "c": 3});
    assert!(v.validate(&mut doc).is_ok());
    assert_eq!(doc, json!({"a": 1}));
}

#[test]
fn test_strip_all_applies_without_the_keyword() {
    let v = Validator::with_options(
        &json!({
            "properties": {
                "a": {},
                "meta": {"patternProperties": {"^x-": {}}}
            }
        }),
        options(RemoveAdditional::All, false),
    )
    .unwrap();
    let mut doc = json!({"a": 1, "b": 2, "meta": {"x-id": 1, "other": 2}});
    assert!(v.validate(&mut doc).is_ok());
    assert_eq!(doc, json!({"a": 1, "meta": {"x-id": 1}}));

    let paths: Vec<String> = v
        .additional_properties()
        .into_iter()
        .map(|s| s.schema_path)
        .collect();
    assert_eq!(
        paths,
        vec![
            "/additionalProperties".to_string(),
            "/properties/meta/additionalProperties".to_string(),
        ]
    );
}

#[test]
fn test_missing_keyword_rejects_nothing_outside_strip_all() {
    let v = Validator::with_options(
        &json!({"properties": {"a": {}}}),
        options(RemoveAdditional::None, true),
    )
    .unwrap();
    assert!(v.additional_properties().is_empty());
    let mut doc = json!({"a": 1, "b": 2});
    assert!(v.validate(&mut doc).is_ok());
    assert_eq!(doc, json!({"a": 1, "b": 2}));
}

// ---------------------------------------------------------------------------
// Skip condition
// ---------------------------------------------------------------------------

#[test]
fn test_skip_condition_compiles_no_keyword() {
    for mode in [RemoveAdditional::None, RemoveAdditional::Boolean, RemoveAdditional::Failing] {
        for keyword in [json!(true), json!({}), json!({"title": "free-form"})] {
            let v = Validator::with_options(
                &json!({"properties": {"a": {}}, "additionalProperties": keyword}),
                options(mode, false),
            )
            .unwrap();
            assert!(v.additional_properties().is_empty());

            let original = json!({"a": 1, "b": {"deep": true}, "c": [1]});
            let mut doc = original.clone();
            assert!(v.validate(&mut doc).is_ok());
            assert_eq!(doc, original);
        }
    }
}

// ---------------------------------------------------------------------------
// Sharing
// ---------------------------------------------------------------------------

#[test]
fn test_one_validator_many_threads() {
    let v = Validator::with_options(
        &json!({"properties": {"keep": {}}, "additionalProperties": {"type": "number"}}),
        options(RemoveAdditional::Failing, false),
    )
    .unwrap();
    std::thread::scope(|scope| {
        for i in 0..8 {
            let v = &v;
            scope.spawn(move || {
                let mut doc = json!({"keep": i, "n": i, "s": format!("{i}")});
                assert!(v.validate(&mut doc).is_ok());
                assert_eq!(doc, json!({"keep": i, "n": i}));
            });
        }
    });
}

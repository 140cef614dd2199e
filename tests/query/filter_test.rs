//! Tests for the filter spec compiler.
//!
//! Filters arrive as untyped JSON mappings and compile into the typed
//! expression AST. These tests cover the operator families (comparison,
//! membership, boolean), nesting, and the validation errors with their
//! corrective messages.

use rill_client::query::{compile_filter, Condition, Expression, Operator, QueryError};
use serde_json::json;

// ============================================================================
// Comparison operators
// ============================================================================

#[test]
fn test_eq_compiles_to_field_value_pair() {
    let expr = compile_filter(&json!({
        "op": "eq",
        "field": "device_type",
        "value": "mobile",
    }))
    .unwrap();

    assert_eq!(
        expr,
        Expression::cond(Condition::new(
            Operator::Eq,
            vec![
                Expression::field("device_type"),
                Expression::value("mobile"),
            ],
        ))
    );
}

#[test]
fn test_comparison_accepts_numeric_values() {
    let expr = compile_filter(&json!({
        "op": "gt",
        "field": "clicks",
        "value": 100,
    }))
    .unwrap();

    assert_eq!(
        expr,
        Expression::cond(Condition::new(
            Operator::Gt,
            vec![Expression::field("clicks"), Expression::value(100)],
        ))
    );
}

#[test]
fn test_comparison_accepts_null_value() {
    let expr = compile_filter(&json!({
        "op": "neq",
        "field": "campaign_name",
        "value": null,
    }))
    .unwrap();

    assert_eq!(
        expr,
        Expression::cond(Condition::new(
            Operator::Neq,
            vec![
                Expression::field("campaign_name"),
                Expression::value(serde_json::Value::Null),
            ],
        ))
    );
}

#[test]
fn test_every_comparison_operator_parses() {
    for op in ["eq", "neq", "lt", "lte", "gt", "gte", "ilike", "nilike"] {
        let result = compile_filter(&json!({
            "op": op,
            "field": "x",
            "value": 1,
        }));
        assert!(result.is_ok(), "operator '{}' should compile: {:?}", op, result);
    }
}

// ============================================================================
// Membership operators
// ============================================================================

#[test]
fn test_in_compiles_to_field_and_list() {
    let expr = compile_filter(&json!({
        "op": "in",
        "field": "region",
        "values": ["US", "GB"],
    }))
    .unwrap();

    assert_eq!(
        expr,
        Expression::cond(Condition::new(
            Operator::In,
            vec![
                Expression::field("region"),
                Expression::value(json!(["US", "GB"])),
            ],
        ))
    );
}

#[test]
fn test_nin_accepts_empty_list() {
    let expr = compile_filter(&json!({
        "op": "nin",
        "field": "region",
        "values": [],
    }))
    .unwrap();

    assert_eq!(
        expr,
        Expression::cond(Condition::new(
            Operator::Nin,
            vec![Expression::field("region"), Expression::value(json!([]))],
        ))
    );
}

// ============================================================================
// Boolean operators and nesting
// ============================================================================

#[test]
fn test_and_nests_child_filters() {
    let expr = compile_filter(&json!({
        "op": "and",
        "conditions": [
            {"op": "eq", "field": "device_type", "value": "mobile"},
            {"op": "in", "field": "region", "values": ["US", "GB"]},
        ],
    }))
    .unwrap();

    let Expression::Cond { cond } = expr else {
        panic!("expected a condition expression");
    };
    assert_eq!(cond.op, Operator::And);
    assert_eq!(cond.exprs.len(), 2);
}

#[test]
fn test_boolean_operators_nest_recursively() {
    let expr = compile_filter(&json!({
        "op": "or",
        "conditions": [
            {
                "op": "and",
                "conditions": [
                    {"op": "eq", "field": "a", "value": 1},
                    {"op": "eq", "field": "b", "value": 2},
                ],
            },
            {"op": "gte", "field": "c", "value": 3},
        ],
    }))
    .unwrap();

    let Expression::Cond { cond } = expr else {
        panic!("expected a condition expression");
    };
    assert_eq!(cond.op, Operator::Or);

    let Expression::Cond { cond: inner } = &cond.exprs[0] else {
        panic!("expected a nested condition");
    };
    assert_eq!(inner.op, Operator::And);
    assert_eq!(inner.exprs.len(), 2);
}

#[test]
fn test_boolean_accepts_empty_conditions() {
    let expr = compile_filter(&json!({"op": "and", "conditions": []})).unwrap();

    assert_eq!(
        expr,
        Expression::cond(Condition::new(Operator::And, vec![]))
    );
}

#[test]
fn test_nested_error_propagates_from_child() {
    let err = compile_filter(&json!({
        "op": "and",
        "conditions": [
            {"op": "eq", "field": "a", "value": 1},
            {"op": "in", "field": "region", "value": ["US"]},
        ],
    }))
    .unwrap_err();

    assert_eq!(err, QueryError::MissingValues { op: Operator::In });
}

// ============================================================================
// Validation errors
// ============================================================================

#[test]
fn test_non_object_spec_is_rejected() {
    let err = compile_filter(&json!("eq")).unwrap_err();
    assert_eq!(err, QueryError::FilterNotObject);
    assert!(err.to_string().starts_with("Filter must be an object"));
}

#[test]
fn test_missing_op_key() {
    let err = compile_filter(&json!({"field": "x", "value": 1})).unwrap_err();
    assert_eq!(err, QueryError::MissingOperator);
    assert!(err.to_string().contains("Missing required key 'op'"));
}

#[test]
fn test_invalid_operator_lists_supported_set() {
    let err = compile_filter(&json!({
        "op": "between",
        "field": "x",
        "value": 1,
    }))
    .unwrap_err();

    assert_eq!(
        err.to_string(),
        "Invalid operator 'between'. Supported: eq, neq, lt, lte, gt, gte, in, nin, ilike, nilike, and, or"
    );
}

#[test]
fn test_non_string_operator_renders_as_json() {
    let err = compile_filter(&json!({"op": 42})).unwrap_err();
    assert_eq!(err, QueryError::InvalidOperator("42".to_string()));
}

#[test]
fn test_boolean_without_conditions() {
    let err = compile_filter(&json!({"op": "and"})).unwrap_err();
    assert_eq!(err, QueryError::MissingConditions { op: Operator::And });
    assert!(err
        .to_string()
        .contains("For 'and' operator, provide 'conditions'"));
}

#[test]
fn test_boolean_conditions_must_be_a_list() {
    let err = compile_filter(&json!({
        "op": "or",
        "conditions": {"op": "eq", "field": "x", "value": 1},
    }))
    .unwrap_err();

    assert_eq!(err, QueryError::ConditionsNotList { op: Operator::Or });
    assert_eq!(
        err.to_string(),
        "'conditions' must be a list for 'or' operator"
    );
}

#[test]
fn test_comparison_without_field() {
    let err = compile_filter(&json!({"op": "eq", "value": 1})).unwrap_err();
    assert_eq!(err, QueryError::MissingField { op: Operator::Eq });
    assert_eq!(err.to_string(), "Missing 'field' key for 'eq' operator");
}

#[test]
fn test_field_must_be_a_string() {
    let err = compile_filter(&json!({"op": "eq", "field": 7, "value": 1})).unwrap_err();
    assert_eq!(err, QueryError::FieldNotString { op: Operator::Eq });
    assert_eq!(err.to_string(), "'field' must be a string for 'eq' operator");
}

#[test]
fn test_membership_with_singular_value_spells_out_the_fix() {
    let err = compile_filter(&json!({
        "op": "in",
        "field": "region",
        "value": ["US", "GB"],
    }))
    .unwrap_err();

    assert_eq!(err, QueryError::MissingValues { op: Operator::In });
    assert_eq!(
        err.to_string(),
        "For 'in' operator, use 'values' (list) not 'value'. Example: {\"op\": \"in\", \"field\": \"region\", \"values\": [\"US\", \"GB\"]}"
    );
}

#[test]
fn test_membership_values_must_be_a_list() {
    let err = compile_filter(&json!({
        "op": "nin",
        "field": "region",
        "values": "US",
    }))
    .unwrap_err();

    assert_eq!(err, QueryError::ValuesNotList { op: Operator::Nin });
}

#[test]
fn test_comparison_without_value() {
    let err = compile_filter(&json!({"op": "gt", "field": "clicks"})).unwrap_err();
    assert_eq!(err, QueryError::MissingValue { op: Operator::Gt });
    assert!(err
        .to_string()
        .starts_with("Missing 'value' key for 'gt' operator"));
}

#[test]
fn test_extra_keys_are_ignored() {
    let result = compile_filter(&json!({
        "op": "eq",
        "field": "x",
        "value": 1,
        "comment": "left over from a copied example",
    }));
    assert!(result.is_ok());
}

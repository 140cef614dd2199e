//! Compiles untyped filter mappings into the typed expression AST.
//!
//! The input grammar is a nested JSON object. Every node carries an `op`;
//! boolean nodes (`and`/`or`) nest further filters under `conditions`;
//! membership nodes (`in`/`nin`) take `field` plus `values`; every other
//! operator takes `field` plus `value`.
//!
//! ```ignore
//! let expr = compile_filter(&json!({
//!     "op": "and",
//!     "conditions": [
//!         {"op": "eq", "field": "device_type", "value": "mobile"},
//!         {"op": "in", "field": "region", "values": ["US", "GB"]},
//!     ],
//! }))?;
//! ```

use serde_json::{Map, Value};

use super::ast::{Condition, Expression, Operator};
use super::display_value;
use super::error::QueryError;

/// Compile a filter mapping into an [`Expression`].
///
/// Unrecognized extra keys are ignored; missing or mistyped required keys
/// are errors.
pub fn compile_filter(spec: &Value) -> Result<Expression, QueryError> {
    let node = spec.as_object().ok_or(QueryError::FilterNotObject)?;

    let raw_op = node.get("op").ok_or(QueryError::MissingOperator)?;
    let op = raw_op
        .as_str()
        .and_then(Operator::parse)
        .ok_or_else(|| QueryError::InvalidOperator(display_value(raw_op)))?;

    if op.is_boolean() {
        compile_boolean(op, node)
    } else if op.is_membership() {
        compile_membership(op, node)
    } else {
        compile_comparison(op, node)
    }
}

fn compile_boolean(op: Operator, node: &Map<String, Value>) -> Result<Expression, QueryError> {
    let conditions = node
        .get("conditions")
        .ok_or(QueryError::MissingConditions { op })?
        .as_array()
        .ok_or(QueryError::ConditionsNotList { op })?;

    let exprs = conditions
        .iter()
        .map(compile_filter)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Expression::cond(Condition::new(op, exprs)))
}

fn compile_membership(op: Operator, node: &Map<String, Value>) -> Result<Expression, QueryError> {
    let field = require_field(op, node)?;
    let values = node.get("values").ok_or(QueryError::MissingValues { op })?;
    if !values.is_array() {
        return Err(QueryError::ValuesNotList { op });
    }

    Ok(Expression::cond(Condition::new(
        op,
        vec![Expression::field(field), Expression::value(values.clone())],
    )))
}

fn compile_comparison(op: Operator, node: &Map<String, Value>) -> Result<Expression, QueryError> {
    let field = require_field(op, node)?;
    let value = node.get("value").ok_or(QueryError::MissingValue { op })?;

    Ok(Expression::cond(Condition::new(
        op,
        vec![Expression::field(field), Expression::value(value.clone())],
    )))
}

fn require_field<'a>(op: Operator, node: &'a Map<String, Value>) -> Result<&'a str, QueryError> {
    node.get("field")
        .ok_or(QueryError::MissingField { op })?
        .as_str()
        .ok_or(QueryError::FieldNotString { op })
}

//! Core functions.
//!
//! `length`, `join`, `toUpperCase`, `toLowerCase` and `contains`, bound under a
//! caller-chosen prefix (`fn` by default).

use crate::runner::ds::error::ResolveError;
use crate::runner::ds::shared;
use crate::runner::ds::value::Value;
use crate::runner::eval::function::{FunctionMapper, NativeFunction};

/// Register the core functions with the mapper under `prefix`.
pub fn register_core_functions(mapper: &mut FunctionMapper, prefix: &str) {
    mapper.define_function(prefix, "", NativeFunction::native("length", Some(1), fn_length));
    mapper.define_function(prefix, "", NativeFunction::native("join", Some(2), fn_join));
    mapper.define_function(
        prefix,
        "",
        NativeFunction::native("toUpperCase", Some(1), fn_to_upper_case),
    );
    mapper.define_function(
        prefix,
        "",
        NativeFunction::native("toLowerCase", Some(1), fn_to_lower_case),
    );
    mapper.define_function(prefix, "", NativeFunction::native("contains", Some(2), fn_contains));
}

/// Get a string from a Value.
fn to_string(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

fn arg(args: &[Value], index: usize) -> Value {
    args.get(index).cloned().unwrap_or(Value::Null)
}

/// fn:length
fn fn_length(args: Vec<Value>) -> Result<Value, ResolveError> {
    let len = match arg(&args, 0) {
        Value::Null => 0,
        Value::List(l) => shared::read(&l).len(),
        Value::Array(a) => shared::read(&a).len(),
        Value::Map(m) => shared::read(&m).len(),
        other => to_string(&other).chars().count(),
    };
    Ok(Value::integer(len as i64))
}

/// fn:join
fn fn_join(args: Vec<Value>) -> Result<Value, ResolveError> {
    let separator = to_string(&arg(&args, 0));
    let items = match arg(&args, 1) {
        Value::Null => vec![],
        sequence => sequence.sequence_items().ok_or_else(|| {
            ResolveError::Invocation(format!(
                "join expects a list or array, got {}",
                sequence.value_type()
            ))
        })?,
    };
    let items = items.iter().map(to_string).collect::<Vec<_>>();
    Ok(Value::string(items.join(&separator)))
}

/// fn:toUpperCase
fn fn_to_upper_case(args: Vec<Value>) -> Result<Value, ResolveError> {
    Ok(Value::string(to_string(&arg(&args, 0)).to_uppercase()))
}

/// fn:toLowerCase
fn fn_to_lower_case(args: Vec<Value>) -> Result<Value, ResolveError> {
    Ok(Value::string(to_string(&arg(&args, 0)).to_lowercase()))
}

/// fn:contains
fn fn_contains(args: Vec<Value>) -> Result<Value, ResolveError> {
    let needle = arg(&args, 1);
    let found = match arg(&args, 0) {
        Value::List(l) => shared::read(&l).iter().any(|v| *v == needle),
        Value::Array(a) => shared::read(&a).iter().any(|v| *v == needle),
        Value::Map(m) => match needle.as_property_name() {
            Some(key) => shared::read(&m).contains_key(&key),
            None => false,
        },
        haystack => to_string(&haystack).contains(&to_string(&needle)),
    };
    Ok(Value::Boolean(found))
}

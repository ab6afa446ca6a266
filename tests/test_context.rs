extern crate pathres;

use pathres::runner::ds::class::ClassDef;
use pathres::runner::ds::color::Color;
use pathres::runner::ds::error::ResolveError;
use pathres::runner::ds::record::SimpleRecord;
use pathres::runner::ds::value::{Value, ValueType};
use pathres::runner::eval::context::EvaluationContext;
use pathres::runner::eval::function::NativeFunction;
use pathres::runner::eval::variables::ValueExpression;
use pathres::runner::plugin::class_resolver::ClassResolver;
use pathres::runner::plugin::config::ContextConfig;
use pathres::runner::plugin::implicit_resolver::ImplicitObjectResolver;
use pathres::runner::plugin::registry::ClassRegistry;
use pretty_assertions::assert_eq;

fn s(v: &str) -> Value {
    Value::string(v)
}

/// Context with both namespaces enabled.
fn namespaced() -> EvaluationContext {
    let config = ContextConfig::parse(
        r#"
        [resolvers]
        class_namespace = true
        color_namespace = true
        "#,
    )
    .unwrap();
    EvaluationContext::from_config(&config)
}

fn seeded() -> EvaluationContext {
    let ctx = EvaluationContext::new();
    ctx.define_bean(
        "order",
        Value::new_map(vec![
            ("id", Value::integer(42)),
            ("items", Value::new_list(vec![s("pen"), s("ink")])),
            ("sizes", Value::new_array(vec![Value::integer(1), Value::integer(2)])),
            (
                "customer",
                Value::new_record(
                    SimpleRecord::new("Customer")
                        .with_property("name", s("Ada"))
                        .with_read_only_property("since", Value::integer(1843)),
                ),
            ),
            ("nothing", Value::Null),
        ]),
    );
    ctx
}

// ── Path walking ─────────────────────────────────────────────────────

#[test]
fn test_walks_every_generic_resolver() {
    let ctx = seeded();
    assert_eq!(ctx.eval("order.id").unwrap(), Value::integer(42));
    assert_eq!(ctx.eval("order['items'][1]").unwrap(), s("ink"));
    assert_eq!(ctx.eval("order.sizes[0]").unwrap(), Value::integer(1));
    assert_eq!(ctx.eval("order.customer.name").unwrap(), s("Ada"));
    assert_eq!(ctx.eval("order.missing").unwrap(), Value::Null);
}

#[test]
fn test_dynamic_index() {
    let ctx = seeded();
    ctx.define_bean("i", Value::integer(1));
    ctx.define_bean("key", s("items"));
    assert_eq!(ctx.eval("order[key][i]").unwrap(), s("ink"));
}

#[test]
fn test_null_intermediate_reads_null() {
    let ctx = seeded();
    assert_eq!(ctx.eval("order.nothing.deeper.still").unwrap(), Value::Null);
    assert_eq!(ctx.eval("order.missing.deeper").unwrap(), Value::Null);
}

#[test]
fn test_unresolved_root_and_property() {
    let ctx = seeded();
    assert!(ctx.eval("unknown").unwrap_err().is_not_found());
    assert!(ctx.eval("order.id.digits").unwrap_err().is_not_found());
    assert!(ctx.eval("order.customer.age").unwrap_err().is_not_found());
}

#[test]
fn test_literals_evaluate_to_themselves() {
    let ctx = EvaluationContext::new();
    assert_eq!(ctx.eval("'text'").unwrap(), s("text"));
    assert_eq!(ctx.eval("2.5").unwrap(), Value::float(2.5));
    assert_eq!(ctx.eval("null").unwrap(), Value::Null);
}

#[test]
fn test_syntax_error() {
    let ctx = EvaluationContext::new();
    assert!(matches!(ctx.eval("order.").unwrap_err(), ResolveError::Syntax(_)));
}

// ── Writes ───────────────────────────────────────────────────────────

#[test]
fn test_writes_through_chain() {
    let ctx = seeded();
    ctx.set_value("order.id", Value::integer(7)).unwrap();
    ctx.set_value("order.items[0]", s("quill")).unwrap();
    ctx.set_value("order.customer.name", s("Grace")).unwrap();
    ctx.set_value("fresh", s("local")).unwrap();

    assert_eq!(ctx.eval("order.id").unwrap(), Value::integer(7));
    assert_eq!(ctx.eval("order.items[0]").unwrap(), s("quill"));
    assert_eq!(ctx.eval("order.customer.name").unwrap(), s("Grace"));
    assert_eq!(ctx.beans().get("fresh"), Some(s("local")));
}

#[test]
fn test_write_errors() {
    let ctx = seeded();
    assert!(ctx
        .set_value("order.customer.since", Value::integer(0))
        .unwrap_err()
        .is_not_writable());
    assert!(ctx
        .set_value("order.items[5]", Value::Null)
        .unwrap_err()
        .is_not_found());
    assert!(ctx
        .set_value("order.nothing.x", Value::Null)
        .unwrap_err()
        .is_not_found());
    assert!(ctx.set_value("'lit'", Value::Null).unwrap_err().is_not_writable());
    assert!(ctx
        .set_value("fn:length(order)", Value::Null)
        .unwrap_err()
        .is_not_writable());
}

#[test]
fn test_read_only_and_type_queries() {
    let ctx = seeded();
    assert_eq!(ctx.is_read_only("order.id").unwrap(), false);
    assert_eq!(ctx.is_read_only("order.customer.since").unwrap(), true);
    assert_eq!(ctx.is_read_only("anything").unwrap(), false);
    assert_eq!(ctx.is_read_only("'lit'").unwrap(), true);
    assert_eq!(ctx.get_type("order.items").unwrap(), ValueType::List);
    assert_eq!(ctx.get_type("order.missing").unwrap(), ValueType::Any);
    assert_eq!(
        ctx.get_type("order.customer").unwrap(),
        ValueType::Record("Customer".to_string())
    );
    assert_eq!(ctx.get_type("fn:length('abc')").unwrap(), ValueType::Number);
}

#[test]
fn test_read_only_collections() {
    let config = ContextConfig::parse("[resolvers]\nread_only_collections = true\n").unwrap();
    let ctx = EvaluationContext::from_config(&config);
    ctx.define_bean("m", Value::new_map(vec![("k", s("v"))]));
    assert_eq!(ctx.is_read_only("m.k").unwrap(), true);
    assert!(ctx.set_value("m.k", Value::Null).unwrap_err().is_not_writable());
    assert_eq!(ctx.eval("m.k").unwrap(), s("v"));
}

// ── Namespaces ───────────────────────────────────────────────────────

#[test]
fn test_class_namespace_end_to_end() {
    let ctx = namespaced();
    assert_eq!(
        ctx.eval("Class['java.lang.Math'].PI").unwrap(),
        Value::float(std::f64::consts::PI)
    );
    assert_eq!(ctx.get_type("Class").unwrap(), ValueType::ClassNamespace);
    assert_eq!(ctx.get_type("Class['java.lang.Math']").unwrap(), ValueType::Class);
    assert!(ctx.eval("Class['no.such.Clazz']").unwrap_err().is_not_found());
    assert!(ctx.eval("Class['java.lang.Math'].TAU").unwrap_err().is_not_found());
    assert!(ctx
        .set_value("Class['java.lang.Math'].PI", Value::integer(3))
        .unwrap_err()
        .is_not_writable());
}

#[test]
fn test_color_namespace_end_to_end() {
    let ctx = namespaced();
    assert_eq!(ctx.eval("Color.red").unwrap(), Value::Color(Color::RED));
    assert_eq!(ctx.eval("Color['DARK_GRAY']").unwrap(), Value::Color(Color::DARK_GRAY));
    assert!(ctx.eval("Color.chartreuse").unwrap_err().is_not_found());
    assert_eq!(ctx.is_read_only("Color.red").unwrap(), true);
}

#[test]
fn test_namespaces_off_by_default() {
    let ctx = EvaluationContext::new();
    assert!(ctx.eval("Class").unwrap_err().is_not_found());
    assert!(ctx.eval("Color.red").unwrap_err().is_not_found());
}

#[test]
fn test_local_first_shadows_namespace() {
    let ctx = namespaced();
    ctx.define_bean("Color", s("mine"));
    assert_eq!(ctx.eval("Color").unwrap(), s("mine"));
}

#[test]
fn test_local_last_gives_namespace_first_refusal() {
    let config = ContextConfig::parse(
        "[resolvers]\nlocal_variables = \"last\"\ncolor_namespace = true\n",
    )
    .unwrap();
    let ctx = EvaluationContext::from_config(&config);
    ctx.define_bean("Color", s("mine"));
    ctx.define_bean("other", s("still visible"));
    assert_eq!(ctx.eval("Color.red").unwrap(), Value::Color(Color::RED));
    assert_eq!(ctx.eval("other").unwrap(), s("still visible"));
}

#[test]
fn test_custom_resolver_with_own_classes() {
    let mut registry = ClassRegistry::new();
    registry.register_class(
        ClassDef::new("app.Limits")
            .with_static_field("max", Value::integer(10))
            .with_constant("MIN", Value::integer(0)),
    );
    let mut ctx = EvaluationContext::new();
    ctx.add_resolver(Box::new(ClassResolver::new(registry)));

    ctx.set_value("Class['app.Limits'].max", Value::integer(20)).unwrap();
    assert_eq!(ctx.eval("Class['app.Limits'].max").unwrap(), Value::integer(20));
    assert_eq!(ctx.is_read_only("Class['app.Limits'].max").unwrap(), false);
    assert_eq!(ctx.is_read_only("Class['app.Limits'].MIN").unwrap(), true);
}

#[test]
fn test_custom_resolvers_keep_registration_order() {
    let mut ctx = EvaluationContext::new();
    ctx.add_resolver(Box::new(ImplicitObjectResolver::new("x", s("first"))));
    ctx.add_resolver(Box::new(ImplicitObjectResolver::new("x", s("second"))));
    assert_eq!(ctx.eval("x").unwrap(), s("first"));
    assert_eq!(
        ctx.resolver().names(),
        vec!["local_variables", "x", "x", "map", "list", "array", "record"]
    );
}

// ── Variables ────────────────────────────────────────────────────────

#[test]
fn test_variables_take_precedence_over_chain() {
    let mut ctx = EvaluationContext::new();
    ctx.define_bean("v", s("bean"));
    ctx.set_variable("v", s("variable"));
    assert_eq!(ctx.eval("v").unwrap(), s("variable"));
}

#[test]
fn test_lexical_capture() {
    let mut ctx = EvaluationContext::new();
    ctx.define_bean("list", Value::new_list(vec![s("a"), s("b"), s("c")]));
    ctx.set_variable("idx", Value::integer(0));
    let compiled = ctx.compile("list[idx]").unwrap();

    ctx.set_variable("idx", Value::integer(2));
    assert_eq!(compiled.get_value(&ctx).unwrap(), s("a"));
    assert_eq!(ctx.eval("list[idx]").unwrap(), s("c"));

    ctx.bind_variable("idx", None);
    assert_eq!(compiled.get_value(&ctx).unwrap(), s("a"));
    assert!(ctx.eval("list[idx]").unwrap_err().is_not_found());
}

#[test]
fn test_local_variables_are_not_captured() {
    let ctx = EvaluationContext::new();
    ctx.define_bean("n", Value::integer(1));
    let compiled = ctx.compile("n").unwrap();
    ctx.define_bean("n", Value::integer(2));
    assert_eq!(compiled.get_value(&ctx).unwrap(), Value::integer(2));
}

#[test]
fn test_variable_bound_to_expression_delegates_writes() {
    let mut ctx = seeded();
    let target = ctx.create_value_expression("order.customer.name").unwrap();
    ctx.bind_variable("who", Some(target));

    assert_eq!(ctx.eval("who").unwrap(), s("Ada"));
    assert_eq!(ctx.is_read_only("who").unwrap(), false);
    ctx.set_value("who", s("Grace")).unwrap();
    assert_eq!(ctx.eval("order.customer.name").unwrap(), s("Grace"));
}

#[test]
fn test_variable_bound_to_literal_is_read_only() {
    let mut ctx = EvaluationContext::new();
    ctx.set_variable("k", Value::integer(1));
    assert_eq!(ctx.is_read_only("k").unwrap(), true);
    assert!(ctx.set_value("k", Value::integer(2)).unwrap_err().is_not_writable());
    assert_eq!(ctx.get_type("k").unwrap(), ValueType::Number);
}

#[test]
fn test_set_variable_returns_previous() {
    let mut ctx = EvaluationContext::new();
    assert!(ctx.set_variable("x", Value::integer(1)).is_none());
    match ctx.set_variable("x", Value::integer(2)) {
        Some(ValueExpression::Literal(v)) => assert_eq!(v, Value::integer(1)),
        other => panic!("unexpected previous binding {:?}", other),
    }
}

// ── Functions ────────────────────────────────────────────────────────

#[test]
fn test_core_functions() {
    let ctx = seeded();
    assert_eq!(ctx.eval("fn:length(order.items)").unwrap(), Value::integer(2));
    assert_eq!(ctx.eval("fn:length(123)").unwrap(), Value::integer(3));
    assert_eq!(ctx.eval("fn:join(', ', order.items)").unwrap(), s("pen, ink"));
    assert_eq!(ctx.eval("fn:toUpperCase(order.customer.name)").unwrap(), s("ADA"));
    assert_eq!(ctx.eval("fn:contains(order.items, 'ink')").unwrap(), Value::Boolean(true));
}

#[test]
fn test_list_assigned_into_itself() {
    let ctx = EvaluationContext::new();
    ctx.define_bean("l", Value::new_list(vec![Value::Null]));
    let list = ctx.eval("l").unwrap();
    ctx.set_value("l[0]", list.clone()).unwrap();

    assert_eq!(ctx.eval("l[0][0][0]").unwrap(), list);
    assert_eq!(ctx.eval("fn:join(',', l)").unwrap(), s("[[...]]"));
    assert_eq!(ctx.eval("fn:length(l)").unwrap(), Value::integer(1));
    assert_eq!(ctx.eval("fn:contains(l, l)").unwrap(), Value::Boolean(true));
}

#[test]
fn test_function_result_can_be_walked() {
    let mut ctx = EvaluationContext::new();
    ctx.define_function(
        "app",
        "",
        NativeFunction::native("config", Some(0), |_| {
            Ok(Value::new_map(vec![("depth", Value::integer(3))]))
        }),
    );
    assert_eq!(ctx.eval("app:config().depth").unwrap(), Value::integer(3));
}

#[test]
fn test_unknown_function_fails_at_compile_time() {
    let ctx = EvaluationContext::new();
    match ctx.compile("fn:nope(1)").unwrap_err() {
        ResolveError::FunctionNotFound { prefix, name } => {
            assert_eq!(prefix, "fn");
            assert_eq!(name, "nope");
        }
        other => panic!("unexpected error {:?}", other),
    }
}

#[test]
fn test_function_arity_mismatch() {
    let ctx = EvaluationContext::new();
    assert!(matches!(
        ctx.eval("fn:length(1, 2)").unwrap_err(),
        ResolveError::Invocation(_)
    ));
}

#[test]
fn test_functions_captured_at_compile_time() {
    let mut ctx = EvaluationContext::new();
    ctx.define_function("t", "v", NativeFunction::native("v", Some(0), |_| Ok(Value::integer(1))));
    let compiled = ctx.compile("t:v()").unwrap();
    ctx.define_function("t", "v", NativeFunction::native("v", Some(0), |_| Ok(Value::integer(2))));
    assert_eq!(compiled.get_value(&ctx).unwrap(), Value::integer(1));
    assert_eq!(ctx.eval("t:v()").unwrap(), Value::integer(2));
}

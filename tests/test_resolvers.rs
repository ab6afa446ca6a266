extern crate pathres;

use pathres::runner::ds::class::{ClassDef, DisabledClassLoader};
use pathres::runner::ds::color::Color;
use pathres::runner::ds::error::ResolveError;
use pathres::runner::ds::marker::MarkerKind;
use pathres::runner::ds::record::SimpleRecord;
use pathres::runner::ds::value::{Value, ValueType};
use pathres::runner::plugin::array_resolver::ArrayResolver;
use pathres::runner::plugin::class_resolver::ClassResolver;
use pathres::runner::plugin::color_resolver::ColorResolver;
use pathres::runner::plugin::implicit_resolver::ImplicitObjectResolver;
use pathres::runner::plugin::list_resolver::ListResolver;
use pathres::runner::plugin::local_resolver::{LocalVariableResolver, LocalVariableStore};
use pathres::runner::plugin::map_resolver::MapResolver;
use pathres::runner::plugin::record_resolver::RecordResolver;
use pathres::runner::plugin::registry::ClassRegistry;
use pathres::runner::plugin::resolver::Resolver;
use pretty_assertions::assert_eq;

fn s(v: &str) -> Value {
    Value::string(v)
}

/// Registry with one class holding a constant, a mutable static and an instance field.
fn sample_classes() -> ClassRegistry {
    let mut registry = ClassRegistry::new();
    registry.register_class(
        ClassDef::new("com.example.Settings")
            .with_constant("VERSION", Value::integer(3))
            .with_static_field("mode", s("fast"))
            .with_instance_field("owner", s("nobody")),
    );
    registry
}

fn marker_of(resolver: &dyn Resolver, root: &str) -> Value {
    resolver.get_value(None, &s(root)).unwrap().unwrap()
}

fn expect_not_found<T: std::fmt::Debug>(r: Option<Result<T, ResolveError>>) {
    match r {
        Some(Err(e)) => assert!(e.is_not_found(), "expected not found, got {:?}", e),
        other => panic!("expected a terminal not-found error, got {:?}", other),
    }
}

fn expect_not_writable<T: std::fmt::Debug>(r: Option<Result<T, ResolveError>>) {
    match r {
        Some(Err(e)) => assert!(e.is_not_writable(), "expected not writable, got {:?}", e),
        other => panic!("expected a terminal not-writable error, got {:?}", other),
    }
}

// ── Class namespace ──────────────────────────────────────────────────

#[test]
fn test_class_root_yields_marker() {
    let resolver = ClassResolver::new(sample_classes());
    let marker = marker_of(&resolver, "Class");
    assert!(marker.is_marker_of(MarkerKind::ClassNamespace));
    assert_eq!(
        resolver.get_type(None, &s("Class")),
        Some(Ok(ValueType::ClassNamespace))
    );
    assert_eq!(resolver.is_read_only(None, &s("Class")), Some(Ok(true)));
    expect_not_writable(resolver.set_value(None, &s("Class"), Value::Null));
}

#[test]
fn test_class_resolver_ignores_foreign_requests() {
    let resolver = ClassResolver::new(sample_classes());
    assert_eq!(resolver.get_value(None, &s("Klass")), None);
    assert_eq!(resolver.get_value(Some(&s("Class")), &s("x")), None);
    let map = Value::new_map(vec![("Class", Value::Null)]);
    assert_eq!(resolver.get_value(Some(&map), &s("Class")), None);
    assert_eq!(resolver.set_value(None, &s("other"), Value::Null), None);
}

#[test]
fn test_class_resolver_ignores_color_marker() {
    let resolver = ClassResolver::new(sample_classes());
    let color_marker = marker_of(&ColorResolver::new(), "Color");
    assert_eq!(resolver.get_value(Some(&color_marker), &s("red")), None);
}

#[test]
fn test_class_lookup_binds_class() {
    let resolver = ClassResolver::new(sample_classes());
    let marker = marker_of(&resolver, "Class");
    let class = resolver
        .get_value(Some(&marker), &s("com.example.Settings"))
        .unwrap()
        .unwrap();
    assert!(matches!(&class, Value::Class(c) if c.name() == "com.example.Settings"));
    assert_eq!(
        resolver.get_type(Some(&marker), &s("com.example.Settings")),
        Some(Ok(ValueType::Class))
    );
    assert_eq!(
        resolver.is_read_only(Some(&marker), &s("com.example.Settings")),
        Some(Ok(true))
    );
}

#[test]
fn test_unknown_class_is_terminal() {
    let resolver = ClassResolver::new(sample_classes());
    let marker = marker_of(&resolver, "Class");
    expect_not_found(resolver.get_value(Some(&marker), &s("no.such.Clazz")));
    expect_not_found(resolver.get_type(Some(&marker), &s("no.such.Clazz")));
}

#[test]
fn test_static_field_round_trip() {
    let resolver = ClassResolver::new(sample_classes());
    let marker = marker_of(&resolver, "Class");
    let class = resolver
        .get_value(Some(&marker), &s("com.example.Settings"))
        .unwrap()
        .unwrap();

    assert_eq!(resolver.is_read_only(Some(&class), &s("mode")), Some(Ok(false)));
    assert_eq!(
        resolver.set_value(Some(&class), &s("mode"), s("safe")),
        Some(Ok(()))
    );
    assert_eq!(resolver.get_value(Some(&class), &s("mode")), Some(Ok(s("safe"))));
}

#[test]
fn test_final_field_is_not_writable_and_unchanged() {
    let resolver = ClassResolver::new(sample_classes());
    let marker = marker_of(&resolver, "Class");
    let class = resolver
        .get_value(Some(&marker), &s("com.example.Settings"))
        .unwrap()
        .unwrap();

    assert_eq!(resolver.is_read_only(Some(&class), &s("VERSION")), Some(Ok(true)));
    expect_not_writable(resolver.set_value(Some(&class), &s("VERSION"), Value::integer(4)));
    assert_eq!(
        resolver.get_value(Some(&class), &s("VERSION")),
        Some(Ok(Value::integer(3)))
    );
}

#[test]
fn test_instance_and_unknown_fields_are_not_found() {
    let resolver = ClassResolver::new(sample_classes());
    let marker = marker_of(&resolver, "Class");
    let class = resolver
        .get_value(Some(&marker), &s("com.example.Settings"))
        .unwrap()
        .unwrap();

    for field in ["owner", "missing"] {
        expect_not_found(resolver.get_value(Some(&class), &s(field)));
        expect_not_found(resolver.get_type(Some(&class), &s(field)));
        expect_not_found(resolver.is_read_only(Some(&class), &s(field)));
        expect_not_found(resolver.set_value(Some(&class), &s(field), Value::Null));
    }
}

#[test]
fn test_disabled_loader_finds_nothing() {
    let resolver = ClassResolver::new(DisabledClassLoader);
    let marker = marker_of(&resolver, "Class");
    expect_not_found(resolver.get_value(Some(&marker), &s("java.lang.Math")));
}

#[test]
fn test_class_descriptors() {
    let resolver = ClassResolver::new(sample_classes());
    let root = resolver.feature_descriptors(None).collect::<Vec<_>>();
    assert_eq!(root.len(), 1);
    assert_eq!(root[0].name, "Class");

    let marker = marker_of(&resolver, "Class");
    let classes = resolver
        .feature_descriptors(Some(&marker))
        .map(|d| d.name)
        .collect::<Vec<_>>();
    assert_eq!(classes, vec!["com.example.Settings"]);

    let class = resolver
        .get_value(Some(&marker), &s("com.example.Settings"))
        .unwrap()
        .unwrap();
    let fields = resolver
        .feature_descriptors(Some(&class))
        .map(|d| d.name)
        .collect::<Vec<_>>();
    assert_eq!(fields, vec!["VERSION", "mode"]);
}

// ── Markers ──────────────────────────────────────────────────────────

#[test]
fn test_markers_equal_by_kind_only() {
    let class_resolver = ClassResolver::new(sample_classes());
    let color_resolver = ColorResolver::new();

    let first = marker_of(&class_resolver, "Class");
    let second = marker_of(&class_resolver, "Class");
    let color = marker_of(&color_resolver, "Color");

    assert_eq!(first, second);
    match (&first, &second) {
        (Value::Marker(a), Value::Marker(b)) => assert_ne!(a.issued(), b.issued()),
        _ => panic!("expected markers"),
    }
    assert_ne!(first, color);
}

// ── Color namespace ──────────────────────────────────────────────────

#[test]
fn test_color_lookup_both_spellings() {
    let resolver = ColorResolver::new();
    let marker = marker_of(&resolver, "Color");
    assert_eq!(
        resolver.get_value(Some(&marker), &s("lightGray")),
        Some(Ok(Value::Color(Color::LIGHT_GRAY)))
    );
    assert_eq!(
        resolver.get_value(Some(&marker), &s("LIGHT_GRAY")),
        Some(Ok(Value::Color(Color::LIGHT_GRAY)))
    );
    assert_eq!(
        resolver.get_type(Some(&marker), &s("red")),
        Some(Ok(ValueType::Color))
    );
}

#[test]
fn test_unknown_color_is_terminal() {
    let resolver = ColorResolver::new();
    let marker = marker_of(&resolver, "Color");
    expect_not_found(resolver.get_value(Some(&marker), &s("chartreuse")));
}

#[test]
fn test_colors_are_read_only() {
    let resolver = ColorResolver::new();
    let marker = marker_of(&resolver, "Color");
    assert_eq!(resolver.is_read_only(Some(&marker), &s("red")), Some(Ok(true)));
    expect_not_writable(resolver.set_value(Some(&marker), &s("red"), Value::Null));
    expect_not_writable(resolver.set_value(None, &s("Color"), Value::Null));
}

#[test]
fn test_color_resolver_ignores_foreign_requests() {
    let resolver = ColorResolver::new();
    assert_eq!(resolver.get_value(None, &s("Colour")), None);
    assert_eq!(resolver.get_value(Some(&s("Color")), &s("red")), None);
    let class_marker = marker_of(&ClassResolver::new(sample_classes()), "Class");
    assert_eq!(resolver.get_value(Some(&class_marker), &s("red")), None);
}

// ── Local variables ──────────────────────────────────────────────────

#[test]
fn test_local_variables_read_and_decline() {
    let store = LocalVariableStore::new();
    store.define("foo", Value::integer(123));
    let resolver = LocalVariableResolver::new(store);

    assert_eq!(resolver.get_value(None, &s("foo")), Some(Ok(Value::integer(123))));
    assert_eq!(resolver.get_type(None, &s("foo")), Some(Ok(ValueType::Number)));
    assert_eq!(resolver.get_value(None, &s("bar")), None);
    assert_eq!(resolver.get_value(Some(&Value::Null), &s("foo")), None);
}

#[test]
fn test_local_variable_write_creates_entry() {
    let store = LocalVariableStore::new();
    let resolver = LocalVariableResolver::new(store.clone());

    assert_eq!(resolver.is_read_only(None, &s("fresh")), Some(Ok(false)));
    assert_eq!(resolver.set_value(None, &s("fresh"), s("v")), Some(Ok(())));
    assert_eq!(store.get("fresh"), Some(s("v")));
    assert_eq!(resolver.get_value(None, &s("fresh")), Some(Ok(s("v"))));
}

#[test]
fn test_local_store_sees_latest_value() {
    let store = LocalVariableStore::new();
    let resolver = LocalVariableResolver::new(store.clone());
    store.define("x", Value::integer(1));
    assert_eq!(resolver.get_value(None, &s("x")), Some(Ok(Value::integer(1))));
    store.define("x", Value::integer(2));
    assert_eq!(resolver.get_value(None, &s("x")), Some(Ok(Value::integer(2))));

    let old = resolver.store().replace(Default::default());
    assert_eq!(old.len(), 1);
    assert_eq!(resolver.get_value(None, &s("x")), None);
}

// ── Implicit objects ─────────────────────────────────────────────────

#[test]
fn test_implicit_object() {
    let resolver = ImplicitObjectResolver::new("request", s("GET /"));
    assert_eq!(resolver.get_value(None, &s("request")), Some(Ok(s("GET /"))));
    assert_eq!(resolver.get_value(None, &s("response")), None);
    assert_eq!(resolver.is_read_only(None, &s("request")), Some(Ok(true)));
    expect_not_writable(resolver.set_value(None, &s("request"), Value::Null));
}

// ── Maps ─────────────────────────────────────────────────────────────

#[test]
fn test_map_missing_key_reads_null() {
    let resolver = MapResolver::default();
    let map = Value::new_map(vec![("a", Value::integer(1))]);
    assert_eq!(resolver.get_value(Some(&map), &s("a")), Some(Ok(Value::integer(1))));
    assert_eq!(resolver.get_value(Some(&map), &s("b")), Some(Ok(Value::Null)));
    assert_eq!(resolver.get_value(None, &s("a")), None);
    assert_eq!(resolver.get_value(Some(&s("text")), &s("a")), None);
}

#[test]
fn test_map_write_inserts() {
    let resolver = MapResolver::default();
    let map = Value::new_map(Vec::<(&str, Value)>::new());
    assert_eq!(resolver.set_value(Some(&map), &s("k"), s("v")), Some(Ok(())));
    assert_eq!(resolver.get_value(Some(&map), &s("k")), Some(Ok(s("v"))));
    assert_eq!(resolver.is_read_only(Some(&map), &s("k")), Some(Ok(false)));
}

#[test]
fn test_read_only_map() {
    let resolver = MapResolver::new(true);
    let map = Value::new_map(vec![("k", s("v"))]);
    assert_eq!(resolver.is_read_only(Some(&map), &s("k")), Some(Ok(true)));
    expect_not_writable(resolver.set_value(Some(&map), &s("k"), Value::Null));
    assert_eq!(resolver.get_value(Some(&map), &s("k")), Some(Ok(s("v"))));
}

#[test]
fn test_map_rejects_structured_key() {
    let resolver = MapResolver::default();
    let map = Value::new_map(vec![("k", s("v"))]);
    let key = Value::new_list(vec![]);
    expect_not_found(resolver.get_value(Some(&map), &key));
}

// ── Lists and arrays ─────────────────────────────────────────────────

#[test]
fn test_list_indices() {
    let resolver = ListResolver::default();
    let list = Value::new_list(vec![s("a"), s("b")]);
    assert_eq!(resolver.get_value(Some(&list), &Value::integer(1)), Some(Ok(s("b"))));
    assert_eq!(resolver.get_value(Some(&list), &s("0")), Some(Ok(s("a"))));
    assert_eq!(resolver.get_value(Some(&list), &Value::integer(5)), Some(Ok(Value::Null)));
    assert_eq!(resolver.get_value(Some(&list), &Value::integer(-1)), Some(Ok(Value::Null)));
    expect_not_found(resolver.get_value(Some(&list), &s("first")));
    assert_eq!(resolver.get_value(Some(&Value::new_array(vec![])), &Value::integer(0)), None);
}

#[test]
fn test_list_write_in_and_out_of_range() {
    let resolver = ListResolver::default();
    let list = Value::new_list(vec![s("a")]);
    assert_eq!(resolver.set_value(Some(&list), &Value::integer(0), s("z")), Some(Ok(())));
    assert_eq!(resolver.get_value(Some(&list), &Value::integer(0)), Some(Ok(s("z"))));
    expect_not_found(resolver.set_value(Some(&list), &Value::integer(1), s("y")));
    expect_not_found(resolver.is_read_only(Some(&list), &Value::integer(1)));
    expect_not_writable(ListResolver::new(true).set_value(Some(&list), &Value::integer(0), s("y")));
}

#[test]
fn test_array_is_fixed_length() {
    let resolver = ArrayResolver::default();
    let array = Value::new_array(vec![Value::integer(1), Value::integer(2)]);
    assert_eq!(resolver.set_value(Some(&array), &Value::integer(1), Value::integer(9)), Some(Ok(())));
    assert_eq!(resolver.get_value(Some(&array), &Value::integer(1)), Some(Ok(Value::integer(9))));
    expect_not_found(resolver.set_value(Some(&array), &Value::integer(2), Value::Null));
    assert_eq!(resolver.get_value(Some(&array), &Value::integer(2)), Some(Ok(Value::Null)));
    assert_eq!(resolver.get_value(Some(&Value::new_list(vec![])), &Value::integer(0)), None);
}

// ── Records ──────────────────────────────────────────────────────────

fn person() -> Value {
    Value::new_record(
        SimpleRecord::new("Person")
            .with_property("name", s("Ada"))
            .with_read_only_property("id", Value::integer(7)),
    )
}

#[test]
fn test_record_properties() {
    let resolver = RecordResolver::default();
    let record = person();
    assert_eq!(resolver.get_value(Some(&record), &s("name")), Some(Ok(s("Ada"))));
    assert_eq!(resolver.is_read_only(Some(&record), &s("name")), Some(Ok(false)));
    assert_eq!(resolver.is_read_only(Some(&record), &s("id")), Some(Ok(true)));
    assert_eq!(resolver.set_value(Some(&record), &s("name"), s("Grace")), Some(Ok(())));
    assert_eq!(resolver.get_value(Some(&record), &s("name")), Some(Ok(s("Grace"))));
}

#[test]
fn test_record_errors() {
    let resolver = RecordResolver::default();
    let record = person();
    expect_not_found(resolver.get_value(Some(&record), &s("age")));
    expect_not_found(resolver.set_value(Some(&record), &s("age"), Value::Null));
    expect_not_writable(resolver.set_value(Some(&record), &s("id"), Value::Null));
    assert_eq!(resolver.get_value(Some(&record), &s("id")), Some(Ok(Value::integer(7))));
    assert_eq!(resolver.get_value(Some(&Value::new_map(vec![("name", s("x"))])), &s("name")), None);
}

#[test]
fn test_record_descriptors() {
    let resolver = RecordResolver::default();
    let record = person();
    let names = resolver
        .feature_descriptors(Some(&record))
        .map(|d| (d.name, d.short_description))
        .collect::<Vec<_>>();
    assert_eq!(
        names,
        vec![
            ("name".to_string(), "read-write property".to_string()),
            ("id".to_string(), "read-only property".to_string()),
        ]
    );
}

use std::collections::HashMap;
use std::fmt;
use std::fmt::{Display, Formatter};
use std::sync::{Arc, RwLock};

use crate::runner::ds::class::ClassRef;
use crate::runner::ds::color::Color;
use crate::runner::ds::marker::{MarkerKind, MarkerValue};
use crate::runner::ds::record::{Record, RecordRef};
use crate::runner::ds::shared;

pub type ListRef = Arc<RwLock<Vec<Value>>>;
pub type ArrayRef = Arc<RwLock<Box<[Value]>>>;
pub type MapRef = Arc<RwLock<HashMap<String, Value>>>;

/// A datum flowing through the resolver chain.
///
/// Containers are shared handles: cloning a `Value::Map` clones the handle, so a
/// write made through one path is visible through every other path that reaches
/// the same map. Handles are `Send + Sync`; a container may end up holding
/// itself.
pub enum Value {
    Null,
    Boolean(bool),
    String(String),
    Number(NumberType),
    /// Growable sequence.
    List(ListRef),
    /// Fixed-length sequence.
    Array(ArrayRef),
    Map(MapRef),
    Record(RecordRef),
    /// A loaded class, the "bound" state of the class namespace.
    Class(ClassRef),
    Marker(MarkerValue),
    Color(Color),
}

impl Value {
    pub fn string(s: impl Into<String>) -> Self {
        Value::String(s.into())
    }

    pub fn integer(i: i64) -> Self {
        Value::Number(NumberType::Integer(i))
    }

    pub fn float(f: f64) -> Self {
        Value::Number(NumberType::Float(f))
    }

    pub fn new_list(items: Vec<Value>) -> Self {
        Value::List(Arc::new(RwLock::new(items)))
    }

    pub fn new_array(items: Vec<Value>) -> Self {
        Value::Array(Arc::new(RwLock::new(items.into_boxed_slice())))
    }

    pub fn new_map<K: Into<String>>(entries: impl IntoIterator<Item = (K, Value)>) -> Self {
        let map = entries
            .into_iter()
            .map(|(k, v)| (k.into(), v))
            .collect::<HashMap<String, Value>>();
        Value::Map(Arc::new(RwLock::new(map)))
    }

    pub fn new_record<R: Record + 'static>(record: R) -> Self {
        Value::Record(Arc::new(RwLock::new(record)))
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn is_marker_of(&self, kind: MarkerKind) -> bool {
        match self {
            Value::Marker(m) => m.kind() == kind,
            _ => false,
        }
    }

    pub fn value_type(&self) -> ValueType {
        match self {
            Value::Null => ValueType::Null,
            Value::Boolean(_) => ValueType::Boolean,
            Value::String(_) => ValueType::String,
            Value::Number(_) => ValueType::Number,
            Value::List(_) => ValueType::List,
            Value::Array(_) => ValueType::Array,
            Value::Map(_) => ValueType::Map,
            Value::Record(r) => ValueType::Record(shared::read(r).type_name().to_string()),
            Value::Class(_) => ValueType::Class,
            Value::Marker(m) => match m.kind() {
                MarkerKind::ClassNamespace => ValueType::ClassNamespace,
                MarkerKind::ColorNamespace => ValueType::ColorNamespace,
            },
            Value::Color(_) => ValueType::Color,
        }
    }

    /// The textual key a property value denotes, if it has one.
    ///
    /// Strings are taken verbatim, numbers and booleans by their display form.
    pub fn as_property_name(&self) -> Option<String> {
        match self {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Boolean(b) => Some(b.to_string()),
            _ => None,
        }
    }

    /// Interprets the value as a sequence index.
    pub fn as_index(&self) -> Option<i64> {
        match self {
            Value::Number(NumberType::Integer(i)) => Some(*i),
            Value::Number(NumberType::Float(f)) if f.fract() == 0.0 && f.is_finite() => {
                Some(*f as i64)
            }
            Value::String(s) => s.trim().parse::<i64>().ok(),
            _ => None,
        }
    }

    /// Snapshot of the items of a list or array.
    ///
    /// The copy holds no lock, so callers may resolve or display the items
    /// even when one of them is the sequence itself.
    pub fn sequence_items(&self) -> Option<Vec<Value>> {
        match self {
            Value::List(l) => Some(shared::read(l).clone()),
            Value::Array(a) => Some(shared::read(a).to_vec()),
            _ => None,
        }
    }

    /// Identity of a shared container, `None` for plain data.
    fn container_id(&self) -> Option<*const ()> {
        match self {
            Value::List(l) => Some(Arc::as_ptr(l) as *const ()),
            Value::Array(a) => Some(Arc::as_ptr(a) as *const ()),
            Value::Map(m) => Some(Arc::as_ptr(m) as *const ()),
            _ => None,
        }
    }
}

impl Clone for Value {
    fn clone(&self) -> Self {
        match self {
            Value::Null => Value::Null,
            Value::Boolean(b) => Value::Boolean(*b),
            Value::String(s) => Value::String(s.to_string()),
            Value::Number(n) => Value::Number(n.clone()),
            Value::List(l) => Value::List(l.clone()),
            Value::Array(a) => Value::Array(a.clone()),
            Value::Map(m) => Value::Map(m.clone()),
            Value::Record(r) => Value::Record(r.clone()),
            Value::Class(c) => Value::Class(c.clone()),
            Value::Marker(m) => Value::Marker(m.clone()),
            Value::Color(c) => Value::Color(*c),
        }
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write_value(f, self, &mut Vec::new())
    }
}

/// Writes `value`, eliding any container already open further up as `[...]`
/// or `{...}`.
fn write_value(f: &mut Formatter<'_>, value: &Value, open: &mut Vec<*const ()>) -> fmt::Result {
    let id = match value.container_id() {
        Some(id) => id,
        None => return write_scalar(f, value),
    };
    if open.contains(&id) {
        return match value {
            Value::Map(_) => write!(f, "{{...}}"),
            _ => write!(f, "[...]"),
        };
    }
    open.push(id);
    let result = match value {
        Value::Map(m) => {
            let mut entries = shared::read(m)
                .iter()
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect::<Vec<_>>();
            entries.sort_by(|a, b| a.0.cmp(&b.0));
            write_map(f, &entries, open)
        }
        _ => write_sequence(f, &value.sequence_items().unwrap_or_default(), open),
    };
    open.pop();
    result
}

fn write_sequence(f: &mut Formatter<'_>, items: &[Value], open: &mut Vec<*const ()>) -> fmt::Result {
    write!(f, "[")?;
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write_value(f, item, open)?;
    }
    write!(f, "]")
}

fn write_map(f: &mut Formatter<'_>, entries: &[(String, Value)], open: &mut Vec<*const ()>) -> fmt::Result {
    write!(f, "{{")?;
    for (i, (k, v)) in entries.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{}=", k)?;
        write_value(f, v, open)?;
    }
    write!(f, "}}")
}

fn write_scalar(f: &mut Formatter<'_>, value: &Value) -> fmt::Result {
    match value {
        Value::Null => write!(f, "null"),
        Value::Boolean(b) => write!(f, "{}", b),
        Value::String(s) => write!(f, "{}", s),
        Value::Number(n) => write!(f, "{}", n),
        Value::Record(r) => write!(f, "{}", shared::read(r).type_name()),
        Value::Class(c) => write!(f, "class {}", c.name()),
        Value::Marker(m) => write!(f, "{}", m),
        Value::Color(c) => write!(f, "{}", c),
        Value::List(_) | Value::Array(_) | Value::Map(_) => write!(f, "[...]"),
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "Value::Null"),
            Value::Boolean(b) => write!(f, "Value::Boolean({})", b),
            Value::String(s) => write!(f, "Value::String({:?})", s),
            Value::Number(n) => write!(f, "Value::Number({:?})", n),
            Value::List(l) => write!(f, "Value::List(len={})", shared::read(l).len()),
            Value::Array(a) => write!(f, "Value::Array(len={})", shared::read(a).len()),
            Value::Map(m) => write!(f, "Value::Map(len={})", shared::read(m).len()),
            Value::Record(r) => write!(f, "Value::Record({})", shared::read(r).type_name()),
            Value::Class(c) => write!(f, "Value::Class({})", c.name()),
            Value::Marker(m) => write!(f, "Value::Marker({:?})", m),
            Value::Color(c) => write!(f, "Value::Color({:?})", c),
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Boolean(a), Value::Boolean(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::List(a), Value::List(b)) => Arc::ptr_eq(a, b),
            (Value::Array(a), Value::Array(b)) => Arc::ptr_eq(a, b),
            (Value::Map(a), Value::Map(b)) => Arc::ptr_eq(a, b),
            (Value::Record(a), Value::Record(b)) => {
                Arc::as_ptr(a) as *const () == Arc::as_ptr(b) as *const ()
            }
            (Value::Class(a), Value::Class(b)) => Arc::ptr_eq(a, b),
            (Value::Marker(a), Value::Marker(b)) => a == b,
            (Value::Color(a), Value::Color(b)) => a == b,
            _ => false,
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::integer(i)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::float(f)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum NumberType {
    Integer(i64),
    Float(f64),
}
impl Display for NumberType {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            NumberType::Integer(i) => write!(f, "{}", i),
            NumberType::Float(nf) => write!(f, "{}", nf),
        }
    }
}

/// Static type reported by `get_type` without evaluating side effects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValueType {
    /// No more specific answer is available.
    Any,
    Null,
    Boolean,
    String,
    Number,
    List,
    Array,
    Map,
    Record(String),
    Class,
    ClassNamespace,
    ColorNamespace,
    Color,
}
impl Display for ValueType {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ValueType::Any => write!(f, "any"),
            ValueType::Null => write!(f, "null"),
            ValueType::Boolean => write!(f, "boolean"),
            ValueType::String => write!(f, "string"),
            ValueType::Number => write!(f, "number"),
            ValueType::List => write!(f, "list"),
            ValueType::Array => write!(f, "array"),
            ValueType::Map => write!(f, "map"),
            ValueType::Record(name) => write!(f, "record {}", name),
            ValueType::Class => write!(f, "class"),
            ValueType::ClassNamespace => write!(f, "class namespace"),
            ValueType::ColorNamespace => write!(f, "color namespace"),
            ValueType::Color => write!(f, "color"),
        }
    }
}

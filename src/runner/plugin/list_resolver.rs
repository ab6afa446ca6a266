use crate::runner::ds::descriptor::FeatureDescriptor;
use crate::runner::ds::error::ResolveError;
use crate::runner::ds::shared;
use crate::runner::ds::value::{ListRef, Value, ValueType};
use crate::runner::plugin::resolver::{Resolution, Resolver};

/// Converts a property into a sequence index. Bounds are checked separately
/// once the sequence is locked.
pub(crate) fn parse_index(property: &Value) -> Result<i64, ResolveError> {
    property
        .as_index()
        .ok_or_else(|| ResolveError::not_found(format!("invalid index: {}", property)))
}

/// `None` when `index` is outside `0..len`.
pub(crate) fn position(index: i64, len: usize) -> Option<usize> {
    if index < 0 || index as usize >= len {
        None
    } else {
        Some(index as usize)
    }
}

pub(crate) fn out_of_bounds(index: i64, len: usize) -> ResolveError {
    ResolveError::not_found(format!("index {} out of bounds for length {}", index, len))
}

pub(crate) fn index_descriptors(items: &[Value]) -> Vec<FeatureDescriptor> {
    items
        .iter()
        .enumerate()
        .map(|(i, v)| FeatureDescriptor::new(i.to_string(), v.value_type()))
        .collect()
}

/// Resolves integer indices of a `Value::List` base.
///
/// Reading past the end yields `Null`; writing or checking writability past
/// the end is `PropertyNotFound`. Lists never grow through assignment.
pub struct ListResolver {
    read_only: bool,
}

impl ListResolver {
    pub fn new(read_only: bool) -> Self {
        ListResolver { read_only }
    }

    fn list(base: Option<&Value>) -> Option<&ListRef> {
        match base {
            Some(Value::List(l)) => Some(l),
            _ => None,
        }
    }
}

impl Default for ListResolver {
    fn default() -> Self {
        Self::new(false)
    }
}

impl Resolver for ListResolver {
    fn get_value(&self, base: Option<&Value>, property: &Value) -> Resolution<Value> {
        let list = Self::list(base)?;
        Some(parse_index(property).map(|index| {
            let items = shared::read(list);
            position(index, items.len())
                .map(|i| items[i].clone())
                .unwrap_or(Value::Null)
        }))
    }

    fn get_type(&self, base: Option<&Value>, property: &Value) -> Resolution<ValueType> {
        let list = Self::list(base)?;
        Some(parse_index(property).and_then(|index| {
            let items = shared::read(list);
            match position(index, items.len()) {
                Some(i) => Ok(items[i].value_type()),
                None => Err(out_of_bounds(index, items.len())),
            }
        }))
    }

    fn is_read_only(&self, base: Option<&Value>, property: &Value) -> Resolution<bool> {
        let list = Self::list(base)?;
        Some(parse_index(property).and_then(|index| {
            let len = shared::read(list).len();
            match position(index, len) {
                Some(_) => Ok(self.read_only),
                None => Err(out_of_bounds(index, len)),
            }
        }))
    }

    fn set_value(&self, base: Option<&Value>, property: &Value, value: Value) -> Resolution<()> {
        let list = Self::list(base)?;
        if self.read_only {
            return Some(Err(ResolveError::not_writable(format!(
                "list is read-only: [{}]",
                property
            ))));
        }
        Some(parse_index(property).and_then(|index| {
            let mut items = shared::write(list);
            let len = items.len();
            match position(index, len) {
                Some(i) => {
                    items[i] = value;
                    Ok(())
                }
                None => Err(out_of_bounds(index, len)),
            }
        }))
    }

    fn feature_descriptors<'a>(
        &'a self,
        base: Option<&'a Value>,
    ) -> Box<dyn Iterator<Item = FeatureDescriptor> + 'a> {
        match Self::list(base) {
            Some(l) => Box::new(index_descriptors(&shared::read(l)).into_iter()),
            None => Box::new(std::iter::empty()),
        }
    }

    fn common_property_type(&self, base: Option<&Value>) -> Option<ValueType> {
        Self::list(base).map(|_| ValueType::Number)
    }

    fn name(&self) -> &str {
        "list"
    }
}

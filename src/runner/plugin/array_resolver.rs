use crate::runner::ds::descriptor::FeatureDescriptor;
use crate::runner::ds::error::ResolveError;
use crate::runner::ds::shared;
use crate::runner::ds::value::{ArrayRef, Value, ValueType};
use crate::runner::plugin::list_resolver::{index_descriptors, out_of_bounds, parse_index, position};
use crate::runner::plugin::resolver::{Resolution, Resolver};

/// Resolves integer indices of a fixed-length `Value::Array` base.
pub struct ArrayResolver {
    read_only: bool,
}

impl ArrayResolver {
    pub fn new(read_only: bool) -> Self {
        ArrayResolver { read_only }
    }

    fn array(base: Option<&Value>) -> Option<&ArrayRef> {
        match base {
            Some(Value::Array(a)) => Some(a),
            _ => None,
        }
    }
}

impl Default for ArrayResolver {
    fn default() -> Self {
        Self::new(false)
    }
}

impl Resolver for ArrayResolver {
    fn get_value(&self, base: Option<&Value>, property: &Value) -> Resolution<Value> {
        let array = Self::array(base)?;
        Some(parse_index(property).map(|index| {
            let slots = shared::read(array);
            position(index, slots.len())
                .map(|i| slots[i].clone())
                .unwrap_or(Value::Null)
        }))
    }

    fn get_type(&self, base: Option<&Value>, property: &Value) -> Resolution<ValueType> {
        let array = Self::array(base)?;
        Some(parse_index(property).and_then(|index| {
            let slots = shared::read(array);
            match position(index, slots.len()) {
                Some(i) => Ok(slots[i].value_type()),
                None => Err(out_of_bounds(index, slots.len())),
            }
        }))
    }

    fn is_read_only(&self, base: Option<&Value>, property: &Value) -> Resolution<bool> {
        let array = Self::array(base)?;
        Some(parse_index(property).and_then(|index| {
            let len = shared::read(array).len();
            match position(index, len) {
                Some(_) => Ok(self.read_only),
                None => Err(out_of_bounds(index, len)),
            }
        }))
    }

    fn set_value(&self, base: Option<&Value>, property: &Value, value: Value) -> Resolution<()> {
        let array = Self::array(base)?;
        if self.read_only {
            return Some(Err(ResolveError::not_writable(format!(
                "array is read-only: [{}]",
                property
            ))));
        }
        Some(parse_index(property).and_then(|index| {
            let mut slots = shared::write(array);
            let len = slots.len();
            match position(index, len) {
                Some(i) => {
                    slots[i] = value;
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
        match Self::array(base) {
            Some(a) => Box::new(index_descriptors(&shared::read(a)).into_iter()),
            None => Box::new(std::iter::empty()),
        }
    }

    fn common_property_type(&self, base: Option<&Value>) -> Option<ValueType> {
        Self::array(base).map(|_| ValueType::Number)
    }

    fn name(&self) -> &str {
        "array"
    }
}

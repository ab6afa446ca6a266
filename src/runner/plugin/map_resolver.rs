use crate::runner::ds::descriptor::FeatureDescriptor;
use crate::runner::ds::error::ResolveError;
use crate::runner::ds::shared;
use crate::runner::ds::value::{MapRef, Value, ValueType};
use crate::runner::plugin::resolver::{Resolution, Resolver};

/// Resolves keys of a `Value::Map` base.
///
/// A missing key reads as `Null`. Writes insert or overwrite unless the
/// resolver was built read-only.
pub struct MapResolver {
    read_only: bool,
}

impl MapResolver {
    pub fn new(read_only: bool) -> Self {
        MapResolver { read_only }
    }

    fn map(base: Option<&Value>) -> Option<&MapRef> {
        match base {
            Some(Value::Map(m)) => Some(m),
            _ => None,
        }
    }

    fn key(property: &Value) -> Result<String, ResolveError> {
        property
            .as_property_name()
            .ok_or_else(|| ResolveError::not_found(format!("invalid map key: {}", property)))
    }
}

impl Default for MapResolver {
    fn default() -> Self {
        Self::new(false)
    }
}

impl Resolver for MapResolver {
    fn get_value(&self, base: Option<&Value>, property: &Value) -> Resolution<Value> {
        let map = Self::map(base)?;
        Some(Self::key(property).map(|k| {
            shared::read(map).get(&k).cloned().unwrap_or(Value::Null)
        }))
    }

    fn get_type(&self, base: Option<&Value>, property: &Value) -> Resolution<ValueType> {
        let map = Self::map(base)?;
        Some(Self::key(property).map(|k| {
            shared::read(map)
                .get(&k)
                .map(|v| v.value_type())
                .unwrap_or(ValueType::Any)
        }))
    }

    fn is_read_only(&self, base: Option<&Value>, _property: &Value) -> Resolution<bool> {
        Self::map(base).map(|_| Ok(self.read_only))
    }

    fn set_value(&self, base: Option<&Value>, property: &Value, value: Value) -> Resolution<()> {
        let map = Self::map(base)?;
        if self.read_only {
            return Some(Err(ResolveError::not_writable(format!(
                "map is read-only: {}",
                property
            ))));
        }
        Some(Self::key(property).map(|k| {
            shared::write(map).insert(k, value);
        }))
    }

    fn feature_descriptors<'a>(
        &'a self,
        base: Option<&'a Value>,
    ) -> Box<dyn Iterator<Item = FeatureDescriptor> + 'a> {
        let map = match Self::map(base) {
            Some(m) => m,
            None => return Box::new(std::iter::empty()),
        };
        let mut descriptors = shared::read(map)
            .iter()
            .map(|(k, v)| FeatureDescriptor::new(k.clone(), v.value_type()))
            .collect::<Vec<_>>();
        descriptors.sort_by(|a, b| a.name.cmp(&b.name));
        Box::new(descriptors.into_iter())
    }

    fn common_property_type(&self, base: Option<&Value>) -> Option<ValueType> {
        Self::map(base).map(|_| ValueType::Any)
    }

    fn name(&self) -> &str {
        "map"
    }
}

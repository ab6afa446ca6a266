use crate::runner::ds::descriptor::FeatureDescriptor;
use crate::runner::ds::error::ResolveError;
use crate::runner::ds::record::RecordRef;
use crate::runner::ds::shared;
use crate::runner::ds::value::{Value, ValueType};
use crate::runner::plugin::resolver::{Resolution, Resolver};

/// Resolves named properties of a `Value::Record` base.
///
/// This is the most general fallback and is consulted last. A property the
/// record does not define is `PropertyNotFound`.
pub struct RecordResolver {
    read_only: bool,
}

impl RecordResolver {
    pub fn new(read_only: bool) -> Self {
        RecordResolver { read_only }
    }

    fn record(base: Option<&Value>) -> Option<&RecordRef> {
        match base {
            Some(Value::Record(r)) => Some(r),
            _ => None,
        }
    }

    fn property_name(record: &RecordRef, property: &Value) -> Result<String, ResolveError> {
        let (known, type_name) = {
            let record = shared::read(record);
            let known = property
                .as_property_name()
                .filter(|name| record.has_property(name));
            (known, record.type_name().to_string())
        };
        known.ok_or_else(|| {
            ResolveError::not_found(format!(
                "property '{}' not found on type {}",
                property, type_name
            ))
        })
    }
}

impl Default for RecordResolver {
    fn default() -> Self {
        Self::new(false)
    }
}

impl Resolver for RecordResolver {
    fn get_value(&self, base: Option<&Value>, property: &Value) -> Resolution<Value> {
        let record = Self::record(base)?;
        Some(Self::property_name(record, property).and_then(|name| {
            shared::read(record)
                .get_property(&name)
                .ok_or_else(|| ResolveError::not_found(name))
        }))
    }

    fn get_type(&self, base: Option<&Value>, property: &Value) -> Resolution<ValueType> {
        let record = Self::record(base)?;
        Some(Self::property_name(record, property).map(|name| {
            let value = shared::read(record).get_property(&name);
            value.map(|v| v.value_type()).unwrap_or(ValueType::Any)
        }))
    }

    fn is_read_only(&self, base: Option<&Value>, property: &Value) -> Resolution<bool> {
        let record = Self::record(base)?;
        Some(
            Self::property_name(record, property)
                .map(|name| self.read_only || !shared::read(record).is_writable(&name)),
        )
    }

    fn set_value(&self, base: Option<&Value>, property: &Value, value: Value) -> Resolution<()> {
        let record = Self::record(base)?;
        if self.read_only {
            return Some(Err(ResolveError::not_writable(format!(
                "record is read-only: {}",
                property
            ))));
        }
        Some(Self::property_name(record, property).and_then(|name| {
            let mut record = shared::write(record);
            if record.is_writable(&name) {
                record.set_property(&name, value)
            } else {
                Err(ResolveError::not_writable(format!(
                    "property '{}' is read-only on type {}",
                    name,
                    record.type_name()
                )))
            }
        }))
    }

    fn feature_descriptors<'a>(
        &'a self,
        base: Option<&'a Value>,
    ) -> Box<dyn Iterator<Item = FeatureDescriptor> + 'a> {
        let properties = match Self::record(base) {
            Some(r) => {
                let record = shared::read(r);
                let properties = record
                    .property_names()
                    .into_iter()
                    .filter_map(|name| {
                        let value = record.get_property(&name)?;
                        let writable = record.is_writable(&name);
                        Some((name, value, writable))
                    })
                    .collect::<Vec<_>>();
                properties
            }
            None => return Box::new(std::iter::empty()),
        };
        Box::new(properties.into_iter().map(|(name, value, writable)| {
            let description = if writable {
                "read-write property"
            } else {
                "read-only property"
            };
            FeatureDescriptor::new(name, value.value_type()).with_description(description)
        }))
    }

    fn common_property_type(&self, base: Option<&Value>) -> Option<ValueType> {
        Self::record(base).map(|_| ValueType::String)
    }

    fn name(&self) -> &str {
        "record"
    }
}

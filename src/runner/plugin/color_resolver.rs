//! `Color.red`: named color constants behind a virtual root.
//!
//! The root segment `Color` yields a color namespace marker; the next segment
//! is looked up in the fixed palette. Nothing is writable.

use crate::runner::ds::color::Color;
use crate::runner::ds::descriptor::FeatureDescriptor;
use crate::runner::ds::error::ResolveError;
use crate::runner::ds::marker::{MarkerKind, MarkerValue};
use crate::runner::ds::value::{Value, ValueType};
use crate::runner::plugin::resolver::{root_name, Resolution, Resolver};

pub const COLOR_ROOT: &str = "Color";

pub struct ColorResolver;

impl ColorResolver {
    pub fn new() -> Self {
        ColorResolver
    }

    /// `Some(true)` for the root segment, `Some(false)` for a palette lookup.
    fn claims(base: Option<&Value>, property: &Value) -> Option<bool> {
        match base {
            None => match root_name(None, property) {
                Some(COLOR_ROOT) => Some(true),
                _ => None,
            },
            Some(v) if v.is_marker_of(MarkerKind::ColorNamespace) => Some(false),
            Some(_) => None,
        }
    }

    fn lookup(property: &Value) -> Result<Color, ResolveError> {
        let name = property.as_property_name().unwrap_or_default();
        Color::named(&name)
            .ok_or_else(|| ResolveError::not_found(format!("undefined color: {}", name)))
    }
}

impl Default for ColorResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl Resolver for ColorResolver {
    fn get_value(&self, base: Option<&Value>, property: &Value) -> Resolution<Value> {
        Some(if Self::claims(base, property)? {
            Ok(Value::Marker(MarkerValue::new(MarkerKind::ColorNamespace)))
        } else {
            Self::lookup(property).map(Value::Color)
        })
    }

    fn get_type(&self, base: Option<&Value>, property: &Value) -> Resolution<ValueType> {
        Some(if Self::claims(base, property)? {
            Ok(ValueType::ColorNamespace)
        } else {
            Self::lookup(property).map(|_| ValueType::Color)
        })
    }

    fn is_read_only(&self, base: Option<&Value>, property: &Value) -> Resolution<bool> {
        Some(if Self::claims(base, property)? {
            Ok(true)
        } else {
            Self::lookup(property).map(|_| true)
        })
    }

    fn set_value(&self, base: Option<&Value>, property: &Value, _value: Value) -> Resolution<()> {
        let root = Self::claims(base, property)?;
        if !root {
            if let Err(e) = Self::lookup(property) {
                return Some(Err(e));
            }
        }
        Some(Err(ResolveError::not_writable(format!(
            "color constants cannot be assigned: {}",
            property
        ))))
    }

    fn feature_descriptors<'a>(
        &'a self,
        base: Option<&'a Value>,
    ) -> Box<dyn Iterator<Item = FeatureDescriptor> + 'a> {
        match base {
            None => Box::new(std::iter::once(
                FeatureDescriptor::new(COLOR_ROOT, ValueType::ColorNamespace)
                    .with_description("named colors"),
            )),
            Some(v) if v.is_marker_of(MarkerKind::ColorNamespace) => Box::new(
                Color::names()
                    .into_iter()
                    .map(|name| FeatureDescriptor::new(name, ValueType::Color)),
            ),
            Some(_) => Box::new(std::iter::empty()),
        }
    }

    fn common_property_type(&self, base: Option<&Value>) -> Option<ValueType> {
        match base {
            None => Some(ValueType::String),
            Some(v) if v.is_marker_of(MarkerKind::ColorNamespace) => Some(ValueType::String),
            Some(_) => None,
        }
    }

    fn name(&self) -> &str {
        "color_namespace"
    }
}

//! `Class['qualified.Name'].FIELD`: static fields through a virtual root.
//!
//! The namespace spans three segments, each seen in isolation by the chain:
//!
//! ```text
//! Class                 base = None, property = "Class"  → class namespace marker
//! ['java.lang.Math']    base = marker                    → the loaded class
//! .PI                   base = class                     → value of the static field
//! ```
//!
//! Once the marker or a class is the base, this resolver owns the request. An
//! unknown class or field is reported as `PropertyNotFound` rather than left to
//! the generic resolvers, which would otherwise treat the marker as an ordinary
//! object.

use crate::runner::ds::class::{ClassLoader, ClassRef, FieldDef};
use crate::runner::ds::descriptor::FeatureDescriptor;
use crate::runner::ds::error::ResolveError;
use crate::runner::ds::marker::{MarkerKind, MarkerValue};
use crate::runner::ds::value::{Value, ValueType};
use crate::runner::plugin::resolver::{root_name, Resolution, Resolver};

pub const CLASS_ROOT: &str = "Class";

enum Target<'v> {
    Root,
    Namespace,
    Bound(&'v ClassRef),
}

pub struct ClassResolver {
    loader: Box<dyn ClassLoader>,
}

impl ClassResolver {
    pub fn new(loader: impl ClassLoader + 'static) -> Self {
        ClassResolver {
            loader: Box::new(loader),
        }
    }

    fn target<'v>(base: Option<&'v Value>, property: &Value) -> Option<Target<'v>> {
        match base {
            None => match root_name(None, property) {
                Some(CLASS_ROOT) => Some(Target::Root),
                _ => None,
            },
            Some(v) if v.is_marker_of(MarkerKind::ClassNamespace) => Some(Target::Namespace),
            Some(Value::Class(class)) => Some(Target::Bound(class)),
            Some(_) => None,
        }
    }

    fn load(&self, property: &Value) -> Result<ClassRef, ResolveError> {
        let name = property.as_property_name().unwrap_or_default();
        self.loader
            .load_class(&name)
            .ok_or_else(|| ResolveError::not_found(format!("undefined class name: {}", name)))
    }

    fn static_field<'c>(class: &'c ClassRef, property: &Value) -> Result<&'c FieldDef, ResolveError> {
        let name = property.as_property_name().unwrap_or_default();
        match class.field(&name) {
            Some(field) if field.is_static() => Ok(field),
            _ => Err(ResolveError::not_found(format!(
                "undefined field: {}/class={}",
                name,
                class.name()
            ))),
        }
    }
}

impl Resolver for ClassResolver {
    fn get_value(&self, base: Option<&Value>, property: &Value) -> Resolution<Value> {
        Some(match Self::target(base, property)? {
            Target::Root => Ok(Value::Marker(MarkerValue::new(MarkerKind::ClassNamespace))),
            Target::Namespace => self.load(property).map(Value::Class),
            Target::Bound(class) => Self::static_field(class, property).map(|f| f.value()),
        })
    }

    fn get_type(&self, base: Option<&Value>, property: &Value) -> Resolution<ValueType> {
        Some(match Self::target(base, property)? {
            Target::Root => Ok(ValueType::ClassNamespace),
            Target::Namespace => self.load(property).map(|_| ValueType::Class),
            Target::Bound(class) => {
                Self::static_field(class, property).map(|f| f.value().value_type())
            }
        })
    }

    fn is_read_only(&self, base: Option<&Value>, property: &Value) -> Resolution<bool> {
        Some(match Self::target(base, property)? {
            Target::Root | Target::Namespace => Ok(true),
            Target::Bound(class) => Self::static_field(class, property).map(|f| !f.is_assignable()),
        })
    }

    fn set_value(&self, base: Option<&Value>, property: &Value, value: Value) -> Resolution<()> {
        Some(match Self::target(base, property)? {
            Target::Root => Err(ResolveError::not_writable(format!(
                "cannot assign to {}",
                CLASS_ROOT
            ))),
            Target::Namespace => Err(ResolveError::not_writable(format!(
                "cannot assign to {}[{}]",
                CLASS_ROOT, property
            ))),
            Target::Bound(class) => Self::static_field(class, property).and_then(|field| {
                if field.is_assignable() {
                    field.store(value);
                    Ok(())
                } else {
                    Err(ResolveError::not_writable(format!(
                        "{}.{} is final",
                        class.name(),
                        property
                    )))
                }
            }),
        })
    }

    fn feature_descriptors<'a>(
        &'a self,
        base: Option<&'a Value>,
    ) -> Box<dyn Iterator<Item = FeatureDescriptor> + 'a> {
        match base {
            None => Box::new(std::iter::once(
                FeatureDescriptor::new(CLASS_ROOT, ValueType::ClassNamespace)
                    .with_description("class namespace"),
            )),
            Some(v) if v.is_marker_of(MarkerKind::ClassNamespace) => Box::new(
                self.loader
                    .class_names()
                    .into_iter()
                    .map(|name| FeatureDescriptor::new(name, ValueType::Class)),
            ),
            Some(Value::Class(class)) => {
                let descriptors = class
                    .static_field_names()
                    .into_iter()
                    .filter_map(|name| {
                        let field = class.field(&name)?;
                        let description = if field.is_final() {
                            "static final field"
                        } else {
                            "static field"
                        };
                        Some(
                            FeatureDescriptor::new(name, field.value().value_type())
                                .with_description(description),
                        )
                    })
                    .collect::<Vec<_>>();
                Box::new(descriptors.into_iter())
            }
            Some(_) => Box::new(std::iter::empty()),
        }
    }

    fn common_property_type(&self, base: Option<&Value>) -> Option<ValueType> {
        match base {
            None | Some(Value::Class(_)) => Some(ValueType::String),
            Some(v) if v.is_marker_of(MarkerKind::ClassNamespace) => Some(ValueType::String),
            Some(_) => None,
        }
    }

    fn name(&self) -> &str {
        "class_namespace"
    }
}

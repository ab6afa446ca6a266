//! Math class.
//!
//! Provides mathematical constants as static final fields.

use crate::runner::ds::class::ClassDef;
use crate::runner::ds::value::Value;
use crate::runner::plugin::registry::ClassRegistry;

pub const MATH_CLASS: &str = "java.lang.Math";

/// Register the core classes with the registry.
pub fn register_core_classes(registry: &mut ClassRegistry) {
    let math = ClassDef::new(MATH_CLASS)
        // Constants
        .with_constant("E", Value::float(std::f64::consts::E))
        .with_constant("LN10", Value::float(std::f64::consts::LN_10))
        .with_constant("LN2", Value::float(std::f64::consts::LN_2))
        .with_constant("LOG10E", Value::float(std::f64::consts::LOG10_E))
        .with_constant("LOG2E", Value::float(std::f64::consts::LOG2_E))
        .with_constant("PI", Value::float(std::f64::consts::PI))
        .with_constant("SQRT1_2", Value::float(std::f64::consts::FRAC_1_SQRT_2))
        .with_constant("SQRT2", Value::float(std::f64::consts::SQRT_2));

    registry.register_class(math);
}

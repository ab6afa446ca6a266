//! Standard library classes and functions.
//!
//! This module contains the `java.lang.Math` class exposed through the class
//! namespace and the core functions bound under the `fn` prefix.

pub mod functions;
pub mod math;

pub use functions::register_core_functions;
pub use math::register_core_classes;

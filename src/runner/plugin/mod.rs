//! Resolver architecture and the resolver chain.
//!
//! This module implements the **property-resolution chain**: the protocol by
//! which a path such as `a.b[c].d` is evaluated against maps, lists, records and
//! synthetic namespaces without the evaluator knowing about any of them.
//!
//! ## Resolution Protocol
//!
//! The evaluator walks a path one segment at a time and hands the chain a
//! `(base, property)` pair. `base` is `None` for the root identifier:
//!
//! ```text
//! a.b[c]   →   (None, "a")  →  va
//!              (va,   "b")  →  vb
//!              (vb,   c)    →  result
//! ```
//!
//! ### Key Components
//!
//! - **[`Resolver`]**: Contract every data source implements
//! - **[`ResolverChain`]**: Ordered composite, itself a [`Resolver`]
//! - **[`ClassResolver`]** / **[`ColorResolver`]**: Namespaces spanning several segments
//! - **[`LocalVariableResolver`]**: Mutable root-level variables
//! - **[`MapResolver`]**, **[`ListResolver`]**, **[`ArrayResolver`]**, **[`RecordResolver`]**:
//!   Generic fallbacks keyed on the shape of `base`
//!
//! ### Outcomes
//!
//! Each call returns a [`Resolution`]:
//!
//! 1. **`None`**: Not this resolver's concern; the chain asks the next one
//! 2. **`Some(Ok(v))`**: Resolved; no further resolver is consulted
//! 3. **`Some(Err(e))`**: Claimed but invalid; the error ends the search
//!
//! A resolver must never return `None` for a request it owns. Returning `None`
//! for an unknown class would let the map or record resolvers try the marker
//! as an ordinary object.
//!
//! ### Marker Values
//!
//! A namespace like `Class['java.lang.Math'].PI` needs state that survives from
//! one segment to the next. The resolver answers the root `Class` with a
//! [`MarkerValue`](crate::runner::ds::marker::MarkerValue) of its own kind and
//! recognizes that marker as `base` on the following segment.
//!
//! ### Threads
//!
//! A built chain can be wrapped in an `Arc` and queried from several threads.
//! Resolvers are `Send + Sync`; mutable state such as static fields and local
//! variables sits behind `RwLock`.
//!
//! ## Example: Custom Resolver
//!
//! ```
//! use pathres::runner::ds::value::{Value, ValueType};
//! use pathres::runner::eval::context::EvaluationContext;
//! use pathres::runner::plugin::resolver::{Resolution, Resolver};
//!
//! struct Version;
//!
//! impl Resolver for Version {
//!     fn get_value(&self, base: Option<&Value>, property: &Value) -> Resolution<Value> {
//!         match (base, property) {
//!             (None, Value::String(name)) if name == "version" => Some(Ok(Value::string("1.0"))),
//!             _ => None,
//!         }
//!     }
//!
//!     fn get_type(&self, base: Option<&Value>, property: &Value) -> Resolution<ValueType> {
//!         self.get_value(base, property).map(|r| r.map(|v| v.value_type()))
//!     }
//!
//!     fn is_read_only(&self, base: Option<&Value>, property: &Value) -> Resolution<bool> {
//!         self.get_value(base, property).map(|r| r.map(|_| true))
//!     }
//!
//!     fn set_value(&self, _base: Option<&Value>, _property: &Value, _value: Value) -> Resolution<()> {
//!         None
//!     }
//!
//!     fn name(&self) -> &str { "version" }
//! }
//!
//! let mut ctx = EvaluationContext::new();
//! ctx.add_resolver(Box::new(Version));
//! assert_eq!(ctx.eval("version").unwrap(), Value::string("1.0"));
//! ```

pub mod resolver;
pub mod chain;
pub mod class_resolver;
pub mod color_resolver;
pub mod local_resolver;
pub mod implicit_resolver;
pub mod map_resolver;
pub mod list_resolver;
pub mod array_resolver;
pub mod record_resolver;
pub mod registry;
pub mod config;

pub use resolver::{Resolution, Resolver};
pub use chain::ResolverChain;
pub use class_resolver::ClassResolver;
pub use color_resolver::ColorResolver;
pub use local_resolver::{LocalVariableResolver, LocalVariableStore};
pub use implicit_resolver::ImplicitObjectResolver;
pub use map_resolver::MapResolver;
pub use list_resolver::ListResolver;
pub use array_resolver::ArrayResolver;
pub use record_resolver::RecordResolver;
pub use registry::ClassRegistry;
pub use config::{ConfigError, ContextConfig};

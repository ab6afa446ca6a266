//! # pathres - Dynamic Property Resolution in Rust
//!
//! Evaluates path expressions such as `a.b[c].d` against an extensible chain of
//! data sources:
//! - Maps, lists, fixed arrays and records with named properties
//! - Mutable local variables
//! - Synthetic namespaces spanning several segments (`Class['java.lang.Math'].PI`, `Color.red`)
//! - Lexically captured variables and `prefix:name(args)` functions
//!
//! ## Quick Start
//!
//! ### Parsing a Path
//!
//! ```
//! use pathres::parser::PathParser;
//! use pathres::parser::ast::{Expr, Root};
//!
//! let ast = PathParser::parse_to_ast_from_str("order.items[0].price").unwrap();
//! match ast {
//!     Expr::Path(path) => {
//!         assert_eq!(path.root, Root::Identifier("order".to_string()));
//!         assert_eq!(path.segments.len(), 3);
//!     }
//!     _ => unreachable!(),
//! }
//! ```
//!
//! ### Evaluating Against Local Variables
//!
//! ```
//! use pathres::runner::ds::value::Value;
//! use pathres::runner::eval::context::EvaluationContext;
//!
//! let ctx = EvaluationContext::new();
//! ctx.define_bean("order", Value::new_map(vec![
//!     ("items", Value::new_list(vec![Value::string("pen"), Value::string("ink")])),
//! ]));
//!
//! assert_eq!(ctx.eval("order.items[1]").unwrap(), Value::string("ink"));
//! assert_eq!(ctx.eval("fn:length(order.items)").unwrap(), Value::integer(2));
//!
//! ctx.set_value("order.items[0]", Value::string("quill")).unwrap();
//! assert_eq!(ctx.eval("order.items[0]").unwrap(), Value::string("quill"));
//! ```
//!
//! ### Namespaces
//!
//! ```
//! use pathres::runner::ds::color::Color;
//! use pathres::runner::ds::value::Value;
//! use pathres::runner::eval::context::EvaluationContext;
//! use pathres::runner::plugin::config::ContextConfig;
//!
//! let config = ContextConfig::parse(r#"
//!     [resolvers]
//!     class_namespace = true
//!     color_namespace = true
//! "#).unwrap();
//! let ctx = EvaluationContext::from_config(&config);
//!
//! assert_eq!(ctx.eval("Class['java.lang.Math'].PI").unwrap(), Value::float(std::f64::consts::PI));
//! assert_eq!(ctx.eval("Color.red").unwrap(), Value::Color(Color::RED));
//! assert!(ctx.eval("Class['no.such.Clazz']").unwrap_err().is_not_found());
//! ```
//!
//! ## Resolver Chain Architecture
//!
//! Every segment of a path is resolved by asking an ordered list of resolvers,
//! one `(base, property)` pair at a time. The first resolver that claims the
//! pair answers it, with a value or with a terminal error. A resolver that does
//! not recognize the pair returns `None` and the next one is asked.
//!
//! Namespaces that span several segments return a marker value for their root
//! name and recognize it as `base` on the next segment. See
//! [`runner::plugin`] for the protocol and an example of a custom resolver.
//!
//! ## Architecture
//!
//! - **[`parser`]** - PEG grammar and AST for path expressions
//! - **[`runner`]** - Resolution and evaluation
//!   - **[`runner::plugin`]** - Resolver trait, chain and the stock resolvers
//!   - **[`runner::ds`]** - Values, classes, records, colors and errors
//!   - **[`runner::eval`]** - Compiled expressions and the evaluation context
//!   - **[`runner::std_lib`]** - Core classes and functions

#[macro_use]
extern crate lazy_static;

pub mod parser;
pub mod runner;

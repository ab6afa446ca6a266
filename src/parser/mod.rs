mod api;
pub mod ast;

pub use api::{parse_to_ast, PathParser, Rule, MAX_NESTING};

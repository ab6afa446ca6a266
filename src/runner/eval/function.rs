//! Function bindings for `prefix:name(args)` calls.

use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use crate::runner::ds::error::ResolveError;
use crate::runner::ds::value::Value;

/// Native function signature for compiled-in functions.
pub type NativeFn = fn(args: Vec<Value>) -> Result<Value, ResolveError>;

pub enum FunctionBody {
    /// Direct function pointer.
    Native(NativeFn),
    /// Host-provided closure, may capture state.
    Closure(Rc<dyn Fn(Vec<Value>) -> Result<Value, ResolveError>>),
}

/// An invocable bound under a `(prefix, name)` pair.
#[derive(Clone)]
pub struct NativeFunction {
    name: String,
    /// `None` accepts any number of arguments.
    arity: Option<usize>,
    body: Rc<FunctionBody>,
}

impl NativeFunction {
    pub fn native(name: impl Into<String>, arity: Option<usize>, f: NativeFn) -> Self {
        NativeFunction {
            name: name.into(),
            arity,
            body: Rc::new(FunctionBody::Native(f)),
        }
    }

    pub fn closure(
        name: impl Into<String>,
        arity: Option<usize>,
        f: impl Fn(Vec<Value>) -> Result<Value, ResolveError> + 'static,
    ) -> Self {
        NativeFunction {
            name: name.into(),
            arity,
            body: Rc::new(FunctionBody::Closure(Rc::new(f))),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn arity(&self) -> Option<usize> {
        self.arity
    }

    pub fn call(&self, args: Vec<Value>) -> Result<Value, ResolveError> {
        if let Some(arity) = self.arity {
            if args.len() != arity {
                return Err(ResolveError::Invocation(format!(
                    "{} expects {} argument(s), got {}",
                    self.name,
                    arity,
                    args.len()
                )));
            }
        }
        match self.body.as_ref() {
            FunctionBody::Native(f) => f(args),
            FunctionBody::Closure(f) => f(args),
        }
    }
}

impl fmt::Debug for NativeFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NativeFunction({}/{:?})", self.name, self.arity)
    }
}

/// `prefix -> local name -> function`. Queried read-only during evaluation.
#[derive(Clone, Default)]
pub struct FunctionMapper {
    functions: HashMap<String, HashMap<String, NativeFunction>>,
}

impl FunctionMapper {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `function` as `prefix:local_name`. An empty `local_name` uses the
    /// function's own name. Returns the binding it replaced.
    pub fn define_function(
        &mut self,
        prefix: &str,
        local_name: &str,
        function: NativeFunction,
    ) -> Option<NativeFunction> {
        let local_name = if local_name.is_empty() {
            function.name().to_string()
        } else {
            local_name.to_string()
        };
        self.functions
            .entry(prefix.to_string())
            .or_insert_with(HashMap::new)
            .insert(local_name, function)
    }

    pub fn resolve_function(&self, prefix: &str, local_name: &str) -> Option<&NativeFunction> {
        self.functions
            .get(prefix)
            .and_then(|names| names.get(local_name))
    }

    pub fn has_prefix(&self, prefix: &str) -> bool {
        self.functions.contains_key(prefix)
    }

    /// Every bound `prefix:name`, sorted.
    pub fn qualified_names(&self) -> Vec<String> {
        let mut names = self
            .functions
            .iter()
            .flat_map(|(prefix, names)| names.keys().map(move |n| format!("{}:{}", prefix, n)))
            .collect::<Vec<_>>();
        names.sort();
        names
    }
}

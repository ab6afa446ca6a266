#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Null,
    Boolean(bool),
    Integer(i64),
    Float(f64),
    String(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Literal(Literal),
    Path(PathExpr),
}

#[derive(Debug, Clone, PartialEq)]
pub struct PathExpr {
    pub root: Root,
    pub segments: Vec<Segment>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Root {
    Identifier(String),
    Call(FunctionCall),
}

#[derive(Debug, Clone, PartialEq)]
pub struct FunctionCall {
    pub prefix: String,
    pub name: String,
    pub arguments: Vec<Expr>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Segment {
    /// `.name`
    Property(String),
    /// `[expr]`
    Index(Box<Expr>),
}

impl Expr {
    /// Visits every path in this expression, including those nested in
    /// index brackets and call arguments.
    pub fn walk_paths<'a>(&'a self, visit: &mut impl FnMut(&'a PathExpr)) {
        if let Expr::Path(path) = self {
            visit(path);
            if let Root::Call(call) = &path.root {
                for arg in &call.arguments {
                    arg.walk_paths(&mut *visit);
                }
            }
            for segment in &path.segments {
                if let Segment::Index(index) = segment {
                    index.walk_paths(&mut *visit);
                }
            }
        }
    }

    /// Root identifiers referenced anywhere in this expression.
    pub fn root_identifiers<'a>(&'a self) -> Vec<&'a str> {
        let mut names = vec![];
        let mut visit = |path: &'a PathExpr| {
            if let Root::Identifier(name) = &path.root {
                if !names.contains(&name.as_str()) {
                    names.push(name.as_str());
                }
            }
        };
        self.walk_paths(&mut visit);
        names
    }

    /// Function calls referenced anywhere in this expression.
    pub fn function_calls<'a>(&'a self) -> Vec<&'a FunctionCall> {
        let mut calls = vec![];
        let mut visit = |path: &'a PathExpr| {
            if let Root::Call(call) = &path.root {
                calls.push(call);
            }
        };
        self.walk_paths(&mut visit);
        calls
    }
}

//! AST definitions for the Python subset
//!
//!     The tree is deliberately small and closed: every statement kind the
//!     encoder treats specially gets its own variant, and everything else is
//!     folded into [`Stmt::Other`] carrying the raw source span. Matching over
//!     [`Stmt`] is therefore exhaustive, and adding a statement kind is a
//!     compile-time-checked extension rather than a silent fallback.
//!
//! Expressions
//!
//!     Expressions are opaque token spans. The encoder and the dump both
//!     consume expression text only after whitespace collapsing, so the parser
//!     never needs to understand operator precedence, call syntax, or literal
//!     shapes. The span text is the sequence of source token slices joined by
//!     single spaces, which keeps comments and physical line breaks out of the
//!     span while preserving every meaningful character (including whitespace
//!     inside string literals).

/// A parsed source unit: the file's base name plus its top-level statements.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Module {
    pub name: String,
    pub body: Vec<Stmt>,
}

impl Module {
    pub fn new(name: impl Into<String>, body: Vec<Stmt>) -> Self {
        Self {
            name: name.into(),
            body,
        }
    }

    /// Top-level function definitions, in source order.
    pub fn functions(&self) -> impl Iterator<Item = &FunctionDef> {
        self.body.iter().filter_map(|s| match s {
            Stmt::FunctionDef(f) => Some(f),
            _ => None,
        })
    }

    /// Top-level class definitions, in source order.
    pub fn classes(&self) -> impl Iterator<Item = &ClassDef> {
        self.body.iter().filter_map(|s| match s {
            Stmt::ClassDef(c) => Some(c),
            _ => None,
        })
    }
}

/// One statement. Closed set; unknown constructs land in `Other`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Stmt {
    /// `import a.b as c, d`
    Import(Vec<Alias>),
    /// `from pkg import a as b, c`; leading relative dots are dropped,
    /// matching the lossy treatment of the encoder.
    ImportFrom { module: String, names: Vec<Alias> },
    FunctionDef(FunctionDef),
    ClassDef(ClassDef),
    /// `a = b = value`: one target per `=`-separated segment except the last.
    Assign { targets: Vec<Expr>, value: Expr },
    Return(Option<Expr>),
    If {
        test: Expr,
        body: Vec<Stmt>,
        orelse: Vec<Stmt>,
    },
    For {
        target: Expr,
        iter: Expr,
        body: Vec<Stmt>,
        orelse: Vec<Stmt>,
    },
    While {
        test: Expr,
        body: Vec<Stmt>,
        orelse: Vec<Stmt>,
    },
    /// An expression used as a statement (calls, docstrings, ...).
    Expr(Expr),
    /// Anything the grammar does not model, kept as raw source text:
    /// `pass`, `raise`, augmented assignment, decorators, whole `try`/`with`
    /// blocks including their suites.
    Other(String),
}

/// An imported name with its optional binding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alias {
    pub name: String,
    pub asname: Option<String>,
}

impl Alias {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            asname: None,
        }
    }

    pub fn with_asname(name: impl Into<String>, asname: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            asname: Some(asname.into()),
        }
    }
}

/// A function definition. Only positional(-or-keyword) parameter names are
/// kept: positional-only parameters, keyword-only parameters, `*args`,
/// `**kwargs`, defaults, and annotations are all dropped at parse time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionDef {
    pub name: String,
    pub params: Vec<String>,
    pub body: Vec<Stmt>,
}

/// A class definition. Bases exclude keyword arguments (`metaclass=...`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassDef {
    pub name: String,
    pub bases: Vec<Expr>,
    pub body: Vec<Stmt>,
}

impl ClassDef {
    /// Direct function-definition members, in source order. Nested classes,
    /// class-level assignments, and everything else are not methods.
    pub fn methods(&self) -> impl Iterator<Item = &FunctionDef> {
        self.body.iter().filter_map(|s| match s {
            Stmt::FunctionDef(f) => Some(f),
            _ => None,
        })
    }
}

/// An expression: an opaque span of source tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expr {
    pub text: String,
}

impl Expr {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

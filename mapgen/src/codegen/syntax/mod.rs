//! Intermediate class declarations
//!
//! Generators describe the classes they want as a [`CompilationUnit`]; the
//! renderer turns it into raw source text. The raw text has no auto-property
//! form: auto properties come out as an empty getter/setter pair and are
//! collapsed afterwards by [`super::post_process`].

mod render;

use std::fmt;
use std::str::FromStr;

use heck::ToLowerCamelCase;
use serde::{Deserialize, Serialize};

use super::type_mapper::TypeRef;
use crate::error::CodegenError;

pub use render::render;

/// Target source language
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Language {
    CSharp,
    VisualBasic,
}

impl Language {
    pub fn file_extension(&self) -> &'static str {
        match self {
            Language::CSharp => "cs",
            Language::VisualBasic => "vb",
        }
    }
}

impl FromStr for Language {
    type Err = CodegenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "csharp" | "c#" | "cs" => Ok(Language::CSharp),
            "vb" | "vbnet" | "vb.net" | "visualbasic" => Ok(Language::VisualBasic),
            other => Err(CodegenError::ConfigurationConflict(format!(
                "unknown target language `{}`",
                other
            ))),
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Language::CSharp => f.write_str("C#"),
            Language::VisualBasic => f.write_str("VB.NET"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Public,
    Private,
}

/// An expression inside a statement or attribute argument
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Str(String),
    Int(i64),
    Bool(bool),
    /// Member selector lambda: `x => x.Name`
    Member(String),
    /// `typeof(T)`
    TypeOf(TypeRef),
    /// `new T()`
    New(TypeRef),
    /// Statement lambda: `map => { map.Column("Id"); }`
    Lambda { param: String, body: Vec<Chain> },
    /// Emitted verbatim, e.g. an enum member such as `Generators.Identity`
    Raw(String),
}

impl Expr {
    pub fn str(value: impl Into<String>) -> Self {
        Expr::Str(value.into())
    }

    pub fn member(name: impl Into<String>) -> Self {
        Expr::Member(name.into())
    }

    pub fn raw(text: impl Into<String>) -> Self {
        Expr::Raw(text.into())
    }

    pub fn lambda(param: impl Into<String>, body: Vec<Chain>) -> Self {
        Expr::Lambda {
            param: param.into(),
            body,
        }
    }
}

/// One link of a call chain; `args: None` is a property access (`.Not`)
#[derive(Debug, Clone, PartialEq)]
pub struct Call {
    pub name: String,
    pub args: Option<Vec<Expr>>,
}

impl Call {
    pub fn new(name: impl Into<String>, args: Vec<Expr>) -> Self {
        Self {
            name: name.into(),
            args: Some(args),
        }
    }

    pub fn access(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            args: None,
        }
    }
}

/// A fluent call chain, optionally on an explicit receiver
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Chain {
    pub target: Option<String>,
    pub calls: Vec<Call>,
}

impl Chain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a chain on a named receiver (`map.Column(...)`)
    pub fn on(target: impl Into<String>) -> Self {
        Self {
            target: Some(target.into()),
            calls: Vec::new(),
        }
    }

    pub fn call(mut self, name: impl Into<String>, args: Vec<Expr>) -> Self {
        self.calls.push(Call::new(name, args));
        self
    }

    pub fn access(mut self, name: impl Into<String>) -> Self {
        self.calls.push(Call::access(name));
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// `Orders = new List<Order>();`
    InitCollection { property: String, ty: TypeRef },
    Chain(Chain),
}

#[derive(Debug, Clone, PartialEq)]
pub enum AttributeArg {
    Positional(Expr),
    Named(String, Expr),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Attribute {
    pub name: String,
    pub args: Vec<AttributeArg>,
}

impl Attribute {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            args: Vec::new(),
        }
    }

    pub fn arg(mut self, value: Expr) -> Self {
        self.args.push(AttributeArg::Positional(value));
        self
    }

    pub fn named(mut self, name: impl Into<String>, value: Expr) -> Self {
        self.args.push(AttributeArg::Named(name.into(), value));
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub name: String,
    pub ty: TypeRef,
    pub visibility: Visibility,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PropertyKind {
    /// Storage is implicit; rendered as an empty accessor pair
    Auto,
    /// Accessors read and write the named field
    Backed { field: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Property {
    pub name: String,
    pub ty: TypeRef,
    pub kind: PropertyKind,
    pub is_virtual: bool,
    pub attributes: Vec<Attribute>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Member {
    Field(Field),
    Property(Property),
}

impl Member {
    pub fn name(&self) -> &str {
        match self {
            Member::Field(f) => &f.name,
            Member::Property(p) => &p.name,
        }
    }

    pub fn ty(&self) -> &TypeRef {
        match self {
            Member::Field(f) => &f.ty,
            Member::Property(p) => &p.ty,
        }
    }

    /// Public members are the class's visible shape; backing fields are not
    pub fn is_public(&self) -> bool {
        match self {
            Member::Field(f) => f.visibility == Visibility::Public,
            Member::Property(_) => true,
        }
    }
}

/// A class with one public parameterless constructor
#[derive(Debug, Clone, PartialEq)]
pub struct ClassDeclaration {
    pub name: String,
    /// Base class first, then interfaces
    pub base_types: Vec<TypeRef>,
    pub is_partial: bool,
    pub attributes: Vec<Attribute>,
    pub members: Vec<Member>,
    pub constructor: Vec<Statement>,
}

impl ClassDeclaration {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            base_types: Vec::new(),
            is_partial: false,
            attributes: Vec::new(),
            members: Vec::new(),
            constructor: Vec::new(),
        }
    }

    /// Public field
    pub fn add_field(&mut self, ty: TypeRef, name: &str) {
        self.members.push(Member::Field(Field {
            name: name.to_string(),
            ty,
            visibility: Visibility::Public,
        }));
    }

    /// Private `_camelCase` field plus a property reading and writing it
    pub fn add_full_property(&mut self, ty: TypeRef, name: &str, is_virtual: bool) -> &mut Property {
        let field = backing_field_name(name);
        self.members.push(Member::Field(Field {
            name: field.clone(),
            ty: ty.clone(),
            visibility: Visibility::Private,
        }));
        self.push_property(ty, name, PropertyKind::Backed { field }, is_virtual)
    }

    pub fn add_auto_property(&mut self, ty: TypeRef, name: &str, is_virtual: bool) -> &mut Property {
        self.push_property(ty, name, PropertyKind::Auto, is_virtual)
    }

    pub fn add_statement(&mut self, statement: Statement) {
        self.constructor.push(statement);
    }

    /// Public members in declaration order (backing fields excluded)
    pub fn public_members(&self) -> impl Iterator<Item = &Member> {
        self.members.iter().filter(|m| m.is_public())
    }

    pub fn find_property(&self, name: &str) -> Option<&Property> {
        self.members.iter().find_map(|m| match m {
            Member::Property(p) if p.name == name => Some(p),
            _ => None,
        })
    }

    fn push_property(
        &mut self,
        ty: TypeRef,
        name: &str,
        kind: PropertyKind,
        is_virtual: bool,
    ) -> &mut Property {
        self.members.push(Member::Property(Property {
            name: name.to_string(),
            ty,
            kind,
            is_virtual,
            attributes: Vec::new(),
        }));
        match self.members.last_mut() {
            Some(Member::Property(p)) => p,
            _ => unreachable!("property was just pushed"),
        }
    }
}

/// Classes sharing one namespace and one output file
#[derive(Debug, Clone, PartialEq)]
pub struct CompilationUnit {
    pub namespace: String,
    pub classes: Vec<ClassDeclaration>,
}

impl CompilationUnit {
    pub fn new(namespace: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            classes: Vec::new(),
        }
    }

    pub fn with_class(mut self, class: ClassDeclaration) -> Self {
        self.classes.push(class);
        self
    }
}

/// `_camelCase` name for the field behind a full property
pub fn backing_field_name(property: &str) -> String {
    format!("_{}", property.to_lower_camel_case())
}

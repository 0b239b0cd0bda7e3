//! Raw C# / VB.NET rendering of compilation units

use super::{
    Attribute, AttributeArg, Chain, ClassDeclaration, CompilationUnit, Expr, Field, Language,
    Member, Property, PropertyKind, Statement, Visibility,
};
use crate::codegen::type_mapper::TypeRef;

const INDENT: &str = "    ";

/// Keywords FluentNHibernate chains use as member names
const VB_KEYWORDS: &[&str] = &["Not", "Default"];

/// Dashed line framing the generated-code banner
pub const BANNER_RULE: &str =
    "------------------------------------------------------------------------------";

const BANNER: &[&str] = &[
    " <auto-generated>",
    "     This code was generated by mapgen.",
    "",
    "     Changes to this file may cause incorrect behavior and will be lost if",
    "     the code is regenerated.",
    " </auto-generated>",
];

/// Render a compilation unit to raw source text.
///
/// The output keeps the generated-code banner and renders auto properties and
/// empty constructors in their long form; see `post_process` for the cleanup.
pub fn render(unit: &CompilationUnit, language: Language) -> String {
    let mut w = SourceWriter::new(language);
    w.banner();
    match language {
        Language::CSharp => csharp_unit(&mut w, unit),
        Language::VisualBasic => vb_unit(&mut w, unit),
    }
    w.out
}

struct SourceWriter {
    language: Language,
    out: String,
    depth: usize,
}

impl SourceWriter {
    fn new(language: Language) -> Self {
        Self {
            language,
            out: String::new(),
            depth: 0,
        }
    }

    fn line(&mut self, text: &str) {
        for _ in 0..self.depth {
            self.out.push_str(INDENT);
        }
        self.out.push_str(text);
        self.out.push('\n');
    }

    fn blank(&mut self) {
        self.out.push('\n');
    }

    fn indent(&mut self) {
        self.depth += 1;
    }

    fn dedent(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    fn banner(&mut self) {
        let comment = match self.language {
            Language::CSharp => "//",
            Language::VisualBasic => "'",
        };
        self.line(&format!("{}{}", comment, BANNER_RULE));
        for text in BANNER {
            let text = format!("{}{}", comment, text);
            self.line(text.trim_end());
        }
        self.line(&format!("{}{}", comment, BANNER_RULE));
        self.blank();
    }

    fn expr(&self, expr: &Expr) -> String {
        ExprRenderer {
            language: self.language,
            depth: self.depth,
        }
        .expr(expr)
    }

    fn chain(&self, chain: &Chain) -> String {
        ExprRenderer {
            language: self.language,
            depth: self.depth,
        }
        .chain(chain)
    }

    fn attribute(&self, attribute: &Attribute) -> String {
        let args = attribute
            .args
            .iter()
            .map(|arg| match arg {
                AttributeArg::Positional(e) => self.expr(e),
                AttributeArg::Named(name, e) => match self.language {
                    Language::CSharp => format!("{} = {}", name, self.expr(e)),
                    Language::VisualBasic => format!("{}:={}", name, self.expr(e)),
                },
            })
            .collect::<Vec<_>>();
        let body = if args.is_empty() {
            attribute.name.clone()
        } else {
            format!("{}({})", attribute.name, args.join(", "))
        };
        match self.language {
            Language::CSharp => format!("[{}]", body),
            Language::VisualBasic => format!("<{}>", body),
        }
    }

    fn ty(&self, ty: &TypeRef) -> String {
        ty.render(self.language)
    }
}

struct ExprRenderer {
    language: Language,
    depth: usize,
}

impl ExprRenderer {
    fn expr(&self, expr: &Expr) -> String {
        match (expr, self.language) {
            (Expr::Str(s), Language::CSharp) => {
                format!("\"{}\"", s.replace('\\', "\\\\").replace('"', "\\\""))
            }
            (Expr::Str(s), Language::VisualBasic) => format!("\"{}\"", s.replace('"', "\"\"")),
            (Expr::Int(i), _) => i.to_string(),
            (Expr::Bool(b), Language::CSharp) => b.to_string(),
            (Expr::Bool(true), Language::VisualBasic) => "True".to_string(),
            (Expr::Bool(false), Language::VisualBasic) => "False".to_string(),
            (Expr::Member(name), Language::CSharp) => format!("x => x.{}", name),
            (Expr::Member(name), Language::VisualBasic) => format!("Function(x) x.{}", name),
            (Expr::TypeOf(ty), Language::CSharp) => format!("typeof({})", ty.render(self.language)),
            (Expr::TypeOf(ty), Language::VisualBasic) => {
                format!("GetType({})", ty.render(self.language))
            }
            (Expr::New(ty), Language::CSharp) => format!("new {}()", ty.render(self.language)),
            (Expr::New(ty), Language::VisualBasic) => format!("New {}()", ty.render(self.language)),
            (Expr::Lambda { param, body }, _) => self.lambda(param, body),
            (Expr::Raw(text), _) => text.clone(),
        }
    }

    fn lambda(&self, param: &str, body: &[Chain]) -> String {
        let statements: Vec<String> = body.iter().map(|c| self.chain(c)).collect();
        match self.language {
            Language::CSharp => match statements.as_slice() {
                [single] => format!("{} => {}", param, single),
                _ => format!("{} => {{ {}; }}", param, statements.join("; ")),
            },
            Language::VisualBasic => match statements.as_slice() {
                [single] => format!("Sub({}) {}", param, single),
                _ => {
                    let inner = INDENT.repeat(self.depth + 1);
                    let outer = INDENT.repeat(self.depth);
                    let lines: Vec<String> =
                        statements.iter().map(|s| format!("{}{}", inner, s)).collect();
                    format!("Sub({})\n{}\n{}End Sub", param, lines.join("\n"), outer)
                }
            },
        }
    }

    /// VB keywords used as member names must be bracketed (`[Not]`)
    fn member_name(&self, name: &str) -> String {
        match self.language {
            Language::VisualBasic if VB_KEYWORDS.iter().any(|k| k.eq_ignore_ascii_case(name)) => {
                format!("[{}]", name)
            }
            _ => name.to_string(),
        }
    }

    fn chain(&self, chain: &Chain) -> String {
        let calls: Vec<String> = chain
            .calls
            .iter()
            .map(|call| {
                let name = self.member_name(&call.name);
                match &call.args {
                    Some(args) => {
                        let args: Vec<String> = args.iter().map(|a| self.expr(a)).collect();
                        format!("{}({})", name, args.join(", "))
                    }
                    None => name,
                }
            })
            .collect();
        let body = calls.join(".");
        match &chain.target {
            Some(target) => format!("{}.{}", target, body),
            None => body,
        }
    }
}

fn csharp_unit(w: &mut SourceWriter, unit: &CompilationUnit) {
    w.line(&format!("namespace {} {{", unit.namespace));
    w.indent();
    for (i, class) in unit.classes.iter().enumerate() {
        if i > 0 {
            w.blank();
        }
        csharp_class(w, class);
    }
    w.dedent();
    w.line("}");
}

fn csharp_class(w: &mut SourceWriter, class: &ClassDeclaration) {
    for attribute in &class.attributes {
        let text = w.attribute(attribute);
        w.line(&text);
    }
    let mut decl = String::from("public ");
    if class.is_partial {
        decl.push_str("partial ");
    }
    decl.push_str("class ");
    decl.push_str(&class.name);
    if !class.base_types.is_empty() {
        let bases: Vec<String> = class.base_types.iter().map(|t| w.ty(t)).collect();
        decl.push_str(" : ");
        decl.push_str(&bases.join(", "));
    }
    decl.push_str(" {");
    w.line(&decl);
    w.indent();

    for member in &class.members {
        match member {
            Member::Field(field) => csharp_field(w, field),
            Member::Property(property) => csharp_property(w, property),
        }
    }

    w.line(&format!("public {}() {{", class.name));
    w.indent();
    for statement in &class.constructor {
        let text = match statement {
            Statement::InitCollection { property, ty } => {
                format!("{} = new {}();", property, w.ty(ty))
            }
            Statement::Chain(chain) => format!("{};", w.chain(chain)),
        };
        w.line(&text);
    }
    w.dedent();
    w.line("}");

    w.dedent();
    w.line("}");
}

fn csharp_field(w: &mut SourceWriter, field: &Field) {
    let visibility = match field.visibility {
        Visibility::Public => "public",
        Visibility::Private => "private",
    };
    let text = format!("{} {} {};", visibility, w.ty(&field.ty), field.name);
    w.line(&text);
}

fn csharp_property(w: &mut SourceWriter, property: &Property) {
    for attribute in &property.attributes {
        let text = w.attribute(attribute);
        w.line(&text);
    }
    let modifier = if property.is_virtual {
        "public virtual"
    } else {
        "public"
    };
    let text = format!("{} {} {} {{", modifier, w.ty(&property.ty), property.name);
    w.line(&text);
    w.indent();
    match &property.kind {
        PropertyKind::Auto => {
            w.line("get {");
            w.line("}");
            w.line("set {");
            w.line("}");
        }
        PropertyKind::Backed { field } => {
            w.line("get {");
            w.indent();
            w.line(&format!("return this.{};", field));
            w.dedent();
            w.line("}");
            w.line("set {");
            w.indent();
            w.line(&format!("this.{} = value;", field));
            w.dedent();
            w.line("}");
        }
    }
    w.dedent();
    w.line("}");
}

fn vb_unit(w: &mut SourceWriter, unit: &CompilationUnit) {
    w.line(&format!("Namespace {}", unit.namespace));
    w.indent();
    for (i, class) in unit.classes.iter().enumerate() {
        if i > 0 {
            w.blank();
        }
        vb_class(w, class);
    }
    w.dedent();
    w.line("End Namespace");
}

/// `IList`, `IEntity`: an `I` followed by an uppercase letter
fn looks_like_interface(ty: &TypeRef) -> bool {
    let name = match ty {
        TypeRef::Named(name) | TypeRef::Generic { name, .. } => name.rsplit('.').next().unwrap_or(name),
        _ => return false,
    };
    let mut chars = name.chars();
    chars.next() == Some('I') && chars.next().is_some_and(|c| c.is_ascii_uppercase())
}

fn vb_class(w: &mut SourceWriter, class: &ClassDeclaration) {
    for attribute in &class.attributes {
        let text = w.attribute(attribute);
        w.line(&text);
    }
    let partial = if class.is_partial { "Partial " } else { "" };
    w.line(&format!("{}Public Class {}", partial, class.name));
    w.indent();

    let mut bases = class.base_types.iter().peekable();
    if let Some(first) = bases.next_if(|t| !looks_like_interface(t)) {
        let text = format!("Inherits {}", w.ty(first));
        w.line(&text);
    }
    let interfaces: Vec<String> = bases.map(|t| w.ty(t)).collect();
    if !interfaces.is_empty() {
        w.line(&format!("Implements {}", interfaces.join(", ")));
    }

    for member in &class.members {
        match member {
            Member::Field(field) => vb_field(w, field),
            Member::Property(property) => vb_property(w, property),
        }
    }

    w.line("Public Sub New()");
    w.indent();
    for statement in &class.constructor {
        let text = match statement {
            Statement::InitCollection { property, ty } => {
                format!("{} = New {}()", property, w.ty(ty))
            }
            Statement::Chain(chain) => w.chain(chain),
        };
        w.line(&text);
    }
    w.dedent();
    w.line("End Sub");

    w.dedent();
    w.line("End Class");
}

fn vb_field(w: &mut SourceWriter, field: &Field) {
    let visibility = match field.visibility {
        Visibility::Public => "Public",
        Visibility::Private => "Private",
    };
    let text = format!("{} {} As {}", visibility, field.name, w.ty(&field.ty));
    w.line(&text);
}

fn vb_property(w: &mut SourceWriter, property: &Property) {
    for attribute in &property.attributes {
        let text = w.attribute(attribute);
        w.line(&text);
    }
    let modifier = if property.is_virtual {
        "Public Overridable"
    } else {
        "Public"
    };
    let text = format!("{} Property {} As {}", modifier, property.name, w.ty(&property.ty));
    w.line(&text);
    w.indent();
    match &property.kind {
        PropertyKind::Auto => {
            w.line("Get");
            w.line("End Get");
            w.line("Set");
            w.line("End Set");
        }
        PropertyKind::Backed { field } => {
            w.line("Get");
            w.indent();
            w.line(&format!("Return Me.{}", field));
            w.dedent();
            w.line("End Get");
            w.line("Set");
            w.indent();
            w.line(&format!("Me.{} = value", field));
            w.dedent();
            w.line("End Set");
        }
    }
    w.dedent();
    w.line("End Property");
}

//! Castle ActiveRecord classes

use super::dialect::IdGenerator;
use super::entity::{EntityMember, EntityShape, MemberKind};
use super::generator::{Artifact, Generator};
use super::syntax::{Attribute, ClassDeclaration, CompilationUnit, Expr, Statement};
use super::type_mapper::{ClrType, TypeRef};
use crate::config::Preferences;
use crate::error::Result;
use crate::parser::Table;

const ACTIVE_RECORD_IMPORT: &str = "Castle.ActiveRecord";

/// Emits one attributed class deriving from `ActiveRecordBase<T>`.
///
/// A composite key becomes a sibling `<Class>Key` class holding the key
/// properties, referenced through a `[CompositeKey]` property named `Key`.
pub struct ActiveRecordGenerator;

impl Generator for ActiveRecordGenerator {
    fn name(&self) -> &'static str {
        "active_record"
    }

    fn generate(&self, table: &Table, prefs: &Preferences) -> Result<Vec<Artifact>> {
        let shape = EntityShape::build(table, prefs)?;
        let mut unit = CompilationUnit::new(&prefs.namespace);
        if shape.has_composite_key() {
            unit.classes.push(composite_key_class(&shape));
        }
        unit.classes.push(record_class(&shape, prefs));
        Ok(vec![Artifact::source(
            prefs.source_file_name(&shape.class_name),
            &unit,
            prefs,
            &[ACTIVE_RECORD_IMPORT],
        )])
    }
}

fn record_class(shape: &EntityShape, prefs: &Preferences) -> ClassDeclaration {
    let mut class = ClassDeclaration::new(&shape.class_name);
    class.is_partial = prefs.partial;
    class.attributes.push(
        Attribute::new("ActiveRecord")
            .arg(Expr::str(&shape.table_name))
            .named("Lazy", Expr::Bool(prefs.use_lazy)),
    );
    class.base_types.push(TypeRef::generic(
        "ActiveRecordBase",
        TypeRef::named(&shape.class_name),
    ));
    class
        .base_types
        .extend(prefs.base_types.iter().map(TypeRef::named));

    if shape.has_composite_key() {
        class
            .add_auto_property(key_class_type(shape), "Key", prefs.use_lazy)
            .attributes
            .push(Attribute::new("CompositeKey"));
    } else if let Some(key) = shape.keys().next() {
        class
            .add_auto_property(key.ty.clone(), &key.name, prefs.use_lazy)
            .attributes
            .push(primary_key_attribute(key, prefs));
    }

    for member in &shape.members {
        let attribute = match &member.kind {
            MemberKind::Key => continue,
            MemberKind::Value => property_attribute(member),
            MemberKind::Reference { .. } => {
                Attribute::new("BelongsTo").arg(Expr::str(&member.column))
            }
            MemberKind::Collection { element, concrete } => {
                class.add_statement(Statement::InitCollection {
                    property: member.name.clone(),
                    ty: concrete.clone(),
                });
                Attribute::new("HasMany")
                    .arg(Expr::TypeOf(TypeRef::named(element)))
                    .named("ColumnKey", Expr::str(&member.column))
                    .named("Inverse", Expr::Bool(true))
                    .named("Lazy", Expr::Bool(prefs.use_lazy))
            }
        };
        class
            .add_auto_property(member.ty.clone(), &member.name, prefs.use_lazy)
            .attributes
            .push(attribute);
    }
    class
}

fn composite_key_class(shape: &EntityShape) -> ClassDeclaration {
    let mut key_class = ClassDeclaration::new(format!("{}Key", shape.class_name));
    // Equals and GetHashCode belong in the partial counterpart
    key_class.is_partial = true;
    key_class.attributes.push(Attribute::new("Serializable"));
    for key in shape.keys() {
        key_class
            .add_auto_property(key.ty.clone(), &key.name, false)
            .attributes
            .push(Attribute::new("KeyProperty").named("Column", Expr::str(&key.column)));
    }
    key_class
}

fn key_class_type(shape: &EntityShape) -> TypeRef {
    TypeRef::named(format!("{}Key", shape.class_name))
}

fn primary_key_attribute(key: &EntityMember, prefs: &Preferences) -> Attribute {
    let generator = prefs
        .dialect
        .behaviour()
        .id_generator(key.clr_type.unwrap_or(ClrType::Int32), &prefs.sequence_name);
    let kind = match &generator {
        IdGenerator::Assigned => "Assigned",
        IdGenerator::Identity => "Identity",
        IdGenerator::Native => "Native",
        IdGenerator::GuidComb => "GuidComb",
        IdGenerator::Sequence(_) => "Sequence",
    };
    let mut attribute = Attribute::new("PrimaryKey")
        .arg(Expr::raw(format!("PrimaryKeyType.{}", kind)))
        .arg(Expr::str(&key.column));
    if let IdGenerator::Sequence(name) = &generator {
        attribute = attribute.named("SequenceName", Expr::str(name));
    }
    attribute
}

fn property_attribute(value: &EntityMember) -> Attribute {
    let mut attribute = Attribute::new("Property").named("Column", Expr::str(&value.column));
    if !value.nullable {
        attribute = attribute.named("NotNull", Expr::Bool(true));
    }
    if let (Some(ClrType::String), Some(length)) = (value.clr_type, value.length) {
        attribute = attribute.named("Length", Expr::Int(i64::from(length)));
    }
    if value.is_foreign_key {
        attribute = attribute
            .named("Insert", Expr::Bool(false))
            .named("Update", Expr::Bool(false));
    }
    attribute
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codegen::syntax::Language;
    use crate::codegen::test_support::{customer, order_line, orders, preferences};

    fn content(table: &Table, prefs: &Preferences) -> String {
        ActiveRecordGenerator.generate(table, prefs).unwrap()[0].content()
    }

    #[test]
    fn test_attributes_and_base_type() {
        let text = content(&customer(), &preferences());
        assert!(text.contains("using Castle.ActiveRecord;\n"));
        assert!(text.contains(
            "    [ActiveRecord(\"Customer\", Lazy = true)]\n    public class Customer : ActiveRecordBase<Customer> {\n"
        ));
        assert!(text.contains(
            "        [PrimaryKey(PrimaryKeyType.Identity, \"CustomerId\")]\n        public virtual int CustomerId { get; set; }\n"
        ));
        assert!(text.contains(
            "        [Property(Column = \"Name\", NotNull = true, Length = 100)]\n        public virtual string Name { get; set; }\n"
        ));
        assert!(text.contains(
            "        [HasMany(typeof(Order), ColumnKey = \"CustomerId\", Inverse = true, Lazy = true)]\n        public virtual IList<Order> Orders { get; set; }\n"
        ));
        assert!(text.contains("            Orders = new List<Order>();\n"));
    }

    #[test]
    fn test_belongs_to() {
        let text = content(&orders(), &preferences());
        assert!(text.contains(
            "        [BelongsTo(\"CustomerId\")]\n        public virtual Customer Customer { get; set; }\n"
        ));
        assert!(text.contains("        [Property(Column = \"Total\")]\n"));
    }

    #[test]
    fn test_auto_properties_regardless_of_convention() {
        let mut prefs = preferences();
        prefs.field_convention = crate::config::FieldGenerationConvention::Field;
        let text = content(&customer(), &prefs);
        assert!(text.contains("public virtual string Name { get; set; }"));
    }

    #[test]
    fn test_composite_key_class() {
        let text = content(&order_line(), &preferences());
        assert!(text.contains(
            "    [Serializable]\n    public partial class OrderLineKey {\n        [KeyProperty(Column = \"OrderId\")]\n        public int OrderId { get; set; }\n"
        ));
        assert!(text.contains(
            "        [CompositeKey]\n        public virtual OrderLineKey Key { get; set; }\n"
        ));
        assert!(!text.contains("[PrimaryKey"));
    }

    #[test]
    fn test_visual_basic_attributes() {
        let mut prefs = preferences();
        prefs.language = Language::VisualBasic;
        let text = content(&customer(), &prefs);
        assert!(text.contains("    <ActiveRecord(\"Customer\", Lazy:=True)>\n    Public Class Customer\n"));
        assert!(text.contains("        Inherits ActiveRecordBase(Of Customer)\n"));
        assert!(text.contains("        <HasMany(GetType(Order), ColumnKey:=\"CustomerId\", Inverse:=True, Lazy:=True)>\n"));
    }
}

//! Plain domain class generation

use super::entity::{EntityMember, EntityShape, MemberKind};
use super::generator::{Artifact, Generator};
use super::syntax::{ClassDeclaration, CompilationUnit, Statement};
use super::type_mapper::TypeRef;
use crate::config::{FieldGenerationConvention, Preferences};
use crate::error::Result;
use crate::parser::Table;

/// Emits `<prefix><Singular>.<ext>` holding the domain class
pub struct DomainGenerator;

impl Generator for DomainGenerator {
    fn name(&self) -> &'static str {
        "domain"
    }

    fn generate(&self, table: &Table, prefs: &Preferences) -> Result<Vec<Artifact>> {
        let shape = EntityShape::build(table, prefs)?;
        let unit = CompilationUnit::new(&prefs.namespace).with_class(domain_class(&shape, prefs));
        Ok(vec![Artifact::source(
            prefs.source_file_name(&shape.class_name),
            &unit,
            prefs,
            &[],
        )])
    }
}

/// The domain class for an entity, honoring the member convention.
///
/// Collections are always auto properties and get initialized in the
/// constructor with the concrete collection type.
pub fn domain_class(shape: &EntityShape, prefs: &Preferences) -> ClassDeclaration {
    let mut class = ClassDeclaration::new(&shape.class_name);
    class.is_partial = prefs.partial;
    class.base_types = prefs.base_types.iter().map(TypeRef::named).collect();

    for member in &shape.members {
        if let MemberKind::Collection { concrete, .. } = &member.kind {
            class.add_auto_property(member.ty.clone(), &member.name, prefs.use_lazy);
            class.add_statement(Statement::InitCollection {
                property: member.name.clone(),
                ty: concrete.clone(),
            });
            continue;
        }
        add_member(&mut class, member, prefs);
    }
    class
}

fn add_member(class: &mut ClassDeclaration, member: &EntityMember, prefs: &Preferences) {
    match prefs.field_convention {
        FieldGenerationConvention::Field => class.add_field(member.ty.clone(), &member.name),
        FieldGenerationConvention::Property => {
            class.add_full_property(member.ty.clone(), &member.name, prefs.use_lazy);
        }
        FieldGenerationConvention::AutoProperty => {
            class.add_auto_property(member.ty.clone(), &member.name, prefs.use_lazy);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codegen::syntax::{Language, Member, PropertyKind};
    use crate::codegen::test_support::{column, customer, orders, preferences, table};
    use crate::codegen::type_mapper::ClrType;

    fn id_name_table() -> Table {
        let mut t = table(
            "Product",
            &["Id"],
            vec![column("Id", "int", false), column("Name", "nvarchar", true)],
        );
        t.resolve_key_flags();
        t
    }

    #[test]
    fn test_two_columns_two_members_no_statements() {
        for convention in [
            FieldGenerationConvention::Field,
            FieldGenerationConvention::Property,
            FieldGenerationConvention::AutoProperty,
        ] {
            let mut prefs = preferences();
            prefs.field_convention = convention;
            let shape = EntityShape::build(&id_name_table(), &prefs).unwrap();
            let class = domain_class(&shape, &prefs);
            let names: Vec<&str> = class.public_members().map(|m| m.name()).collect();
            assert_eq!(names, vec!["Id", "Name"], "{convention:?}");
            assert!(class.constructor.is_empty());
        }
    }

    #[test]
    fn test_full_properties_have_backing_fields() {
        let mut prefs = preferences();
        prefs.field_convention = FieldGenerationConvention::Property;
        let shape = EntityShape::build(&id_name_table(), &prefs).unwrap();
        let class = domain_class(&shape, &prefs);
        assert_eq!(class.members.len(), 4);
        assert_eq!(
            class.find_property("Name").unwrap().kind,
            PropertyKind::Backed {
                field: "_name".to_string()
            }
        );
    }

    #[test]
    fn test_fields_are_public() {
        let mut prefs = preferences();
        prefs.field_convention = FieldGenerationConvention::Field;
        let shape = EntityShape::build(&id_name_table(), &prefs).unwrap();
        let class = domain_class(&shape, &prefs);
        assert!(class
            .members
            .iter()
            .all(|m| matches!(m, Member::Field(_)) && m.is_public()));
    }

    #[test]
    fn test_has_many_collection_and_initializer() {
        let prefs = preferences();
        let shape = EntityShape::build(&customer(), &prefs).unwrap();
        let class = domain_class(&shape, &prefs);

        let orders = class.find_property("Orders").unwrap();
        assert_eq!(orders.ty, TypeRef::generic("IList", TypeRef::named("Order")));
        assert_eq!(
            class.constructor,
            vec![Statement::InitCollection {
                property: "Orders".to_string(),
                ty: TypeRef::generic("List", TypeRef::named("Order")),
            }]
        );
    }

    #[test]
    fn test_reference_member() {
        let prefs = preferences();
        let shape = EntityShape::build(&orders(), &prefs).unwrap();
        let class = domain_class(&shape, &prefs);
        assert_eq!(
            class.find_property("Customer").unwrap().ty,
            TypeRef::named("Customer")
        );
        assert!(class.find_property("CustomerId").is_none());
        assert_eq!(
            class.find_property("Total").unwrap().ty,
            TypeRef::Nullable(ClrType::Decimal)
        );
    }

    #[test]
    fn test_lazy_partial_prefix_and_bases() {
        let mut prefs = preferences();
        prefs.use_lazy = false;
        prefs.partial = true;
        prefs.class_name_prefix = "Db".to_string();
        prefs.base_types = vec!["EntityBase".to_string(), "IAuditable".to_string()];

        let artifacts = DomainGenerator.generate(&customer(), &prefs).unwrap();
        assert_eq!(artifacts.len(), 1);
        assert_eq!(artifacts[0].file_name, "DbCustomer.cs");

        let text = artifacts[0].content();
        assert!(text.contains("public partial class DbCustomer : EntityBase, IAuditable {"));
        assert!(text.contains("public int CustomerId { get; set; }"));
        assert!(text.contains("public IList<DbOrder> Orders { get; set; }"));
        assert!(text.contains("Orders = new List<DbOrder>();"));
        assert!(!text.contains("virtual"));
    }

    #[test]
    fn test_final_csharp_text() {
        let artifacts = DomainGenerator.generate(&id_name_table(), &preferences()).unwrap();
        assert_eq!(
            artifacts[0].content(),
            "using System;
using System.Text;
using System.Collections.Generic;

namespace Shop {
    public class Product {
        public virtual int Id { get; set; }
        public virtual string Name { get; set; }
        public Product() { }
    }
}
"
        );
    }

    #[test]
    fn test_final_vb_text() {
        let mut prefs = preferences();
        prefs.language = Language::VisualBasic;
        let artifacts = DomainGenerator.generate(&id_name_table(), &prefs).unwrap();
        assert_eq!(artifacts[0].file_name, "Product.vb");
        assert_eq!(
            artifacts[0].content(),
            "Imports System
Imports System.Text
Imports System.Collections.Generic

Namespace Shop
    Public Class Product
        Public Overridable Property Id As Integer
        Public Overridable Property Name As String
        Public Sub New()
        End Sub
    End Class
End Namespace
"
        );
    }
}

//! NHibernate mapping-by-code (`ClassMapping<T>`) generation
//!
//! The convention variant declares only table, id and relationships and lets
//! a model mapper's conventions pick up plain columns; the explicit variant
//! adds a `Property` call per column.

use super::dialect::IdGenerator;
use super::domain_generator::domain_class;
use super::entity::{is_set_collection, EntityMember, EntityShape};
use super::generator::{Artifact, Generator};
use super::syntax::{Chain, ClassDeclaration, CompilationUnit, Expr, Language, Statement};
use super::type_mapper::{ClrType, TypeRef};
use crate::config::Preferences;
use crate::error::{CodegenError, Result};
use crate::parser::Table;

const BY_CODE_IMPORTS: &[&str] = &[
    "NHibernate.Mapping.ByCode",
    "NHibernate.Mapping.ByCode.Conformist",
];

/// Emits the domain class and its `<Class>Map` in one file
pub struct ByCodeGenerator {
    /// Map every column explicitly instead of leaving plain columns to convention
    pub explicit_columns: bool,
}

impl ByCodeGenerator {
    pub fn convention() -> Self {
        Self {
            explicit_columns: false,
        }
    }

    pub fn explicit() -> Self {
        Self {
            explicit_columns: true,
        }
    }
}

impl Generator for ByCodeGenerator {
    fn name(&self) -> &'static str {
        if self.explicit_columns {
            "by_code"
        } else {
            "convention"
        }
    }

    fn generate(&self, table: &Table, prefs: &Preferences) -> Result<Vec<Artifact>> {
        if prefs.language != Language::CSharp {
            return Err(CodegenError::ConfigurationConflict(format!(
                "mapping by code needs C#, not {}",
                prefs.language
            )));
        }

        let shape = EntityShape::build(table, prefs)?;
        let unit = CompilationUnit::new(&prefs.namespace)
            .with_class(domain_class(&shape, prefs))
            .with_class(self.class_mapping(&shape, prefs));
        Ok(vec![Artifact::source(
            prefs.source_file_name(&shape.class_name),
            &unit,
            prefs,
            BY_CODE_IMPORTS,
        )])
    }
}

impl ByCodeGenerator {
    /// `public class CustomerMap : ClassMapping<Customer>`
    pub fn class_mapping(&self, shape: &EntityShape, prefs: &Preferences) -> ClassDeclaration {
        let mut map = ClassDeclaration::new(format!("{}Map", shape.class_name));
        map.base_types
            .push(TypeRef::generic("ClassMapping", TypeRef::named(&shape.class_name)));

        map.add_statement(call("Table", vec![Expr::str(&shape.table_name)]));
        map.add_statement(call("Lazy", vec![Expr::Bool(prefs.use_lazy)]));

        let keys: Vec<&EntityMember> = shape.keys().collect();
        if let [key] = keys.as_slice() {
            map.add_statement(call(
                "Id",
                vec![
                    Expr::member(&key.name),
                    Expr::lambda("map", vec![column(&key.column), id_generator(key, prefs)]),
                ],
            ));
        } else if !keys.is_empty() {
            let parts = keys
                .iter()
                .map(|key| {
                    let column = Chain::on("m").call("Column", vec![Expr::str(&key.column)]);
                    Chain::on("compId").call(
                        "Property",
                        vec![Expr::member(&key.name), Expr::lambda("m", vec![column])],
                    )
                })
                .collect();
            map.add_statement(call("ComposedId", vec![Expr::lambda("compId", parts)]));
        }

        if self.explicit_columns {
            for value in shape.values() {
                let mut body = vec![column(&value.column)];
                if !value.nullable {
                    body.push(Chain::on("map").call("NotNullable", vec![Expr::Bool(true)]));
                }
                if let (Some(ClrType::String), Some(length)) = (value.clr_type, value.length) {
                    body.push(Chain::on("map").call("Length", vec![Expr::Int(i64::from(length))]));
                }
                map.add_statement(call(
                    "Property",
                    vec![Expr::member(&value.name), Expr::lambda("map", body)],
                ));
            }
        }

        for reference in shape.references() {
            map.add_statement(call(
                "ManyToOne",
                vec![
                    Expr::member(&reference.name),
                    Expr::lambda("map", vec![column(&reference.column)]),
                ],
            ));
        }

        let collection = if is_set_collection(&prefs.collection_type) {
            "Set"
        } else {
            "Bag"
        };
        for member in shape.collections() {
            let key = Expr::lambda(
                "k",
                vec![Chain::on("k").call("Column", vec![Expr::str(&member.column)])],
            );
            map.add_statement(call(
                collection,
                vec![
                    Expr::member(&member.name),
                    Expr::lambda(
                        "colmap",
                        vec![
                            Chain::on("colmap").call("Key", vec![key]),
                            Chain::on("colmap").call("Inverse", vec![Expr::Bool(true)]),
                        ],
                    ),
                    Expr::lambda("map", vec![Chain::on("map").call("OneToMany", vec![])]),
                ],
            ));
        }

        map
    }
}

fn call(name: &str, args: Vec<Expr>) -> Statement {
    Statement::Chain(Chain::new().call(name, args))
}

fn column(name: &str) -> Chain {
    Chain::on("map").call("Column", vec![Expr::str(name)])
}

fn id_generator(key: &EntityMember, prefs: &Preferences) -> Chain {
    let generator = prefs
        .dialect
        .behaviour()
        .id_generator(key.clr_type.unwrap_or(ClrType::Int32), &prefs.sequence_name);
    let args = match &generator {
        IdGenerator::Assigned => vec![Expr::raw("Generators.Assigned")],
        IdGenerator::Identity => vec![Expr::raw("Generators.Identity")],
        IdGenerator::Native => vec![Expr::raw("Generators.Native")],
        IdGenerator::GuidComb => vec![Expr::raw("Generators.GuidComb")],
        IdGenerator::Sequence(name) => vec![
            Expr::raw("Generators.Sequence"),
            Expr::raw(format!(
                "g => g.Params(new {{ sequence = \"{}\" }})",
                name.replace('"', "\\\"")
            )),
        ],
    };
    Chain::on("map").call("Generator", args)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codegen::dialect::Dialect;
    use crate::codegen::test_support::{customer, order_line, orders, preferences};
    use crate::config::PrimaryStrategy;

    fn content(generator: ByCodeGenerator, table: &Table, prefs: &Preferences) -> String {
        generator.generate(table, prefs).unwrap()[0].content()
    }

    #[test]
    fn test_convention_leaves_columns_out() {
        let text = content(ByCodeGenerator::convention(), &customer(), &preferences());
        assert!(text.contains("using NHibernate.Mapping.ByCode;\nusing NHibernate.Mapping.ByCode.Conformist;\n"));
        assert!(text.contains("    public class CustomerMap : ClassMapping<Customer> {"));
        assert!(text.contains("            Table(\"Customer\");\n            Lazy(true);\n"));
        assert!(text.contains(
            "            Id(x => x.CustomerId, map => { map.Column(\"CustomerId\"); map.Generator(Generators.Identity); });\n"
        ));
        assert!(!text.contains("Property(x => x.Name"));
        assert!(text.contains(
            "            Bag(x => x.Orders, colmap => { colmap.Key(k => k.Column(\"CustomerId\")); colmap.Inverse(true); }, map => map.OneToMany());\n"
        ));
    }

    #[test]
    fn test_explicit_maps_every_column() {
        let text = content(ByCodeGenerator::explicit(), &customer(), &preferences());
        assert!(text.contains(
            "            Property(x => x.Name, map => { map.Column(\"Name\"); map.NotNullable(true); map.Length(100); });\n"
        ));
    }

    #[test]
    fn test_many_to_one_and_nullable_value() {
        let text = content(ByCodeGenerator::explicit(), &orders(), &preferences());
        assert!(text.contains("            ManyToOne(x => x.Customer, map => map.Column(\"CustomerId\"));\n"));
        assert!(text.contains("            Property(x => x.Total, map => map.Column(\"Total\"));\n"));
    }

    #[test]
    fn test_composed_id() {
        let text = content(ByCodeGenerator::convention(), &order_line(), &preferences());
        assert!(text.contains(
            "            ComposedId(compId => { compId.Property(x => x.OrderId, m => m.Column(\"OrderId\")); compId.Property(x => x.LineNo, m => m.Column(\"LineNo\")); });\n"
        ));
    }

    #[test]
    fn test_sequence_generator() {
        let mut prefs = preferences();
        prefs.dialect = Dialect::Oracle;
        prefs.sequence_name = "SEQ_CUSTOMER".to_string();
        let mut table = customer();
        table.columns[0].data_type = "integer".to_string();
        table.columns[1].data_type = "varchar2".to_string();
        let text = content(ByCodeGenerator::convention(), &table, &prefs);
        assert!(text.contains(
            "map.Generator(Generators.Sequence, g => g.Params(new { sequence = \"SEQ_CUSTOMER\" }))"
        ));
    }

    #[test]
    fn test_visual_basic_rejected() {
        let mut prefs = preferences();
        prefs.strategy = PrimaryStrategy::ByCode;
        prefs.language = Language::VisualBasic;
        let err = ByCodeGenerator::explicit()
            .generate(&customer(), &prefs)
            .unwrap_err();
        assert!(matches!(err, CodegenError::ConfigurationConflict(_)));
    }
}

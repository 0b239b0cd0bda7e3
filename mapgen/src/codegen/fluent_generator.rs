//! FluentNHibernate `ClassMap<T>` generation

use super::dialect::IdGenerator;
use super::domain_generator::domain_class;
use super::entity::{is_set_collection, EntityShape};
use super::generator::{Artifact, Generator};
use super::syntax::{Chain, ClassDeclaration, CompilationUnit, Expr, Statement};
use super::type_mapper::{ClrType, TypeRef};
use crate::config::Preferences;
use crate::error::Result;
use crate::parser::Table;

const FLUENT_IMPORT: &str = "FluentNHibernate.Mapping";

/// Emits the domain class and its `<Class>Map` in one file
pub struct FluentGenerator;

impl Generator for FluentGenerator {
    fn name(&self) -> &'static str {
        "fluent"
    }

    fn generate(&self, table: &Table, prefs: &Preferences) -> Result<Vec<Artifact>> {
        let shape = EntityShape::build(table, prefs)?;
        let unit = CompilationUnit::new(&prefs.namespace)
            .with_class(domain_class(&shape, prefs))
            .with_class(class_map(&shape, prefs));
        Ok(vec![Artifact::source(
            prefs.source_file_name(&shape.class_name),
            &unit,
            prefs,
            &[FLUENT_IMPORT],
        )])
    }
}

/// `public class CustomerMap : ClassMap<Customer>` with the mapping in its constructor
pub fn class_map(shape: &EntityShape, prefs: &Preferences) -> ClassDeclaration {
    let mut map = ClassDeclaration::new(format!("{}Map", shape.class_name));
    map.base_types
        .push(TypeRef::generic("ClassMap", TypeRef::named(&shape.class_name)));

    map.add_statement(call("Table", vec![Expr::str(&shape.table_name)]));
    let lazy = if prefs.use_lazy {
        Chain::new().call("LazyLoad", vec![])
    } else {
        Chain::new().access("Not").call("LazyLoad", vec![])
    };
    map.add_statement(Statement::Chain(lazy));

    let keys: Vec<_> = shape.keys().collect();
    if let [key] = keys.as_slice() {
        let generator = prefs
            .dialect
            .behaviour()
            .id_generator(key.clr_type.unwrap_or(ClrType::Int32), &prefs.sequence_name);
        let chain = Chain::new()
            .call("Id", vec![Expr::member(&key.name)])
            .access("GeneratedBy");
        let chain = match &generator {
            IdGenerator::Assigned => chain.call("Assigned", vec![]),
            IdGenerator::Identity => chain.call("Identity", vec![]),
            IdGenerator::Native => chain.call("Native", vec![]),
            IdGenerator::GuidComb => chain.call("GuidComb", vec![]),
            IdGenerator::Sequence(name) => chain.call("Sequence", vec![Expr::str(name)]),
        };
        map.add_statement(Statement::Chain(
            chain.call("Column", vec![Expr::str(&key.column)]),
        ));
    } else if !keys.is_empty() {
        let mut chain = Chain::new().call("CompositeId", vec![]);
        for key in &keys {
            chain = chain.call(
                "KeyProperty",
                vec![Expr::member(&key.name), Expr::str(&key.column)],
            );
        }
        map.add_statement(Statement::Chain(chain));
    }

    for value in shape.values() {
        let mut chain = Chain::new()
            .call("Map", vec![Expr::member(&value.name)])
            .call("Column", vec![Expr::str(&value.column)]);
        if !value.nullable {
            chain = chain.access("Not").call("Nullable", vec![]);
        }
        if let (Some(ClrType::String), Some(length)) = (value.clr_type, value.length) {
            chain = chain.call("Length", vec![Expr::Int(i64::from(length))]);
        }
        map.add_statement(Statement::Chain(chain));
    }

    for reference in shape.references() {
        map.add_statement(Statement::Chain(
            Chain::new()
                .call("References", vec![Expr::member(&reference.name)])
                .call("Column", vec![Expr::str(&reference.column)]),
        ));
    }

    for collection in shape.collections() {
        let mut chain = Chain::new()
            .call("HasMany", vec![Expr::member(&collection.name)])
            .call("KeyColumn", vec![Expr::str(&collection.column)])
            .call("Inverse", vec![]);
        if is_set_collection(&prefs.collection_type) {
            chain = chain.call("AsSet", vec![]);
        }
        map.add_statement(Statement::Chain(chain));
    }

    map
}

fn call(name: &str, args: Vec<Expr>) -> Statement {
    Statement::Chain(Chain::new().call(name, args))
}

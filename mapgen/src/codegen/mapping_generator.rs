//! `.hbm.xml` mapping documents

use super::dialect::IdGenerator;
use super::entity::{is_set_collection, EntityMember, EntityShape, MemberKind};
use super::generator::{Artifact, Generator};
use super::type_mapper::ClrType;
use super::xml::{self, XmlElement};
use crate::config::Preferences;
use crate::error::Result;
use crate::parser::Table;

/// NHibernate mapping schema namespace
pub const MAPPING_XMLNS: &str = "urn:nhibernate-mapping-2.2";

/// Emits `<prefix><Singular>.hbm.xml`; the domain class is left to the user
pub struct MappingGenerator;

impl Generator for MappingGenerator {
    fn name(&self) -> &'static str {
        "xml"
    }

    fn generate(&self, table: &Table, prefs: &Preferences) -> Result<Vec<Artifact>> {
        let shape = EntityShape::build(table, prefs)?;
        let document = mapping_document(&shape, prefs);
        Ok(vec![Artifact::xml(
            prefs.file_name(&shape.class_name, "hbm.xml"),
            format!("{}\n", xml::document(&document, true)),
        )])
    }
}

/// The `hibernate-mapping` element for one entity
pub fn mapping_document(shape: &EntityShape, prefs: &Preferences) -> XmlElement {
    let mut class = XmlElement::new("class")
        .attr("name", prefs.qualified_class_name(&shape.table_name))
        .attr("table", &shape.table_name)
        .attr("lazy", prefs.use_lazy.to_string());

    let keys: Vec<&EntityMember> = shape.keys().collect();
    match keys.as_slice() {
        [] => {}
        [key] => class.push(id_element(key, prefs)),
        _ => {
            let mut composite = XmlElement::new("composite-id");
            for key in &keys {
                composite.push(
                    XmlElement::new("key-property")
                        .attr("name", &key.name)
                        .attr("column", &key.column)
                        .attr_opt("type", key.clr_type.map(|t| t.clr_name())),
                );
            }
            class.push(composite);
        }
    }

    for value in shape.values() {
        class.push(property_element(value));
    }

    for reference in shape.references() {
        if let MemberKind::Reference { class_name } = &reference.kind {
            class.push(
                XmlElement::new("many-to-one")
                    .attr("name", &reference.name)
                    .attr("class", class_name)
                    .attr("column", &reference.column),
            );
        }
    }

    for collection in shape.collections() {
        if let MemberKind::Collection { element, .. } = &collection.kind {
            let tag = if is_set_collection(&prefs.collection_type) {
                "set"
            } else {
                "bag"
            };
            class.push(
                XmlElement::new(tag)
                    .attr("name", &collection.name)
                    .attr("inverse", "true")
                    .attr("lazy", prefs.use_lazy.to_string())
                    .child(XmlElement::new("key").attr("column", &collection.column))
                    .child(XmlElement::new("one-to-many").attr("class", element)),
            );
        }
    }

    XmlElement::new("hibernate-mapping")
        .attr("assembly", &prefs.assembly_name)
        .attr("xmlns", MAPPING_XMLNS)
        .child(class)
}

fn id_element(key: &EntityMember, prefs: &Preferences) -> XmlElement {
    let key_type = key.clr_type.unwrap_or(ClrType::Int32);
    let strategy = prefs
        .dialect
        .behaviour()
        .id_generator(key_type, &prefs.sequence_name);

    let mut generator = XmlElement::new("generator").attr("class", strategy.class_name());
    if let IdGenerator::Sequence(sequence) = &strategy {
        generator.push(
            XmlElement::new("param")
                .attr("name", "sequence")
                .text(sequence),
        );
    }

    XmlElement::new("id")
        .attr("name", &key.name)
        .attr("column", &key.column)
        .attr("type", key_type.clr_name())
        .child(generator)
}

fn property_element(value: &EntityMember) -> XmlElement {
    let length = match value.clr_type {
        Some(ClrType::String) => value.length.map(|l| l.to_string()),
        _ => None,
    };
    let mut element = XmlElement::new("property")
        .attr("name", &value.name)
        .attr("column", &value.column)
        .attr_opt("type", value.clr_type.map(|t| t.clr_name()))
        .attr("not-null", (!value.nullable).to_string())
        .attr_opt("length", length);
    // The column is already written through the many-to-one
    if value.is_foreign_key {
        element = element.attr("insert", "false").attr("update", "false");
    }
    element
}

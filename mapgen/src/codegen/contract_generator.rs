//! WCF data-contract classes

use super::entity::EntityShape;
use super::generator::{Artifact, Generator};
use super::syntax::{Attribute, ClassDeclaration, CompilationUnit};
use crate::config::Preferences;
use crate::error::Result;
use crate::parser::Table;

const SERIALIZATION_IMPORT: &str = "System.Runtime.Serialization";

/// Emits `<Class>Contract.<ext>`: a `[DataContract]` mirror of the key and value columns
pub struct ContractGenerator;

impl Generator for ContractGenerator {
    fn name(&self) -> &'static str {
        "contract"
    }

    fn generate(&self, table: &Table, prefs: &Preferences) -> Result<Vec<Artifact>> {
        let shape = EntityShape::build(table, prefs)?;
        let contract = contract_class(&shape, prefs);
        let file_name = prefs.source_file_name(&contract.name);
        let unit = CompilationUnit::new(&prefs.namespace).with_class(contract);
        Ok(vec![Artifact::source(
            file_name,
            &unit,
            prefs,
            &[SERIALIZATION_IMPORT],
        )])
    }
}

pub fn contract_class(shape: &EntityShape, prefs: &Preferences) -> ClassDeclaration {
    let mut class = ClassDeclaration::new(format!("{}Contract", shape.class_name));
    class.is_partial = prefs.partial;
    class.attributes.push(Attribute::new("DataContract"));
    for member in shape.keys().chain(shape.values()) {
        class
            .add_auto_property(member.ty.clone(), &member.name, false)
            .attributes
            .push(Attribute::new("DataMember"));
    }
    class
}

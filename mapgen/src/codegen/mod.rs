//! Code generation module
//!
//! Strategies turn one [`crate::parser::Table`] into [`Artifact`]s; the
//! [`CodeGenerator`] picks the strategies and hands artifacts to the
//! [`ArtifactWriter`].

mod active_record_generator;
mod by_code_generator;
mod code_generator;
mod contract_generator;
pub mod dialect;
mod domain_generator;
mod entity;
mod fluent_generator;
mod generator;
mod mapping_generator;
pub mod naming;
pub mod post_process;
pub mod syntax;
pub mod type_mapper;
mod writer;
pub mod xml;

#[cfg(test)]
pub(crate) mod test_support;

pub use active_record_generator::ActiveRecordGenerator;
pub use by_code_generator::ByCodeGenerator;
pub use code_generator::CodeGenerator;
pub use contract_generator::{contract_class, ContractGenerator};
pub use domain_generator::{domain_class, DomainGenerator};
pub use entity::{concrete_collection_type, is_set_collection, EntityMember, EntityShape, MemberKind};
pub use fluent_generator::{class_map, FluentGenerator};
pub use generator::{Artifact, ArtifactKind, Generator};
pub use mapping_generator::{mapping_document, MappingGenerator, MAPPING_XMLNS};
pub use naming::*;
pub use type_mapper::*;
pub use writer::ArtifactWriter;

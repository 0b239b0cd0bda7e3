//! Main code generator orchestrator

use std::path::PathBuf;

use tracing::{debug, info};

use super::active_record_generator::ActiveRecordGenerator;
use super::by_code_generator::ByCodeGenerator;
use super::contract_generator::ContractGenerator;
use super::fluent_generator::FluentGenerator;
use super::generator::{Artifact, Generator};
use super::mapping_generator::MappingGenerator;
use super::writer::ArtifactWriter;
use crate::config::{Preferences, PrimaryStrategy};
use crate::error::Result;
use crate::parser::Table;

/// Runs the configured strategies for each table and writes what they produce
pub struct CodeGenerator {
    prefs: Preferences,
    writer: ArtifactWriter,
}

impl CodeGenerator {
    pub fn new(prefs: Preferences, dry_run: bool) -> Self {
        let writer = ArtifactWriter::new(prefs.output_folder.clone(), dry_run);
        Self { prefs, writer }
    }

    pub fn preferences(&self) -> &Preferences {
        &self.prefs
    }

    /// The primary strategy for the configured `PrimaryStrategy`
    pub fn primary(&self) -> Box<dyn Generator> {
        match self.prefs.strategy {
            PrimaryStrategy::Convention => Box::new(ByCodeGenerator::convention()),
            PrimaryStrategy::Fluent => Box::new(FluentGenerator),
            PrimaryStrategy::ActiveRecord => Box::new(ActiveRecordGenerator),
            PrimaryStrategy::ByCode => Box::new(ByCodeGenerator::explicit()),
            PrimaryStrategy::XmlMapping => Box::new(MappingGenerator),
        }
    }

    /// Every artifact for one table, primary strategy first
    pub fn artifacts(&self, table: &Table) -> Result<Vec<Artifact>> {
        let primary = self.primary();
        debug!("Generating {} with {}", table.name, primary.name());
        let mut artifacts = primary
            .generate(table, &self.prefs)
            .map_err(|e| e.in_table(&table.name, None))?;

        if self.prefs.generate_data_contract {
            let contract = ContractGenerator.generate(table, &self.prefs);
            artifacts.extend(contract.map_err(|e| e.in_table(&table.name, None))?);
        }
        Ok(artifacts)
    }

    /// Generate and write one table's artifacts
    pub fn generate_table(&self, table: &Table) -> Result<Vec<PathBuf>> {
        let artifacts = self.artifacts(table)?;
        let mut written = Vec::with_capacity(artifacts.len());
        for artifact in &artifacts {
            let path = self
                .writer
                .write(artifact)
                .map_err(|e| e.in_table(&table.name, None))?;
            written.push(path);
        }
        Ok(written)
    }

    /// Generate every table, stopping at the first failure
    pub fn generate(&self, tables: &[Table]) -> Result<Vec<PathBuf>> {
        let mut written = Vec::new();
        for table in tables {
            written.extend(self.generate_table(table)?);
        }
        info!(
            "Generated {} files for {} tables in {}",
            written.len(),
            tables.len(),
            self.writer.output_folder().display()
        );
        Ok(written)
    }
}

//! Configuration: raw settings, their defaults and the resolved preferences

pub mod defaults;
mod preferences;
mod settings;

pub use preferences::{FieldGenerationConvention, Preferences, PrimaryStrategy};
pub use settings::CodegenConfig;

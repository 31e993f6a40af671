//! Process configuration read once from the environment at startup.

pub mod settings;

pub use settings::{LlmSettings, ServerSettings, Settings, StorageSettings};

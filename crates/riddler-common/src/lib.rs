//! # Riddler Common
//!
//! Shared types, the template puzzle store, and model-response
//! normalization used across Riddler components.
//!
//! ## Modules
//! - `types` - Core data structures (PuzzleRecord, Difficulty, Provenance, etc.)
//! - `templates` - Built-in puzzle table and its sampling plan
//! - `normalize` - Turning free-form model text into puzzle records
//! - `settings` - Provider selection and key validation
//! - `render` - Text and JSON output
//! - `error` - Common error types
//! - `constants` - Shared limits and names

pub mod constants;
pub mod error;
pub mod normalize;
pub mod render;
pub mod settings;
pub mod templates;
pub mod types;

pub use error::PuzzleError;
pub use settings::{KeyCheck, ProviderSettings};
pub use templates::TemplateStore;
pub use types::*;

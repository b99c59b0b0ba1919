//! Model-name translation between OpenAI-style requests and Gemini backends.
//!
//! Dispatch code asks a [`ModelResolver`] which backend model to call before
//! sending a request, and which name to report in the response afterwards.

pub mod config;
pub mod error;
pub mod models;
pub mod request;
pub mod resolver;

pub use config::BridgeConfig;
pub use error::{BridgeError, Result};
pub use models::{ModelInfo, ModelList};
pub use request::{ChatCompletionRequest, EmbeddingRequest, ResolveModel};
pub use resolver::{EnvOverride, MappingMode, ModelResolver, OverrideSource, StaticOverride};

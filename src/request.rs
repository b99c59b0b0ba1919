//! Request shapes the resolver is bound to.
//!
//! Only `model` is interpreted here. Every other field is kept as opaque JSON
//! so dispatch code can forward the body unchanged.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::resolver::{ModelResolver, OverrideSource};

/// An OpenAI-style `/v1/chat/completions` request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatCompletionRequest {
    pub model: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// An OpenAI-style `/v1/embeddings` request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmbeddingRequest {
    pub model: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ChatCompletionRequest {
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            extra: Map::new(),
        }
    }
}

impl EmbeddingRequest {
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            extra: Map::new(),
        }
    }
}

/// A request kind with its own model resolution policy.
pub trait ResolveModel {
    /// The model the caller asked for.
    fn model(&self) -> &str;

    /// Short label used in log events.
    fn kind(&self) -> &'static str;

    fn resolve_model<O: OverrideSource>(&self, resolver: &ModelResolver<O>) -> String;
}

impl ResolveModel for ChatCompletionRequest {
    fn model(&self) -> &str {
        &self.model
    }

    fn kind(&self) -> &'static str {
        "chat"
    }

    fn resolve_model<O: OverrideSource>(&self, resolver: &ModelResolver<O>) -> String {
        resolver.resolve_chat_model(&self.model)
    }
}

impl ResolveModel for EmbeddingRequest {
    fn model(&self) -> &str {
        &self.model
    }

    fn kind(&self) -> &'static str {
        "embedding"
    }

    fn resolve_model<O: OverrideSource>(&self, resolver: &ModelResolver<O>) -> String {
        resolver.resolve_embedding_model(&self.model)
    }
}

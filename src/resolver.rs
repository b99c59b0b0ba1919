//! Decides which backend model a request should run on, and which name to
//! report back to the caller.
//!
//! All operations are total: an unrecognized name degrades to the fallback
//! tier of the relevant table rather than producing an error.

use crate::models::{gemini, openai, ModelList, GEMINI_TO_OPENAI, OPENAI_TO_GEMINI};
use crate::request::ResolveModel;

/// Environment variable holding the vision override.
pub const VISION_OVERRIDE_ENV: &str = "GPT_4_VISION_PREVIEW";

/// Whether model names are translated between the two vocabularies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MappingMode {
    enabled: bool,
}

impl MappingMode {
    #[must_use]
    pub const fn enabled() -> Self {
        Self { enabled: true }
    }

    #[must_use]
    pub const fn disabled() -> Self {
        Self { enabled: false }
    }

    #[must_use]
    pub const fn is_enabled(self) -> bool {
        self.enabled
    }
}

impl Default for MappingMode {
    fn default() -> Self {
        Self::enabled()
    }
}

impl From<bool> for MappingMode {
    fn from(enabled: bool) -> Self {
        Self { enabled }
    }
}

/// Supplies the override consulted when a chat request names the vision model.
pub trait OverrideSource {
    fn vision_override(&self) -> Option<String>;
}

/// Reads the override from the process environment on every call.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvOverride;

impl OverrideSource for EnvOverride {
    fn vision_override(&self) -> Option<String> {
        std::env::var(VISION_OVERRIDE_ENV).ok()
    }
}

/// An override fixed when the resolver is built.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StaticOverride(pub Option<String>);

impl StaticOverride {
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(Some(value.into()))
    }

    #[must_use]
    pub fn none() -> Self {
        Self(None)
    }
}

impl OverrideSource for StaticOverride {
    fn vision_override(&self) -> Option<String> {
        self.0.clone()
    }
}

impl<T: OverrideSource + ?Sized> OverrideSource for Box<T> {
    fn vision_override(&self) -> Option<String> {
        (**self).vision_override()
    }
}

/// Model name resolver bound to a mapping mode and an override source.
#[derive(Debug, Clone, Default)]
pub struct ModelResolver<O = EnvOverride> {
    mode: MappingMode,
    overrides: O,
}

impl ModelResolver<EnvOverride> {
    /// A resolver that reads the vision override from the environment.
    #[must_use]
    pub fn new(mode: MappingMode) -> Self {
        Self::with_overrides(mode, EnvOverride)
    }
}

impl<O: OverrideSource> ModelResolver<O> {
    pub fn with_overrides(mode: MappingMode, overrides: O) -> Self {
        Self { mode, overrides }
    }

    #[must_use]
    pub fn mode(&self) -> MappingMode {
        self.mode
    }

    /// The provider label reported in `owned_by` fields.
    #[must_use]
    pub fn owner_label(&self) -> &'static str {
        if self.mode.is_enabled() {
            "openai"
        } else {
            "google"
        }
    }

    /// The model name exposed going forward for a caller-supplied name.
    #[must_use]
    pub fn resolve_outbound_model(&self, requested: &str) -> String {
        let resolved = if self.mode.is_enabled() {
            self.translate_a_to_b(requested)
        } else {
            requested.to_string()
        };
        tracing::debug!(
            requested = %requested,
            resolved = %resolved,
            mapping = self.mode.is_enabled(),
            "Resolved outbound model"
        );
        resolved
    }

    /// Pick the Gemini backend model for an `OpenAI` model name.
    ///
    /// Independent of the mapping mode. Unknown names fall back to
    /// `gemini-1.5-flash-8b`.
    #[must_use]
    pub fn translate_a_to_b(&self, name: &str) -> String {
        OPENAI_TO_GEMINI.lookup(name).to_string()
    }

    /// Report a backend model name in `OpenAI` vocabulary.
    ///
    /// Passes the name through untouched when mapping is disabled. The mapping
    /// is many-to-one, so this is not an inverse of [`Self::translate_a_to_b`].
    #[must_use]
    pub fn translate_b_to_a(&self, name: &str) -> String {
        let reported = if self.mode.is_enabled() {
            GEMINI_TO_OPENAI.lookup(name).to_string()
        } else {
            name.to_string()
        };
        tracing::debug!(
            backend = %name,
            reported = %reported,
            mapping = self.mode.is_enabled(),
            "Reported backend model"
        );
        reported
    }

    /// Resolve the backend model for any supported request kind.
    pub fn resolve_request<R: ResolveModel>(&self, req: &R) -> String {
        let resolved = req.resolve_model(self);
        tracing::debug!(
            kind = req.kind(),
            requested = %req.model(),
            resolved = %resolved,
            mapping = self.mode.is_enabled(),
            "Resolved request model"
        );
        resolved
    }

    /// Chat resolution: the vision model is special-cased through the
    /// override, everything else follows the mapping mode.
    #[must_use]
    pub fn resolve_chat_model(&self, model: &str) -> String {
        let vision_name = if self.mode.is_enabled() {
            openai::GPT4_VISION_PREVIEW
        } else {
            gemini::GEMINI_1_0_PRO_VISION
        };

        if model == vision_name {
            return self.vision_backend();
        }

        if self.mode.is_enabled() {
            self.translate_a_to_b(model)
        } else {
            model.to_string()
        }
    }

    #[must_use]
    pub fn resolve_embedding_model(&self, model: &str) -> String {
        if self.mode.is_enabled() {
            self.translate_a_to_b(model)
        } else {
            model.to_string()
        }
    }

    /// Models a client can request, labelled with the current owner.
    #[must_use]
    pub fn model_list(&self) -> ModelList {
        let ids = if self.mode.is_enabled() {
            GEMINI_TO_OPENAI.targets()
        } else {
            OPENAI_TO_GEMINI.targets()
        };
        ModelList::new(ids, self.owner_label())
    }

    fn vision_backend(&self) -> String {
        match self.overrides.vision_override() {
            Some(value) if value == gemini::GEMINI_1_5_PRO => gemini::GEMINI_1_5_PRO.to_string(),
            _ => gemini::GEMINI_1_5_FLASH.to_string(),
        }
    }
}

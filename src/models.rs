//! Known model identifiers for both providers and the ordered rule tables
//! that translate between them.
//!
//! Tables are evaluated first-match-wins, so narrower rules sit above broader
//! ones. A name that matches nothing falls through to the table's fallback.

use serde::{Deserialize, Serialize};

/// `OpenAI` model identifiers the bridge understands.
pub mod openai {
    pub const GPT4_VISION_PREVIEW: &str = "gpt-4-vision-preview";
    pub const GPT4_TURBO_PREVIEW: &str = "gpt-4-turbo-preview";
    pub const GPT4_TURBO_1106: &str = "gpt-4-1106-preview";
    pub const GPT4_TURBO_0125: &str = "gpt-4-0125-preview";
    pub const GPT4: &str = "gpt-4";
    pub const ADA_EMBEDDING_V2: &str = "text-embedding-ada-002";
    pub const GPT35_TURBO: &str = "gpt-3.5-turbo";
}

/// Gemini model identifiers the bridge dispatches to.
pub mod gemini {
    pub const GEMINI_1_5_FLASH_8B: &str = "gemini-1.5-flash-8b";
    pub const GEMINI_1_5_PRO: &str = "gemini-1.5-pro-002";
    pub const GEMINI_1_5_FLASH: &str = "gemini-1.5-flash-002";
    pub const GEMINI_1_0_PRO_VISION: &str = "gemini-1.0-pro-vision-latest";
    pub const TEXT_EMBEDDING_004: &str = "text-embedding-004";
}

/// How a rule recognizes a model name.
#[derive(Debug, Clone, Copy)]
pub enum Matcher {
    /// Matches when the name equals any of the listed identifiers.
    Exact(&'static [&'static str]),
    /// Matches when the name starts with the given family prefix.
    Prefix(&'static str),
}

impl Matcher {
    #[must_use]
    pub fn matches(&self, name: &str) -> bool {
        match self {
            Self::Exact(names) => names.iter().any(|n| *n == name),
            Self::Prefix(prefix) => name.starts_with(prefix),
        }
    }
}

/// A single `(predicate, result)` entry of a translation table.
#[derive(Debug, Clone, Copy)]
pub struct Rule {
    pub matcher: Matcher,
    pub target: &'static str,
}

/// An ordered rule list plus the name returned when no rule matches.
#[derive(Debug, Clone, Copy)]
pub struct RuleTable {
    pub rules: &'static [Rule],
    pub fallback: &'static str,
}

impl RuleTable {
    /// Return the target of the first matching rule, or the fallback.
    #[must_use]
    pub fn lookup(&self, name: &str) -> &'static str {
        self.rules
            .iter()
            .find(|rule| rule.matcher.matches(name))
            .map_or(self.fallback, |rule| rule.target)
    }

    /// Every name this table can produce, in table order, without duplicates.
    #[must_use]
    pub fn targets(&self) -> Vec<&'static str> {
        let mut out: Vec<&'static str> = Vec::with_capacity(self.rules.len() + 1);
        for name in self
            .rules
            .iter()
            .map(|r| r.target)
            .chain(std::iter::once(self.fallback))
        {
            if !out.contains(&name) {
                out.push(name);
            }
        }
        out
    }
}

/// `OpenAI` name to Gemini name. The vision and turbo checks must stay above
/// the `gpt-4` prefix rule, which would otherwise swallow them.
pub const OPENAI_TO_GEMINI: RuleTable = RuleTable {
    rules: &[
        Rule {
            matcher: Matcher::Exact(&[openai::GPT4_VISION_PREVIEW]),
            target: gemini::GEMINI_1_0_PRO_VISION,
        },
        Rule {
            matcher: Matcher::Exact(&[
                openai::GPT4_TURBO_PREVIEW,
                openai::GPT4_TURBO_1106,
                openai::GPT4_TURBO_0125,
            ]),
            target: gemini::GEMINI_1_5_PRO,
        },
        Rule {
            matcher: Matcher::Prefix(openai::GPT4),
            target: gemini::GEMINI_1_5_FLASH,
        },
        Rule {
            matcher: Matcher::Exact(&[openai::ADA_EMBEDDING_V2]),
            target: gemini::TEXT_EMBEDDING_004,
        },
    ],
    fallback: gemini::GEMINI_1_5_FLASH_8B,
};

/// Gemini name to the `OpenAI` name reported back to callers.
pub const GEMINI_TO_OPENAI: RuleTable = RuleTable {
    rules: &[
        Rule {
            matcher: Matcher::Exact(&[gemini::GEMINI_1_0_PRO_VISION]),
            target: openai::GPT4_VISION_PREVIEW,
        },
        Rule {
            matcher: Matcher::Exact(&[gemini::GEMINI_1_5_PRO]),
            target: openai::GPT4_TURBO_PREVIEW,
        },
        Rule {
            matcher: Matcher::Exact(&[gemini::GEMINI_1_5_FLASH]),
            target: openai::GPT4,
        },
        Rule {
            matcher: Matcher::Exact(&[gemini::TEXT_EMBEDDING_004]),
            target: openai::ADA_EMBEDDING_V2,
        },
    ],
    fallback: openai::GPT35_TURBO,
};

/// One entry of an OpenAI-style `/v1/models` listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelInfo {
    pub id: String,
    pub object: String,
    pub owned_by: String,
}

/// An OpenAI-style `/v1/models` listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelList {
    pub object: String,
    pub data: Vec<ModelInfo>,
}

impl ModelList {
    pub fn new<'a>(ids: impl IntoIterator<Item = &'a str>, owned_by: &str) -> Self {
        Self {
            object: "list".to_string(),
            data: ids
                .into_iter()
                .map(|id| ModelInfo {
                    id: id.to_string(),
                    object: "model".to_string(),
                    owned_by: owned_by.to_string(),
                })
                .collect(),
        }
    }
}

/// Whether `name` is one of the Gemini models the tables refer to.
#[must_use]
pub fn is_known_gemini_model(name: &str) -> bool {
    OPENAI_TO_GEMINI.targets().iter().any(|n| *n == name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefix_matcher() {
        let m = Matcher::Prefix("gpt-4");
        assert!(m.matches("gpt-4"));
        assert!(m.matches("gpt-4o-mini"));
        assert!(!m.matches("gpt-3.5-turbo"));
        assert!(!m.matches(""));
    }

    #[test]
    fn test_exact_matcher_is_case_sensitive() {
        let m = Matcher::Exact(&[openai::ADA_EMBEDDING_V2]);
        assert!(m.matches("text-embedding-ada-002"));
        assert!(!m.matches("TEXT-EMBEDDING-ADA-002"));
    }

    #[test]
    fn test_first_match_wins() {
        // gpt-4-turbo-preview also satisfies the gpt-4 prefix rule
        assert_eq!(
            OPENAI_TO_GEMINI.lookup(openai::GPT4_TURBO_PREVIEW),
            gemini::GEMINI_1_5_PRO
        );
        assert_eq!(
            OPENAI_TO_GEMINI.lookup(openai::GPT4_VISION_PREVIEW),
            gemini::GEMINI_1_0_PRO_VISION
        );
    }

    #[test]
    fn test_targets_are_deduplicated_in_order() {
        assert_eq!(
            OPENAI_TO_GEMINI.targets(),
            vec![
                gemini::GEMINI_1_0_PRO_VISION,
                gemini::GEMINI_1_5_PRO,
                gemini::GEMINI_1_5_FLASH,
                gemini::TEXT_EMBEDDING_004,
                gemini::GEMINI_1_5_FLASH_8B,
            ]
        );
        assert_eq!(GEMINI_TO_OPENAI.targets().len(), 5);
    }

    #[test]
    fn test_known_gemini_models() {
        assert!(is_known_gemini_model(gemini::GEMINI_1_5_PRO));
        assert!(is_known_gemini_model(gemini::GEMINI_1_5_FLASH_8B));
        assert!(!is_known_gemini_model("gemini-ultra"));
    }

    #[test]
    fn test_model_list_shape() {
        let list = ModelList::new(["a", "b"], "openai");
        let json = serde_json::to_value(&list).unwrap();
        assert_eq!(json["object"], "list");
        assert_eq!(json["data"][1]["id"], "b");
        assert_eq!(json["data"][0]["object"], "model");
        assert_eq!(json["data"][0]["owned_by"], "openai");
    }
}

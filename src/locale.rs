//! Locale tag to assistant language mapping.

use serde::{Deserialize, Serialize};

/// Language code understood by the assistant service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Pt,
    En,
}

/// Locale tags with a dedicated language. Anything else gets [`DEFAULT_LANGUAGE`].
const LOCALE_LANGUAGES: &[(&str, Language)] = &[("pt-BR", Language::Pt)];

pub const DEFAULT_LANGUAGE: Language = Language::En;

impl Language {
    /// Resolves the language for an active locale tag. Matching is exact.
    pub fn from_locale(tag: &str) -> Self {
        LOCALE_LANGUAGES
            .iter()
            .find(|(locale, _)| *locale == tag)
            .map_or(DEFAULT_LANGUAGE, |(_, language)| *language)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Language::Pt => "pt",
            Language::En => "en",
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn brazilian_portuguese_maps_to_pt() {
        assert_eq!(Language::from_locale("pt-BR"), Language::Pt);
    }

    #[test]
    fn every_other_tag_falls_back_to_en() {
        for tag in ["en-US", "en", "pt", "pt-PT", "pt-br", "es-ES", ""] {
            assert_eq!(Language::from_locale(tag), Language::En, "tag {tag:?}");
        }
    }

    #[test]
    fn serializes_as_short_code() {
        assert_eq!(serde_json::to_string(&Language::Pt).unwrap(), "\"pt\"");
        assert_eq!(Language::En.to_string(), "en");
    }
}

use std::collections::BTreeMap;
use std::sync::OnceLock;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Language {
    #[default]
    En,
    ZhHant,
}

impl Language {
    pub fn all() -> &'static [Self] {
        &[Self::En, Self::ZhHant]
    }

    pub fn code(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::ZhHant => "zh-Hant",
        }
    }

    /// Accepts the canonical code in any letter case, with `-` or `_`.
    pub fn from_code(code: &str) -> Option<Self> {
        let normalized = code.trim().replace('_', "-").to_ascii_lowercase();
        Self::all()
            .iter()
            .copied()
            .find(|language| language.code().to_ascii_lowercase() == normalized)
    }

    pub fn label_key(self) -> &'static str {
        match self {
            Self::En => "language.option.en",
            Self::ZhHant => "language.option.zh_hant",
        }
    }
}

/// Looks `key` up in the catalog of `language`, then in English, and
/// finally returns the key itself.
pub fn tr(language: Language, key: &'static str) -> &'static str {
    catalog(language)
        .get(key)
        .map(String::as_str)
        .or_else(|| catalog(Language::En).get(key).map(String::as_str))
        .unwrap_or(key)
}

/// Like [`tr`], substituting every `{name}` placeholder from `args`.
pub fn tr_with(language: Language, key: &'static str, args: &[(&str, &str)]) -> String {
    args.iter()
        .fold(tr(language, key).to_string(), |text, (name, value)| {
            text.replace(&format!("{{{name}}}"), value)
        })
}

fn catalog(language: Language) -> &'static BTreeMap<String, String> {
    match language {
        Language::En => EN_CATALOG.get_or_init(|| parse_catalog(Language::En)),
        Language::ZhHant => ZH_HANT_CATALOG.get_or_init(|| parse_catalog(Language::ZhHant)),
    }
}

fn parse_catalog(language: Language) -> BTreeMap<String, String> {
    let source = match language {
        Language::En => include_str!("../../assets/i18n/en.json"),
        Language::ZhHant => include_str!("../../assets/i18n/zh-Hant.json"),
    };

    serde_json::from_str(source).unwrap_or_else(|err| {
        tracing::error!(language = language.code(), "invalid i18n catalog: {err}");
        BTreeMap::new()
    })
}

static EN_CATALOG: OnceLock<BTreeMap<String, String>> = OnceLock::new();
static ZH_HANT_CATALOG: OnceLock<BTreeMap<String, String>> = OnceLock::new();

//! Language codes, meaning-table fallback chains and question language sniffing.

use lazy_regex::{lazy_regex, Lazy, Regex};
use serde::{Deserialize, Serialize};

use crate::errors::domain::{DomainError, ValidationKind};

/// The deck's home language; every chain ends in it.
pub const PRIMARY_LANG: &str = "ko";
pub const ENGLISH: &str = "en";

static KANA: Lazy<Regex> = lazy_regex!(r"[\x{3040}-\x{30ff}]");
static HAN: Lazy<Regex> = lazy_regex!(r"[\x{4e00}-\x{9fff}]");
static LATIN: Lazy<Regex> = lazy_regex!(r"[A-Za-z]");
static HANGUL: Lazy<Regex> = lazy_regex!(r"[\x{ac00}-\x{d7af}]");

/// Languages with their own template and role tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Lang {
    Ko,
    En,
    Ja,
    Zh,
}

impl Lang {
    pub const ALL: [Lang; 4] = [Lang::Ko, Lang::En, Lang::Ja, Lang::Zh];

    pub const fn as_str(self) -> &'static str {
        match self {
            Lang::Ko => "ko",
            Lang::En => "en",
            Lang::Ja => "ja",
            Lang::Zh => "zh",
        }
    }

    /// Localized role name for a 1-based spread position.
    pub fn role_name(self, position: u8) -> &'static str {
        let roles: &[&str; 8] = match self {
            Lang::Ko => &[
                "이슈",
                "숨은 영향",
                "과거",
                "현재",
                "근미래",
                "내면",
                "외부",
                "솔루션",
            ],
            Lang::En => &[
                "Issue",
                "Hidden Influence",
                "Past",
                "Present",
                "Near Future",
                "Inner",
                "Outer",
                "Solution",
            ],
            Lang::Ja => &[
                "課題",
                "潜在的影響",
                "過去",
                "現在",
                "近未来",
                "内面",
                "外部",
                "ソリューション",
            ],
            Lang::Zh => &[
                "议题",
                "潜在影响",
                "过去",
                "现在",
                "近未来",
                "内在",
                "外在",
                "解决方案",
            ],
        };
        match position {
            1..=8 => roles[usize::from(position) - 1],
            _ => "",
        }
    }
}

/// Language requested by a caller: a concrete table or "sniff the question".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestedLang {
    Auto,
    Fixed(Lang),
}

impl RequestedLang {
    /// Accepts exactly `ko`, `en`, `ja`, `zh` or `auto`.
    pub fn parse(code: &str) -> Result<Self, DomainError> {
        match code {
            "auto" => Ok(Self::Auto),
            "ko" => Ok(Self::Fixed(Lang::Ko)),
            "en" => Ok(Self::Fixed(Lang::En)),
            "ja" => Ok(Self::Fixed(Lang::Ja)),
            "zh" => Ok(Self::Fixed(Lang::Zh)),
            other => Err(DomainError::validation(
                ValidationKind::InvalidLanguage,
                format!("lang must be one of ko, en, ja, zh, auto; got {other:?}"),
            )),
        }
    }

    pub fn resolve(self, question: &str) -> Lang {
        match self {
            Self::Auto => detect_lang(question),
            Self::Fixed(lang) => lang,
        }
    }
}

impl Default for RequestedLang {
    fn default() -> Self {
        Self::Fixed(Lang::Ko)
    }
}

/// Per-language tables to consult, in order, for a requested code.
///
/// Embedded card meanings are the implicit last step and are not listed.
pub fn meaning_fallback_chain(code: &str) -> Vec<String> {
    let key = code.trim().to_ascii_lowercase();
    let tail: &[&str] = if key == PRIMARY_LANG {
        &[ENGLISH]
    } else if key == ENGLISH {
        &[PRIMARY_LANG]
    } else {
        &[ENGLISH, PRIMARY_LANG]
    };

    let mut chain = Vec::with_capacity(1 + tail.len());
    chain.push(key);
    chain.extend(tail.iter().map(|s| s.to_string()));
    chain
}

/// Guess a question's language from the scripts it uses.
///
/// Kana wins over Han so Japanese text with kanji is not read as Chinese.
/// Mixed-script text is classified by the first rule that matches.
pub fn detect_lang(text: &str) -> Lang {
    if KANA.is_match(text) {
        Lang::Ja
    } else if HAN.is_match(text) {
        Lang::Zh
    } else if LATIN.is_match(text) && !HANGUL.is_match(text) {
        Lang::En
    } else if HANGUL.is_match(text) {
        Lang::Ko
    } else {
        Lang::En
    }
}

//! Stop-word based language guessing over a small fixed set of languages.

/// Language returned when nothing clears its threshold.
pub const DEFAULT_LANGUAGE: &str = "en";

struct LanguageProfile {
    code: &'static str,
    stop_words: &'static [&'static str],
    /// Match ratio that must be exceeded to win
    threshold: f64,
}

// Iteration order decides ties.
const PROFILES: &[LanguageProfile] = &[
    LanguageProfile {
        code: "en",
        stop_words: &[
            "the", "and", "is", "in", "to", "of", "a", "that", "it", "for", "you", "with", "on",
            "this", "but", "are",
        ],
        threshold: 0.1,
    },
    LanguageProfile {
        code: "hi",
        stop_words: &[
            "और", "है", "में", "की", "से", "को", "ने", "यह", "वह", "तो", "पर", "कर", "हो", "था",
            "गया", "चाहिए",
        ],
        threshold: 0.2,
    },
    LanguageProfile {
        code: "gu",
        stop_words: &[
            "અને", "છે", "માં", "ની", "થી", "ને", "આ", "તે", "પણ", "કે", "માટે", "પર", "હતો",
            "કરવા", "છો", "છીએ",
        ],
        threshold: 0.2,
    },
    LanguageProfile {
        code: "es",
        stop_words: &[
            "el", "la", "de", "que", "y", "en", "un", "es", "se", "no", "por", "con", "una", "su",
            "para", "como",
        ],
        threshold: 0.1,
    },
    LanguageProfile {
        code: "fr",
        stop_words: &[
            "le", "de", "et", "la", "les", "des", "un", "une", "est", "pas", "pour", "dans", "qui",
            "sur", "avec", "son",
        ],
        threshold: 0.1,
    },
];

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Detection {
    pub language: &'static str,
    /// Share of tokens found in the winner's stop-word list, 0 for the default
    pub confidence: f64,
}

const fn is_indic(c: char) -> bool {
    matches!(c, '\u{0900}'..='\u{097F}' | '\u{0A80}'..='\u{0AFF}')
}

fn normalize(text: &str) -> String {
    text.to_lowercase()
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || c.is_whitespace() || c == '_' || is_indic(c) {
                c
            } else {
                ' '
            }
        })
        .collect()
}

/// Latin tokens need three characters; Indic stop words are mostly
/// two-character clusters, so those tokens need two.
fn is_significant(token: &str) -> bool {
    let len = token.chars().count();
    if token.chars().all(is_indic) {
        len >= 2
    } else {
        len > 2
    }
}

fn tokenize(text: &str) -> Vec<String> {
    normalize(text)
        .split_whitespace()
        .filter(|token| is_significant(token))
        .map(str::to_string)
        .collect()
}

pub fn detect(text: &str) -> Detection {
    let mut best = Detection {
        language: DEFAULT_LANGUAGE,
        confidence: 0.0,
    };

    if text.trim().is_empty() {
        return best;
    }

    let tokens = tokenize(text);
    #[allow(clippy::cast_precision_loss)]
    let total = tokens.len().max(1) as f64;

    for profile in PROFILES {
        let matches = tokens
            .iter()
            .filter(|token| profile.stop_words.contains(&token.as_str()))
            .count();

        #[allow(clippy::cast_precision_loss)]
        let ratio = matches as f64 / total;

        if ratio > profile.threshold && ratio > best.confidence {
            best = Detection {
                language: profile.code,
                confidence: ratio,
            };
        }
    }

    tracing::debug!(
        "Detected language: {} with confidence: {:.1}%",
        best.language,
        best.confidence * 100.0
    );

    best
}

pub fn detect_language(text: &str) -> &'static str {
    detect(text).language
}

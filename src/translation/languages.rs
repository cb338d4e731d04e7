use std::collections::BTreeMap;

pub const AUTO: &str = "auto";

pub const SUPPORTED_LANGUAGES: &[(&str, &str)] = &[
    (AUTO, "Auto Detect"),
    ("en", "English"),
    ("es", "Spanish"),
    ("fr", "French"),
    ("de", "German"),
    ("it", "Italian"),
    ("pt", "Portuguese"),
    ("ru", "Russian"),
    ("zh", "Chinese"),
    ("ja", "Japanese"),
    ("ko", "Korean"),
    ("hi", "Hindi"),
    ("gu", "Gujarati"),
    ("ar", "Arabic"),
    ("tr", "Turkish"),
    ("nl", "Dutch"),
    ("sv", "Swedish"),
    ("pl", "Polish"),
];

pub fn language_name(code: &str) -> Option<&'static str> {
    SUPPORTED_LANGUAGES
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, name)| *name)
}

pub fn supported_languages() -> BTreeMap<String, String> {
    SUPPORTED_LANGUAGES
        .iter()
        .map(|(code, name)| ((*code).to_string(), (*name).to_string()))
        .collect()
}

pub fn is_auto(code: &str) -> bool {
    code.eq_ignore_ascii_case(AUTO)
}

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::Value;

use crate::{
    config::{PrimaryProviderConfig, SecondaryProviderConfig},
    models::TranslationRequest,
    translation::{detector, languages},
};

#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("Text to translate is empty")]
    EmptyInput,

    #[error("Translation API rate limit exceeded")]
    RateLimited,

    #[error("Translation request timed out")]
    Timeout,

    #[error("Failed to reach translation service: {0}")]
    Transport(reqwest::Error),

    #[error("Translation service responded with HTTP {0}")]
    HttpStatus(u16),

    #[error("Translation service returned status {status}: {details}")]
    Rejected { status: i64, details: String },

    #[error("Translation service returned an empty translation")]
    EmptyTranslation,

    #[error("Malformed translation response: {0}")]
    MalformedResponse(String),
}

impl From<reqwest::Error> for ProviderError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            Self::Timeout
        } else if e.is_decode() {
            Self::MalformedResponse(e.to_string())
        } else {
            Self::Transport(e)
        }
    }
}

#[async_trait]
pub trait TranslationProvider: Send + Sync {
    /// Short name used in logs
    fn name(&self) -> &'static str;

    /// `translate` either returns a non-empty translation or the reason it
    /// could not produce one. `auto` sources are resolved by the provider.
    async fn translate(&self, request: &TranslationRequest) -> Result<String, ProviderError>;
}

fn resolve_source(request: &TranslationRequest) -> &str {
    if languages::is_auto(&request.source_lang) {
        let detected = detector::detect_language(&request.text);
        tracing::info!("Auto-detected language: {}", detected);
        detected
    } else {
        &request.source_lang
    }
}

fn truncate_chars(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

fn check_status(status: StatusCode) -> Result<(), ProviderError> {
    if status == StatusCode::TOO_MANY_REQUESTS {
        return Err(ProviderError::RateLimited);
    }
    if !status.is_success() {
        return Err(ProviderError::HttpStatus(status.as_u16()));
    }
    Ok(())
}

/////////////////////////////////////////////////////////////////////

/// MyMemory style API: `?q=..&langpair=src|tgt`, JSON body with a
/// `responseStatus` code and `responseData.translatedText`.
pub struct MyMemoryProvider {
    client: Client,
    config: PrimaryProviderConfig,
}

impl MyMemoryProvider {
    pub fn new(config: PrimaryProviderConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(config.timeout).build()?;

        Ok(Self { client, config })
    }

    pub fn parse_response(body: &Value) -> Result<String, ProviderError> {
        let status = match body.get("responseStatus") {
            Some(Value::Number(n)) => n.as_i64(),
            Some(Value::String(s)) => s.trim().parse::<i64>().ok(),
            _ => None,
        }
        .ok_or_else(|| ProviderError::MalformedResponse("missing responseStatus".to_string()))?;

        if status == 429 {
            return Err(ProviderError::RateLimited);
        }

        if status != 200 {
            let details = body
                .get("responseDetails")
                .and_then(Value::as_str)
                .unwrap_or("Unknown error")
                .to_string();
            return Err(ProviderError::Rejected { status, details });
        }

        match body
            .pointer("/responseData/translatedText")
            .and_then(Value::as_str)
        {
            Some(text) if !text.trim().is_empty() => Ok(text.to_string()),
            _ => Err(ProviderError::EmptyTranslation),
        }
    }
}

#[async_trait]
impl TranslationProvider for MyMemoryProvider {
    fn name(&self) -> &'static str {
        "mymemory"
    }

    async fn translate(&self, request: &TranslationRequest) -> Result<String, ProviderError> {
        if request.text.trim().is_empty() {
            return Err(ProviderError::EmptyInput);
        }

        let text = truncate_chars(&request.text, self.config.max_text_length);
        let langpair = format!("{}|{}", resolve_source(request), request.target_lang);

        tracing::debug!("Requesting {} translation for {} chars", langpair, text.len());

        let response = self
            .client
            .get(&self.config.base_url)
            .query(&[
                ("q", text),
                ("langpair", langpair.as_str()),
                ("de", self.config.contact_email.as_str()),
            ])
            .send()
            .await?;

        check_status(response.status())?;

        let body: Value = response.json().await?;
        Self::parse_response(&body)
    }
}

/////////////////////////////////////////////////////////////////////

/// Google `translate_a/single?client=gtx` style API. The body is a nested
/// array whose `[0][i][0]` leaves are the translated segments.
pub struct GoogleGtxProvider {
    client: Client,
    config: SecondaryProviderConfig,
}

impl GoogleGtxProvider {
    pub fn new(config: SecondaryProviderConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(config.timeout).build()?;

        Ok(Self { client, config })
    }

    pub fn parse_response(body: &Value) -> Result<String, ProviderError> {
        let segments = body.get(0).and_then(Value::as_array).ok_or_else(|| {
            ProviderError::MalformedResponse("missing segment array at index 0".to_string())
        })?;

        let text: String = segments
            .iter()
            .filter_map(|segment| segment.get(0).and_then(Value::as_str))
            .collect();

        if text.trim().is_empty() {
            return Err(ProviderError::EmptyTranslation);
        }

        Ok(text)
    }
}

#[async_trait]
impl TranslationProvider for GoogleGtxProvider {
    fn name(&self) -> &'static str {
        "google-gtx"
    }

    async fn translate(&self, request: &TranslationRequest) -> Result<String, ProviderError> {
        if request.text.trim().is_empty() {
            return Err(ProviderError::EmptyInput);
        }

        let response = self
            .client
            .get(&self.config.base_url)
            .query(&[
                ("client", "gtx"),
                ("sl", resolve_source(request)),
                ("tl", request.target_lang.as_str()),
                ("dt", "t"),
                ("q", request.text.as_str()),
            ])
            .send()
            .await?;

        check_status(response.status())?;

        let body: Value = response.json().await?;
        Self::parse_response(&body)
    }
}

/////////////////////////////////////////////////////////////////////

const PHRASEBOOK: &[(&str, &[(&str, &str)])] = &[
    (
        "hello",
        &[("hi", "नमस्ते"), ("gu", "નમસ્તે"), ("es", "Hola"), ("fr", "Bonjour")],
    ),
    (
        "how are you",
        &[
            ("hi", "आप कैसे हैं"),
            ("gu", "તમે કેમ છો"),
            ("es", "¿Cómo estás?"),
            ("fr", "Comment allez-vous?"),
        ],
    ),
    (
        "thank you",
        &[("hi", "धन्यवाद"), ("gu", "આભાર"), ("es", "Gracias"), ("fr", "Merci")],
    ),
    (
        "good morning",
        &[
            ("hi", "शुभ प्रभात"),
            ("gu", "સુપ્રભાત"),
            ("es", "Buenos días"),
            ("fr", "Bonjour"),
        ],
    ),
    (
        "what is your name",
        &[
            ("hi", "आपका नाम क्या है"),
            ("gu", "તમારું નામ શું છે"),
            ("es", "¿Cómo te llamas?"),
            ("fr", "Comment vous appelez-vous?"),
        ],
    ),
    (
        "i love you",
        &[
            ("hi", "मैं तुमसे प्यार करता हूँ"),
            ("gu", "હું તને પ્રેમ કરું છું"),
            ("es", "Te amo"),
            ("fr", "Je t'aime"),
        ],
    ),
    (
        "please help me",
        &[
            ("hi", "कृपया मेरी मदद करें"),
            ("gu", "કૃપા કરીને મને મદદ કરો"),
            ("es", "Por favor ayúdame"),
            ("fr", "S'il vous plaît aidez-moi"),
        ],
    ),
    (
        "where is the hotel",
        &[
            ("hi", "होटल कहाँ है"),
            ("gu", "હોટેલ ક્યાં છે"),
            ("es", "¿Dónde está el hotel?"),
            ("fr", "Où est l'hôtel?"),
        ],
    ),
    (
        "how much does it cost",
        &[
            ("hi", "इसकी कीमत कितनी है"),
            ("gu", "તેની કિંમત કેટલી છે"),
            ("es", "¿Cuánto cuesta?"),
            ("fr", "Combien ça coûte?"),
        ],
    ),
    (
        "can you help me",
        &[
            ("hi", "क्या आप मेरी मदद कर सकते हैं"),
            ("gu", "શું તમે મને મદદ કરી શકો છો"),
            ("es", "¿Puedes ayudarme?"),
            ("fr", "Pouvez-vous m'aider?"),
        ],
    ),
];

const PLACEHOLDER_LABELS: &[(&str, &str)] = &[
    ("hi", "हिंदी अनुवाद"),
    ("gu", "ગુજરાતી અનુવાદ"),
    ("es", "Traducción al español"),
    ("fr", "Traduction française"),
    ("de", "Deutsche Übersetzung"),
];

fn lookup<'a>(table: &'a [(&str, &'a str)], key: &str) -> Option<&'a str> {
    table.iter().find(|(k, _)| *k == key).map(|(_, v)| *v)
}

/// Offline translation: phrasebook exact match, then the first phrase
/// contained in the text, then a labelled placeholder echoing the input.
pub fn mock_translate(text: &str, target_lang: &str) -> String {
    let normalized = text.trim().to_lowercase();
    let target = target_lang.to_lowercase();

    let exact = PHRASEBOOK
        .iter()
        .find(|(phrase, _)| *phrase == normalized)
        .and_then(|(_, translations)| lookup(translations, &target));
    if let Some(translation) = exact {
        return translation.to_string();
    }

    let partial = PHRASEBOOK
        .iter()
        .filter(|(phrase, _)| normalized.contains(phrase))
        .find_map(|(_, translations)| lookup(translations, &target));
    if let Some(translation) = partial {
        return translation.to_string();
    }

    lookup(PLACEHOLDER_LABELS, &target).map_or_else(
        || format!("[{}: {text}]", target.to_uppercase()),
        |label| format!("[{label}: {text}]"),
    )
}

pub struct MockProvider {
    delay: Duration,
}

impl MockProvider {
    pub const fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

#[async_trait]
impl TranslationProvider for MockProvider {
    fn name(&self) -> &'static str {
        "mock"
    }

    async fn translate(&self, request: &TranslationRequest) -> Result<String, ProviderError> {
        tracing::info!("Using mock translation");

        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        Ok(mock_translate(&request.text, &request.target_lang))
    }
}

use futures::future::join_all;

use crate::{
    error::AppError,
    models::{TranslationRequest, TranslationResult},
    translation::{ProviderChain, detector, languages},
};

pub struct TranslationService {
    chain: ProviderChain,
}

impl TranslationService {
    pub const fn new(chain: ProviderChain) -> Self {
        Self { chain }
    }

    /// Rejects blank input with `message`, otherwise translates.
    pub async fn translate_required(
        &self,
        text: &str,
        source_lang: &str,
        target_lang: &str,
        message: &str,
    ) -> Result<TranslationResult, AppError> {
        if text.trim().is_empty() {
            return Err(AppError::Validation(message.to_string()));
        }

        Ok(self.translate(text, source_lang, target_lang).await)
    }

    /// Resolves an `auto` source up front so every provider in the chain
    /// sees the same language pair. Never fails.
    pub async fn translate(
        &self,
        text: &str,
        source_lang: &str,
        target_lang: &str,
    ) -> TranslationResult {
        let detected_language = languages::is_auto(source_lang).then(|| {
            let detected = detector::detect_language(text);
            tracing::info!("Auto-detected source language: {}", detected);
            detected.to_string()
        });

        let request = TranslationRequest::new(
            text,
            detected_language.as_deref().unwrap_or(source_lang),
            target_lang,
        );

        let outcome = self.chain.translate(&request).await;
        for failure in &outcome.failures {
            tracing::debug!("Skipped {}: {}", failure.provider, failure.error);
        }
        tracing::info!(
            "Translated {} chars {} -> {} via {}",
            text.chars().count(),
            request.source_lang,
            target_lang,
            outcome.provider
        );

        TranslationResult {
            translated_text: outcome.text,
            detected_language,
            source_language: source_lang.to_string(),
            target_language: target_lang.to_string(),
            provider: outcome.provider,
        }
    }

    /// Items are translated concurrently and degrade independently; the
    /// output keeps the input order. An empty list yields no translations.
    pub async fn translate_batch(
        &self,
        texts: Option<&[String]>,
        source_lang: &str,
        target_lang: &str,
    ) -> Result<Vec<(String, TranslationResult)>, AppError> {
        let texts = texts.ok_or_else(|| {
            AppError::Validation("Texts array is required for batch translation".to_string())
        })?;

        let results = join_all(
            texts
                .iter()
                .map(|text| self.translate(text, source_lang, target_lang)),
        )
        .await;

        Ok(texts.iter().cloned().zip(results).collect())
    }

    pub fn detect(&self, text: &str) -> Result<detector::Detection, AppError> {
        if text.trim().is_empty() {
            return Err(AppError::Validation(
                "Text is required for language detection".to_string(),
            ));
        }

        Ok(detector::detect(text))
    }
}

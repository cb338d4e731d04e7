use std::sync::Arc;

use crate::{
    error::AppError,
    models::TranslationResult,
    pdf::{self, DocumentInfo, ExtractedPdf, PdfError},
    service::TranslationService,
};

/// Parsing and writing run on the blocking pool. A parser panic is
/// reported as an unparseable document.
pub async fn extract(bytes: Vec<u8>) -> Result<ExtractedPdf, AppError> {
    match tokio::task::spawn_blocking(move || pdf::extract_text(&bytes)).await {
        Ok(result) => Ok(result?),
        Err(e) if e.is_panic() => {
            Err(PdfError::Unparseable("parser aborted on malformed input".to_string()).into())
        }
        Err(e) => Err(e.into()),
    }
}

pub async fn render(text: String, info: DocumentInfo) -> Result<Vec<u8>, AppError> {
    let bytes = tokio::task::spawn_blocking(move || pdf::create_pdf(&text, &info)).await??;
    tracing::info!("Generated PDF of {} bytes", bytes.len());
    Ok(bytes)
}

#[derive(Debug)]
pub struct TranslatedPdf {
    pub original: ExtractedPdf,
    pub translation: TranslationResult,
}

#[derive(Clone)]
pub struct PdfService {
    translator: Arc<TranslationService>,
}

impl PdfService {
    pub const fn new(translator: Arc<TranslationService>) -> Self {
        Self { translator }
    }

    pub async fn extract(&self, bytes: Vec<u8>) -> Result<ExtractedPdf, AppError> {
        extract(bytes).await
    }

    /// Extract, then translate the whole text through the provider chain.
    pub async fn translate(
        &self,
        bytes: Vec<u8>,
        source_lang: &str,
        target_lang: &str,
    ) -> Result<TranslatedPdf, AppError> {
        let original = extract(bytes).await?;
        tracing::info!(
            "Translating PDF of {} page(s), {} chars",
            original.pages,
            original.text.chars().count()
        );

        let translation = self
            .translator
            .translate(&original.text, source_lang, target_lang)
            .await;
        tracing::info!(
            "PDF text translated by {} ({} chars)",
            translation.provider,
            translation.translated_text.chars().count()
        );

        Ok(TranslatedPdf {
            original,
            translation,
        })
    }

    /// Full pipeline: the result carries the source document's title and
    /// author over.
    pub async fn translate_to_pdf(
        &self,
        bytes: Vec<u8>,
        source_lang: &str,
        target_lang: &str,
    ) -> Result<Vec<u8>, AppError> {
        let translated = self.translate(bytes, source_lang, target_lang).await?;
        let info = DocumentInfo::translated_from(&translated.original.metadata);

        render(translated.translation.translated_text, info).await
    }

    pub async fn text_to_pdf(
        &self,
        text: &str,
        source_lang: &str,
        target_lang: &str,
        filename: &str,
    ) -> Result<Vec<u8>, AppError> {
        let translation = self
            .translator
            .translate_required(
                text,
                source_lang,
                target_lang,
                "Text is required for translation",
            )
            .await?;

        render(translation.translated_text, DocumentInfo::titled(filename)).await
    }

    pub async fn create_pdf(&self, text: &str, filename: &str) -> Result<Vec<u8>, AppError> {
        if text.trim().is_empty() {
            return Err(AppError::Validation(
                "Text is required for PDF creation".to_string(),
            ));
        }

        render(text.to_string(), DocumentInfo::titled(filename)).await
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::translation::{ProviderChain, providers::MockProvider};

    fn service() -> PdfService {
        let chain = ProviderChain::new(vec![Box::new(MockProvider::new(Duration::ZERO))]);
        PdfService::new(Arc::new(TranslationService::new(chain)))
    }

    #[tokio::test]
    async fn non_pdf_upload_is_unparseable() {
        let err = service()
            .extract(b"plain text".to_vec())
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Pdf(PdfError::Unparseable(_))));
    }

    #[tokio::test]
    async fn translates_generated_document() {
        let service = service();
        let source = service.create_pdf("Hello", "greeting").await.unwrap();

        let translated = service.translate(source, "en", "fr").await.unwrap();

        assert_eq!(translated.original.pages, 1);
        assert_eq!(translated.original.metadata.title.as_deref(), Some("greeting"));
        assert!(translated.translation.translated_text.contains("Bonjour"));
    }

    #[tokio::test]
    async fn translated_pdf_keeps_source_title() {
        let service = service();
        let source = service.create_pdf("thank you", "Letter").await.unwrap();

        let bytes = service.translate_to_pdf(source, "en", "es").await.unwrap();
        let output = extract(bytes).await.unwrap();

        assert_eq!(output.metadata.title.as_deref(), Some("Translated - Letter"));
        assert!(output.text.contains("Gracias"));
    }

    #[tokio::test]
    async fn text_pdf_needs_text() {
        let service = service();
        assert!(matches!(
            service.create_pdf(" ", "doc").await,
            Err(AppError::Validation(_))
        ));
        assert!(matches!(
            service.text_to_pdf("", "auto", "fr", "doc").await,
            Err(AppError::Validation(_))
        ));
    }
}

use crate::{
    config::TranslationConfig,
    models::TranslationRequest,
    translation::providers::{
        GoogleGtxProvider, MockProvider, MyMemoryProvider, ProviderError, TranslationProvider,
        mock_translate,
    },
};

#[derive(Debug)]
pub struct ProviderFailure {
    pub provider: &'static str,
    pub error: ProviderError,
}

#[derive(Debug)]
pub struct ChainOutcome {
    pub text: String,
    pub provider: &'static str,
    /// Failures of the providers tried before `provider`, in order
    pub failures: Vec<ProviderFailure>,
}

/// Ordered fallback over translation providers. `translate` never fails:
/// when every provider errors the offline phrasebook answers.
pub struct ProviderChain {
    providers: Vec<Box<dyn TranslationProvider>>,
}

impl ProviderChain {
    pub fn new(providers: Vec<Box<dyn TranslationProvider>>) -> Self {
        Self { providers }
    }

    /// Primary HTTP API, secondary HTTP API, then the mock.
    pub fn from_config(config: &TranslationConfig) -> Result<Self, reqwest::Error> {
        let providers: Vec<Box<dyn TranslationProvider>> = vec![
            Box::new(MyMemoryProvider::new(config.primary.clone())?),
            Box::new(GoogleGtxProvider::new(config.secondary.clone())?),
            Box::new(MockProvider::new(config.mock_delay)),
        ];

        Ok(Self::new(providers))
    }

    pub fn provider_names(&self) -> Vec<&'static str> {
        self.providers.iter().map(|p| p.name()).collect()
    }

    pub async fn translate(&self, request: &TranslationRequest) -> ChainOutcome {
        let mut failures = Vec::new();

        for provider in &self.providers {
            match provider.translate(request).await {
                Ok(text) if !text.is_empty() => {
                    if !failures.is_empty() {
                        tracing::info!(
                            "Translation served by {} after {} failed provider(s)",
                            provider.name(),
                            failures.len()
                        );
                    }
                    return ChainOutcome {
                        text,
                        provider: provider.name(),
                        failures,
                    };
                }
                Ok(_) => {
                    tracing::warn!("{} returned an empty translation", provider.name());
                    failures.push(ProviderFailure {
                        provider: provider.name(),
                        error: ProviderError::EmptyTranslation,
                    });
                }
                Err(ProviderError::RateLimited) => {
                    tracing::warn!("{} is rate limited, falling through", provider.name());
                    failures.push(ProviderFailure {
                        provider: provider.name(),
                        error: ProviderError::RateLimited,
                    });
                }
                Err(e) => {
                    tracing::warn!("{} translation failed: {}", provider.name(), e);
                    failures.push(ProviderFailure {
                        provider: provider.name(),
                        error: e,
                    });
                }
            }
        }

        tracing::error!(
            "All {} translation providers failed, answering from the phrasebook",
            failures.len()
        );

        ChainOutcome {
            text: mock_translate(&request.text, &request.target_lang),
            provider: "phrasebook",
            failures,
        }
    }
}

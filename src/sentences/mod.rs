// Example sentence generation

pub mod openai;
pub mod prompt;

pub use openai::OpenAiClient;
pub use prompt::{sanitize_reply, SentencePrompt};

use tracing::{info, warn};

use crate::{
    config::LlmConfig,
    error::{ApiError, ApiResult},
};

/// Produces example sentences for a sense.
#[derive(Debug, Clone)]
pub enum SentenceGenerator {
    OpenAi(OpenAiClient),
    /// Offline fallback used when no LLM key is configured.
    Template,
}

const TEMPLATES: &[&str] = &[
    "Today I finally used the word \"{word}\" ({translation}) in a real conversation.",
    "My host family taught me \"{word}\", which means {translation}.",
    "I wrote \"{word}\" ({translation}) on a sticky note so I would not forget it.",
    "At the market I heard someone say \"{word}\" and remembered it means {translation}.",
];

impl SentenceGenerator {
    pub fn from_config(config: &LlmConfig) -> ApiResult<Self> {
        match config.api_key {
            Some(ref key) => {
                let client = OpenAiClient::new(config, key.clone())?;
                info!("Sentence generation via model {}", client.model());
                Ok(SentenceGenerator::OpenAi(client))
            }
            None => {
                warn!("OPENAI_API_KEY not set, using template sentences");
                Ok(SentenceGenerator::Template)
            }
        }
    }

    pub async fn generate(&self, prompt: &SentencePrompt<'_>) -> ApiResult<String> {
        match self {
            SentenceGenerator::OpenAi(client) => {
                let raw = client.complete(&prompt.render()).await?;
                sanitize_reply(&raw)
                    .ok_or_else(|| ApiError::upstream("Sentence generation returned an empty sentence"))
            }
            SentenceGenerator::Template => Ok(template_sentence(prompt)),
        }
    }
}

/// Deterministic sentence for a word: the same sense always gets the same template.
fn template_sentence(prompt: &SentencePrompt<'_>) -> String {
    let seed: usize = prompt.word.bytes().map(usize::from).sum();
    TEMPLATES[seed % TEMPLATES.len()]
        .replace("{word}", prompt.word.trim())
        .replace("{translation}", prompt.translation.trim())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_template_generator_uses_word_and_translation() {
        let prompt = SentencePrompt {
            word: "madrugada",
            translation: "early morning",
            language: "es",
            known_words: &[],
        };

        let sentence = SentenceGenerator::Template.generate(&prompt).await.unwrap();
        assert!(sentence.contains("\"madrugada\""));
        assert!(sentence.contains("early morning"));

        let again = SentenceGenerator::Template.generate(&prompt).await.unwrap();
        assert_eq!(sentence, again);
    }

    #[test]
    fn test_from_config_without_key_is_template() {
        let config = LlmConfig {
            api_key: None,
            base_url: "https://api.openai.com/v1".to_string(),
            model: "gpt-5".to_string(),
            timeout: std::time::Duration::from_secs(5),
            context_words: 5,
        };
        assert!(matches!(
            SentenceGenerator::from_config(&config).unwrap(),
            SentenceGenerator::Template
        ));
    }
}

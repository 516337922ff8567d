//! English to Hindi / Irish translation.
//!
//! Common phrases come from a fixed phrasebook. Anything else falls back to a
//! remote translation service when one is configured.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

use super::string_arg;
use crate::config::TranslationConfig;
use crate::errors::TranslationError;
use crate::models::tools::{Tool, ToolRegistry};

pub const HINDI_TOOL_NAME: &str = "english_to_hindi";
pub const IRISH_TOOL_NAME: &str = "english_to_irish";

/// Target languages the translation agents support.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Language {
    Hindi,
    Irish,
}

impl Language {
    /// ISO 639-1 code used by the remote service.
    pub fn code(self) -> &'static str {
        match self {
            Language::Hindi => "hi",
            Language::Irish => "ga",
        }
    }

    fn phrases(self) -> &'static [(&'static str, &'static str)] {
        match self {
            Language::Hindi => HINDI_PHRASES,
            Language::Irish => IRISH_PHRASES,
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Language::Hindi => write!(f, "Hindi"),
            Language::Irish => write!(f, "Irish"),
        }
    }
}

const HINDI_PHRASES: &[(&str, &str)] = &[
    ("hello", "नमस्ते (namaste)"),
    ("goodbye", "अलविदा (alvida)"),
    ("thank you", "धन्यवाद (dhanyavaad)"),
    ("yes", "हाँ (haan)"),
    ("no", "नहीं (nahin)"),
    ("please", "कृपया (kripya)"),
    ("how are you", "आप कैसे हैं (aap kaise hain)"),
    ("good morning", "सुप्रभात (suprabhat)"),
    ("good night", "शुभ रात्रि (shubh ratri)"),
];

const IRISH_PHRASES: &[(&str, &str)] = &[
    ("hello", "Dia dhuit"),
    ("goodbye", "Slán"),
    ("thank you", "Go raibh maith agat"),
    ("yes", "Tá"),
    ("no", "Níl"),
    ("please", "Le do thoil"),
    ("how are you", "Conas atá tú"),
    ("good morning", "Maidin mhaith"),
    ("good night", "Oíche mhaith"),
];

#[async_trait]
pub trait Translator: Send + Sync {
    async fn translate(&self, text: &str, target: Language) -> Result<String, TranslationError>;
}

/// Fixed phrase lookup. Matching ignores case and surrounding whitespace.
#[derive(Debug, Clone, Copy, Default)]
pub struct Phrasebook;

impl Phrasebook {
    pub fn lookup(&self, text: &str, target: Language) -> Option<&'static str> {
        let key = text.trim().to_lowercase();
        target
            .phrases()
            .iter()
            .find(|(phrase, _)| *phrase == key)
            .map(|(_, translation)| *translation)
    }
}

#[async_trait]
impl Translator for Phrasebook {
    async fn translate(&self, text: &str, target: Language) -> Result<String, TranslationError> {
        self.lookup(text, target)
            .map(str::to_string)
            .ok_or_else(|| TranslationError::NotInPhrasebook(text.to_string()))
    }
}

/// Stand-in remote used when remote translation is switched off.
#[derive(Debug, Clone, Copy, Default)]
pub struct RemoteDisabled;

#[async_trait]
impl Translator for RemoteDisabled {
    async fn translate(&self, _text: &str, _target: Language) -> Result<String, TranslationError> {
        Err(TranslationError::RemoteDisabled)
    }
}

/// Client for the public Google Translate endpoint.
pub struct GoogleTranslator {
    client: Client,
    endpoint: String,
    timeout: Duration,
}

impl GoogleTranslator {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.into(),
            timeout,
        }
    }

    pub fn from_config(config: &TranslationConfig) -> Self {
        Self::new(
            config.endpoint.clone(),
            Duration::from_millis(config.timeout_ms),
        )
    }

    async fn request(&self, text: &str, target: Language) -> Result<Value, TranslationError> {
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[
                ("client", "gtx"),
                ("sl", "en"),
                ("tl", target.code()),
                ("dt", "t"),
                ("q", text),
            ])
            .send()
            .await?
            .error_for_status()?;
        Ok(response.json().await?)
    }
}

#[async_trait]
impl Translator for GoogleTranslator {
    async fn translate(&self, text: &str, target: Language) -> Result<String, TranslationError> {
        debug!(language = %target, "requesting remote translation");
        let body = tokio::time::timeout(self.timeout, self.request(text, target))
            .await
            .map_err(|_| TranslationError::Timeout(self.timeout.as_millis() as u64))??;
        parse_google_response(&body)
    }
}

/// Join the translated segments of a `translate_a/single` response.
///
/// The body looks like `[[["Dia dhuit","hello",...], ...], ...]`.
pub fn parse_google_response(body: &Value) -> Result<String, TranslationError> {
    let segments = body
        .get(0)
        .and_then(Value::as_array)
        .ok_or_else(|| TranslationError::Remote("unexpected response shape".to_string()))?;

    let text: String = segments
        .iter()
        .filter_map(|segment| segment.get(0).and_then(Value::as_str))
        .collect();

    if text.is_empty() {
        return Err(TranslationError::Remote("empty translation".to_string()));
    }
    Ok(text)
}

/// Tries the local translator first and the remote one on a miss.
pub struct FallbackTranslator<L, R> {
    local: L,
    remote: R,
}

impl<L: Translator, R: Translator> FallbackTranslator<L, R> {
    pub fn new(local: L, remote: R) -> Self {
        Self { local, remote }
    }
}

#[async_trait]
impl<L: Translator, R: Translator> Translator for FallbackTranslator<L, R> {
    async fn translate(&self, text: &str, target: Language) -> Result<String, TranslationError> {
        match self.local.translate(text, target).await {
            Ok(translation) => Ok(translation),
            Err(TranslationError::NotInPhrasebook(_)) => {
                debug!(language = %target, "phrasebook miss, falling back to remote");
                self.remote.translate(text, target).await
            }
            Err(e) => Err(e),
        }
    }
}

/// Phrasebook backed by the configured remote, or by nothing if disabled.
pub fn translator_from_config(config: &TranslationConfig) -> Arc<dyn Translator> {
    if config.enabled {
        Arc::new(FallbackTranslator::new(
            Phrasebook,
            GoogleTranslator::from_config(config),
        ))
    } else {
        Arc::new(FallbackTranslator::new(Phrasebook, RemoteDisabled))
    }
}

/// Translate and render the result as the agents present it.
///
/// Failures are folded into the returned text, never raised.
pub async fn translate_english(translator: &dyn Translator, text: &str, target: Language) -> String {
    match translator.translate(text, target).await {
        Ok(translation) => format!("{} translation: {}", target, translation),
        Err(e) => {
            warn!(language = %target, error = %e, "translation failed");
            format!("Error translating to {}: {}", target, e)
        }
    }
}

pub async fn english_to_hindi(translator: &dyn Translator, text: &str) -> String {
    translate_english(translator, text, Language::Hindi).await
}

pub async fn english_to_irish(translator: &dyn Translator, text: &str) -> String {
    translate_english(translator, text, Language::Irish).await
}

pub fn translation_tool(target: Language) -> Tool {
    let name = match target {
        Language::Hindi => HINDI_TOOL_NAME,
        Language::Irish => IRISH_TOOL_NAME,
    };
    Tool::function(name, format!("Translates English text to {}.", target)).with_param(
        "text",
        "string",
        format!("The English text to translate to {}.", target),
        true,
    )
}

pub fn register(registry: &mut ToolRegistry, translator: Arc<dyn Translator>) {
    for target in [Language::Hindi, Language::Irish] {
        let translator = Arc::clone(&translator);
        registry.register_async_tool(translation_tool(target), move |args| {
            let translator = Arc::clone(&translator);
            async move {
                let text = string_arg(&args, "text")?;
                Ok::<Value, String>(Value::String(
                    translate_english(translator.as_ref(), text, target).await,
                ))
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Remote stand-in that counts calls and answers with a fixed string.
    struct CountingRemote {
        calls: Arc<AtomicUsize>,
        reply: Result<String, TranslationError>,
    }

    #[async_trait]
    impl Translator for CountingRemote {
        async fn translate(&self, _text: &str, _target: Language) -> Result<String, TranslationError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.reply.clone()
        }
    }

    fn counting(reply: Result<String, TranslationError>) -> (Arc<AtomicUsize>, CountingRemote) {
        let calls = Arc::new(AtomicUsize::new(0));
        (
            calls.clone(),
            CountingRemote { calls, reply },
        )
    }

    #[tokio::test]
    async fn phrasebook_hit_skips_remote() {
        let (calls, remote) = counting(Ok("unused".to_string()));
        let translator = FallbackTranslator::new(Phrasebook, remote);

        assert_eq!(
            english_to_hindi(&translator, "  Hello ").await,
            "Hindi translation: नमस्ते (namaste)"
        );
        assert_eq!(
            english_to_irish(&translator, "Thank You").await,
            "Irish translation: Go raibh maith agat"
        );
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn phrasebook_miss_uses_remote() {
        let (calls, remote) = counting(Ok("Fáilte".to_string()));
        let translator = FallbackTranslator::new(Phrasebook, remote);

        assert_eq!(
            english_to_irish(&translator, "welcome").await,
            "Irish translation: Fáilte"
        );
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn remote_failure_is_rendered_not_raised() {
        let (_, remote) = counting(Err(TranslationError::Remote("503".to_string())));
        let translator = FallbackTranslator::new(Phrasebook, remote);

        assert_eq!(
            english_to_hindi(&translator, "see you soon").await,
            "Error translating to Hindi: remote translation failed: 503"
        );
    }

    #[tokio::test]
    async fn disabled_remote_reports_miss() {
        let translator = FallbackTranslator::new(Phrasebook, RemoteDisabled);
        assert_eq!(
            english_to_irish(&translator, "see you soon").await,
            "Error translating to Irish: remote translation is disabled"
        );
    }

    #[tokio::test]
    async fn translation_tools_are_registered_for_both_languages() {
        use crate::models::tools::ToolRegistryTrait;

        let mut registry = ToolRegistry::new();
        register(&mut registry, Arc::new(FallbackTranslator::new(Phrasebook, RemoteDisabled)));

        let value = registry
            .execute_tool(IRISH_TOOL_NAME, r#"{"text": "good night"}"#)
            .await
            .unwrap();
        assert_eq!(value, json!("Irish translation: Oíche mhaith"));
        assert!(registry.has_tool(HINDI_TOOL_NAME));
    }

    #[test]
    fn google_response_segments_are_joined() {
        let body = json!([[["Dia dhuit. ", "Hello. ", null], ["Conas atá tú?", "How are you?", null]], null, "en"]);
        assert_eq!(parse_google_response(&body).unwrap(), "Dia dhuit. Conas atá tú?");
    }

    #[test]
    fn unexpected_google_response_is_an_error() {
        assert!(parse_google_response(&json!({"error": "quota"})).is_err());
        assert!(parse_google_response(&json!([[]])).is_err());
    }
}

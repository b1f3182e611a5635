use std::sync::Arc;

use tracing::{info, warn};

use crate::error::Result;
use crate::extraction::parse_reply;
use crate::gemini::GeminiClient;
use crate::intent::Intent;
use crate::prompt::SYSTEM_PROMPT;
use crate::router::Router;

/// Regex router first, Gemini second
#[derive(Clone)]
pub struct IntentExtractor {
    router: Arc<Router>,
    llm: Option<Arc<GeminiClient>>,
}

impl IntentExtractor {
    pub fn new(llm: Option<GeminiClient>) -> Result<Self> {
        if llm.is_none() {
            warn!("No Gemini API key configured, free-text classification is limited to patterns");
        }
        Ok(Self {
            router: Arc::new(Router::new()?),
            llm: llm.map(Arc::new),
        })
    }

    pub fn route(&self, text: &str) -> Option<Intent> {
        self.router.route(text)
    }

    pub fn llm_enabled(&self) -> bool {
        self.llm.is_some()
    }

    /// Classify with the model; `Unknown` when the model is not configured
    pub async fn ask_llm(&self, text: &str) -> Result<Intent> {
        let Some(llm) = &self.llm else {
            return Ok(Intent::unknown());
        };
        let raw = llm.generate_json(SYSTEM_PROMPT, text).await?;
        let intent = parse_reply(&raw)?;
        info!("LLM classified message as {}", intent.name());
        Ok(intent)
    }
}

//! Chat-completions client for article enrichment.
//!
//! Talks to an OpenAI-compatible `/chat/completions` endpoint (DeepSeek by
//! default) and exposes the three enrichment operations the pipeline needs:
//! [`ChatClient::classify`], [`ChatClient::summarize`] and
//! [`ChatClient::translate_title`].
//!
//! The client is constructed once at startup and passed by reference; there
//! is no module-level client state. Blank inputs short-circuit to empty
//! output without a request; a classifier answer outside the closed label
//! set is logged and mapped to [`Category::Other`] explicitly.

use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::{debug, instrument, warn};

use crate::errors::DigestError;
use crate::models::Category;
use crate::utils::truncate_for_log;

/// Abstracts are cut to this many chars before classification.
const CLASSIFY_ABSTRACT_MAX_CHARS: usize = 1500;

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f32,
    stream: bool,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: AssistantMessage,
}

#[derive(Debug, Deserialize)]
struct AssistantMessage {
    content: Option<String>,
}

/// Client for an OpenAI-compatible chat API, shared for the whole run.
pub struct ChatClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    model: String,
}

impl ChatClient {
    pub fn new(base_url: &str, api_key: &str, model: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.to_string(),
            api_key: api_key.to_string(),
            model: model.to_string(),
        }
    }

    async fn chat(&self, prompt: String, temperature: f32) -> Result<String, DigestError> {
        let url = format!("{}/chat/completions", self.base_url.trim_end_matches('/'));
        let request = ChatRequest {
            model: self.model.clone(),
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            temperature,
            stream: false,
        };

        let t0 = Instant::now();
        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| DigestError::transport(&url, e))?;
        let parsed: ChatResponse = response
            .json()
            .await
            .map_err(|e| DigestError::transport(&url, e))?;

        let content = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .ok_or_else(|| DigestError::Api("completion had no content".to_string()))?;

        debug!(
            model = %self.model,
            elapsed_ms = t0.elapsed().as_millis() as u64,
            preview = %truncate_for_log(&content, 120),
            "Chat completion"
        );
        Ok(content)
    }

    /// Classify a paper into the closed category set, from title and abstract.
    #[instrument(level = "info", skip_all, fields(title = %truncate_for_log(title, 80)))]
    pub async fn classify(
        &self,
        title: &str,
        abstract_text: &str,
    ) -> Result<Category, DigestError> {
        let answer = self.chat(classify_prompt(title, abstract_text), 0.0).await?;
        Ok(category_from_answer(&answer))
    }

    /// Write the Chinese editorial digest for a paper.
    ///
    /// Empty `full_text` yields empty output without an API call.
    #[instrument(level = "info", skip_all, fields(title = %truncate_for_log(title, 80)))]
    pub async fn summarize(&self, title: &str, full_text: &str) -> Result<String, DigestError> {
        if full_text.trim().is_empty() {
            return Ok(String::new());
        }
        self.chat(summary_prompt(title, full_text), 0.3).await
    }

    /// Translate a paper title into Chinese. Blank titles yield empty output.
    #[instrument(level = "info", skip_all, fields(title = %truncate_for_log(title, 80)))]
    pub async fn translate_title(&self, title: &str) -> Result<String, DigestError> {
        if title.trim().is_empty() {
            return Ok(String::new());
        }
        self.chat(translate_prompt(title), 0.3).await
    }
}

fn category_from_answer(answer: &str) -> Category {
    match Category::parse(answer) {
        Some(category) => category,
        None => {
            warn!(
                answer = %truncate_for_log(answer, 80),
                "Classifier answered outside the label set, using Other"
            );
            Category::Other
        }
    }
}

fn classify_prompt(title: &str, abstract_text: &str) -> String {
    let labels = Category::ALL
        .iter()
        .map(|c| format!("- {}", c.as_label()))
        .collect::<Vec<_>>()
        .join("\n");
    let abstract_head: String = abstract_text
        .chars()
        .take(CLASSIFY_ABSTRACT_MAX_CHARS)
        .collect();
    format!(
        "你是一名学术期刊编辑。\n\n\
         请将下列论文【且仅能】归类到以下学科之一：\n\
         {labels}\n\n\
         【论文标题】\n{title}\n\n\
         【论文摘要】\n{abstract_head}\n\n\
         要求：\n\
         1. 只输出学科英文名\n\
         2. 不要输出解释"
    )
}

fn summary_prompt(title: &str, content: &str) -> String {
    format!(
        "你是一名学术期刊编辑，请为以下 Nature Research Article 撰写【中文论文导读】：\n\n\
         【论文标题】\n{title}\n\n\
         【论文摘要】\n{content}\n\n\
         要求：\n\
         1. 150–250 字\n\
         2. 学术、客观、克制，不使用宣传性语言\n\
         3. 包含：\n\
            - 研究背景\n\
            - 核心发现\n\
            - 方法或机制亮点\n\
            - 学术意义\n\
         4. 不逐句翻译摘要，而是重组表达"
    )
}

fn translate_prompt(title: &str) -> String {
    format!("请将论文的标题翻译成中文：\n\n{title}")
}

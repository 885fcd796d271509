// API client module: a small blocking client for an OpenAI compatible
// chat-completions endpoint. The rest of the crate only sees it through
// the `Oracle` trait so tests can script the model's replies.

use crate::config::Settings;
use crate::error::{Error, Result};
use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use serde::{Deserialize, Serialize};

/// Something that answers a single prompt with free text.
pub trait Oracle {
    fn ask(&self, prompt: &str) -> Result<String>;
}

/// Holds the reqwest blocking client, the endpoint base URL, the model name
/// and an optional API key.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    model: String,
    api_key: Option<String>,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

/// Request body for `POST /chat/completions`.
#[derive(Serialize, Debug)]
pub struct ChatRequest<'a> {
    pub model: &'a str,
    pub messages: Vec<ChatMessage>,
}

#[derive(Deserialize, Debug)]
pub struct ChatResponse {
    #[serde(default)]
    pub choices: Vec<ChatChoice>,
}

#[derive(Deserialize, Debug)]
pub struct ChatChoice {
    pub message: ChatReplyMessage,
}

/// `content` may be null for some providers.
#[derive(Deserialize, Debug)]
pub struct ChatReplyMessage {
    pub content: Option<String>,
}

impl ApiClient {
    /// Build a client from the loaded settings. Without a configured
    /// timeout the request waits indefinitely.
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let client = Client::builder()
            .timeout(settings.request_timeout)
            .build()
            .map_err(|e| Error::ModelInvocation(format!("Failed to build HTTP client: {e}")))?;
        Ok(ApiClient {
            client,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            model: settings.model.clone(),
            api_key: settings.api_key.clone(),
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn auth_headers(&self) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        if let Some(key) = &self.api_key {
            let val = HeaderValue::from_str(&format!("Bearer {key}"))
                .map_err(|e| Error::ModelInvocation(format!("Invalid API key: {e}")))?;
            headers.insert(AUTHORIZATION, val);
        }
        Ok(headers)
    }

    /// Send one user message and return the text of the first choice.
    pub fn complete(&self, prompt: &str) -> Result<String> {
        let url = format!("{}/chat/completions", self.base_url);
        let body = ChatRequest {
            model: &self.model,
            messages: vec![ChatMessage {
                role: "user".into(),
                content: prompt.to_string(),
            }],
        };

        let res = self
            .client
            .post(&url)
            .headers(self.auth_headers()?)
            .json(&body)
            .send()
            .map_err(|e| Error::ModelInvocation(format!("Failed to send request to {url}: {e}")))?;
        if !res.status().is_success() {
            let status = res.status();
            let txt = res.text().unwrap_or_default();
            return Err(Error::ModelInvocation(format!("{status} - {txt}")));
        }

        let resp: ChatResponse = res
            .json()
            .map_err(|e| Error::ModelInvocation(format!("Parsing chat response json: {e}")))?;
        first_content(resp)
    }
}

impl Oracle for ApiClient {
    fn ask(&self, prompt: &str) -> Result<String> {
        self.complete(prompt)
    }
}

fn first_content(resp: ChatResponse) -> Result<String> {
    resp.choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .ok_or_else(|| Error::ModelInvocation("Response contained no message content".into()))
}

use crate::config::email::EmailConfig;
use crate::domain::model::{EmailDraft, EmailRequest};
use crate::domain::ports::EmailDrafter;
use crate::utils::error::{Result, ScoutError};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

const SYSTEM_PROMPT: &str = "You are a professional email writer specializing in recruitment \
and business development for financial advisory firms. Always respond with valid JSON \
containing \"subject\" and \"body\" fields.";

#[derive(Debug, Deserialize)]
struct ChatCompletion {
    #[serde(default)]
    choices: Vec<ChatChoice>,
    usage: Option<ChatUsage>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatUsage {
    total_tokens: u64,
}

#[derive(Debug, Deserialize)]
struct DraftContent {
    subject: String,
    body: String,
}

/// 透過 OpenAI 相容的 chat-completions 端點草擬招募信
pub struct ChatEmailDrafter {
    client: Client,
    config: EmailConfig,
}

impl ChatEmailDrafter {
    pub fn new(config: EmailConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }
}

fn build_prompt(request: &EmailRequest) -> String {
    let mut prompt = format!(
        "Write a personalized, professional email persuading this company's director to join \
your client's financial advisory firm. Emphasize succession-planning benefits given the \
director's age, keep it 150-250 words, and end with a call to action to schedule a call.\n\n\
Company Name: {}\nCompany Number: {}\nDirector Name: {}\nDirector Age: {}\nAddress: {}\n",
        request.company_name,
        request.company_number.as_deref().unwrap_or("N/A"),
        request.director_name.as_deref().unwrap_or("Not specified"),
        request
            .director_age
            .map(|age| age.to_string())
            .unwrap_or_else(|| "N/A".to_string()),
        request.address.as_deref().unwrap_or("N/A"),
    );

    if let Some(instructions) = &request.custom_instructions {
        prompt.push_str(&format!("\nAdditional Instructions: {}\n", instructions));
    }

    prompt.push_str(
        "\nRespond as JSON with exactly two fields: \"subject\" and \"body\". \
No other text outside the JSON.",
    );

    prompt
}

#[async_trait]
impl EmailDrafter for ChatEmailDrafter {
    async fn draft(&self, request: &EmailRequest) -> Result<EmailDraft> {
        if request.company_name.trim().is_empty() {
            return Err(ScoutError::MissingCompanyName);
        }

        let payload = serde_json::json!({
            "model": self.config.model,
            "messages": [
                {"role": "system", "content": SYSTEM_PROMPT},
                {"role": "user", "content": build_prompt(request)}
            ],
            "temperature": 0.7,
            "max_tokens": self.config.max_tokens,
            "response_format": {"type": "json_object"}
        });

        tracing::debug!("📨 Drafting email for {}", request.company_name);

        let response = self
            .client
            .post(&self.config.endpoint)
            .bearer_auth(&self.config.api_key)
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ScoutError::EmailDraftError {
                message: format!("chat endpoint returned status {}", status),
            });
        }

        let completion: ChatCompletion = response.json().await?;
        let content = completion
            .choices
            .first()
            .map(|choice| choice.message.content.clone())
            .ok_or_else(|| ScoutError::EmailDraftError {
                message: "chat endpoint returned no choices".to_string(),
            })?;

        // 模型被要求回 {"subject", "body"} 的 JSON
        let draft: DraftContent =
            serde_json::from_str(&content).map_err(|e| ScoutError::EmailDraftError {
                message: format!("could not parse draft content: {}", e),
            })?;

        Ok(EmailDraft {
            subject: draft.subject,
            body: draft.body,
            tokens_used: completion
                .usage
                .map(|usage| usage.total_tokens)
                .unwrap_or(0),
        })
    }
}

use crate::constants::{endpoints, models};
use crate::error::ScoutError;
use crate::llm::traits::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Client for the Gemini `generateContent` endpoint.
///
/// Gemini calls its two conversational roles `user` and `model`; the mapping from
/// [`Role`] happens here so the rest of the crate stays provider-neutral.
pub struct GeminiClient {
    client: reqwest::Client,
    api_key: String,
    model: String,
    base_url: String,
    max_output_tokens: Option<u32>,
    temperature: Option<f32>,
}

impl GeminiClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: api_key.into(),
            model: models::DEFAULT_GEMINI_MODEL.to_string(),
            base_url: endpoints::GEMINI_BASE_URL.to_string(),
            max_output_tokens: None,
            temperature: None,
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_max_output_tokens(mut self, max: u32) -> Self {
        self.max_output_tokens = Some(max);
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/{}/models/{}:generateContent",
            self.base_url,
            endpoints::GEMINI_API_VERSION,
            self.model
        )
    }

    fn build_request_body<'a>(
        &self,
        prior_context: &'a [Turn],
        live_message: &'a str,
    ) -> GeminiRequest<'a> {
        let mut contents: Vec<GeminiContent<'a>> = prior_context
            .iter()
            .map(|turn| GeminiContent {
                role: gemini_role(turn.role),
                parts: vec![GeminiPart { text: &turn.text }],
            })
            .collect();

        contents.push(GeminiContent {
            role: gemini_role(Role::User),
            parts: vec![GeminiPart { text: live_message }],
        });

        let generation_config = if self.max_output_tokens.is_some() || self.temperature.is_some() {
            Some(GenerationConfig {
                max_output_tokens: self.max_output_tokens,
                temperature: self.temperature,
            })
        } else {
            None
        };

        GeminiRequest {
            contents,
            generation_config,
        }
    }
}

fn gemini_role(role: Role) -> &'static str {
    match role {
        Role::User => "user",
        Role::Assistant => "model",
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiRequest<'a> {
    contents: Vec<GeminiContent<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Debug, Serialize)]
struct GeminiContent<'a> {
    role: &'static str,
    parts: Vec<GeminiPart<'a>>,
}

#[derive(Debug, Serialize)]
struct GeminiPart<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    max_output_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
    prompt_feedback: Option<PromptFeedback>,
    usage_metadata: Option<UsageMetadata>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiCandidate {
    content: Option<GeminiResponseContent>,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GeminiResponseContent {
    #[serde(default)]
    parts: Vec<GeminiResponsePart>,
}

#[derive(Debug, Deserialize)]
struct GeminiResponsePart {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    block_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UsageMetadata {
    #[serde(default)]
    prompt_token_count: u32,
    #[serde(default)]
    candidates_token_count: u32,
}

#[async_trait::async_trait]
impl LlmClient for GeminiClient {
    async fn send(
        &self,
        prior_context: &[Turn],
        live_message: &str,
    ) -> Result<LlmResponse, ScoutError> {
        let url = self.endpoint();
        let request_body = self.build_request_body(prior_context, live_message);
        debug!(
            model = %self.model,
            contents = request_body.contents.len(),
            "sending generateContent request"
        );

        let response = self
            .client
            .post(&url)
            .header(endpoints::GEMINI_API_KEY_HEADER, &self.api_key)
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();
        let response_text = response.text().await?;

        if !status.is_success() {
            return Err(ScoutError::Llm(format!(
                "Gemini API error ({}): {}",
                status, response_text
            )));
        }

        let api_response: GeminiResponse = serde_json::from_str(&response_text)?;

        if let Some(reason) = api_response
            .prompt_feedback
            .as_ref()
            .and_then(|f| f.block_reason.as_deref())
        {
            return Err(ScoutError::Llm(format!("Prompt blocked: {reason}")));
        }

        let candidate = api_response
            .candidates
            .first()
            .ok_or_else(|| ScoutError::llm("No response from API"))?;

        let text: String = candidate
            .content
            .iter()
            .flat_map(|c| c.parts.iter())
            .filter_map(|p| p.text.as_deref())
            .collect();

        if text.is_empty() {
            let reason = candidate.finish_reason.as_deref().unwrap_or("UNKNOWN");
            return Err(ScoutError::Llm(format!(
                "Response contained no text (finish reason: {reason})"
            )));
        }

        Ok(LlmResponse {
            text,
            usage: api_response.usage_metadata.map(|u| Usage {
                input_tokens: u.prompt_token_count,
                output_tokens: u.candidates_token_count,
            }),
        })
    }

    fn model(&self) -> &str {
        &self.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_body_maps_roles_and_appends_live_message() {
        let client = GeminiClient::new("key");
        let prior = vec![Turn::user("instructions"), Turn::assistant("ok")];
        let body = serde_json::to_value(client.build_request_body(&prior, "Alex")).unwrap();

        let contents = body["contents"].as_array().unwrap();
        assert_eq!(contents.len(), 3);
        assert_eq!(contents[0]["role"], "user");
        assert_eq!(contents[1]["role"], "model");
        assert_eq!(contents[1]["parts"][0]["text"], "ok");
        assert_eq!(contents[2]["role"], "user");
        assert_eq!(contents[2]["parts"][0]["text"], "Alex");
        assert!(body.get("generationConfig").is_none());
    }

    #[test]
    fn test_request_body_includes_generation_config_when_set() {
        let client = GeminiClient::new("key")
            .with_max_output_tokens(256)
            .with_temperature(0.5);
        let body = serde_json::to_value(client.build_request_body(&[], "hi")).unwrap();

        assert_eq!(body["generationConfig"]["maxOutputTokens"], 256);
        assert_eq!(body["generationConfig"]["temperature"], 0.5);
    }

    #[test]
    fn test_endpoint_uses_model_and_trims_base_url() {
        let client = GeminiClient::new("key")
            .with_model("gemini-test")
            .with_base_url("http://localhost:9999/");
        assert_eq!(
            client.endpoint(),
            "http://localhost:9999/v1beta/models/gemini-test:generateContent"
        );
    }
}

use serde::{Deserialize, Serialize};
use serde_json::json;
use std::time::Duration;

use super::{AnalysisError, EncodedImage, PhotoAnalysis};
use crate::config::{AnalysisConfig, AnalysisProviderType};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

/// A backend capable of describing a photo.
pub trait AnalysisProvider: Send + Sync {
    /// Analyze an encoded image, returning structured metadata.
    fn analyze(&self, image: &EncodedImage) -> Result<PhotoAnalysis, AnalysisError>;

    /// Provider name for display and logs.
    fn provider_name(&self) -> &'static str;
}

/// The prompt sent with every analysis request.
fn analysis_prompt() -> &'static str {
    "Analyze this photo and provide structured metadata. \
     Extract the following: \
     1. Captions/Notes: A brief description. \
     2. Suggested Tags: Up to 5 relevant keywords. \
     3. Suggested Category: One of (Nature, Architecture, Travel, People, Abstract, Other). \
     4. Likely Location: If recognizable, suggest a place name.\n\n\
     Respond with a JSON object with keys \"notes\" (string), \"tags\" \
     (array of strings), \"category\" (string) and optionally \
     \"locationName\" (string). Return ONLY the JSON, no other text."
}

/// Extract JSON from a response body that may wrap it in a markdown
/// code block.
fn extract_json(content: &str) -> &str {
    let trimmed = content.trim();
    if let Some(rest) = trimmed.strip_prefix("```") {
        if let Some(start) = rest.find('\n') {
            let body = &rest[start + 1..];
            if let Some(end) = body.rfind("```") {
                return body[..end].trim();
            }
        }
    }
    trimmed
}

fn parse_analysis(content: &str) -> Result<PhotoAnalysis, AnalysisError> {
    serde_json::from_str(extract_json(content)).map_err(|e| {
        AnalysisError::MalformedResponse(format!("{} - response was: {}", e, content))
    })
}

// ============================================================================
// Gemini provider
// ============================================================================

pub struct GeminiProvider {
    endpoint: String,
    model: String,
    api_key: String,
}

#[derive(Debug, Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
}

#[derive(Debug, Deserialize)]
struct GeminiCandidate {
    content: GeminiContent,
}

#[derive(Debug, Deserialize)]
struct GeminiContent {
    #[serde(default)]
    parts: Vec<GeminiPart>,
}

#[derive(Debug, Deserialize)]
struct GeminiPart {
    text: Option<String>,
}

impl GeminiProvider {
    pub fn new(endpoint: &str, model: &str, api_key: &str) -> Self {
        Self {
            endpoint: endpoint.to_string(),
            model: model.to_string(),
            api_key: api_key.to_string(),
        }
    }
}

impl AnalysisProvider for GeminiProvider {
    fn analyze(&self, image: &EncodedImage) -> Result<PhotoAnalysis, AnalysisError> {
        let request = json!({
            "contents": [{
                "parts": [
                    { "inlineData": { "data": image.data, "mimeType": image.media_type } },
                    { "text": analysis_prompt() }
                ]
            }],
            "generationConfig": {
                "responseMimeType": "application/json",
                "responseSchema": {
                    "type": "OBJECT",
                    "properties": {
                        "notes": { "type": "STRING" },
                        "tags": { "type": "ARRAY", "items": { "type": "STRING" } },
                        "category": { "type": "STRING" },
                        "locationName": { "type": "STRING" }
                    },
                    "required": ["notes", "tags", "category"]
                }
            }
        });

        let url = format!(
            "{}/models/{}:generateContent?key={}",
            self.endpoint, self.model, self.api_key
        );

        let agent = ureq::AgentBuilder::new().timeout(REQUEST_TIMEOUT).build();

        let response = agent
            .post(&url)
            .set("Content-Type", "application/json")
            .send_json(&request)
            .map_err(|e| AnalysisError::Request(e.to_string()))?;

        let gemini_response: GeminiResponse = response
            .into_json()
            .map_err(|e| AnalysisError::MalformedResponse(e.to_string()))?;

        let text = gemini_response
            .candidates
            .first()
            .and_then(|c| c.content.parts.first())
            .and_then(|p| p.text.clone())
            .ok_or(AnalysisError::EmptyResponse)?;

        parse_analysis(&text)
    }

    fn provider_name(&self) -> &'static str {
        "Gemini"
    }
}

// ============================================================================
// OpenAI-compatible provider (works with LM Studio, OpenAI, and compatible APIs)
// ============================================================================

pub struct OpenAICompatibleProvider {
    endpoint: String,
    model: String,
    api_key: Option<String>,
}

#[derive(Debug, Serialize)]
struct OpenAIChatRequest {
    model: String,
    messages: Vec<OpenAIMessage>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct OpenAIMessage {
    role: String,
    content: Vec<OpenAIContentPart>,
}

#[derive(Debug, Serialize)]
#[serde(tag = "type")]
enum OpenAIContentPart {
    #[serde(rename = "text")]
    Text { text: String },
    #[serde(rename = "image_url")]
    ImageUrl { image_url: ImageUrl },
}

#[derive(Debug, Serialize)]
struct ImageUrl {
    url: String,
}

#[derive(Debug, Deserialize)]
struct OpenAIChatResponse {
    choices: Vec<OpenAIChoice>,
}

#[derive(Debug, Deserialize)]
struct OpenAIChoice {
    message: OpenAIResponseMessage,
}

#[derive(Debug, Deserialize)]
struct OpenAIResponseMessage {
    content: String,
}

impl OpenAICompatibleProvider {
    pub fn new(endpoint: &str, model: &str, api_key: Option<&str>) -> Self {
        Self {
            endpoint: endpoint.to_string(),
            model: model.to_string(),
            api_key: api_key.map(|s| s.to_string()),
        }
    }
}

impl AnalysisProvider for OpenAICompatibleProvider {
    fn analyze(&self, image: &EncodedImage) -> Result<PhotoAnalysis, AnalysisError> {
        let request = OpenAIChatRequest {
            model: self.model.clone(),
            messages: vec![OpenAIMessage {
                role: "user".to_string(),
                content: vec![
                    OpenAIContentPart::Text {
                        text: analysis_prompt().to_string(),
                    },
                    OpenAIContentPart::ImageUrl {
                        image_url: ImageUrl {
                            url: image.data_url(),
                        },
                    },
                ],
            }],
            max_tokens: 500,
            temperature: 0.4,
        };

        let url = format!("{}/chat/completions", self.endpoint);

        let agent = ureq::AgentBuilder::new().timeout(REQUEST_TIMEOUT).build();

        let mut req = agent.post(&url).set("Content-Type", "application/json");

        if let Some(ref api_key) = self.api_key {
            req = req.set("Authorization", &format!("Bearer {}", api_key));
        }

        let response = req
            .send_json(&request)
            .map_err(|e| AnalysisError::Request(e.to_string()))?;

        let chat_response: OpenAIChatResponse = response
            .into_json()
            .map_err(|e| AnalysisError::MalformedResponse(e.to_string()))?;

        let content = chat_response
            .choices
            .first()
            .map(|c| c.message.content.clone())
            .ok_or(AnalysisError::EmptyResponse)?;

        parse_analysis(&content)
    }

    fn provider_name(&self) -> &'static str {
        "OpenAI-compatible"
    }
}

// ============================================================================
// Factory function
// ============================================================================

/// Create an analysis provider based on configuration.
pub fn create_provider(config: &AnalysisConfig) -> Box<dyn AnalysisProvider> {
    match config.provider {
        AnalysisProviderType::Gemini => Box::new(GeminiProvider::new(
            &config.endpoint,
            &config.model,
            config.api_key.as_deref().unwrap_or(""),
        )),
        AnalysisProviderType::OpenAI => Box::new(OpenAICompatibleProvider::new(
            "https://api.openai.com/v1",
            &config.model,
            config.api_key.as_deref(),
        )),
        AnalysisProviderType::LmStudio => Box::new(OpenAICompatibleProvider::new(
            &config.endpoint,
            &config.model,
            config.api_key.as_deref(),
        )),
    }
}

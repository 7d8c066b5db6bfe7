use crate::core::{encoder, prompts};
use crate::domain::model::ImageUpload;
use serde::{Deserialize, Serialize};

/// Visual-detail hint for the image reference.
pub const IMAGE_DETAIL: &str = "high";

// Wire types for the OpenAI-compatible chat completion endpoint.

#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub temperature: f32,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: MessageContent,
}

#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum MessageContent {
    Text(String),
    Parts(Vec<ContentPart>),
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type")]
pub enum ContentPart {
    #[serde(rename = "text")]
    Text { text: String },
    #[serde(rename = "image_url")]
    ImageUrl { image_url: ImageUrlContent },
}

#[derive(Debug, Clone, Serialize)]
pub struct ImageUrlContent {
    pub url: String,
    pub detail: String,
}

#[derive(Debug, Deserialize)]
pub struct ChatResponse {
    pub choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
pub struct Choice {
    pub message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
pub struct ResponseMessage {
    pub content: String,
}

/// Assembles the single outbound audit request: the fixed system instruction,
/// the table text verbatim, and the image as a high-detail data URI. Built
/// fresh per invocation; temperature 0 keeps repeated runs literal.
pub fn build_audit_request(model: &str, table_text: &str, image: &ImageUpload) -> ChatRequest {
    ChatRequest {
        model: model.to_string(),
        temperature: 0.0,
        messages: vec![
            ChatMessage {
                role: "system".to_string(),
                content: MessageContent::Text(prompts::AUDIT_SYSTEM_PROMPT.to_string()),
            },
            ChatMessage {
                role: "user".to_string(),
                content: MessageContent::Parts(vec![
                    ContentPart::Text {
                        text: prompts::build_user_text(table_text),
                    },
                    ContentPart::ImageUrl {
                        image_url: ImageUrlContent {
                            url: encoder::data_uri(image),
                            detail: IMAGE_DETAIL.to_string(),
                        },
                    },
                ]),
            },
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::MediaType;

    fn sample_image() -> ImageUpload {
        ImageUpload::new(vec![0x89, 0x50, 0x4E, 0x47], MediaType::Png)
    }

    #[test]
    fn test_request_never_omits_its_parts() {
        let request = build_audit_request("gpt-4o", "Model  Power\nX100  5kW", &sample_image());
        let json = serde_json::to_string(&request).unwrap();

        assert!(json.contains(prompts::AUDIT_SYSTEM_PROMPT));
        assert!(json.contains("Model  Power"));
        assert!(json.contains("data:image/png;base64,"));
        assert!(json.contains("\"detail\":\"high\""));
    }

    #[test]
    fn test_request_is_deterministic_decoding() {
        let request = build_audit_request("gpt-4o", "x", &sample_image());
        assert_eq!(request.temperature, 0.0);
        assert_eq!(request.model, "gpt-4o");
    }

    #[test]
    fn test_message_shape() {
        let request = build_audit_request("gpt-4o", "x\ty", &sample_image());
        assert_eq!(request.messages.len(), 2);
        assert_eq!(request.messages[0].role, "system");
        assert_eq!(request.messages[1].role, "user");

        match &request.messages[1].content {
            MessageContent::Parts(parts) => {
                assert_eq!(parts.len(), 2);
                assert!(matches!(parts[0], ContentPart::Text { .. }));
                assert!(matches!(parts[1], ContentPart::ImageUrl { .. }));
            }
            MessageContent::Text(_) => panic!("user message must carry text and image parts"),
        }
    }

    #[test]
    fn test_wire_format_tags() {
        let request = build_audit_request("gpt-4o", "t", &sample_image());
        let json: serde_json::Value = serde_json::to_value(&request).unwrap();

        let parts = &json["messages"][1]["content"];
        assert_eq!(parts[0]["type"], "text");
        assert_eq!(parts[1]["type"], "image_url");
        assert!(parts[1]["image_url"]["url"]
            .as_str()
            .unwrap()
            .starts_with("data:image/png;base64,"));
        // System message content serializes as a plain string.
        assert!(json["messages"][0]["content"].is_string());
    }

    #[test]
    fn test_identical_input_builds_identical_request() {
        let a = build_audit_request("gpt-4o", "a\tb", &sample_image());
        let b = build_audit_request("gpt-4o", "a\tb", &sample_image());
        assert_eq!(
            serde_json::to_string(&a).unwrap(),
            serde_json::to_string(&b).unwrap()
        );
    }
}

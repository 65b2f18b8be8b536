//! Client for the remote language-model API.
//!
//! Sends a chat-completion request declaring a single callable function and
//! parses the schema-constrained arguments it returns. Responses that do not
//! carry the expected function call are rejected outright rather than being
//! coerced into empty results.

use serde_json::{json, Value};

use crate::config::Config;
use crate::errors::AppError;
use crate::models::SuggestionBatch;

use super::prompt::build_gift_prompt;

/// Name of the one function the model is directed to call.
pub const SUGGEST_FUNCTION: &str = "suggest_gifts";

/// Client for fetching gift suggestions from the remote model.
///
/// Every invocation is a fresh network call; identical inputs are not
/// deduplicated and nothing is cached.
#[derive(Clone, Debug)]
pub struct SuggestionClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl SuggestionClient {
    /// Build a client from configuration. Fails fast when no API key is set,
    /// before any network call is attempted.
    pub fn from_config(config: &Config) -> Result<Self, AppError> {
        let api_key = config.model_api_key.clone().ok_or_else(|| {
            AppError::Config("Missing model API key (OPENAI_API_KEY)".to_string())
        })?;

        Ok(Self {
            http: reqwest::Client::new(),
            api_key,
            base_url: config.model_base_url.trim_end_matches('/').to_string(),
            model: config.model_name.clone(),
        })
    }

    /// Fetch one suggestion batch for a giftee.
    pub async fn fetch_suggestions(
        &self,
        name: &str,
        bio: Option<&str>,
        age: Option<u32>,
        refinement: Option<&str>,
    ) -> Result<SuggestionBatch, AppError> {
        let prompt = build_gift_prompt(name, bio, age, refinement);

        let body = json!({
            "model": self.model,
            "messages": [
                { "role": "system", "content": prompt.system },
                { "role": "user", "content": prompt.user },
            ],
            "functions": [suggest_function_declaration()],
            "function_call": { "name": SUGGEST_FUNCTION },
            "temperature": 0.7,
        });

        let url = format!("{}/chat/completions", self.base_url);
        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            tracing::error!("Model API error {}: {}", status, text);
            return Err(AppError::Upstream(format!(
                "Model API returned {}",
                status
            )));
        }

        let payload: Value = response.json().await?;
        parse_function_call(&payload)
    }
}

/// The declared function contract: exactly-shaped suggestion objects plus
/// short follow-up tags. Counts and word limits live here, in the schema the
/// model is constrained by, not in client-side validation.
fn suggest_function_declaration() -> Value {
    json!({
        "name": SUGGEST_FUNCTION,
        "description": "Return gift suggestions and follow-up refinements for the giftee.",
        "parameters": {
            "type": "object",
            "properties": {
                "suggestions": {
                    "type": "array",
                    "minItems": 3,
                    "maxItems": 3,
                    "items": {
                        "type": "object",
                        "properties": {
                            "description": {
                                "type": "string",
                                "description": "A specific named product, brand, title, or experience."
                            },
                            "shortDescription": {
                                "type": "string",
                                "description": "Short category label, e.g. 'Jazz record'."
                            },
                            "cost": {
                                "type": "string",
                                "enum": ["low", "medium", "high"]
                            }
                        },
                        "required": ["description", "shortDescription", "cost"]
                    }
                },
                "followUpQuestions": {
                    "type": "array",
                    "minItems": 3,
                    "maxItems": 3,
                    "items": {
                        "type": "object",
                        "properties": {
                            "text": {
                                "type": "string",
                                "description": "Refinement label of 3 words or fewer."
                            }
                        },
                        "required": ["text"]
                    }
                }
            },
            "required": ["suggestions", "followUpQuestions"]
        }
    })
}

/// Extract and validate the function-call arguments from a chat-completion
/// response body.
pub fn parse_function_call(body: &Value) -> Result<SuggestionBatch, AppError> {
    let arguments = body
        .get("choices")
        .and_then(|choices| choices.get(0))
        .and_then(|choice| choice.get("message"))
        .and_then(|message| message.get("function_call"))
        .and_then(|call| call.get("arguments"))
        .and_then(|args| args.as_str())
        .ok_or_else(|| {
            AppError::BadModelResponse(
                "Model response missing the suggest_gifts call; the response may have been truncated"
                    .to_string(),
            )
        })?;

    let payload: Value = serde_json::from_str(arguments).map_err(|e| {
        AppError::BadModelResponse(format!("Function-call arguments are not valid JSON: {}", e))
    })?;

    // Both fields must be present and must be sequences before the typed
    // parse; a partial batch is never returned.
    for field in ["suggestions", "followUpQuestions"] {
        match payload.get(field) {
            Some(value) if value.is_array() => {}
            Some(_) => {
                return Err(AppError::BadModelResponse(format!(
                    "Bad model response: `{}` is not an array",
                    field
                )))
            }
            None => {
                return Err(AppError::BadModelResponse(format!(
                    "Bad model response: missing `{}`",
                    field
                )))
            }
        }
    }

    serde_json::from_value(payload)
        .map_err(|e| AppError::BadModelResponse(format!("Bad model response: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CostTier;

    fn completion_with_arguments(arguments: &str) -> Value {
        json!({
            "choices": [{
                "message": {
                    "role": "assistant",
                    "function_call": {
                        "name": SUGGEST_FUNCTION,
                        "arguments": arguments,
                    }
                }
            }]
        })
    }

    fn good_arguments() -> String {
        json!({
            "suggestions": [
                { "description": "Blue Note 'Somethin' Else' vinyl", "shortDescription": "Jazz record", "cost": "low" },
                { "description": "Monstera deliciosa in ceramic pot", "shortDescription": "House plant", "cost": "medium" },
                { "description": "Ronnie Scott's jazz club tickets", "shortDescription": "Live music", "cost": "high" },
            ],
            "followUpQuestions": [
                { "text": "Cheaper gifts" },
                { "text": "More plants" },
                { "text": "Vinyl only" },
            ]
        })
        .to_string()
    }

    #[test]
    fn test_parse_well_formed_payload() {
        let body = completion_with_arguments(&good_arguments());
        let batch = parse_function_call(&body).unwrap();
        assert_eq!(batch.suggestions.len(), 3);
        assert_eq!(batch.follow_up_questions.len(), 3);
        assert_eq!(batch.suggestions[0].cost, CostTier::Low);
        assert_eq!(batch.suggestions[2].short_description, "Live music");
        assert_eq!(batch.follow_up_questions[1].text, "More plants");
    }

    #[test]
    fn test_missing_function_call_is_truncation() {
        let body = json!({
            "choices": [{ "message": { "role": "assistant", "content": "Here are some ideas..." } }]
        });
        let err = parse_function_call(&body).unwrap_err();
        assert!(matches!(err, AppError::BadModelResponse(_)));
        assert!(err.message().contains("truncated"));
    }

    #[test]
    fn test_missing_suggestions_field_rejected() {
        let arguments = json!({ "followUpQuestions": [] }).to_string();
        let err = parse_function_call(&completion_with_arguments(&arguments)).unwrap_err();
        assert!(matches!(err, AppError::BadModelResponse(_)));
        assert!(err.message().contains("suggestions"));
    }

    #[test]
    fn test_non_sequence_suggestions_rejected() {
        let arguments = json!({
            "suggestions": { "description": "a single object" },
            "followUpQuestions": []
        })
        .to_string();
        let err = parse_function_call(&completion_with_arguments(&arguments)).unwrap_err();
        assert!(matches!(err, AppError::BadModelResponse(_)));
        assert!(err.message().contains("not an array"));
    }

    #[test]
    fn test_unparseable_arguments_rejected() {
        let err =
            parse_function_call(&completion_with_arguments("{\"suggestions\": [")).unwrap_err();
        assert!(matches!(err, AppError::BadModelResponse(_)));
    }

    #[test]
    fn test_missing_api_key_is_config_error() {
        let mut config = Config::from_env();
        config.model_api_key = None;
        let err = SuggestionClient::from_config(&config).unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
    }
}

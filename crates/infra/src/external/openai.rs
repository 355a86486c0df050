//! Chat-completions client used as the recipe service.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use pantry_ai::{RecipeService, SuggestionError};

use crate::config::OpenAiConfig;

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 1],
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ApiError,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    message: String,
}

/// `RecipeService` backed by `POST {base_url}/chat/completions`.
///
/// One user message per request; the first choice's content is the recipe.
/// API error codes (`insufficient_quota`, `model_not_found`) map onto
/// `SuggestionErrorKind`; transport and decoding problems are `Other`.
#[derive(Debug, Clone)]
pub struct OpenAiRecipeService {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
    model: String,
}

impl OpenAiRecipeService {
    pub fn new(config: &OpenAiConfig) -> Result<Self, SuggestionError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| SuggestionError::other(format!("failed to build http client: {e}")))?;

        Ok(Self {
            client,
            endpoint: format!("{}/chat/completions", config.base_url.trim_end_matches('/')),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl RecipeService for OpenAiRecipeService {
    async fn complete(&self, prompt: &str) -> Result<String, SuggestionError> {
        let body = ChatRequest {
            model: &self.model,
            messages: [ChatMessage {
                role: "user",
                content: prompt,
            }],
        };

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| SuggestionError::other(format!("request failed: {e}")))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| SuggestionError::other(format!("failed to read response: {e}")))?;
        debug!(status = status.as_u16(), model = %self.model, "chat completion response received");

        if !status.is_success() {
            return Err(match serde_json::from_str::<ErrorEnvelope>(&text) {
                Ok(envelope) => SuggestionError::from_code(envelope.error.code.as_deref(), envelope.error.message),
                Err(_) => SuggestionError::other(format!("HTTP {status}: {text}")),
            });
        }

        let parsed: ChatResponse = serde_json::from_str(&text)
            .map_err(|e| SuggestionError::other(format!("malformed completion response: {e}")))?;

        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| SuggestionError::other("completion response had no choices"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    use axum::extract::State;
    use axum::http::{HeaderMap, StatusCode};
    use axum::response::IntoResponse;
    use axum::routing::post;
    use axum::{Json, Router};
    use serde_json::{Value, json};

    use pantry_ai::SuggestionErrorKind;

    #[derive(Clone)]
    struct Stub {
        status: StatusCode,
        reply: Value,
        seen: Arc<Mutex<Vec<(Option<String>, Value)>>>,
    }

    async fn completions(State(stub): State<Stub>, headers: HeaderMap, Json(body): Json<Value>) -> impl IntoResponse {
        let auth = headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        stub.seen.lock().unwrap().push((auth, body));
        (stub.status, Json(stub.reply.clone()))
    }

    async fn spawn_stub(stub: Stub) -> String {
        let app = Router::new()
            .route("/v1/chat/completions", post(completions))
            .with_state(stub);
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}/v1")
    }

    fn stub(status: StatusCode, reply: Value) -> Stub {
        Stub {
            status,
            reply,
            seen: Arc::new(Mutex::new(Vec::new())),
        }
    }

    fn service(base_url: String) -> OpenAiRecipeService {
        OpenAiRecipeService::new(&OpenAiConfig {
            api_key: "sk-test".into(),
            base_url,
            model: "gpt-4".into(),
            timeout: Duration::from_secs(5),
        })
        .unwrap()
    }

    #[tokio::test]
    async fn returns_first_choice_and_sends_single_user_message() {
        let stub = stub(
            StatusCode::OK,
            json!({ "choices": [
                { "message": { "role": "assistant", "content": "Fried rice" } },
                { "message": { "role": "assistant", "content": "Rice pudding" } }
            ]}),
        );
        let seen = stub.seen.clone();
        let base = spawn_stub(stub).await;

        let text = service(base).complete("Suggest a recipe").await.unwrap();
        assert_eq!(text, "Fried rice");

        let seen = seen.lock().unwrap();
        let (auth, body) = &seen[0];
        assert_eq!(auth.as_deref(), Some("Bearer sk-test"));
        assert_eq!(body["model"], "gpt-4");
        assert_eq!(body["messages"], json!([{ "role": "user", "content": "Suggest a recipe" }]));
    }

    #[tokio::test]
    async fn api_error_codes_map_to_kinds() {
        for (code, kind) in [
            ("insufficient_quota", SuggestionErrorKind::Quota),
            ("model_not_found", SuggestionErrorKind::ModelNotFound),
            ("rate_limit_exceeded", SuggestionErrorKind::Other),
        ] {
            let base = spawn_stub(stub(
                StatusCode::TOO_MANY_REQUESTS,
                json!({ "error": { "code": code, "message": "nope" } }),
            ))
            .await;

            let err = service(base).complete("x").await.unwrap_err();
            assert_eq!(err.kind, kind, "{code}");
            assert_eq!(err.message, "nope");
        }
    }

    #[tokio::test]
    async fn empty_choices_is_an_error() {
        let base = spawn_stub(stub(StatusCode::OK, json!({ "choices": [] }))).await;
        let err = service(base).complete("x").await.unwrap_err();
        assert_eq!(err.kind, SuggestionErrorKind::Other);
    }

    #[tokio::test]
    async fn unreachable_service_is_other() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let err = service(format!("http://{addr}/v1")).complete("x").await.unwrap_err();
        assert_eq!(err.kind, SuggestionErrorKind::Other);
    }
}

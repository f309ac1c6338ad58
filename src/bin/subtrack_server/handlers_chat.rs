use subtrack::assistant::{
    ChatResponse, GenerateContentRequest, GenerateContentResponse, response_text,
};

use super::*;

pub(super) async fn method_not_allowed() -> Response {
    error_response(StatusCode::METHOD_NOT_ALLOWED, "Method not allowed")
}

/// `{message}` in, `{text}` or `{error, debug?}` out.
pub(super) async fn chat(State(state): State<Arc<AppState>>, body: Bytes) -> Response {
    let message = serde_json::from_slice::<serde_json::Value>(&body)
        .ok()
        .and_then(|v| v.get("message").and_then(|m| m.as_str()).map(str::to_string))
        .filter(|m| !m.is_empty());
    let Some(message) = message else {
        return error_response(StatusCode::BAD_REQUEST, "message is required");
    };

    match &state.chat {
        ChatBackend::Unconfigured => {
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "API key not configured")
        }
        ChatBackend::Canned(reply) => Json(ChatResponse::text(reply.clone())).into_response(),
        ChatBackend::Gemini {
            api_key,
            model,
            base_url,
        } => match forward_to_gemini(&state.http, api_key, model, base_url, &message).await {
            Ok(text) => Json(ChatResponse::text(text)).into_response(),
            Err(failure) => (StatusCode::INTERNAL_SERVER_ERROR, Json(failure)).into_response(),
        },
    }
}

async fn forward_to_gemini(
    http: &reqwest::Client,
    api_key: &str,
    model: &str,
    base_url: &str,
    message: &str,
) -> std::result::Result<String, ChatResponse> {
    let url = format!(
        "{}/v1beta/models/{}:generateContent",
        base_url.trim_end_matches('/'),
        model
    );
    let resp = http
        .post(url)
        .query(&[("key", api_key)])
        .json(&GenerateContentRequest::from_prompt(message))
        .send()
        .await
        .map_err(|e| ChatResponse::error(e.to_string()))?;

    let raw = resp
        .text()
        .await
        .map_err(|e| ChatResponse::error(e.to_string()))?;
    let parsed: GenerateContentResponse = serde_json::from_str(&raw)
        .map_err(|e| ChatResponse::error(e.to_string()).with_debug(raw.clone()))?;
    response_text(parsed).map_err(|e| {
        tracing::warn!(error = %e, "gemini returned no text");
        ChatResponse::error(e.to_string()).with_debug(raw)
    })
}

use axum::{
    extract::{rejection::JsonRejection, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use std::sync::Arc;

use super::{AnswerPayload, AskRequest, AskResponse, HealthResponse, SpeakRequest, SpeakResponse};
use crate::api::routes::AppState;
use crate::config::AnswerMode;
use crate::error::AppError;
use crate::genai;

pub const SESSION_HEADER: &str = "x-session-id";
const AUDIO_MPEG: &str = "audio/mpeg";
const MAX_SESSION_ID_LEN: usize = 128;
pub const MAX_SPEAK_CHARS: usize = 10000;

pub async fn home() -> &'static str {
    "Balls"
}

pub async fn ask(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    payload: Result<Json<AskRequest>, JsonRejection>,
) -> Result<Json<AskResponse>, AppError> {
    let Json(request) = payload?;
    let question = required(request.question, "question")?;

    let prompt = genai::build_prompt(&question);
    let answer = genai::normalize_answer(&state.generator.generate(&prompt).await?);

    let response = match state.answer_mode {
        AnswerMode::Latest => AnswerPayload::Latest(answer),
        AnswerMode::History => match session_id(&headers) {
            Some(session) => {
                let answers = state.answers.record(session, answer);
                tracing::debug!(
                    "Session history has {} answer(s), {} session(s) tracked",
                    answers.len(),
                    state.answers.session_count()
                );
                AnswerPayload::History(answers)
            }
            None => AnswerPayload::History(vec![answer]),
        },
    };

    tracing::info!("Answered question ({} chars)", question.chars().count());

    Ok(Json(AskResponse { response }))
}

pub async fn speak(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    payload: Result<Json<SpeakRequest>, JsonRejection>,
) -> Result<Response, AppError> {
    let Json(request) = payload?;
    let reply_with_audio = request.wants_audio_reply() || accepts_audio(&headers);
    let content = required(request.into_text(), "content")?;

    if content.chars().count() > MAX_SPEAK_CHARS {
        return Err(AppError::BadRequest(format!(
            "Text too long (max {} chars)",
            MAX_SPEAK_CHARS
        )));
    }

    let audio = state.synthesizer.synthesize(&content).await?;
    tracing::info!(
        "Generated {} bytes of audio into {}",
        audio.len(),
        state.audio.path().display()
    );

    if reply_with_audio {
        state.audio.save(audio.clone()).await?;
        return Ok((StatusCode::OK, [(header::CONTENT_TYPE, AUDIO_MPEG)], audio).into_response());
    }

    state.audio.save(audio).await?;

    Ok(Json(SpeakResponse {
        message: "Audio generated successfully".to_string(),
    })
    .into_response())
}

pub async fn get_audio(State(state): State<Arc<AppState>>) -> Result<Response, AppError> {
    let audio = state.audio.load().await?;
    Ok((StatusCode::OK, [(header::CONTENT_TYPE, AUDIO_MPEG)], audio).into_response())
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

pub async fn not_found() -> AppError {
    AppError::NotFound
}

fn required(value: Option<String>, field: &str) -> Result<String, AppError> {
    match value {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(AppError::BadRequest(format!(
            "Missing '{}' in JSON data",
            field
        ))),
    }
}

fn session_id(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(SESSION_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|id| !id.is_empty() && id.len() <= MAX_SESSION_ID_LEN)
}

fn accepts_audio(headers: &HeaderMap) -> bool {
    headers
        .get_all(header::ACCEPT)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(','))
        .any(|media| media.split(';').next().map(str::trim) == Some(AUDIO_MPEG))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn required_rejects_missing_and_empty() {
        let err = required(None, "question").unwrap_err();
        assert_eq!(err.to_string(), "Bad request: Missing 'question' in JSON data");
        assert!(required(Some(String::new()), "content").is_err());
        assert_eq!(required(Some(" x ".into()), "content").unwrap(), " x ");
    }

    #[test]
    fn session_id_is_trimmed_and_bounded() {
        let mut headers = HeaderMap::new();
        assert_eq!(session_id(&headers), None);

        headers.insert(SESSION_HEADER, HeaderValue::from_static("  abc "));
        assert_eq!(session_id(&headers), Some("abc"));

        headers.insert(SESSION_HEADER, HeaderValue::from_str(&"x".repeat(200)).unwrap());
        assert_eq!(session_id(&headers), None);
    }

    #[test]
    fn accepts_audio_matches_media_type() {
        let mut headers = HeaderMap::new();
        assert!(!accepts_audio(&headers));

        headers.insert(header::ACCEPT, HeaderValue::from_static("application/json"));
        assert!(!accepts_audio(&headers));

        headers.insert(
            header::ACCEPT,
            HeaderValue::from_static("application/json, audio/mpeg;q=0.9"),
        );
        assert!(accepts_audio(&headers));
    }
}

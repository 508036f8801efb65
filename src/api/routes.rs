use axum::{
    http::{header, HeaderName, Method},
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers;
use crate::answers::AnswerHistory;
use crate::audio::AudioStore;
use crate::config::{AnswerMode, Config};
use crate::genai::{GeminiClient, TextGenerator};
use crate::speech::{GoogleTts, SpeechSynthesizer};

pub struct AppState {
    pub generator: Box<dyn TextGenerator>,
    pub synthesizer: Box<dyn SpeechSynthesizer>,
    pub audio: AudioStore,
    pub answers: AnswerHistory,
    pub answer_mode: AnswerMode,
}

impl AppState {
    /// Wire the Gemini and Google TTS clients from configuration.
    pub fn from_config(config: &Config) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(config.upstream_timeout)
            .build()?;

        Ok(Self {
            generator: Box::new(GeminiClient::new(
                client.clone(),
                config.gemini_base_url.clone(),
                config.gemini_model.clone(),
                config.gemini_api_key.clone(),
            )),
            synthesizer: Box::new(GoogleTts::new(
                client,
                config.tts_endpoint_base(),
                config.tts_lang.clone(),
            )),
            audio: AudioStore::new(config.audio_path()),
            answers: AnswerHistory::new(config.answer_history_limit, config.answer_session_limit),
            answer_mode: config.answer_mode,
        })
    }
}

pub fn create_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([
            header::CONTENT_TYPE,
            header::ACCEPT,
            HeaderName::from_static(handlers::SESSION_HEADER),
        ]);

    Router::new()
        .route("/", get(handlers::home))
        .route("/health", get(handlers::health))
        .route("/api", post(handlers::ask))
        .route("/tts", post(handlers::speak))
        .route("/get-audio", get(handlers::get_audio))
        .fallback(handlers::not_found)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

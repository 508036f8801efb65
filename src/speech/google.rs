use async_trait::async_trait;
use base64::{engine::general_purpose, Engine as _};
use lazy_static::lazy_static;
use regex::Regex;
use reqwest::{header, Client};
use serde_json::json;

use super::tokenizer::{tokenize, MAX_CHUNK_CHARS};
use super::SpeechSynthesizer;
use crate::error::AppError;

const RPC_ID: &str = "jQ1olc";
const RPC_PATH: &str = "/_/TranslateWebServerUi/data/batchexecute";
const USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0 Safari/537.36";

lazy_static! {
    static ref AUDIO_REGEX: Regex = Regex::new(r#"jQ1olc","\[\\"(.*)\\"]"#).unwrap();
}

/// Google Translate's speech endpoint, as used by the gTTS library.
pub struct GoogleTts {
    client: Client,
    base_url: String,
    lang: String,
}

impl GoogleTts {
    pub fn new(client: Client, base_url: impl Into<String>, lang: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            lang: lang.into(),
        }
    }

    async fn fetch_chunk(&self, chunk: &str) -> Result<Vec<u8>, AppError> {
        let rpc = package_rpc(chunk, &self.lang)?;

        let response = self
            .client
            .post(format!("{}{}", self.base_url, RPC_PATH))
            .header(header::REFERER, "http://translate.google.com/")
            .header(header::USER_AGENT, USER_AGENT)
            .form(&[("f.req", rpc)])
            .send()
            .await
            .map_err(|e| AppError::SpeechError(format!("Request to speech service failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::SpeechError(format!(
                "Speech service returned HTTP {}",
                status
            )));
        }

        let body = response.text().await.map_err(|e| {
            AppError::SpeechError(format!("Failed to read speech response: {}", e))
        })?;

        extract_audio(&body)
    }
}

#[async_trait]
impl SpeechSynthesizer for GoogleTts {
    async fn synthesize(&self, text: &str) -> Result<Vec<u8>, AppError> {
        let chunks = tokenize(text, MAX_CHUNK_CHARS);
        if chunks.is_empty() {
            return Err(AppError::BadRequest("No text to speak".into()));
        }

        tracing::debug!("Synthesizing {} chunk(s) in '{}'", chunks.len(), self.lang);

        let mut audio = Vec::new();
        for chunk in &chunks {
            audio.extend(self.fetch_chunk(chunk).await?);
        }

        Ok(audio)
    }
}

/// Build the `f.req` form value for one chunk.
fn package_rpc(text: &str, lang: &str) -> Result<String, AppError> {
    let parameter = serde_json::to_string(&json!([text, lang, null, "null"]))
        .map_err(|e| AppError::SpeechError(format!("Failed to encode request: {}", e)))?;
    serde_json::to_string(&json!([[[RPC_ID, parameter, null, "generic"]]]))
        .map_err(|e| AppError::SpeechError(format!("Failed to encode request: {}", e)))
}

/// Pull the base64 MP3 payload out of a batchexecute response.
fn extract_audio(body: &str) -> Result<Vec<u8>, AppError> {
    let mut audio = Vec::new();

    for line in body.lines().filter(|l| l.contains(RPC_ID)) {
        if let Some(cap) = AUDIO_REGEX.captures(line) {
            // Padding may arrive JSON-escaped
            let encoded = cap[1].replace("\\\\u003d", "=").replace("\\u003d", "=");
            let decoded = general_purpose::STANDARD
                .decode(encoded.as_bytes())
                .map_err(|e| AppError::SpeechError(format!("Invalid audio payload: {}", e)))?;
            audio.extend(decoded);
        }
    }

    if audio.is_empty() {
        return Err(AppError::SpeechError(
            "Speech service returned no audio".into(),
        ));
    }

    Ok(audio)
}

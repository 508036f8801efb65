pub mod handlers;
pub mod routes;

use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct AskRequest {
    #[serde(default)]
    pub question: Option<String>,
}

/// `content` is the documented key; the TTS page posts `text` and plays the reply as MP3.
#[derive(Debug, Deserialize)]
pub struct SpeakRequest {
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
}

impl SpeakRequest {
    /// Callers using the `text` key expect the audio itself in the response.
    pub fn wants_audio_reply(&self) -> bool {
        self.content.is_none() && self.text.is_some()
    }

    pub fn into_text(self) -> Option<String> {
        self.content.or(self.text)
    }
}

#[derive(Debug, Serialize)]
pub struct AskResponse {
    pub response: AnswerPayload,
}

/// A bare answer, or the caller's session history with the newest answer first.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum AnswerPayload {
    Latest(String),
    History(Vec<String>),
}

#[derive(Debug, Serialize)]
pub struct SpeakResponse {
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

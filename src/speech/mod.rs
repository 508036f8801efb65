pub mod google;
pub mod tokenizer;

use async_trait::async_trait;

use crate::error::AppError;

pub use google::GoogleTts;

/// Turns text into MP3 audio.
#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    async fn synthesize(&self, text: &str) -> Result<Vec<u8>, AppError>;
}

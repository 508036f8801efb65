pub mod answers;
pub mod api;
pub mod audio;
pub mod config;
pub mod error;
pub mod genai;
pub mod speech;

pub use answers::AnswerHistory;
pub use api::routes::{create_router, AppState};
pub use audio::AudioStore;
pub use config::{AnswerMode, Config};
pub use error::AppError;
pub use genai::TextGenerator;
pub use speech::SpeechSynthesizer;

use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

/// How `/api` shapes its `response` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerMode {
    /// `{"response": "<answer>"}`
    Latest,
    /// `{"response": ["<newest>", ...]}`, accumulated per `X-Session-Id`.
    History,
}

impl FromStr for AnswerMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "latest" => Ok(AnswerMode::Latest),
            "history" => Ok(AnswerMode::History),
            other => Err(ConfigError::Invalid {
                key: "ANSWER_MODE",
                value: other.to_string(),
                reason: "expected 'latest' or 'history'",
            }),
        }
    }
}

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("Invalid value for {key}: '{value}' ({reason})")]
    Invalid {
        key: &'static str,
        value: String,
        reason: &'static str,
    },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub gemini_api_key: Option<String>,
    pub gemini_model: String,
    pub gemini_base_url: String,
    pub tts_lang: String,
    pub tts_tld: String,
    pub tts_base_url: Option<String>,
    pub audio_dir: PathBuf,
    pub audio_file: String,
    pub answer_mode: AnswerMode,
    pub answer_history_limit: usize,
    pub answer_session_limit: usize,
    pub upstream_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
            gemini_api_key: None,
            gemini_model: "gemini-2.0-flash".to_string(),
            gemini_base_url: "https://generativelanguage.googleapis.com".to_string(),
            tts_lang: "en".to_string(),
            tts_tld: "com".to_string(),
            tts_base_url: None,
            audio_dir: PathBuf::from("./audios"),
            audio_file: "speech.mp3".to_string(),
            answer_mode: AnswerMode::Latest,
            answer_history_limit: 50,
            answer_session_limit: 1024,
            upstream_timeout: Duration::from_secs(30),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from any key lookup; unset and blank values fall back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = Config::default();

        let port = match get("PORT") {
            Some(v) => parse_number::<u16>("PORT", &v)?,
            None => defaults.port,
        };

        let answer_mode = match get("ANSWER_MODE") {
            Some(v) => v.parse()?,
            None => defaults.answer_mode,
        };

        let answer_history_limit = match get("ANSWER_HISTORY_LIMIT") {
            Some(v) => parse_positive("ANSWER_HISTORY_LIMIT", &v)?,
            None => defaults.answer_history_limit,
        };

        let answer_session_limit = match get("ANSWER_SESSION_LIMIT") {
            Some(v) => parse_positive("ANSWER_SESSION_LIMIT", &v)?,
            None => defaults.answer_session_limit,
        };

        let upstream_timeout = match get("UPSTREAM_TIMEOUT_SECS") {
            Some(v) => Duration::from_secs(parse_positive("UPSTREAM_TIMEOUT_SECS", &v)? as u64),
            None => defaults.upstream_timeout,
        };

        Ok(Self {
            host: get("HOST").unwrap_or(defaults.host),
            port,
            gemini_api_key: get("GEMINI_API_KEY"),
            gemini_model: get("GEMINI_MODEL").unwrap_or(defaults.gemini_model),
            gemini_base_url: get("GEMINI_BASE_URL").unwrap_or(defaults.gemini_base_url),
            tts_lang: get("TTS_LANG").unwrap_or(defaults.tts_lang),
            tts_tld: get("TTS_TLD").unwrap_or(defaults.tts_tld),
            tts_base_url: get("TTS_BASE_URL"),
            audio_dir: get("AUDIO_DIR").map(PathBuf::from).unwrap_or(defaults.audio_dir),
            audio_file: get("AUDIO_FILE").unwrap_or(defaults.audio_file),
            answer_mode,
            answer_history_limit,
            answer_session_limit,
            upstream_timeout,
        })
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        let raw = format!("{}:{}", self.host, self.port);
        raw.parse().map_err(|_| ConfigError::Invalid {
            key: "HOST",
            value: self.host.clone(),
            reason: "not a valid IP address",
        })
    }

    /// Base URL of the speech endpoint, derived from the TLD unless overridden.
    pub fn tts_endpoint_base(&self) -> String {
        self.tts_base_url
            .clone()
            .unwrap_or_else(|| format!("https://translate.google.{}", self.tts_tld))
    }

    pub fn audio_path(&self) -> PathBuf {
        self.audio_dir.join(&self.audio_file)
    }
}

fn parse_number<T: FromStr>(key: &'static str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::Invalid {
        key,
        value: value.to_string(),
        reason: "must be a number",
    })
}

fn parse_positive(key: &'static str, value: &str) -> Result<usize, ConfigError> {
    let n: usize = parse_number(key, value)?;
    if n == 0 {
        return Err(ConfigError::Invalid {
            key,
            value: value.to_string(),
            reason: "must be greater than zero",
        });
    }
    Ok(n)
}

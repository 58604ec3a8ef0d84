use std::env;

/// Application configuration, read from the environment.
///
/// `OPENAI_API_KEY` is the only secret; everything else has a default that
/// points at the hosted API and the fine-tuned model this service was built
/// around.
#[derive(Clone, Debug)]
pub struct AppConfig {
    pub openai_api_hostname: String,
    pub openai_api_key: String,
    pub openai_model: String,
    /// Milliseconds between typewriter frames.
    pub typewriter_tick_ms: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        let openai_api_hostname =
            env::var("FTCHAT_API_HOST").unwrap_or_else(|_| "https://api.openai.com".to_string());
        let openai_api_key =
            env::var("OPENAI_API_KEY").unwrap_or_else(|_| "thiswontworkforopenai".to_string());
        let openai_model = env::var("FTCHAT_MODEL")
            .unwrap_or_else(|_| "davinci:ft-wcc-2023-06-21-01-13-35".to_string());
        let typewriter_tick_ms = env::var("FTCHAT_TYPEWRITER_MS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(50);

        Self {
            openai_api_hostname,
            openai_api_key,
            openai_model,
            typewriter_tick_ms,
        }
    }
}

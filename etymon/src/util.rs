use etymon_lib::ModelProvider;

/// API URL by provider.
pub fn api_url_for_provider(provider: ModelProvider, model: &str) -> String {
    match provider {
        ModelProvider::OpenAI => "https://api.openai.com/v1/chat/completions".into(),
        ModelProvider::Anthropic => "https://api.anthropic.com/v1/messages".into(),
        ModelProvider::GCP => format!("https://generativelanguage.googleapis.com/v1beta/models/{}:generateContent", model),
    }
}

/// Classification endpoint the panel posts to unless overridden.
pub const DEFAULT_ENDPOINT: &str = "https://petclassifier.zeabur.app/api/predict/";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifierConfig {
    pub endpoint: String,
    pub user_agent: String,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        ClassifierConfig {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            user_agent: concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl ClassifierConfig {
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }
}

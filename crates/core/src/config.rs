use url::Url;

pub const DEFAULT_SERVICE_URL: &str = "http://localhost:8000";
pub const SERVICE_URL_ENV: &str = "PDF_ANALYSIS_URL";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    pub base_url: Url,
}

impl ServiceConfig {
    pub fn new(base_url: &str) -> Result<Self, url::ParseError> {
        let mut base_url = Url::parse(base_url.trim())?;
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        Ok(Self { base_url })
    }

    /// Reads `PDF_ANALYSIS_URL`, falling back to the local default when unset or blank.
    pub fn from_env() -> Result<Self, url::ParseError> {
        let configured = std::env::var(SERVICE_URL_ENV)
            .ok()
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty());

        Self::new(configured.as_deref().unwrap_or(DEFAULT_SERVICE_URL))
    }
}

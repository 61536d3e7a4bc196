use reqwest::blocking::Client;
use reqwest::header::CONTENT_TYPE;
use reqwest::redirect::Policy;

use super::{FetchConfig, FetchError, HttpResponse, HttpSource};

pub struct ReqwestSource {
    client: Client,
}

impl ReqwestSource {
    pub fn new(config: &FetchConfig) -> Result<Self, FetchError> {
        let client = Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(config.timeout)
            .redirect(Policy::limited(config.max_redirects))
            .no_proxy()
            .build()
            .map_err(|e| FetchError::Unexpected(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { client })
    }
}

impl HttpSource for ReqwestSource {
    fn get(&self, url: &str) -> Result<HttpResponse, FetchError> {
        let response = self.client.get(url).send()?;

        let status = response.status();
        if !status.is_success() {
            log::warn!("{} answered with status {}", url, status);
            return Err(FetchError::HttpStatus {
                code: status.as_u16(),
                reason: status.canonical_reason().unwrap_or("Unknown").to_string(),
            });
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let content_length = response.content_length();
        log::debug!(
            "{} -> content-type {:?}, content-length {:?}",
            url,
            content_type,
            content_length
        );

        Ok(HttpResponse {
            content_type,
            content_length,
            body: Box::new(response),
        })
    }
}

use crate::config::SiteConfig;
use crate::error::Result;
use reqwest::blocking::{Client, Response};
use reqwest::redirect::Policy;
use tracing::debug;

/// Blocking HTTP client pair.
///
/// The record page is requested without following redirects: the site answers
/// an unknown name with a 302 to its front page, so the redirect itself is the
/// "not found" signal. Chapter pages follow redirects normally.
#[derive(Clone)]
pub struct HttpClient {
    direct: Client,
    following: Client,
    user_agent: Option<String>,
}

impl HttpClient {
    pub fn new(config: &SiteConfig) -> Self {
        let direct = Client::builder()
            .redirect(Policy::none())
            .build()
            .expect("Failed to create HTTP client");
        let following = Client::new();

        Self {
            direct,
            following,
            user_agent: config.user_agent.clone(),
        }
    }

    /// GET without following redirects; the caller inspects the status.
    pub fn get_no_redirect(&self, url: &str) -> Result<Response> {
        debug!("[HTTP] GET (no redirect) {}", url);
        let mut request = self.direct.get(url);
        if let Some(user_agent) = &self.user_agent {
            request = request.header("User-Agent", user_agent);
        }
        Ok(request.send()?)
    }

    /// GET following redirects, returning the body text of a success response.
    pub fn get_text(&self, url: &str) -> Result<String> {
        debug!("[HTTP] GET {}", url);
        let mut request = self.following.get(url);
        if let Some(user_agent) = &self.user_agent {
            request = request.header("User-Agent", user_agent);
        }
        let response = request.send()?.error_for_status()?;
        Ok(response.text()?)
    }
}

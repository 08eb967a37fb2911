use crate::retry::Backoff;
use crate::GithubClient;
use reqwest::header;
use reqwest::header::HeaderMap;
use reqwest::header::HeaderName;
use reqwest::header::HeaderValue;
use reqwest::ClientBuilder;
use secrecy::ExposeSecret;
use stats_card::api::Result;
use url::Url;

pub struct GithubClientBuilder {
    client_builder: ClientBuilder,
    api_url: String,
    headers: HeaderMap,
    backoff: Backoff,
    authenticated: bool,
}

impl Default for GithubClientBuilder {
    fn default() -> Self {
        let mut headers = HeaderMap::new();
        headers.insert(header::USER_AGENT, HeaderValue::from_static("stats-card"));
        headers.insert(header::ACCEPT, HeaderValue::from_static("application/vnd.github.v3+json"));
        Self {
            client_builder: ClientBuilder::default(),
            api_url: "https://api.github.com".to_string(),
            headers,
            backoff: Backoff::default(),
            authenticated: false,
        }
    }
}

impl GithubClientBuilder {
    /// Installs the OAuth token as a default `Authorization` header and marks
    /// the client as authenticated, which enables the GraphQL endpoint.
    pub fn try_with_token(mut self, token: secrecy::SecretString) -> Result<GithubClientBuilder> {
        let mut value = HeaderValue::from_str(&format!("token {}", token.expose_secret()))
            .map_err(crate::other)?;
        value.set_sensitive(true);
        self.headers.insert(header::AUTHORIZATION, value);
        self.authenticated = true;
        Ok(self)
    }

    pub fn try_with_user_agent<STR: AsRef<str>>(self, user_agent: STR) -> Result<GithubClientBuilder> {
        self.try_with_header(header::USER_AGENT, user_agent)
    }

    pub fn with_api_url<STR: AsRef<str>>(mut self, url: STR) -> GithubClientBuilder {
        self.api_url = url.as_ref().to_string();
        self
    }

    pub fn with_backoff(mut self, backoff: Backoff) -> GithubClientBuilder {
        self.backoff = backoff;
        self
    }

    fn try_with_header(mut self, key: HeaderName, val: impl AsRef<str>) -> Result<GithubClientBuilder> {
        let val = HeaderValue::from_str(val.as_ref()).map_err(crate::other)?;
        self.headers.insert(key, val);
        Ok(self)
    }

    pub fn build(self) -> Result<GithubClient> {
        // Parsed up front so a bad URL fails the run before any request goes out.
        let api_url = Url::parse(&self.api_url).map_err(crate::other)?;
        let api_url = api_url.as_str().trim_end_matches('/').to_string();
        let client = self
            .client_builder
            .default_headers(self.headers)
            .build()
            .map_err(crate::other)?;
        Ok(GithubClient {
            client,
            api_url,
            backoff: self.backoff,
            authenticated: self.authenticated,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_is_validated_and_normalized() {
        let client = GithubClientBuilder::default()
            .with_api_url("http://127.0.0.1:8080/")
            .build()
            .unwrap();
        assert_eq!(client.api_url, "http://127.0.0.1:8080");
    }

    #[test]
    fn malformed_base_url_is_rejected() {
        let result = GithubClientBuilder::default().with_api_url("not a url").build();
        assert!(result.is_err());
    }
}

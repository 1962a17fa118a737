use reqwest::{
    Client,
    header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE},
    Method,
};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, error};

use shared_config::AppConfig;
use shared_models::{ApiEnvelope, AppError, AuthCredentials, Locale};

pub const LANGUAGE_HEADER: &str = "X-Language";

/// Ordered query pairs; keys may repeat (`filter[symptoms][]`).
pub type Query = Vec<(String, String)>;

#[derive(Clone)]
pub struct ClinicApiClient {
    client: Client,
    base_url: String,
    locale: Locale,
}

impl ClinicApiClient {
    pub fn new(config: &AppConfig, locale: Locale) -> Self {
        Self {
            client: Client::new(),
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            locale,
        }
    }

    /// Same connection pool, different `X-Language`.
    pub fn with_locale(&self, locale: Locale) -> Self {
        Self {
            client: self.client.clone(),
            base_url: self.base_url.clone(),
            locale,
        }
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn get_headers(&self, credentials: Option<&AuthCredentials>) -> Result<HeaderMap, AppError> {
        let mut headers = HeaderMap::new();

        headers.insert(LANGUAGE_HEADER, HeaderValue::from_static(self.locale.code()));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        if let Some(credentials) = credentials {
            let value = HeaderValue::from_str(&credentials.authorization_header())
                .map_err(|_| AppError::Unauthorized("Malformed auth token".to_string()))?;
            headers.insert(AUTHORIZATION, value);
        }

        Ok(headers)
    }

    pub async fn request<T>(
        &self,
        method: Method,
        path: &str,
        query: &[(String, String)],
        credentials: Option<&AuthCredentials>,
        body: Option<Value>,
    ) -> Result<T, AppError>
    where
        T: DeserializeOwned,
    {
        let url = format!("{}{}", self.base_url, path);
        debug!("Making {} request to {} ({} query params)", method, url, query.len());

        let headers = self.get_headers(credentials)?;

        let mut req = self.client.request(method, &url).headers(headers);

        if !query.is_empty() {
            req = req.query(query);
        }

        if let Some(body_data) = body {
            req = req.json(&body_data);
        }

        let response = req.send().await.map_err(|e| {
            error!("Request to {} failed: {}", url, e);
            AppError::Network(e.to_string())
        })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            error!("API error ({}): {}", status, error_text);
            return Err(AppError::from_status(status.as_u16(), error_text));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| AppError::Decode(e.to_string()))
    }

    /// GET returning the full envelope, for paginated endpoints.
    pub async fn get_envelope<T>(
        &self,
        path: &str,
        query: &[(String, String)],
        credentials: Option<&AuthCredentials>,
    ) -> Result<ApiEnvelope<T>, AppError>
    where
        T: DeserializeOwned,
    {
        self.request(Method::GET, path, query, credentials, None).await
    }

    pub async fn get<T>(
        &self,
        path: &str,
        query: &[(String, String)],
        credentials: Option<&AuthCredentials>,
    ) -> Result<T, AppError>
    where
        T: DeserializeOwned,
    {
        let envelope: ApiEnvelope<T> = self.get_envelope(path, query, credentials).await?;
        Ok(envelope.data)
    }

    pub async fn post<T>(
        &self,
        path: &str,
        body: Value,
        credentials: Option<&AuthCredentials>,
    ) -> Result<T, AppError>
    where
        T: DeserializeOwned,
    {
        let envelope: ApiEnvelope<T> = self
            .request(Method::POST, path, &[], credentials, Some(body))
            .await?;
        Ok(envelope.data)
    }
}

use std::sync::Arc;

use async_trait::async_trait;
use url::Url;

use crate::media::{ApiError, MovieId, MovieResponse};
use crate::settings::AppSettings;

pub const DEFAULT_BASE_URL: &str = "https://api.themoviedb.org/3";
pub const DEFAULT_IMAGE_BASE_URL: &str = "https://image.tmdb.org/t/p/w500";
pub const DEFAULT_LANGUAGE: &str = "en-US";

/// The two catalog operations the screens depend on. Production code uses
/// [`TmdbClient`]; tests substitute their own implementation.
#[async_trait]
pub trait MovieApi: Send + Sync {
    async fn fetch_movies_for_person(&self, person_id: u64) -> Result<MovieResponse, ApiError>;

    async fn fetch_similar_movies(
        &self,
        movie_id: MovieId,
        language: &str,
        page: u32,
        region: Option<&str>,
    ) -> Result<MovieResponse, ApiError>;
}

#[derive(Clone)]
pub struct TmdbClient {
    api_key: String,
    base_url: String,
    image_base_url: String,
    language: String,
    http_client: Arc<reqwest::Client>,
}

impl TmdbClient {
    pub fn new(api_key: String, language: String) -> Self {
        Self {
            api_key,
            base_url: String::from(DEFAULT_BASE_URL),
            image_base_url: String::from(DEFAULT_IMAGE_BASE_URL),
            language,
            http_client: Arc::new(reqwest::Client::new()),
        }
    }

    pub fn from_settings(settings: &AppSettings) -> Self {
        let language = if settings.language.is_empty() {
            String::from(DEFAULT_LANGUAGE)
        } else {
            settings.language.clone()
        };
        Self::new(settings.api_key.clone(), language)
    }

    /// Points the client at a different API host. Used by tests to target a
    /// local mock server.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_image_base_url(mut self, image_base_url: impl Into<String>) -> Self {
        self.image_base_url = image_base_url.into();
        self
    }

    pub fn image_base_url(&self) -> &str {
        &self.image_base_url
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    fn build_url(&self, path: &str, params: &[(&str, &str)]) -> Result<Url, ApiError> {
        let mut url =
            Url::parse(&format!("{}{}", self.base_url, path)).map_err(|_| ApiError::InvalidUrl)?;
        {
            let mut query = url.query_pairs_mut();
            query.append_pair("api_key", &self.api_key);
            for (name, value) in params {
                query.append_pair(name, value);
            }
        }
        Ok(url)
    }

    async fn fetch_list(&self, url: Url) -> Result<MovieResponse, ApiError> {
        tracing::debug!(url = %url, "catalog request");
        let response = self
            .http_client
            .get(url)
            .send()
            .await
            .map_err(ApiError::Network)?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Server {
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await.map_err(ApiError::Network)?;
        if body.is_empty() {
            return Err(ApiError::EmptyData);
        }
        serde_json::from_slice(&body).map_err(ApiError::Decode)
    }

    /// Movies featuring the given person, newest release first.
    pub async fn fetch_movies_for_person(
        &self,
        person_id: u64,
    ) -> Result<MovieResponse, ApiError> {
        let person = person_id.to_string();
        let url = self.build_url(
            "/discover/movie",
            &[
                ("with_people", person.as_str()),
                ("sort_by", "release_date.desc"),
            ],
        )?;
        self.fetch_list(url).await
    }

    /// Movies similar to the given one. `region` is dropped from the query
    /// when absent or empty.
    pub async fn fetch_similar_movies(
        &self,
        movie_id: MovieId,
        language: &str,
        page: u32,
        region: Option<&str>,
    ) -> Result<MovieResponse, ApiError> {
        let page = page.to_string();
        let mut params: Vec<(&str, &str)> = vec![("language", language), ("page", page.as_str())];
        if let Some(region) = region.filter(|r| !r.is_empty()) {
            params.push(("region", region));
        }
        let url = self.build_url(&format!("/movie/{}/similar", movie_id), &params)?;
        self.fetch_list(url).await
    }
}

#[async_trait]
impl MovieApi for TmdbClient {
    async fn fetch_movies_for_person(&self, person_id: u64) -> Result<MovieResponse, ApiError> {
        TmdbClient::fetch_movies_for_person(self, person_id).await
    }

    async fn fetch_similar_movies(
        &self,
        movie_id: MovieId,
        language: &str,
        page: u32,
        region: Option<&str>,
    ) -> Result<MovieResponse, ApiError> {
        TmdbClient::fetch_similar_movies(self, movie_id, language, page, region).await
    }
}

//! Similar-movies lookup behind a swappable trait, so screens can be
//! exercised against a test double instead of the live API.

use async_trait::async_trait;

use crate::media::{ApiError, Movie, MovieId};
use crate::settings::AppSettings;
use crate::tmdb::{TmdbClient, DEFAULT_LANGUAGE};

#[async_trait]
pub trait SimilarMovies: Send + Sync {
    /// Convenience form with the service defaults: `en-US`, first page, no
    /// region restriction.
    async fn fetch_similar(&self, movie_id: MovieId) -> Result<Vec<Movie>, ApiError> {
        self.fetch_similar_with(movie_id, DEFAULT_LANGUAGE, 1, None)
            .await
    }

    async fn fetch_similar_with(
        &self,
        movie_id: MovieId,
        language: &str,
        page: u32,
        region: Option<&str>,
    ) -> Result<Vec<Movie>, ApiError>;
}

pub struct SimilarService {
    client: TmdbClient,
}

impl SimilarService {
    pub fn new(client: TmdbClient) -> Self {
        Self { client }
    }

    pub fn from_settings(settings: &AppSettings) -> Self {
        Self::new(TmdbClient::from_settings(settings))
    }
}

#[async_trait]
impl SimilarMovies for SimilarService {
    async fn fetch_similar_with(
        &self,
        movie_id: MovieId,
        language: &str,
        page: u32,
        region: Option<&str>,
    ) -> Result<Vec<Movie>, ApiError> {
        let response = self
            .client
            .fetch_similar_movies(movie_id, language, page, region)
            .await?;
        Ok(response.results)
    }
}

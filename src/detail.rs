use std::sync::Arc;

use crate::media::Movie;
use crate::similar::SimilarMovies;

/// State for the detail screen's similar-movies carousel. The subject movie
/// itself never appears in its own carousel, and a failed lookup degrades to
/// an empty one rather than surfacing an error.
pub struct DetailPage {
    pub movie: Movie,
    similar_service: Arc<dyn SimilarMovies>,
    pub similar: Vec<Movie>,
    pub loading_similar: bool,
}

impl DetailPage {
    pub fn new(movie: Movie, similar_service: Arc<dyn SimilarMovies>) -> Self {
        Self {
            movie,
            similar_service,
            similar: Vec::new(),
            loading_similar: false,
        }
    }

    pub async fn load_similar(&mut self) {
        self.loading_similar = true;
        let subject_id = self.movie.id;
        self.similar = match self.similar_service.fetch_similar(subject_id).await {
            Ok(movies) => movies.into_iter().filter(|m| m.id != subject_id).collect(),
            Err(e) => {
                tracing::warn!(movie_id = subject_id, error = %e, "similar movies fetch failed");
                Vec::new()
            }
        };
        self.loading_similar = false;
    }
}

use std::sync::Arc;

use crate::media::{Movie, ViewState};
use crate::tmdb::MovieApi;

/// State for the filmography list screen. Rendering is the embedder's job;
/// this only drives the fetch and projects the result into a [`ViewState`].
pub struct HomePage {
    api: Arc<dyn MovieApi>,
    pub state: ViewState<Vec<Movie>>,
}

impl HomePage {
    pub fn new(api: Arc<dyn MovieApi>) -> Self {
        Self {
            api,
            state: ViewState::Idle,
        }
    }

    pub async fn load_movies(&mut self, person_id: u64) {
        self.state = ViewState::Loading;
        match self.api.fetch_movies_for_person(person_id).await {
            Ok(response) if response.results.is_empty() => self.state = ViewState::Empty,
            Ok(response) => self.state = ViewState::Loaded(response.results),
            Err(e) => self.state = ViewState::Error(e.to_string()),
        }
    }
}

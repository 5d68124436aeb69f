use serde::Deserialize;
use thiserror::Error;
use url::Url;

pub type MovieId = u64;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("invalid URL")]
    InvalidUrl,
    #[error("server returned status {status}")]
    Server { status: u16 },
    #[error("decoding failed: {0}")]
    Decode(#[source] serde_json::Error),
    #[error("network error: {0}")]
    Network(#[source] reqwest::Error),
    #[error("no data returned")]
    EmptyData,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Movie {
    pub id: MovieId,
    pub title: String,
    #[serde(default)]
    pub overview: String,
    pub poster_path: Option<String>,
    pub backdrop_path: Option<String>,
    pub release_date: Option<String>,
}

impl Movie {
    /// Absolute poster URL derived from the configured image base, or `None`
    /// when the movie carries no poster path.
    pub fn poster_url(&self, image_base_url: &str) -> Option<Url> {
        match self.poster_path.as_deref() {
            Some(path) if !path.is_empty() => join_image_url(image_base_url, path),
            _ => {
                tracing::debug!(id = self.id, title = %self.title, "movie has no poster path");
                None
            }
        }
    }

    pub fn backdrop_url(&self, image_base_url: &str) -> Option<Url> {
        match self.backdrop_path.as_deref() {
            Some(path) if !path.is_empty() => join_image_url(image_base_url, path),
            _ => {
                tracing::debug!(id = self.id, title = %self.title, "movie has no backdrop path");
                None
            }
        }
    }
}

// Exactly one slash between base and path, whatever the config looks like.
fn join_image_url(base: &str, path: &str) -> Option<Url> {
    let base = base.strip_suffix('/').unwrap_or(base);
    let path = path.strip_prefix('/').unwrap_or(path);
    Url::parse(&format!("{}/{}", base, path)).ok()
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MovieResponse {
    pub page: Option<u32>,
    pub results: Vec<Movie>,
    pub total_pages: Option<u32>,
    pub total_results: Option<u32>,
}

/// The closed set of states a screen projects while loading a list.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewState<T> {
    Idle,
    Loading,
    Loaded(T),
    Empty,
    Error(String),
}

impl<T> ViewState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, ViewState::Loading)
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, ViewState::Empty)
    }

    pub fn value(&self) -> Option<&T> {
        match self {
            ViewState::Loaded(value) => Some(value),
            _ => None,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            ViewState::Error(message) => Some(message),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn movie(poster_path: Option<&str>) -> Movie {
        Movie {
            id: 550,
            title: String::from("Fight Club"),
            overview: String::new(),
            poster_path: poster_path.map(String::from),
            backdrop_path: None,
            release_date: Some(String::from("1999-10-15")),
        }
    }

    #[test]
    fn poster_url_joins_base_and_path_with_single_slash() {
        let movie = movie(Some("/a.png"));
        let url = movie.poster_url("https://img.example/").unwrap();
        assert_eq!(url.as_str(), "https://img.example/a.png");
    }

    #[test]
    fn poster_url_handles_missing_slashes_on_both_sides() {
        let movie = movie(Some("a.png"));
        let url = movie.poster_url("https://img.example").unwrap();
        assert_eq!(url.as_str(), "https://img.example/a.png");
    }

    #[test]
    fn poster_url_is_none_for_missing_or_empty_path() {
        assert!(movie(None).poster_url("https://img.example/").is_none());
        assert!(movie(Some("")).poster_url("https://img.example/").is_none());
    }

    #[test]
    fn backdrop_url_follows_the_same_joining_rule() {
        let mut movie = movie(None);
        movie.backdrop_path = Some(String::from("/back.jpg"));
        let url = movie.backdrop_url("https://img.example").unwrap();
        assert_eq!(url.as_str(), "https://img.example/back.jpg");
    }

    #[test]
    fn movies_are_equal_only_when_all_fields_match() {
        let a = movie(Some("/a.png"));
        let b = a.clone();
        assert_eq!(a, b);

        let mut c = a.clone();
        c.overview = String::from("An insomniac office worker...");
        assert_ne!(a, c);
    }

    #[test]
    fn decodes_snake_case_wire_fields() {
        let json = r#"{
            "id": 550,
            "title": "Fight Club",
            "overview": "An insomniac office worker...",
            "poster_path": "/fight.png",
            "backdrop_path": "/club.png",
            "release_date": "1999-10-15"
        }"#;
        let movie: Movie = serde_json::from_str(json).unwrap();
        assert_eq!(movie.id, 550);
        assert_eq!(movie.poster_path.as_deref(), Some("/fight.png"));
        assert_eq!(movie.backdrop_path.as_deref(), Some("/club.png"));
        assert_eq!(movie.release_date.as_deref(), Some("1999-10-15"));
    }

    #[test]
    fn decodes_response_without_paging_fields() {
        let json = r#"{"results": [{"id": 1, "title": "A"}, {"id": 2, "title": "B"}]}"#;
        let response: MovieResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.page, None);
        assert_eq!(response.total_pages, None);
        assert_eq!(response.total_results, None);
        let ids: Vec<MovieId> = response.results.iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[test]
    fn view_state_accessors() {
        let loading: ViewState<Vec<Movie>> = ViewState::Loading;
        assert!(loading.is_loading());
        assert!(loading.value().is_none());

        let loaded = ViewState::Loaded(vec![movie(None)]);
        assert_eq!(loaded.value().map(Vec::len), Some(1));

        let error: ViewState<Vec<Movie>> =
            ViewState::Error(String::from("server returned status 500"));
        assert_eq!(error.error_message(), Some("server returned status 500"));
        assert!(ViewState::<Vec<Movie>>::Empty.is_empty());
    }
}

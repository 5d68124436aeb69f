//! cinelist - networking and image-caching core for an actor-filmography
//! movie browser.
//!
//! The crate covers everything between a rendering layer and TMDB: a
//! two-endpoint API client ([`TmdbClient`]), a similar-movies service behind
//! a swappable trait ([`SimilarService`]), an image loader with a budgeted
//! in-memory cache ([`ImageLoader`]), and per-screen state that projects
//! fetch results into a small closed state set ([`ViewState`]).

pub mod detail;
pub mod home;
pub mod images;
pub mod media;
pub mod settings;
pub mod similar;
pub mod tmdb;

pub use detail::DetailPage;
pub use home::HomePage;
pub use images::{placeholder_image, ImageLoader};
pub use media::{ApiError, Movie, MovieId, MovieResponse, ViewState};
pub use settings::AppSettings;
pub use similar::{SimilarMovies, SimilarService};
pub use tmdb::{MovieApi, TmdbClient};

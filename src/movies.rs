//! Random picks among the best-rated now-playing movies.

use rand::Rng;
use rand::seq::SliceRandom;

use crate::types::{Movie, MovieCard, TMDB_IMAGE_BASE};

/// Smallest pool the random pick draws from.
const MIN_POOL: usize = 15;
/// Overviews longer than this are cut.
const MAX_OVERVIEW_CHARS: usize = 120;
const NO_OVERVIEW: &str = "No overview available.";

/// Pick `count` movies at random from the top-rated pool.
///
/// The pool is the best `max(count * 3, 15)` movies by rating, so repeated
/// calls vary while staying among the well-rated ones.
pub fn pick_top_movies<R: Rng + ?Sized>(movies: &[Movie], count: usize, rng: &mut R) -> Vec<MovieCard> {
    let mut pool: Vec<&Movie> = movies.iter().collect();
    pool.sort_by(|a, b| b.vote_average.total_cmp(&a.vote_average));
    pool.truncate(count.saturating_mul(3).max(MIN_POOL));
    pool.shuffle(rng);
    pool.into_iter().take(count).map(MovieCard::from).collect()
}

/// Shorten an overview for display.
pub fn truncate_overview(overview: Option<&str>) -> String {
    let overview = overview.map(str::trim).unwrap_or_default();
    if overview.is_empty() {
        return NO_OVERVIEW.to_string();
    }
    if overview.chars().count() <= MAX_OVERVIEW_CHARS {
        return overview.to_string();
    }
    let cut: String = overview.chars().take(MAX_OVERVIEW_CHARS - 3).collect();
    format!("{cut}...")
}

impl From<&Movie> for MovieCard {
    fn from(movie: &Movie) -> Self {
        Self {
            title: movie.title.clone(),
            overview: truncate_overview(movie.overview.as_deref()),
            release_date: movie.release_date.clone(),
            rating: movie.vote_average,
            poster_url: movie
                .poster_path
                .as_deref()
                .filter(|path| !path.is_empty())
                .map(|path| format!("{TMDB_IMAGE_BASE}{path}")),
        }
    }
}

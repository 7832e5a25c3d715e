//! Plain-text rendering of catalogue output.

use std::fmt::Write as _;

use marquee_catalogue::{CatalogueState, View};
use marquee_core::{Movie, SearchCount};

pub(crate) fn render_movies(movies: &[Movie]) -> String {
    if movies.is_empty() {
        return "No movies found.\n".to_string();
    }

    let mut out = String::new();
    for (i, movie) in movies.iter().enumerate() {
        let _ = write!(out, "{:>3}. {}", i + 1, movie.title);
        if let Some(year) = movie.release_year() {
            let _ = write!(out, " ({year})");
        }
        if let Some(rating) = movie.vote_average {
            let _ = write!(out, "  {rating:.1}/10");
        }
        if let Some(lang) = movie.original_language.as_deref() {
            let _ = write!(out, "  [{lang}]");
        }
        out.push('\n');
    }
    out
}

pub(crate) fn render_trending(entries: &[SearchCount]) -> String {
    if entries.is_empty() {
        return "No trending searches yet.\n".to_string();
    }

    let mut out = format!("{:<4}{:<30}{:<8}TOP RESULT\n", "#", "SEARCH", "COUNT");
    for (i, entry) in entries.iter().enumerate() {
        let _ = writeln!(
            out,
            "{:<4}{:<30}{:<8}{}",
            i + 1,
            entry.search_term,
            entry.count,
            entry.title
        );
    }
    out
}

/// Full screen for one controller snapshot.
pub(crate) fn render_state(state: &CatalogueState) -> String {
    let mut out = String::new();

    if !state.trending().is_empty() {
        out.push_str("Trending:\n");
        out.push_str(&render_trending(state.trending()));
        out.push('\n');
    }

    let label = if state.query().trim().is_empty() {
        "Popular".to_string()
    } else {
        format!("Results for \"{}\"", state.query())
    };
    let _ = writeln!(out, "{label}:");

    match state.view() {
        View::Loading => out.push_str("Loading...\n"),
        View::Error(message) => {
            let _ = writeln!(out, "Error: {message}");
        }
        View::Movies(movies) => out.push_str(&render_movies(movies)),
    }
    out
}

#[cfg(test)]
mod tests {
    use marquee_catalogue::{CatalogueEvent, Effect};

    use super::*;

    fn movie(title: &str, date: Option<&str>, rating: Option<f64>) -> Movie {
        Movie {
            id: 1,
            title: title.to_string(),
            poster_path: None,
            popularity: 0.0,
            vote_average: rating,
            release_date: date.map(str::to_string),
            original_language: Some("en".to_string()),
            overview: None,
        }
    }

    #[test]
    fn movie_lines_include_year_rating_and_language() {
        let out = render_movies(&[movie("Heat", Some("1995-12-15"), Some(7.9))]);
        assert_eq!(out, "  1. Heat (1995)  7.9/10  [en]\n");
    }

    #[test]
    fn movie_without_date_or_rating_omits_them() {
        let out = render_movies(&[movie("Untitled", None, None)]);
        assert_eq!(out, "  1. Untitled  [en]\n");
    }

    #[test]
    fn empty_lists_have_placeholders() {
        assert_eq!(render_movies(&[]), "No movies found.\n");
        assert_eq!(render_trending(&[]), "No trending searches yet.\n");
    }

    #[test]
    fn trending_table_lists_terms_in_order() {
        let out = render_trending(&[SearchCount {
            search_term: "batman".to_string(),
            count: 4,
            movie_id: 268,
            title: "Batman".to_string(),
            poster_url: None,
            updated_at: None,
        }]);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with('#'));
        assert!(lines[1].starts_with("1   batman"));
        assert!(lines[1].ends_with("Batman"));
    }

    #[test]
    fn state_render_follows_view() {
        let mut state = CatalogueState::new();
        let effects = state.handle(CatalogueEvent::QueryCommitted {
            query: "alien".to_string(),
        });
        assert!(render_state(&state).contains("Loading..."));

        let Some(Effect::Fetch { token, .. }) = effects.into_iter().next() else {
            panic!("expected fetch effect");
        };
        state.handle(CatalogueEvent::FetchFailed {
            token,
            message: "Failed to fetch movies".to_string(),
        });

        let out = render_state(&state);
        assert!(out.starts_with("Results for \"alien\":"));
        assert!(out.contains("Error: Failed to fetch movies"));
    }
}

//! Fixed-width table rendering for catalogue listings.

use marquee_core::{MovieSummary, RatedMovie};

/// Header row for movie listings.
pub fn summary_header(with_actors: bool) -> String {
    let mut header = format!(
        "{:<30}{:<15}{:<35}{:<12}{:<35}",
        "Title", "Release Date", "Director Name", "Avg Rating", "Genres"
    );
    if with_actors {
        header.push_str(&format!("{:<40}", "Actors"));
    }
    header
}

/// One listing row, aligned with [`summary_header`].
pub fn summary_line(movie: &MovieSummary, with_actors: bool) -> String {
    let mut line = format!(
        "{:<30}{:<15}{:<35}{:<12}{:<35}",
        movie.title,
        movie.release_date.as_deref().unwrap_or("-"),
        movie.director,
        fmt_rating(movie.avg_rating),
        movie.genres.join(", "),
    );
    if with_actors {
        line.push_str(&format!("{:<40}", movie.actors.join(", ")));
    }
    line
}

/// Print a full movie table.
pub fn print_summaries(movies: &[MovieSummary], with_actors: bool) {
    let header = summary_header(with_actors);
    let width = header.len();
    println!("{}", header);
    println!("{}", "-".repeat(width));
    for movie in movies {
        println!("{}", summary_line(movie, with_actors));
    }
}

/// Print the top-rated ranking.
pub fn print_rated(movies: &[RatedMovie]) {
    for movie in movies {
        println!("{} - Average Rating: {:.2}", movie.title, movie.avg_rating);
    }
}

fn fmt_rating(rating: Option<f64>) -> String {
    match rating {
        Some(r) => format!("{:.2}", r),
        None => "-".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_summary() -> MovieSummary {
        MovieSummary {
            title: "X".to_string(),
            release_date: Some("2020-01-01".to_string()),
            director: "D".to_string(),
            avg_rating: Some(4.25),
            genres: vec!["Action".to_string(), "Drama".to_string()],
            actors: vec!["A1".to_string(), "A2".to_string()],
        }
    }

    #[test]
    fn test_summary_line_contains_fields() {
        let line = summary_line(&sample_summary(), false);
        assert!(line.contains("X"));
        assert!(line.contains("2020-01-01"));
        assert!(line.contains("4.25"));
        assert!(line.contains("Action, Drama"));
        assert!(!line.contains("A1"));
    }

    #[test]
    fn test_summary_line_with_actors() {
        let line = summary_line(&sample_summary(), true);
        assert!(line.contains("A1, A2"));
    }

    #[test]
    fn test_unrated_movie_shows_dash() {
        let mut movie = sample_summary();
        movie.avg_rating = None;
        movie.release_date = None;
        let line = summary_line(&movie, false);
        assert!(line.contains('-'));
        assert!(!line.contains("NaN"));
    }

    #[test]
    fn test_header_alignment_matches_line() {
        // Short fields pad out to the same fixed columns.
        let header = summary_header(true);
        let line = summary_line(&sample_summary(), true);
        assert_eq!(header.len(), 167);
        assert_eq!(line.len(), 167);
    }
}

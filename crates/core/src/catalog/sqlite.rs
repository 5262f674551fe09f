//! SQLite-backed movie catalogue implementation.

use rusqlite::{params, Connection, OptionalExtension, ToSql, Transaction};
use tracing::{debug, info};

use super::{AddOutcome, CatalogError, MovieCatalog, MovieRecord, MovieSummary, RatedMovie};
use crate::db::SharedConnection;

/// Tables holding shared, named dimension rows.
#[derive(Debug, Clone, Copy)]
enum Dimension {
    Director,
    Genre,
    Actor,
}

impl Dimension {
    fn table(self) -> &'static str {
        match self {
            Dimension::Director => "Directors",
            Dimension::Genre => "Genres",
            Dimension::Actor => "Actors",
        }
    }

    fn id_column(self) -> &'static str {
        match self {
            Dimension::Director => "director_id",
            Dimension::Genre => "genre_id",
            Dimension::Actor => "actor_id",
        }
    }

    fn name_column(self) -> &'static str {
        match self {
            Dimension::Director => "director_name",
            Dimension::Genre => "genre_name",
            Dimension::Actor => "actor_name",
        }
    }
}

/// SQLite-backed movie catalogue.
pub struct SqliteCatalog {
    conn: SharedConnection,
}

impl SqliteCatalog {
    /// Create a catalogue over the shared connection.
    pub fn new(conn: SharedConnection) -> Self {
        Self { conn }
    }

    /// Look up a dimension row by exact name, inserting it on first
    /// reference. Returns the row id either way.
    fn intern_dimension(
        tx: &Transaction,
        dim: Dimension,
        name: &str,
    ) -> Result<i64, CatalogError> {
        let select = format!(
            "SELECT {} FROM {} WHERE {} = ?",
            dim.id_column(),
            dim.table(),
            dim.name_column(),
        );
        let existing: Option<i64> = tx
            .query_row(&select, params![name], |row| row.get(0))
            .optional()
            .map_err(|e| CatalogError::Database(e.to_string()))?;

        if let Some(id) = existing {
            return Ok(id);
        }

        let insert = format!(
            "INSERT INTO {} ({}) VALUES (?)",
            dim.table(),
            dim.name_column(),
        );
        tx.execute(&insert, params![name])
            .map_err(|e| CatalogError::Database(e.to_string()))?;

        Ok(tx.last_insert_rowid())
    }

    /// Load genre names for a movie.
    fn load_genres(conn: &Connection, movie_id: i64) -> Result<Vec<String>, CatalogError> {
        let mut stmt = conn
            .prepare(
                "SELECT g.genre_name FROM Genres g
                 JOIN MovieGenres mg ON g.genre_id = mg.genre_id
                 WHERE mg.movie_id = ?",
            )
            .map_err(|e| CatalogError::Database(e.to_string()))?;

        let rows = stmt
            .query_map(params![movie_id], |row| row.get(0))
            .map_err(|e| CatalogError::Database(e.to_string()))?;

        let mut genres = Vec::new();
        for row in rows {
            genres.push(row.map_err(|e| CatalogError::Database(e.to_string()))?);
        }
        Ok(genres)
    }

    /// Load actor names for a movie.
    fn load_actors(conn: &Connection, movie_id: i64) -> Result<Vec<String>, CatalogError> {
        let mut stmt = conn
            .prepare(
                "SELECT a.actor_name FROM Actors a
                 JOIN MovieActors ma ON a.actor_id = ma.actor_id
                 WHERE ma.movie_id = ?",
            )
            .map_err(|e| CatalogError::Database(e.to_string()))?;

        let rows = stmt
            .query_map(params![movie_id], |row| row.get(0))
            .map_err(|e| CatalogError::Database(e.to_string()))?;

        let mut actors = Vec::new();
        for row in rows {
            actors.push(row.map_err(|e| CatalogError::Database(e.to_string()))?);
        }
        Ok(actors)
    }

    /// Convert a row to (movie_id, MovieSummary) without genres/actors.
    fn row_to_summary(row: &rusqlite::Row) -> rusqlite::Result<(i64, MovieSummary)> {
        Ok((
            row.get(0)?,
            MovieSummary {
                title: row.get(1)?,
                release_date: row.get(2)?,
                director: row.get(3)?,
                avg_rating: row.get(4)?,
                genres: Vec::new(),
                actors: Vec::new(),
            },
        ))
    }

    /// Run a summary query and fill in each movie's genres and actors.
    fn query_summaries(
        conn: &Connection,
        sql: &str,
        params: &[&dyn ToSql],
    ) -> Result<Vec<MovieSummary>, CatalogError> {
        let mut stmt = conn
            .prepare(sql)
            .map_err(|e| CatalogError::Database(e.to_string()))?;

        let rows = stmt
            .query_map(params, Self::row_to_summary)
            .map_err(|e| CatalogError::Database(e.to_string()))?;

        let mut summaries = Vec::new();
        for row in rows {
            let (movie_id, mut summary) = row.map_err(|e| CatalogError::Database(e.to_string()))?;
            summary.genres = Self::load_genres(conn, movie_id)?;
            summary.actors = Self::load_actors(conn, movie_id)?;
            summaries.push(summary);
        }
        Ok(summaries)
    }
}

impl MovieCatalog for SqliteCatalog {
    fn add_movie(&self, record: &MovieRecord) -> Result<AddOutcome, CatalogError> {
        let mut conn = self.conn.lock().unwrap();

        // Exact-match duplicate probe; casing differences are distinct titles.
        let exists: bool = conn
            .query_row(
                "SELECT 1 FROM Movies WHERE title = ?",
                params![record.title],
                |_| Ok(true),
            )
            .unwrap_or(false);

        if exists {
            debug!("Movie '{}' already in catalogue, skipping", record.title);
            return Ok(AddOutcome::Duplicate);
        }

        // Everything below commits or rolls back as one unit.
        let tx = conn
            .transaction()
            .map_err(|e| CatalogError::Database(e.to_string()))?;

        let director = record.director.as_deref().unwrap_or(super::UNKNOWN_DIRECTOR);
        let director_id = Self::intern_dimension(&tx, Dimension::Director, director)?;

        tx.execute(
            "INSERT INTO Movies (title, release_date, director_id) VALUES (?, ?, ?)",
            params![record.title, record.release_date, director_id],
        )
        .map_err(|e| CatalogError::Database(e.to_string()))?;
        let movie_id = tx.last_insert_rowid();

        for genre in &record.genres {
            let genre_id = Self::intern_dimension(&tx, Dimension::Genre, genre)?;
            tx.execute(
                "INSERT INTO MovieGenres (movie_id, genre_id) VALUES (?, ?)",
                params![movie_id, genre_id],
            )
            .map_err(|e| CatalogError::Database(e.to_string()))?;
        }

        for actor in &record.actors {
            let actor_id = Self::intern_dimension(&tx, Dimension::Actor, actor)?;
            tx.execute(
                "INSERT INTO MovieActors (movie_id, actor_id) VALUES (?, ?)",
                params![movie_id, actor_id],
            )
            .map_err(|e| CatalogError::Database(e.to_string()))?;
        }

        tx.commit()
            .map_err(|e| CatalogError::Database(e.to_string()))?;

        info!(
            "Added movie '{}' ({} genres, {} actors)",
            record.title,
            record.genres.len(),
            record.actors.len()
        );
        Ok(AddOutcome::Added { movie_id })
    }

    fn movie_id_by_title(&self, title: &str) -> Result<Option<i64>, CatalogError> {
        let conn = self.conn.lock().unwrap();

        conn.query_row(
            "SELECT movie_id FROM Movies WHERE title = ?",
            params![title],
            |row| row.get(0),
        )
        .optional()
        .map_err(|e| CatalogError::Database(e.to_string()))
    }

    fn list_all(&self) -> Result<Vec<MovieSummary>, CatalogError> {
        let conn = self.conn.lock().unwrap();

        Self::query_summaries(
            &conn,
            "SELECT m.movie_id, m.title, m.release_date, d.director_name, m.avg_rating
             FROM Movies m
             JOIN Directors d ON m.director_id = d.director_id
             ORDER BY m.movie_id",
            params![],
        )
    }

    fn by_director(&self, name: &str) -> Result<Vec<MovieSummary>, CatalogError> {
        let conn = self.conn.lock().unwrap();

        Self::query_summaries(
            &conn,
            "SELECT m.movie_id, m.title, m.release_date, d.director_name, m.avg_rating
             FROM Movies m
             JOIN Directors d ON m.director_id = d.director_id
             WHERE LOWER(d.director_name) = LOWER(?)
             ORDER BY m.movie_id",
            params![name],
        )
    }

    fn by_actor(&self, name: &str) -> Result<Vec<MovieSummary>, CatalogError> {
        let conn = self.conn.lock().unwrap();

        Self::query_summaries(
            &conn,
            "SELECT DISTINCT m.movie_id, m.title, m.release_date, d.director_name, m.avg_rating
             FROM Movies m
             JOIN Directors d ON m.director_id = d.director_id
             JOIN MovieActors ma ON m.movie_id = ma.movie_id
             JOIN Actors a ON ma.actor_id = a.actor_id
             WHERE LOWER(a.actor_name) = LOWER(?)
             ORDER BY m.movie_id",
            params![name],
        )
    }

    fn by_genre(&self, name: &str) -> Result<Vec<MovieSummary>, CatalogError> {
        let conn = self.conn.lock().unwrap();

        Self::query_summaries(
            &conn,
            "SELECT DISTINCT m.movie_id, m.title, m.release_date, d.director_name, m.avg_rating
             FROM Movies m
             JOIN Directors d ON m.director_id = d.director_id
             JOIN MovieGenres mg ON m.movie_id = mg.movie_id
             JOIN Genres g ON mg.genre_id = g.genre_id
             WHERE LOWER(g.genre_name) = LOWER(?)
             ORDER BY m.movie_id",
            params![name],
        )
    }

    fn top_rated(&self, limit: u32) -> Result<Vec<RatedMovie>, CatalogError> {
        let conn = self.conn.lock().unwrap();

        let mut stmt = conn
            .prepare(
                "SELECT m.title, AVG(r.rating) AS avg_rating
                 FROM Reviews r
                 JOIN Movies m ON r.movie_id = m.movie_id
                 GROUP BY m.movie_id
                 ORDER BY avg_rating DESC
                 LIMIT ?",
            )
            .map_err(|e| CatalogError::Database(e.to_string()))?;

        let rows = stmt
            .query_map(params![limit], |row| {
                Ok(RatedMovie {
                    title: row.get(0)?,
                    avg_rating: row.get(1)?,
                })
            })
            .map_err(|e| CatalogError::Database(e.to_string()))?;

        let mut movies = Vec::new();
        for row in rows {
            movies.push(row.map_err(|e| CatalogError::Database(e.to_string()))?);
        }
        Ok(movies)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::Database;

    fn create_test_catalog() -> (Database, SqliteCatalog) {
        let db = Database::in_memory().unwrap();
        let catalog = SqliteCatalog::new(db.handle());
        (db, catalog)
    }

    fn sample_record(title: &str) -> MovieRecord {
        MovieRecord {
            title: title.to_string(),
            director: Some("D".to_string()),
            genres: vec!["Action".to_string(), "Drama".to_string()],
            actors: vec!["A1".to_string(), "A2".to_string()],
            release_date: Some("2020-01-01".to_string()),
        }
    }

    fn count(db: &Database, sql: &str) -> i64 {
        let conn = db.handle();
        let conn = conn.lock().unwrap();
        conn.query_row(sql, [], |row| row.get(0)).unwrap()
    }

    #[test]
    fn test_add_movie() {
        let (db, catalog) = create_test_catalog();

        let outcome = catalog.add_movie(&sample_record("X")).unwrap();
        assert!(matches!(outcome, AddOutcome::Added { .. }));

        assert_eq!(count(&db, "SELECT COUNT(*) FROM Movies"), 1);
        assert_eq!(count(&db, "SELECT COUNT(*) FROM Genres"), 2);
        assert_eq!(count(&db, "SELECT COUNT(*) FROM Actors"), 2);
        assert_eq!(count(&db, "SELECT COUNT(*) FROM MovieGenres"), 2);
        assert_eq!(count(&db, "SELECT COUNT(*) FROM MovieActors"), 2);
    }

    #[test]
    fn test_add_duplicate_title_rejected() {
        let (db, catalog) = create_test_catalog();

        catalog.add_movie(&sample_record("X")).unwrap();
        let outcome = catalog.add_movie(&sample_record("X")).unwrap();

        assert_eq!(outcome, AddOutcome::Duplicate);
        assert_eq!(count(&db, "SELECT COUNT(*) FROM Movies"), 1);
        // The rejected record must not have added join rows either.
        assert_eq!(count(&db, "SELECT COUNT(*) FROM MovieGenres"), 2);
    }

    #[test]
    fn test_duplicate_check_is_case_sensitive() {
        let (db, catalog) = create_test_catalog();

        catalog.add_movie(&sample_record("Heat")).unwrap();
        let outcome = catalog.add_movie(&sample_record("HEAT")).unwrap();

        assert!(matches!(outcome, AddOutcome::Added { .. }));
        assert_eq!(count(&db, "SELECT COUNT(*) FROM Movies"), 2);
    }

    #[test]
    fn test_shared_dimensions_are_reused() {
        let (db, catalog) = create_test_catalog();

        catalog.add_movie(&sample_record("X")).unwrap();
        catalog.add_movie(&sample_record("Y")).unwrap();

        // Both movies share director, genres and actors: one row each.
        assert_eq!(count(&db, "SELECT COUNT(*) FROM Directors"), 1);
        assert_eq!(count(&db, "SELECT COUNT(*) FROM Genres"), 2);
        assert_eq!(count(&db, "SELECT COUNT(*) FROM Actors"), 2);
        // Join rows are per movie.
        assert_eq!(count(&db, "SELECT COUNT(*) FROM MovieGenres"), 4);
        assert_eq!(count(&db, "SELECT COUNT(*) FROM MovieActors"), 4);
    }

    #[test]
    fn test_repeated_tokens_produce_repeated_join_rows() {
        let (db, catalog) = create_test_catalog();

        let mut record = sample_record("X");
        record.genres = vec!["Action".to_string(), "Action".to_string()];
        catalog.add_movie(&record).unwrap();

        assert_eq!(count(&db, "SELECT COUNT(*) FROM Genres"), 1);
        assert_eq!(count(&db, "SELECT COUNT(*) FROM MovieGenres"), 2);
    }

    #[test]
    fn test_missing_fields_default() {
        let (db, catalog) = create_test_catalog();

        let record = MovieRecord {
            title: "Mystery".to_string(),
            director: None,
            genres: vec![],
            actors: vec![],
            release_date: None,
        };
        catalog.add_movie(&record).unwrap();

        let movies = catalog.list_all().unwrap();
        assert_eq!(movies.len(), 1);
        assert_eq!(movies[0].director, "Unknown");
        assert!(movies[0].release_date.is_none());
        assert!(movies[0].genres.is_empty());
        assert!(movies[0].actors.is_empty());
        assert_eq!(count(&db, "SELECT COUNT(*) FROM MovieGenres"), 0);
        assert_eq!(count(&db, "SELECT COUNT(*) FROM MovieActors"), 0);
    }

    #[test]
    fn test_movie_id_by_title_exact_match() {
        let (_db, catalog) = create_test_catalog();

        catalog.add_movie(&sample_record("X")).unwrap();

        assert!(catalog.movie_id_by_title("X").unwrap().is_some());
        assert!(catalog.movie_id_by_title("x").unwrap().is_none());
        assert!(catalog.movie_id_by_title("Y").unwrap().is_none());
    }

    #[test]
    fn test_list_all_includes_dimensions() {
        let (_db, catalog) = create_test_catalog();

        catalog.add_movie(&sample_record("X")).unwrap();

        let movies = catalog.list_all().unwrap();
        assert_eq!(movies.len(), 1);
        assert_eq!(movies[0].title, "X");
        assert_eq!(movies[0].director, "D");
        assert_eq!(movies[0].genres, vec!["Action", "Drama"]);
        assert_eq!(movies[0].actors, vec!["A1", "A2"]);
        assert!(movies[0].avg_rating.is_none());
    }

    #[test]
    fn test_by_director_case_insensitive() {
        let (_db, catalog) = create_test_catalog();

        let mut record = sample_record("Tenet");
        record.director = Some("Nolan".to_string());
        catalog.add_movie(&record).unwrap();

        let movies = catalog.by_director("nolan").unwrap();
        assert_eq!(movies.len(), 1);
        assert_eq!(movies[0].title, "Tenet");

        assert!(catalog.by_director("someone else").unwrap().is_empty());
    }

    #[test]
    fn test_by_actor_case_insensitive() {
        let (_db, catalog) = create_test_catalog();

        catalog.add_movie(&sample_record("X")).unwrap();

        let movies = catalog.by_actor("a1").unwrap();
        assert_eq!(movies.len(), 1);
        assert_eq!(movies[0].title, "X");
    }

    #[test]
    fn test_by_genre_case_insensitive() {
        let (_db, catalog) = create_test_catalog();

        catalog.add_movie(&sample_record("X")).unwrap();

        let movies = catalog.by_genre("ACTION").unwrap();
        assert_eq!(movies.len(), 1);

        assert!(catalog.by_genre("Comedy").unwrap().is_empty());
    }

    #[test]
    fn test_by_actor_deduplicates_repeated_join_rows() {
        let (_db, catalog) = create_test_catalog();

        let mut record = sample_record("X");
        record.actors = vec!["A1".to_string(), "A1".to_string()];
        catalog.add_movie(&record).unwrap();

        // Two join rows, but the movie appears once in the listing.
        let movies = catalog.by_actor("A1").unwrap();
        assert_eq!(movies.len(), 1);
    }

    #[test]
    fn test_top_rated_recomputes_from_reviews() {
        let (db, catalog) = create_test_catalog();

        catalog.add_movie(&sample_record("X")).unwrap();
        catalog.add_movie(&sample_record("Y")).unwrap();

        {
            let conn = db.handle();
            let conn = conn.lock().unwrap();
            conn.execute_batch(
                "INSERT INTO Users (user_name, password) VALUES ('u1', 'p'), ('u2', 'p');
                 INSERT INTO Reviews (user_id, movie_id, rating) VALUES (1, 1, 2), (2, 1, 4), (1, 2, 5);
                 -- Stale cache that the ranking must ignore.
                 UPDATE Movies SET avg_rating = 1.0 WHERE movie_id = 2;",
            )
            .unwrap();
        }

        let top = catalog.top_rated(5).unwrap();
        assert_eq!(top.len(), 2);
        assert_eq!(top[0].title, "Y");
        assert_eq!(top[0].avg_rating, 5.0);
        assert_eq!(top[1].title, "X");
        assert_eq!(top[1].avg_rating, 3.0);
    }

    #[test]
    fn test_top_rated_respects_limit() {
        let (db, catalog) = create_test_catalog();

        for i in 0..7 {
            catalog.add_movie(&sample_record(&format!("M{}", i))).unwrap();
        }
        {
            let conn = db.handle();
            let conn = conn.lock().unwrap();
            conn.execute("INSERT INTO Users (user_name, password) VALUES ('u', 'p')", [])
                .unwrap();
            for i in 0..7 {
                conn.execute(
                    "INSERT INTO Reviews (user_id, movie_id, rating) VALUES (1, ?, 3)",
                    params![i + 1],
                )
                .unwrap();
            }
        }

        assert_eq!(catalog.top_rated(5).unwrap().len(), 5);
    }

    #[test]
    fn test_top_rated_empty_without_reviews() {
        let (_db, catalog) = create_test_catalog();

        catalog.add_movie(&sample_record("X")).unwrap();
        assert!(catalog.top_rated(5).unwrap().is_empty());
    }
}

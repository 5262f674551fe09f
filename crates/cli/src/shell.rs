//! Interactive menu shell.
//!
//! Blocking line input, one operation at a time. Every recognized
//! failure prints a message and falls back to the menu; unrecognized
//! menu input is rejected and re-prompted.

use marquee_core::{
    AddOutcome, MetadataSource, MovieCatalog, ReviewStore, UserError, UserStore, WatchlistStore,
};

use crate::input::{prompt, prompt_i64};
use crate::render;

const TOP_RATED_LIMIT: u32 = 5;

/// The logged-in user, if any.
struct CurrentUser {
    id: i64,
    name: String,
}

/// Interactive shell over the injected stores.
pub struct Shell {
    catalog: Box<dyn MovieCatalog>,
    users: Box<dyn UserStore>,
    watchlist: Box<dyn WatchlistStore>,
    reviews: Box<dyn ReviewStore>,
    metadata: Option<Box<dyn MetadataSource>>,
    current_user: Option<CurrentUser>,
}

impl Shell {
    pub fn new(
        catalog: Box<dyn MovieCatalog>,
        users: Box<dyn UserStore>,
        watchlist: Box<dyn WatchlistStore>,
        reviews: Box<dyn ReviewStore>,
        metadata: Option<Box<dyn MetadataSource>>,
    ) -> Self {
        Self {
            catalog,
            users,
            watchlist,
            reviews,
            metadata,
            current_user: None,
        }
    }

    /// Run the menu loop until the user exits.
    pub fn run(&mut self) {
        loop {
            println!();
            println!("1. Login");
            println!("2. Signup");
            println!("3. View and Add Movies");
            println!("4. View/Add/Remove Movie from Watchlist");
            println!("5. View or Leave a Review");
            println!("6. View Movies by Genre");
            println!("7. View Top 5 Most Rated Movies");
            println!("8. View Movies by Director/Actor");
            println!("9. Exit");

            match prompt("Choose an option: ").as_str() {
                "1" => self.login(),
                "2" => self.signup(),
                "3" => self.movies_menu(),
                "4" => self.watchlist_menu(),
                "5" => self.reviews_menu(),
                "6" => self.browse_by_genre(),
                "7" => self.top_rated(),
                "8" => self.browse_by_person_menu(),
                "9" => break,
                _ => println!("Invalid choice."),
            }
        }
    }

    /// Logged-in user id, or a printed reminder to log in.
    fn require_login(&self) -> Option<i64> {
        match &self.current_user {
            Some(user) => Some(user.id),
            None => {
                println!("You must log in first.");
                None
            }
        }
    }

    fn login(&mut self) {
        let name = prompt("Enter your username: ");
        let password = prompt("Enter your password: ");

        match self.users.authenticate(&name, &password) {
            Ok(id) => {
                println!("Welcome, {}!", name);
                self.current_user = Some(CurrentUser { id, name });
            }
            Err(UserError::InvalidCredentials) => println!("Invalid username or password."),
            Err(e) => println!("{}", e),
        }
    }

    fn signup(&mut self) {
        let name = prompt("Enter a username: ");
        let password = prompt("Enter a password: ");

        match self.users.register(&name, &password) {
            Ok(id) => {
                println!("User '{}' created successfully.", name);
                self.current_user = Some(CurrentUser { id, name });
            }
            Err(UserError::NameTaken(_)) => {
                println!("Username already exists. Try a different one.");
            }
            Err(e) => println!("{}", e),
        }
    }

    fn movies_menu(&mut self) {
        println!();
        println!("1. View all movies in the database");
        println!("2. Add a movie from the metadata API");

        match prompt("Choose an option: ").as_str() {
            "1" => self.view_all_movies(),
            "2" => self.fetch_and_add_movie(),
            _ => println!("Invalid choice."),
        }
    }

    fn view_all_movies(&self) {
        match self.catalog.list_all() {
            Ok(movies) => render::print_summaries(&movies, true),
            Err(e) => println!("{}", e),
        }
    }

    fn fetch_and_add_movie(&mut self) {
        let Some(metadata) = &self.metadata else {
            println!("Metadata fetching is not configured; set [metadata] api_key in the config.");
            return;
        };

        let title = prompt("Enter movie title: ");
        let record = match metadata.fetch_by_title(&title) {
            Ok(record) => record,
            Err(e) => {
                println!("{}", e);
                return;
            }
        };

        match self.catalog.add_movie(&record) {
            Ok(AddOutcome::Added { .. }) => println!(
                "Movie '{}' added to the database with genres: {}.",
                record.title,
                record.genres.join(", ")
            ),
            Ok(AddOutcome::Duplicate) => {
                println!("Movie '{}' already exists in the database.", record.title);
            }
            Err(e) => println!("{}", e),
        }
    }

    fn watchlist_menu(&mut self) {
        let Some(user_id) = self.require_login() else {
            return;
        };

        loop {
            println!();
            println!("1. View Movies in Watchlist");
            println!("2. Add Movie to Watchlist");
            println!("3. Remove Movie from Watchlist");
            println!("4. Back to Main Menu");

            match prompt("Choose an option: ").as_str() {
                "1" => match self.watchlist.titles(user_id) {
                    Ok(titles) => {
                        println!("Movies in your Watchlist:");
                        for title in titles {
                            println!("{}", title);
                        }
                    }
                    Err(e) => println!("{}", e),
                },
                "2" => {
                    let title = prompt("Enter the movie title to add to your watchlist: ");
                    match self.lookup_movie(&title) {
                        Some(movie_id) => match self.watchlist.add(user_id, movie_id) {
                            Ok(()) => println!("Movie '{}' added to your watchlist.", title),
                            Err(e) => println!("{}", e),
                        },
                        None => {}
                    }
                }
                "3" => {
                    let title = prompt("Enter the movie title to remove from your watchlist: ");
                    match self.lookup_movie(&title) {
                        Some(movie_id) => match self.watchlist.remove(user_id, movie_id) {
                            Ok(()) => println!("Movie '{}' removed from your watchlist.", title),
                            Err(e) => println!("{}", e),
                        },
                        None => {}
                    }
                }
                "4" => break,
                _ => println!("Invalid choice."),
            }
        }
    }

    fn reviews_menu(&mut self) {
        let Some(user_id) = self.require_login() else {
            return;
        };

        loop {
            println!();
            println!("1. View Reviews on a Movie");
            println!("2. Leave a Review on a Movie");
            println!("3. Back to Main Menu");

            match prompt("Choose an option: ").as_str() {
                "1" => {
                    let title = prompt("Enter the movie title: ");
                    match self.reviews.reviews_for_title(&title) {
                        Ok(reviews) if reviews.is_empty() => {
                            println!("No reviews for this movie.");
                        }
                        Ok(reviews) => {
                            println!("Reviews for '{}':", title);
                            for review in reviews {
                                println!(
                                    "{} rated {} stars: {}",
                                    review.user_name, review.rating, review.text
                                );
                            }
                        }
                        Err(e) => println!("{}", e),
                    }
                }
                "2" => self.leave_review(user_id),
                "3" => break,
                _ => println!("Invalid choice."),
            }
        }
    }

    fn leave_review(&self, user_id: i64) {
        let title = prompt("Enter the movie title: ");
        let Some(rating) = prompt_i64("Enter your rating (1-5): ") else {
            println!("Rating must be a number between 1 and 5.");
            return;
        };
        let text = prompt("Enter your review: ");

        let Some(movie_id) = self.lookup_movie(&title) else {
            return;
        };

        match self.reviews.upsert_review(user_id, movie_id, rating, &text) {
            Ok(avg) => println!("Movie's average rating updated to {:.2}.", avg),
            Err(e) => println!("{}", e),
        }
    }

    fn browse_by_genre(&self) {
        let genre = prompt("Enter genre: ");
        match self.catalog.by_genre(&genre) {
            Ok(movies) if movies.is_empty() => {
                println!("No movies found in genre '{}'.", genre);
            }
            Ok(movies) => {
                println!("Movies in genre '{}':", genre);
                render::print_summaries(&movies, false);
            }
            Err(e) => println!("{}", e),
        }
    }

    fn top_rated(&self) {
        match self.catalog.top_rated(TOP_RATED_LIMIT) {
            Ok(movies) => {
                println!("Top 5 Most Rated Movies:");
                render::print_rated(&movies);
            }
            Err(e) => println!("{}", e),
        }
    }

    fn browse_by_person_menu(&self) {
        println!();
        println!("1. View movies by director");
        println!("2. View movies by actor");

        match prompt("Choose an option: ").as_str() {
            "1" => {
                let name = prompt("Enter director's name: ");
                match self.catalog.by_director(&name) {
                    Ok(movies) if movies.is_empty() => {
                        println!("No movies found by director '{}'.", name);
                    }
                    Ok(movies) => {
                        println!("Movies by director '{}':", name);
                        render::print_summaries(&movies, false);
                    }
                    Err(e) => println!("{}", e),
                }
            }
            "2" => {
                let name = prompt("Enter actor's name: ");
                match self.catalog.by_actor(&name) {
                    Ok(movies) if movies.is_empty() => {
                        println!("No movies found with actor '{}'.", name);
                    }
                    Ok(movies) => {
                        println!("Movies with actor '{}':", name);
                        render::print_summaries(&movies, false);
                    }
                    Err(e) => println!("{}", e),
                }
            }
            _ => println!("Invalid choice."),
        }
    }

    /// Exact-title lookup; prints "Movie not found." on a miss.
    fn lookup_movie(&self, title: &str) -> Option<i64> {
        match self.catalog.movie_id_by_title(title) {
            Ok(Some(movie_id)) => Some(movie_id),
            Ok(None) => {
                println!("Movie not found.");
                None
            }
            Err(e) => {
                println!("{}", e);
                None
            }
        }
    }
}

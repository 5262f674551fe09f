pub mod catalog;
pub mod config;
pub mod db;
pub mod metadata;
pub mod reviews;
pub mod users;
pub mod watchlist;

pub use catalog::{
    AddOutcome, CatalogError, MovieCatalog, MovieRecord, MovieSummary, RatedMovie, SqliteCatalog,
    UNKNOWN_DIRECTOR,
};
pub use config::{
    load_config, load_config_from_str, validate_config, Config, ConfigError, DatabaseConfig,
    MetadataConfig, SanitizedConfig,
};
pub use db::{Database, DbError, SharedConnection};
pub use metadata::{split_names, MetadataError, MetadataSource, OmdbClient};
pub use reviews::{MovieReview, ReviewError, ReviewStore, SqliteReviewStore};
pub use users::{
    CredentialScheme, PlaintextScheme, SqliteUserStore, UserError, UserStore,
};
pub use watchlist::{SqliteWatchlistStore, WatchlistError, WatchlistStore};

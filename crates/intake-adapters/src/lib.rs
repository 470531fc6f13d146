pub mod persistence;

pub use persistence::sqlite::SqliteDb;

//! Storage infrastructure - connection pooling, transactions, migrations

pub mod migrations;
mod postgres;
mod transaction;

pub use migrations::{run_schema_migrations, Migration, PostgresMigrator};
pub use postgres::DatabaseConfig;
pub use transaction::TransactionCoordinator;

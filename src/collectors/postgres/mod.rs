//! PostgreSQL access and the tasks built on it.
//!
//! A [`PgSession`] wraps one connection driven by its own current-thread
//! runtime so the rest of the collector stays synchronous. Instance-level
//! tasks share the run's default session; per-database tasks open a session
//! of their own for the duration of a single query.

mod cursor;
mod producers;
mod session;
mod tasks;

pub use cursor::PgCursor;
pub use producers::{ConfigFileProducer, DatabaseQueryProducer, QueryProducer};
pub use session::PgSession;
pub use tasks::{build_config_file_tasks, build_database_tasks, build_query_tasks, postgres_tasks};

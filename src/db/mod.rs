pub mod connection;
pub mod schema;

/// Classify a SurrealDB error as a UNIQUE index violation.
///
/// SurrealDB reports these as `Database index ... already contains ...`;
/// there is no typed variant to match on, so classification goes by message.
pub fn is_unique_violation(err: &surrealdb::Error) -> bool {
    err.to_string().contains("already contains")
}

/// All primary keys in the corpus are PostgreSQL BIGINT.
pub type DbId = i64;

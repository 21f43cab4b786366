use diesel::r2d2::PoolError;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Record not found")]
    NotFound,
    #[error(transparent)]
    Query(diesel::result::Error),
    #[error("Connection pool error: {0}")]
    Pool(#[from] PoolError),
    #[error("Migration failed: {0}")]
    Migration(String),
    #[error("Database task failed: {0}")]
    Blocking(String),
}

impl From<diesel::result::Error> for StoreError {
    fn from(err: diesel::result::Error) -> Self {
        match err {
            diesel::result::Error::NotFound => StoreError::NotFound,
            err => StoreError::Query(err),
        }
    }
}

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CacheError {
    #[error("Cache lock poisoned: {0}")]
    Lock(String),

    #[error("Cache backend error: {0}")]
    Backend(String),
}

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("address data gateway error: {0}")]
    Gateway(anyhow::Error),

    #[error("prefecture not found in dataset: {0}")]
    UnknownPrefecture(String),
}

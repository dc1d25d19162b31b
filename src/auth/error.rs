use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Credential storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Credential file is corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),
}

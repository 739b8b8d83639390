use affinidi_multihash::MultihashError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Configuration Error: {0}")]
    ConfigError(String),
    #[error("Couldn't read input. Reason: {0}")]
    InputError(std::io::Error),
    #[error("Couldn't write output. Reason: {0}")]
    OutputError(#[from] std::io::Error),
    #[error(transparent)]
    Multihash(#[from] MultihashError),
    #[error("{0}")]
    InternalError(String),
}

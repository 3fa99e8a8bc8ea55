use thiserror::Error;

#[derive(Error, Debug)]
pub enum TransducerError {
    #[error("Failed to read input: {0}")]
    Read(#[source] std::io::Error),

    #[error("Failed to write console output: {0}")]
    Write(#[source] std::io::Error),
}

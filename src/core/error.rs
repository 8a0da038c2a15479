//! Error types for the surface pipeline

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SurfaceError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Data error: {0}")]
    Data(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Degenerate surface: {0}")]
    Degenerate(String),

    #[error("Render error: {0}")]
    Render(String),

    #[error("Display error: {0}")]
    Display(String),

    #[error("IO error: {0}")]
    IO(#[from] std::io::Error),
}

pub type SurfaceResult<T> = Result<T, SurfaceError>;

impl SurfaceError {
    pub fn network(msg: impl Into<String>) -> Self {
        Self::Network(msg.into())
    }

    pub fn data(msg: impl Into<String>) -> Self {
        Self::Data(msg.into())
    }

    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    pub fn degenerate(msg: impl Into<String>) -> Self {
        Self::Degenerate(msg.into())
    }

    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }
}

use thiserror::Error;

/// Errors raised while preparing a render.
///
/// Building and printing a tree never fails; only settings can be invalid.
#[derive(Error, Debug)]
pub enum TreeError {
    #[error("config error: {message}")]
    Config { message: String },

    #[error("invalid glyph style: {0} (expected 'unicode' or 'ascii')")]
    InvalidStyle(String),
}

pub type TreeResult<T> = Result<T, TreeError>;

//! Error type shared by every render path.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, RenderError>;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Failed to load font: {0}")]
    FontError(String),
    #[error("Invalid color: {0}")]
    ColorError(String),
    #[error("Failed to read schedule: {0}")]
    ScheduleError(String),
    #[error("Failed to load photo: {0}")]
    PhotoError(String),
    #[error("No caption supplied and the caption pool is empty")]
    NoCaption,
    #[error("Image error: {0}")]
    ImageError(#[from] image::ImageError),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

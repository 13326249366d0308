use thiserror::Error;

/// Errors raised while selecting, placing and compositing emoji.
#[derive(Debug, Error)]
pub enum EmojifyError {
    /// Face geometry does not have the 4-vertex bounding polygon we rely on.
    #[error("invalid face annotation: expected 4 bounding vertices, got {vertices}")]
    InvalidAnnotation { vertices: usize },

    /// A code that the humor rank table does not know about.
    #[error("unknown emoji code: {0}")]
    UnknownEmojiCode(String),

    #[error("emoji asset {code} unavailable: {reason}")]
    AssetUnavailable { code: String, reason: String },

    #[error("label detection unavailable: {0}")]
    LabelDetectionUnavailable(String),

    #[error("face detection failed: {0}")]
    FaceDetection(String),

    #[error("image error: {0}")]
    Image(#[from] image::ImageError),
}

pub type Result<T> = std::result::Result<T, EmojifyError>;

use crate::error::Result;
use image::DynamicImage;
use serde::{Deserialize, Serialize};

/// One label returned by a label-detection service.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LabelAnnotation {
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub score: f32,
}

impl LabelAnnotation {
    pub fn new(description: impl Into<String>, score: f32) -> Self {
        Self {
            description: description.into(),
            score,
        }
    }
}

/// Labels a cropped face image. Used by the slow selection fallback, so it
/// is injected rather than called directly and can be left out entirely.
pub trait LabelDetector {
    fn detect_labels(&self, image: &DynamicImage) -> Result<Vec<LabelAnnotation>>;
}

/// Fixed labels regardless of input; handy offline and in tests.
#[derive(Debug, Clone, Default)]
pub struct StaticLabels(pub Vec<LabelAnnotation>);

impl LabelDetector for StaticLabels {
    fn detect_labels(&self, _image: &DynamicImage) -> Result<Vec<LabelAnnotation>> {
        Ok(self.0.clone())
    }
}

#![allow(dead_code)]

use emojify_vision::error::{EmojifyError, Result};
use emojify_vision::{EmojiCode, EmojiSource, FaceAnnotation, Likelihood};
use image::{DynamicImage, Rgba, RgbaImage};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Opaque fill color used for a code's fake template.
pub fn color_for(code: EmojiCode) -> Rgba<u8> {
    let i = EmojiCode::ALL.iter().position(|&c| c == code).unwrap() as u8;
    Rgba([250 - i * 10, 10 + i * 10, 83, 255])
}

/// 128x128 templates with a transparent left half, counting every fetch.
pub struct FakeSource {
    pub fetches: Arc<AtomicUsize>,
    pub broken: Option<EmojiCode>,
}

impl FakeSource {
    pub fn new() -> (Self, Arc<AtomicUsize>) {
        let fetches = Arc::new(AtomicUsize::new(0));
        (
            Self {
                fetches: fetches.clone(),
                broken: None,
            },
            fetches,
        )
    }

    pub fn broken(code: EmojiCode) -> Self {
        Self {
            fetches: Arc::new(AtomicUsize::new(0)),
            broken: Some(code),
        }
    }
}

impl EmojiSource for FakeSource {
    fn fetch(&self, code: EmojiCode) -> Result<DynamicImage> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        if self.broken == Some(code) {
            return Err(EmojifyError::AssetUnavailable {
                code: code.to_string(),
                reason: "404".into(),
            });
        }
        let color = color_for(code);
        let template = RgbaImage::from_fn(128, 128, |x, _| {
            if x < 64 {
                Rgba([0, 0, 0, 0])
            } else {
                color
            }
        });
        Ok(DynamicImage::ImageRgba8(template))
    }
}

pub fn face_with(
    corners: (i32, i32, i32, i32),
    sorrow: Likelihood,
    headwear: Likelihood,
) -> FaceAnnotation {
    let mut face = FaceAnnotation::from_corners(corners.0, corners.1, corners.2, corners.3);
    face.sorrow_likelihood = sorrow;
    face.headwear_likelihood = headwear;
    face
}

/// Per-channel comparison allowing for alpha-blend rounding.
pub fn assert_near(actual: Rgba<u8>, expected: Rgba<u8>) {
    let close = actual
        .0
        .iter()
        .zip(expected.0.iter())
        .all(|(a, e)| a.abs_diff(*e) <= 1);
    assert!(close, "pixel {:?} != {:?}", actual, expected);
}

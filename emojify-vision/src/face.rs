use crate::catalog::{EmojiCode, HEADWEAR_CODE};
use crate::error::{EmojifyError, Result};
use crate::likelihood::Likelihood;
use image::{DynamicImage, GenericImageView};
use serde::{Deserialize, Serialize};

/// Default fraction of the face size added around the emoji.
pub const DEFAULT_PAD: f64 = 0.05;

/// Extra scale for the cowboy hat so the brim fits above the head.
pub const HEADWEAR_SCALE: f64 = 1.16;

/// Pixel vertex. Cloud Vision omits zero coordinates, hence the defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Vertex {
    #[serde(default)]
    pub x: i32,
    #[serde(default)]
    pub y: i32,
}

impl Vertex {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BoundingPoly {
    #[serde(default)]
    pub vertices: Vec<Vertex>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    #[serde(default)]
    pub x: f32,
    #[serde(default)]
    pub y: f32,
    #[serde(default)]
    pub z: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Landmark {
    #[serde(rename = "type")]
    pub kind: String,
    pub position: Position,
}

/// One detected face, as reported by the face detector.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FaceAnnotation {
    #[serde(alias = "boundingPoly")]
    pub bounding_poly: BoundingPoly,
    #[serde(default, alias = "detectionConfidence")]
    pub detection_confidence: f32,
    #[serde(default, alias = "sorrowLikelihood")]
    pub sorrow_likelihood: Likelihood,
    #[serde(default, alias = "angerLikelihood")]
    pub anger_likelihood: Likelihood,
    #[serde(default, alias = "surpriseLikelihood")]
    pub surprise_likelihood: Likelihood,
    #[serde(default, alias = "headwearLikelihood")]
    pub headwear_likelihood: Likelihood,
    #[serde(default, alias = "joyLikelihood")]
    pub joy_likelihood: Likelihood,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub landmarks: Vec<Landmark>,
}

impl FaceAnnotation {
    /// Face with the given corners and every likelihood at VERY_UNLIKELY.
    pub fn from_corners(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            bounding_poly: BoundingPoly {
                vertices: vec![
                    Vertex::new(left, top),
                    Vertex::new(right, top),
                    Vertex::new(right, bottom),
                    Vertex::new(left, bottom),
                ],
            },
            detection_confidence: 1.0,
            sorrow_likelihood: Likelihood::VeryUnlikely,
            anger_likelihood: Likelihood::VeryUnlikely,
            surprise_likelihood: Likelihood::VeryUnlikely,
            headwear_likelihood: Likelihood::VeryUnlikely,
            joy_likelihood: Likelihood::VeryUnlikely,
            landmarks: Vec::new(),
        }
    }

    pub fn vertices(&self) -> Result<&[Vertex; 4]> {
        let vertices = &self.bounding_poly.vertices;
        vertices
            .as_slice()
            .try_into()
            .map_err(|_| EmojifyError::InvalidAnnotation {
                vertices: vertices.len(),
            })
    }
}

/// Axis-aligned pixel box, top-left origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Bounds {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl Bounds {
    pub fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// The whole canvas of an image of the given size.
    pub fn of_image(width: u32, height: u32) -> Self {
        Self::new(
            0,
            0,
            i32::try_from(width).unwrap_or(i32::MAX),
            i32::try_from(height).unwrap_or(i32::MAX),
        )
    }

    pub fn width(&self) -> i32 {
        self.right.saturating_sub(self.left)
    }

    pub fn height(&self) -> i32 {
        self.bottom.saturating_sub(self.top)
    }

    pub fn is_empty(&self) -> bool {
        self.width() <= 0 || self.height() <= 0
    }

    pub fn clamp_to(&self, frame: &Bounds) -> Bounds {
        Bounds {
            left: self.left.max(frame.left),
            top: self.top.max(frame.top),
            right: self.right.min(frame.right),
            bottom: self.bottom.min(frame.bottom),
        }
    }
}

/// Box spanned by the top-left and bottom-right bounding vertices.
pub fn face_box(face: &FaceAnnotation) -> Result<Bounds> {
    let vertices = face.vertices()?;
    let top_left = vertices[0];
    let bottom_right = vertices[2];
    Ok(Bounds::new(
        top_left.x,
        top_left.y,
        bottom_right.x,
        bottom_right.y,
    ))
}

/// Square box the emoji is scaled into.
///
/// The square side is `max(width, height) * (1 + pad)`, centered on the face.
/// The headwear emoji grows by [`HEADWEAR_SCALE`]: the whole size delta goes
/// upward and half of it to each side, leaving the bottom edge in place.
/// When `frame` is given the result is clamped to it.
pub fn emoji_box(
    face: &FaceAnnotation,
    pad: f64,
    code: Option<EmojiCode>,
    frame: Option<&Bounds>,
) -> Result<Bounds> {
    let face = face_box(face)?;
    // coordinates come straight from detector JSON; keep the math out of i32
    let (face_left, face_top) = (face.left as f64, face.top as f64);
    let (face_right, face_bottom) = (face.right as f64, face.bottom as f64);
    let size = (face_right - face_left).max(face_bottom - face_top) * (1.0 + pad);
    let center_x = (face_left + face_right) / 2.0;
    let center_y = (face_top + face_bottom) / 2.0;

    let mut left = center_x - size / 2.0;
    let mut top = center_y - size / 2.0;
    let mut right = center_x + size / 2.0;
    let bottom = center_y + size / 2.0;

    if code == Some(HEADWEAR_CODE) {
        let delta = size * HEADWEAR_SCALE - size;
        top -= delta;
        left -= delta / 2.0;
        right += delta / 2.0;
    }

    let placed = Bounds::new(
        left.round() as i32,
        top.round() as i32,
        right.round() as i32,
        bottom.round() as i32,
    );
    Ok(match frame {
        Some(frame) => placed.clamp_to(frame),
        None => placed,
    })
}

/// Paint-order key: faces higher in the frame are treated as further away.
pub fn depth_rank(face: &FaceAnnotation) -> Result<i32> {
    Ok(face_box(face)?.top)
}

/// Crop the (image-clamped) emoji box for `code` out of `image`.
pub fn extract_head(
    image: &DynamicImage,
    face: &FaceAnnotation,
    code: Option<EmojiCode>,
    pad: f64,
) -> Result<DynamicImage> {
    let (width, height) = image.dimensions();
    let frame = Bounds::of_image(width, height);
    let head = emoji_box(face, pad, code, Some(&frame))?;
    if head.is_empty() {
        return Ok(DynamicImage::new_rgba8(0, 0));
    }
    Ok(image.crop_imm(
        head.left as u32,
        head.top as u32,
        head.width() as u32,
        head.height() as u32,
    ))
}

//! Google Cloud Vision `images:annotate` over REST.
//!
//! Request body:
//! `{"requests":[{"image":{"content":<base64>},"features":[{"type":..,"maxResults":..}]}]}`

use crate::error::{EmojifyError, Result};
use crate::face::FaceAnnotation;
use crate::labels::{LabelAnnotation, LabelDetector};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use image::{DynamicImage, ImageFormat};
use log::info;
use serde::{Deserialize, Serialize};
use std::io::Cursor;

pub const VISION_ENDPOINT: &str = "https://vision.googleapis.com/v1/images:annotate";
pub const MAX_RESULTS: u32 = 20;

#[derive(Serialize)]
struct AnnotateRequest<'a> {
    requests: [ImageRequest<'a>; 1],
}

#[derive(Serialize)]
struct ImageRequest<'a> {
    image: ImageContent,
    features: [Feature<'a>; 1],
}

#[derive(Serialize)]
struct ImageContent {
    content: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Feature<'a> {
    #[serde(rename = "type")]
    kind: &'a str,
    max_results: u32,
}

#[derive(Deserialize, Default)]
struct AnnotateResponse {
    #[serde(default)]
    responses: Vec<ImageResponse>,
}

#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct ImageResponse {
    #[serde(default)]
    face_annotations: Vec<FaceAnnotation>,
    #[serde(default)]
    label_annotations: Vec<LabelAnnotation>,
    error: Option<Status>,
}

#[derive(Deserialize)]
struct Status {
    #[serde(default)]
    code: i32,
    #[serde(default)]
    message: String,
}

/// Blocking Cloud Vision client authenticated with an API key.
pub struct CloudVision {
    api_key: String,
    endpoint: String,
    max_results: u32,
    client: reqwest::blocking::Client,
}

impl CloudVision {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            endpoint: VISION_ENDPOINT.to_string(),
            max_results: MAX_RESULTS,
            client: reqwest::blocking::Client::new(),
        }
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn with_max_results(mut self, max_results: u32) -> Self {
        self.max_results = max_results;
        self
    }

    /// Faces in an encoded image (any format Cloud Vision accepts).
    pub fn detect_faces(&self, encoded: &[u8]) -> Result<Vec<FaceAnnotation>> {
        info!("Detecting faces...");
        let response = self
            .annotate(encoded, "FACE_DETECTION")
            .map_err(EmojifyError::FaceDetection)?;
        info!("...{} faces found.", response.face_annotations.len());
        Ok(response.face_annotations)
    }

    pub fn detect_labels_encoded(&self, encoded: &[u8]) -> Result<Vec<LabelAnnotation>> {
        info!("Detecting labels...");
        let response = self
            .annotate(encoded, "LABEL_DETECTION")
            .map_err(EmojifyError::LabelDetectionUnavailable)?;
        info!("...{} labels found.", response.label_annotations.len());
        Ok(response.label_annotations)
    }

    fn annotate(&self, encoded: &[u8], feature: &str) -> std::result::Result<ImageResponse, String> {
        let body = AnnotateRequest {
            requests: [ImageRequest {
                image: ImageContent {
                    content: STANDARD.encode(encoded),
                },
                features: [Feature {
                    kind: feature,
                    max_results: self.max_results,
                }],
            }],
        };
        let parsed: AnnotateResponse = self
            .client
            .post(&self.endpoint)
            .query(&[("key", self.api_key.as_str())])
            .json(&body)
            .send()
            .and_then(|r| r.error_for_status())
            .and_then(|r| r.json())
            .map_err(|e| e.to_string())?;
        parse_single(parsed)
    }
}

fn parse_single(parsed: AnnotateResponse) -> std::result::Result<ImageResponse, String> {
    let response = parsed.responses.into_iter().next().unwrap_or_default();
    match response.error {
        Some(status) => Err(format!("{} (code {})", status.message, status.code)),
        None => Ok(response),
    }
}

impl LabelDetector for CloudVision {
    fn detect_labels(&self, image: &DynamicImage) -> Result<Vec<LabelAnnotation>> {
        let mut encoded = Cursor::new(Vec::new());
        DynamicImage::ImageRgb8(image.to_rgb8()).write_to(&mut encoded, ImageFormat::Jpeg)?;
        self.detect_labels_encoded(encoded.get_ref())
    }
}

//! Picks one emoji per face.
//!
//! Each emotion category votes independently, the votes are collected into a
//! set and the humor rank decides. Keeping precedence in the rank table
//! rather than in branching means two categories firing at once (sorrow and
//! headwear, say) always resolve the same way.

use crate::catalog::{Catalog, Category, EmojiCode};
use crate::error::Result;
use crate::face::{self, FaceAnnotation, DEFAULT_PAD};
use crate::labels::LabelDetector;
use crate::likelihood::Likelihood;
use image::DynamicImage;
use log::{debug, warn};
use std::collections::BTreeSet;

pub struct Selector {
    catalog: Catalog,
    pad: f64,
    labels: Option<Box<dyn LabelDetector>>,
}

impl Selector {
    /// Validates the catalog up front so a missing humor rank shows up at
    /// startup instead of halfway through a render.
    pub fn new(catalog: Catalog) -> Result<Self> {
        catalog.validate()?;
        Ok(Self {
            catalog,
            pad: DEFAULT_PAD,
            labels: None,
        })
    }

    pub fn with_pad(mut self, pad: f64) -> Self {
        self.pad = pad;
        self
    }

    /// Enable the label fallback for faces with no sentiment signal.
    pub fn with_labels(mut self, detector: Box<dyn LabelDetector>) -> Self {
        self.labels = Some(detector);
        self
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn pad(&self) -> f64 {
        self.pad
    }

    pub fn uses_labels(&self) -> bool {
        self.labels.is_some()
    }

    /// Deterministic candidates from the likelihood scores alone.
    pub fn candidates(&self, face: &FaceAnnotation) -> BTreeSet<EmojiCode> {
        let mut candidates: BTreeSet<EmojiCode> = Category::ALL
            .iter()
            .map(|&category| {
                self.catalog
                    .code_for(category, category_likelihood(face, category))
            })
            .collect();
        if face.headwear_likelihood > Likelihood::Possible {
            candidates.insert(self.catalog.headwear_code);
        }
        candidates
    }

    /// Best emoji for `face`.
    ///
    /// When the scores carry no signal, a label detector is configured and
    /// `image` is given, the face crop is labelled and recognized labels add
    /// candidates. Label failures are logged and ignored.
    pub fn select_code(
        &self,
        face: &FaceAnnotation,
        image: Option<&DynamicImage>,
    ) -> Result<EmojiCode> {
        let mut candidates = self.candidates(face);

        let no_signal = candidates.len() == 1 && candidates.contains(&self.catalog.default_code);
        if no_signal {
            if let (Some(detector), Some(image)) = (self.labels.as_deref(), image) {
                candidates.extend(self.label_candidates(detector, image, face)?);
            }
        }

        let mut ranked = Vec::with_capacity(candidates.len());
        for code in candidates {
            ranked.push((self.catalog.rank(code)?, code));
        }
        let best = ranked
            .into_iter()
            .min()
            .map(|(_, code)| code)
            .unwrap_or(self.catalog.default_code);
        debug!("selected emoji {}", best);
        Ok(best)
    }

    fn label_candidates(
        &self,
        detector: &dyn LabelDetector,
        image: &DynamicImage,
        face: &FaceAnnotation,
    ) -> Result<Vec<EmojiCode>> {
        let head = face::extract_head(image, face, None, self.pad)?;
        let labels = match detector.detect_labels(&head) {
            Ok(labels) => labels,
            Err(e) => {
                warn!("label fallback skipped: {}", e);
                return Ok(Vec::new());
            }
        };
        debug!("{} labels for face crop", labels.len());
        Ok(labels
            .iter()
            .filter_map(|label| self.catalog.label_code(&label.description))
            .collect())
    }
}

fn category_likelihood(face: &FaceAnnotation, category: Category) -> Likelihood {
    match category {
        Category::Sorrow => face.sorrow_likelihood,
        Category::Anger => face.anger_likelihood,
        Category::Surprise => face.surprise_likelihood,
        Category::Joy => face.joy_likelihood,
    }
}

pub mod cache;
pub mod catalog;
pub mod cloud;
pub mod compositor;
pub mod error;
pub mod face;
pub mod labels;
pub mod likelihood;
pub mod selector;

// Re-export commonly used types
pub use cache::{EmojiCache, EmojiSource};
pub use catalog::{Catalog, EmojiCode};
pub use compositor::{Compositor, Placement};
pub use error::{EmojifyError, Result};
pub use face::{Bounds, FaceAnnotation};
pub use labels::{LabelAnnotation, LabelDetector};
pub use likelihood::Likelihood;
pub use selector::Selector;

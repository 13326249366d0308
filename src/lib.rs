pub mod config;
pub mod process;
pub mod storage;

// Re-export vision types for convenience
pub use emojify_vision::{
    cache, catalog, compositor, face, Catalog, Compositor, EmojiCode, FaceAnnotation, Selector,
};

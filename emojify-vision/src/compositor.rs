use crate::cache::EmojiCache;
use crate::catalog::EmojiCode;
use crate::error::Result;
use crate::face::{self, Bounds, FaceAnnotation};
use crate::selector::Selector;
use image::{imageops, DynamicImage, GenericImageView, Rgba};
use imageproc::drawing::draw_line_segment_mut;
use log::{debug, info, warn};

pub const HIGHLIGHT_COLOR: Rgba<u8> = Rgba([0, 255, 0, 255]);
pub const HIGHLIGHT_WIDTH: u32 = 5;

/// One emoji pasted by [`Compositor::render`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placement {
    /// Index of the face in the caller's slice.
    pub face: usize,
    pub code: EmojiCode,
    pub bounds: Bounds,
}

/// Full pipeline: order faces → select emoji → place → paste.
pub struct Compositor {
    pub selector: Selector,
    pub cache: EmojiCache,
}

impl Compositor {
    pub fn new(selector: Selector, cache: EmojiCache) -> Self {
        Self { selector, cache }
    }

    /// Paste an emoji over every face, in place, back to front.
    ///
    /// There is no rollback: if a face fails (bad geometry, asset fetch),
    /// the faces already pasted stay on `image` and the error is returned.
    /// Invalid geometry on any face is detected before anything is drawn.
    pub fn render(
        &self,
        image: &mut DynamicImage,
        faces: &[FaceAnnotation],
    ) -> Result<Vec<Placement>> {
        let order = paint_order(faces)?;
        let (width, height) = image.dimensions();
        let frame = Bounds::of_image(width, height);
        // label crops come from the untouched photo, not the partial composite
        let source = self.selector.uses_labels().then(|| image.clone());

        let mut placements = Vec::with_capacity(faces.len());
        for index in order {
            let face = &faces[index];
            let code = self.selector.select_code(face, source.as_ref())?;
            let bounds = face::emoji_box(face, self.selector.pad(), Some(code), Some(&frame))?;
            if bounds.is_empty() {
                warn!("face {} lies outside the image, skipping", index);
                continue;
            }

            let emoji = self.cache.get_image(code, &bounds)?;
            imageops::overlay(image, &emoji, bounds.left as i64, bounds.top as i64);
            debug!("face {}: {} at {:?}", index, code, bounds);
            placements.push(Placement {
                face: index,
                code,
                bounds,
            });
        }

        info!("Rendered {} emoji", placements.len());
        Ok(placements)
    }
}

/// Face indices sorted by depth rank, ties kept in input order.
pub fn paint_order(faces: &[FaceAnnotation]) -> Result<Vec<usize>> {
    let mut keyed = faces
        .iter()
        .enumerate()
        .map(|(i, face)| face::depth_rank(face).map(|depth| (depth, i)))
        .collect::<Result<Vec<_>>>()?;
    keyed.sort_by_key(|&(depth, _)| depth);
    Ok(keyed.into_iter().map(|(_, i)| i).collect())
}

/// Outline each face's bounding polygon. Diagnostic only.
pub fn highlight(
    image: &mut DynamicImage,
    faces: &[FaceAnnotation],
    color: Rgba<u8>,
    width: u32,
) -> Result<()> {
    let half = (width / 2) as i32;
    for face in faces {
        let vertices = face.vertices()?;
        for (i, start) in vertices.iter().enumerate() {
            let end = vertices[(i + 1) % vertices.len()];
            for offset in -half..=half {
                let o = offset as f32;
                draw_line_segment_mut(
                    image,
                    (start.x as f32 + o, start.y as f32),
                    (end.x as f32 + o, end.y as f32),
                    color,
                );
                draw_line_segment_mut(
                    image,
                    (start.x as f32, start.y as f32 + o),
                    (end.x as f32, end.y as f32 + o),
                    color,
                );
            }
        }
    }
    Ok(())
}

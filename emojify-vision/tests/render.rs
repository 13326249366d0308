mod common;

use anyhow::Result;
use common::{assert_near, color_for, face_with, FakeSource};
use emojify_vision::catalog::HEADWEAR_CODE;
use emojify_vision::compositor::paint_order;
use emojify_vision::error::EmojifyError;
use emojify_vision::{Bounds, Catalog, Compositor, EmojiCache, EmojiCode, Likelihood, Selector};
use image::{DynamicImage, GenericImageView, Rgba, RgbaImage};
use std::sync::atomic::Ordering;

const GREY: Rgba<u8> = Rgba([90, 90, 90, 255]);

fn canvas() -> DynamicImage {
    DynamicImage::ImageRgba8(RgbaImage::from_pixel(640, 480, GREY))
}

#[test]
fn test_sorrow_face_end_to_end() -> Result<()> {
    env_logger::try_init().ok();

    let (source, fetches) = FakeSource::new();
    let compositor = Compositor::new(
        Selector::new(Catalog::default())?,
        EmojiCache::new(Box::new(source)),
    );
    let face = face_with(
        (100, 100, 200, 220),
        Likelihood::VeryLikely,
        Likelihood::VeryUnlikely,
    );

    let mut image = canvas();
    let placements = compositor.render(&mut image, &[face])?;

    assert_eq!(placements.len(), 1);
    assert_eq!(placements[0].code, EmojiCode::Crying);
    assert_eq!(placements[0].bounds, Bounds::new(87, 97, 213, 223));
    assert_eq!(fetches.load(Ordering::SeqCst), 1);

    // opaque half replaces the photo, transparent half leaves it alone
    assert_near(image.get_pixel(200, 160), color_for(EmojiCode::Crying));
    assert_near(image.get_pixel(90, 160), GREY);
    // outside the box untouched
    assert_near(image.get_pixel(300, 300), GREY);
    Ok(())
}

#[test]
fn test_headwear_face_end_to_end() -> Result<()> {
    env_logger::try_init().ok();

    let (source, _) = FakeSource::new();
    let compositor = Compositor::new(
        Selector::new(Catalog::default())?,
        EmojiCache::new(Box::new(source)),
    );
    let face = face_with(
        (100, 100, 200, 220),
        Likelihood::VeryUnlikely,
        Likelihood::Likely,
    );

    let mut image = canvas();
    let placements = compositor.render(&mut image, &[face])?;
    assert_eq!(placements[0].code, HEADWEAR_CODE);
    assert!(placements[0].bounds.top < 97);
    assert_eq!(placements[0].bounds.bottom, 223);
    Ok(())
}

#[test]
fn test_render_paints_back_to_front() -> Result<()> {
    env_logger::try_init().ok();

    let (source, _) = FakeSource::new();
    let compositor = Compositor::new(
        Selector::new(Catalog::default())?,
        EmojiCache::new(Box::new(source)),
    );
    let faces: Vec<_> = [50, 10, 50, 30]
        .iter()
        .enumerate()
        .map(|(i, &top)| {
            let left = 20 + i as i32 * 150;
            face_with(
                (left, top, left + 60, top + 60),
                Likelihood::VeryUnlikely,
                Likelihood::VeryUnlikely,
            )
        })
        .collect();

    assert_eq!(paint_order(&faces)?, vec![1, 3, 0, 2]);

    let mut image = canvas();
    let placements = compositor.render(&mut image, &faces)?;
    let order: Vec<usize> = placements.iter().map(|p| p.face).collect();
    assert_eq!(order, vec![1, 3, 0, 2]);
    Ok(())
}

#[test]
fn test_lower_face_drawn_over_higher_face() -> Result<()> {
    let (source, _) = FakeSource::new();
    let compositor = Compositor::new(
        Selector::new(Catalog::default())?,
        EmojiCache::new(Box::new(source)),
    );
    // near face listed first but lower in frame, so it is pasted last
    let near = face_with(
        (100, 150, 200, 250),
        Likelihood::VeryLikely,
        Likelihood::VeryUnlikely,
    );
    let far = face_with(
        (110, 100, 210, 200),
        Likelihood::VeryUnlikely,
        Likelihood::VeryUnlikely,
    );

    let mut image = canvas();
    compositor.render(&mut image, &[near, far])?;
    // overlap region covered by the opaque half of both emoji
    assert_near(image.get_pixel(190, 180), color_for(EmojiCode::Crying));
    Ok(())
}

#[test]
fn test_cache_fetches_once_and_is_idempotent() -> Result<()> {
    let (source, fetches) = FakeSource::new();
    let cache = EmojiCache::new(Box::new(source));
    let bounds = Bounds::new(10, 10, 73, 51);

    let first = cache.get_image(EmojiCode::Nerd, &bounds)?;
    let second = cache.get_image(EmojiCode::Nerd, &bounds)?;
    let other_size = cache.get_image(EmojiCode::Nerd, &Bounds::new(0, 0, 300, 300))?;

    assert_eq!(first.dimensions(), (63, 41));
    assert_eq!(first.as_raw(), second.as_raw());
    assert_eq!(other_size.dimensions(), (300, 300));
    assert_eq!(fetches.load(Ordering::SeqCst), 1);
    assert!(cache.contains(EmojiCode::Nerd));
    assert_eq!(cache.len(), 1);
    Ok(())
}

#[test]
fn test_asset_failure_stops_without_rollback() -> Result<()> {
    env_logger::try_init().ok();

    let compositor = Compositor::new(
        Selector::new(Catalog::default())?,
        EmojiCache::new(Box::new(FakeSource::broken(EmojiCode::Crying))),
    );
    let first = face_with(
        (20, 10, 120, 110),
        Likelihood::VeryUnlikely,
        Likelihood::VeryUnlikely,
    );
    let second = face_with(
        (300, 200, 400, 300),
        Likelihood::VeryLikely,
        Likelihood::VeryUnlikely,
    );

    let mut image = canvas();
    let result = compositor.render(&mut image, &[first, second]);
    assert!(matches!(result, Err(EmojifyError::AssetUnavailable { .. })));
    // the first face stays composited
    assert_near(image.get_pixel(110, 60), color_for(EmojiCode::SlightlySmiling));
    Ok(())
}

#[test]
fn test_invalid_geometry_aborts_before_drawing() -> Result<()> {
    let (source, fetches) = FakeSource::new();
    let compositor = Compositor::new(
        Selector::new(Catalog::default())?,
        EmojiCache::new(Box::new(source)),
    );
    let good = face_with(
        (20, 10, 120, 110),
        Likelihood::VeryUnlikely,
        Likelihood::VeryUnlikely,
    );
    let mut bad = good.clone();
    bad.bounding_poly.vertices.truncate(2);

    let mut image = canvas();
    let result = compositor.render(&mut image, &[good, bad]);
    assert!(matches!(
        result,
        Err(EmojifyError::InvalidAnnotation { vertices: 2 })
    ));
    assert_eq!(fetches.load(Ordering::SeqCst), 0);
    assert_near(image.get_pixel(110, 60), GREY);
    Ok(())
}

#[test]
fn test_face_outside_canvas_is_skipped() -> Result<()> {
    let (source, _) = FakeSource::new();
    let compositor = Compositor::new(
        Selector::new(Catalog::default())?,
        EmojiCache::new(Box::new(source)),
    );
    let outside = face_with(
        (700, 500, 760, 560),
        Likelihood::VeryUnlikely,
        Likelihood::VeryUnlikely,
    );
    let mut image = canvas();
    let placements = compositor.render(&mut image, &[outside])?;
    assert!(placements.is_empty());
    Ok(())
}

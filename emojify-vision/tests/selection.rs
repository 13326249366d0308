use anyhow::Result;
use emojify_vision::catalog::{Category, DEFAULT_CODE, HEADWEAR_CODE};
use emojify_vision::{Catalog, EmojiCode, FaceAnnotation, Likelihood, Selector};

const SIGNAL_LEVELS: [Likelihood; 4] = [
    Likelihood::Unlikely,
    Likelihood::Possible,
    Likelihood::Likely,
    Likelihood::VeryLikely,
];

/// Every combination of the four sentiment levels plus headwear on/off
/// must resolve to a ranked code.
#[test]
fn test_every_likelihood_combination_selects() -> Result<()> {
    let selector = Selector::new(Catalog::default())?;
    let mut face = FaceAnnotation::from_corners(0, 0, 40, 40);
    let mut count = 0;

    for sorrow in Likelihood::ALL {
        for anger in Likelihood::ALL {
            for surprise in Likelihood::ALL {
                for joy in Likelihood::ALL {
                    for headwear in [Likelihood::VeryUnlikely, Likelihood::VeryLikely] {
                        face.sorrow_likelihood = sorrow;
                        face.anger_likelihood = anger;
                        face.surprise_likelihood = surprise;
                        face.joy_likelihood = joy;
                        face.headwear_likelihood = headwear;
                        let code = selector.select_code(&face, None)?;
                        selector.catalog().rank(code)?;
                        count += 1;
                    }
                }
            }
        }
    }

    println!("✓ {} combinations selected", count);
    assert_eq!(count, 6 * 6 * 6 * 6 * 2);
    Ok(())
}

#[test]
fn test_rank_non_increasing_with_intensity() -> Result<()> {
    let catalog = Catalog::default();
    for category in Category::ALL {
        let ranks = SIGNAL_LEVELS
            .iter()
            .map(|&l| catalog.rank(catalog.code_for(category, l)))
            .collect::<Result<Vec<_>, _>>()?;
        for pair in ranks.windows(2) {
            assert!(
                pair[1] <= pair[0],
                "{:?} gets less funny as it intensifies: {:?}",
                category,
                ranks
            );
        }
        // any signal beats the default
        assert!(ranks[0] < catalog.rank(DEFAULT_CODE)?);
    }
    Ok(())
}

#[test]
fn test_selection_is_deterministic() -> Result<()> {
    let selector = Selector::new(Catalog::default())?;
    let mut a = FaceAnnotation::from_corners(0, 0, 40, 40);
    a.anger_likelihood = Likelihood::Likely;
    a.surprise_likelihood = Likelihood::Likely;
    a.joy_likelihood = Likelihood::Possible;
    let mut b = FaceAnnotation::from_corners(300, 10, 380, 90);
    b.anger_likelihood = Likelihood::Likely;
    b.surprise_likelihood = Likelihood::Likely;
    b.joy_likelihood = Likelihood::Possible;

    let first = selector.select_code(&a, None)?;
    let second = selector.select_code(&b, None)?;
    assert_eq!(first, second);
    assert_eq!(first, EmojiCode::Angry);
    Ok(())
}

#[test]
fn test_sorrow_very_likely_cries() -> Result<()> {
    let selector = Selector::new(Catalog::default())?;
    let mut face = FaceAnnotation::from_corners(100, 100, 200, 220);
    face.sorrow_likelihood = Likelihood::VeryLikely;
    assert_eq!(selector.select_code(&face, None)?, EmojiCode::Crying);
    Ok(())
}

#[test]
fn test_headwear_alone_selects_hat() -> Result<()> {
    let selector = Selector::new(Catalog::default())?;
    let mut face = FaceAnnotation::from_corners(100, 100, 200, 220);
    face.headwear_likelihood = Likelihood::Likely;
    assert_eq!(selector.select_code(&face, None)?, HEADWEAR_CODE);
    Ok(())
}

#[test]
fn test_unknown_likelihood_counts_as_no_signal() -> Result<()> {
    let selector = Selector::new(Catalog::default())?;
    let face = FaceAnnotation {
        bounding_poly: FaceAnnotation::from_corners(0, 0, 10, 10).bounding_poly,
        ..FaceAnnotation::default()
    };
    assert_eq!(face.joy_likelihood, Likelihood::Unknown);
    assert_eq!(selector.select_code(&face, None)?, DEFAULT_CODE);
    Ok(())
}

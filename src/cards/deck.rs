//! Deck building.
//!
//! Every image in the pool is dealt exactly twice. The doubled pool is
//! shuffled with a uniform Fisher-Yates shuffle and each card's id is its
//! final position, so the deck is laid out left-to-right, top-to-bottom
//! in id order.

use rustc_hash::{FxHashMap, FxHashSet};

use super::card::{Card, CardId};
use super::image::ImageRef;
use crate::core::error::GameError;
use crate::core::rng::GameRng;

/// Check that a pool holds exactly `pair_count` distinct images.
pub fn validate_pool(pool: &[ImageRef], pair_count: usize) -> Result<(), GameError> {
    if pair_count == 0 {
        return Err(GameError::NoPairs);
    }
    if pool.len() != pair_count {
        return Err(GameError::PoolSize {
            expected: pair_count,
            actual: pool.len(),
        });
    }

    let mut seen = FxHashSet::default();
    for &image in pool {
        if !seen.insert(image) {
            return Err(GameError::DuplicateImage(image));
        }
    }

    Ok(())
}

/// Deal a freshly shuffled deck of `2 * pair_count` face-down cards.
pub fn build_deck(
    pool: &[ImageRef],
    pair_count: usize,
    rng: &mut GameRng,
) -> Result<Vec<Card>, GameError> {
    validate_pool(pool, pair_count)?;

    let mut faces: Vec<ImageRef> = pool.iter().chain(pool.iter()).copied().collect();
    rng.shuffle(&mut faces);

    Ok(deal(&faces))
}

/// Deal a deck in a caller-chosen order.
///
/// Used to replay a known deal. Every image in `layout` must come from
/// `pool` and every pool image must appear exactly twice.
pub fn layout_deck(pool: &[ImageRef], layout: &[ImageRef]) -> Result<Vec<Card>, GameError> {
    validate_pool(pool, pool.len())?;

    if layout.len() != pool.len() * 2 {
        return Err(GameError::LayoutSize {
            expected: pool.len() * 2,
            actual: layout.len(),
        });
    }

    let mut counts: FxHashMap<ImageRef, usize> = pool.iter().map(|&image| (image, 0)).collect();
    for &image in layout {
        match counts.get_mut(&image) {
            Some(count) => *count += 1,
            None => return Err(GameError::UnknownImage(image)),
        }
    }

    // Report in pool order so the error is stable
    if let Some((&image, &count)) = pool
        .iter()
        .map(|image| (image, &counts[image]))
        .find(|&(_, &count)| count != 2)
    {
        return Err(GameError::LayoutPairCount { image, count });
    }

    Ok(deal(layout))
}

fn deal(faces: &[ImageRef]) -> Vec<Card> {
    faces
        .iter()
        .enumerate()
        .map(|(position, &image)| Card::new(CardId::new(position as u32), image))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pool(n: u64) -> Vec<ImageRef> {
        (0..n).map(ImageRef::new).collect()
    }

    #[test]
    fn test_build_deck_pairs() {
        let pool = pool(8);
        let mut rng = GameRng::new(42);

        let deck = build_deck(&pool, 8, &mut rng).unwrap();

        assert_eq!(deck.len(), 16);
        for image in &pool {
            assert_eq!(deck.iter().filter(|c| c.image() == *image).count(), 2);
        }
    }

    #[test]
    fn test_build_deck_ids_are_positions() {
        let mut rng = GameRng::new(1);
        let deck = build_deck(&pool(8), 8, &mut rng).unwrap();

        for (position, card) in deck.iter().enumerate() {
            assert_eq!(card.id().index(), position);
            assert!(!card.is_face_up());
            assert!(!card.is_matched());
        }
    }

    #[test]
    fn test_build_deck_is_seeded() {
        let deck1 = build_deck(&pool(8), 8, &mut GameRng::new(5)).unwrap();
        let deck2 = build_deck(&pool(8), 8, &mut GameRng::new(5)).unwrap();
        let deck3 = build_deck(&pool(8), 8, &mut GameRng::new(6)).unwrap();

        assert_eq!(deck1, deck2);
        assert_ne!(deck1, deck3);
    }

    #[test]
    fn test_build_deck_wrong_pool_size() {
        let mut rng = GameRng::new(42);

        assert_eq!(
            build_deck(&pool(7), 8, &mut rng),
            Err(GameError::PoolSize { expected: 8, actual: 7 })
        );
    }

    #[test]
    fn test_build_deck_zero_pairs() {
        let mut rng = GameRng::new(0);
        assert_eq!(build_deck(&[], 0, &mut rng), Err(GameError::NoPairs));
    }

    #[test]
    fn test_build_deck_duplicate_image() {
        let mut rng = GameRng::new(42);
        let mut images = pool(7);
        images.push(ImageRef::new(3));

        assert_eq!(
            build_deck(&images, 8, &mut rng),
            Err(GameError::DuplicateImage(ImageRef::new(3)))
        );
    }

    #[test]
    fn test_layout_deck() {
        let images = pool(2);
        let (a, b) = (images[0], images[1]);

        let deck = layout_deck(&images, &[a, b, b, a]).unwrap();

        let faces: Vec<_> = deck.iter().map(Card::image).collect();
        assert_eq!(faces, vec![a, b, b, a]);
        assert_eq!(deck[3].id(), CardId::new(3));
    }

    #[test]
    fn test_layout_deck_rejects_bad_layouts() {
        let images = pool(2);
        let (a, b) = (images[0], images[1]);

        assert_eq!(
            layout_deck(&images, &[a, b, a]),
            Err(GameError::LayoutSize { expected: 4, actual: 3 })
        );
        assert_eq!(
            layout_deck(&images, &[a, b, a, ImageRef::new(99)]),
            Err(GameError::UnknownImage(ImageRef::new(99)))
        );
        assert_eq!(
            layout_deck(&images, &[a, a, a, b]),
            Err(GameError::LayoutPairCount { image: a, count: 3 })
        );
    }
}

//! Property tests over random deals and random input sequences.

use concentration::{
    build_deck, GameConfig, GameMachine, GameRng, ImageRef, NullListener, SelectOutcome,
};
use proptest::prelude::*;

#[derive(Clone, Debug)]
enum Op {
    Select(usize),
    Resolve,
    Reset,
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        6 => (0usize..20).prop_map(Op::Select),
        3 => Just(Op::Resolve),
        1 => Just(Op::Reset),
    ]
}

fn pool() -> Vec<ImageRef> {
    (0..8).map(ImageRef::new).collect()
}

fn machine(seed: u64) -> GameMachine {
    let config = GameConfig::default().with_seed(seed);
    GameMachine::new(config, &pool(), NullListener).unwrap()
}

// =============================================================================
// Deal and Play Properties
// =============================================================================

proptest! {
    /// Every deal holds each pool image exactly twice.
    #[test]
    fn test_deck_has_every_image_twice(seed in any::<u64>()) {
        let pool = pool();
        let deck = build_deck(&pool, 8, &mut GameRng::new(seed)).unwrap();

        prop_assert_eq!(deck.len(), 16);
        for image in &pool {
            prop_assert_eq!(deck.iter().filter(|c| c.image() == *image).count(), 2);
        }
        for (position, card) in deck.iter().enumerate() {
            prop_assert_eq!(card.id().index(), position);
            prop_assert!(!card.is_face_up() && !card.is_matched());
        }
    }

    /// Invariants hold after every operation; progress only moves forward
    /// between resets.
    #[test]
    fn test_invariants_under_random_play(
        seed in any::<u64>(),
        ops in prop::collection::vec(op(), 0..200),
    ) {
        let mut m = machine(seed);
        let mut pairs_found = 0;
        let mut completed = false;

        for op in ops {
            let before = m.snapshot();

            match op {
                Op::Select(index) => {
                    if m.select_card(index) == SelectOutcome::Ignored {
                        prop_assert_eq!(m.snapshot(), before);
                    }
                }
                Op::Resolve => {
                    m.resolve_pending();
                    prop_assert!(m.state().pending().is_empty());
                    prop_assert!(!m.state().is_checking());
                }
                Op::Reset => {
                    m.reset();
                    pairs_found = 0;
                    completed = false;
                }
            }

            let state = m.state();
            prop_assert_eq!(state.verify(), Ok(()));
            prop_assert!(state.pairs_found() >= pairs_found);
            prop_assert!(state.is_completed() || !completed);
            prop_assert_eq!(state.is_completed(), state.pairs_found() == 8);
            pairs_found = state.pairs_found();
            completed = state.is_completed();
        }
    }

    /// Two selections followed by a resolution always release the lock.
    #[test]
    fn test_guard_liberation(seed in any::<u64>(), first in 0usize..16, second in 0usize..16) {
        prop_assume!(first != second);
        let mut m = machine(seed);

        m.select_card(first);
        let outcome = m.select_card(second);
        prop_assert!(matches!(outcome, SelectOutcome::PairPending(_)));
        prop_assert!(m.state().is_checking());

        let SelectOutcome::PairPending(ticket) = outcome else {
            unreachable!();
        };
        prop_assert!(m.resolve(ticket).is_some());
        prop_assert!(m.state().pending().is_empty());
        prop_assert!(!m.state().is_checking());
    }
}

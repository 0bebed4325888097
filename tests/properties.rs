//! Seed-quantified properties for the three engines.

use cardthropic_rules::game::{
    CardGame, DrawMode, FreecellGame, KlondikeGame, SpiderGame, SpiderSuitMode, FOUNDATION_COUNT,
    FREECELL_CELL_COUNT, FREECELL_TABLEAU_COUNT, KLONDIKE_TABLEAU_COUNT,
};
use proptest::prelude::*;
use proptest::sample::Index;

fn config() -> ProptestConfig {
    ProptestConfig {
        cases: 48,
        ..ProptestConfig::default()
    }
}

fn draw_mode() -> impl Strategy<Value = DrawMode> {
    prop_oneof![Just(DrawMode::One), Just(DrawMode::Three)]
}

fn suit_mode() -> impl Strategy<Value = SpiderSuitMode> {
    prop_oneof![
        Just(SpiderSuitMode::One),
        Just(SpiderSuitMode::Two),
        Just(SpiderSuitMode::Four),
    ]
}

fn choices() -> impl Strategy<Value = Vec<Index>> {
    prop::collection::vec(any::<Index>(), 0..80)
}

fn klondike_live_cards(game: &KlondikeGame) -> usize {
    game.stock().len()
        + game.waste().len()
        + game.foundations().iter().map(|f| f.len()).sum::<usize>()
        + game.tableaus().iter().map(|t| t.len()).sum::<usize>()
}

proptest! {
    #![proptest_config(config())]

    #[test]
    fn same_seed_deals_same_board(seed in any::<u64>(), draw in draw_mode(), suits in suit_mode()) {
        prop_assert_eq!(
            KlondikeGame::new_game(Some(seed), draw).save_game().unwrap(),
            KlondikeGame::new_game(Some(seed), draw).save_game().unwrap()
        );
        prop_assert_eq!(
            FreecellGame::new_with_seed(seed).save_game().unwrap(),
            FreecellGame::new_with_seed(seed).save_game().unwrap()
        );
        prop_assert_eq!(
            SpiderGame::new_game(suits, Some(seed)).save_game().unwrap(),
            SpiderGame::new_game(suits, Some(seed)).save_game().unwrap()
        );
    }

    #[test]
    fn klondike_stays_valid_under_random_play(
        seed in any::<u64>(),
        draw in draw_mode(),
        picks in choices(),
    ) {
        let mut game = KlondikeGame::new_game(Some(seed), draw);
        for pick in picks {
            let moves = game.valid_moves();
            if moves.is_empty() {
                break;
            }
            let mv = *pick.get(&moves);
            prop_assert!(game.apply_move(&mv), "{:?}", mv);
            prop_assert!(game.validate_game());
            prop_assert_eq!(klondike_live_cards(&game), 52);
        }

        let saved = game.save_game().unwrap();
        let loaded = KlondikeGame::load_game(&saved).unwrap();
        prop_assert_eq!(loaded.save_game().unwrap(), saved);
        prop_assert_eq!(loaded.move_history().len(), game.move_history().len());
    }

    #[test]
    fn freecell_stays_valid_under_random_play(seed in any::<u64>(), picks in choices()) {
        let mut game = FreecellGame::new_with_seed(seed);
        for pick in picks {
            let moves = game.valid_moves();
            if moves.is_empty() {
                break;
            }
            let mv = *pick.get(&moves);
            prop_assert!(game.apply_move(&mv), "{:?}", mv);
            prop_assert!(game.validate_game());
        }

        let saved = game.save_game().unwrap();
        let loaded = FreecellGame::load_game(&saved).unwrap();
        prop_assert_eq!(&loaded, &game);
        prop_assert_eq!(loaded.move_history().as_slice(), game.move_history().as_slice());
    }

    #[test]
    fn spider_stays_valid_under_random_play(
        seed in any::<u64>(),
        suits in suit_mode(),
        picks in choices(),
    ) {
        let mut game = SpiderGame::new_game(suits, Some(seed));
        for pick in picks {
            let moves = game.valid_moves();
            if moves.is_empty() {
                break;
            }
            let mv = *pick.get(&moves);
            let completed_before = game.completed_sequences();
            prop_assert!(game.apply_move(&mv), "{:?}", mv);
            prop_assert!(game.validate_game());
            prop_assert!(game.completed_sequences() >= completed_before);

            let live: usize = game.stock_len()
                + game.tableaus().iter().map(|t| t.len()).sum::<usize>();
            prop_assert_eq!(live + game.completed_sequences() * 13, 104);
        }

        let loaded = SpiderGame::load_game(&game.save_game().unwrap()).unwrap();
        prop_assert_eq!(&loaded, &game);
    }

    #[test]
    fn klondike_illegal_moves_are_no_ops(
        seed in any::<u64>(),
        src in 0usize..10,
        start in 0usize..20,
        dst in 0usize..10,
    ) {
        let mut game = KlondikeGame::new_with_seed(seed);
        let before = game.save_game().unwrap();

        if !game.can_move_tableau_to_tableau(src, start, dst) {
            prop_assert!(!game.move_tableau_to_tableau(src, start, dst));
        }
        if !game.can_move_tableau_to_foundation(src, dst) {
            prop_assert!(!game.move_tableau_to_foundation(src, dst));
        }
        prop_assert!(!game.move_waste_to_tableau(dst));
        prop_assert!(!game.move_tableau_to_tableau(src, start, src));
        prop_assert!(!game.move_tableau_to_foundation(KLONDIKE_TABLEAU_COUNT + src, 0));
        prop_assert!(!game.move_waste_to_foundation(FOUNDATION_COUNT + dst));

        prop_assert!(game.move_history().is_empty());
        prop_assert_eq!(game.save_game().unwrap(), before);
    }

    #[test]
    fn freecell_illegal_moves_are_no_ops(seed in any::<u64>(), src in 0usize..12, cell in 0usize..6) {
        let mut game = FreecellGame::new_with_seed(seed);
        prop_assert!(game.move_tableau_to_free_cell(0, 0));
        let before = game.save_game().unwrap();

        prop_assert!(!game.move_tableau_to_free_cell(src, 0));
        prop_assert!(!game.move_free_cell_to_tableau(1, src));
        prop_assert!(!game.move_tableau_to_free_cell(FREECELL_TABLEAU_COUNT + src, cell));
        prop_assert!(!game.move_free_cell_to_foundation(FREECELL_CELL_COUNT + cell, 0));
        prop_assert!(!game.move_tableau_to_tableau(src, 0, src));

        prop_assert_eq!(game.save_game().unwrap(), before);
    }

    #[test]
    fn klondike_reset_undoes_a_full_drain(seed in any::<u64>()) {
        let mut game = KlondikeGame::new_with_seed(seed);
        let original = game.stock().cards().to_vec();

        while game.draw_from_stock() {}
        prop_assert!(game.stock().is_empty());
        prop_assert!(game.reset_stock());
        prop_assert_eq!(game.stock().cards(), original.as_slice());
        prop_assert_eq!(game.stock().len(), 24);
    }
}

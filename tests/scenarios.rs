use monopoly_sim::config::{GameSettings, PlayerEntry, PlayerSettings, Settings};
use monopoly_sim::game::globals::{CellKind, Group, BOARD_SIZE, JAIL_POSITION};
use monopoly_sim::game::{Dice, EventLog, Game, Payee, Player, State, TurnResult};

/// Players who spend everything they have.
fn state_with(money: &[i64]) -> State {
    let settings = PlayerSettings {
        unspendable_cash: 0,
        ..PlayerSettings::default()
    };
    let players = money
        .iter()
        .enumerate()
        .map(|(i, &m)| Player::new(&format!("P{}", i), settings.clone(), m))
        .collect();

    State::new(
        GameSettings::default(),
        players,
        Dice::new(1, 2, 6),
        EventLog::new(),
    )
}

/// Keep moving while the player rolls doubles, as the game loop does.
fn take_turn(state: &mut State, me: usize) -> TurnResult {
    loop {
        match state.make_a_move(me) {
            TurnResult::RollAgain => continue,
            result => return result,
        }
    }
}

#[test]
fn mortgages_a_property_to_pay_rent() {
    let mut state = state_with(&[50, 0]);
    state.assign_property(0, 15);

    state.pay(0, 100, Payee::Player(1));

    assert!(!state.players[0].is_bankrupt);
    assert_eq!(state.players[0].money, 50);
    assert_eq!(state.players[1].money, 100);
    assert!(state.board.property(15).is_mortgaged);
    assert_eq!(state.players[0].owned, vec![15]);
}

#[test]
fn players_swap_the_properties_completing_their_groups() {
    let mut state = state_with(&[800, 800]);
    // Player 0 needs Indiana Avenue, player 1 needs Marvin Gardens
    for &position in &[21, 24, 29] {
        state.assign_property(0, position);
    }
    for &position in &[23, 26, 27] {
        state.assign_property(1, position);
    }
    state.dice.force_rolls(vec![vec![1, 2]]);

    // Trading happens before the dice are thrown
    take_turn(&mut state, 0);

    assert_eq!(state.board.property(23).owner, Some(0));
    assert_eq!(state.board.property(29).owner, Some(1));
    // Marvin Gardens ($280) for Indiana Avenue ($220)
    assert_eq!(state.players[1].money, 800 - 60);
    assert!(state.log.contains("Trade: P0 gives F3 Marvin Gardens"));
    assert_eq!(state.board.property(21).monopoly_multiplier, 2);
    assert_eq!(state.board.property(26).monopoly_multiplier, 2);
}

#[test]
fn four_railroads_charge_200() {
    let mut state = state_with(&[1500, 1500]);
    for &position in &[5, 15, 25, 35] {
        state.assign_property(1, position);
    }
    state.players[0].position = 20;
    state.dice.force_rolls(vec![vec![2, 3]]);

    assert_eq!(take_turn(&mut state, 0), TurnResult::Ended);

    assert_eq!(state.players[0].position, 25);
    assert_eq!(state.players[0].money, 1300);
    assert_eq!(state.players[1].money, 1700);
}

#[test]
fn third_double_in_a_row_sends_to_jail() {
    let mut state = state_with(&[1500, 1500]);
    state.dice.force_rolls(vec![vec![3, 3], vec![5, 5], vec![2, 2]]);

    assert_eq!(take_turn(&mut state, 0), TurnResult::Ended);

    assert_eq!(state.players[0].position, JAIL_POSITION);
    assert!(state.players[0].in_jail);
    assert_eq!(state.players[0].doubles_rolled, 0);
    // Bought on the first two doubles, never reached Free Parking
    assert_eq!(state.players[0].owned, vec![6, 16]);
}

#[test]
fn bankrupt_player_hands_over_everything() {
    let mut state = state_with(&[0, 100]);
    for &position in &[1, 3, 12] {
        state.assign_property(0, position);
    }
    for _ in 0..2 {
        state.board.build(1);
        state.board.build(3);
    }
    for &position in &[37, 39] {
        state.assign_property(1, position);
    }
    state.board.build(39);
    state.board.build(39);
    state.players[0].position = 35;
    state.dice.force_rolls(vec![vec![1, 3]]);

    // $600 rent on Boardwalk is more than everything player 0 has
    assert_eq!(take_turn(&mut state, 0), TurnResult::Bankrupt);

    let bankrupt = &state.players[0];
    assert!(bankrupt.is_bankrupt);
    assert_eq!(bankrupt.money, 0);
    assert!(bankrupt.owned.is_empty());
    assert!(bankrupt.wants_to_sell.is_empty());

    // 4 houses at $25, then 3 mortgages
    assert_eq!(state.players[1].money, 100 + 100 + 30 + 30 + 75);
    assert_eq!(state.board.available_houses, 30);
    for &position in &[1, 3, 12] {
        assert_eq!(state.board.property(position).owner, Some(1));
        assert!(state.board.property(position).is_mortgaged);
    }
}

/// Every property's owner knows about it, and nobody owns something they don't.
fn assert_consistent(state: &State) {
    for position in 0..BOARD_SIZE {
        let property = match &state.board.cells[position].kind {
            CellKind::Property(p) => p,
            _ => continue,
        };

        if let Some(owner) = property.owner {
            assert!(state.players[owner].owned.contains(&position));
        }
        if property.group.is_color() {
            assert!(property.houses <= 4);
            assert!(!(property.has_hotel && property.houses > 0));
        } else {
            assert!(!property.is_improved());
        }
    }

    for (index, player) in state.players.iter().enumerate() {
        for &position in &player.owned {
            assert_eq!(state.board.property(position).owner, Some(index));
        }

        if player.is_bankrupt {
            assert_eq!(player.money, 0);
            assert!(player.owned.is_empty());
            assert!(player.jail_free_cards.is_empty());
        } else {
            assert!(player.money >= 0);
        }
    }

    let held_cards: usize = state.players.iter().map(|p| p.jail_free_cards.len()).sum();
    assert_eq!(
        state.board.chance.len() + state.board.community_chest.len() + held_cards,
        32
    );
}

#[test]
fn whole_games_keep_the_books_straight() {
    let mut settings = Settings::default();
    settings.simulation.n_moves = 300;
    settings.players = ["Hero", "Alice", "Bob", "Charly"]
        .iter()
        .map(|name| PlayerEntry::new(name))
        .collect();
    settings.players[0].behaviour.ignore_property_groups.insert(Group::Utilities);
    settings.game.shuffle_players = true;

    for seed in 0..20 {
        let mut game = Game::new(&settings, seed as usize + 1, seed);
        let result = game.play();

        assert_consistent(&game.state);
        assert!(result.turns_played <= 300);
        for (player, outcome) in game.state.players.iter().zip(&result.players) {
            assert_eq!(player.name, outcome.name);
            assert_eq!(player.is_bankrupt, outcome.bankrupt_turn.is_some());
        }
    }
}

#[test]
fn games_are_reproducible_from_their_seed() {
    let settings = Settings::default();

    let first = Game::new(&settings, 1, 1234).play();
    let again = Game::new(&settings, 1, 1234).play();
    let other = Game::new(&settings, 1, 4321).play();

    assert_eq!(first, again);
    assert_eq!(first.seed, 1234);
    assert_ne!(first.players, other.players);
}

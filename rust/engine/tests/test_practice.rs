use gamemaster_engine::blackjack::BlackjackConfig;
use gamemaster_engine::errors::GameError;
use gamemaster_engine::game::TurnBasedGame;
use gamemaster_engine::poker::{HouseView, PokerConfig, Stage};
use gamemaster_engine::practice::{HouseMap, PracticeSession, HOUSE_TURN_LIMIT};
use gamemaster_engine::tictactoe::{TicTacToe, TicTacToeConfig};

fn always_call(_: &HouseView<'_>) -> bool {
    true
}

fn never_call(_: &HouseView<'_>) -> bool {
    false
}

fn poker_config(seed: u64) -> PokerConfig {
    PokerConfig {
        seed: Some(seed),
        ..PokerConfig::default()
    }
}

#[test]
fn house_checks_ahead_of_the_hero() {
    let mut session = PracticeSession::poker(poker_config(2), always_call).unwrap();
    let obs = session.reset().unwrap();
    assert_eq!(session.hero(), "player_button");
    assert_eq!(obs["legal_moves"], serde_json::json!(["check", "bet", "fold"]));
    assert_eq!(obs["history"][1], "player_big_blind checks.");
}

#[test]
fn house_folds_to_a_bet_it_will_not_call() {
    let mut session = PracticeSession::poker(poker_config(2), never_call).unwrap();
    session.reset().unwrap();
    let result = session.step("bet").unwrap();
    assert!(result.done);
    assert_eq!(result.reward, 1.0);
    assert_eq!(session.game().final_scores()["player_big_blind"], -1.0);
}

#[test]
fn called_bet_moves_play_to_the_flop() {
    let mut session = PracticeSession::poker(poker_config(2), always_call).unwrap();
    session.reset().unwrap();
    let result = session.step("bet").unwrap();
    assert!(!result.done);
    assert_eq!(result.reward, 0.0);
    assert_eq!(session.game().stage(), Stage::Flop);
    assert_eq!(result.observation["board"].as_array().unwrap().len(), 3);
    assert_eq!(session.game().current_actor(), "player_button");

    let result = session.step("fold").unwrap();
    assert!(result.done);
    assert_eq!(result.reward, -1.0);
}

#[test]
fn invalid_hero_command_keeps_the_turn() {
    let mut session = PracticeSession::poker_default(poker_config(8)).unwrap();
    session.reset().unwrap();
    let result = session.step("raise").unwrap();
    assert_eq!(result.reward, -0.5);
    assert_eq!(result.info["invalid"], true);
    assert_eq!(session.game().current_actor(), "player_button");
}

#[test]
fn blackjack_practice_is_a_one_seat_table() {
    let config = BlackjackConfig {
        players: vec!["you".into()],
        seed: Some(4),
        ..BlackjackConfig::default()
    };
    let mut session = PracticeSession::blackjack(config).unwrap();
    let obs = session.reset().unwrap();
    assert_eq!(obs["legal_moves"], serde_json::json!(["hit", "stand"]));
    let result = session.step("stand").unwrap();
    assert!(result.done);
    assert!(result.observation["outcome"].is_string());

    let two_seats = BlackjackConfig::default();
    assert!(matches!(
        PracticeSession::blackjack(two_seats),
        Err(GameError::PlayerCount { actual: 2, .. })
    ));
}

#[test]
fn every_other_seat_needs_a_house() {
    let game = TicTacToe::new(TicTacToeConfig::default()).unwrap();
    let err = PracticeSession::new(game, "player_o", HouseMap::new()).err();
    assert_eq!(err, Some(GameError::MissingHouseSeat("player_x".into())));

    let game = TicTacToe::new(TicTacToeConfig::default()).unwrap();
    let err = PracticeSession::new(game, "nobody", HouseMap::new()).err();
    assert_eq!(err, Some(GameError::UnknownActor("nobody".into())));
}

#[test]
fn stuck_house_seat_is_reported() {
    let game = TicTacToe::new(TicTacToeConfig::default()).unwrap();
    let mut house: HouseMap<TicTacToe> = HouseMap::new();
    house.insert(
        "player_x".into(),
        Box::new(|_: &TicTacToe, _: &str| "nowhere".to_string()),
    );
    let mut session = PracticeSession::new(game, "player_o", house).unwrap();
    assert_eq!(
        session.reset().unwrap_err(),
        GameError::HouseStalled {
            actor: "player_x".into(),
            turns: HOUSE_TURN_LIMIT
        }
    );
}

#[test]
fn tic_tac_toe_house_hands_the_turn_back() {
    let game = TicTacToe::new(TicTacToeConfig::default()).unwrap();
    let mut house: HouseMap<TicTacToe> = HouseMap::new();
    house.insert(
        "player_x".into(),
        Box::new(|g: &TicTacToe, actor: &str| g.legal_actions(actor)[0].clone()),
    );
    let mut session = PracticeSession::new(game, "player_o", house).unwrap();
    let obs = session.reset().unwrap();
    assert_eq!(obs["turn_count"], 1);
    let result = session.step("5").unwrap();
    assert_eq!(result.observation["turn_count"], 3);
    assert_eq!(session.game().board()[0], Some('X'));
    assert_eq!(session.game().board()[1], Some('X'));
}

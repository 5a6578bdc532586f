use gamemaster_ai::baseline::{BaselinePoker, FirstLegal, PassivePoker, ThresholdBlackjack};
use gamemaster_ai::random::RandomLegal;
use gamemaster_ai::{AGENT_KINDS, Agent, AgentError, create_agent, legal_moves};
use gamemaster_engine::blackjack::{BlackjackConfig, BlackjackGame};
use gamemaster_engine::game::Observation;
use gamemaster_engine::master::{AgentMap, GameMaster, MatchConfig, MatchResult};
use gamemaster_engine::poker::{HeadsUpPoker, PokerConfig};
use gamemaster_engine::tictactoe::{TicTacToe, TicTacToeConfig};
use serde_json::json;

fn obs(value: serde_json::Value) -> Observation {
    value.as_object().cloned().expect("object literal")
}

fn poker_match(seed: u64, a: Box<dyn Agent>, b: Box<dyn Agent>) -> MatchResult {
    let game = HeadsUpPoker::new(PokerConfig {
        seed: Some(seed),
        ..PokerConfig::default()
    })
    .unwrap();
    let mut agents = AgentMap::new();
    agents.insert("player_button".into(), a);
    agents.insert("player_big_blind".into(), b);
    GameMaster::new(game, agents, MatchConfig::default())
        .unwrap()
        .run()
        .unwrap()
}

#[test]
fn factory_knows_every_listed_kind() {
    for kind in AGENT_KINDS {
        assert!(create_agent(kind, 1).is_ok(), "{kind}");
    }
    assert_eq!(
        create_agent("Baseline", 0).unwrap().name(),
        "BaselinePoker"
    );
    let err = create_agent("oracle", 0).err().unwrap();
    assert_eq!(err, AgentError::UnknownKind("oracle".into()));
    assert!(err.to_string().contains("first, random"));
}

#[test]
fn legal_moves_reads_the_observation() {
    let o = obs(json!({"legal_moves": ["hit", "stand"]}));
    assert_eq!(legal_moves(&o), vec!["hit", "stand"]);
    assert!(legal_moves(&obs(json!({}))).is_empty());
}

#[test]
fn first_legal_follows_game_order() {
    let mut agent = FirstLegal;
    assert_eq!(
        agent.decide(&obs(json!({"legal_moves": ["3", "7"]}))).as_deref(),
        Some("3")
    );
    assert_eq!(agent.decide(&obs(json!({"legal_moves": []}))), None);
}

#[test]
fn threshold_blackjack_stands_on_seventeen() {
    let mut agent = ThresholdBlackjack::default();
    let legal = json!(["hit", "stand"]);
    let decide = |agent: &mut ThresholdBlackjack, total: u64| {
        agent
            .decide(&obs(json!({"legal_moves": legal.clone(), "hand_total": total})))
            .unwrap()
    };
    assert_eq!(decide(&mut agent, 12), "hit");
    assert_eq!(decide(&mut agent, 16), "hit");
    assert_eq!(decide(&mut agent, 17), "stand");
    assert_eq!(decide(&mut agent, 20), "stand");
}

#[test]
fn threshold_blackjack_finishes_a_table() {
    let game = BlackjackGame::new(BlackjackConfig {
        seed: Some(31),
        ..BlackjackConfig::default()
    })
    .unwrap();
    let mut agents = AgentMap::new();
    agents.insert("player_one".into(), Box::new(ThresholdBlackjack::default()));
    agents.insert("player_two".into(), Box::new(FirstLegal));
    let result = GameMaster::new(game, agents, MatchConfig::default())
        .unwrap()
        .run()
        .unwrap();
    assert!(result.completed);
    assert!(result.turns.iter().all(|t| t.info.get("invalid").is_none()));
}

#[test]
fn passive_poker_calls_and_checks() {
    let mut agent = PassivePoker;
    let facing = obs(json!({"legal_moves": ["call", "fold"]}));
    let open = obs(json!({"legal_moves": ["check", "bet", "fold"]}));
    assert_eq!(agent.decide(&facing).as_deref(), Some("call"));
    assert_eq!(agent.decide(&open).as_deref(), Some("check"));
}

#[test]
fn passive_players_always_reach_showdown() {
    let result = poker_match(12, Box::new(PassivePoker), Box::new(PassivePoker));
    assert!(result.completed);
    assert_eq!(result.turns.len(), 8);
    assert_eq!(result.status["stage"], "finished");
}

#[test]
fn baseline_poker_bets_strong_and_folds_weak() {
    let mut agent = BaselinePoker::new();
    let strong = obs(json!({
        "hand": ["A♠", "A♦"],
        "board": [],
        "pot": 2.0,
        "legal_moves": ["check", "bet", "fold"],
    }));
    assert_eq!(agent.decide(&strong).as_deref(), Some("bet"));

    let weak = obs(json!({
        "hand": ["7♠", "2♦"],
        "board": [],
        "pot": 3.0,
        "legal_moves": ["call", "fold"],
    }));
    assert_eq!(agent.decide(&weak).as_deref(), Some("fold"));

    let paired_board = obs(json!({
        "hand": ["7♠", "2♦"],
        "board": ["7♣", "K♦", "4♥"],
        "pot": 3.0,
        "legal_moves": ["call", "fold"],
    }));
    assert_eq!(agent.decide(&paired_board).as_deref(), Some("call"));
}

#[test]
fn baseline_poker_never_submits_illegal_moves() {
    for seed in 0..20 {
        let result = poker_match(
            seed,
            Box::new(BaselinePoker::new()),
            Box::new(RandomLegal::new(seed)),
        );
        assert!(result.completed, "seed {seed}");
        assert!(result.turns.iter().all(|t| t.info.get("invalid").is_none()));
    }
}

#[test]
fn random_legal_is_reproducible() {
    let play = |seed| {
        let game = TicTacToe::new(TicTacToeConfig::default()).unwrap();
        let mut agents = AgentMap::new();
        agents.insert("player_x".into(), Box::new(RandomLegal::new(seed)));
        agents.insert("player_o".into(), Box::new(RandomLegal::new(seed + 1)));
        let result = GameMaster::new(game, agents, MatchConfig::default())
            .unwrap()
            .run()
            .unwrap();
        serde_json::to_string(&result).unwrap()
    };
    assert_eq!(play(8), play(8));
}

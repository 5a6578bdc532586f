use std::fs;

use gamemaster_cli::run;

struct Output {
    code: i32,
    stdout: String,
    stderr: String,
}

fn gm(args: &[&str]) -> Output {
    let mut out: Vec<u8> = Vec::new();
    let mut err: Vec<u8> = Vec::new();
    let argv = std::iter::once("gamemaster").chain(args.iter().copied());
    let code = run(argv, &mut out, &mut err);
    Output {
        code,
        stdout: String::from_utf8_lossy(&out).into_owned(),
        stderr: String::from_utf8_lossy(&err).into_owned(),
    }
}

#[test]
fn help_lists_expected_commands() {
    let res = gm(&["--help"]);
    assert_eq!(res.code, 0);
    for cmd in ["play", "sim", "replay", "rank", "practice", "cfg", "rng"] {
        assert!(
            res.stdout.contains(cmd),
            "help should list subcommand `{}`",
            cmd
        );
    }
}

#[test]
fn unknown_command_prints_usage_and_fails() {
    let res = gm(&["deal"]);
    assert_eq!(res.code, 2);
    assert!(res.stderr.contains("Usage: gamemaster <command> [options]"));
    assert!(res.stderr.contains("  practice"));
}

#[test]
fn rank_prints_category_and_tiebreak() {
    let res = gm(&["rank", "--cards", "K♠ K♦ 9♣ 9♥ 9♠ 2♦ 3♣"]);
    assert_eq!(res.code, 0, "stderr: {}", res.stderr);
    assert!(res.stdout.contains("Category: Full House"));
    assert!(res.stdout.contains("Tiebreak: [9, 13]"));
}

#[test]
fn rank_rejects_wrong_card_count() {
    let res = gm(&["rank", "--cards", "A♠ K♠ Q♠ J♠"]);
    assert_eq!(res.code, 2);
    assert!(res.stderr.contains("Error: Invalid input"));
}

#[test]
fn play_tictactoe_first_legal_agents_x_wins() {
    let res = gm(&["play", "--game", "tictactoe", "--agents", "first"]);
    assert_eq!(res.code, 0, "stderr: {}", res.stderr);
    assert!(res.stdout.contains("Seats: player_x=FirstLegal, player_o=FirstLegal"));
    assert!(res.stdout.contains("Completed: yes after 7 turns"));
    assert!(res.stdout.contains("Winner: player_x"));
}

#[test]
fn play_is_reproducible_with_a_seed() {
    let a = gm(&["play", "--game", "poker", "--seed", "7"]);
    let b = gm(&["play", "--game", "poker", "--seed", "7"]);
    assert_eq!(a.code, 0, "stderr: {}", a.stderr);
    assert!(a.stdout.contains("Game: poker (seed 7)"));
    assert_eq!(a.stdout, b.stdout);
}

#[test]
fn play_blackjack_table_size_follows_players_flag() {
    let res = gm(&["play", "--game", "blackjack", "--players", "3", "--seed", "1"]);
    assert_eq!(res.code, 0, "stderr: {}", res.stderr);
    assert!(res.stdout.contains("player_3=ThresholdBlackjack"));
    assert!(res.stdout.contains("Completed: yes"));
}

#[test]
fn play_stops_at_turn_limit_without_winner() {
    let res = gm(&[
        "play",
        "--game",
        "tictactoe",
        "--agents",
        "first",
        "--max-turns",
        "1",
    ]);
    assert_eq!(res.code, 0, "stderr: {}", res.stderr);
    assert!(res.stdout.contains("Completed: no"));
    assert!(res.stdout.contains("Winner: none\n"));
}

#[test]
fn play_rejects_more_agents_than_seats() {
    let res = gm(&["play", "--game", "poker", "--agents", "first,first,first"]);
    assert_eq!(res.code, 2);
    assert!(res.stderr.contains("3 agents given for 2 seats"));
}

#[test]
fn players_flag_is_rejected_for_two_seat_games() {
    let res = gm(&["play", "--game", "poker", "--players", "3"]);
    assert_eq!(res.code, 2);
    assert!(res.stderr.contains("--players only applies to blackjack"));
    assert!(res.stdout.is_empty());

    let res = gm(&["sim", "--game", "tictactoe", "--matches", "2", "--players", "2"]);
    assert_eq!(res.code, 2);
    assert!(res.stderr.contains("tictactoe always seats two"));
}

#[test]
fn play_rejects_unknown_agent_kind() {
    let res = gm(&["play", "--game", "poker", "--agents", "oracle"]);
    assert_eq!(res.code, 2);
    assert!(res.stderr.contains("Unknown agent kind: oracle"));
}

#[test]
fn sim_counts_wins_per_seat() {
    let res = gm(&[
        "sim",
        "--game",
        "tictactoe",
        "--matches",
        "3",
        "--agents",
        "first",
        "--seed",
        "10",
    ]);
    assert_eq!(res.code, 0, "stderr: {}", res.stderr);
    assert!(res.stdout.contains("Simulated 3 tictactoe matches (seeds 10..=12)"));
    assert!(res.stdout.contains("player_x: 3 wins, mean score +1.00"));
    assert!(res.stdout.contains("player_o: 0 wins, mean score -1.00"));
    assert!(res.stdout.contains("ties: 0"));
}

#[test]
fn sim_output_can_be_replayed() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("runs").join("poker.jsonl");
    let path_str = path.to_string_lossy().into_owned();

    let res = gm(&[
        "sim", "--game", "poker", "--matches", "2", "--seed", "5", "--output", &path_str,
    ]);
    assert_eq!(res.code, 0, "stderr: {}", res.stderr);
    assert!(res.stdout.contains("Wrote 2 records"));

    let text = fs::read_to_string(&path).unwrap();
    assert_eq!(text.lines().count(), 2);
    assert!(!text.contains('\r'));

    let replay = gm(&["replay", "--input", &path_str]);
    assert_eq!(replay.code, 0, "stderr: {}", replay.stderr);
    assert!(replay.stdout.contains("(poker, seed 5,"));
    assert!(replay.stdout.contains("(poker, seed 6,"));
    assert!(replay.stdout.contains("Replayed 2 matches"));
}

#[test]
fn replay_skips_unreadable_lines() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("mixed.jsonl");
    let path_str = path.to_string_lossy().into_owned();
    let res = gm(&[
        "sim", "--game", "tictactoe", "--matches", "1", "--output", &path_str,
    ]);
    assert_eq!(res.code, 0, "stderr: {}", res.stderr);
    let mut text = fs::read_to_string(&path).unwrap();
    text.push_str("{not json}\n");
    fs::write(&path, text).unwrap();

    let replay = gm(&["replay", "--input", &path_str]);
    assert_eq!(replay.code, 0, "stderr: {}", replay.stderr);
    assert!(replay.stdout.contains("Replayed 1 matches"));
    assert!(replay.stdout.contains("Skipped 1 unreadable lines"));
    assert!(replay.stderr.contains("WARNING: skipped line 2:"));
}

#[test]
fn replay_fails_when_nothing_is_readable() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("garbage.jsonl");
    fs::write(&path, "hello\nworld\n").unwrap();
    let res = gm(&["replay", "--input", &path.to_string_lossy()]);
    assert_eq!(res.code, 2);
    assert!(res.stderr.contains("no readable matches"));
}

#[test]
fn replay_missing_file_fails() {
    let res = gm(&["replay", "--input", "no/such/file.jsonl"]);
    assert_eq!(res.code, 2);
    assert!(res.stderr.contains("Failed to read"));
}

#[test]
fn rng_sample_is_deterministic() {
    let a = gm(&["rng", "--seed", "42"]);
    let b = gm(&["rng", "--seed", "42"]);
    assert_eq!(a.code, 0);
    assert!(a.stdout.contains("Seed: 42"));
    assert_eq!(a.stdout, b.stdout);
    assert_ne!(a.stdout, gm(&["rng", "--seed", "43"]).stdout);
}

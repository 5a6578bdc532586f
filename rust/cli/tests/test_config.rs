use std::path::Path;

use gamemaster_cli::run;
use serde_json::Value;
use serial_test::serial;

const VARS: [&str; 3] = [
    "GAMEMASTER_CONFIG",
    "GAMEMASTER_SEED",
    "GAMEMASTER_MAX_TURNS",
];

/// Clears the gamemaster variables for the duration of a test.
struct CleanEnv;

impl CleanEnv {
    fn new() -> Self {
        clear_vars();
        CleanEnv
    }

    fn set(&self, key: &str, value: &str) {
        unsafe {
            std::env::set_var(key, value);
        }
    }

    fn config_file(&self, dir: &Path, body: &str) {
        let path = dir.join("gamemaster.toml");
        std::fs::write(&path, body).unwrap();
        self.set("GAMEMASTER_CONFIG", &path.to_string_lossy());
    }
}

impl Drop for CleanEnv {
    fn drop(&mut self) {
        clear_vars();
    }
}

fn clear_vars() {
    for key in VARS {
        unsafe {
            std::env::remove_var(key);
        }
    }
}

fn gm(args: &[&str]) -> (i32, String, String) {
    let mut out: Vec<u8> = Vec::new();
    let mut err: Vec<u8> = Vec::new();
    let argv = std::iter::once("gamemaster").chain(args.iter().copied());
    let code = run(argv, &mut out, &mut err);
    (
        code,
        String::from_utf8_lossy(&out).into_owned(),
        String::from_utf8_lossy(&err).into_owned(),
    )
}

fn cfg_json() -> Value {
    let (code, stdout, stderr) = gm(&["cfg"]);
    assert_eq!(code, 0, "stderr: {}", stderr);
    serde_json::from_str(&stdout).expect("cfg prints JSON")
}

#[test]
#[serial]
fn cfg_shows_defaults() {
    let _env = CleanEnv::new();
    let json = cfg_json();
    assert!(json["seed"]["value"].is_null());
    assert_eq!(json["seed"]["source"], "default");
    assert_eq!(json["max_turns"]["value"], 200);
    assert_eq!(json["blackjack"]["value"]["push"], 0.1);
    assert_eq!(json["poker"]["value"]["invalid"], -0.5);
    assert_eq!(json["poker"]["source"], "default");
}

#[test]
#[serial]
fn file_values_are_marked_as_file() {
    let env = CleanEnv::new();
    let dir = tempfile::tempdir().unwrap();
    env.config_file(
        dir.path(),
        "seed = 456\nmax_turns = 50\n\n[poker]\nfold = -2.0\n",
    );
    let json = cfg_json();
    assert_eq!(json["seed"]["value"], 456);
    assert_eq!(json["seed"]["source"], "file");
    assert_eq!(json["max_turns"]["value"], 50);
    assert_eq!(json["poker"]["value"]["fold"], -2.0);
    assert_eq!(json["poker"]["value"]["bet_amount"], 1.0);
    assert_eq!(json["poker"]["source"], "file");
    assert_eq!(json["blackjack"]["source"], "default");
}

#[test]
#[serial]
fn env_overrides_file() {
    let env = CleanEnv::new();
    let dir = tempfile::tempdir().unwrap();
    env.config_file(dir.path(), "seed = 456\nmax_turns = 50\n");
    env.set("GAMEMASTER_SEED", "9");
    let json = cfg_json();
    assert_eq!(json["seed"]["value"], 9);
    assert_eq!(json["seed"]["source"], "env");
    assert_eq!(json["max_turns"]["source"], "file");
}

#[test]
#[serial]
fn zero_turn_ceiling_is_rejected() {
    let env = CleanEnv::new();
    env.set("GAMEMASTER_MAX_TURNS", "0");
    let (code, _, stderr) = gm(&["cfg"]);
    assert_eq!(code, 2);
    assert!(stderr.contains("max_turns must be >=1"), "stderr: {}", stderr);
}

#[test]
#[serial]
fn invalid_configuration_is_reported_once() {
    let env = CleanEnv::new();
    env.set("GAMEMASTER_MAX_TURNS", "0");
    for args in [&["cfg"][..], &["play", "--game", "tictactoe"][..]] {
        let (code, _, stderr) = gm(args);
        assert_eq!(code, 2);
        assert_eq!(
            stderr.trim(),
            "Error: Invalid configuration: max_turns must be >=1",
            "args: {:?}",
            args
        );
    }
}

#[test]
#[serial]
fn non_numeric_seed_is_rejected() {
    let env = CleanEnv::new();
    env.set("GAMEMASTER_SEED", "lucky");
    let (code, _, stderr) = gm(&["play", "--game", "poker"]);
    assert_eq!(code, 2);
    assert!(stderr.contains("Invalid seed: lucky"));
}

#[test]
#[serial]
fn positive_penalty_in_file_is_rejected() {
    let env = CleanEnv::new();
    let dir = tempfile::tempdir().unwrap();
    env.config_file(dir.path(), "[blackjack]\nbust = 1.5\n");
    let (code, _, stderr) = gm(&["cfg"]);
    assert_eq!(code, 2);
    assert!(stderr.contains("blackjack.bust must be <=0"));
}

#[test]
#[serial]
fn unknown_keys_are_rejected() {
    let env = CleanEnv::new();
    let dir = tempfile::tempdir().unwrap();
    env.config_file(dir.path(), "level = 3\n");
    let (code, _, stderr) = gm(&["cfg"]);
    assert_eq!(code, 2);
    assert!(stderr.contains("cannot parse config file"));
}

#[test]
#[serial]
fn configured_seed_drives_play() {
    let env = CleanEnv::new();
    env.set("GAMEMASTER_SEED", "7");
    let (code, from_env, _) = gm(&["play", "--game", "poker"]);
    assert_eq!(code, 0);
    assert!(from_env.contains("Game: poker (seed 7)"));

    let (_, from_flag, _) = gm(&["play", "--game", "poker", "--seed", "7"]);
    assert_eq!(from_env, from_flag);
}

#[test]
#[serial]
fn configured_turn_ceiling_applies_to_play() {
    let env = CleanEnv::new();
    env.set("GAMEMASTER_MAX_TURNS", "2");
    let (code, stdout, _) = gm(&["play", "--game", "tictactoe", "--agents", "first"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("Completed: no, stopped at the turn limit after 2 turns"));

    let (_, flag_wins, _) = gm(&[
        "play",
        "--game",
        "tictactoe",
        "--agents",
        "first",
        "--max-turns",
        "9",
    ]);
    assert!(flag_wins.contains("Winner: player_x"));
}

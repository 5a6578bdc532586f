//! Random number generator sample command.
//!
//! Every game deals from a ChaCha20 stream seeded with `seed_from_u64`. This
//! prints the first values of that stream so two machines can confirm they
//! agree on a seed.

use crate::error::CliError;
use rand::{RngCore, SeedableRng};
use std::io::Write;

pub const SAMPLE_LEN: usize = 5;

/// Without a seed a random one is drawn and printed so the run can be
/// repeated.
pub fn handle_rng_command(seed: Option<u64>, out: &mut dyn Write) -> Result<(), CliError> {
    let s = seed.unwrap_or_else(rand::random);
    let mut rng = rand_chacha::ChaCha20Rng::seed_from_u64(s);
    let vals: Vec<u64> = (0..SAMPLE_LEN).map(|_| rng.next_u64()).collect();
    writeln!(out, "Seed: {}", s)?;
    writeln!(out, "RNG sample: {:?}", vals)?;
    Ok(())
}

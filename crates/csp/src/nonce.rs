//! Nonce generation for inline-content allowances.

use rand::Rng;

/// Length of generated nonce values.
pub const NONCE_LEN: usize = 16;

/// Source of nonce values for the policy presets.
///
/// Injected so callers control the randomness; tests substitute a
/// deterministic implementation.
pub trait NonceGenerator {
    /// Produce a fresh nonce value.
    fn generate(&self) -> String;
}

/// Default generator: uppercase letters drawn from the thread-local CSPRNG.
#[derive(Clone, Copy, Debug, Default)]
pub struct RandomNonce;

impl NonceGenerator for RandomNonce {
    fn generate(&self) -> String {
        let mut rng = rand::thread_rng();
        (0..NONCE_LEN)
            .map(|_| rng.gen_range(b'A'..=b'Z') as char)
            .collect()
    }
}

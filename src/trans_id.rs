//! Transaction identifiers
//!
//! Some endpoints require a per-call token of the form
//! `web!<hex>!<millis>`, where `<hex>` is a random float in `[0, 2^32)`
//! rendered in lowercase hexadecimal the way a browser's
//! `Number.prototype.toString(16)` would, and `<millis>` is the current
//! Unix time in milliseconds.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use regex::Regex;
use std::sync::{Mutex, OnceLock};

use crate::constants::TRANS_ID_PREFIX;
use crate::time::{Clock, SystemClock};

/// Source of transaction identifiers
pub trait TransIdGenerator: Send + Sync {
    fn trans_id(&self) -> String;
}

/// Generator driven by an injected random source and clock
///
/// Seed the RNG and fix the clock to get a reproducible sequence.
#[derive(Debug)]
pub struct RandomTransIdGenerator<R, C> {
    rng: Mutex<R>,
    clock: C,
}

impl RandomTransIdGenerator<StdRng, SystemClock> {
    /// Entropy-seeded generator on the system clock
    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy(), SystemClock::new())
    }
}

impl Default for RandomTransIdGenerator<StdRng, SystemClock> {
    fn default() -> Self {
        Self::from_entropy()
    }
}

impl<R, C> RandomTransIdGenerator<R, C>
where
    R: Rng + Send,
    C: Clock,
{
    pub fn new(rng: R, clock: C) -> Self {
        Self {
            rng: Mutex::new(rng),
            clock,
        }
    }

    fn next_float(&self) -> f64 {
        // Poisoning leaves the RNG state intact.
        let mut rng = self.rng.lock().unwrap_or_else(|e| e.into_inner());
        rng.gen::<f64>() * 4_294_967_296.0
    }
}

impl<R, C> TransIdGenerator for RandomTransIdGenerator<R, C>
where
    R: Rng + Send,
    C: Clock,
{
    fn trans_id(&self) -> String {
        format_trans_id(self.next_float(), self.clock.now_epoch_millis())
    }
}

/// Assemble a transaction id from its random component and timestamp
pub fn format_trans_id(random: f64, epoch_millis: i64) -> String {
    format!(
        "{}!{}!{}",
        TRANS_ID_PREFIX,
        float_to_hex(random).to_lowercase(),
        epoch_millis
    )
}

/// Render a non-negative finite float in base 16
///
/// The integer part is always present (`0` for values below one); the
/// fractional part follows a `.` only when non-zero. Every finite `f64`
/// fraction terminates in base 16, the digit cap only guards the loop.
pub fn float_to_hex(value: f64) -> String {
    const MAX_FRACTION_DIGITS: usize = 20;

    if !value.is_finite() || value <= 0.0 {
        return "0".to_string();
    }

    let integer = value.trunc();
    let mut out = format!("{:X}", integer as u64);

    let mut fraction = value - integer;
    if fraction > 0.0 {
        out.push('.');
        let mut digits = 0;
        while fraction > 0.0 && digits < MAX_FRACTION_DIGITS {
            fraction *= 16.0;
            let digit = fraction.trunc();
            fraction -= digit;
            // digit is in 0..16 by construction
            out.push(char::from_digit(digit as u32, 16).unwrap_or('0').to_ascii_uppercase());
            digits += 1;
        }
    }

    out
}

/// Check that a string has the `prefix!hex!millis` transaction id shape
pub fn is_valid_trans_id(trans_id: &str) -> bool {
    static TRANS_ID_REGEX: OnceLock<Regex> = OnceLock::new();
    let regex = TRANS_ID_REGEX.get_or_init(|| {
        Regex::new(r"^[A-Za-z]+![0-9a-f]+(\.[0-9a-f]+)?![0-9]+$")
            .expect("transaction id regex is valid")
    });

    regex.is_match(trans_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::FixedClock;
    use std::collections::HashSet;

    fn seeded(seed: u64) -> RandomTransIdGenerator<StdRng, FixedClock> {
        RandomTransIdGenerator::new(
            StdRng::seed_from_u64(seed),
            FixedClock::from_epoch_millis(1_705_316_400_123).unwrap(),
        )
    }

    #[test]
    fn test_float_to_hex_integers() {
        assert_eq!(float_to_hex(0.0), "0");
        assert_eq!(float_to_hex(10.0), "A");
        assert_eq!(float_to_hex(255.0), "FF");
        assert_eq!(float_to_hex(4_294_967_295.0), "FFFFFFFF");
    }

    #[test]
    fn test_float_to_hex_fractions() {
        assert_eq!(float_to_hex(0.5), "0.8");
        assert_eq!(float_to_hex(255.5), "FF.8");
        assert_eq!(float_to_hex(16.0625), "10.1");
        assert_eq!(float_to_hex(1.75), "1.C");
    }

    #[test]
    fn test_float_to_hex_non_finite() {
        assert_eq!(float_to_hex(f64::NAN), "0");
        assert_eq!(float_to_hex(f64::INFINITY), "0");
        assert_eq!(float_to_hex(-3.0), "0");
    }

    #[test]
    fn test_format_trans_id() {
        assert_eq!(
            format_trans_id(3_735_928_559.5, 1_705_316_400_123),
            "web!deadbeef.8!1705316400123"
        );
    }

    #[test]
    fn test_generated_shape() {
        let generator = seeded(7);
        let trans_id = generator.trans_id();

        assert!(is_valid_trans_id(&trans_id), "bad shape: {}", trans_id);
        let parts: Vec<&str> = trans_id.split('!').collect();
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0], "web");
        assert_eq!(parts[2], "1705316400123");
        assert_eq!(parts[1], parts[1].to_lowercase());
    }

    #[test]
    fn test_same_seed_same_sequence() {
        let a = seeded(42);
        let b = seeded(42);

        for _ in 0..5 {
            assert_eq!(a.trans_id(), b.trans_id());
        }
    }

    #[test]
    fn test_distinct_within_same_millisecond() {
        let generator = seeded(1);
        let ids: HashSet<String> = (0..200).map(|_| generator.trans_id()).collect();
        assert_eq!(ids.len(), 200);
    }

    #[test]
    fn test_entropy_generator_uses_system_clock() {
        let trans_id = RandomTransIdGenerator::from_entropy().trans_id();
        assert!(is_valid_trans_id(&trans_id));
    }

    #[test]
    fn test_is_valid_trans_id() {
        assert!(is_valid_trans_id("web!1a2b3c.f!1705316400123"));
        assert!(is_valid_trans_id("web!ff!1"));
        assert!(!is_valid_trans_id("web!FF!1"));
        assert!(!is_valid_trans_id("web!ff"));
        assert!(!is_valid_trans_id("web!ff!12a"));
        assert!(!is_valid_trans_id(""));
    }
}

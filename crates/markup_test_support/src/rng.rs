//! Deterministic randomness for corpus-driven tests.
//!
//! Fast CI mode uses the CI defaults when `CI` is set; locally the knobs can
//! be raised through environment variables.

pub const SEED_MIX: u64 = 0x9e3779b97f4a7c15;

pub struct LcgRng {
    state: u64,
}

impl LcgRng {
    pub fn new(seed: u64) -> Self {
        let state = if seed == 0 { SEED_MIX } else { seed };
        Self { state }
    }

    pub fn next_u64(&mut self) -> u64 {
        self.state = self
            .state
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        self.state
    }

    pub fn gen_range_usize(&mut self, start: usize, end: usize) -> usize {
        assert!(start < end, "invalid range: {start}..{end}");
        let span = (end - start) as u64;
        ((self.next_u64() >> 16) % span) as usize + start
    }

    pub fn gen_index(&mut self, len: usize) -> usize {
        assert!(len > 0, "invalid length: {len}");
        self.gen_range_usize(0, len)
    }

    pub fn gen_ratio(&mut self, numerator: u32, denominator: u32) -> bool {
        assert!(denominator > 0, "invalid denominator: {denominator}");
        (self.next_u64() >> 16) % u64::from(denominator) < u64::from(numerator)
    }

    pub fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        &items[self.gen_index(items.len())]
    }
}

/// A positive count from `var`, falling back to `ci_default` under CI and
/// `local_default` otherwise.
pub fn env_knob(var: &str, ci_default: usize, local_default: usize) -> usize {
    if let Ok(value) = std::env::var(var)
        && let Ok(parsed) = value.parse::<usize>()
        && parsed > 0
    {
        return parsed;
    }
    if std::env::var("CI").is_ok() {
        ci_default
    } else {
        local_default
    }
}

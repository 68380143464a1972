use std::time::{SystemTime, UNIX_EPOCH};

/// Source of the two kinds of draws the pet needs.
///
/// The pet owns exactly one of these; strategies borrow it per call.
pub trait RandomSource {
    /// Uniform value in `[0, 1)`.
    fn next_unit_f32(&mut self) -> f32;

    /// Uniform value in `[0, bound)`. A zero bound yields 0.
    fn next_bounded(&mut self, bound: u32) -> u32;
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn next_unit_f32(&mut self) -> f32 {
        (**self).next_unit_f32()
    }

    fn next_bounded(&mut self, bound: u32) -> u32 {
        (**self).next_bounded(bound)
    }
}

impl<R: RandomSource + ?Sized> RandomSource for Box<R> {
    fn next_unit_f32(&mut self) -> f32 {
        (**self).next_unit_f32()
    }

    fn next_bounded(&mut self, bound: u32) -> u32 {
        (**self).next_bounded(bound)
    }
}

#[derive(Clone, Debug)]
pub struct SplitMix64 {
    seed: u64,
    event_counter: u64,
}

impl SplitMix64 {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            event_counter: 0,
        }
    }

    /// Seeds from the wall clock.
    pub fn from_entropy() -> Self {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(0xC0FFEE);
        Self::new(nanos ^ (std::process::id() as u64).rotate_left(32))
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    fn next_u64(&mut self) -> u64 {
        // Counter-based SplitMix64: deterministic and cheap.
        let mut z = self
            .seed
            .wrapping_add(self.event_counter.wrapping_mul(0x9E3779B97F4A7C15));
        self.event_counter = self.event_counter.wrapping_add(1);

        z = z.wrapping_add(0x9E3779B97F4A7C15);
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58476D1CE4E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D049BB133111EB);
        z ^ (z >> 31)
    }
}

impl RandomSource for SplitMix64 {
    fn next_unit_f32(&mut self) -> f32 {
        let v = self.next_u64() >> 40; // 24 bits
        (v as f32) / ((1u64 << 24) as f32)
    }

    fn next_bounded(&mut self, bound: u32) -> u32 {
        if bound == 0 {
            return 0;
        }
        // multiply-shift on the high 32 bits
        let hi = self.next_u64() >> 32;
        ((hi * bound as u64) >> 32) as u32
    }
}

/// Replays fixed values so tests can pin every draw.
///
/// `next_unit_f32` always returns the configured float. `next_bounded`
/// walks the int sequence round-robin and yields `abs(value) % bound`.
#[derive(Clone, Debug)]
pub struct ScriptedRandom {
    float: f32,
    ints: Vec<i32>,
    index: usize,
}

impl Default for ScriptedRandom {
    fn default() -> Self {
        Self {
            float: 0.5,
            ints: vec![0],
            index: 0,
        }
    }
}

impl ScriptedRandom {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_float(mut self, value: f32) -> Self {
        self.set_float(value);
        self
    }

    pub fn with_ints(mut self, values: &[i32]) -> Self {
        self.set_ints(values);
        self
    }

    pub fn set_float(&mut self, value: f32) {
        self.float = value;
    }

    /// Replaces the int sequence and rewinds to its start. An empty slice
    /// falls back to `[0]`.
    pub fn set_ints(&mut self, values: &[i32]) {
        self.ints = if values.is_empty() {
            vec![0]
        } else {
            values.to_vec()
        };
        self.index = 0;
    }
}

impl RandomSource for ScriptedRandom {
    fn next_unit_f32(&mut self) -> f32 {
        self.float
    }

    fn next_bounded(&mut self, bound: u32) -> u32 {
        let value = self.ints[self.index];
        self.index = (self.index + 1) % self.ints.len();
        if bound == 0 {
            return 0;
        }
        value.unsigned_abs() % bound
    }
}

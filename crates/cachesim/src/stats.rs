use serde::Serialize;

/// Result of classifying one access.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Hit,
    Miss,
}

impl Outcome {
    pub fn is_hit(self) -> bool {
        self == Outcome::Hit
    }

    /// Memory references caused by the access: 0 for a hit, 1 for a miss.
    pub fn memory_references(self) -> u32 {
        match self {
            Outcome::Hit => 0,
            Outcome::Miss => 1,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Outcome::Hit => "hit",
            Outcome::Miss => "miss",
        }
    }
}

/// Hit and miss counters for one run.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
pub struct Statistics {
    pub hits: u64,
    pub misses: u64,
}

/// Point-in-time snapshot of [`Statistics`] with the derived ratios.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Summary {
    pub hits: u64,
    pub misses: u64,
    pub accesses: u64,
    pub hit_ratio: f64,
    pub miss_ratio: f64,
}

impl Statistics {
    pub fn record(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Hit => self.hits += 1,
            Outcome::Miss => self.misses += 1,
        }
    }

    pub fn total(&self) -> u64 {
        self.hits + self.misses
    }

    /// Fraction of accesses that hit; 0.0 when nothing was accessed.
    pub fn hit_ratio(&self) -> f64 {
        ratio(self.hits, self.total())
    }

    /// Fraction of accesses that missed; 0.0 when nothing was accessed.
    pub fn miss_ratio(&self) -> f64 {
        ratio(self.misses, self.total())
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn summary(&self) -> Summary {
        Summary {
            hits: self.hits,
            misses: self.misses,
            accesses: self.total(),
            hit_ratio: self.hit_ratio(),
            miss_ratio: self.miss_ratio(),
        }
    }
}

fn ratio(part: u64, total: u64) -> f64 {
    if total > 0 {
        part as f64 / total as f64
    } else {
        0.0
    }
}

//! Persistent win counts.
//!
//! `WinStats` maps each winning side to a count. The engine only talks to a
//! `StatsStore`; `JsonFileStore` keeps the counts in a small JSON file and
//! `MemoryStore` keeps them in memory for tests and embedders.
//!
//! ```
//! use kingdoms_engine::rules::Outcome;
//! use kingdoms_engine::stats::{MemoryStore, StatsStore};
//!
//! let mut store = MemoryStore::default();
//! let mut stats = store.load().unwrap();
//! stats.record(Outcome::Spy);
//! store.save(&stats).unwrap();
//!
//! assert_eq!(store.load().unwrap().get(Outcome::Spy), 1);
//! ```

mod store;

pub use store::{JsonFileStore, MemoryStore, StatsError, StatsStore};

use serde::{Deserialize, Serialize};

use crate::rules::Outcome;

/// Games won per side. Serialized with the keys `loyal`, `rebel`, `spy`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WinStats {
    pub loyal: u64,
    pub rebel: u64,
    pub spy: u64,
}

impl WinStats {
    /// Count one more win for `outcome`.
    pub fn record(&mut self, outcome: Outcome) {
        *self.slot(outcome) += 1;
    }

    #[must_use]
    pub fn get(&self, outcome: Outcome) -> u64 {
        match outcome {
            Outcome::LordLoyal => self.loyal,
            Outcome::Rebel => self.rebel,
            Outcome::Spy => self.spy,
        }
    }

    /// Games recorded across all sides.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.loyal + self.rebel + self.spy
    }

    fn slot(&mut self, outcome: Outcome) -> &mut u64 {
        match outcome {
            Outcome::LordLoyal => &mut self.loyal,
            Outcome::Rebel => &mut self.rebel,
            Outcome::Spy => &mut self.spy,
        }
    }
}

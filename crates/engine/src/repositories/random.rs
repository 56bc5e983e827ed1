//! Random number generation wrapper.
//!
//! Every draw the generator makes goes through [`RandomService`], so swapping
//! the [`RandomPort`] is enough to make a whole hoard deterministic.

use std::sync::Arc;

use hoardgen_domain::{Die, RangeRow, RangeTable};

use crate::infrastructure::ports::RandomPort;

/// Random service wrapper for use cases.
#[derive(Clone)]
pub struct RandomService {
    random: Arc<dyn RandomPort>,
}

impl RandomService {
    pub fn new(random: Arc<dyn RandomPort>) -> Self {
        Self { random }
    }

    pub fn gen_range(&self, min: u32, max: u32) -> u32 {
        self.random.gen_range(min, max)
    }

    /// Roll a die set, one port draw per physical die.
    pub fn roll(&self, die: &Die) -> u32 {
        die.roll_with(|faces| self.random.gen_range(1, faces))
    }

    /// Roll the table's die and return the roll with the row it lands on.
    pub fn roll_on<'t>(&self, table: &'t RangeTable) -> (u32, Option<&'t RangeRow>) {
        let roll = self.random.gen_range(1, table.max_roll());
        (roll, table.lookup(roll).ok())
    }

    /// Pick one element uniformly; `None` for an empty slice.
    ///
    /// A single candidate is returned without drawing.
    pub fn choose<'a, T>(&self, items: &'a [T]) -> Option<&'a T> {
        if items.len() <= 1 {
            return items.first();
        }
        let last = u32::try_from(items.len() - 1).unwrap_or(u32::MAX);
        items.get(self.random.gen_range(0, last) as usize)
    }
}

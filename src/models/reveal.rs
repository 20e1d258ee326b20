//! Stagger bookkeeping for the card reveal animation.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Per-card reveal delay, fixed once at setup
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct StaggerIndex(u32);

impl StaggerIndex {
    /// Delay for the card at zero-based `position`, `interval_ms` apart
    pub fn for_position(position: usize, interval_ms: u32) -> Self {
        let position = u32::try_from(position).unwrap_or(u32::MAX);
        Self(position.saturating_mul(interval_ms))
    }

    pub fn delay_ms(self) -> u32 {
        self.0
    }
}

impl fmt::Display for StaggerIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stagger_is_position_times_interval() {
        assert_eq!(StaggerIndex::for_position(0, 80).delay_ms(), 0);
        assert_eq!(StaggerIndex::for_position(1, 80).delay_ms(), 80);
        assert_eq!(StaggerIndex::for_position(7, 80).delay_ms(), 560);
        assert_eq!(StaggerIndex::for_position(3, 80).to_string(), "240");
    }

    #[test]
    fn test_stagger_saturates() {
        assert_eq!(StaggerIndex::for_position(usize::MAX, 80).delay_ms(), u32::MAX);
    }
}

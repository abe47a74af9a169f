//! Badge tiers
//!
//! A derived display tier computed from a student's accumulated points.
//! Never persisted; recomputed wherever it is shown.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Badge {
    Newbie,
    Bronze,
    Silver,
    Gold,
}

impl Badge {
    pub fn for_points(points: u32) -> Self {
        if points >= 300 {
            Badge::Gold
        } else if points >= 150 {
            Badge::Silver
        } else if points >= 50 {
            Badge::Bronze
        } else {
            Badge::Newbie
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Badge::Newbie => "Newbie",
            Badge::Bronze => "Bronze",
            Badge::Silver => "Silver",
            Badge::Gold => "Gold",
        }
    }

    /// Minimum points to hold this tier
    pub fn min_points(&self) -> u32 {
        match self {
            Badge::Newbie => 0,
            Badge::Bronze => 50,
            Badge::Silver => 150,
            Badge::Gold => 300,
        }
    }

    /// The next tier up, if any
    pub fn next(&self) -> Option<Badge> {
        match self {
            Badge::Newbie => Some(Badge::Bronze),
            Badge::Bronze => Some(Badge::Silver),
            Badge::Silver => Some(Badge::Gold),
            Badge::Gold => None,
        }
    }
}

impl std::fmt::Display for Badge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_thresholds() {
        assert_eq!(Badge::for_points(0), Badge::Newbie);
        assert_eq!(Badge::for_points(49), Badge::Newbie);
        assert_eq!(Badge::for_points(50), Badge::Bronze);
        assert_eq!(Badge::for_points(149), Badge::Bronze);
        assert_eq!(Badge::for_points(150), Badge::Silver);
        assert_eq!(Badge::for_points(299), Badge::Silver);
        assert_eq!(Badge::for_points(300), Badge::Gold);
        assert_eq!(Badge::for_points(1000), Badge::Gold);
    }

    #[test]
    fn test_next_tier_chain() {
        assert_eq!(Badge::Newbie.next(), Some(Badge::Bronze));
        assert_eq!(Badge::Silver.next(), Some(Badge::Gold));
        assert_eq!(Badge::Gold.next(), None);
    }

    #[test]
    fn test_tier_ordering() {
        assert!(Badge::Newbie < Badge::Bronze);
        assert!(Badge::Bronze < Badge::Silver);
        assert!(Badge::Silver < Badge::Gold);
    }
}

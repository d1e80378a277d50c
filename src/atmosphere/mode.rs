//! The day/night flag.

use serde::{Deserialize, Serialize};

/// Two-state scene mode. Everything mode-dependent is derived from this flag.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DayNight {
    #[default]
    Day,
    Night,
}

impl DayNight {
    pub fn toggled(self) -> Self {
        match self {
            DayNight::Day => DayNight::Night,
            DayNight::Night => DayNight::Day,
        }
    }

    #[inline]
    pub fn is_night(self) -> bool {
        self == DayNight::Night
    }

    pub fn from_night_flag(night: bool) -> Self {
        if night { DayNight::Night } else { DayNight::Day }
    }

    pub fn name(self) -> &'static str {
        match self {
            DayNight::Day => "day",
            DayNight::Night => "night",
        }
    }

    /// Slot index for per-mode caches.
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }
}

impl std::fmt::Display for DayNight {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_involution() {
        for mode in [DayNight::Day, DayNight::Night] {
            assert_eq!(mode.toggled().toggled(), mode);
            assert_ne!(mode.toggled(), mode);
        }
    }

    #[test]
    fn test_from_flag() {
        assert_eq!(DayNight::from_night_flag(true), DayNight::Night);
        assert!(!DayNight::from_night_flag(false).is_night());
    }
}

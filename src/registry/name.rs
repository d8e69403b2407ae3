//! Symbolic resource names.

use std::fmt::Debug;
use std::hash::Hash;

/// A closed set of symbolic names, usually a fieldless enum.
///
/// Every valid name is known at compile time through [`ResourceName::ALL`],
/// so string lookups can be rejected before any loader runs.
pub trait ResourceName: Copy + Eq + Hash + Debug + Send + Sync + 'static {
    /// Every name in the set.
    const ALL: &'static [Self];

    /// Stable identifier used in logs, metrics labels and string lookups.
    fn as_str(&self) -> &'static str;

    /// Resolve a string identifier to a name.
    fn parse(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|n| n.as_str() == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    enum Asset {
        Sprite,
        Sound,
    }

    impl ResourceName for Asset {
        const ALL: &'static [Self] = &[Asset::Sprite, Asset::Sound];

        fn as_str(&self) -> &'static str {
            match self {
                Asset::Sprite => "sprite",
                Asset::Sound => "sound",
            }
        }
    }

    #[test]
    fn test_parse_known_and_unknown() {
        assert_eq!(Asset::parse("sound"), Some(Asset::Sound));
        assert_eq!(Asset::parse("Sound"), None);
        assert_eq!(Asset::parse(""), None);
    }
}

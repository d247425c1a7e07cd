//! Seed points for region growing and watershed markers

use crate::geometry::Point;
use serde::{Deserialize, Serialize};

/// Class a tagged seed anchors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeedClass {
    Foreground,
    Background,
}

/// A seed coordinate, optionally tagged with the class it anchors
///
/// Region growing treats every seed as foreground; watershed manual mode
/// sorts tagged seeds into the two marker classes and treats untagged
/// seeds as foreground.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Seed {
    Untagged(Point),
    Foreground(Point),
    Background(Point),
}

impl Seed {
    /// Get the seed position.
    #[inline]
    pub fn point(&self) -> Point {
        match *self {
            Seed::Untagged(p) | Seed::Foreground(p) | Seed::Background(p) => p,
        }
    }

    /// Get the tagged class, or `None` for an untagged seed.
    #[inline]
    pub fn class(&self) -> Option<SeedClass> {
        match self {
            Seed::Untagged(_) => None,
            Seed::Foreground(_) => Some(SeedClass::Foreground),
            Seed::Background(_) => Some(SeedClass::Background),
        }
    }

    /// Class used for marker construction; untagged seeds count as foreground.
    #[inline]
    pub fn marker_class(&self) -> SeedClass {
        self.class().unwrap_or(SeedClass::Foreground)
    }
}

impl From<Point> for Seed {
    fn from(p: Point) -> Self {
        Seed::Untagged(p)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_tags() {
        let p = Point::new(1, 2);
        assert_eq!(Seed::from(p).class(), None);
        assert_eq!(Seed::from(p).marker_class(), SeedClass::Foreground);
        assert_eq!(Seed::Background(p).marker_class(), SeedClass::Background);
        assert_eq!(Seed::Background(p).point(), p);
    }
}

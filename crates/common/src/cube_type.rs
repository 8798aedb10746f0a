use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Type tag of a cube. Combos only ever join cubes of the same type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CubeType {
    Green,
    Red,
    Blue,
    Yellow,
    Magenta,
    Cyan,
    /// Anchor cubes. Never handed out by [`CubeType::random`].
    Black,
}

impl CubeType {
    /// Types a fragment cube can be dealt.
    pub const ALL: [Self; 6] = [
        Self::Green,
        Self::Red,
        Self::Blue,
        Self::Yellow,
        Self::Magenta,
        Self::Cyan,
    ];

    /// Uniform pick from [`CubeType::ALL`].
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::ALL[rng.gen_range(0..Self::ALL.len())]
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Green => "Green",
            Self::Red => "Red",
            Self::Blue => "Blue",
            Self::Yellow => "Yellow",
            Self::Magenta => "Magenta",
            Self::Cyan => "Cyan",
            Self::Black => "Black",
        }
    }

    /// Material color as RGBA.
    pub fn color(self) -> [f32; 4] {
        const ALPHA: f32 = 0.9;
        match self {
            Self::Red => [1.0, 0.0, 0.0, ALPHA],
            Self::Green => [0.0, 1.0, 0.0, ALPHA],
            Self::Blue => [0.0, 0.0, 1.0, ALPHA],
            Self::Magenta => [1.0, 0.0, 1.0, ALPHA],
            Self::Yellow => [1.0, 1.0, 0.0, ALPHA],
            Self::Cyan => [0.0, 1.0, 1.0, ALPHA],
            Self::Black => [0.0, 0.0, 0.0, ALPHA],
        }
    }
}

impl fmt::Display for CubeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::HashSet;

    #[test]
    fn random_never_deals_black() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..500 {
            assert_ne!(CubeType::random(&mut rng), CubeType::Black);
        }
    }

    #[test]
    fn random_covers_the_whole_set() {
        let mut rng = StdRng::seed_from_u64(11);
        let seen: HashSet<CubeType> = (0..1000).map(|_| CubeType::random(&mut rng)).collect();
        assert_eq!(seen.len(), CubeType::ALL.len());
    }

    #[test]
    fn same_seed_same_sequence() {
        let mut a = StdRng::seed_from_u64(42);
        let mut b = StdRng::seed_from_u64(42);
        for _ in 0..50 {
            assert_eq!(CubeType::random(&mut a), CubeType::random(&mut b));
        }
    }

    #[test]
    fn colors_are_distinct() {
        let mut colors: Vec<[u32; 4]> = CubeType::ALL
            .iter()
            .chain(std::iter::once(&CubeType::Black))
            .map(|t| t.color().map(f32::to_bits))
            .collect();
        colors.sort();
        colors.dedup();
        assert_eq!(colors.len(), 7);
    }
}

use glam::{IVec3, Vec3};
use serde::{Deserialize, Serialize};
use std::fmt;

/// An integer cell coordinate in the occupancy grid.
///
/// Equality, hashing and ordering are exact on all three components. World
/// positions must go through [`Coord::snap`] before they can be used as keys.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub struct Coord {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

/// Unit offsets of the six axis-aligned neighbors.
const NEIGHBORS_6: [(i32, i32, i32); 6] = [
    (1, 0, 0),
    (-1, 0, 0),
    (0, 1, 0),
    (0, -1, 0),
    (0, 0, 1),
    (0, 0, -1),
];

impl Coord {
    pub const ORIGIN: Self = Self::new(0, 0, 0);

    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Snap a world-space position to the nearest cell.
    pub fn snap(position: Vec3) -> Self {
        position.round().as_ivec3().into()
    }

    /// The cells sharing a face with this one. Six everywhere except on the
    /// edge of the `i32` range, where the missing side is left out.
    pub fn neighbors(self) -> impl Iterator<Item = Coord> {
        NEIGHBORS_6
            .into_iter()
            .filter_map(move |(dx, dy, dz)| self.checked_offset(dx, dy, dz))
    }

    /// `None` if any component would leave the `i32` range.
    pub fn checked_offset(self, dx: i32, dy: i32, dz: i32) -> Option<Self> {
        Some(Self::new(
            self.x.checked_add(dx)?,
            self.y.checked_add(dy)?,
            self.z.checked_add(dz)?,
        ))
    }

    /// True if `other` shares a face with this cell.
    pub fn is_adjacent(self, other: Coord) -> bool {
        let dx = self.x.abs_diff(other.x);
        let dy = self.y.abs_diff(other.y);
        let dz = self.z.abs_diff(other.z);
        // per axis, a sum of distances could overflow
        matches!((dx, dy, dz), (1, 0, 0) | (0, 1, 0) | (0, 0, 1))
    }

    /// Center of the cell in world space.
    pub fn to_world(self) -> Vec3 {
        IVec3::from(self).as_vec3()
    }
}

impl From<IVec3> for Coord {
    fn from(v: IVec3) -> Self {
        Self::new(v.x, v.y, v.z)
    }
}

impl From<Coord> for IVec3 {
    fn from(c: Coord) -> Self {
        IVec3::new(c.x, c.y, c.z)
    }
}

impl From<[i32; 3]> for Coord {
    fn from([x, y, z]: [i32; 3]) -> Self {
        Self::new(x, y, z)
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn snap_rounds_to_nearest_cell() {
        assert_eq!(Coord::snap(Vec3::new(0.9999, -1.0001, 2.49)), Coord::new(1, -1, 2));
        assert_eq!(Coord::snap(Vec3::new(-0.0000001, 3.0, -4.6)), Coord::new(0, 3, -5));
    }

    #[test]
    fn neighbors_are_six_distinct_adjacent_cells() {
        let c = Coord::new(2, -3, 7);
        let n: Vec<Coord> = c.neighbors().collect();
        let unique: HashSet<Coord> = n.iter().copied().collect();
        assert_eq!(unique.len(), 6);
        assert!(n.iter().all(|&m| c.is_adjacent(m)));
        assert!(!unique.contains(&c));
    }

    #[test]
    fn diagonal_is_not_adjacent() {
        assert!(!Coord::ORIGIN.is_adjacent(Coord::new(1, 1, 0)));
        assert!(!Coord::ORIGIN.is_adjacent(Coord::ORIGIN));
    }

    #[test]
    fn neighbors_at_range_edge() {
        let top = Coord::new(i32::MAX, 0, 0);
        let n: Vec<Coord> = top.neighbors().collect();
        assert_eq!(n.len(), 5);
        assert!(n.contains(&Coord::new(i32::MAX - 1, 0, 0)));
        assert!(!n.iter().any(|c| c.x == i32::MIN));

        let corner = Coord::new(i32::MIN, i32::MIN, i32::MAX);
        assert_eq!(corner.neighbors().count(), 3);
        assert_eq!(top.checked_offset(1, 0, 0), None);
    }

    #[test]
    fn adjacency_across_the_whole_range() {
        assert!(!Coord::new(i32::MIN, 0, 0).is_adjacent(Coord::new(i32::MAX, 0, 0)));
        assert!(Coord::new(i32::MAX, 0, 0).is_adjacent(Coord::new(i32::MAX - 1, 0, 0)));
        assert!(!Coord::new(i32::MIN, i32::MIN, 0).is_adjacent(Coord::new(i32::MAX, i32::MAX, 1)));
    }

    #[test]
    fn ivec3_round_trip() {
        let c = Coord::new(-5, 0, 2);
        assert_eq!(Coord::from(IVec3::from(c)), c);
        assert_eq!(c.to_world(), Vec3::new(-5.0, 0.0, 2.0));
    }
}

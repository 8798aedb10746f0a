use craftris_common::{Coord, CubeType, Transform};
use craftris_grid::Cube;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Fragment shapes. Every shape is four cubes around the fragment origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Shape {
    Corner,
    Quad,
    S,
    Line,
    L,
    T,
}

impl Shape {
    pub const ALL: [Self; 6] = [
        Self::Corner,
        Self::Quad,
        Self::S,
        Self::Line,
        Self::L,
        Self::T,
    ];

    /// Cube offsets relative to the fragment origin.
    pub fn offsets(self) -> [Coord; 4] {
        let cells: [[i32; 3]; 4] = match self {
            Self::Corner => [[0, 0, 0], [1, 0, 0], [0, 1, 0], [0, 0, 1]],
            Self::Quad => [[0, 0, 0], [1, 0, 0], [0, 1, 0], [1, 1, 0]],
            Self::S => [[0, 0, 0], [0, 1, 0], [1, 0, 0], [1, -1, 0]],
            Self::Line => [[0, 0, 0], [1, 0, 0], [-1, 0, 0], [2, 0, 0]],
            Self::L => [[0, 0, 0], [1, 0, 0], [-1, 0, 0], [1, 1, 0]],
            Self::T => [[0, 0, 0], [1, 0, 0], [-1, 0, 0], [0, 1, 0]],
        };
        cells.map(Coord::from)
    }

    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::ALL[rng.gen_range(0..Self::ALL.len())]
    }
}

/// A rigid group of cubes that moves as one until it settles.
#[derive(Debug, Clone, PartialEq)]
pub struct Fragment {
    cubes: Vec<Cube>,
    pub transform: Transform,
}

impl Fragment {
    /// Build `shape` with an independently random type per cube.
    pub fn new<R: Rng + ?Sized>(shape: Shape, rng: &mut R) -> Self {
        let cubes = shape
            .offsets()
            .into_iter()
            .map(|offset| {
                Cube::new(
                    CubeType::random(rng),
                    Transform::from_position(offset.to_world()),
                )
            })
            .collect();
        Self::from_cubes(cubes)
    }

    /// Random shape, random cube types.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let shape = Shape::random(rng);
        Self::new(shape, rng)
    }

    /// One cube of `kind` at each offset.
    pub fn uniform(offsets: &[Coord], kind: CubeType) -> Self {
        Self::from_cubes(
            offsets
                .iter()
                .map(|o| Cube::new(kind, Transform::from_position(o.to_world())))
                .collect(),
        )
    }

    pub fn from_cubes(cubes: Vec<Cube>) -> Self {
        Self {
            cubes,
            transform: Transform::default(),
        }
    }

    pub fn cubes(&self) -> &[Cube] {
        &self.cubes
    }

    pub fn len(&self) -> usize {
        self.cubes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cubes.is_empty()
    }

    /// Detach every cube, leaving the fragment empty.
    pub fn take_cubes(&mut self) -> Vec<Cube> {
        std::mem::take(&mut self.cubes)
    }
}

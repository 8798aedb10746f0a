use craftris_common::{CubeId, CubeType, Transform};
use serde::{Deserialize, Serialize};

/// A placeable cube: identity, type tag and local transform.
///
/// The grid only tracks where a cube sits. Popping it hands the cube back
/// to the caller untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cube {
    pub id: CubeId,
    pub kind: CubeType,
    pub local: Transform,
}

impl Cube {
    pub fn new(kind: CubeType, local: Transform) -> Self {
        Self {
            id: CubeId::new(),
            kind,
            local,
        }
    }

    pub fn name(&self) -> String {
        format!("Cube.{}", self.kind)
    }
}

/// Payload of one occupied cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridElement {
    pub cube: Cube,
}

impl GridElement {
    pub fn new(cube: Cube) -> Self {
        Self { cube }
    }

    /// Type tag used for combo matching.
    pub fn kind(&self) -> CubeType {
        self.cube.kind
    }

    pub fn id(&self) -> CubeId {
        self.cube.id
    }
}

impl From<Cube> for GridElement {
    fn from(cube: Cube) -> Self {
        Self::new(cube)
    }
}

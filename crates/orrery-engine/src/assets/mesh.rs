use glam::{Vec2, Vec3};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MeshError {
    #[error("mesh has no vertices")]
    Empty,

    #[error("vertex count {0} is not a multiple of 3")]
    NotTriangles(usize),

    #[error("attribute lengths differ: {positions} positions, {uvs} uvs, {normals} normals")]
    LengthMismatch {
        positions: usize,
        uvs: usize,
        normals: usize,
    },
}

/// Non-indexed triangle soup: every three consecutive vertices form one triangle.
///
/// The three attribute arrays always have the same, non-zero length divisible by 3.
#[derive(Debug, Clone, PartialEq)]
pub struct MeshData {
    positions: Vec<Vec3>,
    uvs: Vec<Vec2>,
    normals: Vec<Vec3>,
}

impl MeshData {
    pub fn new(positions: Vec<Vec3>, uvs: Vec<Vec2>, normals: Vec<Vec3>) -> Result<Self, MeshError> {
        let count = positions.len();
        if count != uvs.len() || count != normals.len() {
            return Err(MeshError::LengthMismatch {
                positions: count,
                uvs: uvs.len(),
                normals: normals.len(),
            });
        }
        if count == 0 {
            return Err(MeshError::Empty);
        }
        if count % 3 != 0 {
            return Err(MeshError::NotTriangles(count));
        }

        Ok(Self {
            positions,
            uvs,
            normals,
        })
    }

    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    pub fn uvs(&self) -> &[Vec2] {
        &self.uvs
    }

    pub fn normals(&self) -> &[Vec3] {
        &self.normals
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.positions.len() / 3
    }

    /// Positions may be rewritten in place; the count is fixed.
    pub(crate) fn positions_mut(&mut self) -> &mut [Vec3] {
        &mut self.positions
    }

    pub fn position_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.positions)
    }

    pub fn uv_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.uvs)
    }

    pub fn normal_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.normals)
    }
}

use glam::UVec3;

use crate::core::Direction;

/// One rectangle of exposed surface.
///
/// `slice` is the coordinate of the emitting voxels along the direction's normal axis;
/// `u`/`v` are the rectangle's origin on the direction's in-plane axes. The rectangle
/// spans `height` cells along `u` and `width` cells along `v`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Quad {
    pub direction: Direction,
    pub slice: u32,
    pub u: u32,
    pub v: u32,
    pub width: u32,
    pub height: u32,
    pub material: u8,
}

impl Quad {
    /// The single face of `voxel` looking along `direction`.
    #[must_use]
    pub fn unit(direction: Direction, voxel: UVec3, material: u8) -> Self {
        let (slice, u, v) = direction.data().decompose(voxel);

        Self {
            direction,
            slice,
            u,
            v,
            width: 1,
            height: 1,
            material,
        }
    }

    #[must_use]
    #[inline(always)]
    pub const fn area(&self) -> u32 {
        self.width * self.height
    }

    /// Re-expands the rectangle into the 1x1 faces it covers, ordered by `u` then `v`.
    #[must_use]
    pub fn unit_faces(&self) -> Vec<Quad> {
        let mut faces = Vec::with_capacity(self.area() as usize);

        for du in 0..self.height {
            for dv in 0..self.width {
                faces.push(Quad {
                    u: self.u + du,
                    v: self.v + dv,
                    width: 1,
                    height: 1,
                    ..*self
                });
            }
        }

        faces
    }

    /// Grid-space corners on the outward plane, in the order
    /// `(u, v)`, `(u + h, v)`, `(u + h, v + w)`, `(u, v + w)`.
    #[must_use]
    pub fn corners(&self) -> [UVec3; 4] {
        let data = self.direction.data();
        let plane = if self.direction.is_positive() {
            self.slice + 1
        } else {
            self.slice
        };

        let (u0, v0) = (self.u, self.v);
        let (u1, v1) = (self.u + self.height, self.v + self.width);

        [
            data.compose(plane, u0, v0),
            data.compose(plane, u1, v0),
            data.compose(plane, u1, v1),
            data.compose(plane, u0, v1),
        ]
    }
}

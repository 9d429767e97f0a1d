//! Module `core::direction`
//!
//! Defines [`Axis`] and [`Direction`], the six axis-aligned face directions shared by the
//! meshers and the arrow primitive.
//!
//! Every direction carries a fixed [`DirectionData`] entry: the normal axis, the two in-plane
//! axes `(u, v)` scanned by the greedy mesher, the normal sign and whether quad winding has to
//! be flipped so triangles face outward.
//!
//! | direction | u | v | flip |
//! |-----------|---|---|------|
//! | `+X`      | Y | Z | no   |
//! | `-X`      | Y | Z | yes  |
//! | `+Y`      | X | Z | yes  |
//! | `-Y`      | X | Z | no   |
//! | `+Z`      | X | Y | no   |
//! | `-Z`      | X | Y | yes  |

use glam::{IVec3, UVec3, Vec3};

#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Axis {
    X = 0,
    Y = 1,
    Z = 2,
}

impl Axis {
    #[must_use]
    #[inline(always)]
    pub const fn index(self) -> usize {
        self as usize
    }
}

#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Direction {
    PosX = 0,
    NegX = 1,
    PosY = 2,
    NegY = 3,
    PosZ = 4,
    NegZ = 5,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DirectionData {
    pub normal: Axis,
    pub u: Axis,
    pub v: Axis,
    /// `1` for positive directions, `-1` for negative ones.
    pub sign: i32,
    pub flip: bool,
}

const DIRECTION_DATA: [DirectionData; 6] = [
    DirectionData {
        normal: Axis::X,
        u: Axis::Y,
        v: Axis::Z,
        sign: 1,
        flip: false,
    },
    DirectionData {
        normal: Axis::X,
        u: Axis::Y,
        v: Axis::Z,
        sign: -1,
        flip: true,
    },
    DirectionData {
        normal: Axis::Y,
        u: Axis::X,
        v: Axis::Z,
        sign: 1,
        flip: true,
    },
    DirectionData {
        normal: Axis::Y,
        u: Axis::X,
        v: Axis::Z,
        sign: -1,
        flip: false,
    },
    DirectionData {
        normal: Axis::Z,
        u: Axis::X,
        v: Axis::Y,
        sign: 1,
        flip: false,
    },
    DirectionData {
        normal: Axis::Z,
        u: Axis::X,
        v: Axis::Y,
        sign: -1,
        flip: true,
    },
];

impl DirectionData {
    /// Builds a grid position from a coordinate along the normal axis and the two in-plane
    /// coordinates.
    #[must_use]
    #[inline(always)]
    pub fn compose(&self, n: u32, u: u32, v: u32) -> UVec3 {
        let mut position = [0u32; 3];
        position[self.normal.index()] = n;
        position[self.u.index()] = u;
        position[self.v.index()] = v;

        UVec3::from_array(position)
    }

    /// Splits a grid position into `(n, u, v)`.
    #[must_use]
    #[inline(always)]
    pub fn decompose(&self, position: UVec3) -> (u32, u32, u32) {
        let position = position.to_array();

        (
            position[self.normal.index()],
            position[self.u.index()],
            position[self.v.index()],
        )
    }
}

impl Direction {
    /// All directions in meshing order.
    pub const ALL: [Direction; 6] = [
        Direction::PosX,
        Direction::NegX,
        Direction::PosY,
        Direction::NegY,
        Direction::PosZ,
        Direction::NegZ,
    ];

    #[must_use]
    #[inline(always)]
    pub const fn data(self) -> DirectionData {
        DIRECTION_DATA[self as usize]
    }

    #[must_use]
    #[inline(always)]
    pub const fn normal_axis(self) -> Axis {
        self.data().normal
    }

    #[must_use]
    #[inline(always)]
    pub const fn is_positive(self) -> bool {
        self.data().sign > 0
    }

    /// Unit step to the neighboring cell.
    #[must_use]
    pub fn offset(self) -> IVec3 {
        let data = self.data();
        let mut offset = [0i32; 3];
        offset[data.normal.index()] = data.sign;

        IVec3::from_array(offset)
    }

    #[must_use]
    pub fn normal(self) -> Vec3 {
        self.offset().as_vec3()
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Direction::PosX => "+x",
            Direction::NegX => "-x",
            Direction::PosY => "+y",
            Direction::NegY => "-y",
            Direction::PosZ => "+z",
            Direction::NegZ => "-z",
        };

        f.write_str(name)
    }
}

//! Module `model::shapes`
//!
//! Construction primitives on [`VoxelGrid`]. Every primitive writes through
//! [`VoxelGrid::set_voxel`], so out-of-range cells are skipped rather than rejected, and each
//! returns the number of writes that took effect. Loops are clipped to the grid bounds
//! first, so arbitrarily large or far-away shapes stay cheap.
//!
//! # Examples
//!
//! ```rust
//! use glam::IVec3;
//! use voxform::{Extents, VoxelGrid};
//!
//! let mut grid = VoxelGrid::new(Extents::new(4, 4, 4));
//!
//! // Corners may come in any order; both are inclusive.
//! assert_eq!(grid.fill_box(IVec3::new(1, 1, 0), IVec3::new(0, 0, 0), 3), 4);
//!
//! // Only the part inside the grid is written.
//! assert_eq!(grid.fill_box(IVec3::new(2, 2, 2), IVec3::new(9, 9, 2), 5), 4);
//! ```

use glam::{I64Vec3, IVec2, IVec3};

use crate::{
    core::{Axis, Direction},
    model::VoxelGrid,
};

/// Dimensions of an arrow drawn by [`VoxelGrid::draw_arrow`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArrowShape {
    /// Number of shaft cells, tip included.
    pub length: i32,
    /// Number of fletching cells on each side of the shaft.
    pub width: i32,
}

impl Default for ArrowShape {
    fn default() -> Self {
        Self {
            length: 4,
            width: 2,
        }
    }
}

impl VoxelGrid {
    /// Fills the inclusive box spanned by `a` and `b`.
    pub fn fill_box(&mut self, a: IVec3, b: IVec3, index: u8) -> usize {
        let Some((min, max)) = self.clip(a.min(b).as_i64vec3(), a.max(b).as_i64vec3()) else {
            return 0;
        };

        let mut written = 0;
        for z in min.z..=max.z {
            for y in min.y..=max.y {
                for x in min.x..=max.x {
                    written += self.set_voxel(IVec3::new(x, y, z), index) as usize;
                }
            }
        }

        written
    }

    /// Fills the shell of the inclusive box spanned by `a` and `b`.
    ///
    /// A cell belongs to the shell if it lies within `thickness` cells of any face. A
    /// thickness below 1 is treated as 1; a thickness of half the box or more fills it solid.
    pub fn fill_box_hollow(&mut self, a: IVec3, b: IVec3, thickness: i32, index: u8) -> usize {
        let (min, max) = (a.min(b).as_i64vec3(), a.max(b).as_i64vec3());
        let thickness = I64Vec3::splat(thickness.max(1) as i64);
        let inner_min = min + thickness;
        let inner_max = max - thickness;

        let Some((clip_min, clip_max)) = self.clip(min, max) else {
            return 0;
        };

        let mut written = 0;
        for z in clip_min.z..=clip_max.z {
            for y in clip_min.y..=clip_max.y {
                for x in clip_min.x..=clip_max.x {
                    let position = IVec3::new(x, y, z);
                    let wide = position.as_i64vec3();
                    let inside = wide.cmpge(inner_min).all() && wide.cmple(inner_max).all();
                    if !inside {
                        written += self.set_voxel(position, index) as usize;
                    }
                }
            }
        }

        written
    }

    /// Fills a Z-aligned cylinder around `center` over the inclusive `z_range`.
    ///
    /// A column `(x, y)` is inside when `dx² + dy² <= radius²`. Negative radii write nothing.
    pub fn fill_cylinder(
        &mut self,
        center: IVec2,
        z_range: (i32, i32),
        radius: i32,
        index: u8,
    ) -> usize {
        if radius < 0 {
            return 0;
        }

        let center = center.as_i64vec2();
        let radius = radius as i64;
        let (z_min, z_max) = (z_range.0.min(z_range.1), z_range.0.max(z_range.1));

        let Some((min, max)) = self.clip(
            (center - radius).extend(z_min as i64),
            (center + radius).extend(z_max as i64),
        ) else {
            return 0;
        };

        let mut written = 0;
        for y in min.y..=max.y {
            for x in min.x..=max.x {
                let dx = x as i64 - center.x;
                let dy = y as i64 - center.y;
                if dx * dx + dy * dy > radius * radius {
                    continue;
                }

                for z in min.z..=max.z {
                    written += self.set_voxel(IVec3::new(x, y, z), index) as usize;
                }
            }
        }

        written
    }

    /// Draws a 3D Bresenham line from `a` to `b`, both endpoints included.
    ///
    /// The axis with the largest delta advances every step; the other two follow their own
    /// error terms.
    pub fn draw_line(&mut self, a: IVec3, b: IVec3, index: u8) -> usize {
        let start = a.as_i64vec3().to_array();
        let end = b.as_i64vec3().to_array();

        let mut delta = [0i64; 3];
        let mut step = [0i64; 3];
        for axis in 0..3 {
            delta[axis] = (end[axis] - start[axis]).abs();
            step[axis] = (end[axis] - start[axis]).signum();
        }

        let major = if delta[0] >= delta[1] && delta[0] >= delta[2] {
            Axis::X
        } else if delta[1] >= delta[2] {
            Axis::Y
        } else {
            Axis::Z
        }
        .index();
        let minor = [(major + 1) % 3, (major + 2) % 3];

        let mut position = start;
        let mut error = minor.map(|axis| 2 * delta[axis] - delta[major]);

        let mut written = 0;
        for _ in 0..delta[major] {
            written += self.set_voxel(to_ivec3(position), index) as usize;

            for (error, &axis) in error.iter_mut().zip(minor.iter()) {
                if *error > 0 {
                    position[axis] += step[axis];
                    *error -= 2 * delta[major];
                }
                *error += 2 * delta[axis];
            }

            position[major] += step[major];
        }

        written + self.set_voxel(b, index) as usize
    }

    /// Draws an arrow whose tip sits at `tip` and which points along `direction`.
    ///
    /// The shaft runs back from the tip for `shape.length` cells. Two fletching lines run
    /// diagonally back from the tip for `shape.width` cells each, spread along X for Y and Z
    /// arrows and along Y for X arrows.
    pub fn draw_arrow(
        &mut self,
        tip: IVec3,
        direction: Direction,
        shape: ArrowShape,
        index: u8,
    ) -> usize {
        let back = -direction.offset().as_i64vec3();
        let perpendicular = match direction.normal_axis() {
            Axis::X => I64Vec3::Y,
            Axis::Y | Axis::Z => I64Vec3::X,
        };

        let width = shape.width as i64;
        self.draw_ray(tip, back, (0, shape.length as i64 - 1), index)
            + self.draw_ray(tip, back + perpendicular, (1, width), index)
            + self.draw_ray(tip, back - perpendicular, (1, width), index)
    }

    /// Writes `origin + step * i` for every `i` in the inclusive `steps` range that lands
    /// inside the grid. Components of `step` are -1, 0 or 1.
    fn draw_ray(&mut self, origin: IVec3, step: I64Vec3, steps: (i64, i64), index: u8) -> usize {
        let origin = origin.as_i64vec3();
        let upper = self.extents().as_uvec3().as_i64vec3();

        let (mut first, mut last) = steps;
        for axis in 0..3 {
            let start = origin[axis];
            let (low, high) = match step[axis] {
                0 if (0..upper[axis]).contains(&start) => continue,
                0 => return 0,
                1 => (-start, upper[axis] - 1 - start),
                _ => (start - upper[axis] + 1, start),
            };
            first = first.max(low);
            last = last.min(high);
        }

        let mut written = 0;
        for i in first..=last {
            let position = origin + step * i;
            written += self.set_voxel(position.as_ivec3(), index) as usize;
        }

        written
    }

    /// Intersects the inclusive box `min..=max` with the grid bounds.
    fn clip(&self, min: I64Vec3, max: I64Vec3) -> Option<(IVec3, IVec3)> {
        let upper = self.extents().as_uvec3().as_i64vec3() - I64Vec3::ONE;
        let min = min.max(I64Vec3::ZERO);
        let max = max.min(upper);

        min.cmple(max).all().then(|| (min.as_ivec3(), max.as_ivec3()))
    }
}

#[inline(always)]
fn to_ivec3(position: [i64; 3]) -> IVec3 {
    IVec3::new(position[0] as i32, position[1] as i32, position[2] as i32)
}

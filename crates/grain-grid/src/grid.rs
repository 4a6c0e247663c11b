//! Dense structured voxel grid topology.

use crate::error::{GridError, GridResult};
use crate::voxel::VoxelCoord;

/// Axis-aligned bounds in grid (voxel) space.
///
/// Both bounds are inclusive. Bounds are never empty; use
/// [`GridBounds::from_extents`] to get `None` for an empty window.
///
/// # Example
///
/// ```
/// use grain_grid::{GridBounds, VoxelCoord};
///
/// let bounds = GridBounds::from_extents(
///     VoxelCoord::new(0, 0, 0),
///     VoxelCoord::new(9, 19, 29),
/// ).unwrap();
///
/// assert!(bounds.contains(VoxelCoord::new(9, 19, 29)));
/// assert!(bounds.contains(VoxelCoord::new(5, 5, 5)));
/// assert!(!bounds.contains(VoxelCoord::new(10, 5, 5)));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridBounds {
    /// Minimum corner (inclusive).
    pub min: VoxelCoord,
    /// Maximum corner (inclusive).
    pub max: VoxelCoord,
}

impl GridBounds {
    /// Creates bounds from inclusive extents, or `None` if any `min > max`.
    #[must_use]
    pub const fn from_extents(min: VoxelCoord, max: VoxelCoord) -> Option<Self> {
        if min.x > max.x || min.y > max.y || min.z > max.z {
            None
        } else {
            Some(Self { min, max })
        }
    }

    /// Checks if the bounds contain a coordinate.
    #[must_use]
    pub const fn contains(&self, coord: VoxelCoord) -> bool {
        coord.x >= self.min.x
            && coord.x <= self.max.x
            && coord.y >= self.min.y
            && coord.y <= self.max.y
            && coord.z >= self.min.z
            && coord.z <= self.max.z
    }
}

/// A dense, immutable 3D structured grid.
///
/// Elements are stored in linear order `z * nx * ny + y * nx + x` (X varies
/// fastest). The grid only describes topology; per-element data lives in
/// plain slices of length [`element_count`](Self::element_count).
///
/// # Example
///
/// ```
/// use grain_grid::{StructuredGrid, VoxelCoord};
///
/// let grid = StructuredGrid::new(3, 3, 1).unwrap();
/// assert_eq!(grid.element_count(), 9);
///
/// // Center of a 3x3 slab has 4 in-plane neighbors
/// let center = grid.index(VoxelCoord::new(1, 1, 0)).unwrap();
/// assert_eq!(center, 4);
/// assert_eq!(grid.face_neighbors(center).count(), 4);
///
/// // Corners have 2
/// assert_eq!(grid.face_neighbors(0).collect::<Vec<_>>(), vec![1, 3]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StructuredGrid {
    nx: usize,
    ny: usize,
    nz: usize,
    element_count: usize,
}

impl StructuredGrid {
    /// Creates a grid with the given dimensions.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::InvalidDimensions`] if any dimension is zero or
    /// does not fit in a signed 32-bit coordinate, and
    /// [`GridError::IntegerOverflow`] if the element count overflows `usize`.
    pub fn new(nx: usize, ny: usize, nz: usize) -> GridResult<Self> {
        let max = i32::MAX as usize;
        if nx == 0 || ny == 0 || nz == 0 || nx > max || ny > max || nz > max {
            return Err(GridError::InvalidDimensions { nx, ny, nz });
        }
        let element_count = nx
            .checked_mul(ny)
            .and_then(|plane| plane.checked_mul(nz))
            .ok_or(GridError::IntegerOverflow)?;
        Ok(Self {
            nx,
            ny,
            nz,
            element_count,
        })
    }

    /// Returns the dimensions as `[nx, ny, nz]`.
    #[must_use]
    pub const fn dims(&self) -> [usize; 3] {
        [self.nx, self.ny, self.nz]
    }

    /// Returns the total number of elements.
    #[must_use]
    pub const fn element_count(&self) -> usize {
        self.element_count
    }

    /// Returns `true` if every dimension is larger than one.
    #[must_use]
    pub const fn is_volumetric(&self) -> bool {
        self.nx > 1 && self.ny > 1 && self.nz > 1
    }

    /// Checks if a coordinate lies inside the grid.
    #[must_use]
    pub fn contains(&self, coord: VoxelCoord) -> bool {
        self.bounds().contains(coord)
    }

    /// Returns the full extent of the grid as bounds.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    pub const fn bounds(&self) -> GridBounds {
        // Dimensions are validated to fit in i32 on construction.
        GridBounds {
            min: VoxelCoord::origin(),
            max: VoxelCoord::new(
                self.nx as i32 - 1,
                self.ny as i32 - 1,
                self.nz as i32 - 1,
            ),
        }
    }

    /// Converts a coordinate to its linear index, or `None` if out of bounds.
    #[must_use]
    #[allow(clippy::cast_sign_loss)]
    pub fn index(&self, coord: VoxelCoord) -> Option<usize> {
        if !self.contains(coord) {
            return None;
        }
        Some(
            (coord.z as usize * self.ny + coord.y as usize) * self.nx + coord.x as usize,
        )
    }

    /// Converts a linear index to its coordinate, or `None` if out of range.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    pub const fn coord(&self, index: usize) -> Option<VoxelCoord> {
        if index >= self.element_count {
            return None;
        }
        let x = index % self.nx;
        let y = (index / self.nx) % self.ny;
        let z = index / (self.nx * self.ny);
        Some(VoxelCoord::new(x as i32, y as i32, z as i32))
    }

    /// Returns the in-bounds face neighbors of an element.
    ///
    /// Neighbors are yielded in the order `-z, -y, -x, +x, +y, +z`; elements
    /// on the boundary have fewer than six. An out-of-range index yields
    /// nothing.
    #[must_use]
    pub fn face_neighbors(&self, index: usize) -> FaceNeighbors {
        let mut neighbors = FaceNeighbors {
            items: [0; 6],
            len: 0,
            pos: 0,
        };
        let Some(coord) = self.coord(index) else {
            return neighbors;
        };
        for neighbor in coord.face_neighbors() {
            if let Some(n) = self.index(neighbor) {
                neighbors.items[neighbors.len] = n;
                neighbors.len += 1;
            }
        }
        neighbors
    }

    /// Validates that a per-element array has one entry per grid element.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::LengthMismatch`] naming the array when its
    /// length differs from [`element_count`](Self::element_count).
    pub fn check_len(&self, name: &'static str, len: usize) -> GridResult<()> {
        if len == self.element_count {
            Ok(())
        } else {
            Err(GridError::LengthMismatch {
                name,
                expected: self.element_count,
                actual: len,
            })
        }
    }
}

/// Iterator over the in-bounds face neighbors of a grid element.
#[derive(Debug, Clone)]
pub struct FaceNeighbors {
    items: [usize; 6],
    len: usize,
    pos: usize,
}

impl Iterator for FaceNeighbors {
    type Item = usize;

    fn next(&mut self) -> Option<Self::Item> {
        if self.pos >= self.len {
            return None;
        }
        let item = self.items[self.pos];
        self.pos += 1;
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.len - self.pos;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for FaceNeighbors {}

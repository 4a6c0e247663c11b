//! Structured voxel grid topology for grain segmentation.
//!
//! This crate provides the grid that every per-element array in the
//! workspace is indexed by:
//!
//! - [`StructuredGrid`] - Dense `nx * ny * nz` lattice with linear indexing
//! - [`VoxelCoord`] - Integer voxel coordinates and offsets
//! - [`GridBounds`] - Inclusive axis-aligned windows in grid space
//!
//! # Coordinate Systems
//!
//! Element `(x, y, z)` is stored at linear index `z * nx * ny + y * nx + x`,
//! so X varies fastest. The 6-connected neighborhood is visited in the order
//! `-z, -y, -x, +x, +y, +z`.
//!
//! # Example
//!
//! ```
//! use grain_grid::{StructuredGrid, VoxelCoord};
//!
//! let grid = StructuredGrid::new(10, 10, 5).unwrap();
//! let index = grid.index(VoxelCoord::new(3, 4, 2)).unwrap();
//! assert_eq!(index, 2 * 100 + 4 * 10 + 3);
//! assert_eq!(grid.coord(index), Some(VoxelCoord::new(3, 4, 2)));
//!
//! // Per-element arrays are plain slices checked against the grid
//! let phases = vec![1u32; grid.element_count()];
//! assert!(grid.check_len("phases", phases.len()).is_ok());
//! ```
//!
//! # Quality Standards
//!
//! This crate maintains:
//! - ≥90% test coverage
//! - Zero clippy/doc warnings
//! - Zero `unwrap`/`expect` in library code

// Safety: Deny unwrap/expect in library code. Tests may use them (workspace warns).
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod error;
mod grid;
mod voxel;

pub use error::{GridError, GridResult};
pub use grid::{FaceNeighbors, GridBounds, StructuredGrid};
pub use voxel::VoxelCoord;

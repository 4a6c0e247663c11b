//! Voxel coordinate types.

/// A discrete 3D coordinate in voxel/grid space.
///
/// Coordinates are signed so that patch and search offsets can be expressed
/// with the same type. A coordinate is only meaningful for a particular
/// [`StructuredGrid`](crate::StructuredGrid) once it has been checked with
/// [`StructuredGrid::contains`](crate::StructuredGrid::contains).
///
/// # Example
///
/// ```
/// use grain_grid::VoxelCoord;
///
/// let coord = VoxelCoord::new(1, 2, 3);
/// assert_eq!(coord.x, 1);
/// assert_eq!(coord.y, 2);
/// assert_eq!(coord.z, 3);
///
/// // Negative coordinates are valid offsets
/// let offset = VoxelCoord::new(-1, 0, 0);
/// assert_eq!(coord + offset, VoxelCoord::new(0, 2, 3));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VoxelCoord {
    /// X coordinate (fastest varying in linear order).
    pub x: i32,
    /// Y coordinate.
    pub y: i32,
    /// Z coordinate (slowest varying in linear order).
    pub z: i32,
}

impl VoxelCoord {
    /// Creates a new voxel coordinate.
    #[must_use]
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Creates a coordinate at the origin (0, 0, 0).
    #[must_use]
    pub const fn origin() -> Self {
        Self::new(0, 0, 0)
    }

    /// Returns the coordinate as an array.
    ///
    /// # Example
    ///
    /// ```
    /// use grain_grid::VoxelCoord;
    ///
    /// let coord = VoxelCoord::new(1, 2, 3);
    /// assert_eq!(coord.as_array(), [1, 2, 3]);
    /// ```
    #[must_use]
    pub const fn as_array(self) -> [i32; 3] {
        [self.x, self.y, self.z]
    }

    /// Returns the 6 face-adjacent neighbors (von Neumann neighborhood).
    ///
    /// Neighbors are ordered `-z, -y, -x, +x, +y, +z`, which is the order
    /// region growing visits them.
    ///
    /// # Example
    ///
    /// ```
    /// use grain_grid::VoxelCoord;
    ///
    /// let coord = VoxelCoord::new(0, 0, 0);
    /// let neighbors = coord.face_neighbors();
    /// assert_eq!(neighbors[0], VoxelCoord::new(0, 0, -1));
    /// assert_eq!(neighbors[5], VoxelCoord::new(0, 0, 1));
    /// ```
    #[must_use]
    pub const fn face_neighbors(self) -> [Self; 6] {
        [
            Self::new(self.x, self.y, self.z.wrapping_sub(1)),
            Self::new(self.x, self.y.wrapping_sub(1), self.z),
            Self::new(self.x.wrapping_sub(1), self.y, self.z),
            Self::new(self.x.wrapping_add(1), self.y, self.z),
            Self::new(self.x, self.y.wrapping_add(1), self.z),
            Self::new(self.x, self.y, self.z.wrapping_add(1)),
        ]
    }
}

impl From<[i32; 3]> for VoxelCoord {
    fn from([x, y, z]: [i32; 3]) -> Self {
        Self::new(x, y, z)
    }
}

impl From<VoxelCoord> for [i32; 3] {
    fn from(coord: VoxelCoord) -> Self {
        coord.as_array()
    }
}

impl std::ops::Add for VoxelCoord {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self::new(
            self.x.wrapping_add(other.x),
            self.y.wrapping_add(other.y),
            self.z.wrapping_add(other.z),
        )
    }
}

impl std::ops::Sub for VoxelCoord {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self::new(
            self.x.wrapping_sub(other.x),
            self.y.wrapping_sub(other.y),
            self.z.wrapping_sub(other.z),
        )
    }
}

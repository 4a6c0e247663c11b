//! Region-growing scheduler.

use std::collections::VecDeque;

use grain_grid::StructuredGrid;
use grain_symmetry::{CrystalStructureTable, SymmetryOperators};
use nalgebra::{UnitQuaternion, Vector3};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info, warn};

use crate::error::{SegmentError, SegmentResult};
use crate::features::{ActiveFlags, FeatureArena};
use crate::grouping::{GroupingStrategy, OrientationGrouping, VectorGrouping};
use crate::params::{SegmentParams, Traversal};
use crate::randomize::randomize_feature_ids;
use crate::result::Segmentation;

/// Lifecycle of a segmentation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentState {
    /// Configured, not yet run.
    Idle,
    /// Scanning for the next seed.
    Seeding,
    /// Expanding the current feature.
    Growing,
    /// No seed remains.
    Done,
}

/// Snapshot passed to progress callbacks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SegmentProgress {
    /// State at the time of the report.
    pub state: SegmentState,
    /// Features created so far.
    pub features: usize,
    /// Elements assigned to a feature so far.
    pub assigned: usize,
    /// Total elements in the grid.
    pub element_count: usize,
}

type ProgressFn<'a> = Box<dyn FnMut(&SegmentProgress) + 'a>;

/// Flood-fill segmenter driven by a [`GroupingStrategy`].
///
/// Elements are scanned in index order for seeds. Each seed starts a new
/// feature that grows over 6-connected neighbors accepted by the strategy.
/// A neighbor can only be absorbed while it is unassigned and, with masking
/// enabled, its mask entry is set.
///
/// # Example
///
/// ```
/// use grain_grid::StructuredGrid;
/// use grain_segment::{SegmentParams, Segmenter, VectorGrouping};
/// use nalgebra::Vector3;
///
/// let grid = StructuredGrid::new(4, 1, 1).unwrap();
/// let vectors = [
///     Vector3::new(0.0, 0.0, 1.0),
///     Vector3::new(0.0, 0.0, -1.0),
///     Vector3::new(1.0, 0.0, 0.0),
///     Vector3::new(1.0, 0.0, 0.01),
/// ];
/// let grouping = VectorGrouping::new(&vectors, 2f64.to_radians());
///
/// let result = Segmenter::new(&grid, grouping, SegmentParams::sequential(2.0))
///     .run()
///     .unwrap();
/// assert_eq!(result.feature_ids, vec![1, 1, 2, 2]);
/// assert_eq!(result.active.as_slice(), &[true, true, true]);
/// ```
pub struct Segmenter<'a, S> {
    grid: &'a StructuredGrid,
    strategy: S,
    params: SegmentParams,
    mask: Option<&'a [bool]>,
    arenas: Vec<&'a mut dyn FeatureArena>,
    progress: Option<ProgressFn<'a>>,
    state: SegmentState,
    feature_ids: Vec<u32>,
    active: ActiveFlags,
    assigned: usize,
}

impl<'a, S: GroupingStrategy> Segmenter<'a, S> {
    /// Creates an idle segmenter.
    #[must_use]
    pub fn new(grid: &'a StructuredGrid, strategy: S, params: SegmentParams) -> Self {
        Self {
            grid,
            strategy,
            params,
            mask: None,
            arenas: Vec::new(),
            progress: None,
            state: SegmentState::Idle,
            feature_ids: Vec::new(),
            active: ActiveFlags::new(),
            assigned: 0,
        }
    }

    /// Supply the mask array. Only consulted when the params enable masking.
    #[must_use]
    pub fn with_mask(mut self, mask: &'a [bool]) -> Self {
        self.mask = Some(mask);
        self
    }

    /// Attach a per-feature array to keep sized to the feature count.
    #[must_use]
    pub fn attach(mut self, arena: &'a mut dyn FeatureArena) -> Self {
        self.arenas.push(arena);
        self
    }

    /// Register a callback invoked every `progress_interval` features and
    /// once when growth is done.
    #[must_use]
    pub fn on_progress(mut self, callback: impl FnMut(&SegmentProgress) + 'a) -> Self {
        self.progress = Some(Box::new(callback));
        self
    }

    /// Current lifecycle state.
    #[must_use]
    pub const fn state(&self) -> SegmentState {
        self.state
    }

    /// Runs segmentation, seeding the id shuffle from the params.
    ///
    /// # Errors
    ///
    /// See [`run_with_rng`](Self::run_with_rng).
    pub fn run(self) -> SegmentResult<Segmentation> {
        let mut rng = self
            .params
            .seed
            .map_or_else(StdRng::from_entropy, StdRng::seed_from_u64);
        self.run_with_rng(&mut rng)
    }

    /// Runs segmentation with a caller-supplied RNG for the id shuffle.
    ///
    /// # Errors
    ///
    /// Configuration errors (invalid tolerance, missing mask, array length
    /// mismatch) are returned before any element is labeled.
    /// [`SegmentError::NoFeatures`] is returned if no element could seed a
    /// feature.
    pub fn run_with_rng<R: Rng + ?Sized>(mut self, rng: &mut R) -> SegmentResult<Segmentation> {
        self.data_check()?;

        let element_count = self.grid.element_count();
        info!(
            elements = element_count,
            tolerance_degrees = self.params.tolerance_degrees,
            use_mask = self.params.use_mask,
            traversal = ?self.params.traversal,
            "Starting segmentation"
        );

        self.feature_ids = vec![0; element_count];
        self.active = ActiveFlags::new();
        self.assigned = 0;
        for arena in &mut self.arenas {
            arena.grow_to(1);
        }

        let mut worklist = VecDeque::new();
        let mut next_start = 0;
        let mut feature_id: u32 = 0;
        self.state = SegmentState::Seeding;

        while let Some(seed) = self.find_seed(next_start) {
            feature_id = feature_id
                .checked_add(1)
                .ok_or(SegmentError::TooManyFeatures {
                    count: self.active.feature_count(),
                })?;
            self.claim_seed(seed, feature_id);

            self.state = SegmentState::Growing;
            self.grow(seed, feature_id, &mut worklist);
            self.report_interval(feature_id);

            next_start = seed + 1;
            self.state = SegmentState::Seeding;
        }
        self.state = SegmentState::Done;

        if self.active.len() < 2 {
            warn!(
                elements = element_count,
                tolerance_degrees = self.params.tolerance_degrees,
                "No features detected"
            );
            return Err(SegmentError::NoFeatures);
        }

        let randomized = self.params.randomize_feature_ids;
        if randomized {
            randomize_feature_ids(&mut self.feature_ids, feature_id, rng);
        }

        self.report(SegmentState::Done);
        info!(
            features = feature_id,
            assigned = self.assigned,
            unassigned = element_count - self.assigned,
            randomized,
            "Segmentation complete"
        );

        Ok(Segmentation {
            feature_ids: self.feature_ids,
            active: self.active,
            randomized,
        })
    }

    fn data_check(&mut self) -> SegmentResult<()> {
        self.params.validate()?;
        self.strategy.check(self.grid)?;
        if self.params.use_mask {
            let mask = self.mask.ok_or(SegmentError::MissingMask)?;
            self.grid.check_len("mask", mask.len())?;
        } else if self.mask.take().is_some() {
            debug!("Mask supplied but masking is disabled; ignoring it");
        }
        Ok(())
    }

    fn passes_mask(&self, index: usize) -> bool {
        self.mask
            .is_none_or(|mask| mask.get(index).copied().unwrap_or(false))
    }

    fn is_unassigned(&self, index: usize) -> bool {
        self.feature_ids.get(index) == Some(&0)
    }

    /// First element at or after `start` that may seed a feature.
    fn find_seed(&self, start: usize) -> Option<usize> {
        (start..self.grid.element_count()).find(|&index| {
            self.is_unassigned(index)
                && self.passes_mask(index)
                && self.strategy.is_seed_admissible(index)
        })
    }

    fn claim_seed(&mut self, seed: usize, feature_id: u32) {
        if let Some(slot) = self.feature_ids.get_mut(seed) {
            *slot = feature_id;
            self.assigned += 1;
        }
        let len = feature_id as usize + 1;
        self.active.grow_to(len);
        for arena in &mut self.arenas {
            arena.grow_to(len);
        }
    }

    /// Expands the feature from `seed`, returning its size.
    fn grow(&mut self, seed: usize, feature_id: u32, worklist: &mut VecDeque<usize>) -> usize {
        worklist.clear();
        worklist.push_back(seed);
        let mut size = 1;

        loop {
            let current = match self.params.traversal {
                Traversal::BreadthFirst => worklist.pop_front(),
                Traversal::DepthFirst => worklist.pop_back(),
            };
            let Some(current) = current else { break };

            for neighbor in self.grid.face_neighbors(current) {
                if self.is_unassigned(neighbor)
                    && self.passes_mask(neighbor)
                    && self.strategy.should_group(current, neighbor)
                {
                    if let Some(slot) = self.feature_ids.get_mut(neighbor) {
                        *slot = feature_id;
                    }
                    worklist.push_back(neighbor);
                    size += 1;
                }
            }
        }

        self.assigned += size - 1;
        size
    }

    fn report_interval(&mut self, feature_id: u32) {
        let interval = self.params.progress_interval;
        if interval > 0 && (feature_id as usize) % interval == 0 {
            debug!(
                features = feature_id,
                assigned = self.assigned,
                elements = self.grid.element_count(),
                "Segmentation progress"
            );
            self.report(SegmentState::Growing);
        }
    }

    fn report(&mut self, state: SegmentState) {
        let snapshot = SegmentProgress {
            state,
            features: self.active.feature_count(),
            assigned: self.assigned,
            element_count: self.grid.element_count(),
        };
        if let Some(callback) = self.progress.as_mut() {
            callback(&snapshot);
        }
    }
}

/// Orientation data for [`segment_orientations`].
#[derive(Debug, Clone, Copy)]
pub struct OrientationInput<'a> {
    /// One orientation per element.
    pub orientations: &'a [UnitQuaternion<f64>],
    /// One phase id per element; 0 is not indexed.
    pub phases: &'a [u32],
    /// Phase to crystal structure lookup.
    pub structures: &'a CrystalStructureTable,
    /// Optional mask, used when the params enable it.
    pub mask: Option<&'a [bool]>,
}

/// Segments an orientation field into grains.
///
/// Neighbors of the same phase join a grain when their misorientation is
/// below the params tolerance. Only indexed elements (phase > 0) seed
/// grains.
///
/// # Errors
///
/// See [`Segmenter::run_with_rng`].
///
/// # Example
///
/// ```
/// use grain_grid::StructuredGrid;
/// use grain_segment::{OrientationInput, SegmentParams, segment_orientations};
/// use grain_symmetry::{CrystalStructureTable, LaueClass, SymmetryOperators};
/// use nalgebra::UnitQuaternion;
///
/// let grid = StructuredGrid::new(3, 3, 1).unwrap();
/// let quats = vec![UnitQuaternion::identity(); 9];
/// let phases = vec![1; 9];
/// let table = CrystalStructureTable::from_classes(&[LaueClass::CubicHigh]);
/// let input = OrientationInput {
///     orientations: &quats,
///     phases: &phases,
///     structures: &table,
///     mask: None,
/// };
///
/// let ops = SymmetryOperators::new();
/// let result = segment_orientations(&grid, &input, &ops, &SegmentParams::default()).unwrap();
/// assert_eq!(result.feature_count(), 1);
/// assert!(result.feature_ids.iter().all(|&id| id == 1));
/// ```
pub fn segment_orientations(
    grid: &StructuredGrid,
    input: &OrientationInput<'_>,
    operators: &SymmetryOperators,
    params: &SegmentParams,
) -> SegmentResult<Segmentation> {
    let grouping = OrientationGrouping::new(
        input.orientations,
        input.phases,
        input.structures,
        operators,
        params.tolerance_radians(),
    );
    let mut segmenter = Segmenter::new(grid, grouping, params.clone());
    if let Some(mask) = input.mask {
        segmenter = segmenter.with_mask(mask);
    }
    segmenter.run()
}

/// Segments a vector field into regions of similar axis direction.
///
/// Vectors are treated as undirected axes; see
/// [`axis_angle`](crate::axis_angle).
///
/// # Errors
///
/// See [`Segmenter::run_with_rng`].
pub fn segment_vectors(
    grid: &StructuredGrid,
    vectors: &[Vector3<f64>],
    mask: Option<&[bool]>,
    params: &SegmentParams,
) -> SegmentResult<Segmentation> {
    let grouping = VectorGrouping::new(vectors, params.tolerance_radians());
    let mut segmenter = Segmenter::new(grid, grouping, params.clone());
    if let Some(mask) = mask {
        segmenter = segmenter.with_mask(mask);
    }
    segmenter.run()
}

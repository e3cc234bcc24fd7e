//! # Poisson-Disk Sampling
//!
//! Bridson's algorithm over a bounded 2D domain. Every returned pair of
//! points is at least `radius` apart, and every point lies inside the domain.
//!
//! ## Algorithm
//!
//! 1. Overlay a background grid with cells of size `radius / sqrt(2)`, so a
//!    cell holds at most one sample.
//! 2. Seed one uniformly random in-domain point (bounded retries).
//! 3. Pick a random active sample and try up to `k` candidates in the annulus
//!    `[radius, 2 * radius)` around it. The first candidate that is in-domain
//!    and clear of every sample in the surrounding 5x5 cells is accepted.
//! 4. A sample that exhausts its `k` attempts is retired. Stop when no active
//!    samples remain.
//!
//! Randomness is injected through [`rand::Rng`], so seeded generators give
//! reproducible output.

use std::f64::consts::TAU;

use config::constants::{DEFAULT_POISSON_ATTEMPTS, MAX_POISSON_GRID_CELLS, POISSON_SEED_ATTEMPTS};
use glam::DVec2;
use rand::Rng;
use tracing::{debug, warn};

use crate::polygon::Polygon2D;


/// Lower bound on a domain extent so degenerate bounds still form a grid.
const MIN_DOMAIN_EXTENT: f64 = 1e-9;

// =============================================================================
// PARAMETERS
// =============================================================================

/// Tunables for Bridson sampling.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PoissonParams {
    /// Minimum distance between any two samples.
    pub radius: f64,
    /// Candidates tried per active sample before it retires.
    pub attempts: u32,
    /// Uniform draws tried when looking for the first in-domain sample.
    pub seed_attempts: u32,
}

impl PoissonParams {
    /// Parameters with the default attempt counts.
    pub fn new(radius: f64) -> Self {
        Self {
            radius,
            attempts: DEFAULT_POISSON_ATTEMPTS,
            seed_attempts: POISSON_SEED_ATTEMPTS,
        }
    }

    /// Overrides the per-sample candidate count.
    pub fn with_attempts(mut self, attempts: u32) -> Self {
        self.attempts = attempts;
        self
    }

    /// Overrides the seeding retry count.
    pub fn with_seed_attempts(mut self, seed_attempts: u32) -> Self {
        self.seed_attempts = seed_attempts;
        self
    }
}

// =============================================================================
// DOMAINS
// =============================================================================

/// A region that can be sampled.
pub trait SampleDomain {
    /// Axis-aligned bounds `(min, max)` enclosing the domain.
    fn bounds(&self) -> (DVec2, DVec2);

    /// Returns true if `p` belongs to the domain.
    fn contains(&self, p: DVec2) -> bool;
}

/// Rectangle `[-w/2, w/2] x [-h/2, h/2]` centered at the origin, edges
/// included.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RectDomain {
    half: DVec2,
}

impl RectDomain {
    /// Creates a rectangle of the given width and height.
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            half: DVec2::new(width.abs(), height.abs()) * 0.5,
        }
    }
}

impl SampleDomain for RectDomain {
    fn bounds(&self) -> (DVec2, DVec2) {
        (-self.half, self.half)
    }

    fn contains(&self, p: DVec2) -> bool {
        p.x >= -self.half.x && p.x <= self.half.x && p.y >= -self.half.y && p.y <= self.half.y
    }
}

/// Interior of a polygon under the odd-crossing rule.
#[derive(Debug, Clone, Copy)]
pub struct PolygonDomain<'a> {
    polygon: &'a Polygon2D,
    bounds: (DVec2, DVec2),
}

impl<'a> PolygonDomain<'a> {
    /// Wraps a polygon; returns `None` when it has no points.
    pub fn new(polygon: &'a Polygon2D) -> Option<Self> {
        let bounds = polygon.bounds()?;
        Some(Self { polygon, bounds })
    }
}

impl SampleDomain for PolygonDomain<'_> {
    fn bounds(&self) -> (DVec2, DVec2) {
        self.bounds
    }

    fn contains(&self, p: DVec2) -> bool {
        self.polygon.contains(p)
    }
}

// =============================================================================
// BACKGROUND GRID
// =============================================================================

/// Acceleration grid mapping each cell to the sample it holds.
struct BackgroundGrid {
    origin: DVec2,
    cell_size: f64,
    width: usize,
    height: usize,
    cells: Vec<Option<usize>>,
}

impl BackgroundGrid {
    /// Returns `None` when the grid would exceed [`MAX_POISSON_GRID_CELLS`].
    fn new(origin: DVec2, extent: DVec2, cell_size: f64) -> Option<Self> {
        let width = ((extent.x / cell_size).ceil() as usize).max(1);
        let height = ((extent.y / cell_size).ceil() as usize).max(1);
        let count = width
            .checked_mul(height)
            .filter(|&count| count <= MAX_POISSON_GRID_CELLS)?;
        Some(Self {
            origin,
            cell_size,
            width,
            height,
            cells: vec![None; count],
        })
    }

    /// Builds the grid for `radius`, doubling the radius until the grid
    /// fits. Returns the grid with the radius actually used.
    fn fitting(origin: DVec2, extent: DVec2, radius: f64) -> (Self, f64) {
        let mut radius = radius;
        loop {
            if let Some(grid) = Self::new(origin, extent, radius / std::f64::consts::SQRT_2) {
                return (grid, radius);
            }
            radius *= 2.0;
        }
    }

    /// Cell coordinates of `p`, clamped into the grid.
    fn cell_of(&self, p: DVec2) -> (usize, usize) {
        let local = (p - self.origin) / self.cell_size;
        let gx = (local.x.floor().max(0.0) as usize).min(self.width - 1);
        let gy = (local.y.floor().max(0.0) as usize).min(self.height - 1);
        (gx, gy)
    }

    fn get(&self, (gx, gy): (usize, usize)) -> Option<usize> {
        self.cells[gy * self.width + gx]
    }

    fn insert(&mut self, (gx, gy): (usize, usize), sample: usize) {
        self.cells[gy * self.width + gx] = Some(sample);
    }

    /// Returns true if no sample in the 5x5 block around `cell` lies closer
    /// than `radius` to `p`.
    fn is_clear(&self, samples: &[DVec2], p: DVec2, cell: (usize, usize), radius: f64) -> bool {
        let r2 = radius * radius;
        let (gx, gy) = cell;
        let x_range = gx.saturating_sub(2)..=(gx + 2).min(self.width - 1);
        let y_range = gy.saturating_sub(2)..=(gy + 2).min(self.height - 1);

        y_range.into_iter().all(|yy| {
            x_range.clone().all(|xx| {
                self.get((xx, yy))
                    .map_or(true, |s| samples[s].distance_squared(p) >= r2)
            })
        })
    }
}

// =============================================================================
// SAMPLERS
// =============================================================================

/// Runs Bridson's algorithm over an arbitrary domain.
///
/// Returns an empty set when the radius is not a positive finite number or
/// no in-domain seed is found within `params.seed_attempts` draws.
///
/// A radius so small that the background grid would exceed
/// [`MAX_POISSON_GRID_CELLS`] is doubled until the grid fits, so samples may
/// be sparser than requested but never closer.
pub fn bridson<D, R>(domain: &D, params: &PoissonParams, rng: &mut R) -> Vec<DVec2>
where
    D: SampleDomain + ?Sized,
    R: Rng + ?Sized,
{
    if !(params.radius > 0.0 && params.radius.is_finite()) {
        return Vec::new();
    }

    let (min, max) = domain.bounds();
    let extent = (max - min).max(DVec2::splat(MIN_DOMAIN_EXTENT));
    let (mut grid, radius) = BackgroundGrid::fitting(min, extent, params.radius);
    if radius > params.radius {
        warn!(
            requested = params.radius,
            radius, "Sampling radius raised to bound the background grid"
        );
    }

    let seed = (0..params.seed_attempts)
        .map(|_| min + DVec2::new(rng.random::<f64>(), rng.random::<f64>()) * extent)
        .find(|&p| domain.contains(p));
    let Some(seed) = seed else {
        debug!(attempts = params.seed_attempts, "No in-domain seed found");
        return Vec::new();
    };

    let mut samples = vec![seed];
    let mut active = vec![0usize];
    grid.insert(grid.cell_of(seed), 0);

    while !active.is_empty() {
        let slot = rng.random_range(0..active.len());
        let base = samples[active[slot]];

        let mut accepted = None;
        for _ in 0..params.attempts {
            let angle = TAU * rng.random::<f64>();
            let distance = radius * (1.0 + rng.random::<f64>());
            let candidate = base + DVec2::from_angle(angle) * distance;
            if !domain.contains(candidate) {
                continue;
            }
            let cell = grid.cell_of(candidate);
            if grid.get(cell).is_none() && grid.is_clear(&samples, candidate, cell, radius) {
                accepted = Some((candidate, cell));
                break;
            }
        }

        match accepted {
            Some((candidate, cell)) => {
                grid.insert(cell, samples.len());
                active.push(samples.len());
                samples.push(candidate);
            }
            None => {
                active.swap_remove(slot);
            }
        }
    }

    debug!(count = samples.len(), radius, "Poisson sampling finished");
    samples
}

/// Samples the rectangle `[-w/2, w/2] x [-h/2, h/2]`.
///
/// # Example
///
/// ```rust
/// use mesh_kernel::sampling::{poisson_disk, PoissonParams};
/// use rand::{rngs::StdRng, SeedableRng};
///
/// let mut rng = StdRng::seed_from_u64(7);
/// let points = poisson_disk(1.0, 1.0, &PoissonParams::new(0.1), &mut rng);
/// assert!(points.len() > 20);
/// assert!(points.iter().all(|p| p.x.abs() <= 0.5 && p.y.abs() <= 0.5));
/// ```
pub fn poisson_disk<R: Rng + ?Sized>(
    width: f64,
    height: f64,
    params: &PoissonParams,
    rng: &mut R,
) -> Vec<DVec2> {
    bridson(&RectDomain::new(width, height), params, rng)
}

/// Samples the interior of a polygon.
///
/// Empty and zero-area polygons yield no samples.
pub fn poisson_disk_in_polygon<R: Rng + ?Sized>(
    polygon: &Polygon2D,
    params: &PoissonParams,
    rng: &mut R,
) -> Vec<DVec2> {
    match PolygonDomain::new(polygon) {
        Some(domain) => bridson(&domain, params, rng),
        None => Vec::new(),
    }
}

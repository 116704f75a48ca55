//! Seeded midpoint displacement over a toroidal 2D grid.
//!
//! The grid is addressed by `u32` coordinates and wraps at 2^32. Step `k`
//! halves the grid spacing: every existing point emits the three points
//! `midpoint` away along x, z and the diagonal, where `midpoint = 2^31 >> k`.
//! A new point's height is the mean of its parent and the (wrapping) far
//! corner, displaced by a seeded pseudo-random amount scaled by the level's
//! noise.

use crate::{PointSet, SurfacePoint};
use fracscape_core::{GenerationParameters, VizError};
use std::collections::HashMap;

/// Number of precomputed noise levels. Level 32 would have a zero midpoint.
const LEVELS: usize = 32;

/// Noise below this is treated as zero and stops refinement.
const EPSILON: f64 = 0.00001;

/// Hard cap on generated points (twelve subdivision steps).
pub const MAX_POINTS: usize = 1 << 24;

const OFFSETS: [[u32; 2]; 3] = [[1, 0], [0, 1], [1, 1]];

#[derive(Debug, Clone)]
pub struct FractalNoise {
    params: GenerationParameters,
    noise: [f64; LEVELS],
    bounds: [f64; LEVELS],
    levels: usize,
    points: Vec<SurfacePoint>,
    index: HashMap<[u32; 2], usize>,
}

impl FractalNoise {
    /// Start a surface holding only the seed point at the origin.
    pub fn new(params: &GenerationParameters) -> Result<Self, VizError> {
        if !params.noise.is_finite() {
            return Err(VizError::GenerationFailure(format!(
                "noise must be finite, got {}",
                params.noise
            )));
        }
        if !(0.0..=1.0).contains(&params.decay) {
            return Err(VizError::GenerationFailure(format!(
                "decay must be within [0, 1], got {}",
                params.decay
            )));
        }

        let mut noise = [0.0; LEVELS];
        let mut level_noise = params.noise.abs();
        for n in noise.iter_mut() {
            *n = level_noise;
            level_noise *= params.decay;
        }

        let mut bounds = noise;
        for i in (0..LEVELS - 1).rev() {
            bounds[i] += bounds[i + 1];
        }
        if !bounds[0].is_finite() {
            return Err(VizError::GenerationFailure(format!(
                "noise {} with decay {} overflows the height range",
                params.noise, params.decay
            )));
        }

        let origin = SurfacePoint {
            x: 0,
            z: 0,
            height: bounds[0] / 2.0,
            level: 0,
        };

        Ok(Self {
            params: *params,
            noise,
            bounds,
            levels: 0,
            points: vec![origin],
            index: HashMap::from([([0, 0], 0)]),
        })
    }

    /// Run one subdivision step.
    ///
    /// Returns `Ok(false)` without changing anything once the level's noise
    /// has decayed to zero or the grid cannot be subdivided further.
    pub fn step(&mut self) -> Result<bool, VizError> {
        if self.levels >= LEVELS {
            return Ok(false);
        }
        let noise = self.noise[self.levels];
        if noise.abs() < EPSILON {
            return Ok(false);
        }

        let existing = self.points.len();
        let grown = existing * 4;
        if grown > MAX_POINTS {
            return Err(VizError::GenerationFailure(format!(
                "{grown} points exceed the limit of {MAX_POINTS}"
            )));
        }
        self.points
            .try_reserve_exact(grown - existing)
            .map_err(|e| VizError::GenerationFailure(format!("cannot grow to {grown} points: {e}")))?;
        self.index
            .try_reserve(grown - existing)
            .map_err(|e| VizError::GenerationFailure(format!("cannot index {grown} points: {e}")))?;

        let midpoint = (1u32 << 31) >> self.levels;
        let level = (self.levels + 1) as u8;

        for i in 0..existing {
            let start = self.points[i];
            for [dx, dz] in OFFSETS {
                // `start` sits on a multiple of 2 * midpoint, so this cannot overflow.
                let target = [start.x + midpoint * dx, start.z + midpoint * dz];
                let far = [
                    target[0].wrapping_add(midpoint * dx),
                    target[1].wrapping_add(midpoint * dz),
                ];
                let far_height = self.height_at(far).ok_or_else(|| {
                    VizError::GenerationFailure(format!("missing grid point {far:?}"))
                })?;

                let height = start.height * 0.5 + far_height * 0.5
                    + displacement(self.params.seed, [start.x, start.z], far, noise);

                self.index.insert(target, self.points.len());
                self.points.push(SurfacePoint {
                    x: target[0],
                    z: target[1],
                    height,
                    level,
                });
            }
        }

        self.levels += 1;
        Ok(true)
    }

    /// Step until at least `target` points exist or refinement stops.
    pub fn refine_to(&mut self, target: usize) -> Result<(), VizError> {
        while self.points.len() < target {
            if !self.step()? {
                break;
            }
        }
        Ok(())
    }

    pub fn height_at(&self, point: [u32; 2]) -> Option<f64> {
        self.index.get(&point).map(|&i| self.points[i].height)
    }

    /// Noise amplitude used at subdivision step `level`.
    pub fn noise(&self, level: usize) -> f64 {
        self.noise.get(level).copied().unwrap_or(0.0)
    }

    /// Largest total displacement still possible from step `level` onwards.
    pub fn upper_bound(&self, level: usize) -> f64 {
        self.bounds.get(level).copied().unwrap_or(0.0)
    }

    pub fn levels(&self) -> usize {
        self.levels
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn seed(&self) -> u64 {
        self.params.seed
    }

    pub fn into_point_set(self) -> PointSet {
        let max_height = self.upper_bound(0);
        PointSet::new(self.params, self.points, max_height, self.levels)
            .with_upper_bounds(self.bounds.to_vec())
    }
}

/// Seeded displacement in `[-noise / 2, noise / 2)` for the edge `from -> to`.
fn displacement(seed: u64, from: [u32; 2], to: [u32; 2], noise: f64) -> f64 {
    let hash = from
        .into_iter()
        .chain(to)
        .fold(mix(seed), |h, coord| mix(h ^ u64::from(coord)));
    let sampled = f64::from(hash as u32) % noise;
    sampled - noise * 0.5
}

/// SplitMix64 finalizer.
fn mix(mut z: u64) -> u64 {
    z = z.wrapping_add(0x9E37_79B9_7F4A_7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

use fracscape_core::GenerationParameters;
use std::collections::HashMap;

/// One generated point on the toroidal `u32` grid.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SurfacePoint {
    pub x: u32,
    pub z: u32,
    pub height: f64,
    /// Subdivision step that produced this point; the seed point is level 0.
    pub level: u8,
}

/// A generated point set in generation order, coarse levels first.
#[derive(Clone, Debug, PartialEq)]
pub struct PointSet {
    params: GenerationParameters,
    points: Vec<SurfacePoint>,
    index: HashMap<[u32; 2], usize>,
    /// `upper_bounds[level]` bounds the displacement still possible after
    /// `level` completed steps; entry 0 is the height bound of the whole set.
    upper_bounds: Vec<f64>,
    levels: usize,
}

impl PointSet {
    pub fn new(
        params: GenerationParameters,
        points: Vec<SurfacePoint>,
        max_height: f64,
        levels: usize,
    ) -> Self {
        let index = points
            .iter()
            .enumerate()
            .map(|(i, p)| ([p.x, p.z], i))
            .collect();
        Self {
            params,
            points,
            index,
            upper_bounds: vec![max_height],
            levels,
        }
    }

    /// Replace the per-level displacement bounds. `bounds[0]` becomes the
    /// height bound.
    pub fn with_upper_bounds(mut self, bounds: Vec<f64>) -> Self {
        if !bounds.is_empty() {
            self.upper_bounds = bounds;
        }
        self
    }

    /// Parameters this set was generated from.
    pub fn params(&self) -> &GenerationParameters {
        &self.params
    }

    pub fn points(&self) -> &[SurfacePoint] {
        &self.points
    }

    /// The first `count` points in generation order.
    pub fn prefix(&self, count: u32) -> &[SurfacePoint] {
        let count = usize::try_from(count).unwrap_or(usize::MAX);
        &self.points[..count.min(self.points.len())]
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn height_at(&self, point: [u32; 2]) -> Option<f64> {
        self.index.get(&point).map(|&i| self.points[i].height)
    }

    /// Upper bound on any height in the set; heights normalize against it.
    pub fn max_height(&self) -> f64 {
        self.upper_bound(0)
    }

    /// Largest total displacement still possible once `level` steps are done.
    pub fn upper_bound(&self, level: usize) -> f64 {
        self.upper_bounds.get(level).copied().unwrap_or(0.0)
    }

    /// Number of completed subdivision steps.
    pub fn levels(&self) -> usize {
        self.levels
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(x: u32, level: u8) -> SurfacePoint {
        SurfacePoint {
            x,
            z: 0,
            height: 1.0,
            level,
        }
    }

    #[test]
    fn prefix_is_capped_at_len() {
        let set = PointSet::new(
            GenerationParameters::default(),
            vec![point(0, 0), point(1, 1), point(2, 1)],
            2.0,
            1,
        );

        assert_eq!(set.prefix(0).len(), 0);
        assert_eq!(set.prefix(2), &set.points()[..2]);
        assert_eq!(set.prefix(u32::MAX).len(), 3);
    }

    #[test]
    fn height_lookup_by_grid_position() {
        let set = PointSet::new(
            GenerationParameters::default(),
            vec![point(0, 0), point(7, 1)],
            2.0,
            1,
        );

        assert_eq!(set.height_at([7, 0]), Some(1.0));
        assert_eq!(set.height_at([7, 7]), None);
    }

    #[test]
    fn upper_bounds_default_to_height_bound() {
        let set = PointSet::new(GenerationParameters::default(), vec![point(0, 0)], 2.0, 0);
        assert_eq!(set.max_height(), 2.0);
        assert_eq!(set.upper_bound(1), 0.0);

        let set = set.with_upper_bounds(vec![4.0, 2.0, 1.0]);
        assert_eq!(set.max_height(), 4.0);
        assert_eq!(set.upper_bound(2), 1.0);
    }
}

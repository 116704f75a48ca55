//! Upper envelope of a partially refined surface.
//!
//! Once the drawn prefix covers every point up to some level, each grid cell
//! at that level's spacing can only gain heights up to the highest of its four
//! corners plus the displacement still possible from the remaining steps.

use crate::{PointSet, SurfacePoint};

/// The deepest level whose points all lie within `drawn`.
pub fn complete_level(drawn: &[SurfacePoint]) -> Option<u8> {
    let last = drawn.last()?.level;
    let full = 1usize.checked_shl(2 * u32::from(last)).unwrap_or(usize::MAX);
    if drawn.len() >= full {
        Some(last)
    } else {
        last.checked_sub(1)
    }
}

/// One envelope vertex per cell of the completed grid, placed at the cell
/// center, for the first `count` points of `set`.
pub fn upper_envelope(set: &PointSet, count: u32) -> Vec<SurfacePoint> {
    let drawn = set.prefix(count);
    let Some(level) = complete_level(drawn) else {
        return Vec::new();
    };

    let bound = set.upper_bound(usize::from(level));
    let spacing = 1u64 << (32 - u32::from(level));
    let step = |coord: u32, by: u64| (u64::from(coord) + by) as u32;

    drawn
        .iter()
        .filter(|p| p.level <= level)
        .filter_map(|p| {
            let corners = [
                [p.x, p.z],
                [step(p.x, spacing), p.z],
                [p.x, step(p.z, spacing)],
                [step(p.x, spacing), step(p.z, spacing)],
            ];
            let highest = corners
                .into_iter()
                .filter_map(|corner| set.height_at(corner))
                .reduce(f64::max)?;

            Some(SurfacePoint {
                x: step(p.x, spacing / 2),
                z: step(p.z, spacing / 2),
                height: highest + bound,
                level,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FractalNoise;
    use fracscape_core::GenerationParameters;

    fn refined(points: usize) -> PointSet {
        let mut noise = FractalNoise::new(&GenerationParameters {
            seed: 11,
            noise: 10000.0,
            decay: 0.6,
        })
        .unwrap();
        noise.refine_to(points).unwrap();
        noise.into_point_set()
    }

    #[test]
    fn complete_level_needs_the_whole_grid() {
        let set = refined(256);
        assert_eq!(complete_level(set.prefix(0)), None);
        assert_eq!(complete_level(set.prefix(1)), Some(0));
        assert_eq!(complete_level(set.prefix(3)), Some(0));
        assert_eq!(complete_level(set.prefix(16)), Some(2));
        assert_eq!(complete_level(set.prefix(17)), Some(2));
        assert_eq!(complete_level(set.prefix(256)), Some(4));
    }

    #[test]
    fn one_vertex_per_cell() {
        let set = refined(256);
        assert!(upper_envelope(&set, 0).is_empty());
        assert_eq!(upper_envelope(&set, 1).len(), 1);
        assert_eq!(upper_envelope(&set, 20).len(), 16);
    }

    #[test]
    fn vertices_sit_at_cell_centers() {
        let set = refined(16);
        let quarter = 1u32 << 30;
        for vertex in upper_envelope(&set, 4) {
            assert_eq!(vertex.x % (2 * quarter), quarter);
            assert_eq!(vertex.z % (2 * quarter), quarter);
        }
    }

    #[test]
    fn envelope_covers_later_refinement() {
        let set = refined(4096);
        let level = 3;
        let spacing = 1u64 << (32 - level);
        let envelope = upper_envelope(&set, 64);

        for point in set.points().iter().filter(|p| p.level > level as u8) {
            let cell = |c: u32| (u64::from(c) / spacing * spacing + spacing / 2) as u32;
            let vertex = envelope
                .iter()
                .find(|v| v.x == cell(point.x) && v.z == cell(point.z))
                .unwrap();
            assert!(
                point.height <= vertex.height,
                "{point:?} above envelope {vertex:?}"
            );
        }
    }
}

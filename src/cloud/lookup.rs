//! Lookup-table accelerated point-cloud recognizer
//!
//! Same correspondence as the greedy matcher, made cheap three ways:
//! squared distances throughout, a per-template lookup table mapping every
//! coarse grid cell to its nearest template point, and cumulative
//! lower bounds that let whole starting offsets be skipped when they
//! cannot beat the best distance found so far. A lower bound never exceeds
//! the true cost of its offset, so pruning never changes the result.

use tracing::debug;

use crate::geometry::point::Point;
use crate::gesture::Gesture;
use crate::recognizer::{Recognition, RecognizeOptions, Recognizer};
use crate::Result;

use super::point_cloud::PointCloud;

/// Quantized coordinates range over `[0, MAX_INT_COORD)`.
pub const MAX_INT_COORD: u32 = 1024;

/// The lookup table is `LUT_SIZE` x `LUT_SIZE` coarse cells.
pub const LUT_SIZE: usize = 64;

/// Divides a quantized coordinate down to its lookup-table cell.
const LUT_SCALE: u32 = MAX_INT_COORD / LUT_SIZE as u32;

/// A point-cloud template with quantized coordinates and the cell-to-
/// nearest-point lookup table, built once at construction and read-only
/// afterward.
#[derive(Debug, Clone)]
pub struct IndexedCloud {
    pub name: String,
    pub points: Vec<Point>,
    int_coords: Vec<(u32, u32)>,
    lut: Box<[[u16; LUT_SIZE]; LUT_SIZE]>,
}

impl IndexedCloud {
    pub fn new(name: &str, raw: &[Point], n: usize) -> Self {
        let cloud = PointCloud::new(name, raw, n);
        let int_coords = make_int_coords(&cloud.points);
        let lut = compute_lut(&int_coords);
        Self {
            name: cloud.name,
            points: cloud.points,
            int_coords,
            lut,
        }
    }
}

/// Quantize normalized coordinates (centroid at the origin, unit-box scale,
/// so every coordinate sits in [-1, 1]) onto the integer grid.
fn make_int_coords(points: &[Point]) -> Vec<(u32, u32)> {
    let span = (MAX_INT_COORD - 1) as f64;
    points
        .iter()
        .map(|p| {
            let ix = ((p.x + 1.0) / 2.0 * span).round().clamp(0.0, span) as u32;
            let iy = ((p.y + 1.0) / 2.0 * span).round().clamp(0.0, span) as u32;
            (ix, iy)
        })
        .collect()
}

/// For every coarse cell, the index of the nearest cloud point.
fn compute_lut(int_coords: &[(u32, u32)]) -> Box<[[u16; LUT_SIZE]; LUT_SIZE]> {
    let mut lut = Box::new([[0u16; LUT_SIZE]; LUT_SIZE]);
    for x in 0..LUT_SIZE as u32 {
        for y in 0..LUT_SIZE as u32 {
            let mut index = 0;
            let mut best = u32::MAX;
            for (i, &(ix, iy)) in int_coords.iter().enumerate() {
                let row = ix / LUT_SCALE;
                let col = iy / LUT_SCALE;
                let d = (row.abs_diff(x)).pow(2) + (col.abs_diff(y)).pow(2);
                if d < best {
                    best = d;
                    index = i;
                }
            }
            lut[x as usize][y as usize] = index as u16;
        }
    }
    lut
}

/// Per-offset lower bounds on the weighted assignment cost of walking
/// `pts1` against `pts2`, one bound per subsampled starting offset.
///
/// Each point's distance to its (table-approximated) nearest counterpart
/// is a floor on whatever the greedy assignment will pay for it; a
/// cumulative-sum identity shifts the position weights for every other
/// offset without rescanning.
fn compute_lower_bounds(
    pts1: &[Point],
    int_coords1: &[(u32, u32)],
    pts2: &[Point],
    step: usize,
    lut2: &[[u16; LUT_SIZE]; LUT_SIZE],
) -> Vec<f64> {
    let n = pts1.len();
    let mut bounds = Vec::with_capacity(n / step + 1);
    let mut sat = vec![0.0; n];
    let mut first = 0.0;
    for i in 0..n {
        let (ix, iy) = int_coords1[i];
        let index = lut2[(ix / LUT_SCALE) as usize][(iy / LUT_SCALE) as usize] as usize;
        let d = pts1[i].squared_distance_to(&pts2[index]);
        sat[i] = if i == 0 { d } else { sat[i - 1] + d };
        first += (n - i) as f64 * d;
    }
    bounds.push(first);
    let mut i = step;
    while i < n {
        bounds.push(first + i as f64 * sat[n - 1] - n as f64 * sat[i - 1]);
        i += step;
    }
    bounds
}

/// Weighted greedy assignment cost from `start`, abandoning as soon as the
/// partial sum reaches `min_so_far`. Weights run from `n` down to 1.
fn cloud_distance(pts1: &[Point], pts2: &[Point], start: usize, min_so_far: f64) -> f64 {
    let n = pts1.len();
    let mut unmatched: Vec<usize> = (0..n).collect();
    let mut i = start;
    let mut weight = n as f64;
    let mut sum = 0.0;
    loop {
        let mut u = 0;
        let mut best = f64::INFINITY;
        for (j, &candidate) in unmatched.iter().enumerate() {
            let d = pts1[i].squared_distance_to(&pts2[candidate]);
            if d < best {
                best = d;
                u = j;
            }
        }
        unmatched.remove(u);
        sum += weight * best;
        if sum >= min_so_far {
            return sum;
        }
        weight -= 1.0;
        i = (i + 1) % n;
        if i == start {
            break;
        }
    }
    sum
}

/// Best weighted assignment between two clouds, skipping any offset whose
/// lower bound cannot beat `min_so_far`.
pub(crate) fn cloud_match(candidate: &IndexedCloud, template: &IndexedCloud, min_so_far: f64) -> f64 {
    let n = candidate.points.len();
    let step = (n as f64).powf(0.5).floor() as usize;

    let lb1 = compute_lower_bounds(
        &candidate.points,
        &candidate.int_coords,
        &template.points,
        step,
        &template.lut,
    );
    let lb2 = compute_lower_bounds(
        &template.points,
        &template.int_coords,
        &candidate.points,
        step,
        &candidate.lut,
    );

    let mut min = min_so_far;
    let mut i = 0;
    let mut j = 0;
    while i < n {
        if lb1[j] < min {
            min = min.min(cloud_distance(&candidate.points, &template.points, i, min));
        }
        if lb2[j] < min {
            min = min.min(cloud_distance(&template.points, &candidate.points, i, min));
        }
        i += step;
        j += 1;
    }
    min
}

/// Exhaustive variant: every subsampled offset in both directions, no
/// lower-bound pruning and no early abandonment. Exists to demonstrate the
/// pruning is purely a performance optimization.
pub(crate) fn exhaustive_cloud_match(candidate: &IndexedCloud, template: &IndexedCloud) -> f64 {
    let n = candidate.points.len();
    let step = (n as f64).powf(0.5).floor() as usize;
    let mut min = f64::INFINITY;
    let mut i = 0;
    while i < n {
        min = min.min(cloud_distance(&candidate.points, &template.points, i, f64::INFINITY));
        min = min.min(cloud_distance(&template.points, &candidate.points, i, f64::INFINITY));
        i += step;
    }
    min
}

/// Lookup-table accelerated point-cloud matcher.
pub struct LookupCloud {
    resample_count: usize,
    templates: Vec<IndexedCloud>,
}

impl LookupCloud {
    pub fn new(resample_count: usize) -> Self {
        Self {
            resample_count,
            templates: Vec::new(),
        }
    }

    pub fn template_count(&self) -> usize {
        self.templates.len()
    }
}

impl Recognizer for LookupCloud {
    fn add_template(&mut self, name: &str, gesture: &Gesture) -> Result<u32> {
        gesture.require_points(2)?;
        self.templates
            .push(IndexedCloud::new(name, &gesture.combined(), self.resample_count));
        let count = self.templates.iter().filter(|t| t.name == name).count() as u32;
        debug!(class = name, count, "registered indexed cloud template");
        Ok(count)
    }

    fn recognize(&self, gesture: &Gesture, _options: &RecognizeOptions) -> Result<Recognition> {
        gesture.require_points(2)?;
        let candidate = IndexedCloud::new("", &gesture.combined(), self.resample_count);
        let mut best: Option<&IndexedCloud> = None;
        let mut min = f64::INFINITY;
        for template in &self.templates {
            let d = cloud_match(&candidate, template, min);
            if d < min {
                min = d;
                best = Some(template);
            }
        }
        Ok(match best {
            Some(template) => {
                debug!(class = %template.name, distance = min, "indexed cloud match");
                Recognition::matched(&template.name, min)
            }
            None => Recognition::no_match(),
        })
    }

    fn clear_templates(&mut self) {
        self.templates.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wave() -> Vec<Point> {
        (0..40)
            .map(|i| Point::new(i as f64 * 4.0, 30.0 * (i as f64 * 0.4).sin()))
            .collect()
    }

    fn staircase() -> Vec<Point> {
        (0..40)
            .map(|i| Point::new((i / 2) as f64 * 8.0, ((i + 1) / 2) as f64 * 8.0))
            .collect()
    }

    #[test]
    fn test_int_coords_in_range() {
        let cloud = IndexedCloud::new("wave", &wave(), 32);
        for &(ix, iy) in &cloud.int_coords {
            assert!(ix < MAX_INT_COORD);
            assert!(iy < MAX_INT_COORD);
        }
    }

    #[test]
    fn test_lut_maps_cells_to_nearest_point() {
        let cloud = IndexedCloud::new("wave", &wave(), 32);
        let cell_distance = |i: usize, x: usize, y: usize| {
            let (ix, iy) = cloud.int_coords[i];
            let row = (ix / LUT_SCALE) as i64;
            let col = (iy / LUT_SCALE) as i64;
            (row - x as i64).pow(2) + (col - y as i64).pow(2)
        };
        for x in (0..LUT_SIZE).step_by(7) {
            for y in (0..LUT_SIZE).step_by(7) {
                let chosen = cloud.lut[x][y] as usize;
                let best = (0..cloud.points.len())
                    .map(|i| cell_distance(i, x, y))
                    .min()
                    .unwrap();
                assert_eq!(cell_distance(chosen, x, y), best);
            }
        }
    }

    #[test]
    fn test_self_distance_is_zero() {
        let cloud = IndexedCloud::new("wave", &wave(), 32);
        let d = cloud_match(&cloud, &cloud, f64::INFINITY);
        assert!(d.abs() < 1e-12);
    }

    #[test]
    fn test_pruned_equals_exhaustive() {
        let wave_cloud = IndexedCloud::new("wave", &wave(), 32);
        let stair_cloud = IndexedCloud::new("stair", &staircase(), 32);
        for (a, b) in [(&wave_cloud, &stair_cloud), (&stair_cloud, &wave_cloud)] {
            let pruned = cloud_match(a, b, f64::INFINITY);
            let exhaustive = exhaustive_cloud_match(a, b);
            assert!(
                (pruned - exhaustive).abs() < 1e-12,
                "pruned {} != exhaustive {}",
                pruned,
                exhaustive
            );
        }
    }

    #[test]
    fn test_self_match() {
        let mut recognizer = LookupCloud::new(32);
        recognizer.add_template("wave", &Gesture::from_points(wave())).unwrap();
        recognizer.add_template("stair", &Gesture::from_points(staircase())).unwrap();
        let result = recognizer
            .recognize(&Gesture::from_points(wave()), &RecognizeOptions::default())
            .unwrap();
        assert_eq!(result.label.as_deref(), Some("wave"));
        assert!(result.score < 1e-9);
    }

    #[test]
    fn test_recognize_scaled_copy() {
        let mut recognizer = LookupCloud::new(32);
        recognizer.add_template("wave", &Gesture::from_points(wave())).unwrap();
        recognizer.add_template("stair", &Gesture::from_points(staircase())).unwrap();
        let bigger: Vec<Point> = wave().iter().map(|p| Point::new(p.x * 3.0, p.y * 3.0)).collect();
        let result = recognizer
            .recognize(&Gesture::from_points(bigger), &RecognizeOptions::default())
            .unwrap();
        assert_eq!(result.label.as_deref(), Some("wave"));
    }
}

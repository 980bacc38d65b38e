//! Multistroke geometric recognizer
//!
//! Reduces a multi-stroke gesture to a set of unistroke representations by
//! enumerating every stroke-order permutation and every per-stroke
//! direction, then matches candidates against the best of them. A start
//! direction filter cheaply rejects unistrokes that begin more than 30
//! degrees apart from the candidate.

use tracing::debug;

use crate::geometry::normalize::angle_between_unit_vectors;
use crate::geometry::point::Point;
use crate::gesture::Gesture;
use crate::recognizer::{Recognition, RecognizeOptions, Recognizer};
use crate::Result;

use super::unistroke::{
    distance_at_best_angle, optimal_cosine_distance, Unistroke, ANGLE_PRECISION, ANGLE_RANGE,
};

/// Start vectors further apart than this are assumed not to match
/// (30 degrees).
pub const ANGLE_SIMILARITY_THRESHOLD: f64 = 30.0 * std::f64::consts::PI / 180.0;

/// One registered multistroke gesture: every stroke-order and direction
/// combination, sharing the class name.
#[derive(Debug, Clone)]
pub struct MultiStrokeTemplate {
    pub name: String,
    /// Strokes the gesture was registered with.
    pub stroke_count: usize,
    /// One unistroke per (order permutation x direction) combination:
    /// `stroke_count! * 2^stroke_count` entries.
    pub unistrokes: Vec<Unistroke>,
}

impl MultiStrokeTemplate {
    fn new(
        name: &str,
        strokes: &[Vec<Point>],
        n: usize,
        bounded_rotation: bool,
        use_protractor: bool,
    ) -> Self {
        let orders = heap_permutations(strokes.len());
        let unistrokes = unistroke_variants(strokes, &orders)
            .into_iter()
            .map(|points| Unistroke::multi(name, &points, n, bounded_rotation, use_protractor))
            .collect();
        Self {
            name: name.to_string(),
            stroke_count: strokes.len(),
            unistrokes,
        }
    }
}

/// All permutations of `0..k` via Heap's algorithm.
///
/// Iteration order carries no meaning beyond covering each permutation
/// exactly once.
pub fn heap_permutations(k: usize) -> Vec<Vec<usize>> {
    let mut order: Vec<usize> = (0..k).collect();
    let mut orders = Vec::new();
    permute(k, &mut order, &mut orders);
    orders
}

fn permute(n: usize, order: &mut Vec<usize>, orders: &mut Vec<Vec<usize>>) {
    if n <= 1 {
        orders.push(order.clone());
        return;
    }
    for i in 0..n {
        permute(n - 1, order, orders);
        if n % 2 == 1 {
            order.swap(0, n - 1);
        } else {
            order.swap(i, n - 1);
        }
    }
}

/// Concatenate `strokes` into one unistroke per (order, direction)
/// combination. Bit `i` of the direction index reverses the stroke at
/// position `i` of the order.
pub fn unistroke_variants(strokes: &[Vec<Point>], orders: &[Vec<usize>]) -> Vec<Vec<Point>> {
    let mut variants = Vec::with_capacity(orders.len() << strokes.len());
    for order in orders {
        for direction in 0u32..(1 << order.len()) {
            let mut unistroke = Vec::new();
            for (i, &stroke_index) in order.iter().enumerate() {
                if (direction >> i) & 1 == 1 {
                    unistroke.extend(strokes[stroke_index].iter().rev().copied());
                } else {
                    unistroke.extend(strokes[stroke_index].iter().copied());
                }
            }
            variants.push(unistroke);
        }
    }
    variants
}

/// Multistroke geometric template matcher.
pub struct MultiStroke {
    resample_count: usize,
    bounded_rotation: bool,
    use_protractor: bool,
    templates: Vec<MultiStrokeTemplate>,
}

impl MultiStroke {
    pub fn new(resample_count: usize, bounded_rotation: bool, use_protractor: bool) -> Self {
        Self {
            resample_count,
            bounded_rotation,
            use_protractor,
            templates: Vec::new(),
        }
    }

    pub fn template_count(&self) -> usize {
        self.templates.len()
    }

    fn distance(&self, candidate: &Unistroke, template: &Unistroke) -> f64 {
        if self.use_protractor {
            optimal_cosine_distance(
                template.vector.as_deref().unwrap_or_default(),
                candidate.vector.as_deref().unwrap_or_default(),
            )
        } else {
            distance_at_best_angle(
                &candidate.points,
                &template.points,
                -ANGLE_RANGE,
                ANGLE_RANGE,
                ANGLE_PRECISION,
            )
        }
    }
}

impl Recognizer for MultiStroke {
    fn add_template(&mut self, name: &str, gesture: &Gesture) -> Result<u32> {
        gesture.require_points(2)?;
        let template = MultiStrokeTemplate::new(
            name,
            gesture.strokes(),
            self.resample_count,
            self.bounded_rotation,
            self.use_protractor,
        );
        debug!(
            class = name,
            strokes = template.stroke_count,
            variants = template.unistrokes.len(),
            "registered multistroke template"
        );
        self.templates.push(template);
        Ok(self.templates.iter().filter(|t| t.name == name).count() as u32)
    }

    fn recognize(&self, gesture: &Gesture, options: &RecognizeOptions) -> Result<Recognition> {
        gesture.require_points(2)?;
        let candidate = Unistroke::multi(
            "",
            &gesture.combined(),
            self.resample_count,
            self.bounded_rotation,
            self.use_protractor,
        );
        let mut best: Option<(&MultiStrokeTemplate, f64)> = None;
        for template in &self.templates {
            if options.require_matching_stroke_count
                && gesture.stroke_count() != template.stroke_count
            {
                continue;
            }
            for unistroke in &template.unistrokes {
                // strokes must start in roughly the same direction
                let angle = angle_between_unit_vectors(
                    &candidate.start_vector,
                    &unistroke.start_vector,
                );
                if angle > ANGLE_SIMILARITY_THRESHOLD {
                    continue;
                }
                let d = self.distance(&candidate, unistroke);
                if best.map_or(true, |(_, b)| d < b) {
                    best = Some((template, d));
                }
            }
        }
        Ok(match best {
            Some((template, distance)) => {
                debug!(class = %template.name, distance, "multistroke match");
                Recognition::matched(&template.name, distance)
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

    fn plus_sign() -> Vec<Vec<Point>> {
        vec![
            (0..8).map(|i| Point::new(i as f64 * 10.0, 35.0)).collect(),
            (0..8).map(|i| Point::new(35.0, i as f64 * 10.0)).collect(),
        ]
    }

    fn ex_mark() -> Vec<Vec<Point>> {
        vec![
            (0..8).map(|i| Point::new(i as f64 * 10.0, i as f64 * 10.0)).collect(),
            (0..8).map(|i| Point::new(70.0 - i as f64 * 10.0, i as f64 * 10.0)).collect(),
        ]
    }

    #[test]
    fn test_heap_permutations_counts() {
        assert_eq!(heap_permutations(1).len(), 1);
        assert_eq!(heap_permutations(2).len(), 2);
        assert_eq!(heap_permutations(3).len(), 6);
        assert_eq!(heap_permutations(4).len(), 24);
    }

    #[test]
    fn test_heap_permutations_are_distinct() {
        let mut orders = heap_permutations(4);
        orders.sort();
        orders.dedup();
        assert_eq!(orders.len(), 24);
    }

    #[test]
    fn test_variant_count() {
        let strokes = plus_sign();
        let orders = heap_permutations(strokes.len());
        let variants = unistroke_variants(&strokes, &orders);
        // k! * 2^k with k = 2
        assert_eq!(variants.len(), 8);
        for v in &variants {
            assert_eq!(v.len(), 16);
        }
    }

    #[test]
    fn test_template_holds_all_variants() {
        let mut recognizer = MultiStroke::new(32, false, false);
        recognizer
            .add_template("plus", &Gesture::from_strokes(plus_sign()))
            .unwrap();
        assert_eq!(recognizer.templates[0].unistrokes.len(), 8);
    }

    #[test]
    fn test_recognizes_reordered_reversed_strokes() {
        let mut recognizer = MultiStroke::new(32, false, false);
        recognizer
            .add_template("plus", &Gesture::from_strokes(plus_sign()))
            .unwrap();
        recognizer
            .add_template("ex", &Gesture::from_strokes(ex_mark()))
            .unwrap();

        // draw the plus with the stroke order swapped and one stroke
        // reversed; the enumeration should still find it
        let strokes = plus_sign();
        let redrawn = vec![
            strokes[1].iter().rev().copied().collect::<Vec<_>>(),
            strokes[0].clone(),
        ];
        let result = recognizer
            .recognize(&Gesture::from_strokes(redrawn), &RecognizeOptions::default())
            .unwrap();
        assert_eq!(result.label.as_deref(), Some("plus"));
    }

    #[test]
    fn test_stroke_count_restriction() {
        let mut recognizer = MultiStroke::new(32, false, false);
        recognizer
            .add_template("plus", &Gesture::from_strokes(plus_sign()))
            .unwrap();

        // single-stroke candidate cannot match a two-stroke template when
        // the restriction is on
        let single = Gesture::from_points(plus_sign().concat());
        let options = RecognizeOptions { require_matching_stroke_count: true };
        let result = recognizer.recognize(&single, &options).unwrap();
        assert!(result.label.is_none());
    }

    #[test]
    fn test_protractor_variant_self_match() {
        let mut recognizer = MultiStroke::new(32, false, true);
        recognizer
            .add_template("plus", &Gesture::from_strokes(plus_sign()))
            .unwrap();
        recognizer
            .add_template("ex", &Gesture::from_strokes(ex_mark()))
            .unwrap();
        let result = recognizer
            .recognize(&Gesture::from_strokes(plus_sign()), &RecognizeOptions::default())
            .unwrap();
        assert_eq!(result.label.as_deref(), Some("plus"));
    }
}

/// Spread below this counts as no spread at all.
const RANGE_EPSILON: f64 = 1e-9;

/// Rescales a column to [0, 1] by its observed min and max. A column with no
/// spread maps to all zeros rather than dividing by nothing.
pub fn min_max_scale(values: &[f64]) -> Vec<f64> {
    let Some(first) = values.first().copied() else {
        return Vec::new();
    };

    let mut min = first;
    let mut max = first;
    for &v in &values[1..] {
        if v < min {
            min = v;
        }
        if v > max {
            max = v;
        }
    }

    let range = max - min;
    if range.abs() < RANGE_EPSILON {
        return vec![0.0; values.len()];
    }

    values.iter().map(|v| (v - min) / range).collect()
}

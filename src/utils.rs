//! general utilities for building and resampling axes

/// `count` evenly spaced values from `start` to `end`, both ends included
///
/// a single value yields `[start]`, like numpy's `linspace`
pub fn linspace(start: f64, end: f64, count: usize) -> Vec<f64> {
    match count {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (count - 1) as f64;
            let mut values: Vec<f64> = (0..count).map(|i| start + step * i as f64).collect();
            // exact upper bound, accumulated step can be off by an ulp
            values[count - 1] = end;
            values
        }
    }
}

/// every `stride`-th value beginning with the first one, `data[::stride]`
///
/// `stride` must be at least 1
pub(crate) fn strided<T: Clone>(data: &[T], stride: usize) -> Vec<T> {
    debug_assert!(stride >= 1);
    data.iter().step_by(stride).cloned().collect()
}

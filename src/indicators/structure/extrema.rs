//! Local extrema over a symmetric window.
//!
//! A point at index `i` is a local maximum of order `k` when it is greater
//! than or equal to every value in `i-k..=i+k`; ties qualify. Points with
//! fewer than `k` neighbours on either side never qualify, and a window
//! containing NaN never qualifies.

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

pub const DEFAULT_EXTREMA_ORDER: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExtremumMode {
    Max,
    Min,
}

/// Indices of local extrema, ascending. Runs in O(n) with a monotonic window.
pub fn find_local_extrema(values: &[f64], order: usize, mode: ExtremumMode) -> Vec<usize> {
    match mode {
        ExtremumMode::Max => sliding_maxima(values, order),
        ExtremumMode::Min => {
            let negated: Vec<f64> = values.iter().map(|v| -v).collect();
            sliding_maxima(&negated, order)
        }
    }
}

/// Windowed comparison scan, O(n·k). Produces exactly the same indices as
/// [`find_local_extrema`].
pub fn scan_local_extrema(values: &[f64], order: usize, mode: ExtremumMode) -> Vec<usize> {
    let n = values.len();
    if n < 2 * order + 1 {
        return Vec::new();
    }

    (order..n - order)
        .filter(|&i| {
            let center = values[i];
            if center.is_nan() {
                return false;
            }
            (i - order..=i + order).all(|j| match mode {
                ExtremumMode::Max => center >= values[j],
                ExtremumMode::Min => center <= values[j],
            })
        })
        .collect()
}

fn sliding_maxima(values: &[f64], order: usize) -> Vec<usize> {
    let n = values.len();
    let width = 2 * order + 1;
    if n < width {
        return Vec::new();
    }

    let mut nan_prefix = vec![0usize; n + 1];
    for (i, v) in values.iter().enumerate() {
        nan_prefix[i + 1] = nan_prefix[i] + usize::from(v.is_nan());
    }

    // Indices of non-NaN values with strictly decreasing values front to back.
    let mut window: VecDeque<usize> = VecDeque::with_capacity(width);
    let mut extrema = Vec::new();

    for (j, &value) in values.iter().enumerate() {
        if !value.is_nan() {
            while window.back().is_some_and(|&back| values[back] <= value) {
                window.pop_back();
            }
            window.push_back(j);
        }

        if j + 1 < width {
            continue;
        }

        let start = j + 1 - width;
        while window.front().is_some_and(|&front| front < start) {
            window.pop_front();
        }

        if nan_prefix[j + 1] - nan_prefix[start] > 0 {
            continue;
        }

        let center = j - order;
        if let Some(&front) = window.front() {
            if values[center] >= values[front] {
                extrema.push(center);
            }
        }
    }

    extrema
}

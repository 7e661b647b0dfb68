//! 2-opt local search

use crate::defaults::{TWO_OPT_EPSILON_MILES, TWO_OPT_MAX_SWEEPS};

/// Improve an open path by reversing interior segments.
///
/// The first and last positions are anchors and never move. Reversals are
/// applied as soon as they are found (first improvement); sweeps repeat until
/// one finds nothing or the sweep cap is hit. Paths shorter than four are
/// returned as given.
pub fn two_opt(matrix: &[Vec<f64>], mut order: Vec<usize>) -> Vec<usize> {
    let n = order.len();
    if n < 4 {
        return order;
    }

    let mut improved = true;
    let mut sweeps = 0;

    while improved && sweeps < TWO_OPT_MAX_SWEEPS {
        improved = false;
        sweeps += 1;

        for i in 1..n - 1 {
            for k in i + 1..n - 1 {
                if would_improve_2opt(matrix, &order, i, k) {
                    order[i..=k].reverse();
                    improved = true;
                }
            }
        }
    }

    order
}

/// Check if reversing `order[i..=k]` shortens the path by more than the
/// epsilon. Only the two boundary edges change on a symmetric matrix.
fn would_improve_2opt(matrix: &[Vec<f64>], order: &[usize], i: usize, k: usize) -> bool {
    let a = order[i - 1];
    let b = order[i];
    let c = order[k];
    let d = order[k + 1];

    let current_dist = matrix[a][b] + matrix[c][d];
    let new_dist = matrix[a][c] + matrix[b][d];

    new_dist < current_dist - TWO_OPT_EPSILON_MILES
}

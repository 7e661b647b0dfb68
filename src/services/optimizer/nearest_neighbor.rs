//! Nearest-neighbor tour construction

/// Build a visiting order for `group` (indices into `matrix`).
///
/// The first element stays the start of the tour; each following stop is the
/// closest unvisited one to the last placed stop. Ties go to whichever comes
/// first in the remaining list. Groups of two or fewer are returned as given.
pub fn nearest_neighbor(matrix: &[Vec<f64>], group: &[usize]) -> Vec<usize> {
    if group.len() <= 2 {
        return group.to_vec();
    }

    let mut order = Vec::with_capacity(group.len());
    let mut remaining: Vec<usize> = group[1..].to_vec();
    let mut current = group[0];
    order.push(current);

    while !remaining.is_empty() {
        let mut best_pos = 0;
        let mut best_dist = f64::MAX;

        for (pos, &candidate) in remaining.iter().enumerate() {
            let dist = matrix[current][candidate];
            if dist < best_dist {
                best_dist = dist;
                best_pos = pos;
            }
        }

        current = remaining.remove(best_pos);
        order.push(current);
    }

    order
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Points on a line at the given positions; distance is |a - b|
    fn line_matrix(positions: &[f64]) -> Vec<Vec<f64>> {
        positions
            .iter()
            .map(|a| positions.iter().map(|b| (a - b).abs()).collect())
            .collect()
    }

    #[test]
    fn test_small_groups_are_unchanged() {
        let matrix = line_matrix(&[5.0, 0.0, 9.0]);
        assert_eq!(nearest_neighbor(&matrix, &[]), Vec::<usize>::new());
        assert_eq!(nearest_neighbor(&matrix, &[2]), vec![2]);
        assert_eq!(nearest_neighbor(&matrix, &[2, 0]), vec![2, 0]);
    }

    #[test]
    fn test_first_stop_is_kept_as_start() {
        let matrix = line_matrix(&[10.0, 0.0, 1.0, 2.0]);
        let order = nearest_neighbor(&matrix, &[0, 1, 2, 3]);
        // From 10: nearest 2 (pos 2.0), then 1.0, then 0.0
        assert_eq!(order, vec![0, 3, 2, 1]);
    }

    #[test]
    fn test_ties_prefer_earliest_remaining() {
        // Stops 1 and 2 are both 1.0 away from stop 0
        let matrix = line_matrix(&[0.0, 1.0, -1.0, 5.0]);
        let order = nearest_neighbor(&matrix, &[0, 1, 2, 3]);
        assert_eq!(order, vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_works_on_a_subset_of_matrix_indices() {
        let matrix = line_matrix(&[0.0, 100.0, 3.0, 50.0, 1.0]);
        let order = nearest_neighbor(&matrix, &[2, 3, 4]);
        assert_eq!(order, vec![2, 4, 3]);
    }
}

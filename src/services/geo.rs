//! Geographic calculations

use crate::defaults::EARTH_RADIUS_MILES;
use crate::types::Coordinates;

/// Haversine (great-circle) distance between two points in miles
pub fn haversine_miles(from: &Coordinates, to: &Coordinates) -> f64 {
    let d_lat = (to.lat - from.lat).to_radians();
    let d_lon = (to.lng - from.lng).to_radians();

    let lat1 = from.lat.to_radians();
    let lat2 = to.lat.to_radians();

    let a = (d_lat / 2.0).sin().powi(2)
        + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);

    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_MILES * c
}

/// Calculate distance matrix between all points
/// Returns a 2D vector where matrix[i][j] is miles from point i to point j
pub fn distance_matrix(points: &[Coordinates]) -> Vec<Vec<f64>> {
    let n = points.len();
    let mut matrix = vec![vec![0.0; n]; n];

    for i in 0..n {
        for j in (i + 1)..n {
            let d = haversine_miles(&points[i], &points[j]);
            matrix[i][j] = d;
            matrix[j][i] = d;
        }
    }

    matrix
}

/// Length of an open path (no return leg) visiting `order` through `matrix`
pub fn path_distance(matrix: &[Vec<f64>], order: &[usize]) -> f64 {
    order.windows(2).map(|leg| matrix[leg[0]][leg[1]]).sum()
}

/// Length of an open path through the points as given
pub fn points_distance(points: &[Coordinates]) -> f64 {
    points
        .windows(2)
        .map(|leg| haversine_miles(&leg[0], &leg[1]))
        .sum()
}

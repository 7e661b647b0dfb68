//! Route optimizer
//!
//! Stops are split into scheduling groups (priority, morning, afternoon,
//! anytime). Each group is ordered by nearest neighbor and then improved with
//! 2-opt. Groups are concatenated in that fixed order, so optimization never
//! moves a stop across a group boundary.

mod nearest_neighbor;
mod two_opt;

pub use nearest_neighbor::nearest_neighbor;
pub use two_opt::two_opt;

use tracing::debug;

use crate::services::geo;
use crate::types::{RouteStop, TimeWindow};

/// Scheduling group, in visiting order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum StopGroup {
    Priority,
    Morning,
    Afternoon,
    Anytime,
}

impl StopGroup {
    pub const ALL: [StopGroup; 4] = [
        StopGroup::Priority,
        StopGroup::Morning,
        StopGroup::Afternoon,
        StopGroup::Anytime,
    ];

    /// Priority wins over the time window
    pub fn of(stop: &RouteStop) -> Self {
        if stop.is_priority {
            return StopGroup::Priority;
        }
        match stop.time_window {
            Some(TimeWindow::Morning) => StopGroup::Morning,
            Some(TimeWindow::Afternoon) => StopGroup::Afternoon,
            None => StopGroup::Anytime,
        }
    }
}

/// Optimized visiting order as indices into `stops`
pub fn optimize_order(stops: &[RouteStop]) -> Vec<usize> {
    let points: Vec<_> = stops.iter().map(RouteStop::coordinates).collect();
    let matrix = geo::distance_matrix(&points);

    let mut order = Vec::with_capacity(stops.len());
    for group in StopGroup::ALL {
        let members: Vec<usize> = stops
            .iter()
            .enumerate()
            .filter(|(_, s)| StopGroup::of(s) == group)
            .map(|(i, _)| i)
            .collect();

        if members.len() <= 1 {
            order.extend(members);
            continue;
        }

        let constructed = nearest_neighbor(&matrix, &members);
        let refined = two_opt(&matrix, constructed);
        debug!(
            "{:?} group: {} stops, {:.2} mi",
            group,
            refined.len(),
            geo::path_distance(&matrix, &refined)
        );
        order.extend(refined);
    }

    order
}

/// Stops in optimized visiting order
pub fn optimize(stops: &[RouteStop]) -> Vec<RouteStop> {
    optimize_order(stops)
        .into_iter()
        .map(|i| stops[i].clone())
        .collect()
}

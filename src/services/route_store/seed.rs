//! Initial route set for a fresh store

use chrono::{Duration, NaiveDate};

use crate::db::Directory;
use crate::defaults::{default_day_start, format_arrival};
use crate::services::geocoding::Geocoder;
use crate::types::{Route, StopStatus, TimeWindow};

use super::{resolve_coordinates, stop_for_customer};

/// Stops handed to the first technician; each later one gets two more
const BASE_STOPS_PER_TECHNICIAN: usize = 4;
const EXTRA_STOPS_PER_TECHNICIAN: usize = 2;

/// Spread directory customers round-robin over technicians.
///
/// Technician `t` takes every customer whose index is `t` modulo the
/// technician count, capped at `4 + 2t` stops. The first two stops are
/// completed, the third in progress, and the first half of the day is
/// tagged morning. Routes come back without metrics; the repository
/// recomputes them.
pub fn initial_routes(
    directory: &dyn Directory,
    geocoder: &dyn Geocoder,
    date: NaiveDate,
) -> Vec<Route> {
    let technicians = directory.technicians();
    let customers = directory.customers();
    let technician_count = technicians.len();

    technicians
        .iter()
        .enumerate()
        .map(|(tech_index, technician)| {
            let assigned: Vec<_> = customers
                .iter()
                .enumerate()
                .filter(|(i, _)| i % technician_count == tech_index)
                .map(|(_, c)| c)
                .take(BASE_STOPS_PER_TECHNICIAN + tech_index * EXTRA_STOPS_PER_TECHNICIAN)
                .collect();

            let morning_count = assigned.len().div_ceil(2);
            let mut route = Route::new(technician, date);

            for (index, customer) in assigned.into_iter().enumerate() {
                let coordinates = resolve_coordinates(customer, directory, geocoder);
                let window = if index < morning_count {
                    TimeWindow::Morning
                } else {
                    TimeWindow::Afternoon
                };
                let arrival = default_day_start() + Duration::hours(index as i64);

                let mut stop = stop_for_customer(
                    customer,
                    index as u32 + 1,
                    coordinates,
                    Some(window),
                    false,
                    format_arrival(arrival),
                );
                stop.status = match index {
                    0 | 1 => StopStatus::Completed,
                    2 => StopStatus::InProgress,
                    _ => StopStatus::Pending,
                };
                stop.notes = Some(customer.notes.clone().unwrap_or_default());
                route.stops.push(stop);
            }

            route
        })
        .collect()
}

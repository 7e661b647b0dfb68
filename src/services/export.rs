//! Route sheet export (CSV)

use std::io::Write;

use anyhow::Result;
use serde::Serialize;

use crate::types::Route;

#[derive(Debug, Serialize)]
struct RouteSheetRow<'a> {
    order: u32,
    original_order: u32,
    customer: &'a str,
    address: &'a str,
    arrival: &'a str,
    duration_minutes: u32,
    status: &'static str,
    window: &'static str,
    priority: bool,
    lat: f64,
    lng: f64,
}

/// Write one row per stop, in working order
pub fn write_route_csv<W: Write>(route: &Route, writer: W) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);

    for stop in &route.stops {
        wtr.serialize(RouteSheetRow {
            order: stop.order,
            original_order: stop.original_order,
            customer: &stop.customer_name,
            address: &stop.address,
            arrival: &stop.estimated_arrival,
            duration_minutes: stop.estimated_duration,
            status: stop.status.as_str(),
            window: stop.time_window.map(|w| w.as_str()).unwrap_or(""),
            priority: stop.is_priority,
            lat: stop.lat,
            lng: stop.lng,
        })?;
    }

    wtr.flush()?;
    Ok(())
}

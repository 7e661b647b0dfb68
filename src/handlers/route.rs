//! Route command handlers

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use tracing::warn;

use crate::services::export::write_route_csv;
use crate::services::route_store::{RouteError, RouteRepository};
use crate::types::{Route, StopUpdate, TimeWindow};

/// Rejections leave state untouched and are not fatal for the caller
fn report(result: Result<Route, RouteError>, out: &mut impl Write) -> Result<()> {
    match result {
        Ok(route) => render_route(&route, out),
        Err(e) => {
            writeln!(out, "Nothing changed: {}", e)?;
            Ok(())
        }
    }
}

pub fn render_route(route: &Route, out: &mut impl Write) -> Result<()> {
    let savings = route.savings.rounded();
    writeln!(
        out,
        "{} ({}) {} - {} stops, {:.1} mi baseline, {:.1} mi optimized, \
         saves {:.1} mi / {} min / ${:.2}",
        route.technician_name,
        route.technician_id,
        route.date,
        route.stops.len(),
        route.total_distance,
        route.optimized_distance,
        savings.miles_saved,
        savings.time_saved,
        savings.fuel_saved,
    )?;

    for stop in &route.stops {
        writeln!(
            out,
            "  {:>2}. {:<10} {:<24} {:<28} {:<11} {:<9}{} [{}]",
            stop.order,
            stop.estimated_arrival,
            stop.customer_name,
            stop.address,
            stop.status.as_str(),
            stop.time_window.map(|w| w.as_str()).unwrap_or("-"),
            if stop.is_priority { " !" } else { "" },
            stop.id,
        )?;
    }
    Ok(())
}

pub fn show(
    repo: &RouteRepository,
    technician_id: Option<&str>,
    out: &mut impl Write,
) -> Result<()> {
    match technician_id {
        Some(id) => match repo.route(id) {
            Some(route) => render_route(&route, out)?,
            None => {
                warn!("show: no route for technician {}", id);
                writeln!(out, "No route for technician {}", id)?;
            }
        },
        None => {
            for route in repo.routes() {
                render_route(&route, out)?;
                writeln!(out)?;
            }
            savings(repo, out)?;
        }
    }
    Ok(())
}

pub fn add_stop(
    repo: &RouteRepository,
    technician_id: &str,
    customer_id: &str,
    time_window: Option<TimeWindow>,
    is_priority: bool,
    out: &mut impl Write,
) -> Result<()> {
    report(repo.add_stop(technician_id, customer_id, time_window, is_priority), out)
}

pub fn update_stop(
    repo: &RouteRepository,
    technician_id: &str,
    stop_id: &str,
    update: &StopUpdate,
    out: &mut impl Write,
) -> Result<()> {
    report(repo.update_stop(technician_id, stop_id, update), out)
}

pub fn remove_stop(
    repo: &RouteRepository,
    technician_id: &str,
    stop_id: &str,
    out: &mut impl Write,
) -> Result<()> {
    report(repo.remove_stop(technician_id, stop_id), out)
}

pub fn reorder(
    repo: &RouteRepository,
    technician_id: &str,
    from: usize,
    to: usize,
    out: &mut impl Write,
) -> Result<()> {
    report(repo.reorder_stops(technician_id, from, to), out)
}

pub fn optimize(repo: &RouteRepository, technician_id: &str, out: &mut impl Write) -> Result<()> {
    report(repo.apply_optimized_order(technician_id), out)
}

pub fn savings(repo: &RouteRepository, out: &mut impl Write) -> Result<()> {
    let fleet = repo.fleet_savings().rounded();
    writeln!(
        out,
        "Fleet: {:.1} mi / {} min / ${:.2} saved today, ~${} per year",
        fleet.miles_saved, fleet.time_saved, fleet.fuel_saved, fleet.yearly_savings
    )?;
    Ok(())
}

pub fn export(
    repo: &RouteRepository,
    technician_id: &str,
    output: Option<&Path>,
    out: &mut impl Write,
) -> Result<()> {
    let Some(route) = repo.route(technician_id) else {
        warn!("export: no route for technician {}", technician_id);
        writeln!(out, "No route for technician {}", technician_id)?;
        return Ok(());
    };

    match output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            write_route_csv(&route, file)?;
            writeln!(out, "Wrote {} stops to {}", route.stops.len(), path.display())?;
        }
        None => write_route_csv(&route, io::stdout().lock())?,
    }
    Ok(())
}

pub fn reset(repo: &RouteRepository, date: NaiveDate, out: &mut impl Write) -> Result<()> {
    let routes = repo.reset(date);
    writeln!(out, "Generated {} routes for {}", routes.len(), date)?;
    Ok(())
}

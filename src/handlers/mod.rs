//! Command dispatch

pub mod route;

use std::io::Write;

use anyhow::Result;
use chrono::NaiveDate;

use crate::cli::Command;
use crate::services::route_store::RouteRepository;
use crate::types::StopUpdate;

/// Run one CLI command against the repository
pub fn dispatch(
    command: Command,
    repo: &RouteRepository,
    today: NaiveDate,
    out: &mut impl Write,
) -> Result<()> {
    match command {
        Command::Show { technician } => route::show(repo, technician.as_deref(), out),
        Command::AddStop {
            technician,
            customer,
            window,
            priority,
        } => route::add_stop(
            repo,
            &technician,
            &customer,
            window.and_then(|w| w.into_window()),
            priority,
            out,
        ),
        Command::UpdateStop {
            technician,
            stop,
            status,
            notes,
            window,
            priority,
        } => {
            let update = StopUpdate {
                status: status.map(Into::into),
                notes,
                time_window: window.map(|w| w.into_window()),
                is_priority: priority,
                ..Default::default()
            };
            route::update_stop(repo, &technician, &stop, &update, out)
        }
        Command::RemoveStop { technician, stop } => {
            route::remove_stop(repo, &technician, &stop, out)
        }
        Command::Reorder {
            technician,
            from,
            to,
        } => route::reorder(repo, &technician, from, to, out),
        Command::Optimize { technician } => route::optimize(repo, &technician, out),
        Command::Savings => route::savings(repo, out),
        Command::Export { technician, output } => {
            route::export(repo, &technician, output.as_deref(), out)
        }
        Command::Reset => route::reset(repo, today, out),
    }
}

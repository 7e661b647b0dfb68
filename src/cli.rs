//! CLI argument parsing for the pool-routes binary.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::types::{StopStatus, TimeWindow};

#[derive(Parser)]
#[command(name = "pool-routes", about = "Daily route planning for pool-service crews")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Print routes and savings (default if no subcommand given)
    Show {
        /// Only this technician's route
        #[arg(long)]
        technician: Option<String>,
    },
    /// Append a customer visit to a technician's route
    AddStop {
        #[arg(long)]
        technician: String,
        #[arg(long)]
        customer: String,
        #[arg(long, value_enum)]
        window: Option<WindowArg>,
        #[arg(long)]
        priority: bool,
    },
    /// Change fields of an existing stop
    UpdateStop {
        #[arg(long)]
        technician: String,
        #[arg(long)]
        stop: String,
        #[arg(long, value_enum)]
        status: Option<StatusArg>,
        #[arg(long)]
        notes: Option<String>,
        #[arg(long, value_enum)]
        window: Option<WindowArg>,
        #[arg(long)]
        priority: Option<bool>,
    },
    /// Remove a stop from a route
    RemoveStop {
        #[arg(long)]
        technician: String,
        #[arg(long)]
        stop: String,
    },
    /// Move a stop within the working list (0-based positions)
    Reorder {
        #[arg(long)]
        technician: String,
        #[arg(long)]
        from: usize,
        #[arg(long)]
        to: usize,
    },
    /// Adopt the optimized visiting order
    Optimize {
        #[arg(long)]
        technician: String,
    },
    /// Fleet-wide savings summary
    Savings,
    /// Write a route sheet as CSV
    Export {
        #[arg(long)]
        technician: String,
        /// Output file (stdout if omitted)
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Discard stored routes and generate today's initial set
    Reset,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum WindowArg {
    Morning,
    Afternoon,
    /// Clear the window
    None,
}

impl WindowArg {
    pub fn into_window(self) -> Option<TimeWindow> {
        match self {
            WindowArg::Morning => Some(TimeWindow::Morning),
            WindowArg::Afternoon => Some(TimeWindow::Afternoon),
            WindowArg::None => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StatusArg {
    Pending,
    InProgress,
    Completed,
    Skipped,
}

impl From<StatusArg> for StopStatus {
    fn from(status: StatusArg) -> Self {
        match status {
            StatusArg::Pending => StopStatus::Pending,
            StatusArg::InProgress => StopStatus::InProgress,
            StatusArg::Completed => StopStatus::Completed,
            StatusArg::Skipped => StopStatus::Skipped,
        }
    }
}

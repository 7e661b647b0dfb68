//! Route types

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{Coordinates, Technician};

/// Route entity (one technician's planned visits for a day)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Route {
    pub id: String,
    pub technician_id: String,
    pub technician_name: String,
    pub technician_color: String,
    pub date: NaiveDate,
    /// Working order: additions, removals and manual reorders land here
    pub stops: Vec<RouteStop>,
    /// Baseline miles, stops visited by `original_order`
    pub total_distance: f64,
    /// Miles for the optimizer's best order on the current stop set
    pub optimized_distance: f64,
    pub savings: RouteSavings,
}

impl Route {
    /// Empty route for a technician; metrics are zero until recomputed
    pub fn new(technician: &Technician, date: NaiveDate) -> Self {
        Self {
            id: format!("route-{}", technician.id),
            technician_id: technician.id.clone(),
            technician_name: technician.name.clone(),
            technician_color: technician.color.clone(),
            date,
            stops: Vec::new(),
            total_distance: 0.0,
            optimized_distance: 0.0,
            savings: RouteSavings::default(),
        }
    }

    /// Reassign `order` to a dense 1..N sequence following the working list.
    /// `original_order` is left alone.
    pub fn renumber(&mut self) {
        for (index, stop) in self.stops.iter_mut().enumerate() {
            stop.order = index as u32 + 1;
        }
    }

    pub fn stop(&self, stop_id: &str) -> Option<&RouteStop> {
        self.stops.iter().find(|s| s.id == stop_id)
    }

    pub fn has_customer(&self, customer_id: &str) -> bool {
        self.stops.iter().any(|s| s.customer_id == customer_id)
    }
}

/// Visit status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StopStatus {
    #[default]
    Pending,
    InProgress,
    Completed,
    Skipped,
}

impl StopStatus {
    pub const fn as_str(self) -> &'static str {
        match self {
            StopStatus::Pending => "pending",
            StopStatus::InProgress => "in-progress",
            StopStatus::Completed => "completed",
            StopStatus::Skipped => "skipped",
        }
    }
}

/// Coarse scheduling block for a stop
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeWindow {
    Morning,
    Afternoon,
}

impl TimeWindow {
    pub const fn as_str(self) -> &'static str {
        match self {
            TimeWindow::Morning => "morning",
            TimeWindow::Afternoon => "afternoon",
        }
    }
}

/// A stop on the route
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteStop {
    pub id: String,
    /// Working position (1-based, dense)
    pub order: u32,
    /// Position at creation; baseline distance is measured in this order
    pub original_order: u32,
    pub customer_id: String,
    pub customer_name: String,
    pub address: String,
    pub estimated_arrival: String,
    /// Service duration in minutes
    pub estimated_duration: u32,
    pub status: StopStatus,
    pub lat: f64,
    pub lng: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_window: Option<TimeWindow>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default)]
    pub is_priority: bool,
}

impl RouteStop {
    pub fn coordinates(&self) -> Coordinates {
        Coordinates {
            lat: self.lat,
            lng: self.lng,
        }
    }
}

/// Partial update merged into an existing stop.
///
/// Identity, customer and both order fields are not patchable; use
/// `reorder_stops` to move a stop.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StopUpdate {
    pub status: Option<StopStatus>,
    pub notes: Option<String>,
    /// `Some(None)` clears the window
    pub time_window: Option<Option<TimeWindow>>,
    pub is_priority: Option<bool>,
    pub estimated_arrival: Option<String>,
    pub estimated_duration: Option<u32>,
    pub coordinates: Option<Coordinates>,
}

impl StopUpdate {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Merge the present fields into `stop`
    pub fn apply_to(&self, stop: &mut RouteStop) {
        if let Some(status) = self.status {
            stop.status = status;
        }
        if let Some(notes) = &self.notes {
            stop.notes = Some(notes.clone());
        }
        if let Some(window) = self.time_window {
            stop.time_window = window;
        }
        if let Some(priority) = self.is_priority {
            stop.is_priority = priority;
        }
        if let Some(arrival) = &self.estimated_arrival {
            stop.estimated_arrival = arrival.clone();
        }
        if let Some(duration) = self.estimated_duration {
            stop.estimated_duration = duration;
        }
        if let Some(coords) = self.coordinates {
            stop.lat = coords.lat;
            stop.lng = coords.lng;
        }
    }
}

/// Savings of the optimized order against the baseline.
///
/// Values are kept unrounded; call [`RouteSavings::rounded`] for display.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteSavings {
    pub miles_saved: f64,
    /// Minutes
    pub time_saved: f64,
    /// Currency units
    pub fuel_saved: f64,
}

impl RouteSavings {
    /// Miles to one decimal, minutes to whole, fuel to cents
    pub fn rounded(&self) -> Self {
        Self {
            miles_saved: round_to(self.miles_saved, 1),
            time_saved: self.time_saved.round(),
            fuel_saved: round_to(self.fuel_saved, 2),
        }
    }
}

/// Savings summed over every technician's route
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FleetSavings {
    pub miles_saved: f64,
    pub time_saved: f64,
    pub fuel_saved: f64,
    /// Projected fuel savings over a working year
    pub yearly_savings: f64,
}

impl FleetSavings {
    pub fn rounded(&self) -> Self {
        Self {
            miles_saved: round_to(self.miles_saved, 1),
            time_saved: self.time_saved.round(),
            fuel_saved: round_to(self.fuel_saved, 2),
            yearly_savings: self.yearly_savings.round(),
        }
    }
}

/// Round half away from zero to `decimals` places
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stop(id: &str, order: u32) -> RouteStop {
        RouteStop {
            id: id.to_string(),
            order,
            original_order: order,
            customer_id: format!("cust-{}", id),
            customer_name: "Test".to_string(),
            address: "1 Main St".to_string(),
            estimated_arrival: "8:00 AM".to_string(),
            estimated_duration: 45,
            status: StopStatus::Pending,
            lat: 39.7,
            lng: -75.5,
            time_window: None,
            notes: None,
            is_priority: false,
        }
    }

    #[test]
    fn test_stop_serializes_camel_case_and_kebab_status() {
        let mut s = stop("a", 1);
        s.status = StopStatus::InProgress;
        s.time_window = Some(TimeWindow::Morning);

        let json = serde_json::to_value(&s).unwrap();
        assert_eq!(json["originalOrder"], 1);
        assert_eq!(json["status"], "in-progress");
        assert_eq!(json["timeWindow"], "morning");
        assert_eq!(json["isPriority"], false);
        assert!(json.get("notes").is_none());
    }

    #[test]
    fn test_renumber_keeps_original_order() {
        let technician = Technician {
            id: "tech-1".to_string(),
            name: "Mike".to_string(),
            color: "#3B82F6".to_string(),
        };
        let mut route = Route::new(&technician, NaiveDate::from_ymd_opt(2026, 1, 15).unwrap());
        route.stops = vec![stop("c", 3), stop("a", 1)];

        route.renumber();

        assert_eq!(route.stops[0].order, 1);
        assert_eq!(route.stops[1].order, 2);
        assert_eq!(route.stops[0].original_order, 3);
        assert_eq!(route.id, "route-tech-1");
    }

    #[test]
    fn test_stop_update_merges_only_present_fields() {
        let mut s = stop("a", 1);
        s.time_window = Some(TimeWindow::Afternoon);
        s.notes = Some("Gate code 1234".to_string());

        let update = StopUpdate {
            status: Some(StopStatus::Completed),
            time_window: Some(None),
            ..Default::default()
        };
        update.apply_to(&mut s);

        assert_eq!(s.status, StopStatus::Completed);
        assert_eq!(s.time_window, None);
        assert_eq!(s.notes.as_deref(), Some("Gate code 1234"));
        assert!(!update.is_empty());
        assert!(StopUpdate::default().is_empty());
    }

    #[test]
    fn test_savings_rounding() {
        let savings = RouteSavings {
            miles_saved: 3.46,
            time_saved: 8.304,
            fuel_saved: 2.0068,
        };
        let rounded = savings.rounded();
        assert_eq!(rounded.miles_saved, 3.5);
        assert_eq!(rounded.time_saved, 8.0);
        assert_eq!(rounded.fuel_saved, 2.01);
    }
}

//! Savings of the optimized order against the as-added baseline

use crate::defaults::{
    DEFAULT_FUEL_COST_PER_MILE, DEFAULT_MINUTES_PER_MILE, WEEKS_PER_YEAR, WORKDAYS_PER_WEEK,
};
use crate::services::{geo, optimizer};
use crate::types::{Coordinates, FleetSavings, Route, RouteSavings, RouteStop};

/// Conversion rates from miles saved to time and money
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SavingsRates {
    pub minutes_per_mile: f64,
    pub fuel_cost_per_mile: f64,
}

impl Default for SavingsRates {
    fn default() -> Self {
        Self {
            minutes_per_mile: DEFAULT_MINUTES_PER_MILE,
            fuel_cost_per_mile: DEFAULT_FUEL_COST_PER_MILE,
        }
    }
}

/// Distances and savings for one stop set
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RouteMetrics {
    /// Baseline miles, stops in `original_order`
    pub total_distance: f64,
    pub optimized_distance: f64,
    pub savings: RouteSavings,
}

/// Baseline path: stops sorted (stably) by `original_order`
pub fn baseline_distance(stops: &[RouteStop]) -> f64 {
    let mut baseline: Vec<&RouteStop> = stops.iter().collect();
    baseline.sort_by_key(|s| s.original_order);
    let points: Vec<Coordinates> = baseline.iter().map(|s| s.coordinates()).collect();
    geo::points_distance(&points)
}

/// Path length of the optimizer's order for this stop set.
/// Independent of the current working order.
pub fn optimized_distance(stops: &[RouteStop]) -> f64 {
    let points: Vec<Coordinates> = optimizer::optimize(stops)
        .iter()
        .map(RouteStop::coordinates)
        .collect();
    geo::points_distance(&points)
}

/// Savings for a given baseline and optimized distance, clamped at zero
pub fn savings_for(baseline: f64, optimized: f64, rates: &SavingsRates) -> RouteSavings {
    let miles_saved = (baseline - optimized).max(0.0);
    RouteSavings {
        miles_saved,
        time_saved: miles_saved * rates.minutes_per_mile,
        fuel_saved: miles_saved * rates.fuel_cost_per_mile,
    }
}

pub fn calculate(stops: &[RouteStop], rates: &SavingsRates) -> RouteMetrics {
    let total_distance = baseline_distance(stops);
    let optimized_distance = optimized_distance(stops);

    RouteMetrics {
        total_distance,
        optimized_distance,
        savings: savings_for(total_distance, optimized_distance, rates),
    }
}

/// Sum per-route savings (unrounded) and project the yearly fuel figure
pub fn fleet_savings(routes: &[Route]) -> FleetSavings {
    let mut fleet = routes.iter().fold(FleetSavings::default(), |mut acc, route| {
        acc.miles_saved += route.savings.miles_saved;
        acc.time_saved += route.savings.time_saved;
        acc.fuel_saved += route.savings.fuel_saved;
        acc
    });
    fleet.yearly_savings = fleet.fuel_saved * WORKDAYS_PER_WEEK * WEEKS_PER_YEAR;
    fleet
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{StopStatus, Technician, TimeWindow};
    use chrono::NaiveDate;
    use proptest::prelude::*;

    fn stop_at(id: &str, original_order: u32, lat: f64, lng: f64) -> RouteStop {
        RouteStop {
            id: id.to_string(),
            order: original_order,
            original_order,
            customer_id: format!("cust-{}", id),
            customer_name: id.to_string(),
            address: "1 Main St".to_string(),
            estimated_arrival: "8:00 AM".to_string(),
            estimated_duration: 45,
            status: StopStatus::Pending,
            lat,
            lng,
            time_window: None,
            notes: None,
            is_priority: false,
        }
    }

    fn crossing_square() -> Vec<RouteStop> {
        vec![
            stop_at("sw", 1, 39.70, -75.60),
            stop_at("ne", 2, 39.80, -75.50),
            stop_at("nw", 3, 39.80, -75.60),
            stop_at("se", 4, 39.70, -75.50),
        ]
    }

    fn route_with_savings(miles: f64) -> Route {
        let technician = Technician {
            id: format!("tech-{}", miles),
            name: "Tech".to_string(),
            color: "#000000".to_string(),
        };
        let mut route = Route::new(&technician, NaiveDate::from_ymd_opt(2026, 1, 15).unwrap());
        route.savings = savings_for(miles, 0.0, &SavingsRates::default());
        route
    }

    #[test]
    fn test_crossing_square_saves_miles() {
        let metrics = calculate(&crossing_square(), &SavingsRates::default());

        assert!(metrics.savings.miles_saved > 0.0);
        assert!(metrics.optimized_distance < metrics.total_distance);
        assert!((metrics.savings.time_saved - metrics.savings.miles_saved * 2.4).abs() < 1e-9);
        assert!((metrics.savings.fuel_saved - metrics.savings.miles_saved * 0.58).abs() < 1e-9);
    }

    #[test]
    fn test_baseline_follows_original_order_not_working_order() {
        let mut stops = crossing_square();
        let before = baseline_distance(&stops);
        // Working list shuffled and renumbered; original_order untouched
        stops.reverse();
        for (i, s) in stops.iter_mut().enumerate() {
            s.order = i as u32 + 1;
        }
        assert_eq!(baseline_distance(&stops), before);
    }

    #[test]
    fn test_optimized_distance_ignores_working_order() {
        let stops = crossing_square();
        let mut reordered = stops.clone();
        reordered.swap(1, 2);
        // First stop unchanged so the tour start is the same
        assert!((optimized_distance(&stops) - optimized_distance(&reordered)).abs() < 1e-9);
    }

    #[test]
    fn test_savings_are_clamped_when_grouping_costs_miles() {
        // Baseline runs straight up a line (pm, am, pm2); the optimizer must
        // start at the morning stop in the middle and double back.
        let mut pm = stop_at("pm", 1, 39.70, -75.60);
        pm.time_window = Some(TimeWindow::Afternoon);
        let mut am = stop_at("am", 2, 39.80, -75.60);
        am.time_window = Some(TimeWindow::Morning);
        let mut pm2 = stop_at("pm2", 3, 39.90, -75.60);
        pm2.time_window = Some(TimeWindow::Afternoon);

        let metrics = calculate(&[pm, am, pm2], &SavingsRates::default());
        assert!(metrics.optimized_distance > metrics.total_distance);
        assert_eq!(metrics.savings, RouteSavings::default());
    }

    #[test]
    fn test_empty_route_has_zero_metrics() {
        assert_eq!(calculate(&[], &SavingsRates::default()), RouteMetrics::default());
    }

    #[test]
    fn test_custom_rates_are_applied() {
        let rates = SavingsRates {
            minutes_per_mile: 3.0,
            fuel_cost_per_mile: 0.5,
        };
        let savings = savings_for(12.0, 10.0, &rates);
        assert_eq!(savings.miles_saved, 2.0);
        assert_eq!(savings.time_saved, 6.0);
        assert_eq!(savings.fuel_saved, 1.0);
    }

    #[test]
    fn test_fleet_sums_routes_and_projects_year() {
        let routes = vec![route_with_savings(1.04), route_with_savings(2.04)];
        let fleet = fleet_savings(&routes);

        assert!((fleet.miles_saved - 3.08).abs() < 1e-9);
        assert!((fleet.fuel_saved - 3.08 * 0.58).abs() < 1e-9);
        assert!((fleet.yearly_savings - fleet.fuel_saved * 260.0).abs() < 1e-9);
        // Summed before rounding: 1.0 + 2.0 would give 3.0
        assert_eq!(fleet.rounded().miles_saved, 3.1);
    }

    proptest! {
        #[test]
        fn prop_miles_saved_is_never_negative(
            points in prop::collection::vec(
                (39.0f64..40.0, -76.0f64..-75.0, 0u8..3, any::<bool>()),
                0..10,
            )
        ) {
            let stops: Vec<RouteStop> = points
                .into_iter()
                .enumerate()
                .map(|(i, (lat, lng, window, priority))| {
                    let mut s = stop_at(&format!("s{}", i), i as u32 + 1, lat, lng);
                    s.time_window = match window {
                        0 => Some(TimeWindow::Morning),
                        1 => Some(TimeWindow::Afternoon),
                        _ => None,
                    };
                    s.is_priority = priority;
                    s
                })
                .collect();

            let metrics = calculate(&stops, &SavingsRates::default());
            prop_assert!(metrics.savings.miles_saved >= 0.0);
            prop_assert!(metrics.savings.time_saved >= 0.0);
            prop_assert!(metrics.savings.fuel_saved >= 0.0);
        }
    }
}

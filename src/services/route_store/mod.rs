//! Route repository
//!
//! Owns every technician's route for the day. Each mutation works on a copy of
//! the target route, recomputes its metrics and then swaps it in under the
//! write lock, so readers only ever see complete snapshots. The document is
//! persisted after the swap; a failed save is logged and does not undo the
//! mutation.

pub mod seed;

use std::sync::Arc;

use chrono::NaiveDate;
use parking_lot::RwLock;
use thiserror::Error;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use crate::db::{Directory, RouteStorage, StorageError, StoredRoute};
use crate::defaults::{
    default_afternoon_arrival, default_anytime_arrival, default_morning_arrival, format_arrival,
    DEFAULT_STOP_DURATION_MINUTES,
};
use crate::services::geocoding::Geocoder;
use crate::services::optimizer;
use crate::services::savings::{self, SavingsRates};
use crate::types::{
    Coordinates, Customer, FleetSavings, Route, RouteStop, StopStatus, StopUpdate, TimeWindow,
};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteError {
    #[error("no route for technician {0}")]
    TechnicianNotFound(String),
    #[error("customer {0} not found")]
    CustomerNotFound(String),
    #[error("customer {customer_id} already has a stop on technician {technician_id}'s route")]
    DuplicateCustomer {
        technician_id: String,
        customer_id: String,
    },
    #[error("stop {0} not found")]
    StopNotFound(String),
    #[error("stop index {index} out of range for {len} stops")]
    InvalidIndex { index: usize, len: usize },
}

/// Collaborators injected into the repository
#[derive(Clone)]
pub struct RepositoryDeps {
    pub directory: Arc<dyn Directory>,
    pub geocoder: Arc<dyn Geocoder>,
    pub storage: Arc<dyn RouteStorage>,
    pub rates: SavingsRates,
}

/// Recompute baseline, optimized distance and savings for the current stop set
pub fn recompute(mut route: Route, rates: &SavingsRates) -> Route {
    let metrics = savings::calculate(&route.stops, rates);
    route.total_distance = metrics.total_distance;
    route.optimized_distance = metrics.optimized_distance;
    route.savings = metrics.savings;

    debug!(
        "Recomputed {}: {} stops, baseline {:.2} mi, optimized {:.2} mi",
        route.id,
        route.stops.len(),
        route.total_distance,
        route.optimized_distance
    );
    route
}

/// Stored coordinates, or derive them once and hand them back to the directory
pub(crate) fn resolve_coordinates(
    customer: &Customer,
    directory: &dyn Directory,
    geocoder: &dyn Geocoder,
) -> Coordinates {
    if let Some(coordinates) = customer.coordinates() {
        return coordinates;
    }
    let coordinates = geocoder.geocode(&customer.address, &customer.city);
    debug!(
        "Geocoded customer {} via {}: {:.6}, {:.6}",
        customer.id,
        geocoder.name(),
        coordinates.lat,
        coordinates.lng
    );
    directory.store_coordinates(&customer.id, coordinates);
    coordinates
}

pub(crate) fn stop_for_customer(
    customer: &Customer,
    position: u32,
    coordinates: Coordinates,
    time_window: Option<TimeWindow>,
    is_priority: bool,
    estimated_arrival: String,
) -> RouteStop {
    RouteStop {
        id: format!("stop-{}", Uuid::new_v4()),
        order: position,
        original_order: position,
        customer_id: customer.id.clone(),
        customer_name: customer.name.clone(),
        address: customer.address.clone(),
        estimated_arrival,
        estimated_duration: DEFAULT_STOP_DURATION_MINUTES,
        status: StopStatus::Pending,
        lat: coordinates.lat,
        lng: coordinates.lng,
        time_window,
        notes: None,
        is_priority,
    }
}

fn arrival_for(time_window: Option<TimeWindow>) -> String {
    let time = match time_window {
        Some(TimeWindow::Morning) => default_morning_arrival(),
        Some(TimeWindow::Afternoon) => default_afternoon_arrival(),
        None => default_anytime_arrival(),
    };
    format_arrival(time)
}

/// Rebuild a route from storage, filling in anything older documents lack
fn restore_route(stored: StoredRoute, directory: &dyn Directory, geocoder: &dyn Geocoder) -> Route {
    let stops = stored
        .stops
        .into_iter()
        .map(|stop| {
            let coordinates = match (stop.lat, stop.lng) {
                (Some(lat), Some(lng)) => Coordinates { lat, lng },
                _ => {
                    let city = directory
                        .customer(&stop.customer_id)
                        .map(|c| c.city)
                        .unwrap_or_default();
                    geocoder.geocode(&stop.address, &city)
                }
            };

            RouteStop {
                original_order: stop.original_order.unwrap_or(stop.order),
                id: stop.id,
                order: stop.order,
                customer_id: stop.customer_id,
                customer_name: stop.customer_name,
                address: stop.address,
                estimated_arrival: stop.estimated_arrival,
                estimated_duration: stop.estimated_duration,
                status: stop.status,
                lat: coordinates.lat,
                lng: coordinates.lng,
                time_window: stop.time_window,
                notes: stop.notes,
                is_priority: stop.is_priority,
            }
        })
        .collect();

    Route {
        id: stored.id,
        technician_id: stored.technician_id,
        technician_name: stored.technician_name,
        technician_color: stored.technician_color,
        date: stored.date,
        stops,
        total_distance: stored.total_distance,
        optimized_distance: stored.optimized_distance,
        savings: stored.savings,
    }
}

/// Authoritative set of routes, one per technician
pub struct RouteRepository {
    routes: RwLock<Vec<Route>>,
    deps: RepositoryDeps,
}

impl RouteRepository {
    /// Wrap an existing route set; every route is recomputed
    pub fn new(routes: Vec<Route>, deps: RepositoryDeps) -> Self {
        let routes = routes
            .into_iter()
            .map(|route| recompute(route, &deps.rates))
            .collect();
        Self {
            routes: RwLock::new(routes),
            deps,
        }
    }

    /// Load the stored document, or generate a fresh route set for `date` when
    /// there is none or it cannot be parsed
    pub fn open(deps: RepositoryDeps, date: NaiveDate) -> Result<Self, StorageError> {
        let stored = match deps.storage.load() {
            Ok(stored) => stored,
            Err(StorageError::Malformed(e)) => {
                warn!("Discarding malformed route document, regenerating: {}", e);
                None
            }
            Err(e) => return Err(e),
        };

        let repository = match stored {
            Some(stored) => {
                let routes = stored
                    .into_iter()
                    .map(|r| restore_route(r, deps.directory.as_ref(), deps.geocoder.as_ref()))
                    .collect();
                let repository = Self::new(routes, deps);
                info!("Loaded {} routes", repository.routes.read().len());
                repository
            }
            None => {
                let routes =
                    seed::initial_routes(deps.directory.as_ref(), deps.geocoder.as_ref(), date);
                let repository = Self::new(routes, deps);
                info!("Generated {} initial routes for {}", repository.routes.read().len(), date);
                repository.persist();
                repository
            }
        };

        Ok(repository)
    }

    /// Throw away current routes and generate a fresh set for `date`
    pub fn reset(&self, date: NaiveDate) -> Vec<Route> {
        let fresh: Vec<Route> = seed::initial_routes(
            self.deps.directory.as_ref(),
            self.deps.geocoder.as_ref(),
            date,
        )
        .into_iter()
        .map(|route| recompute(route, &self.deps.rates))
        .collect();

        *self.routes.write() = fresh.clone();
        info!("Reset to {} initial routes for {}", fresh.len(), date);
        self.persist();
        fresh
    }

    pub fn routes(&self) -> Vec<Route> {
        self.routes.read().clone()
    }

    pub fn route(&self, technician_id: &str) -> Option<Route> {
        self.routes
            .read()
            .iter()
            .find(|r| r.technician_id == technician_id)
            .cloned()
    }

    pub fn fleet_savings(&self) -> FleetSavings {
        savings::fleet_savings(&self.routes.read())
    }

    pub fn rates(&self) -> &SavingsRates {
        &self.deps.rates
    }

    /// Append a stop for `customer_id` to the technician's route
    pub fn add_stop(
        &self,
        technician_id: &str,
        customer_id: &str,
        time_window: Option<TimeWindow>,
        is_priority: bool,
    ) -> Result<Route, RouteError> {
        self.mutate("add_stop", technician_id, |route| {
            let customer = self
                .deps
                .directory
                .customer(customer_id)
                .ok_or_else(|| RouteError::CustomerNotFound(customer_id.to_string()))?;

            if route.has_customer(customer_id) {
                return Err(RouteError::DuplicateCustomer {
                    technician_id: technician_id.to_string(),
                    customer_id: customer_id.to_string(),
                });
            }

            let coordinates = resolve_coordinates(
                &customer,
                self.deps.directory.as_ref(),
                self.deps.geocoder.as_ref(),
            );
            let position = route.stops.len() as u32 + 1;
            route.stops.push(stop_for_customer(
                &customer,
                position,
                coordinates,
                time_window,
                is_priority,
                arrival_for(time_window),
            ));
            Ok(())
        })
    }

    /// Merge `update` into the matching stop
    pub fn update_stop(
        &self,
        technician_id: &str,
        stop_id: &str,
        update: &StopUpdate,
    ) -> Result<Route, RouteError> {
        self.mutate("update_stop", technician_id, |route| {
            let stop = route
                .stops
                .iter_mut()
                .find(|s| s.id == stop_id)
                .ok_or_else(|| RouteError::StopNotFound(stop_id.to_string()))?;
            update.apply_to(stop);
            Ok(())
        })
    }

    /// Delete a stop and close the gap in `order`
    pub fn remove_stop(&self, technician_id: &str, stop_id: &str) -> Result<Route, RouteError> {
        self.mutate("remove_stop", technician_id, |route| {
            let index = route
                .stops
                .iter()
                .position(|s| s.id == stop_id)
                .ok_or_else(|| RouteError::StopNotFound(stop_id.to_string()))?;
            route.stops.remove(index);
            route.renumber();
            Ok(())
        })
    }

    /// Move the stop at `from_index` to `to_index` in the working list.
    /// A `to_index` past the end moves the stop to the end.
    pub fn reorder_stops(
        &self,
        technician_id: &str,
        from_index: usize,
        to_index: usize,
    ) -> Result<Route, RouteError> {
        self.mutate("reorder_stops", technician_id, |route| {
            let len = route.stops.len();
            if from_index >= len {
                return Err(RouteError::InvalidIndex { index: from_index, len });
            }
            let moved = route.stops.remove(from_index);
            let to_index = to_index.min(route.stops.len());
            route.stops.insert(to_index, moved);
            route.renumber();
            Ok(())
        })
    }

    /// Replace the working order with the optimizer's order
    pub fn apply_optimized_order(&self, technician_id: &str) -> Result<Route, RouteError> {
        self.mutate("apply_optimized_order", technician_id, |route| {
            route.stops = optimizer::optimize(&route.stops);
            route.renumber();
            Ok(())
        })
    }

    fn mutate<F>(&self, operation: &str, technician_id: &str, apply: F) -> Result<Route, RouteError>
    where
        F: FnOnce(&mut Route) -> Result<(), RouteError>,
    {
        let result = {
            let mut routes = self.routes.write();
            match routes.iter_mut().find(|r| r.technician_id == technician_id) {
                None => Err(RouteError::TechnicianNotFound(technician_id.to_string())),
                Some(slot) => {
                    let mut draft = slot.clone();
                    apply(&mut draft).map(|()| {
                        let updated = recompute(draft, &self.deps.rates);
                        *slot = updated.clone();
                        updated
                    })
                }
            }
        };

        match &result {
            Ok(route) => {
                info!(
                    "{} on {}: {} stops, {:.1} mi saved",
                    operation,
                    route.id,
                    route.stops.len(),
                    route.savings.miles_saved
                );
                self.persist();
            }
            Err(e) => warn!("{} ignored: {}", operation, e),
        }

        result
    }

    fn persist(&self) {
        let snapshot = self.routes.read().clone();
        if let Err(e) = self.deps.storage.save(&snapshot) {
            error!("Failed to persist routes: {}", e);
        }
    }
}

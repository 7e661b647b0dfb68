use chrono::NaiveTime;

/// Earth radius used by the haversine distance
pub const EARTH_RADIUS_MILES: f64 = 3958.8;

pub const DEFAULT_STOP_DURATION_MINUTES: u32 = 45;

pub const DEFAULT_MINUTES_PER_MILE: f64 = 2.4;
pub const DEFAULT_FUEL_COST_PER_MILE: f64 = 0.58;

pub const WORKDAYS_PER_WEEK: f64 = 5.0;
pub const WEEKS_PER_YEAR: f64 = 52.0;

/// 2-opt: minimum gain (miles) before a reversal is accepted
pub const TWO_OPT_EPSILON_MILES: f64 = 0.01;
/// 2-opt: upper bound on full sweeps
pub const TWO_OPT_MAX_SWEEPS: usize = 120;

pub fn default_day_start() -> NaiveTime {
    NaiveTime::from_hms_opt(8, 0, 0).expect("valid static day start")
}

pub fn default_morning_arrival() -> NaiveTime {
    NaiveTime::from_hms_opt(10, 0, 0).expect("valid static morning arrival")
}

pub fn default_afternoon_arrival() -> NaiveTime {
    NaiveTime::from_hms_opt(14, 0, 0).expect("valid static afternoon arrival")
}

pub fn default_anytime_arrival() -> NaiveTime {
    NaiveTime::from_hms_opt(12, 0, 0).expect("valid static anytime arrival")
}

/// Display format for estimated arrivals, e.g. `2:00 PM`
pub fn format_arrival(time: NaiveTime) -> String {
    time.format("%-I:%M %p").to_string()
}

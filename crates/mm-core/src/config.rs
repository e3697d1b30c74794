//! Routing configuration.
//!
//! Every constant the router depends on lives in [`RoutingConfig`].  The
//! defaults describe the Dhaka network the datasets were drawn from; an
//! application may override any field (with the `serde` feature, from a
//! JSON file where missing fields keep their defaults).

use crate::{CoreError, CoreResult, Mode};

// ── FareTable ─────────────────────────────────────────────────────────────────

/// Monetary rate per kilometre for each mode, in Taka.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct FareTable {
    pub walk:        f64,
    pub car:         f64,
    pub metro:       f64,
    pub uttara_bus:  f64,
    pub bikolpo_bus: f64,
}

impl FareTable {
    /// Rate per kilometre for `mode`.
    #[inline]
    pub fn per_km(&self, mode: Mode) -> f64 {
        match mode {
            Mode::Walk       => self.walk,
            Mode::Car        => self.car,
            Mode::Metro      => self.metro,
            Mode::UttaraBus  => self.uttara_bus,
            Mode::BikolpoBus => self.bikolpo_bus,
        }
    }
}

impl Default for FareTable {
    fn default() -> Self {
        Self {
            walk:        0.0,
            car:         20.0,
            metro:       5.0,
            uttara_bus:  7.0,
            bikolpo_bus: 7.0,
        }
    }
}

// ── ServiceWindow ─────────────────────────────────────────────────────────────

/// Inclusive range of minutes-since-midnight in which a vehicle may be boarded.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ServiceWindow {
    pub opens:  f64,
    pub closes: f64,
}

impl ServiceWindow {
    #[inline]
    pub fn contains(&self, minutes: f64) -> bool {
        minutes >= self.opens && minutes <= self.closes
    }
}

impl Default for ServiceWindow {
    /// 06:00 – 23:00.
    fn default() -> Self {
        Self { opens: 360.0, closes: 1_380.0 }
    }
}

// ── RoutingConfig ─────────────────────────────────────────────────────────────

/// Tunable constants for weights and schedule feasibility.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RoutingConfig {
    /// Walking speed, km/h.  Also prices connector edges in travel minutes.
    pub walk_speed_kmh: f64,

    /// Speed of every vehicle mode, km/h.
    pub vehicle_speed_kmh: f64,

    /// Fare per kilometre by mode.
    pub fares: FareTable,

    /// Scheduled services depart every this many minutes from midnight.
    pub departure_interval_min: f64,

    /// Hours during which a vehicle can be boarded.
    pub service_window: ServiceWindow,
}

impl RoutingConfig {
    /// Speed of `mode` in km/h.
    #[inline]
    pub fn speed_kmh(&self, mode: Mode) -> f64 {
        match mode {
            Mode::Walk => self.walk_speed_kmh,
            _          => self.vehicle_speed_kmh,
        }
    }

    /// Minutes needed to cover `distance_km` by `mode`.
    #[inline]
    pub fn travel_minutes(&self, mode: Mode, distance_km: f64) -> f64 {
        distance_km / self.speed_kmh(mode) * 60.0
    }

    /// Reject values the router cannot work with.
    pub fn validate(&self) -> CoreResult<()> {
        if !(self.walk_speed_kmh > 0.0) || !(self.vehicle_speed_kmh > 0.0) {
            return Err(CoreError::Config(format!(
                "speeds must be positive (walk {}, vehicle {})",
                self.walk_speed_kmh, self.vehicle_speed_kmh
            )));
        }
        if !(self.departure_interval_min > 0.0) {
            return Err(CoreError::Config(format!(
                "departure interval must be positive, got {}",
                self.departure_interval_min
            )));
        }
        if let Some(mode) = Mode::ALL.into_iter().find(|&m| !(self.fares.per_km(m) >= 0.0)) {
            return Err(CoreError::Config(format!(
                "fare for {mode} must be non-negative, got {}",
                self.fares.per_km(mode)
            )));
        }
        let w = self.service_window;
        if !(w.opens <= w.closes) {
            return Err(CoreError::Config(format!(
                "service window opens ({}) after it closes ({})",
                w.opens, w.closes
            )));
        }
        Ok(())
    }
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            walk_speed_kmh:         2.0,
            vehicle_speed_kmh:      30.0,
            fares:                  FareTable::default(),
            departure_interval_min: 15.0,
            service_window:         ServiceWindow::default(),
        }
    }
}

//! The four query objectives and how each prices an arc.

use std::str::FromStr;

use mm_core::{CoreError, Mode, RoutingConfig};

/// What a search minimises.
///
/// | Objective          | Metric                 | Weight of an arc          | Schedule rules |
/// |--------------------|------------------------|---------------------------|----------------|
/// | `Distance`         | km                     | length                    | no             |
/// | `Cost`             | Tk                     | length × fare/km          | no             |
/// | `ScheduledCost`    | Tk                     | length × fare/km          | yes            |
/// | `ScheduledFastest` | clock minutes          | length / speed × 60       | yes            |
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum Objective {
    Distance,
    Cost,
    ScheduledCost,
    ScheduledFastest,
}

impl Objective {
    pub const ALL: [Objective; 4] = [
        Objective::Distance,
        Objective::Cost,
        Objective::ScheduledCost,
        Objective::ScheduledFastest,
    ];

    /// Weight of an arc of `mode` and length `distance_km`.
    #[inline]
    pub fn edge_weight(self, mode: Mode, distance_km: f64, config: &RoutingConfig) -> f64 {
        match self {
            Objective::Distance => distance_km,
            Objective::Cost | Objective::ScheduledCost => {
                distance_km * config.fares.per_km(mode)
            }
            Objective::ScheduledFastest => config.travel_minutes(mode, distance_km),
        }
    }

    /// `true` if labels carry a simulated arrival time.
    #[inline]
    pub fn tracks_time(self) -> bool {
        matches!(self, Objective::ScheduledCost | Objective::ScheduledFastest)
    }

    /// `true` if departure slots and the service window constrain boarding.
    #[inline]
    pub fn enforces_schedule(self) -> bool {
        self.tracks_time()
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Objective::Distance         => "distance",
            Objective::Cost             => "cost",
            Objective::ScheduledCost    => "scheduled-cost",
            Objective::ScheduledFastest => "fastest",
        }
    }
}

impl std::fmt::Display for Objective {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Objective {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase().replace('_', "-");
        Objective::ALL
            .into_iter()
            .find(|o| o.as_str() == wanted)
            .ok_or_else(|| CoreError::Parse(format!("unknown objective {s:?}")))
    }
}

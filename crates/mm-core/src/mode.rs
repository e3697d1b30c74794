//! Travel mode enum shared by the graph, the router, and the exporters.

use std::str::FromStr;

use crate::CoreError;

/// The means of travel along one edge.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Mode {
    /// On foot; also the mode of every connector edge.
    Walk,
    /// Private car or ride on the road network.
    Car,
    /// Metro rail.
    Metro,
    /// Uttara bus line.
    UttaraBus,
    /// Bikolpo bus line.
    BikolpoBus,
}

impl Mode {
    pub const ALL: [Mode; 5] = [
        Mode::Walk,
        Mode::Car,
        Mode::Metro,
        Mode::UttaraBus,
        Mode::BikolpoBus,
    ];

    /// `true` for services that depart on quantized slots (metro and buses).
    #[inline]
    pub fn is_scheduled(self) -> bool {
        matches!(self, Mode::Metro | Mode::UttaraBus | Mode::BikolpoBus)
    }

    /// `true` for every vehicle mode, i.e. everything except walking.
    #[inline]
    pub fn is_motorized(self) -> bool {
        !matches!(self, Mode::Walk)
    }

    /// Machine-readable name, accepted back by `FromStr`.
    pub fn as_str(self) -> &'static str {
        match self {
            Mode::Walk       => "walk",
            Mode::Car        => "car",
            Mode::Metro      => "metro",
            Mode::UttaraBus  => "uttara_bus",
            Mode::BikolpoBus => "bikolpo_bus",
        }
    }

    /// Human-readable label used in itineraries.
    pub fn label(self) -> &'static str {
        match self {
            Mode::Walk       => "Walk",
            Mode::Car        => "Car",
            Mode::Metro      => "Metro",
            Mode::UttaraBus  => "Uttara Bus",
            Mode::BikolpoBus => "Bikolpo Bus",
        }
    }
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Mode {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase().replace('-', "_");
        Mode::ALL
            .into_iter()
            .find(|m| m.as_str() == wanted)
            .ok_or_else(|| CoreError::Parse(format!("unknown travel mode {s:?}")))
    }
}

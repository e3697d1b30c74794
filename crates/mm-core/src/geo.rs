//! Geographic coordinate type and great-circle distance.
//!
//! Coordinates are `(longitude, latitude)` in decimal degrees, stored as
//! `f64` because they double as the node deduplication key: two dataset rows
//! describe the same node only when their coordinates are bit-for-bit equal.

/// Mean Earth radius used by [`distance_km`], kilometres.
pub const EARTH_RADIUS_KM: f64 = 6_371.0;

/// A WGS-84 position, longitude first (the order used by the datasets and KML).
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Coordinate {
    pub lon: f64,
    pub lat: f64,
}

/// Exact-equality hash key for a [`Coordinate`].
///
/// No tolerance is applied; `-0.0` and `0.0` are the only values folded
/// together, because they compare equal as numbers.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub struct CoordKey(u64, u64);

impl Coordinate {
    #[inline]
    pub fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }

    /// Deduplication key for the coordinate index.
    #[inline]
    pub fn key(self) -> CoordKey {
        #[inline]
        fn bits(v: f64) -> u64 {
            if v == 0.0 { 0.0f64.to_bits() } else { v.to_bits() }
        }
        CoordKey(bits(self.lon), bits(self.lat))
    }

    /// Haversine great-circle distance in kilometres.  See [`distance_km`].
    #[inline]
    pub fn distance_km(self, other: Coordinate) -> f64 {
        distance_km(self, other)
    }
}

/// Haversine great-circle distance in kilometres.
///
/// Symmetric, zero for identical inputs, and monotone in angular separation.
pub fn distance_km(a: Coordinate, b: Coordinate) -> f64 {
    let d_lat = (b.lat - a.lat).to_radians();
    let d_lon = (b.lon - a.lon).to_radians();

    let lat1 = a.lat.to_radians();
    let lat2 = b.lat.to_radians();

    let h = (d_lat * 0.5).sin().powi(2)
        + lat1.cos() * lat2.cos() * (d_lon * 0.5).sin().powi(2);

    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());
    EARTH_RADIUS_KM * c
}

impl std::fmt::Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.6},{:.6})", self.lon, self.lat)
    }
}

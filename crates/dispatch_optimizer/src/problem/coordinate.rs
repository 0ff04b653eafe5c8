use geo::{Distance, HaversineMeasure};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::{error::OptimizerError, problem::meters::Meters};

const EARTH: HaversineMeasure = HaversineMeasure::new(6_371_000.0);

/// A WGS84 position in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Coordinate {
    lat: f64,
    lon: f64,
}

impl Coordinate {
    pub const fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    pub fn lat(&self) -> f64 {
        self.lat
    }

    pub fn lon(&self) -> f64 {
        self.lon
    }

    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lon.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lon)
    }

    pub(crate) fn validate(&self, owner: impl FnOnce() -> String) -> Result<(), OptimizerError> {
        if self.is_valid() {
            Ok(())
        } else {
            Err(OptimizerError::InvalidCoordinate {
                owner: owner(),
                lat: self.lat,
                lon: self.lon,
            })
        }
    }

    /// Great-circle distance on a sphere of radius 6,371 km, truncated to
    /// whole meters.
    pub fn haversine_distance(&self, to: &Coordinate) -> Meters {
        let distance = EARTH.distance(geo::Point::from(self), geo::Point::from(to));

        Meters::new(distance.trunc() as u64)
    }
}

impl From<&Coordinate> for geo::Point<f64> {
    fn from(coordinate: &Coordinate) -> Self {
        geo::Point::new(coordinate.lon, coordinate.lat)
    }
}

impl From<geo::Point<f64>> for Coordinate {
    fn from(point: geo::Point<f64>) -> Self {
        Coordinate::new(point.y(), point.x())
    }
}

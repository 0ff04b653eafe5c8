use tracing::{Level, instrument};

use crate::{
    define_index_newtype,
    problem::{coordinate::Coordinate, kmh::Kmh, meters::Meters},
};

define_index_newtype!(NodeIdx, Coordinate);

/// The depot is always the first node of a matrix.
pub const DEPOT_NODE: NodeIdx = NodeIdx::new(0);

pub type Minutes = u32;
pub type Cost = f64;

/// Distances, travel times and arc costs between every pair of nodes, computed
/// once per solve.
///
/// The matrices are stored flat, the entry for a pair of nodes lives at
/// `from * num_nodes + to`.
#[derive(Debug, Clone)]
pub struct TravelMatrices {
    distances: Vec<Meters>,
    times: Vec<Minutes>,
    costs: Vec<Cost>,
    num_nodes: usize,
    traffic_multiplier: f64,
}

impl TravelMatrices {
    /// Evaluates all pairs of `coordinates`. Travel times are rounded up to
    /// whole minutes so estimates never understate the drive. The traffic
    /// multiplier scales both times and costs.
    #[instrument(skip_all, level = Level::DEBUG, fields(nodes = coordinates.len()))]
    pub fn from_coordinates(coordinates: &[Coordinate], speed: Kmh, traffic_multiplier: f64) -> Self {
        let num_nodes = coordinates.len();
        let mut distances = vec![Meters::ZERO; num_nodes * num_nodes];
        let mut times = vec![0; num_nodes * num_nodes];
        let mut costs = vec![0.0; num_nodes * num_nodes];

        for (i, from) in coordinates.iter().enumerate() {
            for (j, to) in coordinates.iter().enumerate().skip(i + 1) {
                let distance = from.haversine_distance(to);
                let minutes = travel_minutes(distance, speed, traffic_multiplier);
                let cost = distance.as_f64() * traffic_multiplier;

                for index in [i * num_nodes + j, j * num_nodes + i] {
                    distances[index] = distance;
                    times[index] = minutes;
                    costs[index] = cost;
                }
            }
        }

        TravelMatrices {
            distances,
            times,
            costs,
            num_nodes,
            traffic_multiplier,
        }
    }

    #[inline(always)]
    fn index(&self, from: NodeIdx, to: NodeIdx) -> usize {
        from.get() * self.num_nodes + to.get()
    }

    #[inline(always)]
    pub fn distance(&self, from: NodeIdx, to: NodeIdx) -> Meters {
        self.distances[self.index(from, to)]
    }

    #[inline(always)]
    pub fn travel_time(&self, from: NodeIdx, to: NodeIdx) -> Minutes {
        self.times[self.index(from, to)]
    }

    #[inline(always)]
    pub fn travel_cost(&self, from: NodeIdx, to: NodeIdx) -> Cost {
        self.costs[self.index(from, to)]
    }

    pub fn num_nodes(&self) -> usize {
        self.num_nodes
    }

    pub fn traffic_multiplier(&self) -> f64 {
        self.traffic_multiplier
    }
}

fn travel_minutes(distance: Meters, speed: Kmh, traffic_multiplier: f64) -> Minutes {
    let minutes = (distance / speed).as_secs_f64() / 60.0 * traffic_multiplier;

    // Absorb float noise so that an exact 15 minutes does not become 16
    (minutes - 1e-9).ceil().max(0.0) as Minutes
}

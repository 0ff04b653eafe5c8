use crate::problem::{
    meters::Meters,
    routing_problem::{OrderIdx, RoutingProblem, RoutingVehicle, VehicleIdx, order_node},
    travel_matrix::{DEPOT_NODE, NodeIdx},
};

/// Route of one vehicle during the search.
///
/// Schedule and load are kept as parallel arrays indexed by stop position and
/// rebuilt after every modification, so feasibility checks for a candidate
/// change only look at the modified segment.
#[derive(Clone, Debug)]
pub struct WorkingSolutionRoute {
    vehicle_id: VehicleIdx,

    /// Orders in visiting order
    order_ids: Vec<OrderIdx>,

    /// Minute the vehicle reaches each stop
    arrivals: Vec<i64>,

    /// Minute service starts at each stop, arrivals clamped up to the window start
    begins: Vec<i64>,

    /// Minute the vehicle leaves each stop
    departures: Vec<i64>,

    /// Weight delivered up to and including each stop
    loads: Vec<f64>,

    // latest_begins[i] is the latest service start at stop i that keeps every
    // following stop and the return to the depot on time, computed backward
    latest_begins: Vec<i64>,

    total_weight: f64,
    total_volume: f64,

    /// Minute the vehicle is back at the depot
    end: i64,
}

impl WorkingSolutionRoute {
    pub fn empty(problem: &RoutingProblem, vehicle_id: VehicleIdx) -> Self {
        WorkingSolutionRoute {
            vehicle_id,
            order_ids: Vec::new(),
            arrivals: Vec::new(),
            begins: Vec::new(),
            departures: Vec::new(),
            loads: Vec::new(),
            latest_begins: Vec::new(),
            total_weight: 0.0,
            total_volume: 0.0,
            end: problem.depot_open(),
        }
    }

    pub fn len(&self) -> usize {
        self.order_ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order_ids.is_empty()
    }

    pub fn vehicle_id(&self) -> VehicleIdx {
        self.vehicle_id
    }

    pub fn vehicle<'a>(&self, problem: &'a RoutingProblem) -> &'a RoutingVehicle {
        problem.vehicle(self.vehicle_id)
    }

    pub fn order_ids(&self) -> &[OrderIdx] {
        &self.order_ids
    }

    pub fn order_id(&self, position: usize) -> OrderIdx {
        self.order_ids[position]
    }

    pub fn contains(&self, order_id: OrderIdx) -> bool {
        self.order_ids.contains(&order_id)
    }

    pub fn arrival(&self, position: usize) -> i64 {
        self.arrivals[position]
    }

    pub fn begin(&self, position: usize) -> i64 {
        self.begins[position]
    }

    pub fn departure(&self, position: usize) -> i64 {
        self.departures[position]
    }

    pub fn waiting(&self, position: usize) -> i64 {
        self.begins[position] - self.arrivals[position]
    }

    pub fn load_at(&self, position: usize) -> f64 {
        self.loads[position]
    }

    pub fn latest_begin(&self, position: usize) -> i64 {
        self.latest_begins[position]
    }

    pub fn total_weight(&self) -> f64 {
        self.total_weight
    }

    pub fn total_volume(&self) -> f64 {
        self.total_volume
    }

    pub fn start(&self, problem: &RoutingProblem) -> i64 {
        problem.depot_open()
    }

    pub fn end(&self) -> i64 {
        self.end
    }

    #[inline(always)]
    pub fn node(&self, position: usize) -> NodeIdx {
        order_node(self.order_ids[position])
    }

    /// Node visited before `position`, the depot for the first stop.
    #[inline(always)]
    pub fn previous_node(&self, position: usize) -> NodeIdx {
        if position == 0 {
            DEPOT_NODE
        } else {
            self.node(position - 1)
        }
    }

    /// Node visited after `position`, the depot for the last stop.
    #[inline(always)]
    pub fn next_node(&self, position: usize) -> NodeIdx {
        self.node_or_depot(position + 1)
    }

    /// Node at `position`, or the depot when `position` is past the last stop.
    #[inline(always)]
    pub fn node_or_depot(&self, position: usize) -> NodeIdx {
        if position < self.len() {
            self.node(position)
        } else {
            DEPOT_NODE
        }
    }

    /// Nodes from the depot back to the depot.
    pub fn nodes(&self) -> impl Iterator<Item = NodeIdx> + '_ {
        std::iter::once(DEPOT_NODE)
            .chain(self.order_ids.iter().map(|&order_id| order_node(order_id)))
            .chain(std::iter::once(DEPOT_NODE))
    }

    fn legs(&self) -> impl Iterator<Item = (NodeIdx, NodeIdx)> + '_ {
        let legs = if self.is_empty() { 0 } else { self.len() + 1 };
        self.nodes().zip(self.nodes().skip(1)).take(legs)
    }

    pub fn transport_costs(&self, problem: &RoutingProblem) -> f64 {
        self.legs()
            .map(|(from, to)| problem.travel_cost(from, to))
            .sum()
    }

    pub fn distance(&self, problem: &RoutingProblem) -> Meters {
        self.legs().map(|(from, to)| problem.distance(from, to)).sum()
    }

    /// Splices `replacement` in place of the stops in `start..end` and
    /// refreshes the schedule.
    pub fn replace_activities(
        &mut self,
        problem: &RoutingProblem,
        replacement: &[OrderIdx],
        start: usize,
        end: usize,
    ) {
        self.order_ids
            .splice(start..end, replacement.iter().copied());
        self.update_data(problem);
    }

    pub fn insert(&mut self, problem: &RoutingProblem, order_id: OrderIdx, position: usize) {
        self.replace_activities(problem, &[order_id], position, position);
    }

    pub fn remove(&mut self, problem: &RoutingProblem, position: usize) -> OrderIdx {
        let order_id = self.order_ids[position];
        self.replace_activities(problem, &[], position, position + 1);
        order_id
    }

    /// Cost added by inserting `order_id` before the stop at `position`.
    pub fn insertion_cost(&self, problem: &RoutingProblem, order_id: OrderIdx, position: usize) -> f64 {
        let previous = self.previous_node(position);
        let next = self.node_or_depot(position);
        let node = order_node(order_id);

        // depot to depot costs nothing, so an empty route needs no special case
        problem.travel_cost(previous, node) + problem.travel_cost(node, next)
            - problem.travel_cost(previous, next)
    }

    pub fn can_insert(&self, problem: &RoutingProblem, order_id: OrderIdx, position: usize) -> bool {
        self.is_valid_change(problem, std::iter::once(order_id), position, position)
    }

    /// Whether replacing the stops in `start..end` with `replacement` keeps
    /// the route within capacity and every time window, including the return
    /// to the depot before closing.
    ///
    /// Only the replaced segment is simulated, the unchanged suffix is
    /// checked against `latest_begins`.
    pub fn is_valid_change<I>(
        &self,
        problem: &RoutingProblem,
        replacement: I,
        start: usize,
        end: usize,
    ) -> bool
    where
        I: IntoIterator<Item = OrderIdx>,
    {
        let mut weight = self.total_weight;
        let mut volume = self.total_volume;
        for &removed in &self.order_ids[start..end] {
            weight -= problem.order(removed).weight();
            volume -= problem.order(removed).volume();
        }

        let mut departure = if start == 0 {
            problem.depot_open()
        } else {
            self.departures[start - 1]
        };
        let mut previous = self.previous_node(start);

        for order_id in replacement {
            let order = problem.order(order_id);
            let node = order_node(order_id);

            let arrival = departure + problem.travel_time(previous, node);
            let begin = arrival.max(order.time_window().start() as i64);
            if begin > order.time_window().end() as i64 {
                return false;
            }

            departure = begin + order.service_minutes() as i64;
            weight += order.weight();
            volume += order.volume();
            previous = node;
        }

        if !self.vehicle(problem).fits(weight, volume) {
            return false;
        }

        if end < self.len() {
            departure + problem.travel_time(previous, self.node(end)) <= self.latest_begins[end]
        } else {
            departure + problem.travel_time(previous, DEPOT_NODE) <= problem.depot_close()
        }
    }

    /// Whether every stop of the current route is on time and within
    /// capacity.
    pub fn is_feasible(&self, problem: &RoutingProblem) -> bool {
        let on_time = self.order_ids.iter().enumerate().all(|(position, &order_id)| {
            problem
                .order(order_id)
                .time_window()
                .contains(self.begins[position] as u32)
        });

        on_time
            && self.end <= problem.depot_close()
            && self.vehicle(problem).fits(self.total_weight, self.total_volume)
    }

    fn update_data(&mut self, problem: &RoutingProblem) {
        let len = self.len();
        self.arrivals.resize(len, 0);
        self.begins.resize(len, 0);
        self.departures.resize(len, 0);
        self.loads.resize(len, 0.0);
        self.latest_begins.resize(len, 0);

        let mut departure = problem.depot_open();
        let mut previous = DEPOT_NODE;
        let mut weight = 0.0;
        let mut volume = 0.0;

        for (position, &order_id) in self.order_ids.iter().enumerate() {
            let order = problem.order(order_id);
            let node = order_node(order_id);

            let arrival = departure + problem.travel_time(previous, node);
            let begin = arrival.max(order.time_window().start() as i64);
            departure = begin + order.service_minutes() as i64;
            weight += order.weight();
            volume += order.volume();

            self.arrivals[position] = arrival;
            self.begins[position] = begin;
            self.departures[position] = departure;
            self.loads[position] = weight;
            previous = node;
        }

        self.total_weight = weight;
        self.total_volume = volume;
        self.end = if len == 0 {
            problem.depot_open()
        } else {
            departure + problem.travel_time(previous, DEPOT_NODE)
        };

        let mut latest = problem.depot_close();
        let mut next = DEPOT_NODE;
        for position in (0..len).rev() {
            let order = problem.order(self.order_ids[position]);
            let node = self.node(position);

            let latest_begin = (order.time_window().end() as i64).min(
                latest - problem.travel_time(node, next) - order.service_minutes() as i64,
            );

            self.latest_begins[position] = latest_begin;
            latest = latest_begin;
            next = node;
        }
    }
}

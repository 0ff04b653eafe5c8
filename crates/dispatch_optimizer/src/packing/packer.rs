use fxhash::FxHashSet;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use crate::{
    error::OptimizerError,
    packing::{bin::BinSpec, item::ItemSpec, statistics::PackingStatistics},
    utils::round::percentage,
};

const EPSILON: f64 = 1e-9;

#[derive(Serialize, Deserialize, JsonSchema, Debug, Clone, PartialEq)]
pub struct PackedItem {
    pub item_id: String,
    pub weight: f64,
    pub volume: f64,
    /// Bin weight once this item is loaded
    pub cumulative_weight: f64,
    /// Bin volume once this item is loaded
    pub cumulative_volume: f64,
}

/// Content of one bin after packing.
#[derive(Serialize, Deserialize, JsonSchema, Debug, Clone, PartialEq)]
pub struct BinAssignment {
    pub bin_id: String,
    pub max_weight: f64,
    pub volume: f64,
    pub current_weight: f64,
    pub current_volume: f64,
    pub weight_utilization_pct: f64,
    pub volume_utilization_pct: f64,
    pub item_count: usize,
    pub remaining_weight: f64,
    pub remaining_volume: f64,
    /// In loading order
    pub packed_items: Vec<PackedItem>,
    /// Items no bin could take, only filled on the last bin
    pub unpacked_item_ids: Vec<String>,
}

impl BinAssignment {
    fn empty(bin: &BinSpec) -> Self {
        BinAssignment {
            bin_id: bin.id.clone(),
            max_weight: bin.max_weight,
            volume: bin.volume(),
            current_weight: 0.0,
            current_volume: 0.0,
            weight_utilization_pct: 0.0,
            volume_utilization_pct: 0.0,
            item_count: 0,
            remaining_weight: bin.max_weight,
            remaining_volume: bin.volume(),
            packed_items: Vec::new(),
            unpacked_item_ids: Vec::new(),
        }
    }

    fn can_fit(&self, item: &ItemSpec) -> bool {
        self.current_weight + item.weight <= self.max_weight + EPSILON
            && item.volume() <= self.remaining_volume + EPSILON
    }

    fn add(&mut self, item: &ItemSpec) {
        self.current_weight += item.weight;
        self.current_volume += item.volume();
        self.remaining_weight = self.max_weight - self.current_weight;
        self.remaining_volume = self.volume - self.current_volume;
        self.item_count += 1;
        self.weight_utilization_pct = percentage(self.current_weight, self.max_weight);
        self.volume_utilization_pct = percentage(self.current_volume, self.volume);

        self.packed_items.push(PackedItem {
            item_id: item.id.clone(),
            weight: item.weight,
            volume: item.volume(),
            cumulative_weight: self.current_weight,
            cumulative_volume: self.current_volume,
        });
    }
}

#[derive(Serialize, Deserialize, JsonSchema, Debug, Clone, PartialEq, Default)]
pub struct PackingResult {
    pub bin_results: Vec<BinAssignment>,
    pub unpacked_item_ids: Vec<String>,
    pub statistics: PackingStatistics,
}

/// First-fit decreasing by volume: items are taken from the largest to the
/// smallest and loaded in the first bin with enough weight and volume left.
/// Volume is an aggregate check, items are not placed geometrically.
#[instrument(skip_all, level = "debug", fields(bins = bins.len(), items = items.len()))]
pub fn pack_loads(bins: &[BinSpec], items: &[ItemSpec]) -> Result<PackingResult, OptimizerError> {
    validate(bins, items)?;

    let mut sorted_items = items.iter().collect::<Vec<_>>();
    // Stable, equal volumes keep their input order
    sorted_items.sort_by(|a, b| b.volume().total_cmp(&a.volume()));

    let mut bin_results = bins.iter().map(BinAssignment::empty).collect::<Vec<_>>();
    let mut unpacked_item_ids = Vec::new();

    for item in sorted_items {
        match bin_results.iter_mut().find(|bin| bin.can_fit(item)) {
            Some(bin) => bin.add(item),
            None => {
                debug!(item = item.id, "item does not fit in any bin");
                unpacked_item_ids.push(item.id.clone());
            }
        }
    }

    if let Some(last) = bin_results.last_mut() {
        last.unpacked_item_ids = unpacked_item_ids.clone();
    }

    let statistics = PackingStatistics::from_bins(&bin_results, items.len());

    info!(
        packed = statistics.packed_items,
        unpacked = statistics.unpacked_items,
        efficiency = statistics.packing_efficiency_pct,
        "packing finished"
    );

    Ok(PackingResult {
        bin_results,
        unpacked_item_ids,
        statistics,
    })
}

fn validate(bins: &[BinSpec], items: &[ItemSpec]) -> Result<(), OptimizerError> {
    let mut bin_ids = FxHashSet::default();
    for bin in bins {
        bin.validate()?;
        if !bin_ids.insert(bin.id.as_str()) {
            return Err(OptimizerError::InvalidBin {
                bin_id: bin.id.clone(),
                reason: "duplicate id".to_owned(),
            });
        }
    }

    let mut item_ids = FxHashSet::default();
    for item in items {
        item.validate()?;
        if !item_ids.insert(item.id.as_str()) {
            return Err(OptimizerError::InvalidItem {
                item_id: item.id.clone(),
                reason: "duplicate id".to_owned(),
            });
        }
    }

    Ok(())
}

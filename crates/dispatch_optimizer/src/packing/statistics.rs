use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::{
    packing::packer::BinAssignment,
    utils::round::{percentage, round_to},
};

#[derive(Serialize, Deserialize, JsonSchema, Debug, Clone, PartialEq, Default)]
pub struct PackingStatistics {
    pub total_items: usize,
    pub packed_items: usize,
    pub unpacked_items: usize,
    /// Share of items packed, two decimals
    pub packing_efficiency_pct: f64,
    pub average_weight_utilization_pct: f64,
    pub average_volume_utilization_pct: f64,
    pub total_weight_loaded: f64,
    pub total_weight_capacity: f64,
}

impl PackingStatistics {
    pub fn from_bins(bins: &[BinAssignment], total_items: usize) -> Self {
        let packed_items = bins.iter().map(|bin| bin.item_count).sum::<usize>();

        let average = |utilization: fn(&BinAssignment) -> f64| {
            if bins.is_empty() {
                0.0
            } else {
                round_to(
                    bins.iter().map(utilization).sum::<f64>() / bins.len() as f64,
                    1,
                )
            }
        };

        PackingStatistics {
            total_items,
            packed_items,
            unpacked_items: total_items - packed_items,
            packing_efficiency_pct: if total_items == 0 {
                0.0
            } else {
                round_to(packed_items as f64 / total_items as f64 * 100.0, 2)
            },
            average_weight_utilization_pct: average(|bin| {
                percentage(bin.current_weight, bin.max_weight)
            }),
            average_volume_utilization_pct: average(|bin| percentage(bin.current_volume, bin.volume)),
            total_weight_loaded: bins.iter().map(|bin| bin.current_weight).sum(),
            total_weight_capacity: bins.iter().map(|bin| bin.max_weight).sum(),
        }
    }
}

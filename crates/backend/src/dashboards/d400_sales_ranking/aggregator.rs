//! Merge of the per-channel sales into one ranking.

use std::collections::HashMap;

use contracts::shared::sales::{AggregatedSale, SaleRecord};

/// Fold both channels into one entry per model, rank them and keep the
/// first `limit`.
///
/// Ranking is by total quantity, then total revenue, both descending. The
/// sort is stable, so full ties keep the order in which models first
/// appeared (`source_a` before `source_b`).
pub fn combine_and_rank(
    source_a: &[SaleRecord],
    source_b: &[SaleRecord],
    limit: usize,
) -> Vec<AggregatedSale> {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut totals: Vec<AggregatedSale> = Vec::new();

    for record in source_a.iter().chain(source_b) {
        let slot = *index.entry(record.model_id.clone()).or_insert_with(|| {
            totals.push(AggregatedSale {
                model_id: record.model_id.clone(),
                model_name: record.model_name.clone(),
                total_quantity: 0,
                total_revenue: 0.0,
            });
            totals.len() - 1
        });
        let entry = &mut totals[slot];
        entry.total_quantity = entry.total_quantity.saturating_add(record.quantity);
        entry.total_revenue += record.revenue;
    }

    totals.sort_by(|a, b| {
        b.total_quantity
            .cmp(&a.total_quantity)
            .then_with(|| b.total_revenue.total_cmp(&a.total_revenue))
    });
    totals.truncate(limit);
    totals
}

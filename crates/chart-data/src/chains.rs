// File: crates/chart-data/src/chains.rs
// Summary: Chain-breakdown aggregation across datapoints and label/colour decoration.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use serde::{Deserialize, Serialize};

use crate::types::{ChainId, Datapoint};

/// Sum of one chain's positive contributions across a dataset.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ChainTotal {
    pub chain: ChainId,
    pub total: f64,
    /// Number of datapoints that contributed.
    pub points: usize,
}

/// Per-chain totals, largest first (ties broken by chain id).
pub fn chain_totals(points: &[Datapoint]) -> Vec<ChainTotal> {
    let mut acc: BTreeMap<ChainId, (f64, usize)> = BTreeMap::new();
    for point in points {
        for (chain, value) in point.chains() {
            let slot = acc.entry(chain).or_insert((0.0, 0));
            slot.0 += value;
            slot.1 += 1;
        }
    }
    let mut out: Vec<ChainTotal> = acc
        .into_iter()
        .map(|(chain, (total, points))| ChainTotal { chain, total, points })
        .collect();
    out.sort_by(|a, b| b.total.total_cmp(&a.total).then_with(|| a.chain.cmp(&b.chain)));
    out
}

/// Distinct chains with at least one positive contribution, sorted.
pub fn chain_ids(points: &[Datapoint]) -> Vec<ChainId> {
    points
        .iter()
        .flat_map(|p| p.chains().into_keys())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Display attributes for a chain.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainInfo {
    pub label: String,
    #[serde(default)]
    pub color: Option<String>,
}

/// Resolves a chain id to its display attributes.
pub trait ChainLookup {
    fn lookup(&self, chain: &str) -> Option<ChainInfo>;
}

impl ChainLookup for BTreeMap<ChainId, ChainInfo> {
    fn lookup(&self, chain: &str) -> Option<ChainInfo> { self.get(chain).cloned() }
}

impl ChainLookup for HashMap<ChainId, ChainInfo> {
    fn lookup(&self, chain: &str) -> Option<ChainInfo> { self.get(chain).cloned() }
}

/// A chain total ready for a legend or pie slice.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ChainEntry {
    pub chain: ChainId,
    pub label: String,
    pub color: Option<String>,
    pub value: f64,
}

/// Attach labels and colours; unknown chains are labelled with their id.
/// Values pass through untouched.
pub fn decorate(totals: &[ChainTotal], lookup: &dyn ChainLookup) -> Vec<ChainEntry> {
    totals
        .iter()
        .map(|t| {
            let info = lookup.lookup(&t.chain);
            ChainEntry {
                chain: t.chain.clone(),
                label: info.as_ref().map_or_else(|| t.chain.clone(), |i| i.label.clone()),
                color: info.and_then(|i| i.color),
                value: t.total,
            }
        })
        .collect()
}

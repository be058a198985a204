//! Table-level and label-level contact metrics

use crate::contact::types::ContactTable;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Summary of a whole contact table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContactSummary {
    /// Number of touching label pairs
    pub num_pairs: usize,

    /// Sum of all contact counts
    pub total_contacts: u64,

    /// Average count per touching pair
    pub mean_contacts_per_pair: f64,

    /// Pair with the largest count, as `(low, high, count)`
    pub largest_pair: Option<(u64, u64, u64)>,
}

impl ContactSummary {
    /// Compute the summary of a table
    pub fn compute(table: &ContactTable) -> Self {
        let num_pairs = table.len();
        let total_contacts = table.total_contacts();

        let mean_contacts_per_pair = if num_pairs > 0 {
            total_contacts as f64 / num_pairs as f64
        } else {
            0.0
        };

        // Ties resolve to the smallest key so the summary is deterministic
        let largest_pair = table
            .sorted()
            .into_iter()
            .fold(None, |best: Option<(u64, u64, u64)>, (key, record)| match best {
                Some((_, _, count)) if count >= record.count => best,
                _ => Some((key.low(), key.high(), record.count)),
            });

        Self {
            num_pairs,
            total_contacts,
            mean_contacts_per_pair,
            largest_pair,
        }
    }

    /// Print summary statistics
    pub fn print_summary(&self) {
        println!("\n{}", "=".repeat(60));
        println!("CONTACT DETECTION RESULTS");
        println!("{}", "=".repeat(60));
        println!();
        println!("  Label Pairs:     {}", self.num_pairs);
        println!("  Total Contacts:  {}", self.total_contacts);

        if self.num_pairs > 0 {
            println!("  Mean per Pair:   {:.2}", self.mean_contacts_per_pair);
            if let Some((a, b, count)) = self.largest_pair {
                println!("  Largest Pair:    {} <-> {} ({} contacts)", a, b, count);
            }
        }

        println!();
        println!("{}", "=".repeat(60));
    }
}

/// Contact statistics of one label against all of its neighbors
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelMetrics {
    pub label: u64,

    /// Contacts with any other label
    pub total_contacts: u64,

    /// Number of distinct labels touched
    pub num_neighbors: usize,

    /// Neighbor with the most contacts, as `(label, count)`
    pub strongest_neighbor: Option<(u64, u64)>,
}

impl LabelMetrics {
    /// Per-label metrics, ordered by label
    pub fn compute(table: &ContactTable) -> Vec<Self> {
        let mut by_label: BTreeMap<u64, LabelMetrics> = BTreeMap::new();

        for (key, record) in table.sorted() {
            for label in [key.low(), key.high()] {
                let Some(neighbor) = key.other(label) else {
                    continue;
                };
                let metrics = by_label.entry(label).or_insert_with(|| LabelMetrics {
                    label,
                    total_contacts: 0,
                    num_neighbors: 0,
                    strongest_neighbor: None,
                });
                metrics.total_contacts += record.count;
                metrics.num_neighbors += 1;

                let stronger = match metrics.strongest_neighbor {
                    Some((_, best)) => record.count > best,
                    None => true,
                };
                if stronger {
                    metrics.strongest_neighbor = Some((neighbor, record.count));
                }
            }
        }

        by_label.into_values().collect()
    }
}

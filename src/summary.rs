use crate::century::{classify, CenturyLabel};
use crate::models::{Archive, ConnectionCounts};
use std::collections::BTreeMap;
use tracing::debug;

/// Artefact counts per century, iterated in label order.
pub type CenturyDistribution = BTreeMap<CenturyLabel, u64>;

/// Per-individual connection counts in document order.
pub type ConnectionSummary = Vec<(String, ConnectionCounts)>;

/// Buckets every artefact by the century of its creation date.
///
/// Artefacts whose date cannot be classified are left out.
pub fn distribution_by_century(archive: &Archive) -> CenturyDistribution {
    let mut distribution = CenturyDistribution::new();
    let mut unclassified = 0usize;

    for artefact in archive.artefacts() {
        match classify(artefact.date_of_creation()) {
            Some(label) => *distribution.entry(label).or_insert(0) += 1,
            None => unclassified += 1,
        }
    }

    debug!(
        buckets = distribution.len(),
        unclassified = unclassified,
        "Computed century distribution"
    );
    distribution
}

/// Connection counts for each individual. Individuals sharing a name keep
/// separate entries.
pub fn connections_by_type(archive: &Archive) -> ConnectionSummary {
    archive
        .individuals()
        .iter()
        .map(|i| (i.name().to_string(), i.connection_counts()))
        .collect()
}

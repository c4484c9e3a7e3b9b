use crate::config::{Q1_HEADING, Q2_HEADING};
use crate::summary::{CenturyDistribution, ConnectionSummary};
use std::io::{self, Write};

/// Order in which century buckets are listed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CenturyOrder {
    /// Label text order, e.g. `10th Century CE` before `3th Century BCE`
    #[default]
    Lexical,
    /// BCE centuries counting down, then CE centuries counting up
    Chronological,
}

pub fn write_report<W: Write>(
    out: &mut W,
    distribution: &CenturyDistribution,
    connections: &ConnectionSummary,
    order: CenturyOrder,
) -> io::Result<()> {
    writeln!(out, "{}", Q1_HEADING)?;

    let mut buckets: Vec<_> = distribution.iter().collect();
    if order == CenturyOrder::Chronological {
        buckets.sort_by(|(a, _), (b, _)| a.chronological_cmp(b));
    }
    for (label, count) in buckets {
        writeln!(out, "{}: {} artifacts", label, count)?;
    }

    writeln!(out)?;
    writeln!(out, "{}", Q2_HEADING)?;

    for (name, counts) in connections {
        writeln!(out, "{}:", name)?;
        writeln!(out, "  - Artifact connections: {}", counts.artifact)?;
        writeln!(out, "  - Event connections: {}", counts.event)?;
        writeln!(out, "  - Individual connections: {}", counts.individual)?;
        writeln!(out, "  - Total: {}", counts.total())?;
    }

    Ok(())
}

/// Writes the report to stdout.
pub fn print_report(
    distribution: &CenturyDistribution,
    connections: &ConnectionSummary,
    order: CenturyOrder,
) -> io::Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_report(&mut out, distribution, connections, order)?;
    out.flush()
}

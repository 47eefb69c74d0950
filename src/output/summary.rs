//! Summary table of an assignment run.

use super::terminal::format_field;
use crate::processing::Allocation;
use colored::Colorize;
use itertools::Itertools;
use std::io::{self, Write};

/// How a subnet ended up with (or without) its CIDR.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    /// Assigned in this run.
    Assigned,
    /// CIDR came from the document or an existing cloud subnet.
    Declared,
    /// Left without an IPv4 CIDR.
    Skipped,
}

impl Source {
    fn label(&self) -> &'static str {
        match self {
            Source::Assigned => "assigned",
            Source::Declared => "declared",
            Source::Skipped => "skipped",
        }
    }
}

/// Source of each subnet's CIDR, in subnet order.
pub fn subnet_sources(allocation: &Allocation) -> Vec<Source> {
    allocation
        .subnets
        .iter()
        .map(|s| {
            if allocation.assigned.iter().any(|a| a.subnet == s.name) {
                Source::Assigned
            } else if s.cidr().is_some() {
                Source::Declared
            } else {
                Source::Skipped
            }
        })
        .collect()
}

/// Write a quoted, column-aligned summary of `allocation` to `out`.
pub fn write_allocation<W: Write>(
    out: &mut W,
    cluster_name: &str,
    allocation: &Allocation,
) -> io::Result<()> {
    writeln!(
        out,
        "# cluster '{}': {} subnets, {} assigned",
        cluster_name,
        allocation.subnets.len(),
        allocation.assigned.len()
    )?;
    writeln!(
        out,
        r#"{},{},{},{},{}"#,
        format_field("subnet_name", 24),
        format_field("zone", 16),
        format_field("type", 11),
        format_field("cidr", 20),
        format_field("source", 10)
    )?;

    let sources = subnet_sources(allocation);
    for (subnet, source) in allocation.subnets.iter().zip(sources) {
        let source = match source {
            Source::Assigned => source.label().green(),
            Source::Declared => source.label().normal(),
            Source::Skipped => source.label().yellow(),
        };
        writeln!(
            out,
            "{},{},{},{},{}",
            format_field(&subnet.name, 24),
            format_field(&subnet.zone, 16),
            format_field(&subnet.kind, 11),
            format_field(subnet.cidr().unwrap_or("None"), 20),
            format_field(source, 10)
        )?;
    }

    if !allocation.assigned.is_empty() {
        writeln!(
            out,
            "# assigned: {}",
            allocation
                .assigned
                .iter()
                .map(|a| format!("{}={} ({})", a.subnet, a.cidr, a.pool))
                .join(", ")
        )?;
    }
    Ok(())
}

/// Print the summary of `allocation` to stderr, keeping stdout for documents.
pub fn print_allocation(cluster_name: &str, allocation: &Allocation) -> io::Result<()> {
    let stderr = io::stderr();
    let mut out = stderr.lock();
    write_allocation(&mut out, cluster_name, allocation)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Ipv4, SubnetSpec};
    use crate::processing::{Assignment, Pool};

    fn allocation() -> Allocation {
        Allocation {
            subnets: vec![
                SubnetSpec::new("a", "a", "Public").with_cidr("10.0.0.0/17"),
                SubnetSpec::new("b", "b", "Public").with_cidr("10.0.128.0/17"),
                SubnetSpec::new("c", "c", "Private").with_ipv6_cidr("/64#1"),
            ],
            assigned: vec![Assignment {
                subnet: "b".to_string(),
                zone: "b".to_string(),
                cidr: Ipv4::new("10.0.128.0/17").unwrap(),
                pool: Pool::Primary,
            }],
        }
    }

    #[test]
    fn test_subnet_sources() {
        assert_eq!(
            subnet_sources(&allocation()),
            vec![Source::Declared, Source::Assigned, Source::Skipped]
        );
    }

    #[test]
    fn test_write_allocation() {
        colored::control::set_override(false);
        let mut out = Vec::new();
        write_allocation(&mut out, "dev", &allocation()).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "# cluster 'dev': 3 subnets, 1 assigned");
        assert_eq!(lines.len(), 6);
        assert!(lines[3].contains("\"10.0.128.0/17\""));
        assert!(lines[3].ends_with("\"assigned\""));
        assert!(lines[4].contains("\"None\""));
        assert_eq!(lines[5], "# assigned: b=10.0.128.0/17 (primary)");
    }
}

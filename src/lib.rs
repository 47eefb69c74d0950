//! Automatic CIDR assignment for cluster subnets.
//!
//! Subnets declared without a CIDR are given one carved out of the cluster's
//! `networkCIDR`, avoiding every range already claimed by other subnets.

pub mod azure;
pub mod config;
pub mod error;
pub mod models;
pub mod output;
pub mod processing;

use azure::VpcLookup;
use error::AllocError;
use itertools::Itertools;
use models::{Cluster, Ipv4, SubnetSpec};
use processing::Allocation;
use std::error::Error;
use std::io::Read;

/// Read the cluster documents in `file` (`-` reads stdin).
///
/// A file holds either one cluster object or a JSON array of them.
pub fn read_clusters(file: &str) -> Result<Vec<Cluster>, Box<dyn Error>> {
    let contents = if file == "-" {
        let mut contents = String::new();
        std::io::stdin()
            .read_to_string(&mut contents)
            .map_err(|e| format!("error reading stdin: {e}"))?;
        contents
    } else {
        std::fs::read_to_string(file).map_err(|e| format!("error reading file {file:?}: {e}"))?
    };
    parse_clusters(&contents).map_err(|e| format!("error parsing file {file:?}: {e}").into())
}

/// Parse one cluster object or an array of cluster objects.
pub fn parse_clusters(contents: &str) -> Result<Vec<Cluster>, Box<dyn Error>> {
    let value: serde_json::Value = serde_json::from_str(contents)?;
    let documents = match value {
        serde_json::Value::Array(items) => items,
        other => vec![other],
    };

    let mut clusters = Vec::with_capacity(documents.len());
    for (i, document) in documents.into_iter().enumerate() {
        let cluster: Cluster = serde_path_to_error::deserialize(document)
            .map_err(|e| format!("document #{i}: path={} error={}", e.path(), e.inner()))?;
        clusters.push(cluster);
    }
    Ok(clusters)
}

/// Assign CIDRs to a cluster, returning the updated copy and what was assigned.
pub fn assign_cluster(
    cluster: &Cluster,
    lookup: Option<&dyn VpcLookup>,
) -> Result<(Cluster, Allocation), AllocError> {
    let allocation = processing::assign_cidrs_to_subnets(&cluster.spec.networking, lookup)?;
    let updated = cluster.with_subnets(allocation.subnets.clone());
    Ok((updated, allocation))
}

// return error if two subnets inside the parent network overlap
pub fn check_for_overlapping_subnets(
    network_cidr: &str,
    subnets: &[SubnetSpec],
) -> Result<(), Box<dyn Error>> {
    let parent = Ipv4::new(network_cidr)?.network();

    let mut blocks = Vec::new();
    for subnet in subnets {
        if let Some(cidr) = subnet.cidr() {
            let block = Ipv4::new(cidr)
                .map_err(|e| format!("subnet {:?} has invalid CIDR {cidr:?}: {e}", subnet.name))?;
            if parent.contains(block.lo()) {
                blocks.push((subnet.name.as_str(), block.network()));
            }
        }
    }

    for ((name_a, a), (name_b, b)) in blocks.iter().tuple_combinations() {
        if a.overlaps(b) {
            return Err(format!("Overlap found: subnet {name_a:?} ({a}) and {name_b:?} ({b})").into());
        }
    }
    Ok(())
}

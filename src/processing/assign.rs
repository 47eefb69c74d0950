//! Handing out candidate blocks to subnets without a CIDR.

use super::partition::Partition;
use super::reservations::Reservations;
use crate::error::AllocError;
use crate::models::{Ipv4, SubnetRole, SubnetSpec};
use serde::Serialize;
use std::fmt;

/// Which pool an assigned block came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Pool {
    Primary,
    Utility,
}

impl fmt::Display for Pool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Pool::Primary => f.write_str("primary"),
            Pool::Utility => f.write_str("utility"),
        }
    }
}

/// A CIDR assigned to a subnet during this run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Assignment {
    pub subnet: String,
    pub zone: String,
    pub cidr: Ipv4,
    pub pool: Pool,
}

/// Private subnets that already have an IPv6 CIDR are meant to be IPv4-less.
fn wants_ipv4(subnet: &SubnetSpec) -> Result<bool, AllocError> {
    Ok(!(subnet.role()? == SubnetRole::Private && subnet.ipv6_cidr().is_some()))
}

/// Assign blocks from `blocks` to the `candidates` (indices into `subnets`)
/// that have no CIDR, in candidate order.
pub fn assign_from_pool(
    subnets: &mut [SubnetSpec],
    candidates: &[usize],
    pool: Pool,
    blocks: Vec<Ipv4>,
) -> Result<Vec<Assignment>, AllocError> {
    let mut blocks = blocks.into_iter();
    let mut assigned = Vec::new();

    for &i in candidates {
        let subnet = &mut subnets[i];
        if subnet.cidr().is_some() {
            continue;
        }
        if !wants_ipv4(subnet)? {
            log::debug!(
                "Skipping IPv6-only private subnet '{}' ({})",
                subnet.name,
                subnet.ipv6_cidr().unwrap_or_default()
            );
            continue;
        }

        let cidr = blocks
            .next()
            .ok_or_else(|| AllocError::InsufficientCIDRs {
                subnet: subnet.name.clone(),
                pool: pool.to_string(),
            })?;
        subnet.cidr = Some(cidr.to_string());
        log::info!("Assigned CIDR {} to subnet {}", cidr, subnet.name);

        assigned.push(Assignment {
            subnet: subnet.name.clone(),
            zone: subnet.zone.clone(),
            cidr,
            pool,
        });
    }

    Ok(assigned)
}

/// Fill in CIDRs for all candidates: utility subnets first, then primary ones.
pub fn assign_cidrs(
    subnets: &mut [SubnetSpec],
    reservations: &Reservations,
    partition: Partition,
) -> Result<Vec<Assignment>, AllocError> {
    let mut assigned = Vec::new();

    if let Some(secondary) = partition.secondary {
        log::debug!(
            "Utility subnets share {} split into {} blocks",
            secondary.parent,
            secondary.blocks.len()
        );
        assigned.extend(assign_from_pool(
            subnets,
            &reservations.secondary,
            Pool::Utility,
            secondary.blocks,
        )?);
    }

    assigned.extend(assign_from_pool(
        subnets,
        &reservations.primary,
        Pool::Primary,
        partition.primary,
    )?);

    Ok(assigned)
}

//! Automatic CIDR assignment for a cluster's subnets.

use super::assign::{assign_cidrs, Assignment};
use super::external::resolve_external_subnets;
use super::partition::{partition, slot_count};
use super::reservations::{all_subnets_have_cidrs, collect_reservations};
use crate::azure::VpcLookup;
use crate::error::AllocError;
use crate::models::{Ipv4, NetworkingSpec, SubnetSpec};

/// Result of a successful run: the complete subnet list and what was assigned.
#[derive(Debug, Clone, PartialEq)]
pub struct Allocation {
    pub subnets: Vec<SubnetSpec>,
    pub assigned: Vec<Assignment>,
}

impl Allocation {
    fn unchanged(subnets: Vec<SubnetSpec>) -> Allocation {
        Allocation {
            subnets,
            assigned: Vec::new(),
        }
    }
}

/// Assign CIDRs to every subnet of `networking` that does not have one.
///
/// The input is never modified; on success the returned [`Allocation`] holds
/// the full resolved subnet list. `lookup` is only consulted when a network id
/// is configured.
pub fn assign_cidrs_to_subnets(
    networking: &NetworkingSpec,
    lookup: Option<&dyn VpcLookup>,
) -> Result<Allocation, AllocError> {
    let mut subnets = networking.subnets.clone();

    if all_subnets_have_cidrs(&subnets) {
        log::info!("All subnets have CIDRs; skipping assignment logic");
        return Ok(Allocation::unchanged(subnets));
    }

    if let Some(network_id) = networking.network_id() {
        let lookup = lookup.ok_or_else(|| AllocError::VpcLookup {
            network_id: network_id.to_string(),
            reason: "no network lookup configured".to_string(),
        })?;
        let vpc = lookup
            .find_vpc_info(network_id)
            .map_err(|e| AllocError::VpcLookup {
                network_id: network_id.to_string(),
                reason: e.to_string(),
            })?
            .ok_or_else(|| AllocError::VpcNotFound(network_id.to_string()))?;

        resolve_external_subnets(network_id, &vpc, &mut subnets)?;

        if all_subnets_have_cidrs(&subnets) {
            log::info!("All subnets have CIDRs; skipping assignment logic");
            return Ok(Allocation::unchanged(subnets));
        }
    }

    let parent = Ipv4::new(&networking.network_cidr)
        .map_err(|_| AllocError::InvalidParentCIDR(networking.network_cidr.clone()))?
        .network();

    let reservations = collect_reservations(parent, &subnets)?;
    let slots = slot_count(
        reservations.primary.len(),
        !reservations.secondary.is_empty(),
    );
    let pools = partition(
        parent,
        slots,
        !reservations.secondary.is_empty(),
        &reservations.reserved,
    )?;
    let assigned = assign_cidrs(&mut subnets, &reservations, pools)?;

    log::info!(
        "Assigned {} CIDRs from {} to {} subnets",
        assigned.len(),
        parent,
        subnets.len()
    );

    Ok(Allocation { subnets, assigned })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::azure::StaticLookup;
    use crate::models::{VpcInfo, VpcSubnet};

    #[test]
    fn test_fully_assigned_is_noop() {
        let networking = NetworkingSpec::new(
            "not-a-cidr",
            vec![SubnetSpec::new("a", "a", "Public").with_cidr("10.0.0.0/17")],
        );
        let allocation = assign_cidrs_to_subnets(&networking, None).unwrap();
        assert!(allocation.assigned.is_empty());
        assert_eq!(allocation.subnets, networking.subnets);
    }

    #[test]
    fn test_input_is_not_modified() {
        let networking = NetworkingSpec::new(
            "10.0.0.0/16",
            vec![
                SubnetSpec::new("a", "a", "Public"),
                SubnetSpec::new("b", "b", "Public"),
            ],
        );
        let allocation = assign_cidrs_to_subnets(&networking, None).unwrap();
        assert!(networking.subnets.iter().all(|s| s.cidr().is_none()));
        assert_eq!(allocation.assigned.len(), 2);
    }

    #[test]
    fn test_network_id_without_lookup() {
        let mut networking =
            NetworkingSpec::new("10.0.0.0/16", vec![SubnetSpec::new("a", "a", "Public")]);
        networking.network_id = Some("vnet-1".to_string());
        assert!(matches!(
            assign_cidrs_to_subnets(&networking, None).unwrap_err(),
            AllocError::VpcLookup { .. }
        ));
    }

    #[test]
    fn test_vpc_not_found() {
        let mut networking =
            NetworkingSpec::new("10.0.0.0/16", vec![SubnetSpec::new("a", "a", "Public")]);
        networking.network_id = Some("vnet-missing".to_string());
        let lookup = StaticLookup::default();
        assert_eq!(
            assign_cidrs_to_subnets(&networking, Some(&lookup)).unwrap_err(),
            AllocError::VpcNotFound("vnet-missing".to_string())
        );
    }

    #[test]
    fn test_lookup_fills_every_cidr() {
        let mut networking = NetworkingSpec::new(
            "not-a-cidr",
            vec![SubnetSpec::new("a", "westeurope", "Public").with_id("subnet-a")],
        );
        networking.network_id = Some("vnet-1".to_string());
        let lookup = StaticLookup::new(vec![VpcInfo {
            id: "vnet-1".to_string(),
            cidr: None,
            subnets: vec![VpcSubnet {
                id: "subnet-a".to_string(),
                zone: "westeurope".to_string(),
                cidr: "10.9.0.0/24".to_string(),
            }],
        }]);

        // Parent CIDR is never parsed once the lookup resolves every subnet.
        let allocation = assign_cidrs_to_subnets(&networking, Some(&lookup)).unwrap();
        assert!(allocation.assigned.is_empty());
        assert_eq!(allocation.subnets[0].cidr(), Some("10.9.0.0/24"));
    }
}

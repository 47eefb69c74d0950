//! Reservation collection.
//!
//! Classifies declared subnets into primary and utility candidates and records
//! the blocks already claimed inside the parent network.

use crate::error::AllocError;
use crate::models::{Ipv4, SubnetSpec};

/// Blocks already in use, plus the subnets taking part in allocation.
///
/// Candidates are indices into the subnet list, sorted by zone.
#[derive(Debug, Default, PartialEq)]
pub struct Reservations {
    pub reserved: Vec<Ipv4>,
    pub primary: Vec<usize>,
    pub secondary: Vec<usize>,
}

/// Returns true iff each subnet has a non-empty CIDR.
pub fn all_subnets_have_cidrs(subnets: &[SubnetSpec]) -> bool {
    subnets.iter().all(|s| s.cidr().is_some())
}

/// Scan the declared subnets for existing reservations and allocation candidates.
///
/// Subnets whose CIDR lies outside `parent` are left out entirely.
pub fn collect_reservations(
    parent: Ipv4,
    subnets: &[SubnetSpec],
) -> Result<Reservations, AllocError> {
    let mut reservations = Reservations::default();

    for (i, subnet) in subnets.iter().enumerate() {
        let declared = match subnet.cidr() {
            Some(cidr) => {
                let block = Ipv4::new(cidr)
                    .map_err(|_| AllocError::InvalidSubnetCIDR {
                        subnet: subnet.name.clone(),
                        cidr: cidr.to_string(),
                    })?
                    .network();
                if !parent.contains(block.lo()) {
                    log::debug!(
                        "Skipping subnet '{}': CIDR {} is outside {}",
                        subnet.name,
                        block,
                        parent
                    );
                    continue;
                }
                Some(block)
            }
            None => None,
        };

        if subnet.role()?.is_primary() {
            reservations.primary.push(i);
        } else {
            reservations.secondary.push(i);
        }

        if let Some(block) = declared {
            reservations.reserved.push(block);
        }
    }

    // Vec::sort_by is stable, equal zones keep their input order.
    reservations
        .primary
        .sort_by(|a, b| subnets[*a].zone.cmp(&subnets[*b].zone));
    reservations
        .secondary
        .sort_by(|a, b| subnets[*a].zone.cmp(&subnets[*b].zone));

    log::debug!(
        "Collected {} reserved CIDRs, {} primary and {} utility subnets",
        reservations.reserved.len(),
        reservations.primary.len(),
        reservations.secondary.len()
    );

    Ok(reservations)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parent() -> Ipv4 {
        Ipv4::new("10.0.0.0/16").unwrap()
    }

    #[test]
    fn test_all_subnets_have_cidrs() {
        let mut subnets = vec![
            SubnetSpec::new("a", "a", "Public").with_cidr("10.0.0.0/17"),
            SubnetSpec::new("b", "b", "Public").with_cidr("10.0.128.0/17"),
        ];
        assert!(all_subnets_have_cidrs(&subnets));
        assert!(all_subnets_have_cidrs(&[]));

        subnets.push(SubnetSpec::new("c", "c", "Private").with_cidr(""));
        assert!(!all_subnets_have_cidrs(&subnets));
    }

    #[test]
    fn test_candidates_sorted_by_zone() {
        let subnets = vec![
            SubnetSpec::new("c", "zone-c", "Private"),
            SubnetSpec::new("util-b", "zone-b", "Utility"),
            SubnetSpec::new("a", "zone-a", "Public"),
            SubnetSpec::new("util-a", "zone-a", "Utility"),
            SubnetSpec::new("b", "zone-b", "DualStack"),
        ];
        let reservations = collect_reservations(parent(), &subnets).unwrap();
        assert_eq!(reservations.primary, vec![2, 4, 0]);
        assert_eq!(reservations.secondary, vec![3, 1]);
        assert!(reservations.reserved.is_empty());
    }

    #[test]
    fn test_equal_zones_keep_input_order() {
        let subnets = vec![
            SubnetSpec::new("second", "b", "Public"),
            SubnetSpec::new("x", "a", "Public"),
            SubnetSpec::new("y", "a", "Private"),
            SubnetSpec::new("z", "a", "Public"),
        ];
        let reservations = collect_reservations(parent(), &subnets).unwrap();
        assert_eq!(reservations.primary, vec![1, 2, 3, 0]);
    }

    #[test]
    fn test_reserved_blocks_are_canonical() {
        let subnets = vec![
            SubnetSpec::new("a", "a", "Public").with_cidr("10.0.1.7/24"),
            SubnetSpec::new("b", "b", "Public"),
        ];
        let reservations = collect_reservations(parent(), &subnets).unwrap();
        assert_eq!(
            reservations.reserved,
            vec![Ipv4::new("10.0.1.0/24").unwrap()]
        );
        assert_eq!(reservations.primary, vec![0, 1]);
    }

    #[test]
    fn test_subnet_outside_parent_is_ignored() {
        let subnets = vec![
            SubnetSpec::new("outside", "a", "Public").with_cidr("192.168.0.0/24"),
            SubnetSpec::new("weird", "a", "NotARole").with_cidr("172.16.0.0/24"),
            SubnetSpec::new("b", "b", "Public"),
        ];
        let reservations = collect_reservations(parent(), &subnets).unwrap();
        assert!(reservations.reserved.is_empty());
        assert_eq!(reservations.primary, vec![2]);
    }

    #[test]
    fn test_invalid_subnet_cidr() {
        let subnets = vec![SubnetSpec::new("a", "a", "Public").with_cidr("10.0.0.0/99")];
        assert_eq!(
            collect_reservations(parent(), &subnets).unwrap_err(),
            AllocError::InvalidSubnetCIDR {
                subnet: "a".to_string(),
                cidr: "10.0.0.0/99".to_string()
            }
        );
    }

    #[test]
    fn test_unknown_role_is_fatal() {
        let subnets = vec![
            SubnetSpec::new("a", "a", "Public"),
            SubnetSpec::new("b", "b", "Isolated"),
        ];
        assert_eq!(
            collect_reservations(parent(), &subnets).unwrap_err(),
            AllocError::UnknownSubnetRole {
                subnet: "b".to_string(),
                kind: "Isolated".to_string()
            }
        );
    }
}

//! Cross-checking subnets that reference an existing cloud subnet by id.

use crate::error::AllocError;
use crate::models::{SubnetSpec, VpcInfo};

/// Check every subnet with an `id` against the matching subnet in `vpc`.
///
/// Missing CIDRs are copied from the cloud subnet; configured CIDRs and zones
/// must match it exactly.
pub fn resolve_external_subnets(
    network_id: &str,
    vpc: &VpcInfo,
    subnets: &mut [SubnetSpec],
) -> Result<(), AllocError> {
    for subnet in subnets.iter_mut() {
        let Some(id) = subnet.external_id() else {
            continue;
        };
        let id = id.to_string();

        let cloud_subnet = vpc
            .find_subnet(&id)
            .ok_or_else(|| AllocError::ExternalSubnetNotFound {
                id: id.clone(),
                network_id: network_id.to_string(),
            })?;
        let cloud_cidr = cloud_subnet.cidr.trim();

        match subnet.cidr() {
            None => {
                if cloud_cidr.is_empty() {
                    return Err(AllocError::MissingExternalCIDR { id });
                }
                log::info!(
                    "Using CIDR {} of existing subnet {} for '{}'",
                    cloud_cidr,
                    id,
                    subnet.name
                );
                subnet.cidr = Some(cloud_cidr.to_string());
            }
            Some(configured) if configured != cloud_cidr => {
                return Err(AllocError::CIDRMismatch {
                    id,
                    configured: configured.to_string(),
                    actual: cloud_cidr.to_string(),
                });
            }
            Some(_) => {}
        }

        if subnet.zone != cloud_subnet.zone {
            return Err(AllocError::ZoneMismatch {
                id,
                configured: subnet.zone.clone(),
                actual: cloud_subnet.zone.clone(),
            });
        }
    }

    Ok(())
}

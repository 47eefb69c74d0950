//! Looking up an existing cloud network by id.

use crate::models::VpcInfo;
use std::error::Error;

/// Source of existing network and subnet records.
///
/// `Ok(None)` means the provider answered but has no network with that id.
pub trait VpcLookup {
    fn find_vpc_info(&self, network_id: &str) -> Result<Option<VpcInfo>, Box<dyn Error>>;
}

/// Lookup over a fixed set of networks, matched by id (case-insensitive).
#[derive(Debug, Default, Clone)]
pub struct StaticLookup {
    vpcs: Vec<VpcInfo>,
}

impl StaticLookup {
    pub fn new(vpcs: Vec<VpcInfo>) -> StaticLookup {
        StaticLookup { vpcs }
    }
}

impl VpcLookup for StaticLookup {
    fn find_vpc_info(&self, network_id: &str) -> Result<Option<VpcInfo>, Box<dyn Error>> {
        Ok(self
            .vpcs
            .iter()
            .find(|v| v.id.eq_ignore_ascii_case(network_id))
            .cloned())
    }
}

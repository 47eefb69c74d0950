//! Records describing an existing cloud network, as returned by a lookup.

use super::Ipv4;
use serde::{Deserialize, Serialize};

/// An existing virtual network and its subnets.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct VpcInfo {
    /// Network identifier (e.g. an Azure VNet resource id).
    pub id: String,
    /// Address space of the network, when known.
    #[serde(default)]
    pub cidr: Option<Ipv4>,
    #[serde(default)]
    pub subnets: Vec<VpcSubnet>,
}

/// A subnet that already exists in the cloud network.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct VpcSubnet {
    pub id: String,
    #[serde(default)]
    pub zone: String,
    /// CIDR as reported by the provider; may be empty.
    #[serde(default)]
    pub cidr: String,
}

impl VpcInfo {
    pub fn find_subnet(&self, id: &str) -> Option<&VpcSubnet> {
        self.subnets.iter().find(|s| s.id == id)
    }
}

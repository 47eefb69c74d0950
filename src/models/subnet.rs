//! Cluster subnet declaration model.

use crate::error::AllocError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Role of a subnet in the cluster network topology.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SubnetRole {
    DualStack,
    Public,
    Private,
    Utility,
}

impl SubnetRole {
    /// Parse a declared subnet type, ignoring case. `dual-stack` is accepted
    /// for `DualStack`.
    pub fn parse(kind: &str) -> Option<SubnetRole> {
        match kind.to_ascii_lowercase().as_str() {
            "dualstack" | "dual-stack" => Some(SubnetRole::DualStack),
            "public" => Some(SubnetRole::Public),
            "private" => Some(SubnetRole::Private),
            "utility" => Some(SubnetRole::Utility),
            _ => None,
        }
    }

    /// Primary subnets get a full-size block; utility subnets share one.
    pub fn is_primary(&self) -> bool {
        !matches!(self, SubnetRole::Utility)
    }
}

impl fmt::Display for SubnetRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SubnetRole::DualStack => "DualStack",
            SubnetRole::Public => "Public",
            SubnetRole::Private => "Private",
            SubnetRole::Utility => "Utility",
        };
        f.write_str(name)
    }
}

/// A subnet declared in the cluster networking spec.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SubnetSpec {
    /// Unique name within the cluster.
    pub name: String,
    /// Placement zone, only used for ordering.
    #[serde(default)]
    pub zone: String,
    /// Declared role (`DualStack`, `Public`, `Private` or `Utility`).
    #[serde(rename = "type", default)]
    pub kind: String,
    /// IPv4 CIDR; empty until assigned.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cidr: Option<String>,
    #[serde(rename = "ipv6CIDR", default, skip_serializing_if = "Option::is_none")]
    pub ipv6_cidr: Option<String>,
    /// Identifier of an existing subnet in the cloud network.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub egress: Option<String>,
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

impl SubnetSpec {
    pub fn new(name: &str, zone: &str, kind: &str) -> SubnetSpec {
        SubnetSpec {
            name: name.to_string(),
            zone: zone.to_string(),
            kind: kind.to_string(),
            ..Default::default()
        }
    }

    /// Builder-style helper setting the IPv4 CIDR.
    pub fn with_cidr(mut self, cidr: &str) -> SubnetSpec {
        self.cidr = Some(cidr.to_string());
        self
    }

    pub fn with_ipv6_cidr(mut self, cidr: &str) -> SubnetSpec {
        self.ipv6_cidr = Some(cidr.to_string());
        self
    }

    pub fn with_id(mut self, id: &str) -> SubnetSpec {
        self.id = Some(id.to_string());
        self
    }

    pub fn role(&self) -> Result<SubnetRole, AllocError> {
        SubnetRole::parse(&self.kind).ok_or_else(|| AllocError::UnknownSubnetRole {
            subnet: self.name.clone(),
            kind: self.kind.clone(),
        })
    }

    /// The declared IPv4 CIDR, if it is set to something non-empty.
    pub fn cidr(&self) -> Option<&str> {
        non_empty(&self.cidr)
    }

    pub fn ipv6_cidr(&self) -> Option<&str> {
        non_empty(&self.ipv6_cidr)
    }

    pub fn external_id(&self) -> Option<&str> {
        non_empty(&self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_parse() {
        assert_eq!(SubnetRole::parse("DualStack"), Some(SubnetRole::DualStack));
        assert_eq!(SubnetRole::parse("dual-stack"), Some(SubnetRole::DualStack));
        assert_eq!(SubnetRole::parse("Public"), Some(SubnetRole::Public));
        assert_eq!(SubnetRole::parse("private"), Some(SubnetRole::Private));
        assert_eq!(SubnetRole::parse("UTILITY"), Some(SubnetRole::Utility));
        assert_eq!(SubnetRole::parse("Isolated"), None);
        assert_eq!(SubnetRole::parse("pu-b_lic"), None);
        assert_eq!(SubnetRole::parse("dual_stack"), None);
        assert_eq!(SubnetRole::parse("Private-"), None);
        assert_eq!(SubnetRole::parse(""), None);
    }

    #[test]
    fn test_role_is_primary() {
        assert!(SubnetRole::DualStack.is_primary());
        assert!(SubnetRole::Public.is_primary());
        assert!(SubnetRole::Private.is_primary());
        assert!(!SubnetRole::Utility.is_primary());
    }

    #[test]
    fn test_unknown_role_names_subnet() {
        let subnet = SubnetSpec::new("edge-a", "a", "Edge");
        assert_eq!(
            subnet.role().unwrap_err(),
            AllocError::UnknownSubnetRole {
                subnet: "edge-a".to_string(),
                kind: "Edge".to_string()
            }
        );
    }

    #[test]
    fn test_empty_strings_are_unset() {
        let subnet = SubnetSpec::new("s", "a", "Public")
            .with_cidr("  ")
            .with_ipv6_cidr("")
            .with_id("");
        assert_eq!(subnet.cidr(), None);
        assert_eq!(subnet.ipv6_cidr(), None);
        assert_eq!(subnet.external_id(), None);
    }

    #[test]
    fn test_deserialize_cluster_style_keys() {
        let json = r#"{
            "name": "us-east-1a",
            "zone": "us-east-1a",
            "type": "Private",
            "ipv6CIDR": "/64#1",
            "id": "subnet-123"
        }"#;
        let subnet: SubnetSpec = serde_json::from_str(json).unwrap();
        assert_eq!(subnet.kind, "Private");
        assert_eq!(subnet.cidr(), None);
        assert_eq!(subnet.ipv6_cidr(), Some("/64#1"));
        assert_eq!(subnet.external_id(), Some("subnet-123"));

        let back = serde_json::to_value(&subnet).unwrap();
        assert_eq!(back["type"], "Private");
        assert!(back.get("cidr").is_none());
    }
}

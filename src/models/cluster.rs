//! Cluster document model.
//!
//! Only the networking fields this tool reads or writes are typed; everything
//! else in the document is carried through untouched.

use super::SubnetSpec;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A cluster document as read from a JSON file.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Cluster {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default)]
    pub metadata: ObjectMeta,
    pub spec: ClusterSpec,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct ObjectMeta {
    #[serde(default)]
    pub name: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct ClusterSpec {
    pub networking: NetworkingSpec,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Networking section of a cluster spec.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct NetworkingSpec {
    /// Parent block that unassigned subnets are carved from.
    #[serde(rename = "networkCIDR", default)]
    pub network_cidr: String,
    /// Identifier of an existing cloud network, if the cluster reuses one.
    #[serde(rename = "networkID", default, skip_serializing_if = "Option::is_none")]
    pub network_id: Option<String>,
    #[serde(default)]
    pub subnets: Vec<SubnetSpec>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl NetworkingSpec {
    pub fn new(network_cidr: &str, subnets: Vec<SubnetSpec>) -> NetworkingSpec {
        NetworkingSpec {
            network_cidr: network_cidr.to_string(),
            subnets,
            ..Default::default()
        }
    }

    /// The network id, if set to something non-empty.
    pub fn network_id(&self) -> Option<&str> {
        self.network_id
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())
    }
}

impl Cluster {
    pub fn name(&self) -> &str {
        &self.metadata.name
    }

    /// Return a copy of the cluster with its subnet list replaced.
    pub fn with_subnets(&self, subnets: Vec<SubnetSpec>) -> Cluster {
        let mut cluster = self.clone();
        cluster.spec.networking.subnets = subnets;
        cluster
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CLUSTER_JSON: &str = r#"{
        "kind": "Cluster",
        "metadata": { "name": "dev.example.com", "creationTimestamp": null },
        "spec": {
            "kubernetesVersion": "1.29.0",
            "networking": {
                "networkCIDR": "10.0.0.0/16",
                "networkID": "vpc-1",
                "nonMasqueradeCIDR": "100.64.0.0/10",
                "subnets": [
                    { "name": "a", "zone": "a", "type": "Public" }
                ]
            }
        }
    }"#;

    #[test]
    fn test_cluster_keeps_unknown_fields() {
        let cluster: Cluster = serde_json::from_str(CLUSTER_JSON).unwrap();
        assert_eq!(cluster.name(), "dev.example.com");
        assert_eq!(cluster.spec.networking.network_id(), Some("vpc-1"));
        assert_eq!(cluster.spec.networking.subnets.len(), 1);

        let value = serde_json::to_value(&cluster).unwrap();
        assert_eq!(value["spec"]["kubernetesVersion"], "1.29.0");
        assert_eq!(
            value["spec"]["networking"]["nonMasqueradeCIDR"],
            "100.64.0.0/10"
        );
        assert!(value["metadata"]
            .as_object()
            .unwrap()
            .contains_key("creationTimestamp"));
    }

    #[test]
    fn test_with_subnets_leaves_original() {
        let cluster: Cluster = serde_json::from_str(CLUSTER_JSON).unwrap();
        let updated = cluster.with_subnets(vec![
            SubnetSpec::new("a", "a", "Public").with_cidr("10.0.0.0/17")
        ]);
        assert_eq!(cluster.spec.networking.subnets[0].cidr(), None);
        assert_eq!(
            updated.spec.networking.subnets[0].cidr(),
            Some("10.0.0.0/17")
        );
    }

    #[test]
    fn test_blank_network_id_is_unset() {
        let mut networking = NetworkingSpec::new("10.0.0.0/16", vec![]);
        networking.network_id = Some(" ".to_string());
        assert_eq!(networking.network_id(), None);
    }
}

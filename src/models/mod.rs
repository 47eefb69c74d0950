//! Domain models for subnet CIDR assignment.
//!
//! This module contains the core data structures used throughout the application:
//! - [`Ipv4`] - IPv4 address block with CIDR notation support
//! - [`SubnetSpec`] and [`SubnetRole`] - declared cluster subnets
//! - [`Cluster`] and [`NetworkingSpec`] - the cluster document
//! - [`VpcInfo`] and [`VpcSubnet`] - existing cloud network records

mod cluster;
mod ipv4;
mod subnet;
mod vpc;

// Re-export public types
pub use cluster::{Cluster, ClusterSpec, NetworkingSpec, ObjectMeta};
pub use ipv4::{
    broadcast_addr, cut_addr, get_cidr_mask, ip_after_subnet, next_subnet_ipv4, Ipv4, MAX_LENGTH,
};
pub use subnet::{SubnetRole, SubnetSpec};
pub use vpc::{VpcInfo, VpcSubnet};

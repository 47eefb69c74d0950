//! Subnet CIDR assignment logic.
//!
//! This module contains the business logic for assigning CIDRs:
//! - [`reservations`] - Collecting reserved CIDRs and allocation candidates
//! - [`external`] - Resolving subnets that reference existing cloud subnets
//! - [`partition`] - Splitting the parent network into candidate blocks
//! - [`assign`] - Handing out blocks to subnets
//! - [`allocate`] - The end-to-end assignment run

mod allocate;
pub mod assign;
mod external;
pub mod partition;
mod reservations;

// Re-export public functions
pub use allocate::{assign_cidrs_to_subnets, Allocation};
pub use assign::{Assignment, Pool};
pub use external::resolve_external_subnets;
pub use partition::{partition, slot_count, split_count, Partition, SecondaryPool};
pub use reservations::{all_subnets_have_cidrs, collect_reservations, Reservations};

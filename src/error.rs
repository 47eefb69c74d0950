//! Errors raised while assigning CIDRs to subnets.
//!
//! Every variant is fatal: allocation stops at the first error and no partial
//! result is returned.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AllocError {
    #[error("invalid networkCIDR {0:?}")]
    InvalidParentCIDR(String),

    #[error("subnet {subnet:?} has unknown type {kind:?}")]
    UnknownSubnetRole { subnet: String, kind: String },

    #[error("subnet {subnet:?} has invalid CIDR {cidr:?}")]
    InvalidSubnetCIDR { subnet: String, cidr: String },

    #[error("VPC {0:?} not found")]
    VpcNotFound(String),

    #[error("error looking up VPC {network_id:?}: {reason}")]
    VpcLookup { network_id: String, reason: String },

    #[error("subnet {id:?} not found in VPC {network_id:?}")]
    ExternalSubnetNotFound { id: String, network_id: String },

    #[error("subnet {id:?} did not have CIDR")]
    MissingExternalCIDR { id: String },

    #[error("subnet {id:?} has configured CIDR {configured:?}, but the actual CIDR found was {actual:?}")]
    CIDRMismatch {
        id: String,
        configured: String,
        actual: String,
    },

    #[error("subnet {id:?} has configured zone {configured:?}, but the actual zone found was {actual:?}")]
    ZoneMismatch {
        id: String,
        configured: String,
        actual: String,
    },

    #[error("cannot split {cidr} into {count} subnets")]
    SplitTooSmall { cidr: String, count: usize },

    #[error("could not find any non-overlapping CIDRs in parent networkCIDR {0}; cannot automatically assign CIDR to subnet")]
    NoCIDRsAvailable(String),

    #[error("insufficient ({pool}) CIDRs remaining for automatic CIDR allocation to subnet {subnet:?}")]
    InsufficientCIDRs { subnet: String, pool: String },
}

//! IPv4 address blocks in CIDR notation.
//!
//! Provides [`Ipv4`] for representing an address block (base address + prefix
//! length), along with the bit arithmetic used to split and compare blocks.

use serde::de;
use serde::{Deserialize, Deserializer, Serialize};
use std::error::Error;
use std::net::Ipv4Addr;

/// Maximum length for an IPv4 subnet mask (32 bits).
pub const MAX_LENGTH: u8 = 32;

/// Convert a CIDR prefix length to a subnet mask as u32.
///
/// # Examples
/// ```
/// use subnet_cidr_assign::models::get_cidr_mask;
/// assert_eq!(get_cidr_mask(24).unwrap(), 0xFFFFFF00);
/// ```
pub fn get_cidr_mask(len: u8) -> Result<u32, Box<dyn Error>> {
    if len > MAX_LENGTH {
        Err("Network length is too long".into())
    } else {
        let right_len = MAX_LENGTH - len;
        let all_bits = u32::MAX as u64;

        let mask = (all_bits >> right_len) << right_len;

        Ok(mask as u32)
    }
}

/// Get the network address for a given IP and prefix length.
pub fn cut_addr(addr: Ipv4Addr, len: u8) -> Result<Ipv4Addr, Box<dyn Error>> {
    if len > MAX_LENGTH {
        Err("Network length is too long".into())
    } else {
        let right_len = MAX_LENGTH - len;
        let bits = u32::from(addr) as u64;
        let new_bits = (bits >> right_len) << right_len;

        Ok(Ipv4Addr::from(new_bits as u32))
    }
}

/// Returns the IP address following the given subnet.
pub fn ip_after_subnet(addr: Ipv4Addr, cidr: u8) -> Result<Ipv4Addr, Box<dyn Error>> {
    if cidr > MAX_LENGTH {
        Err("Network length is too long".into())
    } else {
        let subnet_size = 1u64 << (MAX_LENGTH - cidr);
        let network_bits = (u32::from(addr) & get_cidr_mask(cidr)?) as u64;
        let next_subnet_bits = network_bits + subnet_size;
        if next_subnet_bits > u32::MAX as u64 {
            return Err("Next subnet calculation overflowed".into());
        }
        Ok(Ipv4Addr::from(next_subnet_bits as u32))
    }
}

/// Calculate the next subnet of the same size after the given [`Ipv4`] block.
pub fn next_subnet_ipv4(ipv4: Ipv4) -> Result<Ipv4, Box<dyn Error>> {
    let next_subnet = ip_after_subnet(ipv4.addr, ipv4.mask)?;
    Ok(Ipv4 {
        addr: next_subnet,
        mask: ipv4.mask,
    })
}

/// Calculate the broadcast address for a given IP and prefix length.
pub fn broadcast_addr(addr: Ipv4Addr, len: u8) -> Result<Ipv4Addr, Box<dyn Error>> {
    if len > MAX_LENGTH {
        Err("Network length is too long".into())
    } else {
        let mask = get_cidr_mask(len)?;
        let addr_bits = u32::from(addr);
        let network_bits = addr_bits & mask;
        let broadcast_bits = network_bits | (!mask);
        Ok(Ipv4Addr::from(broadcast_bits))
    }
}

/// IPv4 address block with CIDR notation support.
#[derive(Eq, PartialEq, Ord, PartialOrd, Debug, Copy, Clone, Hash)]
pub struct Ipv4 {
    /// The IPv4 address.
    pub addr: Ipv4Addr,
    /// The subnet mask length (0-32).
    pub mask: u8,
}

impl Serialize for Ipv4 {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::ser::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Ipv4 {
    fn deserialize<D>(deserializer: D) -> Result<Ipv4, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ipv4::new(&s).map_err(|e| de::Error::custom(format!("invalid CIDR {s:?}: {e}")))
    }
}

impl Ipv4 {
    /// Create a new [`Ipv4`] from a CIDR string (e.g., "10.0.0.0/24").
    ///
    /// Host bits are kept as written; use [`Ipv4::network`] for the canonical block.
    pub fn new(addr_cidr: &str) -> Result<Ipv4, Box<dyn Error>> {
        let addr_cidr = addr_cidr.trim();
        let (addr, mask) = addr_cidr
            .split_once('/')
            .ok_or_else(|| format!("Invalid address/mask {addr_cidr:?}"))?;
        let addr: Ipv4Addr = addr
            .parse()
            .map_err(|_| format!("Invalid address {addr:?}"))?;
        if mask.is_empty() || !mask.bytes().all(|b| b.is_ascii_digit()) {
            return Err(format!("Invalid subnet mask {mask:?}").into());
        }
        let mask: u8 = mask
            .parse()
            .map_err(|_| format!("Invalid subnet mask {mask:?}"))?;
        if mask > MAX_LENGTH {
            return Err("Network length is too long".into());
        }
        Ok(Ipv4 { addr, mask })
    }

    /// The canonical block, with all host bits cleared.
    pub fn network(&self) -> Ipv4 {
        Ipv4 {
            addr: self.lo(),
            mask: self.mask,
        }
    }

    /// Get the highest (broadcast) address in the subnet.
    pub fn hi(&self) -> Ipv4Addr {
        broadcast_addr(self.addr, self.mask)
            .unwrap_or_else(|e| panic!("Error calculating broadcast address: {}", e))
    }

    /// Get the lowest (network) address in the subnet.
    pub fn lo(&self) -> Ipv4Addr {
        cut_addr(self.addr, self.mask)
            .unwrap_or_else(|e| panic!("Error calculating minimum address for {}: {}", self, e))
    }

    /// Check if an IP address is contained within this subnet.
    pub fn contains(&self, ip: Ipv4Addr) -> bool {
        ip >= self.lo() && ip <= self.hi()
    }

    /// Check if `other` lies completely inside this subnet.
    pub fn contains_block(&self, other: &Ipv4) -> bool {
        self.contains(other.lo()) && self.contains(other.hi())
    }

    /// True when the two blocks share at least one address.
    ///
    /// CIDR blocks either nest or are disjoint, so it is enough to check
    /// whether either network address falls inside the other block.
    pub fn overlaps(&self, other: &Ipv4) -> bool {
        self.contains(other.lo()) || other.contains(self.lo())
    }

    /// Split the block into `count` equal sibling blocks in ascending order.
    ///
    /// `count` must be a power of two and the resulting prefix must fit in /32.
    pub fn split_into(&self, count: usize) -> Result<Vec<Ipv4>, Box<dyn Error>> {
        if !count.is_power_of_two() {
            return Err(format!("Cannot split {self} into {count} subnets, not a power of two").into());
        }
        let new_mask = self.mask as u32 + count.trailing_zeros();
        if new_mask > MAX_LENGTH as u32 {
            return Err(format!("Cannot split {self} into {count} subnets, prefix /{new_mask} is too long").into());
        }

        let mut subnet = Ipv4 {
            addr: self.lo(),
            mask: new_mask as u8,
        };
        let mut subnets = Vec::with_capacity(count);
        subnets.push(subnet);
        for _ in 1..count {
            subnet = next_subnet_ipv4(subnet)?;
            subnets.push(subnet);
        }
        Ok(subnets)
    }
}

impl std::fmt::Display for Ipv4 {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}/{}", self.addr, self.mask)
    }
}

//! Splitting the parent network into candidate blocks.
//!
//! The parent is split into 1, 2, 4 or 8 equal blocks. Blocks overlapping a
//! reservation are dropped; when utility subnets exist the first surviving
//! block is split again into 8 smaller blocks for them.

use crate::config;
use crate::error::AllocError;
use crate::models::Ipv4;

/// The utility pool: one primary-sized block and its subdivisions.
#[derive(Debug, Clone, PartialEq)]
pub struct SecondaryPool {
    pub parent: Ipv4,
    pub blocks: Vec<Ipv4>,
}

/// Candidate blocks for automatic assignment, in assignment order.
#[derive(Debug, Clone, PartialEq)]
pub struct Partition {
    pub primary: Vec<Ipv4>,
    pub secondary: Option<SecondaryPool>,
}

/// Number of primary-sized blocks needed: one per primary subnet, plus one
/// shared by all utility subnets.
pub fn slot_count(primary: usize, has_secondary: bool) -> usize {
    primary + usize::from(has_secondary)
}

/// Smallest supported split count that covers `slots`, capped at 8.
pub fn split_count(slots: usize) -> usize {
    slots.max(1).next_power_of_two().min(config::MAX_SPLIT)
}

fn split(block: Ipv4, count: usize) -> Result<Vec<Ipv4>, AllocError> {
    block.split_into(count).map_err(|e| {
        log::debug!("split of {block} failed: {e}");
        AllocError::SplitTooSmall {
            cidr: block.to_string(),
            count,
        }
    })
}

/// Drop every block that overlaps a reservation, keeping the order of the rest.
pub fn remove_overlapping(blocks: Vec<Ipv4>, reserved: &[Ipv4]) -> Vec<Ipv4> {
    blocks
        .into_iter()
        .filter(|block| {
            let overlapped = reserved.iter().any(|r| r.overlaps(block));
            if overlapped {
                log::debug!("Removing candidate {block}, overlaps a reserved CIDR");
            }
            !overlapped
        })
        .collect()
}

/// Build the primary and utility pools for `parent`.
pub fn partition(
    parent: Ipv4,
    slots: usize,
    has_secondary: bool,
    reserved: &[Ipv4],
) -> Result<Partition, AllocError> {
    let parent = parent.network();
    let count = split_count(slots);
    log::debug!("Splitting {parent} into {count} blocks for {slots} slots");

    let mut primary = remove_overlapping(split(parent, count)?, reserved);
    if primary.is_empty() {
        return Err(AllocError::NoCIDRsAvailable(parent.to_string()));
    }

    let secondary = if has_secondary {
        let block = primary.remove(0);
        Some(SecondaryPool {
            parent: block,
            blocks: split(block, config::SECONDARY_SPLIT)?,
        })
    } else {
        None
    };

    Ok(Partition { primary, secondary })
}

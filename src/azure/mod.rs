//! Existing cloud network lookups.
//!
//! This module handles everything that talks to the network provider:
//! - [`lookup`] - The [`VpcLookup`] trait and an in-memory implementation
//! - [`cli`] - Command execution for Azure CLI
//! - [`graph`] - Azure Resource Graph queries
//! - [`cache`] - Caching of looked-up networks

mod cache;
mod cli;
mod graph;
mod lookup;

// Re-export public types and functions
pub use cache::{default_cache_file, read_vpc_cache, write_vpc_cache, CacheLookup};
pub use cli::run;
pub use graph::{rows_to_vpc_info, run_az_cli_graph, AzGraphLookup, Data, GraphRow};
pub use lookup::{StaticLookup, VpcLookup};

//! Cache management for VNet lookups.
//!
//! Avoids repeated Azure Graph API calls by keeping looked-up networks in a
//! dated JSON file.

use super::graph::AzGraphLookup;
use super::lookup::{StaticLookup, VpcLookup};
use crate::config;
use crate::models::VpcInfo;
use std::error::Error;
use std::io;
use std::path::Path;

/// Default cache file name for today, e.g. `vpc_cache_2026-10-18.json`.
pub fn default_cache_file() -> String {
    let now = chrono::Utc::now().with_timezone(&chrono_tz::Pacific::Auckland);
    format!("{}_{}.json", config::CACHE_FILE_PREFIX, now.format("%Y-%m-%d"))
}

/// Read cached networks from `cache_file`. A missing file is an empty cache.
pub fn read_vpc_cache(cache_file: &str) -> Result<Vec<VpcInfo>, Box<dyn Error>> {
    match std::fs::read_to_string(cache_file) {
        Ok(json) => {
            log::info!("Reading from cache file: {cache_file}");
            let mut deserializer = serde_json::Deserializer::from_str(&json);
            let vpcs = serde_path_to_error::deserialize(&mut deserializer).map_err(|e| {
                format!(
                    "Error parsing cache JSON {cache_file}: path={} error={e}",
                    e.path()
                )
            })?;
            Ok(vpcs)
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            log::warn!("Cache file not found: {cache_file}");
            Ok(Vec::new())
        }
        Err(e) => Err(format!("Error reading cache file {cache_file}: {e}").into()),
    }
}

pub fn write_vpc_cache(cache_file: &str, vpcs: &[VpcInfo]) -> Result<(), Box<dyn Error>> {
    let json =
        serde_json::to_string_pretty(vpcs).map_err(|e| format!("Error serializing JSON: {e}"))?;
    log::warn!("Writing data to cache file: {cache_file}");
    std::fs::write(cache_file, json)
        .map_err(|e| format!("Error writing cache file {cache_file}: {e}"))?;
    Ok(())
}

/// [`VpcLookup`] reading networks from a cache file.
///
/// An explicitly named file is a fixed snapshot and must exist. The default
/// dated cache is filled on demand: networks it does not hold yet are fetched
/// from `source` and appended to it.
pub struct CacheLookup {
    cache_file: String,
    refresh: bool,
    source: Box<dyn VpcLookup>,
}

impl CacheLookup {
    pub fn new(cache_file: Option<String>) -> CacheLookup {
        match cache_file {
            Some(file) => {
                log::info!("Using provided cache file: {file}");
                CacheLookup {
                    cache_file: file,
                    refresh: false,
                    source: Box::new(AzGraphLookup),
                }
            }
            None => CacheLookup::with_source(&default_cache_file(), Box::new(AzGraphLookup)),
        }
    }

    /// Cache in `cache_file` that fetches missing networks from `source`.
    pub fn with_source(cache_file: &str, source: Box<dyn VpcLookup>) -> CacheLookup {
        CacheLookup {
            cache_file: cache_file.to_string(),
            refresh: true,
            source,
        }
    }
}

impl VpcLookup for CacheLookup {
    fn find_vpc_info(&self, network_id: &str) -> Result<Option<VpcInfo>, Box<dyn Error>> {
        if !self.refresh && !Path::new(&self.cache_file).exists() {
            return Err(format!("Cache file does not exist: {}", self.cache_file).into());
        }

        let mut vpcs = read_vpc_cache(&self.cache_file)?;
        let cached = StaticLookup::new(vpcs.clone()).find_vpc_info(network_id)?;
        if cached.is_some() || !self.refresh {
            return Ok(cached);
        }

        log::info!("Network {network_id} not in cache {}, fetching", self.cache_file);
        let fetched = self.source.find_vpc_info(network_id)?;
        if let Some(vpc) = &fetched {
            vpcs.push(vpc.clone());
            write_vpc_cache(&self.cache_file, &vpcs)?;
        }
        Ok(fetched)
    }
}

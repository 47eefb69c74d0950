//! Azure Resource Graph query execution.
//!
//! Looks up an existing VNet and its subnets through the Azure CLI.

use super::cli;
use super::lookup::VpcLookup;
use crate::config;
use crate::models::{Ipv4, VpcInfo, VpcSubnet};
use serde::{Deserialize, Serialize};
use std::error::Error;

/// Azure Graph query listing the subnets of one VNet, `{network_id}` is substituted.
const VNET_SUBNET_QUERY: &str = r#"resources
        | where type == "microsoft.network/virtualnetworks" and id =~ "{network_id}"
        | mv-expand properties.subnets
        | project vnet_id=id
                ,vnet_cidr=properties.addressSpace.addressPrefixes
                ,location=location
                ,subnet_id=properties_subnets.id
                ,subnet_cidr=properties_subnets.properties.addressPrefix
        | sort by tostring(subnet_id) asc"#;

/// One VNet/subnet pair returned by the graph query.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct GraphRow {
    pub vnet_id: String,
    #[serde(default)]
    pub vnet_cidr: Option<Vec<String>>,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub subnet_id: Option<String>,
    #[serde(default)]
    pub subnet_cidr: Option<String>,
}

/// Response data from Azure Graph query.
#[derive(Serialize, Deserialize, Debug, Default)]
pub struct Data {
    /// Rows returned.
    pub data: Vec<GraphRow>,
    /// Token for pagination (if more results available).
    pub skip_token: Option<String>,
    /// Total number of records matching the query.
    pub total_records: Option<u32>,
    /// Count of records in this response.
    pub count: i32,
}

/// Fold graph rows into a [`VpcInfo`]; `None` when the VNet was not returned.
///
/// Azure subnets are regional, so the VNet location stands in for the zone.
pub fn rows_to_vpc_info(rows: &[GraphRow]) -> Option<VpcInfo> {
    let first = rows.first()?;
    let cidr = first
        .vnet_cidr
        .as_ref()
        .and_then(|prefixes| prefixes.first())
        .and_then(|prefix| Ipv4::new(prefix).ok());

    let subnets = rows
        .iter()
        .filter_map(|row| {
            row.subnet_id.as_ref().map(|id| VpcSubnet {
                id: id.clone(),
                zone: row.location.clone(),
                cidr: row.subnet_cidr.clone().unwrap_or_default(),
            })
        })
        .collect();

    Some(VpcInfo {
        id: first.vnet_id.clone(),
        cidr,
        subnets,
    })
}

/// Execute the Azure Resource Graph query for one VNet.
///
/// Handles pagination automatically using skip tokens.
pub fn run_az_cli_graph(network_id: &str) -> Result<Data, Box<dyn Error>> {
    if network_id.contains('"') || network_id.contains('\'') {
        return Err(format!("Refusing to query network id with quotes: {network_id}").into());
    }
    let query = VNET_SUBNET_QUERY.replace("{network_id}", network_id);

    let mut data: Data = Default::default();
    let mut skip_token_param: String = String::new();
    let mut count_blocks_returned = 0;

    while skip_token_param != "--skip-token null" {
        let cmd = format!(
            "az graph query --first {page} {skip_token_param} -q '{query}' --output json",
            page = config::AZ_PAGE_SIZE
        );
        let output = cli::run(&cmd)?;

        let mut json_block_deserializer = serde_json::Deserializer::from_str(&output);
        let json_parsed: Data = serde_path_to_error::deserialize(&mut json_block_deserializer)
            .map_err(|e| {
                log::error!("OUTPUT START:\n\n{}\n\nOUTPUT END\n", output);
                format!(
                    "Error parsing JSON block {}: path={} error={}",
                    count_blocks_returned,
                    e.path(),
                    e
                )
            })?;

        let skip_token_new = format!(
            "--skip-token {}",
            json_parsed.skip_token.as_deref().unwrap_or("null")
        );
        if skip_token_new == skip_token_param {
            return Err("Skip token not unique - possible infinite loop".into());
        }
        skip_token_param = skip_token_new;

        data.count += json_parsed.count;
        data.data.extend(json_parsed.data);
        if let Some(block_records) = json_parsed.total_records {
            data.total_records = Some(block_records);
        }

        log::info!(
            "got block#{count_blocks_returned:2} record_count=+{count:3} => {total:3} {skip_token_param}",
            count = json_parsed.count,
            total = data.count,
        );

        // Rate limiting pause
        std::thread::sleep(std::time::Duration::from_millis(config::SLEEP_MSEC));
        count_blocks_returned += 1;
    }

    Ok(data)
}

/// [`VpcLookup`] backed by a live `az graph query`.
#[derive(Debug, Default, Clone, Copy)]
pub struct AzGraphLookup;

impl VpcLookup for AzGraphLookup {
    fn find_vpc_info(&self, network_id: &str) -> Result<Option<VpcInfo>, Box<dyn Error>> {
        let data = run_az_cli_graph(network_id)?;
        log::info!(
            "Got {} subnet rows for VNet {} from az graph query",
            data.data.len(),
            network_id
        );
        Ok(rows_to_vpc_info(&data.data))
    }
}

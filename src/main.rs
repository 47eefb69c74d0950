use clap::Parser;
use log::LevelFilter;
use log4rs::append::console::{ConsoleAppender, Target};
use log4rs::config::{Appender, Config, Root};
use log4rs::encode::pattern::PatternEncoder;
use std::error::Error;
use std::path::Path;
use subnet_cidr_assign::azure::{AzGraphLookup, CacheLookup, VpcLookup};
use subnet_cidr_assign::config::Settings;
use subnet_cidr_assign::output::print_allocation;
use subnet_cidr_assign::{assign_cluster, check_for_overlapping_subnets, read_clusters};

/// Assign CIDRs to cluster subnets that were declared without one.
#[derive(Parser, Debug)]
#[command(name = "subnet-cidr-assign", version)]
struct Args {
    /// Cluster document(s) to process, `-` reads stdin.
    #[arg(short = 'f', long = "filename", required = true, value_delimiter = ',')]
    filenames: Vec<String>,

    /// VNet cache file used for subnets that reference an existing network.
    #[arg(long)]
    vpc_cache: Option<String>,

    /// Query Azure directly instead of reading a cache file.
    #[arg(long, conflicts_with = "vpc_cache")]
    az: bool,

    /// Write the updated document(s) to this file instead of stdout.
    #[arg(short, long)]
    output: Option<String>,

    /// Skip the summary table.
    #[arg(short, long)]
    quiet: bool,
}

fn init_logging(config_file: &str) -> Result<(), Box<dyn Error>> {
    if Path::new(config_file).exists() {
        log4rs::init_file(config_file, Default::default())?;
        return Ok(());
    }

    // stdout carries the documents, log to stderr.
    let stderr = ConsoleAppender::builder()
        .target(Target::Stderr)
        .encoder(Box::new(PatternEncoder::new("{d(%H:%M:%S)} {h({l})} {m}{n}")))
        .build();
    let config = Config::builder()
        .appender(Appender::builder().build("stderr", Box::new(stderr)))
        .build(Root::builder().appender("stderr").build(LevelFilter::Info))?;
    log4rs::init_config(config)?;
    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    // Do as little as possible in main.rs as it can't contain any tests
    dotenv::dotenv().ok();
    let settings = Settings::from_env();
    init_logging(&settings.log_config)?;
    let args = Args::parse();
    log::info!("#Start main() files={:?}", args.filenames);

    let lookup: Box<dyn VpcLookup> = if args.az {
        Box::new(AzGraphLookup)
    } else {
        Box::new(CacheLookup::new(args.vpc_cache.or(settings.vpc_cache)))
    };

    let mut updated = Vec::new();
    for file in &args.filenames {
        for cluster in read_clusters(file)? {
            let (cluster, allocation) = assign_cluster(&cluster, Some(lookup.as_ref()))
                .map_err(|e| format!("error populating configuration for {:?}: {e}", cluster.name()))?;
            check_for_overlapping_subnets(
                &cluster.spec.networking.network_cidr,
                &cluster.spec.networking.subnets,
            )?;
            if !args.quiet {
                print_allocation(cluster.name(), &allocation)?;
            }
            updated.push(cluster);
        }
    }

    let json = match updated.as_slice() {
        [single] => serde_json::to_string_pretty(single)?,
        all => serde_json::to_string_pretty(all)?,
    };
    match &args.output {
        Some(file) => {
            std::fs::write(file, json + "\n").map_err(|e| format!("error writing {file:?}: {e}"))?;
            log::info!("Wrote {} cluster(s) to {file}", updated.len());
        }
        None => println!("{json}"),
    }

    Ok(())
}

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::error::Error;
use std::process::ExitCode;
use subnet_calc::output::{render, OutputFormat};
use subnet_calc::{init_logging, Calculator, Config};

/// IPv4 subnet and supernet calculator.
#[derive(Parser, Debug)]
#[command(name = "subnet-calc", version, about)]
struct Cli {
    /// Output format
    #[arg(long, value_enum, default_value_t = Format::Text, global = true)]
    format: Format,

    /// Maximum number of subnets to list (overrides SUBNET_CALC_MAX_LISTED)
    #[arg(long, global = true)]
    max_listed: Option<usize>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Describe the network an address belongs to
    Network {
        /// Address, optionally in CIDR form (a.b.c.d/p)
        address: String,
        /// Prefix length, netmask or wildcard
        mask: Option<String>,
    },
    /// Split a network into subnets holding a number of hosts each
    Hosts {
        address: String,
        mask: Option<String>,
        /// Usable hosts needed per subnet
        #[arg(long = "hosts", allow_negative_numbers = true)]
        hosts: i64,
    },
    /// Split a network into at least a number of subnets
    Subnets {
        address: String,
        mask: Option<String>,
        /// Subnets needed
        #[arg(long, allow_negative_numbers = true)]
        count: i64,
    },
    /// Summarise networks, or a start and end address, into minimal CIDR blocks
    Supernet {
        #[arg(required = true)]
        networks: Vec<String>,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Format {
    Text,
    Json,
    Csv,
}

impl From<Format> for OutputFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Text => OutputFormat::Text,
            Format::Json => OutputFormat::Json,
            Format::Csv => OutputFormat::Csv,
        }
    }
}

fn main() -> ExitCode {
    // Do as little as possible in main.rs as it can't contain any tests
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {e}", "error:".red().bold());
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    let mut config = Config::from_env()?;
    if let Some(max_listed) = cli.max_listed {
        config.max_listed = max_listed;
    }
    init_logging(&config)?;
    log::info!("#Start main() {:?}", cli.command);

    let calc = Calculator::from_config(&config);
    let format = OutputFormat::from(cli.format);
    let out = match cli.command {
        Command::Network { address, mask } => {
            render(&calc.compute_network(&address, mask.as_deref())?, format)?
        }
        Command::Hosts {
            address,
            mask,
            hosts,
        } => render(
            &calc.compute_subnets_by_hosts(&address, mask.as_deref(), hosts)?,
            format,
        )?,
        Command::Subnets {
            address,
            mask,
            count,
        } => render(
            &calc.compute_subnets_by_count(&address, mask.as_deref(), count)?,
            format,
        )?,
        Command::Supernet { networks } => {
            render(&calc.compute_supernet(networks.as_slice())?, format)?
        }
    };
    print!("{out}");
    Ok(())
}

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tokio::sync::mpsc;

use chainscout::fees::{self, AssetKind};
use chainscout::rest::{AddressEvent, TxInfoEvent};
use chainscout::{Blockchain, ChainError, NodePool, PoolConfig, RestClient, Session};

#[derive(Parser)]
#[command(name = "chainscout-cli")]
#[command(about = "Query blockchain state from public node pools", long_about = None)]
struct Cli {
    /// Network to query (bitcoin, bitcoin-testnet, litecoin, ethereum)
    #[arg(short, long, default_value = "bitcoin")]
    network: String,

    /// Optional TOML file overriding the built-in node pool
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch the confirmed/unconfirmed balance of an address
    Balance { address: String },
    /// List unspent outputs of an address
    Unspent { address: String },
    /// Look up a transaction by id
    Tx { txid: String },
    /// Derive a transfer fee from a raw hex gas price
    Fee {
        gas_price_hex: String,
        /// Use the token-transfer gas limit instead of the native one
        #[arg(long)]
        token: bool,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    chainscout::observability::logging::init();

    let cli = Cli::parse();
    let network = parse_network(&cli.network)?;

    let config = match &cli.config {
        Some(path) => chainscout::config::load_config(path)?,
        None => PoolConfig::default(),
    };
    let pool = Arc::new(NodePool::from_config(&config));
    let client = RestClient::new(pool);
    let session = Session::new();

    match cli.command {
        Commands::Balance { address } => {
            let (tx, mut rx) = mpsc::unbounded_channel();
            client.bind_address_listener(tx);
            client.request_address_balance(&session, network, &address)?;
            match rx.recv().await {
                Some(AddressEvent::Balance(balance)) => {
                    println!("{}", serde_json::to_string_pretty(&balance)?);
                }
                Some(AddressEvent::Failed(message)) => fail(&message),
                other => fail(&format!("unexpected event: {:?}", other)),
            }
        }
        Commands::Unspent { address } => {
            let (tx, mut rx) = mpsc::unbounded_channel();
            client.bind_address_listener(tx);
            client.request_unspent_tx(&session, network, &address)?;
            match rx.recv().await {
                Some(AddressEvent::Unspent(unspent)) => {
                    println!("{}", serde_json::to_string_pretty(&unspent)?);
                }
                Some(AddressEvent::Failed(message)) => fail(&message),
                other => fail(&format!("unexpected event: {:?}", other)),
            }
        }
        Commands::Tx { txid } => {
            let (tx, mut rx) = mpsc::unbounded_channel();
            client.bind_tx_info_listener(tx);
            client.request_transaction_info(&session, network, &txid)?;
            match rx.recv().await {
                Some(TxInfoEvent::Info(info)) => {
                    println!("{}", serde_json::to_string_pretty(&info)?);
                }
                Some(TxInfoEvent::Failed(message)) => fail(&message),
                None => fail("listener channel closed"),
            }
        }
        Commands::Fee {
            gas_price_hex,
            token,
        } => {
            let kind = if token {
                AssetKind::Token
            } else {
                AssetKind::Native
            };
            let fee = fees::derive_fee(&gas_price_hex, kind)?;
            println!("{} wei ({} gwei)", fee, fees::fee_display_gwei(fee));
        }
    }

    Ok(())
}

fn parse_network(name: &str) -> Result<Blockchain, ChainError> {
    match name.to_ascii_lowercase().as_str() {
        "bitcoin" | "btc" => Ok(Blockchain::Bitcoin),
        "bitcoin-testnet" | "btctest" => Ok(Blockchain::BitcoinTestNet),
        "litecoin" | "ltc" => Ok(Blockchain::Litecoin),
        "ethereum" | "eth" => Ok(Blockchain::Ethereum),
        other => Err(ChainError::Config(format!("unknown network '{}'", other))),
    }
}

fn fail(message: &str) {
    eprintln!("Error: {}", message);
    std::process::exit(1);
}

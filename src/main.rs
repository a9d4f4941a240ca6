//! Cosign-Wallet CLI
//!
//! A command-line interface for the co-signed wallet engine: key
//! generation, wallet creation, operation hashing/co-signing, and
//! transfer submission against a local test ledger.

use clap::{Parser, Subcommand};
use cosign_wallet::cli::{self, AppState};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "cosign")]
#[command(version = "0.1.0")]
#[command(about = "Multi-party authorization engine for co-signed wallets", long_about = None)]
struct Cli {
    /// Data directory for wallet state
    #[arg(short, long, default_value = ".cosign_data")]
    data_dir: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a new state directory
    Init,

    /// Generate a new signer key pair
    Keygen,

    /// Wallet operations
    Wallet {
        #[command(subcommand)]
        action: WalletCommands,
    },

    /// Deposit funds into an address on the local test ledger
    Fund {
        /// Address to fund
        #[arg(short, long)]
        address: String,

        /// Amount in the smallest base unit
        #[arg(long)]
        amount: u128,
    },

    /// Show the balance of an address
    Balance {
        /// Address to query
        address: String,
    },

    /// Query the next sequence id a wallet accepts
    NextSeq {
        /// Wallet address
        wallet: String,
    },

    /// Print the operation hash a co-signer needs to sign
    Hash {
        /// Destination address
        #[arg(short, long)]
        to: String,

        /// Value in the smallest base unit
        #[arg(long)]
        amount: u128,

        /// Payload bytes, hex (may be empty)
        #[arg(long, default_value = "")]
        data: String,

        /// Absolute expiry timestamp, unix seconds
        #[arg(short, long)]
        expiry: u64,

        /// Sequence id
        #[arg(short, long)]
        sequence: u64,
    },

    /// Print the batch operation hash a co-signer needs to sign
    HashBatch {
        /// Recipient addresses (repeat per recipient)
        #[arg(short, long = "recipient")]
        recipients: Vec<String>,

        /// Values, parallel to recipients (repeat per recipient)
        #[arg(short, long = "value")]
        values: Vec<u128>,

        /// Absolute expiry timestamp, unix seconds
        #[arg(short, long)]
        expiry: u64,

        /// Sequence id
        #[arg(short, long)]
        sequence: u64,
    },

    /// Co-sign an operation hash with a private key
    Sign {
        /// Private key, hex
        #[arg(short, long)]
        key: String,

        /// Operation hash, hex
        #[arg(long)]
        hash: String,
    },

    /// Submit a co-signed single transfer
    Send {
        /// Wallet address
        #[arg(short, long)]
        wallet: String,

        /// Destination address
        #[arg(short, long)]
        to: String,

        /// Value in the smallest base unit
        #[arg(long)]
        amount: u128,

        /// Payload bytes, hex (may be empty)
        #[arg(long, default_value = "")]
        data: String,

        /// Absolute expiry timestamp, unix seconds
        #[arg(short, long)]
        expiry: u64,

        /// Sequence id
        #[arg(long)]
        sequence: u64,

        /// Co-signer signature, 65 bytes hex
        #[arg(long)]
        signature: String,

        /// Submitting signer address
        #[arg(long)]
        submitter: String,
    },

    /// Submit a co-signed batch transfer
    SendBatch {
        /// Wallet address
        #[arg(short, long)]
        wallet: String,

        /// Recipient addresses (repeat per recipient)
        #[arg(short, long = "recipient")]
        recipients: Vec<String>,

        /// Values, parallel to recipients (repeat per recipient)
        #[arg(long = "value")]
        values: Vec<u128>,

        /// Absolute expiry timestamp, unix seconds
        #[arg(short, long)]
        expiry: u64,

        /// Sequence id
        #[arg(long)]
        sequence: u64,

        /// Co-signer signature, 65 bytes hex
        #[arg(long)]
        signature: String,

        /// Submitting signer address
        #[arg(long)]
        submitter: String,
    },
}

#[derive(Subcommand)]
enum WalletCommands {
    /// Create a co-signed wallet from its signer set
    Create {
        /// Authorized signer addresses (repeat per signer, minimum 2)
        #[arg(short, long = "signer")]
        signers: Vec<String>,

        /// Optional label
        #[arg(short, long)]
        label: Option<String>,
    },

    /// List all wallets
    List,

    /// Show one wallet in detail
    Show {
        /// Wallet address
        address: String,
    },
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("❌ Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> cli::CliResult<()> {
    match cli.command {
        Commands::Init => cli::commands::cmd_init(&cli.data_dir),
        Commands::Keygen => cli::commands::cmd_keygen(),
        Commands::Wallet { action } => {
            let mut state = AppState::new(cli.data_dir)?;
            match action {
                WalletCommands::Create { signers, label } => {
                    cli::commands::cmd_wallet_create(&mut state, &signers, label.as_deref())
                }
                WalletCommands::List => cli::commands::cmd_wallet_list(&state),
                WalletCommands::Show { address } => {
                    cli::commands::cmd_wallet_show(&state, &address)
                }
            }
        }
        Commands::Fund { address, amount } => {
            let mut state = AppState::new(cli.data_dir)?;
            cli::commands::cmd_fund(&mut state, &address, amount)
        }
        Commands::Balance { address } => {
            let state = AppState::new(cli.data_dir)?;
            cli::commands::cmd_balance(&state, &address)
        }
        Commands::NextSeq { wallet } => {
            let state = AppState::new(cli.data_dir)?;
            cli::commands::cmd_next_seq(&state, &wallet)
        }
        Commands::Hash {
            to,
            amount,
            data,
            expiry,
            sequence,
        } => cli::commands::cmd_hash(&to, amount, &data, expiry, sequence),
        Commands::HashBatch {
            recipients,
            values,
            expiry,
            sequence,
        } => cli::commands::cmd_hash_batch(&recipients, &values, expiry, sequence),
        Commands::Sign { key, hash } => cli::commands::cmd_sign(&key, &hash),
        Commands::Send {
            wallet,
            to,
            amount,
            data,
            expiry,
            sequence,
            signature,
            submitter,
        } => {
            let mut state = AppState::new(cli.data_dir)?;
            cli::commands::cmd_send(
                &mut state, &wallet, &to, amount, &data, expiry, sequence, &signature, &submitter,
            )
        }
        Commands::SendBatch {
            wallet,
            recipients,
            values,
            expiry,
            sequence,
            signature,
            submitter,
        } => {
            let mut state = AppState::new(cli.data_dir)?;
            cli::commands::cmd_send_batch(
                &mut state,
                &wallet,
                &recipients,
                &values,
                expiry,
                sequence,
                &signature,
                &submitter,
            )
        }
    }
}

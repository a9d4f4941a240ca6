//! CLI command handlers
//!
//! Implements the command handlers for the `cosign` binary. State lives
//! in a JSON file under the data directory: the wallet registry with its
//! consumed sequence counters, plus a local test ledger for balances.

use crate::crypto::{Address, KeyPair, Signature};
use crate::ledger::{Ledger, MemoryLedger};
use crate::storage::{Storage, StorageConfig};
use crate::wallet::{BatchOperation, Operation, WalletManager};
use std::path::PathBuf;

/// Result type for CLI operations
pub type CliResult<T> = Result<T, Box<dyn std::error::Error>>;

/// Application state
pub struct AppState {
    pub wallets: WalletManager,
    pub ledger: MemoryLedger,
    pub storage: Storage,
    pub data_dir: PathBuf,
}

impl AppState {
    /// Initialize application state
    pub fn new(data_dir: PathBuf) -> CliResult<Self> {
        let storage_config = StorageConfig {
            data_dir: data_dir.clone(),
            ..Default::default()
        };
        let storage = Storage::new(storage_config)?;

        let (wallets, ledger) = if storage.exists() {
            storage.load()?
        } else {
            (WalletManager::new(), MemoryLedger::new())
        };

        Ok(Self {
            wallets,
            ledger,
            storage,
            data_dir,
        })
    }

    /// Save the current state
    pub fn save(&self) -> CliResult<()> {
        self.storage.save(&self.wallets, &self.ledger)?;
        Ok(())
    }
}

/// Initialize a new state directory
pub fn cmd_init(data_dir: &PathBuf) -> CliResult<()> {
    let storage_config = StorageConfig {
        data_dir: data_dir.clone(),
        ..Default::default()
    };
    let storage = Storage::new(storage_config)?;

    if storage.exists() {
        println!("⚠️  State already exists at {:?}", data_dir);
        return Ok(());
    }

    storage.save(&WalletManager::new(), &MemoryLedger::new())?;
    println!("✅ State initialized at {:?}", data_dir);
    Ok(())
}

/// Generate a new signer key pair
pub fn cmd_keygen() -> CliResult<()> {
    let kp = KeyPair::generate();

    println!("🔐 New signer key pair");
    println!("   📍 Address:     {}", kp.address());
    println!("   🔑 Public key:  {}", kp.public_key_hex());
    println!("   🗝️  Private key: {}", kp.private_key_hex());
    println!("\n   ⚠️  Keep the private key safe; it is shown only once.");
    Ok(())
}

/// Create a new co-signed wallet
pub fn cmd_wallet_create(
    state: &mut AppState,
    signers: &[String],
    label: Option<&str>,
) -> CliResult<()> {
    let signers: Vec<Address> = signers
        .iter()
        .map(|s| s.parse())
        .collect::<Result<_, _>>()?;

    let wallet = state
        .wallets
        .create_wallet(signers, label.map(String::from))?;
    state.save()?;

    println!("🪪 Wallet created");
    println!("   📍 Address: {}", wallet.address());
    println!("   👥 Signers: {}", wallet.signer_count());
    if let Some(l) = &wallet.label {
        println!("   🏷️  Label:   {}", l);
    }
    Ok(())
}

/// List all wallets
pub fn cmd_wallet_list(state: &AppState) -> CliResult<()> {
    let wallets = state.wallets.list_wallets();
    if wallets.is_empty() {
        println!("No wallets yet. Create one with `cosign wallet create`.");
        return Ok(());
    }

    println!("Wallets ({}):", wallets.len());
    for wallet in wallets {
        let label = wallet.label.as_deref().unwrap_or("-");
        println!(
            "   {}  signers: {}  label: {}",
            wallet.address(),
            wallet.signer_count(),
            label
        );
    }
    Ok(())
}

/// Show one wallet in detail
pub fn cmd_wallet_show(state: &AppState, address: &str) -> CliResult<()> {
    let address: Address = address.parse()?;
    let wallet = state
        .wallets
        .get_wallet(&address)
        .ok_or_else(|| format!("wallet {} not found", address))?;

    println!("🪪 Wallet {}", wallet.address());
    println!("   💰 Balance: {}", state.ledger.balance(&address));
    println!(
        "   🔢 Next sequence id: {}",
        state.wallets.next_sequence_id(&address)?
    );
    println!("   👥 Signers:");
    for signer in wallet.signers() {
        println!("      {}", signer);
    }
    Ok(())
}

/// Deposit funds into an address on the local test ledger
pub fn cmd_fund(state: &mut AppState, address: &str, amount: u128) -> CliResult<()> {
    let address: Address = address.parse()?;
    state.ledger.deposit(&address, amount)?;
    state.save()?;

    println!(
        "💰 Deposited {}; balance of {} is now {}",
        amount,
        address,
        state.ledger.balance(&address)
    );
    Ok(())
}

/// Show the balance of an address
pub fn cmd_balance(state: &AppState, address: &str) -> CliResult<()> {
    let address: Address = address.parse()?;
    println!("💰 {}: {}", address, state.ledger.balance(&address));
    Ok(())
}

/// Query the next sequence id a wallet accepts
pub fn cmd_next_seq(state: &AppState, wallet: &str) -> CliResult<()> {
    let wallet: Address = wallet.parse()?;
    println!("{}", state.wallets.next_sequence_id(&wallet)?);
    Ok(())
}

/// Print the operation hash a co-signer needs to sign (single transfer)
pub fn cmd_hash(
    to: &str,
    amount: u128,
    data: &str,
    expiry: u64,
    sequence_id: u64,
) -> CliResult<()> {
    let operation = Operation {
        destination: to.parse()?,
        value: amount,
        payload: hex::decode(data)?,
        expiry,
        sequence_id,
    };
    println!("{}", hex::encode(operation.hash()));
    Ok(())
}

/// Print the operation hash a co-signer needs to sign (batch transfer)
pub fn cmd_hash_batch(
    recipients: &[String],
    values: &[u128],
    expiry: u64,
    sequence_id: u64,
) -> CliResult<()> {
    let batch = BatchOperation {
        recipients: recipients
            .iter()
            .map(|s| s.parse())
            .collect::<Result<_, _>>()?,
        values: values.to_vec(),
        expiry,
        sequence_id,
    };
    println!("{}", hex::encode(batch.hash()));
    Ok(())
}

/// Co-sign an operation hash with a private key
pub fn cmd_sign(private_key: &str, hash: &str) -> CliResult<()> {
    let kp = KeyPair::from_private_key_hex(private_key)?;
    let hash_bytes = hex::decode(hash)?;
    let signature = kp.sign_recoverable(&hash_bytes)?;

    println!("✍️  Signed by {}", kp.address());
    println!("{}", signature.to_hex());
    Ok(())
}

/// Submit a co-signed single transfer
#[allow(clippy::too_many_arguments)]
pub fn cmd_send(
    state: &mut AppState,
    wallet: &str,
    to: &str,
    amount: u128,
    data: &str,
    expiry: u64,
    sequence_id: u64,
    signature: &str,
    submitter: &str,
) -> CliResult<()> {
    let wallet: Address = wallet.parse()?;
    let operation = Operation {
        destination: to.parse()?,
        value: amount,
        payload: hex::decode(data)?,
        expiry,
        sequence_id,
    };
    let signature = Signature::from_hex(signature)?;
    let submitter: Address = submitter.parse()?;

    let record = state
        .wallets
        .send(&mut state.ledger, &wallet, &operation, &signature, &submitter)?;
    state.save()?;

    println!("✅ Transfer executed");
    println!("   ➡️  {} -> {}", record.wallet, record.destination);
    println!("   💸 Value: {}", record.value);
    println!("   🔢 Sequence id: {}", record.sequence_id);
    println!("   ✍️  Co-signed by: {}", record.authorized_by);
    Ok(())
}

/// Submit a co-signed batch transfer
#[allow(clippy::too_many_arguments)]
pub fn cmd_send_batch(
    state: &mut AppState,
    wallet: &str,
    recipients: &[String],
    values: &[u128],
    expiry: u64,
    sequence_id: u64,
    signature: &str,
    submitter: &str,
) -> CliResult<()> {
    let wallet: Address = wallet.parse()?;
    let batch = BatchOperation {
        recipients: recipients
            .iter()
            .map(|s| s.parse())
            .collect::<Result<_, _>>()?,
        values: values.to_vec(),
        expiry,
        sequence_id,
    };
    let signature = Signature::from_hex(signature)?;
    let submitter: Address = submitter.parse()?;

    let record = state
        .wallets
        .send_batch(&mut state.ledger, &wallet, &batch, &signature, &submitter)?;
    state.save()?;

    println!("✅ Batch executed");
    println!("   💸 {} transfers from {}", record.recipients.len(), record.wallet);
    println!("   🔢 Sequence id: {}", record.sequence_id);
    println!("   ✍️  Co-signed by: {}", record.authorized_by);
    Ok(())
}

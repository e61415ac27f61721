//! Network configuration and keypair management

use anyhow::{Context, Result};
use bondcurve_sdk::constants::DEFAULT_PROGRAM_ID;
use bondcurve_sdk::CurveClient;
use solana_sdk::pubkey::Pubkey;
use solana_sdk::signature::{Keypair, Signer};
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Arc;

pub struct NetworkConfig {
    pub network: String,
    pub rpc_url: String,
    pub keypair: Keypair,
    pub keypair_path: PathBuf,
    pub program_id: Pubkey,
}

impl NetworkConfig {
    pub fn new(
        network: &str,
        rpc_url: Option<String>,
        keypair_path: Option<PathBuf>,
        program_id: Option<String>,
    ) -> Result<Self> {
        let default_rpc = match network {
            "localnet" | "local" => "http://127.0.0.1:8899".to_string(),
            "devnet" => "https://api.devnet.solana.com".to_string(),
            "mainnet-beta" | "mainnet" => "https://api.mainnet-beta.solana.com".to_string(),
            _ => anyhow::bail!(
                "Unknown network: {}. Use localnet, devnet, or mainnet-beta",
                network
            ),
        };
        let rpc_url = rpc_url.unwrap_or(default_rpc);

        let keypair_path = match keypair_path {
            Some(path) => path,
            None => default_keypair_path()?,
        };
        let keypair = load_keypair(&keypair_path)?;

        let program_id = match program_id {
            Some(id) => Pubkey::from_str(&id).context("Invalid program id")?,
            None => Pubkey::from_str(DEFAULT_PROGRAM_ID).expect("Invalid default program ID"),
        };

        Ok(Self {
            network: network.to_string(),
            rpc_url,
            keypair,
            keypair_path,
            program_id,
        })
    }

    pub fn pubkey(&self) -> Pubkey {
        self.keypair.pubkey()
    }

    /// Build an orchestration client signing with the configured keypair.
    pub fn client(&self) -> CurveClient {
        CurveClient::new(
            &self.rpc_url,
            self.program_id,
            Some(Arc::new(self.keypair.insecure_clone())),
        )
    }
}

/// Keypair path from the Solana CLI config when one exists, else the
/// standard default location.
fn default_keypair_path() -> Result<PathBuf> {
    if let Some(config_file) = solana_cli_config::CONFIG_FILE.as_ref() {
        if let Ok(cli_config) = solana_cli_config::Config::load(config_file) {
            if !cli_config.keypair_path.is_empty() {
                return Ok(PathBuf::from(cli_config.keypair_path));
            }
        }
    }
    let home = std::env::var("HOME").context("HOME environment variable not set")?;
    Ok(PathBuf::from(home).join(".config/solana/id.json"))
}

/// Load a keypair from a JSON file
fn load_keypair(path: &Path) -> Result<Keypair> {
    if !path.exists() {
        anyhow::bail!(
            "Keypair file not found: {}\n\
             Create one with: solana-keygen new --outfile {}",
            path.display(),
            path.display()
        );
    }

    let data = fs::read_to_string(path)
        .with_context(|| format!("Failed to read keypair file: {}", path.display()))?;

    let bytes: Vec<u8> = serde_json::from_str(&data)
        .with_context(|| format!("Failed to parse keypair JSON: {}", path.display()))?;

    Keypair::from_bytes(&bytes)
        .with_context(|| format!("Invalid keypair data in: {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_network_urls() {
        let config = NetworkConfig::new("localnet", None, None, None);
        assert!(
            config.is_ok()
                || config
                    .as_ref()
                    .err()
                    .unwrap()
                    .to_string()
                    .contains("Keypair file not found")
        );
    }

    #[test]
    fn test_unknown_network_is_rejected() {
        assert!(NetworkConfig::new("testnet-classic", None, None, None).is_err());
    }
}

use clap::Parser;
use cosmwasm_std::Binary;
use custody_controller::msg::InstantiateMsg;
use custody_ledger_utils::TRUST_KEY_LEN;
use std::env;
use std::error::Error;
use std::fs;
use std::path::Path;

const TRUST_KEY_VAR: &str = "CUSTODY_TRUST_KEY";
const ASSET_ID_VAR: &str = "CUSTODY_ASSET_ID";

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to write the instantiate message to
    #[arg(short, long, default_value = "deployment/output/instantiate.json")]
    output: String,
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    let args = Args::parse();

    let msg = InstantiateMsg {
        trust_key: trust_key_from_env(env::var(TRUST_KEY_VAR).ok()),
        asset_id: asset_id_from_env(env::var(ASSET_ID_VAR).ok()),
    };

    log::info!("provisioning controller for asset id {}", msg.asset_id);

    if let Some(parent) = Path::new(&args.output).parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&args.output, serde_json::to_string_pretty(&msg)?)?;

    log::info!("instantiate message written to {}", args.output);

    Ok(())
}

/// Decodes the hex-encoded trust key from the environment. Absent,
/// undecodable or wrong-length values fall back to the all-zero key so that
/// provisioning never fails on bad configuration.
fn trust_key_from_env(raw: Option<String>) -> Binary {
    let zero_key = Binary::from(vec![0u8; TRUST_KEY_LEN]);
    let Some(raw) = raw else {
        log::warn!("{TRUST_KEY_VAR} is not set, using the all-zero trust key");
        return zero_key;
    };

    match hex::decode(raw.trim()) {
        Ok(bytes) if bytes.len() == TRUST_KEY_LEN => Binary::from(bytes),
        Ok(bytes) => {
            log::warn!(
                "{TRUST_KEY_VAR} decodes to {} bytes instead of {TRUST_KEY_LEN}, using the all-zero trust key",
                bytes.len()
            );
            zero_key
        }
        Err(err) => {
            log::warn!("{TRUST_KEY_VAR} is not valid hex ({err}), using the all-zero trust key");
            zero_key
        }
    }
}

/// Parses the asset id from the environment, falling back to 0 on absent or
/// malformed input.
fn asset_id_from_env(raw: Option<String>) -> u64 {
    let Some(raw) = raw else {
        log::warn!("{ASSET_ID_VAR} is not set, defaulting to asset id 0");
        return 0;
    };

    match raw.trim().parse() {
        Ok(asset_id) => asset_id,
        Err(err) => {
            log::warn!("{ASSET_ID_VAR} is not a valid asset id ({err}), defaulting to 0");
            0
        }
    }
}

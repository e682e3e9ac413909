use std::env;
use std::fs;
use std::io;
use std::path::PathBuf;

use serde::Serialize;

const API_BASE_URL_ENV: &str = "TICKSHOP_API_BASE_URL";

#[derive(Debug, Default, Serialize)]
struct MobileBootstrapConfig {
    api_base_url: Option<String>,
}

fn main() {
    println!("cargo:rerun-if-env-changed={API_BASE_URL_ENV}");

    if let Err(error) = write_mobile_bootstrap_config() {
        println!("cargo:warning=failed to generate mobile bootstrap config: {error}");
    }
}

fn write_mobile_bootstrap_config() -> io::Result<()> {
    load_workspace_dotenv();

    let out_dir = env::var_os("OUT_DIR")
        .map(PathBuf::from)
        .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "OUT_DIR is not set"))?;
    fs::create_dir_all(&out_dir)?;

    let config = MobileBootstrapConfig {
        api_base_url: env_var_trimmed(API_BASE_URL_ENV),
    };

    let content = serde_json::to_string_pretty(&config)
        .map_err(|error| io::Error::new(io::ErrorKind::InvalidData, error.to_string()))?;
    fs::write(out_dir.join("mobile-bootstrap.json"), content)?;
    Ok(())
}

fn load_workspace_dotenv() {
    let manifest_dir =
        env::var_os("CARGO_MANIFEST_DIR").map_or_else(|| PathBuf::from("."), PathBuf::from);
    let workspace_root = manifest_dir.join("..").join("..");

    // Prefer .env.client (role-separated) over legacy .env
    let client_env = workspace_root.join(".env.client");
    let legacy_env = workspace_root.join(".env");

    if client_env.exists() {
        let _ = dotenvy::from_path(client_env);
    } else if legacy_env.exists() {
        let _ = dotenvy::from_path(legacy_env);
    }
}

fn env_var_trimmed(name: &str) -> Option<String> {
    let value = env::var(name).ok()?;
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

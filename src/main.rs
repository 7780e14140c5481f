//! freenom-ddns - one-shot dynamic DNS updater for Freenom domains.

use anyhow::bail;
use clap::Parser;
use freenom_ddns::config::Config;
use freenom_ddns::detector::IpDetector;
use freenom_ddns::portal::{DomainTarget, PortalClient};
use freenom_ddns::updater::{self, Credentials, SyncOutcome};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "freenom-ddns")]
#[command(about = "Update Freenom DNS records to the current public IP")]
#[command(version)]
struct Cli {
    /// Positional arguments, in order: [LAST_KNOWN_IP] EMAIL PASSWD DOMAIN DOMAIN_ID.
    ///
    /// LAST_KNOWN_IP is an external cache supplied by the caller (e.g. a
    /// wrapper script): when it equals the detected public IP the portal is
    /// never contacted.
    #[arg(value_name = "ARG", num_args = 4..=5, required = true)]
    args: Vec<String>,

    /// Path to config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Verify the portal's TLS certificate instead of accepting any
    #[arg(long)]
    verify_tls: bool,
}

/// The positional surface, after shifting for the optional leading IP.
struct RunArgs {
    last_known_ip: Option<String>,
    email: String,
    passwd: String,
    domain: String,
    domain_id: String,
}

fn split_positionals(mut args: Vec<String>) -> Option<RunArgs> {
    let last_known_ip = match args.len() {
        4 => None,
        5 => Some(args.remove(0)),
        _ => return None,
    };

    let mut args = args.into_iter();
    Some(RunArgs {
        last_known_ip,
        email: args.next()?,
        passwd: args.next()?,
        domain: args.next()?,
        domain_id: args.next()?,
    })
}

fn get_config_path(cli_path: Option<PathBuf>) -> PathBuf {
    if let Some(path) = cli_path {
        return path;
    }

    // Default locations
    let candidates = [
        Config::default_path(),
        Some(PathBuf::from("/etc/freenom-ddns/config.toml")),
        Some(PathBuf::from("config.toml")),
    ];

    for candidate in candidates.into_iter().flatten() {
        if candidate.exists() {
            return candidate;
        }
    }

    Config::default_path().unwrap_or_else(|| PathBuf::from("config.toml"))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let Some(run) = split_positionals(cli.args) else {
        bail!("expected positional arguments: [LAST_KNOWN_IP] EMAIL PASSWD DOMAIN DOMAIN_ID");
    };

    let config_path = get_config_path(cli.config);
    let mut config = Config::load_from(&config_path)?;
    if cli.verify_tls {
        config.verify_tls = true;
    }

    let external_ip = IpDetector::new(config.ip_service.clone())
        .detect()
        .await?
        .to_string();

    if run.last_known_ip.as_deref() == Some(external_ip.as_str()) {
        println!("External IP equals last known IP, nothing to be done...");
        println!("{external_ip}");
        return Ok(());
    }

    let portal = PortalClient::new(&config)?;
    let credentials = Credentials {
        email: run.email,
        passwd: run.passwd,
    };
    let target = DomainTarget {
        domain: run.domain,
        domain_id: run.domain_id,
    };

    match updater::run_once(&portal, &credentials, &target, &external_ip).await? {
        SyncOutcome::RecordsCurrent => {
            println!("External IP equals DNS IP, nothing to be done...");
        }
        SyncOutcome::Updated => {
            println!("External IP NOT equals DNS IP, update successfully...");
        }
        SyncOutcome::WriteFailed => {
            println!("External IP NOT equals DNS IP, update failed...");
        }
    }
    println!("{external_ip}");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_four_positionals() {
        let run = split_positionals(strings(&["a@b.c", "pw", "example.tk", "42"])).unwrap();

        assert!(run.last_known_ip.is_none());
        assert_eq!(run.email, "a@b.c");
        assert_eq!(run.domain_id, "42");
    }

    #[test]
    fn test_five_positionals() {
        let run =
            split_positionals(strings(&["1.2.3.4", "a@b.c", "pw", "example.tk", "42"])).unwrap();

        assert_eq!(run.last_known_ip.as_deref(), Some("1.2.3.4"));
        assert_eq!(run.email, "a@b.c");
        assert_eq!(run.domain, "example.tk");
    }

    #[test]
    fn test_wrong_arity() {
        assert!(split_positionals(strings(&["a@b.c", "pw"])).is_none());
        assert!(split_positionals(strings(&["x", "x", "x", "x", "x", "x"])).is_none());
    }
}

use anyhow::Result;
use std::process;
use tracing::{error, info};

use vmsnapshot_webhook::{WebhookServer, cli, config::Config, tracing::setup_tracing};

#[tokio::main]
async fn main() -> Result<()> {
    let matches = cli::build_cli().get_matches();
    let config = Config::from_args(&matches)?;

    setup_tracing(&config.log_level, &config.log_fmt, config.log_no_color)?;

    // Starting from rustls 0.22, each application must set its default crypto provider.
    if rustls::crypto::ring::default_provider()
        .install_default()
        .is_err()
    {
        fatal_error("cannot install the rustls crypto provider");
    }

    info!(
        version = clap::crate_version!(),
        "starting VirtualMachineSnapshot admission webhook"
    );

    let server = match WebhookServer::new_from_config(config).await {
        Ok(server) => server,
        Err(e) => fatal_error(&e.to_string()),
    };

    if let Err(e) = server.run().await {
        fatal_error(&format!("webhook server error: {e}"));
    }

    Ok(())
}

fn fatal_error(msg: &str) -> ! {
    error!("{}", msg);
    process::exit(1);
}

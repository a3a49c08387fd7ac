// # update-dns-record
//
// One-shot command that points a DNS record at the host's current public
// IP (or at an explicit `--ip`). It is a thin integration layer: record
// lookup and the update/create decision live in `update-dns-core`, provider
// HTTP details in the provider crates.
//
// The command is responsible for:
// 1. Parsing arguments
// 2. Reading configuration from environment variables
// 3. Initializing logging and the runtime
// 4. Creating the provider from the registry
// 5. Running a single reconciliation
//
// ## Configuration
//
// - `API_KEY`: Provider API token
// - `LOG_DIR`: Directory for the rotating log file (default `./logs`)
// - `LOG_LENGTH_DAYS`: Daily log files kept (default 7)
// - `LOG_LEVEL`: trace, debug, info, warn, error (default info)
// - `HTTP_TIMEOUT_SECS`: Timeout for every HTTP call, 1-300 (default 10)
// - `CLOUDFLARE_API_BASE`: Cloudflare API base URL override
// - `PUBLIC_IP_URL`: Public IP endpoint override
//
// ## Example
//
// ```bash
// export API_KEY=your_token
// update-dns-record cloudflare example.com home.example.com --create
// ```

mod cli;
mod config;
mod logging;

use clap::Parser;
use cli::Cli;
use config::AppConfig;
use std::process::ExitCode;
use tracing::{error, info};
use update_dns_core::{
    DnsProvider, Error, IpSource, IpVersion, ProviderRegistry, ReconcileOutcome, Reconciler, Result,
};
use update_dns_ip_http::{DEFAULT_IP_SERVICE, HttpIpSource};

/// Exit codes for different termination scenarios
///
/// - 0: Record is up to date
/// - 1: Configuration error or invalid input
/// - 2: Runtime error (provider or IP lookup failure)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum UpdateExitCode {
    /// Record matches the desired content
    Success = 0,
    /// Configuration error or invalid input
    ConfigError = 1,
    /// Provider or lookup failure
    RuntimeError = 2,
}

impl UpdateExitCode {
    fn for_error(err: &Error) -> Self {
        if err.is_config() {
            Self::ConfigError
        } else {
            Self::RuntimeError
        }
    }
}

impl From<UpdateExitCode> for ExitCode {
    fn from(code: UpdateExitCode) -> Self {
        ExitCode::from(code as u8)
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match AppConfig::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("{}", e);
            return UpdateExitCode::ConfigError.into();
        }
    };

    // Flushes the log file when dropped at the end of main
    let _log_guard = match logging::init(&config) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialise logging: {:#}", e);
            return UpdateExitCode::ConfigError.into();
        }
    };

    info!(provider = %cli.provider_name, "Initialising provider");
    let registry = build_registry();
    let provider = match registry.create_provider(&config.provider_config(&cli.provider_name)) {
        Ok(provider) => provider,
        Err(e) => {
            error!(provider = %cli.provider_name, "{}", e);
            return UpdateExitCode::for_error(&e).into();
        }
    };

    let rt = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            error!("Failed to create tokio runtime: {}", e);
            return UpdateExitCode::RuntimeError.into();
        }
    };

    let result = rt.block_on(run(&cli, &config, provider.as_ref()));

    match result {
        Ok(outcome) => {
            info!(
                record = outcome.record().name(),
                content = outcome.record().content(),
                outcome = outcome.label(),
                "Done"
            );
            UpdateExitCode::Success.into()
        }
        Err(e) => {
            error!(
                zone = %cli.zone_name,
                record = %cli.record_name,
                record_type = %cli.record_type,
                "{}",
                e
            );
            UpdateExitCode::for_error(&e).into()
        }
    }
}

/// Registry holding every provider compiled into this binary
fn build_registry() -> ProviderRegistry {
    let registry = ProviderRegistry::new();

    #[cfg(feature = "cloudflare")]
    update_dns_cloudflare::register(&registry);

    registry
}

/// Resolve the desired content and reconcile the record once
async fn run(cli: &Cli, config: &AppConfig, provider: &dyn DnsProvider) -> Result<ReconcileOutcome> {
    let content = match &cli.ip {
        Some(ip) => ip.clone(),
        None => public_ip_source(config, &cli.record_type)?
            .current()
            .await?
            .to_string(),
    };

    let request = cli.update_request(content);
    request.validate()?;

    Reconciler::new(provider).reconcile(&request).await
}

/// IP source for `record_type`, restricted to the matching address family
fn public_ip_source(config: &AppConfig, record_type: &str) -> Result<HttpIpSource> {
    let url = config.public_ip_url.as_deref().unwrap_or(DEFAULT_IP_SERVICE);
    HttpIpSource::with_options(url, IpVersion::for_record_type(record_type), config.http_timeout())
}

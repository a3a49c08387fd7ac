use clap::Parser;
use update_dns_core::UpdateRequest;
use update_dns_core::config::DEFAULT_RECORD_TYPE;

/// Update a DNS record in a remote provider.
#[derive(Debug, Clone, PartialEq, Eq, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// The provider to use to update the DNS record. Available choices are ["cloudflare"]
    pub provider_name: String,

    /// The name of the hosted zone
    pub zone_name: String,

    /// The name of the record in the provider's system
    pub record_name: String,

    /// IP address to set in record. If not given then IP of host machine will be assumed
    #[arg(long, value_name = "IP")]
    pub ip: Option<String>,

    /// The DNS record type
    #[arg(long, default_value = DEFAULT_RECORD_TYPE, value_name = "TYPE")]
    pub record_type: String,

    /// If record does not exist, create it
    #[arg(long, action, default_value_t = false)]
    pub create: bool,
}

impl Cli {
    /// Build the reconciliation request for `content`
    pub fn update_request(&self, content: impl Into<String>) -> UpdateRequest {
        UpdateRequest::new(&self.zone_name, &self.record_name, content)
            .with_record_type(&self.record_type)
            .with_create_if_missing(self.create)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_positional_arguments_and_defaults() {
        let cli = Cli::try_parse_from(["update-dns-record", "cloudflare", "example.com", "home.example.com"])
            .unwrap();

        assert_eq!(cli.provider_name, "cloudflare");
        assert_eq!(cli.zone_name, "example.com");
        assert_eq!(cli.record_name, "home.example.com");
        assert_eq!(cli.ip, None);
        assert_eq!(cli.record_type, "A");
        assert!(!cli.create);
    }

    #[test]
    fn test_options() {
        let cli = Cli::try_parse_from([
            "update-dns-record",
            "cloudflare",
            "example.com",
            "home.example.com",
            "--ip",
            "2001:db8::1",
            "--record-type",
            "AAAA",
            "--create",
        ])
        .unwrap();

        assert_eq!(cli.ip.as_deref(), Some("2001:db8::1"));
        assert_eq!(cli.record_type, "AAAA");
        assert!(cli.create);
    }

    #[test]
    fn test_missing_positional_is_rejected() {
        assert!(Cli::try_parse_from(["update-dns-record", "cloudflare", "example.com"]).is_err());
    }

    #[test]
    fn test_update_request_from_cli() {
        let cli = Cli::try_parse_from([
            "update-dns-record",
            "cloudflare",
            "example.com",
            "home.example.com",
            "--create",
        ])
        .unwrap();

        let request = cli.update_request("9.9.9.9");
        assert_eq!(
            request,
            UpdateRequest::new("example.com", "home.example.com", "9.9.9.9").with_create_if_missing(true)
        );
    }
}

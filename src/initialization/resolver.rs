//! DNS resolver initialization.
//!
//! This module provides the function to initialize the DNS resolver from the
//! system configuration, or from explicit nameservers when given.

use std::net::IpAddr;
use std::time::Duration;

use hickory_resolver::config::{NameServerConfigGroup, ResolverConfig, ResolverOpts};
use hickory_resolver::TokioAsyncResolver;

use crate::error_handling::InitializationError;

/// Port explicit nameservers are queried on.
const DNS_PORT: u16 = 53;

/// Initializes the DNS resolver.
///
/// With no `nameservers`, the system configuration (`/etc/resolv.conf` or the
/// platform equivalent) is used; if it cannot be read the library defaults are
/// used instead. Explicit `nameservers` are queried over UDP/TCP port 53.
///
/// Every query is sent once, to one nameserver at a time: hickory's retry
/// attempts are disabled. The per-query timeout is left at the resolver
/// default unless `timeout_secs` is given.
///
/// # Errors
///
/// Returns `InitializationError::DnsResolverError` if no nameserver is usable.
pub fn init_resolver(
    nameservers: &[IpAddr],
    timeout_secs: Option<u64>,
) -> Result<TokioAsyncResolver, InitializationError> {
    let (config, opts) = if nameservers.is_empty() {
        match hickory_resolver::system_conf::read_system_conf() {
            Ok(system) if !system.0.name_servers().is_empty() => system,
            Ok(_) => {
                log::warn!("System DNS configuration lists no nameservers, using library defaults");
                (ResolverConfig::default(), ResolverOpts::default())
            }
            Err(e) => {
                log::warn!("Could not read system DNS configuration ({e}), using library defaults");
                (ResolverConfig::default(), ResolverOpts::default())
            }
        }
    } else {
        (
            explicit_config(nameservers, DNS_PORT),
            ResolverOpts::default(),
        )
    };

    if config.name_servers().is_empty() {
        return Err(InitializationError::DnsResolverError(
            "no nameservers configured".to_string(),
        ));
    }

    let opts = single_attempt_opts(opts, timeout_secs);
    log::debug!(
        "DNS resolver using {} nameserver(s), timeout {:?}",
        config.name_servers().len(),
        opts.timeout
    );

    Ok(TokioAsyncResolver::tokio(config, opts))
}

fn explicit_config(nameservers: &[IpAddr], port: u16) -> ResolverConfig {
    let group = NameServerConfigGroup::from_ips_clear(nameservers, port, true);
    ResolverConfig::from_parts(None, Vec::new(), group)
}

/// Applies the query policy on top of `base` (system or library options).
fn single_attempt_opts(mut base: ResolverOpts, timeout_secs: Option<u64>) -> ResolverOpts {
    // `attempts` counts retries after the first send
    base.attempts = 0;
    base.num_concurrent_reqs = 1;
    if let Some(secs) = timeout_secs {
        base.timeout = Duration::from_secs(secs);
    }
    base
}

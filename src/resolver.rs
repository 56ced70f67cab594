use crate::record::{record_text, LookupOutcome, RecordKind};
use crate::Result;
use regex::Regex;
use std::future::Future;
use std::net::IpAddr;
use std::time::Duration;
use tracing::{debug, warn};
use trust_dns_proto::rr::{Name, RData, RecordType};
use trust_dns_resolver::{
    config::NameServerConfigGroup, config::ResolverConfig, config::ResolverOpts,
    error::ResolveError, system_conf, TokioAsyncResolver,
};

// Default per-query timeout, in seconds.
const DEFAULT_TIMEOUT: u64 = 5;

/// Anything that can answer a single DNS query.
pub trait Resolve {
    fn query(
        &self,
        name: &str,
        kind: RecordKind,
    ) -> impl Future<Output = std::result::Result<Vec<RData>, ResolveError>>;
}

/// The `Resolver` struct stores the nameserver configuration used for the whole run. It is
/// configured once up front and then turned into a `DnsResolver` with `build`.
#[derive(Debug, Clone)]
pub struct Resolver {
    config: ResolverConfig,
    options: ResolverOpts,
}

impl Resolver {
    /// Uses the nameservers of the host system (`/etc/resolv.conf` on unix).
    pub fn system() -> Result<Self> {
        let (config, options) = system_conf::read_system_conf()?;
        Ok(Self::from_parts(config, options))
    }

    /// Uses only the given nameservers, over udp and tcp on port 53.
    pub fn with_nameservers(ips: &[IpAddr]) -> Self {
        let group = NameServerConfigGroup::from_ips_clear(ips, 53, true);
        let config = ResolverConfig::from_parts(None, vec![], group);
        Self::from_parts(config, ResolverOpts::default())
    }

    fn from_parts(config: ResolverConfig, mut options: ResolverOpts) -> Self {
        // one query per lookup and nothing remembered between lookups
        options.attempts = 1;
        options.cache_size = 0;
        options.timeout = Duration::from_secs(DEFAULT_TIMEOUT);
        Self { config, options }
    }

    /// Builder method that sets the timeout for each query. Defaults to 5 seconds
    pub fn timeout(mut self, timeout: u64) -> Self {
        self.options.timeout = Duration::from_secs(timeout);
        self
    }

    /// The distinct nameserver addresses queries will be sent to.
    pub fn nameservers(&self) -> Vec<IpAddr> {
        let mut ips: Vec<IpAddr> = Vec::new();
        for ns in self.config.name_servers() {
            let ip = ns.socket_addr.ip();
            if !ips.contains(&ip) {
                ips.push(ip);
            }
        }
        ips
    }

    pub fn build(self) -> DnsResolver {
        DnsResolver {
            inner: TokioAsyncResolver::tokio(self.config, self.options),
        }
    }
}

/// A `Resolve` implementation backed by trust-dns.
pub struct DnsResolver {
    inner: TokioAsyncResolver,
}

impl Resolve for DnsResolver {
    async fn query(
        &self,
        name: &str,
        kind: RecordKind,
    ) -> std::result::Result<Vec<RData>, ResolveError> {
        let record_type = RecordType::from(kind);
        let response = self.inner.lookup(name, record_type).await?;
        // drop the CNAME chain that led to the answer
        Ok(response
            .iter()
            .filter(|rdata| rdata.record_type() == record_type)
            .cloned()
            .collect())
    }
}

/// Issues exactly one query and shapes the answer into report values. When a pattern is given
/// only values it matches from their first character are kept. Any failure, including a name that
/// cannot be queried at all, comes back as `LookupOutcome::Failed`.
pub async fn lookup<R: Resolve>(
    resolver: &R,
    name: &str,
    kind: RecordKind,
    pattern: Option<&Regex>,
) -> LookupOutcome {
    debug!("querying {} {}", kind, name);
    match resolver.query(name, kind).await {
        Ok(records) => {
            let values = records
                .iter()
                .map(record_text)
                .filter(|text| pattern.map_or(true, |p| matches_at_start(p, text)))
                .collect::<Vec<_>>();
            debug!("got {} {} values for {}", values.len(), kind, name);
            LookupOutcome::Records(values)
        }
        Err(e) => {
            warn!("{} lookup for {} failed: {}", kind, name, e);
            LookupOutcome::Failed(e.to_string())
        }
    }
}

/// PTR lookup for an address literal. The query goes to the reverse zone name of `host`.
pub async fn lookup_reverse<R: Resolve>(resolver: &R, host: &str) -> LookupOutcome {
    match reverse_name(host) {
        Ok(name) => lookup(resolver, &name.to_utf8(), RecordKind::Ptr, None).await,
        Err(reason) => {
            warn!("skipping reverse lookup: {}", reason);
            LookupOutcome::Failed(reason)
        }
    }
}

/// Maps an ip literal to its `in-addr.arpa.` / `ip6.arpa.` name.
pub fn reverse_name(host: &str) -> std::result::Result<Name, String> {
    let ip: IpAddr = host
        .parse()
        .map_err(|e| format!("'{}' is not a valid IP address: {}", host, e))?;
    let mut name = Name::from(ip);
    name.set_fqdn(true);
    Ok(name)
}

fn matches_at_start(pattern: &Regex, text: &str) -> bool {
    pattern.find(text).map_or(false, |m| m.start() == 0)
}

//! Host facts: user, host name, address, running programs
//!
//! Every lookup fails soft. Callers only ever see a value or a placeholder,
//! except `resolved_address`, whose failure decides which placeholder shows.

use std::collections::HashSet;
use std::net::{IpAddr, ToSocketAddrs};

use sysinfo::{ProcessRefreshKind, RefreshKind, System};

use crate::error::ObserverError;

pub const UNKNOWN_USER: &str = "<unknown>";
pub const UNKNOWN_HOST: &str = "<unknown host>";
pub const PROCESS_LIST_UNAVAILABLE: &str = "(process list unavailable)";

/// Recording, streaming and conferencing tools (matched case-insensitively
/// as substrings of process names)
pub const MONITORING_TOOLS: &[&str] = &[
    "obs64.exe",
    "obs32.exe",
    "streamlabs obs.exe",
    "xsplit.exe",
    "zoom.exe",
    "teams.exe",
    "obs-studio",
    "simplescreenrecorder",
    "zoom.us",
];

/// True if any name contains a known monitoring tool
pub fn is_monitoring_tool_active<S: AsRef<str>>(names: &[S]) -> bool {
    names.iter().any(|name| {
        let name = name.as_ref().to_lowercase();
        MONITORING_TOOLS.iter().any(|tool| name.contains(tool))
    })
}

/// Source of host facts woven into the narrative
pub trait SystemObserver {
    fn current_user(&self) -> String;

    fn host_identity(&self) -> String;

    fn resolved_address(&self, host: &str) -> Result<String, ObserverError>;

    /// Up to `limit` distinct process names in enumeration order
    fn running_process_names(&self, limit: usize) -> Vec<String>;

    fn is_monitoring_tool_active(&self, names: &[String]) -> bool {
        is_monitoring_tool_active(names)
    }
}

/// Observer backed by the real host
#[derive(Debug, Default)]
pub struct HostObserver;

impl HostObserver {
    pub fn new() -> Self {
        Self
    }
}

impl SystemObserver for HostObserver {
    fn current_user(&self) -> String {
        ["USER", "USERNAME", "LOGNAME"]
            .iter()
            .find_map(|key| std::env::var(key).ok().filter(|v| !v.trim().is_empty()))
            .unwrap_or_else(|| {
                log::info!("No user name in the environment");
                UNKNOWN_USER.to_string()
            })
    }

    fn host_identity(&self) -> String {
        System::host_name()
            .filter(|h| !h.trim().is_empty())
            .unwrap_or_else(|| {
                log::info!("Host name unavailable");
                UNKNOWN_HOST.to_string()
            })
    }

    fn resolved_address(&self, host: &str) -> Result<String, ObserverError> {
        let unresolvable = || ObserverError::AddressUnresolvable {
            host: host.to_string(),
        };
        let addrs: Vec<IpAddr> = (host, 0)
            .to_socket_addrs()
            .map_err(|_| unresolvable())?
            .map(|a| a.ip())
            .collect();
        // Prefer IPv4, as a dotted quad reads better on screen
        addrs
            .iter()
            .find(|ip| ip.is_ipv4())
            .or_else(|| addrs.first())
            .map(IpAddr::to_string)
            .ok_or_else(unresolvable)
    }

    fn running_process_names(&self, limit: usize) -> Vec<String> {
        let sys = System::new_with_specifics(
            RefreshKind::nothing().with_processes(ProcessRefreshKind::nothing()),
        );
        let mut procs: Vec<_> = sys.processes().iter().collect();
        procs.sort_by_key(|(pid, _)| **pid);
        let names = procs
            .into_iter()
            .map(|(_, p)| p.name().to_string_lossy().into_owned())
            .filter(|n| !n.is_empty());
        let listed = dedup_limited(names, limit);
        if listed.is_empty() {
            log::info!("Process enumeration returned nothing");
            return vec![PROCESS_LIST_UNAVAILABLE.to_string()];
        }
        listed
    }
}

/// Keep the first occurrence of each name, stopping at `limit`
pub fn dedup_limited<I: IntoIterator<Item = String>>(names: I, limit: usize) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut out = Vec::new();
    for name in names {
        if out.len() >= limit {
            break;
        }
        if seen.insert(name.clone()) {
            out.push(name);
        }
    }
    out
}

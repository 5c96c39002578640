//! Narrative text woven from host facts
//!
//! Built once per session. When a monitoring or recording tool is running,
//! the host name and address are replaced before they reach any line, and
//! the address is never looked up at all.

use chrono::{DateTime, Datelike, Local};
use serde::{Deserialize, Serialize};

use crate::consts::{HUD_PROCESSES, MAX_LISTED_PROCESSES};
use crate::platform::SystemObserver;

/// Placeholder for host identity and address while being watched
pub const REDACTED: &str = "[hidden]";
/// Shown when the host name does not resolve
pub const ADDRESS_UNAVAILABLE: &str = "(ip unavailable)";

/// Everything the narrative needs, already resolved or replaced
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NarrativeText {
    pub user: String,
    pub shown_host: String,
    pub shown_address: String,
    /// Listed process names, deduplicated, in enumeration order
    pub processes: Vec<String>,
    pub redacted: bool,
    /// Local wall time when the session began, `HH:MM:SS`
    pub clock: String,
    pub year: i32,
    lines: Vec<String>,
}

impl NarrativeText {
    /// Gather facts from `observer` and build the session narrative
    pub fn gather(observer: &dyn SystemObserver, now: DateTime<Local>) -> Self {
        let user = observer.current_user();
        let host = observer.host_identity();
        let running = observer.running_process_names(usize::MAX);
        let redacted = observer.is_monitoring_tool_active(&running);

        let (shown_host, shown_address) = if redacted {
            log::info!("Monitoring tool detected; host identity redacted");
            (REDACTED.to_string(), REDACTED.to_string())
        } else {
            let address = match observer.resolved_address(&host) {
                Ok(addr) => addr,
                Err(e) => {
                    log::info!("{e}; showing placeholder");
                    ADDRESS_UNAVAILABLE.to_string()
                }
            };
            (host, address)
        };

        let processes = running.into_iter().take(MAX_LISTED_PROCESSES).collect();
        Self::new(
            user,
            shown_host,
            shown_address,
            processes,
            redacted,
            now.format("%H:%M:%S").to_string(),
            now.year(),
        )
    }

    pub fn new(
        user: String,
        shown_host: String,
        shown_address: String,
        processes: Vec<String>,
        redacted: bool,
        clock: String,
        year: i32,
    ) -> Self {
        let mut lines = vec![
            format!("Welcome, {user}."),
            format!("This is {shown_host}."),
            format!("IP: {shown_address}"),
            "I have been watching what you leave open:".to_string(),
        ];
        lines.extend(processes.iter().map(|p| format!(" - {p}")));
        lines.push(format!("It's {clock}. You shouldn't be here."));
        lines.push("Move your mouse to keep the light. Survive the night.".to_string());

        Self {
            user,
            shown_host,
            shown_address,
            processes,
            redacted,
            clock,
            year,
            lines,
        }
    }

    /// Intro lines in display order
    pub fn intro_lines(&self) -> &[String] {
        &self.lines
    }

    /// Process names for the corner panel
    pub fn hud_processes(&self) -> &[String] {
        let n = self.processes.len().min(HUD_PROCESSES);
        &self.processes[..n]
    }

    /// The message typed out on death
    pub fn death_message(&self) -> String {
        format!(
            "I've been inside {} since {}. You left {} doors open, {}. Now you are in the dark with me.",
            self.shown_host,
            self.year,
            self.processes.len(),
            self.user
        )
    }

    /// Every string this narrative can put on screen
    pub fn corpus(&self) -> String {
        let mut all = self.lines.join("\n");
        all.push('\n');
        all.push_str(&self.death_message());
        for p in self.hud_processes() {
            all.push('\n');
            all.push_str(p);
        }
        all
    }
}

/// Produces the narrative for each new session
pub trait NarrativeSource {
    fn compose(&mut self) -> NarrativeText;
}

/// Fixed narrative (replays the same text on every restart)
impl NarrativeSource for NarrativeText {
    fn compose(&mut self) -> NarrativeText {
        self.clone()
    }
}

/// Re-gathers host facts and wall time for every session
pub struct LiveNarrative<O> {
    observer: O,
}

impl<O: SystemObserver> LiveNarrative<O> {
    pub fn new(observer: O) -> Self {
        Self { observer }
    }
}

impl<O: SystemObserver> NarrativeSource for LiveNarrative<O> {
    fn compose(&mut self) -> NarrativeText {
        NarrativeText::gather(&self.observer, Local::now())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ObserverError;
    use chrono::TimeZone;
    use std::cell::Cell;

    struct FakeObserver {
        processes: Vec<String>,
        address: Option<String>,
        lookups: Cell<u32>,
    }

    impl FakeObserver {
        fn new(processes: &[&str], address: Option<&str>) -> Self {
            Self {
                processes: processes.iter().map(|s| s.to_string()).collect(),
                address: address.map(str::to_string),
                lookups: Cell::new(0),
            }
        }
    }

    impl SystemObserver for FakeObserver {
        fn current_user(&self) -> String {
            "mara".to_string()
        }

        fn host_identity(&self) -> String {
            "cellar-box".to_string()
        }

        fn resolved_address(&self, host: &str) -> Result<String, ObserverError> {
            self.lookups.set(self.lookups.get() + 1);
            self.address
                .clone()
                .ok_or_else(|| ObserverError::AddressUnresolvable {
                    host: host.to_string(),
                })
        }

        fn running_process_names(&self, limit: usize) -> Vec<String> {
            self.processes.iter().take(limit).cloned().collect()
        }
    }

    fn at() -> DateTime<Local> {
        Local.with_ymd_and_hms(2026, 10, 16, 23, 4, 5).unwrap()
    }

    #[test]
    fn test_intro_lines_in_order() {
        let obs = FakeObserver::new(&["bash", "vim"], Some("10.0.0.7"));
        let text = NarrativeText::gather(&obs, at());
        assert_eq!(
            text.intro_lines(),
            &[
                "Welcome, mara.",
                "This is cellar-box.",
                "IP: 10.0.0.7",
                "I have been watching what you leave open:",
                " - bash",
                " - vim",
                "It's 23:04:05. You shouldn't be here.",
                "Move your mouse to keep the light. Survive the night.",
            ]
        );
        assert!(!text.redacted);
    }

    #[test]
    fn test_death_message() {
        let obs = FakeObserver::new(&["bash", "vim", "zsh"], Some("10.0.0.7"));
        let text = NarrativeText::gather(&obs, at());
        assert_eq!(
            text.death_message(),
            "I've been inside cellar-box since 2026. You left 3 doors open, mara. Now you are in the dark with me."
        );
    }

    #[test]
    fn test_redaction_hides_host_and_address() {
        let obs = FakeObserver::new(&["explorer.exe", "OBS64.EXE"], Some("10.1.2.3"));
        let text = NarrativeText::gather(&obs, at());
        let corpus = text.corpus();
        assert!(text.redacted);
        assert!(corpus.contains(REDACTED));
        assert!(!corpus.contains("10.1.2.3"));
        assert!(!corpus.contains("cellar-box"));
        assert_eq!(obs.lookups.get(), 0, "address must not be resolved");
    }

    #[test]
    fn test_unresolvable_address_placeholder() {
        let obs = FakeObserver::new(&["bash"], None);
        let text = NarrativeText::gather(&obs, at());
        assert_eq!(text.shown_address, ADDRESS_UNAVAILABLE);
        assert_eq!(text.shown_host, "cellar-box");
    }

    #[test]
    fn test_monitoring_tool_past_listing_limit_still_redacts() {
        let mut names: Vec<String> = (0..20).map(|i| format!("proc{i}")).collect();
        names.push("zoom.exe".to_string());
        let refs: Vec<&str> = names.iter().map(String::as_str).collect();
        let obs = FakeObserver::new(&refs, Some("10.1.2.3"));
        let text = NarrativeText::gather(&obs, at());
        assert!(text.redacted);
        assert_eq!(text.processes.len(), MAX_LISTED_PROCESSES);
        assert_eq!(text.hud_processes().len(), HUD_PROCESSES);
    }
}

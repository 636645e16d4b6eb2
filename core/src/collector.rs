//! # Discovery Collector
//!
//! Builds a printer [`Inventory`] from the local network: one `ippfind`
//! pass for the candidate URIs, then per printer a `ping` to resolve the
//! address and a status-page scrape for a display label.
//!
//! Every step is strictly sequential. A failure on one printer is logged
//! and never aborts the remaining printers: a failed IP resolution drops
//! that printer from the inventory, a failed label scrape only leaves its
//! desired name blank (the compiler later falls back to the hostname
//! label).

use std::net::Ipv4Addr;
use std::path::Path;

use tracing::{info, warn};

use lpfleet_common::extract;
use lpfleet_common::inventory::{DriverMode, Inventory, PrinterRecord};

use crate::runner::CommandRunner;

pub struct Collector {
    runner: Box<dyn CommandRunner>,
}

impl Collector {
    pub fn new(runner: Box<dyn CommandRunner>) -> Self {
        Self { runner }
    }

    /// Queries the network once and returns the resolved records, all
    /// tagged with the driver-less `Everywhere` mode. An empty or failed
    /// discovery pass yields an empty inventory; the caller decides
    /// whether that aborts the run.
    pub fn discover(&self) -> anyhow::Result<Inventory> {
        let mut inventory = Inventory::new();

        let Some(uris) = self.run_checked("ippfind", &[]) else {
            return Ok(inventory);
        };

        for line in uris.lines().filter(|l| !l.trim().is_empty()) {
            let Some(hostname) = extract::hostname_from_uri(line) else {
                warn!("could not extract a hostname from '{line}'");
                continue;
            };
            let Some(ip) = self.resolve_ip(hostname) else {
                warn!("failed to get IP for printer: {hostname}");
                continue;
            };
            let desired_name = self.scrape_label(ip).unwrap_or_default();
            info!("printer: {hostname}, label: '{desired_name}', ip: {ip}");

            inventory.push(PrinterRecord {
                desired_name,
                hostname: hostname.to_string(),
                ip,
                mode: DriverMode::Everywhere,
            });
        }

        Ok(inventory)
    }

    /// Discovery front-end: writes the resolved inventory to `path`.
    /// Nothing is written when discovery came back empty.
    pub fn discover_to_csv(&self, path: &Path) -> anyhow::Result<Inventory> {
        let inventory = self.discover()?;
        if !inventory.is_empty() {
            inventory.write_csv(path)?;
            info!("wrote {} printer(s) to '{}'", inventory.len(), path.display());
        }
        Ok(inventory)
    }

    /// One ping, one address. `None` when the host does not resolve or
    /// the output carries no parenthesized IPv4 address.
    fn resolve_ip(&self, hostname: &str) -> Option<Ipv4Addr> {
        let output = self.run_checked("ping", &["-c", "1", hostname])?;
        extract::ip_from_ping(&output)
    }

    /// Fetches the printer's embedded status page and pulls a label out
    /// of it. Any failure along the way is a `None`.
    fn scrape_label(&self, ip: Ipv4Addr) -> Option<String> {
        let page = self.run_checked("curl", &["--silent", &ip.to_string()])?;
        extract::label_from_status_page(&page)
    }

    /// Runs one collaborator; `Some(stdout)` on success, otherwise the
    /// captured error stream is reported and the call site skips.
    fn run_checked(&self, program: &str, args: &[&str]) -> Option<String> {
        match self.runner.run(program, args) {
            Ok(exec) if exec.success => Some(exec.stdout),
            Ok(exec) => {
                warn!("'{program}' failed: {}", exec.stderr.trim());
                None
            }
            Err(err) => {
                warn!("could not run '{program}': {err}");
                None
            }
        }
    }
}

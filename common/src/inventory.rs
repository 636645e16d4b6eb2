//! # Printer Inventory Model
//!
//! The tabular record of discovered (or hand-declared) printers that the
//! install-script compiler consumes.
//!
//! On disk an inventory is a UTF-8 CSV with the fixed header
//! `Desired_Name,Hostname,IP,Everywhere-Driver`, one data row per printer.
//! Row order is significant: each row maps 1:1, in order, to an install
//! block in the generated script.

use std::fs::File;
use std::io::{self, Read, Write};
use std::net::Ipv4Addr;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::warn;

pub const CSV_HEADER: [&str; 4] = ["Desired_Name", "Hostname", "IP", "Everywhere-Driver"];

#[derive(Debug, Error)]
pub enum InventoryError {
    /// The inventory file could not be opened. Fatal: script generation
    /// must not touch the output file when the input is missing.
    #[error("cannot open inventory file '{path}': {source}")]
    Missing {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed reading inventory: {0}")]
    Csv(#[from] csv::Error),
}

/// How a printer gets registered with the print spooler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverMode {
    /// Driver-less registration relying on the client's generic IPP
    /// support (`lpadmin -m everywhere`).
    Everywhere,
    /// Fetch a device-specific PPD first, then register against it.
    Explicit,
}

impl DriverMode {
    /// Parses the `Everywhere-Driver` CSV field. Only a case-insensitive
    /// `yes` selects the driver-less path; every other value (including
    /// empty) selects the explicit-driver path.
    pub fn from_field(field: &str) -> Self {
        if field.eq_ignore_ascii_case("yes") {
            DriverMode::Everywhere
        } else {
            DriverMode::Explicit
        }
    }

    pub fn as_field(&self) -> &'static str {
        match self {
            DriverMode::Everywhere => "yes",
            DriverMode::Explicit => "no",
        }
    }
}

/// One row of the inventory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrinterRecord {
    /// Display name for the queue. May be empty; [`Self::effective_name`]
    /// falls back to the hostname's leading label.
    pub desired_name: String,
    pub hostname: String,
    pub ip: Ipv4Addr,
    pub mode: DriverMode,
}

impl PrinterRecord {
    /// The name the printer is registered under: `desired_name` when set,
    /// otherwise the substring of `hostname` before the first `.`.
    pub fn effective_name(&self) -> &str {
        if self.desired_name.is_empty() {
            self.hostname
                .split('.')
                .next()
                .unwrap_or(self.hostname.as_str())
        } else {
            &self.desired_name
        }
    }
}

/// An ordered sequence of [`PrinterRecord`]s.
#[derive(Debug, Default, Clone)]
pub struct Inventory {
    pub records: Vec<PrinterRecord>,
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, record: PrinterRecord) {
        self.records.push(record);
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Loads an inventory from a CSV file.
    ///
    /// A missing file is fatal. Malformed rows (fewer than four fields,
    /// empty hostname, unparsable IP) are skipped with a warning so that
    /// one bad hand-edited line cannot sink a whole fleet install.
    pub fn read_csv(path: &Path) -> Result<Self, InventoryError> {
        let file = File::open(path).map_err(|source| InventoryError::Missing {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, InventoryError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .flexible(true)
            .from_reader(reader);

        let mut inventory = Inventory::new();
        for row in csv_reader.records() {
            let row = row?;
            let line = row.position().map(|p| p.line()).unwrap_or_default();

            if row.len() < 4 {
                warn!("skipping row at line {line}: expected 4 fields, found {}", row.len());
                continue;
            }

            let desired_name = row[0].trim().to_string();
            let hostname = row[1].trim().to_string();
            let ip_field = row[2].trim();
            let mode = DriverMode::from_field(row[3].trim());

            if hostname.is_empty() {
                warn!("skipping row at line {line}: empty hostname");
                continue;
            }
            let ip: Ipv4Addr = match ip_field.parse() {
                Ok(ip) => ip,
                Err(_) => {
                    warn!("skipping row at line {line}: '{ip_field}' is not an IPv4 address");
                    continue;
                }
            };

            inventory.push(PrinterRecord {
                desired_name,
                hostname,
                ip,
                mode,
            });
        }

        Ok(inventory)
    }

    /// Writes the inventory, header first, preserving record order.
    pub fn write_csv(&self, path: &Path) -> Result<(), InventoryError> {
        let mut writer = csv::Writer::from_path(path)?;
        self.write_records(&mut writer)
    }

    pub fn write_to<W: Write>(&self, writer: W) -> Result<(), InventoryError> {
        let mut writer = csv::Writer::from_writer(writer);
        self.write_records(&mut writer)
    }

    fn write_records<W: Write>(&self, writer: &mut csv::Writer<W>) -> Result<(), InventoryError> {
        writer.write_record(CSV_HEADER)?;
        for record in &self.records {
            writer.write_record([
                record.desired_name.as_str(),
                record.hostname.as_str(),
                &record.ip.to_string(),
                record.mode.as_field(),
            ])?;
        }
        writer.flush().map_err(csv::Error::from)?;
        Ok(())
    }
}

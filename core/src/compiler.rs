//! # Install-Script Compiler
//!
//! Deterministically translates an [`Inventory`] into a shell script that
//! registers each printer with the macOS print spooler via `lpadmin`.
//!
//! The translation is a pure function of the inventory: one block per
//! record, in record order, no timestamps. Each record carries an explicit
//! 1-based ordinal that names its candidate PPD path — the ordinal
//! advances for every row whether or not that row's block references the
//! file, so renumbering never depends on how the other rows are flagged.

use std::fs;
use std::path::Path;

use anyhow::Context;
use tracing::info;

use lpfleet_common::inventory::{DriverMode, Inventory, PrinterRecord};

const INTERPRETER: &str = "#!/bin/bash\n";

/// Run once before any per-printer command: lets every console user
/// administer print queues, which `lpadmin` needs on a stock macOS image.
const ADMIN_GROUP_GRANT: &str =
    "sudo /usr/sbin/dseditgroup -o edit -a everyone -t group lpadmin\n\n";

/// Commented-out convenience for wrapping the script into a disk image.
/// Not meant to execute.
const PACKAGING_HINT: &str = "# hdiutil create -volname Printers_Installer.app/ -srcfolder ~/Desktop/Printers_Installer.app  -ov -format UDZO \"Printers_Installer.dmg\"";

/// Renders the whole install script.
pub fn compile(inventory: &Inventory) -> String {
    let mut script = String::new();
    script.push_str(INTERPRETER);
    script.push_str(ADMIN_GROUP_GRANT);
    for (index, record) in inventory.records.iter().enumerate() {
        script.push_str(&compile_block(record, index + 1));
    }
    script.push_str(PACKAGING_HINT);
    script
}

/// Renders one record's install block. `ordinal` is the record's 1-based
/// position in the inventory.
///
/// The driver-less path registers in one command against the generic IPP
/// "everywhere" model; the explicit path first asks `ipp2ppd` for a
/// device-specific PPD and then registers against that file. Sharing is
/// disabled either way and the effective name doubles as description
/// (`-D`) respectively location (`-L`).
pub fn compile_block(record: &PrinterRecord, ordinal: usize) -> String {
    let name = record.effective_name();
    let ip = record.ip;
    match record.mode {
        DriverMode::Everywhere => format!(
            "lpadmin -p \"{name}\" -D \"{name}\" -o printer-is-shared=false -v lpd://{ip}:631/ipp/print -m everywhere\n\n"
        ),
        DriverMode::Explicit => {
            let ppd = ppd_path(ordinal);
            format!(
                "/System/Library/Printers/Libraries/ipp2ppd ipp://{ip}:631/ipp/print \"\" > {ppd}\n\
                 lpadmin -p \"{name}\" -L \"{name}\" -o printer-is-shared=false -v {ip} -P {ppd}\n\n"
            )
        }
    }
}

fn ppd_path(ordinal: usize) -> String {
    format!("/private/tmp/printer_driver_{ordinal:02}.ppd")
}

/// File front-end: reads the inventory CSV and writes the script.
///
/// The inventory is read in full before the output path is touched, so a
/// missing input file never creates or clobbers an existing script. The
/// script is written non-executable and never executed by this tool.
pub fn compile_to_file(csv_path: &Path, script_path: &Path) -> anyhow::Result<()> {
    let inventory = Inventory::read_csv(csv_path)?;
    let script = compile(&inventory);
    fs::write(script_path, script)
        .with_context(|| format!("failed writing script '{}'", script_path.display()))?;
    info!("script '{}' generated successfully", script_path.display());
    Ok(())
}

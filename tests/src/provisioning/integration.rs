#![cfg(test)]
use std::collections::HashMap;
use std::net::Ipv4Addr;

use lpfleet_common::inventory::{DriverMode, Inventory};
use lpfleet_core::collector::Collector;
use lpfleet_core::compiler;
use lpfleet_core::runner::{CommandRunner, Exec};

/// Scripted stand-in for the external collaborators. Keyed by the full
/// invocation line (`program` plus arguments); anything not scripted
/// comes back as a failed command, which the collector must tolerate.
struct FakeRunner {
    responses: HashMap<String, Exec>,
}

impl FakeRunner {
    fn new() -> Self {
        Self {
            responses: HashMap::new(),
        }
    }

    fn on(mut self, invocation: &str, stdout: &str) -> Self {
        self.responses.insert(
            invocation.to_string(),
            Exec {
                stdout: stdout.to_string(),
                stderr: String::new(),
                success: true,
            },
        );
        self
    }

    fn failing(mut self, invocation: &str, stderr: &str) -> Self {
        self.responses.insert(
            invocation.to_string(),
            Exec {
                stdout: String::new(),
                stderr: stderr.to_string(),
                success: false,
            },
        );
        self
    }
}

impl CommandRunner for FakeRunner {
    fn run(&self, program: &str, args: &[&str]) -> anyhow::Result<Exec> {
        let invocation = std::iter::once(program)
            .chain(args.iter().copied())
            .collect::<Vec<_>>()
            .join(" ");
        Ok(self
            .responses
            .get(&invocation)
            .cloned()
            .unwrap_or_else(|| Exec {
                stdout: String::new(),
                stderr: format!("{invocation}: not scripted"),
                success: false,
            }))
    }
}

#[test]
fn discovery_builds_inventory_in_order() {
    let runner = FakeRunner::new()
        .on(
            "ippfind",
            "ipp://printer1.local:631/ipp/print\nipp://printer2.local:631/ipp/print\n",
        )
        .on(
            "ping -c 1 printer1.local",
            "PING printer1.local (10.0.0.5): 56 data bytes",
        )
        .on(
            "ping -c 1 printer2.local",
            "PING printer2.local (10.0.0.9): 56 data bytes",
        )
        .on(
            "curl --silent 10.0.0.5",
            "<div id=\"userId\">Front&nbsp;Office&nbsp;&nbsp;&nbsp;filler</div>",
        )
        .failing("curl --silent 10.0.0.9", "connection refused");

    let collector = Collector::new(Box::new(runner));
    let inventory = collector.discover().unwrap();

    assert_eq!(inventory.len(), 2);

    // Label scraped for the first printer, blank for the one whose
    // status page was unreachable.
    assert_eq!(inventory.records[0].desired_name, "Front_Office");
    assert_eq!(inventory.records[0].hostname, "printer1.local");
    assert_eq!(inventory.records[0].ip, Ipv4Addr::new(10, 0, 0, 5));
    assert_eq!(inventory.records[1].desired_name, "");
    assert_eq!(inventory.records[1].hostname, "printer2.local");

    // Discovery always tags the driver-less path.
    assert!(
        inventory
            .records
            .iter()
            .all(|r| r.mode == DriverMode::Everywhere)
    );
}

#[test]
fn failed_ip_resolution_excludes_the_printer() {
    let runner = FakeRunner::new()
        .on(
            "ippfind",
            "ipp://ghost.local:631/ipp/print\nipp://printer2.local:631/ipp/print\n",
        )
        .failing("ping -c 1 ghost.local", "cannot resolve ghost.local")
        .on(
            "ping -c 1 printer2.local",
            "PING printer2.local (10.0.0.9): 56 data bytes",
        )
        .failing("curl --silent 10.0.0.9", "connection refused");

    let collector = Collector::new(Box::new(runner));
    let inventory = collector.discover().unwrap();

    assert_eq!(inventory.len(), 1);
    assert_eq!(inventory.records[0].hostname, "printer2.local");
}

#[test]
fn failed_discovery_yields_empty_inventory() {
    let runner = FakeRunner::new().failing("ippfind", "ippfind: command not found");
    let collector = Collector::new(Box::new(runner));

    let inventory = collector.discover().unwrap();
    assert!(inventory.is_empty());
}

#[test]
fn discover_to_csv_round_trips() {
    let dir = tempfile::tempdir().unwrap();
    let csv_path = dir.path().join("printers.csv");

    let runner = FakeRunner::new()
        .on("ippfind", "ipp://printer1.local:631/ipp/print\n")
        .on(
            "ping -c 1 printer1.local",
            "PING printer1.local (10.0.0.5): 56 data bytes",
        )
        .failing("curl --silent 10.0.0.5", "connection refused");

    let collector = Collector::new(Box::new(runner));
    let inventory = collector.discover_to_csv(&csv_path).unwrap();
    assert_eq!(inventory.len(), 1);

    let reread = Inventory::read_csv(&csv_path).unwrap();
    assert_eq!(reread.records, inventory.records);
}

#[test]
fn empty_discovery_writes_no_csv() {
    let dir = tempfile::tempdir().unwrap();
    let csv_path = dir.path().join("printers.csv");

    let runner = FakeRunner::new().on("ippfind", "");
    let collector = Collector::new(Box::new(runner));
    let inventory = collector.discover_to_csv(&csv_path).unwrap();

    assert!(inventory.is_empty());
    assert!(!csv_path.exists());
}

#[test]
fn compile_to_file_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    let csv_path = dir.path().join("printers.csv");
    let script_path = dir.path().join("printers-installer.sh");

    std::fs::write(
        &csv_path,
        "Desired_Name,Hostname,IP,Everywhere-Driver\n\
         ,printer1.local,10.0.0.5,yes\n\
         LabPrinter,printer2.local,10.0.0.9,no\n",
    )
    .unwrap();

    compiler::compile_to_file(&csv_path, &script_path).unwrap();
    let script = std::fs::read_to_string(&script_path).unwrap();

    let expected = "#!/bin/bash\n\
        sudo /usr/sbin/dseditgroup -o edit -a everyone -t group lpadmin\n\
        \n\
        lpadmin -p \"printer1\" -D \"printer1\" -o printer-is-shared=false -v lpd://10.0.0.5:631/ipp/print -m everywhere\n\
        \n\
        /System/Library/Printers/Libraries/ipp2ppd ipp://10.0.0.9:631/ipp/print \"\" > /private/tmp/printer_driver_02.ppd\n\
        lpadmin -p \"LabPrinter\" -L \"LabPrinter\" -o printer-is-shared=false -v 10.0.0.9 -P /private/tmp/printer_driver_02.ppd\n\
        \n\
        # hdiutil create -volname Printers_Installer.app/ -srcfolder ~/Desktop/Printers_Installer.app  -ov -format UDZO \"Printers_Installer.dmg\"";
    assert_eq!(script, expected);

    // Recompiling an unchanged inventory is byte-identical.
    compiler::compile_to_file(&csv_path, &script_path).unwrap();
    assert_eq!(std::fs::read_to_string(&script_path).unwrap(), script);
}

#[test]
fn missing_inventory_leaves_output_untouched() {
    let dir = tempfile::tempdir().unwrap();
    let csv_path = dir.path().join("does-not-exist.csv");
    let script_path = dir.path().join("printers-installer.sh");

    let result = compiler::compile_to_file(&csv_path, &script_path);
    assert!(result.is_err());
    assert!(!script_path.exists());
}

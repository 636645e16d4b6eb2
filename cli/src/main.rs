mod commands;
mod terminal;

use anyhow::bail;
use commands::CommandLine;
use lpfleet_common::config::Config;
use lpfleet_core::collector::Collector;
use lpfleet_core::compiler;
use lpfleet_core::runner::SystemRunner;
use terminal::{logging, print, spinner};

fn main() -> anyhow::Result<()> {
    let commands = CommandLine::parse_args();

    logging::init();
    print::banner();

    let cfg = Config {
        script_path: commands.output,
        ..Config::default()
    };

    match commands.csv {
        Some(path) => {
            print::header("compiling inventory");
            compiler::compile_to_file(&path, &cfg.script_path)
        }
        None => {
            print::header("discovering printers");
            let spinner = spinner::get_spinner();
            spinner.set_message(String::from("querying the local network..."));

            let collector = Collector::new(Box::new(SystemRunner));
            let result = collector.discover_to_csv(&cfg.inventory_path);
            spinner.finish_and_clear();
            let inventory = result?;

            if inventory.is_empty() {
                bail!(
                    "discovery found no printers; refusing to compile a possibly stale '{}'",
                    cfg.inventory_path.display()
                );
            }

            print::header("compiling inventory");
            compiler::compile_to_file(&cfg.inventory_path, &cfg.script_path)
        }
    }
}

use std::path::PathBuf;

use clap::Parser;

#[derive(Parser)]
#[command(name = "lpfleet")]
#[command(about = "Discovers network printers and compiles an lpadmin install script.")]
pub struct CommandLine {
    /// Compile this inventory CSV directly and skip discovery.
    /// Passing the flag without a value compiles `printers.csv`.
    #[arg(long, value_name = "PATH", num_args = 0..=1, default_missing_value = "printers.csv")]
    pub csv: Option<PathBuf>,

    /// Where the generated install script is written.
    #[arg(long, value_name = "PATH", default_value = "printers-installer.sh")]
    pub output: PathBuf,
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

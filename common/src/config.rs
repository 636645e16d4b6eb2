use std::path::PathBuf;

pub struct Config {
    /// Where the collector writes the discovered inventory.
    ///
    /// The compiler reads the same file back when no explicit
    /// inventory path is given on the command line.
    pub inventory_path: PathBuf,
    /// Where the generated install script is written.
    pub script_path: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            inventory_path: PathBuf::from("printers.csv"),
            script_path: PathBuf::from("printers-installer.sh"),
        }
    }
}

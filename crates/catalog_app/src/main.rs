mod command;
mod config;
mod console;
mod effects;
mod render;

use std::path::Path;
use std::process;

use catalog_logging::catalog_error;

fn main() {
    let (config, warning) = config::load_config(Path::new(config::CONFIG_FILENAME));
    catalog_logging::initialize(config.log_destination());
    config::report_config(&config, warning);

    if let Err(err) = console::run(&config) {
        catalog_error!("dashboard stopped: {err:#}");
        eprintln!("error: {err:#}");
        process::exit(1);
    }
}

use std::path::Path;

use ls8::{Options, EXIT_USAGE};
use ls8_core::LoadError;

fn main() {
    env_logger::init();

    let options = match Options::parse(std::env::args().skip(1)) {
        Ok(options) => options,
        Err(message) => {
            eprintln!("{}\nUsage: ls8 <program.ls8> [--trace]", message);
            std::process::exit(EXIT_USAGE);
        }
    };

    let Some(path) = options.path else {
        eprintln!(
            "{}.\n\
             Please specify a program image, for example:\n\
             ls8 assets/programs/mult.ls8",
            LoadError::NoInputFile
        );
        std::process::exit(ls8::EXIT_LOAD);
    };

    log::info!("Loading program '{}'", path);
    if let Err(err) = ls8::run(Path::new(&path), options.trace) {
        eprintln!("{:#}", err);
        std::process::exit(ls8::exit_code(&err));
    }
}

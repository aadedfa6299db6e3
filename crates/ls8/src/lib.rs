use std::io::{self, Write};
use std::path::Path;

use anyhow::Result;
use ls8_core::{LoadError, Machine, MachineConfig, MachineError, Program};

/// Exit code for a bad command line.
pub const EXIT_USAGE: i32 = 2;
/// Exit code when the program image could not be loaded.
pub const EXIT_LOAD: i32 = 1;
/// Exit code when the machine stopped on a fatal error.
pub const EXIT_FAULT: i32 = 3;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Options {
    pub path: Option<String>,
    pub trace: bool,
}

impl Options {
    pub fn parse(args: impl IntoIterator<Item = String>) -> Result<Self, String> {
        let mut options = Options::default();
        for arg in args {
            if arg == "--trace" || arg == "-t" {
                options.trace = true;
            } else if arg.starts_with('-') {
                return Err(format!("Unknown option '{}'", arg));
            } else if options.path.is_some() {
                return Err(format!("Unexpected argument '{}'", arg));
            } else {
                options.path = Some(arg);
            }
        }
        Ok(options)
    }
}

/// Load the image at `path` and run it to completion, printing to stdout.
pub fn run(path: &Path, trace: bool) -> Result<u64> {
    let stdout = io::stdout();
    run_with_output(path, trace, stdout.lock())
}

pub fn run_with_output<W: Write>(path: &Path, trace: bool, output: W) -> Result<u64> {
    let program = Program::from_file(path)?;
    log::info!("Running '{}' ({} bytes)", path.display(), program.len());

    let config = MachineConfig::builder().trace(trace).build();
    let mut machine = Machine::with_program(config, &program, output);
    let steps = machine.run()?;
    log::info!("Halted after {} instructions", steps);
    Ok(steps)
}

/// Map a failure from [`run`] to a process exit code.
pub fn exit_code(err: &anyhow::Error) -> i32 {
    if err.downcast_ref::<LoadError>().is_some() {
        EXIT_LOAD
    } else if err.downcast_ref::<MachineError>().is_some() {
        EXIT_FAULT
    } else {
        1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn program_path(name: &str) -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .join("../../assets/programs")
            .join(name)
    }

    fn scratch_file(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("ls8-{}-{}", std::process::id(), name));
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn parse_options() {
        let args = ["prog.ls8", "--trace"].map(String::from);
        let options = Options::parse(args).unwrap();
        assert_eq!(options.path.as_deref(), Some("prog.ls8"));
        assert!(options.trace);

        assert_eq!(Options::parse(Vec::new()).unwrap(), Options::default());
        assert!(Options::parse(["--fast".to_string()]).is_err());
        assert!(Options::parse(["a".to_string(), "b".to_string()]).is_err());
    }

    #[test]
    fn runs_bundled_program() {
        let mut out = Vec::new();
        let steps = run_with_output(&program_path("mult.ls8"), false, &mut out).unwrap();
        assert_eq!(steps, 5);
        assert_eq!(out, b"72\n");
    }

    #[test]
    fn missing_file_maps_to_load_exit_code() {
        let err = run_with_output(Path::new("/no/such/program.ls8"), false, Vec::new()).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<LoadError>(),
            Some(LoadError::NotFound { .. })
        ));
        assert_eq!(exit_code(&err), EXIT_LOAD);
    }

    #[test]
    fn decode_error_maps_to_fault_exit_code() {
        let path = scratch_file("bad.ls8", "00000000 # not an instruction\n");
        let err = run_with_output(&path, false, Vec::new()).unwrap_err();
        std::fs::remove_file(&path).ok();
        assert!(matches!(
            err.downcast_ref::<MachineError>(),
            Some(MachineError::UnknownOpcode { opcode: 0, pc: 0 })
        ));
        assert_eq!(exit_code(&err), EXIT_FAULT);
    }
}

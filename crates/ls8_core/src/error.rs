use std::io;
use std::path::PathBuf;

/// Fatal conditions raised while the machine is executing.
#[derive(Debug, thiserror::Error)]
pub enum MachineError {
    /// Memory address outside `0..RAM_SIZE`.
    #[error("memory address {address:#04X} out of range")]
    AddressOutOfRange { address: usize },
    /// Register index outside `0..NUM_REGS`.
    #[error("register index {index} out of range")]
    RegisterOutOfRange { index: u8 },
    /// Instruction byte with no registered operation.
    #[error("unknown opcode {opcode:#010b} at {pc:#04X}")]
    UnknownOpcode { opcode: u8, pc: usize },
    /// ALU-classified instruction the ALU does not implement.
    #[error("unsupported ALU operation {opcode:#010b}")]
    UnsupportedAluOperation { opcode: u8 },
    /// Push with the stack pointer already at address 0.
    #[error("stack pointer underflow")]
    StackPointerUnderflow,
    /// Pop with the stack pointer at the top of memory.
    #[error("stack pointer overflow")]
    StackPointerOverflow,
    /// The stack grew down into the loaded program image.
    #[error("stack pointer {sp:#04X} ran into program image ending at {image_end:#04X}")]
    StackCollision { sp: u8, image_end: usize },
    /// Stepped after an earlier fatal error.
    #[error("machine faulted at {pc:#04X} and must be reloaded")]
    Faulted { pc: usize },
    /// Writing `PRN` output failed.
    #[error("failed to write output: {0}")]
    Output(#[from] io::Error),
}

/// Failures while reading a program image, before anything runs.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("no input file")]
    NoInputFile,
    #[error("file not found: {}", path.display())]
    NotFound { path: PathBuf },
    #[error("failed to read {}: {source}", path.display())]
    Io { path: PathBuf, source: io::Error },
    /// A line starting with `0` or `1` whose first 8 characters are not binary.
    #[error("line {line}: invalid binary literal '{text}'")]
    InvalidLiteral { line: usize, text: String },
    #[error("program has {len} bytes, memory holds 256")]
    TooLarge { len: usize },
}

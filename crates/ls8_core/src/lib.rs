pub mod config;
pub mod error;
pub mod loader;
pub mod machine;
pub mod memory;
pub mod opcode;
pub mod registers;

pub use config::MachineConfig;
pub use error::{LoadError, MachineError};
pub use loader::Program;
pub use machine::{Machine, MachineState, Trace};
pub use memory::Memory;
pub use opcode::{Header, Opcode};
pub use registers::Registers;

/// Total addressable memory in bytes.
pub const RAM_SIZE: usize = 256;
/// Number of general purpose registers, including the stack pointer.
pub const NUM_REGS: usize = 8;
/// Register reserved by convention as the stack pointer.
pub const SP: u8 = 7;
/// Initial value of the stack pointer.
pub const STACK_START: u8 = 0xF4;

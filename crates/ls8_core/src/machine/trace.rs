use std::fmt;

use super::Machine;
use crate::NUM_REGS;

/// Read-only snapshot of the machine for debugging.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Trace {
    pub pc: usize,
    /// The byte at `pc` and the two after it; `None` past the end of RAM.
    pub bytes: [Option<u8>; 3],
    pub registers: [u8; NUM_REGS],
    pub equal: bool,
}

impl fmt::Display for Trace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TRACE: {:02X} |", self.pc)?;
        for byte in self.bytes {
            match byte {
                Some(byte) => write!(f, " {:02X}", byte)?,
                None => write!(f, " --")?,
            }
        }
        write!(f, " |")?;
        for reg in self.registers {
            write!(f, " {:02X}", reg)?;
        }
        Ok(())
    }
}

impl<W> Machine<W> {
    pub fn trace(&self) -> Trace {
        let pc = self.pc;
        Trace {
            pc,
            bytes: [
                self.memory.get(pc),
                self.memory.get(pc + 1),
                self.memory.get(pc + 2),
            ],
            registers: *self.registers.as_array(),
            equal: self.equal,
        }
    }
}

use crate::error::MachineError;
use crate::{NUM_REGS, SP, STACK_START};

/// General purpose register file `R0`..`R7`.
///
/// `R7` doubles as the stack pointer but is otherwise an ordinary register,
/// so register-indexed instructions treat all eight the same way.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Registers {
    regs: [u8; NUM_REGS],
}

impl Default for Registers {
    fn default() -> Self {
        Self::with_stack_pointer(STACK_START)
    }
}

impl Registers {
    pub fn with_stack_pointer(sp: u8) -> Self {
        let mut regs = [0; NUM_REGS];
        regs[SP as usize] = sp;
        Self { regs }
    }

    pub fn get(&self, index: u8) -> Result<u8, MachineError> {
        self.regs
            .get(index as usize)
            .copied()
            .ok_or(MachineError::RegisterOutOfRange { index })
    }

    pub fn set(&mut self, index: u8, value: u8) -> Result<(), MachineError> {
        let reg = self
            .regs
            .get_mut(index as usize)
            .ok_or(MachineError::RegisterOutOfRange { index })?;
        *reg = value;
        Ok(())
    }

    #[inline]
    pub fn stack_pointer(&self) -> u8 {
        self.regs[SP as usize]
    }

    #[inline]
    pub(crate) fn set_stack_pointer(&mut self, value: u8) {
        self.regs[SP as usize] = value;
    }

    pub fn as_array(&self) -> &[u8; NUM_REGS] {
        &self.regs
    }
}

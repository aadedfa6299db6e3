use super::Machine;
use crate::error::MachineError;
use crate::opcode::AluOp;

impl<W> Machine<W> {
    /// Register-to-register arithmetic. Results wrap modulo 256.
    ///
    /// `CMP` only updates the equal flag.
    pub(super) fn alu(&mut self, op: AluOp, reg_a: u8, reg_b: u8) -> Result<(), MachineError> {
        let a = self.registers.get(reg_a)?;
        let b = self.registers.get(reg_b)?;

        match op {
            AluOp::Mul => self.registers.set(reg_a, a.wrapping_mul(b))?,
            AluOp::Add => self.registers.set(reg_a, a.wrapping_add(b))?,
            AluOp::Cmp => self.equal = a == b,
        }
        Ok(())
    }
}

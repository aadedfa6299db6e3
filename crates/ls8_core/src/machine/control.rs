use super::Machine;
use crate::error::MachineError;
use crate::opcode::Opcode;

impl<W> Machine<W> {
    /// Move the stack pointer down one slot and return the new top.
    fn grow_stack(&mut self) -> Result<u8, MachineError> {
        let sp = self
            .registers
            .stack_pointer()
            .checked_sub(1)
            .ok_or(MachineError::StackPointerUnderflow)?;
        if (sp as usize) < self.image_len {
            return Err(MachineError::StackCollision {
                sp,
                image_end: self.image_len,
            });
        }
        self.registers.set_stack_pointer(sp);
        Ok(sp)
    }

    fn shrink_stack(&mut self) -> Result<(), MachineError> {
        let sp = self
            .registers
            .stack_pointer()
            .checked_add(1)
            .ok_or(MachineError::StackPointerOverflow)?;
        self.registers.set_stack_pointer(sp);
        Ok(())
    }

    /// Byte at the stack pointer.
    ///
    /// An empty stack still yields whatever is in RAM there.
    fn top_of_stack(&self) -> Result<u8, MachineError> {
        let sp = self.registers.stack_pointer();
        if sp == u8::MAX {
            return Err(MachineError::StackPointerOverflow);
        }
        if sp >= self.config.stack_pointer {
            log::warn!("pop from empty stack at {:02X} returns stale memory", sp);
        }
        self.memory.read(sp as usize)
    }

    pub(super) fn push(&mut self, src: u8) -> Result<(), MachineError> {
        self.registers.get(src)?;
        let sp = self.grow_stack()?;
        // Read after the decrement: PUSH R7 stores the new stack pointer.
        let value = self.registers.get(src)?;
        self.memory.write(sp as usize, value)
    }

    pub(super) fn pop(&mut self, dst: u8) -> Result<(), MachineError> {
        let value = self.top_of_stack()?;
        self.registers.set(dst, value)?;
        self.shrink_stack()
    }

    pub(super) fn call(&mut self, target: u8) -> Result<(), MachineError> {
        let address = self.pc + 1 + Opcode::Call.operand_count();
        let return_address =
            u8::try_from(address).map_err(|_| MachineError::AddressOutOfRange { address })?;
        self.registers.get(target)?;

        let sp = self.grow_stack()?;
        self.memory.write(sp as usize, return_address)?;
        self.pc = self.registers.get(target)? as usize;
        Ok(())
    }

    pub(super) fn ret(&mut self) -> Result<(), MachineError> {
        let address = self.top_of_stack()?;
        self.shrink_stack()?;
        self.pc = address as usize;
        Ok(())
    }

    pub(super) fn jmp(&mut self, target: u8) -> Result<(), MachineError> {
        self.pc = self.registers.get(target)? as usize;
        Ok(())
    }

    pub(super) fn jeq(&mut self, target: u8) -> Result<(), MachineError> {
        self.jump_if(self.equal, target, Opcode::Jeq)
    }

    pub(super) fn jne(&mut self, target: u8) -> Result<(), MachineError> {
        self.jump_if(!self.equal, target, Opcode::Jne)
    }

    /// Conditional jumps own the program counter on both paths: when the
    /// branch is not taken they step over their own operand.
    fn jump_if(&mut self, condition: bool, target: u8, op: Opcode) -> Result<(), MachineError> {
        if condition {
            self.jmp(target)
        } else {
            self.pc += 1 + op.operand_count();
            Ok(())
        }
    }
}

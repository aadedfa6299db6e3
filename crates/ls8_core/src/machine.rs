mod alu;
mod control;
mod trace;

use std::io::{self, Write};

use crate::config::MachineConfig;
use crate::error::MachineError;
use crate::loader::Program;
use crate::memory::Memory;
use crate::opcode::{Header, Opcode};
use crate::registers::Registers;

pub use trace::Trace;

/// Run state of the dispatcher. `Halted` and `Faulted` are terminal until
/// the next load.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Default)]
pub enum MachineState {
    #[default]
    Running,
    Halted,
    /// Stopped by a fatal error.
    Faulted,
}

/// What the dispatcher does once an operation returns.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
enum Flow {
    Next,
    Halt,
}

/// An LS-8 machine: RAM, register file, program counter and the equal flag.
///
/// `PRN` output goes to `W`, which is stdout unless a sink is supplied with
/// [`Machine::with_output`].
pub struct Machine<W = io::Stdout> {
    /// program counter
    pc: usize,
    memory: Memory,
    registers: Registers,
    /// set by CMP, read by JEQ/JNE
    equal: bool,
    state: MachineState,
    config: MachineConfig,
    /// Length of the loaded image; the stack may not grow into it.
    image_len: usize,
    /// Instructions executed since the last reset.
    steps: u64,
    output: W,
}

impl Machine<io::Stdout> {
    pub fn new(config: MachineConfig) -> Self {
        Self::with_output(config, io::stdout())
    }
}

impl Default for Machine<io::Stdout> {
    fn default() -> Self {
        Self::new(MachineConfig::default())
    }
}

impl<W: Write> Machine<W> {
    pub fn with_output(config: MachineConfig, output: W) -> Self {
        Self {
            pc: 0,
            memory: Memory::new(),
            registers: Registers::with_stack_pointer(config.stack_pointer),
            equal: false,
            state: MachineState::Running,
            config,
            image_len: 0,
            steps: 0,
            output,
        }
    }

    /// Build a machine and load `program` in one go.
    pub fn with_program(config: MachineConfig, program: &Program, output: W) -> Self {
        let mut machine = Self::with_output(config, output);
        machine.load(program);
        machine
    }

    pub fn reset(&mut self) {
        self.pc = 0;
        self.memory = Memory::new();
        self.registers = Registers::with_stack_pointer(self.config.stack_pointer);
        self.equal = false;
        self.state = MachineState::Running;
        self.image_len = 0;
        self.steps = 0;
    }

    /// Reset the machine and copy `program` to address 0.
    pub fn load(&mut self, program: &Program) {
        self.reset();
        self.memory.load_image(program.as_bytes());
        self.image_len = program.len();
        log::debug!("loaded {} byte program image", self.image_len);
    }

    /// Execute instructions until `HLT`, returning how many ran.
    ///
    /// Any fatal condition stops the loop and is returned as is.
    pub fn run(&mut self) -> Result<u64, MachineError> {
        while self.step()? == MachineState::Running {}
        Ok(self.steps)
    }

    /// Fetch, decode and execute a single instruction.
    ///
    /// A fatal error leaves the machine `Faulted`; it stays that way until
    /// the next [`Machine::load`] or [`Machine::reset`].
    pub fn step(&mut self) -> Result<MachineState, MachineError> {
        match self.state {
            MachineState::Running => {}
            MachineState::Halted => return Ok(MachineState::Halted),
            MachineState::Faulted => return Err(MachineError::Faulted { pc: self.pc }),
        }
        if self.config.trace {
            log::info!("{}", self.trace());
        }

        match self.dispatch() {
            Ok(state) => Ok(state),
            Err(err) => {
                self.state = MachineState::Faulted;
                log::debug!("faulted at {:02X}: {}", self.pc, err);
                Err(err)
            }
        }
    }

    fn dispatch(&mut self) -> Result<MachineState, MachineError> {
        let pc = self.pc;
        let ir = self.memory.read(pc)?;
        let header = Header::decode(ir);
        let op = match Opcode::decode(ir) {
            Some(op) => op,
            None if header.is_alu() => {
                return Err(MachineError::UnsupportedAluOperation { opcode: ir })
            }
            None => return Err(MachineError::UnknownOpcode { opcode: ir, pc }),
        };
        let [operand_a, operand_b] = self.fetch_operands(pc, header.operand_count())?;
        log::trace!("{:02X}: {} {:02X} {:02X}", pc, op.mnemonic(), operand_a, operand_b);

        let flow = self.execute(op, operand_a, operand_b)?;

        if !header.sets_pc() {
            self.pc += 1 + header.operand_count();
        }
        self.steps += 1;

        if flow == Flow::Halt {
            self.state = MachineState::Halted;
            log::debug!("halted at {:02X} after {} instructions", pc, self.steps);
        }
        Ok(self.state)
    }

    /// Read the two bytes after the opcode.
    ///
    /// Only the operands the instruction consumes must lie inside RAM; an
    /// unused candidate past the end reads as zero.
    fn fetch_operands(&self, pc: usize, count: usize) -> Result<[u8; 2], MachineError> {
        let mut operands = [0; 2];
        for (offset, operand) in operands.iter_mut().enumerate() {
            let address = pc + 1 + offset;
            *operand = if offset < count {
                self.memory.read(address)?
            } else {
                self.memory.get(address).unwrap_or(0)
            };
        }
        Ok(operands)
    }

    fn execute(&mut self, op: Opcode, operand_a: u8, operand_b: u8) -> Result<Flow, MachineError> {
        match op {
            Opcode::Hlt => return Ok(Flow::Halt),
            Opcode::Ldi => self.registers.set(operand_a, operand_b)?,
            Opcode::Prn => self.prn(operand_a)?,
            Opcode::Push => self.push(operand_a)?,
            Opcode::Pop => self.pop(operand_a)?,
            Opcode::Call => self.call(operand_a)?,
            Opcode::Ret => self.ret()?,
            Opcode::Jmp => self.jmp(operand_a)?,
            Opcode::Jeq => self.jeq(operand_a)?,
            Opcode::Jne => self.jne(operand_a)?,
            Opcode::Alu(alu_op) => self.alu(alu_op, operand_a, operand_b)?,
        }
        Ok(Flow::Next)
    }

    fn prn(&mut self, reg: u8) -> Result<(), MachineError> {
        let value = self.registers.get(reg)?;
        writeln!(self.output, "{}", value)?;
        Ok(())
    }
}

impl<W> Machine<W> {
    #[inline]
    pub fn pc(&self) -> usize {
        self.pc
    }

    #[inline]
    pub fn state(&self) -> MachineState {
        self.state
    }

    #[inline]
    pub fn equal_flag(&self) -> bool {
        self.equal
    }

    pub fn registers(&self) -> &Registers {
        &self.registers
    }

    pub fn registers_mut(&mut self) -> &mut Registers {
        &mut self.registers
    }

    pub fn memory(&self) -> &Memory {
        &self.memory
    }

    pub fn memory_mut(&mut self) -> &mut Memory {
        &mut self.memory
    }

    pub fn config(&self) -> &MachineConfig {
        &self.config
    }

    pub fn steps(&self) -> u64 {
        self.steps
    }

    pub fn output(&self) -> &W {
        &self.output
    }

    pub fn into_output(self) -> W {
        self.output
    }
}

use std::collections::HashMap;

use bitflags::bitflags;
use lazy_static::lazy_static;

pub const HLT: u8 = 0b0000_0001;
pub const LDI: u8 = 0b1000_0010;
pub const PRN: u8 = 0b0100_0111;
pub const MUL: u8 = 0b1010_0010;
pub const PUSH: u8 = 0b0100_0101;
pub const POP: u8 = 0b0100_0110;
pub const CALL: u8 = 0b0101_0000;
pub const RET: u8 = 0b0001_0001;
pub const ADD: u8 = 0b1010_0000;
pub const CMP: u8 = 0b1010_0111;
pub const JMP: u8 = 0b0101_0100;
pub const JEQ: u8 = 0b0101_0101;
pub const JNE: u8 = 0b0101_0110;

bitflags! {
    /// Structural bits of an instruction byte.
    ///
    /// Layout (bit index in the byte, from MSB to LSB):
    /// - bits 7–6: operand count (see [`Header::operand_count`])
    /// - bit 5: routed to the ALU
    /// - bit 4: sets the program counter itself
    /// - bits 3–0: operation identifier
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct Header: u8 {
        const ALU = 0b0010_0000;
        const SETS_PC = 0b0001_0000;
        const _ = !0;
    }
}

impl Header {
    #[inline]
    pub fn decode(ir: u8) -> Self {
        Self::from_bits_retain(ir)
    }

    /// Number of operand bytes following the opcode (0–3).
    #[inline]
    pub fn operand_count(self) -> usize {
        (self.bits() >> 6) as usize
    }

    #[inline]
    pub fn is_alu(self) -> bool {
        self.contains(Header::ALU)
    }

    #[inline]
    pub fn sets_pc(self) -> bool {
        self.contains(Header::SETS_PC)
    }
}

/// Register-to-register operations carried out by the ALU.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AluOp {
    Mul,
    Add,
    Cmp,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Opcode {
    Hlt,
    Ldi,
    Prn,
    Push,
    Pop,
    Call,
    Ret,
    Jmp,
    Jeq,
    Jne,
    Alu(AluOp),
}

lazy_static! {
    static ref DECODE_TABLE: HashMap<u8, Opcode> =
        Opcode::ALL.iter().map(|&op| (op.byte(), op)).collect();
}

impl Opcode {
    pub const ALL: [Opcode; 13] = [
        Opcode::Hlt,
        Opcode::Ldi,
        Opcode::Prn,
        Opcode::Alu(AluOp::Mul),
        Opcode::Push,
        Opcode::Pop,
        Opcode::Call,
        Opcode::Ret,
        Opcode::Alu(AluOp::Add),
        Opcode::Alu(AluOp::Cmp),
        Opcode::Jmp,
        Opcode::Jeq,
        Opcode::Jne,
    ];

    /// Look up the operation registered for a full instruction byte.
    #[inline]
    pub fn decode(ir: u8) -> Option<Opcode> {
        DECODE_TABLE.get(&ir).copied()
    }

    pub const fn byte(self) -> u8 {
        match self {
            Opcode::Hlt => HLT,
            Opcode::Ldi => LDI,
            Opcode::Prn => PRN,
            Opcode::Alu(AluOp::Mul) => MUL,
            Opcode::Push => PUSH,
            Opcode::Pop => POP,
            Opcode::Call => CALL,
            Opcode::Ret => RET,
            Opcode::Alu(AluOp::Add) => ADD,
            Opcode::Alu(AluOp::Cmp) => CMP,
            Opcode::Jmp => JMP,
            Opcode::Jeq => JEQ,
            Opcode::Jne => JNE,
        }
    }

    pub const fn mnemonic(self) -> &'static str {
        match self {
            Opcode::Hlt => "HLT",
            Opcode::Ldi => "LDI",
            Opcode::Prn => "PRN",
            Opcode::Alu(AluOp::Mul) => "MUL",
            Opcode::Push => "PUSH",
            Opcode::Pop => "POP",
            Opcode::Call => "CALL",
            Opcode::Ret => "RET",
            Opcode::Alu(AluOp::Add) => "ADD",
            Opcode::Alu(AluOp::Cmp) => "CMP",
            Opcode::Jmp => "JMP",
            Opcode::Jeq => "JEQ",
            Opcode::Jne => "JNE",
        }
    }

    #[inline]
    pub fn header(self) -> Header {
        Header::decode(self.byte())
    }

    #[inline]
    pub fn operand_count(self) -> usize {
        self.header().operand_count()
    }
}

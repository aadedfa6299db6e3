//! Program image loader.
//!
//! An image is a text file with one binary literal per line, e.g.
//!
//! ```text
//! 10000010 # LDI R0,8
//! 00000000
//! 00001000
//! ```
//!
//! Everything from `#` to the end of a line is a comment. Lines that start
//! with `0` or `1` contribute their first 8 characters as one byte; all other
//! lines are ignored.

use std::fs;
use std::io;
use std::path::Path;

use crate::error::LoadError;
use crate::RAM_SIZE;

/// Width of one binary literal.
const LITERAL_WIDTH: usize = 8;

/// A parsed program image, ready to be copied to address 0.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Program {
    bytes: Vec<u8>,
}

impl Program {
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self, LoadError> {
        if bytes.len() > RAM_SIZE {
            return Err(LoadError::TooLarge { len: bytes.len() });
        }
        Ok(Self { bytes })
    }

    pub fn parse(source: &str) -> Result<Self, LoadError> {
        let mut bytes = Vec::new();
        for (idx, line) in source.lines().enumerate() {
            let code = line.split('#').next().unwrap_or_default().trim_end();
            if !code.starts_with(['0', '1']) {
                continue;
            }
            let literal: String = code.chars().take(LITERAL_WIDTH).collect();
            let literal = literal.trim_end();
            let byte = u8::from_str_radix(literal, 2).map_err(|_| LoadError::InvalidLiteral {
                line: idx + 1,
                text: literal.to_string(),
            })?;
            bytes.push(byte);
        }
        log::debug!("parsed program image: {} bytes", bytes.len());
        Self::from_bytes(bytes)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let source = fs::read_to_string(path).map_err(|err| match err.kind() {
            io::ErrorKind::NotFound => LoadError::NotFound {
                path: path.to_path_buf(),
            },
            _ => LoadError::Io {
                path: path.to_path_buf(),
                source: err,
            },
        })?;
        Self::parse(&source)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn comments_and_blank_lines_do_not_take_an_address() {
        let source = "\
# print8.ls8
10000010 # LDI R0,8

00000000
00001000
# just a comment
01000111 # PRN R0
00000000
00000001 # HLT
";
        let program = Program::parse(source).unwrap();
        assert_eq!(program.as_bytes(), &[0b1000_0010, 0, 8, 0b0100_0111, 0, 1]);
    }

    #[test]
    fn only_first_eight_characters_count() {
        let program = Program::parse("000000011\n101 # short\n").unwrap();
        assert_eq!(program.as_bytes(), &[1, 0b101]);
    }

    #[test]
    fn indented_lines_take_no_address() {
        let program = Program::parse("  10000010\n\t00000001\n00000001\n").unwrap();
        assert_eq!(program.as_bytes(), &[1]);
    }

    #[test]
    fn lines_not_starting_with_a_bit_are_skipped() {
        let program = Program::parse("LDI R0,8\nx0101\n00000001\n").unwrap();
        assert_eq!(program.as_bytes(), &[1]);
    }

    #[test]
    fn malformed_literal_reports_its_line() {
        let err = Program::parse("00000001\n0012\n").unwrap_err();
        match err {
            LoadError::InvalidLiteral { line, text } => {
                assert_eq!(line, 2);
                assert_eq!(text, "0012");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn image_larger_than_memory_is_rejected() {
        let source = "00000000\n".repeat(RAM_SIZE + 1);
        assert!(matches!(
            Program::parse(&source),
            Err(LoadError::TooLarge { len: 257 })
        ));
        assert_eq!(Program::parse(&"00000000\n".repeat(RAM_SIZE)).unwrap().len(), RAM_SIZE);
    }

    #[test]
    fn missing_file_is_not_found() {
        let err = Program::from_file("/definitely/not/here.ls8").unwrap_err();
        assert!(matches!(err, LoadError::NotFound { .. }));
    }
}

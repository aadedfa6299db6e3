use crate::error::MachineError;
use crate::RAM_SIZE;

/// Flat byte-addressable RAM.
///
/// Every access is bounds-checked; there is no mirroring or wrap-around.
#[derive(Clone, Debug)]
pub struct Memory {
    ram: [u8; RAM_SIZE],
}

impl Default for Memory {
    fn default() -> Self {
        Self { ram: [0; RAM_SIZE] }
    }
}

impl Memory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn read(&self, address: usize) -> Result<u8, MachineError> {
        self.get(address).ok_or(MachineError::AddressOutOfRange { address })
    }

    pub fn write(&mut self, address: usize, value: u8) -> Result<(), MachineError> {
        let cell = self
            .ram
            .get_mut(address)
            .ok_or(MachineError::AddressOutOfRange { address })?;
        *cell = value;
        Ok(())
    }

    /// Like [`Memory::read`] but yields `None` past the end of RAM.
    #[inline]
    pub fn get(&self, address: usize) -> Option<u8> {
        self.ram.get(address).copied()
    }

    /// Copy `image` to the start of RAM and clear everything after it.
    pub(crate) fn load_image(&mut self, image: &[u8]) {
        self.ram = [0; RAM_SIZE];
        self.ram[..image.len()].copy_from_slice(image);
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.ram
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_back_written_byte() {
        let mut memory = Memory::new();
        memory.write(0x42, 0x99).unwrap();
        assert_eq!(memory.read(0x42).unwrap(), 0x99);
        assert_eq!(memory.read(0xFF).unwrap(), 0);
    }

    #[test]
    fn out_of_range_access_is_an_error() {
        let mut memory = Memory::new();
        assert!(matches!(
            memory.read(RAM_SIZE),
            Err(MachineError::AddressOutOfRange { address: 256 })
        ));
        assert!(matches!(
            memory.write(300, 1),
            Err(MachineError::AddressOutOfRange { address: 300 })
        ));
        assert_eq!(memory.get(RAM_SIZE), None);
    }

    #[test]
    fn load_image_clears_previous_contents() {
        let mut memory = Memory::new();
        memory.write(0x80, 7).unwrap();
        memory.load_image(&[1, 2, 3]);
        assert_eq!(&memory.as_slice()[..4], &[1, 2, 3, 0]);
        assert_eq!(memory.read(0x80).unwrap(), 0);
    }
}

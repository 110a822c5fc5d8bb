//! Program loading.
//!
//! Two conventions are supported: relocatable images carrying their load
//! address in the first two bytes, and flat images copied verbatim to a
//! caller-given offset (the functional-test binaries are full 64 KiB
//! dumps loaded at zero). Loading is only legal while the core is
//! quiescent; both loaders truncate silently at the top of memory.

use log::debug;

use crate::cpu::{Cpu, MEM_SIZE};
use crate::vectors;

/// Errors raised by the program loader.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LoadError {
    /// A relocatable image must start with its two-byte load address.
    #[error("relocatable image is {0} byte(s) long, too short to carry a load address")]
    MissingLoadAddress(usize),
}

impl Cpu {
    /// Loads a relocatable program image.
    ///
    /// The first two bytes hold the little-endian load address; the rest
    /// of the image is copied there, truncated silently at `$FFFF`.
    /// Afterwards PC is re-primed from the RESET vector, the bus shows
    /// the first opcode fetch and the disassembly lookahead is refreshed.
    ///
    /// # Errors
    ///
    /// [`LoadError::MissingLoadAddress`] if the image is shorter than two
    /// bytes.
    pub fn load_program(&mut self, image: &[u8]) -> Result<(), LoadError> {
        if image.len() < 2 {
            return Err(LoadError::MissingLoadAddress(image.len()));
        }
        let start = u16::from_le_bytes([image[0], image[1]]);
        let payload = &image[2..];
        self.copy_into_memory(payload, start);

        self.pc = u16::from(self.mem[vectors::RESET as usize])
            | (u16::from(self.mem[vectors::RESET as usize + 1]) << 8);
        self.bus.addr = self.pc;
        self.bus.data = self.mem[self.pc as usize];
        self.disassemble();

        // The first fetch must not advance PC; the opcode sentinel stays
        // unset until the clock performs it.
        self.opcode = None;
        self.addr_mode = "";
        self.opcode_action.clear();
        self.cycle_action = "FETCH AN OPCODE".into();

        debug!(
            "loaded {} byte(s) at ${start:04X}, PC primed to ${:04X}",
            payload.len(),
            self.pc
        );
        Ok(())
    }

    /// Copies a flat image to `start` without touching any processor
    /// state; the caller decides where execution begins.
    pub fn load_program_at(&mut self, image: &[u8], start: u16) {
        self.copy_into_memory(image, start);
        debug!("loaded {} byte(s) at ${start:04X}", image.len());
    }

    fn copy_into_memory(&mut self, bytes: &[u8], start: u16) {
        let start = start as usize;
        let len = bytes.len().min(MEM_SIZE - start);
        self.mem[start..start + len].copy_from_slice(&bytes[..len]);
    }
}

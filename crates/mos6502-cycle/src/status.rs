//! CPU status register (P register) flags.
//!
//! The 6502 status register packs eight flags:
//!
//! ```text
//! 7  6  5  4  3  2  1  0
//! N  V  U  B  D  I  Z  C
//! │  │  │  │  │  │  │  └─ Carry
//! │  │  │  │  │  │  └──── Zero
//! │  │  │  │  │  └─────── Interrupt Disable
//! │  │  │  │  └────────── Decimal Mode (drives the BCD path of ADC/SBC)
//! │  │  │  └───────────── Break (1 when pushed by PHP/BRK, 0 by IRQ/NMI)
//! │  │  └──────────────── Unused (reads as 1)
//! │  └─────────────────── Overflow
//! └────────────────────── Negative
//! ```

use bitflags::bitflags;

bitflags! {
    /// CPU status register flags.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Status: u8 {
        /// Carry flag - set on overflow out of bit 7 or a non-borrowing subtract.
        const C = 1 << 0;

        /// Zero flag - set if the result of the last operation was zero.
        const Z = 1 << 1;

        /// Interrupt Disable flag - when set, IRQ requests are refused.
        /// NMI requests are not affected.
        const I = 1 << 2;

        /// Decimal Mode flag - when set, ADC and SBC operate on packed BCD.
        const D = 1 << 3;

        /// Break flag - distinguishes BRK/PHP pushes from hardware interrupts.
        const B = 1 << 4;

        /// Unused flag - always 1 whenever the register is observed.
        const U = 1 << 5;

        /// Overflow flag - set if the last operation caused a signed overflow.
        const V = 1 << 6;

        /// Negative flag - set if bit 7 of the result is set.
        const N = 1 << 7;
    }
}

impl Status {
    /// Sets or clears the Zero and Negative flags based on a value.
    #[inline]
    pub fn set_zn(&mut self, value: u8) {
        self.set(Self::Z, value == 0);
        self.set(Self::N, value & 0x80 != 0);
    }

    /// Converts the register to the byte placed on the stack.
    ///
    /// The U flag is always set in the pushed byte. B is forced to 1 for
    /// PHP and BRK and to 0 for hardware interrupts; only the stored copy
    /// differs, never the live register.
    #[inline]
    #[must_use]
    pub const fn to_stack_byte(self, set_break: bool) -> u8 {
        let value = self.bits() | Self::U.bits();
        if set_break {
            value | Self::B.bits()
        } else {
            value & !Self::B.bits()
        }
    }

    /// Rebuilds the register from a byte pulled by PLP.
    ///
    /// B is not affected by the pull and keeps its pre-pull state; U is
    /// forced to 1.
    #[inline]
    #[must_use]
    pub fn from_pull(value: u8, previous: Self) -> Self {
        let mut status = Self::from_bits_retain(value) | Self::U;
        status.set(Self::B, previous.contains(Self::B));
        status
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_zn_zero() {
        let mut status = Status::empty();
        status.set_zn(0);
        assert!(status.contains(Status::Z));
        assert!(!status.contains(Status::N));
    }

    #[test]
    fn set_zn_negative() {
        let mut status = Status::empty();
        status.set_zn(0x80);
        assert!(!status.contains(Status::Z));
        assert!(status.contains(Status::N));
    }

    #[test]
    fn set_zn_positive() {
        let mut status = Status::empty();
        status.set_zn(0x42);
        assert!(!status.contains(Status::Z));
        assert!(!status.contains(Status::N));
    }

    #[test]
    fn stack_byte_with_break() {
        let status = Status::C | Status::Z;
        let byte = status.to_stack_byte(true);
        assert_eq!(byte & Status::B.bits(), Status::B.bits());
        assert_eq!(byte & Status::U.bits(), Status::U.bits());
    }

    #[test]
    fn stack_byte_without_break() {
        let status = Status::C | Status::B;
        let byte = status.to_stack_byte(false);
        assert_eq!(byte & Status::B.bits(), 0);
        assert_eq!(byte & Status::U.bits(), Status::U.bits());
    }

    #[test]
    fn pull_preserves_break_and_forces_unused() {
        // Pulled byte claims B=1, but the pre-pull register had B=0.
        let status = Status::from_pull(0xFF, Status::empty());
        assert!(!status.contains(Status::B));
        assert!(status.contains(Status::U));
        assert!(status.contains(Status::C));
        assert!(status.contains(Status::N));

        // And the other way around.
        let status = Status::from_pull(0x00, Status::B);
        assert!(status.contains(Status::B));
        assert!(status.contains(Status::U));
        assert!(!status.contains(Status::C));
    }
}

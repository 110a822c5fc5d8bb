//! Cycle-accurate MOS 6502 CPU emulator.
//!
//! This crate models the NMOS 6502 as a deterministic state machine
//! driven by a host-owned half-cycle clock. Every bus transaction is
//! observable: the address and data buses, the R/W pin, dummy reads
//! marked as discarded, page-crossing penalty cycles and the seven-cycle
//! interrupt/reset sequence all appear exactly where real hardware puts
//! them. It supports:
//!
//! - All 151 documented opcodes across 13 addressing modes
//! - Per-cycle bus state, intended for monitor/visualizer front-ends
//! - Binary and decimal (BCD) ADC/SBC, matching NMOS flag behaviour
//! - RESET, IRQ, NMI and BRK through one shared interrupt sequencer
//! - A rolling disassembly lookahead of the next ten instructions
//!
//! Undocumented opcodes jam the emulation by design: the core keeps
//! reporting `"???"` without advancing, and ticking it further is safe.
//!
//! # Example
//!
//! ```
//! use mos6502_cycle::Cpu;
//!
//! let mut cpu = Cpu::new(true); // warm start for direct execution
//! cpu.mem[0xFFFC] = 0x00;       // RESET vector -> $8000
//! cpu.mem[0xFFFD] = 0x80;
//! cpu.reset(true);
//!
//! cpu.load_program_at(&[0xA9, 0x2A], 0x8000); // LDA #$2A
//! for _ in 0..4 {
//!     cpu.clock(); // two half-cycles per bus transaction
//! }
//! assert_eq!(cpu.a, 0x2A);
//! ```

#![warn(missing_docs)]

mod addressing;
mod bus;
mod cpu;
mod disasm;
mod instructions;
mod opcodes;
mod program;
mod sequencer;
mod status;

pub use bus::BusState;
pub use cpu::{Cpu, Interrupt, MEM_SIZE};
pub use disasm::CODE_LIMIT;
pub use program::LoadError;
pub use status::Status;

/// Interrupt vector addresses.
pub mod vectors {
    /// NMI (Non-Maskable Interrupt) vector address.
    pub const NMI: u16 = 0xFFFA;
    /// Reset vector address.
    pub const RESET: u16 = 0xFFFC;
    /// IRQ/BRK vector address.
    pub const IRQ: u16 = 0xFFFE;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_cycles(cpu: &mut Cpu, cycles: u32) {
        for _ in 0..cycles * 2 {
            cpu.clock();
        }
    }

    /// Reset from cold: the 7-cycle sequence loads PC from the vector and
    /// leaves SP three pushes down.
    #[test]
    fn scenario_cold_reset() {
        let mut cpu = Cpu::new(false);
        cpu.mem[0xFFFC] = 0x00;
        cpu.mem[0xFFFD] = 0x80;

        run_cycles(&mut cpu, 7);

        assert_eq!(cpu.pc, 0x8000);
        assert_eq!(cpu.sp, 0x01FD);
        assert!(cpu.status.contains(Status::I));
    }

    /// LDA #$05, ADC #$03, BRK runs in 2+2+7 cycles and leaves A=8 with
    /// all arithmetic flags clear.
    #[test]
    fn scenario_simple_add() {
        let mut cpu = Cpu::new(false);
        cpu.mem[0xFFFC] = 0x00;
        cpu.mem[0xFFFD] = 0x80;
        cpu.load_program_at(&[0xA9, 0x05, 0x69, 0x03, 0x00], 0x8000);

        run_cycles(&mut cpu, 7); // reset sequence
        run_cycles(&mut cpu, 11); // LDA, ADC, BRK

        assert_eq!(cpu.a, 0x08);
        assert!(!cpu.status.contains(Status::C));
        assert!(!cpu.status.contains(Status::V));
        assert!(!cpu.status.contains(Status::N));
        assert!(!cpu.status.contains(Status::Z));
        assert_eq!(cpu.total_cycles, 18);
    }

    /// BCD add with the low digit carrying into the high one.
    #[test]
    fn scenario_bcd_add() {
        let mut cpu = Cpu::new(true);
        cpu.mem[0xFFFC] = 0x00;
        cpu.mem[0xFFFD] = 0x80;
        cpu.mem[0x8000] = 0x69; // ADC #$48
        cpu.mem[0x8001] = 0x48;
        cpu.reset(true);
        cpu.status.insert(Status::D);
        cpu.status.remove(Status::C);
        cpu.a = 0x25;

        run_cycles(&mut cpu, 2);

        assert_eq!(cpu.a, 0x73);
        assert!(!cpu.status.contains(Status::C));
    }

    /// A taken branch that crosses a page completes in four cycles.
    #[test]
    fn scenario_branch_page_cross() {
        let mut cpu = Cpu::new(true);
        cpu.mem[0xFFFC] = 0xFD;
        cpu.mem[0xFFFD] = 0x80;
        cpu.mem[0x80FD] = 0xF0; // BEQ +4
        cpu.mem[0x80FE] = 0x04;
        cpu.reset(true);
        cpu.status.insert(Status::Z);

        run_cycles(&mut cpu, 4);

        assert_eq!(cpu.pc, 0x8103);
        assert_eq!(cpu.total_cycles, 4);
    }

    /// JSR/RTS round trip: stack balanced, execution resumes after the
    /// call site.
    #[test]
    fn scenario_jsr_rts_round_trip() {
        let mut cpu = Cpu::new(true);
        cpu.mem[0xFFFC] = 0x00;
        cpu.mem[0xFFFD] = 0x80;
        cpu.load_program_at(&[0x20, 0x00, 0x90, 0xEA], 0x8000);
        cpu.mem[0x9000] = 0x60; // RTS
        cpu.reset(true);
        let sp_before = cpu.sp;

        run_cycles(&mut cpu, 6);
        assert_eq!(cpu.pc, 0x9000);
        assert_eq!(cpu.sp, sp_before - 2);

        run_cycles(&mut cpu, 6 + 2); // RTS, then the NOP after the call
        assert_eq!(cpu.sp, sp_before);
        assert_eq!(cpu.pc, 0x8003);
        assert_eq!(cpu.instruction, "NOP");
    }

    /// An NMI landing during a taken branch lets the branch complete
    /// first; the interrupt returns to the branch target, not to the
    /// instruction after the branch.
    #[test]
    fn scenario_nmi_during_branch() {
        let mut cpu = Cpu::new(true);
        cpu.mem[0xFFFC] = 0x00;
        cpu.mem[0xFFFD] = 0x80;
        cpu.mem[0x8000] = 0xD0; // BNE +$10
        cpu.mem[0x8001] = 0x10;
        cpu.mem[vectors::NMI as usize] = 0x00;
        cpu.mem[vectors::NMI as usize + 1] = 0x90;
        cpu.mem[0x9000] = 0x40; // RTI
        cpu.reset(true);
        cpu.status.remove(Status::Z);

        run_cycles(&mut cpu, 1);
        cpu.trigger_interrupt(Interrupt::Nmi);
        run_cycles(&mut cpu, 2);
        assert_eq!(cpu.pc, 0x8012); // the branch completed

        run_cycles(&mut cpu, 7); // NMI sequence
        assert_eq!(cpu.pc, 0x9000);

        run_cycles(&mut cpu, 7); // RTI plus the next fetch boundary
        assert_eq!(cpu.pc, 0x8012);
    }

    /// The relocatable loader primes the bus exactly like a fetch.
    #[test]
    fn scenario_relocatable_load() {
        let mut cpu = Cpu::new(true);
        cpu.mem[0xFFFC] = 0x00;
        cpu.mem[0xFFFD] = 0x80;

        cpu.load_program(&[0x00, 0x80, 0xA9, 0x07, 0x69, 0x01])
            .unwrap();
        run_cycles(&mut cpu, 4);

        assert_eq!(cpu.a, 0x08);
        assert_eq!(cpu.code[0], "$8000:\tLDA\t#$07\t(7)");
    }
}

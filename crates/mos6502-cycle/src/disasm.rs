//! Disassembly lookahead.
//!
//! Refreshed after every opcode fetch so the listing survives
//! self-modifying code and jumps into operand bytes. The decoder is the
//! same table the execution engine uses; formatting follows the monitor
//! conventions: immediate operands carry their signed decimal value,
//! relative branches and indirect jumps show the resolved target.

use std::fmt::Write;

use crate::addressing::{decode, AddrMode};
use crate::cpu::Cpu;
use crate::opcodes::OPCODE_TABLE;

/// Number of instructions decoded ahead of the program counter.
pub const CODE_LIMIT: usize = 10;

impl Cpu {
    /// Rebuilds `code` with the next [`CODE_LIMIT`] instructions starting
    /// at the current PC. Works on a scratch program counter and never
    /// mutates execution state.
    pub(crate) fn disassemble(&mut self) {
        let mut pc = self.pc;
        for slot in 0..CODE_LIMIT {
            let opcode = self.mem[pc as usize];
            let d = decode(opcode);
            let mut line = format!("${pc:04X}:\t{}", OPCODE_TABLE[opcode as usize].as_str());

            match d.mode {
                AddrMode::Acc | AddrMode::Imp | AddrMode::Ill => {}
                AddrMode::Imm => {
                    let value = self.mem[pc.wrapping_add(1) as usize];
                    let _ = write!(line, "\t#${value:02X}");
                    if value >= 0x80 {
                        let _ = write!(line, "\t(-{})", value.wrapping_neg());
                    } else {
                        let _ = write!(line, "\t({value})");
                    }
                }
                AddrMode::Zero => {
                    let addr = self.mem[pc.wrapping_add(1) as usize];
                    let _ = write!(line, "\t${addr:02X}");
                }
                AddrMode::ZeroX => {
                    let addr = self.mem[pc.wrapping_add(1) as usize];
                    let _ = write!(line, "\t${addr:02X},X");
                }
                AddrMode::ZeroY => {
                    let addr = self.mem[pc.wrapping_add(1) as usize];
                    let _ = write!(line, "\t${addr:02X},Y");
                }
                AddrMode::Abs | AddrMode::AbsX | AddrMode::AbsY => {
                    let lo = self.mem[pc.wrapping_add(1) as usize];
                    let hi = self.mem[pc.wrapping_add(2) as usize];
                    let _ = write!(line, "\t${hi:02X}{lo:02X}");
                    match d.mode {
                        AddrMode::AbsX => line.push_str(",X"),
                        AddrMode::AbsY => line.push_str(",Y"),
                        _ => {}
                    }
                }
                AddrMode::Ind => {
                    let lo = self.mem[pc.wrapping_add(1) as usize];
                    let hi = self.mem[pc.wrapping_add(2) as usize];
                    let ptr = u16::from(lo) | (u16::from(hi) << 8);
                    let target = u16::from(self.mem[ptr as usize])
                        | (u16::from(self.mem[ptr.wrapping_add(1) as usize]) << 8);
                    let _ = write!(line, "\t(${hi:02X}{lo:02X})\t[${target:04X}]");
                }
                AddrMode::IndX => {
                    let addr = self.mem[pc.wrapping_add(1) as usize];
                    let _ = write!(line, "\t(${addr:02X},X)");
                }
                AddrMode::IndY => {
                    let addr = self.mem[pc.wrapping_add(1) as usize];
                    let _ = write!(line, "\t(${addr:02X}),Y");
                }
                AddrMode::Rel => {
                    let offset = self.mem[pc.wrapping_add(1) as usize];
                    let target = pc.wrapping_add(2).wrapping_add(offset as i8 as i16 as u16);
                    let _ = write!(line, "\t${offset:02X}\t[${target:04X}]");
                }
            }

            pc = pc.wrapping_add(1).wrapping_add(d.mode.operand_bytes());
            self.code[slot] = line;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vectors;

    fn cpu_with(program: &[u8]) -> Cpu {
        let mut cpu = Cpu::new(true);
        cpu.mem[vectors::RESET as usize] = 0x00;
        cpu.mem[vectors::RESET as usize + 1] = 0x80;
        cpu.mem[0x8000..0x8000 + program.len()].copy_from_slice(program);
        cpu.reset(true);
        cpu.clock();
        cpu.clock();
        cpu
    }

    #[test]
    fn immediate_shows_signed_decimal() {
        let cpu = cpu_with(&[0xA9, 0x05, 0x69, 0xFE]);
        assert_eq!(cpu.code[0], "$8000:\tLDA\t#$05\t(5)");
        assert_eq!(cpu.code[1], "$8002:\tADC\t#$FE\t(-2)");
    }

    #[test]
    fn absolute_and_indexed_operands() {
        let cpu = cpu_with(&[0xAD, 0x34, 0x12, 0xBD, 0x00, 0x90, 0xB9, 0xFF, 0x10, 0xB5, 0x20]);
        assert_eq!(cpu.code[0], "$8000:\tLDA\t$1234");
        assert_eq!(cpu.code[1], "$8003:\tLDA\t$9000,X");
        assert_eq!(cpu.code[2], "$8006:\tLDA\t$10FF,Y");
        assert_eq!(cpu.code[3], "$8009:\tLDA\t$20,X");
    }

    #[test]
    fn indirect_jump_resolves_its_target() {
        let mut cpu = cpu_with(&[0x6C, 0x00, 0x30]);
        cpu.mem[0x3000] = 0x78;
        cpu.mem[0x3001] = 0x56;
        cpu.disassemble();
        assert_eq!(cpu.code[0], "$8000:\tJMP\t($3000)\t[$5678]");
    }

    #[test]
    fn relative_branches_resolve_both_directions() {
        let cpu = cpu_with(&[0xF0, 0x04, 0xD0, 0xFC]);
        assert_eq!(cpu.code[0], "$8000:\tBEQ\t$04\t[$8006]");
        assert_eq!(cpu.code[1], "$8002:\tBNE\t$FC\t[$8000]");
    }

    #[test]
    fn implied_and_stack_forms_have_no_operand() {
        let cpu = cpu_with(&[0xEA, 0x48, 0x0A, 0x00]);
        assert_eq!(cpu.code[0], "$8000:\tNOP");
        assert_eq!(cpu.code[1], "$8001:\tPHA");
        assert_eq!(cpu.code[2], "$8002:\tASL");
        assert_eq!(cpu.code[3], "$8003:\tBRK");
    }

    #[test]
    fn undocumented_bytes_show_as_unknown() {
        let cpu = cpu_with(&[0x02, 0xEA]);
        assert_eq!(cpu.code[0], "$8000:\t???");
        assert_eq!(cpu.code[1], "$8001:\tNOP");
    }

    #[test]
    fn lookahead_fills_all_slots() {
        let cpu = cpu_with(&[0xEA; 16]);
        assert_eq!(cpu.code.len(), CODE_LIMIT);
        for (i, line) in cpu.code.iter().enumerate() {
            assert_eq!(*line, format!("${:04X}:\tNOP", 0x8000 + i));
        }
    }
}

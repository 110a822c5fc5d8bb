//! Per-cycle bus choreography for each addressing-mode family.
//!
//! Every instruction runs one of these sequences, one arm per elapsed
//! cycle `t`. The sequences place the exact addresses and data a real
//! NMOS 6502 puts on its buses, including the dummy reads of indexed
//! modes, the stale stack reads of pulls, the write-back of the
//! unmodified value in read-modify-write instructions and the deferred
//! program-counter commit of page-crossing branches. The owning
//! instruction applies its semantic effect on the final cycle, after the
//! sequence has elapsed.

use crate::addressing::AddrMode;
use crate::cpu::Cpu;
use crate::opcodes::Mnemonic;

impl Cpu {
    /// Sequence for single-byte instructions: opcode fetch, then a
    /// discarded read of the following byte.
    pub(crate) fn byte_op(&mut self) {
        match self.t {
            0 => {
                self.cycles = 2;
                self.op_fetch_cycle();
            }
            1 => {
                self.bus_read(self.pc.wrapping_add(1));
                self.bus.discarded = true;
                self.cycle_action.clear();
            }
            _ => {}
        }
    }

    /// Operand fetch for instructions that read from memory.
    #[allow(clippy::too_many_lines)] // One arm per mode per cycle, as the bus behaves
    pub(crate) fn mem_op(&mut self) {
        match self.mode {
            AddrMode::Imm => match self.t {
                0 => {
                    self.op_fetch_cycle();
                    // Semantics land while the next opcode is fetched.
                    self.exec = true;
                }
                1 => {
                    self.pc = self.pc.wrapping_add(1);
                    self.bus_read(self.pc);
                    self.cycle_action = "FETCH DATA".into();
                }
                _ => {}
            },

            AddrMode::Zero => match self.t {
                0 => self.op_fetch_cycle(),
                1 => {
                    self.pc = self.pc.wrapping_add(1);
                    self.bus_read(self.pc);
                    self.effective_addr = u16::from(self.bus.data);
                    self.cycle_action = "FETCH EFFECTIVE ADDRESS".into();
                }
                2 => {
                    self.bus_read(self.effective_addr);
                    self.cycle_action = format!(
                        "FETCH DATA FROM EFFECTIVE\nADDRESS (${:04X})",
                        self.effective_addr
                    );
                }
                _ => {}
            },

            AddrMode::Abs => match self.t {
                0 => self.op_fetch_cycle(),
                1 => {
                    self.pc = self.pc.wrapping_add(1);
                    self.bus_read(self.pc);
                    self.effective_addr = u16::from(self.bus.data);
                    self.cycle_action = "FETCH LOW BYTE OF EFFECTIVE\nADDRESS".into();
                }
                2 => {
                    self.pc = self.pc.wrapping_add(1);
                    self.bus_read(self.pc);
                    self.effective_addr |= u16::from(self.bus.data) << 8;
                    self.cycle_action = "FETCH HIGH BYTE OF EFFECTIVE\nADDRESS".into();
                }
                3 => {
                    self.bus_read(self.effective_addr);
                    self.cycle_action = format!(
                        "FETCH DATA FROM EFFECTIVE\nADDRESS (${:04X})",
                        self.effective_addr
                    );
                }
                _ => {}
            },

            // The pointer lives in page zero; indexing wraps there and the
            // unindexed pointer byte is read once and thrown away.
            AddrMode::IndX => match self.t {
                0 => self.op_fetch_cycle(),
                1 => {
                    self.pc = self.pc.wrapping_add(1);
                    self.bus_read(self.pc);
                    self.effective_addr = u16::from(self.bus.data);
                    self.cycle_action = "FETCH BASE ADDRESS".into();
                }
                2 => {
                    self.bus_read(self.effective_addr);
                    self.bus.discarded = true;
                    self.cycle_action.clear();
                }
                3 => {
                    self.bus.discarded = false;
                    let ptr = self.effective_addr.wrapping_add(u16::from(self.x)) & 0x00FF;
                    self.bus_read(ptr);
                    self.cycle_action = "FETCH LOW BYTE OF EFFECTIVE\nADDRESS".into();
                }
                4 => {
                    let ptr =
                        self.effective_addr.wrapping_add(u16::from(self.x)).wrapping_add(1) & 0x00FF;
                    self.effective_addr = u16::from(self.bus.data);
                    self.bus_read(ptr);
                    self.effective_addr |= u16::from(self.bus.data) << 8;
                    self.cycle_action = "FETCH HIGH BYTE OF EFFECTIVE\nADDRESS".into();
                }
                5 => {
                    self.bus_read(self.effective_addr);
                    self.cycle_action = format!(
                        "FETCH DATA FROM EFFECTIVE\nADDRESS (${:04X})",
                        self.effective_addr
                    );
                }
                _ => {}
            },

            AddrMode::AbsX | AddrMode::AbsY => match self.t {
                0 => self.op_fetch_cycle(),
                1 => {
                    self.pc = self.pc.wrapping_add(1);
                    self.bus_read(self.pc);
                    self.effective_addr = u16::from(self.bus.data);
                    self.cycle_action = "FETCH LOW BYTE OF BASE ADDRESS".into();
                }
                2 => {
                    self.pc = self.pc.wrapping_add(1);
                    self.bus_read(self.pc);
                    self.effective_addr |= u16::from(self.bus.data) << 8;
                    self.cycle_action = "FETCH HIGH BYTE OF BASE ADDRESS".into();
                }
                3 => {
                    let base = self.effective_addr;
                    let index = if self.mode == AddrMode::AbsX { self.x } else { self.y };
                    self.effective_addr = base.wrapping_add(u16::from(index));
                    self.bus_read(self.effective_addr);
                    if (self.effective_addr & 0xFF00) != (base & 0xFF00) {
                        // The first indexed read lands on the wrong page and
                        // is repeated after the high-byte fix-up.
                        self.bus.discarded = true;
                        self.cycles += 1;
                        self.cycle_action = "PAGE BOUNDARY CROSSED AFTER\nINDEXING".into();
                    } else {
                        self.cycle_action = format!(
                            "FETCH DATA FROM EFFECTIVE\nADDRESS (${:04X})",
                            self.effective_addr
                        );
                    }
                }
                4 => {
                    self.bus.discarded = false;
                    self.bus_read(self.effective_addr);
                    self.cycle_action = format!(
                        "FETCH DATA FROM EFFECTIVE\nADDRESS (${:04X})",
                        self.effective_addr
                    );
                }
                _ => {}
            },

            AddrMode::ZeroX | AddrMode::ZeroY => match self.t {
                0 => self.op_fetch_cycle(),
                1 => {
                    self.pc = self.pc.wrapping_add(1);
                    self.bus_read(self.pc);
                    self.cycle_action = "FETCH BASE ZERO PAGE ADDRESS".into();
                }
                2 => {
                    self.bus.discarded = true;
                    let base = u16::from(self.bus.data);
                    self.bus_read(base);
                    self.cycle_action.clear();
                }
                3 => {
                    self.bus.discarded = false;
                    let index = if self.mode == AddrMode::ZeroX { self.x } else { self.y };
                    let addr = self.bus.addr.wrapping_add(u16::from(index)) & 0x00FF;
                    self.bus_read(addr);
                    self.cycle_action = format!("FETCH DATA FROM ${addr:04X}");
                }
                _ => {}
            },

            AddrMode::IndY => match self.t {
                0 => self.op_fetch_cycle(),
                1 => {
                    self.pc = self.pc.wrapping_add(1);
                    self.bus_read(self.pc);
                    self.effective_addr = u16::from(self.bus.data);
                    self.cycle_action = "FETCH ZERO PAGE INDIRECT ADDRESS".into();
                }
                2 => {
                    self.bus_read(self.effective_addr);
                    self.effective_addr = u16::from(self.bus.data);
                    self.cycle_action = "FETCH BASE LOW BYTE OF ADDRESS".into();
                }
                3 => {
                    let ptr = self.bus.addr.wrapping_add(1) & 0x00FF;
                    self.bus_read(ptr);
                    self.effective_addr |= u16::from(self.bus.data) << 8;
                    self.cycle_action = "FETCH BASE HIGH BYTE OF ADDRESS".into();
                }
                4 => {
                    let base = self.effective_addr;
                    self.effective_addr = base.wrapping_add(u16::from(self.y));
                    self.bus_read(self.effective_addr);
                    if (base & 0xFF00) != (self.effective_addr & 0xFF00) {
                        self.cycle_action = "PAGE BOUNDARY CROSSED AFTER\nINDEXING".into();
                        self.bus.discarded = true;
                        self.cycles += 1;
                    } else {
                        self.cycle_action =
                            format!("FETCH DATA FROM ${:04X}", self.effective_addr);
                    }
                }
                5 => {
                    self.bus.discarded = false;
                    self.bus_read(self.effective_addr);
                    self.cycle_action = format!("FETCH DATA FROM ${:04X}", self.effective_addr);
                }
                _ => {}
            },

            _ => {}
        }
    }

    /// Address resolution and final write cycle for the store family.
    /// Indexed stores always pay the dummy-read cycle, crossing or not.
    #[allow(clippy::too_many_lines)]
    pub(crate) fn store_op(&mut self) {
        match self.mode {
            AddrMode::Zero => match self.t {
                0 => self.op_fetch_cycle(),
                1 => {
                    self.pc = self.pc.wrapping_add(1);
                    self.bus_read(self.pc);
                    self.effective_addr = u16::from(self.bus.data);
                    self.cycle_action = "FETCH ZERO PAGE EFFECTIVE ADDRESS".into();
                }
                2 => self.store_commit(self.effective_addr),
                _ => {}
            },

            AddrMode::Abs => match self.t {
                0 => self.op_fetch_cycle(),
                1 => {
                    self.pc = self.pc.wrapping_add(1);
                    self.bus_read(self.pc);
                    self.effective_addr = u16::from(self.bus.data);
                    self.cycle_action = "FETCH LOW BYTE OF EFFECTIVE\nADDRESS".into();
                }
                2 => {
                    self.pc = self.pc.wrapping_add(1);
                    self.bus_read(self.pc);
                    self.effective_addr |= u16::from(self.bus.data) << 8;
                    self.cycle_action = "FETCH HIGH BYTE OF EFFECTIVE\nADDRESS".into();
                }
                3 => self.store_commit(self.effective_addr),
                _ => {}
            },

            AddrMode::IndX => match self.t {
                0 => self.op_fetch_cycle(),
                1 => {
                    self.pc = self.pc.wrapping_add(1);
                    self.bus_read(self.pc);
                    self.effective_addr = u16::from(self.bus.data);
                    self.cycle_action = "FETCH ZERO PAGE BASE ADDRESS".into();
                }
                2 => {
                    self.bus_read(self.effective_addr);
                    self.bus.discarded = true;
                    self.cycle_action.clear();
                }
                3 => {
                    self.bus.discarded = false;
                    let ptr = self.effective_addr.wrapping_add(u16::from(self.x)) & 0x00FF;
                    self.bus_read(ptr);
                    self.cycle_action = "FETCH LOW BYTE OF EFFECTIVE\nADDRESS".into();
                }
                4 => {
                    let ptr = self.bus.addr.wrapping_add(1) & 0x00FF;
                    self.effective_addr = u16::from(self.bus.data);
                    self.bus_read(ptr);
                    self.effective_addr |= u16::from(self.bus.data) << 8;
                    self.cycle_action = "FETCH HIGH BYTE OF EFFECTIVE\nADDRESS".into();
                }
                5 => self.store_commit(self.effective_addr),
                _ => {}
            },

            AddrMode::AbsX | AddrMode::AbsY => match self.t {
                0 => self.op_fetch_cycle(),
                1 => {
                    self.pc = self.pc.wrapping_add(1);
                    self.bus_read(self.pc);
                    self.effective_addr = u16::from(self.bus.data);
                    self.cycle_action = "FETCH LOW BYTE OF EFFECTIVE\nADDRESS".into();
                }
                2 => {
                    self.pc = self.pc.wrapping_add(1);
                    self.bus_read(self.pc);
                    self.effective_addr |= u16::from(self.bus.data) << 8;
                    self.cycle_action = "FETCH HIGH BYTE OF EFFECTIVE\nADDRESS".into();
                }
                3 => {
                    let index = if self.mode == AddrMode::AbsX { self.x } else { self.y };
                    self.effective_addr = self.effective_addr.wrapping_add(u16::from(index));
                    self.bus_read(self.effective_addr);
                    self.bus.discarded = true;
                    self.cycle_action.clear();
                }
                4 => {
                    self.bus.discarded = false;
                    self.store_commit(self.effective_addr);
                }
                _ => {}
            },

            AddrMode::ZeroX | AddrMode::ZeroY => match self.t {
                0 => self.op_fetch_cycle(),
                1 => {
                    self.pc = self.pc.wrapping_add(1);
                    self.bus_read(self.pc);
                    self.effective_addr = u16::from(self.bus.data);
                    self.cycle_action = "FETCH ZERO PAGE BASE ADDRESS".into();
                }
                2 => {
                    self.bus_read(self.effective_addr);
                    self.bus.discarded = true;
                    self.cycle_action.clear();
                }
                3 => {
                    self.bus.discarded = false;
                    let index = if self.mode == AddrMode::ZeroX { self.x } else { self.y };
                    let addr = self.effective_addr.wrapping_add(u16::from(index)) & 0x00FF;
                    self.store_commit(addr);
                }
                _ => {}
            },

            AddrMode::IndY => match self.t {
                0 => self.op_fetch_cycle(),
                1 => {
                    self.pc = self.pc.wrapping_add(1);
                    self.bus_read(self.pc);
                    self.effective_addr = u16::from(self.bus.data);
                    self.cycle_action = "FETCH ZERO PAGE INDIRECT ADDRESS".into();
                }
                2 => {
                    self.bus_read(self.effective_addr);
                    self.effective_addr = u16::from(self.bus.data);
                    self.cycle_action = "FETCH LOW BYTE OF BASE ADDRESS".into();
                }
                3 => {
                    let ptr = self.bus.addr.wrapping_add(1) & 0x00FF;
                    self.bus_read(ptr);
                    self.effective_addr |= u16::from(self.bus.data) << 8;
                    self.cycle_action = "FETCH HIGH BYTE OF BASE ADDRESS".into();
                }
                4 => {
                    self.effective_addr = self.effective_addr.wrapping_add(u16::from(self.y));
                    self.bus_read(self.effective_addr);
                    self.bus.discarded = true;
                    self.cycle_action.clear();
                }
                5 => {
                    self.bus.discarded = false;
                    self.store_commit(self.effective_addr);
                }
                _ => {}
            },

            _ => {}
        }
    }

    /// Final store cycle: drive the source register onto the data bus and
    /// into memory.
    fn store_commit(&mut self, addr: u16) {
        self.bus.rw = false;
        self.bus.addr = addr;
        let (value, name) = match self.mnemonic() {
            Mnemonic::Stx => (self.x, "X"),
            Mnemonic::Sty => (self.y, "Y"),
            _ => (self.a, "A"),
        };
        self.bus.data = value;
        self.mem[addr as usize] = value;
        self.cycle_action = format!("WRITE CONTENTS OF {name} REGISTER\nTO ADDRESS ${addr:04X}");
    }

    /// Sequence for read-modify-write instructions.
    ///
    /// After the data read, the unmodified value is written back on the
    /// penultimate cycle; the owning instruction writes the modified value
    /// on the last one. Absolute,X always performs the indexed dummy read.
    pub(crate) fn rmw_op(&mut self) {
        match self.mode {
            AddrMode::Zero => match self.t {
                0 => self.op_fetch_cycle(),
                1 => {
                    self.pc = self.pc.wrapping_add(1);
                    self.bus_read(self.pc);
                    self.cycle_action = "FETCH ZERO PAGE ADDRESS".into();
                }
                2 => {
                    let addr = u16::from(self.bus.data);
                    self.bus_read(addr);
                    self.cycle_action = "FETCH DATA".into();
                }
                3 => self.rmw_write_back(),
                4 => {
                    self.cycle_action = "WRITE MODIFIED DATA BACK\nINTO MEMORY".into();
                }
                _ => {}
            },

            AddrMode::Abs => match self.t {
                0 => self.op_fetch_cycle(),
                1 => {
                    self.pc = self.pc.wrapping_add(1);
                    self.bus_read(self.pc);
                    self.effective_addr = u16::from(self.bus.data);
                    self.cycle_action = "FETCH LOW BYTE OF EFFECTIVE\nADDRESS".into();
                }
                2 => {
                    self.pc = self.pc.wrapping_add(1);
                    self.bus_read(self.pc);
                    self.effective_addr |= u16::from(self.bus.data) << 8;
                    self.cycle_action = "FETCH HIGH BYTE OF EFFECTIVE\nADDRESS".into();
                }
                3 => {
                    self.bus_read(self.effective_addr);
                    self.cycle_action = "FETCH DATA".into();
                }
                4 => self.rmw_write_back(),
                5 => {
                    self.cycle_action = "WRITE MODIFIED DATA BACK INTO MEMORY".into();
                }
                _ => {}
            },

            AddrMode::ZeroX => match self.t {
                0 => self.op_fetch_cycle(),
                1 => {
                    self.pc = self.pc.wrapping_add(1);
                    self.bus_read(self.pc);
                    self.effective_addr = u16::from(self.bus.data);
                    self.cycle_action = "FETCH ZERO PAGE BASE ADDRESS".into();
                }
                2 => {
                    self.bus_read(self.effective_addr);
                    self.bus.discarded = true;
                }
                3 => {
                    self.effective_addr =
                        self.effective_addr.wrapping_add(u16::from(self.x)) & 0x00FF;
                    self.bus.discarded = false;
                    self.bus_read(self.effective_addr);
                }
                4 => self.rmw_write_back(),
                5 => {
                    self.cycle_action = "WRITE MODIFIED DATA BACK INTO MEMORY".into();
                }
                _ => {}
            },

            AddrMode::AbsX => match self.t {
                0 => self.op_fetch_cycle(),
                1 => {
                    self.pc = self.pc.wrapping_add(1);
                    self.bus_read(self.pc);
                    self.effective_addr = u16::from(self.bus.data);
                    self.cycle_action = "FETCH THE LOW BYTE OF EFFECTIVE\nADDRESS".into();
                }
                2 => {
                    self.pc = self.pc.wrapping_add(1);
                    self.bus_read(self.pc);
                    self.effective_addr |= u16::from(self.bus.data) << 8;
                    self.cycle_action = "FETCH THE HIGH BYTE OF EFFECTIVE\nADDRESS".into();
                }
                // The indexed address is on the bus already, but the data
                // is thrown away and fetched again on the next cycle.
                3 => {
                    self.effective_addr = self.effective_addr.wrapping_add(u16::from(self.x));
                    self.bus_read(self.effective_addr);
                    self.bus.discarded = true;
                    self.cycle_action.clear();
                }
                4 => {
                    self.bus.discarded = false;
                    self.bus_read(self.effective_addr);
                    self.cycle_action = "FETCH DATA".into();
                }
                5 => self.rmw_write_back(),
                6 => {
                    self.cycle_action = "WRITE MODIFIED DATA BACK INTO MEMORY".into();
                }
                _ => {}
            },

            _ => {}
        }
    }

    /// Penultimate RMW cycle: the original value goes back to memory while
    /// the ALU works.
    fn rmw_write_back(&mut self) {
        self.bus.rw = false;
        self.mem[self.bus.addr as usize] = self.bus.data;
        self.cycle_action.clear();
    }

    /// Three-cycle push sequence (PHA, PHP).
    pub(crate) fn push_op(&mut self) {
        match self.t {
            0 => {
                self.opcode_action = if self.mnemonic() == Mnemonic::Php {
                    "PUSH STATUS REGISTER TO STACK"
                } else {
                    "PUSH A TO STACK"
                }
                .into();
                self.op_fetch_cycle();
            }
            1 => {
                self.bus_read(self.pc.wrapping_add(1));
                self.bus.discarded = true;
                self.cycle_action.clear();
            }
            2 => {
                self.bus.discarded = false;
                self.bus.rw = false;
                self.bus.addr = self.sp;
                if self.mnemonic() == Mnemonic::Php {
                    // B and U are forced in the stored copy.
                    self.bus.data = self.status.to_stack_byte(true);
                    self.cycle_action = format!(
                        "WRITE CONTENTS OF STATUS REGISTER\nTO STACK AT ${:04X}",
                        self.sp
                    );
                } else {
                    self.bus.data = self.a;
                    self.cycle_action =
                        format!("WRITE CONTENTS OF REGISTER A\nTO STACK AT ${:04X}", self.sp);
                }
                self.mem[self.sp as usize] = self.bus.data;
                self.sp = 0x0100 | (self.sp.wrapping_sub(1) & 0x00FF);
            }
            _ => {}
        }
    }

    /// Four-cycle pull sequence (PLA, PLP). The stale top-of-stack byte is
    /// read and discarded before the pointer increments.
    pub(crate) fn pull_op(&mut self) {
        match self.t {
            0 => {
                self.opcode_action = if self.mnemonic() == Mnemonic::Plp {
                    "PULL STATUS REGISTER FROM STACK"
                } else {
                    "PULL A FROM STACK"
                }
                .into();
                self.op_fetch_cycle();
            }
            1 => {
                self.bus_read(self.pc.wrapping_add(1));
                self.cycle_action.clear();
                self.bus.discarded = true;
            }
            2 => {
                self.bus_read(self.sp);
                self.cycle_action.clear();
            }
            3 => {
                self.bus.discarded = false;
                self.sp = 0x0100 | (self.sp.wrapping_add(1) & 0x00FF);
                self.bus_read(self.sp);
                if self.mnemonic() == Mnemonic::Plp {
                    self.status = crate::status::Status::from_pull(self.bus.data, self.status);
                    self.cycle_action = format!(
                        "FETCH CONTENTS OF STATUS REGISTER\nFROM STACK AT ${:04X}",
                        self.sp
                    );
                } else {
                    self.a = self.bus.data;
                    self.status.set_zn(self.a);
                    self.cycle_action =
                        format!("FETCH CONTENTS OF REGISTER A\nFROM STACK AT ${:04X}", self.sp);
                }
            }
            _ => {}
        }
    }

    /// Conditional branch sequence; 2 cycles not taken, 3 taken, 4 on a
    /// page cross. The owning instruction decides `branch` on its first
    /// cycle.
    pub(crate) fn branch_op(&mut self) {
        match self.t {
            0 => {
                self.op_fetch_cycle();
                self.mode = AddrMode::Rel;
                self.addr_mode = AddrMode::Rel.label();
                self.cycles = 2;
            }
            1 => {
                self.pc = self.pc.wrapping_add(1);
                self.bus_read(self.pc);
                self.offset = self.bus.data;
                if self.branch {
                    self.cycles += 1;
                    self.cycle_action = "FETCH BRANCH OFFSET - BRANCH TAKEN".into();
                } else {
                    self.cycle_action = "FETCH BRANCH OFFSET - BRANCH\nNOT TAKEN".into();
                }
            }
            2 => {
                // Offsets are two's-complement; the target is relative to
                // the byte after the offset.
                let target = self
                    .pc
                    .wrapping_add(1)
                    .wrapping_add(self.offset as i8 as i16 as u16);
                self.bus_read(target);
                if (target & 0xFF00) != (self.pc.wrapping_add(1) & 0xFF00) {
                    // Commit is deferred one cycle while the high byte of
                    // PC is fixed up.
                    self.cycles += 1;
                    self.cycle_action = "PAGE BOUNDARY CROSSED".into();
                } else {
                    self.pc = target;
                    self.jump = true;
                    self.cycle_action = "ADD OFFSET TO PC".into();
                }
            }
            3 => {
                self.pc = self.bus.addr;
                self.jump = true;
                self.cycle_action = "ADD OFFSET TO PC".into();
            }
            _ => {}
        }
    }
}

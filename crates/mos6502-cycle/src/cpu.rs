//! 6502 CPU core: registers, memory, the half-cycle clock driver and the
//! interrupt/reset sequencer.
//!
//! The host owns the clock. Every call to [`Cpu::clock`] advances one
//! half-cycle; the core acts on every other call, so two calls equal one
//! bus transaction. All state a monitor front-end wants to render —
//! registers, buses, cycle counters, commentary strings, disassembly
//! lookahead — is readable between calls.

use log::debug;

use crate::addressing::AddrMode;
use crate::bus::BusState;
use crate::disasm::CODE_LIMIT;
use crate::opcodes::{Mnemonic, OPCODE_TABLE};
use crate::status::Status;
use crate::vectors;

/// Size of the flat address space owned by the core.
pub const MEM_SIZE: usize = 64 * 1024;

/// Hardware interrupt kinds accepted by [`Cpu::trigger_interrupt`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interrupt {
    /// Maskable interrupt request; refused while the I flag is set.
    Irq,
    /// Non-maskable interrupt; always accepted outside of reset.
    Nmi,
}

/// Cycle-accurate MOS 6502 core.
///
/// Constructed with [`Cpu::new`] and driven by [`Cpu::clock`]. The core
/// owns its 64 KiB of memory; the host may read any field between clock
/// calls and may load programs while the core is quiescent.
#[allow(clippy::struct_excessive_bools)] // Pin and sequencing state are genuinely boolean
pub struct Cpu {
    /// Accumulator.
    pub a: u8,
    /// X index register.
    pub x: u8,
    /// Y index register.
    pub y: u8,
    /// Program counter. Points at the byte most recently fetched for the
    /// current instruction; the advance to the next opcode happens at the
    /// instruction boundary inside [`Cpu::clock`].
    pub pc: u16,
    /// Stack pointer. The high byte is pinned to `0x01` at the end of
    /// every cycle; only the low byte counts.
    pub sp: u16,
    /// Status register.
    pub status: Status,
    /// 64 KiB of memory, zero-filled at construction. The six top bytes
    /// hold the NMI/RESET/IRQ vectors.
    pub mem: Box<[u8; MEM_SIZE]>,
    /// Bus signals as of the end of the last full cycle.
    pub bus: BusState,
    /// Half-cycle counter; the core acts when it turns odd.
    pub tick: u8,
    /// Total cycles the current instruction will take. May grow mid-flight
    /// on a page cross or a taken branch.
    pub cycles: u8,
    /// Cycles elapsed within the current instruction, `0 ≤ t ≤ cycles`.
    pub t: u8,
    /// Full cycles elapsed since the last reset.
    pub total_cycles: u64,
    /// Mnemonic of the instruction currently executing, `"???"` once
    /// jammed.
    pub instruction: &'static str,
    /// Human-readable label of the current addressing mode.
    pub addr_mode: &'static str,
    /// One-line description of what the current instruction does.
    pub opcode_action: String,
    /// Description of what the processor did on the last cycle.
    pub cycle_action: String,
    /// Disassembly of the next [`CODE_LIMIT`] instructions, current first.
    pub code: Vec<String>,

    // Per-instruction sequencing state.
    pub(crate) opcode: Option<u8>,
    pub(crate) mode: AddrMode,
    pub(crate) effective_addr: u16,
    pub(crate) offset: u8,
    pub(crate) jump: bool,
    pub(crate) branch: bool,
    pub(crate) exec: bool,
    pub(crate) irq: bool,
    pub(crate) nmi: bool,
    pub(crate) brk: bool,
    pub(crate) in_reset: bool,
    pub(crate) run_int: bool,
}

impl Cpu {
    /// Creates a core with zero-filled memory and resets it.
    ///
    /// `core_test` selects the warm reset path (see [`Cpu::reset`]).
    #[must_use]
    pub fn new(core_test: bool) -> Self {
        let mut cpu = Self {
            a: 0,
            x: 0,
            y: 0,
            pc: 0,
            sp: 0x01FF,
            status: Status::U,
            mem: Box::new([0; MEM_SIZE]),
            bus: BusState::default(),
            tick: 0,
            cycles: 0,
            t: 0,
            total_cycles: 0,
            instruction: "",
            addr_mode: "",
            opcode_action: String::new(),
            cycle_action: String::new(),
            code: vec![String::new(); CODE_LIMIT],
            opcode: None,
            mode: AddrMode::Imp,
            effective_addr: 0,
            offset: 0,
            jump: false,
            branch: false,
            exec: false,
            irq: false,
            nmi: false,
            brk: false,
            in_reset: false,
            run_int: false,
        };
        cpu.reset(core_test);
        cpu
    }

    /// Resets the core.
    ///
    /// A cold reset (`core_test == false`) schedules the 7-cycle reset
    /// sequence: SP starts at the bottom of the stack page and ends at
    /// `$01FD` after the three discarded stack cycles, and PC is loaded
    /// from the RESET vector on the final two cycles. A warm reset
    /// (`core_test == true`) jumps straight to the vector with SP at
    /// `$01FF`, leaving memory and registers usable by a test harness.
    pub fn reset(&mut self, core_test: bool) {
        self.opcode = None;
        self.cycles = 0;
        self.total_cycles = 0;
        self.tick = 0;
        self.t = 0;
        self.pc = u16::from(self.mem[vectors::RESET as usize])
            | (u16::from(self.mem[vectors::RESET as usize + 1]) << 8);
        self.sp = 0x01FF;

        self.bus.last_read = None;
        self.bus.last_write = None;
        self.addr_mode = "";
        self.opcode_action.clear();
        self.cycle_action.clear();

        self.status.insert(Status::U);

        self.jump = false;
        self.branch = false;
        self.irq = false;
        self.brk = false;
        self.nmi = false;
        self.exec = false;

        if core_test {
            self.in_reset = false;
            self.run_int = false;
        } else {
            // The reset sequence itself walks SP up to $01FD.
            self.sp = 0x0100;
            self.in_reset = true;
            self.run_int = true;
        }

        debug!(
            "{} reset, PC primed to ${:04X}",
            if core_test { "warm" } else { "cold" },
            self.pc
        );
    }

    /// Advances the core by one half-cycle.
    ///
    /// Only every other call performs work, modelling the rising edge of
    /// the square-wave clock. On an active tick the core either continues
    /// the current micro-sequence or, at an instruction boundary, checks
    /// pending interrupts and fetches the next opcode. Safe to call
    /// indefinitely, including after an illegal opcode has jammed
    /// execution.
    pub fn clock(&mut self) {
        self.tick = self.tick.wrapping_add(1);
        if self.tick % 2 != 1 {
            return;
        }

        if self.cycles == self.t {
            // Previous instruction complete: enter a pending interrupt or
            // fetch the next opcode.
            self.t = 0;
            if self.irq || self.nmi {
                self.addr_mode = "";
                self.run_int = true;
                if self.jump {
                    // A control transfer just completed; PC already sits on
                    // its target, so step back one to keep the pushed
                    // return address pointing there.
                    self.pc = self.pc.wrapping_sub(1);
                }
            } else {
                // Advance past the previous instruction unless PC was set
                // by a jump/branch, or nothing has executed yet.
                if self.opcode.is_some() && !self.jump {
                    self.pc = self.pc.wrapping_add(1);
                }
                if self.exec {
                    // Immediate-mode semantics land together with this fetch.
                    self.cycle_action = "EXECUTE PREVIOUS INSTRUCTION\nAND FETCH A NEW OPCODE".into();
                    self.exec = false;
                } else {
                    self.cycle_action = "FETCH AN OPCODE".into();
                }
                self.addr_mode = "";
                self.opcode_action.clear();

                self.bus_read(self.pc);
                self.opcode = Some(self.bus.data);
                self.disassemble();
            }
        }

        if self.run_int {
            self.interrupt_op();
            self.t += 1;
            if self.t == self.cycles {
                self.run_int = false;
            }
        } else {
            self.dispatch();
        }

        // The stack pointer is updated in several places; keep it confined
        // to the stack page no matter which path ran.
        self.sp = 0x0100 | (self.sp & 0x00FF);
        self.bus.record_access();
        self.total_cycles += 1;
    }

    /// Pends a hardware interrupt, to be taken at the next instruction
    /// boundary.
    ///
    /// IRQ is ignored while the I flag is set; both kinds are ignored
    /// while the reset sequence is running.
    pub fn trigger_interrupt(&mut self, kind: Interrupt) {
        if self.in_reset {
            return;
        }
        match kind {
            Interrupt::Irq => {
                if !self.status.contains(Status::I) {
                    self.irq = true;
                    self.brk = false;
                    self.nmi = false;
                    debug!("IRQ pended at PC=${:04X}", self.pc);
                }
            }
            Interrupt::Nmi => {
                self.nmi = true;
                self.irq = false;
                self.brk = false;
                debug!("NMI pended at PC=${:04X}", self.pc);
            }
        }
    }

    /// Opcode byte currently executing, `None` only between a reset and
    /// the first fetch.
    #[must_use]
    pub fn opcode(&self) -> Option<u8> {
        self.opcode
    }

    /// True once an undocumented opcode has been reached; the core then
    /// repeats the illegal handler forever without advancing.
    #[must_use]
    pub fn is_jammed(&self) -> bool {
        self.instruction == "???"
    }

    /// One cycle of the shared 7-cycle sequence behind RESET, IRQ, NMI
    /// and BRK.
    pub(crate) fn interrupt_op(&mut self) {
        match self.t {
            0 => {
                self.opcode_action = if self.in_reset {
                    "RESET SEQUENCE"
                } else if self.irq {
                    "HARDWARE INTERRUPT"
                } else if self.brk {
                    "SOFTWARE INTERRUPT"
                } else {
                    "NON-MASKABLE INTERRUPT"
                }
                .into();
                self.addr_mode = "";
                self.cycle_action.clear();
                self.cycles = 7;
                self.jump = true;
                self.bus.rw = true;
                self.bus.discarded = false;
                self.bus_read(self.pc);
            }
            1 => {
                if self.brk {
                    // BRK resumes two bytes past the opcode, not one.
                    self.pc = self.pc.wrapping_add(1);
                }
                self.bus_read(self.pc);
                self.cycle_action.clear();
                self.bus.discarded = true;
            }
            2 => {
                let hi = (self.pc >> 8) as u8;
                self.stack_cycle(hi, "PUSH HIGH BYTE OF PC TO STACK");
            }
            3 => {
                let lo = (self.pc & 0x00FF) as u8;
                self.stack_cycle(lo, "PUSH LOW BYTE OF PC TO STACK");
            }
            4 => {
                // Only the stored copy of B distinguishes hardware
                // interrupts; the live flag comes back set.
                let pushed = self.status.to_stack_byte(!(self.irq || self.nmi));
                self.status.insert(Status::B);
                let action = if self.brk || self.in_reset {
                    "PUSH STATUS REGISTER TO STACK"
                } else {
                    "PUSH STATUS REGISTER TO STACK\nWITH B CLEARED"
                };
                self.stack_cycle(pushed, action);
            }
            5 => {
                self.bus.rw = true;
                self.bus.discarded = false;
                let (vector, action) = if self.in_reset {
                    (vectors::RESET, "FETCH LOW BYTE OF RESET VECTOR")
                } else if self.irq || self.brk {
                    (vectors::IRQ, "FETCH LOW BYTE OF INTERRUPT\nVECTOR")
                } else {
                    (vectors::NMI, "FETCH LOW BYTE OF INTERRUPT\nVECTOR")
                };
                self.cycle_action = action.into();
                self.bus_read(vector);
                self.effective_addr = u16::from(self.bus.data);
            }
            6 => {
                let (vector, action) = if self.in_reset {
                    (vectors::RESET, "FETCH HIGH BYTE OF RESET VECTOR")
                } else if self.irq || self.brk {
                    (vectors::IRQ, "FETCH HIGH BYTE OF INTERRUPT\nVECTOR")
                } else {
                    (vectors::NMI, "FETCH HIGH BYTE OF INTERRUPT\nVECTOR")
                };
                self.cycle_action = action.into();
                self.bus_read(vector.wrapping_add(1));
                self.effective_addr |= u16::from(self.bus.data) << 8;
                self.pc = self.effective_addr;
                self.status.insert(Status::I);

                self.in_reset = false;
                self.irq = false;
                self.nmi = false;
                self.brk = false;
            }
            _ => {}
        }
    }

    /// One stack cycle of the interrupt sequence. During reset the pushes
    /// degrade to discarded reads and memory stays untouched.
    fn stack_cycle(&mut self, value: u8, action: &'static str) {
        self.bus.addr = self.sp;
        self.bus.data = value;
        if self.in_reset {
            self.bus.rw = true;
            self.bus.discarded = true;
        } else {
            self.bus.rw = false;
            self.bus.discarded = false;
            self.mem[self.bus.addr as usize] = value;
            self.cycle_action = action.into();
        }
        self.sp = 0x0100 | (self.sp.wrapping_sub(1) & 0x00FF);
    }

    /// Runs one cycle of the current opcode's micro-sequence.
    fn dispatch(&mut self) {
        let Some(opcode) = self.opcode else {
            return;
        };
        match OPCODE_TABLE[opcode as usize] {
            Mnemonic::Adc => self.adc(),
            Mnemonic::And => self.and(),
            Mnemonic::Asl => self.asl(),
            Mnemonic::Bcc => self.bcc(),
            Mnemonic::Bcs => self.bcs(),
            Mnemonic::Beq => self.beq(),
            Mnemonic::Bit => self.bit(),
            Mnemonic::Bmi => self.bmi(),
            Mnemonic::Bne => self.bne(),
            Mnemonic::Bpl => self.bpl(),
            Mnemonic::Brk => self.brk(),
            Mnemonic::Bvc => self.bvc(),
            Mnemonic::Bvs => self.bvs(),
            Mnemonic::Clc => self.clc(),
            Mnemonic::Cld => self.cld(),
            Mnemonic::Cli => self.cli(),
            Mnemonic::Clv => self.clv(),
            Mnemonic::Cmp => self.cmp(),
            Mnemonic::Cpx => self.cpx(),
            Mnemonic::Cpy => self.cpy(),
            Mnemonic::Dec => self.dec(),
            Mnemonic::Dex => self.dex(),
            Mnemonic::Dey => self.dey(),
            Mnemonic::Eor => self.eor(),
            Mnemonic::Inc => self.inc(),
            Mnemonic::Inx => self.inx(),
            Mnemonic::Iny => self.iny(),
            Mnemonic::Jmp => self.jmp(),
            Mnemonic::Jsr => self.jsr(),
            Mnemonic::Lda => self.lda(),
            Mnemonic::Ldx => self.ldx(),
            Mnemonic::Ldy => self.ldy(),
            Mnemonic::Lsr => self.lsr(),
            Mnemonic::Nop => self.nop(),
            Mnemonic::Ora => self.ora(),
            Mnemonic::Pha => self.pha(),
            Mnemonic::Php => self.php(),
            Mnemonic::Pla => self.pla(),
            Mnemonic::Plp => self.plp(),
            Mnemonic::Rol => self.rol(),
            Mnemonic::Ror => self.ror(),
            Mnemonic::Rti => self.rti(),
            Mnemonic::Rts => self.rts(),
            Mnemonic::Sbc => self.sbc(),
            Mnemonic::Sec => self.sec(),
            Mnemonic::Sed => self.sed(),
            Mnemonic::Sei => self.sei(),
            Mnemonic::Sta => self.sta(),
            Mnemonic::Stx => self.stx(),
            Mnemonic::Sty => self.sty(),
            Mnemonic::Tax => self.tax(),
            Mnemonic::Tay => self.tay(),
            Mnemonic::Tsx => self.tsx(),
            Mnemonic::Txa => self.txa(),
            Mnemonic::Txs => self.txs(),
            Mnemonic::Tya => self.tya(),
            Mnemonic::Ill => self.ill(),
        }
    }

    /// Drives a read cycle: address on the bus, memory contents on the
    /// data bus.
    pub(crate) fn bus_read(&mut self, addr: u16) {
        self.bus.addr = addr;
        self.bus.data = self.mem[addr as usize];
    }

    /// Mnemonic of the opcode currently executing.
    pub(crate) fn mnemonic(&self) -> Mnemonic {
        self.opcode
            .map_or(Mnemonic::Ill, |op| OPCODE_TABLE[op as usize])
    }

    /// First cycle common to every instruction: the opcode fetch itself.
    pub(crate) fn op_fetch_cycle(&mut self) {
        self.jump = false;
        self.bus.rw = true;
        self.bus.discarded = false;
        self.bus_read(self.pc);
    }
}

//! Addressing modes and the group-mask decoder.
//!
//! Most of the instruction set encodes its addressing mode in a handful of
//! opcode bits. Three masks cover the grouped families; everything else
//! (branches, jumps, stack and implied operations) has a fixed mode per
//! opcode. The decoder also assigns the base cycle count, before any
//! page-cross or branch-taken penalty.

use crate::opcodes::{Mnemonic, OPCODE_TABLE};

/// Addressing modes of the NMOS 6502.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum AddrMode {
    /// Operates on the accumulator (ASL A, ROR A, ...).
    Acc,
    /// 8-bit constant following the opcode (LDA #$42).
    Imm,
    /// No operand (CLC, INX, ...).
    Imp,
    /// 8-bit address into page zero (LDA $42).
    Zero,
    /// Zero-page address plus X, wrapping within page zero.
    ZeroX,
    /// Zero-page address plus Y, wrapping within page zero.
    ZeroY,
    /// Full 16-bit address (LDA $1234).
    Abs,
    /// 16-bit address plus X.
    AbsX,
    /// 16-bit address plus Y.
    AbsY,
    /// 16-bit pointer to the target address; JMP only, with the
    /// page-wrap quirk when the pointer sits at $xxFF.
    Ind,
    /// Pointer in page zero indexed by X before the fetch (LDA ($42,X)).
    IndX,
    /// Pointer in page zero, indexed by Y after the fetch (LDA ($42),Y).
    IndY,
    /// Signed 8-bit branch offset.
    Rel,
    /// Undocumented opcode.
    Ill,
}

impl AddrMode {
    /// Human-readable label surfaced through the diagnostic state.
    pub(crate) const fn label(self) -> &'static str {
        match self {
            Self::Acc => "ACCUMULATOR",
            Self::Imm => "IMMEDIATE",
            Self::Imp => "IMPLIED",
            Self::Zero => "ZERO PAGE",
            Self::ZeroX => "ZERO PAGE, X INDEXED",
            Self::ZeroY => "ZERO PAGE, Y INDEXED",
            Self::Abs => "ABSOLUTE",
            Self::AbsX => "ABSOLUTE, X INDEXED",
            Self::AbsY => "ABSOLUTE, Y INDEXED",
            Self::Ind => "INDIRECT",
            Self::IndX => "INDIRECT X INDEXED",
            Self::IndY => "INDIRECT Y INDEXED",
            Self::Rel => "RELATIVE",
            Self::Ill => "???",
        }
    }

    /// Operand bytes following the opcode, used by the disassembler.
    pub(crate) const fn operand_bytes(self) -> u16 {
        match self {
            Self::Acc | Self::Imp | Self::Ill => 0,
            Self::Imm | Self::Zero | Self::ZeroX | Self::ZeroY | Self::IndX | Self::IndY
            | Self::Rel => 1,
            Self::Abs | Self::AbsX | Self::AbsY | Self::Ind => 2,
        }
    }
}

/// Mode and base cycle count resolved for one opcode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Decoded {
    pub mode: AddrMode,
    pub cycles: u8,
}

const fn decoded(mode: AddrMode, cycles: u8) -> Decoded {
    Decoded { mode, cycles }
}

/// Resolves addressing mode and base cycle count for any opcode.
///
/// Both the execution engine (on the first cycle of an instruction) and
/// the disassembler run through here, so the two can never disagree.
pub(crate) fn decode(opcode: u8) -> Decoded {
    use Mnemonic::{
        Adc, And, Asl, Bcc, Bcs, Beq, Bit, Bmi, Bne, Bpl, Brk, Bvc, Bvs, Cmp, Cpx, Cpy, Dec,
        Eor, Ill, Inc, Jmp, Jsr, Lda, Ldx, Ldy, Lsr, Ora, Pha, Php, Pla, Plp, Rol, Ror, Rti,
        Rts, Sbc, Sta, Stx, Sty,
    };

    let mnemonic = OPCODE_TABLE[opcode as usize];
    match mnemonic {
        Ora | And | Eor | Adc | Lda | Cmp | Sbc | Sta | Stx | Sty | Asl | Lsr | Rol | Ror
        | Ldx | Ldy => group1(opcode, mnemonic),
        Inc | Dec => group2a(opcode),
        Cpx | Cpy => group2b(opcode),
        // The fourth bit selects between the two BIT encodings.
        Bit => {
            if opcode & 0b1000 != 0 {
                decoded(AddrMode::Abs, 4)
            } else {
                decoded(AddrMode::Zero, 3)
            }
        }
        // The fifth bit distinguishes JMP (abs) from JMP (ind).
        Jmp => {
            if opcode & 0b0010_0000 != 0 {
                decoded(AddrMode::Ind, 5)
            } else {
                decoded(AddrMode::Abs, 3)
            }
        }
        Jsr => decoded(AddrMode::Abs, 6),
        Rts | Rti => decoded(AddrMode::Imp, 6),
        Brk => decoded(AddrMode::Imp, 7),
        Pha | Php => decoded(AddrMode::Imp, 3),
        Pla | Plp => decoded(AddrMode::Imp, 4),
        Bcc | Bcs | Beq | Bmi | Bne | Bpl | Bvc | Bvs => decoded(AddrMode::Rel, 2),
        Ill => decoded(AddrMode::Ill, 0),
        // Transfers, register increments, flag operations, NOP.
        _ => decoded(AddrMode::Imp, 2),
    }
}

/// Group 1 (mask `0b0001_1100`): the arithmetic/logic/load/store family.
///
/// Two sub-groups share the mode bits but read them differently: the
/// shift/rotate and LDX/LDY instructions use the "B" table, where code
/// `000` means immediate and `010` accumulator, while the rest use the
/// "A" table, where `000` means indexed-indirect. STA keeps the full
/// store cycle counts; indexed reads get their penalty cycle at runtime.
fn group1(opcode: u8, mnemonic: Mnemonic) -> Decoded {
    use Mnemonic::{Asl, Ldx, Ldy, Lsr, Rol, Ror, Sta, Stx};

    let bits = (opcode & 0b0001_1100) >> 2;
    let sub_b = matches!(mnemonic, Asl | Ldx | Ldy | Lsr | Rol | Ror);
    let store = mnemonic == Sta;
    let load = matches!(mnemonic, Ldx | Ldy);

    if sub_b {
        match bits {
            0 => decoded(AddrMode::Imm, 2),
            1 => decoded(AddrMode::Zero, if load { 3 } else { 5 }),
            2 => decoded(AddrMode::Acc, 2),
            3 => decoded(AddrMode::Abs, if load { 4 } else { 6 }),
            // LDX is indexed with Y where the others use X.
            5 => {
                if mnemonic == Ldx {
                    decoded(AddrMode::ZeroY, 4)
                } else {
                    decoded(AddrMode::ZeroX, if load { 4 } else { 6 })
                }
            }
            7 => {
                if mnemonic == Ldx {
                    decoded(AddrMode::AbsY, 4)
                } else {
                    decoded(AddrMode::AbsX, if load { 4 } else { 7 })
                }
            }
            _ => decoded(AddrMode::Ill, 2),
        }
    } else {
        match bits {
            0 => decoded(AddrMode::IndX, 6),
            1 => decoded(AddrMode::Zero, 3),
            2 => decoded(AddrMode::Imm, 2),
            3 => decoded(AddrMode::Abs, 4),
            4 => decoded(AddrMode::IndY, if store { 6 } else { 5 }),
            // STX stores through zero page,Y in this slot.
            5 => {
                if mnemonic == Stx {
                    decoded(AddrMode::ZeroY, 4)
                } else {
                    decoded(AddrMode::ZeroX, 4)
                }
            }
            6 => decoded(AddrMode::AbsY, if store { 5 } else { 4 }),
            7 => decoded(AddrMode::AbsX, if store { 5 } else { 4 }),
            _ => decoded(AddrMode::Ill, 2),
        }
    }
}

/// Group 2A (mask `0b0001_1000`): the INC/DEC memory family.
fn group2a(opcode: u8) -> Decoded {
    match (opcode & 0b0001_1000) >> 3 {
        0 => decoded(AddrMode::Zero, 5),
        1 => decoded(AddrMode::Abs, 6),
        2 => decoded(AddrMode::ZeroX, 6),
        _ => decoded(AddrMode::AbsX, 7),
    }
}

/// Group 2B (mask `0b0000_1100`): CPX/CPY.
fn group2b(opcode: u8) -> Decoded {
    match (opcode & 0b0000_1100) >> 2 {
        0 => decoded(AddrMode::Imm, 2),
        1 => decoded(AddrMode::Zero, 3),
        _ => decoded(AddrMode::Abs, 4),
    }
}

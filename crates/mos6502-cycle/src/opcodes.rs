//! Opcode dispatch table for the documented NMOS 6502 instruction set.
//!
//! All 151 documented opcodes map to one of 56 mnemonics; the remaining
//! 105 slots map to [`Mnemonic::Ill`], which jams the emulation by design.

/// Instruction mnemonic selected by the dispatch table.
///
/// One variant per documented instruction plus `Ill` for every
/// undocumented slot of the opcode matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Mnemonic {
    Adc,
    And,
    Asl,
    Bcc,
    Bcs,
    Beq,
    Bit,
    Bmi,
    Bne,
    Bpl,
    Brk,
    Bvc,
    Bvs,
    Clc,
    Cld,
    Cli,
    Clv,
    Cmp,
    Cpx,
    Cpy,
    Dec,
    Dex,
    Dey,
    Eor,
    Inc,
    Inx,
    Iny,
    Jmp,
    Jsr,
    Lda,
    Ldx,
    Ldy,
    Lsr,
    Nop,
    Ora,
    Pha,
    Php,
    Pla,
    Plp,
    Rol,
    Ror,
    Rti,
    Rts,
    Sbc,
    Sec,
    Sed,
    Sei,
    Sta,
    Stx,
    Sty,
    Tax,
    Tay,
    Tsx,
    Txa,
    Txs,
    Tya,
    Ill,
}

impl Mnemonic {
    /// Three-letter mnemonic string, `"???"` for undocumented opcodes.
    pub(crate) const fn as_str(self) -> &'static str {
        match self {
            Self::Adc => "ADC",
            Self::And => "AND",
            Self::Asl => "ASL",
            Self::Bcc => "BCC",
            Self::Bcs => "BCS",
            Self::Beq => "BEQ",
            Self::Bit => "BIT",
            Self::Bmi => "BMI",
            Self::Bne => "BNE",
            Self::Bpl => "BPL",
            Self::Brk => "BRK",
            Self::Bvc => "BVC",
            Self::Bvs => "BVS",
            Self::Clc => "CLC",
            Self::Cld => "CLD",
            Self::Cli => "CLI",
            Self::Clv => "CLV",
            Self::Cmp => "CMP",
            Self::Cpx => "CPX",
            Self::Cpy => "CPY",
            Self::Dec => "DEC",
            Self::Dex => "DEX",
            Self::Dey => "DEY",
            Self::Eor => "EOR",
            Self::Inc => "INC",
            Self::Inx => "INX",
            Self::Iny => "INY",
            Self::Jmp => "JMP",
            Self::Jsr => "JSR",
            Self::Lda => "LDA",
            Self::Ldx => "LDX",
            Self::Ldy => "LDY",
            Self::Lsr => "LSR",
            Self::Nop => "NOP",
            Self::Ora => "ORA",
            Self::Pha => "PHA",
            Self::Php => "PHP",
            Self::Pla => "PLA",
            Self::Plp => "PLP",
            Self::Rol => "ROL",
            Self::Ror => "ROR",
            Self::Rti => "RTI",
            Self::Rts => "RTS",
            Self::Sbc => "SBC",
            Self::Sec => "SEC",
            Self::Sed => "SED",
            Self::Sei => "SEI",
            Self::Sta => "STA",
            Self::Stx => "STX",
            Self::Sty => "STY",
            Self::Tax => "TAX",
            Self::Tay => "TAY",
            Self::Tsx => "TSX",
            Self::Txa => "TXA",
            Self::Txs => "TXS",
            Self::Tya => "TYA",
            Self::Ill => "???",
        }
    }
}

/// 256-entry dispatch table, indexed by opcode byte.
///
/// Transcribed from the standard NMOS 6502 opcode matrix.
#[rustfmt::skip]
pub(crate) static OPCODE_TABLE: [Mnemonic; 256] = {
    use Mnemonic::{
        Adc, And, Asl, Bcc, Bcs, Beq, Bit, Bmi, Bne, Bpl, Brk, Bvc, Bvs, Clc, Cld, Cli, Clv,
        Cmp, Cpx, Cpy, Dec, Dex, Dey, Eor, Ill, Inc, Inx, Iny, Jmp, Jsr, Lda, Ldx, Ldy, Lsr,
        Nop, Ora, Pha, Php, Pla, Plp, Rol, Ror, Rti, Rts, Sbc, Sec, Sed, Sei, Sta, Stx, Sty,
        Tax, Tay, Tsx, Txa, Txs, Tya,
    };
    [
        //       0    1    2    3    4    5    6    7    8    9    A    B    C    D    E    F
        /* 0 */ Brk, Ora, Ill, Ill, Ill, Ora, Asl, Ill, Php, Ora, Asl, Ill, Ill, Ora, Asl, Ill,
        /* 1 */ Bpl, Ora, Ill, Ill, Ill, Ora, Asl, Ill, Clc, Ora, Ill, Ill, Ill, Ora, Asl, Ill,
        /* 2 */ Jsr, And, Ill, Ill, Bit, And, Rol, Ill, Plp, And, Rol, Ill, Bit, And, Rol, Ill,
        /* 3 */ Bmi, And, Ill, Ill, Ill, And, Rol, Ill, Sec, And, Ill, Ill, Ill, And, Rol, Ill,
        /* 4 */ Rti, Eor, Ill, Ill, Ill, Eor, Lsr, Ill, Pha, Eor, Lsr, Ill, Jmp, Eor, Lsr, Ill,
        /* 5 */ Bvc, Eor, Ill, Ill, Ill, Eor, Lsr, Ill, Cli, Eor, Ill, Ill, Ill, Eor, Lsr, Ill,
        /* 6 */ Rts, Adc, Ill, Ill, Ill, Adc, Ror, Ill, Pla, Adc, Ror, Ill, Jmp, Adc, Ror, Ill,
        /* 7 */ Bvs, Adc, Ill, Ill, Ill, Adc, Ror, Ill, Sei, Adc, Ill, Ill, Ill, Adc, Ror, Ill,
        /* 8 */ Ill, Sta, Ill, Ill, Sty, Sta, Stx, Ill, Dey, Ill, Txa, Ill, Sty, Sta, Stx, Ill,
        /* 9 */ Bcc, Sta, Ill, Ill, Sty, Sta, Stx, Ill, Tya, Sta, Txs, Ill, Ill, Sta, Ill, Ill,
        /* A */ Ldy, Lda, Ldx, Ill, Ldy, Lda, Ldx, Ill, Tay, Lda, Tax, Ill, Ldy, Lda, Ldx, Ill,
        /* B */ Bcs, Lda, Ill, Ill, Ldy, Lda, Ldx, Ill, Clv, Lda, Tsx, Ill, Ldy, Lda, Ldx, Ill,
        /* C */ Cpy, Cmp, Ill, Ill, Cpy, Cmp, Dec, Ill, Iny, Cmp, Dex, Ill, Cpy, Cmp, Dec, Ill,
        /* D */ Bne, Cmp, Ill, Ill, Ill, Cmp, Dec, Ill, Cld, Cmp, Ill, Ill, Ill, Cmp, Dec, Ill,
        /* E */ Cpx, Sbc, Ill, Ill, Cpx, Sbc, Inc, Ill, Inx, Sbc, Nop, Ill, Cpx, Sbc, Inc, Ill,
        /* F */ Beq, Sbc, Ill, Ill, Ill, Sbc, Inc, Ill, Sed, Sbc, Ill, Ill, Ill, Sbc, Inc, Ill,
    ]
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn documented_opcode_count() {
        let documented = OPCODE_TABLE
            .iter()
            .filter(|&&m| m != Mnemonic::Ill)
            .count();
        assert_eq!(documented, 151);
    }

    #[test]
    fn table_spot_checks() {
        assert_eq!(OPCODE_TABLE[0x00], Mnemonic::Brk);
        assert_eq!(OPCODE_TABLE[0xA9], Mnemonic::Lda);
        assert_eq!(OPCODE_TABLE[0x4C], Mnemonic::Jmp);
        assert_eq!(OPCODE_TABLE[0x6C], Mnemonic::Jmp);
        assert_eq!(OPCODE_TABLE[0x20], Mnemonic::Jsr);
        assert_eq!(OPCODE_TABLE[0xEA], Mnemonic::Nop);
        assert_eq!(OPCODE_TABLE[0x02], Mnemonic::Ill);
        assert_eq!(OPCODE_TABLE[0xFF], Mnemonic::Ill);
    }

    #[test]
    fn mnemonic_strings_are_three_chars() {
        for &m in &OPCODE_TABLE {
            assert_eq!(m.as_str().len(), 3);
        }
    }
}

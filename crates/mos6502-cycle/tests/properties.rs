//! Property tests: arithmetic against reference models and structural
//! invariants over arbitrary tick streams.

use proptest::prelude::*;

use mos6502_cycle::{Cpu, Status};

/// Packs a value below 100 as two BCD digits.
fn bcd(n: u8) -> u8 {
    ((n / 10) << 4) | (n % 10)
}

/// Warm core with a single two-byte instruction at $8000.
fn cpu_with_op(opcode: u8, operand: u8) -> Cpu {
    let mut cpu = Cpu::new(true);
    cpu.mem[0xFFFC] = 0x00;
    cpu.mem[0xFFFD] = 0x80;
    cpu.mem[0x8000] = opcode;
    cpu.mem[0x8001] = operand;
    cpu.reset(true);
    cpu
}

fn run_cycles(cpu: &mut Cpu, cycles: u32) {
    for _ in 0..cycles * 2 {
        cpu.clock();
    }
}

proptest! {
    /// Binary ADC behaves as a 9-bit add with the standard carry and
    /// signed-overflow rules.
    #[test]
    fn binary_adc_matches_reference(a: u8, operand: u8, carry: bool) {
        let mut cpu = cpu_with_op(0x69, operand);
        cpu.status.set(Status::C, carry);
        cpu.a = a;
        run_cycles(&mut cpu, 2);

        let total = u16::from(a) + u16::from(operand) + u16::from(carry);
        let expected = (total & 0xFF) as u8;
        prop_assert_eq!(cpu.a, expected);
        prop_assert_eq!(cpu.status.contains(Status::C), total > 0xFF);
        prop_assert_eq!(cpu.status.contains(Status::Z), expected == 0);
        prop_assert_eq!(cpu.status.contains(Status::N), expected & 0x80 != 0);
        let overflow = (a ^ expected) & (operand ^ expected) & 0x80 != 0;
        prop_assert_eq!(cpu.status.contains(Status::V), overflow);
    }

    /// Binary SBC is ADC of the inverted operand.
    #[test]
    fn binary_sbc_matches_reference(a: u8, operand: u8, carry: bool) {
        let mut cpu = cpu_with_op(0xE9, operand);
        cpu.status.set(Status::C, carry);
        cpu.a = a;
        run_cycles(&mut cpu, 2);

        let total = u16::from(a) + u16::from(!operand) + u16::from(carry);
        let expected = (total & 0xFF) as u8;
        prop_assert_eq!(cpu.a, expected);
        prop_assert_eq!(cpu.status.contains(Status::C), total > 0xFF);
        prop_assert_eq!(cpu.status.contains(Status::Z), expected == 0);
        prop_assert_eq!(cpu.status.contains(Status::N), expected & 0x80 != 0);
    }

    /// Decimal ADC on valid BCD operands is base-100 addition.
    #[test]
    fn decimal_adc_matches_bcd_arithmetic(a in 0u8..100, b in 0u8..100, carry: bool) {
        let mut cpu = cpu_with_op(0x69, bcd(b));
        cpu.status.insert(Status::D);
        cpu.status.set(Status::C, carry);
        cpu.a = bcd(a);
        run_cycles(&mut cpu, 2);

        let total = u16::from(a) + u16::from(b) + u16::from(carry);
        prop_assert_eq!(cpu.a, bcd((total % 100) as u8));
        prop_assert_eq!(cpu.status.contains(Status::C), total > 99);
    }

    /// Decimal SBC on valid BCD operands is base-100 subtraction with
    /// borrow through the carry flag.
    #[test]
    fn decimal_sbc_matches_bcd_arithmetic(a in 0u8..100, b in 0u8..100, carry: bool) {
        let mut cpu = cpu_with_op(0xE9, bcd(b));
        cpu.status.insert(Status::D);
        cpu.status.set(Status::C, carry);
        cpu.a = bcd(a);
        run_cycles(&mut cpu, 2);

        let lhs = i32::from(a);
        let rhs = i32::from(b) + i32::from(!carry);
        let difference = (lhs - rhs).rem_euclid(100);
        prop_assert_eq!(cpu.a, bcd(difference as u8));
        prop_assert_eq!(cpu.status.contains(Status::C), lhs >= rhs);
    }

    /// Compare never touches the register and always agrees with the
    /// subtraction it models.
    #[test]
    fn compare_matches_subtraction(a: u8, operand: u8) {
        let mut cpu = cpu_with_op(0xC9, operand);
        cpu.a = a;
        run_cycles(&mut cpu, 2);

        prop_assert_eq!(cpu.a, a);
        prop_assert_eq!(cpu.status.contains(Status::Z), a == operand);
        prop_assert_eq!(cpu.status.contains(Status::C), a >= operand);
        prop_assert_eq!(
            cpu.status.contains(Status::N),
            a.wrapping_sub(operand) & 0x80 != 0
        );
    }

    /// Structural invariants survive arbitrary programs, including ones
    /// that wander into undocumented opcodes and jam: the stack pointer
    /// never leaves page one, the intra-instruction counter never
    /// overruns the cycle count, and U reads as set.
    #[test]
    fn invariants_hold_over_random_tick_streams(
        program in proptest::collection::vec(any::<u8>(), 1..256),
        ticks in 1usize..2048,
    ) {
        let mut cpu = Cpu::new(false);
        cpu.mem[0xFFFC] = 0x00;
        cpu.mem[0xFFFD] = 0x80;
        cpu.load_program_at(&program, 0x8000);

        for _ in 0..ticks {
            cpu.clock();
            prop_assert_eq!(cpu.sp & 0xFF00, 0x0100);
            prop_assert!(cpu.t <= cpu.cycles);
            prop_assert!(cpu.status.contains(Status::U));
        }
    }
}

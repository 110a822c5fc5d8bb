//! The documented instruction set.
//!
//! Every handler runs once per cycle of its instruction. On the first
//! cycle it resolves its addressing mode and cycle count, then it drives
//! the matching micro-sequence, and on the final cycle it applies the
//! semantic effect to registers and memory. Instructions with bespoke bus
//! behaviour (JMP, JSR, RTS, RTI, BRK) carry their sequence inline.

use log::trace;

use crate::addressing::{decode, AddrMode};
use crate::cpu::Cpu;
use crate::status::Status;

impl Cpu {
    /// Resolves mode, cycle count and the mode label for the opcode that
    /// was just fetched.
    fn apply_decoded(&mut self) {
        if let Some(op) = self.opcode {
            let d = decode(op);
            self.mode = d.mode;
            self.cycles = d.cycles;
            self.addr_mode = d.mode.label();
        }
    }

    /// Z, C and N from a register/operand comparison.
    fn compare(&mut self, register: u8) {
        let operand = self.bus.data;
        self.status.set(Status::Z, register == operand);
        self.status.set(Status::C, register >= operand);
        self.status
            .set(Status::N, register.wrapping_sub(operand) & 0x80 != 0);
    }

    pub(crate) fn adc(&mut self) {
        self.instruction = "ADC";
        if self.t == 0 {
            self.opcode_action = "ADD DATA AND CARRY TO A".into();
            self.apply_decoded();
        }
        self.mem_op();
        self.t += 1;
        if self.t == self.cycles {
            let operand = self.bus.data;
            let previous = self.a;
            let carry = u16::from(self.status.contains(Status::C));
            let result = if self.status.contains(Status::D) {
                // Packed BCD: correct each nibble as it overflows 9. The
                // flags still come from this sum, matching the NMOS parts.
                let mut r = u16::from(previous & 0x0F) + u16::from(operand & 0x0F) + carry;
                if r > 0x09 {
                    r += 0x06;
                }
                r = u16::from(previous & 0xF0)
                    + u16::from(operand & 0xF0)
                    + (if r > 0x0F { 0x10 } else { 0 })
                    + (r & 0x0F);
                if r >= 0xA0 {
                    r += 0x60;
                }
                r
            } else {
                u16::from(previous) + u16::from(operand) + carry
            };
            self.status.set(Status::C, result > 0xFF);
            self.a = (result & 0xFF) as u8;
            self.status.set_zn(self.a);
            self.status
                .set(Status::V, (previous ^ self.a) & (operand ^ self.a) & 0x80 != 0);
        }
    }

    pub(crate) fn and(&mut self) {
        self.instruction = "AND";
        if self.t == 0 {
            self.opcode_action = "PERFORM A BITWISE AND TO A WITH DATA".into();
            self.apply_decoded();
        }
        self.mem_op();
        self.t += 1;
        if self.t == self.cycles {
            self.a &= self.bus.data;
            self.status.set_zn(self.a);
        }
    }

    pub(crate) fn asl(&mut self) {
        self.instruction = "ASL";
        if self.t == 0 {
            self.apply_decoded();
            self.opcode_action = if self.mode == AddrMode::Acc {
                "PERFORM AN ARITHMETIC LEFT\nSHIFT TO A"
            } else {
                "PERFORM AN ARITHMETIC LEFT\nSHIFT TO DATA"
            }
            .into();
        }
        if self.mode == AddrMode::Acc {
            self.byte_op();
        } else {
            self.rmw_op();
        }
        self.t += 1;
        if self.t == self.cycles {
            if self.mode == AddrMode::Acc {
                // Bit 7 moves out into carry before the shift.
                self.status.set(Status::C, self.a & 0x80 != 0);
                self.a <<= 1;
                self.status.set_zn(self.a);
            } else {
                self.status.set(Status::C, self.bus.data & 0x80 != 0);
                self.bus.data <<= 1;
                self.status.set_zn(self.bus.data);
                self.mem[self.bus.addr as usize] = self.bus.data;
            }
        }
    }

    pub(crate) fn bcc(&mut self) {
        self.instruction = "BCC";
        if self.t == 0 {
            self.branch = !self.status.contains(Status::C);
            self.opcode_action = "BRANCH IF CARRY FLAG IS CLEAR".into();
        }
        self.branch_op();
        self.t += 1;
    }

    pub(crate) fn bcs(&mut self) {
        self.instruction = "BCS";
        if self.t == 0 {
            self.branch = self.status.contains(Status::C);
            self.opcode_action = "BRANCH IF CARRY FLAG IS SET".into();
        }
        self.branch_op();
        self.t += 1;
    }

    pub(crate) fn beq(&mut self) {
        self.instruction = "BEQ";
        if self.t == 0 {
            self.branch = self.status.contains(Status::Z);
            self.opcode_action = "BRANCH IF ZERO FLAG IS SET".into();
        }
        self.branch_op();
        self.t += 1;
    }

    pub(crate) fn bit(&mut self) {
        self.instruction = "BIT";
        if self.t == 0 {
            self.exec = true;
            self.apply_decoded();
        }
        self.mem_op();
        // A logical AND against A without touching A; bits 6 and 7 of the
        // operand land in V and N.
        self.t += 1;
        if self.t == self.cycles {
            let operand = self.bus.data;
            self.status.set(Status::V, operand & 0x40 != 0);
            self.status.set(Status::N, operand & 0x80 != 0);
            self.status.set(Status::Z, self.a & operand == 0);
        }
    }

    pub(crate) fn bmi(&mut self) {
        self.instruction = "BMI";
        if self.t == 0 {
            self.branch = self.status.contains(Status::N);
            self.opcode_action = "BRANCH IF NEGATIVE FLAG IS SET".into();
        }
        self.branch_op();
        self.t += 1;
    }

    pub(crate) fn bne(&mut self) {
        self.instruction = "BNE";
        if self.t == 0 {
            self.branch = !self.status.contains(Status::Z);
            self.opcode_action = "BRANCH IF ZERO FLAG IS CLEARED".into();
        }
        self.branch_op();
        self.t += 1;
    }

    pub(crate) fn bpl(&mut self) {
        self.instruction = "BPL";
        if self.t == 0 {
            self.branch = !self.status.contains(Status::N);
            self.opcode_action = "BRANCH IF NEGATIVE FLAG IS CLEARED".into();
        }
        self.branch_op();
        self.t += 1;
    }

    pub(crate) fn brk(&mut self) {
        self.instruction = "BRK";
        if self.t == 0 {
            self.mode = AddrMode::Imp;
            self.addr_mode = AddrMode::Imp.label();
            self.brk = true;
        }
        self.interrupt_op();
        self.t += 1;
    }

    pub(crate) fn bvc(&mut self) {
        self.instruction = "BVC";
        if self.t == 0 {
            self.branch = !self.status.contains(Status::V);
            self.opcode_action = "BRANCH IF OVERFLOW FLAG IS CLEARED".into();
        }
        self.branch_op();
        self.t += 1;
    }

    pub(crate) fn bvs(&mut self) {
        self.instruction = "BVS";
        if self.t == 0 {
            self.branch = self.status.contains(Status::V);
            self.opcode_action = "BRANCH IF OVERFLOW FLAG IS SET".into();
        }
        self.branch_op();
        self.t += 1;
    }

    pub(crate) fn clc(&mut self) {
        self.instruction = "CLC";
        if self.t == 0 {
            self.apply_decoded();
            self.opcode_action = "CLEAR CARRY FLAG".into();
        }
        self.byte_op();
        self.t += 1;
        if self.t == self.cycles {
            self.cycle_action = "CLEAR CARRY FLAG".into();
            self.status.remove(Status::C);
        }
    }

    pub(crate) fn cld(&mut self) {
        self.instruction = "CLD";
        if self.t == 0 {
            self.apply_decoded();
            self.opcode_action = "CLEAR DECIMAL FLAG".into();
        }
        self.byte_op();
        self.t += 1;
        if self.t == self.cycles {
            self.cycle_action = "CLEAR DECIMAL FLAG".into();
            self.status.remove(Status::D);
        }
    }

    pub(crate) fn cli(&mut self) {
        self.instruction = "CLI";
        if self.t == 0 {
            self.apply_decoded();
            self.opcode_action = "CLEAR INTERRUPT FLAG".into();
        }
        self.byte_op();
        self.t += 1;
        if self.t == self.cycles {
            self.cycle_action = "CLEAR INTERRUPT FLAG".into();
            self.status.remove(Status::I);
        }
    }

    pub(crate) fn clv(&mut self) {
        self.instruction = "CLV";
        if self.t == 0 {
            self.apply_decoded();
            self.opcode_action = "CLEAR OVERFLOW FLAG".into();
        }
        self.byte_op();
        self.t += 1;
        if self.t == self.cycles {
            self.cycle_action = "CLEAR OVERFLOW FLAG".into();
            self.status.remove(Status::V);
        }
    }

    pub(crate) fn cmp(&mut self) {
        self.instruction = "CMP";
        if self.t == 0 {
            self.opcode_action = "COMPARE THE VALUES OF A\nAND FETCHED DATA".into();
            self.apply_decoded();
        }
        self.mem_op();
        self.t += 1;
        if self.t == self.cycles {
            self.compare(self.a);
        }
    }

    pub(crate) fn cpx(&mut self) {
        self.instruction = "CPX";
        if self.t == 0 {
            self.opcode_action = "COMPARE THE VALUES OF X\nAND FETCHED DATA".into();
            self.apply_decoded();
        }
        self.mem_op();
        self.t += 1;
        if self.t == self.cycles {
            self.compare(self.x);
        }
    }

    pub(crate) fn cpy(&mut self) {
        self.instruction = "CPY";
        if self.t == 0 {
            self.opcode_action = "COMPARE THE VALUES OF Y\nAND FETCHED DATA".into();
            self.apply_decoded();
        }
        self.mem_op();
        self.t += 1;
        if self.t == self.cycles {
            self.compare(self.y);
        }
    }

    pub(crate) fn dec(&mut self) {
        self.instruction = "DEC";
        if self.t == 0 {
            self.apply_decoded();
            self.opcode_action = "DECREMENT VALUE IN MEMORY BY 1".into();
        }
        self.rmw_op();
        self.t += 1;
        if self.t == self.cycles {
            self.bus.data = self.bus.data.wrapping_sub(1);
            self.mem[self.bus.addr as usize] = self.bus.data;
            self.status.set_zn(self.bus.data);
        }
    }

    pub(crate) fn dex(&mut self) {
        self.instruction = "DEX";
        if self.t == 0 {
            self.apply_decoded();
            self.opcode_action = "DECREMENT X BY 1".into();
        }
        self.byte_op();
        self.t += 1;
        if self.t == self.cycles {
            self.x = self.x.wrapping_sub(1);
            self.status.set_zn(self.x);
            self.cycle_action = "DECREMENT X BY 1".into();
        }
    }

    pub(crate) fn dey(&mut self) {
        self.instruction = "DEY";
        if self.t == 0 {
            self.apply_decoded();
            self.opcode_action = "DECREMENT Y BY 1".into();
        }
        self.byte_op();
        self.t += 1;
        if self.t == self.cycles {
            self.y = self.y.wrapping_sub(1);
            self.status.set_zn(self.y);
            self.cycle_action = "DECREMENT Y BY 1".into();
        }
    }

    pub(crate) fn eor(&mut self) {
        self.instruction = "EOR";
        if self.t == 0 {
            self.apply_decoded();
            self.opcode_action = "PERFORM EXCLUSIVE OR ON A\nWITH DATA".into();
        }
        self.mem_op();
        self.t += 1;
        if self.t == self.cycles {
            self.a ^= self.bus.data;
            self.status.set_zn(self.a);
        }
    }

    pub(crate) fn inc(&mut self) {
        self.instruction = "INC";
        if self.t == 0 {
            self.apply_decoded();
            self.opcode_action = "INCREMENT VALUE IN MEMORY BY 1".into();
        }
        self.rmw_op();
        self.t += 1;
        if self.t == self.cycles {
            self.bus.data = self.bus.data.wrapping_add(1);
            self.mem[self.bus.addr as usize] = self.bus.data;
            self.status.set_zn(self.bus.data);
        }
    }

    pub(crate) fn inx(&mut self) {
        self.instruction = "INX";
        if self.t == 0 {
            self.apply_decoded();
            self.opcode_action = "INCREMENT X BY 1".into();
        }
        self.byte_op();
        self.t += 1;
        if self.t == self.cycles {
            self.x = self.x.wrapping_add(1);
            self.status.set_zn(self.x);
            self.cycle_action = "INCREMENT X BY 1".into();
        }
    }

    pub(crate) fn iny(&mut self) {
        self.instruction = "INY";
        if self.t == 0 {
            self.apply_decoded();
            self.opcode_action = "INCREMENT Y BY 1".into();
        }
        self.byte_op();
        self.t += 1;
        if self.t == self.cycles {
            self.y = self.y.wrapping_add(1);
            self.status.set_zn(self.y);
            self.cycle_action = "INCREMENT Y BY 1".into();
        }
    }

    pub(crate) fn jmp(&mut self) {
        self.instruction = "JMP";
        if self.t == 0 {
            self.opcode_action = "JUMP TO A NEW LOCATION".into();
            self.apply_decoded();
            // Unconditional: the boundary must not advance PC afterwards.
            self.jump = true;
        }
        match self.mode {
            AddrMode::Abs => match self.t {
                0 => {
                    self.bus.rw = true;
                    self.bus.discarded = false;
                    self.bus_read(self.pc);
                }
                1 => {
                    self.pc = self.pc.wrapping_add(1);
                    self.bus_read(self.pc);
                    self.effective_addr = u16::from(self.bus.data);
                    self.cycle_action = "FETCH LOW BYTE OF JUMP ADDRESS".into();
                }
                2 => {
                    self.pc = self.pc.wrapping_add(1);
                    self.bus_read(self.pc);
                    self.effective_addr |= u16::from(self.bus.data) << 8;
                    self.cycle_action = "FETCH HIGH BYTE OF JUMP ADDRESS".into();
                    self.pc = self.effective_addr;
                }
                _ => {}
            },
            AddrMode::Ind => match self.t {
                0 => {
                    self.bus.rw = true;
                    self.bus.discarded = false;
                    self.bus_read(self.pc);
                }
                1 => {
                    self.pc = self.pc.wrapping_add(1);
                    self.bus_read(self.pc);
                    self.effective_addr = u16::from(self.bus.data);
                    self.cycle_action = "FETCH LOW BYTE OF INDIRECT ADDRESS".into();
                }
                2 => {
                    self.pc = self.pc.wrapping_add(1);
                    self.bus_read(self.pc);
                    self.effective_addr |= u16::from(self.bus.data) << 8;
                    self.cycle_action = "FETCH HIGH BYTE OF INDIRECT ADDRESS".into();
                }
                3 => {
                    self.bus_read(self.effective_addr);
                    self.cycle_action = "FETCH LOW BYTE OF JUMP ADDRESS".into();
                }
                4 => {
                    // Hardware quirk: a pointer at $xxFF takes its high
                    // byte from the start of the same page.
                    let hi_addr = if self.effective_addr & 0x00FF == 0x00FF {
                        self.effective_addr & 0xFF00
                    } else {
                        self.effective_addr.wrapping_add(1)
                    };
                    let lo = self.bus.data;
                    self.bus_read(hi_addr);
                    self.effective_addr = u16::from(lo) | (u16::from(self.bus.data) << 8);
                    self.cycle_action = "FETCH HIGH BYTE OF JUMP ADDRESS".into();
                    self.pc = self.effective_addr;
                }
                _ => {}
            },
            _ => {}
        }
        self.t += 1;
    }

    pub(crate) fn jsr(&mut self) {
        self.instruction = "JSR";
        match self.t {
            0 => {
                self.apply_decoded();
                self.bus.rw = true;
                self.bus.discarded = false;
                self.bus_read(self.pc);
                self.jump = true;
                self.opcode_action = "JUMP TO SUBROUTINE LOCATION".into();
            }
            1 => {
                self.pc = self.pc.wrapping_add(1);
                self.bus_read(self.pc);
                self.effective_addr = u16::from(self.bus.data);
                self.cycle_action = "FETCH LOW BYTE OF SUBROUTINE\nADDRESS".into();
            }
            2 => {
                self.bus_read(self.sp);
                self.bus.discarded = true;
                self.cycle_action.clear();
            }
            3 => {
                // The return address is the high operand byte's address;
                // RTS adds the final increment.
                self.bus.discarded = false;
                self.bus.rw = false;
                self.bus.data = ((self.pc.wrapping_add(1)) >> 8) as u8;
                self.mem[self.bus.addr as usize] = self.bus.data;
                self.sp = 0x0100 | (self.sp.wrapping_sub(1) & 0x00FF);
                self.cycle_action = "PUSH HIGH BYTE OF PC TO STACK".into();
            }
            4 => {
                self.bus.addr = self.sp;
                self.bus.data = (self.pc.wrapping_add(1) & 0x00FF) as u8;
                self.mem[self.bus.addr as usize] = self.bus.data;
                self.sp = 0x0100 | (self.sp.wrapping_sub(1) & 0x00FF);
                self.cycle_action = "PUSH LOW BYTE OF PC TO STACK".into();
            }
            5 => {
                self.bus.rw = true;
                self.pc = self.pc.wrapping_add(1);
                self.bus_read(self.pc);
                self.effective_addr |= u16::from(self.bus.data) << 8;
                self.cycle_action = "FETCH HIGH BYTE OF SUBROUTINE\nADDRESS".into();
                self.pc = self.effective_addr;
            }
            _ => {}
        }
        self.t += 1;
    }

    pub(crate) fn lda(&mut self) {
        self.instruction = "LDA";
        if self.t == 0 {
            self.opcode_action = "LOAD A NEW VALUE TO A".into();
            self.apply_decoded();
        }
        self.mem_op();
        self.t += 1;
        if self.t == self.cycles {
            self.a = self.bus.data;
            self.cycle_action = "LOAD A NEW VALUE TO A".into();
            self.status.set_zn(self.a);
        }
    }

    pub(crate) fn ldx(&mut self) {
        self.instruction = "LDX";
        if self.t == 0 {
            self.opcode_action = "LOAD A NEW VALUE TO X".into();
            self.apply_decoded();
        }
        self.mem_op();
        self.t += 1;
        if self.t == self.cycles {
            self.x = self.bus.data;
            self.cycle_action = "LOAD A NEW VALUE TO X".into();
            self.status.set_zn(self.x);
        }
    }

    pub(crate) fn ldy(&mut self) {
        self.instruction = "LDY";
        if self.t == 0 {
            self.opcode_action = "LOAD A NEW VALUE TO Y".into();
            self.apply_decoded();
        }
        self.mem_op();
        self.t += 1;
        if self.t == self.cycles {
            self.y = self.bus.data;
            self.cycle_action = "LOAD A NEW VALUE TO Y".into();
            self.status.set_zn(self.y);
        }
    }

    pub(crate) fn lsr(&mut self) {
        self.instruction = "LSR";
        if self.t == 0 {
            self.apply_decoded();
            self.opcode_action = if self.mode == AddrMode::Acc {
                "PERFORM A LOGICAL RIGHT\nSHIFT TO A"
            } else {
                "PERFORM A LOGICAL RIGHT\nSHIFT TO DATA"
            }
            .into();
        }
        if self.mode == AddrMode::Acc {
            self.byte_op();
        } else {
            self.rmw_op();
        }
        self.t += 1;
        if self.t == self.cycles {
            if self.mode == AddrMode::Acc {
                self.status.set(Status::C, self.a & 1 != 0);
                self.a >>= 1;
                self.status.set(Status::Z, self.a == 0);
            } else {
                self.status.set(Status::C, self.bus.data & 1 != 0);
                self.bus.data >>= 1;
                self.status.set(Status::Z, self.bus.data == 0);
                self.mem[self.bus.addr as usize] = self.bus.data;
            }
            // A zero is shifted into bit 7, so N always clears.
            self.status.remove(Status::N);
        }
    }

    pub(crate) fn nop(&mut self) {
        self.instruction = "NOP";
        if self.t == 0 {
            self.apply_decoded();
            self.opcode_action = "NO OPERATION".into();
        }
        self.byte_op();
        self.t += 1;
    }

    pub(crate) fn ora(&mut self) {
        self.instruction = "ORA";
        if self.t == 0 {
            self.opcode_action = "ORA".into();
            self.apply_decoded();
        }
        self.mem_op();
        self.t += 1;
        if self.t == self.cycles {
            self.a |= self.bus.data;
            self.status.set_zn(self.a);
        }
    }

    pub(crate) fn pha(&mut self) {
        self.instruction = "PHA";
        if self.t == 0 {
            self.apply_decoded();
        }
        self.push_op();
        self.t += 1;
    }

    pub(crate) fn php(&mut self) {
        self.instruction = "PHP";
        if self.t == 0 {
            self.apply_decoded();
        }
        self.push_op();
        self.t += 1;
    }

    pub(crate) fn pla(&mut self) {
        self.instruction = "PLA";
        if self.t == 0 {
            self.apply_decoded();
        }
        self.pull_op();
        self.t += 1;
    }

    pub(crate) fn plp(&mut self) {
        self.instruction = "PLP";
        if self.t == 0 {
            self.apply_decoded();
        }
        self.pull_op();
        self.t += 1;
    }

    pub(crate) fn rol(&mut self) {
        self.instruction = "ROL";
        if self.t == 0 {
            self.apply_decoded();
            self.opcode_action = if self.mode == AddrMode::Acc {
                "PERFORM A BITWISE LEFT\nROTATION TO A"
            } else {
                "PERFORM A BITWISE LEFT\nROTATION TO DATA"
            }
            .into();
        }
        if self.mode == AddrMode::Acc {
            self.byte_op();
        } else {
            self.rmw_op();
        }
        self.t += 1;
        if self.t == self.cycles {
            // The old carry rotates into bit 0; the old bit 7 becomes the
            // new carry.
            let old_carry = u8::from(self.status.contains(Status::C));
            if self.mode == AddrMode::Acc {
                self.status.set(Status::C, self.a & 0x80 != 0);
                self.a = (self.a << 1) | old_carry;
                self.status.set_zn(self.a);
            } else {
                self.status.set(Status::C, self.bus.data & 0x80 != 0);
                self.bus.data = (self.bus.data << 1) | old_carry;
                self.status.set_zn(self.bus.data);
                self.mem[self.bus.addr as usize] = self.bus.data;
            }
        }
    }

    pub(crate) fn ror(&mut self) {
        self.instruction = "ROR";
        if self.t == 0 {
            self.apply_decoded();
            self.opcode_action = if self.mode == AddrMode::Acc {
                "PERFORM A BITWISE RIGHT\nROTATION TO A"
            } else {
                "PERFORM A BITWISE RIGHT\nROTATION TO DATA"
            }
            .into();
        }
        if self.mode == AddrMode::Acc {
            self.byte_op();
        } else {
            self.rmw_op();
        }
        self.t += 1;
        if self.t == self.cycles {
            let old_carry = u8::from(self.status.contains(Status::C));
            if self.mode == AddrMode::Acc {
                self.status.set(Status::C, self.a & 1 != 0);
                self.a = (self.a >> 1) | (old_carry << 7);
                self.status.set_zn(self.a);
            } else {
                self.status.set(Status::C, self.bus.data & 1 != 0);
                self.bus.data = (self.bus.data >> 1) | (old_carry << 7);
                self.status.set_zn(self.bus.data);
                self.mem[self.bus.addr as usize] = self.bus.data;
            }
        }
    }

    pub(crate) fn rti(&mut self) {
        self.instruction = "RTI";
        match self.t {
            0 => {
                self.apply_decoded();
                self.bus.rw = true;
                self.bus.discarded = false;
                self.jump = true;
                self.opcode_action = "RETURN FROM INTERRUPT".into();
                self.bus_read(self.pc);
            }
            1 => {
                self.pc = self.pc.wrapping_add(1);
                self.bus_read(self.pc);
                self.bus.discarded = true;
                self.cycle_action.clear();
            }
            2 => {
                self.bus_read(self.sp);
                self.cycle_action.clear();
            }
            3 => {
                self.bus.discarded = false;
                self.sp = 0x0100 | (self.sp.wrapping_add(1) & 0x00FF);
                self.bus_read(self.sp);
                self.cycle_action = "PULL STATUS REGISTER FROM STACK".into();
                // B comes back from the pulled byte; U always reads as set.
                self.status = Status::from_bits_retain(self.bus.data) | Status::U;
            }
            4 => {
                self.sp = 0x0100 | (self.sp.wrapping_add(1) & 0x00FF);
                self.bus_read(self.sp);
                self.effective_addr = u16::from(self.bus.data);
                self.cycle_action = "PULL LOW BYTE OF RETURN ADDRESS\nFROM STACK".into();
            }
            5 => {
                self.sp = 0x0100 | (self.sp.wrapping_add(1) & 0x00FF);
                self.bus_read(self.sp);
                self.effective_addr |= u16::from(self.bus.data) << 8;
                self.cycle_action = "PULL HIGH BYTE OF RETURN ADDRESS\nFROM STACK".into();
                self.pc = self.effective_addr.wrapping_add(1);
            }
            _ => {}
        }
        self.t += 1;
    }

    pub(crate) fn rts(&mut self) {
        self.instruction = "RTS";
        match self.t {
            0 => {
                self.apply_decoded();
                self.bus.rw = true;
                self.bus.discarded = false;
                self.jump = false;
                self.opcode_action = "RETURN FROM SUBROUTINE".into();
                self.bus_read(self.pc);
            }
            1 => {
                self.pc = self.pc.wrapping_add(1);
                self.bus_read(self.pc);
                self.bus.discarded = true;
                self.cycle_action.clear();
            }
            2 => {
                self.bus_read(self.sp);
                self.cycle_action.clear();
            }
            3 => {
                self.bus.discarded = false;
                self.sp = 0x0100 | (self.sp.wrapping_add(1) & 0x00FF);
                self.bus_read(self.sp);
                self.effective_addr = u16::from(self.bus.data);
                self.cycle_action = "PULL LOW BYTE OF RETURN ADDRESS\nFROM STACK".into();
            }
            4 => {
                self.sp = 0x0100 | (self.sp.wrapping_add(1) & 0x00FF);
                self.bus_read(self.sp);
                self.effective_addr |= u16::from(self.bus.data) << 8;
                self.cycle_action = "PULL HIGH BYTE OF RETURN ADDRESS\nFROM STACK".into();
            }
            5 => {
                // The pulled address still points at JSR's last byte; the
                // fetch boundary performs the +1.
                self.bus_read(self.effective_addr);
                self.bus.discarded = true;
                self.cycle_action.clear();
                self.pc = self.bus.addr;
            }
            _ => {}
        }
        self.t += 1;
    }

    pub(crate) fn sbc(&mut self) {
        self.instruction = "SBC";
        if self.t == 0 {
            self.opcode_action = "SUBTRACT DATA FROM A".into();
            self.apply_decoded();
        }
        self.mem_op();
        self.t += 1;
        if self.t == self.cycles {
            // Invert the operand and add: A - B = A + !B + C.
            let data = u16::from(self.bus.data) ^ 0x00FF;
            let a = u16::from(self.a);
            let carry = u16::from(self.status.contains(Status::C));
            let result = if self.status.contains(Status::D) {
                let mut r = (a & 0x0F) + (data & 0x0F) + carry;
                if r <= 0x0F {
                    r = r.wrapping_sub(0x06);
                }
                r = (a & 0xF0) + (data & 0xF0) + (if r > 0x0F { 0x10 } else { 0 }) + (r & 0x0F);
                if r <= 0xFF {
                    r = r.wrapping_sub(0x60);
                }
                r
            } else {
                a + data + carry
            };
            self.status.set(Status::C, result > 0xFF);
            self.status.set(Status::Z, result & 0xFF == 0);
            self.status.set(Status::N, result & 0x80 != 0);
            self.status
                .set(Status::V, (result ^ a) & (result ^ data) & 0x0080 != 0);
            self.a = (result & 0xFF) as u8;
        }
    }

    pub(crate) fn sec(&mut self) {
        self.instruction = "SEC";
        if self.t == 0 {
            self.apply_decoded();
            self.opcode_action = "SET CARRY FLAG".into();
        }
        self.byte_op();
        self.t += 1;
        if self.t == self.cycles {
            self.cycle_action = "SET CARRY FLAG".into();
            self.status.insert(Status::C);
        }
    }

    pub(crate) fn sed(&mut self) {
        self.instruction = "SED";
        if self.t == 0 {
            self.apply_decoded();
            self.opcode_action = "SET DECIMAL FLAG".into();
        }
        self.byte_op();
        self.t += 1;
        if self.t == self.cycles {
            self.cycle_action = "SET DECIMAL FLAG".into();
            self.status.insert(Status::D);
        }
    }

    pub(crate) fn sei(&mut self) {
        self.instruction = "SEI";
        if self.t == 0 {
            self.apply_decoded();
            self.opcode_action = "SET INTERRUPT FLAG".into();
        }
        self.byte_op();
        self.t += 1;
        if self.t == self.cycles {
            self.cycle_action = "SET INTERRUPT FLAG".into();
            self.status.insert(Status::I);
        }
    }

    pub(crate) fn sta(&mut self) {
        self.instruction = "STA";
        if self.t == 0 {
            self.opcode_action = "STORE CONTENTS OF A INTO MEMORY".into();
            self.apply_decoded();
        }
        self.store_op();
        self.t += 1;
    }

    pub(crate) fn stx(&mut self) {
        self.instruction = "STX";
        if self.t == 0 {
            self.opcode_action = "STORE CONTENTS OF X INTO MEMORY".into();
            self.apply_decoded();
        }
        self.store_op();
        self.t += 1;
    }

    pub(crate) fn sty(&mut self) {
        self.instruction = "STY";
        if self.t == 0 {
            self.opcode_action = "STORE CONTENTS OF Y INTO MEMORY".into();
            self.apply_decoded();
        }
        self.store_op();
        self.t += 1;
    }

    pub(crate) fn tax(&mut self) {
        self.instruction = "TAX";
        if self.t == 0 {
            self.apply_decoded();
            self.opcode_action = "TRANSFER THE CONTENTS OF A TO X".into();
        }
        self.byte_op();
        self.t += 1;
        if self.t == self.cycles {
            self.x = self.a;
            self.status.set_zn(self.x);
        }
    }

    pub(crate) fn tay(&mut self) {
        self.instruction = "TAY";
        if self.t == 0 {
            self.apply_decoded();
            self.opcode_action = "TRANSFER THE CONTENTS OF A TO Y".into();
        }
        self.byte_op();
        self.t += 1;
        if self.t == self.cycles {
            self.y = self.a;
            self.status.set_zn(self.y);
        }
    }

    pub(crate) fn tsx(&mut self) {
        self.instruction = "TSX";
        if self.t == 0 {
            self.apply_decoded();
            self.opcode_action = "TRANSFER THE CONTENTS OF STACK\nPOINTER TO X".into();
        }
        self.byte_op();
        self.t += 1;
        if self.t == self.cycles {
            self.x = (self.sp & 0x00FF) as u8;
            self.status.set_zn(self.x);
        }
    }

    pub(crate) fn txa(&mut self) {
        self.instruction = "TXA";
        if self.t == 0 {
            self.apply_decoded();
            self.opcode_action = "TRANSFER THE CONTENTS OF X TO A".into();
        }
        self.byte_op();
        self.t += 1;
        if self.t == self.cycles {
            self.a = self.x;
            self.status.set_zn(self.a);
        }
    }

    pub(crate) fn txs(&mut self) {
        self.instruction = "TXS";
        if self.t == 0 {
            self.apply_decoded();
            self.opcode_action = "TRANSFER THE CONTENTS OF X TO STACK POINTER".into();
        }
        self.byte_op();
        self.t += 1;
        if self.t == self.cycles {
            // No flags; the high byte stays on the stack page.
            self.sp = 0x0100 | u16::from(self.x);
        }
    }

    pub(crate) fn tya(&mut self) {
        self.instruction = "TYA";
        if self.t == 0 {
            self.apply_decoded();
            self.opcode_action = "TRANSFER THE CONTENTS OF Y TO A".into();
        }
        self.byte_op();
        self.t += 1;
        if self.t == self.cycles {
            self.a = self.y;
            self.status.set_zn(self.a);
        }
    }

    /// Undocumented opcode: the emulation jams by design. `t` never
    /// advances, so the clock keeps landing here until the next reset.
    pub(crate) fn ill(&mut self) {
        if self.instruction != "???" {
            trace!(
                "undocumented opcode ${:02X} at ${:04X}; emulation jammed",
                self.opcode.unwrap_or(0),
                self.pc
            );
        }
        self.mode = AddrMode::Ill;
        self.instruction = "???";
        self.addr_mode = "???";
        self.opcode_action = "UNDOCUMENTED - UNIMPLEMENTED\nEMULATION JAMMED".into();
        self.cycle_action = "???".into();
    }
}

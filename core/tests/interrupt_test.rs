mod common;

use vm8_core::cpu::Cpu;
use vm8_core::machine::Machine;

/// Scenario 6: an ISR that is only `IRET` must be transparent — registers,
/// flags, and the resumed `pc` must be exactly as if the interrupt never
/// happened.
#[test]
fn interrupt_round_trip_preserves_registers_flags_and_resumes_correctly() {
    // 0: LDI R0,0   (bit number for INT)
    // 3: LDI R1,42  (a value that must survive the dispatch)
    // 6: CMP R0,R1  (sets fl; R0 < R1 so L is set)
    // 9: INT R0     (raises IS bit 0; self-updates pc to 11)
    // 11: HLT
    // 12: IRET      (the whole ISR body)
    let program = [
        0b1000_0010, 0, 0, // 0: LDI R0,0
        0b1000_0010, 1, 42, // 3: LDI R1,42
        0b1010_0111, 0, 1, // 6: CMP R0,R1
        0b0101_0010, 0, // 9: INT R0
        0b0000_0001, // 11: HLT
        0b0001_0011, // 12: IRET
    ];

    let machine = Machine::new();
    machine.load_program(&program);
    {
        let mut state = machine.lock();
        state.reg[5] = 1; // IM bit 0 enabled
        state.write(0xF8, 12); // IVT[0] -> the IRET-only handler
    }

    let mut cpu = Cpu::new(machine.clone());
    cpu.run(false).expect("program should halt cleanly");

    let state = machine.lock();
    assert_eq!(state.reg[1], 42);
    assert_eq!(state.fl, 0b100); // L still set, unmodified by the ISR
    assert!(state.interrupts_enabled);
}

#[test]
fn a_masked_out_bit_is_never_dispatched() {
    // INT raises bit 3, but IM only enables bit 0: the dispatcher must
    // leave the bit pending and never vector through IVT[3].
    let program = [
        0b1000_0010, 0, 3, // 0: LDI R0,3
        0b0101_0010, 0, // 3: INT R0
        0b0000_0001, // 5: HLT
    ];

    let machine = Machine::new();
    machine.load_program(&program);
    {
        let mut state = machine.lock();
        state.reg[5] = 0b0000_0001; // IM only enables bit 0
        state.write(0xFB, 0xAA); // IVT[3], should never be visited
    }

    let mut cpu = Cpu::new(machine.clone());
    cpu.run(false).expect("program should halt cleanly");

    let state = machine.lock();
    assert_eq!(state.reg[6] & 0b0000_1000, 0b0000_1000); // bit 3 still pending
    assert_ne!(state.pc, 0xAA);
}

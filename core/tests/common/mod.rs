use vm8_core::cpu::Cpu;
use vm8_core::error::MachineError;
use vm8_core::machine::Machine;

/// Load `program` and run it to completion, panicking on any fatal error.
pub fn run_to_halt(program: &[u8]) -> Machine {
    let machine = Machine::new();
    machine.load_program(program);
    let mut cpu = Cpu::new(machine.clone());
    cpu.run(false).expect("program should halt cleanly");
    machine
}

/// Load `program` and run it, returning the fatal error it should produce.
pub fn run_expecting_error(program: &[u8]) -> MachineError {
    let machine = Machine::new();
    machine.load_program(program);
    let mut cpu = Cpu::new(machine);
    cpu.run(false).expect_err("program should fail")
}

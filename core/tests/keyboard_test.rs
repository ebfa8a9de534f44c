use std::io::Cursor;
use std::thread::sleep;
use std::time::Duration;

use vm8_core::device::Keyboard;
use vm8_core::machine::{Machine, KEYBOARD_INTERRUPT_BIT, KEYBOARD_MAILBOX};

#[test]
fn keyboard_peripheral_writes_mailbox_and_raises_interrupt_concurrently() {
    let machine = Machine::new();
    let keyboard = Keyboard::new(Cursor::new(b"hi".to_vec()));
    let _handle = machine.spawn(keyboard);

    sleep(Duration::from_millis(150));

    let state = machine.lock();
    assert_eq!(state.read(KEYBOARD_MAILBOX), b'h');
    assert_eq!(state.is() & (1 << KEYBOARD_INTERRUPT_BIT), 1 << KEYBOARD_INTERRUPT_BIT);
}

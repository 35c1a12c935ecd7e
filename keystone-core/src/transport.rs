//! Host register file
//!
//! Holds the register the host last selected and the LED word it last
//! wrote. The bus handler calls [`HostRegisters::handle_write`] at the end
//! of each write transaction and [`HostRegisters::handle_read`] when the
//! host clocks a read; the tick loop only looks at [`HostRegisters::led_word`].

use portable_atomic::{AtomicU16, AtomicU8, Ordering};

use keystone_hal::SignalLine;
use keystone_protocol::registers::{hw_version_word, id_word};
use keystone_protocol::{HostWrite, LedWord, ProtocolError, Register};

use crate::queue::EventQueue;

/// Register state shared between the bus handler and the tick loop
pub struct HostRegisters {
    selected: AtomicU8,
    led_word: AtomicU16,
}

impl Default for HostRegisters {
    fn default() -> Self {
        Self::new()
    }
}

impl HostRegisters {
    pub const fn new() -> Self {
        Self {
            // Nothing selected until the host's first write
            selected: AtomicU8::new(0),
            led_word: AtomicU16::new(0),
        }
    }

    /// Apply a completed host write
    ///
    /// The register byte always becomes the read target, even when the
    /// value is rejected, so a later read of an unknown register still
    /// answers 0.
    pub fn handle_write(&self, write: HostWrite) -> Result<(), ProtocolError> {
        self.selected.store(write.address, Ordering::Release);
        if let Some((Register::Led, value)) = write.checked_value()? {
            self.led_word.store(value, Ordering::Release);
        }
        Ok(())
    }

    /// Produce the response word for a read of the selected register
    pub fn handle_read<R: SignalLine, const N: usize>(&self, queue: &EventQueue<R, N>) -> u16 {
        let Some(register) = Register::from_byte(self.selected.load(Ordering::Acquire)) else {
            return 0;
        };

        if register.clears_ready_line() {
            queue.release_ready_line();
        }

        match register {
            Register::Led => self.led_word.load(Ordering::Acquire),
            Register::Event => queue.dequeue().encode(),
            Register::Id => id_word(),
            Register::HwVersion => hw_version_word(),
        }
    }

    /// Register the next read will return
    pub fn selected(&self) -> u8 {
        self.selected.load(Ordering::Acquire)
    }

    /// LED word most recently written by the host
    pub fn led_word(&self) -> LedWord {
        LedWord(self.led_word.load(Ordering::Acquire))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::queue::tests::TestLine;
    use keystone_protocol::PanelEvent;

    fn write(bytes: &[u8]) -> HostWrite {
        HostWrite::from_bytes(bytes).unwrap()
    }

    #[test]
    fn test_led_write_and_readback() {
        let regs = HostRegisters::new();
        let queue: EventQueue<TestLine> = EventQueue::new(TestLine::default());
        regs.handle_write(write(&[0x0A, 0x34, 0x82])).unwrap();
        assert_eq!(regs.led_word(), LedWord(0x8234));
        assert!(regs.led_word().is_override());
        assert_eq!(regs.handle_read(&queue), 0x8234);
    }

    #[test]
    fn test_single_value_byte() {
        let regs = HostRegisters::new();
        regs.handle_write(write(&[0x0A, 0xFF, 0x80])).unwrap();
        regs.handle_write(write(&[0x0A, 0x05])).unwrap();
        assert_eq!(regs.led_word(), LedWord(0x0005));
    }

    #[test]
    fn test_id_and_hw_version() {
        let regs = HostRegisters::new();
        let queue: EventQueue<TestLine> = EventQueue::new(TestLine::default());
        regs.handle_write(write(&[0x0C])).unwrap();
        assert_eq!(regs.handle_read(&queue), 0x0507);
        regs.handle_write(write(&[0x0D])).unwrap();
        assert_eq!(regs.handle_read(&queue), 0x0002);
    }

    #[test]
    fn test_id_read_releases_ready_line() {
        let regs = HostRegisters::new();
        let queue: EventQueue<TestLine> = EventQueue::new(TestLine::default());
        queue.enqueue(PanelEvent::press(4));
        regs.handle_write(write(&[0x0C])).unwrap();
        regs.handle_read(&queue);
        assert!(!queue.is_ready_asserted());
        assert_eq!(queue.len(), 1);
    }

    #[test]
    fn test_event_read_pops() {
        let regs = HostRegisters::new();
        let queue: EventQueue<TestLine> = EventQueue::new(TestLine::default());
        queue.enqueue(PanelEvent::press(4));
        regs.handle_write(write(&[0x0B])).unwrap();
        assert_eq!(regs.handle_read(&queue), 0x1304);
        assert_eq!(regs.handle_read(&queue), 0);
        assert!(!queue.is_ready_asserted());
    }

    #[test]
    fn test_unknown_register_reads_zero() {
        let regs = HostRegisters::new();
        let queue: EventQueue<TestLine> = EventQueue::new(TestLine::default());
        queue.enqueue(PanelEvent::press(4));
        assert_eq!(
            regs.handle_write(write(&[0x42, 1, 2])),
            Err(ProtocolError::UnknownRegister(0x42))
        );
        assert_eq!(regs.selected(), 0x42);
        assert_eq!(regs.handle_read(&queue), 0);
        assert!(queue.is_ready_asserted());
    }

    #[test]
    fn test_read_only_write_ignored() {
        let regs = HostRegisters::new();
        assert_eq!(
            regs.handle_write(write(&[0x0C, 1, 2])),
            Err(ProtocolError::ReadOnly(Register::Id))
        );
        assert_eq!(regs.led_word(), LedWord(0));
        assert_eq!(regs.selected(), 0x0C);
    }
}

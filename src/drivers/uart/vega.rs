//! Vega S-series UART driver.
//!
//! Polled driver for the FIFO UART integrated on Vega SoCs. The driver
//! only ever touches line control, control, FIFO control, modem control,
//! the divisor pair, the holding registers and FIFO status; the interrupt
//! registers stay with the kernel, which on these boards never routes the
//! UART interrupt anyway.
//!
//! One instance per peripheral, caller-owned. Not reentrant and not
//! internally synchronized: concurrent access to one register window
//! corrupts FIFO state, so callers serialize (the console subsystem puts
//! a lock around the whole output path).

use tock_registers::{
    interfaces::{Readable, Writeable},
    register_bitfields, register_structs,
    registers::{ReadOnly, ReadWrite, WriteOnly},
};

use super::SerialChannel;
use crate::drivers::common::MmioRegs;

/// Fixed size of the register window. A hardware description advertising
/// anything else does not describe this peripheral.
pub const UART_REG_SIZE: usize = 0x100;

/// Compatible strings the discovery path matches on.
pub const COMPATIBLE: &[&str] = &["vega,v520-uart"];

/// Tx/Rx FIFO trigger levels. Channel-dependent on real silicon; level 1
/// matches the console channels wired up on Vega boards.
const TX_FIFO_TRIGGER: u32 = 1;
const RX_FIFO_TRIGGER: u32 = 1;

register_bitfields![u32,
    /// Line control.
    ULCON [
        MODE OFFSET(6) NUMBITS(1) [Normal = 0, Infrared = 1],
        PARITY OFFSET(3) NUMBITS(3) [None = 0, Odd = 4, Even = 5, ForcedOne = 6, ForcedZero = 7],
        STOP_BITS OFFSET(2) NUMBITS(1) [One = 0, Two = 1],
        WORD_LEN OFFSET(0) NUMBITS(2) [Five = 0, Six = 1, Seven = 2, Eight = 3],
    ],
    /// Control.
    UCON [
        TX_INT_TYPE OFFSET(9) NUMBITS(1) [Pulse = 0, Level = 1],
        RX_INT_TYPE OFFSET(8) NUMBITS(1) [Pulse = 0, Level = 1],
        RX_TIMEOUT OFFSET(7) NUMBITS(1) [],
        RX_ERROR_STATUS OFFSET(6) NUMBITS(1) [],
        LOOPBACK OFFSET(5) NUMBITS(1) [],
        SEND_BREAK OFFSET(4) NUMBITS(1) [],
        TX_MODE OFFSET(2) NUMBITS(2) [Disabled = 0, Polling = 1, Dma = 2],
        RX_MODE OFFSET(0) NUMBITS(2) [Disabled = 0, Polling = 1, Dma = 2],
    ],
    /// FIFO control. The reset bits self-clear once the FIFO is emptied.
    UFCON [
        TX_TRIGGER OFFSET(8) NUMBITS(3) [],
        RX_TRIGGER OFFSET(4) NUMBITS(3) [],
        TX_RESET OFFSET(2) NUMBITS(1) [],
        RX_RESET OFFSET(1) NUMBITS(1) [],
        ENABLE OFFSET(0) NUMBITS(1) [],
    ],
    /// FIFO status.
    UFSTAT [
        TX_FULL OFFSET(24) NUMBITS(1) [],
        TX_COUNT OFFSET(16) NUMBITS(8) [],
        RX_FULL OFFSET(8) NUMBITS(1) [],
        RX_COUNT OFFSET(0) NUMBITS(8) [],
    ],
];

register_structs! {
    /// Register window, little-endian 32-bit registers.
    #[allow(dead_code)]
    pub RegisterBlock {
        (0x00 => ulcon: ReadWrite<u32, ULCON::Register>),
        (0x04 => ucon: ReadWrite<u32, UCON::Register>),
        (0x08 => ufcon: ReadWrite<u32, UFCON::Register>),
        (0x0c => umcon: ReadWrite<u32>),
        (0x10 => utrstat: ReadOnly<u32>),
        (0x14 => uerstat: ReadOnly<u32>),
        (0x18 => ufstat: ReadOnly<u32, UFSTAT::Register>),
        (0x1c => umstat: ReadOnly<u32>),
        (0x20 => utxh: WriteOnly<u32>),
        (0x24 => urxh: ReadOnly<u32>),
        (0x28 => ubrdiv: ReadWrite<u32>),
        (0x2c => ufracval: ReadWrite<u32>),
        (0x30 => uintp: ReadWrite<u32>),
        (0x34 => uintsp: ReadWrite<u32>),
        (0x38 => uintm: ReadWrite<u32>),
        (0x3c => _reserved),
        (0x100 => @END),
    }
}

pub struct VegaUart {
    regs: MmioRegs<RegisterBlock>,
}

impl VegaUart {
    /// # Safety
    ///
    /// `base` must be the addressable base of a Vega UART register
    /// window, valid for the lifetime of the driver and not aliased by
    /// another instance.
    pub const unsafe fn new(base: usize) -> Self {
        Self {
            regs: unsafe { MmioRegs::new(base) },
        }
    }

    /// Bring the peripheral into polled 8N1 operation.
    ///
    /// A `baud_rate` of zero skips divisor programming entirely and
    /// inherits whatever clock setup earlier firmware left behind;
    /// discovery uses this for consoles whose rate it cannot know.
    pub fn init(&mut self, clock_hz: u32, baud_rate: u32) {
        // 8 data bits, 1 stop bit, no parity, normal mode.
        self.regs.ulcon.write(
            ULCON::WORD_LEN::Eight + ULCON::STOP_BITS::One + ULCON::PARITY::None + ULCON::MODE::Normal,
        );

        // A byte may still be leaving from the previous boot stage; let
        // it finish before the clocks move underneath it.
        self.flush();

        if baud_rate != 0 {
            // div = clock / baud - 16, split into a 16ths fixed-point
            // pair. Callers must not expect sub-1-Hz precision.
            let div = clock_hz / baud_rate - 16;
            self.regs.ubrdiv.set(div / 16);
            self.regs.ufracval.set(div % 16);
        }

        // No hardware flow control.
        self.regs.umcon.set(0);

        // Reset and enable both FIFOs. The reset bits self-clear before
        // the next register access can land; no need to poll them.
        self.regs.ufcon.write(
            UFCON::TX_TRIGGER.val(TX_FIFO_TRIGGER)
                + UFCON::RX_TRIGGER.val(RX_FIFO_TRIGGER)
                + UFCON::TX_RESET::SET
                + UFCON::RX_RESET::SET
                + UFCON::ENABLE::SET,
        );

        // Polled transfers in both directions. Timeout and error status
        // reporting are on for visibility, but nothing here ever
        // services an interrupt.
        self.regs.ucon.write(
            UCON::TX_INT_TYPE::Level
                + UCON::RX_INT_TYPE::Level
                + UCON::RX_TIMEOUT::SET
                + UCON::RX_ERROR_STATUS::SET
                + UCON::TX_MODE::Polling
                + UCON::RX_MODE::Polling,
        );
    }

    /// True when at least one received byte is waiting.
    pub fn has_rx_data(&self) -> bool {
        let stat = self.regs.ufstat.extract();
        // RX_COUNT reads zero when the FIFO is completely full, so the
        // full flag has to be consulted as well.
        stat.read(UFSTAT::RX_COUNT) > 0 || stat.is_set(UFSTAT::RX_FULL)
    }

    /// True when the transmit FIFO has no room for another byte.
    pub fn tx_full(&self) -> bool {
        self.regs.ufstat.is_set(UFSTAT::TX_FULL)
    }

    /// True while any byte is still queued for transmission.
    pub fn has_tx_data(&self) -> bool {
        let stat = self.regs.ufstat.extract();
        // Same quirk as the receive side: TX_COUNT reads zero at full,
        // so check the full flag before trusting the count.
        stat.is_set(UFSTAT::TX_FULL) || stat.read(UFSTAT::TX_COUNT) > 0
    }

    /// Blocking read of one byte. With no terminal attached this spins
    /// forever; accepted for a boot-time debug console.
    pub fn get_char(&mut self) -> u8 {
        while !self.has_rx_data() {
            core::hint::spin_loop();
        }
        (self.regs.urxh.get() & 0xff) as u8
    }

    /// Blocking write of one byte.
    pub fn put_char(&mut self, ch: u8) {
        while self.tx_full() {
            core::hint::spin_loop();
        }
        self.regs.utxh.set(u32::from(ch));
    }

    /// Wait for the transmit path to drain completely, not merely for
    /// space in the FIFO.
    pub fn flush(&mut self) {
        while self.has_tx_data() {
            core::hint::spin_loop();
        }
    }
}

impl SerialChannel for VegaUart {
    fn put_char(&mut self, ch: u8) {
        VegaUart::put_char(self, ch);
    }

    fn get_char(&mut self) -> u8 {
        VegaUart::get_char(self)
    }

    fn has_rx_data(&self) -> bool {
        VegaUart::has_rx_data(self)
    }

    fn flush(&mut self) {
        VegaUart::flush(self);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::cell::UnsafeCell;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::thread;
    use std::time::Duration;

    const ULCON: usize = 0x00;
    const UCON: usize = 0x04;
    const UFCON: usize = 0x08;
    const UMCON: usize = 0x0c;
    const UFSTAT: usize = 0x18;
    const UTXH: usize = 0x20;
    const URXH: usize = 0x24;
    const UBRDIV: usize = 0x28;
    const UFRACVAL: usize = 0x2c;

    const TX_FULL: u32 = 1 << 24;
    const RX_FULL: u32 = 1 << 8;

    /// Heap-backed register window standing in for the peripheral.
    struct MockWindow(Box<[UnsafeCell<u32>; UART_REG_SIZE / 4]>);

    impl MockWindow {
        fn new() -> Self {
            Self(Box::new([(); UART_REG_SIZE / 4].map(|_| UnsafeCell::new(0))))
        }

        fn base(&self) -> usize {
            self.0.as_ptr() as usize
        }

        fn uart(&self) -> VegaUart {
            unsafe { VegaUart::new(self.base()) }
        }

        fn read(&self, offset: usize) -> u32 {
            unsafe { core::ptr::read_volatile(self.0[offset / 4].get()) }
        }

        fn write(&self, offset: usize, value: u32) {
            unsafe { core::ptr::write_volatile(self.0[offset / 4].get(), value) }
        }
    }

    #[test]
    fn init_programs_the_exact_divisor_pair() {
        let win = MockWindow::new();
        let mut uart = win.uart();

        uart.init(50_000_000, 115_200);

        // 50MHz / 115200 - 16 = 418 -> 26 whole, 2 sixteenths.
        assert_eq!(win.read(UBRDIV), 26);
        assert_eq!(win.read(UFRACVAL), 2);
    }

    #[test]
    fn init_configures_line_fifos_and_polling_mode() {
        let win = MockWindow::new();
        let mut uart = win.uart();

        uart.init(50_000_000, 115_200);

        // 8N1, normal mode.
        assert_eq!(win.read(ULCON), 0x3);
        // Flow control off.
        assert_eq!(win.read(UMCON), 0);
        // Trigger levels 1, both FIFOs reset and enabled.
        assert_eq!(win.read(UFCON), (1 << 8) | (1 << 4) | (1 << 2) | (1 << 1) | 1);
        // Level int types, rx timeout and error status on, polled tx/rx.
        assert_eq!(
            win.read(UCON),
            (1 << 9) | (1 << 8) | (1 << 7) | (1 << 6) | (1 << 2) | 1
        );
    }

    #[test]
    fn zero_baud_rate_leaves_the_divisor_registers_untouched() {
        let win = MockWindow::new();
        win.write(UBRDIV, 0xdead_beef);
        win.write(UFRACVAL, 0xdead_beef);
        let mut uart = win.uart();

        uart.init(50_000_000, 0);

        assert_eq!(win.read(UBRDIV), 0xdead_beef);
        assert_eq!(win.read(UFRACVAL), 0xdead_beef);
    }

    #[test]
    fn rx_fifo_full_reads_as_data_despite_zero_count() {
        let win = MockWindow::new();
        let uart = win.uart();

        win.write(UFSTAT, RX_FULL);
        assert!(uart.has_rx_data());

        win.write(UFSTAT, 0);
        assert!(!uart.has_rx_data());

        win.write(UFSTAT, 3);
        assert!(uart.has_rx_data());
    }

    #[test]
    fn tx_full_flag_wins_over_the_count_field() {
        let win = MockWindow::new();
        let uart = win.uart();

        win.write(UFSTAT, TX_FULL);
        assert!(uart.tx_full());
        assert!(uart.has_tx_data());

        win.write(UFSTAT, 5 << 16);
        assert!(!uart.tx_full());
        assert!(uart.has_tx_data());

        win.write(UFSTAT, 0);
        assert!(!uart.tx_full());
        assert!(!uart.has_tx_data());
    }

    #[test]
    fn get_char_returns_the_low_byte_only() {
        let win = MockWindow::new();
        let mut uart = win.uart();

        win.write(UFSTAT, 1);
        win.write(URXH, 0x0000_01ab);

        assert_eq!(uart.get_char(), 0xab);
    }

    #[test]
    fn put_char_stays_off_the_holding_register_while_full() {
        let win = MockWindow::new();
        win.write(UTXH, 0xffff_ffff);
        win.write(UFSTAT, TX_FULL);
        let mut uart = win.uart();

        let done = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&done);
        let writer = thread::spawn(move || {
            uart.put_char(b'Z');
            flag.store(true, Ordering::SeqCst);
        });

        thread::sleep(Duration::from_millis(50));
        assert!(!done.load(Ordering::SeqCst));
        assert_eq!(win.read(UTXH), 0xffff_ffff);

        win.write(UFSTAT, 0);
        writer.join().unwrap();
        assert_eq!(win.read(UTXH), u32::from(b'Z'));
    }

    #[test]
    fn flush_returns_only_after_the_fifo_drains() {
        let win = MockWindow::new();
        win.write(UFSTAT, 2 << 16);
        let mut uart = win.uart();

        let done = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&done);
        let drainer = thread::spawn(move || {
            uart.flush();
            flag.store(true, Ordering::SeqCst);
        });

        thread::sleep(Duration::from_millis(50));
        assert!(!done.load(Ordering::SeqCst));

        win.write(UFSTAT, 0);
        drainer.join().unwrap();
        assert!(done.load(Ordering::SeqCst));
    }
}

//! Console module - Print and logging facilities.
//!
//! Owns the registered boot console and funnels every character through
//! one place. Whoever registers a channel hands over ownership; driver
//! instances are never reachable except through the lock here.

#[macro_use]
pub mod print;

pub mod logger;

use alloc::boxed::Box;

use lazyinit::LazyInit;

use crate::drivers::uart::SerialChannel;
use crate::sync::Mutex;

pub use logger::init as init_logger;

static CONSOLE: LazyInit<Mutex<Box<dyn SerialChannel>>> = LazyInit::new();

/// Install the boot console. Exactly one console is configured per
/// build; this is called once during bring-up.
pub fn register_console(chan: Box<dyn SerialChannel>) {
    CONSOLE.init_once(Mutex::new(chan));
}

/// Write raw bytes to the registered console, expanding LF to CRLF.
/// Output before a console exists is dropped.
pub fn write_bytes(bytes: &[u8]) {
    let Some(con) = CONSOLE.get() else {
        return;
    };
    let mut chan = con.lock();
    for &b in bytes {
        if b == b'\n' {
            chan.put_char(b'\r');
        }
        chan.put_char(b);
    }
}

/// Block until every queued byte has left the wire.
pub fn flush() {
    if let Some(con) = CONSOLE.get() {
        con.lock().flush();
    }
}

/// Non-blocking read; `None` when no byte is waiting.
pub fn try_read_char() -> Option<u8> {
    let mut chan = CONSOLE.get()?.lock();
    if chan.has_rx_data() {
        Some(chan.get_char())
    } else {
        None
    }
}

/// Blocking read of one byte from the console.
pub fn read_char() -> u8 {
    CONSOLE.get().expect("console not registered").lock().get_char()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex as StdMutex};

    struct MockSerial {
        out: Arc<StdMutex<Vec<u8>>>,
    }

    impl SerialChannel for MockSerial {
        fn put_char(&mut self, ch: u8) {
            self.out.lock().unwrap().push(ch);
        }

        fn get_char(&mut self) -> u8 {
            0
        }

        fn has_rx_data(&self) -> bool {
            false
        }

        fn flush(&mut self) {}
    }

    #[test]
    fn output_reaches_the_registered_channel_with_crlf() {
        let out = Arc::new(StdMutex::new(Vec::new()));
        register_console(Box::new(MockSerial {
            out: Arc::clone(&out),
        }));

        write_bytes(b"ok\n");
        assert_eq!(out.lock().unwrap().as_slice(), b"ok\r\n");

        // The same channel serves the formatted path.
        out.lock().unwrap().clear();
        println!("x={}", 7);
        assert_eq!(out.lock().unwrap().as_slice(), b"x=7\r\n");

        assert_eq!(try_read_char(), None);
    }
}

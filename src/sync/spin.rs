//! Spin lock behind the lock_api facade.
//!
//! Nothing in this crate runs in interrupt context, so interrupt
//! save/restore around the critical section stays with the kernel that
//! embeds us.

use core::sync::atomic::{AtomicBool, Ordering};

use lock_api::RawMutex;

pub struct RawSpinLock {
    lock: AtomicBool,
}

unsafe impl RawMutex for RawSpinLock {
    type GuardMarker = lock_api::GuardSend;
    const INIT: Self = Self {
        lock: AtomicBool::new(false),
    };

    fn lock(&self) {
        while self
            .lock
            .compare_exchange_weak(false, true, Ordering::Acquire, Ordering::Relaxed)
            .is_err()
        {
            while self.lock.load(Ordering::Relaxed) {
                core::hint::spin_loop();
            }
        }
    }

    fn try_lock(&self) -> bool {
        self.lock
            .compare_exchange(false, true, Ordering::Acquire, Ordering::Relaxed)
            .is_ok()
    }

    unsafe fn unlock(&self) {
        self.lock.store(false, Ordering::Release);
    }
}

pub type Mutex<T> = lock_api::Mutex<RawSpinLock, T>;

//! Message of the most recent panic caught at the C boundary.
//!
//! `ffi_guard!` stores the panic payload's text in a thread-local
//! buffer before returning [`HeatStatus::Panicked`](crate::HeatStatus::Panicked),
//! so a C caller can fetch it with [`heat_last_panic_message`] on the same
//! thread.

use std::any::Any;
use std::cell::RefCell;
use std::ffi::c_char;

thread_local! {
    /// Text of the last panic caught on this thread. Empty if none.
    pub(crate) static LAST_PANIC: RefCell<String> = const { RefCell::new(String::new()) };
}

/// Remember `payload` as this thread's last panic.
pub(crate) fn record(payload: &(dyn Any + Send)) {
    let text = if let Some(s) = payload.downcast_ref::<&str>() {
        s
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.as_str()
    } else {
        "panic with a non-string payload"
    };
    LAST_PANIC.with(|cell| {
        let mut last = cell.borrow_mut();
        last.clear();
        last.push_str(text);
    });
}

/// Copy the last caught panic message of the calling thread into `buf`.
///
/// Writes at most `buf_len - 1` bytes plus a NUL terminator; a null `buf`
/// or zero `buf_len` writes nothing. Returns the full message length in
/// bytes (0 if no panic has been caught), so a caller can size its buffer
/// with a first call on a null `buf`.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn heat_last_panic_message(buf: *mut c_char, buf_len: usize) -> i32 {
    ffi_guard!({
        LAST_PANIC.with(|cell| {
            let msg = cell.borrow();
            let bytes = msg.as_bytes();
            if !buf.is_null() && buf_len > 0 {
                let copy_len = bytes.len().min(buf_len - 1);
                // SAFETY: buf points to buf_len writable bytes per caller contract.
                unsafe {
                    std::ptr::copy_nonoverlapping(bytes.as_ptr(), buf.cast::<u8>(), copy_len);
                    *buf.add(copy_len) = 0;
                }
            }
            i32::try_from(bytes.len()).unwrap_or(i32::MAX)
        })
    })
}

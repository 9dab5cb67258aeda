//! Diagnostic records for swallowed store faults, with a thread-local sink
//! for deterministic assertions in tests. Avoids global logger races when a
//! test needs to observe that a fault was reported.

use std::cell::RefCell;

thread_local! {
    static TL_SINK: RefCell<Option<Vec<String>>> = const { RefCell::new(None) };
}

/// Guard that disables the thread-local sink on drop.
pub struct DiagSinkGuard;
impl Drop for DiagSinkGuard {
    fn drop(&mut self) {
        TL_SINK.with(|s| *s.borrow_mut() = None);
    }
}

/// Enable the thread-local sink for the current thread. Returns a guard that
/// disables it on drop.
pub fn enable_thread_sink() -> DiagSinkGuard {
    TL_SINK.with(|s| *s.borrow_mut() = Some(Vec::new()));
    DiagSinkGuard
}

/// Push a message into the thread-local sink if enabled.
pub fn write_str(msg: &str) {
    TL_SINK.with(|s| {
        if let Some(buf) = s.borrow_mut().as_mut() {
            buf.push(msg.to_owned());
        }
    });
}

/// Drain and return the captured messages for the current thread.
pub fn drain() -> Vec<String> {
    TL_SINK.with(|s| match s.borrow_mut().as_mut() {
        Some(buf) => {
            let out = buf.clone();
            buf.clear();
            out
        }
        None => Vec::new(),
    })
}

/// Peek at the captured messages without clearing them.
pub fn snapshot() -> Vec<String> {
    TL_SINK.with(|s| s.borrow().as_ref().cloned().unwrap_or_default())
}

/// Emit a diagnostic record: captured by the thread-local sink if enabled,
/// and always routed to the operational log under the `shelterlite::diag`
/// target.
#[macro_export]
macro_rules! diag {
    ($($arg:tt)*) => {{
        let __s = format!($($arg)*);
        $crate::diag::write_str(&__s);
        ::log::log!(target: "shelterlite::diag", ::log::Level::Warn, "{}", __s);
    }};
}

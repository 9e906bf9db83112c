//! Diagnostics sink.
//!
//! In the browser every diagnostic goes to the developer console. Native
//! builds (unit tests) have no console, so diagnostics are recorded per
//! thread and can be drained with [`take_recorded`].

#[cfg(not(target_arch = "wasm32"))]
use std::cell::RefCell;

/// Severity of a diagnostic.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Level {
    Info,
    Warn,
    Error,
}

/// A single reported diagnostic.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Diagnostic {
    pub level: Level,
    /// Error kind (e.g. `SecurityError`), empty for plain messages
    pub kind: String,
    pub message: String,
}

#[cfg(not(target_arch = "wasm32"))]
thread_local! {
    static RECORDED: RefCell<Vec<Diagnostic>> = const { RefCell::new(Vec::new()) };
}

pub fn info(message: &str) {
    emit(Diagnostic {
        level: Level::Info,
        kind: String::new(),
        message: message.to_string(),
    });
}

pub fn warn(message: &str) {
    emit(Diagnostic {
        level: Level::Warn,
        kind: String::new(),
        message: message.to_string(),
    });
}

/// Report an error as `kind` + `message`, the way the console prints host errors.
pub fn error(kind: &str, message: &str) {
    emit(Diagnostic {
        level: Level::Error,
        kind: kind.to_string(),
        message: message.to_string(),
    });
}

#[cfg(target_arch = "wasm32")]
fn emit(diagnostic: Diagnostic) {
    use web_sys::console;

    match diagnostic.level {
        Level::Info => console::log_1(&diagnostic.message.into()),
        Level::Warn => console::warn_1(&diagnostic.message.into()),
        Level::Error => console::error_2(&diagnostic.kind.into(), &diagnostic.message.into()),
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn emit(diagnostic: Diagnostic) {
    RECORDED.with(|r| r.borrow_mut().push(diagnostic));
}

/// Drain the diagnostics recorded on this thread.
#[cfg(not(target_arch = "wasm32"))]
pub fn take_recorded() -> Vec<Diagnostic> {
    RECORDED.with(|r| std::mem::take(&mut *r.borrow_mut()))
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;

    #[test]
    fn test_records_in_order_and_drains() {
        let _ = take_recorded();

        warn("skipped a.png");
        error("SecurityError", "blocked");

        let recorded = take_recorded();
        assert_eq!(recorded.len(), 2);
        assert_eq!(recorded[0].level, Level::Warn);
        assert_eq!(recorded[1].kind, "SecurityError");
        assert!(take_recorded().is_empty());
    }
}

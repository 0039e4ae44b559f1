//! Leveled log macros. Verbose output is off unless switched on with `set_verbose`.

use std::sync::atomic::{AtomicBool, Ordering};

static VERBOSE: AtomicBool = AtomicBool::new(false);

#[inline(always)]
pub fn is_verbose() -> bool {
    VERBOSE.load(Ordering::Acquire)
}

#[inline(always)]
pub fn set_verbose(verbose: bool) {
    VERBOSE.store(verbose, Ordering::Release);
}

#[macro_export]
macro_rules! log {
    ($prelude:tt, $($arg:expr),* $(,)*) => {
        println!("[ {} ] {}", $prelude, $($arg),*);
    };
}

#[macro_export]
macro_rules! elog {
    ($prelude:tt, $($arg:expr),* $(,)*) => {
        eprintln!("[ {} ] {}", $prelude, $($arg),*);
    };
}

#[macro_export]
macro_rules! linfo {
    ($fmt:tt $(,$arg:expr)* $(,)?) => {
        $crate::log!("INFO", format_args!($fmt, $($arg),*));
    };
}

#[macro_export]
macro_rules! lwarn {
    ($fmt:tt $(,$arg:expr)* $(,)?) => {
        $crate::elog!("WARNING", format_args!($fmt, $($arg),*));
    };
}

#[macro_export]
macro_rules! lverbose {
    ($fmt:tt $(,$arg:expr)* $(,)?) => {
        if $crate::diagnostics::is_verbose() {
            $crate::log!("VERBOSE", format_args!($fmt, $($arg),*));
        }
    };
}

//! Store-internal log macros.
//!
//! With the `logging` feature each macro forwards its arguments unchanged to
//! the matching `tracing` macro; without it they expand to nothing, so field
//! expressions are never evaluated. The crate never installs a subscriber.
//!
//! Level policy:
//!
//! - `trace!`: one event per single-key statement (`set`, `get`, `remove`)
//!   and the row count collected by a bulk read
//! - `debug!`: batch and glob statements with their key counts, opening a
//!   store, creating a table
//! - `info!`: a store bound to its table, a table created
//! - `warn!`: a `KeyNotFound` about to be returned
//! - `error!`: a missing table or an undecodable row about to be returned
//!
//! Every event at `warn!` or `error!` is followed by returning the error; the
//! macros are never a substitute for propagating it.

#[cfg(feature = "logging")]
macro_rules! log_trace {
    ($($arg:tt)*) => { tracing::trace!($($arg)*) }
}

#[cfg(not(feature = "logging"))]
macro_rules! log_trace {
    ($($arg:tt)*) => {};
}

#[cfg(feature = "logging")]
macro_rules! log_debug {
    ($($arg:tt)*) => { tracing::debug!($($arg)*) }
}

#[cfg(not(feature = "logging"))]
macro_rules! log_debug {
    ($($arg:tt)*) => {};
}

#[cfg(feature = "logging")]
macro_rules! log_info {
    ($($arg:tt)*) => { tracing::info!($($arg)*) }
}

#[cfg(not(feature = "logging"))]
macro_rules! log_info {
    ($($arg:tt)*) => {};
}

#[cfg(feature = "logging")]
macro_rules! log_warn {
    ($($arg:tt)*) => { tracing::warn!($($arg)*) }
}

#[cfg(not(feature = "logging"))]
macro_rules! log_warn {
    ($($arg:tt)*) => {};
}

#[cfg(feature = "logging")]
macro_rules! log_error {
    ($($arg:tt)*) => { tracing::error!($($arg)*) }
}

#[cfg(not(feature = "logging"))]
macro_rules! log_error {
    ($($arg:tt)*) => {};
}

pub(crate) use log_debug as debug;
pub(crate) use log_error as error;
pub(crate) use log_info as info;
pub(crate) use log_trace as trace;
pub(crate) use log_warn as warn;

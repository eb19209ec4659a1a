// SPDX-FileCopyrightText: 2026 Google LLC
//
// SPDX-License-Identifier: Apache-2.0
use crate::stdio::{CharSink, Console, SinkWriter};

// `core::fmt` is used here because `ufmt` cannot format `log` records.
use core::cell::UnsafeCell;
use core::fmt::Write;
use log::LevelFilter;

/// A global logger instance to be used with the `log` crate.
///
/// Use [`init`] to hand it the console.
pub static LOGGER: SinkLogger<Console> = SinkLogger::new(LevelFilter::Trace, LevelFilter::Warn);

/// Wrapper for a [`CharSink`] to be used as a logger with the `log` crate.
///
/// Every record is written as `LEVEL | file:line - message`, followed by a
/// flush. The level prefix is printed for records at or above
/// `display_level`, the source location for records at or above
/// `display_source`.
///
/// # Safety
///
/// Using this logger is only safe if there is only one thread of execution.
/// Even though `SinkLogger` is `Send` and `Sync`, the sink is accessed
/// without synchronisation.
pub struct SinkLogger<S> {
    sink: UnsafeCell<Option<S>>,
    pub display_level: LevelFilter,
    pub display_source: LevelFilter,
}

impl<S> SinkLogger<S> {
    pub const fn new(display_level: LevelFilter, display_source: LevelFilter) -> SinkLogger<S> {
        SinkLogger {
            sink: UnsafeCell::new(None),
            display_level,
            display_source,
        }
    }

    /// Set the sink log records are written to.
    ///
    /// # Safety
    ///
    /// Only safe if there is only one thread of execution and no record is
    /// being logged at the same time.
    pub unsafe fn set_sink(&self, sink: S) {
        *self.sink.get() = Some(sink);
    }

    /// Remove the sink. Records logged afterwards are dropped.
    ///
    /// # Safety
    ///
    /// Same as [`SinkLogger::set_sink`].
    pub unsafe fn take_sink(&self) -> Option<S> {
        (*self.sink.get()).take()
    }
}

impl<S: CharSink + Send> log::Log for SinkLogger<S> {
    fn enabled(&self, _metadata: &log::Metadata) -> bool {
        // SAFETY: single thread of execution, see the type documentation.
        unsafe { (*self.sink.get()).is_some() }
    }

    fn log(&self, record: &log::Record) {
        // SAFETY: single thread of execution, see the type documentation.
        let Some(sink) = (unsafe { (*self.sink.get()).as_mut() }) else {
            return;
        };
        let mut w = SinkWriter(sink);

        if record.level() <= self.display_level {
            let _ = write!(w, "{} | ", record.level());
        }
        if record.level() <= self.display_source {
            let _ = write!(
                w,
                "{}:{} - ",
                record.file().unwrap_or("<unknown>"),
                record.line().unwrap_or(0)
            );
        }
        let _ = writeln!(w, "{}", record.args());
        w.0.flush();
    }

    fn flush(&self) {
        // SAFETY: single thread of execution, see the type documentation.
        if let Some(sink) = unsafe { (*self.sink.get()).as_mut() } {
            sink.flush();
        }
    }
}

unsafe impl<S: Send> core::marker::Send for SinkLogger<S> {}
unsafe impl<S: Send> core::marker::Sync for SinkLogger<S> {}

/// Install [`LOGGER`] as the `log` logger, writing to `console`.
///
/// # Safety
///
/// Same as [`install`].
pub unsafe fn init(console: Console, max_level: LevelFilter) {
    install(&LOGGER, console, max_level);
}

/// Install `logger` as the `log` logger, writing to `sink`.
///
/// Only the first installation takes effect; later calls only replace the
/// sink of `logger` and the maximum level.
///
/// # Safety
///
/// Only safe if there is only one thread of execution. The target has no
/// atomic compare-and-swap, so the logger is installed with the racy
/// variants of the `log` setters.
pub unsafe fn install<S: CharSink + Send>(
    logger: &'static SinkLogger<S>,
    sink: S,
    max_level: LevelFilter,
) {
    logger.set_sink(sink);
    log::set_logger_racy(logger).ok();
    log::set_max_level_racy(max_level);
}

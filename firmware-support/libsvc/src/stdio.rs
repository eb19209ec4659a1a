// SPDX-FileCopyrightText: 2026 Google LLC
//
// SPDX-License-Identifier: Apache-2.0

//! Character I/O on top of the UART.
//!
//! [`CharSink`] is the only output primitive the rest of the runtime uses.
//! There is no software buffering anywhere: every [`CharSink::put_byte`] goes
//! straight to the transmitter, and [`CharSink::flush`] waits for the
//! hardware to drain rather than emptying a buffer. Line buffering is
//! emulated one layer up, by the formatter flushing after a line ends.

pub mod log;

use heapless::Vec;
use svc_hal::mmio::Registers;
use svc_hal::uart::Uart;

#[cfg(not(feature = "silent-io"))]
use svc_hal::mmio::Mmio;

/// Destination for output bytes.
pub trait CharSink {
    /// Transmit one byte, blocking until the device accepts it.
    fn put_byte(&mut self, byte: u8);

    /// Transmit every byte of `bytes`, in order.
    fn put_bytes(&mut self, bytes: &[u8]) {
        for &b in bytes {
            self.put_byte(b);
        }
    }

    /// Transmit a string.
    fn put_str(&mut self, s: &str) {
        self.put_bytes(s.as_bytes())
    }

    /// Block until all transmitted bytes have left the device.
    fn flush(&mut self);
}

/// Source of input bytes.
pub trait CharSource {
    /// Whether [`CharSource::get_byte_nonblocking`] would return a byte.
    fn byte_available(&mut self) -> bool;

    /// Take the next byte if one has arrived.
    fn get_byte_nonblocking(&mut self) -> Option<u8>;

    /// Wait for the next byte.
    fn get_byte(&mut self) -> u8 {
        loop {
            if let Some(b) = self.get_byte_nonblocking() {
                return b;
            }
        }
    }
}

impl<S: CharSink + ?Sized> CharSink for &mut S {
    fn put_byte(&mut self, byte: u8) {
        (**self).put_byte(byte)
    }

    fn put_bytes(&mut self, bytes: &[u8]) {
        (**self).put_bytes(bytes)
    }

    fn flush(&mut self) {
        (**self).flush()
    }
}

impl<R: Registers> CharSink for Uart<R> {
    fn put_byte(&mut self, byte: u8) {
        self.send(byte)
    }

    fn flush(&mut self) {
        Uart::flush(self)
    }
}

impl<R: Registers> CharSource for Uart<R> {
    fn byte_available(&mut self) -> bool {
        self.data_available()
    }

    fn get_byte_nonblocking(&mut self) -> Option<u8> {
        self.try_receive().ok()
    }
}

/// A console that discards all output and never receives anything.
#[derive(Clone, Copy, Debug, Default)]
pub struct Silent;

impl CharSink for Silent {
    fn put_byte(&mut self, _byte: u8) {}

    fn flush(&mut self) {}
}

impl CharSource for Silent {
    fn byte_available(&mut self) -> bool {
        false
    }

    fn get_byte_nonblocking(&mut self) -> Option<u8> {
        None
    }

    fn get_byte(&mut self) -> u8 {
        0
    }
}

/// The console of the SoC.
#[cfg(not(feature = "silent-io"))]
pub type Console = Uart<Mmio>;

/// The console of the SoC.
#[cfg(feature = "silent-io")]
pub type Console = Silent;

/// Get a handle to the console.
///
/// # Safety
///
/// Only sound when executing on the SVC SoC.
pub unsafe fn console() -> Console {
    #[cfg(not(feature = "silent-io"))]
    {
        Uart::svc()
    }
    #[cfg(feature = "silent-io")]
    {
        Silent
    }
}

/// A sink that keeps the first `N` bytes written to it in memory.
///
/// Bytes beyond the capacity are counted but dropped.
#[derive(Default)]
pub struct Capture<const N: usize> {
    bytes: Vec<u8, N>,
    dropped: usize,
    flushes: usize,
    flushed_at: Option<usize>,
}

impl<const N: usize> Capture<N> {
    pub const fn new() -> Capture<N> {
        Capture {
            bytes: Vec::new(),
            dropped: 0,
            flushes: 0,
            flushed_at: None,
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Number of bytes that did not fit.
    pub fn dropped(&self) -> usize {
        self.dropped
    }

    /// Number of flushes so far.
    pub fn flushes(&self) -> usize {
        self.flushes
    }

    /// How many bytes had been written when the last flush happened.
    pub fn flushed_at(&self) -> Option<usize> {
        self.flushed_at
    }

    pub fn clear(&mut self) {
        *self = Capture::new();
    }
}

impl<const N: usize> CharSink for Capture<N> {
    fn put_byte(&mut self, byte: u8) {
        if self.bytes.push(byte).is_err() {
            self.dropped += 1;
        }
    }

    fn flush(&mut self) {
        self.flushes += 1;
        self.flushed_at = Some(self.bytes.len() + self.dropped);
    }
}

/// Adapter to use any [`CharSink`] with `core::fmt` and `ufmt` macros.
pub struct SinkWriter<'a, S: ?Sized>(pub &'a mut S);

impl<S: CharSink + ?Sized> core::fmt::Write for SinkWriter<'_, S> {
    fn write_str(&mut self, s: &str) -> core::fmt::Result {
        self.0.put_str(s);
        Ok(())
    }
}

impl<S: CharSink + ?Sized> ufmt::uWrite for SinkWriter<'_, S> {
    type Error = ();

    fn write_str(&mut self, s: &str) -> Result<(), Self::Error> {
        self.0.put_str(s);
        Ok(())
    }
}

/// Write a character to the sink. Returns the character.
pub fn putchar<S: CharSink + ?Sized>(sink: &mut S, c: u8) -> u8 {
    sink.put_byte(c);
    c
}

/// Write a string to the sink followed by a newline.
pub fn puts<S: CharSink + ?Sized>(sink: &mut S, s: &str) {
    sink.put_str(s);
    sink.put_byte(b'\n');
}

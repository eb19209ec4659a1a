// SPDX-FileCopyrightText: 2026 Google LLC
//
// SPDX-License-Identifier: Apache-2.0

use core::fmt::{Display, Write};
use core::panic::PanicInfo;

use crate::stdio::{CharSink, SinkWriter};

/// Stop the program. On the SoC this traps into the debugger with `ebreak`
/// and keeps trapping if execution is resumed.
pub fn halt() -> ! {
    loop {
        #[cfg(target_arch = "riscv32")]
        // SAFETY: `ebreak` only transfers control to the debug environment.
        unsafe {
            riscv::asm::ebreak()
        }
    }
}

/// Spin for `count` iterations.
///
/// The loop body cannot be optimised away, but the wall-clock duration
/// depends on the core's clock and pipeline.
pub fn delay(count: u32) {
    for i in 0..count {
        core::hint::black_box(i);
    }
}

/// Write `message` and a newline to `sink`, then wait for it to drain.
pub fn report<S: CharSink + ?Sized>(sink: &mut S, message: &dyn Display) {
    let mut w = SinkWriter(sink);
    let _ = writeln!(w, "{message}");
    w.0.flush();
}

/// [`report`] the panic to `sink`, then [`halt`].
pub fn report_panic<S: CharSink + ?Sized>(sink: &mut S, info: &PanicInfo) -> ! {
    report(sink, info);
    halt()
}

/// Define a `#[panic_handler]` that reports to the given sink expression and
/// halts.
///
/// ```ignore
/// libsvc::panic_to_sink!(unsafe { libsvc::stdio::console() });
/// ```
#[macro_export]
macro_rules! panic_to_sink {
    ($sink:expr) => {
        #[panic_handler]
        fn panic_handler(info: &::core::panic::PanicInfo) -> ! {
            let mut sink = $sink;
            $crate::util::report_panic(&mut sink, info)
        }
    };
}

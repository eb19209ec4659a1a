// SPDX-FileCopyrightText: 2026 Google LLC
//
// SPDX-License-Identifier: Apache-2.0
/*! Hardware performance counters.

On rv32 the 64-bit `cycle` and `instret` counters are exposed as two 32-bit
CSRs each. The halves cannot be sampled in one instruction, so a carry from
the low into the high half between the two reads produces a torn value that
is off by a full `2^32`. [`read_counter`] reads the high half on both sides
of the low half and starts over when they differ.

 - [`CounterHalves`] is the primitive: one read of either half.
 - [`Cycle`] and [`InstRet`] are the two counters of the core.
*/

/// A 64-bit counter that can only be read 32 bits at a time.
pub trait CounterHalves {
    /// Read bits 0..32 of the counter.
    fn read_low(&self) -> u32;

    /// Read bits 32..64 of the counter.
    fn read_high(&self) -> u32;
}

impl<C: CounterHalves + ?Sized> CounterHalves for &C {
    fn read_low(&self) -> u32 {
        (**self).read_low()
    }

    fn read_high(&self) -> u32 {
        (**self).read_high()
    }
}

/// Read the full 64-bit value of `counter` without tearing.
///
/// Loops until two reads of the high half around one read of the low half
/// agree. A rollover of the low half can happen at most once per `2^32`
/// ticks, so this practically finishes in one or two iterations.
pub fn read_counter<C: CounterHalves + ?Sized>(counter: &C) -> u64 {
    loop {
        let high = counter.read_high();
        let low = counter.read_low();
        if counter.read_high() == high {
            return (u64::from(high) << 32) | u64::from(low);
        }
    }
}

/// Clock cycles since reset (`cycle`/`cycleh`).
#[derive(Clone, Copy, Debug, Default)]
pub struct Cycle;

/// Instructions retired since reset (`instret`/`instreth`).
#[derive(Clone, Copy, Debug, Default)]
pub struct InstRet;

#[cfg(target_arch = "riscv32")]
impl CounterHalves for Cycle {
    fn read_low(&self) -> u32 {
        riscv::register::cycle::read() as u32
    }

    fn read_high(&self) -> u32 {
        riscv::register::cycleh::read() as u32
    }
}

#[cfg(target_arch = "riscv32")]
impl CounterHalves for InstRet {
    fn read_low(&self) -> u32 {
        riscv::register::instret::read() as u32
    }

    fn read_high(&self) -> u32 {
        riscv::register::instreth::read() as u32
    }
}

/// Clock cycles since reset.
#[cfg(target_arch = "riscv32")]
pub fn read_cycles() -> u64 {
    read_counter(&Cycle)
}

/// Instructions retired since reset.
#[cfg(target_arch = "riscv32")]
pub fn read_instructions_retired() -> u64 {
    read_counter(&InstRet)
}

// SPDX-FileCopyrightText: 2026 Google LLC
//
// SPDX-License-Identifier: Apache-2.0

//! System information registers.

use crate::mmio::Registers;

/// System clock frequency register, in Hz.
pub const CLOCK_FREQ_OFFSET: u32 = 0x10;

/// The frequency the SoC is clocked at, as configured by the hardware.
pub fn clock_freq<R: Registers + ?Sized>(regs: &R) -> u32 {
    regs.read(CLOCK_FREQ_OFFSET)
}

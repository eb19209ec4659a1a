// SPDX-FileCopyrightText: 2026 Google LLC
//
// SPDX-License-Identifier: Apache-2.0

//! Access to the memory-mapped I/O region of the SVC SoC.
//!
//! All peripherals live in one 32-bit register region starting at
//! [`MMIO_BASE`]. Drivers address registers by byte offset through the
//! [`Registers`] trait, so they can be exercised against a fake register
//! block when not running on the SoC.

/// Start of the I/O space (bit 31 set).
pub const MMIO_BASE: usize = 0x8000_0000;

/// A block of 32-bit registers addressed by byte offset.
pub trait Registers {
    /// Read the register at `offset`.
    fn read(&self, offset: u32) -> u32;

    /// Write `value` to the register at `offset`.
    fn write(&self, offset: u32, value: u32);
}

impl<R: Registers + ?Sized> Registers for &R {
    fn read(&self, offset: u32) -> u32 {
        (**self).read(offset)
    }

    fn write(&self, offset: u32, value: u32) {
        (**self).write(offset, value)
    }
}

/// Volatile register access at a fixed base address.
#[derive(Clone, Copy)]
pub struct Mmio {
    base: *mut u32,
}

impl Mmio {
    /// Create a new [`Mmio`] instance given a base address.
    ///
    /// # Safety
    ///
    /// The `base` pointer MUST BE valid for volatile 32-bit reads and writes
    /// at every offset used by the drivers built on top of it.
    pub const unsafe fn new(base: *mut u32) -> Mmio {
        Mmio { base }
    }

    /// The I/O region of the SVC SoC.
    ///
    /// # Safety
    ///
    /// Only sound when executing on the SVC SoC, where [`MMIO_BASE`] is
    /// backed by the peripheral interconnect.
    pub const unsafe fn svc() -> Mmio {
        Mmio::new(MMIO_BASE as *mut u32)
    }

    fn register(&self, offset: u32) -> *mut u32 {
        self.base.wrapping_byte_add(offset as usize)
    }
}

impl Registers for Mmio {
    fn read(&self, offset: u32) -> u32 {
        // SAFETY: validity of the region was promised at construction.
        unsafe { self.register(offset).read_volatile() }
    }

    fn write(&self, offset: u32, value: u32) {
        // SAFETY: validity of the region was promised at construction.
        unsafe { self.register(offset).write_volatile(value) }
    }
}

// SAFETY: the register region is not tied to a thread of execution; the
// pointer is only ever used for volatile accesses.
unsafe impl Send for Mmio {}

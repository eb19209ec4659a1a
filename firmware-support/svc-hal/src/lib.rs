// SPDX-FileCopyrightText: 2026 Google LLC
//
// SPDX-License-Identifier: Apache-2.0

#![cfg_attr(not(test), no_std)]

pub mod csr;
pub mod mmio;
pub mod sys;
pub mod uart;

pub use mmio::{Mmio, Registers, MMIO_BASE};
pub use uart::Uart;

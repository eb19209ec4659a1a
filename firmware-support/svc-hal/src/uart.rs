// SPDX-FileCopyrightText: 2026 Google LLC
//
// SPDX-License-Identifier: Apache-2.0

use ufmt::derive::uDebug;

use crate::mmio::{Mmio, Registers};

/// UART TX data register.
pub const TX_OFFSET: u32 = 0x00;
/// UART TX status register, bit 0 is set when the transmitter is ready.
pub const TX_STATUS_OFFSET: u32 = 0x04;
/// UART RX data register. Reading it clears the valid flag.
pub const RX_OFFSET: u32 = 0x14;
/// UART RX status register, bit 0 is set when a byte is available.
pub const RX_STATUS_OFFSET: u32 = 0x18;

const READY_MASK: u32 = 0b1;

#[derive(uDebug, Debug, Clone, Copy, PartialEq, Eq)]
pub struct UartStatus {
    pub transmit_ready: bool,
    pub data_available: bool,
}

#[derive(uDebug, Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransmitBufferFull;

#[derive(uDebug, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReceiveBufferEmpty;

#[derive(Clone)]
/// `Uart` is the universal asynchronous receiver-transmitter of the SVC SoC.
///
/// The device has no FIFO worth speaking of: every byte is handed to the
/// transmitter as soon as it reports ready, and every wait is a busy poll of
/// a status bit.
pub struct Uart<R = Mmio> {
    regs: R,
}

impl Uart<Mmio> {
    /// The UART of the SVC SoC.
    ///
    /// # Safety
    ///
    /// Only sound when executing on the SVC SoC.
    pub const unsafe fn svc() -> Uart<Mmio> {
        Uart { regs: Mmio::svc() }
    }
}

impl<R: Registers> Uart<R> {
    /// Create a new [`Uart`] on top of a register block.
    pub const fn new(regs: R) -> Uart<R> {
        Uart { regs }
    }

    /// UART status register output
    pub fn read_status(&self) -> UartStatus {
        let tx = self.regs.read(TX_STATUS_OFFSET);
        let rx = self.regs.read(RX_STATUS_OFFSET);

        UartStatus {
            transmit_ready: tx & READY_MASK != 0,
            data_available: rx & READY_MASK != 0,
        }
    }

    /// Whether the transmitter cannot accept a byte right now.
    pub fn transmit_busy(&self) -> bool {
        self.regs.read(TX_STATUS_OFFSET) & READY_MASK == 0
    }

    /// Whether a received byte is waiting to be read.
    pub fn data_available(&self) -> bool {
        self.regs.read(RX_STATUS_OFFSET) & READY_MASK != 0
    }

    /// The `receive` function attempts to receive data from the UART. If no
    /// data is available, it keeps looping until data is available.
    pub fn receive(&self) -> u8 {
        loop {
            if let Ok(val) = self.try_receive() {
                return val;
            }
        }
    }

    /// The `try_receive` function attempts to receive data from the UART. If no
    /// data is available, it returns an error.
    pub fn try_receive(&self) -> Result<u8, ReceiveBufferEmpty> {
        if self.data_available() {
            Ok((self.regs.read(RX_OFFSET) & 0xff) as u8)
        } else {
            Err(ReceiveBufferEmpty)
        }
    }

    /// The `send` function sends the given data to the UART. If the UART is
    /// unable to accept the data, it keeps looping until it can send the data.
    pub fn send(&self, data: u8) {
        loop {
            if let Ok(()) = self.try_send(data) {
                return;
            }
        }
    }

    /// The `try_send` function attempts to send the given data to the UART. If
    /// the UART is unable to accept the data, it returns an error.
    pub fn try_send(&self, data: u8) -> Result<(), TransmitBufferFull> {
        if self.transmit_busy() {
            Err(TransmitBufferFull)
        } else {
            self.regs.write(TX_OFFSET, u32::from(data));
            Ok(())
        }
    }

    /// Wait until the last written byte has left the transmitter.
    pub fn flush(&self) {
        while self.transmit_busy() {}
    }
}

impl<R: Registers> ufmt::uWrite for Uart<R> {
    fn write_str(&mut self, s: &str) -> Result<(), Self::Error> {
        for b in s.bytes() {
            self.send(b);
        }
        Ok(())
    }

    type Error = ();
}

impl<R: Registers> core::fmt::Write for Uart<R> {
    fn write_str(&mut self, s: &str) -> core::fmt::Result {
        for b in s.bytes() {
            self.send(b);
        }
        Ok(())
    }
}

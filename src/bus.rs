//! Bus transports for acquiring one 32-bit frame
//!
//! The MAX31855 is read-only: a transaction is chip-select framing around 32
//! clocked-out bits. The decode and retry logic in
//! [`Max31855`](crate::Max31855) only depends on the [`Transport`] trait, so
//! it works over a hardware SPI peripheral, a manually clocked GPIO bus, or an
//! injected test double

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{InputPin, OutputPin};
use embedded_hal::spi::{Operation, SpiDevice};

/// Settle time around chip-select and clock edges, in microseconds
///
/// Conservative empirical value from the original board bring-up; adjust per
/// device and wiring with [`SpiTransport::settle_delay_us`] or
/// [`BitBangTransport::settle_delay_us`]
pub const DEFAULT_SETTLE_DELAY_US: u32 = 1000;

/// One chip-select-framed acquisition of a 32-bit frame
pub trait Transport {
    /// Transport-specific communication error
    type Error;

    /// Select the device, clock out 32 bits MSB-first and deselect
    fn read_frame<D: DelayNs>(&mut self, delay: &mut D) -> Result<u32, Self::Error>;
}

/// Transport over a hardware SPI peripheral
///
/// The [`SpiDevice`] owns chip-select framing; clock rate and mode are the bus
/// owner's concern (the device tolerates up to 14 MHz, SPI mode 0)
#[derive(Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SpiTransport<SPI> {
    spi: SPI,
    settle_us: u32,
}

impl<SPI, E> SpiTransport<SPI>
where
    SPI: SpiDevice<u8, Error = E>,
{
    /// Create a hardware SPI transport
    pub fn new(spi: SPI) -> Self {
        Self {
            spi,
            settle_us: DEFAULT_SETTLE_DELAY_US,
        }
    }

    /// Override the settle delay inserted after chip-select assertion
    #[must_use]
    pub fn settle_delay_us(mut self, settle_us: u32) -> Self {
        self.settle_us = settle_us;
        self
    }

    /// Release the SPI device, consuming the transport
    pub fn release(self) -> SPI {
        self.spi
    }
}

impl<SPI, E> Transport for SpiTransport<SPI>
where
    SPI: SpiDevice<u8, Error = E>,
{
    type Error = E;

    fn read_frame<D: DelayNs>(&mut self, _delay: &mut D) -> Result<u32, E> {
        let mut frame = [0u8; 4];
        self.spi.transaction(&mut [
            Operation::DelayNs(self.settle_us.saturating_mul(1000)),
            Operation::Read(&mut frame),
        ])?;
        Ok(u32::from_be_bytes(frame))
    }
}

/// Transport that clocks the bus manually through GPIO pins
///
/// For boards where no SPI peripheral is available on the wired pins. All pins
/// must share one error type, as is usual for multi-pin drivers
#[derive(Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BitBangTransport<CS, SCK, MISO> {
    cs: CS,
    sck: SCK,
    miso: MISO,
    settle_us: u32,
}

impl<CS, SCK, MISO, E> BitBangTransport<CS, SCK, MISO>
where
    CS: OutputPin<Error = E>,
    SCK: OutputPin<Error = E>,
    MISO: InputPin<Error = E>,
{
    /// Create a manually clocked transport, leaving the bus idle
    /// (chip-select high)
    pub fn new(mut cs: CS, sck: SCK, miso: MISO) -> Self {
        let _ = cs.set_high();
        Self {
            cs,
            sck,
            miso,
            settle_us: DEFAULT_SETTLE_DELAY_US,
        }
    }

    /// Override the settle delay around each clock edge
    #[must_use]
    pub fn settle_delay_us(mut self, settle_us: u32) -> Self {
        self.settle_us = settle_us;
        self
    }

    /// Release the pins, consuming the transport
    pub fn release(self) -> (CS, SCK, MISO) {
        (self.cs, self.sck, self.miso)
    }
}

impl<CS, SCK, MISO, E> Transport for BitBangTransport<CS, SCK, MISO>
where
    CS: OutputPin<Error = E>,
    SCK: OutputPin<Error = E>,
    MISO: InputPin<Error = E>,
{
    type Error = E;

    fn read_frame<D: DelayNs>(&mut self, delay: &mut D) -> Result<u32, E> {
        self.cs.set_low()?;
        delay.delay_us(self.settle_us);
        self.sck.set_low()?;
        delay.delay_us(self.settle_us);

        let mut frame = 0u32;
        for _ in 0..32 {
            self.sck.set_low()?;
            delay.delay_us(self.settle_us);
            frame <<= 1;
            if self.miso.is_high()? {
                frame |= 1;
            }
            self.sck.set_high()?;
            delay.delay_us(self.settle_us);
        }

        self.cs.set_high()?;
        Ok(frame)
    }
}

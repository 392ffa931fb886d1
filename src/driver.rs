//! Blocking driver for the MAX31855 thermocouple-to-digital converter

use embedded_hal::delay::DelayNs;

use crate::{bus::Transport, error::Error, fault::FaultCode, frame::RawFrame};

/// Sentinel returned by the temperature reads when the acquired frame is
/// faulted; compare against this or check [`Max31855::fault`] for validity
pub const TEMPERATURE_INVALID: i32 = i32::MAX;

/// Default bound on frame acquisition attempts
pub const DEFAULT_MAX_ATTEMPTS: u8 = 64;

/// Default wait between faulted acquisition attempts, in milliseconds
pub const DEFAULT_RETRY_DELAY_MS: u32 = 25;

/// Acquisition tuning and wiring options
///
/// The retry bound and delay are empirical values from the original hardware
/// tuning, kept as overridable defaults since exact timing depends on the
/// physical device and wiring
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Config {
    /// Maximum acquisition attempts per read; values of 0 act as 1
    pub max_attempts: u8,
    /// Wait between attempts when the previous frame was faulted
    pub retry_delay_ms: u32,
    /// Thermocouple leads wired with swapped polarity; probe readings are
    /// corrected by reflecting the probe delta around the ambient reading
    pub reversed: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            retry_delay_ms: DEFAULT_RETRY_DELAY_MS,
            reversed: false,
        }
    }
}

/// MAX31855 driver instance (blocking)
#[derive(Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Max31855<BUS, D> {
    bus: BUS,
    delay: D,
    config: Config,
    last_fault: FaultCode,
}

impl<BUS, D, E> Max31855<BUS, D>
where
    BUS: Transport<Error = E>,
    D: DelayNs,
{
    /// Create a new driver instance with default tuning
    pub fn new(bus: BUS, delay: D) -> Self {
        Self::with_config(bus, delay, Config::default())
    }

    /// Create a new driver instance with explicit tuning
    pub fn with_config(bus: BUS, delay: D, config: Config) -> Self {
        Self {
            bus,
            delay,
            config,
            last_fault: FaultCode::None,
        }
    }

    /// Release the transport and delay provider, consuming the driver
    pub fn release(self) -> (BUS, D) {
        (self.bus, self.delay)
    }

    /// Perform one diagnostic frame read and report whether it was fault-free
    ///
    /// The MAX31855 is a one-way device, so there is no way to probe for its
    /// presence; a fault-free read is the best available health check. A
    /// transient fault during the diagnostic read produces a false negative
    ///
    /// # Errors
    ///
    /// Returns an error if the bus communication fails
    pub fn init(&mut self) -> Result<bool, Error<E>> {
        let frame = self.read_raw()?;
        Ok(!frame.has_fault())
    }

    /// The fault code from the most recent frame acquisition
    ///
    /// Pure accessor; performs no bus activity
    #[must_use]
    pub fn fault(&self) -> FaultCode {
        self.last_fault
    }

    /// Acquire one 32-bit frame, retrying while it carries a fault
    ///
    /// The device intermittently returns an invalid frame on a fraction of
    /// reads; this is transient, so faulted frames are re-acquired up to
    /// [`Config::max_attempts`] times with [`Config::retry_delay_ms`] between
    /// attempts. When the bound is exhausted the last frame is returned as-is
    /// and its fault code is left in [`Self::fault`]
    ///
    /// # Errors
    ///
    /// Returns an error if the bus communication fails
    pub fn read_raw(&mut self) -> Result<RawFrame, Error<E>> {
        let attempts = self.config.max_attempts.max(1);
        let mut frame = RawFrame::new(0);
        for _ in 0..attempts {
            frame = self
                .bus
                .read_frame(&mut self.delay)
                .map(RawFrame::new)
                .map_err(Error::Communication)?;
            self.last_fault = frame.fault();

            #[cfg(feature = "defmt")]
            defmt::trace!("Acquired frame 0x{:08X}", frame.raw());

            if !frame.has_fault() {
                break;
            }

            #[cfg(feature = "defmt")]
            defmt::warn!("Faulted frame ({}), retrying", self.last_fault);

            self.delay.delay_ms(self.config.retry_delay_ms);
        }
        Ok(frame)
    }

    /// Read the thermocouple probe temperature in milli-degrees Celsius
    ///
    /// Returns [`TEMPERATURE_INVALID`] when the acquired frame is faulted.
    /// With [`Config::reversed`] set, the reading is recomputed as
    /// `ambient + (ambient - probe)` to undo swapped thermocouple leads
    ///
    /// # Errors
    ///
    /// Returns an error if the bus communication fails
    pub fn read_probe(&mut self) -> Result<i32, Error<E>> {
        let frame = self.read_raw()?;
        if frame.has_fault() {
            return Ok(TEMPERATURE_INVALID);
        }
        let probe = frame.probe_millicelsius();
        if self.config.reversed {
            let ambient = frame.ambient_millicelsius();
            Ok(ambient + (ambient - probe))
        } else {
            Ok(probe)
        }
    }

    /// Read the ambient (cold-junction) temperature in milli-degrees Celsius
    ///
    /// Returns [`TEMPERATURE_INVALID`] when the acquired frame is faulted
    ///
    /// # Errors
    ///
    /// Returns an error if the bus communication fails
    pub fn read_ambient(&mut self) -> Result<i32, Error<E>> {
        let frame = self.read_raw()?;
        if frame.has_fault() {
            return Ok(TEMPERATURE_INVALID);
        }
        Ok(frame.ambient_millicelsius())
    }
}

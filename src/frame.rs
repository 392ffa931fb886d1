//! Raw 32-bit frame decoding for the MAX31855

use crate::fault::FaultCode;

/// One 32-bit frame as clocked out of the MAX31855
///
/// Bit layout:
/// - bits\[31:18\]: signed probe temperature, 14-bit two's complement, 0.25°C/LSB
/// - bits\[17:16\]: reserved/internal fault summary
/// - bits\[15:4\]: signed ambient (cold-junction) temperature, 12-bit two's
///   complement, 0.0625°C/LSB
/// - bits\[2:0\]: fault flags (open circuit, short to ground, short to supply)
///
/// When any fault bit is set, both temperature subfields are unreliable
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RawFrame {
    raw: u32,
}

impl RawFrame {
    /// Create a frame from the raw 32-bit value
    #[must_use]
    pub const fn new(raw: u32) -> Self {
        Self { raw }
    }

    /// Get the raw 32-bit frame value
    #[must_use]
    pub const fn raw(&self) -> u32 {
        self.raw
    }

    /// The low 3 fault bits of the frame
    #[must_use]
    pub const fn fault_bits(&self) -> u8 {
        (self.raw & 0b111) as u8
    }

    /// Decode the fault bits into a [`FaultCode`]
    #[must_use]
    pub const fn fault(&self) -> FaultCode {
        FaultCode::from_bits(self.fault_bits())
    }

    /// Check whether any fault bit is set
    #[must_use]
    #[inline(always)]
    pub const fn has_fault(&self) -> bool {
        self.fault_bits() != 0
    }

    /// Probe temperature as a signed ADC count (0.25°C per count)
    ///
    /// The 14-bit field occupies the top of the frame, so an arithmetic shift
    /// of the frame reinterpreted as `i32` sign-extends it
    #[must_use]
    #[allow(clippy::cast_possible_wrap)]
    pub const fn probe_counts(&self) -> i32 {
        (self.raw as i32) >> 18
    }

    /// Ambient temperature as a signed ADC count (0.0625°C per count)
    #[must_use]
    #[allow(clippy::cast_possible_wrap)]
    pub const fn ambient_counts(&self) -> i32 {
        ((self.raw as i32) << 16) >> 20
    }

    /// Probe temperature in milli-degrees Celsius
    ///
    /// Integer arithmetic throughout; no precision is lost since the
    /// sensitivity is exactly 250 milli-degrees per count
    #[must_use]
    pub const fn probe_millicelsius(&self) -> i32 {
        self.probe_counts() * 250
    }

    /// Ambient temperature in milli-degrees Celsius
    ///
    /// Sensitivity is 62.5 milli-degrees per count; computed as `counts * 625
    /// / 10` with truncating division to match the device-exact arithmetic
    #[must_use]
    pub const fn ambient_millicelsius(&self) -> i32 {
        self.ambient_counts() * 625 / 10
    }
}

impl From<u32> for RawFrame {
    fn from(raw: u32) -> Self {
        Self::new(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Build a frame from signed counts and fault bits, masking each field
    /// into its bit positions
    #[allow(clippy::cast_sign_loss)]
    fn encode(probe_counts: i32, ambient_counts: i32, fault_bits: u8) -> RawFrame {
        let probe = (probe_counts as u32) & 0x3FFF;
        let ambient = (ambient_counts as u32) & 0xFFF;
        RawFrame::new((probe << 18) | (ambient << 4) | u32::from(fault_bits & 0b111))
    }

    #[test]
    fn decodes_positive_probe() {
        // bits[31:18] = 0b00110010010011 = 3219 counts = 804.750°C
        let frame = RawFrame::new(0x324C_FC00);
        assert!(!frame.has_fault());
        assert_eq!(frame.probe_counts(), 3219);
        assert_eq!(frame.probe_millicelsius(), 804_750);
    }

    #[test]
    fn decodes_negative_ambient() {
        // Same frame: ambient field 0xFC0 sign-extends to -64 counts = -4°C
        let frame = RawFrame::new(0x324C_FC00);
        assert_eq!(frame.ambient_counts(), -64);
        assert_eq!(frame.ambient_millicelsius(), -4000);
    }

    #[test]
    fn probe_field_starts_at_bit_18() {
        // 0x0C93FC00: bits[31:18] = 0b00001100100100 = 804 counts, not the
        // 0x0C93 value a 16-bit shift would suggest
        let frame = RawFrame::new(0x0C93_FC00);
        assert_eq!(frame.probe_counts(), 804);
        assert_eq!(frame.probe_millicelsius(), 201_000);
        assert_eq!(frame.ambient_millicelsius(), -4000);
    }

    #[test]
    fn negative_quarter_degree_probe() {
        // 14-bit field of all ones is -1 count, exactly -0.25°C
        let frame = RawFrame::new(0xFFFC_0000);
        assert_eq!(frame.probe_counts(), -1);
        assert_eq!(frame.probe_millicelsius(), -250);
    }

    #[test]
    fn fault_free_fields_round_trip() {
        for &(probe, ambient) in &[(0, 0), (3219, -64), (-1, 1), (-8192, -2048), (8191, 2047)] {
            let frame = encode(probe, ambient, 0);
            assert_eq!(frame.probe_counts(), probe);
            assert_eq!(frame.ambient_counts(), ambient);
            assert!(!frame.has_fault());
        }
    }

    #[test]
    fn ambient_scaling_truncates_toward_zero() {
        // 1 count is 62.5 milli-degrees; integer arithmetic yields 62
        assert_eq!(encode(0, 1, 0).ambient_millicelsius(), 62);
        assert_eq!(encode(0, -1, 0).ambient_millicelsius(), -62);
        // 25.0°C, exactly representable
        assert_eq!(encode(0, 400, 0).ambient_millicelsius(), 25_000);
    }

    #[test]
    fn fault_bits_extracted_from_low_bits_only() {
        let frame = encode(100, 200, 0b101);
        assert_eq!(frame.fault_bits(), 0b101);
        assert!(frame.has_fault());
        assert!(!encode(-1, -1, 0).has_fault());
    }
}

//! Fault flags reported in the low 3 bits of every frame

/// Fault state reported by the MAX31855
///
/// The three fault bits are mutually exclusive by construction of the device.
/// Should a corrupted frame carry more than one bit, the code decodes to one
/// of the fault variants (which one is unspecified beyond "some fault present")
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FaultCode {
    /// No fault; temperature readings are valid
    None,
    /// The thermocouple is open (no connection)
    OpenCircuit,
    /// The thermocouple is short-circuited to GND
    ShortToGround,
    /// The thermocouple is short-circuited to VCC
    ShortToSupply,
}

impl FaultCode {
    /// Decode the low 3 fault bits of a frame
    #[must_use]
    pub const fn from_bits(bits: u8) -> Self {
        if bits & 0b001 != 0 {
            FaultCode::OpenCircuit
        } else if bits & 0b010 != 0 {
            FaultCode::ShortToGround
        } else if bits & 0b100 != 0 {
            FaultCode::ShortToSupply
        } else {
            FaultCode::None
        }
    }

    /// Check whether this code reports a fault
    #[must_use]
    #[inline(always)]
    pub const fn is_fault(&self) -> bool {
        !matches!(self, FaultCode::None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_each_fault_bit() {
        assert_eq!(FaultCode::from_bits(0b000), FaultCode::None);
        assert_eq!(FaultCode::from_bits(0b001), FaultCode::OpenCircuit);
        assert_eq!(FaultCode::from_bits(0b010), FaultCode::ShortToGround);
        assert_eq!(FaultCode::from_bits(0b100), FaultCode::ShortToSupply);
    }

    #[test]
    fn multiple_bits_still_report_a_fault() {
        assert!(FaultCode::from_bits(0b111).is_fault());
        assert!(FaultCode::from_bits(0b110).is_fault());
        assert!(!FaultCode::from_bits(0b000).is_fault());
    }
}

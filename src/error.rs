/// Error type for MAX31855 operations
///
/// Device faults (open circuit, shorts) are not errors: they are reported
/// through [`FaultCode`](crate::FaultCode) and the sentinel temperature value,
/// since the bounded retry policy absorbs them locally
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<E> {
    /// Communication error on the underlying bus or pins
    Communication(E),
}

//! Hardware seams of the sampling loop.

use crate::time::{Duration, Instant};
use core::fmt;
use embedded_hal::serial;

/// An input reading, in the full 16-bit range regardless of ADC resolution.
pub type Sample = u16;

/// A value driven to the output, in the same range as [`Sample`].
pub type OutputValue = u16;

/// Reason a single tick's I/O exchange failed.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Fault {
    /// The input conversion did not produce a reading
    Input,
    /// The output peripheral rejected the write
    Output,
    /// A value was outside the range the peripheral accepts
    InvalidValue,
}

impl fmt::Display for Fault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Fault::Input => f.write_str("input read failed"),
            Fault::Output => f.write_str("output write failed"),
            Fault::InvalidValue => f.write_str("invalid value"),
        }
    }
}

/// Monotonic microsecond time source with a blocking wait.
pub trait Clock {
    fn now(&mut self) -> Instant;

    /// Block the (single) thread of control for `duration`.
    fn sleep(&mut self, duration: Duration);
}

/// Everything one acquisition loop talks to.
///
/// The report channel is the [`fmt::Write`] side; command lines arrive through the
/// non-blocking [`serial::Read`] side, where `WouldBlock` means "nothing pending".
pub trait Board: Clock + fmt::Write + serial::Read<u8> {
    fn write_output(&mut self, value: OutputValue) -> Result<(), Fault>;

    fn read_input(&mut self) -> Result<Sample, Fault>;
}

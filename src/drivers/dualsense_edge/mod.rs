pub mod driver;
pub mod hid_report;
pub mod profile;
#[cfg(test)]
pub mod profile_test;

use thiserror::Error;

/// Writable profile slots on the DualSense Edge. Each variant's value is
/// the feature report id used for that slot's profile pages; the device
/// stores a fourth, read-only default profile that cannot be written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileSlot {
    /// Activated on the controller with FN + Square
    Square = 0x60,
    /// Activated on the controller with FN + Cross
    Cross = 0x61,
    /// Activated on the controller with FN + Circle
    Circle = 0x62,
}

impl ProfileSlot {
    /// Resolve a user-facing slot number to a slot
    pub fn from_index(index: u8) -> Result<Self, ReportError> {
        match index {
            0 => Ok(Self::Square),
            1 => Ok(Self::Cross),
            2 => Ok(Self::Circle),
            other => Err(ReportError::InvalidSlot(other)),
        }
    }

    /// Report id written into byte 0 of every packet for this slot
    pub fn report_id(&self) -> u8 {
        *self as u8
    }

    /// Position of the slot in the on-device slot list
    pub fn index(&self) -> u8 {
        match self {
            Self::Square => 0,
            Self::Cross => 1,
            Self::Circle => 2,
        }
    }
}

/// Possible errors when encoding profile reports
#[derive(Error, Debug)]
pub enum ReportError {
    #[error("invalid profile slot index `{0}`, expected 0-2")]
    InvalidSlot(u8),
    #[error("profile report set requires 3 packets to checksum, got `{got}`")]
    IncompletePacketSet { got: usize },
    #[error("curve value `{value}` at position `{position}` does not fit in a byte")]
    ValueOutOfRange { position: usize, value: i32 },
    #[error("failed to pack profile report: {0}")]
    PackFailed(#[from] packed_struct::PackingError),
}

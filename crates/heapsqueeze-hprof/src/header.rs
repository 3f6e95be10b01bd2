//! File header.
//!
//! Layout: NUL-terminated format string, u4 identifier size, u8 timestamp
//! (milliseconds since the epoch, written as two u4 halves). All integers
//! are big-endian.

use crate::error::{HprofError, Result};

/// Format strings accepted by the reader start with this prefix.
pub const FORMAT_PREFIX: &str = "JAVA PROFILE 1.0.";

/// Format string written by current JVMs.
pub const FORMAT_1_0_2: &str = "JAVA PROFILE 1.0.2";

/// Longest format string accepted before giving up on finding the NUL.
pub const MAX_FORMAT_LEN: usize = 64;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FileHeader {
    pub format: String,
    pub id_size: u32,
    pub timestamp: u64,
}

impl FileHeader {
    pub fn new(id_size: u32) -> Self {
        Self {
            format: FORMAT_1_0_2.to_string(),
            id_size,
            timestamp: 0,
        }
    }

    /// Check the format string and identifier size.
    pub fn validate(&self) -> Result<()> {
        if !self.format.starts_with(FORMAT_PREFIX) {
            return Err(HprofError::InvalidHeader(format!(
                "unexpected format {:?}",
                self.format
            )));
        }
        if self.id_size != 4 && self.id_size != 8 {
            return Err(HprofError::UnsupportedIdSize(self.id_size));
        }
        Ok(())
    }

    /// Encode the header.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.format.len() + 13);
        bytes.extend_from_slice(self.format.as_bytes());
        bytes.push(0);
        bytes.extend_from_slice(&self.id_size.to_be_bytes());
        bytes.extend_from_slice(&((self.timestamp >> 32) as u32).to_be_bytes());
        bytes.extend_from_slice(&(self.timestamp as u32).to_be_bytes());
        bytes
    }
}

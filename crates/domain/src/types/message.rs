//! Infrared signal types
//!
//! A [`Message`] is the wire representation of one remote-control command:
//! the interval lengths between on/off transitions of the sub-carrier, as
//! measured by the device's 2 MHz counter.

use serde::{Deserialize, Serialize};

use crate::constants::{MESSAGE_FORMAT_RAW, SUPPORTED_FREQUENCIES_KHZ};
use crate::errors::MessageError;

/// IRKit signal message
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Signal encoding. Only `"raw"` is accepted by the device.
    #[serde(default)]
    pub format: String,
    /// Sub-carrier frequency in kHz (38 or 40).
    #[serde(default)]
    pub freq: u32,
    /// On/off interval lengths in 2 MHz counter ticks.
    #[serde(default)]
    pub data: Vec<u32>,
}

impl Message {
    /// Build a `"raw"` message at the given frequency.
    pub fn raw(freq: u32, data: Vec<u32>) -> Self {
        Self { format: MESSAGE_FORMAT_RAW.to_string(), freq, data }
    }

    /// Check the message against the rules the device enforces.
    ///
    /// Rules are checked in order (format, frequency, data) and the first
    /// violation is returned.
    ///
    /// # Errors
    ///
    /// Returns the [`MessageError`] describing the violated rule.
    pub fn validate(&self) -> Result<(), MessageError> {
        if self.format != MESSAGE_FORMAT_RAW {
            return Err(MessageError::UnsupportedFormat(self.format.clone()));
        }

        if !SUPPORTED_FREQUENCIES_KHZ.contains(&self.freq) {
            return Err(MessageError::UnsupportedFrequency(self.freq));
        }

        if self.data.is_empty() {
            return Err(MessageError::EmptyData);
        }

        Ok(())
    }

    /// `true` when no field carries a value, as in the payload the server
    /// returns when a long-poll times out without a signal.
    pub fn is_empty(&self) -> bool {
        self.format.is_empty() && self.freq == 0 && self.data.is_empty()
    }
}

/// Signal received by a device, as returned by the retrieval endpoint
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignalInfo {
    /// Device hostname on its local network.
    #[serde(default)]
    pub hostname: String,
    /// Device that received the signal.
    #[serde(default, rename = "deviceid")]
    pub device_id: String,
    /// The received signal.
    #[serde(default)]
    pub message: Message,
}

impl SignalInfo {
    /// `true` when the server answered without a pending signal.
    pub fn is_empty(&self) -> bool {
        self.hostname.is_empty() && self.device_id.is_empty() && self.message.is_empty()
    }
}

//! Response payloads of the credential endpoints

use serde::{Deserialize, Serialize};

/// Credentials returned by `POST /1/keys`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientKeys {
    /// Device the pairing token belongs to.
    #[serde(rename = "deviceid")]
    pub device_id: String,
    /// Key authorising later calls for this device.
    #[serde(rename = "clientkey")]
    pub client_key: String,
}

/// Device credentials returned by `POST /1/devices`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceKeys {
    /// Key the device itself uses to talk to the relay.
    #[serde(rename = "devicekey")]
    pub device_key: String,
    /// Device identifier.
    #[serde(rename = "deviceid")]
    pub device_id: String,
}

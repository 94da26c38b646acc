use std::fmt;
use std::str::FromStr;

use crate::domain::utils::id::DeviceId;
use crate::error::Error;

/// A port on a network device, the endpoint of packet and optical links.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ConnectPoint {
    pub device: DeviceId,
    pub port: u32,
}

impl ConnectPoint {
    pub fn new(device: impl Into<String>, port: u32) -> Self {
        Self { device: DeviceId::new(device), port }
    }
}

impl fmt::Display for ConnectPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.device, self.port)
    }
}

/// Parses the `device/port` form. The device part may itself contain `/`,
/// only the last segment is taken as port.
impl FromStr for ConnectPoint {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let Some((device, port)) = s.rsplit_once('/') else {
            return Err(Error::ConversionError(format!("Connect point '{}' is not of the form device/port", s)));
        };

        if device.is_empty() {
            return Err(Error::ConversionError(format!("Connect point '{}' has an empty device id", s)));
        }

        let port = port.parse::<u32>().map_err(|e| Error::ConversionError(format!("Connect point '{}' has an invalid port: {}", s, e)))?;

        Ok(ConnectPoint::new(device, port))
    }
}

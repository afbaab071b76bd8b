use std::fmt::{self, Display, Formatter};
use std::path::{Path, PathBuf};

use crate::sysfs::apex::{self, DeviceAttrs};

/// A single Edge TPU discovered under the apex class directory, along with
/// the attributes read during the most recent tick.
///
/// The index is fixed once the device is enumerated. Attributes are replaced
/// as a whole by [`refresh`][Device::refresh].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Device {
    index: i64,
    name: String,
    path: PathBuf,
    attrs: DeviceAttrs,
}

impl Device {
    pub(crate) fn new(index: i64, name: String, path: PathBuf) -> Self {
        Self {
            index,
            name,
            path,
            attrs: DeviceAttrs::default(),
        }
    }

    /// Returns the index parsed from the entry name (e.g., 3 for `apex_3`).
    pub fn index(&self) -> i64 {
        self.index
    }

    /// Returns the entry name (e.g., `apex_3`).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the path attribute files are read from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn framework_version(&self) -> &str {
        &self.attrs.framework_version
    }

    pub fn driver_version(&self) -> &str {
        &self.attrs.driver_version
    }

    /// Returns the raw `temp` value as exposed by the driver.
    pub fn temperature(&self) -> i64 {
        self.attrs.temperature
    }

    pub fn status(&self) -> &str {
        &self.attrs.status
    }

    /// Returns `power/runtime_active_time` in milliseconds.
    pub fn runtime_active_time(&self) -> i64 {
        self.attrs.runtime_active_time
    }

    pub fn attrs(&self) -> &DeviceAttrs {
        &self.attrs
    }

    /// Re-reads every attribute of this device from its own directory.
    pub async fn refresh(&mut self) {
        self.attrs = apex::read_attrs(&self.path).await;
    }
}

impl Display for Device {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

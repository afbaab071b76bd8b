//! Monitoring of Coral Edge TPU devices through the `apex` driver's sysfs
//! class directory.
//!
//! # Usage
//!
//! ## Listing devices from the system
//!
//! [`list_devices`] enumerates the entries of `/sys/class/apex/`. Attributes of
//! each [`Device`] are read on demand by [`Device::refresh`].
//! ```rust,no_run
//! # #[tokio::main]
//! # async fn main() {
//! let mut devices = apex_monitor::list_devices().await;
//! for device in devices.iter_mut() {
//!     device.refresh().await;
//!     println!("{}: {}", device, device.temperature());
//! }
//! # }
//! ```
//!
//! ## Watching devices
//!
//! [`Monitor`] refreshes all devices on a fixed interval and redraws them in a
//! [`RenderArea`] until its cancellation token fires.
//! ```rust,no_run
//! use std::time::Duration;
//!
//! use apex_monitor::{list_devices, Monitor, RenderArea};
//! use tokio_util::sync::CancellationToken;
//!
//! # #[tokio::main]
//! # async fn main() -> eyre::Result<()> {
//! let cancel = CancellationToken::new();
//! let mut area = RenderArea::start(std::io::stdout())?;
//! let mut monitor = Monitor::new(list_devices().await);
//! monitor.run(&mut area, Duration::from_secs(1), cancel).await?;
//! # Ok(())
//! # }
//! ```

pub use crate::device::Device;
pub use crate::env::Config;
pub use crate::error::{MonitorError, MonitorResult};
pub use crate::list::{list_devices_with, parse_index};
pub use crate::monitor::{spawn_input_listener, Monitor, MonitorState};
pub use crate::render::{device_table, render_table, Column, RenderArea};
pub use crate::sysfs::apex::DeviceAttrs;

mod device;
pub mod env;
mod error;
mod list;
mod monitor;
mod render;
pub mod sysfs;

/// List all apex devices in the system.
///
/// See the [crate-level documentation](crate).
pub async fn list_devices() -> Vec<Device> {
    list_devices_with(sysfs::apex::CLASS_PATH).await
}

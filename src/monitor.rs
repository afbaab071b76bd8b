use std::io::{BufRead, Write};
use std::path::Path;
use std::thread::JoinHandle;
use std::time::Duration;

use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

use crate::device::Device;
use crate::list::list_devices_with;
use crate::error::MonitorResult;
use crate::render::{render_table, RenderArea};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum MonitorState {
    Polling,
    Stopped,
}

/// Periodically refreshes a fixed set of devices and redraws them as a table.
///
/// The set of devices is decided once at construction; each tick only
/// replaces their attributes.
pub struct Monitor {
    devices: Vec<Device>,
    state: MonitorState,
    ticks: u64,
}

impl Monitor {
    pub fn new(devices: Vec<Device>) -> Self {
        Self {
            devices,
            state: MonitorState::Polling,
            ticks: 0,
        }
    }

    /// Enumerates the devices under `base`, reporting progress to `out`.
    ///
    /// Returns `None` after writing a warning if no device is found, in which
    /// case there is nothing to monitor.
    pub async fn discover<P, W>(base: P, out: &mut W) -> MonitorResult<Option<Monitor>>
    where
        P: AsRef<Path>,
        W: Write,
    {
        let base = base.as_ref();
        writeln!(out, "INFO: Reading data from {}", base.display())?;

        let devices = list_devices_with(base).await;
        if devices.is_empty() {
            writeln!(out, "WARNING: No TPUs found")?;
            return Ok(None);
        }
        Ok(Some(Monitor::new(devices)))
    }

    pub fn devices(&self) -> &[Device] {
        &self.devices
    }

    pub fn state(&self) -> MonitorState {
        self.state
    }

    /// Returns how many ticks have been performed so far.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Re-reads the attributes of every device and sorts them by index.
    pub async fn refresh(&mut self) {
        for device in self.devices.iter_mut() {
            device.refresh().await;
        }
        self.devices.sort_by_key(|device| device.index());
    }

    /// Performs a single tick and returns the rendered table.
    pub async fn tick(&mut self) -> MonitorResult<String> {
        self.refresh().await;
        self.ticks += 1;
        render_table(&self.devices)
    }

    /// Ticks every `interval` until `cancel` is triggered, drawing each table
    /// into `area`. The first tick happens immediately.
    ///
    /// The area is stopped before returning. Returns the number of ticks
    /// performed.
    pub async fn run<W: Write>(
        &mut self,
        area: &mut RenderArea<W>,
        interval: Duration,
        cancel: CancellationToken,
    ) -> MonitorResult<u64> {
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        tracing::info!(
            devices = self.devices.len(),
            ?interval,
            "monitor started"
        );

        while self.state == MonitorState::Polling {
            if cancel.is_cancelled() {
                self.state = MonitorState::Stopped;
                break;
            }

            tokio::select! {
                biased;
                _ = cancel.cancelled() => {
                    self.state = MonitorState::Stopped;
                }
                _ = ticker.tick() => {
                    let table = self.tick().await?;
                    area.update(&table)?;
                    tracing::debug!(tick = self.ticks, "table redrawn");
                }
            }
        }

        area.stop()?;
        tracing::info!(ticks = self.ticks, "monitor stopped");
        Ok(self.ticks)
    }
}

/// Spawns a thread that cancels `cancel` once a line (or end of input) is
/// read from `input`.
///
/// A plain thread is used since reads from stdin block. The thread does not
/// need to be joined; it ends with the process.
pub fn spawn_input_listener<R>(mut input: R, cancel: CancellationToken) -> JoinHandle<()>
where
    R: BufRead + Send + 'static,
{
    std::thread::spawn(move || {
        let mut line = String::new();
        match input.read_line(&mut line) {
            Ok(0) => tracing::debug!("end of input"),
            Ok(_) => tracing::debug!(line = line.trim_end(), "input received"),
            Err(e) => tracing::debug!(error = %e, "failed to read input"),
        }
        cancel.cancel();
    })
}

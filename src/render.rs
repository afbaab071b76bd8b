use std::io::Write;

use cli_table::{Cell, CellStruct, ColorChoice, Style, Table, TableStruct};
use crossterm::cursor::{Hide, MoveToPreviousLine, Show};
use crossterm::terminal::{self, Clear, ClearType};
use crossterm::{execute, queue};
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter};

use crate::device::Device;
use crate::error::{MonitorError, MonitorResult};

#[derive(Clone, Copy, Debug, Display, EnumIter, Eq, PartialEq)]
pub enum Column {
    Name,
    Framework,
    Driver,
    Temp,
    Status,
    Runtime,
}

fn title() -> Vec<CellStruct> {
    Column::iter()
        .map(|column| column.to_string().cell().bold(true))
        .collect()
}

fn row(device: &Device) -> Vec<CellStruct> {
    vec![
        device.index().cell(),
        device.framework_version().cell(),
        device.driver_version().cell(),
        device.temperature().cell(),
        device.status().cell(),
        device.runtime_active_time().cell(),
    ]
}

/// Builds a table with one row per device, in the given order.
pub fn device_table(devices: &[Device]) -> TableStruct {
    devices.iter().map(row).collect::<Vec<_>>().table().title(title())
}

/// Formats `devices` into a bordered table with a header row.
///
/// The result is plain text without any terminal styling.
pub fn render_table(devices: &[Device]) -> MonitorResult<String> {
    device_table(devices)
        .color_choice(ColorChoice::Never)
        .display()
        .map(|table| table.to_string())
        .map_err(MonitorError::render_error)
}

/// A terminal region that is redrawn in place.
///
/// Each [`update`][RenderArea::update] replaces whatever the previous update
/// printed. The cursor is hidden while the area is active and shown again by
/// [`stop`][RenderArea::stop], which also runs on drop.
pub struct RenderArea<W: Write> {
    out: W,
    height: u16,
    active: bool,
}

impl<W: Write> RenderArea<W> {
    pub fn start(mut out: W) -> MonitorResult<Self> {
        execute!(out, Hide)?;
        Ok(Self {
            out,
            height: 0,
            active: true,
        })
    }

    pub fn update(&mut self, content: &str) -> MonitorResult<()> {
        if self.height > 0 {
            queue!(self.out, MoveToPreviousLine(self.height))?;
        }
        queue!(self.out, Clear(ClearType::FromCursorDown))?;

        self.out.write_all(content.as_bytes())?;
        if !content.ends_with('\n') {
            self.out.write_all(b"\n")?;
        }
        self.out.flush()?;

        let columns = terminal::size().ok().map(|(columns, _)| columns);
        self.height = rows_used(content, columns);
        Ok(())
    }

    pub fn stop(&mut self) -> MonitorResult<()> {
        if self.active {
            self.active = false;
            execute!(self.out, Show)?;
        }
        Ok(())
    }

    pub fn is_active(&self) -> bool {
        self.active
    }
}

/// Counts the terminal rows `content` occupies when lines wrap at `columns`.
/// Without a known width every line counts as one row.
pub(crate) fn rows_used(content: &str, columns: Option<u16>) -> u16 {
    let rows: usize = match columns.filter(|&c| c > 0) {
        Some(columns) => content
            .lines()
            .map(|line| {
                let (width, columns) = (line.chars().count(), usize::from(columns));
                ((width + columns - 1) / columns).max(1)
            })
            .sum(),
        None => content.lines().count(),
    };
    u16::try_from(rows).unwrap_or(u16::MAX)
}

impl<W: Write> Drop for RenderArea<W> {
    fn drop(&mut self) {
        let _ = self.stop();
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    fn devices() -> Vec<Device> {
        vec![
            Device::new(1, "apex_1".to_string(), PathBuf::new()),
            Device::new(7, "apex_7".to_string(), PathBuf::new()),
        ]
    }

    #[test]
    fn test_render_table() -> MonitorResult<()> {
        let table = render_table(&devices())?;
        let lines: Vec<&str> = table.lines().collect();

        // border, header, border, 2 rows with separators, border
        assert!(lines.len() >= 5);
        assert!(lines[0].starts_with('+'));
        for column in Column::iter() {
            assert!(table.contains(&column.to_string()));
        }

        let row_1 = lines.iter().position(|l| l.starts_with("| 1 ")).unwrap();
        let row_7 = lines.iter().position(|l| l.starts_with("| 7 ")).unwrap();
        assert!(row_1 < row_7);
        Ok(())
    }

    #[test]
    fn test_render_table_is_plain_text() -> MonitorResult<()> {
        let table = render_table(&devices())?;
        assert!(!table.contains('\x1b'));

        let header = table.lines().nth(1).unwrap();
        assert!(header.starts_with("| Name "));
        assert!(header.contains("| Framework "));
        assert!(header.trim_end().ends_with("| Runtime |"));
        Ok(())
    }

    #[test]
    fn test_rows_used() {
        assert_eq!(rows_used("a\nb\nc", None), 3);
        assert_eq!(rows_used("a\nb\nc", Some(80)), 3);
        // a 25 character line wraps onto 3 rows of 10 columns
        assert_eq!(rows_used(&"x".repeat(25), Some(10)), 3);
        assert_eq!(rows_used(&format!("{}\n\nab", "x".repeat(20)), Some(10)), 4);
        assert_eq!(rows_used("abc", Some(0)), 1);
        assert_eq!(rows_used("", Some(10)), 0);
    }

    #[test]
    fn test_render_empty_table() -> MonitorResult<()> {
        let table = render_table(&[])?;
        assert!(table.contains("Runtime"));
        assert!(!table.contains("| 0 "));
        Ok(())
    }

    #[test]
    fn test_render_area_redraws_in_place() -> MonitorResult<()> {
        let mut out: Vec<u8> = Vec::new();
        {
            let mut area = RenderArea::start(&mut out)?;
            area.update("first\nframe")?;
            area.update("second")?;
            assert!(area.is_active());
        }

        let out = String::from_utf8_lossy(&out);
        assert!(out.starts_with("\x1b[?25l"));
        assert!(out.contains("first\nframe\n"));
        // moves back over the two lines drawn by the first update
        assert!(out.contains("\x1b[2Fsecond\n") || out.contains("\x1b[2F\x1b[Jsecond\n"));
        assert!(out.ends_with("\x1b[?25h"));
        Ok(())
    }

    #[test]
    fn test_render_area_stop_is_idempotent() -> MonitorResult<()> {
        let mut out: Vec<u8> = Vec::new();
        {
            let mut area = RenderArea::start(&mut out)?;
            area.stop()?;
            area.stop()?;
            assert!(!area.is_active());
        }

        let out = String::from_utf8_lossy(&out);
        assert_eq!(out.matches("\x1b[?25h").count(), 1);
        Ok(())
    }
}

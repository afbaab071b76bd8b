use std::io;
use std::path::{Path, PathBuf};

use tokio::fs;

use crate::device::Device;

/// List apex devices found under `base`.
///
/// Walking stops at the first error. Devices found up to that point are
/// still returned.
pub async fn list_devices_with<P: AsRef<Path>>(base: P) -> Vec<Device> {
    let base = base.as_ref();
    let mut devices = Vec::new();

    if let Err(e) = walk(base, &mut devices).await {
        tracing::error!(path = %base.display(), error = %e, "error walking the path");
    }

    tracing::debug!(count = devices.len(), "enumerated apex devices");
    devices
}

/// Collects every non-directory entry below `base`, depth first.
///
/// Symlinks are not followed. Class directories in sysfs consist of symlinks
/// to the actual device directories, so each of them counts as one entry.
async fn walk(base: &Path, devices: &mut Vec<Device>) -> io::Result<()> {
    let mut pending: Vec<PathBuf> = vec![base.to_path_buf()];

    while let Some(dir) = pending.pop() {
        let mut entries = Vec::new();
        let mut read_dir = fs::read_dir(&dir).await?;
        while let Some(entry) = read_dir.next_entry().await? {
            entries.push((entry.file_name(), entry.path(), entry.file_type().await?));
        }
        entries.sort_by(|a, b| a.0.cmp(&b.0));

        let mut subdirs = Vec::new();
        for (file_name, path, file_type) in entries {
            if file_type.is_dir() {
                subdirs.push(path);
                continue;
            }

            let name = file_name.to_string_lossy().to_string();
            let index = parse_index(&name);
            tracing::debug!(name = %name, index, "found apex entry");
            devices.push(Device::new(index, name, path));
        }

        // visit subdirectories in name order
        pending.extend(subdirs.into_iter().rev());
    }

    Ok(())
}

/// Parses the index from the part of `name` after its last underscore
/// (e.g., 3 for `apex_3`). The whole name is used if it has no underscore.
///
/// Returns 0 if that part is not an integer.
pub fn parse_index<S: AsRef<str>>(name: S) -> i64 {
    let name = name.as_ref();
    let suffix = name.rsplit_once('_').map_or(name, |(_, idx)| idx);
    suffix.parse().unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use itertools::Itertools;

    use super::*;
    use crate::sysfs::apex::DeviceAttrs;

    #[test]
    fn test_parse_index() {
        assert_eq!(parse_index("apex_0"), 0);
        assert_eq!(parse_index("apex_3"), 3);
        assert_eq!(parse_index("apex_12"), 12);
        assert_eq!(parse_index("my_apex_7"), 7);
        assert_eq!(parse_index("9"), 9);

        // malformed suffixes
        assert_eq!(parse_index("apex_"), 0);
        assert_eq!(parse_index("apex_x"), 0);
        assert_eq!(parse_index("apex"), 0);
        assert_eq!(parse_index("apex_3a"), 0);
        assert_eq!(parse_index(""), 0);
    }

    #[tokio::test]
    async fn test_list_devices_with() {
        let devices = list_devices_with("test_data/test-0/class/apex").await;
        assert_eq!(
            devices.iter().map(|d| d.index()).sorted().collect_vec(),
            vec![0, 1, 3]
        );
        assert!(devices.iter().all(|d| d.attrs() == &DeviceAttrs::default()));

        let apex_3 = devices.iter().find(|d| d.index() == 3).unwrap();
        assert_eq!(apex_3.name(), "apex_3");
        assert_eq!(
            apex_3.path(),
            Path::new("test_data/test-0/class/apex/apex_3")
        );
    }

    #[tokio::test]
    async fn test_list_devices_walks_subdirectories() {
        let devices = list_devices_with("test_data/test-1/class/apex").await;
        let found = devices
            .iter()
            .map(|d| (d.name().to_string(), d.index()))
            .collect_vec();
        assert_eq!(
            found,
            vec![
                ("apex_2".to_string(), 2),
                ("apex_x".to_string(), 0),
                ("edgetpu".to_string(), 0),
                ("apex_5".to_string(), 5),
            ]
        );
    }

    #[tokio::test]
    async fn test_list_devices_missing_base() {
        let devices = list_devices_with("test_data/no-such-dir").await;
        assert!(devices.is_empty());
    }

    #[tokio::test]
    async fn test_list_devices_empty_base() -> eyre::Result<()> {
        let base = std::env::temp_dir().join(format!("apex-monitor-empty-{}", std::process::id()));
        std::fs::create_dir_all(&base)?;

        let devices = list_devices_with(&base).await;
        std::fs::remove_dir_all(&base)?;

        assert!(devices.is_empty());
        Ok(())
    }
}

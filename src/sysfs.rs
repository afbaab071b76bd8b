pub mod apex {
    use std::path::{Path, PathBuf};

    /// Default class directory the apex driver populates.
    pub const CLASS_PATH: &str = "/sys/class/apex/";

    pub mod file {
        pub const FRAMEWORK_VERSION: &str = "framework_version";
        pub const DRIVER_VERSION: &str = "driver_version";
        pub const TEMP: &str = "temp";
        pub const STATUS: &str = "status";
        pub const RUNTIME_ACTIVE_TIME: &str = "power/runtime_active_time";
    }

    pub fn path<P: AsRef<Path>>(device_dir: P, file: &str) -> PathBuf {
        device_dir.as_ref().join(file)
    }

    /// Attribute values of a single device as read during one tick.
    #[derive(Debug, Default, Clone, PartialEq, Eq)]
    pub struct DeviceAttrs {
        pub framework_version: String,
        pub driver_version: String,
        pub temperature: i64,
        pub status: String,
        pub runtime_active_time: i64,
    }

    /// Reads all attribute files under `device_dir`.
    ///
    /// Every field is read independently. A missing, unreadable or malformed
    /// file leaves that field at its zero value.
    pub async fn read_attrs<P: AsRef<Path>>(device_dir: P) -> DeviceAttrs {
        let dir = device_dir.as_ref();
        DeviceAttrs {
            framework_version: read_string(dir, file::FRAMEWORK_VERSION)
                .await
                .unwrap_or_default(),
            driver_version: read_string(dir, file::DRIVER_VERSION)
                .await
                .unwrap_or_default(),
            temperature: read_int(dir, file::TEMP).await.unwrap_or_default(),
            status: read_string(dir, file::STATUS).await.unwrap_or_default(),
            runtime_active_time: read_int(dir, file::RUNTIME_ACTIVE_TIME)
                .await
                .unwrap_or_default(),
        }
    }

    pub(crate) async fn read_string(device_dir: &Path, file: &str) -> Option<String> {
        tokio::fs::read_to_string(path(device_dir, file))
            .await
            .ok()
            .map(|s| s.trim().to_string())
    }

    pub(crate) async fn read_int(device_dir: &Path, file: &str) -> Option<i64> {
        read_string(device_dir, file)
            .await
            .and_then(|s| parse_int(&s))
    }

    pub(crate) fn parse_int<S: AsRef<str>>(contents: S) -> Option<i64> {
        contents.as_ref().trim().parse::<i64>().ok()
    }
}

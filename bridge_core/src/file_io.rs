//! # File I/O Module
//!
//! Model files and adapter configuration on disk:
//! - **Atomic saves**: Write to .tmp, sync, rename to prevent corruption
//! - **File locking**: One push session per model file at a time
//! - **Version validation**: Ensure schema compatibility
//!
//! ## File Format
//!
//! Models are saved as JSON. Lock files sit next to the model with a
//! `.lock` suffix added to its extension and record who holds the lock.
//!
//! ## Example
//!
//! ```rust,no_run
//! use bridge_core::file_io::{save_model, load_model, FileLock};
//! use bridge_core::model::Model;
//! use std::path::Path;
//!
//! let model = Model::new("Engineer");
//! let path = Path::new("frame.json");
//!
//! let lock = FileLock::acquire(path, "engineer@company.com").unwrap();
//! save_model(&model, path).unwrap();
//! drop(lock);
//! ```

use std::fs::{self, File, OpenOptions};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use fs2::FileExt;
use serde::{Deserialize, Serialize};

use crate::config::AdapterConfig;
use crate::errors::{BridgeError, BridgeResult};
use crate::model::{Model, SCHEMA_VERSION};

/// Lock file metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LockInfo {
    /// User identifier (email or username)
    pub user_id: String,
    pub machine: String,
    pub pid: u32,
    pub locked_at: DateTime<Utc>,
}

impl LockInfo {
    /// Create lock info for the current process
    pub fn new(user_id: impl Into<String>) -> Self {
        LockInfo {
            user_id: user_id.into(),
            machine: hostname().unwrap_or_else(|| "unknown".to_string()),
            pid: std::process::id(),
            locked_at: Utc::now(),
        }
    }
}

fn hostname() -> Option<String> {
    #[cfg(windows)]
    {
        std::env::var("COMPUTERNAME").ok()
    }
    #[cfg(not(windows))]
    {
        std::env::var("HOSTNAME").ok().or_else(|| std::env::var("HOST").ok())
    }
}

/// File lock guard that releases the lock when dropped.
///
/// Holds an OS-level lock (fs2) on the `.lock` file and writes
/// [`LockInfo`] into it so other users can see who has the model open.
pub struct FileLock {
    model_path: PathBuf,
    lock_path: PathBuf,
    _lock_file: File,
    pub info: LockInfo,
}

impl FileLock {
    /// Acquire an exclusive lock on a model file.
    ///
    /// Fails with [`BridgeError::FileLocked`] when another live process
    /// holds it. Locks left by dead processes or older than a day are taken over.
    pub fn acquire(path: &Path, user_id: impl Into<String>) -> BridgeResult<Self> {
        let lock_path = lock_path_for(path);
        let info = LockInfo::new(user_id);

        if lock_path.exists() {
            if let Ok(existing) = read_lock_info(&lock_path) {
                if !is_lock_stale(&existing) {
                    return Err(BridgeError::file_locked(
                        path.display().to_string(),
                        format!("{} ({})", existing.user_id, existing.machine),
                        existing.locked_at.to_rfc3339(),
                    ));
                }
            }
        }

        let mut lock_file = OpenOptions::new()
            .write(true)
            .read(true)
            .create(true)
            .truncate(true)
            .open(&lock_path)
            .map_err(|e| BridgeError::file_error("create lock", lock_path.display().to_string(), e.to_string()))?;

        lock_file.try_lock_exclusive().map_err(|_| {
            BridgeError::file_locked(path.display().to_string(), "another process", "unknown")
        })?;

        let lock_json = serde_json::to_string_pretty(&info).map_err(|e| BridgeError::SerializationError {
            reason: e.to_string(),
        })?;

        lock_file
            .write_all(lock_json.as_bytes())
            .map_err(|e| BridgeError::file_error("write lock", lock_path.display().to_string(), e.to_string()))?;

        lock_file
            .sync_all()
            .map_err(|e| BridgeError::file_error("sync lock", lock_path.display().to_string(), e.to_string()))?;

        log::debug!("locked {} for {}", path.display(), info.user_id);

        Ok(FileLock {
            model_path: path.to_path_buf(),
            lock_path,
            _lock_file: lock_file,
            info,
        })
    }

    /// Lock holder of a file, if it is currently locked
    pub fn check(path: &Path) -> Option<LockInfo> {
        let lock_path = lock_path_for(path);
        if lock_path.exists() {
            if let Ok(info) = read_lock_info(&lock_path) {
                if !is_lock_stale(&info) {
                    return Some(info);
                }
            }
        }
        None
    }

    pub fn model_path(&self) -> &Path {
        &self.model_path
    }
}

impl Drop for FileLock {
    fn drop(&mut self) {
        let _ = fs::remove_file(&self.lock_path);
    }
}

fn lock_path_for(model_path: &Path) -> PathBuf {
    let mut lock_path = model_path.to_path_buf();
    let extension = lock_path
        .extension()
        .map(|e| format!("{}.lock", e.to_string_lossy()))
        .unwrap_or_else(|| "lock".to_string());
    lock_path.set_extension(extension);
    lock_path
}

fn read_to_string(path: &Path, operation: &str) -> BridgeResult<String> {
    let mut file =
        File::open(path).map_err(|e| BridgeError::file_error(operation, path.display().to_string(), e.to_string()))?;
    let mut contents = String::new();
    file.read_to_string(&mut contents)
        .map_err(|e| BridgeError::file_error(operation, path.display().to_string(), e.to_string()))?;
    Ok(contents)
}

fn read_lock_info(lock_path: &Path) -> BridgeResult<LockInfo> {
    let contents = read_to_string(lock_path, "read lock")?;
    serde_json::from_str(&contents).map_err(|e| BridgeError::SerializationError { reason: e.to_string() })
}

/// A lock is stale when its process is gone (same machine) or it is over a day old
fn is_lock_stale(info: &LockInfo) -> bool {
    if let Some(our_machine) = hostname() {
        if info.machine == our_machine {
            #[cfg(unix)]
            {
                if fs::metadata(format!("/proc/{}", info.pid)).is_err() {
                    return true;
                }
            }
        }
    }

    let age = Utc::now() - info.locked_at;
    age.num_hours() > 24
}

/// Save a model with atomic write semantics.
///
/// 1. Serialize to JSON
/// 2. Write to `<path>.tmp`
/// 3. fsync
/// 4. Rename over `path`
pub fn save_model(model: &Model, path: &Path) -> BridgeResult<()> {
    let json = serde_json::to_string_pretty(model).map_err(|e| BridgeError::SerializationError {
        reason: e.to_string(),
    })?;

    let tmp_path = tmp_path_for(path);

    let mut tmp_file = File::create(&tmp_path)
        .map_err(|e| BridgeError::file_error("create temp file", tmp_path.display().to_string(), e.to_string()))?;

    tmp_file
        .write_all(json.as_bytes())
        .map_err(|e| BridgeError::file_error("write temp file", tmp_path.display().to_string(), e.to_string()))?;

    tmp_file
        .sync_all()
        .map_err(|e| BridgeError::file_error("sync temp file", tmp_path.display().to_string(), e.to_string()))?;

    fs::rename(&tmp_path, path).map_err(|e| {
        let _ = fs::remove_file(&tmp_path);
        BridgeError::file_error("rename to final", path.display().to_string(), e.to_string())
    })?;

    log::debug!("saved model with {} entities to {}", model.entity_count(), path.display());
    Ok(())
}

fn tmp_path_for(path: &Path) -> PathBuf {
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    PathBuf::from(tmp)
}

/// Load a model file and check its schema version
pub fn load_model(path: &Path) -> BridgeResult<Model> {
    let contents = read_to_string(path, "read")?;

    let model: Model = serde_json::from_str(&contents).map_err(|e| BridgeError::SerializationError {
        reason: format!("Invalid JSON in {}: {}", path.display(), e),
    })?;

    validate_version(&model.meta.version)?;

    Ok(model)
}

/// Load a model, also reporting who holds its lock
pub fn load_model_with_lock_check(path: &Path) -> BridgeResult<(Model, Option<LockInfo>)> {
    let model = load_model(path)?;
    let lock_info = FileLock::check(path);
    Ok((model, lock_info))
}

/// Load an adapter configuration file
pub fn load_config(path: &Path) -> BridgeResult<AdapterConfig> {
    let contents = read_to_string(path, "read config")?;
    AdapterConfig::from_json(&contents)
}

/// Major versions must match; in 0.x a newer minor version is rejected too
fn validate_version(file_version: &str) -> BridgeResult<()> {
    let mismatch = || BridgeError::VersionMismatch {
        file_version: file_version.to_string(),
        expected_version: SCHEMA_VERSION.to_string(),
    };

    let file_parts: Vec<u32> = file_version.split('.').filter_map(|p| p.parse().ok()).collect();
    let current_parts: Vec<u32> = SCHEMA_VERSION.split('.').filter_map(|p| p.parse().ok()).collect();

    let (Some(file_major), Some(current_major)) = (file_parts.first(), current_parts.first()) else {
        return Err(mismatch());
    };

    if file_major != current_major {
        return Err(mismatch());
    }

    if *current_major == 0 {
        if let (Some(file_minor), Some(current_minor)) = (file_parts.get(1), current_parts.get(1)) {
            if file_minor > current_minor {
                return Err(mismatch());
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::elements::Node;
    use crate::model::geometry::point;
    use std::env::temp_dir;

    fn temp_model_path(name: &str) -> PathBuf {
        temp_dir().join(format!("bridge_test_{}.json", name))
    }

    #[test]
    fn test_lock_path_generation() {
        let lock_path = lock_path_for(Path::new("/path/to/frame.json"));
        assert_eq!(lock_path, Path::new("/path/to/frame.json.lock"));
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let path = temp_model_path("roundtrip");

        let mut model = Model::new("Test Engineer");
        model.add_node(Node::new("A", point(0.0, 0.0, 3.0)));
        save_model(&model, &path).unwrap();

        let loaded = load_model(&path).unwrap();
        assert_eq!(loaded.meta.author, "Test Engineer");
        assert_eq!(loaded.nodes.len(), 1);
        assert_eq!(loaded.nodes[0].id, model.nodes[0].id);

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_atomic_save_leaves_no_tmp_file() {
        let path = temp_model_path("atomic");
        save_model(&Model::new("Test"), &path).unwrap();

        assert!(!tmp_path_for(&path).exists());
        assert!(path.exists());

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_file_lock_acquire_and_release() {
        let path = temp_model_path("lock_test");
        File::create(&path).unwrap();

        let lock = FileLock::acquire(&path, "test@example.com").unwrap();
        assert_eq!(lock.info.user_id, "test@example.com");
        assert_eq!(lock.model_path(), path.as_path());

        let lock_path = lock_path_for(&path);
        assert!(lock_path.exists());

        drop(lock);
        assert!(!lock_path.exists());

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_version_validation() {
        assert!(validate_version(SCHEMA_VERSION).is_ok());
        assert!(validate_version("0.1.7").is_ok());
        assert!(validate_version("1.0.0").is_err());
        assert!(validate_version("0.2.0").is_err());
        assert!(validate_version("garbage").is_err());
    }

    #[test]
    fn test_newer_file_rejected_on_load() {
        let path = temp_model_path("newer");
        let mut model = Model::new("Test");
        model.meta.version = "0.9.0".to_string();
        save_model(&model, &path).unwrap();

        let err = load_model(&path).unwrap_err();
        assert_eq!(err.error_code(), "VERSION_MISMATCH");

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_load_config_file() {
        let path = temp_model_path("config");
        fs::write(&path, r#"{ "create_missing_groups": false }"#).unwrap();

        let config = load_config(&path).unwrap();
        assert!(!config.create_missing_groups);
        assert!(config.replace_loads);

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_load_with_lock_check() {
        let path = temp_model_path("lock_check");
        save_model(&Model::new("Test"), &path).unwrap();

        let (loaded, lock_info) = load_model_with_lock_check(&path).unwrap();
        assert_eq!(loaded.meta.author, "Test");
        assert!(lock_info.is_none());

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_load_with_lock_check_reports_holder() {
        let path = temp_model_path("lock_holder");
        save_model(&Model::new("Test"), &path).unwrap();

        let lock = FileLock::acquire(&path, "alice@example.com").unwrap();
        assert!(FileLock::acquire(&path, "bob@example.com").is_err());

        let (loaded, lock_info) = load_model_with_lock_check(&path).unwrap();
        assert_eq!(loaded.meta.author, "Test");
        assert_eq!(lock_info.unwrap().user_id, "alice@example.com");

        drop(lock);
        let _ = fs::remove_file(&path);
    }
}

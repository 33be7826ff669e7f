//! Embedded SurrealDB store for shaker settings.
//!
//! Settings are kept in the `setting` table, one record per key, with the
//! value serialized as a JSON string under a single `value` field.

use bevy::prelude::*;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::{SystemTime, UNIX_EPOCH};

use surrealdb::engine::local::{Db, Mem, SurrealKv};
use surrealdb::Surreal;

/// SurrealDB folder name (embedded database).
const DATABASE_FOLDER: &str = "settings.surrealdb";
/// App data folder name.
const APP_DATA_FOLDER: &str = "DiceShaker";

const NS: &str = "diceshaker";
const DB: &str = "diceshaker";

const SETTING_TABLE: &str = "setting";

/// Resource wrapping the embedded settings database.
///
/// The database handle is async; a private runtime blocks on each call so the
/// ECS side stays synchronous.
#[derive(Resource)]
pub struct SettingsStore {
    rt: tokio::runtime::Runtime,
    db: Mutex<Surreal<Db>>,
}

impl SettingsStore {
    /// Get the platform app data directory for the store.
    pub fn get_data_dir() -> Result<PathBuf, String> {
        #[cfg(target_os = "windows")]
        {
            if let Ok(local_app_data) = std::env::var("LOCALAPPDATA") {
                let app_dir = PathBuf::from(&local_app_data).join(APP_DATA_FOLDER);
                match std::fs::create_dir_all(&app_dir) {
                    Ok(_) => return Ok(app_dir),
                    Err(e) => {
                        warn!("Failed to create app data directory {:?}: {}", app_dir, e);
                    }
                }
            }
        }

        #[cfg(target_os = "macos")]
        {
            if let Ok(home) = std::env::var("HOME") {
                let app_dir = PathBuf::from(home)
                    .join("Library")
                    .join("Application Support")
                    .join(APP_DATA_FOLDER);
                std::fs::create_dir_all(&app_dir)
                    .map_err(|e| format!("Failed to create app data directory: {}", e))?;
                return Ok(app_dir);
            }
        }

        #[cfg(target_os = "linux")]
        {
            let base = std::env::var("XDG_DATA_HOME")
                .map(PathBuf::from)
                .or_else(|_| {
                    std::env::var("HOME")
                        .map(|home| PathBuf::from(home).join(".local").join("share"))
                });
            if let Ok(base) = base {
                let app_dir = base.join(APP_DATA_FOLDER);
                std::fs::create_dir_all(&app_dir)
                    .map_err(|e| format!("Failed to create app data directory: {}", e))?;
                return Ok(app_dir);
            }
        }

        std::env::current_dir().map_err(|e| format!("Failed to resolve data directory: {}", e))
    }

    fn make_runtime() -> Result<tokio::runtime::Runtime, String> {
        tokio::runtime::Runtime::new().map_err(|e| format!("Failed to create tokio runtime: {}", e))
    }

    async fn init(db: &Surreal<Db>) -> Result<(), String> {
        db.use_ns(NS)
            .use_db(DB)
            .await
            .map_err(|e| format!("Failed to select namespace/db: {}", e))?;

        db.query("DEFINE TABLE setting SCHEMALESS;")
            .await
            .map_err(|e| format!("Failed to initialize schema: {}", e))?;

        Ok(())
    }

    /// Open or create the store in the platform app data directory.
    pub fn open() -> Result<Self, String> {
        let data_dir = Self::get_data_dir()?;
        let db_path = data_dir.join(DATABASE_FOLDER);

        // SurrealKV expects a directory; move a stray file out of the way.
        if db_path.is_file() {
            let ts = SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_secs())
                .unwrap_or(0);
            let backup_path = data_dir.join(format!("{}.file.bak-{}", DATABASE_FOLDER, ts));
            warn!(
                "Settings path {:?} is a file; backing up to {:?}",
                db_path, backup_path
            );
            std::fs::rename(&db_path, &backup_path).map_err(|e| {
                format!(
                    "Failed to back up settings file {:?} -> {:?}: {}",
                    db_path, backup_path, e
                )
            })?;
        }

        Self::open_at(db_path)
    }

    /// Open the store at a specific datastore directory.
    pub fn open_at(path: PathBuf) -> Result<Self, String> {
        let rt = Self::make_runtime()?;
        std::fs::create_dir_all(&path)
            .map_err(|e| format!("Failed to create SurrealDB datastore dir {:?}: {}", path, e))?;

        let db = rt
            .block_on(async { Surreal::new::<SurrealKv>(path.to_string_lossy().to_string()).await })
            .map_err(|e| format!("Failed to open SurrealDB: {}", e))?;

        rt.block_on(Self::init(&db))?;

        info!("Settings store opened at {:?}", path);

        Ok(Self {
            rt,
            db: Mutex::new(db),
        })
    }

    /// In-memory store; nothing survives the process.
    pub fn open_in_memory() -> Result<Self, String> {
        let rt = Self::make_runtime()?;
        let db = rt
            .block_on(async { Surreal::new::<Mem>(()).await })
            .map_err(|e| format!("Failed to open SurrealDB (mem): {}", e))?;

        rt.block_on(Self::init(&db))?;

        Ok(Self {
            rt,
            db: Mutex::new(db),
        })
    }

    fn with_db<T>(&self, f: impl FnOnce(&Surreal<Db>) -> Result<T, String>) -> Result<T, String> {
        let db = self.db.lock().map_err(|e| e.to_string())?;
        f(&db)
    }

    /// Load a value by key from the `setting` table.
    pub fn get_setting<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, String> {
        let key = key.to_owned();
        self.with_db(move |db| {
            self.rt.block_on(async {
                #[derive(Deserialize)]
                struct SettingRecord {
                    value: String,
                }

                let record: Option<SettingRecord> = db
                    .select((SETTING_TABLE, key.clone()))
                    .await
                    .map_err(|e| format!("Failed to load setting '{}': {}", key, e))?;

                record
                    .map(|record| {
                        serde_json::from_str(&record.value).map_err(|e| {
                            format!("Failed to decode setting '{}' from JSON string: {}", key, e)
                        })
                    })
                    .transpose()
            })
        })
    }

    /// Upsert a value by key into the `setting` table.
    pub fn set_setting<T: Serialize>(&self, key: &str, value: T) -> Result<(), String> {
        let key = key.to_owned();
        let json_string = serde_json::to_string(&value)
            .map_err(|e| format!("Failed to serialize setting '{}' to JSON string: {}", key, e))?;

        self.with_db(move |db| {
            self.rt.block_on(async {
                #[derive(Serialize, Deserialize)]
                struct SettingDoc {
                    value: String,
                }

                let _: Option<SettingDoc> = db
                    .upsert((SETTING_TABLE, key.clone()))
                    .content(SettingDoc { value: json_string })
                    .await
                    .map_err(|e| format!("Failed to save setting '{}': {}", key, e))?;
                Ok(())
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_setting_is_none() {
        let db = SettingsStore::open_in_memory().unwrap();
        let loaded: Option<usize> = db.get_setting("dice_count").unwrap();
        assert!(loaded.is_none());
    }

    #[test]
    fn test_setting_overwrite_keeps_last() {
        let db = SettingsStore::open_in_memory().unwrap();
        db.set_setting("dice_count", 3usize).unwrap();
        db.set_setting("dice_count", 7usize).unwrap();
        let loaded: usize = db.get_setting("dice_count").unwrap().unwrap();
        assert_eq!(loaded, 7);
    }

    #[test]
    fn test_settings_persist_to_disk_round_trip() {
        let ts = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos())
            .unwrap_or(0);
        let path = std::env::temp_dir().join(format!("dice-shaker-test-{}", ts));

        {
            let db = SettingsStore::open_at(path.clone()).unwrap();
            db.set_setting("dice_count", 9usize).unwrap();
        }

        {
            let db = SettingsStore::open_at(path.clone()).unwrap();
            let loaded: usize = db.get_setting("dice_count").unwrap().unwrap();
            assert_eq!(loaded, 9);
        }

        let _ = std::fs::remove_dir_all(&path);
    }
}

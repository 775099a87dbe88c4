use std::{
    fmt,
    path::{Path, PathBuf},
    sync::{mpsc, Arc, Mutex},
    thread::{self, JoinHandle},
};

use anyhow::{anyhow, Context, Result};
use chrono::Utc;
use log::{error, info};
use rusqlite::{params, Connection, OptionalExtension};
use serde::{de::DeserializeOwned, Serialize};
use tokio::sync::oneshot;

mod migrations;

use migrations::run_migrations;

/// The seven fixed keys the store persists under. Each record is serialized
/// and written independently; there is no cross-record transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKey {
    Profile,
    Progress,
    Badges,
    Milestones,
    Sessions,
    Settings,
    Achievements,
}

impl RecordKey {
    pub const ALL: [RecordKey; 7] = [
        RecordKey::Profile,
        RecordKey::Progress,
        RecordKey::Badges,
        RecordKey::Milestones,
        RecordKey::Sessions,
        RecordKey::Settings,
        RecordKey::Achievements,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RecordKey::Profile => "profile",
            RecordKey::Progress => "progress",
            RecordKey::Badges => "badges",
            RecordKey::Milestones => "milestones",
            RecordKey::Sessions => "sessions",
            RecordKey::Settings => "settings",
            RecordKey::Achievements => "achievements",
        }
    }
}

impl fmt::Display for RecordKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

type DbTask = Box<dyn FnOnce(&mut Connection) + Send + 'static>;

enum DbCommand {
    Execute(DbTask),
    Shutdown,
}

struct DatabaseInner {
    sender: mpsc::Sender<DbCommand>,
    worker: Mutex<Option<JoinHandle<()>>>,
}

impl Drop for DatabaseInner {
    fn drop(&mut self) {
        let mut guard = match self.worker.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };

        if let Some(handle) = guard.take() {
            if let Err(err) = self.sender.send(DbCommand::Shutdown) {
                error!("Failed to send shutdown to DB thread: {err}");
            }
            if let Err(join_err) = handle.join() {
                error!("Failed to join DB thread: {join_err:?}");
            }
        }
    }
}

/// Durable key-value substrate for the user-data records. All SQLite access
/// happens on one dedicated worker thread; callers await a oneshot reply, so
/// the async side suspends only at this boundary.
#[derive(Clone)]
pub struct Database {
    inner: Arc<DatabaseInner>,
    db_path: Arc<PathBuf>,
}

impl Database {
    pub fn new(db_path: PathBuf) -> Result<Self> {
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("failed to create database directory {}", parent.display())
            })?;
        }

        let (command_tx, command_rx) = mpsc::channel::<DbCommand>();
        let (ready_tx, ready_rx) = mpsc::channel();
        let path_for_thread = db_path.clone();

        let worker = thread::Builder::new()
            .name("motionsync-db".into())
            .spawn(move || {
                let mut conn = match Connection::open(&path_for_thread) {
                    Ok(connection) => connection,
                    Err(err) => {
                        let _ = ready_tx.send(
                            Err(anyhow::Error::new(err).context("failed to open SQLite database")),
                        );
                        return;
                    }
                };

                if let Err(err) = conn.pragma_update(None, "journal_mode", "WAL") {
                    error!("Failed to enable WAL mode: {err}");
                }

                let init_result =
                    run_migrations(&mut conn).context("failed to run database migrations");
                if ready_tx.send(init_result).is_err() {
                    error!("DB initialization receiver dropped before ready signal");
                    return;
                }

                while let Ok(command) = command_rx.recv() {
                    match command {
                        DbCommand::Execute(task) => {
                            task(&mut conn);
                        }
                        DbCommand::Shutdown => break,
                    }
                }

                info!("Database thread shutting down");
            })
            .with_context(|| "failed to spawn database worker thread")?;

        ready_rx
            .recv()
            .context("database worker exited before signaling readiness")??;

        info!("Database initialized at {}", db_path.as_path().display());

        Ok(Self {
            inner: Arc::new(DatabaseInner {
                sender: command_tx,
                worker: Mutex::new(Some(worker)),
            }),
            db_path: Arc::new(db_path),
        })
    }

    pub fn path(&self) -> &Path {
        self.db_path.as_path()
    }

    pub async fn execute<F, T>(&self, task: F) -> Result<T>
    where
        F: FnOnce(&mut Connection) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let sender = self.inner.sender.clone();
        let (reply_tx, reply_rx) = oneshot::channel();

        let command = DbCommand::Execute(Box::new(move |conn| {
            let result = task(conn);
            if reply_tx.send(result).is_err() {
                error!("DB caller dropped before receiving result");
            }
        }));

        sender
            .send(command)
            .map_err(|err| anyhow!("failed to send command to DB thread: {err}"))?;

        reply_rx
            .await
            .map_err(|_| anyhow!("database thread terminated unexpectedly"))?
    }

    /// Reads one record, or `None` if it was never written.
    pub async fn load<T>(&self, key: RecordKey) -> Result<Option<T>>
    where
        T: DeserializeOwned + Send + 'static,
    {
        self.execute(move |conn| {
            let raw: Option<String> = conn
                .query_row(
                    "SELECT value FROM user_records WHERE key = ?1",
                    params![key.as_str()],
                    |row| row.get(0),
                )
                .optional()
                .with_context(|| format!("failed to read the {key} record"))?;

            match raw {
                Some(json) => {
                    let record = serde_json::from_str(&json)
                        .with_context(|| format!("failed to decode the {key} record"))?;
                    Ok(Some(record))
                }
                None => Ok(None),
            }
        })
        .await
    }

    /// Writes one record, replacing any previous value under the same key.
    pub async fn store<T>(&self, key: RecordKey, record: &T) -> Result<()>
    where
        T: Serialize,
    {
        let json = serde_json::to_string(record)
            .with_context(|| format!("failed to encode the {key} record"))?;
        let written_at = Utc::now().to_rfc3339();

        self.execute(move |conn| {
            conn.execute(
                "INSERT INTO user_records (key, value, updated_at)
                 VALUES (?1, ?2, ?3)
                 ON CONFLICT(key) DO UPDATE SET
                     value = excluded.value,
                     updated_at = excluded.updated_at",
                params![key.as_str(), json, written_at],
            )
            .with_context(|| format!("failed to write the {key} record"))?;
            Ok(())
        })
        .await
    }

    pub async fn delete(&self, key: RecordKey) -> Result<()> {
        self.execute(move |conn| {
            conn.execute(
                "DELETE FROM user_records WHERE key = ?1",
                params![key.as_str()],
            )
            .with_context(|| format!("failed to delete the {key} record"))?;
            Ok(())
        })
        .await
    }
}

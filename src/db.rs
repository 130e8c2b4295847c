// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use directories::ProjectDirs;
use log::{info, warn};
use once_cell::sync::Lazy;
use rusqlite::{Connection, OptionalExtension, params};
use std::fs;
use std::path::{Path, PathBuf};

use crate::app::App;
use crate::dataset::Dataset;
use crate::models::Account;

static APP: Lazy<(&str, &str, &str)> = Lazy::new(|| ("com.alphavelocity", "Purse", "purse"));

pub const ACCOUNTS_KEY: &str = "accounts";
pub const DISPLAY_CURRENCY_KEY: &str = "display_currency";

pub fn db_path() -> Result<PathBuf> {
    let proj = ProjectDirs::from(APP.0, APP.1, APP.2)
        .context("Could not determine platform-specific data dir")?;
    let data_dir = proj.data_dir();
    fs::create_dir_all(data_dir).context("Failed to create data dir")?;
    Ok(data_dir.join("purse.sqlite"))
}

pub fn open_or_init() -> Result<Connection> {
    open_at(&db_path()?)
}

pub fn open_at(path: &Path) -> Result<Connection> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    let conn =
        Connection::open(path).with_context(|| format!("Open DB at {}", path.display()))?;
    init_schema(&conn)?;
    Ok(conn)
}

pub fn init_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
    CREATE TABLE IF NOT EXISTS storage(
        key TEXT PRIMARY KEY,
        value TEXT NOT NULL,
        updated_at TEXT NOT NULL DEFAULT (datetime('now'))
    );
    "#,
    )?;
    Ok(())
}

pub fn get_value(conn: &Connection, key: &str) -> Result<Option<String>> {
    let v: Option<String> = conn
        .query_row("SELECT value FROM storage WHERE key=?1", params![key], |r| {
            r.get(0)
        })
        .optional()?;
    Ok(v)
}

pub fn set_value(conn: &Connection, key: &str, value: &str) -> Result<()> {
    conn.execute(
        "INSERT INTO storage(key, value) VALUES(?1, ?2)
         ON CONFLICT(key) DO UPDATE SET value=excluded.value, updated_at=datetime('now')",
        params![key, value],
    )?;
    Ok(())
}

/// Stored accounts, or `None` when nothing usable was saved.
pub fn load_accounts(conn: &Connection) -> Result<Option<Vec<Account>>> {
    let Some(raw) = get_value(conn, ACCOUNTS_KEY)? else {
        return Ok(None);
    };
    match serde_json::from_str::<Vec<Account>>(&raw) {
        Ok(accounts) => Ok(Some(accounts)),
        Err(e) => {
            warn!("Ignoring unreadable '{}' snapshot: {}", ACCOUNTS_KEY, e);
            Ok(None)
        }
    }
}

/// Overwrite the whole account snapshot.
pub fn save_accounts(conn: &Connection, accounts: &[Account]) -> Result<()> {
    let json = serde_json::to_string(accounts).context("Serialize accounts")?;
    set_value(conn, ACCOUNTS_KEY, &json)
}

pub fn load_display_currency(conn: &Connection) -> Result<Option<String>> {
    get_value(conn, DISPLAY_CURRENCY_KEY)
}

pub fn save_display_currency(conn: &Connection, ccy: &str) -> Result<()> {
    set_value(conn, DISPLAY_CURRENCY_KEY, ccy)
}

pub fn load_app(conn: &Connection, dataset: &Dataset) -> Result<App> {
    let accounts = load_accounts(conn)?;
    if accounts.is_none() {
        info!("No saved accounts; starting from the bundled dataset");
    }
    let display = load_display_currency(conn)?;
    App::from_dataset(dataset, accounts, display)
}

/// Write the snapshot in one transaction if anything changed.
pub fn save_app(conn: &mut Connection, app: &mut App) -> Result<()> {
    if !app.is_dirty() {
        return Ok(());
    }
    let tx = conn.transaction()?;
    save_accounts(&tx, app.accounts())?;
    save_display_currency(&tx, app.display_currency())?;
    tx.commit()?;
    app.mark_saved();
    info!(
        "Saved {} accounts ({} {})",
        app.accounts().len(),
        app.total(),
        app.display_currency()
    );
    Ok(())
}

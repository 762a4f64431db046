//! SQLite database layer for herodex
//!
//! Uses rusqlite with automatic schema migrations on startup. The connection
//! is shared behind a mutex; each operation is a single lock-scoped read or
//! write.

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use rusqlite::{params, Connection, OptionalExtension, Row};

use crate::error::{ServerError, ServerResult};
use crate::models::{Hero, HeroDetail, HeroPowerWithPower, Power, Strength};

/// Thread-safe database wrapper
#[derive(Clone)]
pub struct Database {
    conn: Arc<Mutex<Connection>>,
    path: PathBuf,
}

impl Database {
    /// Open or create the database at the given path
    pub fn open(path: impl Into<PathBuf>) -> ServerResult<Self> {
        let path = path.into();

        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let conn = Connection::open(&path)?;

        let db = Self {
            conn: Arc::new(Mutex::new(conn)),
            path,
        };

        db.run_migrations()?;
        Ok(db)
    }

    /// Open an in-memory database (for testing)
    pub fn open_in_memory() -> ServerResult<Self> {
        let conn = Connection::open_in_memory()?;
        let db = Self {
            conn: Arc::new(Mutex::new(conn)),
            path: PathBuf::from(":memory:"),
        };
        db.run_migrations()?;
        Ok(db)
    }

    /// Get the database file path
    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    /// Get database file size in bytes
    pub fn size_bytes(&self) -> Option<u64> {
        std::fs::metadata(&self.path).ok().map(|m| m.len())
    }

    /// Run schema migrations
    fn run_migrations(&self) -> ServerResult<()> {
        let conn = self.conn.lock().unwrap();

        // SQLite only enforces REFERENCES clauses with this pragma on.
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;

        conn.execute_batch(SCHEMA)?;
        conn.execute_batch(INDEXES)?;

        Ok(())
    }

    // ========================================================================
    // Heroes
    // ========================================================================

    pub fn list_heroes(&self) -> ServerResult<Vec<Hero>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt =
            conn.prepare("SELECT id, name, super_name FROM heroes ORDER BY id")?;

        let heroes = stmt
            .query_map([], hero_from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(heroes)
    }

    pub fn get_hero(&self, id: i64) -> ServerResult<Option<Hero>> {
        let conn = self.conn.lock().unwrap();
        let hero = conn
            .query_row(
                "SELECT id, name, super_name FROM heroes WHERE id = ?",
                [id],
                hero_from_row,
            )
            .optional()?;

        Ok(hero)
    }

    /// Get a hero with its power links and each link's power embedded.
    pub fn get_hero_detail(&self, id: i64) -> ServerResult<Option<HeroDetail>> {
        let hero = match self.get_hero(id)? {
            Some(h) => h,
            None => return Ok(None),
        };

        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(
            r#"
            SELECT hp.id, hp.hero_id, hp.power_id, hp.strength,
                   p.id, p.name, p.description
            FROM hero_powers hp
            JOIN powers p ON p.id = hp.power_id
            WHERE hp.hero_id = ?
            ORDER BY hp.id
            "#,
        )?;

        let hero_powers = stmt
            .query_map([id], |row| {
                Ok(HeroPowerWithPower {
                    id: row.get(0)?,
                    hero_id: row.get(1)?,
                    power_id: row.get(2)?,
                    strength: parse_strength(row.get::<_, String>(3)?),
                    power: Power {
                        id: row.get(4)?,
                        name: row.get(5)?,
                        description: row.get(6)?,
                    },
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Some(HeroDetail {
            id: hero.id,
            name: hero.name,
            super_name: hero.super_name,
            hero_powers,
        }))
    }

    pub fn insert_hero(&self, name: &str, super_name: &str) -> ServerResult<Hero> {
        let conn = self.conn.lock().unwrap();
        conn.execute(
            "INSERT INTO heroes (name, super_name) VALUES (?, ?)",
            params![name, super_name],
        )?;

        Ok(Hero {
            id: conn.last_insert_rowid(),
            name: name.to_string(),
            super_name: super_name.to_string(),
        })
    }

    // ========================================================================
    // Powers
    // ========================================================================

    pub fn list_powers(&self) -> ServerResult<Vec<Power>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt =
            conn.prepare("SELECT id, name, description FROM powers ORDER BY id")?;

        let powers = stmt
            .query_map([], power_from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(powers)
    }

    pub fn get_power(&self, id: i64) -> ServerResult<Option<Power>> {
        let conn = self.conn.lock().unwrap();
        let power = conn
            .query_row(
                "SELECT id, name, description FROM powers WHERE id = ?",
                [id],
                power_from_row,
            )
            .optional()?;

        Ok(power)
    }

    /// Persist a new description and return the updated power.
    pub fn update_power_description(&self, id: i64, description: &str) -> ServerResult<Power> {
        let conn = self.conn.lock().unwrap();
        conn.execute(
            "UPDATE powers SET description = ? WHERE id = ?",
            params![description, id],
        )?;

        let power = conn.query_row(
            "SELECT id, name, description FROM powers WHERE id = ?",
            [id],
            power_from_row,
        )?;

        Ok(power)
    }

    pub fn insert_power(&self, name: &str, description: &str) -> ServerResult<Power> {
        let conn = self.conn.lock().unwrap();
        conn.execute(
            "INSERT INTO powers (name, description) VALUES (?, ?)",
            params![name, description],
        )?;

        Ok(Power {
            id: conn.last_insert_rowid(),
            name: name.to_string(),
            description: description.to_string(),
        })
    }

    // ========================================================================
    // Hero powers
    // ========================================================================

    /// Insert a hero-power link, returning the new row id.
    ///
    /// A constraint violation (bad foreign key, rejected strength) maps to
    /// `ServerError::Constraint`; any other database fault propagates as-is.
    pub fn create_hero_power(
        &self,
        hero_id: i64,
        power_id: i64,
        strength: Strength,
    ) -> ServerResult<i64> {
        let conn = self.conn.lock().unwrap();
        let result = conn.execute(
            "INSERT INTO hero_powers (hero_id, power_id, strength) VALUES (?, ?, ?)",
            params![hero_id, power_id, strength.to_string()],
        );

        match result {
            Ok(_) => Ok(conn.last_insert_rowid()),
            Err(e) if is_constraint_violation(&e) => Err(ServerError::Constraint(e.to_string())),
            Err(e) => Err(e.into()),
        }
    }

    pub fn count_hero_powers(&self) -> ServerResult<i64> {
        let conn = self.conn.lock().unwrap();
        let count = conn.query_row("SELECT COUNT(*) FROM hero_powers", [], |row| row.get(0))?;
        Ok(count)
    }
}

// ============================================================================
// Schema
// ============================================================================

const SCHEMA: &str = r#"
-- Heroes table
CREATE TABLE IF NOT EXISTS heroes (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    super_name TEXT NOT NULL
);

-- Powers table
CREATE TABLE IF NOT EXISTS powers (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    description TEXT NOT NULL
);

-- Hero-power links table
CREATE TABLE IF NOT EXISTS hero_powers (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    hero_id INTEGER NOT NULL REFERENCES heroes(id),
    power_id INTEGER NOT NULL REFERENCES powers(id),
    strength TEXT NOT NULL CHECK (strength IN ('Strong', 'Weak', 'Average'))
);
"#;

const INDEXES: &str = r#"
-- Indexes for efficient lookups
CREATE INDEX IF NOT EXISTS idx_hero_powers_hero ON hero_powers(hero_id);
CREATE INDEX IF NOT EXISTS idx_hero_powers_power ON hero_powers(power_id);
"#;

// ============================================================================
// Helpers
// ============================================================================

fn hero_from_row(row: &Row<'_>) -> rusqlite::Result<Hero> {
    Ok(Hero {
        id: row.get(0)?,
        name: row.get(1)?,
        super_name: row.get(2)?,
    })
}

fn power_from_row(row: &Row<'_>) -> rusqlite::Result<Power> {
    Ok(Power {
        id: row.get(0)?,
        name: row.get(1)?,
        description: row.get(2)?,
    })
}

// The CHECK constraint keeps stored values valid; the fallback never fires
// on rows this crate wrote.
fn parse_strength(s: String) -> Strength {
    s.parse().unwrap_or(Strength::Average)
}

fn is_constraint_violation(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(e, _)
            if e.code == rusqlite::ErrorCode::ConstraintViolation
    )
}

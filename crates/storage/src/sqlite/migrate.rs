use chrono::Utc;
use sqlx::SqlitePool;

use super::SqliteInitError;

/// Schema version this build writes. Only ever increases.
pub const SCHEMA_VERSION: i64 = 2;

struct Migration {
    version: i64,
    name: &'static str,
    statements: &'static [&'static str],
}

// Additive only: every statement must be safe to run against a database that
// already has the object.
const MIGRATIONS: &[Migration] = &[
    Migration {
        version: 1,
        name: "progress, quiz results, bookmarks",
        statements: &[
            r"
                CREATE TABLE IF NOT EXISTS section_progress (
                    section_id TEXT PRIMARY KEY NOT NULL,
                    completed_at TEXT NOT NULL
                );
            ",
            r"
                CREATE TABLE IF NOT EXISTS quiz_results (
                    id INTEGER PRIMARY KEY AUTOINCREMENT,
                    score INTEGER NOT NULL CHECK (score >= 0),
                    total_questions INTEGER NOT NULL CHECK (total_questions > 0),
                    date TEXT NOT NULL,
                    CHECK (score <= total_questions)
                );
            ",
            r"
                CREATE INDEX IF NOT EXISTS idx_quiz_results_date
                    ON quiz_results (date, id);
            ",
            r"
                CREATE TABLE IF NOT EXISTS bookmarks (
                    id TEXT PRIMARY KEY NOT NULL,
                    kind TEXT NOT NULL CHECK (kind IN ('section', 'flashcard')),
                    content_key TEXT,
                    content_index INTEGER CHECK (content_index >= 0),
                    created_at TEXT NOT NULL,
                    CHECK ((content_key IS NULL) <> (content_index IS NULL))
                );
            ",
        ],
    },
    Migration {
        version: 2,
        name: "settings",
        statements: &[r"
                CREATE TABLE IF NOT EXISTS settings (
                    key TEXT PRIMARY KEY NOT NULL,
                    kind TEXT NOT NULL CHECK (kind IN ('text', 'number', 'bool')),
                    value TEXT NOT NULL
                );
            "],
    },
];

async fn ensure_version_table(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::query(
        r"
            CREATE TABLE IF NOT EXISTS schema_migrations (
                version INTEGER PRIMARY KEY,
                applied_at TEXT NOT NULL
            );
            ",
    )
    .execute(pool)
    .await?;
    Ok(())
}

async fn is_applied(pool: &SqlitePool, version: i64) -> Result<bool, sqlx::Error> {
    let row = sqlx::query("SELECT 1 FROM schema_migrations WHERE version = ?1")
        .bind(version)
        .fetch_optional(pool)
        .await?;
    Ok(row.is_some())
}

pub(crate) async fn schema_version(pool: &SqlitePool) -> Result<i64, SqliteInitError> {
    ensure_version_table(pool).await?;
    let version: Option<i64> = sqlx::query_scalar("SELECT MAX(version) FROM schema_migrations")
        .fetch_one(pool)
        .await?;
    Ok(version.unwrap_or(0))
}

/// Applies every migration newer than what the database has recorded.
///
/// Each version runs in its own transaction and is recorded with
/// `ON CONFLICT DO NOTHING`, so a second opener racing on the same file ends
/// up with the same schema and no error.
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), SqliteInitError> {
    let on_disk = schema_version(pool).await?;
    if on_disk > SCHEMA_VERSION {
        tracing::warn!(
            on_disk,
            supported = SCHEMA_VERSION,
            "database schema is newer than this build; leaving it untouched"
        );
    }

    for migration in MIGRATIONS {
        if is_applied(pool, migration.version).await? {
            continue;
        }

        let mut tx = pool.begin().await?;
        for statement in migration.statements {
            sqlx::query(*statement).execute(&mut *tx).await?;
        }
        sqlx::query(
            r"
                INSERT INTO schema_migrations (version, applied_at)
                VALUES (?1, ?2)
                ON CONFLICT(version) DO NOTHING
            ",
        )
        .bind(migration.version)
        .bind(Utc::now())
        .execute(&mut *tx)
        .await?;
        tx.commit().await?;

        tracing::info!(
            version = migration.version,
            name = migration.name,
            "applied schema migration"
        );
    }

    Ok(())
}

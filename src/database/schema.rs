// Tables are created idempotently on every startup.

pub const STATEMENTS: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS shows (
        id          INTEGER PRIMARY KEY AUTOINCREMENT,
        title       TEXT NOT NULL UNIQUE,
        created_at  TEXT NOT NULL
    )
    "#,
    // One watch row per show; replaced in place when a show is re-rated.
    r#"
    CREATE TABLE IF NOT EXISTS watches (
        id          INTEGER PRIMARY KEY AUTOINCREMENT,
        show_id     INTEGER NOT NULL UNIQUE REFERENCES shows(id) ON DELETE CASCADE,
        rating      INTEGER NOT NULL CHECK (rating BETWEEN 1 AND 5),
        watched_at  TEXT NOT NULL
    )
    "#,
];

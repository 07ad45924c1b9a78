pub const SCHEMA: &str = r#"
-- Administrator credentials. Practically a single row; usernames are
-- case-sensitive and the hash column holds an argon2id PHC string.
CREATE TABLE IF NOT EXISTS users (
    id TEXT PRIMARY KEY,
    username TEXT NOT NULL UNIQUE,
    password_hash TEXT NOT NULL,
    created_at TEXT DEFAULT (datetime('now'))
);
"#;

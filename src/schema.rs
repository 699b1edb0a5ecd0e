//! Versioned description of the `notes` table.
//!
//! The schema only ever grows: every step is additive DDL guarded by
//! `IF NOT EXISTS`, so the full list can be replayed on every start against
//! an empty database, a fully migrated one, or a table left behind by an
//! older release with a subset of the columns.

pub struct Migration {
    pub version: u32,
    pub name: &'static str,
    pub sql: &'static str,
}

impl Migration {
    /// Individual statements, with `--` comment lines removed.
    pub fn statements(&self) -> Vec<String> {
        let without_comments: String = self
            .sql
            .lines()
            .filter(|line| !line.trim_start().starts_with("--"))
            .collect::<Vec<_>>()
            .join("\n");

        without_comments
            .split(';')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect()
    }
}

pub struct SchemaDescriptor {
    pub table: &'static str,
    pub migrations: &'static [Migration],
}

impl SchemaDescriptor {
    pub fn version(&self) -> u32 {
        self.migrations.last().map(|m| m.version).unwrap_or(0)
    }
}

pub const NOTES_SCHEMA: SchemaDescriptor = SchemaDescriptor {
    table: "notes",
    migrations: &[
        Migration {
            version: 1,
            name: "create_notes",
            sql: include_str!("../migrations/postgres/001_create_notes.sql"),
        },
        Migration {
            version: 2,
            name: "add_snippet_key",
            sql: include_str!("../migrations/postgres/002_add_snippet_key.sql"),
        },
        Migration {
            version: 3,
            name: "add_created_by",
            sql: include_str!("../migrations/postgres/003_add_created_by.sql"),
        },
        Migration {
            version: 4,
            name: "add_tag_columns",
            sql: include_str!("../migrations/postgres/004_add_tag_columns.sql"),
        },
        Migration {
            version: 5,
            name: "add_insertion_seq",
            sql: include_str!("../migrations/postgres/005_add_insertion_seq.sql"),
        },
        Migration {
            version: 6,
            name: "index_message_id",
            sql: include_str!("../migrations/postgres/006_index_message_id.sql"),
        },
    ],
};

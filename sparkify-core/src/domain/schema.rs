// sparkify-core/src/domain/schema.rs
//
// Target tables of the star schema: column names, order, SQL types and keys.

use serde::Serialize;

/// Generic cell handed to the relational store. `Null` is the single
/// "no value" marker for every table.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Cell {
    Null,
    Integer(i64),
    Decimal(f64),
    Text(String),
}

impl Cell {
    pub fn is_null(&self) -> bool {
        matches!(self, Cell::Null)
    }
}

impl From<Option<i64>> for Cell {
    fn from(value: Option<i64>) -> Self {
        value.map_or(Cell::Null, Cell::Integer)
    }
}

impl From<Option<u32>> for Cell {
    fn from(value: Option<u32>) -> Self {
        value.map_or(Cell::Null, |v| Cell::Integer(i64::from(v)))
    }
}

impl From<Option<i32>> for Cell {
    fn from(value: Option<i32>) -> Self {
        value.map_or(Cell::Null, |v| Cell::Integer(i64::from(v)))
    }
}

impl From<Option<f64>> for Cell {
    fn from(value: Option<f64>) -> Self {
        value.map_or(Cell::Null, Cell::Decimal)
    }
}

impl From<Option<&str>> for Cell {
    fn from(value: Option<&str>) -> Self {
        value.map_or(Cell::Null, |v| Cell::Text(v.to_string()))
    }
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        Cell::Text(value.to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    Text,
    Integer,
    Decimal,
}

impl ColumnType {
    pub fn sql(self) -> &'static str {
        match self {
            ColumnType::Text => "VARCHAR",
            ColumnType::Integer => "BIGINT",
            ColumnType::Decimal => "DOUBLE",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnDef {
    pub name: &'static str,
    pub column_type: ColumnType,
    pub not_null: bool,
}

const fn column(name: &'static str, column_type: ColumnType) -> ColumnDef {
    ColumnDef {
        name,
        column_type,
        not_null: false,
    }
}

const fn required(name: &'static str, column_type: ColumnType) -> ColumnDef {
    ColumnDef {
        name,
        column_type,
        not_null: true,
    }
}

#[derive(Debug, PartialEq, Eq)]
pub struct TableDef {
    pub name: &'static str,
    pub columns: &'static [ColumnDef],
    pub primary_key: &'static str,
}

impl TableDef {
    #[cfg(test)]
    pub fn column_names(&self) -> Vec<&'static str> {
        self.columns.iter().map(|c| c.name).collect()
    }

    pub fn drop_sql(&self) -> String {
        format!("DROP TABLE IF EXISTS {}", quote(self.name))
    }

    pub fn create_sql(&self) -> String {
        let mut lines: Vec<String> = self
            .columns
            .iter()
            .map(|c| {
                let mut line = format!("{} {}", quote(c.name), c.column_type.sql());
                if c.not_null {
                    line.push_str(" NOT NULL");
                }
                line
            })
            .collect();
        lines.push(format!("PRIMARY KEY ({})", quote(self.primary_key)));

        format!(
            "CREATE TABLE IF NOT EXISTS {} (\n    {}\n)",
            quote(self.name),
            lines.join(",\n    ")
        )
    }

    /// Parameterised insert, one `?` per column in declaration order.
    pub fn insert_sql(&self) -> String {
        let columns: Vec<String> = self.columns.iter().map(|c| quote(c.name)).collect();
        let placeholders = vec!["?"; self.columns.len()];
        format!(
            "INSERT INTO {} ({}) VALUES ({})",
            quote(self.name),
            columns.join(", "),
            placeholders.join(", ")
        )
    }

    pub fn count_sql(&self) -> String {
        format!("SELECT count(*) FROM {}", quote(self.name))
    }
}

/// Double-quoted SQL identifier (`time` is a keyword in most dialects).
pub fn quote(identifier: &str) -> String {
    format!("\"{}\"", identifier.replace('"', "\"\""))
}

use ColumnType::{Decimal, Integer, Text};

pub const SONGPLAYS: TableDef = TableDef {
    name: "songplays",
    columns: &[
        required("songplay_id", Text),
        column("start_time", Integer),
        column("length_played", Decimal),
        column("user_id", Integer),
        column("level", Text),
        column("song_id", Text),
        column("artist_id", Text),
        column("session_id", Integer),
        column("location", Text),
        column("user_agent", Text),
    ],
    primary_key: "songplay_id",
};

pub const USERS: TableDef = TableDef {
    name: "users",
    columns: &[
        required("user_unique_id", Text),
        column("user_id", Integer),
        column("first_name", Text),
        column("last_name", Text),
        column("gender", Text),
        column("level", Text),
    ],
    primary_key: "user_unique_id",
};

pub const SONGS: TableDef = TableDef {
    name: "songs",
    columns: &[
        required("song_id", Text),
        column("title", Text),
        column("artist_id", Text),
        column("year", Integer),
        column("duration", Decimal),
    ],
    primary_key: "song_id",
};

pub const ARTISTS: TableDef = TableDef {
    name: "artists",
    columns: &[
        required("artist_id", Text),
        column("name", Text),
        column("location", Text),
        column("latitude", Decimal),
        column("longitude", Decimal),
    ],
    primary_key: "artist_id",
};

pub const TIME: TableDef = TableDef {
    name: "time",
    columns: &[
        required("songplay_id", Text),
        column("start_time", Integer),
        column("hour", Integer),
        column("day", Integer),
        column("week", Integer),
        column("month", Integer),
        column("year", Integer),
        column("weekday", Integer),
    ],
    primary_key: "songplay_id",
};

/// Load order, fact table first.
pub const STAR_TABLES: [&TableDef; 5] = [&SONGPLAYS, &USERS, &SONGS, &ARTISTS, &TIME];

/// Plays that resolve to both a song and an artist dimension row.
pub const MATCHED_PLAYS_SQL: &str = "SELECT count(*) \
     FROM songplays \
     JOIN songs ON songplays.song_id = songs.song_id \
     JOIN artists ON songs.artist_id = artists.artist_id \
     WHERE songplays.song_id IS NOT NULL";

/// A typed row of one of the star tables.
pub trait StarRow {
    const TABLE: &'static TableDef;

    /// Values in the column order of [`Self::TABLE`].
    fn cells(&self) -> Vec<Cell>;
}

/// Bulk-insert payload for one table.
#[derive(Debug, Clone, PartialEq)]
pub struct RowSet {
    pub table: &'static TableDef,
    pub rows: Vec<Vec<Cell>>,
}

impl RowSet {
    pub fn from_rows<R: StarRow>(rows: &[R]) -> Self {
        Self {
            table: R::TABLE,
            rows: rows.iter().map(StarRow::cells).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Value of `column` in row `index`, addressed by name.
    #[cfg(test)]
    pub fn value(&self, index: usize, column: &str) -> Option<&Cell> {
        let position = self.table.columns.iter().position(|c| c.name == column)?;
        self.rows.get(index)?.get(position)
    }
}

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    #[default]
    Left,
    Center,
    Right,
    Paragraph,
}

impl Alignment {
    pub fn class_name(self) -> &'static str {
        match self {
            Self::Left => "alignment-left",
            Self::Center => "alignment-center",
            Self::Right => "alignment-right",
            Self::Paragraph => "alignment-paragraph",
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnDefinition {
    #[serde(default)]
    pub alignment: Alignment,
    #[serde(default)]
    pub border_left: u8,
    #[serde(default)]
    pub border_right: u8,
}

impl ColumnDefinition {
    pub fn new(alignment: Alignment) -> Self {
        Self {
            alignment,
            ..Self::default()
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellData {
    pub content: String,
}

impl CellData {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowData {
    pub cells: Vec<CellData>,
    #[serde(default)]
    pub border_top: u8,
    #[serde(default)]
    pub border_bottom: u8,
}

impl RowData {
    pub fn from_contents<I, S>(contents: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            cells: contents.into_iter().map(CellData::new).collect(),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableError {
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },
}

impl std::fmt::Display for TableError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TableError::RaggedRow {
                row,
                expected,
                found,
            } => write!(
                f,
                "row {} has {found} cells but the table defines {expected} columns",
                row + 1
            ),
        }
    }
}

impl std::error::Error for TableError {}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableData {
    #[serde(default)]
    pub columns: Vec<ColumnDefinition>,
    #[serde(default)]
    pub rows: Vec<RowData>,
}

impl TableData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sample() -> Self {
        let mut header = RowData::from_contents([
            r"\textbf{Symbol}",
            r"\textbf{Value}",
            r"\textbf{Notes}",
        ]);
        header.border_top = 1;
        header.border_bottom = 1;
        let mut last = RowData::from_contents([r"$\pi$", "3.14159", r"Fish \& Chips"]);
        last.border_bottom = 1;

        Self {
            columns: vec![
                ColumnDefinition {
                    alignment: Alignment::Left,
                    border_left: 1,
                    border_right: 0,
                },
                ColumnDefinition::new(Alignment::Center),
                ColumnDefinition {
                    alignment: Alignment::Right,
                    border_left: 0,
                    border_right: 1,
                },
            ],
            rows: vec![
                header,
                RowData::from_contents([r"$\alpha$", "0.05", r"\emph{significance}"]),
                RowData::from_contents([r"$x^2 + y_1$", "42", r"\texttt{raw} text"]),
                last,
            ],
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty() || self.columns.is_empty()
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn column(&self, column: usize) -> Option<&ColumnDefinition> {
        self.columns.get(column)
    }

    pub fn cell(&self, row: usize, column: usize) -> Option<&CellData> {
        self.rows.get(row)?.cells.get(column)
    }

    /// Returns `true` only when the stored content actually changed.
    pub fn set_cell_content(&mut self, row: usize, column: usize, content: &str) -> bool {
        let Some(cell) = self
            .rows
            .get_mut(row)
            .and_then(|row| row.cells.get_mut(column))
        else {
            return false;
        };

        if cell.content == content {
            return false;
        }

        cell.content = content.to_string();
        true
    }

    pub fn validate(&self) -> Result<(), TableError> {
        let expected = self.columns.len();
        for (row, data) in self.rows.iter().enumerate() {
            if data.cells.len() != expected {
                return Err(TableError::RaggedRow {
                    row,
                    expected,
                    found: data.cells.len(),
                });
            }
        }
        Ok(())
    }
}

/// Keyboard tab order: cells are numbered row-major starting at 1.
pub fn tab_index(cells_in_row: usize, row: usize, column: usize) -> usize {
    cells_in_row * row + column + 1
}

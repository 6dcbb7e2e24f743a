use crate::state::selection::CellPosition;
use crate::state::tabular::CellData;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EditingCell {
    pub row: usize,
    pub column: usize,
    pub content: String,
}

impl EditingCell {
    pub fn position(&self) -> CellPosition {
        CellPosition::new(self.row, self.column)
    }
}

/// Editing store: at most one cell is being edited at a time.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EditingState {
    cell: Option<EditingCell>,
}

impl EditingState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cell(&self) -> Option<&EditingCell> {
        self.cell.as_ref()
    }

    pub fn is_active(&self) -> bool {
        self.cell.is_some()
    }

    pub fn is_editing(&self, position: CellPosition) -> bool {
        self.cell
            .as_ref()
            .map(|cell| cell.position() == position)
            .unwrap_or(false)
    }

    /// Replaces any edit in progress with a fresh buffer for `position`.
    pub fn start_editing(&mut self, position: CellPosition, initial: String) {
        self.cell = Some(EditingCell {
            row: position.row,
            column: position.column,
            content: initial,
        });
    }

    /// Enters edit mode for a cell, seeding the buffer with its trimmed
    /// content.
    pub fn start_editing_cell(&mut self, position: CellPosition, cell: &CellData) {
        self.start_editing(position, cell.content.trim().to_string());
    }

    pub fn update_content(&mut self, content: String) {
        if let Some(cell) = self.cell.as_mut() {
            cell.content = content;
        }
    }

    /// Sanitizes a raw keystroke result before storing it.
    pub fn update_from_input(&mut self, raw: &str) {
        self.update_content(filter_input(raw));
    }

    pub fn commit(&mut self) -> Option<EditingCell> {
        self.cell.take()
    }

    pub fn cancel(&mut self) {
        self.cell = None;
    }
}

/// Escapes bare `&` and deletes every `\\` pair.
///
/// The escape check looks at the raw input, so `\&` is left alone. The
/// pair deletion runs afterwards and collapses `\\` to nothing.
pub fn filter_input(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    let mut previous = None;
    for ch in input.chars() {
        if ch == '&' && previous != Some('\\') {
            escaped.push('\\');
        }
        escaped.push(ch);
        previous = Some(ch);
    }

    escaped.replace("\\\\", "")
}

/// Address of one cell in the table grid.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct CellPosition {
    pub row: usize,
    pub column: usize,
}

impl CellPosition {
    pub fn new(row: usize, column: usize) -> Self {
        Self { row, column }
    }

    /// Spreadsheet-style reference such as `A1` or `AB12`.
    pub fn label(&self) -> String {
        let mut letters = Vec::new();
        let mut n = self.column;
        loop {
            letters.push((b'A' + (n % 26) as u8) as char);
            if n < 26 {
                break;
            }
            n = n / 26 - 1;
        }
        letters.iter().rev().collect::<String>() + &(self.row + 1).to_string()
    }
}

/// Rectangular span between an anchor (`from`) and a far corner (`to`).
///
/// The corners may be given in any order; all queries work on their
/// bounding box.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TableSelection {
    pub from: CellPosition,
    pub to: CellPosition,
}

impl TableSelection {
    pub fn new(from: CellPosition, to: CellPosition) -> Self {
        Self { from, to }
    }

    pub fn single(position: CellPosition) -> Self {
        Self::new(position, position)
    }

    /// Keeps the anchor and moves the far corner.
    pub fn extend_to(&self, position: CellPosition) -> Self {
        Self::new(self.from, position)
    }

    pub fn min_row(&self) -> usize {
        self.from.row.min(self.to.row)
    }

    pub fn max_row(&self) -> usize {
        self.from.row.max(self.to.row)
    }

    pub fn min_column(&self) -> usize {
        self.from.column.min(self.to.column)
    }

    pub fn max_column(&self) -> usize {
        self.from.column.max(self.to.column)
    }

    pub fn contains(&self, position: CellPosition) -> bool {
        (self.min_row()..=self.max_row()).contains(&position.row)
            && (self.min_column()..=self.max_column()).contains(&position.column)
    }

    pub fn borders_top(&self, row: usize) -> bool {
        row == self.min_row()
    }

    pub fn borders_bottom(&self, row: usize) -> bool {
        row == self.max_row()
    }

    pub fn borders_left(&self, column: usize) -> bool {
        column == self.min_column()
    }

    pub fn borders_right(&self, column: usize) -> bool {
        column == self.max_column()
    }

    pub fn width(&self) -> usize {
        self.max_column() - self.min_column() + 1
    }

    pub fn height(&self) -> usize {
        self.max_row() - self.min_row() + 1
    }
}

/// Styling facts for one cell relative to the current selection.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SelectionFlags {
    pub focused: bool,
    pub top: bool,
    pub bottom: bool,
    pub left: bool,
    pub right: bool,
}

/// Edge flags are only set for cells inside the selection.
pub fn selection_flags(
    selection: Option<&TableSelection>,
    position: CellPosition,
) -> SelectionFlags {
    let Some(selection) = selection.filter(|s| s.contains(position)) else {
        return SelectionFlags::default();
    };

    SelectionFlags {
        focused: true,
        top: selection.borders_top(position.row),
        bottom: selection.borders_bottom(position.row),
        left: selection.borders_left(position.column),
        right: selection.borders_right(position.column),
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerButton {
    Primary,
    Secondary,
    Auxiliary,
    Other,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PointerPress {
    pub button: PointerButton,
    pub shift: bool,
}

impl PointerPress {
    pub fn primary() -> Self {
        Self {
            button: PointerButton::Primary,
            shift: false,
        }
    }

    pub fn with_shift(mut self) -> Self {
        self.shift = true;
        self
    }
}

/// Whether a press was consumed; handled presses must not bubble further.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PressOutcome {
    Handled,
    Ignored,
}

impl PressOutcome {
    pub fn is_handled(self) -> bool {
        matches!(self, Self::Handled)
    }
}

/// Selection that follows a press on `position`, or `None` for presses
/// that must be ignored.
pub fn next_selection(
    current: Option<&TableSelection>,
    press: PointerPress,
    position: CellPosition,
) -> Option<TableSelection> {
    if press.button != PointerButton::Primary {
        return None;
    }

    match current {
        Some(current) if press.shift => Some(current.extend_to(position)),
        _ => Some(TableSelection::single(position)),
    }
}

/// Selection store shared by every cell of a table.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SelectionState {
    current: Option<TableSelection>,
}

impl SelectionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<&TableSelection> {
        self.current.as_ref()
    }

    pub fn set(&mut self, selection: Option<TableSelection>) {
        self.current = selection;
    }

    pub fn update(&mut self, f: impl FnOnce(Option<TableSelection>) -> Option<TableSelection>) {
        self.current = f(self.current);
    }

    pub fn clear(&mut self) {
        self.current = None;
    }

    pub fn press(&mut self, press: PointerPress, position: CellPosition) -> PressOutcome {
        match next_selection(self.current.as_ref(), press, position) {
            Some(next) => {
                self.current = Some(next);
                PressOutcome::Handled
            }
            None => PressOutcome::Ignored,
        }
    }

    pub fn flags(&self, position: CellPosition) -> SelectionFlags {
        selection_flags(self.current.as_ref(), position)
    }
}

//! Input normalization and click hit-testing shared by every page section.
//!
//! Keyboard and pointer events arrive from ratzilla in different shapes; they
//! are folded into [`InputEvent`] so section handlers never see the DOM.

use ratzilla::ratatui::layout::Rect;

/// A user input event after normalization.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// A printable key.
    Key(char),
    /// A tap/click on a registered target, carrying its semantic action id.
    Click(u16),
    /// Enter / Return.
    Enter,
    /// Backspace, used by the text fields on the admin page.
    Backspace,
    /// Escape: close the topmost overlay.
    Esc,
    /// Tab: move to the next page section.
    Tab,
}

/// A clickable rectangle in terminal cell coordinates.
#[derive(Debug, Clone)]
pub struct ClickTarget {
    pub rect: Rect,
    pub action_id: u16,
}

/// Click targets registered during the last frame plus the terminal size the
/// frame was drawn at. Shared between the draw callback and the mouse callback.
pub struct ClickState {
    pub targets: Vec<ClickTarget>,
    pub terminal_cols: u16,
    pub terminal_rows: u16,
}

impl ClickState {
    pub fn new() -> Self {
        Self {
            targets: Vec::new(),
            terminal_cols: 0,
            terminal_rows: 0,
        }
    }

    /// Forget last frame's targets. Called at the top of every draw.
    pub fn begin_frame(&mut self, cols: u16, rows: u16) {
        self.terminal_cols = cols;
        self.terminal_rows = rows;
        self.targets.clear();
    }

    pub fn add_click_target(&mut self, rect: Rect, action_id: u16) {
        self.targets.push(ClickTarget { rect, action_id });
    }

    /// Register a one-row target spanning `area`'s width. Rows outside `area`
    /// are ignored so clipped content never becomes clickable.
    pub fn add_row_target(&mut self, area: Rect, row: u16, action_id: u16) {
        if row >= area.y && row < area.y + area.height {
            self.add_click_target(Rect::new(area.x, row, area.width, 1), action_id);
        }
    }

    /// Register targets for a row of tab labels.
    ///
    /// `tab_widths` holds `(display_width, action_id)` per padded label. Each
    /// target covers its label plus half of the separator on either side; the
    /// first and last tabs stretch to the edges of `total_width`.
    pub fn register_tab_targets(
        &mut self,
        tab_widths: &[(u16, u16)],
        separator_width: u16,
        x: u16,
        y: u16,
        total_width: u16,
        height: u16,
    ) {
        if tab_widths.is_empty() || total_width == 0 {
            return;
        }

        let mut bounds: Vec<(u16, u16)> = Vec::with_capacity(tab_widths.len());
        let mut cursor = 0u16;
        for (i, &(w, _)) in tab_widths.iter().enumerate() {
            if i > 0 {
                cursor += separator_width;
            }
            bounds.push((cursor, cursor + w));
            cursor += w;
        }

        let last = tab_widths.len() - 1;
        for (i, &(_, action_id)) in tab_widths.iter().enumerate() {
            let left = if i == 0 {
                0
            } else {
                let prev_end = bounds[i - 1].1;
                prev_end + (bounds[i].0 - prev_end) / 2
            };
            let right = if i == last {
                total_width
            } else {
                let end = bounds[i].1;
                end + (bounds[i + 1].0 - end) / 2
            };
            let width = right.saturating_sub(left);
            if width > 0 {
                self.add_click_target(Rect::new(x + left, y, width, height), action_id);
            }
        }
    }

    /// Find the action under a cell. Later registrations sit on top, so they
    /// win when targets overlap (overlays are drawn after the page beneath).
    pub fn hit_test(&self, col: u16, row: u16) -> Option<u16> {
        self.targets.iter().rev().find_map(|t| {
            let r = t.rect;
            let inside = col >= r.x && col < r.x + r.width && row >= r.y && row < r.y + r.height;
            inside.then_some(t.action_id)
        })
    }
}

/// Whether a frame this wide should use the stacked single-column layout.
pub fn is_narrow_layout(width: u16) -> bool {
    width < 60
}

/// Convert a pixel offset inside the grid container into a cell index along
/// one axis. `None` for clicks outside the grid or a degenerate grid.
pub fn pixel_to_cell(offset: f64, extent: f64, cells: u16) -> Option<u16> {
    if extent <= 0.0 || cells == 0 || offset < 0.0 {
        return None;
    }
    let cell = (offset / (extent / cells as f64)) as u16;
    (cell < cells).then_some(cell)
}

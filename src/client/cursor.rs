//! Keyboard/pointer cursor over the rendered suggestion list.
//!
//! One instance per rendered list; a re-render resets it. The cursor is
//! independent of fetch state: it only knows how many selectable items are
//! currently on screen.

/// What a key or pointer event resolved to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavOutcome {
    /// Nothing to do (empty list, out-of-range hover).
    Ignored,
    /// The cursor moved to this flat index.
    Focused(usize),
    /// Enter on a focused item: navigate to that record's detail view.
    Commit(usize),
    /// Enter with nothing focused: submit the literal typed text.
    Submit,
    /// Escape: hide the list.
    Dismissed,
}

/// Cursor state: idle (nothing focused) or focused on a valid flat index.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListCursor {
    len: usize,
    focus: Option<usize>,
}

impl ListCursor {
    pub fn new(len: usize) -> Self {
        Self { len, focus: None }
    }

    /// The list was re-rendered with `len` items: back to idle.
    pub fn reset(&mut self, len: usize) {
        self.len = len;
        self.focus = None;
    }

    pub fn focused(&self) -> Option<usize> {
        self.focus
    }

    /// ArrowDown: next item, wrapping to the top past the end.
    pub fn next(&mut self) -> NavOutcome {
        if self.len == 0 {
            return NavOutcome::Ignored;
        }
        let index = match self.focus {
            Some(i) => (i + 1) % self.len,
            None => 0,
        };
        self.focus = Some(index);
        NavOutcome::Focused(index)
    }

    /// ArrowUp: previous item, wrapping to the bottom before the start.
    pub fn prev(&mut self) -> NavOutcome {
        if self.len == 0 {
            return NavOutcome::Ignored;
        }
        let index = match self.focus {
            Some(i) => (i + self.len - 1) % self.len,
            None => self.len - 1,
        };
        self.focus = Some(index);
        NavOutcome::Focused(index)
    }

    /// Pointer hover shares the cursor with keyboard focus.
    pub fn hover(&mut self, index: usize) -> NavOutcome {
        if index >= self.len {
            return NavOutcome::Ignored;
        }
        self.focus = Some(index);
        NavOutcome::Focused(index)
    }

    /// Enter: commit the focused item, or fall back to a full search.
    pub fn enter(&mut self) -> NavOutcome {
        match self.focus.take() {
            Some(index) => NavOutcome::Commit(index),
            None => NavOutcome::Submit,
        }
    }

    /// Escape: hide the list and go idle.
    pub fn escape(&mut self) -> NavOutcome {
        self.focus = None;
        NavOutcome::Dismissed
    }
}

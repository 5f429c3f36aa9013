use std::ops::Range;

/// State of a list's prev/next controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Controls {
    /// Everything fits in the window; no scrolling.
    Hidden,
    Shown { prev_enabled: bool, next_enabled: bool },
}

impl Controls {
    pub fn is_hidden(self) -> bool {
        matches!(self, Controls::Hidden)
    }
}

/// Fixed-size window over a sequence of `len` items.
///
/// `index` always stays within `0..=max(0, len - visible)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationCursor {
    index: usize,
    visible: usize,
    len: usize,
}

impl PaginationCursor {
    pub fn new(visible: usize) -> Self {
        Self {
            index: 0,
            visible: visible.max(1),
            len: 0,
        }
    }

    /// Reset to the first window over a freshly loaded sequence.
    pub fn reset(&mut self, len: usize) {
        self.len = len;
        self.index = 0;
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn visible(&self) -> usize {
        self.visible
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn max_index(&self) -> usize {
        self.len.saturating_sub(self.visible)
    }

    /// Move one step back. Returns whether the window moved.
    pub fn prev(&mut self) -> bool {
        if self.index > 0 {
            self.index -= 1;
            true
        } else {
            false
        }
    }

    /// Move one step forward. Returns whether the window moved.
    pub fn next(&mut self) -> bool {
        if self.index < self.max_index() {
            self.index += 1;
            true
        } else {
            false
        }
    }

    /// Jump to `index`, clamped into range.
    pub fn seek(&mut self, index: usize) {
        self.index = index.min(self.max_index());
    }

    /// Slice bounds of the visible window.
    pub fn window(&self) -> Range<usize> {
        let end = (self.index + self.visible).min(self.len);
        self.index.min(end)..end
    }

    pub fn controls(&self) -> Controls {
        if self.len <= self.visible {
            Controls::Hidden
        } else {
            Controls::Shown {
                prev_enabled: self.index > 0,
                next_enabled: self.index < self.max_index(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn cursor(len: usize, visible: usize) -> PaginationCursor {
        let mut c = PaginationCursor::new(visible);
        c.reset(len);
        c
    }

    #[test]
    fn test_masters_walk_to_the_end() {
        let mut c = cursor(7, 3);
        let mut seen = vec![c.index()];
        for _ in 0..4 {
            assert!(c.next());
            seen.push(c.index());
        }
        assert_eq!(seen, vec![0, 1, 2, 3, 4]);
        assert!(!c.next());
        assert_eq!(c.index(), 4);
        assert_eq!(c.window(), 4..7);
    }

    #[test]
    fn test_prev_at_start_is_noop() {
        let mut c = cursor(10, 5);
        assert!(!c.prev());
        assert_eq!(c.index(), 0);
    }

    #[test]
    fn test_empty_list() {
        let mut c = cursor(0, 3);
        assert_eq!(c.window(), 0..0);
        assert_eq!(c.controls(), Controls::Hidden);
        assert!(!c.next());
    }

    #[test]
    fn test_exact_fit_hides_controls() {
        let c = cursor(5, 5);
        assert_eq!(c.controls(), Controls::Hidden);
        assert_eq!(c.window(), 0..5);
    }

    #[test]
    fn test_short_list_window_is_truncated() {
        let c = cursor(2, 3);
        assert_eq!(c.window(), 0..2);
        assert!(c.controls().is_hidden());
    }

    #[test]
    fn test_controls_at_both_ends() {
        let mut c = cursor(6, 3);
        assert_eq!(
            c.controls(),
            Controls::Shown { prev_enabled: false, next_enabled: true }
        );
        c.seek(99);
        assert_eq!(c.index(), 3);
        assert_eq!(
            c.controls(),
            Controls::Shown { prev_enabled: true, next_enabled: false }
        );
        c.prev();
        assert_eq!(
            c.controls(),
            Controls::Shown { prev_enabled: true, next_enabled: true }
        );
    }

    #[test]
    fn test_reset_returns_to_first_window() {
        let mut c = cursor(9, 3);
        c.next();
        c.next();
        c.reset(4);
        assert_eq!(c.index(), 0);
        assert_eq!(c.max_index(), 1);
    }

    #[test]
    fn test_zero_visible_is_bumped_to_one() {
        let c = PaginationCursor::new(0);
        assert_eq!(c.visible(), 1);
    }

    proptest! {
        #[test]
        fn index_stays_in_bounds(
            len in 0usize..40,
            visible in 1usize..8,
            moves in proptest::collection::vec(any::<bool>(), 0..80),
        ) {
            let mut c = cursor(len, visible);
            for forward in moves {
                if forward { c.next(); } else { c.prev(); }
                prop_assert!(c.index() <= len.saturating_sub(visible));
                let w = c.window();
                prop_assert!(w.end <= len);
                prop_assert!(w.len() <= visible);
            }
        }

        #[test]
        fn controls_hidden_iff_everything_fits(
            len in 0usize..40,
            visible in 1usize..8,
            steps in 0usize..40,
        ) {
            let mut c = cursor(len, visible);
            for _ in 0..steps { c.next(); }
            match c.controls() {
                Controls::Hidden => prop_assert!(len <= visible),
                Controls::Shown { prev_enabled, next_enabled } => {
                    prop_assert!(len > visible);
                    prop_assert_eq!(prev_enabled, c.index() != 0);
                    prop_assert_eq!(next_enabled, c.index() != len - visible);
                }
            }
        }
    }
}

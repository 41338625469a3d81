// crates/storefront-core/src/search/dropdown.rs

/// Visibility of the results dropdown (and the dimmed backdrop behind it).
///
/// The host decides what counts as focus and what counts as leaving the box;
/// this type only records the outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Dropdown {
    #[default]
    Closed,
    Open,
}

impl Dropdown {
    /// Returns `true` if the visibility changed.
    pub fn open(&mut self) -> bool {
        let changed = *self == Dropdown::Closed;
        *self = Dropdown::Open;
        changed
    }

    /// Returns `true` if the visibility changed.
    pub fn close(&mut self) -> bool {
        let changed = *self == Dropdown::Open;
        *self = Dropdown::Closed;
        changed
    }

    pub fn is_open(&self) -> bool {
        *self == Dropdown::Open
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_close_report_changes() {
        let mut d = Dropdown::default();
        assert!(!d.is_open());
        assert!(d.open());
        assert!(!d.open());
        assert!(d.is_open());
        assert!(d.close());
        assert!(!d.close());
    }
}

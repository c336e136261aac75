//! Print order built from a committed edit, consumed by the order-resume stage.

use crate::session::CommittedEdit;

pub const UNIT_PRICE_CENTS: u32 = 100;
pub const CURRENCY_SYMBOL: &str = "€";

#[derive(Debug, Clone, PartialEq)]
pub struct PrintOrder {
    edit: CommittedEdit,
    copies: u32,
}

impl PrintOrder {
    pub fn new(edit: CommittedEdit) -> Self {
        tracing::debug!(photo = %edit.photo, "print order created");
        Self { edit, copies: 1 }
    }

    pub fn edit(&self) -> &CommittedEdit {
        &self.edit
    }

    pub const fn copies(&self) -> u32 {
        self.copies
    }

    pub fn increment(&mut self) {
        self.copies = self.copies.saturating_add(1);
    }

    /// Never drops below one copy.
    pub fn decrement(&mut self) {
        if self.copies > 1 {
            self.copies -= 1;
        }
    }

    pub const fn total_cents(&self) -> u64 {
        self.copies as u64 * UNIT_PRICE_CENTS as u64
    }

    pub fn total_label(&self) -> String {
        let total = self.total_cents();
        format!("{}.{:02}{CURRENCY_SYMBOL}", total / 100, total % 100)
    }

    pub fn summary_line(&self) -> String {
        format!("1 photo x {}", self.copies)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editor::EditState;
    use crate::session::PhotoRef;

    fn order() -> PrintOrder {
        PrintOrder::new(CommittedEdit {
            photo: PhotoRef::new("content://photos/7"),
            edit: EditState::default(),
        })
    }

    #[test]
    fn new_order_has_one_copy() {
        let order = order();
        assert_eq!(order.copies(), 1);
        assert_eq!(order.total_cents(), 100);
        assert_eq!(order.total_label(), "1.00€");
        assert_eq!(order.summary_line(), "1 photo x 1");
    }

    #[test]
    fn copies_never_drop_below_one() {
        let mut order = order();
        order.decrement();
        assert_eq!(order.copies(), 1);
        order.increment();
        order.increment();
        assert_eq!(order.total_label(), "3.00€");
        order.decrement();
        assert_eq!(order.copies(), 2);
    }
}

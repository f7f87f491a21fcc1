use std::collections::{BTreeSet, HashSet};

/// Theater layout in the current configuration.
pub const GRID_ROWS: u16 = 8;
pub const GRID_COLS: u16 = 10;

/// Price per seat in cents. Fixed constant, not a pricing engine.
pub const UNIT_PRICE_CENTS: u32 = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeatStatus {
    Available,
    Occupied,
    Selected,
}

/// Fixed seat grid for one showtime, built from the server's availability
/// snapshot. Pure data: classification never touches the network.
#[derive(Debug, Clone)]
pub struct SeatGrid {
    rows: u16,
    cols: u16,
    available: HashSet<u16>,
}

impl SeatGrid {
    pub fn new(rows: u16, cols: u16, available_seats: &[u16]) -> Self {
        Self {
            rows,
            cols,
            available: available_seats.iter().copied().collect(),
        }
    }

    /// Grid with the standard 8x10 layout.
    pub fn standard(available_seats: &[u16]) -> Self {
        Self::new(GRID_ROWS, GRID_COLS, available_seats)
    }

    pub fn rows(&self) -> u16 {
        self.rows
    }

    pub fn cols(&self) -> u16 {
        self.cols
    }

    pub fn seat_count(&self) -> u16 {
        self.rows * self.cols
    }

    /// Seat label at a grid position, 1-based row-major.
    pub fn label_at(&self, row: u16, col: u16) -> u16 {
        row * self.cols + col + 1
    }

    pub fn is_available(&self, label: u16) -> bool {
        self.available.contains(&label)
    }

    /// Couple seats are labeled with even numbers and pair with the
    /// preceding odd label.
    pub fn is_couple(&self, label: u16) -> bool {
        label % 2 == 0
    }

    /// Partner label of a couple pair: even seats pair down, odd seats pair
    /// up. Labels start at 1 so the partner is always inside the grid.
    pub fn partner(&self, label: u16) -> u16 {
        if label % 2 == 0 {
            label - 1
        } else {
            label + 1
        }
    }
}

/// In-memory set of seats chosen for one showtime. Lives only while the
/// seat-selection view is up; cleared on confirmation, expiry, or
/// navigation away.
#[derive(Debug, Clone, Default)]
pub struct Selection {
    seats: BTreeSet<u16>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Toggle a seat together with its couple partner.
    ///
    /// Both seats enter or leave the selection atomically. If either the
    /// seat or its partner is unavailable the toggle is a no-op for both.
    /// Returns whether the selection changed.
    pub fn toggle(&mut self, grid: &SeatGrid, label: u16) -> bool {
        if !grid.is_available(label) {
            return false;
        }

        let partner = grid.partner(label);
        if !grid.is_available(partner) {
            return false;
        }

        if self.seats.contains(&label) {
            self.seats.remove(&label);
            self.seats.remove(&partner);
        } else {
            self.seats.insert(label);
            self.seats.insert(partner);
        }
        true
    }

    pub fn contains(&self, label: u16) -> bool {
        self.seats.contains(&label)
    }

    pub fn is_empty(&self) -> bool {
        self.seats.is_empty()
    }

    pub fn len(&self) -> usize {
        self.seats.len()
    }

    /// Selected labels in ascending order.
    pub fn labels(&self) -> Vec<u16> {
        self.seats.iter().copied().collect()
    }

    /// Total price in cents: seat count times the fixed unit price.
    pub fn total_cents(&self) -> u32 {
        self.seats.len() as u32 * UNIT_PRICE_CENTS
    }

    /// Confirm is enabled iff at least one seat is selected.
    pub fn can_confirm(&self) -> bool {
        !self.seats.is_empty()
    }

    pub fn clear(&mut self) {
        self.seats.clear();
    }
}

/// Format a cent amount as a decimal price string.
pub fn format_cents(cents: u32) -> String {
    format!("{}.{:02}", cents / 100, cents % 100)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid_with(available: &[u16]) -> SeatGrid {
        SeatGrid::standard(available)
    }

    #[test]
    fn labels_are_row_major_one_based() {
        let grid = grid_with(&[]);
        assert_eq!(grid.label_at(0, 0), 1);
        assert_eq!(grid.label_at(0, 9), 10);
        assert_eq!(grid.label_at(1, 0), 11);
        assert_eq!(grid.label_at(7, 9), 80);
        assert_eq!(grid.seat_count(), 80);
    }

    #[test]
    fn couple_classification_follows_parity() {
        let grid = grid_with(&[]);
        assert!(grid.is_couple(2));
        assert!(grid.is_couple(80));
        assert!(!grid.is_couple(1));
        assert_eq!(grid.partner(2), 1);
        assert_eq!(grid.partner(1), 2);
        assert_eq!(grid.partner(80), 79);
        assert_eq!(grid.partner(79), 80);
    }

    #[test]
    fn toggling_even_seat_selects_the_pair() {
        // Grid of 80 seats, seats 1-4 available: toggling seat 2 selects
        // {1, 2} at a total of 20.00.
        let grid = grid_with(&[1, 2, 3, 4]);
        let mut selection = Selection::new();

        assert!(selection.toggle(&grid, 2));
        assert_eq!(selection.labels(), vec![1, 2]);
        assert_eq!(format_cents(selection.total_cents()), "20.00");

        // Toggling again removes both.
        assert!(selection.toggle(&grid, 2));
        assert!(selection.is_empty());
        assert_eq!(format_cents(selection.total_cents()), "0.00");
    }

    #[test]
    fn toggling_odd_seat_selects_the_pair() {
        let grid = grid_with(&[3, 4]);
        let mut selection = Selection::new();

        assert!(selection.toggle(&grid, 3));
        assert_eq!(selection.labels(), vec![3, 4]);

        assert!(selection.toggle(&grid, 4));
        assert!(selection.is_empty());
    }

    #[test]
    fn partner_unavailable_is_a_noop_for_both() {
        // Seat 6 is occupied, so neither 5 nor 6 may change state.
        let grid = grid_with(&[5]);
        let mut selection = Selection::new();

        assert!(!selection.toggle(&grid, 5));
        assert!(selection.is_empty());
        assert!(!selection.toggle(&grid, 6));
        assert!(selection.is_empty());
    }

    #[test]
    fn occupied_seat_is_a_noop() {
        let grid = grid_with(&[1, 2]);
        let mut selection = Selection::new();

        assert!(!selection.toggle(&grid, 9));
        assert!(selection.is_empty());
    }

    #[test]
    fn confirm_enabled_iff_non_empty() {
        let grid = grid_with(&[1, 2]);
        let mut selection = Selection::new();

        assert!(!selection.can_confirm());
        selection.toggle(&grid, 1);
        assert!(selection.can_confirm());
        selection.clear();
        assert!(!selection.can_confirm());
    }

    #[test]
    fn total_price_tracks_selection_size() {
        let grid = grid_with(&[1, 2, 3, 4, 7, 8]);
        let mut selection = Selection::new();

        selection.toggle(&grid, 1);
        selection.toggle(&grid, 4);
        selection.toggle(&grid, 8);
        assert_eq!(selection.len(), 6);
        assert_eq!(selection.total_cents(), 6 * UNIT_PRICE_CENTS);
        assert_eq!(format_cents(selection.total_cents()), "60.00");
    }

    #[test]
    fn price_formatting() {
        assert_eq!(format_cents(0), "0.00");
        assert_eq!(format_cents(1000), "10.00");
        assert_eq!(format_cents(1050), "10.50");
        assert_eq!(format_cents(5), "0.05");
    }
}

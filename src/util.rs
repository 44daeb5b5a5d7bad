use ratatui::layout::Rect;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Sign {
    Negative = -1,
    Positive = 1,
}

/// Moves `index` by `sign` inside `0..len`, stopping at both ends.
pub fn step_index(index: usize, sign: Sign, len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    match sign {
        Sign::Negative => index.saturating_sub(1),
        Sign::Positive => (index + 1).min(len - 1),
    }
}

/// Rect of `width` x `height` horizontally centered in `area`, starting at row `y`.
/// The result never leaves `area`.
pub fn centered_rect(area: Rect, width: u16, height: u16, y: u16) -> Rect {
    let x = area.x + area.width.saturating_sub(width) / 2;
    Rect::new(x, y, width, height).intersection(area)
}

/// Grows `rect` by one cell on each side, clipped to `bounds`.
pub fn inflate(rect: Rect, bounds: Rect) -> Rect {
    Rect::new(
        rect.x.saturating_sub(1),
        rect.y.saturating_sub(1),
        rect.width + 2,
        rect.height + 2,
    )
    .intersection(bounds)
}

pub fn hit(rect: Rect, column: u16, row: u16) -> bool {
    (rect.x..rect.x + rect.width).contains(&column) && (rect.y..rect.y + rect.height).contains(&row)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_index_stops_at_edges() {
        assert_eq!(step_index(0, Sign::Negative, 5), 0);
        assert_eq!(step_index(4, Sign::Positive, 5), 4);
        assert_eq!(step_index(2, Sign::Positive, 5), 3);
        assert_eq!(step_index(3, Sign::Positive, 0), 0);
    }

    #[test]
    fn centered_rect_is_clipped() {
        let area = Rect::new(0, 0, 10, 5);
        assert_eq!(centered_rect(area, 4, 1, 2), Rect::new(3, 2, 4, 1));
        assert_eq!(centered_rect(area, 20, 1, 0).width, 10);
    }

    #[test]
    fn hit_excludes_far_edge() {
        let r = Rect::new(2, 2, 3, 3);
        assert!(hit(r, 2, 2));
        assert!(hit(r, 4, 4));
        assert!(!hit(r, 5, 4));
        assert!(!hit(r, 1, 3));
    }
}

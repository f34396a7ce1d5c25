use ratatui::layout::{Constraint, Direction, Layout, Rect};

#[derive(Debug, Clone, Copy)]
pub struct ScreenRects {
    pub top: Rect,
    pub hero: Rect,
    pub hud: Rect,
    pub hud_left: Rect,
    pub hud_log: Rect,
    pub hud_right: Rect,
}

/// Split the terminal into top bar, hero area, and a three-column HUD.
///
/// The HUD keeps at least 5 rows so its bordered columns stay readable; the
/// hero area absorbs whatever is left.
pub fn screen_layout(area: Rect, hud_height: u16) -> ScreenRects {
    let hud_height = hud_height.max(5).min(area.height.saturating_sub(2).max(5));
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),          // top bar
            Constraint::Min(1),             // hero
            Constraint::Length(hud_height), // hud
        ])
        .split(area);

    let hud = chunks[2];
    let hud_cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(30),
            Constraint::Percentage(40),
            Constraint::Percentage(30),
        ])
        .split(hud);

    ScreenRects {
        top: chunks[0],
        hero: chunks[1],
        hud,
        hud_left: hud_cols[0],
        hud_log: hud_cols[1],
        hud_right: hud_cols[2],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn regions_stack_vertically() {
        let rects = screen_layout(Rect::new(0, 0, 100, 40), 8);
        assert_eq!(rects.top.height, 1);
        assert_eq!(rects.hud.height, 8);
        assert_eq!(rects.hero.height, 40 - 1 - 8);
        assert_eq!(rects.hero.y, 1);
        assert_eq!(rects.hud.y, 32);
    }

    #[test]
    fn hud_columns_cover_hud_width() {
        let rects = screen_layout(Rect::new(0, 0, 100, 40), 8);
        let total = rects.hud_left.width + rects.hud_log.width + rects.hud_right.width;
        assert_eq!(total, rects.hud.width);
        assert!(rects.hud_log.width >= rects.hud_left.width);
    }

    #[test]
    fn hud_height_has_a_floor() {
        let rects = screen_layout(Rect::new(0, 0, 80, 30), 1);
        assert_eq!(rects.hud.height, 5);
    }
}

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Screen regions, top to bottom: tabs, search input, list + detail, status
pub struct AppLayout {
    pub tabs_area: Rect,
    pub search_area: Rect,
    pub results_area: Rect,
    pub detail_area: Rect,
    pub status_area: Rect,
}

impl AppLayout {
    /// List takes 60% of the width, detail pane 40%
    pub fn new(area: Rect) -> Self {
        let vertical_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Min(3),
                Constraint::Length(1),
            ])
            .split(area);

        let horizontal_chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(vertical_chunks[2]);

        Self {
            tabs_area: vertical_chunks[0],
            search_area: vertical_chunks[1],
            results_area: horizontal_chunks[0],
            detail_area: horizontal_chunks[1],
            status_area: vertical_chunks[3],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_splits_correctly() {
        let layout = AppLayout::new(Rect::new(0, 0, 100, 30));

        assert_eq!(layout.tabs_area.y, 0);
        assert_eq!(layout.search_area.y, 1);
        assert_eq!(layout.status_area.height, 1);
        assert_eq!(layout.status_area.y, 29);

        assert_eq!(layout.results_area.height, 27);
        assert_eq!(layout.detail_area.height, 27);
        assert_eq!(layout.results_area.width, 60);
        assert_eq!(layout.detail_area.width, 40);
    }

    #[test]
    fn test_layout_minimum_height() {
        let layout = AppLayout::new(Rect::new(0, 0, 100, 6));

        assert_eq!(layout.status_area.height, 1);
        assert_eq!(layout.results_area.height, 3);
    }
}

//! Card tile widget for the memory board
//!
//! Renders a single card as a filled tile:
//! - face down: the hidden glyph on the card-back color
//! - face up: the symbol
//! - matched: the symbol in the "correct" color, bold
//! - under the cursor: selection colors and a bracket marker

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    widgets::Widget,
};
use unicode_width::UnicodeWidthStr;

use super::theme::Theme;
use crate::memory::Card;

/// Card tile widget
pub struct CardTile<'a> {
    card: &'a Card,
    theme: &'a Theme,
    hidden_glyph: &'a str,
    selected: bool,
}

impl<'a> CardTile<'a> {
    pub fn new(card: &'a Card, theme: &'a Theme) -> Self {
        Self {
            card,
            theme,
            hidden_glyph: "?",
            selected: false,
        }
    }

    pub fn selected(mut self, selected: bool) -> Self {
        self.selected = selected;
        self
    }

    pub fn hidden_glyph(mut self, glyph: &'a str) -> Self {
        self.hidden_glyph = glyph;
        self
    }

    fn colors(&self) -> (Style, &'a str) {
        let t = self.theme;
        let (bg, fg, label) = match self.card.face() {
            _ if self.selected && !self.card.matched => {
                (t.selection_bg, t.selection_fg, self.card.face().unwrap_or(self.hidden_glyph))
            }
            Some(symbol) if self.card.matched => (t.background, t.correct, symbol),
            Some(symbol) => (t.background, t.warning, symbol),
            None => (t.card_back, t.dimmed, self.hidden_glyph),
        };
        let mut style = Style::default().fg(fg).bg(bg);
        if self.card.matched || self.selected {
            style = style.add_modifier(Modifier::BOLD);
        }
        (style, label)
    }
}

impl Widget for CardTile<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // Leave a one-cell gutter between tiles
        let tile = Rect {
            width: area.width.saturating_sub(1),
            height: area.height.saturating_sub(1).max(1),
            ..area
        };
        if tile.width == 0 || tile.height == 0 {
            return;
        }

        let (style, label) = self.colors();
        buf.set_style(tile, style);

        let label_width = label.width() as u16;
        let mid_y = tile.y + tile.height / 2;
        let x = tile.x + tile.width.saturating_sub(label_width) / 2;
        buf.set_stringn(x, mid_y, label, tile.width as usize, style);

        if self.selected && tile.width >= label_width + 4 {
            let marker = Style::default()
                .fg(self.theme.accent)
                .bg(style.bg.unwrap_or(self.theme.selection_bg));
            buf.set_string(tile.x, mid_y, "[", marker);
            buf.set_string(tile.x + tile.width - 1, mid_y, "]", marker);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(flipped: bool, matched: bool) -> Card {
        Card {
            symbol: "🐼",
            flipped,
            matched,
            id: 0,
        }
    }

    fn row_text(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width)
            .map(|x| buf[(x, y)].symbol().to_string())
            .collect()
    }

    #[test]
    fn test_hidden_card_shows_glyph() {
        let theme = Theme::default();
        let c = card(false, false);
        let area = Rect::new(0, 0, 9, 4);
        let mut buf = Buffer::empty(area);
        CardTile::new(&c, &theme).hidden_glyph("?").render(area, &mut buf);

        assert!(row_text(&buf, 1).contains('?'));
        assert!(!row_text(&buf, 1).contains("🐼"));
        assert_eq!(buf[(0, 1)].bg, theme.card_back);
    }

    #[test]
    fn test_flipped_card_shows_symbol() {
        let theme = Theme::default();
        let c = card(true, false);
        let area = Rect::new(0, 0, 9, 4);
        let mut buf = Buffer::empty(area);
        CardTile::new(&c, &theme).render(area, &mut buf);

        assert!(row_text(&buf, 1).contains("🐼"));
    }

    #[test]
    fn test_selected_marker() {
        let theme = Theme::default();
        let c = card(false, false);
        let area = Rect::new(0, 0, 9, 4);
        let mut buf = Buffer::empty(area);
        CardTile::new(&c, &theme).selected(true).render(area, &mut buf);

        let row = row_text(&buf, 1);
        assert!(row.starts_with('['));
        assert_eq!(buf[(0, 1)].bg, theme.selection_bg);
    }

    #[test]
    fn test_tiny_area_is_noop() {
        let theme = Theme::default();
        let c = card(true, true);
        let area = Rect::new(0, 0, 1, 1);
        let mut buf = Buffer::empty(area);
        CardTile::new(&c, &theme).render(area, &mut buf);
        assert_eq!(buf[(0, 0)].symbol(), " ");
    }
}

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};

use crate::game::{Board, GameEngine, Rgb, Tiled};

/// Characters drawn for one tile; terminal cells are about twice as tall as wide
const TILE: &str = "██";

pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, frame: &mut Frame, engine: &GameEngine, best: Option<u32>) {
        let board = engine.board();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),                         // Header
                Constraint::Length(extent(board.height(), 1)), // Board plus border
                Constraint::Length(1),                         // Footer
                Constraint::Min(0),
            ])
            .split(frame.area());

        frame.render_widget(self.render_stats(engine.score(), best), chunks[0]);

        let grid_width = extent(board.width(), 2);
        let game_area = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(grid_width), Constraint::Min(0)])
            .split(chunks[1])[0];
        frame.render_widget(self.render_grid(board), game_area);

        frame.render_widget(self.render_controls(), chunks[2]);
    }

    fn render_grid(&self, board: &Board) -> Paragraph<'static> {
        let lines: Vec<Line> = cell_colors(board)
            .into_iter()
            .map(|row| {
                let spans: Vec<Span> = row
                    .into_iter()
                    .map(|cell| match cell {
                        Some(color) => Span::styled(TILE, Style::default().fg(to_color(color))),
                        None => Span::raw("  "),
                    })
                    .collect();
                Line::from(spans)
            })
            .collect();

        Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Double)
                .border_style(Style::default().fg(Color::White)),
        )
    }

    fn render_stats(&self, score: u32, best: Option<u32>) -> Paragraph<'static> {
        let mut spans = vec![
            Span::styled("Score: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                score.to_string(),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
        ];
        if let Some(best) = best {
            spans.push(Span::raw("    "));
            spans.push(Span::styled("Best: ", Style::default().fg(Color::Yellow)));
            spans.push(Span::styled(
                best.to_string(),
                Style::default().fg(Color::White),
            ));
        }

        Paragraph::new(Line::from(spans)).alignment(Alignment::Left)
    }

    fn render_controls(&self) -> Paragraph<'static> {
        let text = Line::from(vec![
            Span::styled("↑↓←→", Style::default().fg(Color::Cyan)),
            Span::raw(" or "),
            Span::styled("WASD", Style::default().fg(Color::Cyan)),
            Span::raw(" to move | "),
            Span::styled("Q", Style::default().fg(Color::Red)),
            Span::raw(" to quit"),
        ]);

        Paragraph::new(text).alignment(Alignment::Left)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Color of every cell, row by row. Objects are painted in board order,
/// so later objects cover earlier ones.
pub fn cell_colors(board: &Board) -> Vec<Vec<Option<Rgb>>> {
    let mut cells = vec![vec![None; board.width()]; board.height()];

    for (_, object) in board.objects() {
        for tile in object.tiles().filter(|tile| board.in_bounds(tile)) {
            cells[tile.row as usize][tile.column as usize] = Some(tile.color);
        }
    }

    cells
}

/// Terminal cells needed for `tiles` tiles of `per_tile` cells each, plus a border
fn extent(tiles: usize, per_tile: u16) -> u16 {
    u16::try_from(tiles)
        .unwrap_or(u16::MAX)
        .saturating_mul(per_tile)
        .saturating_add(2)
}

fn to_color(Rgb(r, g, b): Rgb) -> Color {
    Color::Rgb(r, g, b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{CheckerBoard, Direction, Fruit, GameConfig, Snake};
    use ratatui::{Terminal, backend::TestBackend};

    #[test]
    fn test_cells_follow_draw_order() {
        let mut board = Board::with_seed(4, 2, 0);
        board.add(CheckerBoard::new(4, 2, (Rgb::BLACK, Rgb::WHITE)));
        board.add(Snake::new(
            &[(0, 2), (0, 1)],
            Direction::Right,
            Rgb::BLUE,
            Rgb::GREEN,
        ));
        board.add(Fruit::new(1, 3, Rgb::RED));

        let cells = cell_colors(&board);
        assert_eq!(
            cells,
            vec![
                vec![Some(Rgb::BLACK), Some(Rgb::GREEN), Some(Rgb::BLUE), Some(Rgb::WHITE)],
                vec![Some(Rgb::WHITE), Some(Rgb::BLACK), Some(Rgb::WHITE), Some(Rgb::RED)],
            ]
        );
    }

    #[test]
    fn test_out_of_bounds_tiles_are_skipped() {
        let mut board = Board::with_seed(2, 2, 0);
        board.add(Fruit::new(-1, 5, Rgb::RED));
        board.add(Fruit::new(1, 1, Rgb::RED));

        let cells = cell_colors(&board);
        assert_eq!(cells, vec![vec![None, None], vec![None, Some(Rgb::RED)]]);
    }

    #[test]
    fn test_extent_saturates() {
        assert_eq!(extent(10, 1), 12);
        assert_eq!(extent(10, 2), 22);
        assert_eq!(extent(40_000, 2), u16::MAX);
        assert_eq!(extent(usize::MAX, 1), u16::MAX);
    }

    #[test]
    fn test_render_header() {
        let engine = GameEngine::with_seed(GameConfig::small(), 1);
        let mut terminal = Terminal::new(TestBackend::new(40, 16)).unwrap();

        terminal
            .draw(|frame| Renderer::new().render(frame, &engine, Some(100)))
            .unwrap();

        let buffer = terminal.backend().buffer();
        let header: String = (0..buffer.area.width)
            .map(|x| buffer[(x, 0)].symbol().to_string())
            .collect();
        assert!(header.starts_with("Score: 0    Best: 100"));
    }
}

//! Board widget: geometry, painting and pointer input

use egui::{Align2, CornerRadius, FontId, Painter, Pos2, Rect, Sense, Stroke, Vec2};

use super::theme::{star_points, MARGIN_CELLS, PALETTE, STONE_RATIO};
use crate::rules::is_valid_move;
use crate::{Board, Pos, Stone};

/// Intersection layout of an `size x size` board fitted into a square area.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Grid {
    /// Screen position of intersection (0, 0)
    origin: Pos2,
    /// Distance between neighbouring lines
    cell: f32,
    size: usize,
}

impl Grid {
    /// Largest grid that fits centered in `rect`, keeping a margin for the labels.
    pub fn fit(rect: Rect, size: usize) -> Self {
        let side = rect.width().min(rect.height());
        let spans = (size as f32 - 1.0).max(1.0);
        let cell = side / (spans + 2.0 * MARGIN_CELLS);
        let origin = rect.center() - Vec2::splat(cell * spans / 2.0);
        Self { origin, cell, size }
    }

    pub fn cell(&self) -> f32 {
        self.cell
    }

    pub fn stone_radius(&self) -> f32 {
        self.cell * STONE_RATIO
    }

    /// Screen position of an intersection
    pub fn point(&self, pos: Pos) -> Pos2 {
        self.origin + Vec2::new(f32::from(pos.col), f32::from(pos.row)) * self.cell
    }

    /// Nearest intersection to a screen point, if it lies on the board.
    pub fn cell_at(&self, point: Pos2) -> Option<Pos> {
        let rel = (point - self.origin) / self.cell;
        let (row, col) = (rel.y.round(), rel.x.round());
        let limit = self.size as f32;
        if row < 0.0 || col < 0.0 || row >= limit || col >= limit {
            return None;
        }
        Some(Pos::new(row as u8, col as u8))
    }
}

/// Everything the board widget draws in one frame
pub struct BoardScene<'a> {
    pub board: &'a Board,
    pub to_move: Stone,
    pub last_move: Option<Pos>,
    pub hint: Option<Pos>,
    pub winning_line: Option<[Pos; 5]>,
    /// Accept clicks and show the hover preview
    pub interactive: bool,
}

impl BoardScene<'_> {
    /// Paint into the remaining space of `ui`. Returns the cell clicked this frame when
    /// the move there is legal.
    pub fn show(&self, ui: &mut egui::Ui) -> Option<Pos> {
        let side = ui.available_size().min_elem().max(120.0);
        let (response, painter) = ui.allocate_painter(Vec2::splat(side), Sense::click());
        let grid = Grid::fit(response.rect, self.board.size());

        painter.rect_filled(response.rect, CornerRadius::same(6), PALETTE.wood);
        self.paint_lines(&painter, &grid);
        self.paint_stones(&painter, &grid);
        self.paint_markers(&painter, &grid);

        if !self.interactive {
            return None;
        }
        let pos = response.hover_pos().and_then(|point| grid.cell_at(point))?;
        let legal = is_valid_move(self.board, i32::from(pos.row), i32::from(pos.col));
        self.paint_preview(&painter, &grid, pos, legal);

        (legal && response.clicked()).then_some(pos)
    }

    fn paint_lines(&self, painter: &Painter, grid: &Grid) {
        let n = self.board.size() as u8;
        let last = n - 1;
        let stroke = Stroke::new(1.0, PALETTE.ink);
        let font = FontId::monospace(grid.cell() * 0.3);
        let gap = grid.cell() * 0.6;

        for i in 0..n {
            painter.line_segment([grid.point(Pos::new(0, i)), grid.point(Pos::new(last, i))], stroke);
            painter.line_segment([grid.point(Pos::new(i, 0)), grid.point(Pos::new(i, last))], stroke);

            // Same 0-based indices the rest of the program prints
            let top = grid.point(Pos::new(0, i)) - Vec2::new(0.0, gap);
            painter.text(top, Align2::CENTER_CENTER, i, font.clone(), PALETTE.ink);
            let left = grid.point(Pos::new(i, 0)) - Vec2::new(gap, 0.0);
            painter.text(left, Align2::CENTER_CENTER, i, font.clone(), PALETTE.ink);
        }

        for (row, col) in star_points(self.board.size()) {
            painter.circle_filled(grid.point(Pos::new(row, col)), grid.cell() * 0.1, PALETTE.ink);
        }
    }

    fn paint_stones(&self, painter: &Painter, grid: &Grid) {
        for pos in self.board.occupied().iter_ones() {
            let stone = self.board.get(pos);
            let Some(fill) = PALETTE.stone(stone) else {
                continue;
            };
            let rim = match stone {
                Stone::White => Stroke::new(1.0, PALETTE.white_rim),
                _ => Stroke::NONE,
            };
            painter.circle(grid.point(pos), grid.stone_radius(), fill, rim);
        }
    }

    fn paint_markers(&self, painter: &Painter, grid: &Grid) {
        let radius = grid.stone_radius();

        if let Some(pos) = self.last_move {
            painter.circle_filled(grid.point(pos), radius * 0.22, PALETTE.last_move);
        }

        if let Some(line) = self.winning_line {
            let stroke = Stroke::new(3.0, PALETTE.winning);
            painter.line_segment([grid.point(line[0]), grid.point(line[4])], stroke);
            for pos in line {
                painter.circle_stroke(grid.point(pos), radius + 2.0, stroke);
            }
        }

        if let Some(pos) = self.hint {
            painter.circle_stroke(grid.point(pos), radius, Stroke::new(2.0, PALETTE.hint));
            painter.text(
                grid.point(pos),
                Align2::CENTER_CENTER,
                '?',
                FontId::proportional(radius),
                PALETTE.hint,
            );
        }
    }

    fn paint_preview(&self, painter: &Painter, grid: &Grid, pos: Pos, legal: bool) {
        let center = grid.point(pos);
        let radius = grid.stone_radius();
        if !legal {
            painter.circle_stroke(center, radius, Stroke::new(2.0, PALETTE.illegal));
            return;
        }
        if let Some(fill) = PALETTE.stone(self.to_move) {
            painter.circle_filled(center, radius, fill.gamma_multiply(0.45));
        }
    }
}

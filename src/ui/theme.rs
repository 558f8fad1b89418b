//! Colors and proportions of the desktop shell

use egui::Color32;

use crate::Stone;

/// Every color the shell paints with
pub struct Palette {
    pub wood: Color32,
    pub ink: Color32,
    pub black_stone: Color32,
    pub white_stone: Color32,
    pub white_rim: Color32,
    pub last_move: Color32,
    pub winning: Color32,
    pub hint: Color32,
    pub illegal: Color32,
    pub warning: Color32,
}

pub const PALETTE: Palette = Palette {
    wood: Color32::from_rgb(214, 177, 120),
    ink: Color32::from_rgb(48, 34, 18),
    black_stone: Color32::from_rgb(22, 22, 26),
    white_stone: Color32::from_rgb(244, 244, 240),
    white_rim: Color32::from_rgb(150, 150, 150),
    last_move: Color32::from_rgb(220, 50, 47),
    winning: Color32::from_rgb(38, 160, 90),
    hint: Color32::from_rgb(40, 110, 200),
    illegal: Color32::from_rgb(200, 40, 40),
    warning: Color32::from_rgb(225, 160, 40),
};

/// Board margin around the outer lines, in cells
pub const MARGIN_CELLS: f32 = 0.9;
/// Stone radius as a fraction of the cell
pub const STONE_RATIO: f32 = 0.46;

impl Palette {
    /// Fill color of a stone; `None` for an empty cell
    pub fn stone(&self, stone: Stone) -> Option<Color32> {
        match stone {
            Stone::Black => Some(self.black_stone),
            Stone::White => Some(self.white_stone),
            Stone::Empty => None,
        }
    }

    /// Readable color on top of a `stone`
    pub fn on_stone(&self, stone: Stone) -> Color32 {
        match stone {
            Stone::Black => self.white_stone,
            _ => self.black_stone,
        }
    }
}

/// Star points (0-indexed): the four corner points and the center.
/// On a 15x15 board: (3,3), (3,11), (7,7), (11,3), (11,11).
pub fn star_points(size: usize) -> Vec<(u8, u8)> {
    let center = (size / 2) as u8;
    if size < 9 {
        return vec![(center, center)];
    }
    let near = if size >= 13 { 3 } else { 2 };
    let far = (size - 1 - near as usize) as u8;
    vec![(near, near), (near, far), (center, center), (far, near), (far, far)]
}

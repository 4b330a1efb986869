#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Color { r, g, b }
    }
}

pub const WORLD_COLOR: Color = Color::rgb(30, 30, 30);
pub const SNAKE_COLOR: Color = Color::rgb(0, 255, 0);
pub const SNAKE_HEAD_COLOR: Color = Color::rgb(255, 0, 0);
pub const FOOD_COLOR: Color = Color::rgb(255, 255, 255);

/// Anything that can show a grid of coloured cells.
pub trait RenderSink {
    fn clear(&mut self, color: Color) -> anyhow::Result<()>;

    /// Cells outside the drawable area are ignored.
    fn set_cell(&mut self, x: i32, y: i32, color: Color) -> anyhow::Result<()>;

    fn present(&mut self) -> anyhow::Result<()>;

    /// Replaces the grid with a centred block of text lines.
    fn show_summary(&mut self, lines: &[&str]) -> anyhow::Result<()>;
}

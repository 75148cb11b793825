/// Colours assigned to plotted equations, cycled in order.
pub const EQUATION_COLORS: [&str; 10] = [
    "#6366f1", "#ef4444", "#22c55e", "#f59e0b", "#3b82f6", "#ec4899", "#14b8a6", "#f97316",
    "#8b5cf6", "#06b6d4",
];

/// Cursor over [`EQUATION_COLORS`], owned by whoever adds equations to a plot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColorCycle {
    index: usize,
}

impl ColorCycle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the current colour and advances, wrapping after the last one.
    pub fn next_color(&mut self) -> &'static str {
        let color = Self::color_at(self.index);
        self.index = (self.index + 1) % EQUATION_COLORS.len();
        color
    }

    pub fn reset(&mut self) {
        self.index = 0;
    }

    pub fn color_at(index: usize) -> &'static str {
        EQUATION_COLORS[index % EQUATION_COLORS.len()]
    }
}

//! Responsive grid layout math
//!
//! Pure geometry: given a container width, the grid derives a column count
//! from the minimum item width (or takes a fixed count), sizes items to
//! fill the row, and positions them row-major with gap and padding. The
//! application places each returned rect as a floating element.

use slate_core::{Dimensions, Rect};

/// Grid behavior knobs; invalid values are normalized on construction
#[derive(Clone, Copy, Debug)]
pub struct GridConfig {
    /// Minimum item width used to derive the column count
    pub min_width: f32,
    /// Maximum item width; 0 disables the cap
    pub max_width: f32,
    /// Space between adjacent items
    pub gap: f32,
    /// Space around the whole grid
    pub padding: f32,
    /// Fixed column count; 0 derives from the container width
    pub columns: u32,
    /// Width/height ratio; 0 makes items square
    pub aspect_ratio: f32,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            min_width: 100.0,
            max_width: 0.0,
            gap: 8.0,
            padding: 0.0,
            columns: 0,
            aspect_ratio: 0.0,
        }
    }
}

impl GridConfig {
    fn normalized(mut self) -> Self {
        if self.min_width <= 0.0 {
            self.min_width = 100.0;
        }
        if self.max_width > 0.0 && self.max_width < self.min_width {
            self.max_width = 0.0;
        }
        self.gap = self.gap.max(0.0);
        self.padding = self.padding.max(0.0);
        self
    }
}

/// One grid entry's natural size (kept for item-aware layouts)
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct GridItem {
    pub width: f32,
    pub height: f32,
}

/// The grid itself: config plus the item list
#[derive(Clone, Debug, Default)]
pub struct Grid {
    config: GridConfig,
    items: Vec<GridItem>,
}

impl Grid {
    pub fn new(config: GridConfig) -> Self {
        Self {
            config: config.normalized(),
            items: Vec::new(),
        }
    }

    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    pub fn add_item(&mut self, width: f32, height: f32) {
        self.items.push(GridItem { width, height });
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Column count for a container width
    pub fn columns_for(&self, container_width: f32) -> u32 {
        if self.config.columns > 0 {
            return self.config.columns;
        }
        let available = container_width - 2.0 * self.config.padding;
        let per_item = self.config.min_width + self.config.gap;
        if per_item <= 0.0 || available <= 0.0 {
            return 1;
        }
        (((available + self.config.gap) / per_item) as u32).max(1)
    }

    /// Item dimensions for a container width
    pub fn item_size(&self, container_width: f32) -> Dimensions {
        let columns = self.columns_for(container_width) as f32;
        let mut width = (container_width
            - 2.0 * self.config.padding
            - (columns - 1.0) * self.config.gap)
            / columns;
        if self.config.max_width > 0.0 && width > self.config.max_width {
            width = self.config.max_width;
        }
        let height = if self.config.aspect_ratio > 0.0 {
            width / self.config.aspect_ratio
        } else {
            width
        };
        Dimensions::new(width, height)
    }

    /// Position of item `index`, row-major
    pub fn slot(&self, index: usize, container_width: f32) -> Rect {
        let columns = self.columns_for(container_width);
        let size = self.item_size(container_width);
        let row = (index as u32 / columns) as f32;
        let col = (index as u32 % columns) as f32;
        Rect::new(
            self.config.padding + col * (size.width + self.config.gap),
            self.config.padding + row * (size.height + self.config.gap),
            size.width,
            size.height,
        )
    }

    /// Every item's rect for a container width
    pub fn layout(&self, container_width: f32) -> Vec<Rect> {
        (0..self.items.len())
            .map(|index| self.slot(index, container_width))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auto_columns_from_min_width() {
        let grid = Grid::new(GridConfig {
            min_width: 100.0,
            gap: 10.0,
            ..Default::default()
        });
        // 4 * 100 + 3 * 10 = 430 fits; a fifth column would need 540
        assert_eq!(grid.columns_for(430.0), 4);
        assert_eq!(grid.columns_for(539.0), 4);
        assert_eq!(grid.columns_for(540.0), 5);
    }

    #[test]
    fn test_at_least_one_column() {
        let grid = Grid::new(GridConfig {
            min_width: 300.0,
            ..Default::default()
        });
        assert_eq!(grid.columns_for(50.0), 1);
    }

    #[test]
    fn test_fixed_columns_override() {
        let grid = Grid::new(GridConfig {
            columns: 3,
            ..Default::default()
        });
        assert_eq!(grid.columns_for(10_000.0), 3);
    }

    #[test]
    fn test_items_fill_the_row() {
        let grid = Grid::new(GridConfig {
            min_width: 100.0,
            gap: 10.0,
            padding: 20.0,
            ..Default::default()
        });
        // 460 - 40 padding = 420 available; 3 columns of min 100
        let columns = grid.columns_for(460.0);
        assert_eq!(columns, 3);
        let size = grid.item_size(460.0);
        // (460 - 40 - 2*10) / 3
        assert!((size.width - 400.0 / 3.0).abs() < 0.001);
        // Square by default
        assert_eq!(size.width, size.height);
    }

    #[test]
    fn test_aspect_ratio_controls_height() {
        let grid = Grid::new(GridConfig {
            columns: 2,
            gap: 0.0,
            aspect_ratio: 2.0,
            ..Default::default()
        });
        let size = grid.item_size(400.0);
        assert_eq!(size.width, 200.0);
        assert_eq!(size.height, 100.0);
    }

    #[test]
    fn test_max_width_caps_items() {
        let grid = Grid::new(GridConfig {
            columns: 1,
            max_width: 150.0,
            ..Default::default()
        });
        assert_eq!(grid.item_size(1000.0).width, 150.0);
    }

    #[test]
    fn test_row_major_positions() {
        let mut grid = Grid::new(GridConfig {
            columns: 2,
            gap: 10.0,
            padding: 5.0,
            ..Default::default()
        });
        for _ in 0..3 {
            grid.add_item(0.0, 0.0);
        }
        let rects = grid.layout(215.0);
        assert_eq!(rects.len(), 3);
        // (215 - 10 - 10) / 2 = 97.5 wide items
        assert_eq!(rects[0].origin(), slate_core::Point::new(5.0, 5.0));
        assert_eq!(rects[1].x, 5.0 + 97.5 + 10.0);
        assert_eq!(rects[1].y, 5.0);
        // Third item wraps to the second row
        assert_eq!(rects[2].x, 5.0);
        assert_eq!(rects[2].y, 5.0 + 97.5 + 10.0);
    }

    #[test]
    fn test_config_normalization() {
        let grid = Grid::new(GridConfig {
            min_width: -5.0,
            max_width: 50.0,
            gap: -1.0,
            padding: -2.0,
            ..Default::default()
        });
        let config = grid.config();
        assert_eq!(config.min_width, 100.0);
        // max below min is dropped
        assert_eq!(config.max_width, 0.0);
        assert_eq!(config.gap, 0.0);
        assert_eq!(config.padding, 0.0);
    }
}

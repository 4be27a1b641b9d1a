//! Brick grid generation
//!
//! Rows grow with depth up to a cap; the coin in each cell cycles through the
//! asset catalog diagonally. Health toughens every third depth, and past the
//! tough depth some bricks roll one extra hit from the seeded RNG.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::assets;
use super::geometry::Rect;
use super::state::{Brick, BrickStatus};
use crate::tuning::GridLayout;

/// Bricks stored column-major (`column * rows + row`)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrickGrid {
    columns: usize,
    rows: usize,
    bricks: Vec<Brick>,
}

impl BrickGrid {
    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn len(&self) -> usize {
        self.bricks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bricks.is_empty()
    }

    pub fn get(&self, column: usize, row: usize) -> Option<&Brick> {
        if column >= self.columns || row >= self.rows {
            return None;
        }
        self.bricks.get(column * self.rows + row)
    }

    pub fn get_mut(&mut self, column: usize, row: usize) -> Option<&mut Brick> {
        if column >= self.columns || row >= self.rows {
            return None;
        }
        self.bricks.get_mut(column * self.rows + row)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Brick> {
        self.bricks.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Brick> {
        self.bricks.iter_mut()
    }

    pub fn bricks_mut(&mut self) -> &mut [Brick] {
        &mut self.bricks
    }

    pub fn active_count(&self) -> usize {
        self.bricks.iter().filter(|b| b.is_active()).count()
    }

    /// Re-lay every brick for a new field width. Grid indices, vertical
    /// placement, health and status are left alone.
    pub fn resize(&mut self, field_width: f32, layout: &GridLayout) {
        let width = layout.brick_width(field_width);
        for brick in &mut self.bricks {
            brick.rect.width = width;
            brick.rect.x = layout.offset_left + brick.column as f32 * (width + layout.padding);
        }
    }
}

/// Build the grid for `depth`
pub fn generate(depth: u32, layout: &GridLayout, field_width: f32, rng: &mut impl Rng) -> BrickGrid {
    let rows = layout.rows_for_depth(depth);
    let columns = layout.columns;
    let width = layout.brick_width(field_width);
    let depth_bonus = depth / 3;

    let mut bricks = Vec::with_capacity(columns * rows);
    for column in 0..columns {
        for row in 0..rows {
            let asset_index = assets::asset_index(column, row, depth);
            let asset = assets::asset(asset_index);

            let mut health = asset.base_health + depth_bonus;
            if depth > layout.tough_depth && rng.random_bool(layout.tough_chance) {
                health += 1;
            }

            let rect = Rect::new(
                layout.offset_left + column as f32 * (width + layout.padding),
                layout.offset_top + row as f32 * (layout.brick_height + layout.padding),
                width,
                layout.brick_height,
            );

            bricks.push(Brick {
                column,
                row,
                rect,
                asset_index,
                health,
                initial_health: health,
                status: BrickStatus::Active,
            });
        }
    }

    log::debug!("Depth {}: {} x {} bricks, width {:.1}", depth, columns, rows, width);

    BrickGrid {
        columns,
        rows,
        bricks,
    }
}

//! Plain-text pictures of 2-D slices.

use ndca_core::Coord;
use ndca_space::{Grid, GridError};

/// Render the `z = 0` plane (axes 0 and 1) of `grid`, one line per row.
///
/// A 1-D grid renders as a single line.
///
/// # Examples
///
/// ```
/// use ndca_core::{Coord, Dimension};
/// use ndca_space::Grid;
/// use ndca_rules::render::render_plane;
///
/// let mut grid = Grid::new(vec![Dimension::new(3), Dimension::new(2)], 0u8).unwrap();
/// grid.set_cell_value(&Coord::from([1, 1]), 1).unwrap();
/// grid.update_grid_states();
/// let text = render_plane(&grid, |s| if *s == 1 { '#' } else { '.' }).unwrap();
/// assert_eq!(text, "...\n.#.");
/// ```
pub fn render_plane<S, F>(grid: &Grid<S>, glyph: F) -> Result<String, GridError>
where
    F: FnMut(&S) -> char,
{
    render_plane_at(grid, &Coord::ORIGIN, glyph)
}

/// Render the plane through `base` spanned by axes 0 and 1.
///
/// Only the axes past 1 of `base` matter; they pick the slice.
pub fn render_plane_at<S, F>(grid: &Grid<S>, base: &Coord, mut glyph: F) -> Result<String, GridError>
where
    F: FnMut(&S) -> char,
{
    let dims = grid.dimensions();
    let width = dims.first().map_or(0, |d| d.size) as i32;
    let height = dims.get(1).map_or(1, |d| d.size) as i32;

    let mut out = String::with_capacity(((width + 1) * height) as usize);
    for y in 0..height {
        if y > 0 {
            out.push('\n');
        }
        for x in 0..width {
            let mut position = base.with_element(0, x)?;
            if dims.len() > 1 {
                position = position.with_element(1, y)?;
            }
            let id = grid.check_bounds(&position)?;
            out.push(glyph(grid[id].state()));
        }
    }
    Ok(out)
}

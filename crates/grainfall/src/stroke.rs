//! Grid lines for brush strokes

use glam::IVec2;

/// Grid cells on the line from `from` to `to`, both included
pub fn line_cells(from: IVec2, to: IVec2) -> Vec<IVec2> {
    let mut cells: Vec<IVec2> = bresenham::Bresenham::new(
        (from.x as isize, from.y as isize),
        (to.x as isize, to.y as isize),
    )
    .map(|(x, y)| IVec2::new(x as i32, y as i32))
    .collect();
    cells.push(to);
    cells
}

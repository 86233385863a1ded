use crate::types::{GridBounds, Shape};

const LABELS: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";
const FREE: char = '.';

pub fn label(index: usize) -> char {
    LABELS[index % LABELS.len()] as char
}

/// Draws the grid one character per cell inside a `+--+` border. Shape `i`
/// is filled with `label(i)`, free cells with `.`.
pub fn render_grid<S: Shape>(shapes: &[S], bounds: GridBounds) -> String {
    let w = bounds.width as usize;
    let h = bounds.height as usize;
    let mut grid = vec![vec![FREE; w]; h];

    for (i, shape) in shapes.iter().enumerate() {
        let r = shape.rect();
        let x_end = (r.right() as usize).min(w);
        let y_end = (r.bottom() as usize).min(h);
        for row in grid.iter_mut().take(y_end).skip(r.y as usize) {
            for cell in row.iter_mut().take(x_end).skip(r.x as usize) {
                *cell = label(i);
            }
        }
    }

    let border = format!("+{}+\n", "-".repeat(w));
    let mut result = border.clone();
    for row in &grid {
        result.push('|');
        result.extend(row.iter());
        result.push_str("|\n");
    }
    result.push_str(&border);
    result
}

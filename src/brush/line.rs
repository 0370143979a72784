//! Integer line tracing between grid cells.

/// Bresenham's line algorithm. Calls `on_cell` once for every cell from
/// (x0, y0) to (x1, y1), both endpoints included.
pub fn trace_line<F>(x0: i32, y0: i32, x1: i32, y1: i32, mut on_cell: F)
where
    F: FnMut(i32, i32),
{
    let dx = (x1 - x0).abs();
    let dy = -(y1 - y0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    let mut x = x0;
    let mut y = y0;

    loop {
        on_cell(x, y);

        if x == x1 && y == y1 {
            break;
        }

        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x += sx;
        }
        if e2 <= dx {
            err += dx;
            y += sy;
        }
    }
}

/// Collect the cells `trace_line` visits.
pub fn line_cells(x0: i32, y0: i32, x1: i32, y1: i32) -> Vec<(i32, i32)> {
    let mut cells = Vec::new();
    trace_line(x0, y0, x1, y1, |x, y| cells.push((x, y)));
    cells
}

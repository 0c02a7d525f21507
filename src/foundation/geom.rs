use crate::foundation::core::DeviceRect;

const LEFT: u8 = 1;
const RIGHT: u8 = 2;
const BOTTOM: u8 = 4;
const TOP: u8 = 8;

fn outcode(w: DeviceRect, x: i64, y: i64) -> u8 {
    let mut code = 0;
    if x < i64::from(w.xmin) {
        code |= LEFT;
    } else if x > i64::from(w.xmax) {
        code |= RIGHT;
    }
    if y < i64::from(w.ymin) {
        code |= BOTTOM;
    } else if y > i64::from(w.ymax) {
        code |= TOP;
    }
    code
}

/// Clip a segment to `window` (Cohen-Sutherland, integer device units).
///
/// Returns `None` when no part of the segment lies inside the window.
pub(crate) fn clip_segment(
    window: DeviceRect,
    (x1, y1): (i32, i32),
    (x2, y2): (i32, i32),
) -> Option<((i32, i32), (i32, i32))> {
    let (mut ax, mut ay) = (i64::from(x1), i64::from(y1));
    let (mut bx, mut by) = (i64::from(x2), i64::from(y2));
    let (xmin, xmax) = (i64::from(window.xmin), i64::from(window.xmax));
    let (ymin, ymax) = (i64::from(window.ymin), i64::from(window.ymax));

    // Each pass pins one coordinate of one endpoint onto an edge.
    for _ in 0..8 {
        let ca = outcode(window, ax, ay);
        let cb = outcode(window, bx, by);
        if ca | cb == 0 {
            return Some(((ax as i32, ay as i32), (bx as i32, by as i32)));
        }
        if ca & cb != 0 {
            return None;
        }

        let out = if ca != 0 { ca } else { cb };
        let (x, y) = if out & TOP != 0 {
            (ax + (bx - ax) * (ymax - ay) / (by - ay), ymax)
        } else if out & BOTTOM != 0 {
            (ax + (bx - ax) * (ymin - ay) / (by - ay), ymin)
        } else if out & RIGHT != 0 {
            (xmax, ay + (by - ay) * (xmax - ax) / (bx - ax))
        } else {
            (xmin, ay + (by - ay) * (xmin - ax) / (bx - ax))
        };

        if out == ca {
            ax = x;
            ay = y;
        } else {
            bx = x;
            by = y;
        }
    }
    None
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/geom.rs"]
mod tests;

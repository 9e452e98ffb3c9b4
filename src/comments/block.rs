use std::cmp::Ordering;

use super::line::Line;

/// Consecutive lines believed to belong to one author's post.
///
/// Always non-empty. The first line is the author handle.
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    lines: Vec<Line>,
}

impl Block {
    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    /// The topmost line, read as the author handle.
    pub fn head(&self) -> &Line {
        &self.lines[0]
    }

    /// Every line after the head.
    pub fn body(&self) -> &[Line] {
        &self.lines[1..]
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// Sorts lines into reading order: top-y first, left-x to break ties.
///
/// Coordinates compare numerically, so `-0.0` and `0.0` are the same row.
pub fn sort_reading_order(lines: &mut [Line]) {
    lines.sort_by(|a, b| {
        compare_coord(a.top_y, b.top_y).then_with(|| compare_coord(a.left_x, b.left_x))
    });
}

fn compare_coord(a: f64, b: f64) -> Ordering {
    a.partial_cmp(&b).unwrap_or(Ordering::Equal)
}

/// Splits lines into blocks wherever the step from one line's top-y to the
/// next exceeds `line_gap`.
///
/// The step is measured against the immediately preceding line, not the
/// first line of the block, so a long comment may span any height as long as
/// its lines stay close together.
pub fn segment_blocks(mut lines: Vec<Line>, line_gap: f64) -> Vec<Block> {
    sort_reading_order(&mut lines);

    let mut blocks = Vec::new();
    let mut open: Vec<Line> = Vec::new();
    let mut last_top_y: Option<f64> = None;

    for line in lines {
        if matches!(last_top_y, Some(last) if line.top_y - last > line_gap) {
            blocks.push(Block {
                lines: std::mem::take(&mut open),
            });
        }
        last_top_y = Some(line.top_y);
        open.push(line);
    }

    if !open.is_empty() {
        blocks.push(Block { lines: open });
    }

    blocks
}

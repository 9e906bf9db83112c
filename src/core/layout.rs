//! Justified thumbnail layout.
//!
//! Images are packed into rows of a nominal height. A row is closed as soon
//! as its images, at nominal height, are at least as wide as the container;
//! it is then scaled so it fits the width exactly. What happens to the last,
//! unfilled row depends on [`LastRow`].

use serde::Deserialize;

/// Treatment of the last row when it does not fill the width.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LastRow {
    /// Drop it, unless it is the only row.
    #[default]
    Hide,
    /// Keep it at nominal height, left-aligned.
    Nojustify,
    /// Stretch it to the full width like other rows.
    Justify,
}

/// Layout parameters, in CSS pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayoutOptions {
    pub container_width: f64,
    pub row_height: f64,
    /// Gap between thumbnails.
    pub margins: f64,
    /// Padding around the whole grid.
    pub border: f64,
    pub last_row: LastRow,
}

/// Position of one thumbnail.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tile {
    /// Index into the input list.
    pub index: usize,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Result of a layout pass.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Layout {
    pub tiles: Vec<Tile>,
    /// Total height including borders.
    pub height: f64,
}

impl Layout {
    /// Tile for input `index`, if it was placed.
    #[cfg(test)]
    pub fn tile(&self, index: usize) -> Option<&Tile> {
        self.tiles.iter().find(|t| t.index == index)
    }
}

/// Lay out images with the given width/height ratios.
pub fn justify(aspect_ratios: &[f64], options: &LayoutOptions) -> Layout {
    let available = options.container_width - 2.0 * options.border;
    if aspect_ratios.is_empty() || available <= 0.0 || options.row_height <= 0.0 {
        return Layout::default();
    }

    let mut tiles = Vec::with_capacity(aspect_ratios.len());
    let mut y = options.border;
    let mut row: Vec<usize> = Vec::new();
    let mut row_count = 0;

    for (index, _) in aspect_ratios.iter().enumerate() {
        row.push(index);
        let ratio_sum: f64 = row.iter().map(|&i| sanitize(aspect_ratios[i])).sum();
        let gaps = options.margins * (row.len() - 1) as f64;

        if ratio_sum * options.row_height + gaps >= available {
            let height = (available - gaps) / ratio_sum;
            place_row(&row, aspect_ratios, height, y, options, &mut tiles);
            y += height + options.margins;
            row_count += 1;
            row.clear();
        }
    }

    if !row.is_empty() {
        let ratio_sum: f64 = row.iter().map(|&i| sanitize(aspect_ratios[i])).sum();
        let gaps = options.margins * (row.len() - 1) as f64;

        let height = match options.last_row {
            LastRow::Hide if row_count > 0 => None,
            LastRow::Justify => Some((available - gaps) / ratio_sum),
            LastRow::Hide | LastRow::Nojustify => Some(options.row_height),
        };

        if let Some(height) = height {
            place_row(&row, aspect_ratios, height, y, options, &mut tiles);
            y += height + options.margins;
        }
    }

    let height = if tiles.is_empty() {
        0.0
    } else {
        y - options.margins + options.border
    };

    Layout { tiles, height }
}

fn place_row(
    row: &[usize],
    aspect_ratios: &[f64],
    height: f64,
    y: f64,
    options: &LayoutOptions,
    tiles: &mut Vec<Tile>,
) {
    let mut x = options.border;
    for &index in row {
        let width = sanitize(aspect_ratios[index]) * height;
        tiles.push(Tile {
            index,
            x,
            y,
            width,
            height,
        });
        x += width + options.margins;
    }
}

/// Non-finite or non-positive ratios render square.
fn sanitize(ratio: f64) -> f64 {
    if ratio.is_finite() && ratio > 0.0 {
        ratio
    } else {
        1.0
    }
}

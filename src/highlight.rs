use crate::association::AssociationTable;
use crate::color::{self, Rgb};
use crate::shape::ShapeParams;

/// What the user is pointing at, if anything. Owned and mutated only
/// by the focus controller; the engine just reads it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    None,
    Input { row: usize, col: usize },
    Weight { row: usize, col: usize },
    Output { row: usize, col: usize },
}

/// Output coordinate the cycling animation currently highlights.
/// Row-major, wrapping back to (0, 0) after the last cell.
pub fn animated_cell(tick: u64, output_height: usize, output_width: usize) -> (usize, usize) {
    assert!(
        output_height > 0 && output_width > 0,
        "Animated cell needs at least one output cell to cycle through."
    );

    let flat = (tick % (output_height * output_width) as u64) as usize;
    (flat / output_width, flat % output_width)
}

/// Total per-cell color assignment for one matrix. `None` is
/// transparent (render as background), a first-class value rather than
/// an error; querying outside the matrix is a programmer error and
/// asserts.
#[derive(Debug, Clone, PartialEq)]
pub struct Colorizer {
    height: usize,
    width: usize,
    cells: Vec<Option<Rgb>>,
}

impl Colorizer {
    fn from_fn(height: usize, width: usize, f: impl Fn(usize, usize) -> Option<Rgb>) -> Self {
        let mut cells = Vec::with_capacity(height * width);
        for row in 0..height {
            for col in 0..width {
                cells.push(f(row, col));
            }
        }

        Self {
            height,
            width,
            cells,
        }
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn at(&self, row: usize, col: usize) -> Option<Rgb> {
        assert!(
            row < self.height && col < self.width,
            "Colorizer queried outside its matrix."
        );
        self.cells[row * self.width + col]
    }
}

/// The three per-matrix colorizers derived for one (focus, tick)
/// state. Transient: recomputed whenever focus, tick, or shape change.
#[derive(Debug, Clone, PartialEq)]
pub struct Colorizers {
    pub input: Colorizer,
    pub weight: Colorizer,
    pub output: Colorizer,
}

// Highlight constants. The engine owns amounts, not hues; hue choices
// live in the color module.
const NEUTRAL_HIGHLIGHT: Rgb = Rgb::new(102.0, 102.0, 102.0);
const SHADOW_WHITEN: f32 = 0.8;
const STENCIL_OVERLAP_WHITEN: f32 = 0.2;
const CONTRIBUTION_DARKEN: f32 = 1.0;
const PADDING_DARKEN: f32 = 2.5;

// Focus after resolution: hovering nothing acts like hovering the
// animated output cell, and hovering the input snaps to the output
// whose stencil corner sits under the cursor. Only two cases remain.
enum Resolved {
    Output { row: usize, col: usize },
    Weight { row: usize, col: usize },
}

fn resolve(params: &ShapeParams, table: &AssociationTable, focus: Focus, animated: (usize, usize)) -> Resolved {
    match focus {
        Focus::None => Resolved::Output {
            row: animated.0,
            col: animated.1,
        },
        Focus::Input { row, col } => Resolved::Output {
            row: (row / params.stride_height).min(table.output_height() - 1),
            col: (col / params.stride_width).min(table.output_width() - 1),
        },
        Focus::Output { row, col } => Resolved::Output { row, col },
        Focus::Weight { row, col } => Resolved::Weight { row, col },
    }
}

/// Cells in the zero-padding border get a strong uniform darkening on
/// top of whatever the branch produced; transparent counts as white
/// there, so the border is visible even where nothing is highlighted.
fn padding_border(params: &ShapeParams, row: usize, col: usize, base: Option<Rgb>) -> Option<Rgb> {
    let pad = params.padding;
    let inside = row >= pad
        && row < params.input_height + pad
        && col >= pad
        && col < params.input_width + pad;
    if inside {
        return base;
    }

    Some(color::darken(base.unwrap_or(Rgb::WHITE), PADDING_DARKEN))
}

/// Derives the three colorizers for one complete engine state. Pure:
/// same arguments, same grids. The table must have been built from
/// `params`.
pub fn compute_colorizers(
    params: &ShapeParams,
    table: &AssociationTable,
    focus: Focus,
    tick: u64,
) -> Colorizers {
    debug_assert_eq!(table.padded_input_width(), params.padded_input_width());

    let animated = animated_cell(tick, table.output_height(), table.output_width());

    match resolve(params, table, focus, animated) {
        Resolved::Output { row, col } => output_focus(params, table, (row, col), animated),
        Resolved::Weight { row, col } => weight_focus(params, table, (row, col), animated),
    }
}

/// Hovering an output cell (directly, via the input snap, or because
/// the animation stands in for an absent hover).
fn output_focus(
    params: &ShapeParams,
    table: &AssociationTable,
    hover: (usize, usize),
    animated: (usize, usize),
) -> Colorizers {
    let weight_height = table.weight_height();
    let weight_width = table.weight_width();
    let padded_width = table.padded_input_width();

    let hovered_map = table.input_multiplies_with_weight(hover.0, hover.1);
    let animated_map = table.input_multiplies_with_weight(animated.0, animated.1);

    // Receptive field of the hovered output, each input painted with
    // the color of the weight it is multiplied against; the animated
    // stencil trails behind as a whitened shadow.
    let input = Colorizer::from_fn(
        table.padded_input_height(),
        padded_width,
        |row, col| {
            let flat = row * padded_width + col;
            let base = if let Some((k_r, k_c)) = hovered_map[flat] {
                Some(color::kernel_color(k_r, k_c, weight_height, weight_width))
            } else if let Some((k_r, k_c)) = animated_map[flat] {
                Some(color::toward_white(
                    color::kernel_color(k_r, k_c, weight_height, weight_width),
                    SHADOW_WHITEN,
                ))
            } else {
                None
            };

            padding_border(params, row, col, base)
        },
    );

    // Full palette: every weight participates in the hovered output.
    let weight = Colorizer::from_fn(weight_height, weight_width, |row, col| {
        Some(color::kernel_color(row, col, weight_height, weight_width))
    });

    let output = Colorizer::from_fn(table.output_height(), table.output_width(), |row, col| {
        if (row, col) == hover {
            Some(NEUTRAL_HIGHLIGHT)
        } else if (row, col) == animated {
            Some(color::toward_white(NEUTRAL_HIGHLIGHT, SHADOW_WHITEN))
        } else {
            None
        }
    });

    Colorizers {
        input,
        weight,
        output,
    }
}

/// Hovering a weight cell: everything the hovered weight touches is
/// painted in that weight's color, with the animated stencil layered
/// on top of it.
fn weight_focus(
    params: &ShapeParams,
    table: &AssociationTable,
    hover: (usize, usize),
    animated: (usize, usize),
) -> Colorizers {
    let weight_height = table.weight_height();
    let weight_width = table.weight_width();
    let padded_width = table.padded_input_width();

    let base = color::kernel_color(hover.0, hover.1, weight_height, weight_width);
    let produces = table.input_produces_output(hover.0, hover.1);
    let animated_map = table.input_multiplies_with_weight(animated.0, animated.1);

    let weight = Colorizer::from_fn(weight_height, weight_width, |row, col| {
        if (row, col) == hover {
            Some(base)
        } else {
            None
        }
    });

    let input = Colorizer::from_fn(
        table.padded_input_height(),
        padded_width,
        |row, col| {
            let flat = row * padded_width + col;
            let stencil = animated_map[flat];

            let cell = if stencil == Some(hover) {
                // The one input the hovered weight multiplies to
                // produce the animated output: the animation's current
                // contribution to the solid block.
                Some(color::darken(base, CONTRIBUTION_DARKEN))
            } else if produces[flat].is_some() {
                if stencil.is_some() {
                    // Inside the solid block and under the stencil via
                    // some other weight; lighten so the stencil reads.
                    Some(color::toward_white(base, STENCIL_OVERLAP_WHITEN))
                } else {
                    Some(base)
                }
            } else if let Some((k_r, k_c)) = stencil {
                // Stencil outside the solid block: faint shadow.
                Some(color::toward_white(
                    color::kernel_color(k_r, k_c, weight_height, weight_width),
                    SHADOW_WHITEN,
                ))
            } else {
                None
            };

            padding_border(params, row, col, cell)
        },
    );

    // Every output is touched by every weight, so the whole matrix
    // carries the hovered weight's color, animated cell darkened.
    let output = Colorizer::from_fn(table.output_height(), table.output_width(), |row, col| {
        if (row, col) == animated {
            Some(color::darken(base, CONTRIBUTION_DARKEN))
        } else {
            Some(base)
        }
    });

    Colorizers {
        input,
        weight,
        output,
    }
}

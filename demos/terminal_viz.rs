use colored::Colorize;

use convviz::association::AssociationTable;
use convviz::focus::{FocusController, MatrixKind};
use convviz::highlight::{Colorizer, Colorizers};
use convviz::shape::{ParamRanges, ShapeParams};

/// Renders one colorizer grid as two-character truecolor cells.
fn print_grid(label: &str, grid: &Colorizer) {
    println!("{}", label.bold());
    for row in 0..grid.height() {
        for col in 0..grid.width() {
            match grid.at(row, col) {
                Some(color) => {
                    let [r, g, b] = color.to_bytes();
                    print!("{}", "  ".on_truecolor(r, g, b));
                }
                None => print!("{}", "  ".on_truecolor(245, 245, 245)),
            }
        }
        println!();
    }
    println!();
}

fn print_state(grids: &Colorizers) {
    print_grid("input", &grids.input);
    print_grid("weight", &grids.weight);
    print_grid("output", &grids.output);
}

fn main() {
    let params = ShapeParams::square(5, 3, 1, 1, 1);
    let table = AssociationTable::build(&params).expect("demo parameters are valid");
    let mut controller = FocusController::new();

    let ranges = ParamRanges::derive(&params, 16);
    println!(
        "{}",
        format!(
            "input 5x5, weight 3x3, padding 1 (kernel may grow to {}x{})",
            ranges.weight_height_max, ranges.weight_width_max
        )
        .bright_magenta()
    );
    println!();

    // A few animation frames with nothing hovered: the stencil walks
    // the output in row-major order.
    for frame in 0..3 {
        println!("{}", format!("-- idle, tick {frame} --").bright_cyan());
        print_state(&controller.colorizers(&params, &table));
        controller.on_tick();
    }

    // Hover a weight entry: solid block on the input, full output.
    controller.on_enter(MatrixKind::Weight, 1, 2);
    println!("{}", "-- hovering weight (1, 2) --".bright_cyan());
    print_state(&controller.colorizers(&params, &table));

    // Hover an input cell: snaps to the output under the stencil corner.
    controller.on_enter(MatrixKind::Input, 3, 3);
    println!("{}", "-- hovering input (3, 3) --".bright_cyan());
    print_state(&controller.colorizers(&params, &table));

    controller.on_leave();
    println!("{}", "-- idle again --".bright_cyan());
    print_state(&controller.colorizers(&params, &table));
}

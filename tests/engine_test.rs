use colored::Colorize;
use rand_distr::{Distribution, Uniform};

use convviz::association::AssociationTable;
use convviz::color::{self, Rgb};
use convviz::error::Error;
use convviz::focus::{FocusController, MatrixKind};
use convviz::highlight::{animated_cell, compute_colorizers, Focus};
use convviz::shape::{max_while, output_size, params_ok, ShapeParams};

#[test]
fn test_output_size_formula_cases() {
    assert_eq!(output_size(5, 3, 0, 1, 1), 3);
    assert_eq!(output_size(5, 3, 1, 1, 1), 5);
    assert_eq!(output_size(7, 3, 0, 2, 1), 3);
}

#[test]
fn test_kernel_size_bound_search() {
    // For input 5 with no padding, unit dilation and stride, kernel
    // sizes 1..=5 are the valid ones.
    let actual = max_while(1, 100, |x| params_ok(5, x as usize, 0, 1, 1));
    let expected = 5;
    assert_eq!(actual, expected);
}

#[test]
fn test_association_totality() {
    let params = ShapeParams::square(5, 3, 0, 1, 1);
    let table = AssociationTable::build(&params).unwrap();

    assert_eq!(table.len(), 81);
    for out_r in 0..table.output_height() {
        for out_c in 0..table.output_width() {
            for k_r in 0..table.weight_height() {
                for k_c in 0..table.weight_width() {
                    let flat = table.input_index(out_r, out_c, k_r, k_c);
                    assert!(flat < 25);
                }
            }
        }
    }
}

#[test]
fn test_derived_map_round_trip() {
    let params = ShapeParams::square(5, 3, 0, 1, 1);
    let table = AssociationTable::build(&params).unwrap();

    for out_r in 0..table.output_height() {
        for out_c in 0..table.output_width() {
            let map = table.input_multiplies_with_weight(out_r, out_c);

            // No loss, no duplication: exactly the 9 kernel entries,
            // and inverting through the table lands on the same flat
            // index the map was keyed by.
            let touched = map.iter().filter(|entry| entry.is_some()).count();
            assert_eq!(touched, 9);
            for (flat, entry) in map.iter().enumerate() {
                if let Some((k_r, k_c)) = entry {
                    assert_eq!(table.input_index(out_r, out_c, *k_r, *k_c), flat);
                }
            }
        }
    }
}

#[test]
fn test_input_hover_resolution() {
    let params = ShapeParams::square(7, 3, 1, 1, 2);
    let table = AssociationTable::build(&params).unwrap();
    let output_height = table.output_height();
    let output_width = table.output_width();

    // Hovering any padded-input cell behaves exactly like hovering the
    // output whose stencil corner sits under the cursor, clamped to
    // the last output cell.
    for row in 0..table.padded_input_height() {
        for col in 0..table.padded_input_width() {
            let snapped =
                compute_colorizers(&params, &table, Focus::Input { row, col }, 3);
            let resolved_row = (row / params.stride_height).min(output_height - 1);
            let resolved_col = (col / params.stride_width).min(output_width - 1);
            let direct = compute_colorizers(
                &params,
                &table,
                Focus::Output {
                    row: resolved_row,
                    col: resolved_col,
                },
                3,
            );
            assert_eq!(snapped, direct);
        }
    }
}

#[test]
fn test_animation_wraps_after_last_cell() {
    assert_eq!(animated_cell(9, 3, 3), (0, 0));
    assert_eq!(animated_cell(10, 3, 3), (0, 1));

    // A full cycle of ticks lands the controller back on the state it
    // started from.
    let params = ShapeParams::square(5, 3, 0, 1, 1);
    let table = AssociationTable::build(&params).unwrap();

    let mut controller = FocusController::new();
    let start = controller.colorizers(&params, &table);
    for _ in 0..9 {
        controller.on_tick();
    }
    let wrapped = controller.colorizers(&params, &table);
    assert_eq!(start, wrapped);
}

#[test]
fn test_padding_border_darkens_for_every_focus() {
    let params = ShapeParams::square(5, 3, 1, 1, 1);
    let table = AssociationTable::build(&params).unwrap();

    let focuses = [
        Focus::None,
        Focus::Output { row: 0, col: 0 },
        Focus::Weight { row: 1, col: 1 },
        Focus::Input { row: 0, col: 0 },
    ];

    // Channel-wise strictly-darker, for bases with no zero channel.
    fn darker_than(cell: Rgb, base: Rgb) -> bool {
        cell.r < base.r && cell.g < base.g && cell.b < base.b
    }

    for focus in focuses {
        let grids = compute_colorizers(&params, &table, focus, 0);

        // (0, 0) sits in the zero border, so it is never transparent
        // and always strictly darker than the base color its branch
        // produced. At tick 0 the animated output is (0, 0), whose
        // stencil covers input (0, 0) through kernel entry (0, 0); the
        // three output-resolved focuses paint it with that kernel
        // color, the weight hover shadows it toward white first.
        let cell = grids
            .input
            .at(0, 0)
            .expect("border cells are never transparent");
        let branch_base = match focus {
            Focus::Weight { .. } => {
                color::toward_white(color::kernel_color(0, 0, 3, 3), 0.8)
            }
            _ => color::kernel_color(0, 0, 3, 3),
        };
        assert!(darker_than(cell, branch_base));

        // A border cell no highlight reaches is darkened white, never
        // transparent.
        let far_corner = grids
            .input
            .at(6, 6)
            .expect("border cells are never transparent");
        assert!(darker_than(far_corner, Rgb::WHITE));
    }
}

#[test]
fn test_idle_state_follows_animation() {
    let params = ShapeParams::square(5, 3, 0, 1, 1);
    let table = AssociationTable::build(&params).unwrap();

    for tick in 0..18 {
        let idle = compute_colorizers(&params, &table, Focus::None, tick);
        let animated = animated_cell(tick, 3, 3);
        let hovered = compute_colorizers(
            &params,
            &table,
            Focus::Output {
                row: animated.0,
                col: animated.1,
            },
            tick,
        );
        assert_eq!(idle, hovered);
    }
}

#[test]
fn test_controller_drives_the_whole_pipeline() {
    let params = ShapeParams::square(5, 3, 0, 1, 1);
    let table = AssociationTable::build(&params).unwrap();
    let mut controller = FocusController::new();

    controller.on_enter(MatrixKind::Weight, 2, 0);
    controller.on_tick();
    let grids = controller.colorizers(&params, &table);

    let base = color::kernel_color(2, 0, 3, 3);
    assert_eq!(grids.weight.at(2, 0), Some(base));
    assert_eq!(grids.weight.at(0, 0), None);

    // Every output carries the hovered weight's color.
    for out_r in 0..3 {
        for out_c in 0..3 {
            assert!(grids.output.at(out_r, out_c).is_some());
        }
    }

    controller.on_leave();
    let grids = controller.colorizers(&params, &table);
    let expected = compute_colorizers(&params, &table, Focus::None, 1);
    assert_eq!(grids, expected);
}

#[test]
fn test_invalid_shape_is_rejected() {
    let params = ShapeParams::square(2, 5, 0, 1, 1);

    let actual = AssociationTable::build(&params);
    assert!(matches!(actual, Err(Error::InvalidShape { .. })));
}

#[test]
fn test_shape_params_flat_round_trip() {
    let params = ShapeParams {
        input_height: 6,
        input_width: 5,
        weight_height: 3,
        weight_width: 2,
        padding: 1,
        dilation: 2,
        stride_height: 1,
        stride_width: 2,
    };

    let serialized = serde_json::to_string(&params).unwrap();
    let restored: ShapeParams = serde_json::from_str(&serialized).unwrap();
    assert_eq!(restored, params);
}

#[test]
fn test_random_shapes_build_total_tables() {
    let mut rng = rand::thread_rng();
    let sizes = Uniform::new_inclusive(1usize, 8);
    let kernels = Uniform::new_inclusive(1usize, 5);
    let paddings = Uniform::new_inclusive(0usize, 2);
    let dilations = Uniform::new_inclusive(1usize, 2);
    let strides = Uniform::new_inclusive(1usize, 3);

    let mut checked = 0;
    while checked < 50 {
        let params = ShapeParams {
            input_height: sizes.sample(&mut rng),
            input_width: sizes.sample(&mut rng),
            weight_height: kernels.sample(&mut rng),
            weight_width: kernels.sample(&mut rng),
            padding: paddings.sample(&mut rng),
            dilation: dilations.sample(&mut rng),
            stride_height: strides.sample(&mut rng),
            stride_width: strides.sample(&mut rng),
        };
        if !params.ok() {
            continue;
        }

        let table = AssociationTable::build(&params).unwrap();
        let expected_len = table.output_height()
            * table.output_width()
            * table.weight_height()
            * table.weight_width();
        assert_eq!(table.len(), expected_len);

        let padded_len = table.padded_input_len();
        for out_r in 0..table.output_height() {
            for out_c in 0..table.output_width() {
                for k_r in 0..table.weight_height() {
                    for k_c in 0..table.weight_width() {
                        assert!(table.input_index(out_r, out_c, k_r, k_c) < padded_len);
                    }
                }
            }
        }

        // The engine must be total for any valid shape and any state.
        let grids = compute_colorizers(&params, &table, Focus::None, checked as u64);
        assert_eq!(grids.input.height(), table.padded_input_height());
        assert_eq!(grids.input.width(), table.padded_input_width());

        checked += 1;
    }

    let msg = format!("checked {checked} random shapes").bright_magenta();
    println!("{msg}");
}

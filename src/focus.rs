use crate::association::AssociationTable;
use crate::highlight::{compute_colorizers, Colorizers, Focus};
use crate::shape::ShapeParams;

/// Which of the three matrices a pointer event refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatrixKind {
    Input,
    Weight,
    Output,
}

/// Owns the interaction state: the current hover focus and the
/// animation tick. Events arrive serially from the surrounding loop;
/// each one is a complete synchronous transition, and no transition is
/// ever rejected. Every (focus, tick) pair is a renderable state.
pub struct FocusController {
    focus: Focus,
    tick: u64,
}

impl FocusController {
    pub fn new() -> Self {
        Self {
            focus: Focus::None,
            tick: 0,
        }
    }

    pub fn focus(&self) -> Focus {
        self.focus
    }

    pub fn tick(&self) -> u64 {
        self.tick
    }

    /// Pointer entered a cell of one of the matrices.
    pub fn on_enter(&mut self, matrix: MatrixKind, row: usize, col: usize) {
        self.focus = match matrix {
            MatrixKind::Input => Focus::Input { row, col },
            MatrixKind::Weight => Focus::Weight { row, col },
            MatrixKind::Output => Focus::Output { row, col },
        };
    }

    /// Pointer left whatever cell it was over.
    pub fn on_leave(&mut self) {
        self.focus = Focus::None;
    }

    /// One period of the external timer elapsed. Wrapping into an
    /// output coordinate happens lazily when colorizers are derived,
    /// so the counter itself only ever grows.
    pub fn on_tick(&mut self) {
        self.tick += 1;
    }

    /// Derive the three colorizers for the current state. The animated
    /// shadow keeps moving while a cell is hovered, so callers rerun
    /// this on tick events too, not just on pointer events.
    pub fn colorizers(&self, params: &ShapeParams, table: &AssociationTable) -> Colorizers {
        compute_colorizers(params, table, self.focus, self.tick)
    }
}

impl Default for FocusController {
    fn default() -> Self {
        Self::new()
    }
}

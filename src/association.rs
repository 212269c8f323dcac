use crate::error::{Error, Result};
use crate::shape::ShapeParams;

/// Symbolic record of every multiply in the correlation: for each
/// (output cell, kernel offset) pair, the flat index of the padded
/// input cell that kernel entry reads. Stored as a flat arena indexed
/// by a computed offset, so lookup is O(1) and the table is total.
/// Padding is geometric here, never subtracted, so a referenced cell
/// may legitimately sit inside the zero border. Whether that matters
/// is a coloring concern, not a table concern.
///
/// Rebuilt whole on any parameter change; never patched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssociationTable {
    output_height: usize,
    output_width: usize,
    weight_height: usize,
    weight_width: usize,
    padded_input_height: usize,
    padded_input_width: usize,
    entries: Vec<usize>,
}

impl AssociationTable {
    /// Builds the table for the given parameters, failing when the
    /// derived output geometry has no cells.
    pub fn build(params: &ShapeParams) -> Result<Self> {
        let height = params.output_height();
        let width = params.output_width();
        if height < 1 || width < 1 {
            return Err(Error::InvalidShape { height, width });
        }

        let output_height = height as usize;
        let output_width = width as usize;
        let weight_height = params.weight_height;
        let weight_width = params.weight_width;
        let padded_input_width = params.padded_input_width();

        let mut entries =
            Vec::with_capacity(output_height * output_width * weight_height * weight_width);
        for out_r in 0..output_height {
            for out_c in 0..output_width {
                for k_r in 0..weight_height {
                    for k_c in 0..weight_width {
                        let input_row = out_r * params.stride_height + k_r * params.dilation;
                        let input_col = out_c * params.stride_width + k_c * params.dilation;
                        entries.push(input_row * padded_input_width + input_col);
                    }
                }
            }
        }

        Ok(Self {
            output_height,
            output_width,
            weight_height,
            weight_width,
            padded_input_height: params.padded_input_height(),
            padded_input_width,
            entries,
        })
    }

    pub fn output_height(&self) -> usize {
        self.output_height
    }

    pub fn output_width(&self) -> usize {
        self.output_width
    }

    pub fn weight_height(&self) -> usize {
        self.weight_height
    }

    pub fn weight_width(&self) -> usize {
        self.weight_width
    }

    pub fn padded_input_height(&self) -> usize {
        self.padded_input_height
    }

    pub fn padded_input_width(&self) -> usize {
        self.padded_input_width
    }

    /// Number of cells in the padded input, the domain of both derived maps.
    pub fn padded_input_len(&self) -> usize {
        self.padded_input_height * self.padded_input_width
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn offset(&self, out_r: usize, out_c: usize, k_r: usize, k_c: usize) -> usize {
        assert!(
            out_r < self.output_height && out_c < self.output_width,
            "Output coordinate out of range for association lookup."
        );
        assert!(
            k_r < self.weight_height && k_c < self.weight_width,
            "Kernel coordinate out of range for association lookup."
        );

        ((out_r * self.output_width + out_c) * self.weight_height + k_r) * self.weight_width + k_c
    }

    /// Flat padded-input index multiplied against kernel entry
    /// (`k_r`, `k_c`) to help produce output cell (`out_r`, `out_c`).
    pub fn input_index(&self, out_r: usize, out_c: usize, k_r: usize, k_c: usize) -> usize {
        self.entries[self.offset(out_r, out_c, k_r, k_c)]
    }

    /// For a single output cell: the kernel offset that touches each
    /// padded-input cell, indexed by flat input index. Each kernel
    /// offset lands on a distinct input cell per fixed output, so no
    /// entry is ever written twice.
    pub fn input_multiplies_with_weight(
        &self,
        out_r: usize,
        out_c: usize,
    ) -> Vec<Option<(usize, usize)>> {
        let mut map = vec![None; self.padded_input_len()];
        for k_r in 0..self.weight_height {
            for k_c in 0..self.weight_width {
                let flat = self.input_index(out_r, out_c, k_r, k_c);
                debug_assert!(
                    map[flat].is_none(),
                    "Two kernel offsets mapped to one input cell for a fixed output."
                );
                map[flat] = Some((k_r, k_c));
            }
        }

        map
    }

    /// For a single kernel offset: the output cell each padded-input
    /// cell helps produce through it, indexed by flat input index.
    /// Injective under stride >= 1; asserted rather than overwritten.
    pub fn input_produces_output(&self, k_r: usize, k_c: usize) -> Vec<Option<(usize, usize)>> {
        let mut map = vec![None; self.padded_input_len()];
        for out_r in 0..self.output_height {
            for out_c in 0..self.output_width {
                let flat = self.input_index(out_r, out_c, k_r, k_c);
                assert!(
                    map[flat].is_none(),
                    "Two outputs cannot share an input through the same weight entry."
                );
                map[flat] = Some((out_r, out_c));
            }
        }

        map
    }
}

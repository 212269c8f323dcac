use serde::{Deserialize, Serialize};

/// The classic convolution output size formula.
///
/// The numerator can go negative for degenerate parameter sets, and the
/// contract is a mathematical floor, so this divides with `div_euclid`
/// rather than `/` (which truncates toward zero and would misreport
/// validity for shapes like input 3, weight 4, stride 2).
pub fn output_size(
    input_size: usize,
    weight_size: usize,
    padding: usize,
    dilation: usize,
    stride: usize,
) -> i64 {
    assert!(stride > 0, "Stride must be positive to compute an output size.");

    let numerator = input_size as i64 + 2 * padding as i64
        - dilation as i64 * (weight_size as i64 - 1)
        - 1;
    numerator.div_euclid(stride as i64) + 1
}

/// Test if a set of parameters produces at least one output cell.
pub fn params_ok(
    input_size: usize,
    weight_size: usize,
    padding: usize,
    dilation: usize,
    stride: usize,
) -> bool {
    output_size(input_size, weight_size, padding, dilation, stride) > 0
}

/// Scanning upward from `start` to `end` inclusive, returns the last
/// integer for which `pred` held contiguously from `start`, or `end` if
/// it never failed. The scan stops at the first failure; a later true
/// after a false is never found.
pub fn max_while(start: i64, end: i64, pred: impl Fn(i64) -> bool) -> i64 {
    for i in start..=end {
        if pred(i) {
            continue;
        }
        return i - 1;
    }
    end
}

/// Downward counterpart of `max_while`: scanning from `start` down to
/// `end` inclusive, returns the smallest integer for which `pred` held
/// contiguously from `start`, or `end` if it never failed.
pub fn min_while(start: i64, end: i64, pred: impl Fn(i64) -> bool) -> i64 {
    for i in (end..=start).rev() {
        if pred(i) {
            continue;
        }
        return i + 1;
    }
    end
}

/// Full parameter set for a single-channel 2D cross-correlation, with
/// independent height/width axes for the kernel and the stride.
/// Validity is a predicate (`ok`), not enforced by construction; owners
/// revalidate on every edit and the engine never clamps.
///
/// Serde derives are for the persistence collaborator, which stores the
/// record flat between sessions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShapeParams {
    pub input_height: usize,
    pub input_width: usize,
    pub weight_height: usize,
    pub weight_width: usize,
    pub padding: usize,
    pub dilation: usize,
    pub stride_height: usize,
    pub stride_width: usize,
}

impl ShapeParams {
    /// Equal height/width on every axis, the common classroom case.
    pub fn square(
        input_size: usize,
        weight_size: usize,
        padding: usize,
        dilation: usize,
        stride: usize,
    ) -> Self {
        Self {
            input_height: input_size,
            input_width: input_size,
            weight_height: weight_size,
            weight_width: weight_size,
            padding,
            dilation,
            stride_height: stride,
            stride_width: stride,
        }
    }

    pub fn padded_input_height(&self) -> usize {
        self.input_height + 2 * self.padding
    }

    pub fn padded_input_width(&self) -> usize {
        self.input_width + 2 * self.padding
    }

    /// May be zero or negative; callers must check before building tables.
    pub fn output_height(&self) -> i64 {
        output_size(
            self.input_height,
            self.weight_height,
            self.padding,
            self.dilation,
            self.stride_height,
        )
    }

    pub fn output_width(&self) -> i64 {
        output_size(
            self.input_width,
            self.weight_width,
            self.padding,
            self.dilation,
            self.stride_width,
        )
    }

    /// Both axes must independently produce at least one output cell.
    pub fn ok(&self) -> bool {
        self.output_height() > 0 && self.output_width() > 0
    }
}

/// Legal bounds for every parameter with the other parameters held
/// fixed, derived with the boundary scans above. Consumed by the
/// numeric input collaborator; the engine owns no range state itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParamRanges {
    pub input_height_min: i64,
    pub input_width_min: i64,
    pub input_max: i64,
    pub weight_height_max: i64,
    pub weight_width_max: i64,
    pub padding_min: i64,
    pub padding_max: i64,
    pub dilation_max: i64,
    pub stride_height_max: i64,
    pub stride_width_max: i64,
}

impl ParamRanges {
    /// `max_input_size` is an aesthetic cap chosen by the owner, not a
    /// property of the arithmetic.
    pub fn derive(params: &ShapeParams, max_input_size: usize) -> Self {
        let p = *params;
        let max_input = max_input_size as i64;

        let input_height_min = min_while(max_input, 1, |x| {
            let mut q = p;
            q.input_height = x as usize;
            q.ok()
        });
        let input_width_min = min_while(max_input, 1, |x| {
            let mut q = p;
            q.input_width = x as usize;
            q.ok()
        });
        let weight_height_max = max_while(1, 100, |x| {
            let mut q = p;
            q.weight_height = x as usize;
            q.ok()
        });
        let weight_width_max = max_while(1, 100, |x| {
            let mut q = p;
            q.weight_width = x as usize;
            q.ok()
        });

        // Padding beyond dilation*(weight-1) only adds dead border, so
        // the cap is closed-form; the lower bound still needs a scan.
        let widest_kernel = p.weight_height.max(p.weight_width) as i64;
        let padding_max = p.dilation as i64 * (widest_kernel - 1);
        let padding_min = min_while(padding_max, 0, |x| {
            let mut q = p;
            q.padding = x as usize;
            q.ok()
        });

        let dilation_max = max_while(1, 100, |x| {
            let mut q = p;
            q.dilation = x as usize;
            q.ok()
        });

        let stride_height_max =
            (p.input_height as i64 - p.dilation as i64 * (p.weight_height as i64 - 1)).max(1);
        let stride_width_max =
            (p.input_width as i64 - p.dilation as i64 * (p.weight_width as i64 - 1)).max(1);

        Self {
            input_height_min,
            input_width_min,
            input_max: max_input,
            weight_height_max,
            weight_width_max,
            padding_min,
            padding_max,
            dilation_max,
            stride_height_max,
            stride_width_max,
        }
    }
}

//! Deterministic colors for kernel coordinates, plus the two transforms
//! the highlight engine layers on top of them.
//!
//! The 2D scale blends a red-to-blue row axis with a red-to-green
//! column axis in CIELAB, so neighboring kernel entries stay visually
//! far apart and everything stays saturated enough not to be confused
//! with the whitened animation shadows. The exact hues are not a
//! contract; determinism and separation are.

/// RGB color with f32 channels in 0..=255. Transform math stays in
/// floats; `to_bytes` rounds once at the rendering boundary.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Rgb {
    pub const WHITE: Rgb = Rgb::new(255.0, 255.0, 255.0);

    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Clamped, rounded channels for renderers that want bytes.
    pub fn to_bytes(&self) -> [u8; 3] {
        [
            self.r.clamp(0.0, 255.0).round() as u8,
            self.g.clamp(0.0, 255.0).round() as u8,
            self.b.clamp(0.0, 255.0).round() as u8,
        ]
    }
}

// Scale endpoints. The column end is the base green brightened one
// step (channels / 0.7) so the two axes diverge faster.
const ROW_START: Rgb = Rgb::new(215.0, 25.0, 28.0);
const ROW_END: Rgb = Rgb::new(44.0, 123.0, 182.0);
const COL_START: Rgb = Rgb::new(215.0, 25.0, 28.0);
const COL_END: Rgb = Rgb::new(37.0, 214.0, 93.0);

const DARKEN_BASE: f32 = 0.7;

/// Channel-scaling darken: every channel is multiplied by
/// `0.7^amount`. Identity at 0, monotonically darker as `amount` grows.
pub fn darken(color: Rgb, amount: f32) -> Rgb {
    let k = DARKEN_BASE.powf(amount);
    Rgb::new(color.r * k, color.g * k, color.b * k)
}

/// Linear RGB interpolation toward white; 0 is the color itself, 1 is
/// white.
pub fn toward_white(color: Rgb, fraction: f32) -> Rgb {
    lerp_rgb(color, Rgb::WHITE, fraction)
}

fn lerp_rgb(a: Rgb, b: Rgb, t: f32) -> Rgb {
    Rgb::new(
        a.r + (b.r - a.r) * t,
        a.g + (b.g - a.g) * t,
        a.b + (b.b - a.b) * t,
    )
}

/// Deterministic color for one kernel coordinate. Pure in the four
/// arguments; no hidden state.
///
/// Both axes map their coordinate into the open interior of their
/// scale (domain -1..=size), then the two axis colors are blended
/// along the anti-diagonal. The blend parameter runs outside 0..=1 in
/// the corners; Lab extrapolates linearly there and the sRGB
/// conversion clamps.
pub fn kernel_color(k_r: usize, k_c: usize, weight_height: usize, weight_width: usize) -> Rgb {
    assert!(
        k_r < weight_height && k_c < weight_width,
        "Kernel coordinate out of range for kernel_color."
    );

    let row = lerp_lab(ROW_START, ROW_END, (k_r + 1) as f32 / (weight_height + 1) as f32);
    let col = lerp_lab(COL_START, COL_END, (k_c + 1) as f32 / (weight_width + 1) as f32);

    let span = weight_height.max(weight_width);
    let t = if span > 1 {
        (k_c as f32 - k_r as f32) / (span - 1) as f32
    } else {
        // Single-cell kernel: nothing to spread across, sit midway.
        0.5
    };

    lerp_lab(row, col, t)
}

// CIELAB round trip (sRGB, D65 white point). Interpolating in Lab
// keeps perceived lightness changing evenly across the scale, which
// plain RGB lerp does not.

const WHITE_X: f32 = 0.95047;
const WHITE_Y: f32 = 1.0;
const WHITE_Z: f32 = 1.08883;

fn srgb_to_linear(c: f32) -> f32 {
    if c > 0.04045 {
        ((c + 0.055) / 1.055).powf(2.4)
    } else {
        c / 12.92
    }
}

fn linear_to_srgb(c: f32) -> f32 {
    if c > 0.003_130_8 {
        1.055 * c.powf(1.0 / 2.4) - 0.055
    } else {
        12.92 * c
    }
}

fn lab_f(t: f32) -> f32 {
    const DELTA: f32 = 6.0 / 29.0;
    if t > DELTA * DELTA * DELTA {
        t.cbrt()
    } else {
        t / (3.0 * DELTA * DELTA) + 4.0 / 29.0
    }
}

fn lab_f_inv(t: f32) -> f32 {
    const DELTA: f32 = 6.0 / 29.0;
    if t > DELTA {
        t * t * t
    } else {
        3.0 * DELTA * DELTA * (t - 4.0 / 29.0)
    }
}

fn rgb_to_lab(color: Rgb) -> [f32; 3] {
    let r = srgb_to_linear(color.r / 255.0);
    let g = srgb_to_linear(color.g / 255.0);
    let b = srgb_to_linear(color.b / 255.0);

    let x = 0.412_456_4 * r + 0.357_576_1 * g + 0.180_437_5 * b;
    let y = 0.212_672_9 * r + 0.715_152_2 * g + 0.072_175_0 * b;
    let z = 0.019_333_9 * r + 0.119_192_0 * g + 0.950_304_1 * b;

    let fx = lab_f(x / WHITE_X);
    let fy = lab_f(y / WHITE_Y);
    let fz = lab_f(z / WHITE_Z);

    [116.0 * fy - 16.0, 500.0 * (fx - fy), 200.0 * (fy - fz)]
}

fn lab_to_rgb(lab: [f32; 3]) -> Rgb {
    let fy = (lab[0] + 16.0) / 116.0;
    let fx = fy + lab[1] / 500.0;
    let fz = fy - lab[2] / 200.0;

    let x = WHITE_X * lab_f_inv(fx);
    let y = WHITE_Y * lab_f_inv(fy);
    let z = WHITE_Z * lab_f_inv(fz);

    let r = 3.240_454_2 * x - 1.537_138_5 * y - 0.498_531_4 * z;
    let g = -0.969_266_0 * x + 1.876_010_8 * y + 0.041_556_0 * z;
    let b = 0.055_643_4 * x - 0.204_025_9 * y + 1.057_225_2 * z;

    Rgb::new(
        (linear_to_srgb(r) * 255.0).clamp(0.0, 255.0),
        (linear_to_srgb(g) * 255.0).clamp(0.0, 255.0),
        (linear_to_srgb(b) * 255.0).clamp(0.0, 255.0),
    )
}

fn lerp_lab(a: Rgb, b: Rgb, t: f32) -> Rgb {
    let la = rgb_to_lab(a);
    let lb = rgb_to_lab(b);
    lab_to_rgb([
        la[0] + (lb[0] - la[0]) * t,
        la[1] + (lb[1] - la[1]) * t,
        la[2] + (lb[2] - la[2]) * t,
    ])
}

use crate::{FuzzyError, FuzzyResult, coeffs::Coefficients};

/// Applies the recursive approximate Gaussian blur to a straight RGBA8
/// buffer and returns the blurred copy.
///
/// R, G and B are filtered independently; alpha is passed through
/// bit-identical. Cost is O(width * height) regardless of `amount`.
/// A zero-area buffer or a non-positive `amount` returns the input
/// unchanged.
pub fn blur_rgba8(src: &[u8], width: u32, height: u32, amount: f64) -> FuzzyResult<Vec<u8>> {
    let expected_len = (width as usize)
        .checked_mul(height as usize)
        .and_then(|v| v.checked_mul(4))
        .ok_or_else(|| FuzzyError::evaluation("blur buffer size overflow"))?;
    if src.len() != expected_len {
        return Err(FuzzyError::validation(
            "blur_rgba8 expects src matching width*height*4",
        ));
    }
    if width == 0 || height == 0 || amount <= 0.0 {
        return Ok(src.to_vec());
    }

    let k = Coefficients::solve(amount);
    tracing::debug!(
        amount,
        b0 = k.b0,
        b1 = k.b1,
        b2 = k.b2,
        b3 = k.b3,
        "solved blur coefficients"
    );

    // Every intermediate stays in f64; quantization happens once on the
    // final write-back.
    let mut samples: Vec<f64> = src.iter().map(|&v| f64::from(v)).collect();
    horizontal_pass(&mut samples, width as usize, height as usize, k);
    vertical_pass(&mut samples, width as usize, height as usize, k);

    let mut out = src.to_vec();
    for (px, filtered) in out.chunks_exact_mut(4).zip(samples.chunks_exact(4)) {
        px[0] = quantize(filtered[0]);
        px[1] = quantize(filtered[1]);
        px[2] = quantize(filtered[2]);
        // px[3] keeps the source alpha byte.
    }
    Ok(out)
}

// Every row of every color channel finishes both sweep directions before the
// vertical stage starts; the vertical stage reads horizontally blurred data.
fn horizontal_pass(samples: &mut [f64], width: usize, height: usize, k: Coefficients) {
    let row = width * 4;
    for c in 0..3 {
        for y in 0..height {
            smooth_line(samples, y * row + c, width, 4, k);
        }
    }
}

fn vertical_pass(samples: &mut [f64], width: usize, height: usize, k: Coefficients) {
    let row = width * 4;
    for c in 0..3 {
        for x in 0..width {
            smooth_line(samples, x * 4 + c, height, row, k);
        }
    }
}

/// Forward then backward first-order-recursive sweep over one line of
/// samples, in place.
///
/// Histories start at the boundary sample, so the line behaves as if it
/// extended past each end with that value repeated (edge replication; zero
/// padding would darken the borders). The backward sweep seeds from the
/// already-forward-filtered last sample.
fn smooth_line(samples: &mut [f64], start: usize, len: usize, stride: usize, k: Coefficients) {
    let mut h1 = samples[start];
    let mut h2 = h1;
    let mut h3 = h1;
    for i in 0..len {
        let idx = start + i * stride;
        let out = k.b0 * samples[idx] + k.b1 * h1 + k.b2 * h2 + k.b3 * h3;
        samples[idx] = out;
        h3 = h2;
        h2 = h1;
        h1 = out;
    }

    let last = start + (len - 1) * stride;
    h1 = samples[last];
    h2 = h1;
    h3 = h1;
    for i in (0..len).rev() {
        let idx = start + i * stride;
        let out = k.b0 * samples[idx] + k.b1 * h1 + k.b2 * h2 + k.b3 * h3;
        samples[idx] = out;
        h3 = h2;
        h2 = h1;
        h1 = out;
    }
}

fn quantize(v: f64) -> u8 {
    v.round().clamp(0.0, 255.0) as u8
}

use std::{fs, io::Cursor, path::PathBuf};

use anyhow::Context as _;

use crate::{FuzzyError, FuzzyResult, blur_cpu::blur_rgba8};

/// Blur amount applied when the caller does not pick one.
pub const DEFAULT_AMOUNT: f64 = 15.0;

/// A decoded, blurred backdrop ready for encoding or display.
#[derive(Clone, Debug)]
pub struct Backdrop {
    pub width: u32,
    pub height: u32,
    pub rgba8: Vec<u8>,
}

/// Decodes an image from memory, blurs it and returns the backdrop buffer.
///
/// Any format the `image` crate can sniff is accepted.
#[tracing::instrument(skip(bytes))]
pub fn blur_image_bytes(bytes: &[u8], amount: f64) -> FuzzyResult<Backdrop> {
    let dyn_img = image::load_from_memory(bytes).context("decode image from memory")?;
    let rgba = dyn_img.to_rgba8();
    let (width, height) = rgba.dimensions();

    let rgba8 = blur_rgba8(rgba.as_raw(), width, height, amount)?;
    Ok(Backdrop {
        width,
        height,
        rgba8,
    })
}

pub fn encode_png(backdrop: &Backdrop) -> FuzzyResult<Vec<u8>> {
    let img = image::RgbaImage::from_raw(backdrop.width, backdrop.height, backdrop.rgba8.clone())
        .ok_or_else(|| FuzzyError::evaluation("backdrop buffer does not match its dimensions"))?;

    let mut out = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut out), image::ImageFormat::Png)
        .context("encode backdrop PNG")?;
    Ok(out)
}

/// One blur job: read `input`, blur by `amount`, write `output` as PNG.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct BackdropJob {
    pub input: PathBuf,
    pub output: PathBuf,
    #[serde(default = "default_amount")]
    pub amount: f64,
}

fn default_amount() -> f64 {
    DEFAULT_AMOUNT
}

impl BackdropJob {
    pub fn from_json_str(json: &str) -> FuzzyResult<Self> {
        let job: Self =
            serde_json::from_str(json).map_err(|e| FuzzyError::serde(format!("job JSON: {e}")))?;
        job.validate()?;
        Ok(job)
    }

    pub fn validate(&self) -> FuzzyResult<()> {
        if !self.amount.is_finite() || self.amount < 0.0 {
            return Err(FuzzyError::validation(
                "BackdropJob.amount must be finite and >= 0",
            ));
        }
        if self.input.as_os_str().is_empty() || self.output.as_os_str().is_empty() {
            return Err(FuzzyError::validation(
                "BackdropJob paths must be non-empty",
            ));
        }
        Ok(())
    }
}

pub fn run_job(job: &BackdropJob) -> FuzzyResult<()> {
    job.validate()?;

    let bytes = fs::read(&job.input)
        .with_context(|| format!("read input image '{}'", job.input.display()))?;
    let backdrop = blur_image_bytes(&bytes, job.amount)?;
    let png = encode_png(&backdrop)?;
    fs::write(&job.output, png)
        .with_context(|| format!("write output PNG '{}'", job.output.display()))?;

    tracing::info!(
        width = backdrop.width,
        height = backdrop.height,
        amount = job.amount,
        out = %job.output.display(),
        "backdrop written"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn png_bytes(width: u32, height: u32, px: [u8; 4]) -> Vec<u8> {
        let raw = px.repeat((width * height) as usize);
        let img = image::RgbaImage::from_raw(width, height, raw).unwrap();
        let mut buf = Vec::new();
        image::DynamicImage::ImageRgba8(img)
            .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
            .unwrap();
        buf
    }

    #[test]
    fn blur_image_bytes_keeps_dimensions_and_uniform_color() {
        let bytes = png_bytes(4, 4, [255, 0, 0, 255]);
        let backdrop = blur_image_bytes(&bytes, 10.0).unwrap();
        assert_eq!((backdrop.width, backdrop.height), (4, 4));
        assert_eq!(backdrop.rgba8, [255, 0, 0, 255].repeat(16));
    }

    #[test]
    fn blur_image_bytes_rejects_garbage() {
        assert!(blur_image_bytes(b"not an image", 3.0).is_err());
    }

    #[test]
    fn encode_png_round_trips_dimensions() {
        let backdrop = Backdrop {
            width: 3,
            height: 2,
            rgba8: [10, 20, 30, 255].repeat(6),
        };
        let png = encode_png(&backdrop).unwrap();
        let decoded = image::load_from_memory(&png).unwrap().to_rgba8();
        assert_eq!(decoded.dimensions(), (3, 2));
        assert_eq!(decoded.into_raw(), backdrop.rgba8);
    }

    #[test]
    fn job_json_defaults_amount() {
        let job =
            BackdropJob::from_json_str(r#"{"input": "in.png", "output": "out.png"}"#).unwrap();
        assert_eq!(job.amount, DEFAULT_AMOUNT);
    }

    #[test]
    fn job_json_rejects_bad_amount_and_bad_syntax() {
        let err =
            BackdropJob::from_json_str(r#"{"input": "a", "output": "b", "amount": -1}"#)
                .unwrap_err();
        assert!(err.to_string().contains("validation error:"));

        let err = BackdropJob::from_json_str("{").unwrap_err();
        assert!(err.to_string().contains("serialization error:"));
    }
}

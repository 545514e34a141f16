use std::io::Cursor;
use image::{DynamicImage, ImageBuffer, ImageFormat, Rgb};
use plotters::prelude::LineSeries;
use plotters::prelude::*;
use crate::drivers::error::AcquisitionError;
use crate::types::Waveform;
#[derive(Clone, Debug)]
pub struct PlotStyle {
    pub width: u32,
    pub height: u32,
    pub background: RGBColor,
    pub trace: RGBColor,
    /// Caption, axis labels and grid. Needs system fonts.
    pub annotate: bool,
}
impl Default for PlotStyle {
    fn default() -> Self {
        Self {
            width: 1920,
            height: 1080,
            background: WHITE,
            trace: BLUE,
            annotate: true,
        }
    }
}
fn padded(lo: f64, hi: f64, fallback: f64) -> (f64, f64) {
    if (hi - lo).abs() < f64::EPSILON {
        (lo - fallback, hi + fallback)
    } else {
        let margin = (hi - lo) * 0.05;
        (lo - margin, hi + margin)
    }
}
/// Renders amplitude over time as a PNG image.
pub fn render_waveform_png(waveform: &Waveform, style: &PlotStyle) -> Result<Vec<u8>, AcquisitionError> {
    let (y_min, y_max) = waveform
        .amplitude_bounds()
        .ok_or_else(|| AcquisitionError::Persist("waveform has no samples".into()))?;
    let (t_min, t_max) = match (waveform.time_s.first(), waveform.time_s.last()) {
        (Some(first), Some(last)) => (*first, *last),
        _ => return Err(AcquisitionError::Persist("waveform has no time axis".into())),
    };
    let x_range = if t_max > t_min { (t_min, t_max) } else { padded(t_min, t_max, 1.0) };
    let y_range = padded(y_min, y_max, 1.0);
    let len = (style.width as usize)
        .checked_mul(style.height as usize)
        .and_then(|n| n.checked_mul(3))
        .ok_or_else(|| {
            AcquisitionError::Persist(format!(
                "plot size {}x{} is too large",
                style.width, style.height
            ))
        })?;
    let mut buffer = vec![0u8; len];
    {
        let root = BitMapBackend::with_buffer(&mut buffer, (style.width, style.height))
            .into_drawing_area();
        root.fill(&style.background)?;
        let mut builder = ChartBuilder::on(&root);
        builder.margin(10);
        if style.annotate {
            builder
                .caption(
                    format!("Signal from {}", waveform.channel),
                    ("sans-serif", 28).into_font(),
                )
                .set_label_area_size(LabelAreaPosition::Left, 70)
                .set_label_area_size(LabelAreaPosition::Bottom, 50);
        }
        let mut chart =
            builder.build_cartesian_2d(x_range.0..x_range.1, y_range.0..y_range.1)?;
        if style.annotate {
            chart
                .configure_mesh()
                .x_desc("Time (s)")
                .y_desc("Amplitude")
                .light_line_style(&BLACK.mix(0.05))
                .draw()?;
        }
        chart.draw_series(LineSeries::new(waveform.points(), &style.trace))?;
        root.present()?;
    }
    encode_png(&buffer, style.width, style.height)
}
fn encode_png(buffer: &[u8], width: u32, height: u32) -> Result<Vec<u8>, AcquisitionError> {
    let image = ImageBuffer::<Rgb<u8>, _>::from_raw(width, height, buffer.to_vec())
        .ok_or_else(|| AcquisitionError::Persist("failed to allocate image buffer".into()))?;
    let mut output = Vec::new();
    let dynamic = DynamicImage::ImageRgb8(image);
    dynamic.write_to(&mut Cursor::new(&mut output), ImageFormat::Png)?;
    Ok(output)
}

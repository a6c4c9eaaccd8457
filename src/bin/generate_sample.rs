use std::fs;
use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{Float64Array, Int64Array};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use palette::{Hsl, IntoColor, Srgb};
use parquet::arrow::ArrowWriter;

const CLASSES: [&str; 10] = [
    "plane", "car", "bird", "cat", "deer", "dog", "frog", "horse", "ship", "truck",
];

const POINTS_PER_CLASS: usize = 200;
const CLUSTER_RADIUS: f64 = 30.0;
const CLUSTER_SIGMA: f64 = 5.5;

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

fn shuffle<T>(rng: &mut SimpleRng, items: &mut [T]) {
    for i in (1..items.len()).rev() {
        let j = (rng.next_u64() % (i as u64 + 1)) as usize;
        items.swap(i, j);
    }
}

fn write_csv(points: &[(f64, f64, i64)]) -> Result<()> {
    let mut writer = csv::Writer::from_path("data/train_reduced.csv")?;
    writer.write_record(["x", "y", "label"])?;
    for &(x, y, label) in points {
        writer.write_record([x.to_string(), y.to_string(), label.to_string()])?;
    }
    writer.flush()?;
    Ok(())
}

fn write_parquet(points: &[(f64, f64, i64)]) -> Result<()> {
    let xs: Vec<f64> = points.iter().map(|p| p.0).collect();
    let ys: Vec<f64> = points.iter().map(|p| p.1).collect();
    let labels: Vec<i64> = points.iter().map(|p| p.2).collect();

    let schema = Arc::new(Schema::new(vec![
        Field::new("x", DataType::Float64, false),
        Field::new("y", DataType::Float64, false),
        Field::new("label", DataType::Int64, false),
    ]));
    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(Float64Array::from(xs)),
            Arc::new(Float64Array::from(ys)),
            Arc::new(Int64Array::from(labels)),
        ],
    )?;

    let file = fs::File::create("data/train_reduced.parquet")?;
    let mut writer = ArrowWriter::try_new(file, schema, None)?;
    writer.write(&batch)?;
    writer.close()?;
    Ok(())
}

/// Solid-colour 100x100 JPEG per class, hue-matched to the plot palette.
fn write_placeholder_images() -> Result<()> {
    for (i, name) in CLASSES.iter().enumerate() {
        let hue = (i as f32 / CLASSES.len() as f32) * 360.0;
        let hsl = Hsl::new(hue, 0.75, 0.55);
        let rgb: Srgb = hsl.into_color();
        let pixel = image::Rgb([
            (rgb.red * 255.0) as u8,
            (rgb.green * 255.0) as u8,
            (rgb.blue * 255.0) as u8,
        ]);
        let img = image::RgbImage::from_pixel(100, 100, pixel);
        img.save(format!("images/{name}.jpeg"))
            .with_context(|| format!("saving images/{name}.jpeg"))?;
    }
    Ok(())
}

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);

    // One Gaussian cluster per class, centres evenly spaced on a circle.
    let mut points: Vec<(f64, f64, i64)> = Vec::with_capacity(CLASSES.len() * POINTS_PER_CLASS);
    for label in 0..CLASSES.len() {
        let angle = label as f64 * std::f64::consts::TAU / CLASSES.len() as f64;
        let cx = CLUSTER_RADIUS * angle.cos();
        let cy = CLUSTER_RADIUS * angle.sin();
        for _ in 0..POINTS_PER_CLASS {
            points.push((
                rng.gauss(cx, CLUSTER_SIGMA),
                rng.gauss(cy, CLUSTER_SIGMA),
                label as i64,
            ));
        }
    }
    shuffle(&mut rng, &mut points);

    fs::create_dir_all("data").context("creating data directory")?;
    fs::create_dir_all("images").context("creating images directory")?;

    write_csv(&points).context("writing data/train_reduced.csv")?;
    write_parquet(&points).context("writing data/train_reduced.parquet")?;
    write_placeholder_images().context("writing class images")?;

    println!(
        "Wrote {} points across {} classes to data/ and images/",
        points.len(),
        CLASSES.len()
    );
    Ok(())
}

use clap::{Parser, ValueEnum};
use id_redact::{driver, OcrsLocator, Padding, PatternTable, Pipeline, RedactConfig, TextLocator};
use std::path::PathBuf;

/// Largest accepted box offset, in pixels.
const MAX_OFFSET: i64 = 10_000;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Engine {
    /// Built-in ocrs models
    Ocrs,
    /// System Tesseract library
    #[cfg(feature = "tesseract")]
    Tesseract,
}

#[derive(Parser)]
struct Args {
    /// Folder containing the original .jpg/.jpeg/.png images
    #[arg(long, default_value = "input")]
    input_dir: PathBuf,

    /// Output folder for redacted pictures
    #[arg(long, default_value = "output")]
    output_dir: PathBuf,

    #[arg(long, value_enum, default_value_t = Engine::Ocrs)]
    engine: Engine,

    #[arg(long, default_value = "text-detection.rten")]
    detection_model: PathBuf,

    #[arg(long, default_value = "text-recognition.rten")]
    recognition_model: PathBuf,

    /// Directory holding Tesseract's traineddata files
    #[cfg(feature = "tesseract")]
    #[arg(long)]
    tessdata_dir: Option<PathBuf>,

    #[cfg(feature = "tesseract")]
    #[arg(long, default_value = "eng")]
    tesseract_lang: String,

    #[arg(long, default_value_t = 0, value_parser = clap::value_parser!(u32).range(..=MAX_OFFSET))]
    x_offset: u32,

    #[arg(long, default_value_t = 0, value_parser = clap::value_parser!(u32).range(..=MAX_OFFSET))]
    y_offset: u32,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    let args = Args::parse();

    let config = RedactConfig::default()
        .with_input_dir(args.input_dir)
        .with_output_dir(args.output_dir);

    // Engines are only initialized once there is something to redact.
    let Some(inputs) = driver::discover_inputs(&config)? else {
        return Ok(());
    };

    let locator: Box<dyn TextLocator> = match args.engine {
        Engine::Ocrs => Box::new(OcrsLocator::new(
            &args.detection_model,
            &args.recognition_model,
        )?),
        #[cfg(feature = "tesseract")]
        Engine::Tesseract => Box::new(id_redact::TesseractLocator::new(
            args.tessdata_dir.as_deref(),
            &args.tesseract_lang,
        )?),
    };

    let pipeline = Pipeline::new(
        locator,
        PatternTable::default_table()?,
        Padding::new(args.x_offset, args.y_offset),
    );

    let summary = driver::process_inputs(&config, &pipeline, &inputs)?;
    tracing::debug!(?summary, "Run finished");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flagless_run_uses_folder_defaults() {
        let args = Args::try_parse_from(["id-redact"]).unwrap();
        assert_eq!(args.input_dir, PathBuf::from("input"));
        assert_eq!(args.output_dir, PathBuf::from("output"));
        assert_eq!((args.x_offset, args.y_offset), (0, 0));
    }

    #[test]
    fn oversized_offsets_are_rejected() {
        assert!(Args::try_parse_from(["id-redact", "--x-offset", "10000"]).is_ok());
        assert!(Args::try_parse_from(["id-redact", "--x-offset", "10001"]).is_err());
        assert!(Args::try_parse_from(["id-redact", "--y-offset", "4294967295"]).is_err());
    }
}

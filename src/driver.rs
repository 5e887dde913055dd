//! Folder walk: redact every image under the input directory, in name order.

use std::fs;
use std::path::PathBuf;

use crate::config::RedactConfig;
use crate::error::Result;
use crate::ocr::TextLocator;
use crate::pipeline::Pipeline;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunSummary {
    /// The input directory does not exist; nothing was read or written.
    InputMissing,
    /// Paths of the written images, in processing order.
    Processed { outputs: Vec<PathBuf> },
}

/// [`discover_inputs`] then [`process_inputs`].
pub fn run<L: TextLocator>(config: &RedactConfig, pipeline: &Pipeline<L>) -> Result<RunSummary> {
    match discover_inputs(config)? {
        Some(inputs) => process_inputs(config, pipeline, &inputs),
        None => Ok(RunSummary::InputMissing),
    }
}

/// Lists the images to process and makes sure the output directory exists.
///
/// Returns `None` after printing a notice when the input directory is
/// missing, in which case the output directory is not created either.
pub fn discover_inputs(config: &RedactConfig) -> Result<Option<Vec<PathBuf>>> {
    if !config.input_dir.exists() {
        println!(
            "Input folder '{}' does not exist. Please create it and place images inside.",
            config.input_dir.display()
        );
        return Ok(None);
    }

    fs::create_dir_all(&config.output_dir)?;

    let mut inputs = Vec::new();
    for entry in fs::read_dir(&config.input_dir)? {
        let path = entry?.path();
        if path.is_file() && config.accepts(&path) {
            inputs.push(path);
        }
    }
    inputs.sort();
    tracing::debug!(count = inputs.len(), dir = %config.input_dir.display(), "found images");
    Ok(Some(inputs))
}

/// Redacts `inputs` one after another. The first failing file stops the run.
pub fn process_inputs<L: TextLocator>(
    config: &RedactConfig,
    pipeline: &Pipeline<L>,
    inputs: &[PathBuf],
) -> Result<RunSummary> {
    let mut outputs = Vec::with_capacity(inputs.len());
    for input_path in inputs {
        println!("Processing file: {}", input_path.display());
        let output_path =
            pipeline.process_file(input_path, &config.output_dir, &config.output_prefix)?;
        println!("Redacted file saved as: {}", output_path.display());
        outputs.push(output_path);
    }
    Ok(RunSummary::Processed { outputs })
}

//! Visualization collaborator.
//!
//! Dumps the simulated buffers to plain-text data files and shells out to an
//! external python plotting script. Success or failure is reported through
//! the process exit status and logged; plotting never affects the
//! simulation result.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::Command;

use log::{error, info};

pub struct PlotInputs<'a> {
    pub noisy: &'a [f64],
    pub filtered: &'a [f64],
    pub output: &'a [f64],
    pub sample_rate: f64,
}

/// Transmit-side plots additionally receive the binary message and the
/// carrier frequency.
pub struct DownlinkInfo<'a> {
    pub bits: &'a str,
    pub carrier_frequency: f64,
}

fn write_buffer(path: &Path, samples: &[f64]) -> io::Result<()> {
    let mut file = fs::File::create(path)?;
    for sample in samples {
        writeln!(file, "{sample}")?;
    }
    Ok(())
}

/// Invoke `python3 <script>` on the dumped buffers.
pub fn visualize(
    script: &Path,
    data_dir: &Path,
    inputs: &PlotInputs<'_>,
    downlink: Option<&DownlinkInfo<'_>>,
) -> io::Result<()> {
    fs::create_dir_all(data_dir)?;

    let noisy_path: PathBuf = data_dir.join("input_noise.txt");
    let filtered_path: PathBuf = data_dir.join("input_filtered.txt");
    let output_path: PathBuf = data_dir.join("output.txt");
    write_buffer(&noisy_path, inputs.noisy)?;
    write_buffer(&filtered_path, inputs.filtered)?;
    write_buffer(&output_path, inputs.output)?;

    let mut command = Command::new("python3");
    command
        .arg(script)
        .arg("--output")
        .arg(&output_path)
        .arg("--inputNoise")
        .arg(&noisy_path)
        .arg("--inputFiltered")
        .arg(&filtered_path)
        .arg("--fs")
        .arg(inputs.sample_rate.to_string());
    if let Some(info) = downlink {
        command
            .arg("--bin")
            .arg(info.bits)
            .arg("--fc")
            .arg(info.carrier_frequency.to_string());
    }

    let status = command.status()?;
    if status.success() {
        info!("plot script {} finished successfully", script.display());
    } else {
        error!("plot script {} failed with status {status}", script.display());
    }
    Ok(())
}

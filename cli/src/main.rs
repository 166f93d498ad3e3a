mod plot;

use std::fs::File;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use hound::{SampleFormat, WavSpec};
use log::info;
use rand::rngs::StdRng;
use rand::SeedableRng;

use radiomodem_core::config::{CARRIER_FREQUENCY_KEY, SAMPLE_RATE_KEY};
use radiomodem_core::{source, Channel, Modem, ParamStore, ParamValue, Scheme};

use plot::{DownlinkInfo, PlotInputs};

#[derive(Parser)]
#[command(name = "radiomodem")]
#[command(about = "Digital-radio physical layer simulator")]
struct Cli {
    #[command(flatten)]
    params: ParamArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct ParamArgs {
    /// Carrier frequency in Hz (the bit rate follows it)
    #[arg(long, global = true)]
    carrier_frequency: Option<f64>,

    /// Sample rate in Hz
    #[arg(long, global = true)]
    sample_rate: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a full modulate -> channel -> demodulate simulation
    Simulate {
        /// Generation tag: 2G (ASK), 3G (PSK), 4G (FSK) or 5G (16-QAM)
        #[arg(short, long, default_value = "2G")]
        scheme: String,

        /// Number of random bits to generate when --bits is not given
        #[arg(short, long, default_value = "16")]
        length: usize,

        /// Explicit binary message instead of a generated one
        #[arg(short, long)]
        bits: Option<String>,

        /// Seed for the message generator and the channel noise
        #[arg(long)]
        seed: Option<u64>,

        /// Skip the channel noise and smoothing stages
        #[arg(long)]
        clean: bool,

        /// Python plotting script to run on the simulated buffers
        #[arg(long)]
        plot_script: Option<PathBuf>,

        /// Directory for the plot data files
        #[arg(long, default_value = "plots")]
        plot_dir: PathBuf,
    },

    /// Modulate a binary message into a WAV waveform
    Modulate {
        /// Generation tag: 2G, 3G, 4G or 5G
        #[arg(short, long, default_value = "2G")]
        scheme: String,

        /// Binary message to modulate
        bits: String,

        /// Output WAV file
        #[arg(value_name = "OUTPUT.WAV")]
        output: PathBuf,
    },

    /// Demodulate a WAV waveform back into a binary message
    Demodulate {
        /// Generation tag: 2G, 3G, 4G or 5G
        #[arg(short, long, default_value = "2G")]
        scheme: String,

        /// Input WAV file
        #[arg(value_name = "INPUT.WAV")]
        input: PathBuf,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let cli = Cli::parse();

    let store = build_store(&cli.params);
    let modem = Modem::new(&store)?;

    match cli.command {
        Commands::Simulate {
            scheme,
            length,
            bits,
            seed,
            clean,
            plot_script,
            plot_dir,
        } => simulate_command(
            &modem,
            &scheme,
            length,
            bits.as_deref(),
            seed,
            clean,
            plot_script.as_deref(),
            &plot_dir,
        ),
        Commands::Modulate { scheme, bits, output } => {
            modulate_command(&modem, &scheme, &bits, &output)
        }
        Commands::Demodulate { scheme, input } => {
            demodulate_command(&modem, &scheme, &input)
        }
    }
}

fn build_store(params: &ParamArgs) -> ParamStore {
    let mut store = ParamStore::with_defaults();
    if let Some(frequency) = params.carrier_frequency {
        store.insert(CARRIER_FREQUENCY_KEY, ParamValue::Float(frequency));
    }
    if let Some(rate) = &params.sample_rate {
        store.insert(SAMPLE_RATE_KEY, ParamValue::Text(rate.clone()));
    }
    store
}

#[allow(clippy::too_many_arguments)]
fn simulate_command(
    modem: &Modem,
    tag: &str,
    length: usize,
    bits: Option<&str>,
    seed: Option<u64>,
    clean: bool,
    plot_script: Option<&std::path::Path>,
    plot_dir: &std::path::Path,
) -> Result<(), Box<dyn std::error::Error>> {
    let scheme = Scheme::from_tag(tag)?;

    let message = match bits {
        Some(explicit) => explicit.to_string(),
        None => {
            let mut rng = match seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_entropy(),
            };
            source::random_binary_message(&mut rng, length)
        }
    };
    println!("Message:   {message}");

    let clean_signal = modem.modulate(&message, scheme)?;
    info!("modulated {} bits into {} samples", message.len(), clean_signal.len());

    let mut signal = clean_signal.clone();
    let mut noisy_signal = clean_signal.clone();
    if !clean {
        let mut channel = match seed {
            Some(seed) => Channel::from_seed(seed),
            None => Channel::from_entropy(),
        };
        channel.add_noise(&mut signal);
        noisy_signal = signal.clone();
        channel.filter_noise(&mut signal);
    }

    let recovered = modem.demodulate(&signal, scheme)?;
    println!("Recovered: {recovered}");

    let errors = message
        .chars()
        .zip(recovered.chars())
        .filter(|(sent, received)| sent != received)
        .count();
    println!(
        "{scheme}: {errors} bit error(s) over {} bit(s)",
        message.len()
    );

    if let Some(script) = plot_script {
        let inputs = PlotInputs {
            noisy: &noisy_signal,
            filtered: &signal,
            output: &clean_signal,
            sample_rate: modem.config().sample_rate,
        };
        let downlink = DownlinkInfo {
            bits: &message,
            carrier_frequency: modem.config().carrier_frequency,
        };
        plot::visualize(script, plot_dir, &inputs, Some(&downlink))?;
    }

    Ok(())
}

fn modulate_command(
    modem: &Modem,
    tag: &str,
    bits: &str,
    output: &std::path::Path,
) -> Result<(), Box<dyn std::error::Error>> {
    let scheme = Scheme::from_tag(tag)?;
    let signal = modem.modulate(bits, scheme)?;
    println!("Modulated {} bits into {} samples", bits.len(), signal.len());

    // 32-bit float WAV keeps the exact sample values; 16-QAM peaks exceed
    // the int16 full-scale range
    let spec = WavSpec {
        channels: 1,
        sample_rate: modem.config().sample_rate as u32,
        bits_per_sample: 32,
        sample_format: SampleFormat::Float,
    };
    let file = File::create(output)?;
    let mut writer = hound::WavWriter::new(file, spec)?;
    for sample in &signal {
        writer.write_sample(*sample as f32)?;
    }
    writer.finalize()?;

    println!("Wrote {}", output.display());
    Ok(())
}

fn demodulate_command(
    modem: &Modem,
    tag: &str,
    input: &std::path::Path,
) -> Result<(), Box<dyn std::error::Error>> {
    let scheme = Scheme::from_tag(tag)?;

    let file = File::open(input)?;
    let mut reader = hound::WavReader::new(file)?;
    let spec = reader.spec();
    info!(
        "read WAV: {} Hz, {} channel(s), {} bits",
        spec.sample_rate, spec.channels, spec.bits_per_sample
    );

    let signal: Vec<f64> = match (spec.sample_format, spec.bits_per_sample) {
        (SampleFormat::Float, 32) => {
            let samples: Result<Vec<f32>, _> = reader.samples::<f32>().collect();
            samples?.into_iter().map(f64::from).collect()
        }
        (SampleFormat::Int, 16) => {
            let samples: Result<Vec<i16>, _> = reader.samples::<i16>().collect();
            samples?
                .into_iter()
                .map(|sample| f64::from(sample) / 32768.0)
                .collect()
        }
        (format, bits) => {
            return Err(format!("unsupported WAV format: {format:?} {bits}-bit").into());
        }
    };

    let recovered = modem.demodulate(&signal, scheme)?;
    println!("{recovered}");
    Ok(())
}

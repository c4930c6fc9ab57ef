use std::path::Path;
use std::process::ExitCode;

use anyhow::Result;
use clap::{ArgAction, CommandFactory, Parser};
use clap::error::ErrorKind;
use hdr2rgbe::config::{ConvertConfig, Mode};
use hdr2rgbe::{ConvertError, HasRecoverySuggestion};
use hdr2rgbe::processing::ExponentOverflow;
use log::{debug, error};

/// Convert an HDR float image into RGBE-encoded PNG files:
/// - `-m`: every power-of-two size from the largest that fits down to the minimum
/// - `-w`/`-h`: one file at exactly that size
/// - `-p`: print the input header and exit
#[derive(Parser, Debug)]
#[command(name = "hdr2rgbe")]
#[command(about = "Convert HDR images into RGBE-encoded PNGs")]
#[command(long_about = "Convert a floating-point HDR image into 8-bit RGBA PNGs whose alpha channel
holds a shared exponent (RGBE). Either writes one file at an explicit size or a
ladder of power-of-two sizes named <prefix>_<width>x<height>.png.")]
#[command(disable_help_flag = true)]
struct Args {
    /// Input image (Radiance .hdr, OpenEXR, or anything the image crate reads)
    #[arg(short = 'i', value_name = "PATH")]
    input: Option<String>,

    /// Output file name (with -w/-h) or file name prefix (with -m)
    #[arg(short = 'o', value_name = "PATH")]
    output: Option<String>,

    /// Minimum dimension of the power-of-two ladder; takes priority over -w/-h
    #[arg(short = 'm', value_name = "PIXELS")]
    min_dimension: Option<u32>,

    /// Target width
    #[arg(short = 'w', value_name = "PIXELS")]
    width: Option<u32>,

    /// Target height
    #[arg(short = 'h', value_name = "PIXELS")]
    height: Option<u32>,

    /// Print the input image header and exit
    #[arg(short = 'p')]
    info: bool,

    /// Saturate exponents above the byte range instead of wrapping them
    #[arg(long)]
    clamp_exponent: bool,

    /// Print help
    #[arg(long, action = ArgAction::Help)]
    help: Option<bool>,
}

impl Args {
    /// Map parsed flags onto a run configuration, or `None` if the flags do
    /// not describe a complete run.
    fn into_config(self) -> Option<ConvertConfig> {
        let input = self.input?;
        let overflow = if self.clamp_exponent {
            ExponentOverflow::Clamp
        } else {
            ExponentOverflow::Wrap
        };

        if self.info {
            return Some(ConvertConfig::new(input, String::new(), Mode::Info, overflow));
        }

        let output = self.output?;
        let mode = match (self.min_dimension, self.width, self.height) {
            (Some(min_dimension), _, _) if min_dimension > 0 => Mode::PowerOfTwo { min_dimension },
            // -m 0 is the same as no -m
            (_, Some(width), Some(height)) => Mode::Fixed { width, height },
            _ => return None,
        };
        Some(ConvertConfig::new(input, output, mode, overflow))
    }
}

fn print_usage() {
    println!("{}", Args::command().render_help());
}

fn run(config: &ConvertConfig) -> Result<()> {
    if config.mode == Mode::Info {
        hdr2rgbe::print_info(Path::new(&config.input))?;
        return Ok(());
    }
    let options = config.to_convert_options()?;
    hdr2rgbe::convert(&options)?;
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();

    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(err) if err.kind() == ErrorKind::DisplayHelp => {
            print!("{}", err.render());
            return ExitCode::SUCCESS;
        }
        Err(err) => {
            error!("{}", err);
            print_usage();
            return ExitCode::from(1);
        }
    };

    let Some(config) = args.into_config() else {
        print_usage();
        return ExitCode::from(1);
    };
    if let Err(reason) = config.validate() {
        println!("{}", reason);
        print_usage();
        return ExitCode::from(1);
    }

    match run(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {:#}", err);
            if let Some(cause) = err.chain().find_map(|c| c.downcast_ref::<ConvertError>()) {
                let context = cause.context();
                if let Some(operation) = &context.operation {
                    eprintln!("Operation: {}", operation);
                }
                debug!("{} error metadata: {:?}", cause.category(), context.metadata);
                if let Some(hint) = cause.recovery_suggestion() {
                    eprintln!("Hint: {}", hint);
                }
            }
            ExitCode::from(2)
        }
    }
}

// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Au-Zone Technologies. All Rights Reserved.

//! Command-line front end for the G2D pixel format converter.
//!
//! Exit codes are distinct per failure kind so scripts can tell what went
//! wrong. Status 2 is left to clap for command-line usage errors, so
//! conversion failures start at 3:
//!
//! | code | condition                                  |
//! |------|--------------------------------------------|
//! | 0    | success                                    |
//! | 2    | command-line usage error (clap)            |
//! | 3    | unknown format alias                       |
//! | 4    | conversion pair not supported              |
//! | 5    | source format has no surface layout        |
//! | 6    | destination format has no surface layout   |
//! | 7    | device open/alloc/close failure            |
//! | 8    | blit failure                               |
//! | 9    | finish failure                             |
//! | 10   | device buffer release failure              |
//! | 11   | file I/O failure                           |

use clap::{Parser, Subcommand};
use g2d_convert::{format, ConvertError, Converter};
use std::{fs, path::PathBuf, process::ExitCode};
use tracing::error;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Enable verbose debug logging
    #[arg(short, long, env = "VERBOSE")]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Convert a raw image between pixel formats
    Convert {
        /// Source pixel format alias (see `formats`)
        src_format: String,

        /// Destination pixel format alias (see `formats`)
        dest_format: String,

        /// Path of the raw source image
        input: PathBuf,

        /// Path the raw converted image is written to
        output: PathBuf,

        /// Source image width in pixels
        width: u32,

        /// Source image height in pixels
        height: u32,

        /// Destination width in pixels (defaults to the source width)
        #[arg(long)]
        output_width: Option<u32>,

        /// Destination height in pixels (defaults to the source height)
        #[arg(long)]
        output_height: Option<u32>,
    },

    /// List every registered pixel format alias
    Formats,
}

const EXIT_IO: u8 = 11;

fn exit_code(err: &ConvertError) -> u8 {
    match err {
        ConvertError::InvalidFormat(_) => 3,
        ConvertError::UnsupportedConversion { .. } => 4,
        ConvertError::UnsupportedSourceFormat(_) => 5,
        ConvertError::UnsupportedDestinationFormat(_) => 6,
        ConvertError::Device(_) => 7,
        ConvertError::Blit(_) => 8,
        ConvertError::Finish(_) => 9,
        ConvertError::Dealloc(_) => 10,
    }
}

fn convert_cmd(
    src_format: &str,
    dest_format: &str,
    input: &PathBuf,
    output: &PathBuf,
    width: u32,
    height: u32,
    output_width: Option<u32>,
    output_height: Option<u32>,
) -> ExitCode {
    let src = match fs::read(input) {
        Ok(bytes) => bytes,
        Err(e) => {
            error!("failed to read {}: {e}", input.display());
            return ExitCode::from(EXIT_IO);
        }
    };

    let converter = match Converter::new() {
        Ok(c) => c,
        Err(e) => {
            error!("{e}");
            return ExitCode::from(exit_code(&e));
        }
    };

    let dest = match converter.convert_scaled(
        src_format,
        dest_format,
        &src,
        width,
        height,
        output_width.unwrap_or(width),
        output_height.unwrap_or(height),
    ) {
        Ok(bytes) => bytes,
        Err(e) => {
            error!("{e}");
            return ExitCode::from(exit_code(&e));
        }
    };

    // Only persist fully converted frames; a failure above leaves the
    // output path untouched.
    if let Err(e) = fs::write(output, &dest) {
        error!("failed to write {}: {e}", output.display());
        return ExitCode::from(EXIT_IO);
    }

    ExitCode::SUCCESS
}

fn main() -> ExitCode {
    let args = Args::parse();

    let filter = if args.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match args.command {
        Command::Convert {
            src_format,
            dest_format,
            input,
            output,
            width,
            height,
            output_width,
            output_height,
        } => convert_cmd(
            &src_format,
            &dest_format,
            &input,
            &output,
            width,
            height,
            output_width,
            output_height,
        ),
        Command::Formats => {
            for alias in format::aliases() {
                println!("{alias}");
            }
            ExitCode::SUCCESS
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use g2d_convert::{accel::AccelError, Format};

    #[test]
    fn exit_codes_leave_usage_status_to_clap() {
        // clap reports usage errors with status 2; conversion failures
        // must never reuse it.
        let errs = [
            ConvertError::InvalidFormat("FOO".into()),
            ConvertError::UnsupportedConversion {
                src: Format::Rgb888,
                dest: Format::Nv12,
            },
            ConvertError::UnsupportedSourceFormat(Format::Nv16),
            ConvertError::UnsupportedDestinationFormat(Format::Nv61),
            ConvertError::Device(AccelError::new("x")),
            ConvertError::Blit(AccelError::new("x")),
            ConvertError::Finish(AccelError::new("x")),
            ConvertError::Dealloc(AccelError::new("x")),
        ];

        let mut codes: Vec<u8> = errs.iter().map(exit_code).collect();
        codes.push(EXIT_IO);
        for &code in &codes {
            assert!(code > 2, "code {code} collides with success or clap usage");
        }
        let mut unique = codes.clone();
        unique.sort_unstable();
        unique.dedup();
        assert_eq!(unique.len(), codes.len(), "exit codes must be distinct");
    }
}

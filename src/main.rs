use clap::Parser;
use log::debug;
use std::io::{Read, Write};
use std::path::PathBuf;
use transcript_cleanup::{Error, Normalizer, config};

#[derive(Parser)]
#[command(
    name = "transcript-cleanup",
    version,
    about = "Tidy speech-to-text output: spacing, contractions, fillers, capitals",
    long_about = "Tidy speech-to-text output: spacing, contractions, fillers, capitals.\n\n\
                  Reads stdin, writes stdout. With no config file present (and \
                  TRANSCRIPT_CLEANUP_FILLER_MODE unset) the fixed pipeline and \
                  built-in replacement table are used."
)]
struct Cli {
    /// Config file (default: <config dir>/transcript-cleanup.toml; optional)
    #[arg(long)]
    config: Option<PathBuf>,
}

fn run(cli: Cli, input: impl Read, output: impl Write) -> Result<(), Error> {
    let config = config::load_config(cli.config.as_deref())?;
    let normalizer = config.normalizer()?;
    process(&normalizer, input, output)
}

fn process(
    normalizer: &Normalizer,
    mut input: impl Read,
    mut output: impl Write,
) -> Result<(), Error> {
    let mut text = String::new();
    input.read_to_string(&mut text).map_err(Error::ReadInput)?;
    debug!("raw: {text}");

    let text = normalizer.normalize(&text);
    debug!("normalized: {text}");

    writeln!(output, "{text}").map_err(Error::WriteOutput)?;
    output.flush().map_err(Error::WriteOutput)
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    if let Err(e) = run(cli, std::io::stdin().lock(), std::io::stdout().lock()) {
        eprintln!("{e}");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn process_bytes(input: &[u8]) -> Result<String, Error> {
        let mut out = Vec::new();
        process(&Normalizer::default(), input, &mut out)?;
        Ok(String::from_utf8(out).unwrap())
    }

    #[test]
    fn output_ends_with_newline() {
        assert_eq!(
            process_bytes(b"so i'm gonna go.\nbye").unwrap(),
            "I'm going to go. Bye\n"
        );
    }

    #[test]
    fn empty_input_prints_blank_line() {
        assert_eq!(process_bytes(b"").unwrap(), "\n");
    }

    #[test]
    fn invalid_utf8_is_a_read_error() {
        let err = process_bytes(b"so \xff\xfe gonna").unwrap_err();
        assert!(matches!(err, Error::ReadInput(_)));
    }

    #[test]
    fn unreadable_explicit_config_fails_before_reading() {
        let cli = Cli::parse_from([
            "transcript-cleanup",
            "--config",
            "/nonexistent/transcript-cleanup.toml",
        ]);
        let mut out = Vec::new();
        let err = run(cli, &b"gonna"[..], &mut out).unwrap_err();
        assert!(matches!(err, Error::ReadConfig { .. }));
        assert!(out.is_empty());
    }

    #[test]
    fn cli_takes_no_required_flags() {
        let cli = Cli::parse_from(["transcript-cleanup"]);
        assert!(cli.config.is_none());
    }
}

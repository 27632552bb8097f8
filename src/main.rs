use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{bail, Context};
use clap::{Args, Parser, Subcommand};
use icongen::{IconConfig, Rgb};
use log::{error, info, LevelFilter, Log, Metadata, Record};

#[derive(Parser)]
#[command(name = "icongen", version, about = "Generate shaded PNG app icons")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    /// More log output (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Only log warnings and errors
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Write one icon<N>.png per size (default when no subcommand is given)
    Generate(GenerateArgs),
    /// Check signature, chunk order and checksums of PNG files
    Verify {
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
}

#[derive(Args, Default)]
struct GenerateArgs {
    /// JSON config file; flags below override its values
    #[arg(long)]
    config: Option<PathBuf>,

    /// Icon edge length in pixels (repeatable)
    #[arg(short, long = "size", value_name = "N")]
    sizes: Vec<u32>,

    /// Base color as #rrggbb
    #[arg(short, long)]
    color: Option<Rgb>,

    /// Output directory (created if absent)
    #[arg(short, long)]
    out: Option<PathBuf>,

    /// File name prefix
    #[arg(long)]
    prefix: Option<String>,

    /// Encoder threads (0 = one per CPU)
    #[arg(short, long)]
    jobs: Option<usize>,

    /// Also write icons.json mapping sizes to files
    #[arg(long)]
    manifest: bool,

    /// Print the generated files as JSON on stdout
    #[arg(long)]
    json: bool,
}

struct StderrLogger;

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            eprintln!("[{}] {}", record.level(), record.args());
        }
    }

    fn flush(&self) {}
}

static LOGGER: StderrLogger = StderrLogger;

fn init_logging(verbose: u8, quiet: bool) {
    let level = match (quiet, verbose) {
        (true, _) => LevelFilter::Warn,
        (false, 0) => LevelFilter::Info,
        (false, 1) => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(level);
    }
}

fn build_config(args: &GenerateArgs) -> anyhow::Result<IconConfig> {
    let mut cfg = match &args.config {
        Some(path) => IconConfig::from_json_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => IconConfig::default(),
    };
    if !args.sizes.is_empty() {
        cfg.sizes = args.sizes.clone();
    }
    if let Some(color) = args.color {
        cfg.color = color;
    }
    if let Some(out) = &args.out {
        cfg.output_dir = out.clone();
    }
    if let Some(prefix) = &args.prefix {
        cfg.file_prefix = prefix.clone();
    }
    if let Some(jobs) = args.jobs {
        cfg.jobs = jobs;
    }
    cfg.write_manifest |= args.manifest;
    Ok(cfg)
}

fn run_generate(args: &GenerateArgs) -> anyhow::Result<()> {
    let cfg = build_config(args)?;
    let icons = icongen::generate_icons(&cfg)
        .with_context(|| format!("generating icons into {}", cfg.output_dir.display()))?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(&icons)?);
    }
    info!("Icon generation complete");
    Ok(())
}

fn run_verify(files: &[PathBuf]) -> anyhow::Result<()> {
    let mut failed = 0usize;
    for path in files {
        let result = std::fs::read(path)
            .with_context(|| format!("reading {}", path.display()))
            .and_then(|bytes| icongen::inspect(&bytes).map_err(anyhow::Error::from));
        match result {
            Ok(s) => println!(
                "{}: {}x{} depth {} color type {} interlace {}, {} IDAT bytes, chunks {}",
                path.display(),
                s.width,
                s.height,
                s.bit_depth,
                s.color_type,
                s.interlace,
                s.idat_len,
                s.chunk_kinds.join(",")
            ),
            Err(e) => {
                error!("{}: {:#}", path.display(), e);
                failed += 1;
            }
        }
    }
    if failed > 0 {
        bail!("{} of {} files failed verification", failed, files.len());
    }
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    let result = match &cli.command {
        Some(Command::Generate(args)) => run_generate(args),
        Some(Command::Verify { files }) => run_verify(files),
        None => run_generate(&GenerateArgs::default()),
    };

    if let Err(e) = result {
        eprintln!("icongen: {:#}", e);
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn flags_override_defaults() {
        let cli = Cli::try_parse_from([
            "icongen",
            "generate",
            "-s",
            "64",
            "--size",
            "24",
            "--color",
            "#102030",
            "--out",
            "x",
            "--manifest",
        ])
        .unwrap();
        let Some(Command::Generate(args)) = cli.command else { panic!("expected generate") };
        let cfg = build_config(&args).unwrap();
        assert_eq!(cfg.sizes, vec![64, 24]);
        assert_eq!(cfg.color, Rgb::new(0x10, 0x20, 0x30));
        assert_eq!(cfg.output_dir, PathBuf::from("x"));
        assert!(cfg.write_manifest);
        assert_eq!(cfg.file_prefix, "icon");
    }

    #[test]
    fn bad_color_is_rejected_by_parser() {
        assert!(Cli::try_parse_from(["icongen", "generate", "--color", "nope"]).is_err());
    }

    #[test]
    fn verify_fails_when_any_file_is_bad() {
        let tmp = tempfile::tempdir().unwrap();
        let good = tmp.path().join("icon16.png");
        let desc = icongen::ImageDescriptor::square(16, Rgb::BRAND).unwrap();
        std::fs::write(&good, icongen::encode_png(&desc).unwrap()).unwrap();
        let bad = tmp.path().join("bad.png");
        std::fs::write(&bad, b"definitely not a png").unwrap();
        let missing = tmp.path().join("missing.png");

        assert!(run_verify(std::slice::from_ref(&good)).is_ok());
        let err = run_verify(&[good.clone(), bad]).unwrap_err();
        assert!(err.to_string().contains("1 of 2 files failed"));
        assert!(run_verify(&[good, missing]).is_err());
    }

    #[test]
    fn verify_needs_files() {
        assert!(Cli::try_parse_from(["icongen", "verify"]).is_err());
    }
}

//! CLI entry point for the i915 perf kernel code generator.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use kernelgen::emit::EmitOptions;
use kernelgen::logging::init_logging;
use kernelgen::{generate, GenerateRequest};
use oa_metrics::{split_names, Chipset, PipelineConfig, Whitelist};
use thiserror as _;
use tracing::debug;
use tracing_subscriber as _;
#[cfg(test)]
use tempfile as _;

/// Generates i915 perf OA metric set C tables from metric XML descriptions.
#[derive(Debug, Parser)]
#[command(name = "i915-perf-kernelgen", version, about)]
struct Args {
    /// Metric-description XML documents.
    #[arg(required = true, value_name = "XML")]
    xml: Vec<PathBuf>,

    /// GUID registry XML document.
    #[arg(long, value_name = "PATH")]
    guids: PathBuf,

    /// Target chipset short name (e.g. hsw, bdw).
    #[arg(long)]
    chipset: String,

    /// Path of the generated C source.
    #[arg(long, value_name = "PATH")]
    c_out: PathBuf,

    /// Path of the generated C header.
    #[arg(long, value_name = "PATH")]
    h_out: PathBuf,

    /// Emit sysfs id accessors and the test config loader.
    #[arg(long)]
    sysfs: bool,

    /// Space separated metric set names to generate, replacing the default.
    #[arg(long, value_name = "NAMES", conflicts_with = "no_whitelist")]
    whitelist: Option<String>,

    /// Generate every metric set of the chipset.
    #[arg(long)]
    no_whitelist: bool,

    /// Space separated metric set names to exclude.
    #[arg(long, value_name = "NAMES")]
    blacklist: Option<String>,

    /// Enable debug diagnostics.
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    fn whitelist(&self) -> Whitelist {
        if self.no_whitelist {
            return Whitelist::Disabled;
        }
        self.whitelist
            .as_deref()
            .map_or(Whitelist::Default, Whitelist::from_names)
    }

    fn into_request(self) -> GenerateRequest {
        let config = PipelineConfig::new(Chipset::new(&self.chipset))
            .with_whitelist(self.whitelist())
            .with_blacklist(self.blacklist.as_deref().map(split_names).unwrap_or_default());

        GenerateRequest {
            metrics: self.xml,
            guids: self.guids,
            config,
            c_out: Some(self.c_out),
            h_out: Some(self.h_out),
            options: EmitOptions { sysfs: self.sysfs },
        }
    }
}

fn run(args: Args) -> Result<(), i32> {
    let request = args.into_request();

    let result = match generate(&request) {
        Ok(result) => result,
        Err(e) => {
            eprintln!("error: {e}");
            return Err(1);
        }
    };

    for warning in &result.warnings {
        eprintln!("warning: {warning}");
    }

    debug!(
        sets = result.sets.len(),
        skipped = result.warnings.len(),
        "generated {}",
        request.config.chipset
    );

    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose);

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(code) => ExitCode::from(u8::try_from(code).unwrap_or(1)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;

    const REQUIRED: [&str; 10] = [
        "i915-perf-kernelgen",
        "oa-hsw.xml",
        "--guids",
        "guids.xml",
        "--chipset",
        "hsw",
        "--c-out",
        "i915_oa_hsw.c",
        "--h-out",
        "i915_oa_hsw.h",
    ];

    fn parse(extra: &[&str]) -> Result<Args, clap::Error> {
        Args::try_parse_from(REQUIRED.iter().chain(extra))
    }

    #[test]
    fn parses_required_arguments() {
        let args = parse(&[]).expect("valid arguments");
        assert_eq!(args.xml, vec![PathBuf::from("oa-hsw.xml")]);
        assert_eq!(args.chipset, "hsw");
        assert!(!args.sysfs);
        assert!(!args.verbose);
        assert_eq!(args.whitelist(), Whitelist::Default);
    }

    #[test]
    fn accepts_several_documents() {
        let args = parse(&["oa-hsw-extra.xml", "--sysfs", "-v"]).expect("valid arguments");
        assert_eq!(args.xml.len(), 2);
        assert!(args.sysfs);
        assert!(args.verbose);
    }

    #[test]
    fn explicit_whitelist_replaces_default() {
        let args = parse(&["--whitelist", "ComputeBasic  RenderBasic"]).expect("valid arguments");
        let Whitelist::Explicit(names) = args.whitelist() else {
            panic!("expected explicit whitelist");
        };
        assert_eq!(names.len(), 2);
        assert!(names.contains("ComputeBasic"));
    }

    #[test]
    fn empty_whitelist_keeps_default() {
        let args = parse(&["--whitelist", ""]).expect("valid arguments");
        assert_eq!(args.whitelist(), Whitelist::Default);
    }

    #[test]
    fn no_whitelist_disables_narrowing() {
        let args = parse(&["--no-whitelist"]).expect("valid arguments");
        assert_eq!(args.whitelist(), Whitelist::Disabled);
    }

    #[test]
    fn whitelist_flags_conflict() {
        let error = parse(&["--whitelist", "TestOa", "--no-whitelist"]).expect_err("conflict");
        assert_eq!(error.kind(), ErrorKind::ArgumentConflict);
    }

    #[test]
    fn missing_guids_is_rejected() {
        let error = Args::try_parse_from([
            "i915-perf-kernelgen",
            "oa-hsw.xml",
            "--chipset",
            "hsw",
            "--c-out",
            "a.c",
            "--h-out",
            "a.h",
        ])
        .expect_err("missing --guids");
        assert_eq!(error.kind(), ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn request_carries_blacklist_and_outputs() {
        let args = parse(&["--blacklist", "TestOa", "--sysfs"]).expect("valid arguments");
        let request = args.into_request();
        assert!(request.config.blacklist.contains("TestOa"));
        assert_eq!(request.config.chipset.upper(), "HSW");
        assert_eq!(request.c_out, Some(PathBuf::from("i915_oa_hsw.c")));
        assert!(request.options.sysfs);
    }
}

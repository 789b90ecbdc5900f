//! Command-line surface.

use std::path::PathBuf;

use clap::Parser;
use sprig::codegen::{Encoding, MatchPolicy};

#[derive(Debug, Parser)]
#[command(
    name = "sprig",
    version,
    about = "Compile scanner/parser specifications and emit source code",
    after_help = "Any number of scanners, parsers, and target languages may be supplied; \
                  the driver generates the cross product LANGUAGES x SCANNERS x PARSERS. \
                  Command-line flags override values taken from the runtime configuration. \
                  Exit codes: 0 success, 1 argument error, 2 scanner-specification failure, \
                  3 parser-specification failure, 4 emission failure."
)]
pub struct Cli {
    /// Collect arguments from an INI runtime configuration instead of the command line
    #[arg(short = 'c', long = "configuration", value_name = "rcfile")]
    pub configuration: Option<PathBuf>,

    /// Source encoding for the generated output
    #[arg(short = 'e', long = "encoding", value_enum)]
    pub encoding: Option<EncodingArg>,

    /// Overwrite pre-existing output files
    #[arg(short = 'f', long = "force")]
    pub force: bool,

    /// Target languages for code generation
    #[arg(short = 'g', long = "generate", value_name = "lang", num_args = 1..)]
    pub generate: Vec<String>,

    /// Write a template runtime configuration and exit
    #[arg(
        short = 'G',
        long = "generate-rcfile",
        value_name = "rcfile",
        num_args = 0..=1,
        default_missing_value = ".sprigrc"
    )]
    pub generate_rcfile: Option<PathBuf>,

    /// Text matching strategy for generated scanners
    #[arg(short = 'm', long = "match", value_enum)]
    pub match_policy: Option<MatchArg>,

    /// Base filename for generated outputs
    #[arg(short = 'o', long = "output", value_name = "base-filename")]
    pub output: Option<String>,

    /// Parser specification files
    #[arg(short = 'p', long = "parsers", value_name = "filepath", num_args = 1..)]
    pub parsers: Vec<PathBuf>,

    /// Scanner specification files
    #[arg(short = 's', long = "scanners", value_name = "filepath", num_args = 1..)]
    pub scanners: Vec<PathBuf>,

    /// Report the wall time taken for each step
    #[arg(short = 't', long = "time")]
    pub time: bool,

    /// Output more information while running
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum EncodingArg {
    Table,
    Direct,
}

impl From<EncodingArg> for Encoding {
    fn from(arg: EncodingArg) -> Self {
        match arg {
            EncodingArg::Table => Encoding::Table,
            EncodingArg::Direct => Encoding::Direct,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum MatchArg {
    Longest,
    Shortest,
}

impl From<MatchArg> for MatchPolicy {
    fn from(arg: MatchArg) -> Self {
        match arg {
            MatchArg::Longest => MatchPolicy::Longest,
            MatchArg::Shortest => MatchPolicy::Shortest,
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;

    #[test]
    fn flags_parse() {
        let cli = Cli::parse_from([
            "sprig", "-e", "table", "-m", "shortest", "-o", "base", "-g", "c", "python", "-f",
            "-t", "-v",
        ]);
        assert_eq!(cli.encoding, Some(EncodingArg::Table));
        assert_eq!(cli.match_policy, Some(MatchArg::Shortest));
        assert_eq!(cli.output.as_deref(), Some("base"));
        assert_eq!(cli.generate, ["c", "python"]);
        assert!(cli.force && cli.time && cli.verbose);
    }

    #[test]
    fn rcfile_flag_defaults_its_filename() {
        let cli = Cli::parse_from(["sprig", "-G"]);
        assert_eq!(cli.generate_rcfile.as_deref(), Some(".sprigrc".as_ref()));

        let cli = Cli::parse_from(["sprig", "-G", "custom.rc"]);
        assert_eq!(cli.generate_rcfile.as_deref(), Some("custom.rc".as_ref()));
    }

    #[test]
    fn spec_lists_accumulate() {
        let cli = Cli::parse_from(["sprig", "-s", "a.json", "b.json", "-p", "c.json"]);
        assert_eq!(cli.scanners.len(), 2);
        assert_eq!(cli.parsers.len(), 1);
    }

    #[test]
    fn unknown_encodings_are_rejected() {
        assert!(Cli::try_parse_from(["sprig", "-e", "compressed"]).is_err());
    }
}

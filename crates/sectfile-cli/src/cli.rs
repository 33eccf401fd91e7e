use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "sectfile",
    about = "Read and edit sectioned flat-text stores",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,

    /// TOML file with store settings
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Directory holding store files
    #[arg(long, global = true, value_name = "DIR")]
    pub dir: Option<PathBuf>,

    /// Store name, without extension
    #[arg(long, global = true)]
    pub name: Option<String>,

    /// Store file extension
    #[arg(long, global = true, value_name = "EXT")]
    pub ext: Option<String>,

    /// Legacy rewrites: first line is a header, unreplaced final block is dropped
    #[arg(long, global = true)]
    pub legacy: bool,
}

#[derive(Clone, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Create the store file (and its directory) if missing
    Init,
    /// Report whether the store file exists
    Exists,
    /// Print the body of the first matching section
    Get(SectionArgs),
    /// Print the first line of the first matching section
    GetLine(SectionArgs),
    /// Replace the body of every matching section
    Set(SetArgs),
    /// Replace every matching section body with a single line
    SetLine(SetLineArgs),
    /// Append an empty section at the end of the store
    Append(SectionArgs),
    /// List section names in file order
    List,
    /// Print every line of the store
    Dump,
}

#[derive(Args)]
pub struct SectionArgs {
    pub section: String,
}

#[derive(Args)]
pub struct SetArgs {
    pub section: String,
    pub lines: Vec<String>,
    /// Read body lines from standard input
    #[arg(long, conflicts_with = "lines")]
    pub stdin: bool,
}

#[derive(Args)]
pub struct SetLineArgs {
    pub section: String,
    pub line: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_init() {
        let cli = Cli::try_parse_from(["sectfile", "init"]).unwrap();
        assert!(matches!(cli.command, Command::Init));
    }

    #[test]
    fn parse_get() {
        let cli = Cli::try_parse_from(["sectfile", "get", "Supplies"]).unwrap();
        if let Command::Get(args) = cli.command {
            assert_eq!(args.section, "Supplies");
        } else { panic!("wrong command"); }
    }

    #[test]
    fn parse_get_line() {
        let cli = Cli::try_parse_from(["sectfile", "get-line", "Name"]).unwrap();
        assert!(matches!(cli.command, Command::GetLine(_)));
    }

    #[test]
    fn parse_set_lines() {
        let cli = Cli::try_parse_from(["sectfile", "set", "Supplies", "food", "oxen"]).unwrap();
        if let Command::Set(args) = cli.command {
            assert_eq!(args.section, "Supplies");
            assert_eq!(args.lines, vec!["food", "oxen"]);
            assert!(!args.stdin);
        } else { panic!("wrong command"); }
    }

    #[test]
    fn parse_set_stdin() {
        let cli = Cli::try_parse_from(["sectfile", "set", "Supplies", "--stdin"]).unwrap();
        if let Command::Set(args) = cli.command {
            assert!(args.stdin);
            assert!(args.lines.is_empty());
        } else { panic!("wrong command"); }
    }

    #[test]
    fn reject_stdin_with_lines() {
        assert!(Cli::try_parse_from(["sectfile", "set", "S", "x", "--stdin"]).is_err());
    }

    #[test]
    fn parse_set_line() {
        let cli = Cli::try_parse_from(["sectfile", "set-line", "Name", "Ezra"]).unwrap();
        if let Command::SetLine(args) = cli.command {
            assert_eq!(args.section, "Name");
            assert_eq!(args.line, "Ezra");
        } else { panic!("wrong command"); }
    }

    #[test]
    fn parse_store_location() {
        let cli = Cli::try_parse_from([
            "sectfile", "list", "--dir", "/tmp/saves", "--name", "slot1", "--ext", "sav",
        ])
        .unwrap();
        assert_eq!(cli.dir, Some(PathBuf::from("/tmp/saves")));
        assert_eq!(cli.name, Some("slot1".into()));
        assert_eq!(cli.ext, Some("sav".into()));
    }

    #[test]
    fn parse_legacy_and_json() {
        let cli = Cli::try_parse_from(["sectfile", "--legacy", "--format", "json", "dump"]).unwrap();
        assert!(cli.legacy);
        assert!(matches!(cli.format, OutputFormat::Json));
    }

    #[test]
    fn missing_section_argument_is_an_error() {
        assert!(Cli::try_parse_from(["sectfile", "append"]).is_err());
    }
}

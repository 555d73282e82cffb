use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "license-notices",
    about = "Collect third-party license notices for the installed dependencies a build ships",
    version
)]
pub struct Cli {
    /// Base directory the file paths live under
    #[arg(default_value = ".")]
    pub base: PathBuf,

    /// Read newline-separated file paths from stdin
    #[arg(long, conflicts_with = "files")]
    pub stdin: bool,

    /// Read newline-separated file paths from FILE
    #[arg(long, value_name = "FILE")]
    pub files: Option<PathBuf>,

    /// Config file [default: <BASE>/.license-notices/config.toml, fallback ~/.config/license-notices/config.toml]
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Folder holding installed packages (overrides config)
    #[arg(long, value_name = "DIR")]
    pub dependency_root: Option<String>,

    /// Manifest file name (overrides config)
    #[arg(long, value_name = "NAME")]
    pub manifest_file: Option<String>,

    /// Output format
    #[arg(long, default_value = "text", value_name = "FORMAT")]
    pub format: OutputFormat,

    /// Write the report to FILE instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Log every resolution step
    #[arg(short, long, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only print errors
    #[arg(short, long)]
    pub quiet: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Plain-text notices, one block per package
    Text,
    /// JSON array of packages with their license text
    Json,
    /// Summary table
    Table,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["license-notices"]).unwrap();
        assert_eq!(cli.base, PathBuf::from("."));
        assert_eq!(cli.format, OutputFormat::Text);
        assert!(!cli.stdin);
        assert!(cli.output.is_none());
    }

    #[test]
    fn test_stdin_conflicts_with_files() {
        let res = Cli::try_parse_from(["license-notices", "--stdin", "--files", "list.txt"]);
        assert!(res.is_err());
    }

    #[test]
    fn test_overrides() {
        let cli = Cli::try_parse_from([
            "license-notices",
            "dist",
            "--dependency-root",
            "vendor",
            "--format",
            "json",
            "-o",
            "NOTICES.json",
        ])
        .unwrap();
        assert_eq!(cli.base, PathBuf::from("dist"));
        assert_eq!(cli.dependency_root.as_deref(), Some("vendor"));
        assert_eq!(cli.format, OutputFormat::Json);
        assert_eq!(cli.output, Some(PathBuf::from("NOTICES.json")));
    }
}

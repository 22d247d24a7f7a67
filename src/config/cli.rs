use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "fake-file")]
#[command(about = "Generate fake files for tests and fixtures")]
pub struct CliConfig {
    #[arg(long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Log as JSON lines")]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Generate files with a single provider.
    Generate(GenerateArgs),
    /// Generate every file listed in a TOML batch file.
    Run {
        #[arg(long, short)]
        config: PathBuf,
    },
    /// List providers and generators.
    List,
}

#[derive(Debug, Clone, clap::Args)]
pub struct GenerateArgs {
    /// Provider name, e.g. `docx_file`.
    pub provider: String,

    #[arg(long, short = 'n', default_value = "1")]
    pub count: usize,

    #[arg(long, default_value_os_t = std::env::temp_dir())]
    pub root_path: PathBuf,

    #[arg(long, default_value = "tmp")]
    pub rel_path: String,

    #[arg(long)]
    pub prefix: Option<String>,

    #[arg(long)]
    pub basename: Option<String>,

    /// Provider options as a JSON object.
    #[arg(long, default_value = "{}")]
    pub options: String,

    #[arg(long)]
    pub seed: Option<u64>,

    /// Write the bytes of a single file to stdout instead of storing it.
    #[arg(long)]
    pub raw: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_generate() {
        let cli = CliConfig::parse_from([
            "fake-file",
            "generate",
            "pdf_file",
            "-n",
            "3",
            "--prefix",
            "zzz_",
            "--options",
            r#"{"max_nb_chars": 100}"#,
            "--verbose",
        ]);
        assert!(cli.verbose);
        match cli.command {
            Command::Generate(args) => {
                assert_eq!(args.provider, "pdf_file");
                assert_eq!(args.count, 3);
                assert_eq!(args.prefix.as_deref(), Some("zzz_"));
                assert_eq!(args.rel_path, "tmp");
                assert!(!args.raw);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_parse_run_and_list() {
        let cli = CliConfig::parse_from(["fake-file", "run", "--config", "batch.toml"]);
        assert!(matches!(cli.command, Command::Run { ref config } if config == &PathBuf::from("batch.toml")));

        let cli = CliConfig::parse_from(["fake-file", "list"]);
        assert!(matches!(cli.command, Command::List));
    }
}

use std::path::PathBuf;

use clap::Parser;
use tracker_app::OutputFormat;

/// Flags shared by the daily token report binaries.
#[derive(Debug, Clone, Parser)]
pub struct ReportArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
    /// Pretty-print JSON output (indented, sorted keys)
    #[arg(long)]
    pub pretty: bool,
    /// Save the daily totals to the summary database
    #[arg(long)]
    pub save: bool,
    /// Read logs from this directory instead of the discovered one
    #[arg(long, value_name = "DIR")]
    pub dir: Option<PathBuf>,
    /// Config file to use instead of the default location
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,
    /// Log debug diagnostics to stderr
    #[arg(short, long)]
    pub verbose: bool,
}

impl ReportArgs {
    pub fn output_format(&self) -> OutputFormat {
        if self.json {
            OutputFormat::Json {
                pretty: self.pretty,
            }
        } else {
            OutputFormat::Text
        }
    }
}

#[derive(Debug, Clone, Parser)]
#[command(name = "format-log", about = "Format and display OpenClaw logs")]
pub struct FormatLogArgs {
    /// Log file to display (auto-detects the latest if not specified)
    pub log_file: Option<PathBuf>,
    /// Follow the log file for new entries
    #[arg(short, long)]
    pub follow: bool,
    /// Number of lines to show
    #[arg(short = 'n', long, default_value_t = 20)]
    pub lines: usize,
    /// Include the full _meta fields in output
    #[arg(short = 'l', long)]
    pub full_meta: bool,
    /// Disable ANSI colors (NO_COLOR is honored too)
    #[arg(long)]
    pub no_color: bool,
    /// Config file to use instead of the default location
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,
    /// Log debug diagnostics to stderr
    #[arg(short, long)]
    pub verbose: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_flags_select_format() {
        let args = ReportArgs::try_parse_from(["claude-tokens-daily", "--json", "--pretty"])
            .expect("parse");
        assert_eq!(args.output_format(), OutputFormat::Json { pretty: true });

        let args = ReportArgs::try_parse_from(["claude-tokens-daily", "--pretty", "--save"])
            .expect("parse");
        assert_eq!(args.output_format(), OutputFormat::Text);
        assert!(args.save);
    }

    #[test]
    fn format_log_defaults() {
        let args = FormatLogArgs::try_parse_from(["format-log"]).expect("parse");
        assert_eq!(args.lines, 20);
        assert!(!args.follow);
        assert!(args.log_file.is_none());

        let args = FormatLogArgs::try_parse_from(["format-log", "-f", "-n", "5", "-l", "app.log"])
            .expect("parse");
        assert!(args.follow && args.full_meta);
        assert_eq!(args.lines, 5);
        assert_eq!(args.log_file, Some(PathBuf::from("app.log")));
    }

    #[test]
    fn rejects_unknown_flags() {
        assert!(ReportArgs::try_parse_from(["qwen-tokens-daily", "--yaml"]).is_err());
    }
}

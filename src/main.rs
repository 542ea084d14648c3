use std::io::{self, Read};
use std::path::PathBuf;

use clap::Parser;

use sqlpretty::layout::{CommaPosition, LetterCase};
use sqlpretty::mode::Mode;

/// sqlpretty - a dialect-aware SQL formatter.
#[derive(Parser, Debug)]
#[command(name = "sqlpretty", version, about)]
struct Cli {
    /// Files or directories to format. Use "-" to read from stdin.
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// SQL dialect: standard, postgresql, mariadb, trino.
    #[arg(short = 'd', long)]
    dialect: Option<String>,

    /// Spaces per indentation level.
    #[arg(short = 'i', long)]
    indent: Option<usize>,

    /// Casing for reserved words.
    #[arg(long, value_enum)]
    keyword_case: Option<LetterCase>,

    /// Casing for function names.
    #[arg(long, value_enum)]
    function_case: Option<LetterCase>,

    /// Comma placement in broken lists.
    #[arg(long, value_enum)]
    comma: Option<CommaPosition>,

    /// Check formatting without writing changes.
    #[arg(long)]
    check: bool,

    /// Show formatting diff.
    #[arg(long)]
    diff: bool,

    /// Skip safety equivalence check (faster).
    #[arg(long)]
    fast: bool,

    /// Print the token table instead of formatting (stdin only).
    #[arg(long)]
    tokens: bool,

    /// Glob patterns to exclude.
    #[arg(long)]
    exclude: Vec<String>,

    /// Path to config file (sqlpretty.toml or pyproject.toml).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Verbose output.
    #[arg(short, long)]
    verbose: bool,

    /// Quiet output (errors only).
    #[arg(short, long)]
    quiet: bool,

    /// Number of threads for parallel processing (0 = all cores).
    #[arg(short = 't', long)]
    threads: Option<usize>,

    /// Disable multi-threaded processing.
    #[arg(long)]
    single_process: bool,
}

fn main() {
    let cli = Cli::parse();

    let is_stdin = cli.files.len() == 1 && cli.files[0].to_string_lossy() == "-";

    let mut mode = match sqlpretty::load_config(&cli.files, cli.config.as_deref()) {
        Ok(mode) => mode,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            std::process::exit(2);
        }
    };

    // Command-line options win over the config file, but only when given.
    if let Some(dialect) = cli.dialect {
        mode.dialect_name = dialect;
    }
    if let Some(indent) = cli.indent {
        mode.indent_width = indent;
    }
    if let Some(case) = cli.keyword_case {
        mode.keyword_case = case;
    }
    if let Some(case) = cli.function_case {
        mode.function_case = case;
    }
    if let Some(comma) = cli.comma {
        mode.comma_position = comma;
    }
    if !cli.exclude.is_empty() {
        mode.exclude = cli.exclude;
    }
    if let Some(threads) = cli.threads {
        mode.threads = threads;
    }
    mode.check = cli.check;
    mode.diff = cli.diff;
    mode.fast = cli.fast;
    mode.verbose = cli.verbose;
    mode.quiet = cli.quiet;
    mode.single_process = cli.single_process;

    if is_stdin {
        let mut source = String::new();
        if let Err(e) = io::stdin().read_to_string(&mut source) {
            eprintln!("Error reading stdin: {}", e);
            std::process::exit(2);
        }

        if cli.tokens {
            match sqlpretty::tokenize_string(&source, &mode) {
                Ok(rows) => {
                    for (kind, text, offset, len) in rows {
                        println!("{offset}\t{len}\t{kind:?}\t{text:?}");
                    }
                }
                Err(e) => {
                    eprintln!("Error: {}", e);
                    std::process::exit(2);
                }
            }
            return;
        }

        match sqlpretty::format_string(&source, &mode) {
            Ok(formatted) => {
                print!("{}", formatted);
            }
            Err(e) => {
                eprintln!("Error: {}", e);
                std::process::exit(2);
            }
        }
    } else {
        let report = sqlpretty::run(&cli.files, &mode);

        if !mode.quiet {
            print_verbose_results(&report, &mode);
            eprintln!("{}", report.summary(mode.check));
        }

        report.print_errors();

        if report.has_errors() {
            std::process::exit(2);
        } else if mode.check && report.has_changes() {
            std::process::exit(1);
        }
    }
}

fn print_verbose_results(report: &sqlpretty::report::Report, mode: &Mode) {
    if !mode.verbose {
        return;
    }
    for result in &report.results {
        match result.status {
            sqlpretty::report::FileStatus::Changed => {
                eprintln!("reformatted {}", result.path.display());
            }
            sqlpretty::report::FileStatus::Error => {
                eprintln!(
                    "error: {}: {}",
                    result.path.display(),
                    result.error.as_deref().unwrap_or("unknown error")
                );
            }
            sqlpretty::report::FileStatus::Unchanged => {}
        }
    }
}

//! progsheet CLI
//!
//! プログラミングシートを読み込み、JSONドキュメントを出力します。
//! 入力・出力を省略した場合は標準入力・標準出力を使用します。

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use progsheet::{
    Converter, ConverterBuilder, Dialect, DialectConfig, OutputFormat, ProgSheetError,
    SheetSelector,
};

#[derive(Parser, Debug)]
#[command(name = "progsheet")]
#[command(about = "Convert an automation programming spreadsheet into normalized JSON", long_about = None)]
#[command(version)]
struct Cli {
    /// Input spreadsheet (XLSX/XLS/XLSB/ODS). Reads stdin when omitted
    input: Option<PathBuf>,

    /// Output JSON file. Writes stdout when omitted
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Schema dialect of the sheet
    #[arg(long, value_enum, default_value_t = DialectArg::Auto)]
    dialect: DialectArg,

    /// Custom dialect table (JSON); overrides --dialect
    #[arg(long, value_name = "FILE")]
    dialect_config: Option<PathBuf>,

    /// Select the first worksheet whose name contains PATTERN
    #[arg(long, value_name = "PATTERN")]
    sheet: Option<String>,

    /// Treat the first used row as a column header and skip it
    #[arg(long)]
    header_row: bool,

    /// Emit single-line JSON instead of 4-space indented JSON
    #[arg(long)]
    compact: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum DialectArg {
    Auto,
    Prefixed,
    Keyword,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let converter = match build_converter(&cli) {
        Ok(converter) => converter,
        Err(e) => {
            handle_error(&e);
            return ExitCode::FAILURE;
        }
    };

    match run(&cli, &converter) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) if e.is_no_data() => {
            // シートがないことは入力の破損ではない
            tracing::warn!("{}", e);
            match write_error(&converter, &e, cli.output.as_deref()) {
                Ok(()) => ExitCode::SUCCESS,
                Err(write_err) => {
                    handle_error(&write_err);
                    ExitCode::FAILURE
                }
            }
        }
        Err(e) => {
            handle_error(&e);
            // 診断は標準エラー、エラードキュメントは標準出力へ
            let _ = converter.render_error(&e, io::stdout().lock());
            ExitCode::FAILURE
        }
    }
}

fn build_converter(cli: &Cli) -> Result<Converter, ProgSheetError> {
    let mut builder = ConverterBuilder::new()
        .with_header_row(cli.header_row)
        .with_output_format(if cli.compact {
            OutputFormat::Compact
        } else {
            OutputFormat::Pretty
        });

    if let Some(pattern) = &cli.sheet {
        builder = builder.with_sheet_selector(SheetSelector::Contains(pattern.clone()));
    }

    builder = match (&cli.dialect_config, cli.dialect) {
        (Some(path), _) => {
            let json = fs::read_to_string(path)?;
            builder.with_dialect_config(DialectConfig::from_json(&json)?)
        }
        (None, DialectArg::Auto) => builder,
        (None, DialectArg::Prefixed) => builder.with_dialect(Dialect::Prefixed),
        (None, DialectArg::Keyword) => builder.with_dialect(Dialect::Keyword),
    };

    builder.build()
}

fn run(cli: &Cli, converter: &Converter) -> Result<(), ProgSheetError> {
    let document = match &cli.input {
        Some(path) => converter.parse_document(File::open(path)?)?,
        None => converter.parse_document(io::stdin().lock())?,
    };

    let mut output = open_output(cli.output.as_deref())?;
    converter.render(&document, &mut output)?;
    output.flush()?;
    Ok(())
}

fn write_error(
    converter: &Converter,
    error: &ProgSheetError,
    path: Option<&Path>,
) -> Result<(), ProgSheetError> {
    let mut output = open_output(path)?;
    converter.render_error(error, &mut output)?;
    output.flush()?;
    Ok(())
}

fn open_output(path: Option<&Path>) -> Result<Box<dyn Write>, ProgSheetError> {
    Ok(match path {
        Some(path) => Box::new(BufWriter::new(File::create(path)?)),
        None => Box::new(BufWriter::new(io::stdout().lock())),
    })
}

fn handle_error(error: &ProgSheetError) {
    match error {
        ProgSheetError::Io(io_err) => {
            eprintln!("I/O Error: {}", io_err);
            eprintln!("Please check that the file exists and you have permission to access it.");
        }
        ProgSheetError::Parse(parse_err) => {
            eprintln!("Parse Error: {}", parse_err);
            eprintln!("The input may not be a spreadsheet or may be corrupted.");
        }
        ProgSheetError::Json(json_err) => {
            eprintln!("JSON Error: {}", json_err);
            eprintln!("Please check the dialect table passed with --dialect-config.");
        }
        ProgSheetError::Config(msg) => {
            eprintln!("Configuration Error: {}", msg);
            eprintln!("Please check your sheet pattern or dialect table.");
        }
        ProgSheetError::NoProgrammingSheet { selector } => {
            eprintln!("No programming sheet: {}", selector);
        }
        ProgSheetError::SecurityViolation(msg) => {
            eprintln!("Security Violation: {}", msg);
            eprintln!("The input violates security constraints (e.g., file size limit).");
        }
    }
}


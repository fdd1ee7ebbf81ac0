//! Analyze command - build the dictionary tables for a data file.

use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use colored::Colorize;
use obsdd::{DictionaryBuilder, DictionaryConfig, ErrorPolicy, ObservedDataDictionary, SemanticType};
use tracing::debug;

use crate::cli::OutputFormat;

/// Options for the analyze command.
#[derive(Debug, Clone, Default)]
pub struct AnalyzeOptions {
    pub output_dir: Option<PathBuf>,
    pub format: OutputFormat,
    pub delimiter: Option<char>,
    pub parse_dates: Vec<String>,
    pub config: Option<PathBuf>,
    pub skip_errors: bool,
}

pub fn run(file: PathBuf, options: AnalyzeOptions) -> Result<(), Box<dyn std::error::Error>> {
    // Validate input file exists
    if !file.exists() {
        return Err(format!("File not found: {}", file.display()).into());
    }

    let config = load_config(&options)?;

    println!(
        "{} {}",
        "Analyzing".cyan().bold(),
        file.display().to_string().white()
    );

    let result = DictionaryBuilder::with_config(config).analyze(&file)?;

    println!(
        "Loaded {} rows x {} columns ({})",
        result.source.row_count.to_string().white().bold(),
        result.source.column_count.to_string().white().bold(),
        result.source.format
    );
    println!();
    print_summary(&result.dictionary);

    let output_dir = match options.output_dir {
        Some(dir) => dir,
        None => file.parent().map(Path::to_path_buf).unwrap_or_default(),
    };
    let (summary_path, lookup_path) = output_paths(&file, &output_dir, options.format);
    write_tables(&result.dictionary, &summary_path, &lookup_path, options.format)?;

    println!();
    println!(
        "{} {}",
        "Saved summary to".green().bold(),
        summary_path.display().to_string().white()
    );
    println!(
        "{} {}",
        "Saved lookup to".green().bold(),
        lookup_path.display().to_string().white()
    );

    Ok(())
}

/// Start from the config file, if any, then apply command-line overrides.
fn load_config(options: &AnalyzeOptions) -> Result<DictionaryConfig, Box<dyn std::error::Error>> {
    let mut config = match &options.config {
        Some(path) => {
            debug!(path = %path.display(), "Reading configuration");
            let contents = fs::read_to_string(path)?;
            serde_json::from_str::<DictionaryConfig>(&contents)?
        }
        None => DictionaryConfig::default(),
    };

    if let Some(delimiter) = options.delimiter {
        if !delimiter.is_ascii() {
            return Err(format!("Delimiter must be a single ASCII character, got '{}'", delimiter).into());
        }
        config.parser.delimiter = Some(delimiter as u8);
    }
    for column in &options.parse_dates {
        if !config.parser.parse_dates.contains(column) {
            config.parser.parse_dates.push(column.clone());
        }
    }
    if options.skip_errors {
        config.error_policy = ErrorPolicy::SkipAndReport;
    }

    config.validate()?;
    Ok(config)
}

/// `<stem>.obsdd.<ext>` and `<stem>.lookup.<ext>` inside `output_dir`.
fn output_paths(file: &Path, output_dir: &Path, format: OutputFormat) -> (PathBuf, PathBuf) {
    let stem = file.file_stem().unwrap_or_default().to_string_lossy();
    let ext = format.extension();
    (
        output_dir.join(format!("{}.obsdd.{}", stem, ext)),
        output_dir.join(format!("{}.lookup.{}", stem, ext)),
    )
}

fn write_tables(
    dictionary: &ObservedDataDictionary,
    summary_path: &Path,
    lookup_path: &Path,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(dir) = summary_path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir)?;
    }

    match format {
        OutputFormat::Csv => {
            dictionary.write_summary_csv(BufWriter::new(File::create(summary_path)?))?;
            dictionary.write_lookup_csv(BufWriter::new(File::create(lookup_path)?))?;
        }
        OutputFormat::Json => {
            serde_json::to_writer_pretty(BufWriter::new(File::create(summary_path)?), &dictionary.summary)?;
            serde_json::to_writer_pretty(BufWriter::new(File::create(lookup_path)?), &dictionary.lookup)?;
        }
    }

    Ok(())
}

fn print_summary(dictionary: &ObservedDataDictionary) {
    println!("{}", "Columns:".yellow().bold());
    for record in &dictionary.summary {
        let data_type = format!("{:12}", record.observed_data_type.as_str());
        let data_type = match record.observed_data_type {
            SemanticType::DateTime => data_type.magenta(),
            SemanticType::NumberList | SemanticType::StringList => data_type.cyan(),
            SemanticType::Integer | SemanticType::Decimal => data_type.blue(),
            SemanticType::String => data_type.normal(),
        };

        let mut line = format!(
            "  {:24} {} {:>8} observed {:>6} distinct  missing {}",
            record.var_name,
            data_type,
            record.number_of_observed_values,
            record.number_of_distinct_values,
            record.string_of_missing_stats
        );
        if let Some(numeric) = &record.numeric {
            if !numeric.potential_anomalies.is_empty() {
                line.push_str(&format!(
                    "  {}",
                    format!("{} potential anomalies", numeric.potential_anomalies.len()).red()
                ));
            }
        }
        println!("{}", line);
    }

    if !dictionary.skipped.is_empty() {
        println!();
        println!("{}", "Skipped:".yellow().bold());
        for skipped in &dictionary.skipped {
            println!("  {:24} {}", skipped.var_name, skipped.reason.yellow());
        }
    }

    println!();
    println!(
        "{} summary records, {} lookup rows",
        dictionary.summary.len().to_string().white().bold(),
        dictionary.lookup.len().to_string().white().bold()
    );
}

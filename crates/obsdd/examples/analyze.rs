//! Example: Build an observed data dictionary for a tabular data file.
//!
//! Usage:
//!   cargo run --example analyze -- <file_path>
//!
//! Example:
//!   cargo run --example analyze -- cohort.tsv

use std::env;
use std::path::Path;

use obsdd::{DictionaryBuilder, DictionaryConfig, ErrorPolicy};

fn main() -> obsdd::Result<()> {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: cargo run --example analyze -- <file_path>");
        eprintln!("\nExample:");
        eprintln!("  cargo run --example analyze -- cohort.tsv");
        std::process::exit(1);
    }

    let file_path = &args[1];
    let path = Path::new(file_path);

    if !path.exists() {
        eprintln!("Error: File not found: {}", file_path);
        std::process::exit(1);
    }

    let separator = "=".repeat(80);
    println!("{}", separator);
    println!("Observed Data Dictionary: {}", file_path);
    println!("{}", separator);
    println!();

    let config = DictionaryConfig::default().with_error_policy(ErrorPolicy::SkipAndReport);
    let result = DictionaryBuilder::with_config(config).analyze(path)?;

    println!("## Source Metadata");
    println!("  File: {}", result.source.file);
    println!("  Format: {}", result.source.format);
    println!("  Rows: {}", result.source.row_count);
    println!("  Columns: {}", result.source.column_count);
    println!("  Hash: {}", result.source.hash);
    println!();

    let dictionary = &result.dictionary;

    println!("## Summary ({} columns)", dictionary.summary.len());
    println!();
    for record in &dictionary.summary {
        println!(
            "  {:20} {:10} observed={:<6} distinct={:<6} missing={}",
            record.var_name,
            record.observed_data_type.as_str(),
            record.number_of_observed_values,
            record.number_of_distinct_values,
            record.string_of_missing_stats
        );
        if let Some(list) = &record.list {
            if list.permissible_values.len() <= 10 {
                let values: Vec<String> = list.permissible_values.iter().map(|v| v.to_string()).collect();
                println!("                       values: [{}]", values.join(", "));
            }
        }
        if let Some(numeric) = &record.numeric {
            println!(
                "                       range: {} .. {}  mean={}  median={}",
                numeric.min, numeric.max, numeric.mean, numeric.median
            );
            if !numeric.potential_anomalies.is_empty() {
                println!("                       anomalies: {:?}", numeric.potential_anomalies);
            }
        }
    }
    println!();

    println!("## Lookup ({} rows)", dictionary.lookup.len());
    println!();
    for row in &dictionary.lookup {
        println!(
            "  {:20} {:20} {:>6}  {:>8}  {:>8}",
            row.var_name,
            row.var_value.to_string(),
            row.value_count,
            row.val_pct_keep_missing_in_total,
            row.val_pct_drop_missing_in_total
        );
    }
    println!();

    if !dictionary.skipped.is_empty() {
        println!("## Skipped ({})", dictionary.skipped.len());
        for skipped in &dictionary.skipped {
            println!("  {:20} {}", skipped.var_name, skipped.reason);
        }
        println!();
    }

    println!("{}", separator);

    Ok(())
}

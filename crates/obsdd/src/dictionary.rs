//! DictionaryBuilder and public API.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::data::{Column, Dataset};
use crate::error::Result;
use crate::inference::{ClassifierConfig, TypeClassifier};
use crate::input::{Parser, ParserConfig, SourceMetadata};
use crate::model::{LookupRow, ObservedDataDictionary, SkippedColumn, SummaryRecord};
use crate::stats::{AnomalyConfig, common_statistics, list_statistics, lookup_rows, numeric_statistics};

/// What to do when a single column cannot be summarized.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorPolicy {
    /// Abort the whole build on the first failing column.
    #[default]
    FailFast,
    /// Leave the column out of both tables and record why.
    SkipAndReport,
}

/// Configuration for dictionary construction.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DictionaryConfig {
    /// Parser configuration, used by [`DictionaryBuilder::analyze`].
    pub parser: ParserConfig,
    /// Type classification configuration.
    pub classifier: ClassifierConfig,
    /// Anomaly detection configuration.
    pub anomaly: AnomalyConfig,
    /// Per-column error handling.
    pub error_policy: ErrorPolicy,
}

impl DictionaryConfig {
    pub fn with_parser(mut self, parser: ParserConfig) -> Self {
        self.parser = parser;
        self
    }

    pub fn with_classifier(mut self, classifier: ClassifierConfig) -> Self {
        self.classifier = classifier;
        self
    }

    pub fn with_anomaly(mut self, anomaly: AnomalyConfig) -> Self {
        self.anomaly = anomaly;
        self
    }

    pub fn with_error_policy(mut self, error_policy: ErrorPolicy) -> Self {
        self.error_policy = error_policy;
        self
    }

    /// Check that the configuration can drive a build.
    pub fn validate(&self) -> Result<()> {
        self.anomaly.validate()
    }
}

/// Result of analyzing a data file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DictionaryResult {
    /// Metadata about the source file.
    pub source: SourceMetadata,
    /// The observed data dictionary.
    pub dictionary: ObservedDataDictionary,
}

/// Builds observed data dictionaries.
#[derive(Debug, Clone)]
pub struct DictionaryBuilder {
    config: DictionaryConfig,
    parser: Parser,
    classifier: TypeClassifier,
}

impl DictionaryBuilder {
    /// Create a builder with default configuration.
    pub fn new() -> Self {
        Self::with_config(DictionaryConfig::default())
    }

    /// Create a builder with custom configuration.
    pub fn with_config(config: DictionaryConfig) -> Self {
        let parser = Parser::with_config(config.parser.clone());
        let classifier = TypeClassifier::with_config(config.classifier.clone());

        Self {
            config,
            parser,
            classifier,
        }
    }

    pub fn config(&self) -> &DictionaryConfig {
        &self.config
    }

    /// Load a data file and build its dictionary.
    pub fn analyze(&self, path: impl AsRef<Path>) -> Result<DictionaryResult> {
        self.config.validate()?;
        let (dataset, source) = self.parser.parse_file(path)?;
        let dictionary = self.build(&dataset)?;

        Ok(DictionaryResult { source, dictionary })
    }

    /// Build the summary and lookup tables for every column, in order.
    pub fn build(&self, dataset: &Dataset) -> Result<ObservedDataDictionary> {
        self.config.validate()?;

        let mut dictionary = ObservedDataDictionary::new();

        for column in dataset.columns() {
            match self.summarize_column(column) {
                Ok((record, mut lookup)) => {
                    dictionary.summary.push(record);
                    dictionary.lookup.append(&mut lookup);
                }
                Err(e) if self.config.error_policy == ErrorPolicy::SkipAndReport => {
                    warn!(column = column.name(), error = %e, "Skipping column");
                    dictionary.skipped.push(SkippedColumn {
                        var_name: column.name().to_string(),
                        reason: e.to_string(),
                    });
                }
                Err(e) => return Err(e),
            }
        }

        info!(
            columns = dictionary.summary.len(),
            lookup_rows = dictionary.lookup.len(),
            skipped = dictionary.skipped.len(),
            "Built observed data dictionary"
        );

        Ok(dictionary)
    }

    /// Summary record and lookup rows of one column.
    pub fn summarize_column(&self, column: &Column) -> Result<(SummaryRecord, Vec<LookupRow>)> {
        let common = common_statistics(column)?;
        let semantic_type = self.classifier.classify(column)?;

        debug!(
            column = column.name(),
            storage = %column.storage_class(),
            semantic_type = %semantic_type,
            observed = common.number_of_observed_values,
            distinct = common.number_of_distinct_values,
            "Summarizing column"
        );

        let mut record = SummaryRecord {
            var_name: column.name().to_string(),
            number_of_observed_values: common.number_of_observed_values,
            number_of_distinct_values: common.number_of_distinct_values,
            string_of_missing_stats: common.string_of_missing_stats,
            observed_data_type: semantic_type,
            list: None,
            numeric: None,
        };

        let mut lookup = Vec::new();
        if semantic_type.is_list() {
            record.list = Some(list_statistics(column, semantic_type));
            lookup = lookup_rows(column)?;
        } else if semantic_type.is_numeric() {
            record.numeric = Some(numeric_statistics(column, &self.config.anomaly)?);
        }

        Ok((record, lookup))
    }
}

impl Default for DictionaryBuilder {
    fn default() -> Self {
        Self::new()
    }
}

//! The fixed operation catalog and the mapping from request flags to steps.

use tracing::{debug, info, info_span, warn};

use crate::config::pipeline::{is_on, CleaningRequest};
use crate::error::{PipelineError, Result};
use crate::executor::{CleaningStep, PipelineExecutor, StepScope};
use crate::pipeline::steps::*;
use crate::utils::spelling::{DictionarySource, SpellChecker};

/// One entry of the catalog. Uppercase and lowercase share `CaseConversion`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    RemoveSpaces,
    RemoveNulls,
    ReplaceChars,
    RemoveChars,
    CaseConversion,
    TitleCase,
    RemoveDuplicateRows,
    RemoveDuplicateColumns,
    RemoveEmptyRows,
    RemoveEmptyColumns,
    RemoveNegative,
    SortAscending,
    SortDescending,
    RemovePunctuation,
    RemoveNumericChars,
    RemoveAlphaChars,
    RemoveNonAlphanumeric,
    RemoveHtml,
    RemoveUrls,
    CheckSpelling,
    RemoveOutOfRange,
    ShortenVowel,
}

/// Execution order. Operations always run in this order, whatever order the
/// request listed them in.
pub const CATALOG: [Operation; 22] = [
    Operation::RemoveSpaces,
    Operation::RemoveNulls,
    Operation::ReplaceChars,
    Operation::RemoveChars,
    Operation::CaseConversion,
    Operation::TitleCase,
    Operation::RemoveDuplicateRows,
    Operation::RemoveDuplicateColumns,
    Operation::RemoveEmptyRows,
    Operation::RemoveEmptyColumns,
    Operation::RemoveNegative,
    Operation::SortAscending,
    Operation::SortDescending,
    Operation::RemovePunctuation,
    Operation::RemoveNumericChars,
    Operation::RemoveAlphaChars,
    Operation::RemoveNonAlphanumeric,
    Operation::RemoveHtml,
    Operation::RemoveUrls,
    Operation::CheckSpelling,
    Operation::RemoveOutOfRange,
    Operation::ShortenVowel,
];

impl Operation {
    pub fn name(self) -> &'static str {
        match self {
            Operation::RemoveSpaces => "remove_spaces",
            Operation::RemoveNulls => "remove_nulls",
            Operation::ReplaceChars => "replace_chars",
            Operation::RemoveChars => "remove_chars",
            Operation::CaseConversion => "case_conversion",
            Operation::TitleCase => "title_case",
            Operation::RemoveDuplicateRows => "remove_duplicate_rows",
            Operation::RemoveDuplicateColumns => "remove_duplicate_columns",
            Operation::RemoveEmptyRows => "remove_empty_rows",
            Operation::RemoveEmptyColumns => "remove_empty_columns",
            Operation::RemoveNegative => "remove_negative",
            Operation::SortAscending => "sort_ascending",
            Operation::SortDescending => "sort_descending",
            Operation::RemovePunctuation => "remove_punctuation",
            Operation::RemoveNumericChars => "remove_numeric_chars",
            Operation::RemoveAlphaChars => "remove_alpha_chars",
            Operation::RemoveNonAlphanumeric => "remove_non_alphanumeric",
            Operation::RemoveHtml => "remove_html",
            Operation::RemoveUrls => "remove_urls",
            Operation::CheckSpelling => "check_spelling",
            Operation::RemoveOutOfRange => "remove_out_of_range",
            Operation::ShortenVowel => "shorten_vowel",
        }
    }

    pub fn scope(self) -> StepScope {
        match self {
            Operation::RemoveDuplicateRows
            | Operation::RemoveDuplicateColumns
            | Operation::RemoveEmptyRows
            | Operation::RemoveEmptyColumns => StepScope::Table,
            _ => StepScope::Column,
        }
    }

    /// The only place request flags are inspected.
    pub fn is_enabled(self, request: &CleaningRequest) -> bool {
        match self {
            Operation::RemoveSpaces => is_on(request.remove_spaces),
            Operation::RemoveNulls => is_on(request.remove_nulls),
            Operation::ReplaceChars => request.replace_chars.is_some(),
            Operation::RemoveChars => request.remove_chars.is_some(),
            Operation::CaseConversion => is_on(request.uppercase) || is_on(request.lowercase),
            Operation::TitleCase => is_on(request.title_case),
            Operation::RemoveDuplicateRows => is_on(request.remove_duplicate_rows),
            Operation::RemoveDuplicateColumns => is_on(request.remove_duplicate_columns),
            Operation::RemoveEmptyRows => is_on(request.remove_empty_rows),
            Operation::RemoveEmptyColumns => is_on(request.remove_empty_columns),
            Operation::RemoveNegative => is_on(request.remove_negative),
            Operation::SortAscending => is_on(request.sort_ascending),
            Operation::SortDescending => is_on(request.sort_descending),
            Operation::RemovePunctuation => is_on(request.remove_punctuation),
            Operation::RemoveNumericChars => is_on(request.remove_numeric_chars),
            Operation::RemoveAlphaChars => is_on(request.remove_alpha_chars),
            Operation::RemoveNonAlphanumeric => is_on(request.remove_non_alphanumeric),
            Operation::RemoveHtml => is_on(request.remove_html),
            Operation::RemoveUrls => is_on(request.remove_urls),
            Operation::CheckSpelling => is_on(request.check_spelling),
            Operation::RemoveOutOfRange => is_on(request.remove_out_of_range),
            Operation::ShortenVowel => is_on(request.shorten_vowel),
        }
    }

    /// Checks the parameters this operation needs, without building it.
    pub fn check_parameters(self, request: &CleaningRequest) -> Result<()> {
        match self {
            Operation::ReplaceChars => {
                let has_targets = request
                    .replace_chars
                    .as_ref()
                    .is_some_and(|targets| targets.iter().any(|t| !t.is_empty()));
                if has_targets && request.replacement_string.is_none() {
                    return Err(self.missing("replacement_string"));
                }
            }
            Operation::RemoveOutOfRange => {
                let (min, max) = range_bounds(request)?;
                RemoveOutOfRange::new(min, max)?;
            }
            Operation::ShortenVowel => {
                if request.vowel_letter.is_none() {
                    return Err(self.missing("vowel_letter"));
                }
            }
            _ => {}
        }
        Ok(())
    }

    /// Builds the step for this operation from the request parameters.
    pub fn build(
        self,
        request: &CleaningRequest,
        dictionary: &DictionarySource,
    ) -> Result<Box<dyn CleaningStep>> {
        self.check_parameters(request)?;
        let step: Box<dyn CleaningStep> = match self {
            Operation::RemoveSpaces => Box::new(RemoveSpaces),
            Operation::RemoveNulls => Box::new(RemoveNulls),
            Operation::ReplaceChars => Box::new(ReplaceChars::new(
                request.replace_chars.clone().unwrap_or_default(),
                request.replacement_string.clone().unwrap_or_default(),
            )),
            Operation::RemoveChars => {
                Box::new(RemoveChars::new(request.remove_chars.clone().unwrap_or_default()))
            }
            Operation::CaseConversion => {
                let upper = is_on(request.uppercase);
                if upper && is_on(request.lowercase) {
                    warn!("Both uppercase and lowercase requested; lowercase is ignored");
                }
                let mode = if upper { CaseMode::Upper } else { CaseMode::Lower };
                Box::new(CaseConversion::new(mode))
            }
            Operation::TitleCase => Box::new(TitleCase),
            Operation::RemoveDuplicateRows => Box::new(RemoveDuplicateRows),
            Operation::RemoveDuplicateColumns => Box::new(RemoveDuplicateColumns),
            Operation::RemoveEmptyRows => Box::new(RemoveEmptyRows),
            Operation::RemoveEmptyColumns => Box::new(RemoveEmptyColumns),
            Operation::RemoveNegative => Box::new(RemoveNegative),
            Operation::SortAscending => Box::new(SortColumn::new(SortDirection::Ascending)),
            Operation::SortDescending => Box::new(SortColumn::new(SortDirection::Descending)),
            Operation::RemovePunctuation => Box::new(RemovePunctuation),
            Operation::RemoveNumericChars => Box::new(RemoveNumericChars),
            Operation::RemoveAlphaChars => Box::new(RemoveAlphaChars),
            Operation::RemoveNonAlphanumeric => Box::new(RemoveNonAlphanumeric),
            Operation::RemoveHtml => Box::new(RemoveHtml),
            Operation::RemoveUrls => Box::new(RemoveUrls),
            Operation::CheckSpelling => {
                let dict = dictionary.build()?;
                debug!(words = dict.len(), "Spelling dictionary built");
                Box::new(CheckSpelling::new(SpellChecker::new(dict)))
            }
            Operation::RemoveOutOfRange => {
                let (min, max) = range_bounds(request)?;
                Box::new(RemoveOutOfRange::new(min, max)?)
            }
            Operation::ShortenVowel => {
                Box::new(ShortenVowel::new(request.vowel_letter.clone().unwrap_or_default()))
            }
        };
        Ok(step)
    }

    fn missing(self, parameter: &'static str) -> PipelineError {
        PipelineError::MissingParameter {
            operation: self.name(),
            parameter,
        }
    }
}

fn range_bounds(request: &CleaningRequest) -> Result<(f64, f64)> {
    let op = Operation::RemoveOutOfRange;
    let min = request.min_value.ok_or_else(|| op.missing("min_value"))?;
    let max = request.max_value.ok_or_else(|| op.missing("max_value"))?;
    Ok((min, max))
}

/// Enabled operations, in catalog order.
pub fn resolve_operations(request: &CleaningRequest) -> Vec<Operation> {
    CATALOG
        .iter()
        .copied()
        .filter(|op| op.is_enabled(request))
        .collect()
}

/// Builds the executor for one request. Parameter problems surface here,
/// before any data is touched.
pub fn build_pipeline(
    request: &CleaningRequest,
    dictionary: &DictionarySource,
) -> Result<PipelineExecutor> {
    info!("Building pipeline from request...");
    let mut steps: Vec<Box<dyn CleaningStep>> = Vec::new();

    for (i, operation) in resolve_operations(request).into_iter().enumerate() {
        let step_span = info_span!("build_step", index = i, operation = operation.name());
        let _enter = step_span.enter();
        debug!("Adding {}", operation.name());
        steps.push(operation.build(request, dictionary)?);
    }

    info!(steps = steps.len(), "Pipeline built");
    Ok(PipelineExecutor::new(steps))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::sync::{Arc, Mutex};
    use tracing::span::{Attributes, Id};
    use tracing::Subscriber;
    use tracing_subscriber::layer::{Context, SubscriberExt};
    use tracing_subscriber::Layer;

    /// Records the name of every span opened.
    #[derive(Clone, Default)]
    struct SpanNames(Arc<Mutex<Vec<&'static str>>>);

    impl<S: Subscriber> Layer<S> for SpanNames {
        fn on_new_span(&self, attrs: &Attributes<'_>, _id: &Id, _ctx: Context<'_, S>) {
            self.0.lock().unwrap().push(attrs.metadata().name());
        }
    }

    #[test]
    fn test_catalog_has_each_operation_once() {
        let unique: HashSet<_> = CATALOG.iter().collect();
        assert_eq!(unique.len(), CATALOG.len());
        let names: HashSet<_> = CATALOG.iter().map(|op| op.name()).collect();
        assert_eq!(names.len(), CATALOG.len());
    }

    #[test]
    fn test_default_request_enables_nothing() {
        assert!(resolve_operations(&CleaningRequest::default()).is_empty());
    }

    #[test]
    fn test_uppercase_wins_over_lowercase() {
        let mut request = CleaningRequest::for_column("name");
        request.uppercase = Some(true);
        request.lowercase = Some(true);
        let pipeline = build_pipeline(&request, &DictionarySource::Embedded).unwrap();
        assert_eq!(pipeline.step_names(), vec!["uppercase"]);
    }

    #[test]
    fn test_replace_without_replacement_string() {
        let mut request = CleaningRequest::for_column("name");
        request.replace_chars = Some(vec!["a".to_string()]);
        assert!(matches!(
            build_pipeline(&request, &DictionarySource::Embedded),
            Err(PipelineError::MissingParameter {
                parameter: "replacement_string",
                ..
            })
        ));

        // Nothing to replace, nothing required
        request.replace_chars = Some(vec![]);
        assert!(build_pipeline(&request, &DictionarySource::Embedded).is_ok());
    }

    #[test]
    fn test_vowel_letter_required() {
        let mut request = CleaningRequest::for_column("name");
        request.shorten_vowel = Some(true);
        assert!(matches!(
            Operation::ShortenVowel.check_parameters(&request),
            Err(PipelineError::MissingParameter {
                parameter: "vowel_letter",
                ..
            })
        ));
    }

    #[test]
    fn test_build_spans_are_distinct_from_run_spans() {
        let names = SpanNames::default();
        let subscriber = tracing_subscriber::registry().with(names.clone());
        let mut request = CleaningRequest::for_column("name");
        request.remove_spaces = Some(true);
        request.uppercase = Some(true);
        tracing::subscriber::with_default(subscriber, || {
            build_pipeline(&request, &DictionarySource::Embedded).unwrap();
        });
        assert_eq!(*names.0.lock().unwrap(), vec!["build_step", "build_step"]);
    }
}

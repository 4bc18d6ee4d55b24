use crate::config::read_yaml;
use crate::error::{PipelineError, Result};
use crate::pipeline::catalog::resolve_operations;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// The operation-parameter bundle for one cleaning request.
///
/// Every field is optional. Legacy parameter names (`to_remove_spaces`,
/// `string_to_replace_with`, ...) are accepted as aliases.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct CleaningRequest {
    #[serde(alias = "column")]
    pub column_name: String,
    #[serde(alias = "string_to_replace_with")]
    pub replacement_string: Option<String>,
    #[serde(alias = "to_remove_spaces")]
    pub remove_spaces: Option<bool>,
    #[serde(alias = "to_remove_nulls")]
    pub remove_nulls: Option<bool>,
    // Presence of the list enables the operation; there is no separate flag
    #[serde(alias = "to_replace_chars")]
    pub replace_chars: Option<Vec<String>>,
    #[serde(alias = "to_remove_chars")]
    pub remove_chars: Option<Vec<String>>,
    #[serde(alias = "to_uppercase")]
    pub uppercase: Option<bool>,
    #[serde(alias = "to_lowercase")]
    pub lowercase: Option<bool>,
    #[serde(alias = "to_title_format")]
    pub title_case: Option<bool>,
    #[serde(alias = "to_remove_duplicate_rows")]
    pub remove_duplicate_rows: Option<bool>,
    #[serde(alias = "to_remove_duplicate_columns")]
    pub remove_duplicate_columns: Option<bool>,
    #[serde(alias = "to_remove_empty_row")]
    pub remove_empty_rows: Option<bool>,
    #[serde(alias = "to_remove_empty_column")]
    pub remove_empty_columns: Option<bool>,
    #[serde(alias = "to_remove_negative_values")]
    pub remove_negative: Option<bool>,
    #[serde(alias = "to_arrange_column_ascending")]
    pub sort_ascending: Option<bool>,
    #[serde(alias = "to_arrange_column_descending")]
    pub sort_descending: Option<bool>,
    #[serde(alias = "to_remove_punctuation")]
    pub remove_punctuation: Option<bool>,
    #[serde(alias = "to_remove_numerical_characters")]
    pub remove_numeric_chars: Option<bool>,
    #[serde(alias = "to_remove_alphabetical_characters")]
    pub remove_alpha_chars: Option<bool>,
    #[serde(alias = "to_remove_non_alphanumeric")]
    pub remove_non_alphanumeric: Option<bool>,
    #[serde(alias = "to_remove_html_tags")]
    pub remove_html: Option<bool>,
    #[serde(alias = "to_remove_urls")]
    pub remove_urls: Option<bool>,
    #[serde(alias = "to_check_spelling")]
    pub check_spelling: Option<bool>,
    #[serde(alias = "to_remove_out_of_range_values")]
    pub remove_out_of_range: Option<bool>,
    #[serde(alias = "min_value_of_range")]
    pub min_value: Option<f64>,
    #[serde(alias = "max_value_of_range")]
    pub max_value: Option<f64>,
    #[serde(alias = "to_shorten_hindi_long_vowel")]
    pub shorten_vowel: Option<bool>,
    #[serde(alias = "letter_to_shorten")]
    pub vowel_letter: Option<String>,
}

/// `None` counts as off.
pub(crate) fn is_on(flag: Option<bool>) -> bool {
    flag.unwrap_or(false)
}

impl CleaningRequest {
    pub fn for_column(column_name: impl Into<String>) -> Self {
        CleaningRequest {
            column_name: column_name.into(),
            ..Default::default()
        }
    }

    /// Checks that every enabled operation has the parameters it needs.
    pub fn validate(&self) -> Result<()> {
        for operation in resolve_operations(self) {
            operation.check_parameters(self)?;
        }
        Ok(())
    }

    /// Applies one textual `name=value` pair, as sent by HTML forms, query
    /// strings and the CLI `--set` flag. List parameters append one entry
    /// per call.
    pub fn set_param(&mut self, name: &str, value: &str) -> Result<()> {
        match canonical_param(name) {
            Some("column_name") => self.column_name = value.to_string(),
            Some("replacement_string") => self.replacement_string = Some(value.to_string()),
            Some("replace_chars") => self
                .replace_chars
                .get_or_insert_with(Vec::new)
                .push(value.to_string()),
            Some("remove_chars") => self
                .remove_chars
                .get_or_insert_with(Vec::new)
                .push(value.to_string()),
            Some("min_value") => self.min_value = Some(parse_number(name, value)?),
            Some("max_value") => self.max_value = Some(parse_number(name, value)?),
            Some("vowel_letter") => self.vowel_letter = Some(value.to_string()),
            Some(flag) => match self.flag_mut(flag) {
                Some(slot) => *slot = Some(parse_bool(name, value)?),
                None => return Err(unknown_param(name)),
            },
            None => return Err(unknown_param(name)),
        }
        Ok(())
    }

    fn flag_mut(&mut self, flag: &str) -> Option<&mut Option<bool>> {
        let slot = match flag {
            "remove_spaces" => &mut self.remove_spaces,
            "remove_nulls" => &mut self.remove_nulls,
            "uppercase" => &mut self.uppercase,
            "lowercase" => &mut self.lowercase,
            "title_case" => &mut self.title_case,
            "remove_duplicate_rows" => &mut self.remove_duplicate_rows,
            "remove_duplicate_columns" => &mut self.remove_duplicate_columns,
            "remove_empty_rows" => &mut self.remove_empty_rows,
            "remove_empty_columns" => &mut self.remove_empty_columns,
            "remove_negative" => &mut self.remove_negative,
            "sort_ascending" => &mut self.sort_ascending,
            "sort_descending" => &mut self.sort_descending,
            "remove_punctuation" => &mut self.remove_punctuation,
            "remove_numeric_chars" => &mut self.remove_numeric_chars,
            "remove_alpha_chars" => &mut self.remove_alpha_chars,
            "remove_non_alphanumeric" => &mut self.remove_non_alphanumeric,
            "remove_html" => &mut self.remove_html,
            "remove_urls" => &mut self.remove_urls,
            "check_spelling" => &mut self.check_spelling,
            "remove_out_of_range" => &mut self.remove_out_of_range,
            "shorten_vowel" => &mut self.shorten_vowel,
            _ => return None,
        };
        Some(slot)
    }
}

fn unknown_param(name: &str) -> PipelineError {
    PipelineError::ConfigValidationError(format!("Unknown request parameter '{}'", name))
}

/// Maps a parameter name or one of its legacy aliases to the field name.
fn canonical_param(name: &str) -> Option<&'static str> {
    let canonical = match name {
        "column_name" | "column" => "column_name",
        "replacement_string" | "string_to_replace_with" => "replacement_string",
        "remove_spaces" | "to_remove_spaces" => "remove_spaces",
        "remove_nulls" | "to_remove_nulls" => "remove_nulls",
        "replace_chars" | "to_replace_chars" => "replace_chars",
        "remove_chars" | "to_remove_chars" => "remove_chars",
        "uppercase" | "to_uppercase" => "uppercase",
        "lowercase" | "to_lowercase" => "lowercase",
        "title_case" | "to_title_format" => "title_case",
        "remove_duplicate_rows" | "to_remove_duplicate_rows" => "remove_duplicate_rows",
        "remove_duplicate_columns" | "to_remove_duplicate_columns" => "remove_duplicate_columns",
        "remove_empty_rows" | "to_remove_empty_row" => "remove_empty_rows",
        "remove_empty_columns" | "to_remove_empty_column" => "remove_empty_columns",
        "remove_negative" | "to_remove_negative_values" => "remove_negative",
        "sort_ascending" | "to_arrange_column_ascending" => "sort_ascending",
        "sort_descending" | "to_arrange_column_descending" => "sort_descending",
        "remove_punctuation" | "to_remove_punctuation" => "remove_punctuation",
        "remove_numeric_chars" | "to_remove_numerical_characters" => "remove_numeric_chars",
        "remove_alpha_chars" | "to_remove_alphabetical_characters" => "remove_alpha_chars",
        "remove_non_alphanumeric" | "to_remove_non_alphanumeric" => "remove_non_alphanumeric",
        "remove_html" | "to_remove_html_tags" => "remove_html",
        "remove_urls" | "to_remove_urls" => "remove_urls",
        "check_spelling" | "to_check_spelling" => "check_spelling",
        "remove_out_of_range" | "to_remove_out_of_range_values" => "remove_out_of_range",
        "min_value" | "min_value_of_range" => "min_value",
        "max_value" | "max_value_of_range" => "max_value",
        "shorten_vowel" | "to_shorten_hindi_long_vowel" => "shorten_vowel",
        "vowel_letter" | "letter_to_shorten" => "vowel_letter",
        _ => return None,
    };
    Some(canonical)
}

fn parse_bool(name: &str, value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" | "" => Ok(false),
        _ => Err(PipelineError::ConfigValidationError(format!(
            "Parameter '{}' expects true or false, got '{}'",
            name, value
        ))),
    }
}

fn parse_number(name: &str, value: &str) -> Result<f64> {
    match value.trim().parse::<f64>() {
        Ok(n) if n.is_finite() => Ok(n),
        _ => Err(PipelineError::ConfigValidationError(format!(
            "Parameter '{}' expects a finite number, got '{}'",
            name, value
        ))),
    }
}

/// Loads and validates a cleaning request from a YAML file.
pub fn load_cleaning_request<P: AsRef<Path>>(path: P) -> Result<CleaningRequest> {
    let request: CleaningRequest = read_yaml(path.as_ref(), "cleaning request")?;
    request.validate()?;
    Ok(request)
}

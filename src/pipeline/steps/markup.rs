use crate::data_model::Table;
use crate::error::Result;
use crate::executor::CleaningStep;
use crate::pipeline::steps::map_text_cells;
use crate::utils::text::{HTML_TAG, URL_TOKEN};

/// Strips anything between `<` and the nearest following `>`.
pub struct RemoveHtml;

impl CleaningStep for RemoveHtml {
    fn name(&self) -> &'static str {
        "remove_html"
    }

    fn apply(&self, mut table: Table, column: &str) -> Result<Table> {
        map_text_cells(&mut table, column, self.name(), |s| {
            HTML_TAG.replace_all(s, "").into_owned()
        })?;
        Ok(table)
    }
}

/// Strips tokens starting with `http` or `www` up to the next whitespace.
pub struct RemoveUrls;

impl CleaningStep for RemoveUrls {
    fn name(&self) -> &'static str {
        "remove_urls"
    }

    fn apply(&self, mut table: Table, column: &str) -> Result<Table> {
        map_text_cells(&mut table, column, self.name(), |s| {
            URL_TOKEN.replace_all(s, "").into_owned()
        })?;
        Ok(table)
    }
}

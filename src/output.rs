//! Batch result serialization (JSON and CSV)

use std::path::Path;

use crate::core::errors::Result;
use crate::core::models::BatchResult;

/// Write the full batch as pretty-printed JSON.
pub fn write_json<P: AsRef<Path>>(path: P, batch: &BatchResult) -> Result<()> {
    let content = serde_json::to_string_pretty(batch)?;
    std::fs::write(path, content)?;
    Ok(())
}

/// Write one summary row per word as CSV.
pub fn write_csv<P: AsRef<Path>>(path: P, batch: &BatchResult) -> Result<()> {
    let mut out = String::from("word,source_lang,target_lang,translation,gloss,provider,score\n");
    for aggregate in &batch.words {
        let row = [
            csv_field(&aggregate.word),
            csv_field(&aggregate.source_lang),
            csv_field(&aggregate.target_lang),
            csv_field(aggregate.final_translation.as_deref().unwrap_or("")),
            csv_field(aggregate.final_gloss.as_deref().unwrap_or("")),
            csv_field(aggregate.final_choice_provider.as_deref().unwrap_or("")),
            aggregate
                .final_score
                .map(|s| format!("{:.4}", s))
                .unwrap_or_default(),
        ];
        out.push_str(&row.join(","));
        out.push('\n');
    }
    std::fs::write(path, out)?;
    Ok(())
}

/// Quote a CSV field when it contains a comma, quote, or newline.
fn csv_field(value: &str) -> String {
    if value.contains(',') || value.contains('"') || value.contains('\n') {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

//! Model-output post-processing.

/// Code-fence spellings removed from model output, in removal order.
pub const CODE_FENCES: [&str; 4] = ["```sql\n", "```duckdb\n", "```\n", "```"];

/// Strip code fences, trim, and terminate with exactly one `;`.
///
/// Text after the first `;` is kept: a model that emits two statements gets
/// both back.
pub fn clean_model_output(output: &str) -> String {
    let unfenced = CODE_FENCES
        .iter()
        .fold(output.to_string(), |acc, fence| acc.replace(fence, ""));
    let mut sql = unfenced.trim().to_string();
    if !sql.ends_with(';') {
        sql.push(';');
    }
    sql
}

/// Cut `text` at the first occurrence of each stop sequence, in order.
///
/// Empty stop sequences are ignored.
pub fn apply_stop_sequences(text: &str, stop_sequences: &[String]) -> String {
    let mut out = text;
    for stop in stop_sequences.iter().filter(|s| !s.is_empty()) {
        if let Some((head, _)) = out.split_once(stop.as_str()) {
            out = head;
        }
    }
    out.to_string()
}

use std::path::PathBuf;

/// Expands `${DATE}` and `${HOME}` in an output path template.
pub fn expand_output_template(template: &str, date: &str) -> PathBuf {
    let home_dir = std::env::var("HOME").unwrap_or_else(|_| "/".to_string());
    let replaced = template
        .replace("${DATE}", date)
        .replace("${HOME}", &home_dir);
    PathBuf::from(replaced)
}

const MAX_VISIBLE_LENGTH: usize = 80;

/// Makes a client-supplied file name safe to log: directory components and
/// control characters are removed and long names are shortened.
pub fn sanitize_filename(name: &str) -> String {
    let base = name
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or_default()
        .trim();

    let cleaned: String = base.chars().filter(|c| !c.is_control()).collect();

    if cleaned.is_empty() {
        return String::from("[UNNAMED]");
    }

    let total = cleaned.chars().count();
    if total > MAX_VISIBLE_LENGTH {
        let visible: String = cleaned.chars().take(MAX_VISIBLE_LENGTH).collect();
        format!("{}... ({} chars total)", visible, total)
    } else {
        cleaned
    }
}

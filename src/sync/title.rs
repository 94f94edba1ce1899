//! Page title formatting for the title/accessibility sink

/// Format a hit count with thousand separators
pub fn format_count(count: u64) -> String {
    let digits = count.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// The full document title for a tab and hit count
pub fn page_title(label: &str, count: u64, product_name: &str) -> String {
    format!(
        "{} - ({} hits) - Search - {}",
        label,
        format_count(count),
        product_name
    )
}

/// The short form for the accessible heading element: the first two
/// segments of the full title
pub fn short_heading(full_title: &str) -> String {
    full_title
        .split(" - ")
        .take(2)
        .collect::<Vec<_>>()
        .join(" - ")
}

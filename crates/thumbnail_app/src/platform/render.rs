use thumbnail_core::{AppViewModel, ProgressState};

/// One line per category option, the selected one marked with `*`.
pub(crate) fn category_lines(view: &AppViewModel) -> Vec<String> {
    view.categories
        .iter()
        .map(|option| {
            let marker = if option.value == view.selected_category {
                '*'
            } else {
                ' '
            };
            format!("{marker} {}", option.label)
        })
        .collect()
}

pub(crate) fn progress_line(progress: ProgressState) -> String {
    format!(
        "images {:>3}% | archive {:>3}%",
        progress.image_percent, progress.archive_percent
    )
}

/// Failure messages, each followed by its candidate URLs for manual inspection.
pub(crate) fn failure_lines(view: &AppViewModel) -> Vec<String> {
    let mut lines = Vec::new();
    for row in &view.failures {
        lines.push(row.message.clone());
        lines.extend(row.candidate_urls.iter().map(|url| format!("    {url}")));
    }
    lines
}

pub(crate) fn summary_line(view: &AppViewModel) -> Option<String> {
    let archive = view.archive.as_ref()?;
    Some(format!(
        "{}: {} images, {} bytes, {} reported",
        archive.filename,
        archive.packaged,
        archive.byte_len,
        view.failures.len()
    ))
}

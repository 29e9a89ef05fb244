//! HTML directory listings

use anyhow::{Context, Result};
use std::path::Path;
use tokio::fs;

use crate::files::resolver::Target;

/// One direct child of a listed directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub name: String,
    pub is_dir: bool,
}

/// Reads the direct children of `dir`, sorted by name.
///
/// Symbolic links are classified by what they point at; a dangling link
/// is listed as a file.
pub async fn read_entries(dir: &Path) -> Result<Vec<Entry>> {
    let mut read_dir = fs::read_dir(dir)
        .await
        .with_context(|| format!("Failed to read directory {}", dir.display()))?;

    let mut entries = Vec::new();

    while let Some(entry) = read_dir
        .next_entry()
        .await
        .with_context(|| format!("Failed to read directory {}", dir.display()))?
    {
        let is_dir = fs::metadata(entry.path())
            .await
            .map(|m| m.is_dir())
            .unwrap_or(false);

        entries.push(Entry {
            name: entry.file_name().to_string_lossy().into_owned(),
            is_dir,
        });
    }

    entries.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(entries)
}

/// Lists the directory behind `target` as HTML.
pub async fn render(target: &Target) -> Result<String> {
    let entries = read_entries(&target.path).await?;
    Ok(render_entries(target, &entries))
}

/// A "Go Up" link followed by one anchor per entry, separated by `<br>`.
/// Files carry a `download` attribute, directories do not. Link targets
/// are percent-encoded, names shown as text are HTML-escaped.
pub fn render_entries(target: &Target, entries: &[Entry]) -> String {
    let prefix = target.child_prefix();

    let links: Vec<String> = entries
        .iter()
        .map(|entry| {
            let href = escape(&format!("{}{}", prefix, urlencoding::encode(&entry.name)));
            let name = escape(&entry.name);

            if entry.is_dir {
                format!(r#"<a href="{}">{}</a>"#, href, name)
            } else {
                format!(r#"<a href="{}" download="{}">{}</a>"#, href, name, name)
            }
        })
        .collect();

    format!(
        r#"<a href="{}">Go Up</a><br>{}"#,
        escape(&target.parent_href()),
        links.join("<br>")
    )
}

fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            c => out.push(c),
        }
    }
    out
}

//! Static file serving routes
//!
//! Files come straight off `warp::fs::dir`: index.html for directory paths,
//! content-type from the file extension, 404 for anything missing. A
//! directory without an index falls through to a generated listing page, the
//! same convention a stock static file handler gives you.

use std::path::{Path, PathBuf};

use warp::Filter;

/// Create static file serving routes for the served root
pub fn create_static_routes(
    root: PathBuf,
) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
    let files = warp::fs::dir(root.clone());

    let listing = warp::get()
        .or(warp::head())
        .unify()
        .and(warp::path::tail())
        .and_then(move |tail: warp::path::Tail| serve_dir_listing(root.clone(), tail));

    files.or(listing)
}

/// Render a directory listing for directories without an index file.
///
/// Rejects (-> 404) for anything that is not an existing directory, so plain
/// missing paths still come out as 404 from warp's rejection handling.
async fn serve_dir_listing(
    root: PathBuf,
    tail: warp::path::Tail,
) -> Result<impl warp::Reply, warp::Rejection> {
    let rel_path = match urlencoding::decode(tail.as_str()) {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => return Err(warp::reject::not_found()),
    };

    let dir_path = match sanitized_dir_path(&root, &rel_path) {
        Some(path) => path,
        None => return Err(warp::reject::not_found()),
    };
    if !dir_path.is_dir() {
        return Err(warp::reject::not_found());
    }

    let entries = match read_dir_entries(&dir_path).await {
        Ok(entries) => entries,
        Err(e) => {
            log::warn!("Failed to read directory {}: {}", dir_path.display(), e);
            return Err(warp::reject::not_found());
        }
    };

    let html = render_listing(tail.as_str(), &entries);
    Ok(warp::reply::html(html))
}

/// Resolve a decoded URL path against the served root.
///
/// Segments are pushed onto the root one at a time, never joined wholesale,
/// so a decoded absolute path (`/etc`) cannot replace the root the way
/// `PathBuf::join` would let it. Any `..` or backslash in a segment rejects
/// the whole path, same policy as warp's own path sanitizer.
fn sanitized_dir_path(root: &Path, rel_path: &str) -> Option<PathBuf> {
    let mut path = root.to_path_buf();
    for segment in rel_path.split('/') {
        if segment.is_empty() || segment == "." {
            continue;
        }
        if segment.contains("..") || segment.contains('\\') {
            return None;
        }
        path.push(segment);
    }
    // push can still replace the path on Windows prefixes; rule that out
    if !path.starts_with(root) {
        return None;
    }
    Some(path)
}

/// One row of a directory listing
struct DirEntry {
    name: String,
    is_dir: bool,
}

/// Collect directory entries, name-sorted, directories and files alike
async fn read_dir_entries(dir_path: &Path) -> std::io::Result<Vec<DirEntry>> {
    let mut entries = Vec::new();
    let mut reader = tokio::fs::read_dir(dir_path).await?;

    while let Some(entry) = reader.next_entry().await? {
        let name = entry.file_name().to_string_lossy().into_owned();
        let is_dir = entry
            .file_type()
            .await
            .map(|ft| ft.is_dir())
            .unwrap_or(false);
        entries.push(DirEntry { name, is_dir });
    }

    entries.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(entries)
}

/// Render the listing page for a directory
fn render_listing(url_path: &str, entries: &[DirEntry]) -> String {
    let display_path = format!("/{}", url_path.trim_matches('/'));
    let base = url_path.trim_matches('/');

    let mut rows = String::new();
    for entry in entries {
        let suffix = if entry.is_dir { "/" } else { "" };
        rows.push_str(&format!(
            "        <li><a href=\"{}\">{}{}</a></li>\n",
            entry_href(base, &entry.name, entry.is_dir),
            html_escape(&entry.name),
            suffix
        ));
    }

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Index of {path}</title>
</head>
<body>
    <h1>Index of {path}</h1>
    <hr>
    <ul>
{rows}    </ul>
    <hr>
</body>
</html>"#,
        path = html_escape(&display_path),
        rows = rows
    )
}

/// Absolute, percent-encoded href for a listing entry
fn entry_href(base: &str, name: &str, is_dir: bool) -> String {
    let encoded = urlencoding::encode(name);
    let suffix = if is_dir { "/" } else { "" };
    if base.is_empty() {
        format!("/{}{}", encoded, suffix)
    } else {
        format!("/{}/{}{}", base, encoded, suffix)
    }
}

/// Minimal HTML escaping for entry names
fn html_escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

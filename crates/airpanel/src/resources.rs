//! Optional external resources: the behavior script and the shared style sheet.
//!
//! Both are optional. A missing file is logged and yields `Ok(None)`; a file that exists but
//! cannot be read, or a style file that is not XML, is an error.

use crate::error::{Error, Result};
use std::io;
use std::path::Path;

/// Wraps script source the way it is embedded in the document.
pub fn wrap_script(js: &str) -> String {
    format!("\n    <![CDATA[\n{js}\n    ]]>\n  ")
}

fn read_optional(path: &Path, what: &str) -> Result<Option<String>> {
    match std::fs::read_to_string(path) {
        Ok(s) => Ok(Some(s)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            tracing::warn!(path = %path.display(), "{what} not found; continuing without it");
            Ok(None)
        }
        Err(source) => Err(Error::ReadResource {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Loads the behavior script. Empty files count as absent.
pub fn load_behavior_script(path: &Path) -> Result<Option<String>> {
    let script = read_optional(path, "behavior script")?;
    Ok(script.filter(|s| !s.is_empty()))
}

/// Loads the style sheet: the text of the first `<style>` child of the root element that has
/// any text.
pub fn load_shared_style(path: &Path) -> Result<Option<String>> {
    let Some(xml) = read_optional(path, "style resource")? else {
        return Ok(None);
    };
    extract_style(&xml).map_err(|e| Error::MalformedStyle {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

pub fn extract_style(xml: &str) -> std::result::Result<Option<String>, roxmltree::Error> {
    let doc = roxmltree::Document::parse(xml)?;
    let style = doc
        .root_element()
        .children()
        .filter(|n| n.is_element() && n.tag_name().name() == "style")
        .find_map(|n| {
            let text: String = n
                .descendants()
                .filter(|d| d.is_text())
                .filter_map(|d| d.text())
                .collect();
            (!text.is_empty()).then_some(text)
        });
    if style.is_none() {
        tracing::warn!("style resource has no <style> child; continuing without it");
    }
    Ok(style)
}

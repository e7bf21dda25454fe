//! Textual post-processing of SVG returned by Kroki.
//!
//! Mermaid SVG has a transparent canvas and translucent gray edge-label
//! backgrounds, which read poorly on dark pages. These helpers paint a white
//! canvas and whiten the label backgrounds without parsing the document:
//! every edit is a plain string operation on known fragments.

/// Element inserted as the first child of the root `<svg>` element.
pub const BACKGROUND_RECT: &str = r#"<rect width="100%" height="100%" fill="white"/>"#;

/// Edge-label background colors emitted by Mermaid and their white replacements.
///
/// The three spellings differ only in spacing and opacity. Anything not listed
/// here is left alone.
pub const LABEL_BACKGROUND_REPLACEMENTS: [(&str, &str); 3] = [
    ("rgba(232,232,232, 0.8)", "rgba(255,255,255, 0.8)"),
    ("rgba(232, 232, 232, 0.8)", "rgba(255, 255, 255, 0.8)"),
    ("rgba(232, 232, 232, 0.5)", "rgba(255, 255, 255, 0.5)"),
];

/// Apply all post-processing steps to rendered SVG.
#[must_use]
pub fn postprocess(svg: &str) -> String {
    let with_background = add_background(svg);
    whiten_label_backgrounds(&with_background)
}

/// Insert [`BACKGROUND_RECT`] right after the first `<svg ...>` opening tag.
///
/// The tag is located textually: the first `<svg` and the first `>` after it.
/// When either is missing the input is returned unchanged.
#[must_use]
pub fn add_background(svg: &str) -> String {
    let Some(insert_at) = svg_open_tag_end(svg) else {
        tracing::debug!("no <svg> opening tag found, background not inserted");
        return svg.to_owned();
    };

    let mut result = String::with_capacity(svg.len() + BACKGROUND_RECT.len());
    result.push_str(&svg[..insert_at]);
    result.push_str(BACKGROUND_RECT);
    result.push_str(&svg[insert_at..]);
    result
}

/// Replace the known gray label backgrounds with white at the same opacity.
#[must_use]
pub fn whiten_label_backgrounds(svg: &str) -> String {
    LABEL_BACKGROUND_REPLACEMENTS
        .iter()
        .fold(svg.to_owned(), |acc, (gray, white)| acc.replace(gray, white))
}

/// Byte offset just past the `>` closing the first `<svg` tag.
fn svg_open_tag_end(svg: &str) -> Option<usize> {
    let tag_start = svg.find("<svg")?;
    let close = svg[tag_start..].find('>')?;
    Some(tag_start + close + 1)
}

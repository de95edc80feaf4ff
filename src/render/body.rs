//! Message body preparation: HTML bodies pass through an `ammonia`
//! sanitizer that forces links to open in a new tab and images to scale
//! down; plain-text bodies are escaped first and then linkified, so message
//! text can never smuggle markup into the view.

use std::sync::LazyLock;

use ammonia::Builder;

const LINK_REL: &str = "noopener noreferrer";
const IMG_STYLE: &str = "max-width:100%;height:auto";

static HTML_SANITIZER: LazyLock<Builder<'static>> = LazyLock::new(|| {
    let mut b = Builder::new();
    b.link_rel(Some(LINK_REL));
    b.add_tag_attributes("a", &["target"]);
    b.add_tag_attributes("img", &["style"]);
    // Forced on every anchor and image, overriding whatever the sender set.
    b.set_tag_attribute_value("a", "target", "_blank");
    b.set_tag_attribute_value("img", "style", IMG_STYLE);
    b
});

pub fn sanitize_html(html: &str) -> String {
    HTML_SANITIZER.clean(html).to_string()
}

/// Escape first, then wrap bare `https://` runs in anchors. The order is the
/// injection guard: by the time URLs are wrapped, the text contains no live
/// markup to collide with.
pub fn linkify(text: &str) -> String {
    let escaped = html_escape::encode_text(text);
    let mut out = String::with_capacity(escaped.len());
    let mut rest = escaped.as_ref();

    while let Some(pos) = rest.find("https://") {
        let (before, from_url) = rest.split_at(pos);
        out.push_str(before);

        let end = from_url
            .find(|c: char| c.is_whitespace())
            .unwrap_or(from_url.len());
        let url = &from_url[..end];
        out.push_str("<a href=\"");
        out.push_str(url);
        out.push_str("\" target=\"_blank\" rel=\"noopener noreferrer\">");
        out.push_str(url);
        out.push_str("</a>");

        rest = &from_url[end..];
    }

    out.push_str(rest);
    out
}

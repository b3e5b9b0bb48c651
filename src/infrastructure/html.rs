use crate::domain::models::{Block, Document};

/// Render a document to a self-contained HTML page. `{{variable}}`
/// placeholders pass through untouched; substitution happens wherever the
/// template is actually sent from, not here.
#[must_use]
pub fn render(document: &Document) -> String {
    let mut out = String::new();
    out.push_str("<!doctype html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n");
    out.push_str(&format!("<title>{}</title>\n", escape(&document.title)));
    out.push_str("</head>\n<body>\n<div style=\"max-width:600px;margin:0 auto\">\n");

    for block in &document.blocks {
        render_block(&mut out, block);
    }

    out.push_str("</div>\n</body>\n</html>\n");
    out
}

fn render_block(out: &mut String, block: &Block) {
    match block {
        Block::Text { text } => {
            for line in text.lines() {
                out.push_str(&format!("<p>{}</p>\n", escape(line)));
            }
        }
        Block::Heading { level, text } => {
            let level = (*level).clamp(1, 3);
            out.push_str(&format!("<h{level}>{}</h{level}>\n", escape(text)));
        }
        Block::Quote { text } => {
            out.push_str(&format!("<blockquote>{}</blockquote>\n", escape(text)));
        }
        Block::Button { label, url } => {
            out.push_str(&format!(
                "<a href=\"{}\" style=\"display:inline-block;padding:10px 20px;background:#111;color:#fff;text-decoration:none;border-radius:4px\">{}</a>\n",
                escape(url),
                escape(label)
            ));
        }
        Block::Image { src, alt } => {
            out.push_str(&format!(
                "<img src=\"{}\" alt=\"{}\" style=\"max-width:100%\">\n",
                escape(src),
                escape(alt)
            ));
        }
        Block::Divider => out.push_str("<hr>\n"),
        Block::Spacer => out.push_str("<div style=\"height:32px\"></div>\n"),
        Block::Footer { text } => {
            out.push_str(&format!(
                "<footer style=\"color:#888;font-size:12px\">{}</footer>\n",
                escape(text)
            ));
        }
        // Raw region: emitted verbatim, which is the point of the block.
        Block::Html { source } => {
            out.push_str(source);
            out.push('\n');
        }
    }
}

fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_markup_in_text_blocks() {
        let doc = Document {
            title: "t".to_string(),
            blocks: vec![Block::Text {
                text: "a <b> & c".to_string(),
            }],
            saved_at: None,
        };
        let html = render(&doc);
        assert!(html.contains("<p>a &lt;b&gt; &amp; c</p>"));
    }

    #[test]
    fn html_block_is_verbatim() {
        let doc = Document {
            title: "t".to_string(),
            blocks: vec![Block::Html {
                source: "<table><tr><td>x</td></tr></table>".to_string(),
            }],
            saved_at: None,
        };
        assert!(render(&doc).contains("<table><tr><td>x</td></tr></table>"));
    }

    #[test]
    fn variables_pass_through() {
        let doc = Document {
            title: "t".to_string(),
            blocks: vec![Block::Text {
                text: "Hi {{user.name}}".to_string(),
            }],
            saved_at: None,
        };
        assert!(render(&doc).contains("Hi {{user.name}}"));
    }

    #[test]
    fn heading_level_is_clamped() {
        let doc = Document {
            title: "t".to_string(),
            blocks: vec![Block::Heading {
                level: 9,
                text: "deep".to_string(),
            }],
            saved_at: None,
        };
        assert!(render(&doc).contains("<h3>deep</h3>"));
    }
}

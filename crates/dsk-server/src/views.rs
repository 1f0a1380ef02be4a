//! HTML views.
//!
//! Three pages: the index shell (navigation + main area), the node fragment
//! loaded into the main area, and the stage page embedded through an iframe.

use std::fmt::Write;

use dsk_tree::{Crumb, PropSet};
use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};

/// Characters escaped inside one URL path segment.
const SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b':')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Data for the node fragment.
pub(crate) struct NodePage {
    pub title: String,
    pub url: String,
    pub import_name: String,
    pub documentation: String,
    pub crumbs: Vec<Crumb>,
    pub demos: Vec<PropSet>,
    pub children: Vec<(String, String)>,
}

/// Data for the stage page.
pub(crate) struct StagePage {
    pub title: String,
    pub url: String,
    pub import_name: String,
    pub props: Option<PropSet>,
    pub has_css: bool,
    pub has_js: bool,
}

/// Render the index shell.
pub(crate) fn render_index(project_name: &str, version: &str) -> String {
    let mut html = String::with_capacity(1024);
    let name = escape(project_name);

    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    let _ = writeln!(html, "<title>{name}</title>");
    let _ = writeln!(html, "<meta name=\"generator\" content=\"DSK {}\">", escape(version));
    html.push_str("<link rel=\"stylesheet\" href=\"/assets/css/base.css\">\n");
    html.push_str("</head>\n<body>\n<div class=\"layout\">\n");

    html.push_str("<aside class=\"sidebar\">\n");
    let _ = writeln!(html, "<h1><a href=\"/\">{name}</a></h1>");
    html.push_str("<input class=\"search-field\" type=\"search\" placeholder=\"Search\">\n");
    html.push_str("<nav class=\"tree-nav\"></nav>\n");
    html.push_str("</aside>\n");

    html.push_str("<main></main>\n</div>\n");
    html.push_str("<script src=\"/assets/js/index.js\"></script>\n");
    html.push_str("</body>\n</html>");
    html
}

/// Render the node fragment shown in the main area.
pub(crate) fn render_node(page: &NodePage) -> String {
    let mut html = String::with_capacity(2048 + page.documentation.len());

    html.push_str("<article class=\"node\">\n");
    render_crumbs(&mut html, &page.crumbs);
    let _ = writeln!(html, "<h1>{}</h1>", escape(&page.title));
    let _ = writeln!(
        html,
        "<p class=\"import\"><code>{}</code></p>",
        escape(&page.import_name)
    );

    let stage = embed_href(&page.url, "");
    if page.demos.is_empty() {
        let _ = writeln!(
            html,
            "<iframe class=\"stage\" src=\"{}\" title=\"{}\"></iframe>",
            escape(&stage),
            escape(&page.title)
        );
    } else {
        html.push_str("<section class=\"demos\">\n");
        for (index, demo) in page.demos.iter().enumerate() {
            let label = demo
                .name()
                .map_or_else(|| format!("Demo {}", index + 1), str::to_owned);
            let _ = writeln!(html, "<h2>{}</h2>", escape(&label));
            let _ = writeln!(
                html,
                "<iframe class=\"stage\" src=\"{}:{index}\" title=\"{}\"></iframe>",
                escape(&stage),
                escape(&label)
            );
        }
        html.push_str("</section>\n");
    }

    if !page.documentation.is_empty() {
        html.push_str("<section class=\"documentation\">\n");
        html.push_str(&page.documentation);
        html.push_str("\n</section>\n");
    }

    if !page.children.is_empty() {
        html.push_str("<ul class=\"children\">\n");
        for (url, title) in &page.children {
            let _ = writeln!(
                html,
                "<li><a href=\"/{}\">{}</a></li>",
                escape(&encode_url(url)),
                escape(title)
            );
        }
        html.push_str("</ul>\n");
    }

    html.push_str("</article>");
    html
}

fn render_crumbs(html: &mut String, crumbs: &[Crumb]) {
    if crumbs.is_empty() {
        return;
    }
    html.push_str("<nav class=\"crumbs\">");
    for (i, crumb) in crumbs.iter().enumerate() {
        if i > 0 {
            html.push_str(" / ");
        }
        let _ = write!(
            html,
            "<a href=\"/{}\">{}</a>",
            escape(&encode_url(&crumb.url)),
            escape(&crumb.title)
        );
    }
    html.push_str("</nav>\n");
}

/// Render the stage page for one component demo.
pub(crate) fn render_stage(page: &StagePage) -> String {
    let mut html = String::with_capacity(1024);

    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n");
    let _ = writeln!(html, "<title>{}</title>", escape(&page.title));
    if page.has_css {
        let _ = writeln!(
            html,
            "<link rel=\"stylesheet\" href=\"{}\">",
            escape(&embed_href(&page.url, ".css"))
        );
    }
    html.push_str("</head>\n<body>\n<div id=\"stage\"></div>\n");

    let data = serde_json::json!({
        "import": page.import_name,
        "props": page.props,
    });
    let _ = writeln!(
        html,
        "<script type=\"application/json\" id=\"dsk-demo\">{}</script>",
        json_for_script(&data)
    );
    if page.has_js {
        let _ = writeln!(
            html,
            "<script src=\"{}\"></script>",
            escape(&embed_href(&page.url, ".js"))
        );
    }
    html.push_str("<script src=\"/assets/js/stage.js\"></script>\n");
    html.push_str("</body>\n</html>");
    html
}

/// `/embed/` URL of a node, with an optional suffix such as `.css`.
pub(crate) fn embed_href(url: &str, suffix: &str) -> String {
    if url == dsk_tree::ROOT_URL {
        format!("/embed/{suffix}")
    } else {
        format!("/embed/{}{suffix}", encode_url(url))
    }
}

/// Percent-encode every segment of a node URL.
fn encode_url(url: &str) -> String {
    url.split('/')
        .map(|segment| utf8_percent_encode(segment, SEGMENT).to_string())
        .collect::<Vec<_>>()
        .join("/")
}

/// Serialize JSON so it cannot close the surrounding `<script>` element.
fn json_for_script(value: &serde_json::Value) -> String {
    // `<` only ever appears inside JSON strings, where `\u003c` is equivalent.
    value.to_string().replace('<', "\\u003c")
}

/// Escape text for HTML content and attribute values.
pub(crate) fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    fn node_page() -> NodePage {
        NodePage {
            title: "Button".to_owned(),
            url: "Forms/Button".to_owned(),
            import_name: "MyButton".to_owned(),
            documentation: "<p>Press it.</p>".to_owned(),
            crumbs: vec![
                Crumb {
                    url: "Forms".to_owned(),
                    title: "Forms".to_owned(),
                },
                Crumb {
                    url: "Forms/Button".to_owned(),
                    title: "Button".to_owned(),
                },
            ],
            demos: vec![PropSet(json!({"label": "A"})), PropSet(json!({"name": "big"}))],
            children: vec![],
        }
    }

    #[test]
    fn test_escape() {
        assert_eq!(
            escape(r#"<a href="x">'&'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;&#39;&amp;&#39;&lt;/a&gt;"
        );
    }

    #[test]
    fn test_embed_href() {
        assert_eq!(embed_href("Forms/Button", ".css"), "/embed/Forms/Button.css");
        assert_eq!(embed_href("/", ""), "/embed/");
        assert_eq!(embed_href("My Forms/a:b", ""), "/embed/My%20Forms/a%3Ab");
    }

    #[test]
    fn test_render_index_uses_project_name() {
        let html = render_index("acme <design>", "1.0.0");

        assert!(html.contains("<title>acme &lt;design&gt;</title>"));
        assert!(html.contains("/assets/js/index.js"));
        assert!(html.contains("class=\"tree-nav\""));
    }

    #[test]
    fn test_render_node_links_every_demo() {
        let html = render_node(&node_page());

        assert!(html.contains("<h1>Button</h1>"));
        assert!(html.contains("<code>MyButton</code>"));
        assert!(html.contains("src=\"/embed/Forms/Button:0\""));
        assert!(html.contains("src=\"/embed/Forms/Button:1\""));
        assert!(html.contains("<h2>Demo 1</h2>"));
        assert!(html.contains("<h2>big</h2>"));
        assert!(html.contains("<p>Press it.</p>"));
        assert!(html.contains("<a href=\"/Forms\">Forms</a>"));
    }

    #[test]
    fn test_render_node_without_demos_embeds_plain_stage() {
        let page = NodePage {
            demos: vec![],
            children: vec![("Forms/Button/Icon".to_owned(), "Icon".to_owned())],
            ..node_page()
        };

        let html = render_node(&page);

        assert!(html.contains("src=\"/embed/Forms/Button\""));
        assert!(html.contains("<a href=\"/Forms/Button/Icon\">Icon</a>"));
    }

    #[test]
    fn test_render_stage() {
        let page = StagePage {
            title: "Button".to_owned(),
            url: "Forms/Button".to_owned(),
            import_name: "MyButton".to_owned(),
            props: Some(PropSet(json!({"label": "</script><b>"}))),
            has_css: true,
            has_js: false,
        };

        let html = render_stage(&page);

        assert!(html.contains("href=\"/embed/Forms/Button.css\""));
        assert!(!html.contains("/embed/Forms/Button.js"));
        assert!(html.contains(r#""import":"MyButton""#));
        assert!(html.contains(r"\u003c/script>\u003cb>"));
        assert!(!html.contains("</script><b>"));
    }

    #[test]
    fn test_render_stage_without_props() {
        let page = StagePage {
            title: "Card".to_owned(),
            url: "Card".to_owned(),
            import_name: "Card".to_owned(),
            props: None,
            has_css: false,
            has_js: true,
        };

        let html = render_stage(&page);

        assert!(html.contains(r#""props":null"#));
        assert!(html.contains("<script src=\"/embed/Card.js\"></script>"));
    }
}

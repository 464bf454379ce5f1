//! Page rendering.
//!
//! Each record renders through a template selected by its page type. The
//! template engine sits behind a trait so the pipeline can be exercised
//! with a deterministic stub; the default implementation is a set of
//! [maud](https://maud.lambda.xyz/) templates — compile-time checked,
//! auto-escaped, and with no template directory to ship.
//!
//! Rendering produces strings; writing them out is a separate, explicit
//! step ([`write_pages`]). A best-effort prettify pass reformats the markup
//! for human readability but never alters content and never fails a build.

use crate::catalog::Catalog;
use crate::types::{ContentRecord, PageType};
use chrono::{Datelike, NaiveDateTime};
use maud::{html, Markup, PreEscaped, DOCTYPE};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("unknown page type `{0}` (no matching template)")]
    UnknownPageType(String),
    #[error("cannot write {file}: {source}")]
    Io {
        file: PathBuf,
        source: std::io::Error,
    },
}

/// Everything a template may draw on: the page itself, the full catalog
/// (for cross-referencing views like the feed), and the generation time.
pub struct PageContext<'a> {
    pub page: &'a ContentRecord,
    pub posts: &'a [ContentRecord],
    pub now: NaiveDateTime,
}

/// The template collaborator: selector string in, markup out.
///
/// Errors on an unknown selector — a misconfigured page type must fail the
/// build, not silently skip a page.
pub trait TemplateEngine {
    fn render(&self, selector: &str, ctx: &PageContext) -> Result<String, RenderError>;
}

/// Built-in maud templates, one per page type.
#[derive(Debug, Default)]
pub struct MaudTemplates;

impl TemplateEngine for MaudTemplates {
    fn render(&self, selector: &str, ctx: &PageContext) -> Result<String, RenderError> {
        let content = match selector {
            "home" => home_content(ctx),
            "essay" | "long" | "other" => article_content(ctx.page),
            "short" => short_content(ctx.page),
            "feed" => feed_content(ctx),
            _ => return Err(RenderError::UnknownPageType(selector.to_string())),
        };
        Ok(base_document(ctx.page, content, ctx.now).into_string())
    }
}

/// Render one record to markup via the engine.
pub fn render_page(
    engine: &dyn TemplateEngine,
    page: &ContentRecord,
    posts: &[ContentRecord],
    now: NaiveDateTime,
) -> Result<String, RenderError> {
    let ctx = PageContext { page, posts, now };
    engine.render(page.kind.template(), &ctx)
}

/// Render every catalog record and write it under the output root.
///
/// Output path is `<out_root>/<url>.html`; the home page's forced `index`
/// url lands it at the site root's default document. Returns the written
/// paths in catalog order.
pub fn write_pages(
    engine: &dyn TemplateEngine,
    catalog: &Catalog,
    out_root: &Path,
    now: NaiveDateTime,
) -> Result<Vec<PathBuf>, RenderError> {
    let mut written = Vec::with_capacity(catalog.len());
    for page in catalog.records() {
        let markup = render_page(engine, page, catalog.records(), now)?;
        let markup = prettify(&markup).unwrap_or(markup);
        let path = out_root.join(format!("{}.html", page.url));
        fs::write(&path, &markup).map_err(|source| RenderError::Io {
            file: path.clone(),
            source,
        })?;
        written.push(path);
    }
    Ok(written)
}

/// Best-effort reformatting: newlines after structural closing tags so the
/// output is skimmable in an editor.
///
/// Whitespace between block elements doesn't affect rendering, but inside
/// `<pre>` it would, so documents containing preformatted text are left
/// untouched (`None`).
pub fn prettify(markup: &str) -> Option<String> {
    if markup.contains("<pre") || markup.contains("<textarea") {
        return None;
    }

    const BREAK_AFTER: &[&str] = &[
        "</p>", "</li>", "</ul>", "</ol>", "</h1>", "</h2>", "</h3>", "</h4>", "</h5>",
        "</h6>", "</header>", "</footer>", "</article>", "</section>", "</nav>",
        "</blockquote>", "</head>", "</body>", "</html>", "</title>", "</main>",
    ];

    let mut out = markup.replace("<!DOCTYPE html>", "<!DOCTYPE html>\n");
    for tag in BREAK_AFTER {
        out = out.replace(tag, &format!("{tag}\n"));
    }
    Some(out)
}

// ============================================================================
// Templates
// ============================================================================

/// Common document shell: head metadata, masthead, footer with the
/// generation year.
fn base_document(page: &ContentRecord, content: Markup, now: NaiveDateTime) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                meta name="description" content=(page.description);
                title { (page.title) }
                link rel="stylesheet" href="/css/main.css";
            }
            body {
                header.masthead {
                    a href="/" { "Home" }
                }
                main {
                    (content)
                }
                footer {
                    p { "© " (now.year()) }
                }
            }
        }
    }
}

fn home_content(ctx: &PageContext) -> Markup {
    html! {
        section.intro {
            (PreEscaped(&ctx.page.html))
        }
        section.recent {
            h2 { "Recent" }
            (post_list(ctx.posts))
        }
    }
}

/// Essays, long posts, and `other` pages share one article layout.
fn article_content(page: &ContentRecord) -> Markup {
    html! {
        article {
            h1 { (page.title) }
            @if page.versions > 1 {
                @if page.latest {
                    p.version-note { "Latest of " (page.versions) " versions." }
                } @else {
                    p.version-note { "Superseded by a newer version." }
                }
            }
            (article_figure(page))
            (PreEscaped(&page.html))
            (article_footer(page))
        }
    }
}

/// Short posts are title-less by construction (the title is the timestamp),
/// so they lead with the body.
fn short_content(page: &ContentRecord) -> Markup {
    html! {
        article.short {
            (article_figure(page))
            (PreEscaped(&page.html))
            (article_footer(page))
        }
    }
}

fn feed_content(ctx: &PageContext) -> Markup {
    html! {
        section.feed {
            h1 { (ctx.page.title) }
            (post_list(ctx.posts))
        }
    }
}

/// Date-descending list of the latest version of every listable post.
/// Feed and home pages are navigation, not content, so they're skipped.
fn post_list(posts: &[ContentRecord]) -> Markup {
    html! {
        ul.post-list {
            @for post in posts.iter().filter(|p| p.latest && listable(p.kind)) {
                li {
                    a href={ "/" (post.url) ".html" } { (post.title) }
                    time datetime=(post.date.format("%Y-%m-%d")) {
                        (post.date.format("%Y-%m-%d"))
                    }
                }
            }
        }
    }
}

fn listable(kind: PageType) -> bool {
    !matches!(kind, PageType::Home | PageType::Feed)
}

fn article_figure(page: &ContentRecord) -> Markup {
    html! {
        @if let (Some(image), Some(alt)) = (&page.image, &page.image_alt) {
            figure {
                img src={ "/images/" (image) } alt=(alt);
            }
        }
    }
}

fn article_footer(page: &ContentRecord) -> Markup {
    html! {
        footer.post-meta {
            time datetime=(page.date.format("%Y-%m-%d")) {
                (page.date.format("%B %e, %Y"))
            }
            @if let Some(loc) = &page.location {
                span.location {
                    (format!("{:.4}, {:.4}", loc.latitude, loc.longitude))
                }
            }
            @for tag in &page.tags {
                span.tag { (tag) }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Location, DATE_FORMAT};
    use chrono::NaiveDateTime;

    fn record(kind: PageType, url: &str) -> ContentRecord {
        ContentRecord {
            identifier: Some("u1".into()),
            kind,
            title: "A Title".into(),
            description: "A description".into(),
            tags: vec!["misc".into()],
            raw_date: "2023-01-01-00-00-00".into(),
            date: NaiveDateTime::parse_from_str("2023-01-01-00-00-00", DATE_FORMAT).unwrap(),
            location: None,
            image: None,
            image_alt: None,
            body: "body".into(),
            html: "<p>body</p>".into(),
            url: url.into(),
            versions: 1,
            latest: true,
            source: format!("posts/{url}.md").into(),
        }
    }

    fn now() -> NaiveDateTime {
        NaiveDateTime::parse_from_str("2024-06-01-12-00-00", DATE_FORMAT).unwrap()
    }

    #[test]
    fn each_page_type_has_a_template() {
        let engine = MaudTemplates;
        for kind in [
            PageType::Home,
            PageType::Essay,
            PageType::Long,
            PageType::Short,
            PageType::Feed,
            PageType::Other,
        ] {
            let page = record(kind, "p");
            let html = render_page(&engine, &page, &[], now()).unwrap();
            assert!(html.starts_with("<!DOCTYPE html>"), "{kind:?}");
        }
    }

    #[test]
    fn unknown_selector_is_error() {
        let engine = MaudTemplates;
        let page = record(PageType::Essay, "p");
        let ctx = PageContext {
            page: &page,
            posts: &[],
            now: now(),
        };
        assert!(matches!(
            engine.render("gallery", &ctx),
            Err(RenderError::UnknownPageType(_))
        ));
    }

    #[test]
    fn body_html_is_not_escaped() {
        let engine = MaudTemplates;
        let page = record(PageType::Essay, "p");
        let html = render_page(&engine, &page, &[], now()).unwrap();
        assert!(html.contains("<p>body</p>"));
    }

    #[test]
    fn title_is_escaped() {
        let engine = MaudTemplates;
        let mut page = record(PageType::Essay, "p");
        page.title = "a < b".into();
        let html = render_page(&engine, &page, &[], now()).unwrap();
        assert!(html.contains("a &lt; b"));
    }

    #[test]
    fn feed_lists_only_latest_listable_posts() {
        let engine = MaudTemplates;
        let feed = record(PageType::Feed, "feed");
        let mut superseded = record(PageType::Essay, "draft");
        superseded.latest = false;
        superseded.title = "Old Draft".into();
        let current = record(PageType::Essay, "final");
        let home = record(PageType::Home, "index");

        let posts = vec![current.clone(), superseded, home];
        let html = render_page(&engine, &feed, &posts, now()).unwrap();
        assert!(html.contains("/final.html"));
        assert!(!html.contains("Old Draft"));
        assert!(!html.contains("/index.html"));
    }

    #[test]
    fn footer_carries_generation_year() {
        let engine = MaudTemplates;
        let page = record(PageType::Essay, "p");
        let html = render_page(&engine, &page, &[], now()).unwrap();
        assert!(html.contains("2024"));
    }

    #[test]
    fn location_and_tags_in_post_footer() {
        let engine = MaudTemplates;
        let mut page = record(PageType::Essay, "p");
        page.location = Some(Location {
            latitude: 40.7128,
            longitude: -74.006,
        });
        let html = render_page(&engine, &page, &[], now()).unwrap();
        assert!(html.contains("40.7128"));
        assert!(html.contains("misc"));
    }

    #[test]
    fn prettify_inserts_structural_newlines() {
        let pretty = prettify("<html><body><p>a</p><p>b</p></body></html>").unwrap();
        assert!(pretty.contains("</p>\n<p>"));
    }

    #[test]
    fn prettify_skips_preformatted_documents() {
        assert!(prettify("<body><pre>  spaced  </pre></body>").is_none());
    }
}

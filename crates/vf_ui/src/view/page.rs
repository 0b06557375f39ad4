use vf_core::{ImageVerification, SubScores, TextVerification, Theme, Verdict};

use super::{document, el, text, Element, Node};
use crate::content::PageContent;
use crate::messages;
use crate::state::{PageState, ResultPanel, UploadState};
use crate::style::{image_tone, text_tone, Tone};

/// Extracted text longer than this many characters is cut and suffixed with `...`.
pub const EXCERPT_LIMIT: usize = 150;

pub fn excerpt(extracted: &str) -> String {
    match extracted.char_indices().nth(EXCERPT_LIMIT) {
        Some((cut, _)) => format!("{}...", &extracted[..cut]),
        None => extracted.to_string(),
    }
}

fn percent(score: f64) -> String {
    format!("{:.1}%", score * 100.0)
}

pub fn render_page(state: &PageState, content: &PageContent) -> String {
    let body = el("body")
        .class(state.theme.css_class())
        .child(navbar(state, content))
        .child(
            el("main")
                .class("container")
                .child(hero(content))
                .child(text_section(state))
                .child(image_section(state))
                .child(faq_section(state, content)),
        )
        .child(alert_dialog(state.alert.as_deref()));

    document(
        el("html")
            .attr("lang", "en")
            .child(
                el("head")
                    .child(el("meta").attr("charset", "utf-8"))
                    .child(
                        el("meta")
                            .attr("name", "viewport")
                            .attr("content", "width=device-width, initial-scale=1"),
                    )
                    .child(el("title").text(content.title))
                    .child(el("link").attr("rel", "stylesheet").attr("href", "/static/styles.css")),
            )
            .child(body),
    )
}

fn post_form(action: &str) -> Element {
    el("form").attr("method", "post").attr("action", action)
}

fn navbar(state: &PageState, content: &PageContent) -> Element {
    let open = state.nav.is_open();
    el("nav")
        .class("navbar")
        .child(el("a").class("brand").attr("href", "/").text(content.title))
        .child(theme_switcher(&state.theme))
        .child(
            post_form("/nav").class("mobile-menu").child(
                el("button")
                    .class("mobile-menu-btn")
                    .class_if("active", open)
                    .attr("type", "submit")
                    .attr("aria-label", "Toggle navigation")
                    .text("☰"),
            ),
        )
        .child(
            el("ul").class("nav-links").class_if("active", open).children(
                content
                    .nav_links
                    .iter()
                    .map(|link| el("li").child(el("a").attr("href", link.href).text(link.label))),
            ),
        )
}

fn theme_switcher(active: &Theme) -> Element {
    post_form("/theme").class("theme-switcher").children(Theme::builtins().map(|theme| {
        el("button")
            .class("theme-btn")
            .class(format!("{}-btn", theme.css_class()))
            .class_if("active", &theme == active)
            .attr("type", "submit")
            .attr("name", "theme")
            .attr("value", theme.name())
            .text(capitalize(theme.name()))
    }))
}

fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn hero(content: &PageContent) -> Element {
    el("header")
        .class("hero")
        .child(el("h1").text(content.title))
        .child(el("p").class("tagline").text(content.tagline))
}

fn text_section(state: &PageState) -> Element {
    el("section")
        .id("text")
        .class("card")
        .child(el("h2").text("Verify text"))
        .child(
            post_form("/verify/text")
                .child(
                    el("textarea")
                        .id("textInput")
                        .attr("name", "text")
                        .attr("rows", "6")
                        .attr("placeholder", "Paste a headline, claim or article...")
                        .text(state.text_input.as_str()),
                )
                .child(el("button").class("btn-primary").attr("type", "submit").text("Verify text")),
        )
        .child(render_text_panel(&state.text_result))
}

fn image_section(state: &PageState) -> Element {
    el("section")
        .id("image")
        .class("card")
        .child(el("h2").text("Verify an image"))
        .child(upload_area(&state.upload))
        .child(image_preview(&state.upload))
        .child(render_image_panel(&state.image_result))
}

fn upload_area(upload: &UploadState) -> Element {
    let mut area = post_form("/upload")
        .id("uploadArea")
        .class("upload-area")
        .class_if("drag-over", upload.drag_over)
        .attr("enctype", "multipart/form-data");
    if !upload.shows_prompt() {
        area = area.attr("style", "display: none");
    }
    area.child(el("p").class("upload-prompt").text("Drop an image here or pick one"))
        .child(
            el("input")
                .id("imageInput")
                .attr("type", "file")
                .attr("name", "image")
                .attr("accept", "image/*"),
        )
        .child(el("button").class("btn-secondary").attr("type", "submit").text("Upload"))
}

fn image_preview(upload: &UploadState) -> Element {
    let name = upload
        .image
        .as_ref()
        .and_then(|image| image.name.as_deref())
        .unwrap_or("Selected image");
    el("div")
        .id("imagePreview")
        .class("image-preview")
        .class_if("hidden", !upload.shows_preview())
        .child(
            el("img")
                .id("previewImg")
                .attr("src", upload.preview_src())
                .attr("alt", name),
        )
        .child(
            el("div")
                .class("preview-actions")
                .child(post_form("/upload/remove").child(
                    el("button").class("btn-secondary").attr("type", "submit").text("Remove"),
                ))
                .child(post_form("/verify/image").child(
                    el("button").class("btn-primary").attr("type", "submit").text("Verify image"),
                )),
        )
}

fn faq_section(state: &PageState, content: &PageContent) -> Element {
    el("section")
        .id("faq")
        .class("card")
        .child(el("h2").text("Frequently asked questions"))
        .children(content.faq.iter().enumerate().map(|(index, entry)| {
            el("div")
                .class("faq-item")
                .class_if("active", state.faq.is_open(index))
                .child(
                    post_form(&format!("/faq/{}", index)).child(
                        el("button")
                            .class("faq-question")
                            .attr("type", "submit")
                            .text(entry.question),
                    ),
                )
                .child(el("div").class("faq-answer").child(el("p").text(entry.answer)))
        }))
}

fn alert_dialog(alert: Option<&str>) -> Option<Element> {
    alert.map(|message| {
        el("dialog")
            .class("alert-dialog")
            .flag("open", true)
            .attr("role", "alertdialog")
            .child(el("p").text(message))
            .child(post_form("/alert/dismiss").child(
                el("button").class("btn-primary").attr("type", "submit").text("OK"),
            ))
    })
}

pub fn render_text_panel(panel: &ResultPanel) -> Element {
    result_panel("textResult", panel, messages::ANALYZING_TEXT)
}

pub fn render_image_panel(panel: &ResultPanel) -> Element {
    result_panel("imageResult", panel, messages::ANALYZING_IMAGE)
}

fn result_panel(id: &str, panel: &ResultPanel, analyzing: &str) -> Element {
    let container = el("div")
        .id(id)
        .class("result-panel")
        .class_if("hidden", !panel.is_visible())
        .attr("aria-live", "polite");
    match panel {
        ResultPanel::Hidden => container,
        ResultPanel::Loading => container.child(
            el("div")
                .class("loading")
                .child(el("span").class("spinner"))
                .child(text(analyzing)),
        ),
        ResultPanel::Failed(message) => container.child(
            el("p").class("result-error").text(format!("❌ {}", message)),
        ),
        ResultPanel::Text(result) => container.child(text_result(result)),
        ResultPanel::Image(result) => container.child(image_result(result)),
    }
}

fn score_header(credibility: u8, verdict: &Verdict, tone: Tone) -> Vec<Node> {
    vec![
        el("div")
            .class("score-circle")
            .child(
                el("span")
                    .attr("style", format!("color: {};", tone.color()))
                    .text(format!("{}%", credibility)),
            )
            .into(),
        el("h3").class("score-title").text("Credibility Score").into(),
        el("div")
            .class("result-badge")
            .class(format!("badge-{}", tone_name(tone)))
            .attr("data-icon", tone.icon().name())
            .text(format!("{} {}", tone.icon().glyph(), verdict.label()))
            .into(),
    ]
}

fn tone_name(tone: Tone) -> &'static str {
    tone.css_class().trim_start_matches("tone-")
}

fn sub_score(label: &str, value: f64) -> Element {
    el("div")
        .class("sub-score")
        .child(el("span").class("sub-score-label").text(label))
        .child(el("span").class("sub-score-value").text(percent(value)))
}

fn sub_scores(scores: &SubScores) -> Vec<Element> {
    vec![
        sub_score("ML", scores.ml_score),
        sub_score("BERT", scores.bert_score),
        sub_score("LLM", scores.llm_score),
        sub_score("Web", scores.web_score),
    ]
}

fn text_result(result: &TextVerification) -> Element {
    let tone = text_tone(&result.verdict);
    el("div")
        .class("result-card")
        .class(tone.css_class())
        .children(score_header(result.credibility, &result.verdict, tone))
        .child(el("div").class("sub-scores").children(sub_scores(&result.scores)))
}

fn image_result(result: &ImageVerification) -> Element {
    let tone = image_tone(&result.verdict);
    let extracted = result
        .extracted_text
        .as_deref()
        .filter(|t| !t.trim().is_empty())
        .map(|t| {
            el("div")
                .class("extracted-text")
                .child(el("h4").text("Extracted text"))
                .child(el("blockquote").text(excerpt(t)))
        });
    let concerns = result
        .concerns
        .as_deref()
        .filter(|c| *c != "None" && !c.trim().is_empty())
        .map(|c| {
            el("p")
                .class("concerns")
                .child(el("strong").text("Concerns: "))
                .child(text(c))
        });
    let alert = Some(result.alert.as_str())
        .filter(|a| !a.trim().is_empty())
        .map(|a| el("p").class("result-alert").text(a));

    el("div")
        .class("result-card")
        .class(tone.css_class())
        .children(score_header(result.credibility, &result.verdict, tone))
        .child(alert)
        .child(extracted)
        .child(
            el("div")
                .class("sub-scores")
                .children(sub_scores(&result.scores))
                .child(sub_score("Manipulation", result.image_manipulation_score)),
        )
        .child(concerns)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::UploadedImage;
    use vf_core::DataUrl;

    fn text_verification(verdict: &str) -> TextVerification {
        TextVerification {
            verdict: Verdict::from(verdict),
            credibility: 85,
            scores: SubScores {
                ml_score: 0.71,
                bert_score: 0.93,
                llm_score: 1.0,
                web_score: 0.5,
            },
        }
    }

    fn image_verification() -> ImageVerification {
        ImageVerification {
            verdict: Verdict::Suspicious,
            credibility: 40,
            alert: "CAUTION - Image shows signs of manipulation".to_string(),
            extracted_text: Some("BREAKING: city announced".to_string()),
            concerns: Some("Sensationalist text overlay".to_string()),
            scores: SubScores::default(),
            image_manipulation_score: 0.62,
        }
    }

    fn render(element: Element) -> String {
        Node::from(element).render()
    }

    #[test]
    fn test_excerpt_boundaries() {
        let exact = "a".repeat(150);
        assert_eq!(excerpt(&exact), exact);

        let long = "b".repeat(151);
        assert_eq!(excerpt(&long), format!("{}...", "b".repeat(150)));

        let short = "short claim";
        assert_eq!(excerpt(short), short);
    }

    #[test]
    fn test_excerpt_counts_characters_not_bytes() {
        let long = "é".repeat(200);
        let cut = excerpt(&long);
        assert_eq!(cut.chars().count(), 153);
        assert!(cut.ends_with("..."));
        assert!(cut.starts_with(&"é".repeat(150)));
    }

    #[test]
    fn test_text_panel_tones() {
        let html = render(render_text_panel(&ResultPanel::Text(text_verification("REAL"))));
        assert!(html.contains("tone-green"));
        assert!(html.contains("data-icon=\"check\""));
        assert!(html.contains("color: #4ade80;"));
        assert!(html.contains(">85%<"));
        assert!(html.contains("71.0%"));
        assert!(html.contains("93.0%"));

        let html = render(render_text_panel(&ResultPanel::Text(text_verification("FAKE"))));
        assert!(html.contains("tone-red"));
        assert!(html.contains("data-icon=\"alert\""));

        let html = render(render_text_panel(&ResultPanel::Text(text_verification("LIKELY REAL"))));
        assert!(html.contains("tone-yellow"));
        assert!(html.contains("data-icon=\"warning\""));
    }

    #[test]
    fn test_image_panel_contents() {
        let html = render(render_image_panel(&ResultPanel::Image(image_verification())));
        assert!(html.contains("tone-orange"));
        assert!(html.contains("SUSPICIOUS"));
        assert!(html.contains("CAUTION - Image shows signs of manipulation"));
        assert!(html.contains("<blockquote>BREAKING: city announced</blockquote>"));
        assert!(html.contains("Sensationalist text overlay"));
        assert!(html.contains("Manipulation"));
        assert!(html.contains("62.0%"));
    }

    #[test]
    fn test_image_panel_omits_none_concerns_and_empty_text() {
        let mut result = image_verification();
        result.concerns = Some("None".to_string());
        result.extracted_text = Some(String::new());
        let html = render(render_image_panel(&ResultPanel::Image(result)));
        assert!(!html.contains("class=\"concerns\""));
        assert!(!html.contains("extracted-text"));
    }

    #[test]
    fn test_server_strings_are_escaped() {
        let mut result = image_verification();
        result.alert = "<script>steal()</script>".to_string();
        result.concerns = Some("<img src=x onerror=alert(1)>".to_string());
        result.extracted_text = Some("</blockquote><iframe>".to_string());
        result.verdict = Verdict::from("<b>odd</b>");
        let html = render(render_image_panel(&ResultPanel::Image(result)));
        assert!(!html.contains("<script>"));
        assert!(!html.contains("<img"));
        assert!(!html.contains("<iframe>"));
        assert!(!html.contains("<b>"));
        assert!(html.contains("&lt;script&gt;steal()&lt;/script&gt;"));

        let html = render(render_text_panel(&ResultPanel::Failed("<em>boom</em>".to_string())));
        assert!(html.contains("&lt;em&gt;boom&lt;/em&gt;"));
    }

    #[test]
    fn test_panel_states() {
        let html = render(render_text_panel(&ResultPanel::Hidden));
        assert!(html.contains("class=\"result-panel hidden\""));

        let html = render(render_text_panel(&ResultPanel::Loading));
        assert!(html.contains("class=\"loading\""));
        assert!(html.contains("Analyzing text..."));

        let html = render(render_image_panel(&ResultPanel::Failed("Server error".to_string())));
        assert!(html.contains("❌ Server error"));
        assert!(!html.contains("class=\"loading\""));
    }

    #[test]
    fn test_page_reflects_state() {
        let mut state = PageState::default();
        state.theme = Theme::light();
        state.faq.toggle(1);
        state.nav.toggle();
        state.alert = Some("Please enter some text to analyze".to_string());
        let html = render_page(&state, &PageContent::default());

        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<body class=\"theme-light\">"));
        assert!(html.contains("class=\"theme-btn theme-light-btn active\""));
        assert!(html.contains("class=\"theme-btn theme-dark-btn\""));
        assert!(html.contains("class=\"nav-links active\""));
        assert!(html.contains("class=\"mobile-menu-btn active\""));
        assert_eq!(html.matches("class=\"faq-item active\"").count(), 1);
        assert!(html.contains("<dialog class=\"alert-dialog\" open"));
        assert!(html.contains("Please enter some text to analyze"));
    }

    #[test]
    fn test_upload_visibility() {
        let mut state = PageState::default();
        let html = render_page(&state, &PageContent::default());
        assert!(html.contains("class=\"image-preview hidden\""));
        assert!(!html.contains("display: none"));
        assert!(html.contains("id=\"previewImg\" src=\"\""));

        state.upload.image = Some(UploadedImage {
            name: Some("claim.png".to_string()),
            data_url: DataUrl::encode("image/png", b"png"),
        });
        let html = render_page(&state, &PageContent::default());
        assert!(html.contains("class=\"image-preview\""));
        assert!(html.contains("style=\"display: none\""));
        assert!(html.contains("src=\"data:image/png;base64,cG5n\""));
    }

    #[test]
    fn test_unknown_theme_applied_as_given() {
        let mut state = PageState::default();
        state.theme = Theme::new("neon");
        let html = render_page(&state, &PageContent::default());
        assert!(html.contains("<body class=\"theme-neon\">"));
        assert!(!html.contains("active\" type=\"submit\" name=\"theme\""));
    }
}

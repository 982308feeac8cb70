use html_escape::{encode_double_quoted_attribute as attr, encode_text as text};

use super::{ElementRenderer, mention_name};
use crate::models::UserMetadata;
use crate::routes::{hashtag_link, profile_link};
use crate::text::{Element, Fragment, Markup};

/// Renders fragment trees to HTML strings.
#[derive(Debug, Clone, Copy)]
pub struct HtmlRenderer<'a> {
    users: &'a UserMetadata,
}

impl<'a> HtmlRenderer<'a> {
    pub fn new(users: &'a UserMetadata) -> Self {
        Self { users }
    }

    /// Renders a whole post body inside its text container.
    pub fn document(&self, fragments: &[Fragment]) -> String {
        format!(
            "<div dir=\"auto\" class=\"text\">{}</div>",
            self.fragments(fragments)
        )
    }

    pub fn fragments(&self, fragments: &[Fragment]) -> String {
        fragments.iter().map(|f| self.fragment(f)).collect()
    }

    pub fn fragment(&self, fragment: &Fragment) -> String {
        match fragment {
            Fragment::Text(s) => self.text(s),
            Fragment::Element(e) => self.element(e),
            Fragment::Markup(m) => self.markup(m),
        }
    }

    fn markup(&self, markup: &Markup) -> String {
        match markup {
            Markup::Paragraph(c) => format!("<p>{}</p>", self.fragments(c)),
            Markup::Group(c) => self.fragments(c),
            Markup::ListItem(c) => format!("<li>{}</li>", self.fragments(c)),
            Markup::List {
                start: Some(1),
                items,
            } => format!("<ol>{}</ol>", self.fragments(items)),
            Markup::List {
                start: Some(n),
                items,
            } => format!("<ol start=\"{n}\">{}</ol>", self.fragments(items)),
            Markup::List { start: None, items } => format!("<ul>{}</ul>", self.fragments(items)),
            Markup::Heading { level, children } => {
                format!("<h{level}>{}</h{level}>", self.fragments(children))
            }
            Markup::BlockQuote(c) => format!("<blockquote>{}</blockquote>", self.fragments(c)),
            Markup::Emphasis(c) => format!("<em>{}</em>", self.fragments(c)),
            Markup::Strong(c) => format!("<strong>{}</strong>", self.fragments(c)),
            Markup::CodeBlock { lang, code } => match lang {
                Some(lang) => format!(
                    "<pre><code class=\"language-{}\">{}</code></pre>",
                    attr(lang),
                    text(code)
                ),
                None => format!("<pre><code>{}</code></pre>", text(code)),
            },
            Markup::InlineCode(code) => format!("<code>{}</code>", text(code)),
            Markup::Image { src, alt } => {
                format!("<img src=\"{}\" alt=\"{}\">", attr(src), attr(alt))
            }
            Markup::LineBreak => "<br>".to_string(),
            Markup::Rule => "<hr>".to_string(),
        }
    }
}

impl ElementRenderer for HtmlRenderer<'_> {
    type Output = String;

    fn text(&self, s: &str) -> String {
        text(s).into_owned()
    }

    fn hyperlink(&self, url: &str, _creator: &str) -> String {
        format!(
            "<a href=\"{}\" target=\"_blank\" rel=\"noreferrer\" class=\"ext\" data-stop-propagation=\"true\">{}</a>",
            attr(url),
            text(url)
        )
    }

    fn mention(&self, pubkey: &str) -> String {
        format!(
            "<a href=\"{}\" class=\"mention\" data-stop-propagation=\"true\">@{}</a>",
            attr(&profile_link(pubkey)),
            text(&mention_name(pubkey, self.users))
        )
    }

    fn hashtag(&self, tag: &str) -> String {
        format!(
            "<span class=\"hashtag\"><a href=\"{}\" data-stop-propagation=\"true\">#{}</a></span>",
            attr(&hashtag_link(tag)),
            text(tag)
        )
    }

    fn invoice(&self, invoice: &str) -> String {
        format!(
            "<div class=\"note-invoice\" data-invoice=\"{}\">{}</div>",
            attr(invoice),
            text(invoice)
        )
    }

    fn event_ref(&self, label: &str, route: &str) -> String {
        format!(
            "<a href=\"{}\" data-stop-propagation=\"true\">#{}</a>",
            attr(route),
            text(label)
        )
    }

    fn unresolved(&self, placeholder: &str) -> String {
        format!(
            "<b class=\"error\">{}</b>",
            text(&Element::marker(placeholder))
        )
    }
}

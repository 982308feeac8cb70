//! Lays fragment trees out as styled terminal lines.

use notedown_engine::render::mention_name;
use notedown_engine::{Element, ElementRenderer, Fragment, Markup, UserMetadata};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

const HEADING: Style = Style::new().add_modifier(Modifier::BOLD);
const CODE: Style = Style::new().fg(Color::Green);
const DIM: Style = Style::new().fg(Color::DarkGray);

pub struct TerminalRenderer<'a> {
    users: &'a UserMetadata,
}

impl<'a> TerminalRenderer<'a> {
    pub fn new(users: &'a UserMetadata) -> Self {
        Self { users }
    }

    pub fn lines(&self, fragments: &[Fragment]) -> Vec<Line<'static>> {
        let mut out = LineWriter::default();
        self.fragments(fragments, Style::default(), &mut out);
        out.finish()
    }

    fn fragments(&self, fragments: &[Fragment], style: Style, out: &mut LineWriter) {
        for fragment in fragments {
            self.fragment(fragment, style, out);
        }
    }

    fn fragment(&self, fragment: &Fragment, style: Style, out: &mut LineWriter) {
        match fragment {
            Fragment::Text(text) => out.text(text, style),
            Fragment::Element(element) => {
                let span = self.element(element);
                out.push(Span::styled(span.content, style.patch(span.style)));
            }
            Fragment::Markup(markup) => self.markup(markup, style, out),
        }
    }

    fn markup(&self, markup: &Markup, style: Style, out: &mut LineWriter) {
        match markup {
            Markup::Paragraph(children) | Markup::Group(children) => {
                out.flush();
                self.fragments(children, style, out);
                out.blank();
            }
            Markup::ListItem(children) => self.fragments(children, style, out),
            Markup::List { start, items } => {
                out.flush();
                for (i, item) in items.iter().enumerate() {
                    let marker = match start {
                        Some(n) => format!("{}. ", n + i as u64),
                        None => "• ".to_string(),
                    };
                    let mut inner = LineWriter::default();
                    self.fragment(item, style, &mut inner);
                    let indent = " ".repeat(marker.chars().count());
                    out.prefixed(inner.finish(), &marker, &indent);
                }
                out.blank();
            }
            Markup::Heading { level, children } => {
                out.flush();
                let style = style.patch(HEADING);
                out.push(Span::styled(
                    format!("{} ", "#".repeat(usize::from(*level))),
                    style,
                ));
                self.fragments(children, style, out);
                out.blank();
            }
            Markup::BlockQuote(children) => {
                out.flush();
                let mut inner = LineWriter::default();
                self.fragments(children, style, &mut inner);
                out.prefixed(inner.finish(), "│ ", "│ ");
                out.blank();
            }
            Markup::Emphasis(children) => {
                self.fragments(children, style.add_modifier(Modifier::ITALIC), out)
            }
            Markup::Strong(children) => {
                self.fragments(children, style.add_modifier(Modifier::BOLD), out)
            }
            Markup::CodeBlock { code, .. } => {
                out.flush();
                for line in code.lines() {
                    out.push(Span::styled(line.to_string(), CODE));
                    out.break_line();
                }
                out.blank();
            }
            Markup::InlineCode(code) => out.push(Span::styled(code.clone(), CODE)),
            Markup::Image { src, alt } => {
                out.push(Span::styled(format!("[image: {alt}] {src}"), DIM))
            }
            Markup::LineBreak => out.break_line(),
            Markup::Rule => {
                out.flush();
                out.push(Span::styled("─".repeat(24), DIM));
                out.break_line();
                out.blank();
            }
        }
    }
}

impl ElementRenderer for TerminalRenderer<'_> {
    type Output = Span<'static>;

    fn text(&self, text: &str) -> Span<'static> {
        Span::raw(text.to_string())
    }

    fn hyperlink(&self, url: &str, _creator: &str) -> Span<'static> {
        Span::styled(
            url.to_string(),
            Style::new().fg(Color::Cyan).add_modifier(Modifier::UNDERLINED),
        )
    }

    fn mention(&self, pubkey: &str) -> Span<'static> {
        Span::styled(
            format!("@{}", mention_name(pubkey, self.users)),
            Style::new().fg(Color::Magenta),
        )
    }

    fn hashtag(&self, tag: &str) -> Span<'static> {
        Span::styled(format!("#{tag}"), Style::new().fg(Color::LightBlue))
    }

    fn invoice(&self, invoice: &str) -> Span<'static> {
        Span::styled(format!("⚡ {invoice}"), Style::new().fg(Color::Yellow))
    }

    fn event_ref(&self, label: &str, _route: &str) -> Span<'static> {
        Span::styled(format!("#{label}"), Style::new().fg(Color::Cyan))
    }

    fn unresolved(&self, placeholder: &str) -> Span<'static> {
        Span::styled(
            Element::marker(placeholder),
            Style::new().fg(Color::Red).add_modifier(Modifier::BOLD),
        )
    }
}

#[derive(Default)]
struct LineWriter {
    lines: Vec<Line<'static>>,
    current: Vec<Span<'static>>,
}

impl LineWriter {
    fn push(&mut self, span: Span<'static>) {
        self.current.push(span);
    }

    /// Pushes text, starting a new line at every `\n`.
    fn text(&mut self, text: &str, style: Style) {
        for (i, part) in text.split('\n').enumerate() {
            if i > 0 {
                self.break_line();
            }
            if !part.is_empty() {
                self.push(Span::styled(part.to_string(), style));
            }
        }
    }

    fn break_line(&mut self) {
        let spans = std::mem::take(&mut self.current);
        self.lines.push(Line::from(spans));
    }

    fn flush(&mut self) {
        if !self.current.is_empty() {
            self.break_line();
        }
    }

    /// Ends the current block with a single empty line.
    fn blank(&mut self) {
        self.flush();
        if self.lines.last().is_some_and(|l| !l.spans.is_empty()) {
            self.lines.push(Line::default());
        }
    }

    fn prefixed(&mut self, lines: Vec<Line<'static>>, first: &str, rest: &str) {
        for (i, line) in lines.into_iter().enumerate() {
            let prefix = if i == 0 { first } else { rest };
            let mut spans = vec![Span::styled(prefix.to_string(), DIM)];
            spans.extend(line.spans);
            self.lines.push(Line::from(spans));
        }
    }

    fn finish(mut self) -> Vec<Line<'static>> {
        self.flush();
        while self.lines.last().is_some_and(|l| l.spans.is_empty()) {
            self.lines.pop();
        }
        self.lines
    }
}

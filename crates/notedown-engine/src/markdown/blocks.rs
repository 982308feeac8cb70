//! Entry points the document walk calls for paragraphs, list items and links
//! that survived interception.

use crate::text::{Element, Fragment, FragmentPipeline, Markup, TextFragmentContext};

pub fn transform_list_item(
    frag: TextFragmentContext<'_>,
    pipeline: &FragmentPipeline<'_>,
) -> Fragment {
    Markup::ListItem(pipeline.process(frag)).into()
}

/// A paragraph that stays pure text is a paragraph. One that gained elements
/// becomes a bare group, since some elements render as blocks and may not
/// sit inside a paragraph.
pub fn transform_paragraph(
    frag: TextFragmentContext<'_>,
    pipeline: &FragmentPipeline<'_>,
) -> Fragment {
    let fragments = pipeline.process(frag);
    if fragments.iter().all(Fragment::is_text) {
        Markup::Paragraph(fragments).into()
    } else {
        Markup::Group(fragments).into()
    }
}

pub fn render_link(href: &str, pipeline: &FragmentPipeline<'_>) -> Fragment {
    Element::Hyperlink {
        url: href.to_string(),
        creator: pipeline.creator().to_string(),
    }
    .into()
}

//! Presentation of fragment trees.
//!
//! [`ElementRenderer`] is the per-kind contract a presentation layer
//! implements; [`html::HtmlRenderer`] is the one shipped with the engine.

pub mod html;

pub use html::HtmlRenderer;

use crate::encoding::hex_to_bech32;
use crate::models::UserMetadata;
use crate::text::Element;

/// Characters of the `npub1...` encoding shown for people without a profile.
const SHORT_NPUB_LEN: usize = 12;

/// Produces one output value per annotated element kind.
pub trait ElementRenderer {
    type Output;

    fn text(&self, text: &str) -> Self::Output;
    fn hyperlink(&self, url: &str, creator: &str) -> Self::Output;
    fn mention(&self, pubkey: &str) -> Self::Output;
    fn hashtag(&self, tag: &str) -> Self::Output;
    fn invoice(&self, invoice: &str) -> Self::Output;
    /// `label` is the shortened event encoding; activating the element must
    /// not reach enclosing click handlers.
    fn event_ref(&self, label: &str, route: &str) -> Self::Output;
    /// Error marker for a `#[N]` placeholder with no usable tag.
    fn unresolved(&self, placeholder: &str) -> Self::Output;

    fn element(&self, element: &Element) -> Self::Output {
        match element {
            Element::Hyperlink { url, creator } => self.hyperlink(url, creator),
            Element::Mention { pubkey, .. } => self.mention(pubkey),
            Element::EventRef { label, route, .. } => self.event_ref(label, route),
            Element::Hashtag { tag, .. } => self.hashtag(tag),
            Element::Invoice { invoice } => self.invoice(invoice),
            Element::Unresolved { placeholder } => self.unresolved(placeholder),
        }
    }
}

/// The name shown for a mentioned person: their profile name when cached,
/// otherwise a shortened npub.
pub fn mention_name(pubkey: &str, users: &UserMetadata) -> String {
    users
        .get(pubkey)
        .and_then(|m| m.best_name())
        .map(str::to_string)
        .unwrap_or_else(|| {
            hex_to_bech32("npub", pubkey)
                .chars()
                .take(SHORT_NPUB_LEN)
                .collect()
        })
}

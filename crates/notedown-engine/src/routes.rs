//! Route paths for the entities a post can point at.

use crate::encoding::hex_to_bech32;

pub fn event_link(id: &str) -> String {
    format!("/e/{}", hex_to_bech32("note", id))
}

pub fn profile_link(pubkey: &str) -> String {
    format!("/p/{}", hex_to_bech32("npub", pubkey))
}

pub fn hashtag_link(tag: &str) -> String {
    format!("/t/{tag}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_route_uses_note_encoding() {
        let id = "7e7e9c42a91bfef19fa929e5fda1b72e0ebc1a4c1141673e2794234d86addf4e";
        let route = event_link(id);
        assert!(route.starts_with("/e/note1"));
    }

    #[test]
    fn missing_event_id_still_routes() {
        assert_eq!(event_link(""), "/e/");
    }

    #[test]
    fn profile_route() {
        let pk = "7e7e9c42a91bfef19fa929e5fda1b72e0ebc1a4c1141673e2794234d86addf4e";
        assert_eq!(
            profile_link(pk),
            "/p/npub10elfcs4fr0l0r8af98jlmgdh9c8tcxjvz9qkw038js35mp4dma8qzvjptg"
        );
    }

    #[test]
    fn hashtag_route() {
        assert_eq!(hashtag_link("rust"), "/t/rust");
    }
}

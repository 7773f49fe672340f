use alloc::string::String;

/// `allow` list set on injected embed frames.
pub const EMBED_ALLOW: &str =
    "accelerometer; autoplay; clipboard-write; encrypted-media; gyroscope; picture-in-picture";
/// Class of the wrapper element injected into a card.
pub const EMBED_WRAP_CLASS: &str = "social-embed-wrap";
/// Class of the injected frame.
pub const EMBED_FRAME_CLASS: &str = "social-embed";
/// Attribute marking a card whose embed was injected.
pub const LOADED_ATTRIBUTE: &str = "data-loaded";
/// Target used when opening addresses in a new browsing context.
pub const NEW_CONTEXT_TARGET: &str = "_blank";
/// Window features used when opening addresses in a new browsing context.
pub const NEW_CONTEXT_FEATURES: &str = "noopener";

/// What the host must do after a card was activated.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CardAction {
    /// Open the address in a new browsing context, without an opener.
    OpenInNewContext(String),
    /// Append an embed frame for the address and mark the card loaded.
    InjectEmbed(String),
    /// The card is a link; let the platform handle it.
    Native,
    Nothing,
}

/// Whether a keyboard key activates a card. Hosts also suppress the key's default action.
pub fn is_activation_key(key: &str) -> bool {
    matches!(key, "Enter" | " ")
}

/// A social card as read from the page.
///
/// Empty addresses count as absent.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SocialCard {
    /// External-content address (`data-src`).
    pub src: Option<String>,
    /// Open `src` in a new context instead of embedding it.
    pub redirect: bool,
    /// The card element is itself a link.
    pub is_link: bool,
    /// The card's own `href`.
    pub href: Option<String>,
    /// `href` of the card's first descendant link.
    pub first_link_href: Option<String>,
    pub loaded: bool,
}

impl SocialCard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_src(mut self, src: impl Into<String>) -> Self {
        self.src = Some(src.into());
        self
    }

    pub fn with_redirect(mut self, redirect: bool) -> Self {
        self.redirect = redirect;
        self
    }

    pub fn with_link(mut self, is_link: bool) -> Self {
        self.is_link = is_link;
        self
    }

    pub fn with_href(mut self, href: impl Into<String>) -> Self {
        self.href = Some(href.into());
        self
    }

    pub fn with_first_link_href(mut self, href: impl Into<String>) -> Self {
        self.first_link_href = Some(href.into());
        self
    }

    /// Handles one click or activation key press.
    ///
    /// An embed is injected at most once; the card is marked loaded when it is.
    pub fn activate(&mut self) -> CardAction {
        if let Some(src) = non_empty(&self.src) {
            if self.redirect {
                return CardAction::OpenInNewContext(src.into());
            }
            if self.loaded {
                return CardAction::Nothing;
            }
            self.loaded = true;
            adebug!("SocialCard: injecting embed");
            return CardAction::InjectEmbed(src.into());
        }

        if self.is_link {
            return CardAction::Native;
        }
        match non_empty(&self.href).or_else(|| non_empty(&self.first_link_href)) {
            Some(href) => CardAction::OpenInNewContext(href.into()),
            None => CardAction::Nothing,
        }
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

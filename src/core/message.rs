use crate::domain::model::{Availability, Price};
use serde::Serialize;

pub const FALLBACK_TEXT: &str = "Best Buy Canada Stock Checker";
pub const HEADER_TEXT: &str = "Best Buy Stock Checker";

pub const PURCHASABLE_GLYPH: &str = ":money_with_wings:";
pub const UNAVAILABLE_GLYPH: &str = ":red_circle:";
pub const FAILED_GLYPH: &str = ":warning:";
pub const PREORDER_MARKER: &str = "(:date: Preorder!)";

/// Slack incoming-webhook payload (Block Kit).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SlackMessage {
    pub text: String,
    pub blocks: Vec<Block>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Block {
    #[serde(rename = "type")]
    pub kind: String,
    pub text: BlockText,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BlockText {
    #[serde(rename = "type")]
    pub kind: String,
    pub text: String,
}

impl Block {
    pub fn section(text: impl Into<String>) -> Self {
        Self {
            kind: "section".to_string(),
            text: BlockText {
                kind: "mrkdwn".to_string(),
                text: text.into(),
            },
        }
    }
}

impl SlackMessage {
    /// A message holding only the static header block.
    pub fn new() -> Self {
        Self {
            text: FALLBACK_TEXT.to_string(),
            blocks: vec![Block::section(HEADER_TEXT)],
        }
    }

    pub fn push_section(&mut self, text: impl Into<String>) {
        self.blocks.push(Block::section(text));
    }
}

impl Default for SlackMessage {
    fn default() -> Self {
        Self::new()
    }
}

/// Splits camel-case status tokens into words: `"AvailableForPickup"` becomes
/// `"Available For Pickup"`. A space is only inserted before an uppercase
/// letter that is neither the first character nor already preceded by
/// whitespace, so applying it twice changes nothing.
pub fn expand_camel_case(text: &str) -> String {
    let mut expanded = String::with_capacity(text.len() + 8);
    let mut previous: Option<char> = None;

    for ch in text.chars() {
        if ch.is_uppercase() {
            if let Some(prev) = previous {
                if !prev.is_whitespace() {
                    expanded.push(' ');
                }
            }
        }
        expanded.push(ch);
        previous = Some(ch);
    }

    expanded
}

pub fn format_item_block(desc: &str, availability: &Availability, price: &Price) -> String {
    let glyph = if availability.purchasable {
        PURCHASABLE_GLYPH
    } else {
        UNAVAILABLE_GLYPH
    };
    let preorder = if price.is_preorderable {
        PREORDER_MARKER
    } else {
        ""
    };

    format!(
        ">{}  {} - {} {}\n>*Shipping*: {} \n>*Pick-up*: {}",
        glyph,
        desc,
        price.display_price,
        preorder,
        expand_camel_case(&availability.shipping_status),
        expand_camel_case(&availability.pickup_status),
    )
}

/// Block used in keep-going mode when an item's lookups failed.
pub fn format_failed_block(desc: &str, reason: &str) -> String {
    format!(">{}  {} - lookup failed: {}", FAILED_GLYPH, desc, reason)
}

//! The touchpoint catalog shown when a user picks touchpoints for a channel.

use serde::Serialize;

/// One predefined touchpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CatalogTouchpoint {
    pub id: i64,
    pub name: &'static str,
    pub purpose: &'static str,
}

/// Predefined touchpoints for one channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CatalogChannel {
    pub channel: &'static str,
    pub options: &'static [CatalogTouchpoint],
}

const LAUNCH_SEQUENCE: &[CatalogTouchpoint] = &[
    CatalogTouchpoint {
        id: 1,
        name: "Teaser",
        purpose: "Build anticipation for the launch",
    },
    CatalogTouchpoint {
        id: 2,
        name: "Unveil Challenge",
        purpose: "Reveal the challenge or problem",
    },
    CatalogTouchpoint {
        id: 3,
        name: "Hype",
        purpose: "Generate excitement and buzz",
    },
    CatalogTouchpoint {
        id: 4,
        name: "Start Orders",
        purpose: "Announce order availability",
    },
    CatalogTouchpoint {
        id: 5,
        name: "Engagement",
        purpose: "Drive community interaction",
    },
    CatalogTouchpoint {
        id: 6,
        name: "Last Chance",
        purpose: "Final call to action",
    },
];

const WEBSITE: &[CatalogTouchpoint] = &[
    CatalogTouchpoint {
        id: 1,
        name: "Teaser",
        purpose: "Build anticipation for the launch",
    },
    CatalogTouchpoint {
        id: 2,
        name: "Product Page",
        purpose: "Full Product Page Copy",
    },
];

const CATALOG: &[CatalogChannel] = &[
    CatalogChannel {
        channel: "Organic",
        options: LAUNCH_SEQUENCE,
    },
    CatalogChannel {
        channel: "Email",
        options: LAUNCH_SEQUENCE,
    },
    CatalogChannel {
        channel: "Website",
        options: WEBSITE,
    },
];

/// The full catalog in display order.
pub fn catalog() -> &'static [CatalogChannel] {
    CATALOG
}

/// Catalog entries for one channel, matched case-insensitively.
pub fn channel_catalog(channel: &str) -> Option<&'static CatalogChannel> {
    CATALOG
        .iter()
        .find(|entry| entry.channel.eq_ignore_ascii_case(channel))
}

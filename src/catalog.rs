//! Static content catalog: the fixed, in-process list of site pages and tools.
//!
//! This is the one search source that cannot fail. It is built once at
//! startup and shared by reference; the fallback path substring-matches
//! against it and scores the matches with [`crate::ranking`].

use crate::types::{ResultKind, SearchResult};

/// A fixed catalog entry. Converted into a [`SearchResult`] on match.
#[derive(Debug, Clone)]
pub struct CatalogEntry {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub url: &'static str,
    pub kind: ResultKind,
    pub category: &'static str,
}

impl CatalogEntry {
    fn to_result(&self) -> SearchResult {
        SearchResult {
            id: self.id.to_string(),
            title: self.title.to_string(),
            description: self.description.to_string(),
            url: self.url.to_string(),
            kind: self.kind,
            category: Some(self.category.to_string()),
            snippet: None,
            relevance: None,
        }
    }
}

const ENTRIES: &[CatalogEntry] = &[
    CatalogEntry {
        id: "page-home",
        title: "Zwanski Tech - IT Services & Web Development",
        description: "Professional web development, device repair and IT support services",
        url: "/",
        kind: ResultKind::Page,
        category: "main",
    },
    CatalogEntry {
        id: "page-services",
        title: "Our Services",
        description: "Web development, mobile apps, SEO optimization and IT consulting",
        url: "/services",
        kind: ResultKind::Page,
        category: "main",
    },
    CatalogEntry {
        id: "page-about",
        title: "About Zwanski Tech",
        description: "Learn about our mission, team and story",
        url: "/about",
        kind: ResultKind::Page,
        category: "main",
    },
    CatalogEntry {
        id: "page-contact",
        title: "Contact Us",
        description: "Get in touch for quotes, support or collaboration",
        url: "/contact",
        kind: ResultKind::Page,
        category: "main",
    },
    CatalogEntry {
        id: "page-academy",
        title: "Zwanski Academy - Free Education",
        description: "Free programming courses, tutorials and learning paths",
        url: "/academy",
        kind: ResultKind::Page,
        category: "education",
    },
    CatalogEntry {
        id: "page-jobs",
        title: "Job Marketplace",
        description: "Find freelance work or post jobs for IT professionals",
        url: "/jobs",
        kind: ResultKind::Page,
        category: "marketplace",
    },
    CatalogEntry {
        id: "page-freelancers",
        title: "Hire Freelancers",
        description: "Browse verified freelance developers and IT specialists",
        url: "/freelancers",
        kind: ResultKind::Page,
        category: "marketplace",
    },
    CatalogEntry {
        id: "page-blog",
        title: "Blog",
        description: "Articles on web development, security and device repair",
        url: "/blog",
        kind: ResultKind::Page,
        category: "content",
    },
    CatalogEntry {
        id: "page-chat",
        title: "Live Chat Support",
        description: "Chat with our support team in real time",
        url: "/chat",
        kind: ResultKind::Page,
        category: "support",
    },
    CatalogEntry {
        id: "tool-imei",
        title: "IMEI Checker",
        description: "Check device IMEI status, blacklist and warranty information",
        url: "/tools/imei-check",
        kind: ResultKind::Tool,
        category: "tools",
    },
    CatalogEntry {
        id: "tool-3d",
        title: "3D Computer Model Viewer",
        description: "Interactive 3D view of computer hardware components",
        url: "/tools/3d-computer",
        kind: ResultKind::Tool,
        category: "tools",
    },
    CatalogEntry {
        id: "page-privacy",
        title: "Privacy Policy",
        description: "How we handle your data, cookies and consent",
        url: "/privacy",
        kind: ResultKind::Page,
        category: "legal",
    },
];

/// The immutable catalog. Safe to share by reference across tasks.
#[derive(Debug, Default)]
pub struct StaticCatalog;

impl StaticCatalog {
    pub fn new() -> Self {
        Self
    }

    /// All entries, in declaration order.
    pub fn entries(&self) -> &'static [CatalogEntry] {
        ENTRIES
    }

    /// Case-insensitive substring match over title, description, kind and
    /// category. `query` must already be normalized (trim + lowercase).
    pub fn matches(&self, query: &str) -> Vec<SearchResult> {
        if query.is_empty() {
            return Vec::new();
        }
        ENTRIES
            .iter()
            .filter(|entry| {
                entry.title.to_lowercase().contains(query)
                    || entry.description.to_lowercase().contains(query)
                    || entry.kind.as_str().contains(query)
                    || entry.category.contains(query)
            })
            .map(CatalogEntry::to_result)
            .collect()
    }
}

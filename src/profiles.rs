// file: src/profiles.rs
// description: selectable industry and region keyword profiles
// reference: operator profile catalog

/// One selectable profile: a display name and its keyword set.
#[derive(Debug, Clone, Copy)]
pub struct Profile {
    pub name: &'static str,
    pub keywords: &'static [&'static str],
}

pub const INDUSTRY_PROFILES: &[Profile] = &[
    Profile {
        name: "Finance/Insurance",
        keywords: &["finance", "banking", "insurance", "investment"],
    },
    Profile {
        name: "Healthcare/Pharma",
        keywords: &["healthcare", "medical", "hospital", "pharma", "pharmaceutical"],
    },
    Profile {
        name: "Technology/IT",
        keywords: &["technology", "software", "hardware", "saas", "cloud", "it services", "msp"],
    },
    Profile {
        name: "Manufacturing/Industrial",
        keywords: &["manufacturing", "industrial", "automotive", "aerospace"],
    },
    Profile {
        name: "Retail/Ecommerce",
        keywords: &["retail", "ecommerce", "consumer goods", "apparel", "foods"],
    },
    Profile {
        name: "Logistics/Transport",
        keywords: &["logistics", "shipping", "transport", "supply chain", "distribution", "warehouse"],
    },
    Profile {
        name: "Energy/Utilities",
        keywords: &["energy", "utility", "oil", "gas", "power"],
    },
    Profile {
        name: "Government/Public Sector",
        keywords: &["government", "public sector", "municipal", "federal", "state", "local"],
    },
    Profile {
        name: "Education",
        keywords: &["education", "university", "college", "school"],
    },
    Profile {
        name: "Construction/Real Estate",
        keywords: &["construction", "real estate", "property"],
    },
    Profile {
        name: "Legal",
        keywords: &["legal", "law firm"],
    },
    Profile {
        name: "Consulting/Professional Services",
        keywords: &["consulting", "professional services"],
    },
    Profile {
        name: "Media/Telecom",
        keywords: &["media", "entertainment", "telecom", "telecommunications"],
    },
    Profile {
        name: "Hospitality/Travel",
        keywords: &["hospitality", "hotel", "travel"],
    },
];

pub const REGION_PROFILES: &[Profile] = &[
    Profile {
        name: "North America (NA)",
        keywords: &["usa", "canada", "mexico"],
    },
    Profile {
        name: "Europe",
        keywords: &["uk", "united kingdom", "germany", "france", "italy", "spain", "eu", "europe"],
    },
    Profile {
        name: "Asia-Pacific (APAC)",
        keywords: &[
            "australia", "new zealand", "oceania", "china", "japan", "korea", "india",
            "singapore", "indonesia", "fiji", "apac", "asia", "asia pacific",
        ],
    },
    Profile {
        name: "Latin America (LATAM)",
        keywords: &["brazil", "argentina", "colombia", "mexico", "latin america", "south america"],
    },
    Profile {
        name: "Middle East & Africa (MEA)",
        keywords: &["uae", "saudi arabia", "south africa", "nigeria", "middle east", "africa"],
    },
];

/// Sorted unique union of the keywords within the given profiles.
pub fn keyword_union(profiles: &[&Profile]) -> Vec<String> {
    let mut keywords: Vec<String> = profiles
        .iter()
        .flat_map(|p| p.keywords.iter().map(|kw| kw.to_string()))
        .collect();
    keywords.sort();
    keywords.dedup();
    keywords
}

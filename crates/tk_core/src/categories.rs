use serde::Serialize;

/// Filter id that selects every article.
pub const ALL_CATEGORY: &str = "All";

/// Category assigned when the response names none.
pub const DEFAULT_CATEGORY: &str = "General";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CategoryDef {
    pub id: &'static str,
    pub label: &'static str,
    pub icon: &'static str,
}

pub const CATEGORIES: [CategoryDef; 6] = [
    CategoryDef { id: ALL_CATEGORY, label: "Top Stories", icon: "home" },
    CategoryDef { id: "Politics", label: "Politics", icon: "globe" },
    CategoryDef { id: "Business", label: "Business", icon: "trending-up" },
    CategoryDef { id: "Sports", label: "Sports", icon: "activity" },
    CategoryDef { id: "Tech", label: "Technology", icon: "cpu" },
    CategoryDef { id: "Entertainment", label: "Entertainment", icon: "film" },
];

pub fn find_category(id: &str) -> Option<&'static CategoryDef> {
    CATEGORIES.iter().find(|c| c.id == id)
}

/// Badge colour for a category label. Unknown labels fall back to `Gray`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryTone {
    Emerald,
    Orange,
    Blue,
    Purple,
    Cyan,
    Gray,
}

impl CategoryTone {
    pub fn for_category(category: &str) -> Self {
        match category.to_lowercase().as_str() {
            "politics" => Self::Emerald,
            "sports" => Self::Orange,
            "business" => Self::Blue,
            "entertainment" => Self::Purple,
            "tech" => Self::Cyan,
            _ => Self::Gray,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tone_is_exact_and_case_insensitive() {
        assert_eq!(CategoryTone::for_category("POLITICS"), CategoryTone::Emerald);
        assert_eq!(CategoryTone::for_category("tech"), CategoryTone::Cyan);
        // the palette is stricter than the filter
        assert_eq!(CategoryTone::for_category("Technology"), CategoryTone::Gray);
        assert_eq!(CategoryTone::for_category("Health"), CategoryTone::Gray);
    }

    #[test]
    fn test_categories_start_with_all() {
        assert_eq!(CATEGORIES[0].id, ALL_CATEGORY);
        assert_eq!(find_category("Tech").map(|c| c.label), Some("Technology"));
        assert!(find_category("Weather").is_none());
    }
}

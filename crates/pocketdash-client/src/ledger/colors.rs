use crate::config::DashboardConfig;

/// One step of the colour lookup. Rules are tried in order; the first match wins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColorRule {
    /// Case-sensitive equality with a configured category name.
    Exact { category: String, color: String },
    /// Case-insensitive substring match against any keyword in the group.
    Keywords { keywords: Vec<String>, color: String },
    /// Case-insensitive: the category contains a colour-table key.
    TableKey { key: String, color: String },
    Default { color: String },
}

impl ColorRule {
    fn matches(&self, category: &str, lowered: &str) -> bool {
        match self {
            Self::Exact { category: name, .. } => name == category,
            Self::Keywords { keywords, .. } => keywords
                .iter()
                .any(|keyword| !keyword.is_empty() && lowered.contains(keyword.as_str())),
            Self::TableKey { key, .. } => !key.is_empty() && lowered.contains(key.as_str()),
            Self::Default { .. } => true,
        }
    }

    fn color(&self) -> &str {
        match self {
            Self::Exact { color, .. }
            | Self::Keywords { color, .. }
            | Self::TableKey { color, .. }
            | Self::Default { color } => color,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ColorResolver {
    rules: Vec<ColorRule>,
    default_color: String,
}

impl ColorResolver {
    /// Exact table entries, then keyword groups, then a substring scan over the
    /// table's own keys, then the neutral default.
    pub fn from_config(config: &DashboardConfig) -> Self {
        let mut rules = Vec::new();
        rules.extend(config.category_colors.iter().map(|entry| ColorRule::Exact {
            category: entry.category.clone(),
            color: entry.color.clone(),
        }));
        rules.extend(config.keyword_groups.iter().map(|group| ColorRule::Keywords {
            keywords: group
                .keywords
                .iter()
                .map(|keyword| keyword.to_lowercase())
                .collect(),
            color: group.color.clone(),
        }));
        rules.extend(
            config
                .category_colors
                .iter()
                .map(|entry| ColorRule::TableKey {
                    key: entry.category.to_lowercase(),
                    color: entry.color.clone(),
                }),
        );
        rules.push(ColorRule::Default {
            color: config.default_color.clone(),
        });

        Self {
            rules,
            default_color: config.default_color.clone(),
        }
    }

    pub fn rules(&self) -> &[ColorRule] {
        &self.rules
    }

    /// Total over every input; a missing category goes straight to the default.
    pub fn color_of(&self, category: Option<&str>) -> &str {
        let Some(category) = category else {
            return &self.default_color;
        };

        let lowered = category.to_lowercase();
        self.rules
            .iter()
            .find(|rule| rule.matches(category, &lowered))
            .map(ColorRule::color)
            .unwrap_or(&self.default_color)
    }
}

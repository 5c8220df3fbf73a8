use serde::{Deserialize, Serialize};

/// One of the five colors, or colorless.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    White,
    Blue,
    Black,
    Red,
    Green,
    Colorless,
}

impl Color {
    pub fn symbol(self) -> char {
        match self {
            Color::White => 'w',
            Color::Blue => 'u',
            Color::Black => 'b',
            Color::Red => 'r',
            Color::Green => 'g',
            Color::Colorless => 'c',
        }
    }
}

/// How selected colors constrain a card's colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorMatch {
    /// Card has at least these colors.
    #[default]
    Including,
    /// Card has exactly these colors.
    Exactly,
    /// Card has no colors outside these.
    AtMost,
}

impl ColorMatch {
    fn operator(self) -> &'static str {
        match self {
            ColorMatch::Including => ":",
            ColorMatch::Exactly => "=",
            ColorMatch::AtMost => "<=",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Comparison {
    Eq,
    Lt,
    Lte,
    Gt,
    Gte,
}

impl Comparison {
    fn operator(self) -> &'static str {
        match self {
            Comparison::Eq => "=",
            Comparison::Lt => "<",
            Comparison::Lte => "<=",
            Comparison::Gt => ">",
            Comparison::Gte => ">=",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManaValueFilter {
    pub comparison: Comparison,
    pub value: u32,
}

/// Structured filters selected through the UI (color chips, type chips, ...).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SearchFilters {
    #[serde(default)]
    pub colors: Vec<Color>,
    #[serde(default)]
    pub color_match: ColorMatch,
    /// Card types; a card matching any of them passes.
    #[serde(default)]
    pub types: Vec<String>,
    /// Rarities; a card matching any of them passes.
    #[serde(default)]
    pub rarities: Vec<String>,
    #[serde(default)]
    pub set: Option<String>,
    /// Format the card must be legal in.
    #[serde(default)]
    pub format: Option<String>,
    #[serde(default)]
    pub mana_value: Option<ManaValueFilter>,
}

impl SearchFilters {
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
            && self.types.is_empty()
            && self.rarities.is_empty()
            && self.set.is_none()
            && self.format.is_none()
            && self.mana_value.is_none()
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.colors.push(color);
        self
    }

    pub fn with_type(mut self, card_type: impl Into<String>) -> Self {
        self.types.push(card_type.into());
        self
    }

    /// Provider clauses for every active filter, in a fixed order.
    pub fn clauses(&self) -> Vec<String> {
        let mut clauses = Vec::new();

        if !self.colors.is_empty() {
            let symbols: String = if self.colors.contains(&Color::Colorless) {
                "c".to_string()
            } else {
                self.colors.iter().map(|c| c.symbol()).collect()
            };
            clauses.push(format!("c{}{}", self.color_match.operator(), symbols));
        }

        if let Some(clause) = any_of("t", &self.types) {
            clauses.push(clause);
        }

        if let Some(clause) = any_of("r", &self.rarities) {
            clauses.push(clause);
        }

        if let Some(set) = &self.set {
            clauses.push(format!("s:{}", quote_value(set)));
        }

        if let Some(format) = &self.format {
            clauses.push(format!("f:{}", quote_value(format)));
        }

        if let Some(mv) = self.mana_value {
            clauses.push(format!("mv{}{}", mv.comparison.operator(), mv.value));
        }

        clauses
    }
}

fn any_of(field: &str, values: &[String]) -> Option<String> {
    let parts: Vec<String> = values
        .iter()
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .map(|v| format!("{}:{}", field, quote_value(v)))
        .collect();

    match parts.len() {
        0 => None,
        1 => parts.into_iter().next(),
        _ => Some(format!("({})", parts.join(" OR "))),
    }
}

fn quote_value(value: &str) -> String {
    if value.chars().any(char::is_whitespace) {
        format!("\"{}\"", value.replace('"', ""))
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_filters_have_no_clauses() {
        let filters = SearchFilters::default();
        assert!(filters.is_empty());
        assert!(filters.clauses().is_empty());
    }

    #[test]
    fn colors_collapse_into_one_clause() {
        let filters = SearchFilters::default()
            .with_color(Color::Red)
            .with_color(Color::Green);
        assert_eq!(filters.clauses(), vec!["c:rg".to_string()]);
    }

    #[test]
    fn exact_color_match_uses_equals() {
        let filters = SearchFilters {
            color_match: ColorMatch::Exactly,
            ..SearchFilters::default().with_color(Color::Blue)
        };
        assert_eq!(filters.clauses(), vec!["c=u".to_string()]);
    }

    #[test]
    fn multiple_types_are_alternatives() {
        let filters = SearchFilters::default()
            .with_type("creature")
            .with_type("legendary planeswalker");
        assert_eq!(
            filters.clauses(),
            vec!["(t:creature OR t:\"legendary planeswalker\")".to_string()]
        );
    }

    #[test]
    fn mana_value_and_format_clauses() {
        let filters = SearchFilters {
            format: Some("modern".to_string()),
            mana_value: Some(ManaValueFilter {
                comparison: Comparison::Lte,
                value: 2,
            }),
            ..SearchFilters::default()
        };
        assert_eq!(
            filters.clauses(),
            vec!["f:modern".to_string(), "mv<=2".to_string()]
        );
    }
}

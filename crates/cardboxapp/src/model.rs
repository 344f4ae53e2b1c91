use chrono::{Local, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// A stored recipe card.
///
/// Optional text fields are `None` rather than empty; `FormState::to_recipe`
/// guarantees that for saved records and import tolerates either.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub servings: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "deserialize_page_number"
    )]
    pub page_number: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meal: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cuisine: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ingredients: Vec<IngredientEntry>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub instructions: Vec<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "deserialize_created_at"
    )]
    pub created_at: Option<NaiveDate>,
}

impl Recipe {
    pub fn new(title: impl Into<String>, servings: impl Into<String>) -> Self {
        Self {
            id: String::new(),
            title: title.into(),
            servings: servings.into(),
            provider: None,
            reference: None,
            page_number: None,
            category: None,
            meal: None,
            cuisine: None,
            description: None,
            image: None,
            ingredients: Vec::new(),
            instructions: Vec::new(),
            created_at: None,
        }
    }

    /// Provider, treating an empty string as absent.
    pub fn provider(&self) -> Option<&str> {
        non_empty(&self.provider)
    }

    /// Reference, treating an empty string as absent.
    pub fn reference(&self) -> Option<&str> {
        non_empty(&self.reference)
    }

    pub fn category(&self) -> Option<&str> {
        non_empty(&self.category)
    }

    pub fn meal(&self) -> Option<&str> {
        non_empty(&self.meal)
    }

    pub fn cuisine(&self) -> Option<&str> {
        non_empty(&self.cuisine)
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.trim().is_empty())
}

/// One line of a recipe's ingredient list: either a plain item or a named group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum IngredientEntry {
    Item(String),
    Group(IngredientGroup),
}

impl IngredientEntry {
    pub fn item(text: impl Into<String>) -> Self {
        IngredientEntry::Item(text.into())
    }

    pub fn group<I, T>(name: impl Into<String>, items: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        IngredientEntry::Group(IngredientGroup {
            name: name.into(),
            items: items.into_iter().map(Into::into).collect(),
        })
    }
}

/// Serialized as `{"group": ..., "items": [...]}`; `name` is accepted on input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngredientGroup {
    #[serde(rename = "group", alias = "name")]
    pub name: String,
    #[serde(default)]
    pub items: Vec<String>,
}

impl IngredientGroup {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            items: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    #[default]
    Alphabetical,
    Person,
    Source,
    Date,
}

impl SortKey {
    pub const ALL: [SortKey; 4] = [
        SortKey::Alphabetical,
        SortKey::Person,
        SortKey::Source,
        SortKey::Date,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Alphabetical => "alphabetical",
            SortKey::Person => "person",
            SortKey::Source => "source",
            SortKey::Date => "date",
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "alphabetical" | "title" | "abc" => Ok(SortKey::Alphabetical),
            "person" | "provider" => Ok(SortKey::Person),
            "source" | "reference" => Ok(SortKey::Source),
            "date" | "created" => Ok(SortKey::Date),
            other => Err(format!(
                "Unknown sort order '{}'. Expected one of: alphabetical, person, source, date",
                other
            )),
        }
    }
}

/// Generates a record id of the form `recipe_<unix-millis>_<9 random chars>`.
pub fn generate_id() -> String {
    let random = Uuid::new_v4().simple().to_string();
    format!("recipe_{}_{}", Utc::now().timestamp_millis(), &random[..9])
}

/// Today's date on the local calendar.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Parses a page number the lenient way: optional sign and leading digits,
/// anything after the digits is ignored ("12b" is page 12).
pub fn parse_page_number(raw: &str) -> Option<i64> {
    let trimmed = raw.trim();
    let (sign, digits) = match trimmed.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    digits[..end].parse::<i64>().ok().map(|n| n * sign)
}

#[derive(Deserialize)]
#[serde(untagged)]
enum PageRepr {
    Int(i64),
    Float(f64),
    Text(String),
}

fn deserialize_page_number<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<PageRepr>::deserialize(deserializer)?;
    Ok(match raw {
        None => None,
        Some(PageRepr::Int(n)) => Some(n),
        Some(PageRepr::Float(f)) if f.is_finite() => Some(f.trunc() as i64),
        Some(PageRepr::Float(_)) => None,
        Some(PageRepr::Text(s)) => parse_page_number(&s),
    })
}

fn deserialize_created_at<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    // Accepts plain dates and full timestamps; only the calendar date is kept.
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.and_then(|s| {
        let date_part = s.trim().get(..10).unwrap_or(s.trim()).to_string();
        NaiveDate::parse_from_str(&date_part, "%Y-%m-%d").ok()
    }))
}

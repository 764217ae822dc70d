//! Typed record shapes used by structured content lists.

use std::fmt;

use serde::{
    Deserialize,
    Serialize,
};

/// One question/answer pair of an FAQ block.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct FaqEntry {
    pub question: String,
    pub answer: String,
}

/// One plan on the pricing page.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct PricingTier {
    pub title: String,
    pub price: String,
    /// Billing period shown next to the price. Empty for custom-quoted plans.
    pub period: String,
    pub description: String,
    pub features: Vec<String>,
    pub cta: String,
    /// Highlight label such as "Most popular".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub badge: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Feature {
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Testimonial {
    pub quote: String,
    pub author: String,
    pub role: String,
}

/// A headline figure, e.g. `{ value: "32%", label: "shorter wait times" }`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Stat {
    pub value: String,
    pub label: String,
}

/// The record shape of a [`RecordList`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordShape {
    Faq,
    Pricing,
    Feature,
    Testimonial,
    Stat,
}

impl RecordShape {
    /// Picks the shape from the field names of a record.
    ///
    /// Detection looks at distinguishing fields only; the full field set is
    /// checked when the list is deserialized.
    #[must_use]
    pub fn detect(fields: &[&str]) -> Option<Self> {
        let has = |name: &str| fields.contains(&name);

        if has("question") {
            Some(Self::Faq)
        } else if has("price") {
            Some(Self::Pricing)
        } else if has("quote") {
            Some(Self::Testimonial)
        } else if has("label") {
            Some(Self::Stat)
        } else if has("title") {
            Some(Self::Feature)
        } else {
            None
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Faq => "faq",
            Self::Pricing => "pricing",
            Self::Feature => "feature",
            Self::Testimonial => "testimonial",
            Self::Stat => "stat",
        }
    }
}

impl fmt::Display for RecordShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// An ordered, homogeneous list of records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum RecordList {
    Faq(Vec<FaqEntry>),
    Pricing(Vec<PricingTier>),
    Feature(Vec<Feature>),
    Testimonial(Vec<Testimonial>),
    Stat(Vec<Stat>),
}

impl RecordList {
    /// Deserializes `items` as a list of `shape` records.
    ///
    /// # Errors
    /// Any record that does not have exactly the fields of `shape`.
    pub fn from_json(
        shape: RecordShape,
        items: Vec<serde_json::Value>,
    ) -> Result<Self, serde_json::Error> {
        let items = serde_json::Value::Array(items);
        Ok(match shape {
            RecordShape::Faq => Self::Faq(serde_json::from_value(items)?),
            RecordShape::Pricing => Self::Pricing(serde_json::from_value(items)?),
            RecordShape::Feature => Self::Feature(serde_json::from_value(items)?),
            RecordShape::Testimonial => Self::Testimonial(serde_json::from_value(items)?),
            RecordShape::Stat => Self::Stat(serde_json::from_value(items)?),
        })
    }

    #[must_use]
    pub const fn shape(&self) -> RecordShape {
        match self {
            Self::Faq(_) => RecordShape::Faq,
            Self::Pricing(_) => RecordShape::Pricing,
            Self::Feature(_) => RecordShape::Feature,
            Self::Testimonial(_) => RecordShape::Testimonial,
            Self::Stat(_) => RecordShape::Stat,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Faq(items) => items.len(),
            Self::Pricing(items) => items.len(),
            Self::Feature(items) => items.len(),
            Self::Testimonial(items) => items.len(),
            Self::Stat(items) => items.len(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Flattens every record field into `(field path, text)` pairs, e.g.
    /// `("[0].question", "...")` and `("[1].features[2]", "...")` for a `"."` separator.
    #[must_use]
    pub fn leaf_texts(&self, separator: &str) -> Vec<(String, &str)> {
        let mut result = Vec::new();
        match self {
            Self::Faq(items) => {
                for (i, item) in items.iter().enumerate() {
                    result.push((format!("[{i}]{separator}question"), item.question.as_str()));
                    result.push((format!("[{i}]{separator}answer"), item.answer.as_str()));
                }
            }
            Self::Pricing(items) => {
                for (i, item) in items.iter().enumerate() {
                    result.push((format!("[{i}]{separator}title"), item.title.as_str()));
                    result.push((format!("[{i}]{separator}price"), item.price.as_str()));
                    result.push((format!("[{i}]{separator}period"), item.period.as_str()));
                    result.push((format!("[{i}]{separator}description"), item.description.as_str()));
                    for (j, feature) in item.features.iter().enumerate() {
                        result.push((format!("[{i}]{separator}features[{j}]"), feature.as_str()));
                    }
                    result.push((format!("[{i}]{separator}cta"), item.cta.as_str()));
                    if let Some(badge) = &item.badge {
                        result.push((format!("[{i}]{separator}badge"), badge.as_str()));
                    }
                }
            }
            Self::Feature(items) => {
                for (i, item) in items.iter().enumerate() {
                    result.push((format!("[{i}]{separator}title"), item.title.as_str()));
                    result.push((format!("[{i}]{separator}description"), item.description.as_str()));
                }
            }
            Self::Testimonial(items) => {
                for (i, item) in items.iter().enumerate() {
                    result.push((format!("[{i}]{separator}quote"), item.quote.as_str()));
                    result.push((format!("[{i}]{separator}author"), item.author.as_str()));
                    result.push((format!("[{i}]{separator}role"), item.role.as_str()));
                }
            }
            Self::Stat(items) => {
                for (i, item) in items.iter().enumerate() {
                    result.push((format!("[{i}]{separator}value"), item.value.as_str()));
                    result.push((format!("[{i}]{separator}label"), item.label.as_str()));
                }
            }
        }
        result
    }
}

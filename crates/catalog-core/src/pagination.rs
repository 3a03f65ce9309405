//! Listing filter and the resolved store query it produces.

use serde::{de, Deserialize, Deserializer, Serialize};
use std::{fmt::Display, str::FromStr};
use validator::Validate;

/// Filter accepted by the product listing.
///
/// Field order is significant: the serialized form is part of the cache key,
/// so fields serialize as `categories`, `skip`, `take`, `cursor` and absent
/// fields are omitted. Blank categories (`?categories=`) are dropped on
/// deserialization and count as no filter, so they never reach the key.
/// A numeric parameter given with an empty value (`?skip=`) is rejected
/// rather than read as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[cfg_attr(feature = "openapi", derive(utoipa::IntoParams))]
#[cfg_attr(feature = "openapi", into_params(parameter_in = Query))]
pub struct ListingFilter {
    /// Match products in any of these categories. Empty matches everything.
    #[serde(
        default,
        skip_serializing_if = "Vec::is_empty",
        deserialize_with = "non_blank_categories"
    )]
    pub categories: Vec<String>,

    /// Number of rows to skip.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "present_number"
    )]
    pub skip: Option<u64>,

    /// Maximum number of rows to return.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "present_number"
    )]
    #[validate(range(min = 1, message = "take must be a positive integer"))]
    pub take: Option<u64>,

    /// Exclusive lower bound on the product id.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "present_number"
    )]
    pub cursor: Option<i64>,
}

impl ListingFilter {
    /// Default number of rows skipped.
    pub const DEFAULT_SKIP: u64 = 0;
    /// Default page size.
    pub const DEFAULT_TAKE: u64 = 20;

    /// Creates an empty filter.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Restricts the listing to the given categories.
    #[must_use]
    pub fn categories<I, S>(mut self, categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.categories = categories.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the offset.
    #[must_use]
    pub const fn skip(mut self, skip: u64) -> Self {
        self.skip = Some(skip);
        self
    }

    /// Sets the page size.
    #[must_use]
    pub const fn take(mut self, take: u64) -> Self {
        self.take = Some(take);
        self
    }

    /// Sets the keyset cursor.
    #[must_use]
    pub const fn cursor(mut self, cursor: i64) -> Self {
        self.cursor = Some(cursor);
        self
    }

    /// Drops blank category entries.
    #[must_use]
    pub fn normalized(mut self) -> Self {
        self.categories.retain(|c| !is_blank(c));
        self
    }

    /// Resolves defaults into the query handed to the store.
    #[must_use]
    pub fn to_query(&self) -> ProductQuery {
        ProductQuery {
            categories: self
                .categories
                .iter()
                .filter(|c| !is_blank(c))
                .cloned()
                .collect(),
            skip: self.skip.unwrap_or(Self::DEFAULT_SKIP),
            take: self.take.unwrap_or(Self::DEFAULT_TAKE),
            cursor: self.cursor,
        }
    }
}

fn is_blank(category: &str) -> bool {
    category.trim().is_empty()
}

fn non_blank_categories<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let mut categories = Vec::<String>::deserialize(deserializer)?;
    categories.retain(|c| !is_blank(c));
    Ok(categories)
}

/// Accepts a number or its text form. Query strings only carry text.
fn present_number<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + FromStr,
    T::Err: Display,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw<T> {
        Number(T),
        Text(String),
    }

    match Raw::<T>::deserialize(deserializer)? {
        Raw::Number(value) => Ok(Some(value)),
        Raw::Text(text) if text.trim().is_empty() => {
            Err(de::Error::custom("numeric parameter must not be empty"))
        }
        Raw::Text(text) => text.trim().parse().map(Some).map_err(de::Error::custom),
    }
}

/// Fully resolved listing query.
///
/// When `cursor` is set the store returns ids strictly greater than it and
/// still applies `skip` as an offset after the cursor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductQuery {
    pub categories: Vec<String>,
    pub skip: u64,
    pub take: u64,
    pub cursor: Option<i64>,
}

impl ProductQuery {
    /// Returns true if the query filters by category.
    #[must_use]
    pub fn has_category_filter(&self) -> bool {
        !self.categories.is_empty()
    }
}

impl Default for ProductQuery {
    fn default() -> Self {
        ListingFilter::default().to_query()
    }
}

//! Pass-through query filters shared by both backends.

use std::collections::BTreeMap;

/// A filter value: one string, or a list sent as repeated parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterValue {
    One(String),
    Many(Vec<String>),
}

impl FilterValue {
    pub fn values(&self) -> Vec<&str> {
        match self {
            FilterValue::One(value) => vec![value.as_str()],
            FilterValue::Many(values) => values.iter().map(String::as_str).collect(),
        }
    }

    /// Every value parsed as an id; unparseable values are ignored.
    pub fn ids(&self) -> Vec<u64> {
        self.values()
            .into_iter()
            .flat_map(|v| v.split(','))
            .filter_map(|v| v.trim().parse().ok())
            .collect()
    }
}

/// Query parameters for a list request, plus the "embed related" flag.
///
/// Keys are kept sorted so equal filters always render the same query string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContentFilter {
    params: BTreeMap<String, FilterValue>,
    embed: bool,
}

impl ContentFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a single-valued parameter, replacing any previous value.
    pub fn param(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.params
            .insert(key.into(), FilterValue::One(value.to_string()));
        self
    }

    /// Sets an array-valued parameter, replacing any previous value.
    pub fn params<I, V>(mut self, key: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: ToString,
    {
        let values = values.into_iter().map(|v| v.to_string()).collect();
        self.params.insert(key.into(), FilterValue::Many(values));
        self
    }

    /// Requests the `_embed` expansion (author, featured media, terms).
    pub fn with_embed(mut self) -> Self {
        self.embed = true;
        self
    }

    pub fn embed(&self) -> bool {
        self.embed
    }

    pub fn get(&self, key: &str) -> Option<&FilterValue> {
        self.params.get(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FilterValue)> {
        self.params.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn per_page(&self) -> Option<usize> {
        self.first_number("per_page")
    }

    pub fn page(&self) -> Option<usize> {
        self.first_number("page")
    }

    fn first_number(&self, key: &str) -> Option<usize> {
        self.get(key)?.values().first()?.trim().parse().ok()
    }

    /// Renders the filter as query pairs. Array values repeat their key once per
    /// element instead of being comma-joined.
    pub fn to_query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs: Vec<(String, String)> = self
            .params
            .iter()
            .flat_map(|(key, value)| {
                value
                    .values()
                    .into_iter()
                    .map(move |v| (key.clone(), v.to_string()))
            })
            .collect();
        if self.embed {
            pairs.push(("_embed".to_string(), "1".to_string()));
        }
        pairs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_array_values_are_repeated() {
        let filter = ContentFilter::new()
            .params("categories", [3, 7])
            .param("per_page", 20)
            .with_embed();

        assert_eq!(
            filter.to_query_pairs(),
            vec![
                ("categories".to_string(), "3".to_string()),
                ("categories".to_string(), "7".to_string()),
                ("per_page".to_string(), "20".to_string()),
                ("_embed".to_string(), "1".to_string()),
            ]
        );
        assert_eq!(filter.per_page(), Some(20));
        assert_eq!(filter.page(), None);
    }

    #[test]
    fn test_ids_accept_comma_lists() {
        let value = FilterValue::One("1, 2,x".to_string());
        assert_eq!(value.ids(), vec![1, 2]);
    }
}

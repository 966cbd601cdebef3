//! Form submissions as ordered key/value pairs.

/// Fields collected from a form at submit time.
///
/// Order and duplicates are preserved: a multi-select with two chosen
/// options yields two pairs with the same name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormFields {
    pairs: Vec<(String, String)>,
}

impl FormFields {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.pairs.push((name.into(), value.into()));
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// `application/x-www-form-urlencoded` serialization, with spaces as `+`
    /// the way browsers encode form submissions.
    pub fn to_query_string(&self) -> String {
        self.pairs
            .iter()
            .map(|(key, value)| format!("{}={}", encode_component(key), encode_component(value)))
            .collect::<Vec<_>>()
            .join("&")
    }

    /// `path?query`, or just `path` when the form is empty
    pub fn append_to(&self, path: &str) -> String {
        if self.is_empty() {
            path.to_string()
        } else {
            format!("{}?{}", path, self.to_query_string())
        }
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FormFields {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            pairs: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

fn encode_component(raw: &str) -> String {
    urlencoding::encode(raw).replace("%20", "+")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_string_preserves_repeated_fields() {
        let fields: FormFields = [
            ("category", "Food"),
            ("category", "Transport"),
            ("start_date", "2024-03-01"),
        ]
        .into_iter()
        .collect();

        assert_eq!(
            fields.to_query_string(),
            "category=Food&category=Transport&start_date=2024-03-01"
        );
    }

    #[test]
    fn test_special_characters_are_encoded() {
        let mut fields = FormFields::new();
        fields.push("description", "Coffee & cake");
        fields.push("note", "50% off=yes");

        assert_eq!(
            fields.to_query_string(),
            "description=Coffee+%26+cake&note=50%25+off%3Dyes"
        );
    }

    #[test]
    fn test_empty_values_are_kept() {
        let fields: FormFields = [("category", ""), ("min_amount", "10")].into_iter().collect();
        assert_eq!(fields.to_query_string(), "category=&min_amount=10");
    }

    #[test]
    fn test_append_to_path() {
        let fields: FormFields = [("category", "Food")].into_iter().collect();
        assert_eq!(fields.append_to("/expenses"), "/expenses?category=Food");
        assert_eq!(FormFields::new().append_to("/expenses"), "/expenses");
    }
}

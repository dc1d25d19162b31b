use std::borrow::{Borrow, Cow};
use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde_json::Value;

use super::error::FilterError;
use super::types::{FilterOrderInfo, SortDirection};

/// Comparable value of one column. Variants only compare within their kind.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum SortValue<'a> {
    Number(Decimal),
    Time(DateTime<Utc>),
    Text(Cow<'a, str>),
}

pub type SortKeyFn<T> = Box<dyn for<'a> Fn(&'a T) -> Option<SortValue<'a>> + Send + Sync>;

/// Named sort columns of a record shape
pub struct SortKeys<T> {
    keys: Vec<(String, SortKeyFn<T>)>,
}

impl<T> Default for SortKeys<T> {
    fn default() -> Self {
        Self { keys: vec![] }
    }
}

impl<T> SortKeys<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn key<F>(mut self, column: impl Into<String>, accessor: F) -> Self
    where
        F: for<'a> Fn(&'a T) -> Option<SortValue<'a>> + Send + Sync + 'static,
    {
        self.keys.push((column.into(), Box::new(accessor)));
        self
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> + '_ {
        self.keys.iter().map(|(c, _)| c.as_str())
    }

    fn get(&self, column: &str) -> Option<&SortKeyFn<T>> {
        self.keys.iter().find(|(c, _)| c == column).map(|(_, f)| f)
    }
}

/// Parsed column ordering, applied downstream of filtering
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterOrder {
    infos: Vec<FilterOrderInfo>,
}

impl FilterOrder {
    pub fn infos(&self) -> &[FilterOrderInfo] {
        &self.infos
    }

    pub fn is_empty(&self) -> bool {
        self.infos.is_empty()
    }

    pub fn validate_and_parse(order: &Value) -> Result<Self, FilterError> {
        let infos = match order {
            Value::Null => vec![],
            Value::String(s) => Self::parse_order_string(s)?,
            Value::Array(arr) => {
                // ["propertyName asc", "marketRent desc"]
                let mut out = Vec::new();
                for v in arr {
                    match v {
                        Value::String(s) => out.extend(Self::parse_order_string(s)?),
                        other => return Err(FilterError::InvalidOrder(format!("expected string, got {}", other))),
                    }
                }
                out
            }
            Value::Object(obj) => {
                // { "marketRent": "desc" }
                let mut out = Vec::new();
                for (k, v) in obj {
                    let Value::String(dir) = v else {
                        return Err(FilterError::InvalidOrder(format!("expected string direction for '{}'", k)));
                    };
                    out.push(FilterOrderInfo { column: k.clone(), sort: Self::parse_direction(dir)? });
                }
                out
            }
            other => return Err(FilterError::InvalidOrder(format!("unsupported order format: {}", other))),
        };
        Ok(Self { infos })
    }

    pub fn parse(s: &str) -> Result<Self, FilterError> {
        Ok(Self { infos: Self::parse_order_string(s)? })
    }

    fn parse_order_string(s: &str) -> Result<Vec<FilterOrderInfo>, FilterError> {
        // split on commas, then each token into column and direction
        let mut out = Vec::new();
        for part in s.split(',') {
            let trimmed = part.trim();
            if trimmed.is_empty() { continue; }
            let mut it = trimmed.split_whitespace();
            if let Some(col) = it.next() {
                let sort = Self::parse_direction(it.next().unwrap_or("asc"))?;
                if let Some(extra) = it.next() {
                    return Err(FilterError::InvalidOrder(format!("unexpected token '{}' in '{}'", extra, trimmed)));
                }
                out.push(FilterOrderInfo { column: col.to_string(), sort });
            }
        }
        Ok(out)
    }

    fn parse_direction(dir: &str) -> Result<SortDirection, FilterError> {
        if dir.eq_ignore_ascii_case("asc") {
            Ok(SortDirection::Asc)
        } else if dir.eq_ignore_ascii_case("desc") {
            Ok(SortDirection::Desc)
        } else {
            Err(FilterError::InvalidOrder(format!("unknown direction '{}'", dir)))
        }
    }

    /// Stable sort of `records`; ties keep their incoming order. Missing
    /// values sort before present ones when ascending.
    pub fn sort<T, R: Borrow<T>>(&self, records: &mut [R], keys: &SortKeys<T>) -> Result<(), FilterError> {
        let resolved = self
            .infos
            .iter()
            .map(|info| {
                keys.get(&info.column)
                    .map(|f| (f, info.sort))
                    .ok_or_else(|| FilterError::InvalidColumn(info.column.clone()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        if resolved.is_empty() {
            return Ok(());
        }

        records.sort_by(|a, b| {
            let (a, b) = (a.borrow(), b.borrow());
            for (key, sort) in &resolved {
                let ord = key(a).cmp(&key(b));
                let ord = match sort {
                    SortDirection::Asc => ord,
                    SortDirection::Desc => ord.reverse(),
                };
                if ord != Ordering::Equal {
                    return ord;
                }
            }
            Ordering::Equal
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    struct Item {
        name: &'static str,
        price: Option<i64>,
    }

    fn keys() -> SortKeys<Item> {
        SortKeys::new()
            .key("name", |i: &Item| Some(SortValue::Text(Cow::Borrowed(i.name))))
            .key("price", |i: &Item| i.price.map(|p| SortValue::Number(Decimal::from(p))))
    }

    fn items() -> Vec<Item> {
        vec![
            Item { name: "b", price: Some(10) },
            Item { name: "a", price: None },
            Item { name: "c", price: Some(10) },
            Item { name: "d", price: Some(2) },
        ]
    }

    #[test]
    fn test_parse_order_string() {
        let order = FilterOrder::parse("price desc, name").unwrap();
        assert_eq!(order.infos().len(), 2);
        assert_eq!(order.infos()[0].sort, SortDirection::Desc);
        assert_eq!(order.infos()[1].column, "name");
        assert_eq!(order.infos()[1].sort, SortDirection::Asc);
    }

    #[test]
    fn test_parse_order_object_and_array() {
        let order = FilterOrder::validate_and_parse(&json!({ "price": "DESC" })).unwrap();
        assert_eq!(order.infos()[0].sort, SortDirection::Desc);

        let order = FilterOrder::validate_and_parse(&json!(["name asc", "price desc"])).unwrap();
        assert_eq!(order.infos().len(), 2);
    }

    #[test]
    fn test_object_direction_must_be_known_string() {
        for bad in [json!({ "price": "sideways" }), json!({ "price": 5 }), json!({ "price": null })] {
            let err = FilterOrder::validate_and_parse(&bad).unwrap_err();
            assert!(matches!(err, FilterError::InvalidOrder(_)), "accepted {}", bad);
        }
    }

    #[test]
    fn test_bad_direction_is_rejected() {
        assert!(matches!(FilterOrder::parse("name sideways"), Err(FilterError::InvalidOrder(_))));
    }

    #[test]
    fn test_sort_is_stable_and_descending() {
        let mut list = items();
        FilterOrder::parse("price desc").unwrap().sort(&mut list, &keys()).unwrap();
        let names: Vec<_> = list.iter().map(|i| i.name).collect();
        assert_eq!(names, vec!["b", "c", "d", "a"]);
    }

    #[test]
    fn test_sort_borrowed_records() {
        let owned = items();
        let mut refs: Vec<&Item> = owned.iter().collect();
        FilterOrder::parse("name desc").unwrap().sort(&mut refs, &keys()).unwrap();
        assert_eq!(refs[0].name, "d");
    }

    #[test]
    fn test_unknown_column() {
        let mut list = items();
        let err = FilterOrder::parse("weight").unwrap().sort(&mut list, &keys()).unwrap_err();
        assert!(matches!(err, FilterError::InvalidColumn(c) if c == "weight"));
    }
}

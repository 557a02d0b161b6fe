//! OData query option builder.
//!
//! `QueryOptions` holds the recognized option set and renders it into
//! `$`-prefixed query parameters. Values pass through verbatim: no OData
//! quoting is done and `orderby` directions are not validated, so a bad
//! value is rejected by the server rather than here.

use serde::Deserialize;

/// `$select` given either pre-joined or as a list of field names.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum Select {
    Joined(String),
    Fields(Vec<String>),
}

impl Select {
    fn render(&self) -> String {
        match self {
            Select::Joined(s) => s.clone(),
            Select::Fields(fields) => fields.join(","),
        }
    }
}

/// `$orderby` given either raw or as a `{ sort_field, sort_order }` pair.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum OrderBy {
    Field {
        sort_field: String,
        sort_order: String,
    },
    Raw(String),
}

impl OrderBy {
    fn render(&self) -> String {
        match self {
            OrderBy::Field {
                sort_field,
                sort_order,
            } => format!("{sort_field} {sort_order}"),
            OrderBy::Raw(s) => s.clone(),
        }
    }
}

/// Shortcut for filtering on a single-value extended property.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ExtendedPropertyFilter {
    pub id: String,
    pub value: String,
}

impl ExtendedPropertyFilter {
    pub fn to_filter(&self) -> String {
        format!(
            "singleValueExtendedProperties/Any(ep: ep/id eq '{}' and ep/value eq '{}')",
            self.id, self.value
        )
    }
}

/// The recognized query options of a single call.
///
/// Deserializes from a map using the option names as keys, e.g.
/// `{"top": 30, "select": ["Subject", "From"]}`. Unknown keys are rejected.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct QueryOptions {
    pub skiptoken: Option<String>,
    pub deltatoken: Option<String>,
    pub search: Option<String>,
    pub filter: Option<String>,
    pub select: Option<Select>,
    pub orderby: Option<OrderBy>,
    pub top: Option<u32>,
    pub skip: Option<u32>,
    pub expand: Option<String>,
    pub count: Option<bool>,
    pub single_value_extended_property: Option<ExtendedPropertyFilter>,
}

impl QueryOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn skiptoken(mut self, token: impl Into<String>) -> Self {
        self.skiptoken = Some(token.into());
        self
    }

    pub fn deltatoken(mut self, token: impl Into<String>) -> Self {
        self.deltatoken = Some(token.into());
        self
    }

    pub fn search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    pub fn filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = Some(filter.into());
        self
    }

    pub fn select<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.select = Some(Select::Fields(fields.into_iter().map(Into::into).collect()));
        self
    }

    pub fn order_by(mut self, field: impl Into<String>, direction: impl Into<String>) -> Self {
        self.orderby = Some(OrderBy::Field {
            sort_field: field.into(),
            sort_order: direction.into(),
        });
        self
    }

    pub fn top(mut self, top: u32) -> Self {
        self.top = Some(top);
        self
    }

    pub fn skip(mut self, skip: u32) -> Self {
        self.skip = Some(skip);
        self
    }

    pub fn expand(mut self, expand: impl Into<String>) -> Self {
        self.expand = Some(expand.into());
        self
    }

    pub fn count(mut self, count: bool) -> Self {
        self.count = Some(count);
        self
    }

    pub fn extended_property(mut self, id: impl Into<String>, value: impl Into<String>) -> Self {
        self.single_value_extended_property = Some(ExtendedPropertyFilter {
            id: id.into(),
            value: value.into(),
        });
        self
    }

    pub fn is_empty(&self) -> bool {
        self.to_params().is_empty()
    }

    /// Render the present options as `$`-prefixed parameters.
    ///
    /// Order is fixed: skiptoken, deltatoken, search, filter, select,
    /// orderby, top, skip, expand, count. Empty strings and empty lists are
    /// dropped; numbers are always kept; `count` only appears when `true`.
    ///
    /// The extended-property shortcut replaces any explicit `filter`.
    pub fn to_params(&self) -> Vec<(String, String)> {
        let mut params = Vec::new();
        push_text(&mut params, "$skiptoken", self.skiptoken.as_deref());
        push_text(&mut params, "$deltatoken", self.deltatoken.as_deref());
        push_text(&mut params, "$search", self.search.as_deref());

        let filter = match &self.single_value_extended_property {
            Some(ep) => Some(ep.to_filter()),
            None => self.filter.clone(),
        };
        push_text(&mut params, "$filter", filter.as_deref());

        let select = self.select.as_ref().map(Select::render);
        push_text(&mut params, "$select", select.as_deref());
        let orderby = self.orderby.as_ref().map(OrderBy::render);
        push_text(&mut params, "$orderby", orderby.as_deref());

        if let Some(top) = self.top {
            params.push(("$top".to_string(), top.to_string()));
        }
        if let Some(skip) = self.skip {
            params.push(("$skip".to_string(), skip.to_string()));
        }
        push_text(&mut params, "$expand", self.expand.as_deref());
        if self.count == Some(true) {
            params.push(("$count".to_string(), "true".to_string()));
        }
        params
    }
}

fn push_text(params: &mut Vec<(String, String)>, name: &str, value: Option<&str>) {
    if let Some(value) = value.filter(|v| !v.is_empty()) {
        params.push((name.to_string(), value.to_string()));
    }
}

/// Join parameters into a query string.
///
/// Values are percent-encoded for transport only. Keys are left literal so
/// `$top` stays `$top` on the wire.
pub fn encode_query(params: &[(String, String)]) -> String {
    params
        .iter()
        .map(|(k, v)| format!("{k}={}", urlencoding::encode(v)))
        .collect::<Vec<_>>()
        .join("&")
}

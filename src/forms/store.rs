use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::value::FieldValue;

const PATH_SEPARATOR: char = '.';

/// Flat-or-nested bag of every input collected by a form or wizard.
///
/// Nothing is validated at rest; see [`super::FormDescriptor::check_required`]
/// for submission-time checks.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormFieldStore {
    values: BTreeMap<String, FieldValue>,
    #[serde(skip)]
    unsaved: bool,
}

impl FormFieldStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a store from seed values without flagging unsaved changes.
    pub fn from_entries<K, V, I>(entries: I) -> Self
    where
        K: Into<String>,
        V: Into<FieldValue>,
        I: IntoIterator<Item = (K, V)>,
    {
        Self {
            values: entries
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
            unsaved: false,
        }
    }

    /// Sets a field. A dotted name (`notifications.email`) addresses a key
    /// inside a nested group, creating intermediate groups as needed.
    pub fn set_field(&mut self, name: &str, value: impl Into<FieldValue>) {
        insert_path(&mut self.values, name, value.into());
        self.unsaved = true;
    }

    /// Updates one key of a nested group, leaving sibling keys untouched.
    pub fn set_group_field(&mut self, group: &str, key: &str, value: impl Into<FieldValue>) {
        self.set_field(&format!("{group}{PATH_SEPARATOR}{key}"), value);
    }

    /// Adds or removes `item` from a list-valued field.
    pub fn set_list_field(&mut self, name: &str, item: &str, included: bool) {
        let mut items = self.list(name).map(<[String]>::to_vec).unwrap_or_default();
        let present = items.iter().any(|existing| existing == item);
        if included && !present {
            items.push(item.to_string());
        } else if !included {
            items.retain(|existing| existing != item);
        }
        self.set_field(name, FieldValue::List(items));
    }

    pub fn remove_field(&mut self, name: &str) -> Option<FieldValue> {
        let removed = self.values.remove(name);
        if removed.is_some() {
            self.unsaved = true;
        }
        removed
    }

    /// Resolves a plain or dotted field name.
    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        let mut segments = name.split(PATH_SEPARATOR);
        let first = segments.next()?;
        let mut current = self.values.get(first)?;
        for segment in segments {
            current = current.as_group()?.get(segment)?;
        }
        Some(current)
    }

    pub fn text(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(FieldValue::as_text)
    }

    /// Trimmed text, treating blank strings as absent.
    pub fn non_empty_text(&self, name: &str) -> Option<&str> {
        self.text(name)
            .map(str::trim)
            .filter(|value| !value.is_empty())
    }

    pub fn number(&self, name: &str) -> Option<f64> {
        self.get(name).and_then(FieldValue::as_number)
    }

    pub fn flag(&self, name: &str) -> Option<bool> {
        self.get(name).and_then(FieldValue::as_flag)
    }

    pub fn list(&self, name: &str) -> Option<&[String]> {
        self.get(name).and_then(FieldValue::as_list)
    }

    /// Whether the field exists and is not blank.
    pub fn is_present(&self, name: &str) -> bool {
        self.get(name).is_some_and(|value| !value.is_blank())
    }

    /// Right-biased shallow merge: top-level keys in `overrides` win.
    pub fn merged_with(&self, overrides: &FormFieldStore) -> FormFieldStore {
        let mut values = self.values.clone();
        for (key, value) in &overrides.values {
            values.insert(key.clone(), value.clone());
        }
        FormFieldStore {
            values,
            unsaved: false,
        }
    }

    pub fn has_unsaved_changes(&self) -> bool {
        self.unsaved
    }

    pub fn mark_saved(&mut self) {
        self.unsaved = false;
    }

    pub fn clear(&mut self) {
        self.values.clear();
        self.unsaved = false;
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.values.iter().map(|(key, value)| (key.as_str(), value))
    }
}

/// Stores compare by content; the unsaved flag is session state.
impl PartialEq for FormFieldStore {
    fn eq(&self, other: &Self) -> bool {
        self.values == other.values
    }
}

fn insert_path(entries: &mut BTreeMap<String, FieldValue>, path: &str, value: FieldValue) {
    match path.split_once(PATH_SEPARATOR) {
        None => {
            entries.insert(path.to_string(), value);
        }
        Some((head, rest)) => {
            let slot = entries
                .entry(head.to_string())
                .or_insert_with(|| FieldValue::Group(BTreeMap::new()));
            if !matches!(slot, FieldValue::Group(_)) {
                *slot = FieldValue::Group(BTreeMap::new());
            }
            if let FieldValue::Group(nested) = slot {
                insert_path(nested, rest, value);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_field_marks_unsaved() {
        let mut store = FormFieldStore::new();
        assert!(!store.has_unsaved_changes());
        store.set_field("name", "Spring Bonus");
        assert!(store.has_unsaved_changes());
        assert_eq!(store.text("name"), Some("Spring Bonus"));
        store.mark_saved();
        assert!(!store.has_unsaved_changes());
    }

    #[test]
    fn dotted_path_only_touches_addressed_key() {
        let mut store = FormFieldStore::new();
        store.set_group_field("notifications", "email", true);
        store.set_group_field("notifications", "sms", false);
        store.set_field("notifications.email", false);

        assert_eq!(store.flag("notifications.email"), Some(false));
        assert_eq!(store.flag("notifications.sms"), Some(false));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn dotted_path_replaces_scalar_with_group() {
        let mut store = FormFieldStore::from_entries([("limits", "none")]);
        store.set_field("limits.daily", 500.0);
        assert_eq!(store.number("limits.daily"), Some(500.0));
    }

    #[test]
    fn list_field_add_and_remove() {
        let mut store = FormFieldStore::new();
        store.set_list_field("channels", "email", true);
        store.set_list_field("channels", "sms", true);
        store.set_list_field("channels", "email", true);
        assert_eq!(
            store.list("channels").unwrap(),
            &["email".to_string(), "sms".to_string()]
        );

        store.set_list_field("channels", "email", false);
        store.set_list_field("channels", "push", false);
        assert_eq!(store.list("channels").unwrap(), &["sms".to_string()]);
    }

    #[test]
    fn merge_prefers_overrides() {
        let base = FormFieldStore::from_entries([("budget", "100"), ("type", "points")]);
        let overrides = FormFieldStore::from_entries([("budget", "999")]);
        let merged = base.merged_with(&overrides);
        assert_eq!(merged.text("budget"), Some("999"));
        assert_eq!(merged.text("type"), Some("points"));
        assert!(!merged.has_unsaved_changes());
    }

    #[test]
    fn blank_text_is_not_present() {
        let store = FormFieldStore::from_entries([("name", "  ")]);
        assert!(!store.is_present("name"));
        assert_eq!(store.non_empty_text("name"), None);
        assert!(!store.is_present("missing"));
    }
}

//! Store directory models.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// A retail store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Store {
    pub id: String,

    /// Display name.
    pub name: String,

    /// Regional or management group the store reports to.
    pub group: String,
}

/// Store data submitted before an identifier is assigned.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewStore {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub group: String,
}

impl NewStore {
    pub fn new(name: impl Into<String>, group: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            group: group.into(),
        }
    }

    /// Check that both name and group are present.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::MissingField("name".to_string()));
        }
        if self.group.trim().is_empty() {
            return Err(ValidationError::MissingField("group".to_string()));
        }
        Ok(())
    }

    /// Validate and attach an identifier. Name and group are trimmed.
    pub fn into_store(self, id: impl Into<String>) -> Result<Store, ValidationError> {
        self.validate()?;
        Ok(Store {
            id: id.into(),
            name: self.name.trim().to_string(),
            group: self.group.trim().to_string(),
        })
    }
}

impl Store {
    /// Replace name and group from an update, keeping the identifier.
    pub fn update(&mut self, update: NewStore) -> Result<(), ValidationError> {
        let updated = update.into_store(self.id.clone())?;
        *self = updated;
        Ok(())
    }
}

/// Order stores by group, then by name.
pub fn sort_directory(stores: &mut [Store]) {
    stores.sort_by(|a, b| a.group.cmp(&b.group).then_with(|| a.name.cmp(&b.name)));
}

/// Group stores for display, preserving directory order inside each group.
pub fn group_stores(stores: &[Store]) -> Vec<(String, Vec<&Store>)> {
    let mut sorted: Vec<&Store> = stores.iter().collect();
    sorted.sort_by(|a, b| a.group.cmp(&b.group).then_with(|| a.name.cmp(&b.name)));

    let mut groups: Vec<(String, Vec<&Store>)> = Vec::new();
    for store in sorted {
        if let Some((group, members)) = groups.last_mut() {
            if *group == store.group {
                members.push(store);
                continue;
            }
        }
        groups.push((store.group.clone(), vec![store]));
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn store(id: &str, name: &str, group: &str) -> Store {
        Store {
            id: id.to_string(),
            name: name.to_string(),
            group: group.to_string(),
        }
    }

    #[test]
    fn test_new_store_requires_name_and_group() {
        assert_eq!(
            NewStore::new("  ", "North").validate(),
            Err(ValidationError::MissingField("name".to_string()))
        );
        assert_eq!(
            NewStore::new("Center", "").validate(),
            Err(ValidationError::MissingField("group".to_string()))
        );

        let created = NewStore::new(" Center ", " North ").into_store("s1").unwrap();
        assert_eq!(created, store("s1", "Center", "North"));
    }

    #[test]
    fn test_update_keeps_id() {
        let mut s = store("s1", "Old", "A");
        s.update(NewStore::new("New", "B")).unwrap();
        assert_eq!(s, store("s1", "New", "B"));

        assert!(s.update(NewStore::new("", "B")).is_err());
        assert_eq!(s.name, "New");
    }

    #[test]
    fn test_sort_and_group() {
        let mut stores = vec![
            store("1", "Zeta", "B"),
            store("2", "Alpha", "B"),
            store("3", "Mid", "A"),
        ];
        sort_directory(&mut stores);
        let ids: Vec<_> = stores.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["3", "2", "1"]);

        let groups = group_stores(&stores);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].0, "A");
        assert_eq!(groups[1].1.len(), 2);
    }
}

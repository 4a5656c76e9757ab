//! Ordered parameter schema snapshots and cascade-delta merging.

use datascope_types::ParameterDef;
use indexmap::IndexMap;
use tracing::debug;

/// One schema snapshot: an ordered sequence of parameter definitions keyed by
/// name. Order is the server's declaration order and is preserved across
/// merges; names are unique within a snapshot (a duplicate in a server
/// response keeps the first position, last definition wins).
#[derive(Debug, Clone, Default)]
pub struct ParameterSchema {
    entries: IndexMap<String, ParameterDef>,
    version: u64,
}

impl ParameterSchema {
    pub fn from_defs(defs: Vec<ParameterDef>) -> Self {
        let mut entries = IndexMap::with_capacity(defs.len());
        for def in defs {
            let name = def.name().to_string();
            if entries.insert(name.clone(), def).is_some() {
                debug!(%name, "duplicate parameter name in schema; last definition wins");
            }
        }
        Self { entries, version: 0 }
    }

    /// Merge a cascade delta: each incoming definition replaces the entry of
    /// the same name in place (position preserved); names not present in this
    /// snapshot are dropped. Returns the names that were actually replaced.
    pub fn merge_delta(&mut self, defs: Vec<ParameterDef>) -> Vec<String> {
        let mut replaced = Vec::new();
        for def in defs {
            let name = def.name().to_string();
            match self.entries.get_mut(&name) {
                Some(slot) => {
                    *slot = def;
                    replaced.push(name);
                }
                None => debug!(%name, "cascade delta referenced unknown parameter; dropped"),
            }
        }
        if !replaced.is_empty() {
            self.version += 1;
        }
        replaced
    }

    pub fn get(&self, name: &str) -> Option<&ParameterDef> {
        self.entries.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &ParameterDef)> {
        self.entries.iter()
    }

    /// Parameter names in declaration order.
    pub fn names(&self) -> Vec<String> {
        self.entries.keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Bumped on every successful merge; lets containers detect that widgets
    /// need an explicit snapshot re-apply.
    pub fn version(&self) -> u64 {
        self.version
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use datascope_types::{SelectOption, SingleSelectDef, TextDef};

    fn select(name: &str, selected: &str) -> ParameterDef {
        ParameterDef::SingleSelect(SingleSelectDef {
            name: name.into(),
            label: name.to_uppercase(),
            options: vec![
                SelectOption { id: "us".into(), label: "US".into() },
                SelectOption { id: "eu".into(), label: "EU".into() },
            ],
            selected_id: selected.into(),
            ..SingleSelectDef::default()
        })
    }

    fn text(name: &str) -> ParameterDef {
        ParameterDef::Text(TextDef {
            name: name.into(),
            label: name.to_uppercase(),
            ..TextDef::default()
        })
    }

    #[test]
    fn from_defs_preserves_order() {
        let schema = ParameterSchema::from_defs(vec![select("region", "us"), text("comment")]);
        assert_eq!(schema.names(), vec!["region", "comment"]);
        assert_eq!(schema.len(), 2);
    }

    #[test]
    fn duplicate_names_keep_first_position_last_value() {
        let schema = ParameterSchema::from_defs(vec![select("region", "us"), text("q"), select("region", "eu")]);
        assert_eq!(schema.names(), vec!["region", "q"]);
        match schema.get("region") {
            Some(ParameterDef::SingleSelect(d)) => assert_eq!(d.selected_id, "eu"),
            other => panic!("unexpected entry: {:?}", other),
        }
    }

    #[test]
    fn merge_replaces_in_place_and_drops_unknown() {
        let mut schema = ParameterSchema::from_defs(vec![select("region", "us"), text("comment")]);
        let replaced = schema.merge_delta(vec![select("region", "eu"), text("ghost")]);
        assert_eq!(replaced, vec!["region"]);
        assert_eq!(schema.names(), vec!["region", "comment"]);
        match schema.get("region") {
            Some(ParameterDef::SingleSelect(d)) => assert_eq!(d.selected_id, "eu"),
            other => panic!("unexpected entry: {:?}", other),
        }
        assert!(schema.get("ghost").is_none());
    }

    #[test]
    fn merge_bumps_version_only_on_replacement() {
        let mut schema = ParameterSchema::from_defs(vec![select("region", "us")]);
        assert_eq!(schema.version(), 0);
        schema.merge_delta(vec![text("ghost")]);
        assert_eq!(schema.version(), 0);
        schema.merge_delta(vec![select("region", "eu")]);
        assert_eq!(schema.version(), 1);
    }
}

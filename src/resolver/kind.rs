//! Catalog resource kinds and their key/path shapes.

use std::fmt;

/// One of the five catalog collections served through the cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Films,
    Locations,
    People,
    Species,
    Vehicles,
}

impl ResourceKind {
    pub const ALL: [ResourceKind; 5] = [
        ResourceKind::Films,
        ResourceKind::Locations,
        ResourceKind::People,
        ResourceKind::Species,
        ResourceKind::Vehicles,
    ];

    /// Collection name, used in routes, cache keys and upstream paths.
    pub fn as_str(self) -> &'static str {
        match self {
            ResourceKind::Films => "films",
            ResourceKind::Locations => "locations",
            ResourceKind::People => "people",
            ResourceKind::Species => "species",
            ResourceKind::Vehicles => "vehicles",
        }
    }

    /// People can only be fetched one at a time.
    pub fn id_required(self) -> bool {
        matches!(self, ResourceKind::People)
    }

    /// `"<kind>"` or `"<kind>_<id>"`.
    pub fn cache_key(self, id: Option<&str>) -> String {
        match id {
            Some(id) => format!("{}_{}", self.as_str(), id),
            None => self.as_str().to_string(),
        }
    }

    /// Path relative to the upstream base address.
    pub fn upstream_path(self, id: Option<&str>) -> String {
        match (self, id) {
            (ResourceKind::People, Some(id)) => format!("people/{}", id),
            (_, Some(id)) => format!("{}?id={}", self.as_str(), id),
            (_, None) => self.as_str().to_string(),
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_cache_keys() {
        assert_eq!(ResourceKind::Films.cache_key(None), "films");
        assert_eq!(ResourceKind::Films.cache_key(Some("2baf")), "films_2baf");
        assert_eq!(ResourceKind::People.cache_key(Some("7")), "people_7");
    }

    #[test]
    fn test_upstream_paths() {
        assert_eq!(ResourceKind::Locations.upstream_path(None), "locations");
        assert_eq!(ResourceKind::Species.upstream_path(Some("3")), "species?id=3");
        assert_eq!(ResourceKind::Vehicles.upstream_path(Some("5")), "vehicles?id=5");
        assert_eq!(ResourceKind::People.upstream_path(Some("7")), "people/7");
    }

    #[test]
    fn test_only_people_requires_id() {
        let required: Vec<_> = ResourceKind::ALL
            .into_iter()
            .filter(|k| k.id_required())
            .collect();
        assert_eq!(required, vec![ResourceKind::People]);
    }

    proptest! {
        // Keys for different ids or kinds never collide.
        #[test]
        fn prop_cache_keys_are_distinct(a in "[a-z0-9-]{1,36}", b in "[a-z0-9-]{1,36}") {
            for kind in ResourceKind::ALL {
                prop_assert_ne!(kind.cache_key(None), kind.cache_key(Some(a.as_str())));
                if a != b {
                    prop_assert_ne!(kind.cache_key(Some(a.as_str())), kind.cache_key(Some(b.as_str())));
                }
            }
            for (i, x) in ResourceKind::ALL.iter().enumerate() {
                for y in &ResourceKind::ALL[i + 1..] {
                    prop_assert_ne!(x.cache_key(Some(a.as_str())), y.cache_key(Some(a.as_str())));
                }
            }
        }

        #[test]
        fn prop_upstream_path_carries_id(id in "[a-z0-9-]{1,36}") {
            for kind in ResourceKind::ALL {
                prop_assert!(kind.upstream_path(Some(id.as_str())).ends_with(&id));
                prop_assert!(kind.upstream_path(Some(id.as_str())).starts_with(kind.as_str()));
            }
        }
    }
}

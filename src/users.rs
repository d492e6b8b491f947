use std::collections::HashMap;

/// Maps a raw account title to the name shown to operators.
pub trait FriendlyNames: Send + Sync {
    fn resolve(&self, account_title: &str) -> String;
}

/// Lookup table loaded from the `friendly_names` config section.
/// Unknown accounts resolve to their own title.
#[derive(Debug, Clone, Default)]
pub struct FriendlyNameMap {
    names: HashMap<String, String>,
}

impl FriendlyNameMap {
    pub fn new(names: HashMap<String, String>) -> Self {
        Self { names }
    }
}

impl FriendlyNames for FriendlyNameMap {
    fn resolve(&self, account_title: &str) -> String {
        self.names
            .get(account_title)
            .filter(|name| !name.is_empty())
            .cloned()
            .unwrap_or_else(|| account_title.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve() {
        let mut names = HashMap::new();
        names.insert("jdoe".to_string(), "John".to_string());
        names.insert("blank".to_string(), String::new());
        let map = FriendlyNameMap::new(names);

        assert_eq!(map.resolve("jdoe"), "John");
        assert_eq!(map.resolve("someone"), "someone");
        assert_eq!(map.resolve("blank"), "blank");
        assert_eq!(map.resolve(""), "");
    }
}

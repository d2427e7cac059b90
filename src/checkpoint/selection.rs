use serde::{Deserialize, Serialize};

/// How many of the newest checkpoint runs a sweep hands to the deleter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum Selection {
    /// The single newest run.
    #[default]
    Latest,
    /// The three newest runs.
    LatestThree,
}

impl Selection {
    /// Number of directories this selection asks the locator for.
    pub fn count(self) -> usize {
        match self {
            Selection::Latest => 1,
            Selection::LatestThree => 3,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Selection::Latest => "latest",
            Selection::LatestThree => "latest-three",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selection_count() {
        assert_eq!(Selection::Latest.count(), 1);
        assert_eq!(Selection::LatestThree.count(), 3);
    }

    #[test]
    fn test_selection_toml_names() {
        #[derive(Deserialize)]
        struct Wrapper {
            select: Selection,
        }
        let w: Wrapper = toml::from_str(r#"select = "latest-three""#).unwrap();
        assert_eq!(w.select, Selection::LatestThree);
        assert_eq!(w.select.name(), "latest-three");
    }
}

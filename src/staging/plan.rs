//! Staging plan
//!
//! Deciding what to do is separate from doing it: [`plan`] maps the desired
//! packages and the current descriptor-root listing to a list of actions
//! without touching the file system.

use std::path::Path;

use serde::Serialize;

use crate::common::fs as common_fs;
use crate::domain::PackageDescriptor;
use crate::error::Result;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum StagingAction {
    /// Already staged; `descriptor` is the matching gemspec
    Skip {
        package: PackageDescriptor,
        descriptor: String,
    },
    /// Fetch, install, and copy into the shared tree
    Stage { package: PackageDescriptor },
}

impl StagingAction {
    pub fn package(&self) -> &PackageDescriptor {
        match self {
            StagingAction::Skip { package, .. } | StagingAction::Stage { package } => package,
        }
    }

    pub fn is_skip(&self) -> bool {
        matches!(self, StagingAction::Skip { .. })
    }
}

/// Compute actions for `desired`, in order, given the descriptor file names present
pub fn plan(desired: &[PackageDescriptor], installed: &[String]) -> Vec<StagingAction> {
    desired
        .iter()
        .map(|package| {
            match installed
                .iter()
                .find(|file_name| package.matches_descriptor(file_name))
            {
                Some(descriptor) => StagingAction::Skip {
                    package: package.clone(),
                    descriptor: descriptor.clone(),
                },
                None => StagingAction::Stage {
                    package: package.clone(),
                },
            }
        })
        .collect()
}

/// Descriptor file names currently in `specs_dir`
pub fn installed_descriptors(specs_dir: &Path) -> Result<Vec<String>> {
    common_fs::list_file_names(specs_dir)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn test_empty_descriptor_root_stages_everything() {
        let desired = vec![
            PackageDescriptor::new("a", "1.0"),
            PackageDescriptor::new("b", "2.0").spec_only(true),
        ];
        let actions = plan(&desired, &[]);
        assert_eq!(actions.len(), 2);
        assert!(actions.iter().all(|a| !a.is_skip()));
        assert_eq!(actions[1].package().name, "b");
    }

    #[test]
    fn test_present_descriptor_skips() {
        let desired = vec![
            PackageDescriptor::new("a", "1.0"),
            PackageDescriptor::new("b", "2.0"),
        ];
        let actions = plan(&desired, &names(&["a-1.0-java.gemspec"]));
        assert_eq!(
            actions[0],
            StagingAction::Skip {
                package: PackageDescriptor::new("a", "1.0"),
                descriptor: "a-1.0-java.gemspec".to_string(),
            }
        );
        assert!(!actions[1].is_skip());
    }

    #[test]
    fn test_other_version_does_not_count() {
        let desired = vec![PackageDescriptor::new("json", "1.8.0")];
        let actions = plan(&desired, &names(&["json-1.7.7.gemspec"]));
        assert!(!actions[0].is_skip());
    }

    #[test]
    fn test_plan_preserves_manifest_order() {
        let desired = vec![
            PackageDescriptor::new("zeta", "1"),
            PackageDescriptor::new("alpha", "1"),
        ];
        let order: Vec<_> = plan(&desired, &[])
            .iter()
            .map(|a| a.package().name.clone())
            .collect();
        assert_eq!(order, vec!["zeta", "alpha"]);
    }

    #[test]
    fn test_serializes_with_action_tag() {
        let action = StagingAction::Stage {
            package: PackageDescriptor::new("rake", "10.1.0"),
        };
        let json = serde_json::to_value(&action).unwrap();
        assert_eq!(json["action"], "stage");
        assert_eq!(json["package"]["name"], "rake");
    }
}

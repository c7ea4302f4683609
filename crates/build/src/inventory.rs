use futures::future::BoxFuture;
use models::ResourceKind;

/// Inventory resolves a resource kind to the identifiers which exist in
/// the monitored account. Listing is the builder's only I/O, awaited once
/// before partitioning begins.
pub trait Inventory: Send + Sync {
    fn list_names<'a>(&'a self, kind: ResourceKind) -> BoxFuture<'a, anyhow::Result<Vec<String>>>;
}

/// One already-deployed stack's membership: its position in the stack
/// sequence and the resources it monitors, in their deployed order.
#[derive(Clone, Debug, PartialEq)]
pub struct DeployedGroup {
    pub index: usize,
    pub members: Vec<String>,
}

/// DeployedGroups resolves the stack-name prefix of a prior deployment to
/// its group memberships, so a redeploy keeps resources pinned to the
/// stacks that already hold them.
pub trait DeployedGroups: Send + Sync {
    fn deployed_groups<'a>(
        &'a self,
        prefix: &'a str,
    ) -> BoxFuture<'a, anyhow::Result<Vec<DeployedGroup>>>;
}

/// Whether a resource name passes the include/exclude globs: included when
/// `include` is empty or any pattern matches, and not excluded by any
/// `exclude` pattern. Exclusion wins over inclusion.
pub fn name_matches(name: &str, include: &[String], exclude: &[String]) -> bool {
    let matches_any = |patterns: &[String]| {
        patterns.iter().any(|pattern| {
            glob::Pattern::new(pattern)
                .map(|pattern| pattern.matches(name))
                .unwrap_or(false)
        })
    };
    let included = include.is_empty() || matches_any(include);
    let excluded = !exclude.is_empty() && matches_any(exclude);
    included && !excluded
}

#[cfg(test)]
mod test {
    use super::*;

    fn globs(patterns: &[&str]) -> Vec<String> {
        patterns.iter().map(|p| p.to_string()).collect()
    }

    #[test]
    fn test_match_with_include_and_exclude() {
        let include = globs(&["1", "2"]);
        let exclude = globs(&["4"]);
        assert!(name_matches("1", &include, &exclude));
        assert!(name_matches("2", &include, &exclude));
        assert!(!name_matches("3", &include, &exclude));
        assert!(!name_matches("4", &include, &exclude));
    }

    #[test]
    fn test_match_with_only_excludes() {
        let exclude = globs(&["4"]);
        assert!(name_matches("1", &[], &exclude));
        assert!(!name_matches("4", &[], &exclude));
    }

    #[test]
    fn test_unconstrained_match_accepts_everything() {
        assert!(name_matches("x", &[], &[]));
    }

    #[test]
    fn test_match_uses_glob_patterns() {
        let include = globs(&["prod-*"]);
        let exclude = globs(&["*-canary"]);
        assert!(name_matches("prod-api", &include, &exclude));
        assert!(!name_matches("staging-api", &include, &exclude));
        assert!(!name_matches("prod-api-canary", &include, &exclude));
    }
}

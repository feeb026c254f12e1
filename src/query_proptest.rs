//! Property-based tests for query matching and unique-path reduction.
//!
//! These tests use proptest to generate random repository layouts and
//! queries and verify that invariants hold for all of them.

#[cfg(test)]
mod proptest_tests {
    use crate::list::{render, PathFormat};
    use crate::query::{Matcher, Query};
    use crate::repository::LocalRepository;
    use proptest::collection::{btree_set, vec};
    use proptest::prelude::*;
    use std::collections::{HashMap, HashSet};

    fn repo(rel_path: &str) -> LocalRepository {
        LocalRepository::from_rel_path(rel_path, "/roots/primary", true, None).unwrap()
    }

    /// Relative paths made of 1 to 4 short segments.
    fn rel_path() -> impl Strategy<Value = String> {
        vec("[a-z][a-z0-9-]{0,5}", 1..=4).prop_map(|parts| parts.join("/"))
    }

    // ============================================================================
    // LocalRepository path helpers
    // ============================================================================

    proptest! {
        /// Property: subpaths run from the full path down to the last segment
        #[test]
        fn subpaths_are_suffixes_longest_first(path in rel_path()) {
            let repo = repo(&path);
            let subpaths = repo.subpaths();

            prop_assert_eq!(subpaths.len(), repo.path_parts().len());
            prop_assert_eq!(&subpaths[0], &path);
            prop_assert_eq!(subpaths.last().unwrap(), repo.path_parts().last().unwrap());
            for pair in subpaths.windows(2) {
                prop_assert!(pair[0].len() > pair[1].len());
                prop_assert!(pair[0].ends_with(&pair[1]));
            }
        }

        /// Property: exact matching accepts every subpath of the repository
        #[test]
        fn exact_matches_every_subpath(path in rel_path()) {
            let repo = repo(&path);
            for subpath in repo.subpaths() {
                let matcher = Matcher::new(&Query::parse(&subpath), true);
                prop_assert!(matcher.is_match(&repo), "{} should match {}", subpath, path);
            }
        }
    }

    // ============================================================================
    // Smartcase substring matching
    // ============================================================================

    proptest! {
        /// Property: a lower-case query matches regardless of the path's case
        #[test]
        fn lowercase_query_ignores_case(
            path in "[a-z]{1,6}/[a-z]{1,6}",
            start in 0usize..6,
            len in 1usize..6,
        ) {
            let start = start.min(path.len() - 1);
            let end = (start + len).min(path.len());
            let needle = path[start..end].to_string();

            let repo = repo(&path.to_uppercase());
            let matcher = Matcher::new(&Query::parse(&needle), false);
            prop_assert!(matcher.is_match(&repo));
        }

        /// Property: a query with upper-case letters never matches an
        /// all-lower-case path
        #[test]
        fn uppercase_query_is_case_sensitive(
            path in "[a-z]{1,6}/[a-z]{1,6}",
            needle in "[A-Z][a-z]{0,3}",
        ) {
            let matcher = Matcher::new(&Query::parse(&needle), false);
            prop_assert!(!matcher.is_match(&repo(&path)));
        }

        /// Property: plain queries without a slash are used unchanged
        #[test]
        fn plain_query_is_unchanged(raw in "[A-Za-z0-9_-]{1,12}") {
            let query = Query::parse(&raw);
            prop_assert_eq!(query.path(), raw.as_str());
            prop_assert_eq!(query.host(), None);
        }
    }

    // ============================================================================
    // Unique-path reduction
    // ============================================================================

    proptest! {
        /// Property: each label is the shortest suffix of exactly one
        /// repository that no other repository shares, and every repository
        /// with such a suffix gets a label
        #[test]
        fn unique_labels_are_shortest_unshared_suffixes(paths in btree_set(rel_path(), 1..20)) {
            let repos: Vec<LocalRepository> = paths.iter().map(|p| repo(p)).collect();
            let labels = render(&repos, PathFormat::Unique);

            let mut counts: HashMap<String, usize> = HashMap::new();
            for repo in &repos {
                for subpath in repo.subpaths() {
                    *counts.entry(subpath).or_default() += 1;
                }
            }
            let shortest_unshared = |repo: &LocalRepository| {
                repo.subpaths()
                    .into_iter()
                    .rev()
                    .find(|s| counts[s] == 1)
            };

            let distinct: HashSet<&String> = labels.iter().collect();
            prop_assert_eq!(distinct.len(), labels.len());

            let labelled = repos.iter().filter(|r| shortest_unshared(*r).is_some()).count();
            prop_assert_eq!(labels.len(), labelled);

            for label in &labels {
                let owners: Vec<&LocalRepository> = repos
                    .iter()
                    .filter(|r| r.subpaths().contains(label))
                    .collect();
                prop_assert_eq!(owners.len(), 1, "{} is shared", label);
                let shortest = shortest_unshared(owners[0]);
                prop_assert_eq!(shortest.as_ref(), Some(label));
            }
        }

        /// Property: rendering is deterministic
        #[test]
        fn render_is_deterministic(paths in btree_set(rel_path(), 0..20)) {
            let repos: Vec<LocalRepository> = paths.iter().map(|p| repo(p)).collect();
            prop_assert_eq!(
                render(&repos, PathFormat::Unique),
                render(&repos, PathFormat::Unique)
            );
            prop_assert_eq!(
                render(&repos, PathFormat::Relative),
                paths.iter().cloned().collect::<Vec<_>>()
            );
        }
    }
}

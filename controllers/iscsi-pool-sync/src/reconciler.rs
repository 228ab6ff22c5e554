//! Target reconciliation.
//!
//! Pure set difference between what the portal advertises and what libvirt
//! already has registered.

use iscsi_client::Target;
use std::collections::HashSet;

/// Discovered targets with no pool yet, in discovery order.
pub fn new_targets(discovered: &[Target], existing: &[String]) -> Vec<Target> {
    let known: HashSet<&str> = existing.iter().map(String::as_str).collect();

    discovered
        .iter()
        .filter(|target| !known.contains(target.as_str()))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn targets(names: &[&str]) -> Vec<Target> {
        names.iter().copied().map(Target::from).collect()
    }

    fn paths(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_only_unknown_targets_remain() {
        let result = new_targets(&targets(&["iqn:a", "iqn:b", "iqn:c"]), &paths(&["iqn:a", "iqn:b"]));
        assert_eq!(result, targets(&["iqn:c"]));
    }

    #[test]
    fn test_discovery_order_is_preserved() {
        let result = new_targets(
            &targets(&["iqn:z", "iqn:a", "iqn:m", "iqn:b"]),
            &paths(&["iqn:a"]),
        );
        assert_eq!(result, targets(&["iqn:z", "iqn:m", "iqn:b"]));
    }

    #[test]
    fn test_empty_discovery() {
        assert!(new_targets(&[], &paths(&["iqn:a"])).is_empty());
        assert!(new_targets(&[], &[]).is_empty());
    }

    #[test]
    fn test_empty_inventory_returns_everything() {
        let discovered = targets(&["iqn:a", "iqn:b"]);
        assert_eq!(new_targets(&discovered, &[]), discovered);
    }

    #[test]
    fn test_all_known() {
        assert!(new_targets(&targets(&["iqn:a"]), &paths(&["iqn:a"])).is_empty());
    }

    #[test]
    fn test_comparison_is_exact() {
        let result = new_targets(&targets(&["iqn:A", "iqn:a "]), &paths(&["iqn:a"]));
        assert_eq!(result, targets(&["iqn:A", "iqn:a "]));
    }

    #[test]
    fn test_duplicates_pass_through_unchanged() {
        let result = new_targets(&targets(&["iqn:c", "iqn:a", "iqn:c"]), &paths(&["iqn:a"]));
        assert_eq!(result, targets(&["iqn:c", "iqn:c"]));
    }
}

//! Dynamic route registration.
//!
//! Merges candidate routes into the live table after login and removes them
//! again on logout. Name collisions are resolved deterministically so that a
//! guard calling `register` repeatedly always ends up with the same table.

use std::collections::HashSet;

use super::record::RouteRecord;
use super::table::{RouteTable, TableState};

/// Outcome of one `register` call.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RegisterReport {
    /// Root names that were added.
    pub added: Vec<String>,
    /// Root names skipped because they were already registered.
    pub skipped: Vec<String>,
    /// `(old, new)` child names rewritten to avoid a collision.
    pub renamed: Vec<(String, String)>,
    /// Root names the table refused.
    pub failed: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct RouteRegistrar {
    table: RouteTable,
}

impl RouteRegistrar {
    pub fn new(basic: Vec<RouteRecord>) -> Self {
        Self {
            table: RouteTable::with_basic(basic),
        }
    }

    pub fn table(&self) -> &RouteTable {
        &self.table
    }

    pub fn state(&self) -> TableState {
        self.table.state()
    }

    /// Add every candidate root to the table.
    ///
    /// - a root whose name is already registered is skipped whole;
    /// - a child whose name equals its parent's, an existing name, or an
    ///   earlier sibling's becomes `${parent}-${child}`, prefixed again until
    ///   the name is free;
    /// - a root is inserted only once all of its descendants are final.
    pub fn register(&mut self, access_routes: Vec<RouteRecord>) -> RegisterReport {
        let mut report = RegisterReport::default();

        for mut route in access_routes {
            if self.table.has_route(&route.name) {
                log::warn!("route with name {:?} already exists, skipping", route.name);
                report.skipped.push(route.name);
                continue;
            }

            let mut renamed = Vec::new();
            let mut taken = HashSet::from([route.name.clone()]);
            finalize_children(&route.name, &mut route.children, &self.table, &mut taken, &mut renamed);

            let name = route.name.clone();
            match self.table.add_route(route) {
                Ok(()) => {
                    report.added.push(name);
                    report.renamed.extend(renamed);
                }
                Err(err) => {
                    log::error!("failed to add route {:?}: {}", name, err);
                    report.failed.push(name);
                }
            }
        }

        log::debug!(
            "registered {} route(s), skipped {}, renamed {}",
            report.added.len(),
            report.skipped.len(),
            report.renamed.len()
        );
        report
    }

    /// Remove every route that is not part of the basic set.
    ///
    /// Returns the number of removed records (children of removed parents
    /// are not counted separately).
    pub fn reset(&mut self) -> usize {
        let mut removed = 0;
        for entry in self.table.get_routes() {
            if !self.table.is_basic(&entry.name) && self.table.remove_route(&entry.name).is_some() {
                removed += 1;
            }
        }
        log::debug!("router reset, removed {} route(s)", removed);
        removed
    }
}

fn finalize_children(
    parent: &str,
    children: &mut [RouteRecord],
    table: &RouteTable,
    taken: &mut HashSet<String>,
    renamed: &mut Vec<(String, String)>,
) {
    let is_free = |name: &str, taken: &HashSet<String>| {
        name != parent && !table.has_route(name) && !taken.contains(name)
    };
    for child in children.iter_mut() {
        if !is_free(&child.name, &*taken) {
            let mut new_name = format!("{}-{}", parent, child.name);
            while !is_free(&new_name, &*taken) {
                new_name = format!("{}-{}", parent, new_name);
            }
            log::warn!(
                "child route {:?} conflicts with parent or existing route, renaming to {:?}",
                child.name,
                new_name
            );
            renamed.push((std::mem::replace(&mut child.name, new_name), child.name.clone()));
        }
        taken.insert(child.name.clone());
        let name = child.name.clone();
        finalize_children(&name, &mut child.children, table, taken, renamed);
    }
}

//! Cell abstraction and the reuse-identifier registry.
//!
//! Cells are consumer-owned views; the list only needs two things from
//! them: a self-sizing measurement and runtime downcasting so hosts can
//! recover their concrete type. Cell kinds are registered under string
//! identifiers and instantiated on demand, with a blank fallback when an
//! identifier is unknown.

use std::any::Any;
use std::rc::Rc;

use indexmap::IndexMap;

/// Height of a [`BlankCell`], the neutral stand-in for missing content.
const BLANK_CELL_HEIGHT: f32 = 44.0;

/// A single row view hosted by a list.
pub trait CellView {
    /// Self-sized content height when laid out at `width`.
    fn content_height(&self, width: f32) -> f32;

    /// Selection highlight hook. Most cells ignore it.
    fn set_selected(&mut self, selected: bool) {
        let _ = selected;
    }

    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;
}

/// Neutral empty cell substituted wherever real content is unavailable.
#[derive(Debug, Default, Clone, Copy)]
pub struct BlankCell;

impl CellView for BlankCell {
    fn content_height(&self, _width: f32) -> f32 {
        BLANK_CELL_HEIGHT
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// A registered cell kind: a factory producing fresh cell instances.
///
/// Factories are reference-counted so one kind can be installed on many
/// nested lists without re-registering.
#[derive(Clone)]
pub struct CellKind {
    factory: Rc<dyn Fn() -> Box<dyn CellView>>,
}

impl CellKind {
    pub fn new<F>(factory: F) -> Self
    where
        F: Fn() -> Box<dyn CellView> + 'static,
    {
        Self {
            factory: Rc::new(factory),
        }
    }

    pub fn instantiate(&self) -> Box<dyn CellView> {
        (self.factory)()
    }
}

impl std::fmt::Debug for CellKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CellKind").finish_non_exhaustive()
    }
}

/// Mapping from reuse identifier to cell kind.
///
/// Iteration order is insertion order, so kinds install onto nested lists
/// deterministically.
#[derive(Clone, Debug, Default)]
pub struct CellRegistry {
    kinds: IndexMap<String, CellKind>,
}

impl CellRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `kind` under `identifier`, replacing any previous kind.
    pub fn register(&mut self, identifier: impl Into<String>, kind: CellKind) {
        self.kinds.insert(identifier.into(), kind);
    }

    /// Copies every kind from `other` into this registry.
    ///
    /// Existing entries with the same identifier are replaced, so the later
    /// source wins.
    pub fn merge(&mut self, other: &CellRegistry) {
        for (identifier, kind) in &other.kinds {
            self.kinds.insert(identifier.clone(), kind.clone());
        }
    }

    /// Instantiates a cell of the kind registered under `identifier`.
    ///
    /// Unknown identifiers degrade to a [`BlankCell`] rather than failing.
    pub fn dequeue(&self, identifier: &str) -> Box<dyn CellView> {
        match self.kinds.get(identifier) {
            Some(kind) => kind.instantiate(),
            None => {
                log::warn!("no cell kind registered for {identifier:?}; using blank cell");
                Box::new(BlankCell)
            }
        }
    }

    pub fn contains(&self, identifier: &str) -> bool {
        self.kinds.contains_key(identifier)
    }

    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &CellKind)> {
        self.kinds.iter().map(|(id, kind)| (id.as_str(), kind))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedCell(f32);

    impl CellView for FixedCell {
        fn content_height(&self, _width: f32) -> f32 {
            self.0
        }

        fn as_any(&self) -> &dyn Any {
            self
        }

        fn as_any_mut(&mut self) -> &mut dyn Any {
            self
        }
    }

    #[test]
    fn test_dequeue_registered_kind() {
        let mut registry = CellRegistry::new();
        registry.register("fixed", CellKind::new(|| Box::new(FixedCell(50.0))));

        let cell = registry.dequeue("fixed");
        assert_eq!(cell.content_height(320.0), 50.0);
        assert!(cell.as_any().is::<FixedCell>());
    }

    #[test]
    fn test_dequeue_unknown_identifier_yields_blank() {
        let registry = CellRegistry::new();
        let cell = registry.dequeue("missing");
        assert!(cell.as_any().is::<BlankCell>());
        assert_eq!(cell.content_height(320.0), 44.0);
    }

    #[test]
    fn test_merge_later_source_wins() {
        let mut base = CellRegistry::new();
        base.register("cell", CellKind::new(|| Box::new(FixedCell(10.0))));

        let mut incoming = CellRegistry::new();
        incoming.register("cell", CellKind::new(|| Box::new(FixedCell(99.0))));

        base.merge(&incoming);
        assert_eq!(base.len(), 1);
        assert_eq!(base.dequeue("cell").content_height(0.0), 99.0);
    }

    #[test]
    fn test_registry_iteration_is_insertion_ordered() {
        let mut registry = CellRegistry::new();
        registry.register("b", CellKind::new(|| Box::new(BlankCell)));
        registry.register("a", CellKind::new(|| Box::new(BlankCell)));

        let ids: Vec<&str> = registry.iter().map(|(id, _)| id).collect();
        assert_eq!(ids, ["b", "a"]);
    }
}

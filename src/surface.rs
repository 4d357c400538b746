// Chart surface handles.
//
// A handle owns the descriptor for one chart instance. Callers either mutate
// the data in place (`data_mut`) or swap it wholesale (`replace`), then call
// `update()` to publish a redraw. Renderers draw whatever the handle holds
// and can use `revision` to tell whether anything changed since last time.

use crate::chart::{ChartDescriptor, ChartKind};

#[derive(Debug, Clone, PartialEq)]
pub struct ChartHandle {
    kind: ChartKind,
    descriptor: ChartDescriptor,
    revision: u64,
    dirty: bool,
}

impl ChartHandle {
    /// Create a handle. The descriptor's kind is forced to `kind`.
    pub fn new(kind: ChartKind, mut descriptor: ChartDescriptor) -> Self {
        descriptor.kind = kind;
        ChartHandle {
            kind,
            descriptor,
            revision: 0,
            dirty: false,
        }
    }

    pub fn kind(&self) -> ChartKind {
        self.kind
    }

    pub fn data(&self) -> &ChartDescriptor {
        &self.descriptor
    }

    /// In-place access; marks the handle as needing `update()`.
    pub fn data_mut(&mut self) -> &mut ChartDescriptor {
        self.dirty = true;
        &mut self.descriptor
    }

    /// Swap in new data, keeping this handle's kind.
    pub fn replace(&mut self, mut descriptor: ChartDescriptor) {
        descriptor.kind = self.kind;
        self.descriptor = descriptor;
        self.dirty = true;
    }

    /// Publish pending changes as a new revision.
    pub fn update(&mut self) {
        self.revision += 1;
        self.dirty = false;
    }

    /// Number of redraws so far.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Whether there are changes not yet published with `update()`.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::{ChartOptions, Dataset};

    fn handle() -> ChartHandle {
        ChartHandle::new(
            ChartKind::Bar,
            ChartDescriptor::empty(ChartKind::Bar, ChartOptions::titled("Stat Comparison")),
        )
    }

    #[test]
    fn new_handle_is_clean() {
        let h = handle();
        assert_eq!(h.revision(), 0);
        assert!(!h.is_dirty());
        assert!(h.data().is_empty());
    }

    #[test]
    fn replace_then_update() {
        let mut h = handle();
        let mut d = ChartDescriptor::empty(ChartKind::Line, ChartOptions::titled("x"));
        d.datasets.push(Dataset::series("a", vec![1.0], 0));
        h.replace(d);
        assert!(h.is_dirty());
        // Kind stays the handle's own.
        assert_eq!(h.data().kind, ChartKind::Bar);
        h.update();
        assert!(!h.is_dirty());
        assert_eq!(h.revision(), 1);
    }

    #[test]
    fn in_place_mutation() {
        let mut h = handle();
        h.data_mut().labels.push("B Bonds".into());
        assert!(h.is_dirty());
        h.update();
        assert_eq!(h.data().labels, vec!["B Bonds"]);
        assert_eq!(h.revision(), 1);
    }
}

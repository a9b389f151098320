/// Events the sync engine emits toward its consumer (UI shell or CLI).
#[derive(Debug, Clone)]
pub enum EngineEvent {
    /// A snapshot (push or initial cache load) was reconciled into the
    /// canonical list.
    SnapshotApplied { total: usize, unread: usize },
    /// A local read mutation changed the list.
    ReadStateChanged { unread: usize },
}

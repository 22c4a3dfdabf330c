use shutter_core::RoomPayload;

/// Outcome of reconciling a value received from another peer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reconcile {
    Applied,
    /// Equal to what we already hold. Nothing changed, nothing to announce.
    Ignored,
}

/// A small shared value kept eventually consistent by broadcasting it whole.
///
/// Local changes apply first and are then broadcast as the full value.
/// Remote values replace the local one unless they are equal, so receiving
/// the same value twice is a no-op.
pub trait Replicated {
    type Value: Clone + PartialEq;
    type Delta;

    fn current_value(&self) -> &Self::Value;

    fn apply_local(&mut self, delta: Self::Delta) -> Self::Value;

    fn apply_remote(&mut self, value: Self::Value) -> Reconcile;

    /// The full value as it goes on the wire.
    fn payload(&self) -> RoomPayload;
}

/// Last-writer-wins replacement shared by every [`Replicated`] value.
pub(crate) fn replace_if_changed<T: PartialEq>(slot: &mut T, value: T) -> Reconcile {
    if *slot == value {
        return Reconcile::Ignored;
    }
    *slot = value;
    Reconcile::Applied
}

//! Door lock commands.

capability_toggle! {
    /// Lock a door. Undo unlocks it only if it was unlocked before.
    LockCommand => "lock",
    via as_lock_mut,
    read is_locked,
    apply lock,
    revert unlock when prior is false
}

capability_toggle! {
    /// Unlock a door. Undo locks it again only if it was locked before.
    UnlockCommand => "unlock",
    via as_lock_mut,
    read is_locked,
    apply unlock,
    revert lock when prior is true
}

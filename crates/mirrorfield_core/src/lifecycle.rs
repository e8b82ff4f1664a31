//! Control lifecycle
//!
//! `Unmounted → Mounted → Destroyed`. Mounting happens at most once, when
//! the view hands the control an anchor element. Destruction is terminal
//! and may happen from either of the other states.

use crate::fsm::StateMachine;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LifecycleState {
    /// No anchor yet; writes are stored but not applied
    Unmounted,
    /// Widget created and wired
    Mounted,
    /// Terminal
    Destroyed,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LifecycleEvent {
    Mount,
    Destroy,
}

impl LifecycleState {
    /// Build the lifecycle machine, starting `Unmounted`
    pub fn machine() -> StateMachine<LifecycleState, LifecycleEvent> {
        StateMachine::builder(LifecycleState::Unmounted)
            .on(
                LifecycleState::Unmounted,
                LifecycleEvent::Mount,
                LifecycleState::Mounted,
            )
            .on(
                LifecycleState::Unmounted,
                LifecycleEvent::Destroy,
                LifecycleState::Destroyed,
            )
            .on(
                LifecycleState::Mounted,
                LifecycleEvent::Destroy,
                LifecycleState::Destroyed,
            )
            .build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mount_then_destroy() {
        let mut fsm = LifecycleState::machine();
        assert_eq!(fsm.send(LifecycleEvent::Mount), LifecycleState::Mounted);
        // Mounting is one-shot
        assert!(!fsm.can_send(LifecycleEvent::Mount));
        assert_eq!(fsm.send(LifecycleEvent::Destroy), LifecycleState::Destroyed);
    }

    #[test]
    fn test_destroyed_is_terminal() {
        let mut fsm = LifecycleState::machine();
        fsm.send(LifecycleEvent::Destroy);
        assert_eq!(fsm.send(LifecycleEvent::Mount), LifecycleState::Destroyed);
        assert_eq!(fsm.send(LifecycleEvent::Destroy), LifecycleState::Destroyed);
        assert_eq!(fsm.history().len(), 1);
    }
}

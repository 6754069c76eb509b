// Host-side tests for the render-loop state machine.

use hero_core::{LifecycleController, LifecycleEvent, LoopAction, RenderLoopState};

fn mounted() -> LifecycleController {
    let mut lc = LifecycleController::new();
    lc.handle(LifecycleEvent::Mount {
        motion_allowed: true,
    });
    lc
}

#[test]
fn starts_stopped_and_mount_schedules_first_frame() {
    let mut lc = LifecycleController::new();
    assert_eq!(lc.state(), RenderLoopState::Stopped);
    let t = lc.handle(LifecycleEvent::Mount {
        motion_allowed: true,
    });
    assert_eq!(t.from, RenderLoopState::Stopped);
    assert_eq!(t.to, RenderLoopState::Running);
    assert_eq!(t.action, LoopAction::ScheduleFirstFrame);
}

#[test]
fn reduced_motion_never_enters_running() {
    let mut lc = LifecycleController::new();
    let t = lc.handle(LifecycleEvent::Mount {
        motion_allowed: false,
    });
    assert_eq!(t.to, RenderLoopState::Stopped);
    assert_eq!(t.action, LoopAction::None);
    for ev in [
        LifecycleEvent::PageHidden,
        LifecycleEvent::PageVisible,
        LifecycleEvent::LeftViewport,
        LifecycleEvent::EnteredViewport,
        LifecycleEvent::Mount {
            motion_allowed: true,
        },
    ] {
        let t = lc.handle(ev);
        assert_eq!(t.to, RenderLoopState::Stopped, "{ev:?}");
        assert_ne!(t.action, LoopAction::ScheduleFirstFrame);
        assert_ne!(t.action, LoopAction::ResumeScheduling);
    }
}

#[test]
fn hidden_page_pauses_and_visible_resumes() {
    let mut lc = mounted();
    let t = lc.handle(LifecycleEvent::PageHidden);
    assert_eq!(t.to, RenderLoopState::Paused);
    assert_eq!(t.action, LoopAction::StopScheduling);
    // Repeated hidden events are harmless.
    assert_eq!(lc.handle(LifecycleEvent::PageHidden).action, LoopAction::None);
    let t = lc.handle(LifecycleEvent::PageVisible);
    assert_eq!(t.to, RenderLoopState::Running);
    assert_eq!(t.action, LoopAction::ResumeScheduling);
}

#[test]
fn scrolling_out_of_view_pauses_and_back_resumes() {
    let mut lc = mounted();
    assert_eq!(
        lc.handle(LifecycleEvent::LeftViewport).to,
        RenderLoopState::Paused
    );
    let t = lc.handle(LifecycleEvent::EnteredViewport);
    assert_eq!(t.to, RenderLoopState::Running);
    assert_eq!(t.action, LoopAction::ResumeScheduling);
}

#[test]
fn both_signals_must_allow_running() {
    let mut lc = mounted();
    lc.handle(LifecycleEvent::PageHidden);
    lc.handle(LifecycleEvent::LeftViewport);
    // Visible again but still scrolled away.
    let t = lc.handle(LifecycleEvent::PageVisible);
    assert_eq!(t.to, RenderLoopState::Paused);
    assert_eq!(t.action, LoopAction::None);
    let t = lc.handle(LifecycleEvent::EnteredViewport);
    assert_eq!(t.to, RenderLoopState::Running);
}

#[test]
fn visible_while_running_is_a_no_op() {
    let mut lc = mounted();
    let t = lc.handle(LifecycleEvent::PageVisible);
    assert_eq!(t.to, RenderLoopState::Running);
    assert_eq!(t.action, LoopAction::None);
}

#[test]
fn second_mount_is_ignored() {
    let mut lc = mounted();
    let t = lc.handle(LifecycleEvent::Mount {
        motion_allowed: true,
    });
    assert_eq!(t.action, LoopAction::None);
}

#[test]
fn dispose_cancels_and_is_terminal() {
    let mut lc = mounted();
    let t = lc.handle(LifecycleEvent::Dispose);
    assert_eq!(t.to, RenderLoopState::Stopped);
    assert_eq!(t.action, LoopAction::CancelAll);
    assert!(lc.is_disposed());
    assert_eq!(lc.handle(LifecycleEvent::PageVisible).to, RenderLoopState::Stopped);
    assert_eq!(lc.handle(LifecycleEvent::Dispose).action, LoopAction::None);
}

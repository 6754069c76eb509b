//! Render-loop state machine.
//!
//! The loop runs only while the page is visible and the hero intersects the
//! viewport. Reduced motion at mount pins the machine in `Stopped` for the
//! whole session; `Dispose` ends it for good.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RenderLoopState {
    Stopped,
    Running,
    Paused,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LifecycleEvent {
    Mount { motion_allowed: bool },
    PageHidden,
    PageVisible,
    LeftViewport,
    EnteredViewport,
    Dispose,
}

/// What the platform loop has to do after a transition.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoopAction {
    None,
    ScheduleFirstFrame,
    StopScheduling,
    /// Reset the last-tick timestamp, then schedule again.
    ResumeScheduling,
    CancelAll,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Transition {
    pub from: RenderLoopState,
    pub to: RenderLoopState,
    pub action: LoopAction,
}

#[derive(Clone, Debug)]
pub struct LifecycleController {
    state: RenderLoopState,
    page_visible: bool,
    in_viewport: bool,
    mounted: bool,
    disposed: bool,
}

impl Default for LifecycleController {
    fn default() -> Self {
        Self::new()
    }
}

impl LifecycleController {
    pub fn new() -> Self {
        Self {
            state: RenderLoopState::Stopped,
            page_visible: true,
            in_viewport: true,
            mounted: false,
            disposed: false,
        }
    }

    pub fn state(&self) -> RenderLoopState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == RenderLoopState::Running
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    fn should_run(&self) -> bool {
        self.page_visible && self.in_viewport
    }

    pub fn handle(&mut self, event: LifecycleEvent) -> Transition {
        let from = self.state;
        let action = self.apply(event);
        if from != self.state {
            log::debug!("[hero] loop {:?} -> {:?} on {:?}", from, self.state, event);
        }
        Transition {
            from,
            to: self.state,
            action,
        }
    }

    fn apply(&mut self, event: LifecycleEvent) -> LoopAction {
        if self.disposed {
            return LoopAction::None;
        }
        match event {
            LifecycleEvent::Mount { motion_allowed } => {
                if self.mounted {
                    return LoopAction::None;
                }
                self.mounted = true;
                if !motion_allowed {
                    log::info!("[hero] reduced motion: keeping static fallback");
                    return LoopAction::None;
                }
                if self.should_run() {
                    self.state = RenderLoopState::Running;
                    LoopAction::ScheduleFirstFrame
                } else {
                    self.state = RenderLoopState::Paused;
                    LoopAction::None
                }
            }
            LifecycleEvent::PageHidden => {
                self.page_visible = false;
                self.pause()
            }
            LifecycleEvent::LeftViewport => {
                self.in_viewport = false;
                self.pause()
            }
            LifecycleEvent::PageVisible => {
                self.page_visible = true;
                self.resume()
            }
            LifecycleEvent::EnteredViewport => {
                self.in_viewport = true;
                self.resume()
            }
            LifecycleEvent::Dispose => {
                self.disposed = true;
                self.state = RenderLoopState::Stopped;
                LoopAction::CancelAll
            }
        }
    }

    fn pause(&mut self) -> LoopAction {
        if self.state == RenderLoopState::Running {
            self.state = RenderLoopState::Paused;
            LoopAction::StopScheduling
        } else {
            LoopAction::None
        }
    }

    fn resume(&mut self) -> LoopAction {
        if self.state == RenderLoopState::Paused && self.should_run() {
            self.state = RenderLoopState::Running;
            LoopAction::ResumeScheduling
        } else {
            LoopAction::None
        }
    }
}

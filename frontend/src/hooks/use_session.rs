use std::rc::Rc;

use shared::{DashboardConfig, SessionCommand, SessionController};
use yew::prelude::*;

use crate::services::location;
use crate::services::logging::Logger;

/// Live session state. `controller` is `None` until the location has been read.
#[derive(Clone, PartialEq, Default)]
pub struct SessionState {
    pub controller: Option<Rc<SessionController>>,
}

pub enum SessionAction {
    Initialize(SessionController),
    Command(SessionCommand),
}

impl Reducible for SessionState {
    type Action = SessionAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        match action {
            SessionAction::Initialize(controller) => Rc::new(SessionState {
                controller: Some(Rc::new(controller)),
            }),
            SessionAction::Command(command) => {
                let Some(current) = self.controller.as_ref() else {
                    return self;
                };
                let mut next = (**current).clone();
                if next.apply(command) {
                    Rc::new(SessionState {
                        controller: Some(Rc::new(next)),
                    })
                } else {
                    self
                }
            }
        }
    }
}

pub struct UseSessionResult {
    pub controller: Option<Rc<SessionController>>,
    pub on_command: Callback<SessionCommand>,
}

/// Hook owning the dashboard session. Components only read the controller and
/// send commands through `on_command`.
#[hook]
pub fn use_session() -> UseSessionResult {
    let state = use_reducer(SessionState::default);

    // Read the share token once on mount
    use_effect_with((), {
        let dispatcher = state.dispatcher();
        move |_| {
            let hash = location::current_hash();
            let controller = SessionController::initialize(DashboardConfig::default(), hash.as_deref());
            Logger::debug_with_component(
                "session",
                &format!("Session ready in {:?} mode", controller.mode()),
            );
            dispatcher.dispatch(SessionAction::Initialize(controller));
            || ()
        }
    });

    let on_command = {
        let dispatcher = state.dispatcher();
        use_callback((), move |command: SessionCommand, _| {
            dispatcher.dispatch(SessionAction::Command(command));
        })
    };

    UseSessionResult {
        controller: state.controller.clone(),
        on_command,
    }
}

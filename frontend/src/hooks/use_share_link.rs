use std::rc::Rc;

use shared::SessionController;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::services::{clipboard, location, logging::Logger};

#[derive(Clone, PartialEq)]
pub struct UseShareLinkActions {
    pub generate: Callback<()>,
    pub copy: Callback<()>,
}

pub struct UseShareLinkResult {
    pub share_link: Option<String>,
    /// True while the "copied" acknowledgment is showing
    pub copied: bool,
    pub actions: UseShareLinkActions,
}

/// Hook for generating and copying the read-only share link
#[hook]
pub fn use_share_link(controller: Rc<SessionController>) -> UseShareLinkResult {
    let share_link = use_state(|| Option::<String>::None);
    let copied = use_state(|| false);
    let ack_duration_ms = controller.settings().copy_ack_duration_ms;

    // Rebuilt against the latest controller; the shown link only changes on generate
    let generate = {
        let share_link = share_link.clone();
        let copied = copied.clone();
        use_callback(controller, move |_: (), controller| {
            let (origin, path) = location::current_base().unwrap_or_default();
            match controller.generate_share_link(&origin, &path) {
                Ok(link) => {
                    Logger::info_with_component(
                        "share-link",
                        &format!("Generated share link ({} chars)", link.len()),
                    );
                    share_link.set(Some(link));
                    copied.set(false);
                }
                Err(e) => {
                    Logger::warn_with_component("share-link", &e.to_string());
                }
            }
        })
    };

    let copy = {
        let share_link = share_link.clone();
        let copied = copied.clone();
        Callback::from(move |_: ()| {
            let Some(link) = (*share_link).clone() else {
                return;
            };
            let copied = copied.clone();

            spawn_local(async move {
                match clipboard::copy_text(&link).await {
                    Ok(()) => {
                        copied.set(true);
                        // Clear the acknowledgment after a short delay
                        gloo::timers::future::TimeoutFuture::new(ack_duration_ms).await;
                        copied.set(false);
                    }
                    Err(e) => {
                        Logger::warn_with_component("share-link", &e.to_string());
                    }
                }
            });
        })
    };

    UseShareLinkResult {
        share_link: (*share_link).clone(),
        copied: *copied,
        actions: UseShareLinkActions { generate, copy },
    }
}

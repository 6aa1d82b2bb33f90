use dioxus::prelude::*;
use tracing::warn;

use crate::context::{AppContext, ThemeSignal};

#[cfg(test)]
use std::cell::RefCell;
#[cfg(test)]
use std::rc::Rc;

/// Flips the theme and persists the choice. The label names the target theme.
#[component]
pub fn ThemeToggle() -> Element {
    let ctx = use_context::<AppContext>();
    let ThemeSignal(mut theme) = use_context::<ThemeSignal>();
    let theme_service = ctx.theme_service();

    let toggle = use_callback(move |()| {
        let current = theme();
        theme.set(current.toggled());
        let theme_service = theme_service.clone();
        spawn(async move {
            if let Err(err) = theme_service.toggle(current).await {
                warn!(error = %err, "failed to persist theme");
            }
        });
    });

    #[cfg(test)]
    {
        let mut registered = use_signal(|| false);
        if !registered() {
            registered.set(true);
            if let Some(handles) = try_consume_context::<ThemeTestHandles>() {
                handles.register(toggle);
            }
        }
    }

    rsx! {
        button {
            class: "theme-toggle",
            id: "theme-toggle",
            onclick: move |_| toggle.call(()),
            "{theme().toggle_label()}"
        }
    }
}

#[cfg(test)]
#[derive(Clone, Default)]
pub(crate) struct ThemeTestHandles {
    toggle: Rc<RefCell<Option<Callback<()>>>>,
}

#[cfg(test)]
impl ThemeTestHandles {
    pub(crate) fn register(&self, toggle: Callback<()>) {
        *self.toggle.borrow_mut() = Some(toggle);
    }

    pub(crate) fn toggle(&self) -> Callback<()> {
        (*self.toggle.borrow()).expect("theme toggle registered")
    }
}

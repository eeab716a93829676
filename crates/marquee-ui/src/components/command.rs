//! Command line and its output modal.

use crate::components::modal::Modal;
use crate::components::use_app_ctx;
use crate::core::pipeline::relay_command;
use crate::core::store::AppStore;
use web_sys::HtmlInputElement;
use yew::platform::spawn_local;
use yew::prelude::*;
use yewdux::prelude::{Dispatch, use_selector};

/// Free-text input; Enter relays the line.
#[function_component(CommandBar)]
pub(crate) fn command_bar() -> Html {
    let ctx = use_app_ctx();
    let busy = use_selector(|store: &AppStore| store.console.busy);

    let on_keydown = {
        let ctx = ctx.clone();
        Callback::from(move |event: KeyboardEvent| {
            if event.key() != "Enter" {
                return;
            }
            let Some(input) = event.target_dyn_into::<HtmlInputElement>() else {
                return;
            };
            let line = input.value();
            if line.trim().is_empty() {
                return;
            }
            input.set_value("");
            let dispatch = Dispatch::<AppStore>::new();
            dispatch.reduce_mut(|store| store.console.start());
            let ctx = ctx.clone();
            spawn_local(async move {
                let outcome = relay_command(ctx.client.as_ref(), &line).await;
                dispatch.reduce_mut(|store| store.console.apply(&outcome, &ctx.render));
            });
        })
    };

    html! {
        <div class="command-bar">
            <input
                id="cmdInput"
                type="text"
                placeholder={ctx.render.t("command.placeholder")}
                disabled={*busy}
                onkeydown={on_keydown}
            />
        </div>
    }
}

#[function_component(CommandModal)]
pub(crate) fn command_modal() -> Html {
    let ctx = use_app_ctx();
    let console = use_selector(|store: &AppStore| store.console.clone());
    let on_close = Callback::from(|()| {
        Dispatch::<AppStore>::new().reduce_mut(|store| store.console.close());
    });

    html! {
        <Modal id="cmdModal" open={console.open} {on_close} close_label={ctx.render.t("command.close")}>
            <h3>{console.header.clone()}</h3>
            <pre id="cmdOutput" class="cmd-output">{console.output.clone()}</pre>
        </Modal>
    }
}

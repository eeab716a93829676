use crate::app::Route;
use crate::components::use_app_ctx;
use crate::core::pipeline::show_person;
use crate::core::render::CardTarget;
use crate::core::store::AppStore;
use yew::platform::spawn_local;
use yew::prelude::*;
use yew_router::prelude::*;
use yewdux::prelude::Dispatch;

/// Click handler shared by every card list.
///
/// Movie cards navigate to the detail page; person cards open the person modal.
#[hook]
pub(crate) fn use_card_click() -> Callback<CardTarget> {
    let ctx = use_app_ctx();
    let navigator = use_navigator();
    Callback::from(move |target: CardTarget| match target {
        CardTarget::Movie(id) => {
            Dispatch::<AppStore>::new().reduce_mut(|store| store.person_modal.close());
            if let Some(navigator) = &navigator {
                navigator.push(&Route::Movie { id: id.to_string() });
            }
        }
        CardTarget::Person(basics) => {
            let ctx = ctx.clone();
            spawn_local(async move {
                let host = Dispatch::<AppStore>::new();
                show_person(ctx.client.as_ref(), &host, basics, &ctx.render).await;
            });
        }
        CardTarget::Static => {}
    })
}

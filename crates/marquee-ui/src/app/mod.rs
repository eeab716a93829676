//! Application shell: service wiring, routing and boot.
//!
//! # Design
//! - Build services once per locale and share them through context.
//! - Snapshot the stored session into the store at mount; auth changes reload the page.
//! - Modals render once at the shell level so any page can open them.

use crate::components::auth::AuthModal;
use crate::components::command::CommandModal;
use crate::components::home::HomePage;
use crate::components::movie::MoviePage;
use crate::components::navbar::Navbar;
use crate::components::person_modal::PersonModalHost;
use crate::core::config::UiConfig;
use crate::core::logic::parse_route_id;
use crate::core::store::AppStore;
use crate::i18n::{LocaleCode, TranslationBundle};
use gloo::console;
use gloo::storage::{LocalStorage, Storage};
use preferences::{LOCALE_KEY, api_base_url, load_locale};
use yew::prelude::*;
use yew_router::prelude::*;
use yewdux::prelude::Dispatch;

mod api;
mod logging;
mod preferences;
mod routes;

pub(crate) use api::AppCtx;
pub(crate) use preferences::{entropy, now_ms, reload_page};
pub(crate) use routes::Route;

#[function_component(MarqueeApp)]
pub(crate) fn marquee_app() -> Html {
    let locale = use_state(load_locale);
    let app_ctx = use_memo(|locale| AppCtx::boot(*locale), *locale);
    let bundle = (*app_ctx.render.bundle).clone();

    {
        let session = app_ctx.session.clone();
        use_effect_with_deps(
            move |_| {
                let state = session.state();
                Dispatch::<AppStore>::new().reduce_mut(|store| store.session = state);
                || ()
            },
            (),
        );
    }

    let on_locale = {
        let locale = locale.clone();
        Callback::from(move |next: LocaleCode| {
            if let Err(err) = LocalStorage::set(LOCALE_KEY, next.code()) {
                console::error!("storage operation failed", "set", LOCALE_KEY, err.to_string());
            }
            locale.set(next);
        })
    };

    html! {
        <ContextProvider<AppCtx> context={(*app_ctx).clone()}>
            <ContextProvider<TranslationBundle> context={bundle}>
                <BrowserRouter>
                    <Navbar locale={*locale} on_locale={on_locale} />
                    <main class="page">
                        <Switch<Route> render={switch} />
                    </main>
                    <PersonModalHost />
                    <AuthModal />
                    <CommandModal />
                </BrowserRouter>
            </ContextProvider<TranslationBundle>>
        </ContextProvider<AppCtx>>
    }
}

fn switch(route: Route) -> Html {
    match route {
        Route::Home => html! { <HomePage /> },
        Route::Movie { id } => match parse_route_id(&id) {
            Some(movie_id) => html! { <MoviePage key={movie_id.to_string()} {movie_id} /> },
            None => html! { <Redirect<Route> to={Route::NotFound} /> },
        },
        Route::NotFound => html! { <NotFound /> },
    }
}

#[function_component(NotFound)]
fn not_found() -> Html {
    let bundle = use_context::<TranslationBundle>().unwrap_or_default();
    html! {
        <section class="not-found">
            <p>{bundle.text("nav.not_found", "")}</p>
            <Link<Route> to={Route::Home} classes={classes!("btn")}>{bundle.text("nav.back_home", "")}</Link<Route>>
        </section>
    }
}

/// Entrypoint for wasm32 builds.
pub fn run_app() {
    console_error_panic_hook::set_once();
    if let Err(err) = logging::init_logging(&UiConfig::default().log_level) {
        console::error!(err.to_string());
    }
    tracing::info!(api = %api_base_url(), "starting marquee ui");
    if let Some(root) = gloo::utils::document().get_element_by_id("root") {
        yew::Renderer::<MarqueeApp>::with_root(root).render();
    } else {
        yew::Renderer::<MarqueeApp>::new().render();
    }
}

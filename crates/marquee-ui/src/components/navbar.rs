use crate::app::{Route, reload_page};
use crate::components::use_app_ctx;
use crate::core::auth::SessionState;
use crate::core::store::AppStore;
use crate::core::views::AuthTab;
use crate::i18n::LocaleCode;
use web_sys::HtmlSelectElement;
use yew::prelude::*;
use yew_router::prelude::*;
use yewdux::prelude::{Dispatch, use_selector};

#[derive(Properties, PartialEq)]
pub(crate) struct NavbarProps {
    pub locale: LocaleCode,
    pub on_locale: Callback<LocaleCode>,
}

/// Top bar: brand, locale picker and the login button or user badge.
#[function_component(Navbar)]
pub(crate) fn navbar(props: &NavbarProps) -> Html {
    let ctx = use_app_ctx();
    let t = |key: &str| ctx.render.t(key);
    let session = use_selector(|store: &AppStore| store.session.clone());
    let visibility = session.visibility();
    let display_name = match &*session {
        SessionState::Authenticated(identity) => identity.display_name().to_string(),
        SessionState::Anonymous => String::new(),
    };

    let open_login = Callback::from(|_: MouseEvent| {
        Dispatch::<AppStore>::new().reduce_mut(|store| store.auth.open_on(AuthTab::Login));
    });

    let logout = {
        let session = ctx.session.clone();
        Callback::from(move |_: MouseEvent| {
            session.clear();
            Dispatch::<AppStore>::new().reduce_mut(|store| store.session = SessionState::Anonymous);
            tracing::info!("logged out");
            reload_page();
        })
    };

    let on_locale_change = {
        let on_locale = props.on_locale.clone();
        Callback::from(move |event: Event| {
            if let Some(select) = event.target_dyn_into::<HtmlSelectElement>() {
                if let Some(locale) = LocaleCode::from_lang_tag(&select.value()) {
                    on_locale.emit(locale);
                }
            }
        })
    };

    html! {
        <header class="navbar">
            <Link<Route> to={Route::Home} classes={classes!("brand")}>{t("nav.brand")}</Link<Route>>
            <div class="nav-actions">
                <select class="locale-select" aria-label={t("nav.language")} onchange={on_locale_change}>
                    { for LocaleCode::all().into_iter().map(|code| html! {
                        <option value={code.code()} selected={code == props.locale}>{code.label()}</option>
                    }) }
                </select>
                <button id="loginBtn" class="btn" hidden={!visibility.login_button} onclick={open_login}>
                    {t("nav.login")}
                </button>
                <div id="userInfo" class="user-badge" hidden={!visibility.user_badge}>
                    <span class="user-name">{display_name}</span>
                    <button class="btn ghost" onclick={logout}>{t("nav.logout")}</button>
                </div>
            </div>
        </header>
    }
}

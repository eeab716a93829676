//! Login/register modal and the email confirmation step.
//!
//! # Design
//! - Form text lives in local state; progress and messages live in the store.
//! - A successful login reloads the page so every region re-derives from storage.
//! - Sending a code always passes through the confirmation modal first.

use crate::app::{entropy, now_ms, reload_page};
use crate::components::modal::Modal;
use crate::components::use_app_ctx;
use crate::core::auth::{AuthFormError, Credentials, PasswordVisibility, RegistrationForm};
use crate::core::pipeline::{
    LoginOutcome, SendCodeOutcome, login, register, send_verification,
};
use crate::core::store::AppStore;
use crate::core::views::{AuthTab, NoticeTone};
use web_sys::HtmlInputElement;
use yew::platform::spawn_local;
use yew::prelude::*;
use yewdux::prelude::{Dispatch, use_selector};

fn bind(field: &UseStateHandle<String>) -> Callback<InputEvent> {
    let field = field.clone();
    Callback::from(move |event: InputEvent| {
        if let Some(input) = event.target_dyn_into::<HtmlInputElement>() {
            field.set(input.value());
        }
    })
}

fn reveal(visibility: PasswordVisibility) {
    Dispatch::<AppStore>::new().reduce_mut(|store| store.auth.password = visibility);
}

#[function_component(AuthModal)]
pub(crate) fn auth_modal() -> Html {
    let ctx = use_app_ctx();
    let t = |key: &str| ctx.render.t(key);
    let form = use_selector(|store: &AppStore| store.auth.clone());
    let confirm = use_selector(|store: &AppStore| store.confirm.clone());

    let login_email = use_state(String::new);
    let login_password = use_state(String::new);
    let reg_email = use_state(String::new);
    let reg_password = use_state(String::new);
    let reg_code = use_state(String::new);
    let reg_nickname = use_state(String::new);

    let on_close = Callback::from(|()| {
        Dispatch::<AppStore>::new().reduce_mut(|store| store.auth.close());
    });

    let tab = |target: AuthTab| {
        Callback::from(move |_: MouseEvent| {
            Dispatch::<AppStore>::new().reduce_mut(|store| store.auth.switch_to(target));
        })
    };

    let on_login = {
        let ctx = ctx.clone();
        let email = login_email.clone();
        let password = login_password.clone();
        Callback::from(move |event: SubmitEvent| {
            event.prevent_default();
            let credentials = Credentials {
                email: (*email).clone(),
                password: (*password).clone(),
            };
            let dispatch = Dispatch::<AppStore>::new();
            let progress = ctx.render.t("auth.logging_in");
            dispatch.reduce_mut(|store| store.auth.start(progress));
            let ctx = ctx.clone();
            spawn_local(async move {
                let outcome = login(ctx.client.as_ref(), ctx.session.as_ref(), &credentials).await;
                dispatch.reduce_mut(|store| store.auth.apply_login(&outcome, &ctx.render));
                if matches!(outcome, LoginOutcome::LoggedIn(_)) {
                    reload_page();
                }
            });
        })
    };

    let on_send_code = {
        let ctx = ctx.clone();
        let email = reg_email.clone();
        Callback::from(move |_: MouseEvent| {
            let dispatch = Dispatch::<AppStore>::new();
            if email.trim().is_empty() {
                let outcome = SendCodeOutcome::Invalid(AuthFormError::MissingEmail);
                dispatch.reduce_mut(|store| store.auth.apply_send(&outcome, &ctx.render));
                return;
            }
            dispatch.reduce_mut(|store| store.confirm.open(&email));
        })
    };

    let on_confirm = {
        let ctx = ctx.clone();
        Callback::from(move |_: MouseEvent| {
            let dispatch = Dispatch::<AppStore>::new();
            let email = dispatch.get().confirm.email.clone();
            let progress = ctx.render.t("auth.sending");
            dispatch.reduce_mut(|store| {
                store.confirm.close();
                store.auth.start(progress);
            });
            let ctx = ctx.clone();
            spawn_local(async move {
                let outcome = send_verification(
                    ctx.mailer.as_ref(),
                    ctx.verification.as_ref(),
                    &email,
                    entropy(),
                    now_ms(),
                )
                .await;
                dispatch.reduce_mut(|store| store.auth.apply_send(&outcome, &ctx.render));
            });
        })
    };

    let on_cancel = Callback::from(|()| {
        Dispatch::<AppStore>::new().reduce_mut(|store| store.confirm.close());
    });
    let on_cancel_click = {
        let on_cancel = on_cancel.clone();
        Callback::from(move |_: MouseEvent| on_cancel.emit(()))
    };

    let on_register = {
        let ctx = ctx.clone();
        let email = reg_email.clone();
        let password = reg_password.clone();
        let code = reg_code.clone();
        let nickname = reg_nickname.clone();
        Callback::from(move |event: SubmitEvent| {
            event.prevent_default();
            let registration = RegistrationForm {
                email: (*email).clone(),
                password: (*password).clone(),
                code: (*code).clone(),
                nickname: (*nickname).clone(),
            };
            let dispatch = Dispatch::<AppStore>::new();
            let progress = ctx.render.t("auth.registering");
            dispatch.reduce_mut(|store| store.auth.start(progress));
            let ctx = ctx.clone();
            spawn_local(async move {
                let outcome = register(
                    ctx.client.as_ref(),
                    ctx.verification.as_ref(),
                    &registration,
                    now_ms(),
                )
                .await;
                dispatch.reduce_mut(|store| store.auth.apply_register(&outcome, &ctx.render));
            });
        })
    };

    let notice = form.notice.as_ref().map(|notice| {
        let tone = match notice.tone {
            NoticeTone::Info => "info",
            NoticeTone::Success => "success",
            NoticeTone::Error => "error",
        };
        html! { <p class={classes!("form-notice", tone)}>{notice.text.clone()}</p> }
    });

    let tab_class = |target: AuthTab| classes!("tab", (form.tab == target).then_some("tab-active"));

    html! {
        <>
            <Modal id="authModal" open={form.open} {on_close} close_label={t("auth.close")}>
                <h2>{t("auth.title")}</h2>
                <div class="tabs" role="tablist">
                    <button class={tab_class(AuthTab::Login)} onclick={tab(AuthTab::Login)}>{t("auth.tab_login")}</button>
                    <button class={tab_class(AuthTab::Register)} onclick={tab(AuthTab::Register)}>{t("auth.tab_register")}</button>
                </div>
                if form.tab == AuthTab::Login {
                    <form id="loginForm" class="auth-form" onsubmit={on_login}>
                        <input type="email" placeholder={t("auth.email")} value={(*login_email).clone()} oninput={bind(&login_email)} />
                        <input type="password" placeholder={t("auth.password")} value={(*login_password).clone()} oninput={bind(&login_password)} />
                        <button type="submit" class="btn" disabled={form.busy}>{t("auth.login_submit")}</button>
                    </form>
                } else {
                    <form id="registerForm" class="auth-form" onsubmit={on_register}>
                        <div class="field-row">
                            <input type="email" placeholder={t("auth.email")} value={(*reg_email).clone()} oninput={bind(&reg_email)} />
                            <button type="button" class="btn ghost" disabled={form.busy} onclick={on_send_code}>{t("auth.send_code")}</button>
                        </div>
                        <input type="text" inputmode="numeric" placeholder={t("auth.code")} value={(*reg_code).clone()} oninput={bind(&reg_code)} />
                        <input type="text" placeholder={t("auth.nickname")} value={(*reg_nickname).clone()} oninput={bind(&reg_nickname)} />
                        <div class="field-row">
                            <input
                                type={form.password.input_type()}
                                placeholder={t("auth.password")}
                                value={(*reg_password).clone()}
                                oninput={bind(&reg_password)}
                            />
                            <button
                                type="button"
                                class="btn ghost reveal"
                                aria-label={t("auth.show_password")}
                                onmousedown={Callback::from(|_: MouseEvent| reveal(PasswordVisibility::Revealed))}
                                ontouchstart={Callback::from(|_: TouchEvent| reveal(PasswordVisibility::Revealed))}
                                onmouseup={Callback::from(|_: MouseEvent| reveal(PasswordVisibility::Hidden))}
                                onmouseleave={Callback::from(|_: MouseEvent| reveal(PasswordVisibility::Hidden))}
                                ontouchend={Callback::from(|_: TouchEvent| reveal(PasswordVisibility::Hidden))}
                            >{"👁"}</button>
                        </div>
                        <button type="submit" class="btn" disabled={form.busy}>{t("auth.register_submit")}</button>
                    </form>
                }
                { for notice }
            </Modal>
            <Modal id="confirmModal" open={confirm.open} on_close={on_cancel} close_label={t("auth.close")}>
                <h3>{t("auth.confirm_title")}</h3>
                <p>{t("auth.confirm_body")}<strong>{confirm.email.clone()}</strong></p>
                <div class="actions">
                    <button class="btn ghost" onclick={on_cancel_click}>{t("auth.confirm_no")}</button>
                    <button class="btn" onclick={on_confirm}>{t("auth.confirm_yes")}</button>
                </div>
            </Modal>
        </>
    }
}

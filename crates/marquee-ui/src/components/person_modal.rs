use crate::components::cards::use_card_click;
use crate::components::fragment::HtmlFragment;
use crate::components::modal::Modal;
use crate::components::use_app_ctx;
use crate::core::store::AppStore;
use crate::core::views::Section;
use yew::prelude::*;
use yewdux::prelude::{Dispatch, use_selector};

/// Person detail modal; opened by person and cast card clicks.
#[function_component(PersonModalHost)]
pub(crate) fn person_modal_host() -> Html {
    let ctx = use_app_ctx();
    let t = |key: &str| ctx.render.t(key);
    let on_card = use_card_click();
    let modal = use_selector(|store: &AppStore| store.person_modal.clone());
    let view = &modal.view;

    let on_close = Callback::from(|()| {
        Dispatch::<AppStore>::new().reduce_mut(|store| store.person_modal.close());
    });

    let section = |title: String, id: &'static str, section: &Section| {
        html! {
            <section class="person-section" hidden={section.hidden}>
                <h3>{title}</h3>
                <HtmlFragment {id} class={classes!("mini-grid")} html={section.html.clone()} on_card={on_card.clone()} />
            </section>
        }
    };

    html! {
        <Modal id="personModal" open={modal.open} {on_close} close_label={t("person.close")}>
            <div class="person-header">
                <img id="personPhoto" class="person-photo" src={view.photo.clone()} alt={view.name.clone()} />
                <div>
                    <h2 id="personName">{view.name.clone()}</h2>
                    { for view.role.iter().map(|role| html! { <p class="person-role">{role.clone()}</p> }) }
                    { for view.birth.iter().map(|birth| html! { <p>{birth.clone()}</p> }) }
                    { for view.place.iter().map(|place| html! { <p>{place.clone()}</p> }) }
                </div>
            </div>
            <p id="personBio" class={classes!("person-bio", view.loading.then_some("loading"))}>
                {view.biography.clone()}
            </p>
            {section(t("person.known_for"), "personKnownFor", &view.known_for)}
            {section(t("person.acting"), "personActing", &view.acting)}
            {section(t("person.directing"), "personDirecting", &view.directing)}
        </Modal>
    }
}

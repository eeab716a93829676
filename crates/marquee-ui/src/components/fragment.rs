//! Host for pre-rendered card markup.
//!
//! Card HTML is produced and escaped in `core::render`; this component only
//! mounts it and turns clicks on `data-*` cards back into [`CardTarget`]s.

use crate::core::render::CardTarget;
use web_sys::Element;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub(crate) struct HtmlFragmentProps {
    pub html: AttrValue,
    #[prop_or_default]
    pub id: Option<AttrValue>,
    #[prop_or_default]
    pub class: Classes,
    #[prop_or_default]
    pub hidden: bool,
    #[prop_or_default]
    pub on_card: Option<Callback<CardTarget>>,
}

#[function_component(HtmlFragment)]
pub(crate) fn html_fragment(props: &HtmlFragmentProps) -> Html {
    let node = use_node_ref();
    {
        let node = node.clone();
        use_effect_with_deps(
            move |html| {
                if let Some(element) = node.cast::<Element>() {
                    element.set_inner_html(html);
                }
                || ()
            },
            props.html.clone(),
        );
    }

    let onclick = props.on_card.clone().map(|on_card| {
        Callback::from(move |event: MouseEvent| {
            let Some(origin) = event.target_dyn_into::<Element>() else {
                return;
            };
            let Ok(Some(card)) = origin.closest("[data-movie-id],[data-person-id]") else {
                return;
            };
            if let Some(target) = CardTarget::from_attributes(|name| card.get_attribute(name)) {
                on_card.emit(target);
            }
        })
    });

    html! {
        <div
            ref={node}
            id={props.id.clone()}
            class={props.class.clone()}
            hidden={props.hidden}
            {onclick}
        />
    }
}

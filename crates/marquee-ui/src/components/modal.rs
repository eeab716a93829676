use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub(crate) struct ModalProps {
    pub open: bool,
    pub on_close: Callback<()>,
    #[prop_or_default]
    pub id: Option<AttrValue>,
    #[prop_or_default]
    pub class: Classes,
    #[prop_or_default]
    pub close_label: AttrValue,
    #[prop_or_default]
    pub children: Children,
}

/// Modal shell; hidden modals stay mounted so their content survives a close.
#[function_component(Modal)]
pub(crate) fn modal(props: &ModalProps) -> Html {
    let close = {
        let on_close = props.on_close.clone();
        Callback::from(move |_: MouseEvent| on_close.emit(()))
    };
    let classes = classes!(
        "modal",
        props.open.then_some("modal-open"),
        props.class.clone()
    );
    html! {
        <div id={props.id.clone()} class={classes} hidden={!props.open} role="dialog" aria-modal="true">
            <div class="modal-box">
                <button class="modal-close" aria-label={props.close_label.clone()} onclick={close.clone()}>{"×"}</button>
                { for props.children.iter() }
            </div>
            <div class="modal-backdrop" onclick={close} />
        </div>
    }
}

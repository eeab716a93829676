//! Routing definitions for the Marquee UI.
use yew_router::prelude::*;

#[derive(Clone, Routable, PartialEq, Eq, Debug)]
pub(crate) enum Route {
    #[at("/")]
    Home,
    #[at("/movie/:id")]
    Movie { id: String },
    #[not_found]
    #[at("/404")]
    NotFound,
}

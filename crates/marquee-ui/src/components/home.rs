//! Home page: search box, search results and the trending rows.

use crate::components::cards::use_card_click;
use crate::components::command::CommandBar;
use crate::components::fragment::HtmlFragment;
use crate::components::use_app_ctx;
use crate::core::pipeline::{load_trending, run_search};
use crate::core::views::{HomeView, SearchView, TrendingRow};
use web_sys::HtmlInputElement;
use yew::platform::spawn_local;
use yew::prelude::*;

#[function_component(HomePage)]
pub(crate) fn home_page() -> Html {
    let ctx = use_app_ctx();
    let t = |key: &str| ctx.render.t(key);
    let on_card = use_card_click();
    let home = {
        let render = ctx.render.clone();
        use_state(move || HomeView::loading(&render))
    };
    let search = use_state(SearchView::default);
    let query = use_state(String::new);
    let locale = ctx.render.bundle.locale;

    {
        let home = home.clone();
        let ctx = ctx.clone();
        use_effect_with_deps(
            move |_| {
                home.set(HomeView::loading(&ctx.render));
                spawn_local(async move {
                    if let Some(sets) = load_trending(ctx.client.as_ref()).await {
                        let mut view = HomeView::loading(&ctx.render);
                        view.apply_trending(&sets, &ctx.render);
                        home.set(view);
                    }
                });
                || ()
            },
            locale,
        );
    }

    let on_input = {
        let query = query.clone();
        Callback::from(move |event: InputEvent| {
            if let Some(input) = event.target_dyn_into::<HtmlInputElement>() {
                query.set(input.value());
            }
        })
    };

    let on_submit = {
        let search = search.clone();
        let query = query.clone();
        let ctx = ctx.clone();
        Callback::from(move |event: SubmitEvent| {
            event.prevent_default();
            let mut view = (*search).clone();
            let Some(term) = view.begin(&query, &ctx.render) else {
                search.set(view);
                return;
            };
            search.set(view.clone());
            let search = search.clone();
            let ctx = ctx.clone();
            spawn_local(async move {
                let outcome =
                    run_search(ctx.client.as_ref(), &term, ctx.render.config.caps.search).await;
                view.apply(&outcome, &ctx.render);
                search.set(view);
            });
        })
    };

    html! {
        <div class="home">
            <form class="search-bar" onsubmit={on_submit}>
                <input
                    id="searchInput"
                    type="search"
                    placeholder={t("search.placeholder")}
                    value={(*query).clone()}
                    oninput={on_input}
                />
                <button type="submit" class="btn">{t("search.submit")}</button>
            </form>
            <p id="searchMessage" class="search-message" hidden={search.message.is_none()}>
                {search.message.clone().unwrap_or_default()}
            </p>
            <div id="searchResults" class="search-results" hidden={!search.results_visible}>
                <section class="result-section" hidden={search.movies.hidden}>
                    <h3>{t("search.movies")}</h3>
                    <HtmlFragment
                        id="searchMovies"
                        class={classes!("card-grid")}
                        html={search.movies.html.clone()}
                        on_card={on_card.clone()}
                    />
                </section>
                <section class="result-section" hidden={search.people.hidden}>
                    <h3>{t("search.people")}</h3>
                    <HtmlFragment
                        id="searchPeople"
                        class={classes!("card-grid")}
                        html={search.people.html.clone()}
                        on_card={on_card.clone()}
                    />
                </section>
            </div>
            <CommandBar />
            { for TrendingRow::all().into_iter().map(|row| html! {
                <section class="rank-row">
                    <h2>{t(row.title_key())}</h2>
                    <HtmlFragment
                        id={row.dom_id()}
                        class={classes!("rank-list")}
                        html={home.row(row).html.clone()}
                        on_card={on_card.clone()}
                    />
                </section>
            }) }
        </div>
    }
}

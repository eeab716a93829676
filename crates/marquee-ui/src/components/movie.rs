//! Movie detail page: detail fields, cast row, reviews and the review form.

use crate::app::reload_page;
use crate::components::cards::use_card_click;
use crate::components::fragment::HtmlFragment;
use crate::components::use_app_ctx;
use crate::core::auth::SessionState;
use crate::core::pipeline::{
    DetailOutcome, MoviePage as LoadedPage, ReviewDraft, ReviewsOutcome, SubmitOutcome,
    load_movie_page, load_reviews, submit_review,
};
use crate::core::render::RenderCtx;
use crate::core::store::AppStore;
use crate::core::views::{AuthTab, MoviePhase, MovieView, Notice, review_notice};
use gloo::dialogs::alert;
use std::rc::Rc;
use web_sys::{HtmlSelectElement, HtmlTextAreaElement};
use yew::platform::spawn_local;
use yew::prelude::*;
use yewdux::prelude::{Dispatch, use_selector};

enum MovieAction {
    Reset(RenderCtx),
    Page(LoadedPage, RenderCtx),
    Reviews(ReviewsOutcome, RenderCtx),
}

#[derive(PartialEq)]
struct MovieState(MovieView);

impl Reducible for MovieState {
    type Action = MovieAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut view = self.0.clone();
        match action {
            MovieAction::Reset(ctx) => view = MovieView::loading(&ctx),
            MovieAction::Page(page, ctx) => {
                view.apply_detail(&page.detail, &ctx);
                if let Some(reviews) = &page.reviews {
                    view.apply_reviews(reviews, &ctx);
                }
            }
            MovieAction::Reviews(reviews, ctx) => view.apply_reviews(&reviews, &ctx),
        }
        Rc::new(Self(view))
    }
}

fn expire_session(ctx: &RenderCtx) {
    Dispatch::<AppStore>::new().reduce_mut(|store| store.session = SessionState::Anonymous);
    alert(&ctx.t("review.expired"));
    reload_page();
}

#[derive(Properties, PartialEq)]
pub(crate) struct MoviePageProps {
    pub movie_id: i64,
}

#[function_component(MoviePage)]
pub(crate) fn movie_page(props: &MoviePageProps) -> Html {
    let ctx = use_app_ctx();
    let t = |key: &str| ctx.render.t(key);
    let on_card = use_card_click();
    let session = use_selector(|store: &AppStore| store.session.clone());
    let visibility = session.visibility();
    let state = {
        let render = ctx.render.clone();
        use_reducer(move || MovieState(MovieView::loading(&render)))
    };
    let draft = use_state(ReviewDraft::default);
    let notice = use_state(|| None::<Notice>);
    let busy = use_state(|| false);
    let movie_id = props.movie_id;

    {
        let dispatcher = state.dispatcher();
        let ctx = ctx.clone();
        use_effect_with_deps(
            move |movie_id| {
                let movie_id = *movie_id;
                dispatcher.dispatch(MovieAction::Reset(ctx.render.clone()));
                spawn_local(async move {
                    let page =
                        load_movie_page(ctx.client.as_ref(), ctx.session.as_ref(), movie_id).await;
                    if page.detail == DetailOutcome::LoginRequired {
                        Dispatch::<AppStore>::new()
                            .reduce_mut(|store| store.session = ctx.session.state());
                    }
                    dispatcher.dispatch(MovieAction::Page(page, ctx.render.clone()));
                });
                || ()
            },
            movie_id,
        );
    }

    let on_body = {
        let draft = draft.clone();
        Callback::from(move |event: InputEvent| {
            if let Some(area) = event.target_dyn_into::<HtmlTextAreaElement>() {
                draft.set(ReviewDraft {
                    body: area.value(),
                    ..(*draft).clone()
                });
            }
        })
    };

    let on_rating = {
        let draft = draft.clone();
        Callback::from(move |event: Event| {
            if let Some(select) = event.target_dyn_into::<HtmlSelectElement>() {
                if let Ok(rating) = select.value().parse::<u8>() {
                    draft.set(ReviewDraft {
                        rating,
                        ..(*draft).clone()
                    });
                }
            }
        })
    };

    let on_submit = {
        let draft = draft.clone();
        let notice = notice.clone();
        let busy = busy.clone();
        let dispatcher = state.dispatcher();
        let ctx = ctx.clone();
        Callback::from(move |event: SubmitEvent| {
            event.prevent_default();
            if *busy {
                return;
            }
            busy.set(true);
            let current = (*draft).clone();
            let draft = draft.clone();
            let notice = notice.clone();
            let busy = busy.clone();
            let dispatcher = dispatcher.clone();
            let ctx = ctx.clone();
            spawn_local(async move {
                let outcome =
                    submit_review(ctx.client.as_ref(), ctx.session.as_ref(), movie_id, &current)
                        .await;
                busy.set(false);
                notice.set(review_notice(&outcome, &ctx.render));
                match outcome {
                    SubmitOutcome::Submitted => {
                        draft.set(ReviewDraft::default());
                        let reviews = load_reviews(ctx.client.as_ref(), movie_id).await;
                        dispatcher.dispatch(MovieAction::Reviews(reviews, ctx.render.clone()));
                    }
                    SubmitOutcome::SessionExpired => expire_session(&ctx.render),
                    _ => {}
                }
            });
        })
    };

    let open_login = Callback::from(|_: MouseEvent| {
        Dispatch::<AppStore>::new().reduce_mut(|store| store.auth.open_on(AuthTab::Login));
    });

    let view = &state.0;
    if view.phase == MoviePhase::LoginRequired {
        return html! {
            <div class="movie-locked">
                <h1 id="movieTitle">{view.title.clone()}</h1>
                <h3>{t("movie.locked_heading")}</h3>
                <p>{view.overview.clone()}</p>
                <button class="btn" onclick={open_login}>{t("movie.login_now")}</button>
            </div>
        };
    }

    html! {
        <article class="movie-detail">
            <div class="movie-hero">
                <img id="moviePoster" class="poster" src={view.poster.clone()} alt={view.title.clone()} />
                <div class="movie-info">
                    <h1 id="movieTitle">{view.title.clone()}</h1>
                    <p id="movieMeta" class="meta">{view.meta.clone()}</p>
                    <p id="movieGenres">{view.genres.clone()}</p>
                    <p id="movieRuntime">{view.runtime.clone()}</p>
                    <p id="movieRating">{view.rating.clone()}</p>
                    <p id="movieDirectors" hidden={view.directors.is_empty()}>{view.directors.clone()}</p>
                    <p id="movieOverview" class="overview">{view.overview.clone()}</p>
                </div>
            </div>
            <section class="cast-section" hidden={view.cast.hidden}>
                <h2>{t("movie.cast")}</h2>
                <HtmlFragment
                    id="castList"
                    class={classes!("cast-row")}
                    html={view.cast.html.clone()}
                    on_card={on_card.clone()}
                />
            </section>
            <section class="reviews-section">
                <h2>{t("movie.reviews")}</h2>
                <HtmlFragment
                    id="reviewList"
                    class={classes!("review-list")}
                    hidden={view.reviews.hidden}
                    html={view.reviews.html.clone()}
                />
                <p id="loginHint" class="login-hint" hidden={!visibility.login_hint}>{t("review.hint")}</p>
                <form id="reviewForm" class="review-form" hidden={!visibility.review_form} onsubmit={on_submit}>
                    <h3>{t("review.write")}</h3>
                    <label>
                        <span>{t("review.rating")}</span>
                        <select onchange={on_rating}>
                            { for (1..=5u8).rev().map(|rating| html! {
                                <option value={rating.to_string()} selected={rating == draft.rating}>
                                    {"⭐".repeat(usize::from(rating))}
                                </option>
                            }) }
                        </select>
                    </label>
                    <textarea
                        placeholder={t("review.placeholder")}
                        value={draft.body.clone()}
                        oninput={on_body}
                    />
                    { for notice.as_ref().map(|notice| html! {
                        <p class="form-notice error">{notice.text.clone()}</p>
                    }) }
                    <button type="submit" class="btn" disabled={*busy}>{t("review.submit")}</button>
                </form>
            </section>
        </article>
    }
}

mod support;

use marquee_api_models::{MovieDetail, PersonDetail, SearchResults, TrendingSets};
use marquee_ui::core::auth::{Credentials, Identity, RegistrationForm, Session, SessionState};
use marquee_ui::core::config::PLACEHOLDER_IMAGE;
use marquee_ui::core::modal::PersonModal;
use marquee_ui::core::pipeline::{
    CommandOutcome, DetailOutcome, LoginOutcome, RegisterOutcome, ReviewDraft, ReviewsOutcome,
    SearchOutcome, SendCodeOutcome, SubmitOutcome, load_movie_page, load_reviews, load_trending,
    login, register, relay_command, run_search, send_verification, show_person, submit_review,
};
use marquee_ui::core::render::PersonBasics;
use marquee_ui::core::storage::{KeyValueStore, MemoryStore, TOKEN_KEY};
use marquee_ui::core::verify::{PendingVerification, VerifyError};
use marquee_ui::core::views::{HomeView, MoviePhase, MovieView, SearchView, TrendingRow};
use serde_json::json;
use std::cell::RefCell;
use support::{FakeBackend, FakeMailer, VALID_TOKEN, ctx, decode};

const TEN_MINUTES_MS: i64 = 600_000;

fn logged_in_session() -> Session<MemoryStore> {
    let session = Session::new(MemoryStore::default());
    session.establish(
        VALID_TOKEN,
        &Identity {
            email: "ann@example.com".to_string(),
            nickname: Some("Ann".to_string()),
        },
    );
    session
}

#[tokio::test(flavor = "current_thread")]
async fn trending_without_posters_or_ratings_uses_fallbacks() {
    let backend = FakeBackend::default();
    *backend.trending.borrow_mut() = Some(decode::<TrendingSets>(json!({
        "day": [{ "movie_id": 1, "title": "Heat", "release_date": "1995-12-15" }],
        "week": [],
        "now_playing": [],
        "upcoming": []
    })));
    let ctx = ctx();
    let mut home = HomeView::loading(&ctx);
    let sets = load_trending(&backend).await.expect("trending loads");
    home.apply_trending(&sets, &ctx);

    let today = &home.row(TrendingRow::Today).html;
    assert!(today.contains(&format!(r#"src="{PLACEHOLDER_IMAGE}""#)));
    assert!(today.contains("⭐ N/A"));
    assert!(today.contains(r#"data-movie-id="1""#));
    assert!(home.row(TrendingRow::Upcoming).html.contains("暫無資料。"));
}

#[tokio::test(flavor = "current_thread")]
async fn trending_failure_keeps_placeholders() {
    let backend = FakeBackend::default();
    let ctx = ctx();
    let home = HomeView::loading(&ctx);
    assert!(load_trending(&backend).await.is_none());
    assert!(home.row(TrendingRow::Week).html.contains("載入中…"));
}

#[tokio::test(flavor = "current_thread")]
async fn search_without_matches_hides_both_sections() {
    let backend = FakeBackend::default();
    *backend.search.borrow_mut() = Some(decode::<SearchResults>(json!({
        "movie": [{ "movie_id": 9, "title": "Undated" }],
        "person": []
    })));
    let ctx = ctx();
    let mut view = SearchView::default();
    let query = view.begin("  undated ", &ctx).expect("query issued");
    let outcome = run_search(&backend, &query, ctx.config.caps.search).await;
    assert_eq!(outcome, SearchOutcome::NoMatches);
    view.apply(&outcome, &ctx);

    assert_eq!(view.message.as_deref(), Some("查無相關電影或人物。"));
    assert!(view.movies.hidden);
    assert!(view.people.hidden);
    assert_eq!(backend.calls(), vec!["search:undated".to_string()]);
}

#[tokio::test(flavor = "current_thread")]
async fn blank_search_issues_no_request() {
    let backend = FakeBackend::default();
    assert_eq!(run_search(&backend, "   ", 12).await, SearchOutcome::EmptyQuery);
    assert!(backend.calls().is_empty());
}

#[tokio::test(flavor = "current_thread")]
async fn search_results_are_capped_per_section() {
    let backend = FakeBackend::default();
    let movies: Vec<_> = (1..=20)
        .map(|id| json!({ "movie_id": id, "title": format!("M{id}"), "release_year": "2001" }))
        .collect();
    let people: Vec<_> = (1..=3)
        .map(|id| json!({ "actor_id": id, "name": format!("P{id}") }))
        .collect();
    *backend.search.borrow_mut() =
        Some(decode(json!({ "movie": movies, "person": people })));

    match run_search(&backend, "m", 12).await {
        SearchOutcome::Results { movies, people } => {
            assert_eq!(movies.len(), 12);
            assert_eq!(people.len(), 3);
        }
        other => panic!("unexpected outcome: {other:?}"),
    }
}

#[test]
fn login_and_logout_flip_visibility() {
    let session = Session::new(MemoryStore::default());
    let anonymous = session.state().visibility();
    assert!(anonymous.login_button && anonymous.login_hint);
    assert!(!anonymous.user_badge && !anonymous.review_form);

    let session = logged_in_session();
    let authenticated = session.state().visibility();
    assert!(authenticated.user_badge && authenticated.review_form);
    assert!(!authenticated.login_button && !authenticated.login_hint);

    session.clear();
    assert_eq!(session.state(), SessionState::Anonymous);
    assert!(session.state().visibility().login_button);
}

#[tokio::test(flavor = "current_thread")]
async fn login_persists_identity_and_token() {
    let backend = FakeBackend::default();
    backend
        .accounts
        .borrow_mut()
        .insert("ann@example.com".to_string(), "secret".to_string());
    let session = Session::new(MemoryStore::default());

    let wrong = Credentials {
        email: "ann@example.com".to_string(),
        password: "nope".to_string(),
    };
    assert_eq!(
        login(&backend, &session, &wrong).await,
        LoginOutcome::Rejected("Invalid credentials".to_string())
    );
    assert!(!session.state().is_authenticated());

    let right = Credentials {
        email: " ann@example.com ".to_string(),
        password: "secret".to_string(),
    };
    let outcome = login(&backend, &session, &right).await;
    assert!(matches!(outcome, LoginOutcome::LoggedIn(_)));
    assert_eq!(session.token().as_deref(), Some(VALID_TOKEN));
    match session.state() {
        SessionState::Authenticated(identity) => assert_eq!(identity.display_name(), "Ann"),
        SessionState::Anonymous => panic!("expected a session"),
    }
}

#[tokio::test(flavor = "current_thread")]
async fn unauthorized_detail_shows_login_prompt_without_reviews() {
    let backend = FakeBackend::default();
    backend.locked.borrow_mut().insert(27);
    let ctx = ctx();

    let session = Session::new(MemoryStore::default());

    let page = load_movie_page(&backend, &session, 27).await;
    assert_eq!(page.detail, DetailOutcome::LoginRequired);
    assert!(page.reviews.is_none());
    assert!(!backend.called("reviews:"));

    let mut view = MovieView::loading(&ctx);
    view.apply_detail(&page.detail, &ctx);
    assert_eq!(view.phase, MoviePhase::LoginRequired);
    assert!(view.cast.hidden);
    assert!(view.reviews.hidden);
}

#[tokio::test(flavor = "current_thread")]
async fn detail_with_token_loads_cast_and_reviews() {
    let backend = FakeBackend::default();
    backend.locked.borrow_mut().insert(27);
    backend.details.borrow_mut().insert(
        27,
        decode::<MovieDetail>(json!({
            "movie_id": 27,
            "title": "Inception",
            "release_date": "2010-07-16",
            "actors": [{ "actor_id": 6193, "name": "Leonardo DiCaprio", "character": "Cobb" }]
        })),
    );
    let ctx = ctx();

    let session = logged_in_session();

    let page = load_movie_page(&backend, &session, 27).await;
    assert!(session.state().is_authenticated());
    let mut view = MovieView::loading(&ctx);
    view.apply_detail(&page.detail, &ctx);
    if let Some(reviews) = &page.reviews {
        view.apply_reviews(reviews, &ctx);
    }

    assert_eq!(view.title, "Inception");
    assert!(view.cast.html.contains(r#"data-person-id="6193""#));
    assert!(view.cast.html.contains(r#"data-person-role="Cobb""#));
    assert!(view.reviews.html.contains("目前尚無評論，成為第一個評論的人吧！"));
    assert_eq!(
        backend.calls(),
        vec!["detail:27".to_string(), "reviews:27".to_string()]
    );
}

#[tokio::test(flavor = "current_thread")]
async fn missing_movie_reports_backend_error() {
    let backend = FakeBackend::default();
    let page = load_movie_page(&backend, &Session::new(MemoryStore::default()), 404).await;
    assert_eq!(page.detail, DetailOutcome::Rejected("Movie not found".to_string()));
    assert!(page.reviews.is_some());
}

#[tokio::test(flavor = "current_thread")]
async fn stale_token_on_detail_clears_session() {
    let backend = FakeBackend::default();
    backend.locked.borrow_mut().insert(27);
    let session = Session::new(MemoryStore::default());
    session.establish(
        "stale-token",
        &Identity {
            email: "ann@example.com".to_string(),
            nickname: None,
        },
    );

    let page = load_movie_page(&backend, &session, 27).await;

    assert_eq!(page.detail, DetailOutcome::LoginRequired);
    assert!(page.reviews.is_none());
    assert_eq!(session.state(), SessionState::Anonymous);
    assert!(session.token().is_none());
    assert!(session.store().get(TOKEN_KEY).is_none());
    assert!(!backend.called("reviews:"));
}

#[tokio::test(flavor = "current_thread")]
async fn later_person_modal_wins_over_slow_earlier_one() {
    let backend = FakeBackend::default();
    backend
        .people
        .borrow_mut()
        .insert(1, decode::<PersonDetail>(json!({ "name": "Person A", "biography": "A bio" })));
    backend
        .people
        .borrow_mut()
        .insert(2, decode::<PersonDetail>(json!({ "name": "Person B", "biography": "B bio" })));
    let release_a = backend.gate_person(1);
    let host = RefCell::new(PersonModal::default());
    let ctx = ctx();
    let basics = |id: i64, name: &str| PersonBasics {
        id,
        name: name.to_string(),
        photo: PLACEHOLDER_IMAGE.to_string(),
        role: None,
    };

    let (a_applied, b_applied) = tokio::join!(
        show_person(&backend, &host, basics(1, "A"), &ctx),
        async {
            let applied = show_person(&backend, &host, basics(2, "B"), &ctx).await;
            let _ = release_a.send(());
            applied
        }
    );

    assert!(!a_applied);
    assert!(b_applied);
    let modal = host.borrow();
    assert!(modal.open);
    assert_eq!(modal.view.name, "Person B");
    assert_eq!(modal.view.biography, "B bio");
}

#[tokio::test(flavor = "current_thread")]
async fn submitted_review_appears_after_reload() {
    let backend = FakeBackend::default();
    let session = logged_in_session();
    let ctx = ctx();
    let draft = ReviewDraft {
        body: "Great movie".to_string(),
        rating: 5,
    };

    assert_eq!(
        submit_review(&backend, &session, 27, &draft).await,
        SubmitOutcome::Submitted
    );
    let submitted = backend.submissions.borrow()[0].clone();
    assert_eq!(
        serde_json::to_value(&submitted).expect("serializes"),
        json!({ "target_type": "MOVIE", "target_id": 27, "rating": 5, "body": "Great movie" })
    );

    let reviews = load_reviews(&backend, 27).await;
    let ReviewsOutcome::Loaded(list) = &reviews else {
        panic!("reviews should load");
    };
    assert_eq!(list.len(), 1);
    assert_eq!(list[0].text(), Some("Great movie"));
    assert_eq!(list[0].rating, Some(5.0));

    let mut view = MovieView::loading(&ctx);
    view.apply_reviews(&reviews, &ctx);
    assert!(view.reviews.html.contains("Great movie"));
    assert!(view.reviews.html.contains("⭐ 5.0"));
    assert!(view.reviews.html.contains("2024-05-01"));
}

#[tokio::test(flavor = "current_thread")]
async fn expired_token_forces_logout() {
    let backend = FakeBackend::default();
    let session = Session::new(MemoryStore::default());
    session.establish(
        "stale-token",
        &Identity {
            email: "ann@example.com".to_string(),
            nickname: None,
        },
    );
    let draft = ReviewDraft {
        body: "Still good".to_string(),
        rating: 4,
    };

    assert_eq!(
        submit_review(&backend, &session, 27, &draft).await,
        SubmitOutcome::SessionExpired
    );
    assert_eq!(session.state(), SessionState::Anonymous);
    assert_eq!(session.store().get(TOKEN_KEY), None);
    assert_eq!(backend.calls(), vec!["submit:27".to_string()]);
}

#[tokio::test(flavor = "current_thread")]
async fn invalid_review_draft_sends_nothing() {
    let backend = FakeBackend::default();
    let session = logged_in_session();
    let blank = ReviewDraft::default();
    assert!(matches!(
        submit_review(&backend, &session, 27, &blank).await,
        SubmitOutcome::Invalid(_)
    ));
    assert!(backend.calls().is_empty());
}

#[tokio::test(flavor = "current_thread")]
async fn registration_requires_the_mailed_code() {
    let backend = FakeBackend::default();
    let mailer = FakeMailer::default();
    let pending = PendingVerification::new(MemoryStore::default(), TEN_MINUTES_MS);
    let now = 1_700_000_000_000;

    assert_eq!(
        send_verification(&mailer, &pending, "ann@example.com", 42, now).await,
        SendCodeOutcome::Sent
    );
    let (to, code) = mailer.sent.borrow()[0].clone();
    assert_eq!(to, "ann@example.com");
    assert_eq!(code.len(), 6);

    let mut form = RegistrationForm {
        email: "ann@example.com".to_string(),
        password: "secret".to_string(),
        code: "000000".to_string(),
        nickname: String::new(),
    };
    assert_eq!(
        register(&backend, &pending, &form, now + 1_000).await,
        RegisterOutcome::Unverified(VerifyError::Mismatch)
    );
    assert!(!backend.called("register:"));

    form.code = code.clone();
    assert_eq!(
        register(&backend, &pending, &form, now + TEN_MINUTES_MS + 1).await,
        RegisterOutcome::Unverified(VerifyError::Expired)
    );

    assert_eq!(
        register(&backend, &pending, &form, now + 2_000).await,
        RegisterOutcome::Registered
    );
    assert_eq!(backend.registered.borrow()[0].code, code);
    assert_eq!(
        register(&backend, &pending, &form, now + 3_000).await,
        RegisterOutcome::Unverified(VerifyError::NotIssued)
    );
}

#[tokio::test(flavor = "current_thread")]
async fn duplicate_registration_is_rejected_with_backend_reason() {
    let backend = FakeBackend::default();
    backend
        .accounts
        .borrow_mut()
        .insert("ann@example.com".to_string(), "old".to_string());
    let mailer = FakeMailer::default();
    let pending = PendingVerification::new(MemoryStore::default(), TEN_MINUTES_MS);
    send_verification(&mailer, &pending, "ann@example.com", 7, 0).await;
    let code = mailer.sent.borrow()[0].1.clone();
    let form = RegistrationForm {
        email: "ann@example.com".to_string(),
        password: "secret".to_string(),
        code,
        nickname: "Ann".to_string(),
    };
    assert_eq!(
        register(&backend, &pending, &form, 10).await,
        RegisterOutcome::Rejected("Email already registered".to_string())
    );
}

#[tokio::test(flavor = "current_thread")]
async fn failed_delivery_and_missing_email() {
    let mailer = FakeMailer {
        fail: true,
        ..FakeMailer::default()
    };
    let pending = PendingVerification::new(MemoryStore::default(), TEN_MINUTES_MS);
    assert!(matches!(
        send_verification(&mailer, &pending, "  ", 1, 0).await,
        SendCodeOutcome::Invalid(_)
    ));
    assert!(matches!(
        send_verification(&mailer, &pending, "ann@example.com", 1, 0).await,
        SendCodeOutcome::Failed(_)
    ));
}

#[tokio::test(flavor = "current_thread")]
async fn commands_are_relayed_verbatim() {
    let backend = FakeBackend::default();
    assert_eq!(relay_command(&backend, "   ").await, CommandOutcome::Ignored);
    assert_eq!(
        relay_command(&backend, " ping --all ").await,
        CommandOutcome::Output(json!({ "ok": true, "echo": "ping --all" }))
    );
    assert!(matches!(
        relay_command(&backend, "offline").await,
        CommandOutcome::Failed(_)
    ));
    assert_eq!(
        *backend.commands.borrow(),
        vec!["ping --all".to_string(), "offline".to_string()]
    );
}

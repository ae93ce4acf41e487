/// Application shell for the seat report site: shared user context, header,
/// and the page routes.
use leptos::*;
use leptos_meta::*;
use leptos_router::*;
use crate::client;
use crate::components::header::Header;
use crate::components::home_page::HomePage;
use crate::components::my_page::MyPage;
use crate::components::new_review_page::NewReviewPage;
use crate::components::review_detail::ReviewDetailPage;
use crate::components::review_edit::ReviewEditPage;
use crate::components::venue_page::VenuePage;

/// Id of the signed-in user, `None` for guests.
#[derive(Clone, Copy)]
pub struct CurrentUser(pub RwSignal<Option<String>>);

pub fn use_current_user() -> Signal<Option<String>> {
    match use_context::<CurrentUser>() {
        Some(CurrentUser(user)) => user.into(),
        None => Signal::derive(|| None),
    }
}

#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let user = create_rw_signal(None::<String>);
    provide_context(CurrentUser(user));

    // storage is only readable once hydrated in the browser
    create_effect(move |_| user.set(client::stored_user_id()));

    view! {
        <Stylesheet id="leptos" href="/pkg/seatrate.css"/>
        <Title text="Seat Reports"/>
        <Router>
            <Header/>
            <main>
                <Routes>
                    <Route path="/" view=HomePage/>
                    <Route path="/venue/:id" view=VenuePage/>
                    <Route path="/venue/:id/review" view=NewReviewPage/>
                    <Route path="/review/:review_id" view=ReviewDetailPage/>
                    <Route path="/review/:review_id/edit" view=ReviewEditPage/>
                    <Route path="/mypage" view=MyPage/>
                </Routes>
            </main>
        </Router>
    }
}

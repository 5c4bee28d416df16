use std::rc::Rc;

use leptos::*;
use leptos_meta::*;
use terminal_app::{BrowserNavigator, TerminalApp};
use terminal_engine::{HostServices, SystemClock};

use crate::content::load_terminal_config;

#[component]
pub fn SiteApp() -> impl IntoView {
    provide_meta_context();

    let body = match load_terminal_config() {
        Ok(config) => {
            logging::log!(
                "terminal ready: {} commands, {} links",
                config.registry.len(),
                config.links.len()
            );
            let host = HostServices::new(Rc::new(BrowserNavigator), Rc::new(SystemClock));
            view! { <TerminalApp config=Rc::new(config) host=host /> }.into_view()
        }
        Err(err) => {
            logging::error!("terminal content failed to load: {err}");
            view! { <pre class="site-error">{err.to_string()}</pre> }.into_view()
        }
    };

    view! {
        <Title text="Dozamigos Terminal" />
        <Meta name="description" content="Terminal web interativo para navegar entre os links Dozamigos." />

        <main class="site-root">{body}</main>
    }
}

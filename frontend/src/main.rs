mod api;
mod components;
mod session;
mod state;

use leptos::mount::mount_to_body;
use leptos::prelude::*;

use components::agent_panel::AgentPanel;

/// Root application component: page content with the agent panel docked beside it.
#[component]
fn App() -> impl IntoView {
    let (agent_collapsed, set_agent_collapsed) = signal(true);
    let toggle_agent = Callback::new(move |()| set_agent_collapsed.update(|c| *c = !*c));

    // Arms itself only while a token is present
    session::watch_inactivity(session::SESSION_TIMEOUT_MS);

    view! {
        <div class="app-layout">
            <main class="app-content"></main>
            <AgentPanel collapsed=agent_collapsed on_toggle=toggle_agent />
        </div>
    }
}

fn main() {
    console_log::init_with_level(log::Level::Debug).expect("Failed to init logger");
    mount_to_body(App);
}
